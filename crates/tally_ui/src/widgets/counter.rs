//! Bounded numeric stepper: minus button, text input, plus button.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::class_list::ClassList;
use crate::constants::{
    format_number, parse_number, trim_js, COUNTER_VALUE_CLASS, DEFAULT_INPUT_CLASS, DEFAULT_MAX,
    DEFAULT_MIN, DEFAULT_MINUS_CLASS, DEFAULT_PLUS_CLASS,
};
use crate::dom::Dom;
use crate::error::{Result, WidgetError};

/// How manually typed fractional values are treated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ManualEntry {
    /// Accept any in-range number, fractional or not
    #[default]
    AcceptFractional,
    /// Reject typed values with a fractional part
    RequireInteger,
}

/// Configuration for a [`Counter`].
///
/// Field names follow the widget's JavaScript option names (`minusClass`, ...).
/// `min <= max` is assumed, not checked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CounterOptions {
    /// Inclusive lower bound
    #[serde(default = "default_min")]
    pub min: f64,

    /// Inclusive upper bound
    #[serde(default = "default_max")]
    pub max: f64,

    /// Initial value, used only when within range
    #[serde(default)]
    pub start: Option<f64>,

    #[serde(default = "default_minus_class")]
    pub minus_class: ClassList,

    #[serde(default = "default_plus_class")]
    pub plus_class: ClassList,

    #[serde(default = "default_input_class")]
    pub input_class: ClassList,

    #[serde(default)]
    pub manual_entry: ManualEntry,
}

fn default_min() -> f64 {
    DEFAULT_MIN
}

fn default_max() -> f64 {
    DEFAULT_MAX
}

fn default_minus_class() -> ClassList {
    ClassList::parse(DEFAULT_MINUS_CLASS)
}

fn default_plus_class() -> ClassList {
    ClassList::parse(DEFAULT_PLUS_CLASS)
}

fn default_input_class() -> ClassList {
    ClassList::parse(DEFAULT_INPUT_CLASS)
}

impl Default for CounterOptions {
    fn default() -> Self {
        Self {
            min: default_min(),
            max: default_max(),
            start: None,
            minus_class: default_minus_class(),
            plus_class: default_plus_class(),
            input_class: default_input_class(),
            manual_entry: ManualEntry::default(),
        }
    }
}

impl CounterOptions {
    /// Options with the given range and every other field at its default.
    pub fn range(min: f64, max: f64) -> Self {
        Self {
            min,
            max,
            ..Self::default()
        }
    }

    pub fn with_start(mut self, start: f64) -> Self {
        self.start = Some(start);
        self
    }

    pub fn with_manual_entry(mut self, manual_entry: ManualEntry) -> Self {
        self.manual_entry = manual_entry;
        self
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// `start` when present and in range, otherwise `min`
    pub fn initial_value(&self) -> f64 {
        match self.start {
            Some(start) if self.contains(start) => start,
            _ => self.min,
        }
    }
}

/// Why a manual entry was discarded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// Blank or whitespace-only text
    Empty,
    /// Text does not convert to a number
    NotANumber,
    /// Number outside `[min, max]`
    OutOfRange,
    /// Fractional number under [`ManualEntry::RequireInteger`]
    NotAnInteger,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectReason::Empty => write!(f, "empty entry"),
            RejectReason::NotANumber => write!(f, "not a number"),
            RejectReason::OutOfRange => write!(f, "out of range"),
            RejectReason::NotAnInteger => write!(f, "not an integer"),
        }
    }
}

/// Result of validating the input's text on blur
#[derive(Debug, Clone, PartialEq)]
pub enum EntryOutcome {
    Committed(f64),
    /// The input was reverted to the last committed value
    Rejected { text: String, reason: RejectReason },
}

/// Interactions a binding forwards to [`Counter::handle`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterEvent {
    PlusClick,
    MinusClick,
    FocusIn,
    FocusOut,
}

/// Notifications produced by [`Counter::handle`]
#[derive(Debug, Clone, PartialEq)]
pub enum CounterMessage {
    /// The value moved to a new number
    Changed(f64),
    /// A manual entry was discarded
    Rejected { text: String, reason: RejectReason },
}

/// Numeric stepper mounted into a container element.
#[derive(Debug)]
pub struct Counter<D: Dom> {
    container: D::Node,
    options: CounterOptions,
    value: f64,
    minus: D::Node,
    input: D::Node,
    plus: D::Node,
    destroyed: bool,
}

impl<D: Dom> Counter<D> {
    /// Build the three child elements, append them to `container` and render the
    /// initial value.
    pub fn new(dom: &mut D, container: D::Node, options: CounterOptions) -> Result<Self> {
        let value = options.initial_value();

        let input = dom.create_element("input")?;
        dom.add_classes(&input, &ClassList::parse(COUNTER_VALUE_CLASS))?;
        dom.set_input_type(&input, "text")?;

        let minus = dom.create_element("button")?;
        let plus = dom.create_element("button")?;

        dom.add_classes(&minus, &options.minus_class)?;
        dom.add_classes(&input, &options.input_class)?;
        dom.add_classes(&plus, &options.plus_class)?;

        dom.append_child(&container, &minus)?;
        dom.append_child(&container, &input)?;
        dom.append_child(&container, &plus)?;

        let counter = Self {
            container,
            options,
            value,
            minus,
            input,
            plus,
            destroyed: false,
        };
        counter.render(dom)?;
        log::debug!(
            "Counter: mounted, range = [{}, {}], value = {}",
            counter.options.min,
            counter.options.max,
            counter.value
        );
        Ok(counter)
    }

    /// Resolve `selector` and mount a counter into the matching element.
    pub fn from_selector(dom: &mut D, selector: &str, options: CounterOptions) -> Result<Self> {
        let container = dom
            .query_selector(selector)?
            .ok_or_else(|| WidgetError::ContainerNotFound {
                selector: selector.to_string(),
            })?;
        Self::new(dom, container, options)
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn options(&self) -> &CounterOptions {
        &self.options
    }

    pub fn container(&self) -> &D::Node {
        &self.container
    }

    pub fn minus(&self) -> &D::Node {
        &self.minus
    }

    pub fn input(&self) -> &D::Node {
        &self.input
    }

    pub fn plus(&self) -> &D::Node {
        &self.plus
    }

    /// Step up by one. Returns false (and changes nothing) at the upper bound.
    pub fn increment(&mut self, dom: &mut D) -> Result<bool> {
        self.step(dom, 1.0)
    }

    /// Step down by one. Returns false (and changes nothing) at the lower bound.
    pub fn decrement(&mut self, dom: &mut D) -> Result<bool> {
        self.step(dom, -1.0)
    }

    fn step(&mut self, dom: &mut D, delta: f64) -> Result<bool> {
        self.ensure_mounted()?;
        let next = self.value + delta;
        if !self.options.contains(next) {
            log::debug!("Counter: step to {} outside range, ignored", next);
            return Ok(false);
        }
        self.value = next;
        self.render(dom)?;
        log::debug!("Counter: stepped, value = {}", self.value);
        Ok(true)
    }

    /// Check manually entered text against the configured range.
    pub fn validate(&self, text: &str) -> std::result::Result<f64, RejectReason> {
        if trim_js(text).is_empty() {
            return Err(RejectReason::Empty);
        }
        let value = parse_number(text).ok_or(RejectReason::NotANumber)?;
        if !self.options.contains(value) {
            return Err(RejectReason::OutOfRange);
        }
        if self.options.manual_entry == ManualEntry::RequireInteger && value.fract() != 0.0 {
            return Err(RejectReason::NotAnInteger);
        }
        Ok(value)
    }

    /// Validate the input's current text and either commit it or revert the input.
    pub fn commit_entry(&mut self, dom: &mut D) -> Result<EntryOutcome> {
        self.ensure_mounted()?;
        let text = dom.input_value(&self.input)?;
        match self.validate(&text) {
            Ok(value) => {
                self.value = value;
                self.render(dom)?;
                log::debug!("Counter: entry committed, value = {}", value);
                Ok(EntryOutcome::Committed(value))
            }
            Err(reason) => {
                self.render(dom)?;
                log::debug!("Counter: entry '{}' rejected ({})", text, reason);
                Ok(EntryOutcome::Rejected { text, reason })
            }
        }
    }

    /// Commit `value` programmatically. Out-of-range values are ignored.
    pub fn set_value(&mut self, dom: &mut D, value: f64) -> Result<bool> {
        self.ensure_mounted()?;
        if !self.options.contains(value) {
            return Ok(false);
        }
        self.value = value;
        self.render(dom)?;
        Ok(true)
    }

    /// Write the current value into the input.
    pub fn render(&self, dom: &mut D) -> Result<()> {
        dom.set_input_value(&self.input, &format_number(self.value))
    }

    /// Dispatch a DOM interaction.
    pub fn handle(&mut self, dom: &mut D, event: CounterEvent) -> Result<Option<CounterMessage>> {
        let before = self.value;
        match event {
            CounterEvent::PlusClick => {
                let changed = self.increment(dom)?;
                Ok(changed.then_some(CounterMessage::Changed(self.value)))
            }
            CounterEvent::MinusClick => {
                let changed = self.decrement(dom)?;
                Ok(changed.then_some(CounterMessage::Changed(self.value)))
            }
            CounterEvent::FocusIn => {
                self.ensure_mounted()?;
                dom.select_all(&self.input)?;
                Ok(None)
            }
            CounterEvent::FocusOut => match self.commit_entry(dom)? {
                EntryOutcome::Committed(value) if value != before => {
                    Ok(Some(CounterMessage::Changed(value)))
                }
                EntryOutcome::Committed(_) => Ok(None),
                EntryOutcome::Rejected { text, reason } => {
                    Ok(Some(CounterMessage::Rejected { text, reason }))
                }
            },
        }
    }

    /// Detach the three child elements. The counter is inert afterwards.
    pub fn destroy(&mut self, dom: &mut D) -> Result<()> {
        if self.destroyed {
            return Ok(());
        }
        self.destroyed = true;
        dom.remove(&self.minus)?;
        dom.remove(&self.input)?;
        dom.remove(&self.plus)?;
        log::debug!("Counter: destroyed");
        Ok(())
    }

    fn ensure_mounted(&self) -> Result<()> {
        if self.destroyed {
            Err(WidgetError::Destroyed)
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory_dom::{MemoryDom, NodeId};

    fn mount(options: CounterOptions) -> (MemoryDom, NodeId, Counter<MemoryDom>) {
        let mut dom = MemoryDom::new();
        let body = dom.body();
        let container = dom
            .append_element(body, "div", Some("counter"), "counter")
            .unwrap();
        let counter = Counter::new(&mut dom, container, options).unwrap();
        (dom, container, counter)
    }

    fn shown(dom: &MemoryDom, counter: &Counter<MemoryDom>) -> String {
        dom.value(*counter.input()).unwrap().to_string()
    }

    #[test]
    fn test_defaults() {
        let options = CounterOptions::default();
        assert_eq!(options.min, 1.0);
        assert_eq!(options.max, 10.0);
        assert_eq!(options.start, None);
        assert_eq!(options.minus_class.to_string(), "counter__button-minus");
        assert_eq!(options.plus_class.to_string(), "counter__button-plus");
        assert_eq!(options.input_class.to_string(), "counter__input");
    }

    #[test]
    fn test_partial_options_keep_defaults() {
        let options: CounterOptions =
            serde_json::from_str(r#"{"min": -20, "max": 0, "plusClass": "btn btn-plus"}"#)
                .unwrap();
        assert_eq!(options.min, -20.0);
        assert_eq!(options.max, 0.0);
        assert_eq!(options.plus_class.to_string(), "btn btn-plus");
        assert_eq!(options.minus_class.to_string(), "counter__button-minus");
        assert_eq!(options.manual_entry, ManualEntry::AcceptFractional);
    }

    #[test]
    fn test_mount_structure() {
        let (dom, container, counter) = mount(CounterOptions::default());
        let children = dom.children(container);
        assert_eq!(children, &[*counter.minus(), *counter.input(), *counter.plus()]);
        assert_eq!(dom.tag(children[0]), Some("button"));
        assert_eq!(dom.tag(children[1]), Some("input"));
        assert_eq!(dom.tag(children[2]), Some("button"));
        assert_eq!(dom.input_type(*counter.input()), Some("text"));
        assert_eq!(
            dom.classes(*counter.input()).unwrap().to_string(),
            "counter__value counter__input"
        );
        assert_eq!(shown(&dom, &counter), "1");
    }

    #[test]
    fn test_negative_range_without_start() {
        let (mut dom, _, mut counter) = mount(CounterOptions::range(-20.0, 0.0));
        assert_eq!(counter.value(), -20.0);
        assert_eq!(shown(&dom, &counter), "-20");
        for _ in 0..5 {
            counter.handle(&mut dom, CounterEvent::PlusClick).unwrap();
        }
        assert_eq!(counter.value(), -15.0);
        assert_eq!(shown(&dom, &counter), "-15");
    }

    #[test]
    fn test_out_of_range_start_falls_back_to_min() {
        let (_, _, counter) = mount(CounterOptions::range(0.0, 20.0).with_start(50.0));
        assert_eq!(counter.value(), 0.0);

        let (_, _, counter) = mount(CounterOptions::range(0.0, 20.0).with_start(7.0));
        assert_eq!(counter.value(), 7.0);
    }

    #[test]
    fn test_increment_stops_at_max() {
        let (mut dom, _, mut counter) = mount(CounterOptions::range(0.0, 3.0));
        for expected in 1..=3 {
            assert!(counter.increment(&mut dom).unwrap());
            assert_eq!(shown(&dom, &counter), expected.to_string());
        }
        assert!(!counter.increment(&mut dom).unwrap());
        assert_eq!(counter.value(), 3.0);
        assert_eq!(counter.handle(&mut dom, CounterEvent::PlusClick).unwrap(), None);
    }

    #[test]
    fn test_decrement_stops_at_min() {
        let (mut dom, _, mut counter) = mount(CounterOptions::range(-2.0, 2.0).with_start(0.0));
        assert_eq!(
            counter.handle(&mut dom, CounterEvent::MinusClick).unwrap(),
            Some(CounterMessage::Changed(-1.0))
        );
        assert!(counter.decrement(&mut dom).unwrap());
        assert!(!counter.decrement(&mut dom).unwrap());
        assert_eq!(counter.value(), -2.0);
        assert_eq!(shown(&dom, &counter), "-2");
    }

    #[test]
    fn test_focus_in_selects_text() {
        let (mut dom, _, mut counter) = mount(CounterOptions::range(0.0, 200.0).with_start(150.0));
        counter.handle(&mut dom, CounterEvent::FocusIn).unwrap();
        assert_eq!(dom.selection(*counter.input()), Some((0, 3)));
    }

    #[test]
    fn test_blur_commits_valid_entry() {
        let (mut dom, _, mut counter) = mount(CounterOptions::range(0.0, 20.0).with_start(5.0));
        dom.type_text(*counter.input(), " 12 ").unwrap();
        let message = counter.handle(&mut dom, CounterEvent::FocusOut).unwrap();
        assert_eq!(message, Some(CounterMessage::Changed(12.0)));
        assert_eq!(shown(&dom, &counter), "12");

        dom.type_text(*counter.input(), "12").unwrap();
        assert_eq!(counter.handle(&mut dom, CounterEvent::FocusOut).unwrap(), None);
    }

    #[test]
    fn test_blur_reverts_whitespace_entry() {
        let (mut dom, _, mut counter) = mount(CounterOptions::range(0.0, 20.0).with_start(5.0));
        dom.type_text(*counter.input(), "  ").unwrap();
        let outcome = counter.commit_entry(&mut dom).unwrap();
        assert_eq!(
            outcome,
            EntryOutcome::Rejected {
                text: "  ".to_string(),
                reason: RejectReason::Empty
            }
        );
        assert_eq!(shown(&dom, &counter), "5");
        assert_eq!(counter.value(), 5.0);
    }

    #[test]
    fn test_blur_uses_browser_whitespace_rules() {
        let (mut dom, _, mut counter) = mount(CounterOptions::range(0.0, 20.0).with_start(5.0));
        let cases = [
            ("\u{feff}", RejectReason::Empty),
            ("\u{3000}\u{feff}", RejectReason::Empty),
            ("\u{85}7", RejectReason::NotANumber),
        ];
        for (text, reason) in cases {
            dom.type_text(*counter.input(), text).unwrap();
            assert_eq!(
                counter.commit_entry(&mut dom).unwrap(),
                EntryOutcome::Rejected {
                    text: text.to_string(),
                    reason
                }
            );
            assert_eq!(shown(&dom, &counter), "5");
        }

        dom.type_text(*counter.input(), "\u{feff}7\u{a0}").unwrap();
        assert_eq!(
            counter.commit_entry(&mut dom).unwrap(),
            EntryOutcome::Committed(7.0)
        );
    }

    #[test]
    fn test_blur_rejections() {
        let (mut dom, _, mut counter) = mount(CounterOptions::range(0.0, 20.0).with_start(5.0));
        let cases = [
            ("abc", RejectReason::NotANumber),
            ("NaN", RejectReason::NotANumber),
            ("21", RejectReason::OutOfRange),
            ("-1", RejectReason::OutOfRange),
            ("Infinity", RejectReason::OutOfRange),
        ];
        for (text, reason) in cases {
            dom.type_text(*counter.input(), text).unwrap();
            let message = counter.handle(&mut dom, CounterEvent::FocusOut).unwrap();
            assert_eq!(
                message,
                Some(CounterMessage::Rejected {
                    text: text.to_string(),
                    reason
                })
            );
            assert_eq!(shown(&dom, &counter), "5");
        }
    }

    #[test]
    fn test_fractional_entry_policy() {
        let (mut dom, _, mut counter) = mount(CounterOptions::range(0.0, 20.0));
        dom.type_text(*counter.input(), "3.5").unwrap();
        assert_eq!(
            counter.commit_entry(&mut dom).unwrap(),
            EntryOutcome::Committed(3.5)
        );
        assert_eq!(shown(&dom, &counter), "3.5");
        counter.increment(&mut dom).unwrap();
        assert_eq!(shown(&dom, &counter), "4.5");

        let options =
            CounterOptions::range(0.0, 20.0).with_manual_entry(ManualEntry::RequireInteger);
        let (mut dom, _, mut counter) = mount(options);
        dom.type_text(*counter.input(), "3.5").unwrap();
        assert!(matches!(
            counter.commit_entry(&mut dom).unwrap(),
            EntryOutcome::Rejected {
                reason: RejectReason::NotAnInteger,
                ..
            }
        ));
        dom.type_text(*counter.input(), "0x0A").unwrap();
        assert_eq!(
            counter.commit_entry(&mut dom).unwrap(),
            EntryOutcome::Committed(10.0)
        );
        assert_eq!(shown(&dom, &counter), "10");
    }

    #[test]
    fn test_set_value_respects_range() {
        let (mut dom, _, mut counter) = mount(CounterOptions::range(0.0, 20.0));
        assert!(counter.set_value(&mut dom, 20.0).unwrap());
        assert!(!counter.set_value(&mut dom, 21.0).unwrap());
        assert_eq!(shown(&dom, &counter), "20");
    }

    #[test]
    fn test_destroy_detaches_children() {
        let (mut dom, container, mut counter) = mount(CounterOptions::default());
        counter.destroy(&mut dom).unwrap();
        assert!(dom.children(container).is_empty());
        assert_eq!(
            counter.increment(&mut dom).unwrap_err(),
            WidgetError::Destroyed
        );
        counter.destroy(&mut dom).unwrap();
    }

    #[test]
    fn test_from_selector_missing_container() {
        let mut dom = MemoryDom::new();
        let err = Counter::from_selector(&mut dom, "#counter-9", CounterOptions::default())
            .unwrap_err();
        assert!(matches!(err, WidgetError::ContainerNotFound { .. }));
    }
}
