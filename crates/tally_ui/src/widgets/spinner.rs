//! Rolling digit display.
//!
//! Two slides are stacked inside the container, one slide-height apart. Each
//! [`Spinner::shift`] pushes the top slide out above the container, moves the
//! bottom slide up and appends a fresh slide carrying the next digit. The
//! outgoing slide stays attached until the transition completes.

use serde::{Deserialize, Serialize};
use web_time::{Duration, Instant};

use crate::class_list::ClassList;
use crate::constants::{SLIDE_CLASS, SLIDE_HEIGHT, SLIDE_TAG, TRANSITION_MS};
use crate::digit::DigitCycle;
use crate::dom::Dom;
use crate::error::{Result, WidgetError};

/// Configuration for a [`Spinner`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpinnerOptions {
    /// Classes applied to every slide
    #[serde(default = "default_slide_class")]
    pub slide_class: ClassList,

    /// Distance between stacked slides, in pixels
    #[serde(default = "default_slide_height")]
    pub slide_height: i32,

    /// How long the outgoing slide stays attached, in milliseconds
    #[serde(default = "default_transition_ms")]
    pub transition_ms: u64,
}

fn default_slide_class() -> ClassList {
    ClassList::parse(SLIDE_CLASS)
}

fn default_slide_height() -> i32 {
    SLIDE_HEIGHT
}

fn default_transition_ms() -> u64 {
    TRANSITION_MS
}

impl Default for SpinnerOptions {
    fn default() -> Self {
        Self {
            slide_class: default_slide_class(),
            slide_height: default_slide_height(),
            transition_ms: default_transition_ms(),
        }
    }
}

impl SpinnerOptions {
    pub fn transition(&self) -> Duration {
        Duration::from_millis(self.transition_ms)
    }
}

/// A shift whose outgoing slide has not been removed yet
#[derive(Debug, Clone, Copy)]
struct Transition {
    deadline: Instant,
}

/// Odometer-style digit spinner mounted into a container element.
#[derive(Debug)]
pub struct Spinner<D: Dom> {
    container: D::Node,
    /// Mounted slides, top-most (outgoing) first
    slides: Vec<D::Node>,
    digits: DigitCycle,
    options: SpinnerOptions,
    pending: Option<Transition>,
    destroyed: bool,
}

impl<D: Dom> Spinner<D> {
    /// Resolve `selector` and mount a spinner into the matching element.
    pub fn new(dom: &mut D, selector: &str, options: SpinnerOptions) -> Result<Self> {
        let container = dom
            .query_selector(selector)?
            .ok_or_else(|| WidgetError::ContainerNotFound {
                selector: selector.to_string(),
            })?;
        Self::mount(dom, container, options)
    }

    /// Mount a spinner into an already resolved container.
    pub fn mount(dom: &mut D, container: D::Node, options: SpinnerOptions) -> Result<Self> {
        let mut spinner = Self {
            container,
            slides: Vec::with_capacity(3),
            digits: DigitCycle::new(),
            options,
            pending: None,
            destroyed: false,
        };
        spinner.render(dom, 0)?;
        spinner.render(dom, 1)?;
        log::debug!("Spinner: mounted, next digit = {}", spinner.digits.peek());
        Ok(spinner)
    }

    /// Advance the display by one digit.
    ///
    /// Fails with [`WidgetError::TransitionPending`] while the previous shift's
    /// outgoing slide is still attached. The DOM is left untouched in that case.
    pub fn shift(&mut self, dom: &mut D, now: Instant) -> Result<()> {
        if self.destroyed {
            return Err(WidgetError::Destroyed);
        }
        if self.pending.is_some() {
            log::warn!("Spinner: shift rejected, transition still pending");
            return Err(WidgetError::TransitionPending);
        }

        let height = self.options.slide_height;
        dom.set_style(&self.slides[0], "top", &px(-height))?;
        dom.set_style(&self.slides[1], "top", &px(0))?;
        self.render(dom, 1)?;

        self.pending = Some(Transition {
            deadline: now + self.options.transition(),
        });
        log::debug!(
            "Spinner: shifted, {} slides mounted, next digit = {}",
            self.slides.len(),
            self.digits.peek()
        );
        Ok(())
    }

    /// Complete the pending transition if its deadline has passed.
    ///
    /// Returns true when an outgoing slide was removed.
    pub fn tick(&mut self, dom: &mut D, now: Instant) -> Result<bool> {
        match self.pending {
            Some(transition) if now >= transition.deadline => self.complete(dom),
            _ => Ok(false),
        }
    }

    /// Complete the pending transition immediately, regardless of its deadline.
    pub fn finish_transition(&mut self, dom: &mut D) -> Result<bool> {
        if self.pending.is_none() {
            return Ok(false);
        }
        self.complete(dom)
    }

    /// Time left before the pending transition may complete
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.pending
            .map(|t| t.deadline.saturating_duration_since(now))
    }

    pub fn is_transitioning(&self) -> bool {
        self.pending.is_some()
    }

    /// Detach every slide. The spinner cannot be shifted afterwards.
    pub fn destroy(&mut self, dom: &mut D) -> Result<()> {
        self.pending = None;
        self.destroyed = true;
        for slide in self.slides.drain(..) {
            dom.remove(&slide)?;
        }
        log::debug!("Spinner: destroyed");
        Ok(())
    }

    pub fn container(&self) -> &D::Node {
        &self.container
    }

    /// Mounted slides, top-most first
    pub fn slides(&self) -> &[D::Node] {
        &self.slides
    }

    /// Digit the next appended slide will show
    pub fn next_digit(&self) -> u8 {
        self.digits.peek()
    }

    pub fn options(&self) -> &SpinnerOptions {
        &self.options
    }

    fn complete(&mut self, dom: &mut D) -> Result<bool> {
        self.pending = None;
        if self.slides.is_empty() {
            return Ok(false);
        }
        let outgoing = self.slides.remove(0);
        dom.remove(&outgoing)?;
        log::debug!("Spinner: transition complete, {} slides mounted", self.slides.len());
        Ok(true)
    }

    /// Append a slide showing the next digit at stacking position `index`.
    fn render(&mut self, dom: &mut D, index: i32) -> Result<()> {
        let slide = dom.create_element(SLIDE_TAG)?;
        dom.add_classes(&slide, &self.options.slide_class)?;
        let digit = self.digits.advance();
        dom.set_text(&slide, &digit.to_string())?;
        dom.set_style(&slide, "top", &px(index * self.options.slide_height))?;
        dom.append_child(&self.container, &slide)?;
        self.slides.push(slide);
        Ok(())
    }
}

fn px(offset: i32) -> String {
    format!("{}px", offset)
}
