//! Scripted session against the in-memory document.
//!
//! Builds a page skeleton matching the config's container selectors, mounts the
//! widgets and replays a short interaction for each of them.

use tally_ui::{CounterEvent, CounterMessage, Dom, MemoryDom};
use web_time::{Duration, Instant};

use crate::config::PageConfig;
use crate::error::Result;
use crate::page::{Page, mount_page};

/// Number of spinner shifts replayed by the demo
const DEMO_SHIFTS: usize = 12;

/// Append one element per configured container to the document body.
pub fn build_skeleton(dom: &mut MemoryDom, config: &PageConfig) -> Result<()> {
    let body = dom.body();
    let selectors = config
        .spinner
        .iter()
        .map(|s| s.container.as_str())
        .chain(config.counters.iter().map(|c| c.container.as_str()));

    for selector in selectors {
        if dom.query_selector(selector)?.is_none() {
            dom.append_matching(body, selector)?;
        }
    }
    Ok(())
}

/// Mount `config` into a fresh document, replay the session and return the
/// resulting markup.
pub fn run_demo(config: &PageConfig) -> Result<String> {
    let mut dom = MemoryDom::new();
    build_skeleton(&mut dom, config)?;
    let mut page = mount_page(&mut dom, config)?;

    exercise_counters(&mut dom, &mut page, config)?;
    exercise_spinner(&mut dom, &mut page)?;

    Ok(dom.render(dom.body()))
}

fn exercise_counters(
    dom: &mut MemoryDom,
    page: &mut Page<MemoryDom>,
    config: &PageConfig,
) -> Result<()> {
    for mount in &config.counters {
        let Some(counter) = page.counter_mut(&mount.container) else {
            continue;
        };

        let mut events = vec![CounterEvent::PlusClick; 3];
        events.push(CounterEvent::MinusClick);
        for event in events {
            if let Some(CounterMessage::Changed(value)) = counter.handle(dom, event)? {
                log::info!("{}: {:?} -> {}", mount.container, event, value);
            }
        }

        // A rejected entry followed by an accepted one
        let midpoint = ((counter.options().min + counter.options().max) / 2.0).floor();
        for text in ["not a number".to_string(), midpoint.to_string()] {
            counter.handle(dom, CounterEvent::FocusIn)?;
            dom.type_text(*counter.input(), &text)?;
            match counter.handle(dom, CounterEvent::FocusOut)? {
                Some(CounterMessage::Rejected { text, reason }) => {
                    log::info!("{}: entry '{}' rejected ({})", mount.container, text, reason);
                }
                Some(CounterMessage::Changed(value)) => {
                    log::info!("{}: entry committed -> {}", mount.container, value);
                }
                None => {}
            }
        }
    }
    Ok(())
}

fn exercise_spinner(dom: &mut MemoryDom, page: &mut Page<MemoryDom>) -> Result<()> {
    let Some(spinner) = page.spinner_mut() else {
        return Ok(());
    };

    let mut now = Instant::now();
    let step = spinner.options().transition();
    for _ in 0..DEMO_SHIFTS {
        spinner.shift(dom, now)?;

        // Shifting again mid-transition is refused
        if let Err(e) = spinner.shift(dom, now + step / 2) {
            log::debug!("Spinner: second shift refused: {}", e);
        }

        now += step + Duration::from_millis(1);
        spinner.tick(dom, now)?;
    }
    log::info!(
        "Spinner: {} shifts replayed, next digit = {}",
        DEMO_SHIFTS,
        spinner.next_digit()
    );
    Ok(())
}
