//! Tests for page setup and the scripted demo session.

use tally_ui::{
    CounterEvent, CounterOptions, Dom, MemoryDom, SpinnerOptions, WidgetError,
};
use web_time::{Duration, Instant};

use crate::config::{CounterMount, PageConfig, SpinnerMount};
use crate::demo::{build_skeleton, run_demo};
use crate::error::AppError;
use crate::page::{mount_counters, mount_page};

fn default_page_dom() -> MemoryDom {
    let mut dom = MemoryDom::new();
    build_skeleton(&mut dom, &PageConfig::default()).unwrap();
    dom
}

#[test]
fn test_mount_default_page() {
    let mut dom = default_page_dom();
    let page = mount_page(&mut dom, &PageConfig::default()).unwrap();

    assert_eq!(page.counters().len(), 3);
    assert_eq!(page.counter("#counter-1").unwrap().value(), -20.0);
    assert_eq!(page.counter("#counter-2").unwrap().value(), -10.0);
    assert_eq!(page.counter("#counter-3").unwrap().value(), 0.0);

    let logo = dom.query_selector(".logo").unwrap().unwrap();
    assert_eq!(dom.children(logo).len(), 2);
    assert!(page.spinner().is_some());
}

#[test]
fn test_five_clicks_on_negative_counter() {
    let mut dom = default_page_dom();
    let mut page = mount_page(&mut dom, &PageConfig::default()).unwrap();

    let counter = page.counter_mut("#counter-1").unwrap();
    for _ in 0..5 {
        counter.handle(&mut dom, CounterEvent::PlusClick).unwrap();
    }
    assert_eq!(counter.value(), -15.0);
    assert_eq!(dom.value(*counter.input()), Some("-15"));
}

#[test]
fn test_counters_are_independent() {
    let mut dom = default_page_dom();
    let mut page = mount_page(&mut dom, &PageConfig::default()).unwrap();

    page.counter_mut("#counter-3")
        .unwrap()
        .increment(&mut dom)
        .unwrap();
    assert_eq!(page.counter("#counter-3").unwrap().value(), 1.0);
    assert_eq!(page.counter("#counter-2").unwrap().value(), -10.0);
}

#[test]
fn test_missing_container_rolls_back() {
    let mut dom = MemoryDom::new();
    let body = dom.body();
    let first = dom.append_matching(body, "#a").unwrap();

    let config = PageConfig {
        counters: vec![
            CounterMount::new("#a", CounterOptions::default()),
            CounterMount::new("#b", CounterOptions::default()),
        ],
        spinner: None,
        ..PageConfig::default()
    };
    let err = mount_page(&mut dom, &config).unwrap_err();
    assert!(matches!(
        err,
        AppError::Widget(WidgetError::ContainerNotFound { ref selector }) if selector == "#b"
    ));
    assert!(dom.children(first).is_empty());
}

#[test]
fn test_missing_spinner_container() {
    let mut dom = MemoryDom::new();
    let config = PageConfig {
        counters: Vec::new(),
        spinner: Some(SpinnerMount {
            container: "#wheel".to_string(),
            options: SpinnerOptions::default(),
        }),
        ..PageConfig::default()
    };
    assert!(mount_page(&mut dom, &config).is_err());
}

#[test]
fn test_mount_counters_with_handles() {
    let mut dom = MemoryDom::new();
    let body = dom.body();
    let a = dom.append_element(body, "div", None, "").unwrap();
    let b = dom.append_element(body, "div", None, "").unwrap();

    let counters = mount_counters(
        &mut dom,
        [
            (a, CounterOptions::range(0.0, 20.0).with_start(50.0)),
            (b, CounterOptions::range(0.0, 20.0).with_start(5.0)),
        ],
    )
    .unwrap();
    assert_eq!(counters[0].value(), 0.0);
    assert_eq!(counters[1].value(), 5.0);
    assert_eq!(dom.children(a).len(), 3);
}

#[test]
fn test_mount_counters_rolls_back_on_failure() {
    let mut dom = MemoryDom::new();
    let body = dom.body();
    let a = dom.append_element(body, "div", None, "").unwrap();

    // A handle from another document does not resolve here
    let mut other = MemoryDom::new();
    let other_body = other.body();
    let foreign = (0..10)
        .map(|_| other.append_element(other_body, "div", None, "").unwrap())
        .last()
        .unwrap();

    let result = mount_counters(
        &mut dom,
        [
            (a, CounterOptions::range(0.0, 20.0)),
            (foreign, CounterOptions::range(0.0, 20.0)),
        ],
    );
    assert!(matches!(result, Err(AppError::Widget(WidgetError::Dom(_)))));
    assert!(dom.children(a).is_empty());
}

#[test]
fn test_page_spinner_transition_window() {
    let mut dom = default_page_dom();
    let mut page = mount_page(&mut dom, &PageConfig::default()).unwrap();
    let logo = dom.query_selector(".logo").unwrap().unwrap();
    let spinner = page.spinner_mut().unwrap();

    let start = Instant::now();
    spinner.shift(&mut dom, start).unwrap();
    assert_eq!(dom.children(logo).len(), 3);
    assert!(matches!(
        spinner.shift(&mut dom, start + Duration::from_millis(500)),
        Err(WidgetError::TransitionPending)
    ));
    spinner
        .tick(&mut dom, start + Duration::from_millis(2000))
        .unwrap();
    assert_eq!(dom.children(logo).len(), 2);
}

#[test]
fn test_destroy_page() {
    let mut dom = default_page_dom();
    let mut page = mount_page(&mut dom, &PageConfig::default()).unwrap();
    page.destroy(&mut dom).unwrap();

    for selector in ["#counter-1", "#counter-2", "#counter-3", ".logo"] {
        let container = dom.query_selector(selector).unwrap().unwrap();
        assert!(dom.children(container).is_empty(), "{selector} not emptied");
    }
}

#[test]
fn test_run_demo_markup() {
    let markup = run_demo(&PageConfig::default()).unwrap();

    // counter-1: -20 + 3 - 1 = -18, then "not a number" rejected, then -10 committed
    assert!(markup.contains("value=\"-10\""));
    // counter-3: 0 + 3 - 1 = 2, then midpoint 10 committed
    assert!(markup.contains("value=\"10\""));
    // Spinner settled on two slides after 12 shifts: digits 2 and 3
    assert!(markup.contains(
        "<div class=\"logo__number\" style=\"top: 0px\">2</div>\
         <div class=\"logo__number\" style=\"top: 142px\">3</div>"
    ));
}
