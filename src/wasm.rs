use std::cell::RefCell;
use std::rc::Rc;

use js_sys::{Function, JSON, Promise};
use tally_ui::{
    Callback, Counter, CounterHandle, CounterMessage, CounterOptions, Listener, Spinner,
    SpinnerHandle, SpinnerOptions, Timeout, WebDom, bind_counter,
};
use wasm_bindgen::prelude::*;
use web_sys::Element;
use web_time::Instant;

use crate::config::{LogLevel, PageConfig};
use crate::logging::init_logging;
use crate::page::mount_page;

#[wasm_bindgen(start)]
pub fn start() {
    if let Err(e) = init_logging(LogLevel::default()) {
        web_sys::console::log_1(&format!("tally: {}", e).into());
    }
    log::info!("tally widgets loaded");
}

fn to_js(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Deserialize a plain JS options object through its JSON form.
fn options_from_js<T>(options: &JsValue) -> Result<T, JsValue>
where
    T: serde::de::DeserializeOwned + Default,
{
    if options.is_undefined() || options.is_null() {
        return Ok(T::default());
    }
    let json: String = JSON::stringify(options)?.into();
    serde_json::from_str(&json).map_err(to_js)
}

/// Parse a page config given as a JSON string or a plain object.
///
/// Both forms go through [`PageConfig::from_json`] so the version check applies.
fn page_config_from_js(config: &JsValue) -> Result<PageConfig, JsValue> {
    if config.is_undefined() || config.is_null() {
        return Ok(PageConfig::default());
    }
    let json: String = match config.as_string() {
        Some(json) => json,
        None => JSON::stringify(config)?.into(),
    };
    PageConfig::from_json(&json).map_err(to_js)
}

fn new_dom() -> Result<Rc<RefCell<WebDom>>, JsValue> {
    Ok(Rc::new(RefCell::new(WebDom::new().map_err(to_js)?)))
}

/// Numeric stepper bound to the page.
#[wasm_bindgen]
pub struct CounterWidget {
    handle: CounterHandle<WebDom>,
    listeners: Vec<Listener>,
}

impl CounterWidget {
    fn bind(handle: CounterHandle<WebDom>) -> Result<Self, JsValue> {
        let listeners = bind_counter(&handle).map_err(to_js)?;
        Ok(Self { handle, listeners })
    }
}

#[wasm_bindgen]
impl CounterWidget {
    /// Mount a counter into `container`. `options` is a plain object such as
    /// `{ min: -20, max: 0, plusClass: "btn btn-plus" }`.
    #[wasm_bindgen(constructor)]
    pub fn new(container: Element, options: JsValue) -> Result<CounterWidget, JsValue> {
        let options: CounterOptions = options_from_js(&options)?;
        let dom = new_dom()?;
        let counter = Counter::new(&mut *dom.borrow_mut(), container, options).map_err(to_js)?;
        Self::bind(CounterHandle::new(dom, counter))
    }

    #[wasm_bindgen(getter)]
    pub fn value(&self) -> f64 {
        self.handle.value()
    }

    pub fn increment(&self) {
        self.handle.dispatch(tally_ui::CounterEvent::PlusClick);
    }

    pub fn decrement(&self) {
        self.handle.dispatch(tally_ui::CounterEvent::MinusClick);
    }

    /// Commit `value` if it is within range. Returns whether it was accepted.
    #[wasm_bindgen(js_name = setValue)]
    pub fn set_value(&self, value: f64) -> Result<bool, JsValue> {
        self.handle.set_value(value).map_err(to_js)
    }

    /// `on_change(value)` runs after every value change; `on_reject(text, reason)`
    /// runs when a typed entry is discarded.
    #[wasm_bindgen(js_name = setListeners)]
    pub fn set_listeners(&self, on_change: Option<Function>, on_reject: Option<Function>) {
        self.handle
            .set_on_message(Callback::new(move |message: &CounterMessage| {
                let result = match message {
                    CounterMessage::Changed(value) => on_change
                        .as_ref()
                        .map(|f| f.call1(&JsValue::NULL, &JsValue::from_f64(*value))),
                    CounterMessage::Rejected { text, reason } => on_reject.as_ref().map(|f| {
                        f.call2(
                            &JsValue::NULL,
                            &JsValue::from_str(text),
                            &JsValue::from_str(&reason.to_string()),
                        )
                    }),
                };
                if let Some(Err(e)) = result {
                    log::error!("Counter listener threw: {:?}", e);
                }
            }));
    }

    /// Unbind listeners and detach the counter's elements.
    pub fn destroy(&mut self) -> Result<(), JsValue> {
        self.listeners.clear();
        self.handle.destroy().map_err(to_js)
    }
}

/// Removal timer of an in-flight shift and the resolver of its promise
struct PendingShift {
    _timer: Timeout,
    resolve: Function,
}

/// Rolling digit display bound to the page.
#[wasm_bindgen]
pub struct SpinnerWidget {
    handle: SpinnerHandle<WebDom>,
    pending: Option<PendingShift>,
}

impl SpinnerWidget {
    fn wrap(handle: SpinnerHandle<WebDom>) -> Self {
        Self {
            handle,
            pending: None,
        }
    }
}

#[wasm_bindgen]
impl SpinnerWidget {
    #[wasm_bindgen(constructor)]
    pub fn new(selector: &str, options: JsValue) -> Result<SpinnerWidget, JsValue> {
        let options: SpinnerOptions = options_from_js(&options)?;
        let dom = new_dom()?;
        let spinner = Spinner::new(&mut *dom.borrow_mut(), selector, options).map_err(to_js)?;
        Ok(Self::wrap(SpinnerHandle::new(dom, spinner)))
    }

    /// Advance by one digit. Throws while the previous shift is still in flight.
    ///
    /// The returned promise resolves once the outgoing slide has been removed.
    pub fn shift(&mut self) -> Result<Promise, JsValue> {
        self.handle.shift(Instant::now()).map_err(to_js)?;

        let delay = self.handle.transition();
        let mut scheduled = None;
        let promise = Promise::new(&mut |resolve: Function, _reject: Function| {
            let handle = self.handle.clone();
            let on_fire = resolve.clone();
            let timer = Timeout::schedule(delay, move || {
                handle.finish_transition();
                let _ = on_fire.call0(&JsValue::NULL);
            });
            scheduled = Some(timer.map(|timer| PendingShift {
                _timer: timer,
                resolve,
            }));
        });

        match scheduled {
            Some(Ok(pending)) => {
                // A fired timer is cleared harmlessly when replaced
                self.pending = Some(pending);
                Ok(promise)
            }
            Some(Err(e)) => {
                // Without a timer the transition would never finish
                self.handle.finish_transition();
                Err(to_js(e))
            }
            None => {
                self.handle.finish_transition();
                Err(JsValue::from_str("promise executor did not run"))
            }
        }
    }

    #[wasm_bindgen(getter, js_name = isTransitioning)]
    pub fn is_transitioning(&self) -> bool {
        self.handle.is_transitioning()
    }

    /// Cancel any pending transition timer and detach every slide.
    ///
    /// A promise still waiting on the cancelled timer resolves here.
    pub fn destroy(&mut self) -> Result<(), JsValue> {
        let pending = self.pending.take();
        let result = self.handle.destroy().map_err(to_js);
        if let Some(pending) = pending {
            let _ = pending.resolve.call0(&JsValue::NULL);
        }
        result
    }
}

/// Widgets mounted by [`mount_page_js`]
#[wasm_bindgen]
pub struct MountedPage {
    counters: Vec<CounterWidget>,
    spinner: Option<SpinnerWidget>,
}

#[wasm_bindgen]
impl MountedPage {
    #[wasm_bindgen(getter, js_name = counterCount)]
    pub fn counter_count(&self) -> usize {
        self.counters.len()
    }

    /// Value of the counter at `index`, in config order
    #[wasm_bindgen(js_name = counterValue)]
    pub fn counter_value(&self, index: usize) -> Option<f64> {
        self.counters.get(index).map(CounterWidget::value)
    }

    /// Shift the page spinner, if one was mounted.
    #[wasm_bindgen(js_name = shiftSpinner)]
    pub fn shift_spinner(&mut self) -> Result<Option<Promise>, JsValue> {
        self.spinner.as_mut().map(SpinnerWidget::shift).transpose()
    }

    pub fn destroy(&mut self) -> Result<(), JsValue> {
        for counter in &mut self.counters {
            counter.destroy()?;
        }
        if let Some(spinner) = &mut self.spinner {
            spinner.destroy()?;
        }
        Ok(())
    }
}

/// Mount every widget described by a page config object against `document`.
///
/// Passing `undefined` mounts the default page.
#[wasm_bindgen(js_name = mountPage)]
pub fn mount_page_js(config: JsValue) -> Result<MountedPage, JsValue> {
    let config = page_config_from_js(&config)?;
    log::set_max_level(config.log_level.to_level_filter());

    let dom = new_dom()?;
    let page = mount_page(&mut *dom.borrow_mut(), &config).map_err(to_js)?;
    let (counters, spinner) = page.into_parts();

    let counters = counters
        .into_iter()
        .map(|mounted| {
            CounterWidget::bind(CounterHandle::new(Rc::clone(&dom), mounted.counter))
        })
        .collect::<Result<Vec<_>, _>>()?;
    let spinner = spinner
        .map(|spinner| SpinnerWidget::wrap(SpinnerHandle::new(Rc::clone(&dom), spinner)));

    Ok(MountedPage { counters, spinner })
}
