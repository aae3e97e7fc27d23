//! Browser backend built on `web-sys`.

use web_time::Duration;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, EventTarget, HtmlElement, HtmlInputElement};

use crate::binding::CounterHandle;
use crate::class_list::ClassList;
use crate::dom::Dom;
use crate::error::{Result, WidgetError};
use crate::widgets::CounterEvent;

fn js_error(err: JsValue) -> WidgetError {
    WidgetError::Dom(
        err.as_string()
            .unwrap_or_else(|| format!("{:?}", err)),
    )
}

fn as_input(node: &Element) -> Result<&HtmlInputElement> {
    node.dyn_ref::<HtmlInputElement>()
        .ok_or_else(|| WidgetError::Dom(format!("<{}> is not an input element", node.tag_name())))
}

/// [`Dom`] implementation over the page's `document`
#[derive(Debug, Clone)]
pub struct WebDom {
    document: Document,
}

impl WebDom {
    /// Use the current window's document.
    pub fn new() -> Result<Self> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| WidgetError::Dom("no document available".to_string()))?;
        Ok(Self { document })
    }

    pub fn from_document(document: Document) -> Self {
        Self { document }
    }
}

impl Dom for WebDom {
    type Node = Element;

    fn query_selector(&self, selector: &str) -> Result<Option<Element>> {
        self.document.query_selector(selector).map_err(js_error)
    }

    fn create_element(&mut self, tag: &str) -> Result<Element> {
        self.document.create_element(tag).map_err(js_error)
    }

    fn add_classes(&mut self, node: &Element, classes: &ClassList) -> Result<()> {
        let class_list = node.class_list();
        for class in classes.iter() {
            class_list.add_1(class).map_err(js_error)?;
        }
        Ok(())
    }

    fn append_child(&mut self, parent: &Element, child: &Element) -> Result<()> {
        parent.append_with_node_1(child).map_err(js_error)
    }

    fn remove(&mut self, node: &Element) -> Result<()> {
        node.remove();
        Ok(())
    }

    fn set_text(&mut self, node: &Element, text: &str) -> Result<()> {
        match node.dyn_ref::<HtmlElement>() {
            Some(html) => html.set_inner_text(text),
            None => node.set_text_content(Some(text)),
        }
        Ok(())
    }

    fn set_style(&mut self, node: &Element, property: &str, value: &str) -> Result<()> {
        let html = node
            .dyn_ref::<HtmlElement>()
            .ok_or_else(|| WidgetError::Dom("element has no inline style".to_string()))?;
        html.style().set_property(property, value).map_err(js_error)
    }

    fn set_input_type(&mut self, input: &Element, kind: &str) -> Result<()> {
        as_input(input)?.set_type(kind);
        Ok(())
    }

    fn input_value(&self, input: &Element) -> Result<String> {
        Ok(as_input(input)?.value())
    }

    fn set_input_value(&mut self, input: &Element, value: &str) -> Result<()> {
        as_input(input)?.set_value(value);
        Ok(())
    }

    fn select_all(&mut self, input: &Element) -> Result<()> {
        as_input(input)?.select();
        Ok(())
    }
}

/// An event listener that is removed from its target when dropped.
pub struct Listener {
    target: EventTarget,
    kind: &'static str,
    closure: Closure<dyn FnMut(Event)>,
}

impl Listener {
    pub fn attach<F>(target: &Element, kind: &'static str, handler: F) -> Result<Self>
    where
        F: FnMut(Event) + 'static,
    {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
        target
            .add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())
            .map_err(js_error)?;
        Ok(Self {
            target: target.clone().into(),
            kind,
            closure,
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.kind, self.closure.as_ref().unchecked_ref());
    }
}

/// A one-shot `setTimeout` that is cleared when dropped.
///
/// Must not be dropped from inside its own callback.
pub struct Timeout {
    id: i32,
    _closure: Closure<dyn FnMut()>,
}

impl Timeout {
    pub fn schedule<F>(delay: Duration, callback: F) -> Result<Self>
    where
        F: FnMut() + 'static,
    {
        let window =
            web_sys::window().ok_or_else(|| WidgetError::Dom("no window available".to_string()))?;
        let closure = Closure::wrap(Box::new(callback) as Box<dyn FnMut()>);
        let millis = i32::try_from(delay.as_millis()).unwrap_or(i32::MAX);
        let id = window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                millis,
            )
            .map_err(js_error)?;
        Ok(Self {
            id,
            _closure: closure,
        })
    }
}

impl Drop for Timeout {
    fn drop(&mut self) {
        if let Some(window) = web_sys::window() {
            window.clear_timeout_with_handle(self.id);
        }
    }
}

/// Wire click and focus listeners to a mounted counter.
///
/// The returned listeners must be kept alive for as long as the counter should
/// react to the page; dropping them unbinds the counter.
pub fn bind_counter(handle: &CounterHandle<WebDom>) -> Result<Vec<Listener>> {
    let (minus, input, plus) = handle.elements();
    let bindings = [
        (&plus, "click", CounterEvent::PlusClick),
        (&minus, "click", CounterEvent::MinusClick),
        (&input, "focusin", CounterEvent::FocusIn),
        (&input, "focusout", CounterEvent::FocusOut),
    ];

    bindings
        .into_iter()
        .map(|(target, kind, event)| {
            let handle = handle.clone();
            Listener::attach(target, kind, move |_: Event| {
                handle.dispatch(event);
            })
        })
        .collect()
}
