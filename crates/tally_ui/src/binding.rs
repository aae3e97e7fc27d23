//! Shared widget handles for event-driven bindings.
//!
//! A handle owns its widget and document behind `Rc<RefCell<_>>` so that event
//! listeners and timers can reach them. Every dispatch borrows with `try_borrow_mut`:
//! a listener firing while the widget is already busy (for example a focus-out
//! triggered by removing a focused input) is dropped with a warning instead of
//! panicking.

use std::cell::RefCell;
use std::rc::Rc;

use web_time::{Duration, Instant};

use crate::callback::Callback;
use crate::dom::Dom;
use crate::error::{Result, WidgetError};
use crate::widgets::{Counter, CounterEvent, CounterMessage, Spinner};

/// Cloneable handle to a mounted [`Counter`]
pub struct CounterHandle<D: Dom> {
    dom: Rc<RefCell<D>>,
    counter: Rc<RefCell<Counter<D>>>,
    on_message: Rc<RefCell<Callback<CounterMessage>>>,
}

impl<D: Dom> Clone for CounterHandle<D> {
    fn clone(&self) -> Self {
        Self {
            dom: Rc::clone(&self.dom),
            counter: Rc::clone(&self.counter),
            on_message: Rc::clone(&self.on_message),
        }
    }
}

impl<D: Dom> CounterHandle<D> {
    pub fn new(dom: Rc<RefCell<D>>, counter: Counter<D>) -> Self {
        Self {
            dom,
            counter: Rc::new(RefCell::new(counter)),
            on_message: Rc::new(RefCell::new(Callback::none())),
        }
    }

    /// Register the listener for [`CounterMessage`]s, replacing any previous one.
    pub fn set_on_message(&self, callback: Callback<CounterMessage>) {
        *self.on_message.borrow_mut() = callback;
    }

    /// Forward an interaction to the counter and notify the listener.
    pub fn dispatch(&self, event: CounterEvent) -> Option<CounterMessage> {
        let result = {
            let (Ok(mut dom), Ok(mut counter)) =
                (self.dom.try_borrow_mut(), self.counter.try_borrow_mut())
            else {
                log::warn!("Counter: {:?} dropped, widget busy", event);
                return None;
            };
            counter.handle(&mut *dom, event)
        };

        match result {
            Ok(Some(message)) => {
                self.on_message.borrow().call(&message);
                Some(message)
            }
            Ok(None) => None,
            Err(WidgetError::Destroyed) => None,
            Err(e) => {
                log::error!("Counter: {:?} failed: {}", event, e);
                None
            }
        }
    }

    pub fn value(&self) -> f64 {
        self.counter.borrow().value()
    }

    /// Minus button, input and plus button, in mount order
    pub fn elements(&self) -> (D::Node, D::Node, D::Node) {
        let counter = self.counter.borrow();
        (
            counter.minus().clone(),
            counter.input().clone(),
            counter.plus().clone(),
        )
    }

    pub fn set_value(&self, value: f64) -> Result<bool> {
        let mut dom = self.dom.borrow_mut();
        self.counter.borrow_mut().set_value(&mut *dom, value)
    }

    pub fn destroy(&self) -> Result<()> {
        *self.on_message.borrow_mut() = Callback::none();
        let mut dom = self.dom.borrow_mut();
        self.counter.borrow_mut().destroy(&mut *dom)
    }
}

/// Cloneable handle to a mounted [`Spinner`]
pub struct SpinnerHandle<D: Dom> {
    dom: Rc<RefCell<D>>,
    spinner: Rc<RefCell<Spinner<D>>>,
}

impl<D: Dom> Clone for SpinnerHandle<D> {
    fn clone(&self) -> Self {
        Self {
            dom: Rc::clone(&self.dom),
            spinner: Rc::clone(&self.spinner),
        }
    }
}

impl<D: Dom> SpinnerHandle<D> {
    pub fn new(dom: Rc<RefCell<D>>, spinner: Spinner<D>) -> Self {
        Self {
            dom,
            spinner: Rc::new(RefCell::new(spinner)),
        }
    }

    pub fn shift(&self, now: Instant) -> Result<()> {
        let mut dom = self.dom.borrow_mut();
        self.spinner.borrow_mut().shift(&mut *dom, now)
    }

    pub fn tick(&self, now: Instant) -> Result<bool> {
        let mut dom = self.dom.borrow_mut();
        self.spinner.borrow_mut().tick(&mut *dom, now)
    }

    /// Remove the outgoing slide now. Errors are logged, not returned, since this
    /// runs from timer callbacks.
    pub fn finish_transition(&self) -> bool {
        let (Ok(mut dom), Ok(mut spinner)) =
            (self.dom.try_borrow_mut(), self.spinner.try_borrow_mut())
        else {
            log::warn!("Spinner: transition completion skipped, widget busy");
            return false;
        };
        match spinner.finish_transition(&mut *dom) {
            Ok(removed) => removed,
            Err(e) => {
                log::error!("Spinner: failed to complete transition: {}", e);
                false
            }
        }
    }

    pub fn transition(&self) -> Duration {
        self.spinner.borrow().options().transition()
    }

    pub fn is_transitioning(&self) -> bool {
        self.spinner.borrow().is_transitioning()
    }

    pub fn slide_count(&self) -> usize {
        self.spinner.borrow().slides().len()
    }

    pub fn destroy(&self) -> Result<()> {
        let mut dom = self.dom.borrow_mut();
        self.spinner.borrow_mut().destroy(&mut *dom)
    }
}
