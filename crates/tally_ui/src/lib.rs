//! tally_ui - DOM widgets: a rolling digit spinner and a bounded counter
//!
//! Widgets are generic over [`Dom`], so the same code drives the in-memory
//! [`MemoryDom`] natively and the `web-sys` backed `WebDom` in the browser.

mod binding;
mod callback;
mod class_list;
pub mod constants;
mod digit;
mod dom;
mod error;
mod memory_dom;
pub mod widgets;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use binding::{CounterHandle, SpinnerHandle};
pub use callback::Callback;
pub use class_list::ClassList;
pub use digit::DigitCycle;
pub use dom::Dom;
pub use error::{Result, WidgetError};
pub use memory_dom::{MemoryDom, NodeId};
pub use widgets::{
    Counter, CounterEvent, CounterMessage, CounterOptions, EntryOutcome, ManualEntry,
    RejectReason, Spinner, SpinnerOptions,
};

#[cfg(target_arch = "wasm32")]
pub use web::{bind_counter, Listener, Timeout, WebDom};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::dom::Dom;
    pub use crate::error::{Result, WidgetError};
    pub use crate::memory_dom::MemoryDom;
    pub use crate::widgets::*;
}
