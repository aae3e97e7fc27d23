//! Document abstraction the widgets mount into.
//!
//! Widgets never talk to a browser directly. They go through [`Dom`], which is
//! implemented by [`crate::MemoryDom`] for tests and native builds, and by
//! `WebDom` (wasm32 only) on top of `web-sys`.

use std::fmt;

use crate::class_list::ClassList;
use crate::error::Result;

/// Minimal set of document operations needed by the widgets.
///
/// Node handles are cheap to clone and refer to the same underlying element.
pub trait Dom {
    /// Handle to an element owned by this document
    type Node: Clone + fmt::Debug;

    /// Find the first element matching `selector`.
    fn query_selector(&self, selector: &str) -> Result<Option<Self::Node>>;

    /// Create a detached element with the given tag name.
    fn create_element(&mut self, tag: &str) -> Result<Self::Node>;

    /// Add every class in `classes` to the element's class list.
    fn add_classes(&mut self, node: &Self::Node, classes: &ClassList) -> Result<()>;

    /// Append `child` as the last child of `parent`.
    fn append_child(&mut self, parent: &Self::Node, child: &Self::Node) -> Result<()>;

    /// Detach an element from its parent. Detaching a detached element is a no-op.
    fn remove(&mut self, node: &Self::Node) -> Result<()>;

    /// Replace the rendered text of an element.
    fn set_text(&mut self, node: &Self::Node, text: &str) -> Result<()>;

    /// Set an inline style property.
    fn set_style(&mut self, node: &Self::Node, property: &str, value: &str) -> Result<()>;

    /// Set the `type` of an input element.
    fn set_input_type(&mut self, input: &Self::Node, kind: &str) -> Result<()>;

    /// Current text of an input element.
    fn input_value(&self, input: &Self::Node) -> Result<String>;

    /// Replace the text of an input element.
    fn set_input_value(&mut self, input: &Self::Node, value: &str) -> Result<()>;

    /// Select the whole text of an input element.
    fn select_all(&mut self, input: &Self::Node) -> Result<()>;
}
