//! Optional listener wrapper for widget messages.
//!
//! Bindings keep a `Callback<T>` per widget instead of repeating
//! `Option<Box<dyn Fn(&T)>>` everywhere.

use std::fmt;

/// An optional handler invoked with a reference to each emitted value.
pub struct Callback<T> {
    f: Option<Box<dyn Fn(&T)>>,
}

impl<T> Callback<T> {
    /// Create a new callback from a function.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&T) + 'static,
    {
        Self {
            f: Some(Box::new(f)),
        }
    }

    /// Create an empty callback (no handler).
    pub fn none() -> Self {
        Self { f: None }
    }

    /// Call the handler with `value`, if one is set.
    ///
    /// Returns true when a handler ran.
    pub fn call(&self, value: &T) -> bool {
        match &self.f {
            Some(f) => {
                f(value);
                true
            }
            None => false,
        }
    }

    pub fn is_some(&self) -> bool {
        self.f.is_some()
    }

    pub fn is_none(&self) -> bool {
        self.f.is_none()
    }
}

impl<T> Default for Callback<T> {
    fn default() -> Self {
        Self::none()
    }
}

impl<T> fmt::Debug for Callback<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callback")
            .field("set", &self.is_some())
            .finish()
    }
}
