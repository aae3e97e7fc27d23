//! tally - rolling digit spinner and bounded counter widgets
//!
//! Page-level wiring for the `tally_ui` widgets: configuration, setup, logging,
//! a native demo and the browser entry points.

pub mod config;
pub mod demo;
pub mod error;
mod logging;
pub mod page;

#[cfg(test)]
mod tests;

pub use config::{CounterMount, LogLevel, PageConfig, SpinnerMount};
pub use demo::run_demo;
pub use error::{AppError, Result};
pub use logging::init_logging;
pub use page::{MountedCounter, Page, mount_counters, mount_page};

// WASM entry point
#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(target_arch = "wasm32")]
pub use wasm::*;
