//! Logger setup: `env_logger` natively, the browser console on wasm.

use crate::config::LogLevel;
use crate::error::{AppError, Result};

/// Install the global logger. `RUST_LOG` overrides `level` on native builds.
#[cfg(not(target_arch = "wasm32"))]
pub fn init_logging(level: LogLevel) -> Result<()> {
    env_logger::Builder::new()
        .filter_level(level.to_level_filter())
        .parse_default_env()
        .try_init()
        .map_err(|e| AppError::Logger(e.to_string()))
}

/// Install the global logger and the panic hook.
#[cfg(target_arch = "wasm32")]
pub fn init_logging(level: LogLevel) -> Result<()> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(level.to_level()).map_err(|e| AppError::Logger(e.to_string()))
}
