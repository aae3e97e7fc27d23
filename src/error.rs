//! Application-wide error type.

pub use crate::config::ConfigError;
pub use tally_ui::WidgetError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Widget error: {0}")]
    Widget(#[from] WidgetError),

    #[error("Logger error: {0}")]
    Logger(String),
}

pub type Result<T> = std::result::Result<T, AppError>;
