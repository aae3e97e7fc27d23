use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WidgetError {
    #[error("No element matches container selector '{selector}'")]
    ContainerNotFound { selector: String },

    #[error("Spinner transition still pending")]
    TransitionPending,

    #[error("Widget has been destroyed")]
    Destroyed,

    #[error("DOM error: {0}")]
    Dom(String),
}

pub type Result<T> = std::result::Result<T, WidgetError>;
