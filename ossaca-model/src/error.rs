use thiserror::Error;

/// Errors raised while reading entity values from text.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("Invalid date '{0}': expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Invalid time '{0}': expected HH:MM:SS")]
    InvalidTime(String),
}
