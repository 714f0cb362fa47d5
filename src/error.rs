//! Error types for studytimer

use thiserror::Error;

/// Errors raised by the timer state machine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimerError {
    /// The custom-minutes entry is not a positive whole number
    #[error("invalid custom minutes {input:?}: please enter a valid number of minutes")]
    InvalidCustomMinutes { input: String },
}

/// Errors raised while bringing up the terminal application.
#[derive(Debug, Error)]
pub enum AppError {
    /// Terminal or filesystem failure
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The log file or global subscriber could not be installed
    #[error("failed to initialize logging: {0}")]
    Logging(#[source] Box<dyn std::error::Error + Send + Sync>),
}
