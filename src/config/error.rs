//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Temperature must be between 0.0 and 1.0")]
    TemperatureOutOfRange,

    #[error("Nucleus sampling threshold (top_p) must be between 0.0 and 1.0")]
    TopPOutOfRange,

    #[error("Candidate pool width (top_k) must be positive")]
    InvalidTopK,

    #[error("Maximum output tokens must be positive")]
    InvalidMaxOutputTokens,
}
