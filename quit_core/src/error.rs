//! Error types for the quit_core library.

use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for quit_core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Plan parameters failed validation
    #[error("Invalid plan: {0}")]
    InvalidPlan(String),

    /// User-supplied text could not be parsed
    #[error("Parse error: {0}")]
    Parse(String),

    /// An operation needed a stored plan but none exists
    #[error("No quit plan found. Create one with `quitplan plan create`.")]
    NoPlan,
}
