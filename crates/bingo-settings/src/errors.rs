//! Settings loading errors.

use thiserror::Error;

/// Result alias for settings operations.
pub type Result<T> = std::result::Result<T, SettingsError>;

/// Errors raised while loading the settings file.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The settings file could not be read.
    #[error("failed to read settings file: {0}")]
    Io(#[from] std::io::Error),

    /// The settings file is not valid JSON or has mismatched types.
    #[error("failed to parse settings: {0}")]
    Json(#[from] serde_json::Error),
}
