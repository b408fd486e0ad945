//! Persistence errors.

use thiserror::Error;

/// Result alias for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors raised while writing or reading session snapshots.
///
/// Persistence is best-effort durability: a `StoreError` never rolls back
/// the in-memory mutation that preceded it. Callers log it and move on.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Filesystem failure.
    #[error("snapshot io failure: {0}")]
    Io(#[from] std::io::Error),

    /// Snapshot (de)serialization failure.
    #[error("snapshot serialization failure: {0}")]
    Serde(#[from] serde_json::Error),
}
