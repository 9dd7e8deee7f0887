//! Snapshot error types.

use thiserror::Error;

/// Errors that can occur during snapshot operations
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// Serialization to JSON or binary format failed
    #[error("Serialization failed: {0}")]
    Serialization(String),

    /// Deserialization from JSON or binary format failed
    #[error("Deserialization failed: {0}")]
    Deserialization(String),

    /// Snapshot version is not supported by this version of the crate
    #[error("Unsupported snapshot version {found}, supported: {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },

    /// Underlying storage slot could not be read or written
    #[error("Storage access failed: {0}")]
    Storage(#[from] std::io::Error),
}
