//! Error types for stripnest.

use thiserror::Error;

/// Result type alias for stripnest operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while configuring or running a packing job.
///
/// Geometry routines never report through this type: a degenerate ring or a
/// failed orbit yields an empty result, and the packer defers the item.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid geometry provided.
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// The background packing worker stopped abnormally.
    #[error("Packing worker failed: {0}")]
    WorkerFailed(String),
}
