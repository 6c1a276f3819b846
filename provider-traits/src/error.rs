//! Error types shared by all file providers.

use thiserror::Error;

/// Errors surfaced by provider infrastructure.
///
/// Missing files and directories are deliberately *not* represented here;
/// those are encoded in return values (`None` / empty listing) so callers
/// can treat them as normal outcomes.
#[derive(Error, Debug)]
pub enum ProviderError {
    /// I/O error on an open stream or during listing.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Path could not be interpreted by this provider.
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    /// Operation is not supported by this backend.
    #[error("Unsupported operation: {0}")]
    Unsupported(String),
}

/// Result type for provider operations.
pub type Result<T> = std::result::Result<T, ProviderError>;
