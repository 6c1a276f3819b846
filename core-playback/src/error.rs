//! # Playback Error Types

use thiserror::Error;

/// Errors that can occur during playback operations.
///
/// Invalid-state commands (pause while stopped, resume while playing) are
/// deliberately *not* errors; the engine treats them as silent no-ops.
#[derive(Error, Debug)]
pub enum PlaybackError {
    /// Track was not found in storage.
    #[error("Track not found: {0}")]
    TrackNotFound(String),

    /// Failed to open or prepare an audio source.
    #[error("Failed to open audio source: {0}")]
    SourceError(String),

    /// I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal error (should not occur in normal operation).
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type for playback operations.
pub type Result<T> = std::result::Result<T, PlaybackError>;
