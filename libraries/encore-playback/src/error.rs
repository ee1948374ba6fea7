//! Error types for playback management

use encore_core::EncoreError;
use thiserror::Error;

/// Playback errors
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// Index outside the queue bounds
    #[error("Invalid index {index} for queue of length {len}")]
    InvalidIndex { index: usize, len: usize },

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// The player task is no longer running
    #[error("Player has shut down")]
    PlayerClosed,

    /// Collaborator failure surfaced to a caller
    #[error(transparent)]
    Collaborator(#[from] EncoreError),
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
