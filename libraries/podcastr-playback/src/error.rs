//! Error types for playback control

use thiserror::Error;

/// Playback errors
///
/// The controller itself never fails; these are returned only by the
/// checked variants of commands (e.g. `try_play_list`).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlaybackError {
    /// Requested start index is outside the supplied list
    #[error("Index {index} out of bounds for list of {len} episodes")]
    IndexOutOfBounds { index: usize, len: usize },

    /// Operation needs a non-empty queue
    #[error("Queue is empty")]
    EmptyQueue,

    /// Operation needs a current episode
    #[error("No episode loaded")]
    NoEpisodeLoaded,
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
