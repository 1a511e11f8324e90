/// Audio driver errors
use thiserror::Error;

/// Result type for audio operations
pub type Result<T> = std::result::Result<T, AudioError>;

/// Audio errors
#[derive(Debug, Error)]
pub enum AudioError {
    /// Device rejected or failed a command
    #[error("Device error: {0}")]
    Device(String),

    /// Device does not know how to open this media
    #[error("Unknown media source: {0}")]
    UnknownSource(String),

    /// Controller rejected the command
    #[error("Playback error: {0}")]
    Playback(#[from] podcastr_playback::PlaybackError),
}
