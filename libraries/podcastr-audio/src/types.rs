//! Driver configuration and observer payloads

use podcastr_playback::{PlaybackEvent, PlaybackSnapshot};
use serde::{Deserialize, Serialize};

/// Per-episode device session phase
///
/// ```text
/// NoEpisode --play/play_list--> Loading --metadata--> Ready
/// Ready/Paused --playing--> Playing --paused--> Paused
/// Playing --ended & has_next--> Loading
/// Playing --ended & !has_next--> NoEpisode
/// any --clear--> NoEpisode
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Nothing loaded
    #[default]
    NoEpisode,

    /// Source requested, metadata not yet reported
    Loading,

    /// Metadata loaded, not playing
    Ready,

    /// Device playing
    Playing,

    /// Device paused mid-episode
    Paused,
}

/// What to do when the device reports a load/decode failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Treat like `Ended`, giving up after one failure per queued episode
    #[default]
    Skip,

    /// Clear the player on the first failure
    Stop,
}

/// Configuration for the audio driver
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriverConfig {
    /// Device failure handling (default: skip)
    #[serde(default)]
    pub failure_policy: FailurePolicy,

    /// Buffered updates per observer before updates are dropped (default: 32)
    #[serde(default = "default_subscriber_capacity")]
    pub subscriber_capacity: usize,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            failure_policy: FailurePolicy::default(),
            subscriber_capacity: default_subscriber_capacity(),
        }
    }
}

fn default_subscriber_capacity() -> usize {
    32
}

/// Driver-level notices that have no controller counterpart
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DriverNotice {
    /// Session phase moved
    PhaseChanged {
        /// New phase
        phase: SessionPhase,
    },

    /// Device could not play the current source
    DeviceFailed {
        /// Device-supplied reason
        message: String,
    },
}

/// What observers receive after every command or device event that changed
/// something
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerUpdate {
    /// State after the change
    pub snapshot: PlaybackSnapshot,

    /// Controller events since the previous update
    pub events: Vec<PlaybackEvent>,

    /// Driver notices since the previous update
    pub notices: Vec<DriverNotice>,

    /// Device session phase after the change
    pub phase: SessionPhase,
}
