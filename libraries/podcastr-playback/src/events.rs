//! Playback Events
//!
//! Change notifications queued by the controller. Events are emitted when:
//! - A new episode becomes current (play, play list, next, previous)
//! - The playing / looping / shuffling flags flip
//! - Progress moves (device tick or seek)
//! - The queue is cleared
//!
//! Consumers pull them with `PlaybackController::drain_events`.

use serde::{Deserialize, Serialize};

/// Events emitted by the playback controller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackEvent {
    /// A (possibly identical) episode was selected and progress reset
    EpisodeChanged {
        /// Queue index of the new current episode
        index: usize,
        /// Title of the new current episode
        title: String,
    },

    /// `is_playing` changed
    PlayingChanged {
        /// New value
        playing: bool,
    },

    /// `is_looping` changed
    LoopingChanged {
        /// New value
        looping: bool,
    },

    /// `is_shuffling` changed
    ShufflingChanged {
        /// New value
        shuffling: bool,
    },

    /// Progress of the current episode moved
    ProgressChanged {
        /// Position in whole seconds
        seconds: u64,
    },

    /// Queue emptied; no episode is current
    QueueCleared,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_serialize_with_variant_tag() {
        let json = serde_json::to_string(&PlaybackEvent::PlayingChanged { playing: true }).unwrap();
        assert_eq!(json, r#"{"PlayingChanged":{"playing":true}}"#);
    }
}
