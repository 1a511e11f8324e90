//! Read-only views of playback state for rendering surfaces

use crate::time::format_duration;
use crate::types::{Episode, PlaybackState};
use serde::{Deserialize, Serialize};

/// Owned copy of the controller state plus derived navigation flags
///
/// Re-evaluated after every command; observers never see the live state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaybackSnapshot {
    /// Full state at the time of the snapshot
    pub state: PlaybackState,

    /// Derived `has_next`
    pub has_next: bool,

    /// Derived `has_previous`
    pub has_previous: bool,
}

impl PlaybackSnapshot {
    /// Capture `state` and its derived flags
    pub fn capture(state: &PlaybackState) -> Self {
        Self {
            has_next: state.has_next(),
            has_previous: state.has_previous(),
            state: state.clone(),
        }
    }

    /// Current episode, if any
    pub fn current_episode(&self) -> Option<&Episode> {
        self.state.current_episode()
    }

    /// Which transport controls are usable
    pub fn controls(&self) -> Controls {
        let has_episode = self.current_episode().is_some();

        Controls {
            can_toggle_play: has_episode,
            can_toggle_loop: has_episode,
            can_toggle_shuffle: has_episode && self.state.queue.len() > 1,
            can_play_previous: has_episode && self.has_previous,
            can_play_next: has_episode && self.has_next,
        }
    }

    /// `"<progress> / <duration>"` for the current episode
    pub fn progress_label(&self) -> String {
        let duration = self
            .current_episode()
            .map(|e| e.duration_seconds)
            .unwrap_or(0);
        let progress = if self.current_episode().is_some() {
            self.state.progress_seconds
        } else {
            0
        };

        format!("{} / {}", format_duration(progress), format_duration(duration))
    }
}

/// Availability of transport controls
///
/// Shuffle is pointless with a single episode, so it is disabled there even
/// though `has_next` would be true while shuffling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Controls {
    pub can_toggle_play: bool,
    pub can_toggle_loop: bool,
    pub can_toggle_shuffle: bool,
    pub can_play_previous: bool,
    pub can_play_next: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn episode(title: &str, duration_seconds: u64) -> Episode {
        Episode {
            title: title.to_string(),
            members: "Host".to_string(),
            thumbnail_url: String::new(),
            duration_seconds,
            media_url: format!("https://cdn.example/{}.mp3", title),
        }
    }

    #[test]
    fn empty_snapshot_disables_everything() {
        let snapshot = PlaybackSnapshot::capture(&PlaybackState::default());

        assert_eq!(snapshot.controls(), Controls::default());
        assert_eq!(snapshot.progress_label(), "00:00:00 / 00:00:00");
    }

    #[test]
    fn single_episode_cannot_shuffle() {
        let state = PlaybackState {
            queue: vec![episode("a", 100)],
            is_playing: true,
            ..Default::default()
        };
        let controls = PlaybackSnapshot::capture(&state).controls();

        assert!(controls.can_toggle_play);
        assert!(controls.can_toggle_loop);
        assert!(!controls.can_toggle_shuffle);
        assert!(!controls.can_play_next);
        assert!(!controls.can_play_previous);
    }

    #[test]
    fn middle_of_queue_enables_navigation() {
        let state = PlaybackState {
            queue: vec![episode("a", 100), episode("b", 100), episode("c", 100)],
            current_index: 1,
            ..Default::default()
        };
        let controls = PlaybackSnapshot::capture(&state).controls();

        assert!(controls.can_toggle_shuffle);
        assert!(controls.can_play_next);
        assert!(controls.can_play_previous);
    }

    #[test]
    fn progress_label_uses_current_episode() {
        let state = PlaybackState {
            queue: vec![episode("a", 100), episode("b", 3725)],
            current_index: 1,
            progress_seconds: 65,
            ..Default::default()
        };

        assert_eq!(
            PlaybackSnapshot::capture(&state).progress_label(),
            "00:01:05 / 01:02:05"
        );
    }
}
