//! Core types for playback control

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Episode information supplied by the catalog
///
/// Immutable once handed to the controller. Deserializes from both the
/// long field names and the catalog's short ones (`thumbnail`, `duration`,
/// `url`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Episode {
    /// Episode title
    pub title: String,

    /// Attribution / cast line
    pub members: String,

    /// Cover art location
    #[serde(alias = "thumbnail")]
    pub thumbnail_url: String,

    /// Length in whole seconds
    #[serde(alias = "duration")]
    pub duration_seconds: u64,

    /// Playable resource locator
    #[serde(alias = "url")]
    pub media_url: String,
}

impl Episode {
    /// Episode length as a `Duration`
    pub fn duration(&self) -> Duration {
        Duration::from_secs(self.duration_seconds)
    }
}

/// Playback state owned by the controller
///
/// Mutated only through `PlaybackController` commands. Cloned into
/// snapshots for observers.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PlaybackState {
    /// Episodes eligible for navigation, in playback order
    pub queue: Vec<Episode>,

    /// Index of the current episode (meaningless when `queue` is empty)
    pub current_index: usize,

    /// Whether playback is requested / confirmed by the device
    pub is_playing: bool,

    /// Current episode repeats on end (handled by the device)
    pub is_looping: bool,

    /// `play_next` picks a random index
    pub is_shuffling: bool,

    /// Last known position of the current episode, in whole seconds
    pub progress_seconds: u64,
}

impl PlaybackState {
    /// Episode at `current_index`, if any
    pub fn current_episode(&self) -> Option<&Episode> {
        self.queue.get(self.current_index)
    }

    /// Whether navigation forward is possible
    ///
    /// Always true while shuffling, even for a one-episode queue. False
    /// for an empty queue.
    pub fn has_next(&self) -> bool {
        if self.queue.is_empty() {
            return false;
        }

        self.is_shuffling || self.current_index < self.queue.len() - 1
    }

    /// Whether navigation backward is possible
    pub fn has_previous(&self) -> bool {
        self.current_index > 0
    }
}

/// Configuration for the playback controller
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlaybackConfig {
    /// Initial shuffle flag (default: false)
    #[serde(default)]
    pub shuffle: bool,

    /// Initial loop flag (default: false)
    #[serde(default)]
    pub looping: bool,

    /// Seed for shuffle selection; `None` seeds from entropy
    #[serde(default)]
    pub shuffle_seed: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn episode(title: &str) -> Episode {
        Episode {
            title: title.to_string(),
            members: "Host".to_string(),
            thumbnail_url: format!("https://cdn.example/{}.jpg", title),
            duration_seconds: 120,
            media_url: format!("https://cdn.example/{}.mp3", title),
        }
    }

    #[test]
    fn default_config() {
        let config = PlaybackConfig::default();
        assert!(!config.shuffle);
        assert!(!config.looping);
        assert_eq!(config.shuffle_seed, None);
    }

    #[test]
    fn episode_accepts_catalog_field_names() {
        let json = r#"{
            "title": "Faladev #30",
            "members": "Diego e Richard",
            "thumbnail": "https://cdn.example/30.jpg",
            "duration": 3981,
            "url": "https://cdn.example/30.m4a"
        }"#;

        let parsed: Episode = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.duration_seconds, 3981);
        assert_eq!(parsed.media_url, "https://cdn.example/30.m4a");
        assert_eq!(parsed.duration(), Duration::from_secs(3981));
    }

    #[test]
    fn episode_serializes_camel_case() {
        let value = serde_json::to_value(episode("a")).unwrap();
        assert!(value.get("thumbnailUrl").is_some());
        assert!(value.get("durationSeconds").is_some());
        assert!(value.get("mediaUrl").is_some());
    }

    #[test]
    fn empty_state_has_no_navigation() {
        let mut state = PlaybackState::default();
        state.is_shuffling = true;

        assert!(state.current_episode().is_none());
        assert!(!state.has_next());
        assert!(!state.has_previous());
    }

    #[test]
    fn shuffle_makes_single_episode_queue_have_next() {
        let mut state = PlaybackState {
            queue: vec![episode("a")],
            ..Default::default()
        };
        assert!(!state.has_next());

        state.is_shuffling = true;
        assert!(state.has_next());
    }
}
