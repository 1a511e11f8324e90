//! Podcastr - Playback Control
//!
//! Device-independent playback state for the Podcastr episode player.
//!
//! This crate provides:
//! - Episode queue replaced wholesale by `play` / `play_list`
//! - Sequential and shuffled next, sequential previous
//! - Loop and shuffle flags that persist across episode changes
//! - Progress tracking fed by the audio device
//! - Change events and read-only snapshots for rendering surfaces
//!
//! # Architecture
//!
//! `podcastr-playback` performs no I/O. The audio driver in
//! `podcastr-audio` owns a `PlaybackController`, applies its state to a
//! device and feeds device events back as controller commands.
//!
//! # Example
//!
//! ```rust
//! use podcastr_playback::{Episode, PlaybackController};
//!
//! let episode = |title: &str| Episode {
//!     title: title.to_string(),
//!     members: "Host".to_string(),
//!     thumbnail_url: String::new(),
//!     duration_seconds: 100,
//!     media_url: format!("https://cdn.example/{}.mp3", title),
//! };
//!
//! let mut controller = PlaybackController::default();
//! controller.play_list(vec![episode("a"), episode("b")], 0);
//! assert!(controller.has_next());
//!
//! controller.play_next();
//! assert_eq!(controller.current_index(), 1);
//! assert!(!controller.has_next());
//! ```

mod controller;
mod error;
mod events;
mod shuffle;
mod snapshot;
pub mod time;
pub mod types;

// Public exports
pub use controller::PlaybackController;
pub use error::{PlaybackError, Result};
pub use events::PlaybackEvent;
pub use shuffle::ShufflePicker;
pub use snapshot::{Controls, PlaybackSnapshot};
pub use time::format_duration;
pub use types::{Episode, PlaybackConfig, PlaybackState};
