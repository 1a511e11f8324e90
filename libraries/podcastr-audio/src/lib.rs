//! Podcastr - Audio Driver
//!
//! Connects a `PlaybackController` to an audio-output device.
//!
//! This crate provides:
//! - The `AudioDevice` trait (load, play, pause, seek, loop, stop)
//! - Session-tagged device events, so callbacks from a superseded load are
//!   dropped
//! - `AudioDriver`, which applies controller state to the device and turns
//!   device events back into controller commands
//! - Observer subscriptions carrying snapshots after every change
//! - `SimulatedDevice`, a clock-driven device for tests and the CLI
//!
//! # Example
//!
//! ```rust
//! use podcastr_audio::{AudioDriver, DriverConfig, SessionPhase, SimulatedDevice};
//! use podcastr_playback::{Episode, PlaybackController};
//! use std::time::Duration;
//!
//! let episode = Episode {
//!     title: "Pilot".to_string(),
//!     members: "Host".to_string(),
//!     thumbnail_url: String::new(),
//!     duration_seconds: 3,
//!     media_url: "mem://pilot".to_string(),
//! };
//!
//! let device = SimulatedDevice::from_episodes(std::slice::from_ref(&episode));
//! let mut driver = AudioDriver::new(PlaybackController::default(), device, DriverConfig::default());
//! let updates = driver.subscribe();
//!
//! driver.play(episode);
//! driver.process_pending();
//! assert_eq!(driver.phase(), SessionPhase::Playing);
//!
//! driver.device_mut().advance(Duration::from_secs(3));
//! driver.process_pending();
//! assert_eq!(driver.phase(), SessionPhase::NoEpisode);
//! assert!(updates.try_iter().count() > 0);
//! ```

mod device;
mod driver;
mod error;
mod observers;
mod simulated;
pub mod types;

// Public exports
pub use device::{AudioDevice, DeviceEvent, DeviceEventKind, DeviceEventSender, LoadRequest, SessionId};
pub use driver::AudioDriver;
pub use error::{AudioError, Result};
pub use observers::Subscribers;
pub use simulated::SimulatedDevice;
pub use types::{DriverConfig, DriverNotice, FailurePolicy, PlayerUpdate, SessionPhase};
