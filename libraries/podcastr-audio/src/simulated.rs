//! Clock-driven virtual audio device
//!
//! Plays nothing; it advances a virtual position when told to and reports
//! the same events a real output would. Used by the command-line player and
//! by tests that need end-to-end episode flow.

use crate::device::{AudioDevice, DeviceEventSender, LoadRequest};
use crate::error::{AudioError, Result};
use podcastr_playback::Episode;
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;

/// Source currently open on the simulated device
#[derive(Debug)]
struct LoadedMedia {
    url: String,
    duration: Duration,
    position: Duration,
    looping: bool,
    playing: bool,
    events: DeviceEventSender,
}

/// Virtual audio output
///
/// Knows media durations by URL. Loading an unknown URL is rejected with
/// `AudioError::UnknownSource`, which the driver reports as `Failed`.
#[derive(Debug, Default)]
pub struct SimulatedDevice {
    durations: HashMap<String, Duration>,
    loaded: Option<LoadedMedia>,
}

impl SimulatedDevice {
    pub fn new() -> Self {
        Self::default()
    }

    /// Device that knows every episode's media
    pub fn from_episodes(episodes: &[Episode]) -> Self {
        let mut device = Self::new();
        for episode in episodes {
            device.register(&episode.media_url, episode.duration());
        }
        device
    }

    /// Make `url` playable with the given length
    pub fn register(&mut self, url: &str, duration: Duration) {
        self.durations.insert(url.to_string(), duration);
    }

    /// Builder form of `register`
    pub fn with_media(mut self, url: &str, duration: Duration) -> Self {
        self.register(url, duration);
        self
    }

    /// Move the virtual clock forward
    ///
    /// While playing, reports one progress tick per whole second crossed.
    /// Reaching the end wraps to the start when looping, otherwise stops
    /// and reports `Ended`.
    pub fn advance(&mut self, elapsed: Duration) {
        let Some(media) = self.loaded.as_mut() else {
            return;
        };
        if !media.playing {
            return;
        }

        let start = media.position;
        let end = start + elapsed;

        if end < media.duration {
            emit_ticks(&media.events, start, end);
            media.position = end;
            return;
        }

        emit_ticks(&media.events, start, media.duration);

        if media.looping {
            media.position = if media.duration.is_zero() {
                Duration::ZERO
            } else {
                let wrapped = (end - media.duration).as_nanos() % media.duration.as_nanos();
                Duration::from_nanos(wrapped as u64)
            };
            media.events.progress(media.position);
        } else {
            debug!(url = %media.url, "Simulated media ended");
            media.position = media.duration;
            media.playing = false;
            media.events.ended();
        }
    }

    /// Current virtual position
    pub fn position(&self) -> Duration {
        self.loaded
            .as_ref()
            .map(|m| m.position)
            .unwrap_or(Duration::ZERO)
    }

    pub fn is_playing(&self) -> bool {
        self.loaded.as_ref().is_some_and(|m| m.playing)
    }

    pub fn is_looping(&self) -> bool {
        self.loaded.as_ref().is_some_and(|m| m.looping)
    }

    /// URL of the open source
    pub fn loaded_url(&self) -> Option<&str> {
        self.loaded.as_ref().map(|m| m.url.as_str())
    }
}

fn emit_ticks(events: &DeviceEventSender, from: Duration, to: Duration) {
    for second in (from.as_secs() + 1)..=to.as_secs() {
        events.progress(Duration::from_secs(second));
    }
}

impl AudioDevice for SimulatedDevice {
    fn load(&mut self, request: LoadRequest) -> Result<()> {
        self.loaded = None;

        let Some(duration) = self.durations.get(&request.url).copied() else {
            return Err(AudioError::UnknownSource(request.url));
        };

        debug!(url = %request.url, ?duration, "Simulated load");
        request.events.metadata_loaded();

        self.loaded = Some(LoadedMedia {
            url: request.url,
            duration,
            position: Duration::ZERO,
            looping: request.looping,
            playing: false,
            events: request.events,
        });
        Ok(())
    }

    fn play(&mut self) -> Result<()> {
        if let Some(media) = self.loaded.as_mut() {
            media.playing = true;
            media.events.play_confirmed();
        }
        Ok(())
    }

    fn pause(&mut self) -> Result<()> {
        if let Some(media) = self.loaded.as_mut() {
            media.playing = false;
            media.events.pause_confirmed();
        }
        Ok(())
    }

    fn seek(&mut self, position: Duration) -> Result<()> {
        let media = self
            .loaded
            .as_mut()
            .ok_or_else(|| AudioError::Device("seek with no media loaded".to_string()))?;
        media.position = position.min(media.duration);
        Ok(())
    }

    fn set_looping(&mut self, looping: bool) -> Result<()> {
        if let Some(media) = self.loaded.as_mut() {
            media.looping = looping;
        }
        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        self.loaded = None;
        Ok(())
    }
}
