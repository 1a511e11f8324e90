//! Audio driver
//!
//! Owns the `PlaybackController` and the only handle to the audio device.
//! User commands go to the controller, then `sync` reconciles the device
//! with the new state. Device events arrive on a channel, are filtered by
//! session and turned back into controller commands.

use crate::device::{AudioDevice, DeviceEvent, DeviceEventKind, DeviceEventSender, LoadRequest, SessionId};
use crate::error::Result;
use crate::observers::Subscribers;
use crate::types::{DriverConfig, DriverNotice, FailurePolicy, PlayerUpdate, SessionPhase};
use crossbeam_channel::{unbounded, Receiver, RecvTimeoutError, Sender};
use podcastr_playback::{Episode, PlaybackController, PlaybackSnapshot};
use std::time::Duration;
use tracing::{debug, info, trace, warn};

/// Bridge between controller state and an audio device
pub struct AudioDriver<D: AudioDevice> {
    controller: PlaybackController,
    device: D,
    config: DriverConfig,

    /// Device event inbox
    events_tx: Sender<DeviceEvent>,
    events_rx: Receiver<DeviceEvent>,

    /// Session of the loaded source, if any
    session: Option<SessionId>,
    last_session: u64,

    /// Controller selection the device was last loaded for
    loaded_selection: Option<u64>,

    /// What the device was last told (or confirmed)
    device_playing: bool,
    device_looping: bool,

    /// Progress ticks are accepted only after metadata arrived
    progress_armed: bool,

    /// Failures since the last successful metadata load or queue change
    consecutive_failures: usize,

    phase: SessionPhase,
    notices: Vec<DriverNotice>,
    subscribers: Subscribers<PlayerUpdate>,
}

impl<D: AudioDevice> AudioDriver<D> {
    /// Take ownership of a controller and a device
    ///
    /// If the controller already has a current episode it is loaded
    /// immediately.
    pub fn new(controller: PlaybackController, device: D, config: DriverConfig) -> Self {
        let (events_tx, events_rx) = unbounded();
        let subscribers = Subscribers::new(config.subscriber_capacity);

        let mut driver = Self {
            controller,
            device,
            config,
            events_tx,
            events_rx,
            session: None,
            last_session: 0,
            loaded_selection: None,
            device_playing: false,
            device_looping: false,
            progress_armed: false,
            consecutive_failures: 0,
            phase: SessionPhase::NoEpisode,
            notices: Vec::new(),
            subscribers,
        };

        driver.sync();
        driver
    }

    // ===== Commands =====

    /// Play a single episode
    pub fn play(&mut self, episode: Episode) {
        self.consecutive_failures = 0;
        self.command(|c| c.play(episode));
    }

    /// Play `list` from `index`
    ///
    /// # Panics
    /// If `index` is out of bounds (see `PlaybackController::play_list`).
    pub fn play_list(&mut self, list: Vec<Episode>, index: usize) {
        self.consecutive_failures = 0;
        self.command(|c| c.play_list(list, index));
    }

    /// Checked variant of `play_list`
    pub fn try_play_list(&mut self, list: Vec<Episode>, index: usize) -> Result<()> {
        self.controller.try_play_list(list, index)?;
        self.consecutive_failures = 0;
        self.sync();
        self.publish();
        Ok(())
    }

    pub fn toggle_play(&mut self) {
        self.command(PlaybackController::toggle_play);
    }

    pub fn toggle_looping(&mut self) {
        self.command(PlaybackController::toggle_looping);
    }

    pub fn toggle_shuffling(&mut self) {
        self.command(PlaybackController::toggle_shuffling);
    }

    pub fn play_next(&mut self) {
        self.command(PlaybackController::play_next);
    }

    pub fn play_previous(&mut self) {
        self.command(PlaybackController::play_previous);
    }

    /// Empty the queue and stop the device
    pub fn clear_player_state(&mut self) {
        self.command(PlaybackController::clear_player_state);
    }

    /// User-initiated seek (progress scrubber)
    ///
    /// Clamps to the episode duration, seeks the device and updates
    /// progress directly instead of waiting for a tick.
    pub fn seek(&mut self, seconds: u64) -> Result<()> {
        let target = self.controller.seek_to(seconds)?;
        debug!(target, "Seek");

        if self.session.is_some() {
            if let Err(e) = self.device.seek(Duration::from_secs(target)) {
                self.device_error("seek", &e.to_string());
            }
        }

        self.publish();
        Ok(())
    }

    fn command(&mut self, f: impl FnOnce(&mut PlaybackController)) {
        f(&mut self.controller);
        self.sync();
        self.publish();
    }

    // ===== Device Events =====

    /// Handle every queued device event without blocking
    ///
    /// Returns the number of events taken from the inbox, stale ones
    /// included.
    pub fn process_pending(&mut self) -> usize {
        let mut handled = 0;
        while let Ok(event) = self.events_rx.try_recv() {
            self.handle_event(event);
            handled += 1;
        }
        handled
    }

    /// Wait up to `timeout` for one device event and handle it
    ///
    /// Returns false on timeout.
    pub fn wait_event(&mut self, timeout: Duration) -> bool {
        match self.events_rx.recv_timeout(timeout) {
            Ok(event) => {
                self.handle_event(event);
                true
            }
            Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => false,
        }
    }

    /// Apply one device event
    ///
    /// Events from any session other than the current one are ignored.
    pub fn handle_event(&mut self, event: DeviceEvent) {
        if self.session != Some(event.session) {
            debug!(
                session = %event.session,
                current = ?self.session,
                "Ignoring stale device event {:?}",
                event.kind
            );
            return;
        }

        match event.kind {
            DeviceEventKind::MetadataLoaded => {
                self.consecutive_failures = 0;
                if let Err(e) = self.device.seek(Duration::ZERO) {
                    self.device_error("seek", &e.to_string());
                }
                self.progress_armed = true;
                // Device restarts at 0, so a seek made while loading is dropped
                self.controller.set_progress(0);

                let phase = if self.device_playing {
                    SessionPhase::Playing
                } else {
                    SessionPhase::Ready
                };
                self.set_phase(phase);
            }
            DeviceEventKind::ProgressTick { position } => {
                if self.progress_armed {
                    trace!(seconds = position.as_secs(), "Progress tick");
                    self.controller.set_progress(position.as_secs());
                }
            }
            DeviceEventKind::Ended => {
                info!("Episode ended");
                self.device_playing = false;
                self.advance_or_clear();
            }
            DeviceEventKind::PlayConfirmed => {
                self.device_playing = true;
                self.controller.set_playing_state(true);
                self.update_transport_phase();
            }
            DeviceEventKind::PauseConfirmed => {
                self.device_playing = false;
                self.controller.set_playing_state(false);
                self.update_transport_phase();
            }
            DeviceEventKind::Failed { message } => {
                self.handle_failure(message);
            }
        }

        self.sync();
        self.publish();
    }

    fn advance_or_clear(&mut self) {
        if self.controller.has_next() {
            self.controller.play_next();
        } else {
            self.controller.clear_player_state();
        }
    }

    fn handle_failure(&mut self, message: String) {
        self.consecutive_failures += 1;
        warn!(
            failures = self.consecutive_failures,
            "Device failed to play {:?}: {}",
            self.controller.current_episode().map(|e| e.media_url.as_str()),
            message
        );
        self.notices.push(DriverNotice::DeviceFailed { message });

        match self.config.failure_policy {
            FailurePolicy::Stop => self.controller.clear_player_state(),
            FailurePolicy::Skip => {
                if self.consecutive_failures >= self.controller.queue().len() {
                    warn!("Every queued episode failed, clearing player");
                    self.controller.clear_player_state();
                } else {
                    self.advance_or_clear();
                }
            }
        }
    }

    // ===== Reconciliation =====

    /// Bring the device in line with controller state
    fn sync(&mut self) {
        let Some(episode) = self.controller.current_episode().cloned() else {
            if self.session.is_some() {
                self.unload();
            }
            return;
        };

        if self.loaded_selection != Some(self.controller.selection()) {
            self.load(&episode);
            return;
        }

        let looping = self.controller.is_looping();
        if self.device_looping != looping {
            self.device_looping = looping;
            if let Err(e) = self.device.set_looping(looping) {
                self.device_error("set_looping", &e.to_string());
            }
        }

        let playing = self.controller.is_playing();
        if self.device_playing != playing {
            self.device_playing = playing;
            let result = if playing {
                self.device.play()
            } else {
                self.device.pause()
            };
            if let Err(e) = result {
                self.device_error(if playing { "play" } else { "pause" }, &e.to_string());
            }
            self.update_transport_phase();
        }
    }

    fn load(&mut self, episode: &Episode) {
        self.last_session += 1;
        let session = SessionId(self.last_session);
        let looping = self.controller.is_looping();

        self.session = Some(session);
        self.loaded_selection = Some(self.controller.selection());
        self.device_playing = false;
        self.device_looping = looping;
        self.progress_armed = false;
        self.set_phase(SessionPhase::Loading);

        info!(%session, looping, "Loading \"{}\" from {}", episode.title, episode.media_url);

        let events = DeviceEventSender::new(session, self.events_tx.clone());
        let request = LoadRequest {
            url: episode.media_url.clone(),
            looping,
            events: events.clone(),
        };

        if let Err(e) = self.device.load(request) {
            // Reported through the inbox so failure handling stays in one place
            events.failed(e.to_string());
            return;
        }

        if self.controller.is_playing() {
            self.device_playing = true;
            if let Err(e) = self.device.play() {
                self.device_error("play", &e.to_string());
            }
        }
    }

    fn unload(&mut self) {
        info!("Stopping device");
        if let Err(e) = self.device.stop() {
            self.device_error("stop", &e.to_string());
        }

        self.session = None;
        self.loaded_selection = None;
        self.device_playing = false;
        self.progress_armed = false;
        self.consecutive_failures = 0;
        self.set_phase(SessionPhase::NoEpisode);
    }

    fn update_transport_phase(&mut self) {
        let phase = match (self.phase, self.device_playing) {
            (SessionPhase::Ready | SessionPhase::Paused, true) => SessionPhase::Playing,
            (SessionPhase::Playing, false) => SessionPhase::Paused,
            (phase, _) => phase,
        };
        self.set_phase(phase);
    }

    fn set_phase(&mut self, phase: SessionPhase) {
        if self.phase != phase {
            debug!(from = ?self.phase, to = ?phase, "Phase changed");
            self.phase = phase;
            self.notices.push(DriverNotice::PhaseChanged { phase });
        }
    }

    fn device_error(&mut self, command: &str, message: &str) {
        warn!("Device {} failed: {}", command, message);
        self.notices.push(DriverNotice::DeviceFailed {
            message: format!("{}: {}", command, message),
        });
    }

    // ===== Observers =====

    /// Register a read-only observer
    pub fn subscribe(&mut self) -> Receiver<PlayerUpdate> {
        self.subscribers.subscribe()
    }

    fn publish(&mut self) {
        if !self.controller.has_pending_events() && self.notices.is_empty() {
            return;
        }

        let update = PlayerUpdate {
            snapshot: self.controller.snapshot(),
            events: self.controller.drain_events(),
            notices: std::mem::take(&mut self.notices),
            phase: self.phase,
        };

        for event in &update.events {
            trace!(?event, "Playback event");
        }

        self.subscribers.broadcast(&update);
    }

    // ===== State Queries =====

    /// Controller (read-only)
    pub fn controller(&self) -> &PlaybackController {
        &self.controller
    }

    pub fn snapshot(&self) -> PlaybackSnapshot {
        self.controller.snapshot()
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// Session of the currently loaded source
    pub fn session(&self) -> Option<SessionId> {
        self.session
    }

    pub fn device(&self) -> &D {
        &self.device
    }

    /// Device access for clock-driven devices
    pub fn device_mut(&mut self) -> &mut D {
        &mut self.device
    }

    pub fn config(&self) -> &DriverConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::LoadRequest;

    #[derive(Default)]
    struct NullDevice {
        loads: Vec<String>,
        requests: Vec<LoadRequest>,
    }

    impl AudioDevice for NullDevice {
        fn load(&mut self, request: LoadRequest) -> Result<()> {
            self.loads.push(request.url.clone());
            self.requests.push(request);
            Ok(())
        }
        fn play(&mut self) -> Result<()> {
            Ok(())
        }
        fn pause(&mut self) -> Result<()> {
            Ok(())
        }
        fn seek(&mut self, _position: Duration) -> Result<()> {
            Ok(())
        }
        fn set_looping(&mut self, _looping: bool) -> Result<()> {
            Ok(())
        }
        fn stop(&mut self) -> Result<()> {
            Ok(())
        }
    }

    fn episode(id: &str) -> Episode {
        Episode {
            title: id.to_string(),
            members: String::new(),
            thumbnail_url: String::new(),
            duration_seconds: 60,
            media_url: format!("mem://{}", id),
        }
    }

    #[test]
    fn new_driver_loads_existing_selection() {
        let mut controller = PlaybackController::default();
        controller.play(episode("a"));

        let driver = AudioDriver::new(controller, NullDevice::default(), DriverConfig::default());

        assert_eq!(driver.device().loads, vec!["mem://a".to_string()]);
        assert_eq!(driver.phase(), SessionPhase::Loading);
        assert_eq!(driver.session(), Some(SessionId(1)));
    }

    #[test]
    fn empty_driver_starts_idle() {
        let driver = AudioDriver::new(
            PlaybackController::default(),
            NullDevice::default(),
            DriverConfig::default(),
        );
        assert_eq!(driver.phase(), SessionPhase::NoEpisode);
        assert!(driver.session().is_none());
        assert!(driver.device().loads.is_empty());
    }

    #[test]
    fn ticks_before_metadata_are_ignored() {
        let mut driver = AudioDriver::new(
            PlaybackController::default(),
            NullDevice::default(),
            DriverConfig::default(),
        );
        driver.play(episode("a"));

        let events = driver.device().requests[0].events.clone();
        events.progress(Duration::from_secs(5));
        driver.process_pending();
        assert_eq!(driver.controller().progress_seconds(), 0);

        events.metadata_loaded();
        events.progress(Duration::from_millis(5900));
        driver.process_pending();
        assert_eq!(driver.controller().progress_seconds(), 5);
    }

    #[test]
    fn wait_event_times_out_when_idle() {
        let mut driver = AudioDriver::new(
            PlaybackController::default(),
            NullDevice::default(),
            DriverConfig::default(),
        );
        assert!(!driver.wait_event(Duration::from_millis(5)));
    }
}
