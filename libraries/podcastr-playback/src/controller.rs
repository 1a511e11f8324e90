//! Playback controller
//!
//! Owns the queue, current index and flags. Every method is a synchronous,
//! pure state transition; device I/O lives in the driver that owns the
//! controller.

use crate::error::{PlaybackError, Result};
use crate::events::PlaybackEvent;
use crate::shuffle::ShufflePicker;
use crate::snapshot::PlaybackSnapshot;
use crate::types::{Episode, PlaybackConfig, PlaybackState};
use tracing::debug;

/// Playback state machine
///
/// Invariants held after every command:
/// - empty queue implies `is_playing == false`
/// - `current_index` indexes the queue when it is non-empty
/// - progress is 0 right after any episode selection
#[derive(Debug)]
pub struct PlaybackController {
    state: PlaybackState,

    /// Bumped on every episode selection, including same-index reselection
    selection: u64,

    picker: ShufflePicker,

    pending_events: Vec<PlaybackEvent>,
}

impl PlaybackController {
    /// Create a controller with an empty queue
    pub fn new(config: PlaybackConfig) -> Self {
        let picker = match config.shuffle_seed {
            Some(seed) => ShufflePicker::with_seed(seed),
            None => ShufflePicker::new(),
        };

        Self {
            state: PlaybackState {
                is_looping: config.looping,
                is_shuffling: config.shuffle,
                ..Default::default()
            },
            selection: 0,
            picker,
            pending_events: Vec::new(),
        }
    }

    // ===== Queue Replacement =====

    /// Play a single episode, replacing the queue
    pub fn play(&mut self, episode: Episode) {
        self.replace_queue(vec![episode], 0);
    }

    /// Play `list` starting at `index`, replacing the queue
    ///
    /// # Panics
    /// If `index` is not a valid position in `list`. Use `try_play_list`
    /// to get an error instead.
    pub fn play_list(&mut self, list: Vec<Episode>, index: usize) {
        assert!(
            index < list.len(),
            "play_list index {} out of bounds for {} episodes",
            index,
            list.len()
        );

        self.replace_queue(list, index);
    }

    /// Checked variant of `play_list`
    pub fn try_play_list(&mut self, list: Vec<Episode>, index: usize) -> Result<()> {
        if list.is_empty() {
            return Err(PlaybackError::EmptyQueue);
        }
        if index >= list.len() {
            return Err(PlaybackError::IndexOutOfBounds {
                index,
                len: list.len(),
            });
        }

        self.replace_queue(list, index);
        Ok(())
    }

    /// Empty the queue and stop playback
    ///
    /// Loop and shuffle flags are kept.
    pub fn clear_player_state(&mut self) {
        let was_empty = self.state.queue.is_empty();

        self.state.queue.clear();
        self.state.current_index = 0;
        self.state.progress_seconds = 0;
        self.apply_playing(false);

        if !was_empty {
            debug!("Queue cleared");
            self.pending_events.push(PlaybackEvent::QueueCleared);
        }
    }

    fn replace_queue(&mut self, list: Vec<Episode>, index: usize) {
        self.state.queue = list;
        self.select(index);
        self.apply_playing(true);
    }

    // ===== Transport =====

    /// Flip `is_playing`; no-op with an empty queue
    pub fn toggle_play(&mut self) {
        let playing = !self.state.is_playing;
        self.set_playing_state(playing);
    }

    /// Set `is_playing` directly (device confirmation path)
    ///
    /// Requests to play with an empty queue are ignored.
    pub fn set_playing_state(&mut self, playing: bool) {
        if playing && self.state.queue.is_empty() {
            return;
        }

        self.apply_playing(playing);
    }

    /// Flip the loop flag
    pub fn toggle_looping(&mut self) {
        self.state.is_looping = !self.state.is_looping;
        self.pending_events.push(PlaybackEvent::LoopingChanged {
            looping: self.state.is_looping,
        });
    }

    /// Flip the shuffle flag
    pub fn toggle_shuffling(&mut self) {
        self.state.is_shuffling = !self.state.is_shuffling;
        self.pending_events.push(PlaybackEvent::ShufflingChanged {
            shuffling: self.state.is_shuffling,
        });
    }

    // ===== Navigation =====

    /// Advance to the next episode
    ///
    /// Shuffling picks a uniformly random index (possibly the current one);
    /// otherwise steps forward by one when possible.
    pub fn play_next(&mut self) {
        if self.state.is_shuffling {
            if let Some(index) = self.picker.pick(self.state.queue.len()) {
                self.select(index);
            }
        } else if self.has_next() {
            self.select(self.state.current_index + 1);
        }
    }

    /// Step back one episode; shuffle is ignored
    pub fn play_previous(&mut self) {
        if self.has_previous() {
            self.select(self.state.current_index - 1);
        }
    }

    // ===== Progress =====

    /// Record the device-reported position of the current episode
    ///
    /// Ignored when no episode is current.
    pub fn set_progress(&mut self, seconds: u64) {
        if self.state.queue.is_empty() || self.state.progress_seconds == seconds {
            return;
        }

        self.state.progress_seconds = seconds;
        self.pending_events
            .push(PlaybackEvent::ProgressChanged { seconds });
    }

    /// Move progress to `seconds`, clamped to the episode duration
    ///
    /// Returns the position actually applied so the caller can seek the
    /// device to the same place.
    pub fn seek_to(&mut self, seconds: u64) -> Result<u64> {
        let duration = self
            .current_episode()
            .map(|e| e.duration_seconds)
            .ok_or(PlaybackError::NoEpisodeLoaded)?;

        let target = seconds.min(duration);
        self.set_progress(target);
        Ok(target)
    }

    // ===== State Queries =====

    /// Live state (read-only)
    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    /// Owned snapshot with derived flags
    pub fn snapshot(&self) -> PlaybackSnapshot {
        PlaybackSnapshot::capture(&self.state)
    }

    /// Episode at the current index
    pub fn current_episode(&self) -> Option<&Episode> {
        self.state.current_episode()
    }

    /// Queue in playback order
    pub fn queue(&self) -> &[Episode] {
        &self.state.queue
    }

    pub fn current_index(&self) -> usize {
        self.state.current_index
    }

    pub fn is_playing(&self) -> bool {
        self.state.is_playing
    }

    pub fn is_looping(&self) -> bool {
        self.state.is_looping
    }

    pub fn is_shuffling(&self) -> bool {
        self.state.is_shuffling
    }

    pub fn progress_seconds(&self) -> u64 {
        self.state.progress_seconds
    }

    /// True while shuffling or before the last episode
    pub fn has_next(&self) -> bool {
        self.state.has_next()
    }

    /// True after the first episode
    pub fn has_previous(&self) -> bool {
        self.state.has_previous()
    }

    /// Selection counter
    ///
    /// Changes whenever a new episode session must start, even when the
    /// index stays the same (shuffle reselect, replaying the same list).
    pub fn selection(&self) -> u64 {
        self.selection
    }

    // ===== Events =====

    /// Take all events queued since the last drain
    pub fn drain_events(&mut self) -> Vec<PlaybackEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Check for undrained events
    pub fn has_pending_events(&self) -> bool {
        !self.pending_events.is_empty()
    }

    // ===== Internal =====

    fn select(&mut self, index: usize) {
        self.state.current_index = index;
        self.state.progress_seconds = 0;
        self.selection += 1;

        let title = self
            .state
            .queue
            .get(index)
            .map(|e| e.title.clone())
            .unwrap_or_default();

        debug!(index, selection = self.selection, "Selected episode \"{}\"", title);
        self.pending_events
            .push(PlaybackEvent::EpisodeChanged { index, title });
    }

    fn apply_playing(&mut self, playing: bool) {
        if self.state.is_playing == playing {
            return;
        }

        self.state.is_playing = playing;
        self.pending_events
            .push(PlaybackEvent::PlayingChanged { playing });
    }
}

impl Default for PlaybackController {
    fn default() -> Self {
        Self::new(PlaybackConfig::default())
    }
}
