//! Audio-output device boundary
//!
//! The driver talks to a device through `AudioDevice` commands. The device
//! answers asynchronously through a `DeviceEventSender` handed over with
//! every load; each sender is bound to the session it was created for, so
//! events from a superseded load can be recognised and dropped.

use crate::error::Result;
use crossbeam_channel::Sender;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Identifies one loaded source on the device
///
/// A new session starts with every load. Only events tagged with the
/// driver's current session are acted on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SessionId(pub u64);

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "session-{}", self.0)
    }
}

/// Event reported by the device
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceEvent {
    /// Session the event belongs to
    pub session: SessionId,

    /// What happened
    pub kind: DeviceEventKind,
}

/// Device event payloads
#[derive(Debug, Clone, PartialEq)]
pub enum DeviceEventKind {
    /// Source metadata is available; fired once per load
    MetadataLoaded,

    /// Periodic position report
    ProgressTick {
        /// Device position (sub-second precision)
        position: Duration,
    },

    /// Source played to the end (never sent while looping)
    Ended,

    /// Device actually started playing
    PlayConfirmed,

    /// Device actually paused
    PauseConfirmed,

    /// Source could not be loaded or decoded
    Failed {
        /// Human readable reason
        message: String,
    },
}

/// Session-bound event handle given to the device on load
#[derive(Debug, Clone)]
pub struct DeviceEventSender {
    session: SessionId,
    tx: Sender<DeviceEvent>,
}

impl DeviceEventSender {
    pub(crate) fn new(session: SessionId, tx: Sender<DeviceEvent>) -> Self {
        Self { session, tx }
    }

    /// Session this handle reports for
    pub fn session(&self) -> SessionId {
        self.session
    }

    /// Send a raw event; returns false once the driver is gone
    pub fn send(&self, kind: DeviceEventKind) -> bool {
        self.tx
            .send(DeviceEvent {
                session: self.session,
                kind,
            })
            .is_ok()
    }

    pub fn metadata_loaded(&self) -> bool {
        self.send(DeviceEventKind::MetadataLoaded)
    }

    pub fn progress(&self, position: Duration) -> bool {
        self.send(DeviceEventKind::ProgressTick { position })
    }

    pub fn ended(&self) -> bool {
        self.send(DeviceEventKind::Ended)
    }

    pub fn play_confirmed(&self) -> bool {
        self.send(DeviceEventKind::PlayConfirmed)
    }

    pub fn pause_confirmed(&self) -> bool {
        self.send(DeviceEventKind::PauseConfirmed)
    }

    pub fn failed(&self, message: impl Into<String>) -> bool {
        self.send(DeviceEventKind::Failed {
            message: message.into(),
        })
    }
}

/// Everything a device needs to open a new source
#[derive(Debug, Clone)]
pub struct LoadRequest {
    /// Media locator
    pub url: String,

    /// Repeat the source instead of reporting `Ended`
    pub looping: bool,

    /// Where to report events for this source
    pub events: DeviceEventSender,
}

/// Platform audio output
///
/// Implementors decode and render media; the driver only issues these
/// commands. Commands must not block. Loading replaces any previous source
/// and starts at position 0; `play`/`pause` with nothing loaded are no-ops.
pub trait AudioDevice: Send {
    /// Open a new source, dropping the current one
    fn load(&mut self, request: LoadRequest) -> Result<()>;

    /// Start or resume playback
    fn play(&mut self) -> Result<()>;

    /// Pause playback, keeping position
    fn pause(&mut self) -> Result<()>;

    /// Jump to a position in the current source
    fn seek(&mut self, position: Duration) -> Result<()>;

    /// Change the loop flag of the current source
    fn set_looping(&mut self, looping: bool) -> Result<()>;

    /// Stop and unload the current source
    fn stop(&mut self) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::unbounded;

    #[test]
    fn sender_tags_events_with_session() {
        let (tx, rx) = unbounded();
        let sender = DeviceEventSender::new(SessionId(7), tx);

        assert!(sender.progress(Duration::from_millis(2500)));
        assert!(sender.ended());

        assert_eq!(
            rx.try_recv().unwrap(),
            DeviceEvent {
                session: SessionId(7),
                kind: DeviceEventKind::ProgressTick {
                    position: Duration::from_millis(2500)
                },
            }
        );
        assert_eq!(rx.try_recv().unwrap().kind, DeviceEventKind::Ended);
    }

    #[test]
    fn sender_reports_closed_channel() {
        let (tx, rx) = unbounded();
        let sender = DeviceEventSender::new(SessionId(1), tx);
        drop(rx);

        assert!(!sender.metadata_loaded());
    }

    #[test]
    fn session_display() {
        assert_eq!(SessionId(3).to_string(), "session-3");
    }
}
