//! Read-only observer fan-out
//!
//! Observers get their own bounded channel. A full channel drops the update
//! for that observer only; a disconnected one is removed on the next send.

use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};

/// Set of observer channels
#[derive(Debug)]
pub struct Subscribers<T> {
    senders: Vec<Sender<T>>,
    capacity: usize,
}

impl<T: Clone> Subscribers<T> {
    /// Create an empty set; each channel buffers `capacity` items
    pub fn new(capacity: usize) -> Self {
        Self {
            senders: Vec::new(),
            capacity: capacity.max(1),
        }
    }

    /// Register a new observer
    pub fn subscribe(&mut self) -> Receiver<T> {
        let (tx, rx) = bounded(self.capacity);
        self.senders.push(tx);
        rx
    }

    /// Send `item` to every live observer
    pub fn broadcast(&mut self, item: &T) {
        self.senders.retain(|tx| match tx.try_send(item.clone()) {
            Ok(()) | Err(TrySendError::Full(_)) => true,
            Err(TrySendError::Disconnected(_)) => false,
        });
    }

    /// Number of registered observers
    pub fn len(&self) -> usize {
        self.senders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.senders.is_empty()
    }
}
