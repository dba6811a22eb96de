//! Test messenger — records every message instead of delivering it.

use std::sync::Mutex;

use threshold_core::ports::Messenger;
use uuid::Uuid;

/// A messenger that keeps every `(recipient, text)` pair in send order.
#[derive(Debug, Default)]
pub struct RecordingMessenger {
    sent: Mutex<Vec<(Uuid, String)>>,
}

impl RecordingMessenger {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of everything sent so far.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn sent(&self) -> Vec<(Uuid, String)> {
        self.sent.lock().unwrap().clone()
    }

    /// Returns the texts delivered to `recipient`, in order.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn messages_for(&self, recipient: Uuid) -> Vec<String> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .filter(|(to, _)| *to == recipient)
            .map(|(_, text)| text.clone())
            .collect()
    }
}

impl Messenger for RecordingMessenger {
    fn send(&self, recipient: Uuid, text: &str) {
        self.sent.lock().unwrap().push((recipient, text.to_owned()));
    }
}
