//! RecordingReactivator — records refresh signals for inspection.

use crate::artifact::Reactivator;
use async_trait::async_trait;
use std::sync::Mutex;
use tokio::sync::Notify;

/// A reactivator that records every signal and lets tests await the
/// first delivery. Use `.engines()` to inspect what was recorded.
pub struct RecordingReactivator {
    calls: Mutex<Vec<String>>,
    notify: Notify,
}

impl RecordingReactivator {
    /// Create a new recorder with no signals yet.
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            notify: Notify::new(),
        }
    }

    /// Snapshot of the engines signaled so far, in delivery order.
    pub fn engines(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Wait until at least one signal has been delivered.
    pub async fn wait(&self) {
        self.notify.notified().await;
    }
}

impl Default for RecordingReactivator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Reactivator for RecordingReactivator {
    async fn reactivate(&self, engine: &str) {
        self.calls.lock().unwrap().push(engine.to_owned());
        self.notify.notify_one();
    }
}
