//! 単一書き込み者（single-writer）規律のための排他ゲート

use tokio::sync::{Mutex, MutexGuard};

/// Serializes hub events across connections.
///
/// A guard is held from the registry mutation until the broadcast has been
/// queued for every target. Delivery to the sockets happens later in the
/// per-connection writer tasks, outside the gate.
#[derive(Debug, Default)]
pub struct SerialGate {
    lock: Mutex<()>,
}

impl SerialGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive access.
    pub async fn enter(&self) -> MutexGuard<'_, ()> {
        self.lock.lock().await
    }
}
