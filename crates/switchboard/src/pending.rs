//! Pending Requests
//!
//! ID-keyed registry of suspended requests awaiting settlement. Handlers
//! register an entry and suspend on its channel; the UI settles entries by
//! ID from the outside, in any order.

use dashmap::DashMap;
use tokio::sync::oneshot;

use crate::error::BrokerError;

type Settlement<T> = Result<T, BrokerError>;

/// Registry of requests surfaced to the user and not yet answered.
///
/// At most one entry per ID exists, and an entry is removed in the same
/// atomic operation that delivers its settlement. Settling an ID twice, or
/// settling after a drain, is a logged no-op.
pub struct PendingMap<T> {
    label: &'static str,
    entries: DashMap<String, oneshot::Sender<Settlement<T>>>,
}

impl<T> PendingMap<T> {
    /// Create an empty registry. `label` names the request kind in logs.
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            entries: DashMap::new(),
        }
    }

    /// Insert an entry and hand back the receiver the handler suspends on,
    /// plus a guard that discards the entry if the handler is dropped
    /// before settlement.
    pub fn register(&self, id: &str) -> (PendingGuard<'_, T>, oneshot::Receiver<Settlement<T>>) {
        let (tx, rx) = oneshot::channel();
        self.entries.insert(id.to_string(), tx);
        tracing::debug!(request_id = %id, kind = self.label, "Registered pending request");

        let guard = PendingGuard {
            map: self,
            id: id.to_string(),
            disarmed: false,
        };
        (guard, rx)
    }

    /// Deliver a successful settlement to the entry with this ID.
    pub fn settle(&self, id: &str, value: T) -> bool {
        self.finish(id, Ok(value))
    }

    /// Deliver a failure settlement to the entry with this ID.
    pub fn fail(&self, id: &str, reason: BrokerError) -> bool {
        self.finish(id, Err(reason))
    }

    fn finish(&self, id: &str, settlement: Settlement<T>) -> bool {
        if let Some((_, tx)) = self.entries.remove(id) {
            tracing::debug!(request_id = %id, kind = self.label, "Settled pending request");
            // The receiver is gone if the handler was dropped mid-wait.
            let _ = tx.send(settlement);
            true
        } else {
            tracing::warn!(request_id = %id, kind = self.label, "No pending request with this id");
            false
        }
    }

    /// Fail every pending entry with the same reason.
    ///
    /// Returns how many entries were rejected. Calling on an empty
    /// registry is a no-op returning 0.
    pub fn drain(&self, reason: &BrokerError) -> usize {
        let ids: Vec<String> = self.entries.iter().map(|entry| entry.key().clone()).collect();

        let mut failed = 0;
        for id in ids {
            if let Some((_, tx)) = self.entries.remove(&id) {
                let _ = tx.send(Err(reason.clone()));
                failed += 1;
            }
        }

        if failed > 0 {
            tracing::info!(
                count = failed,
                kind = self.label,
                reason = %reason,
                "Failed all pending requests"
            );
        }
        failed
    }

    fn discard(&self, id: &str) {
        if self.entries.remove(id).is_some() {
            tracing::debug!(request_id = %id, kind = self.label, "Discarded abandoned pending request");
        }
    }

    /// Number of entries awaiting settlement.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Removes its entry on drop unless disarmed first.
///
/// Held across the suspension point so a handler future dropped by the
/// transport cannot leak a forever-unsettleable entry.
pub struct PendingGuard<'a, T> {
    map: &'a PendingMap<T>,
    id: String,
    disarmed: bool,
}

impl<T> PendingGuard<'_, T> {
    /// Call once the receiver has resolved; the entry is already gone.
    pub fn disarm(mut self) {
        self.disarmed = true;
    }
}

impl<T> Drop for PendingGuard<'_, T> {
    fn drop(&mut self) {
        if !self.disarmed {
            self.map.discard(&self.id);
        }
    }
}
