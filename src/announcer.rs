//! Live-region announcements for assistive technology.
//!
//! The region holds one message at a time and clears itself after a fixed delay so
//! that repeating the same sentence is read again. The clear timer is single-slot:
//! announcing replaces both the message and any pending clear.

use std::sync::{Arc, Mutex, Weak};
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::debug;

#[derive(Debug, Default)]
struct Slot {
    message: String,
    generation: u64,
    clear_timer: Option<JoinHandle<()>>,
}

#[derive(Debug, Clone)]
pub struct Announcer {
    slot: Arc<Mutex<Slot>>,
    ttl: Duration,
}

impl Announcer {
    pub fn new(ttl: Duration) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Slot::default())),
            ttl,
        }
    }

    /// Replace the live message and restart the clear timer.
    ///
    /// Outside a tokio runtime no timer is scheduled and the message stays until the
    /// next announcement.
    pub fn announce(&self, message: impl Into<String>) {
        let message = message.into();
        debug!("Announcing: {}", message);

        let mut slot = lock(&self.slot);
        if let Some(timer) = slot.clear_timer.take() {
            timer.abort();
        }
        slot.message = message;
        slot.generation += 1;

        if let Ok(runtime) = tokio::runtime::Handle::try_current() {
            let weak = Arc::downgrade(&self.slot);
            let timer = clear_after(weak, self.ttl, slot.generation);
            slot.clear_timer = Some(runtime.spawn(timer));
        }
    }

    /// The message currently in the live region (empty when cleared).
    pub fn current(&self) -> String {
        lock(&self.slot).message.clone()
    }

    /// Cancel the pending clear timer, leaving the message in place.
    pub fn cancel(&self) {
        if let Some(timer) = lock(&self.slot).clear_timer.take() {
            timer.abort();
        }
    }
}

async fn clear_after(slot: Weak<Mutex<Slot>>, ttl: Duration, generation: u64) {
    tokio::time::sleep(ttl).await;
    if let Some(slot) = slot.upgrade() {
        let mut slot = lock(&slot);
        // A newer announcement owns the slot now.
        if slot.generation != generation {
            return;
        }
        slot.message.clear();
        slot.clear_timer = None;
    }
}

/// A poisoned slot still holds a usable string, so recover it instead of panicking.
fn lock(slot: &Mutex<Slot>) -> std::sync::MutexGuard<'_, Slot> {
    slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
