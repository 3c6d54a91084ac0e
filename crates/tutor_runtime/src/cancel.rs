//! Per-generation cancellation.
//!
//! Every generation owns a fresh [`CancelHandle`], so cancelling one can
//! never leak into the next. The engine also tracks the generations still
//! running so a UI with a single "Stop" button can cancel the newest one
//! without holding its handle.

use std::sync::{Arc, Mutex, MutexGuard};

use tokio_util::sync::CancellationToken;
use uuid::Uuid;

/// Handle that cancels one generation. Cheap to clone; safe to use from
/// any thread.
#[derive(Debug, Clone)]
pub struct CancelHandle {
    id: Uuid,
    token: CancellationToken,
}

impl CancelHandle {
    pub(crate) fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            token: CancellationToken::new(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Request cancellation. Idempotent.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    pub(crate) fn token(&self) -> &CancellationToken {
        &self.token
    }
}

/// Cancel the generation behind `handle`.
pub fn request_cancellation(handle: &CancelHandle) {
    handle.cancel();
}

/// Generations that are still running, oldest first. A bare "stop"
/// request applies to the newest one.
#[derive(Debug, Default, Clone)]
pub(crate) struct ActiveSlot {
    inner: Arc<Mutex<Vec<CancelHandle>>>,
}

impl ActiveSlot {
    fn lock(&self) -> MutexGuard<'_, Vec<CancelHandle>> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Register `handle` as the newest live generation and return a guard
    /// that unregisters it once the generation is finished or dropped.
    pub(crate) fn install(&self, handle: &CancelHandle) -> ActiveGuard {
        self.lock().push(handle.clone());
        ActiveGuard {
            slot: self.clone(),
            id: handle.id(),
        }
    }

    /// Cancel the newest live generation, if any. Returns whether one was
    /// live.
    pub(crate) fn cancel(&self) -> bool {
        match self.lock().last() {
            Some(handle) => {
                handle.cancel();
                true
            }
            None => false,
        }
    }

    pub(crate) fn is_active(&self) -> bool {
        !self.lock().is_empty()
    }
}

pub(crate) struct ActiveGuard {
    slot: ActiveSlot,
    id: Uuid,
}

impl Drop for ActiveGuard {
    fn drop(&mut self) {
        self.slot.lock().retain(|handle| handle.id() != self.id);
    }
}
