//! Cooperative pause/resume for a running packing job.

use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};

#[derive(Debug, Default)]
struct PauseState {
    paused: Mutex<bool>,
    resumed: Condvar,
}

/// Shared pause flag checked by the packing worker between placements.
///
/// Clones share the same flag: the controller keeps one and the worker
/// another. The worker only blocks at its checkpoints, so a pause requested
/// mid-placement takes effect once that placement finishes.
#[derive(Debug, Clone, Default)]
pub struct PauseToken {
    state: Arc<PauseState>,
}

impl PauseToken {
    /// Creates a token in the running state.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, bool> {
        // The flag is a plain bool, a poisoned lock still holds a usable value.
        self.state
            .paused
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Requests the worker to stop at its next checkpoint.
    pub fn pause(&self) {
        *self.lock() = true;
    }

    /// Clears the pause flag and wakes a waiting worker.
    pub fn resume(&self) {
        *self.lock() = false;
        self.state.resumed.notify_all();
    }

    /// Returns true while a pause is requested.
    pub fn is_paused(&self) -> bool {
        *self.lock()
    }

    /// Blocks the calling thread until the token is resumed.
    ///
    /// Returns immediately if the token is not paused.
    pub fn wait_while_paused(&self) {
        let guard = self.lock();
        if *guard {
            log::debug!("packing paused, waiting for resume");
        }
        let _guard = self
            .state
            .resumed
            .wait_while(guard, |paused| *paused)
            .unwrap_or_else(PoisonError::into_inner);
    }
}
