use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

/// Guards against overlapping refreshes.
#[derive(Clone, Default)]
pub struct InFlight(Arc<AtomicBool>);

impl InFlight {
    /// Mark a refresh as started, unless one is already running.
    #[must_use]
    pub fn try_start(&self) -> Option<InFlightGuard> {
        self.0
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| InFlightGuard(Arc::clone(&self.0)))
    }
}

/// Clears the flag when dropped.
#[must_use]
pub struct InFlightGuard(Arc<AtomicBool>);

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}
