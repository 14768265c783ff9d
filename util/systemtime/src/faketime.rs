use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

static FAKETIME_ENABLED: AtomicBool = AtomicBool::new(false);
static FAKETIME_MILLIS: AtomicU64 = AtomicU64::new(0);
static FAKETIME_OWNER: Mutex<()> = Mutex::new(());

pub(crate) fn current() -> Option<u64> {
    if FAKETIME_ENABLED.load(Ordering::SeqCst) {
        Some(FAKETIME_MILLIS.load(Ordering::SeqCst))
    } else {
        None
    }
}

/// Exclusive handle on the fake clock.
///
/// Holding the guard keeps other clock-dependent tests from running; the
/// fake clock is switched off again when the guard is dropped.
pub struct FaketimeGuard {
    _owner: MutexGuard<'static, ()>,
}

/// Acquire the fake clock. Blocks until no other test holds it.
pub fn faketime() -> FaketimeGuard {
    FaketimeGuard {
        _owner: FAKETIME_OWNER.lock().unwrap_or_else(PoisonError::into_inner),
    }
}

impl FaketimeGuard {
    /// Pin `unix_time_as_millis` to `millis`.
    pub fn set_faketime(&self, millis: u64) {
        FAKETIME_MILLIS.store(millis, Ordering::SeqCst);
        FAKETIME_ENABLED.store(true, Ordering::SeqCst);
    }

    /// Switch back to the system clock without releasing the guard.
    pub fn disable_faketime(&self) {
        FAKETIME_ENABLED.store(false, Ordering::SeqCst);
    }
}

impl Drop for FaketimeGuard {
    fn drop(&mut self) {
        FAKETIME_ENABLED.store(false, Ordering::SeqCst);
    }
}
