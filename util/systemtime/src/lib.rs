//! The single clock every Tessara component reads.
//!
//! Production code calls [`unix_time_as_millis`]. With the `enable_faketime`
//! feature (tests only) the returned timestamp can be pinned through a
//! [`FaketimeGuard`], which serializes clock-dependent tests against each
//! other and restores the real clock when dropped.

use std::time::{SystemTime, UNIX_EPOCH};

#[cfg(feature = "enable_faketime")]
mod faketime;
#[cfg(feature = "enable_faketime")]
pub use faketime::{FaketimeGuard, faketime};

#[cfg(test)]
mod test_faketime;
#[cfg(test)]
mod test_realtime;

/// Milliseconds since the unix epoch, read from the system clock.
pub fn system_time_as_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock is set before the unix epoch")
        .as_millis() as u64
}

/// Milliseconds since the unix epoch, honoring an active faketime guard.
pub fn unix_time_as_millis() -> u64 {
    #[cfg(feature = "enable_faketime")]
    if let Some(fake) = faketime::current() {
        return fake;
    }
    system_time_as_millis()
}
