//! Tessara utilities.
//!
//! Re-exports the `parking_lot` lock types so that every crate in the
//! workspace agrees on a single implementation and version.

pub use parking_lot::{
    self, Condvar, Mutex, MutexGuard, RwLock, RwLockReadGuard, RwLockWriteGuard,
};
