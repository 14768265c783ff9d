//! Reexports `crossbeam_channel` so the whole workspace shares one version.

pub use crossbeam_channel::{
    Receiver, RecvError, RecvTimeoutError, SendError, Sender, TrySendError, after, bounded,
    select, tick, unbounded,
};
