use thiserror::Error;

use tessara_types::Byte32;

/// Why the pool turned a transaction away.
///
/// Every rejection is a synchronous return value; no error crosses the
/// pool boundary as a panic. Callers decide whether to resubmit.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Reject {
    /// The hash is already staged.
    #[error("transaction {0:#x} already exists in the pool")]
    Duplicated(Byte32),

    /// The nonce is below the floor recorded for the sender.
    #[error("nonce {got} is below the highest nonce {seen} observed from this sender")]
    NonceTooOld { got: u64, seen: u64 },

    /// The admission-time score is under the configured threshold.
    #[error("priority {got} is below the configured threshold {threshold}")]
    PriorityTooLow { got: f64, threshold: f64 },

    /// The pool is at capacity and the transaction did not outbid the
    /// eviction candidate.
    #[error("pool is full and priority {0} does not beat the eviction candidate")]
    Full(f64),
}
