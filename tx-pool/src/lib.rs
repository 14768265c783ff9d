//! The Tessara transaction staging pool.
//!
//! A bounded, priority-ordered buffer between the verifier and the block
//! builder. Transactions enter through [`TxPool::add`] after upstream
//! validation, are ordered by fee-per-gas with a gentle boost for entries
//! that have waited, and leave either through [`TxPool::remove`] when a
//! block includes them, through capacity eviction when something better
//! arrives, or through the age sweeper owned by [`TxPoolService`].
//!
//! Replay protection is a per-sender nonce floor that only ever rises:
//! once a nonce has been observed, anything older is turned away, even
//! after the observed transaction itself is long gone.
//!
//! Nothing here touches stable storage. A restarted node starts with an
//! empty pool and lets the network re-gossip.

pub mod component;
mod error;
mod pool;
mod service;


pub use error::Reject;
pub use pool::{PoolInfo, TxPool};
pub use service::TxPoolService;
