//! Layered request admission for the Tessara daemon.
//!
//! Every inbound request — an HTTP submission or a gossip message from a
//! peer — passes through the [`AdmissionController`] before any expensive
//! work happens. Three gates run in a fixed order: the backpressure gate
//! (shed load when the downstream queue is at its ceiling), the global
//! token bucket, and a lazily-created per-identity bucket. The first gate
//! that refuses decides the verdict; later gates are not charged.
//!
//! The controller is a long-lived singleton. A background sweeper reclaims
//! buckets that have sat idle for a full refill period, which keeps memory
//! bounded when an adversary cycles through throwaway identities.

mod controller;
mod source;
mod token_bucket;


pub use controller::{Admission, AdmissionController, AdmissionStats};
pub use source::source_address;
pub use token_bucket::TokenBucket;
