//! Core types shared by the Tessara admission and staging crates.
//!
//! The network and verifier layers translate wire payloads into these
//! records before handing them over; nothing here knows how to serialize
//! itself, sign itself, or touch a database.

mod hash;
mod transaction;

pub use bytes;
pub use hash::Byte32;
pub use transaction::{Transaction, TransactionBuilder, TxType};
