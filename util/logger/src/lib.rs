//! Tessara logging facade.
//!
//! This crate is a thin wrapper over [`log`]: components emit through the
//! macros re-exported here, and the embedding binary decides which backend
//! to install (an env filter in development, the logging service in a
//! deployed node). Library crates must never install a backend themselves.
//!
//! ```
//! use tessara_logger::{debug, warn};
//!
//! fn tick(pending: usize) {
//!     debug!("tick pending={}", pending);
//!     if pending > 1_000 {
//!         warn!("backlog building up, pending={}", pending);
//!     }
//! }
//! ```

pub use log::{self, Level, debug, error, info, log_enabled, trace, warn};
