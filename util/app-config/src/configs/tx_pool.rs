use serde::Deserialize;
use std::time::Duration;

/// Transaction pool options.
#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct TxPoolConfig {
    /// Maximum number of staged transactions.
    pub max_size: usize,
    /// Age after which a staged transaction expires.
    pub max_age_secs: u64,
    /// Period of the expiry sweeper.
    pub cleanup_interval_secs: u64,
    /// Minimum priority score admitted; 0 accepts every positive-fee
    /// transaction.
    pub priority_threshold: f64,
}

impl Default for TxPoolConfig {
    fn default() -> Self {
        TxPoolConfig {
            max_size: 10_000,
            max_age_secs: 3_600,
            cleanup_interval_secs: 300,
            priority_threshold: 0.0,
        }
    }
}

impl TxPoolConfig {
    /// Expiry age in milliseconds, the unit the pool clock runs on.
    pub fn max_age_millis(&self) -> u64 {
        self.max_age_secs.saturating_mul(1_000)
    }

    /// Sweeper period as a [`Duration`], at least one second.
    pub fn cleanup_interval(&self) -> Duration {
        Duration::from_secs(self.cleanup_interval_secs.max(1))
    }
}
