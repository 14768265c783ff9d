use serde::Deserialize;
use std::time::Duration;

/// Admission controller options.
///
/// All rates are tokens per second; every bucket's burst ceiling is
/// `ceil(rate * burst_multiplier)`.
#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct AdmissionConfig {
    /// Master switch. When false every query is admitted untouched and no
    /// per-identity state is kept.
    pub enabled: bool,
    /// Refill rate of the process-wide bucket.
    pub global_limit: f64,
    /// Refill rate of each per-address bucket.
    pub address_limit: f64,
    /// Refill rate of each per-peer bucket.
    pub peer_limit: f64,
    /// Burst headroom multiplier, clamped to at least 1.
    pub burst_multiplier: f64,
    /// Downstream queue depth at which the backpressure gate sheds load.
    pub max_queue_size: usize,
    /// Period of the idle-bucket sweeper.
    pub cleanup_interval_secs: u64,
}

impl Default for AdmissionConfig {
    fn default() -> Self {
        AdmissionConfig {
            enabled: true,
            global_limit: 1_000.0,
            address_limit: 10.0,
            peer_limit: 50.0,
            burst_multiplier: 2.0,
            max_queue_size: 10_000,
            cleanup_interval_secs: 300,
        }
    }
}

impl AdmissionConfig {
    /// Sweeper period as a [`Duration`], at least one second.
    pub fn cleanup_interval(&self) -> Duration {
        Duration::from_secs(self.cleanup_interval_secs.max(1))
    }
}
