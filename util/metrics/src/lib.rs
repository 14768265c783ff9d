//! A lightweight metrics facade for Tessara.
//!
//! Instrumented call sites guard every emission with
//! `if let Some(metrics) = tessara_metrics::handle() { ... }`, so a node
//! running without the metrics service pays one atomic load per site.
//! The embedder turns the facade on once with [`init`]; the registered
//! families live in the default prometheus registry and are exported by
//! whatever scrape endpoint the embedder runs.

use once_cell::sync::{Lazy, OnceCell};
use prometheus::{
    IntCounterVec, IntGauge, IntGaugeVec, register_int_counter_vec, register_int_gauge,
    register_int_gauge_vec,
};

static METRICS_SERVICE_ENABLED: OnceCell<()> = OnceCell::new();

static METRICS: Lazy<Metrics> = Lazy::new(|| Metrics {
    tessara_admission_requests_accepted: register_int_counter_vec!(
        "tessara_admission_requests_accepted",
        "Admission queries accepted, by source category",
        &["type"]
    )
    .expect("register tessara_admission_requests_accepted"),
    tessara_admission_requests_rejected: register_int_counter_vec!(
        "tessara_admission_requests_rejected",
        "Admission queries rejected, by gate",
        &["type"]
    )
    .expect("register tessara_admission_requests_rejected"),
    tessara_admission_active_buckets: register_int_gauge_vec!(
        "tessara_admission_active_buckets",
        "Live per-identity token buckets, by source category",
        &["type"]
    )
    .expect("register tessara_admission_active_buckets"),
    tessara_admission_downstream_queue_size: register_int_gauge!(
        "tessara_admission_downstream_queue_size",
        "Depth of the downstream queue as last reported"
    )
    .expect("register tessara_admission_downstream_queue_size"),
    tessara_admission_downstream_queue_limit: register_int_gauge!(
        "tessara_admission_downstream_queue_limit",
        "Configured ceiling of the downstream queue"
    )
    .expect("register tessara_admission_downstream_queue_limit"),
    tessara_tx_pool_size: register_int_gauge!(
        "tessara_tx_pool_size",
        "Pending transactions staged in the pool"
    )
    .expect("register tessara_tx_pool_size"),
    tessara_tx_pool_tombstones: register_int_gauge!(
        "tessara_tx_pool_tombstones",
        "Heap slots whose transaction has already been removed"
    )
    .expect("register tessara_tx_pool_tombstones"),
});

/// The process-wide metric families.
pub struct Metrics {
    /// Accepted admission queries; `type` is one of `ip`, `peer`, `disabled`.
    pub tessara_admission_requests_accepted: IntCounterVec,
    /// Rejected admission queries; `type` is one of `ip`, `peer`, `global`,
    /// `queue_full`.
    pub tessara_admission_requests_rejected: IntCounterVec,
    /// Live bucket counts; `type` is `ip` or `peer`.
    pub tessara_admission_active_buckets: IntGaugeVec,
    /// Last reported downstream queue depth.
    pub tessara_admission_downstream_queue_size: IntGauge,
    /// Configured downstream queue ceiling.
    pub tessara_admission_downstream_queue_limit: IntGauge,
    /// Current pool occupancy.
    pub tessara_tx_pool_size: IntGauge,
    /// Current tombstone count in the pool heap.
    pub tessara_tx_pool_tombstones: IntGauge,
}

/// Turn the facade on. Idempotent; usually called once by the embedder
/// right after the metrics exporter starts.
pub fn init() {
    let _ = METRICS_SERVICE_ENABLED.set(());
}

/// The metrics handle, or `None` while the facade is off.
pub fn handle() -> Option<&'static Metrics> {
    METRICS_SERVICE_ENABLED.get().map(|_| &*METRICS)
}

/// Gather every family registered in the default registry.
pub fn gather() -> Vec<prometheus::proto::MetricFamily> {
    prometheus::gather()
}
