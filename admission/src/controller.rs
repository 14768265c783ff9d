use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::thread::{self, JoinHandle};

use tessara_app_config::AdmissionConfig;
use tessara_channel::{Sender, bounded, select, tick};
use tessara_logger::{debug, info, warn};
use tessara_util::{Mutex, RwLock};

use crate::source::source_address;
use crate::token_bucket::TokenBucket;

/// Queue-depth ratio above which `utilization` reports near-capacity.
const NEAR_CAPACITY_RATIO: f64 = 0.8;

/// Outcome of an admission query.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Admission {
    /// Admission control is switched off; the request passes untouched.
    Disabled,
    /// Every gate granted a token.
    Granted,
    /// The downstream queue reported its ceiling; load is shed before any
    /// bucket arithmetic.
    QueueFull,
    /// The process-wide bucket is dry.
    GlobalLimited,
    /// The per-address bucket is dry.
    AddressLimited,
    /// The per-peer bucket is dry.
    PeerLimited,
}

impl Admission {
    /// Whether the request may proceed.
    pub fn is_accepted(self) -> bool {
        matches!(self, Admission::Disabled | Admission::Granted)
    }

    /// Machine-readable reason tag; addresses read `address` here.
    pub fn reason(self) -> &'static str {
        match self {
            Admission::Disabled => "disabled",
            Admission::Granted => "granted",
            Admission::QueueFull => "queue_full",
            Admission::GlobalLimited => "global",
            Admission::AddressLimited => "address",
            Admission::PeerLimited => "peer",
        }
    }

    /// `type` label on the metric counters; addresses count under `ip`.
    fn metrics_label(self) -> &'static str {
        match self {
            Admission::AddressLimited => "ip",
            other => other.reason(),
        }
    }
}

impl fmt::Display for Admission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.reason())
    }
}

#[derive(Clone, Copy)]
enum SourceClass {
    Address,
    Peer,
}

impl SourceClass {
    fn label(self) -> &'static str {
        match self {
            SourceClass::Address => "ip",
            SourceClass::Peer => "peer",
        }
    }

    fn limited(self) -> Admission {
        match self {
            SourceClass::Address => Admission::AddressLimited,
            SourceClass::Peer => Admission::PeerLimited,
        }
    }
}

#[derive(Default)]
struct Counters {
    accepted_address: AtomicU64,
    accepted_peer: AtomicU64,
    accepted_disabled: AtomicU64,
    rejected_queue_full: AtomicU64,
    rejected_global: AtomicU64,
    rejected_address: AtomicU64,
    rejected_peer: AtomicU64,
}

/// Point-in-time snapshot of the controller's counters and gauges.
///
/// Kept in-process regardless of whether the metrics service runs, so the
/// RPC status surface and tests can read it directly.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AdmissionStats {
    pub accepted_address: u64,
    pub accepted_peer: u64,
    pub accepted_disabled: u64,
    pub rejected_queue_full: u64,
    pub rejected_global: u64,
    pub rejected_address: u64,
    pub rejected_peer: u64,
    pub address_buckets: usize,
    pub peer_buckets: usize,
    pub queue_size: usize,
    pub max_queue_size: usize,
}

struct Sweeper {
    stop_tx: Sender<()>,
    thread: JoinHandle<()>,
}

type BucketMap = RwLock<HashMap<String, Arc<TokenBucket>>>;

/// The layered admission gate in front of the verifier and the pool.
///
/// See the crate docs for the gate order. All admission state is in
/// memory; a restart forgets every bucket, which is harmless because a
/// fresh bucket starts full.
pub struct AdmissionController {
    config: AdmissionConfig,
    global: TokenBucket,
    address_buckets: BucketMap,
    peer_buckets: BucketMap,
    queue_size: AtomicUsize,
    counters: Counters,
    sweeper: Mutex<Option<Sweeper>>,
}

impl AdmissionController {
    /// Build a controller; no thread is spawned until [`start`].
    ///
    /// [`start`]: AdmissionController::start
    pub fn new(config: AdmissionConfig) -> Self {
        let global = TokenBucket::new(config.global_limit, config.burst_multiplier);
        if let Some(metrics) = tessara_metrics::handle() {
            metrics
                .tessara_admission_downstream_queue_limit
                .set(config.max_queue_size as i64);
        }
        AdmissionController {
            config,
            global,
            address_buckets: RwLock::new(HashMap::new()),
            peer_buckets: RwLock::new(HashMap::new()),
            queue_size: AtomicUsize::new(0),
            counters: Counters::default(),
            sweeper: Mutex::new(None),
        }
    }

    /// Decide whether a request from the given source address may proceed.
    pub fn check_address(&self, addr: &str) -> Admission {
        self.check_source(SourceClass::Address, addr)
    }

    /// Decide whether a message from the given peer may proceed.
    pub fn check_peer(&self, peer_id: &str) -> Admission {
        self.check_source(SourceClass::Peer, peer_id)
    }

    /// Convenience wrapper for the RPC layer: strips any `:port` suffix
    /// from the remote endpoint and checks the remaining address.
    pub fn check_request(&self, remote_endpoint: &str) -> Admission {
        self.check_address(&source_address(remote_endpoint))
    }

    fn check_source(&self, class: SourceClass, key: &str) -> Admission {
        if !self.config.enabled {
            self.counters.accepted_disabled.fetch_add(1, Ordering::Relaxed);
            if let Some(metrics) = tessara_metrics::handle() {
                metrics
                    .tessara_admission_requests_accepted
                    .with_label_values(&["disabled"])
                    .inc();
            }
            return Admission::Disabled;
        }

        if self.queue_size.load(Ordering::Relaxed) >= self.config.max_queue_size {
            return self.reject(Admission::QueueFull, class, key);
        }

        if !self.global.try_take_one_token() {
            return self.reject(Admission::GlobalLimited, class, key);
        }

        let bucket = self.bucket_for(class, key);
        if !bucket.try_take_one_token() {
            return self.reject(class.limited(), class, key);
        }

        let counter = match class {
            SourceClass::Address => &self.counters.accepted_address,
            SourceClass::Peer => &self.counters.accepted_peer,
        };
        counter.fetch_add(1, Ordering::Relaxed);
        if let Some(metrics) = tessara_metrics::handle() {
            metrics
                .tessara_admission_requests_accepted
                .with_label_values(&[class.label()])
                .inc();
        }
        Admission::Granted
    }

    fn reject(&self, verdict: Admission, class: SourceClass, key: &str) -> Admission {
        let counter = match verdict {
            Admission::QueueFull => &self.counters.rejected_queue_full,
            Admission::GlobalLimited => &self.counters.rejected_global,
            Admission::AddressLimited => &self.counters.rejected_address,
            _ => &self.counters.rejected_peer,
        };
        counter.fetch_add(1, Ordering::Relaxed);
        if let Some(metrics) = tessara_metrics::handle() {
            metrics
                .tessara_admission_requests_rejected
                .with_label_values(&[verdict.metrics_label()])
                .inc();
        }
        warn!(
            "admission rejected {}={} reason={}",
            class.label(),
            key,
            verdict
        );
        verdict
    }

    /// Look up the bucket for `key`, creating it on first observation.
    ///
    /// Read-lock lookup first; a miss drops the read lock, takes the write
    /// lock and checks again, so two racing first-accesses end up sharing
    /// one bucket.
    fn bucket_for(&self, class: SourceClass, key: &str) -> Arc<TokenBucket> {
        let map = self.map_for(class);
        if let Some(bucket) = map.read().get(key) {
            return Arc::clone(bucket);
        }

        let mut map = map.write();
        if let Some(bucket) = map.get(key) {
            return Arc::clone(bucket);
        }
        let rate = match class {
            SourceClass::Address => self.config.address_limit,
            SourceClass::Peer => self.config.peer_limit,
        };
        let bucket = Arc::new(TokenBucket::new(rate, self.config.burst_multiplier));
        map.insert(key.to_string(), Arc::clone(&bucket));
        info!(
            "admission created bucket {}={} rate={}/s ceiling={}",
            class.label(),
            key,
            bucket.rate(),
            bucket.ceiling()
        );
        if let Some(metrics) = tessara_metrics::handle() {
            metrics
                .tessara_admission_active_buckets
                .with_label_values(&[class.label()])
                .set(map.len() as i64);
        }
        bucket
    }

    fn map_for(&self, class: SourceClass) -> &BucketMap {
        match class {
            SourceClass::Address => &self.address_buckets,
            SourceClass::Peer => &self.peer_buckets,
        }
    }

    /// Report the downstream queue depth. A load signal, not flow control:
    /// the caller is never blocked here.
    pub fn set_queue_size(&self, size: usize) {
        self.queue_size.store(size, Ordering::Relaxed);
        if let Some(metrics) = tessara_metrics::handle() {
            metrics
                .tessara_admission_downstream_queue_size
                .set(size as i64);
        }
    }

    /// `(near_capacity, ratio)` of the downstream queue; near-capacity
    /// trips above 80% of the configured ceiling.
    pub fn utilization(&self) -> (bool, f64) {
        let max = self.config.max_queue_size;
        if max == 0 {
            return (true, 1.0);
        }
        let ratio = self.queue_size.load(Ordering::Relaxed) as f64 / max as f64;
        (ratio > NEAR_CAPACITY_RATIO, ratio)
    }

    /// Drop every per-identity bucket that has refilled back to its
    /// ceiling. Returns `(reclaimed_addresses, reclaimed_peers)`.
    pub fn sweep_idle_buckets(&self) -> (usize, usize) {
        let addresses = Self::sweep_map(&self.address_buckets);
        let peers = Self::sweep_map(&self.peer_buckets);
        if let Some(metrics) = tessara_metrics::handle() {
            metrics
                .tessara_admission_active_buckets
                .with_label_values(&["ip"])
                .set(self.address_buckets.read().len() as i64);
            metrics
                .tessara_admission_active_buckets
                .with_label_values(&["peer"])
                .set(self.peer_buckets.read().len() as i64);
        }
        debug!(
            "admission sweep reclaimed ip_buckets={} peer_buckets={}",
            addresses, peers
        );
        (addresses, peers)
    }

    fn sweep_map(map: &BucketMap) -> usize {
        let mut map = map.write();
        let before = map.len();
        map.retain(|_, bucket| !bucket.is_idle());
        before - map.len()
    }

    /// Snapshot counters and gauges.
    pub fn stats(&self) -> AdmissionStats {
        AdmissionStats {
            accepted_address: self.counters.accepted_address.load(Ordering::Relaxed),
            accepted_peer: self.counters.accepted_peer.load(Ordering::Relaxed),
            accepted_disabled: self.counters.accepted_disabled.load(Ordering::Relaxed),
            rejected_queue_full: self.counters.rejected_queue_full.load(Ordering::Relaxed),
            rejected_global: self.counters.rejected_global.load(Ordering::Relaxed),
            rejected_address: self.counters.rejected_address.load(Ordering::Relaxed),
            rejected_peer: self.counters.rejected_peer.load(Ordering::Relaxed),
            address_buckets: self.address_buckets.read().len(),
            peer_buckets: self.peer_buckets.read().len(),
            queue_size: self.queue_size.load(Ordering::Relaxed),
            max_queue_size: self.config.max_queue_size,
        }
    }

    /// Spawn the idle-bucket sweeper. Idempotent.
    pub fn start(self: &Arc<Self>) {
        let mut slot = self.sweeper.lock();
        if slot.is_some() {
            return;
        }
        let interval = self.config.cleanup_interval();
        let (stop_tx, stop_rx) = bounded::<()>(1);
        let controller = Arc::clone(self);
        let thread = thread::Builder::new()
            .name("admission_sweeper".into())
            .spawn(move || {
                let ticker = tick(interval);
                loop {
                    select! {
                        recv(ticker) -> _ => {
                            controller.sweep_idle_buckets();
                        },
                        recv(stop_rx) -> _ => break,
                    }
                }
            })
            .expect("spawn admission_sweeper thread");
        info!(
            "admission sweeper started interval_secs={}",
            interval.as_secs()
        );
        *slot = Some(Sweeper { stop_tx, thread });
    }

    /// Stop and join the sweeper. Idempotent; admission queries keep
    /// working afterwards, only reclamation stops.
    pub fn stop(&self) {
        if let Some(Sweeper { stop_tx, thread }) = self.sweeper.lock().take() {
            let _ = stop_tx.send(());
            let _ = thread.join();
            info!("admission sweeper stopped");
        }
    }
}
