use tessara_app_config::TxPoolConfig;
use tessara_logger::{debug, info, warn};
use tessara_systemtime::unix_time_as_millis;
use tessara_types::{Byte32, Transaction};
use tessara_util::RwLock;

use crate::component::entry::TxEntry;
use crate::component::heap::PriorityHeap;
use crate::component::pool_map::PoolMap;
use crate::error::Reject;

/// A point-in-time summary of pool occupancy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PoolInfo {
    /// Live staged transactions.
    pub size: usize,
    /// Heap slots held by already-removed transactions.
    pub tombstones: usize,
    /// Configured capacity.
    pub max_size: usize,
}

/// The bounded staging pool between verifier and block builder.
///
/// One readers-writer lock guards the index, the heap, and the nonce
/// floors together. `get`, `size`, and the selection snapshot take the
/// read lock; mutations take the write lock. No method blocks on a
/// background event.
pub struct TxPool {
    config: TxPoolConfig,
    inner: RwLock<PoolMap>,
}

impl TxPool {
    /// An empty pool with the given limits.
    pub fn new(config: TxPoolConfig) -> Self {
        let inner = RwLock::new(PoolMap::new(config.max_size));
        TxPool { config, inner }
    }

    /// The pool's configuration.
    pub fn config(&self) -> &TxPoolConfig {
        &self.config
    }

    /// Stage a verified transaction.
    ///
    /// Checks run in a fixed order: duplicate, nonce floor, priority
    /// threshold, capacity. At capacity the heap-tail candidate is evicted
    /// when the newcomer outbids it, otherwise the newcomer is refused.
    pub fn add(&self, tx: Transaction) -> Result<(), Reject> {
        let hash = tx.hash();
        let entry = TxEntry::new(tx, unix_time_as_millis());
        let priority = entry.priority;
        let result = self
            .inner
            .write()
            .add_entry(entry, self.config.priority_threshold);
        match &result {
            Ok(evicted) => {
                info!("tx-pool staged {:#x} priority={}", hash, priority);
                if let Some(evicted) = evicted {
                    debug!("tx-pool evicted {:#x} for {:#x}", evicted, hash);
                }
                self.publish_occupancy();
            }
            Err(reject) => {
                warn!("tx-pool rejected {:#x}: {}", hash, reject);
            }
        }
        result.map(|_| ())
    }

    /// The staged transaction with this hash, if it is still live.
    pub fn get(&self, hash: &Byte32) -> Option<Transaction> {
        self.inner.read().get(hash).map(|entry| entry.tx.clone())
    }

    /// Cheap membership probe for gossip dedup.
    pub fn contains(&self, hash: &Byte32) -> bool {
        self.inner.read().contains(hash)
    }

    /// Remove by hash, usually after block inclusion. Returns the removed
    /// transaction, or `None` when the hash is not staged.
    pub fn remove(&self, hash: &Byte32) -> Option<Transaction> {
        let removed = self.inner.write().remove_entry(hash);
        if let Some(entry) = &removed {
            debug!("tx-pool removed {:#x}", entry.tx.hash());
            self.publish_occupancy();
        }
        removed.map(|entry| entry.tx)
    }

    /// Number of live staged transactions.
    pub fn size(&self) -> usize {
        self.inner.read().size()
    }

    /// Occupancy snapshot for the status surface.
    pub fn info(&self) -> PoolInfo {
        let inner = self.inner.read();
        PoolInfo {
            size: inner.size(),
            tombstones: inner.tombstones(),
            max_size: inner.max_size(),
        }
    }

    /// Up to `n` live transactions in descending score order, leaving the
    /// pool untouched.
    ///
    /// Takes a re-scored snapshot of the heap under the read lock,
    /// releases it, then pops from the private copy; popped hashes are
    /// checked against the live index, so anything removed in the
    /// meantime is skipped rather than returned.
    pub fn top(&self, n: usize) -> Vec<Transaction> {
        if n == 0 {
            return Vec::new();
        }
        let now = unix_time_as_millis();
        let keys = self.inner.read().scored_snapshot(now);

        let mut heap = PriorityHeap::new();
        heap.rebuild(keys);

        let mut picked = Vec::with_capacity(n.min(heap.len()));
        let inner = self.inner.read();
        while picked.len() < n {
            match heap.pop() {
                Some(key) => {
                    if let Some(entry) = inner.get(&key.hash) {
                        picked.push(entry.tx.clone());
                    }
                }
                None => break,
            }
        }
        picked
    }

    /// Expire everything older than the configured max age. Returns the
    /// number of transactions dropped. Called by the service sweeper and
    /// available to embedders that run their own scheduler.
    pub fn cleanup(&self) -> usize {
        let now = unix_time_as_millis();
        let expired = self
            .inner
            .write()
            .purge_expired(now, self.config.max_age_millis());
        if !expired.is_empty() {
            debug!("tx-pool expired {} transactions", expired.len());
            self.publish_occupancy();
        }
        expired.len()
    }

    fn publish_occupancy(&self) {
        if let Some(metrics) = tessara_metrics::handle() {
            let inner = self.inner.read();
            metrics.tessara_tx_pool_size.set(inner.size() as i64);
            metrics
                .tessara_tx_pool_tombstones
                .set(inner.tombstones() as i64);
        }
    }
}
