use std::collections::HashMap;

use tessara_types::Byte32;

use crate::component::entry::TxEntry;
use crate::component::heap::{HeapKey, PriorityHeap};
use crate::error::Reject;

/// Below this many heap slots a rebuild is not worth the churn.
const REBUILD_MIN_SLOTS: usize = 8;

/// The staging container: tx index, priority heap, and per-sender nonce
/// floors. Not internally synchronized; [`TxPool`] wraps it in one
/// readers-writer lock.
///
/// Removal only deletes from the index. The heap slot stays behind as a
/// tombstone until `add` notices tombstones outnumber live entries and
/// rebuilds, or a selection pass skips over it.
///
/// [`TxPool`]: crate::pool::TxPool
#[derive(Default)]
pub struct PoolMap {
    entries: HashMap<Byte32, TxEntry>,
    heap: PriorityHeap,
    nonce_floors: HashMap<Byte32, u64>,
    max_size: usize,
}

impl PoolMap {
    pub fn new(max_size: usize) -> Self {
        PoolMap {
            entries: HashMap::new(),
            heap: PriorityHeap::new(),
            nonce_floors: HashMap::new(),
            max_size,
        }
    }

    /// Live entries; tombstones do not count.
    pub fn size(&self) -> usize {
        self.entries.len()
    }

    /// Heap slots whose transaction is already gone.
    pub fn tombstones(&self) -> usize {
        self.heap.len() - self.entries.len()
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    pub fn contains(&self, hash: &Byte32) -> bool {
        self.entries.contains_key(hash)
    }

    pub fn get(&self, hash: &Byte32) -> Option<&TxEntry> {
        self.entries.get(hash)
    }

    /// The highest nonce ever observed from `sender`, surviving removals.
    pub fn nonce_floor(&self, sender: &Byte32) -> Option<u64> {
        self.nonce_floors.get(sender).copied()
    }

    /// Admit `entry`, evicting the current heap-tail candidate when the
    /// pool is at capacity. Returns the evicted hash, if any.
    pub fn add_entry(
        &mut self,
        entry: TxEntry,
        priority_threshold: f64,
    ) -> Result<Option<Byte32>, Reject> {
        let hash = entry.tx.hash();
        if self.entries.contains_key(&hash) {
            return Err(Reject::Duplicated(hash));
        }

        if let Some(&seen) = self.nonce_floors.get(&entry.tx.sender()) {
            // The floor is `<`, not `<=`: a removed transaction may be
            // re-added at the nonce it was observed with.
            if entry.tx.nonce() < seen {
                return Err(Reject::NonceTooOld {
                    got: entry.tx.nonce(),
                    seen,
                });
            }
        }

        if entry.priority < priority_threshold {
            return Err(Reject::PriorityTooLow {
                got: entry.priority,
                threshold: priority_threshold,
            });
        }

        let mut evicted = None;
        if self.entries.len() >= self.max_size {
            evicted = Some(self.evict_for(entry.priority)?);
        }

        self.nonce_floors.insert(entry.tx.sender(), entry.tx.nonce());
        self.heap.push(HeapKey {
            priority: entry.priority,
            hash,
        });
        self.entries.insert(hash, entry);
        self.maybe_rebuild();
        Ok(evicted)
    }

    /// Find a victim for an incoming entry with score `incoming`.
    ///
    /// The candidate is the heap-tail leaf: constant to reach and by heap
    /// shape no larger than its ancestors, though not in general the true
    /// minimum. Tombstoned tail leaves are discarded on the way, so the
    /// comparison always runs against a live entry.
    fn evict_for(&mut self, incoming: f64) -> Result<Byte32, Reject> {
        while let Some(tail) = self.heap.tail() {
            if self.entries.contains_key(&tail.hash) {
                break;
            }
            self.heap.pop_tail();
        }
        match self.heap.tail() {
            Some(tail) if incoming > tail.priority => {
                // only the index forgets the victim; its heap slot becomes
                // a tombstone reclaimed by a later pass
                let hash = tail.hash;
                self.entries.remove(&hash);
                Ok(hash)
            }
            _ => Err(Reject::Full(incoming)),
        }
    }

    /// Delete by hash. The heap slot stays behind as a tombstone.
    pub fn remove_entry(&mut self, hash: &Byte32) -> Option<TxEntry> {
        self.entries.remove(hash)
    }

    /// Delete every entry older than `max_age_millis` at `now`; returns
    /// the expired hashes. Nonce floors are untouched: replay protection
    /// must survive expiry.
    pub fn purge_expired(&mut self, now: u64, max_age_millis: u64) -> Vec<Byte32> {
        let expired: Vec<Byte32> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired(now, max_age_millis))
            .map(|(hash, _)| *hash)
            .collect();
        for hash in &expired {
            self.entries.remove(hash);
        }
        expired
    }

    /// Keys for every live entry, re-scored at `now` so the age boost is
    /// in effect, in backing-array order. Input for a selection heap.
    pub fn scored_snapshot(&self, now: u64) -> Vec<HeapKey> {
        self.heap
            .as_slice()
            .iter()
            .filter_map(|key| {
                self.entries.get(&key.hash).map(|entry| HeapKey {
                    priority: entry.score(now),
                    hash: key.hash,
                })
            })
            .collect()
    }

    fn maybe_rebuild(&mut self) {
        let slots = self.heap.len();
        if slots < REBUILD_MIN_SLOTS {
            return;
        }
        let tombstones = slots - self.entries.len();
        if tombstones * 2 > slots {
            let keys = self
                .entries
                .iter()
                .map(|(hash, entry)| HeapKey {
                    priority: entry.priority,
                    hash: *hash,
                })
                .collect();
            self.heap.rebuild(keys);
        }
    }
}
