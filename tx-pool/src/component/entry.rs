use tessara_types::Transaction;

const MILLIS_PER_HOUR: f64 = 3_600_000.0;

/// A staged transaction plus the bookkeeping the pool assigns at admission.
///
/// The transaction itself stays immutable; `priority` and `added_at` are
/// pool-side derivations fixed when the entry is created.
#[derive(Clone, Debug)]
pub struct TxEntry {
    /// The staged transaction.
    pub tx: Transaction,
    /// Admission-time score: fee per unit of gas.
    pub priority: f64,
    /// Wall-clock insertion time, millis since the unix epoch.
    pub added_at: u64,
}

impl TxEntry {
    /// Wrap a transaction admitted at `added_at`.
    pub fn new(tx: Transaction, added_at: u64) -> Self {
        let priority = fee_per_gas(&tx);
        TxEntry {
            tx,
            priority,
            added_at,
        }
    }

    /// Score at `now`: the admission score boosted by the hours the entry
    /// has waited. Equals `priority` at admission and grows linearly, so a
    /// transaction that keeps losing the fee auction slowly gains ground.
    pub fn score(&self, now: u64) -> f64 {
        let age_hours = now.saturating_sub(self.added_at) as f64 / MILLIS_PER_HOUR;
        self.priority * (1.0 + age_hours)
    }

    /// Whether the entry has outlived `max_age_millis` at `now`.
    pub fn is_expired(&self, now: u64, max_age_millis: u64) -> bool {
        now.saturating_sub(self.added_at) > max_age_millis
    }
}

fn fee_per_gas(tx: &Transaction) -> f64 {
    if tx.gas_limit() == 0 {
        return 0.0;
    }
    tx.fee() as f64 / tx.gas_limit() as f64
}
