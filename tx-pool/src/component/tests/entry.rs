use crate::component::entry::TxEntry;
use crate::component::tests::util::build_tx;

#[test]
fn admission_priority_is_fee_per_gas() {
    let entry = TxEntry::new(build_tx(1, 1, 0, 21_000, 3), 0);
    assert_eq!(entry.priority, 3.0);
}

#[test]
fn zero_gas_limit_scores_zero() {
    let entry = TxEntry::new(build_tx(1, 1, 0, 0, 100), 0);
    assert_eq!(entry.priority, 0.0);
}

#[test]
fn score_grows_linearly_with_age() {
    let entry = TxEntry::new(build_tx(1, 1, 0, 10, 10), 0);
    assert_eq!(entry.score(0), 10.0);
    // one hour of waiting doubles the admission score
    assert_eq!(entry.score(3_600_000), 20.0);
    assert_eq!(entry.score(1_800_000), 15.0);
}

#[test]
fn score_ignores_a_clock_running_backwards() {
    let entry = TxEntry::new(build_tx(1, 1, 0, 10, 10), 5_000);
    assert_eq!(entry.score(1_000), entry.priority);
}

#[test]
fn expiry_is_strictly_older_than_max_age() {
    let entry = TxEntry::new(build_tx(1, 1, 0, 10, 10), 1_000);
    assert!(!entry.is_expired(1_000, 500));
    assert!(!entry.is_expired(1_500, 500));
    assert!(entry.is_expired(1_501, 500));
}
