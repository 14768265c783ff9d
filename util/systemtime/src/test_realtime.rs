#![cfg(not(feature = "enable_faketime"))]

use crate::{system_time_as_millis, unix_time_as_millis};

#[test]
fn real_clock_is_monotone_enough() {
    let before = system_time_as_millis();
    assert!(unix_time_as_millis() >= before);
}
