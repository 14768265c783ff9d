#![cfg(feature = "enable_faketime")]

use crate::{faketime, system_time_as_millis, unix_time_as_millis};

#[test]
fn set_and_move_faketime() {
    let guard = faketime();

    guard.set_faketime(123);
    assert_eq!(unix_time_as_millis(), 123);

    // The fake clock may move backwards; tests own it entirely.
    guard.set_faketime(100);
    assert_eq!(unix_time_as_millis(), 100);

    guard.disable_faketime();
    let now = system_time_as_millis();
    assert!(unix_time_as_millis() >= now);
}

#[test]
fn faketime_is_disabled_when_guard_drops() {
    let before = system_time_as_millis();
    {
        let guard = faketime();
        guard.set_faketime(7);
        assert_eq!(unix_time_as_millis(), 7);
    }
    assert!(unix_time_as_millis() >= before);
}
