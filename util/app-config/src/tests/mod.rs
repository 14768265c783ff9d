use crate::AppConfig;

#[test]
fn load_from_an_exported_file() {
    let dir = tempfile::Builder::new()
        .prefix("app_config_test")
        .tempdir()
        .expect("create tempdir");
    let path = dir.path().join("tessara.toml");
    std::fs::write(
        &path,
        b"[admission]\nenabled = false\n\n[tx_pool]\nmax_size = 7\n",
    )
    .expect("write config file");

    let raw = std::fs::read(&path).expect("read config file");
    let config = AppConfig::load_from_slice(&raw).expect("deserialize config");
    assert!(!config.admission.enabled);
    assert_eq!(config.tx_pool.max_size, 7);
}

#[test]
fn defaults_match_documented_values() {
    let config = AppConfig::default();
    assert!(config.admission.enabled);
    assert_eq!(config.admission.burst_multiplier, 2.0);
    assert_eq!(config.admission.cleanup_interval_secs, 300);
    assert_eq!(config.tx_pool.max_size, 10_000);
    assert_eq!(config.tx_pool.max_age_secs, 3_600);
    assert_eq!(config.tx_pool.priority_threshold, 0.0);
}

#[test]
fn load_full_file() {
    let raw = br#"
        [admission]
        enabled = true
        global_limit = 500.0
        address_limit = 5.0
        peer_limit = 20.0
        burst_multiplier = 1.5
        max_queue_size = 128
        cleanup_interval_secs = 60

        [tx_pool]
        max_size = 4096
        max_age_secs = 1800
        cleanup_interval_secs = 30
        priority_threshold = 0.5
    "#;
    let config = AppConfig::load_from_slice(raw).expect("deserialize config");
    assert_eq!(config.admission.global_limit, 500.0);
    assert_eq!(config.admission.max_queue_size, 128);
    assert_eq!(config.tx_pool.max_size, 4096);
    assert_eq!(config.tx_pool.max_age_millis(), 1_800_000);
    assert_eq!(config.tx_pool.priority_threshold, 0.5);
}

#[test]
fn missing_tables_fall_back_to_defaults() {
    let config = AppConfig::load_from_slice(b"").expect("empty config");
    assert_eq!(config.admission.address_limit, 10.0);
    assert_eq!(config.tx_pool.cleanup_interval_secs, 300);
}

#[test]
fn partial_table_keeps_remaining_defaults() {
    let raw = br#"
        [admission]
        address_limit = 3.0
    "#;
    let config = AppConfig::load_from_slice(raw).expect("partial config");
    assert_eq!(config.admission.address_limit, 3.0);
    assert_eq!(config.admission.peer_limit, 50.0);
}

#[test]
fn unknown_keys_are_rejected() {
    let raw = br#"
        [admission]
        adress_limit = 3.0
    "#;
    assert!(AppConfig::load_from_slice(raw).is_err());

    let raw = br#"
        [tx_poool]
        max_size = 1
    "#;
    assert!(AppConfig::load_from_slice(raw).is_err());
}

#[test]
fn interval_helpers_never_go_below_one_second() {
    let raw = br#"
        [admission]
        cleanup_interval_secs = 0
        [tx_pool]
        cleanup_interval_secs = 0
    "#;
    let config = AppConfig::load_from_slice(raw).expect("zero intervals");
    assert_eq!(config.admission.cleanup_interval().as_secs(), 1);
    assert_eq!(config.tx_pool.cleanup_interval().as_secs(), 1);
}
