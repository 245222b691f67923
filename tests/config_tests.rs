// Config loading and validation tests

use statseries::config::AppConfig;

const VALID_CONFIG: &str = r#"
[subject]
pid = 4242
disk_device = "sda"
network_interface = "eth0"

[sampling]
sample_interval_ms = 1000
stats_log_interval_secs = 60

[output]
path = "data/etcd.csv"
"#;

#[test]
fn test_config_loads_from_str() {
    let config = AppConfig::load_from_str(VALID_CONFIG).expect("load_from_str");
    assert_eq!(config.subject.pid, Some(4242));
    assert_eq!(config.subject.program, None);
    assert_eq!(config.subject.disk_device, "sda");
    assert_eq!(config.subject.network_interface, "eth0");
    assert_eq!(config.sampling.sample_interval_ms, 1000);
    assert_eq!(config.output.path, "data/etcd.csv");
}

#[test]
fn test_config_defaults_when_omitted() {
    let config = AppConfig::load_from_str(VALID_CONFIG).expect("valid");
    assert_eq!(config.sampling.duration_secs, 0);
    assert_eq!(config.sampling.channel_capacity, 64);
    assert_eq!(config.output.max_backfill_seconds, None);
}

#[test]
fn test_config_accepts_program_instead_of_pid() {
    let cfg = VALID_CONFIG.replace("pid = 4242", "program = \"etcd\"");
    let config = AppConfig::load_from_str(&cfg).expect("valid");
    assert_eq!(config.subject.pid, None);
    assert_eq!(config.subject.program.as_deref(), Some("etcd"));
}

#[test]
fn test_config_validation_rejects_pid_and_program_together() {
    let bad = VALID_CONFIG.replace("pid = 4242", "pid = 4242\nprogram = \"etcd\"");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("exactly one"));
}

#[test]
fn test_config_validation_rejects_missing_subject_process() {
    let bad = VALID_CONFIG.replace("pid = 4242\n", "");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("exactly one"));
}

#[test]
fn test_config_validation_rejects_empty_program() {
    let bad = VALID_CONFIG.replace("pid = 4242", "program = \"\"");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("subject.program"));
}

#[test]
fn test_config_validation_rejects_empty_disk_device() {
    let bad = VALID_CONFIG.replace("disk_device = \"sda\"", "disk_device = \"\"");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("subject.disk_device"));
}

#[test]
fn test_config_validation_rejects_empty_network_interface() {
    let bad = VALID_CONFIG.replace("network_interface = \"eth0\"", "network_interface = \"\"");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("subject.network_interface"));
}

#[test]
fn test_config_validation_rejects_sample_interval_zero() {
    let bad = VALID_CONFIG.replace("sample_interval_ms = 1000", "sample_interval_ms = 0");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("sample_interval_ms"));
}

#[test]
fn test_config_validation_rejects_channel_capacity_zero() {
    let bad = VALID_CONFIG.replace(
        "stats_log_interval_secs = 60",
        "stats_log_interval_secs = 60\nchannel_capacity = 0",
    );
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("channel_capacity"));
}

#[test]
fn test_config_validation_rejects_stats_log_interval_zero() {
    let bad = VALID_CONFIG.replace(
        "stats_log_interval_secs = 60",
        "stats_log_interval_secs = 0",
    );
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("stats_log_interval_secs"));
}

#[test]
fn test_config_validation_rejects_empty_output_path() {
    let bad = VALID_CONFIG.replace("path = \"data/etcd.csv\"", "path = \"\"");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("output.path"));
}

#[test]
fn test_config_backfill_limit() {
    let cfg = VALID_CONFIG.replace(
        "path = \"data/etcd.csv\"",
        "path = \"data/etcd.csv\"\nmax_backfill_seconds = 300",
    );
    let config = AppConfig::load_from_str(&cfg).expect("valid");
    assert_eq!(config.output.max_backfill_seconds, Some(300));

    let bad = cfg.replace("max_backfill_seconds = 300", "max_backfill_seconds = 0");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("max_backfill_seconds"));
}

#[test]
fn test_config_validation_rejects_invalid_toml() {
    let err = AppConfig::load_from_str("not valid toml [[[").unwrap_err();
    assert!(!err.to_string().is_empty());
}

#[test]
fn test_config_load_from_file_via_env() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, VALID_CONFIG).unwrap();
    unsafe { std::env::set_var("CONFIG_FILE", path.to_str().unwrap()) };
    let result = AppConfig::load();
    unsafe { std::env::remove_var("CONFIG_FILE") };
    let config = result.expect("load from CONFIG_FILE");
    assert_eq!(config.subject.pid, Some(4242));
    assert_eq!(config.output.path, "data/etcd.csv");
}
