//! Configuration loading.

use std::collections::HashMap;
use std::io::Write;
use warden::{Journal, LoopPolicy, WardenConfig, WardenErrorKind};

fn write_config(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn test_defaults_match_bundled_file() {
    let file = write_config("");
    let config = WardenConfig::from_file(file.path()).unwrap();
    assert_eq!(config, WardenConfig::default());
    assert_eq!(config.loop_policy, LoopPolicy::default());
    assert_eq!(config.journal.capacity, Journal::DEFAULT_CAPACITY);
}

#[test]
fn test_file_overrides_defaults() {
    let file = write_config(
        r#"
settings_path = "/var/lib/warden/settings.json"

[loop]
batch_size = 10
cycle_interval_secs = 30

[log]
json = true
file = "/var/log/warden/activity.log"
"#,
    );
    let config = WardenConfig::from_file(file.path()).unwrap();

    assert_eq!(*config.loop_policy.batch_size(), 10);
    assert_eq!(*config.loop_policy.cycle_interval_secs(), 30);
    assert_eq!(*config.loop_policy.outage_backoff_secs(), 300);
    assert!(config.log.json);
    assert_eq!(config.log.level, "info");
    assert_eq!(
        config.log.file.as_deref(),
        Some(std::path::Path::new("/var/log/warden/activity.log"))
    );
    assert_eq!(
        config.settings_path,
        std::path::PathBuf::from("/var/lib/warden/settings.json")
    );
}

#[test]
fn test_environment_overrides_file() {
    let file = write_config("[loop]\nbatch_size = 10\n");
    let env = HashMap::from([
        ("WARDEN_LOOP__BATCH_SIZE".to_string(), "3".to_string()),
        ("WARDEN_JOURNAL__CAPACITY".to_string(), "50".to_string()),
        ("WARDEN_IDENTITY".to_string(), "bot".to_string()),
    ]);

    let config = WardenConfig::load_with_env(Some(file.path()), Some(env)).unwrap();
    assert_eq!(*config.loop_policy.batch_size(), 3);
    assert_eq!(config.journal.capacity, 50);
}

#[test]
fn test_invalid_policy_is_rejected() {
    let file = write_config("[loop]\nbatch_size = 0\n");
    let err = WardenConfig::from_file(file.path()).unwrap_err();
    assert!(matches!(err.kind(), WardenErrorKind::Config(_)));

    let file = write_config("[loop]\ncycle_interval_secs = 600\noutage_backoff_secs = 300\n");
    assert!(WardenConfig::from_file(file.path()).is_err());

    let file = write_config("[journal]\ncapacity = 0\n");
    assert!(WardenConfig::from_file(file.path()).is_err());
}

#[test]
fn test_missing_explicit_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.toml");
    assert!(WardenConfig::load_with_env(Some(&missing), Some(HashMap::new())).is_err());
}

#[test]
fn test_malformed_file_is_an_error() {
    let file = write_config("[loop\nbatch_size = ");
    let err = WardenConfig::from_file(file.path()).unwrap_err();
    assert!(err.to_string().contains("Configuration Error"));
}
