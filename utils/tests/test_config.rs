use std::sync::Mutex;
use utils::app_config::*;

// AppConfig is process-global; tests in this file must not interleave.
static LOCK: Mutex<()> = Mutex::new(());

pub fn initialize() {
    // Reset to original test configuration
    let config_contents = include_str!("resources/test_config.toml");
    AppConfig::init(Some(config_contents)).unwrap();
}

#[test]
fn fetch_config() {
    let _guard = LOCK.lock().unwrap_or_else(|e| e.into_inner());
    initialize();

    // Fetch an instance of Config
    let config = AppConfig::fetch().unwrap();

    assert_eq!(config.log.level, "info");
    assert_eq!(config.log.file.as_deref(), Some("logs/test.log"));
    assert_eq!(config.rsync.binary, "rsync");
    assert_eq!(config.rsync.timeout, 30);
}

#[test]
fn verify_get() {
    let _guard = LOCK.lock().unwrap_or_else(|e| e.into_inner());
    initialize();

    assert_eq!(AppConfig::get::<String>("log.level").unwrap(), "info");
    assert_eq!(AppConfig::get::<String>("rsync.binary").unwrap(), "rsync");
    assert_eq!(AppConfig::get::<u64>("rsync.timeout").unwrap(), 30);
}

#[test]
fn verify_set() {
    let _guard = LOCK.lock().unwrap_or_else(|e| e.into_inner());
    initialize();

    AppConfig::set("log.level", "debug").unwrap();
    AppConfig::set("rsync.timeout", "120").unwrap();
    AppConfig::set("rsync.binary", "/opt/rsync/bin/rsync").unwrap();

    // Fetch a new instance of Config
    let config = AppConfig::fetch().unwrap();

    // Check the values were modified
    assert_eq!(config.log.level, "debug");
    assert_eq!(config.rsync.timeout, 120);
    assert_eq!(config.rsync.binary, "/opt/rsync/bin/rsync");
}

#[test]
fn init_resets_overrides() {
    let _guard = LOCK.lock().unwrap_or_else(|e| e.into_inner());
    initialize();
    AppConfig::set("rsync.timeout", "99").unwrap();

    initialize();

    assert_eq!(AppConfig::get::<u64>("rsync.timeout").unwrap(), 30);
}

#[test]
fn merge_config_file_overrides_defaults() {
    let _guard = LOCK.lock().unwrap_or_else(|e| e.into_inner());
    initialize();

    let path = std::env::temp_dir().join(format!("rsync-wrap-user-{}.toml", std::process::id()));
    std::fs::write(&path, "[rsync]\nbinary = \"/usr/local/bin/rsync\"\n").unwrap();

    AppConfig::merge_config(Some(path.to_str().unwrap())).unwrap();
    let config = AppConfig::fetch().unwrap();

    // Keys absent from the user file keep their defaults
    assert_eq!(config.rsync.binary, "/usr/local/bin/rsync");
    assert_eq!(config.rsync.timeout, 30);
    assert_eq!(config.log.level, "info");

    let _ = std::fs::remove_file(path);
}

#[test]
fn test_nested_configuration_access() {
    let _guard = LOCK.lock().unwrap_or_else(|e| e.into_inner());
    initialize();

    let log_config = AppConfig::get::<LogConfig>("log").unwrap();
    assert_eq!(log_config.level, "info");

    let rsync_config = AppConfig::get::<RsyncConfig>("rsync").unwrap();
    assert_eq!(rsync_config.binary, "rsync");
    assert_eq!(rsync_config.timeout, 30);
}

#[test]
fn missing_configuration_is_an_error() {
    let _guard = LOCK.lock().unwrap_or_else(|e| e.into_inner());
    AppConfig::init(None).unwrap();

    assert!(AppConfig::fetch().is_err());
    assert!(AppConfig::get::<String>("rsync.binary").is_err());

    initialize();
}
