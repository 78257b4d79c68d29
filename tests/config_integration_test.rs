//! Integration tests for configuration loading and validation
//!
//! Note: Tests that modify environment variables hold ENV_MUTEX so they do not
//! interfere with each other.

use std::io::Write;
use std::sync::Mutex;
use tempfile::NamedTempFile;
use triage::config::{load_config, load_config_or_default, parse_config, StorageBackend};
use triage::core::clinic::Clinic;
use triage::domain::{DoctorId, MedicineId, TriageError};

// Mutex to serialize tests that modify environment variables
static ENV_MUTEX: Mutex<()> = Mutex::new(());

/// Helper function to clean up environment variables
fn cleanup_env_vars() {
    std::env::remove_var("TRIAGE_APPLICATION_LOG_LEVEL");
    std::env::remove_var("TRIAGE_STORAGE_BACKEND");
    std::env::remove_var("TRIAGE_STORAGE_PATH");
    std::env::remove_var("TRIAGE_QUEUE_SEARCH_DEBOUNCE_MS");
    std::env::remove_var("TRIAGE_AUDIT_ENABLED");
    std::env::remove_var("TEST_TRIAGE_DATA_DIR");
}

fn write_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_load_complete_config() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let file = write_config(
        r#"
[application]
log_level = "debug"

[storage]
backend = "memory"
namespace_key = "clinic:east"

[queue]
search_debounce_ms = 150

[workflow]
submit_delay_ms = 0
notification_ttl_ms = 2000
print_notification_ttl_ms = 2500

[[catalog.doctors]]
id = 6
name = "Dr. Moore"
specialization = "Neuro-Ophthalmology"

[[catalog.medicines]]
id = 9
name = "Atropine Eye Drops"
type = "Mydriatic"

[audit]
enabled = false

[logging]
local_enabled = false
local_rotation = "hourly"
"#,
    );

    let config = load_config(file.path()).unwrap();
    assert_eq!(config.application.log_level, "debug");
    assert_eq!(config.storage.backend, StorageBackend::Memory);
    assert_eq!(config.storage.namespace_key, "clinic:east");
    assert_eq!(config.queue.search_debounce_ms, 150);
    assert_eq!(config.workflow.submit_delay_ms, 0);
    assert_eq!(config.catalog.medicines[0].kind, "Mydriatic");
    assert_eq!(config.logging.local_rotation, "hourly");

    let clinic = Clinic::open(config).unwrap();
    assert_eq!(clinic.list_doctors().len(), 6);
    assert_eq!(
        clinic.catalog().medicine(MedicineId::new(9)).unwrap().name,
        "Atropine Eye Drops"
    );
    assert!(clinic.catalog().has_doctor(DoctorId::new(6)));
}

#[test]
fn test_env_var_substitution() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();
    std::env::set_var("TEST_TRIAGE_DATA_DIR", "/var/lib/triage");

    let config = parse_config("[storage]\npath = \"${TEST_TRIAGE_DATA_DIR}/data.json\"\n").unwrap();
    assert_eq!(config.storage.path, "/var/lib/triage/data.json");

    cleanup_env_vars();
}

#[test]
fn test_missing_env_var_is_configuration_error() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let result = parse_config("[storage]\npath = \"${TEST_TRIAGE_DATA_DIR}/data.json\"\n");
    match result {
        Err(TriageError::Configuration(message)) => {
            assert!(message.contains("TEST_TRIAGE_DATA_DIR"))
        }
        other => panic!("expected configuration error, got {other:?}"),
    }
}

#[test]
fn test_env_overrides_take_precedence() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();
    std::env::set_var("TRIAGE_STORAGE_BACKEND", "memory");
    std::env::set_var("TRIAGE_QUEUE_SEARCH_DEBOUNCE_MS", "500");
    std::env::set_var("TRIAGE_APPLICATION_LOG_LEVEL", "warn");

    let config = parse_config("[storage]\nbackend = \"file\"\n\n[queue]\nsearch_debounce_ms = 100\n")
        .unwrap();
    assert_eq!(config.storage.backend, StorageBackend::Memory);
    assert_eq!(config.queue.search_debounce_ms, 500);
    assert_eq!(config.application.log_level, "warn");

    cleanup_env_vars();
}

#[test]
fn test_invalid_backend_override_is_rejected() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();
    std::env::set_var("TRIAGE_STORAGE_BACKEND", "redis");

    assert!(matches!(
        parse_config(""),
        Err(TriageError::Configuration(_))
    ));

    cleanup_env_vars();
}

#[test]
fn test_explicit_missing_file_is_error_but_implicit_falls_back() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    assert!(load_config("/nonexistent/triage.toml").is_err());

    let config = load_config_or_default("/nonexistent/triage.toml").unwrap();
    assert_eq!(config.workflow.submit_delay_ms, 1000);
    assert_eq!(config.workflow.notification_ttl_ms, 3000);
    assert_eq!(config.workflow.print_notification_ttl_ms, 4000);
}

#[test]
fn test_validation_errors_surface() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    for contents in [
        "[application]\nlog_level = \"loud\"\n",
        "[queue]\nsearch_debounce_ms = 60000\n",
        "[workflow]\nnotification_ttl_ms = 0\n",
        "[storage]\nnamespace_key = \"\"\n",
        "[[catalog.doctors]]\nid = 7\nname = \"\"\n",
    ] {
        assert!(
            matches!(parse_config(contents), Err(TriageError::Configuration(_))),
            "expected rejection for {contents:?}"
        );
    }
}
