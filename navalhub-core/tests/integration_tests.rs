//! Integration tests for navalhub-core infrastructure

use navalhub_core::{
    init_logging, storage_error, validation_error, ErrorContext, LogFormat, LoggingConfig,
    NavalhubConfig, NavalhubError,
};

#[test]
fn test_error_handling() {
    let error = storage_error!(
        "Session record unreadable",
        "session_store",
        std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied")
    );

    match &error {
        NavalhubError::Storage {
            message, context, ..
        } => {
            assert_eq!(message, "Session record unreadable");
            assert_eq!(context.component, "session_store");
            assert!(!context.error_id.is_empty());
        }
        _ => panic!("Expected Storage error"),
    }

    // Logging an error without a subscriber must not panic
    error.log();
    assert!(error.is_recoverable());

    let mut config = NavalhubConfig::default();
    config.session.origin.clear();
    let config_error = config.validate().unwrap_err();
    assert!(!config_error.is_recoverable());
    assert_eq!(config_error.context().component, "config");
    assert_eq!(config_error.context().operation.as_deref(), Some("validate"));

    let validation = validation_error!("Unknown role", "role", "session");
    assert!(!validation.is_recoverable());
    validation.log();
    match validation {
        NavalhubError::Validation { field, .. } => assert_eq!(field.as_deref(), Some("role")),
        _ => panic!("Expected Validation error"),
    }
}

#[test]
fn test_error_context_builder() {
    let context = ErrorContext::new("session_manager")
        .with_operation("restore")
        .with_metadata("key", "authRole")
        .with_suggestion("Log in again");

    assert_eq!(context.operation.as_deref(), Some("restore"));
    assert_eq!(context.metadata.get("key").map(String::as_str), Some("authRole"));
    assert_eq!(context.recovery_suggestions, vec!["Log in again".to_string()]);
}

#[test]
fn test_logging_initialization() {
    let config = LoggingConfig {
        level: "debug".to_string(),
        format: LogFormat::Compact,
        include_location: false,
        include_thread: false,
        log_to_file: false,
        log_file_path: None,
        enable_performance_monitoring: false,
        filter_directives: vec!["navalhub_core=debug".to_string()],
    };

    // A global subscriber can only be installed once per process, so only the
    // first call is expected to succeed
    let _ = init_logging(&config);
}

#[test]
fn test_logging_to_file_requires_path() {
    let config = LoggingConfig {
        log_to_file: true,
        log_file_path: None,
        ..Default::default()
    };

    assert!(init_logging(&config).is_err());
}

#[test]
fn test_config_round_trip_through_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("navalhub.toml");

    let mut config = NavalhubConfig::default();
    config.session.login_delay_ms = 25;
    config.session.origin = "portal.example".to_string();
    config.save_to_file(&path).unwrap();

    let loaded = NavalhubConfig::from_file(&path).unwrap();
    assert_eq!(loaded.session.login_delay_ms, 25);
    assert_eq!(loaded.session.origin, "portal.example");
    assert_eq!(loaded.logging.format, LogFormat::Compact);
}

#[test]
fn test_partial_config_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("partial.toml");
    std::fs::write(&path, "[session]\nlogin_delay_ms = 0\n").unwrap();

    let loaded = NavalhubConfig::from_file(&path).unwrap();
    assert_eq!(loaded.session.login_delay_ms, 0);
    assert_eq!(loaded.session.origin, "navalhub");
    assert_eq!(loaded.logging.level, "info");
}

#[test]
fn test_missing_config_file_is_config_error() {
    let result = NavalhubConfig::from_file("/definitely/not/here/navalhub.toml");
    assert!(matches!(result, Err(NavalhubError::Config { .. })));
}
