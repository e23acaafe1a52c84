//! Tests for `error` module

use super::error::*;
use crate::config::ConfigError;

#[test]
fn test_error_codes_are_unique() {
    // Arrange
    let errors: Vec<Error> = vec![
        Error::UnsupportedShape {
            operation: "equality",
            reason: "test".into(),
        },
        Error::CodeSpaceExhausted {
            distinct: 1,
            requested: 1,
        },
        Error::Config("test".into()),
        Error::Internal("test".into()),
    ];

    // Act
    let codes: Vec<&str> = errors.iter().map(Error::code).collect();

    // Assert
    let mut unique_codes = codes.clone();
    unique_codes.sort_unstable();
    unique_codes.dedup();
    assert_eq!(codes.len(), unique_codes.len(), "Error codes must be unique");

    for code in &codes {
        assert!(
            code.starts_with("COLSCAN-"),
            "Code {code} should start with COLSCAN-"
        );
    }
}

#[test]
fn test_error_display_includes_code() {
    // Arrange
    let err = Error::UnsupportedShape {
        operation: "prefix",
        reason: "prefix of 20 bytes exceeds the 16-byte register".into(),
    };

    // Act
    let display = format!("{err}");

    // Assert
    assert!(display.contains("COLSCAN-001"));
    assert!(display.contains("prefix"));
    assert!(display.contains("20 bytes"));
}

#[test]
fn test_code_space_display() {
    let err = Error::CodeSpaceExhausted {
        distinct: 10,
        requested: 3,
    };
    let display = err.to_string();
    assert!(display.contains("10 distinct"));
    assert!(display.contains("3 more"));
}

#[test]
fn test_recoverable_classification() {
    assert!(Error::UnsupportedShape {
        operation: "equality",
        reason: String::new(),
    }
    .is_recoverable());
    assert!(Error::Config("bad".into()).is_recoverable());
    assert!(!Error::Internal("boom".into()).is_recoverable());
    assert!(!Error::CodeSpaceExhausted {
        distinct: 0,
        requested: 0,
    }
    .is_recoverable());
}

#[test]
fn test_from_config_error() {
    // Arrange
    let cfg_err = ConfigError::InvalidValue {
        key: "scan.backend".into(),
        message: "unknown".into(),
    };

    // Act
    let err: Error = cfg_err.into();

    // Assert
    assert_eq!(err.code(), "COLSCAN-003");
    assert!(err.to_string().contains("scan.backend"));
}
