//! Configuration validation.
//!
//! Serde handles syntax; this module checks values. Validation is a pure
//! function that reports every problem, not just the first.

use thiserror::Error;

use crate::config::schema::HarnessConfig;

/// A single semantic problem with a config.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("server.port must be non-zero")]
    InvalidPort,

    #[error("server.host must not be empty")]
    EmptyHost,

    #[error("server.program must not be empty when server.launch is set")]
    EmptyProgram,

    #[error("request.path must start with a single '/', got {0:?}")]
    InvalidPath(String),

    #[error("{0} must be greater than zero")]
    ZeroTimeout(&'static str),

    #[error("case table must contain at least one case")]
    EmptyCaseTable,

    #[error("case {index} ({description}): expected_status {status} is not an HTTP status")]
    InvalidStatus {
        index: usize,
        description: String,
        status: u16,
    },
}

/// Check a parsed config.
pub fn validate_config(config: &HarnessConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.server.port == 0 {
        errors.push(ValidationError::InvalidPort);
    }
    if config.server.host.trim().is_empty() {
        errors.push(ValidationError::EmptyHost);
    }
    if config.server.launch && config.server.program.trim().is_empty() {
        errors.push(ValidationError::EmptyProgram);
    }
    // "//host/..." would be joined as a network path and leave the server.
    if !config.request.path.starts_with('/') || config.request.path.starts_with("//") {
        errors.push(ValidationError::InvalidPath(config.request.path.clone()));
    }
    if config.request.timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("request.timeout_secs"));
    }
    if config.request.cleanup_timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("request.cleanup_timeout_secs"));
    }
    if config.readiness.poll_interval_ms == 0 {
        errors.push(ValidationError::ZeroTimeout("readiness.poll_interval_ms"));
    }
    if config.cases.is_empty() {
        errors.push(ValidationError::EmptyCaseTable);
    }
    for (index, case) in config.cases.iter().enumerate() {
        if !(100..=599).contains(&case.expected_status) {
            errors.push(ValidationError::InvalidStatus {
                index,
                description: case.description.clone(),
                status: case.expected_status,
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
