//! Configuration validation.
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: OrchestratorConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::fmt;
use std::net::SocketAddr;

use crate::config::schema::OrchestratorConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

pub fn validate_config(config: &OrchestratorConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.lifecycle.start_timeout_ms == 0 {
        errors.push(ValidationError {
            field: "lifecycle.start_timeout_ms",
            message: "must be greater than zero".to_string(),
        });
    }

    if config.lifecycle.shutdown_timeout_ms == 0 {
        errors.push(ValidationError {
            field: "lifecycle.shutdown_timeout_ms",
            message: "must be greater than zero".to_string(),
        });
    }

    if config.http.enabled {
        if let Err(e) = config.http.bind_address.parse::<SocketAddr>() {
            errors.push(ValidationError {
                field: "http.bind_address",
                message: format!("{:?} is not a socket address: {}", config.http.bind_address, e),
            });
        }

        if config.http.request_timeout_secs == 0 {
            errors.push(ValidationError {
                field: "http.request_timeout_secs",
                message: "must be greater than zero".to_string(),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
