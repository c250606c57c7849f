//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from TOML files and
//! default every field, so an empty file is a valid configuration.

use serde::{Deserialize, Serialize};

use crate::lifecycle::StartFailurePolicy;

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct OrchestratorConfig {
    /// Start and shutdown bounds.
    pub lifecycle: LifecycleConfig,

    /// Log output settings.
    pub logging: LoggingConfig,

    /// Settings for the bundled HTTP action.
    pub http: HttpConfig,
}

/// Orchestrator timing and failure policy.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LifecycleConfig {
    /// Bound on each individual action's start, in milliseconds.
    pub start_timeout_ms: u64,

    /// Bound on the entire shutdown sequence, in milliseconds.
    pub shutdown_timeout_ms: u64,

    /// What a failed start does: `exit` or `propagate`.
    pub on_start_failure: StartFailurePolicy,
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self {
            start_timeout_ms: 10_000,
            shutdown_timeout_ms: 10_000,
            on_start_failure: StartFailurePolicy::Exit,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub format: LogFormat,

    /// `EnvFilter` directives, used when `RUST_LOG` is unset.
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::Pretty,
            filter: "graceful_shutdown=info,tower_http=info".to_string(),
        }
    }
}

/// HTTP action configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Register the HTTP action at all.
    pub enabled: bool,

    /// Bind address (e.g., "127.0.0.1:8080").
    pub bind_address: String,

    /// Per-request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            bind_address: "127.0.0.1:8080".to_string(),
            request_timeout_secs: 30,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config: OrchestratorConfig = toml::from_str("").unwrap();
        assert_eq!(config.lifecycle.start_timeout_ms, 10_000);
        assert_eq!(config.lifecycle.shutdown_timeout_ms, 10_000);
        assert_eq!(config.lifecycle.on_start_failure, StartFailurePolicy::Exit);
        assert_eq!(config.logging.format, LogFormat::Pretty);
        assert!(config.http.enabled);
    }

    #[test]
    fn test_partial_document() {
        let config: OrchestratorConfig = toml::from_str(
            r#"
            [lifecycle]
            shutdown_timeout_ms = 2500
            on_start_failure = "propagate"

            [logging]
            format = "json"
            "#,
        )
        .unwrap();

        assert_eq!(config.lifecycle.start_timeout_ms, 10_000);
        assert_eq!(config.lifecycle.shutdown_timeout_ms, 2500);
        assert_eq!(config.lifecycle.on_start_failure, StartFailurePolicy::Propagate);
        assert_eq!(config.logging.format, LogFormat::Json);
    }
}
