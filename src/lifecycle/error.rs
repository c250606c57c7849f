//! Error taxonomy for the lifecycle subsystem.

use std::time::Duration;

use thiserror::Error;

use crate::lifecycle::action::BoxError;
use crate::lifecycle::level::Level;

/// Why an action failed to become ready.
#[derive(Debug, Error)]
pub enum StartError {
    #[error("action {action} failed to start: {source}")]
    Failed {
        action: String,
        #[source]
        source: BoxError,
    },

    #[error("action {action} had not enough time to start correctly in {timeout:?}")]
    TimedOut { action: String, timeout: Duration },

    #[error("action {action} panicked while starting")]
    Panicked { action: String },
}

impl StartError {
    pub fn action(&self) -> &str {
        match self {
            StartError::Failed { action, .. }
            | StartError::TimedOut { action, .. }
            | StartError::Panicked { action } => action,
        }
    }
}

/// Why the shutdown sequence was abandoned.
#[derive(Debug, Error)]
pub enum ShutdownError {
    #[error("shutdown timeout of {timeout:?} exceeded at action {pending}")]
    TimedOut {
        timeout: Duration,
        /// The action that was being stopped, or was next in line.
        pending: String,
        stopped: usize,
    },

    #[error("action {action} ({level}) failed to stop: {source}")]
    StopFailed {
        action: String,
        level: Level,
        stopped: usize,
        #[source]
        source: BoxError,
    },
}

impl ShutdownError {
    /// Number of actions stopped before the abort.
    pub fn stopped(&self) -> usize {
        match self {
            ShutdownError::TimedOut { stopped, .. } | ShutdownError::StopFailed { stopped, .. } => {
                *stopped
            }
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, ShutdownError::TimedOut { .. })
    }
}

/// Failure to listen for termination triggers.
#[derive(Debug, Error)]
pub enum SignalError {
    #[error("failed to install {signal} handler: {source}")]
    Install {
        signal: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("termination trigger closed before firing")]
    Closed,
}

/// Failure of the run phase.
#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Signal(#[from] SignalError),

    #[error(transparent)]
    Shutdown(#[from] ShutdownError),
}
