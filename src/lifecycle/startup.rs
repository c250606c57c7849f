//! Start supervision.
//!
//! # Responsibilities
//! - Run each action's `start` on its own task
//! - Bound the wait by the start timeout
//! - Apply the start failure policy
//!
//! # Design Decisions
//! - Fail fast: by default any start failure terminates the process
//! - A start that overruns its timeout is aborted, not left running detached
//! - Registrations are sequential; the next one waits for this one

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::lifecycle::action::Action;
use crate::lifecycle::error::StartError;

/// What to do when an action fails to start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StartFailurePolicy {
    /// Log the failure and terminate the process with a non-zero status.
    #[default]
    Exit,
    /// Hand the error back to the caller.
    Propagate,
}

/// Exit status used when a start failure terminates the process.
pub const START_FAILURE_EXIT_CODE: i32 = 1;

/// Start `action` on its own task and wait at most `timeout` for it.
pub async fn supervise_start(action: Arc<dyn Action>, timeout: Duration) -> Result<(), StartError> {
    let name = action.name().to_string();
    let task = Arc::clone(&action);
    let mut handle = tokio::spawn(async move { task.start().await });

    match tokio::time::timeout(timeout, &mut handle).await {
        Ok(Ok(Ok(()))) => Ok(()),
        Ok(Ok(Err(source))) => Err(StartError::Failed { action: name, source }),
        Ok(Err(join_error)) => {
            tracing::debug!(action = %name, error = %join_error, "Start task did not complete");
            Err(StartError::Panicked { action: name })
        }
        Err(_) => {
            handle.abort();
            Err(StartError::TimedOut { action: name, timeout })
        }
    }
}

/// Report a start failure and apply `policy` to it.
///
/// `timeout` is the configured start timeout, logged with every failure.
/// Under [`StartFailurePolicy::Exit`] this never returns.
pub fn enforce(policy: StartFailurePolicy, error: StartError, timeout: Duration) -> StartError {
    let timeout_ms = timeout.as_millis() as u64;
    match &error {
        StartError::TimedOut { action, .. } => tracing::error!(
            action = %action,
            timeout_ms,
            "Action had not enough time to start correctly"
        ),
        StartError::Failed { action, source } => tracing::error!(
            action = %action,
            timeout_ms,
            error = %source,
            "Action failed to start"
        ),
        StartError::Panicked { action } => tracing::error!(
            action = %action,
            timeout_ms,
            "Action panicked while starting"
        ),
    }

    match policy {
        StartFailurePolicy::Exit => std::process::exit(START_FAILURE_EXIT_CODE),
        StartFailurePolicy::Propagate => error,
    }
}
