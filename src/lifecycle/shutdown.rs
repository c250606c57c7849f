//! Shutdown traversal and the in-process shutdown trigger.

use std::time::Duration;

use tokio::sync::broadcast;
use tokio::time::Instant;

use crate::lifecycle::error::ShutdownError;
use crate::lifecycle::registry::Registry;

/// Outcome of a shutdown sequence that stopped every action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShutdownReport {
    pub stopped: usize,
    pub elapsed: Duration,
}

/// Stop every registered action in level order under one shared deadline.
///
/// The first stop error, or the deadline elapsing, abandons the sequence and
/// leaves the remaining actions untouched.
pub async fn stop_all(registry: &Registry, timeout: Duration) -> Result<ShutdownReport, ShutdownError> {
    tracing::info!(
        actions = registry.len(),
        timeout_ms = timeout.as_millis() as u64,
        "Shutting down..."
    );

    let started = Instant::now();
    let deadline = started + timeout;
    let mut stopped = 0;

    for (level, actions) in registry.traversal() {
        for action in actions {
            if Instant::now() >= deadline {
                tracing::error!(
                    next_action = %action.name(),
                    stopped,
                    "Shutting down process was cancelled as shutdown timeout was exceeded"
                );
                return Err(ShutdownError::TimedOut {
                    timeout,
                    pending: action.name().to_string(),
                    stopped,
                });
            }

            match tokio::time::timeout_at(deadline, action.stop(deadline)).await {
                Ok(Ok(())) => {
                    stopped += 1;
                    tracing::debug!(action = %action.name(), level = %level, "Action stopped");
                }
                Ok(Err(source)) => {
                    tracing::error!(
                        action = %action.name(),
                        level = %level,
                        error = %source,
                        "Shutting down process failed"
                    );
                    return Err(ShutdownError::StopFailed {
                        action: action.name().to_string(),
                        level,
                        stopped,
                        source,
                    });
                }
                Err(_) => {
                    tracing::error!(
                        action = %action.name(),
                        level = %level,
                        stopped,
                        "Shutting down process was cancelled as shutdown timeout was exceeded"
                    );
                    return Err(ShutdownError::TimedOut {
                        timeout,
                        pending: action.name().to_string(),
                        stopped,
                    });
                }
            }
        }
    }

    let report = ShutdownReport { stopped, elapsed: started.elapsed() };
    tracing::info!(
        stopped = report.stopped,
        elapsed_ms = report.elapsed.as_millis() as u64,
        "Shutdown complete"
    );
    Ok(report)
}

/// Programmatic termination request.
///
/// Each receiver from [`subscribe`](Self::subscribe) is a
/// [`TerminationSource`](crate::lifecycle::TerminationSource) that fires on
/// [`trigger`](Self::trigger), so `run_until` can be driven without OS signals.
/// Dropping every handle closes the receivers, which `run_until` also treats
/// as a termination request.
#[derive(Clone)]
pub struct Shutdown {
    tx: broadcast::Sender<()>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    /// A termination source bound to this trigger.
    ///
    /// Subscribe before triggering; a receiver only sees triggers sent after
    /// it was created.
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    /// Request termination. Repeated calls after the first are harmless.
    pub fn trigger(&self) {
        let _ = self.tx.send(());
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}
