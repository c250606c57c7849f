//! Termination trigger sources.
//!
//! # Responsibilities
//! - Subscribe to SIGINT, SIGTERM and SIGHUP
//! - Expose in-process triggers behind the same interface
//!
//! # Design Decisions
//! - Uses Tokio's signal handling (async-safe)
//! - Handlers are installed when `run` begins; until then SIGINT, SIGTERM and
//!   SIGHUP keep their default disposition and terminate the process outright
//! - SIGHUP terminates; there is no reload

use std::fmt;

use async_trait::async_trait;
use tokio::sync::broadcast;

use crate::lifecycle::error::SignalError;

/// What asked the process to terminate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    Interrupt,
    Terminate,
    Hangup,
    Manual,
}

impl fmt::Display for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Trigger::Interrupt => "SIGINT",
            Trigger::Terminate => "SIGTERM",
            Trigger::Hangup => "SIGHUP",
            Trigger::Manual => "manual",
        };
        f.write_str(name)
    }
}

/// Something the orchestrator can block on until termination is requested.
#[async_trait]
pub trait TerminationSource: Send {
    /// Wait for the first trigger.
    async fn wait(&mut self) -> Result<Trigger, SignalError>;
}

/// Process-wide OS signal subscription.
#[cfg(unix)]
pub struct OsSignals {
    interrupt: tokio::signal::unix::Signal,
    terminate: tokio::signal::unix::Signal,
    hangup: tokio::signal::unix::Signal,
}

#[cfg(unix)]
impl OsSignals {
    /// Install handlers for SIGINT, SIGTERM and SIGHUP.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn install() -> Result<Self, SignalError> {
        use tokio::signal::unix::{signal, SignalKind};

        let install = |kind: SignalKind, name: &'static str| {
            signal(kind).map_err(|source| SignalError::Install { signal: name, source })
        };

        Ok(Self {
            interrupt: install(SignalKind::interrupt(), "SIGINT")?,
            terminate: install(SignalKind::terminate(), "SIGTERM")?,
            hangup: install(SignalKind::hangup(), "SIGHUP")?,
        })
    }
}

#[cfg(unix)]
#[async_trait]
impl TerminationSource for OsSignals {
    async fn wait(&mut self) -> Result<Trigger, SignalError> {
        tokio::select! {
            Some(()) = self.interrupt.recv() => Ok(Trigger::Interrupt),
            Some(()) = self.terminate.recv() => Ok(Trigger::Terminate),
            Some(()) = self.hangup.recv() => Ok(Trigger::Hangup),
            else => Err(SignalError::Closed),
        }
    }
}

/// Ctrl+C is the only termination signal available off unix.
#[cfg(not(unix))]
pub struct OsSignals;

#[cfg(not(unix))]
impl OsSignals {
    pub fn install() -> Result<Self, SignalError> {
        Ok(Self)
    }
}

#[cfg(not(unix))]
#[async_trait]
impl TerminationSource for OsSignals {
    async fn wait(&mut self) -> Result<Trigger, SignalError> {
        tokio::signal::ctrl_c()
            .await
            .map_err(|source| SignalError::Install { signal: "Ctrl+C", source })?;
        Ok(Trigger::Interrupt)
    }
}

/// Receivers from [`crate::lifecycle::Shutdown`] fire on `trigger()`.
#[async_trait]
impl TerminationSource for broadcast::Receiver<()> {
    async fn wait(&mut self) -> Result<Trigger, SignalError> {
        match self.recv().await {
            Ok(()) | Err(broadcast::error::RecvError::Lagged(_)) => Ok(Trigger::Manual),
            Err(broadcast::error::RecvError::Closed) => Err(SignalError::Closed),
        }
    }
}
