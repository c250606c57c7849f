//! The orchestrator: supervised registration, then signal-driven shutdown.

use std::sync::Arc;
use std::time::Duration;

use crate::config::LifecycleConfig;
use crate::lifecycle::action::Action;
use crate::lifecycle::error::{RunError, ShutdownError, SignalError, StartError};
use crate::lifecycle::level::Level;
use crate::lifecycle::registry::Registry;
use crate::lifecycle::shutdown::{self, ShutdownReport};
use crate::lifecycle::signals::{OsSignals, TerminationSource};
use crate::lifecycle::startup::{self, StartFailurePolicy};

/// Default bound on each action's start.
pub const DEFAULT_START_TIMEOUT: Duration = Duration::from_secs(10);

/// Default bound on the whole shutdown sequence.
pub const DEFAULT_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(10);

/// Starts actions under supervision and stops them in level order on termination.
///
/// Registration takes `&mut self`; [`run`](Self::run), [`run_until`](Self::run_until)
/// and [`shutdown`](Self::shutdown) consume the orchestrator, so the registry
/// is sealed once the run phase begins.
pub struct GracefulShutdown {
    registry: Registry,
    num_actions: usize,
    start_timeout: Duration,
    shutdown_timeout: Duration,
    on_start_failure: StartFailurePolicy,
}

impl GracefulShutdown {
    /// Orchestrator with the default timeouts and the exit-on-failure policy.
    pub fn new() -> Self {
        Self {
            registry: Registry::new(),
            num_actions: 0,
            start_timeout: DEFAULT_START_TIMEOUT,
            shutdown_timeout: DEFAULT_SHUTDOWN_TIMEOUT,
            on_start_failure: StartFailurePolicy::Exit,
        }
    }

    pub fn from_config(config: &LifecycleConfig) -> Self {
        Self::new()
            .with_start_timeout(Duration::from_millis(config.start_timeout_ms))
            .with_shutdown_timeout(Duration::from_millis(config.shutdown_timeout_ms))
            .with_start_failure_policy(config.on_start_failure)
    }

    pub fn with_start_timeout(mut self, timeout: Duration) -> Self {
        self.start_timeout = timeout;
        self
    }

    pub fn with_shutdown_timeout(mut self, timeout: Duration) -> Self {
        self.shutdown_timeout = timeout;
        self
    }

    pub fn with_start_failure_policy(mut self, policy: StartFailurePolicy) -> Self {
        self.on_start_failure = policy;
        self
    }

    /// Start `action` and, once it is ready, register it under `level`.
    ///
    /// With [`StartFailurePolicy::Exit`] a failed or overdue start terminates
    /// the process and this only ever returns `Ok`.
    pub async fn register(&mut self, action: Arc<dyn Action>, level: Level) -> Result<(), StartError> {
        let name = action.name().to_string();

        if let Err(error) = startup::supervise_start(Arc::clone(&action), self.start_timeout).await {
            return Err(startup::enforce(self.on_start_failure, error, self.start_timeout));
        }

        self.num_actions += 1;
        self.registry.add(action, level);

        tracing::info!(action = %name, level = %level, registered = self.num_actions, "Action started");
        Ok(())
    }

    /// Block until SIGINT, SIGTERM or SIGHUP, then shut down.
    ///
    /// The signal handlers are installed here; during registration these
    /// signals still terminate the process without a graceful shutdown.
    pub async fn run(self) -> Result<ShutdownReport, RunError> {
        let signals = OsSignals::install()?;
        Ok(self.run_until(signals).await?)
    }

    /// Block until `source` fires, then shut down.
    ///
    /// The source is consumed; triggers arriving during shutdown go nowhere.
    /// A source that closes without firing is treated as a termination request.
    pub async fn run_until<S>(self, mut source: S) -> Result<ShutdownReport, ShutdownError>
    where
        S: TerminationSource,
    {
        tracing::info!(actions = self.num_actions, "Waiting for termination trigger");

        match source.wait().await {
            Ok(trigger) => tracing::info!(trigger = %trigger, "Termination requested"),
            Err(SignalError::Closed) => tracing::warn!("Termination source closed, shutting down"),
            Err(error) => tracing::warn!(error = %error, "Termination source failed, shutting down"),
        }
        drop(source);

        self.shutdown().await
    }

    /// Stop every registered action now.
    pub async fn shutdown(self) -> Result<ShutdownReport, ShutdownError> {
        shutdown::stop_all(&self.registry, self.shutdown_timeout).await
    }

    /// Number of successfully registered actions.
    pub fn action_count(&self) -> usize {
        self.num_actions
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn start_timeout(&self) -> Duration {
        self.start_timeout
    }

    pub fn shutdown_timeout(&self) -> Duration {
        self.shutdown_timeout
    }
}

impl Default for GracefulShutdown {
    fn default() -> Self {
        Self::new()
    }
}
