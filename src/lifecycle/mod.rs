//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Registration (startup.rs):
//!     register(action, level)
//!     → spawn action.start() on its own task
//!     → wait for completion or start timeout
//!     → failure: exit process (or return StartError, per policy)
//!     → success: registry.rs appends action under its level
//!
//! Run (signals.rs):
//!     SIGINT/SIGTERM/SIGHUP (or manual trigger) → first trigger wins
//!
//! Shutdown (shutdown.rs):
//!     one shared deadline
//!     → HIGH, MID, LOW (registration order within a level)
//!     → stop(deadline) sequentially
//!     → first error or elapsed deadline aborts the rest
//! ```
//!
//! # Design Decisions
//! - Traversal order is an explicit constant, never map iteration order
//! - Registration borrows the orchestrator mutably; run consumes it
//! - Shutdown has one deadline for the whole sequence, not per action

pub mod action;
pub mod error;
pub mod level;
pub mod orchestrator;
pub mod registry;
pub mod shutdown;
pub mod signals;
pub mod startup;

pub use action::{Action, BoxError};
pub use error::{RunError, ShutdownError, SignalError, StartError};
pub use level::Level;
pub use orchestrator::GracefulShutdown;
pub use registry::Registry;
pub use shutdown::{Shutdown, ShutdownReport};
pub use startup::StartFailurePolicy;
pub use signals::{OsSignals, TerminationSource, Trigger};
