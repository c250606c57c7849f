//! The capability every managed component must provide.

use async_trait::async_trait;
use tokio::time::Instant;

/// Boxed error returned by action implementations.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// A component whose startup and shutdown is driven by the orchestrator.
///
/// `start` is called exactly once, on its own task. `stop` is called at most
/// once, after every action of a higher level has stopped, and should return
/// before `deadline`. The orchestrator drops a stop future still pending at
/// the deadline.
#[async_trait]
pub trait Action: Send + Sync + 'static {
    /// Bring the component up. Returning means it is ready.
    async fn start(&self) -> Result<(), BoxError>;

    /// Tear the component down, cooperatively, before `deadline`.
    async fn stop(&self, deadline: Instant) -> Result<(), BoxError>;

    /// Identity used in diagnostics.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}
