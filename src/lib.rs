//! Graceful startup and shutdown orchestration for long-running processes.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;

pub use config::schema::OrchestratorConfig;
pub use http::HttpServer;
pub use lifecycle::{Action, GracefulShutdown, Level};
