//! HTTP action.
//!
//! # Data Flow
//! ```text
//! register(HttpServer, HIGH)
//!     → start: bind listener, spawn axum::serve
//! shutdown
//!     → stop: signal graceful shutdown, await drain until the deadline
//! ```
//!
//! # Design Decisions
//! - Registered at HIGH so external traffic stops before internal state
//! - Bind happens inside start; a taken port is a start failure

pub mod server;

pub use server::HttpServer;
