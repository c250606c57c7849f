//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! lifecycle, http
//!     → tracing events with structured fields (action, level, trigger)
//!     → logging.rs subscriber (EnvFilter + pretty/JSON fmt layer)
//!     → stdout
//! ```

pub mod logging;
