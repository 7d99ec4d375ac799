//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Handlers, route layers, server lifecycle
//!     → tracing events with structured fields
//!     → request spans (http::request::RequestSpan, via TraceLayer)
//!     → logging.rs subscriber (stdout)
//! ```

pub mod logging;

pub use logging::init_logging;
