//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (request span with request id)
//!     → reflector routes (match, constrain, handle)
//!     → Send to client
//! ```

pub mod request;
pub mod server;

pub use request::RequestSpan;
pub use server::{AppState, HttpServer, RunningServer, ServerError};
