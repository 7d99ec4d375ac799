//! Network layer.
//!
//! # Data Flow
//! ```text
//! ListenerConfig (host, port)
//!     → listener.rs (resolve & bind)
//!     → tokio TcpListener handed to http::HttpServer
//! ```

pub mod listener;

pub use listener::{bind, ListenerError};
