//! Diagnostic HTTP request reflector library.
//!
//! Endpoints that echo a request's IP, query, headers and cookies back as
//! JSON, plus basic-auth and relative-redirect demonstrations. Intended as a
//! fixture for testing HTTP clients.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod net;
pub mod observability;
pub mod reflector;
pub mod routing;

pub use config::BinConfig;
pub use http::{HttpServer, RunningServer};
pub use lifecycle::Shutdown;
