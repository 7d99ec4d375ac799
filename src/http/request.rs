//! Per-request tracing.
//!
//! Every request gets a UUID v4 that lives only in its tracing span. The id
//! is never written into the request headers, since `/headers` must reflect
//! exactly what the client sent.

use axum::http::Request;
use tower_http::trace::MakeSpan;
use tracing::Span;
use uuid::Uuid;

/// Builds the `request` span with a fresh request id.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestSpan;

impl<B> MakeSpan<B> for RequestSpan {
    fn make_span(&mut self, request: &Request<B>) -> Span {
        tracing::info_span!(
            "request",
            request_id = %Uuid::new_v4(),
            method = %request.method(),
            uri = %request.uri(),
            version = ?request.version(),
        )
    }
}
