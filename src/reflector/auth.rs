//! HTTP Basic authentication gate for `/basic-auth/{user}/{pass}`.
//!
//! The expected credentials are the path captures themselves, so the gate is
//! a route layer: it runs after routing, compares the `Authorization` header
//! against the captures, and only then lets the protected handler run.

use axum::{
    extract::{Path, Request, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::http::server::AppState;

/// Decoded `Authorization: Basic` credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub user: String,
    pub password: String,
}

impl Credentials {
    pub fn new(user: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            password: password.into(),
        }
    }

    /// Parse a `Basic <base64(user:password)>` header value.
    ///
    /// The scheme is case-insensitive. The password is everything after the
    /// first `:`; a payload without `:` is rejected.
    pub fn from_header(value: &HeaderValue) -> Option<Self> {
        let value = value.to_str().ok()?.trim();
        let (scheme, encoded) = value.split_once(' ')?;
        if !scheme.eq_ignore_ascii_case("basic") {
            return None;
        }
        let decoded = STANDARD.decode(encoded.trim()).ok()?;
        let decoded = String::from_utf8(decoded).ok()?;
        let (user, password) = decoded.split_once(':')?;
        Some(Self::new(user, password))
    }

    /// Credentials from the first `Authorization` header, if well formed.
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        headers.get(header::AUTHORIZATION).and_then(Self::from_header)
    }

    /// The header value a client would send for these credentials.
    pub fn to_header(&self) -> String {
        format!("Basic {}", STANDARD.encode(format!("{}:{}", self.user, self.password)))
    }
}

/// 401 with a Basic challenge for `realm` and an empty body.
pub fn challenge(realm: &str) -> Response {
    let challenge = format!("Basic realm=\"{}\"", realm);
    match HeaderValue::from_str(&challenge) {
        Ok(value) => (StatusCode::UNAUTHORIZED, [(header::WWW_AUTHENTICATE, value)]).into_response(),
        Err(error) => {
            tracing::error!(%realm, %error, "Realm is not a valid header value");
            StatusCode::UNAUTHORIZED.into_response()
        }
    }
}

/// Let the request through only if it carries exactly the path credentials.
pub async fn require_path_credentials(
    State(state): State<AppState>,
    Path((user, pass)): Path<(String, String)>,
    request: Request,
    next: Next,
) -> Response {
    let expected = Credentials::new(user, pass);

    match Credentials::from_headers(request.headers()) {
        Some(supplied) if supplied == expected => next.run(request).await,
        Some(supplied) => {
            tracing::debug!(user = %supplied.user, expected = %expected.user, "Basic auth rejected");
            challenge(&state.realm)
        }
        None => {
            tracing::debug!(expected = %expected.user, "Basic auth missing or malformed");
            challenge(&state.realm)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_basic_header() {
        let value = HeaderValue::from_static("Basic YWxpY2U6c2VjcmV0");
        assert_eq!(
            Credentials::from_header(&value),
            Some(Credentials::new("alice", "secret"))
        );
    }

    #[test]
    fn test_scheme_is_case_insensitive() {
        let value = HeaderValue::from_static("bAsIc YWxpY2U6c2VjcmV0");
        assert!(Credentials::from_header(&value).is_some());
    }

    #[test]
    fn test_password_may_contain_colon() {
        let header = Credentials::new("bob", "a:b:c").to_header();
        let value = HeaderValue::from_str(&header).unwrap();
        assert_eq!(
            Credentials::from_header(&value),
            Some(Credentials::new("bob", "a:b:c"))
        );
    }

    #[test]
    fn test_rejects_malformed_values() {
        for raw in [
            "Bearer YWxpY2U6c2VjcmV0",
            "Basic",
            "Basic !!!not-base64!!!",
            // "alice" with no separator
            "Basic YWxpY2U=",
        ] {
            let value = HeaderValue::from_str(raw).unwrap();
            assert_eq!(Credentials::from_header(&value), None, "{raw}");
        }
    }

    #[test]
    fn test_challenge_response() {
        let response = challenge("http4k-bin");
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.headers()[header::WWW_AUTHENTICATE],
            "Basic realm=\"http4k-bin\""
        );
    }
}
