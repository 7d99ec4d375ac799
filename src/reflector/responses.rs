//! Response bodies.
//!
//! One struct per endpoint, each built from the request parts it reflects.
//! Maps are `BTreeMap` so identical requests encode to identical bytes.

use std::collections::BTreeMap;

use axum::http::{header::HeaderName, HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};

/// Header that `/ip` reports.
pub const X_FORWARDED_FOR: HeaderName = HeaderName::from_static("x-forwarded-for");

/// Body of `GET /ip`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IpResponse {
    pub origin: String,
}

impl IpResponse {
    /// Join every `X-Forwarded-For` occurrence, in arrival order.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let origin = headers
            .get_all(&X_FORWARDED_FOR)
            .iter()
            .map(header_text)
            .collect::<Vec<_>>()
            .join(", ");
        Self { origin }
    }
}

/// Body of `GET /get`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetParametersResponse {
    pub args: BTreeMap<String, String>,
}

impl GetParametersResponse {
    /// Later pairs overwrite earlier ones with the same key.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        Self {
            args: pairs.into_iter().collect(),
        }
    }
}

/// Body of `GET /headers`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderResponse {
    pub headers: BTreeMap<String, Option<String>>,
}

impl HeaderResponse {
    /// Empty header values are reported as `null`; repeated names keep the last value.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let headers = headers
            .iter()
            .map(|(name, value)| {
                let value = (!value.is_empty()).then(|| header_text(value));
                (name.as_str().to_string(), value)
            })
            .collect();
        Self { headers }
    }
}

/// Body of a successful `GET /basic-auth/{user}/{pass}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorizationResponse {
    pub user: String,
    #[serde(default = "authenticated_default")]
    pub authenticated: bool,
}

fn authenticated_default() -> bool {
    true
}

impl AuthorizationResponse {
    pub fn new(user: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            authenticated: true,
        }
    }
}

/// Body of `GET /cookies`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CookieResponse {
    pub cookies: BTreeMap<String, String>,
}

impl CookieResponse {
    /// Later cookies overwrite earlier ones with the same name.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        Self {
            cookies: pairs.into_iter().collect(),
        }
    }
}

/// Header values are bytes; anything that is not UTF-8 is decoded lossily.
fn header_text(value: &HeaderValue) -> String {
    String::from_utf8_lossy(value.as_bytes()).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_ip_joins_all_forwarded_for_values() {
        let mut headers = HeaderMap::new();
        headers.append("x-forwarded-for", HeaderValue::from_static("10.0.0.1"));
        headers.append("x-forwarded-for", HeaderValue::from_static("10.0.0.2"));
        headers.append("x-forwarded-for", HeaderValue::from_static("192.168.1.1"));

        let response = IpResponse::from_headers(&headers);
        assert_eq!(response.origin, "10.0.0.1, 10.0.0.2, 192.168.1.1");
    }

    #[test]
    fn test_ip_without_header_is_empty() {
        let response = IpResponse::from_headers(&HeaderMap::new());
        assert_eq!(response.origin, "");
    }

    #[test]
    fn test_get_parameters_last_value_wins() {
        let response = GetParametersResponse::from_pairs(vec![
            ("a".to_string(), "1".to_string()),
            ("b".to_string(), String::new()),
            ("a".to_string(), "3".to_string()),
        ]);
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({ "args": { "a": "3", "b": "" } })
        );
    }

    #[test]
    fn test_headers_empty_value_is_null() {
        let mut headers = HeaderMap::new();
        headers.insert("x-empty", HeaderValue::from_static(""));
        headers.insert("x-full", HeaderValue::from_static("yes"));

        let response = HeaderResponse::from_headers(&headers);
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({ "headers": { "x-empty": null, "x-full": "yes" } })
        );
    }

    #[test]
    fn test_headers_repeated_name_keeps_last() {
        let mut headers = HeaderMap::new();
        headers.append("x-dup", HeaderValue::from_static("first"));
        headers.append("x-dup", HeaderValue::from_static("second"));

        let response = HeaderResponse::from_headers(&headers);
        assert_eq!(response.headers["x-dup"].as_deref(), Some("second"));
    }

    #[test]
    fn test_headers_non_utf8_is_lossy() {
        let mut headers = HeaderMap::new();
        headers.insert("x-bytes", HeaderValue::from_bytes(b"caf\xe9").unwrap());

        let response = HeaderResponse::from_headers(&headers);
        assert_eq!(response.headers["x-bytes"].as_deref(), Some("caf\u{fffd}"));
    }

    #[test]
    fn test_authorization_response_shape() {
        assert_eq!(
            serde_json::to_value(AuthorizationResponse::new("alice")).unwrap(),
            json!({ "user": "alice", "authenticated": true })
        );
    }

    #[test]
    fn test_authorization_response_defaults_authenticated() {
        let parsed: AuthorizationResponse = serde_json::from_str(r#"{"user":"bob"}"#).unwrap();
        assert!(parsed.authenticated);
    }
}
