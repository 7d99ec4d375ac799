//! Endpoint handlers.
//!
//! Each handler reads only the request parts it reflects and builds its
//! response from them. None of them can fail.

use axum::{
    extract::{Path, RawQuery},
    http::{header, HeaderMap, HeaderValue},
    response::{AppendHeaders, IntoResponse, Redirect, Response},
    Json,
};

use crate::reflector::cookies::{request_cookies, CookieDirective};
use crate::reflector::redirect::{next_hop, parse_times, redirect_to};
use crate::reflector::responses::{
    AuthorizationResponse, CookieResponse, GetParametersResponse, HeaderResponse, IpResponse,
};

/// Where the cookie endpoints send the client afterwards.
pub const COOKIES_PATH: &str = "/cookies";

/// Decoded query pairs in order. A key with no `=` has an empty value.
pub fn query_pairs(query: Option<&str>) -> Vec<(String, String)> {
    query
        .map(|q| {
            url::form_urlencoded::parse(q.as_bytes())
                .into_owned()
                .collect()
        })
        .unwrap_or_default()
}

/// `GET /ip`
pub async fn ip(headers: HeaderMap) -> Json<IpResponse> {
    Json(IpResponse::from_headers(&headers))
}

/// `GET /get`
pub async fn get_parameters(RawQuery(query): RawQuery) -> Json<GetParametersResponse> {
    Json(GetParametersResponse::from_pairs(query_pairs(query.as_deref())))
}

/// `GET /headers`
pub async fn headers(headers: HeaderMap) -> Json<HeaderResponse> {
    Json(HeaderResponse::from_headers(&headers))
}

/// `GET /basic-auth/{user}/{pass}`, behind `auth::require_path_credentials`.
pub async fn protected_resource(
    Path((user, _pass)): Path<(String, String)>,
) -> Json<AuthorizationResponse> {
    Json(AuthorizationResponse::new(user))
}

/// `GET /cookies/set`
pub async fn set_cookies(RawQuery(query): RawQuery) -> Response {
    let directives = CookieDirective::set_all(query_pairs(query.as_deref()));
    redirect_with_cookies(&directives)
}

/// `GET /cookies/delete`
pub async fn delete_cookies(RawQuery(query): RawQuery) -> Response {
    let directives = CookieDirective::invalidate_all(query_pairs(query.as_deref()));
    redirect_with_cookies(&directives)
}

/// `GET /cookies`
pub async fn cookies(headers: HeaderMap) -> Json<CookieResponse> {
    Json(CookieResponse::from_pairs(request_cookies(&headers)))
}

/// `GET /relative-redirect/{times}`; the route only matches digit segments.
pub async fn relative_redirect(Path(times): Path<String>) -> Redirect {
    let counter = parse_times(&times);
    redirect_to(&next_hop(counter))
}

/// 307 to `/cookies` carrying one `Set-Cookie` per directive, in order.
fn redirect_with_cookies(directives: &[CookieDirective]) -> Response {
    let mut set_cookies: Vec<(header::HeaderName, HeaderValue)> = Vec::with_capacity(directives.len());
    for directive in directives {
        match directive.header_value() {
            Ok(value) => set_cookies.push((header::SET_COOKIE, value)),
            Err(error) => {
                tracing::warn!(cookie = %directive.render(), %error, "Skipping unrepresentable cookie");
            }
        }
    }
    tracing::debug!(count = set_cookies.len(), "Emitting cookie directives");
    (AppendHeaders(set_cookies), redirect_to(COOKIES_PATH)).into_response()
}
