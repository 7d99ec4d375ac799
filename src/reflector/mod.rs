//! Request reflector: endpoints that echo request state back as JSON.
//!
//! # Endpoints
//! ```text
//! GET /ip                         → {"origin": "<X-Forwarded-For values>"}
//! GET /get                        → {"args": {query pairs}}
//! GET /headers                    → {"headers": {name: value|null}}
//! GET /basic-auth/{user}/{pass}   → 200 {"user", "authenticated"} | 401 challenge
//! GET /cookies/set?k=v...         → 307 /cookies + Set-Cookie per pair
//! GET /cookies/delete?k...        → 307 /cookies + expiring Set-Cookie per key
//! GET /cookies                    → {"cookies": {name: value}}
//! GET /relative-redirect/{n}      → 307 /relative-redirect/{n-1} ... /get
//! ```
//!
//! # Design Decisions
//! - Handlers are stateless; the only shared value is the immutable realm
//! - The `{n}` digit constraint is a route layer, not handler validation
//! - The basic-auth gate is a route layer so the inner handler never runs on failure

pub mod auth;
pub mod cookies;
pub mod handlers;
pub mod redirect;
pub mod responses;

use axum::{middleware, routing::get, Router};

use crate::http::server::AppState;
use crate::routing::{constrain, DigitsMatcher, PathConstraint};
use self::auth::require_path_credentials;
use self::handlers::*;

pub use responses::{
    AuthorizationResponse, CookieResponse, GetParametersResponse, HeaderResponse, IpResponse,
};

/// Build the route table. Called once at server construction.
pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/ip", get(ip))
        .route("/get", get(get_parameters))
        .route("/headers", get(headers))
        .route(
            "/basic-auth/{user}/{pass}",
            get(protected_resource)
                .route_layer(middleware::from_fn_with_state(state.clone(), require_path_credentials)),
        )
        .route("/cookies/set", get(set_cookies))
        .route("/cookies/delete", get(delete_cookies))
        .route("/cookies", get(cookies))
        .route(
            "/relative-redirect/{times}",
            constrain(get(relative_redirect), PathConstraint::new("times", DigitsMatcher)),
        )
        .with_state(state)
}
