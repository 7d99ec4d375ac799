//! Shared utilities for integration tests.

#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{Request, Response},
    Router,
};
use httpbin::{BinConfig, HttpServer, RunningServer};
use serde_json::Value;
use tower::ServiceExt;

/// The fully layered router with default configuration.
pub fn app() -> Router {
    HttpServer::new(BinConfig::default()).router()
}

/// Send a GET through the router without a socket.
pub async fn get(uri: &str) -> Response<Body> {
    get_with(Request::builder().uri(uri)).await
}

/// Send a prepared request (method defaults to GET) through the router.
pub async fn get_with(builder: axum::http::request::Builder) -> Response<Body> {
    app()
        .oneshot(builder.body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    to_bytes(response.into_body(), usize::MAX).await.unwrap().to_vec()
}

pub async fn body_json(response: Response<Body>) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

/// Start a real server on an ephemeral localhost port.
pub async fn start_server() -> RunningServer {
    let mut config = BinConfig::default();
    config.listener.host = "127.0.0.1".into();
    config.listener.port = 0;

    let listener = httpbin::net::bind(&config.listener).await.unwrap();
    HttpServer::new(config).start(listener).unwrap()
}

/// Client that reports redirects instead of following them.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
