//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum router with the reflector routes
//! - Wire up middleware (tracing, request timeout)
//! - Serve on a listener until shutdown (blocking run mode)
//! - Spawn a server and hand back a stoppable handle (start mode)

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::BinConfig;
use crate::http::request::RequestSpan;
use crate::lifecycle::Shutdown;
use crate::reflector;

/// Error type for serving.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("server I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("server task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Application state injected into handlers and route layers.
#[derive(Clone, Debug)]
pub struct AppState {
    /// Realm announced by the Basic challenge.
    pub realm: Arc<str>,
}

impl AppState {
    pub fn new(config: &BinConfig) -> Self {
        Self {
            realm: Arc::from(config.auth.realm.as_str()),
        }
    }
}

/// HTTP server for the reflector.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: BinConfig) -> Self {
        let state = AppState::new(&config);
        let router = Self::build_router(&config, state);
        Self { router }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &BinConfig, state: AppState) -> Router {
        reflector::routes(state)
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(TraceLayer::new_for_http().make_span_with(RequestSpan))
    }

    /// The fully layered router, e.g. for driving with `tower::ServiceExt`.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Serve on `listener` until `shutdown` fires, then drain in-flight requests.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), ServerError> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                // Closed channel counts as shutdown.
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Spawn the server on `listener` and return a handle to stop it.
    pub fn start(self, listener: TcpListener) -> Result<RunningServer, ServerError> {
        let local_addr = listener.local_addr()?;
        let shutdown = Shutdown::new();
        let receiver = shutdown.subscribe();
        let task = tokio::spawn(self.run(listener, receiver));

        Ok(RunningServer {
            local_addr,
            shutdown,
            task,
        })
    }
}

/// A server spawned by [`HttpServer::start`].
pub struct RunningServer {
    local_addr: SocketAddr,
    shutdown: Shutdown,
    task: JoinHandle<Result<(), ServerError>>,
}

impl RunningServer {
    /// Address actually bound (useful with port 0).
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Base URL for clients, e.g. `http://127.0.0.1:8000`.
    pub fn url(&self) -> String {
        format!("http://{}", self.local_addr)
    }

    /// Stop accepting, wait for in-flight requests, and join the server task.
    pub async fn stop(self) -> Result<(), ServerError> {
        self.shutdown.trigger();
        self.task.await?
    }
}
