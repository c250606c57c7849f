//! HTTP server exposed as a lifecycle action.
//!
//! # Responsibilities
//! - Create Axum Router with the status handlers
//! - Wire up middleware (tracing, request timeout)
//! - Bind on start, so bind errors fail registration
//! - Drain in-flight requests on stop, bounded by the shutdown deadline

use std::net::SocketAddr;
use std::sync::OnceLock;
use std::time::Duration;

use async_trait::async_trait;
use axum::{http::StatusCode, routing::get, Router};
use tokio::net::TcpListener;
use tokio::sync::{oneshot, Mutex};
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::HttpConfig;
use crate::lifecycle::{Action, BoxError};

/// A serving task and the sender that asks it to drain.
struct Running {
    shutdown_tx: oneshot::Sender<()>,
    task: JoinHandle<std::io::Result<()>>,
}

/// HTTP listener managed by the orchestrator.
pub struct HttpServer {
    config: HttpConfig,
    router: Router,
    local_addr: OnceLock<SocketAddr>,
    running: Mutex<Option<Running>>,
}

impl HttpServer {
    /// Create a new HTTP server serving the status routes.
    pub fn new(config: HttpConfig) -> Self {
        let routes = Router::new()
            .route("/", get(root_handler))
            .route("/health", get(health_handler));
        Self::with_router(config, routes)
    }

    /// Create a server for `routes`, wrapped in the standard middleware.
    pub fn with_router(config: HttpConfig, routes: Router) -> Self {
        let router = Self::build_router(&config, routes);
        Self {
            config,
            router,
            local_addr: OnceLock::new(),
            running: Mutex::new(None),
        }
    }

    /// Wrap the routes with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &HttpConfig, routes: Router) -> Router {
        routes
            .layer(TimeoutLayer::new(Duration::from_secs(config.request_timeout_secs)))
            .layer(TraceLayer::new_for_http())
    }

    /// Address the server is bound to, once started.
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.local_addr.get().copied()
    }
}

#[async_trait]
impl Action for HttpServer {
    async fn start(&self) -> Result<(), BoxError> {
        let listener = TcpListener::bind(&self.config.bind_address).await?;
        let addr = listener.local_addr()?;
        let _ = self.local_addr.set(addr);

        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        let serve = axum::serve(listener, self.router.clone()).with_graceful_shutdown(async move {
            let _ = shutdown_rx.await;
        });
        let task = tokio::spawn(async move { serve.await });

        *self.running.lock().await = Some(Running { shutdown_tx, task });

        tracing::info!(address = %addr, "HTTP server listening");
        Ok(())
    }

    /// Drains until every in-flight request finishes. The orchestrator
    /// bounds the wait by the shared deadline.
    async fn stop(&self, _deadline: Instant) -> Result<(), BoxError> {
        let Some(running) = self.running.lock().await.take() else {
            return Ok(());
        };

        let _ = running.shutdown_tx.send(());
        running.task.await??;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    fn name(&self) -> &str {
        "http-server"
    }
}

async fn root_handler() -> &'static str {
    "graceful-shutdown"
}

async fn health_handler() -> (StatusCode, &'static str) {
    (StatusCode::OK, "OK")
}
