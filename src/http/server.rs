//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (request ID, tracing, timeout, session gate)
//! - Bind server to listener
//! - Forward gated page requests to the page renderer
//! - Serve portal data from the upstream API

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    http::Request,
    middleware,
    routing::{any, get},
    Router,
};
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::activity::ActivityRecorder;
use crate::config::PortalConfig;
use crate::http::forward::{forward_page, PageForwarder};
use crate::http::request::{request_id, MakeRequestUuidV4};
use crate::http::{auth, portal};
use crate::security::{session_gate_middleware, SessionGate};
use crate::upstream::{UpstreamClient, UpstreamError};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub gate: Arc<SessionGate>,
    pub upstream: Arc<UpstreamClient>,
    pub pages: Arc<PageForwarder>,
    pub activity: Arc<dyn ActivityRecorder>,
}

/// Error building the server from configuration.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("upstream client: {0}")]
    Upstream(#[from] UpstreamError),

    #[error("page renderer address: {0}")]
    Pages(#[from] axum::http::uri::InvalidUri),
}

/// HTTP server for the portal gateway.
pub struct PortalServer {
    router: Router,
    config: PortalConfig,
}

impl PortalServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(
        config: PortalConfig,
        activity: Arc<dyn ActivityRecorder>,
    ) -> Result<Self, ServerError> {
        let state = AppState {
            gate: Arc::new(SessionGate::from_config(&config.session)),
            upstream: Arc::new(UpstreamClient::from_config(&config.upstream)?),
            pages: Arc::new(PageForwarder::new(&config.pages.address)?),
            activity,
        };

        let router = Self::build_router(&config, state);
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &PortalConfig, state: AppState) -> Router {
        Router::new()
            .route("/health", get(health))
            .route("/api/auth/session", get(auth::session_status))
            .nest("/api/portal", portal::routes())
            .route(
                &format!("{}/{{*path}}", portal::PASSTHROUGH_PREFIX),
                any(portal::passthrough),
            )
            .fallback(forward_page)
            .layer(middleware::from_fn_with_state(
                state.gate.clone(),
                session_gate_middleware,
            ))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                tracing::info_span!(
                    "request",
                    request_id = %request_id(request.headers()),
                    method = %request.method(),
                    path = %request.uri().path(),
                )
            }))
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV4))
    }

    /// The fully layered router; useful for driving requests in-process.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    pub fn config(&self) -> &PortalConfig {
        &self.config
    }

    /// Run the server, accepting connections on the given listener until
    /// the shutdown signal fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            upstream = %self.config.upstream.base_url,
            pages = %self.config.pages.address,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

async fn health() -> &'static str {
    "ok"
}
