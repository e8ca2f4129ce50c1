//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum router with the relay and health handlers
//! - Wire up middleware (CORS, tracing, request ID, body limit)
//! - Bind the server to a listener and shut down gracefully

use axum::extract::DefaultBodyLimit;
use axum::http::{header, Method};
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use crate::config::RelayConfig;
use crate::http::handlers;
use crate::relay::Relayer;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub relayer: Arc<Relayer>,
}

/// HTTP server for the relay.
pub struct HttpServer {
    router: Router,
    config: Arc<RelayConfig>,
}

impl HttpServer {
    /// Create a new HTTP server around a ready relayer.
    pub fn new(config: Arc<RelayConfig>, relayer: Arc<Relayer>) -> Self {
        let state = AppState { relayer };
        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &RelayConfig, state: AppState) -> Router {
        Router::new()
            .route("/sendTransaction", post(handlers::send_transaction))
            .route("/health", get(handlers::health))
            .with_state(state)
            .layer(DefaultBodyLimit::max(config.max_body_bytes))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(cors_layer())
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    }

    /// The fully layered router, for serving or in-process testing.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            contract = %self.config.target_contract,
            chain_id = self.config.chain_id,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Any origin (mirrored so credentials stay allowed), POST and OPTIONS only.
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_credentials(true)
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([header::ORIGIN, header::CONTENT_TYPE])
        .expose_headers([header::CONTENT_LENGTH])
}
