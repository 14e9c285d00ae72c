// SPDX-FileCopyrightText: 2026 DocFlow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gateway HTTP server built on axum.
//!
//! Sets up routes, middleware, and shared state for the API surface.

use std::sync::Arc;

use axum::http::HeaderValue;
use axum::{Router, middleware as axum_middleware, routing::get};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use docflow_audit::AuditSink;
use docflow_auth::TokenService;
use docflow_config::{DocflowConfig, ServerConfig};
use docflow_core::DocflowError;
use docflow_zerodb::ZeroDbClient;

use crate::handlers;
use crate::middleware::{self, PROCESS_TIME_HEADER, REQUEST_ID_HEADER};

/// Shared state for axum request handlers.
///
/// Everything a handler needs is threaded through here: no component in
/// the gateway reaches for process-global singletons.
#[derive(Clone)]
pub struct AppState {
    /// Effective application configuration.
    pub config: Arc<DocflowConfig>,
    /// Shared ZeroDB client; reqwest's pool handles concurrent use.
    pub db: Arc<ZeroDbClient>,
    /// JWT issuance and decoding.
    pub tokens: Arc<TokenService>,
    /// Append-only audit log.
    pub audit: Arc<dyn AuditSink>,
}

/// Build the full application router.
///
/// Routes:
/// - GET /health (service's own health, always 200)
/// - GET / (service metadata)
/// - GET /api/v1/ (versioned API root; future domain routers nest here)
pub fn build_router(state: AppState) -> Router {
    let v1_routes = Router::new().route("/", get(handlers::v1_root));

    Router::new()
        .route("/health", get(handlers::get_health))
        .route("/", get(handlers::get_root))
        .nest("/api/v1", v1_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&state.config.server))
        // Correlation must be outermost so every response, including CORS
        // rejections and error envelopes, carries the tracking headers.
        .layer(axum_middleware::from_fn(middleware::correlation))
        .with_state(state)
}

/// Start the gateway server and run until a shutdown signal arrives.
pub async fn serve(state: AppState) -> Result<(), DocflowError> {
    let addr = format!(
        "{}:{}",
        state.config.server.host, state.config.server.port
    );
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| DocflowError::internal(format!("failed to bind gateway to {addr}: {e}")))?;

    info!("DocFlow API listening on {addr}");

    let app = build_router(state);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| DocflowError::internal(format!("gateway server error: {e}")))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to install shutdown signal handler");
    }
}

fn cors_layer(config: &ServerConfig) -> CorsLayer {
    if config.cors_origins.iter().any(|origin| origin == "*") {
        return CorsLayer::permissive();
    }
    let origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "ignoring unparsable CORS origin");
                None
            }
        })
        .collect();
    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any)
        .expose_headers([REQUEST_ID_HEADER, PROCESS_TIME_HEADER])
}
