// SPDX-FileCopyrightText: 2026 DocFlow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP request handlers for the service's own endpoints.
//!
//! Domain endpoints (employees, documents, categories) are not implemented
//! yet; these handlers cover health, service metadata, and the versioned
//! API root that future routers nest under.

use axum::Json;
use axum::extract::State;
use chrono::Utc;
use serde_json::{Value, json};

use docflow_core::HealthResponse;

use crate::server::AppState;

/// Service display name used in metadata responses.
pub const APP_NAME: &str = "DocFlow HR";

/// GET /health
///
/// Always 200 from this service's own perspective; reachability of the
/// data platform is not part of this check.
pub async fn get_health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        environment: state.config.server.environment.clone(),
        timestamp: Utc::now(),
    })
}

/// GET /
///
/// Service metadata.
pub async fn get_root(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "name": APP_NAME,
        "version": env!("CARGO_PKG_VERSION"),
        "environment": state.config.server.environment.clone(),
        "docs": "/docs",
        "health": "/health",
        "api": "/api/v1",
    }))
}

/// GET /api/v1/
pub async fn v1_root() -> Json<Value> {
    Json(json!({
        "message": "DocFlow HR API v1",
        "version": env!("CARGO_PKG_VERSION"),
        "docs": "/docs",
    }))
}
