// SPDX-FileCopyrightText: 2026 DocFlow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `docflow serve` command implementation.
//!
//! Starts the API server with the configured ZeroDB client, token service,
//! and audit log, and tears the client down again on graceful shutdown.

use std::sync::Arc;

use tracing::{info, warn};

use docflow_audit::{AuditEvent, AuditSink, EventType, InMemoryAuditLog};
use docflow_auth::TokenService;
use docflow_config::DocflowConfig;
use docflow_core::DocflowError;
use docflow_gateway::AppState;
use docflow_zerodb::ZeroDbClient;

/// Runs the `docflow serve` command.
///
/// Wires the shared state, records the startup/shutdown audit events, and
/// serves until a shutdown signal arrives. The ZeroDB client is owned here
/// and closed exactly once on the way out.
pub async fn run_serve(config: DocflowConfig) -> Result<(), DocflowError> {
    init_tracing(&config.server.log_level);

    info!(
        environment = %config.server.environment,
        debug = config.server.debug,
        "starting docflow serve"
    );

    let config = Arc::new(config);

    let db = Arc::new(ZeroDbClient::new(&config.zerodb));
    db.connect().await?;
    if db.health_check().await {
        info!("ZeroDB reachable");
    } else {
        // Startup proceeds; requests against the platform will surface
        // taxonomy errors until it recovers.
        warn!("ZeroDB health check failed");
    }

    let tokens = Arc::new(TokenService::new(&config.jwt)?);
    let audit: Arc<dyn AuditSink> = Arc::new(InMemoryAuditLog::new());
    audit
        .record(AuditEvent::new(EventType::SystemStartup, "service started"))
        .await;

    let state = AppState {
        config: Arc::clone(&config),
        db: Arc::clone(&db),
        tokens,
        audit: Arc::clone(&audit),
    };

    docflow_gateway::serve(state).await?;

    audit
        .record(AuditEvent::new(EventType::SystemShutdown, "service stopped"))
        .await;
    db.close().await;
    info!("shutdown complete");

    Ok(())
}

/// Render the effective configuration as TOML with secrets redacted.
pub fn render_config(config: &DocflowConfig) -> Result<String, DocflowError> {
    let mut redacted = config.clone();
    if !redacted.jwt.secret.is_empty() {
        redacted.jwt.secret = "[redacted]".to_string();
    }
    if !redacted.zerodb.api_key.is_empty() {
        redacted.zerodb.api_key = "[redacted]".to_string();
    }
    toml::to_string_pretty(&redacted)
        .map_err(|e| DocflowError::internal(format!("failed to render config: {e}")))
}

fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("docflow={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_config_redacts_secrets() {
        let mut config = DocflowConfig::default();
        config.jwt.secret = "super-secret".to_string();
        config.zerodb.api_key = "zdb-key".to_string();

        let rendered = render_config(&config).unwrap();
        assert!(!rendered.contains("super-secret"));
        assert!(!rendered.contains("zdb-key"));
        assert!(rendered.contains("[redacted]"));
        assert!(rendered.contains("base_url"));
    }

    #[test]
    fn render_config_leaves_empty_secrets_alone() {
        let config = DocflowConfig::default();
        let rendered = render_config(&config).unwrap();
        assert!(rendered.contains("api_key = \"\""));
    }
}
