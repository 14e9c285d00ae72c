// SPDX-FileCopyrightText: 2026 DocFlow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the DocFlow HR backend.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Placeholder JWT secret shipped for local development.
///
/// Validation refuses to start a production environment with this value.
pub const DEV_JWT_SECRET: &str = "dev-secret-change-me";

/// Top-level DocFlow configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable
/// overrides. All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DocflowConfig {
    /// HTTP server and runtime environment settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// ZeroDB remote data-platform settings.
    #[serde(default)]
    pub zerodb: ZeroDbConfig,

    /// JWT signing and lifetime settings.
    #[serde(default)]
    pub jwt: JwtConfig,
}

/// HTTP server and runtime environment configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Allowed CORS origins. `["*"]` permits any origin.
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,

    /// Debug flag. When set, internal error messages are surfaced to callers.
    #[serde(default)]
    pub debug: bool,

    /// Environment name (development, test, production).
    #[serde(default = "default_environment")]
    pub environment: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: default_cors_origins(),
            debug: false,
            environment: default_environment(),
            log_level: default_log_level(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_cors_origins() -> Vec<String> {
    vec!["*".to_string()]
}

fn default_environment() -> String {
    "development".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// ZeroDB remote data-platform configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ZeroDbConfig {
    /// ZeroDB API base URL. A trailing slash is tolerated and trimmed.
    #[serde(default = "default_zerodb_base_url")]
    pub base_url: String,

    /// ZeroDB API key, sent as a bearer token.
    #[serde(default)]
    pub api_key: String,

    /// ZeroDB project identifier.
    #[serde(default)]
    pub project_id: String,

    /// Whole-round-trip request timeout in seconds.
    #[serde(default = "default_zerodb_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ZeroDbConfig {
    fn default() -> Self {
        Self {
            base_url: default_zerodb_base_url(),
            api_key: String::new(),
            project_id: String::new(),
            timeout_secs: default_zerodb_timeout_secs(),
        }
    }
}

fn default_zerodb_base_url() -> String {
    "https://api.ainative.studio/api/v1".to_string()
}

fn default_zerodb_timeout_secs() -> u64 {
    30
}

/// JWT signing and lifetime configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct JwtConfig {
    /// HMAC signing secret.
    #[serde(default = "default_jwt_secret")]
    pub secret: String,

    /// Signing algorithm (HS256, HS384, or HS512).
    #[serde(default = "default_jwt_algorithm")]
    pub algorithm: String,

    /// Access token lifetime in minutes.
    #[serde(default = "default_access_token_expire_minutes")]
    pub access_token_expire_minutes: u64,

    /// Refresh token lifetime in days.
    #[serde(default = "default_refresh_token_expire_days")]
    pub refresh_token_expire_days: u64,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: default_jwt_secret(),
            algorithm: default_jwt_algorithm(),
            access_token_expire_minutes: default_access_token_expire_minutes(),
            refresh_token_expire_days: default_refresh_token_expire_days(),
        }
    }
}

fn default_jwt_secret() -> String {
    DEV_JWT_SECRET.to_string()
}

fn default_jwt_algorithm() -> String {
    "HS256".to_string()
}

fn default_access_token_expire_minutes() -> u64 {
    30
}

fn default_refresh_token_expire_days() -> u64 {
    7
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = DocflowConfig::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.server.cors_origins, vec!["*"]);
        assert!(!config.server.debug);
        assert_eq!(config.server.environment, "development");
        assert_eq!(config.zerodb.timeout_secs, 30);
        assert_eq!(config.jwt.algorithm, "HS256");
        assert_eq!(config.jwt.access_token_expire_minutes, 30);
        assert_eq!(config.jwt.refresh_token_expire_days, 7);
    }

    #[test]
    fn unknown_section_key_is_rejected() {
        let toml_str = r#"
[zerodb]
base_ulr = "https://example.com"
"#;
        let result = toml::from_str::<DocflowConfig>(toml_str);
        assert!(result.is_err());
    }

    #[test]
    fn partial_section_keeps_other_defaults() {
        let toml_str = r#"
[server]
port = 9000
"#;
        let config: DocflowConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "0.0.0.0");
    }
}
