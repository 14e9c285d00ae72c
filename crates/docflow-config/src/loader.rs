// SPDX-FileCopyrightText: 2026 DocFlow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./docflow.toml` > `~/.config/docflow/docflow.toml` > `/etc/docflow/docflow.toml`
//! with environment variable overrides via `DOCFLOW_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::DocflowConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/docflow/docflow.toml` (system-wide)
/// 3. `~/.config/docflow/docflow.toml` (user XDG config)
/// 4. `./docflow.toml` (local directory)
/// 5. `DOCFLOW_*` environment variables
pub fn load_config() -> Result<DocflowConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(DocflowConfig::default()))
        .merge(Toml::file("/etc/docflow/docflow.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("docflow/docflow.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("docflow.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env vars).
///
/// Used for testing and explicit config specification.
pub fn load_config_from_str(toml_content: &str) -> Result<DocflowConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(DocflowConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<DocflowConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(DocflowConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for section-to-dot mapping.
///
/// CRITICAL: Uses `Env::map()` NOT `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names. For example, `DOCFLOW_ZERODB_BASE_URL` must
/// map to `zerodb.base_url`, not `zerodb.base.url`.
fn env_provider() -> Env {
    Env::prefixed("DOCFLOW_").map(|key| {
        // `key` is the lowercased env var name with prefix stripped.
        // Example: DOCFLOW_JWT_ACCESS_TOKEN_EXPIRE_MINUTES -> "jwt_access_token_expire_minutes"
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("server_", "server.", 1)
            .replacen("zerodb_", "zerodb.", 1)
            .replacen("jwt_", "jwt.", 1);
        mapped.into()
    })
}
