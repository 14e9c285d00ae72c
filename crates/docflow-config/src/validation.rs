// SPDX-FileCopyrightText: 2026 DocFlow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes, such as supported JWT algorithms and nonzero lifetimes.

use crate::diagnostic::ConfigError;
use crate::model::{DEV_JWT_SECRET, DocflowConfig};

/// Algorithms the token service can sign and verify with.
const SUPPORTED_JWT_ALGORITHMS: [&str; 3] = ["HS256", "HS384", "HS512"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &DocflowConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if config.server.host.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "server.host must not be empty".to_string(),
        });
    }

    if config.server.port == 0 {
        errors.push(ConfigError::Validation {
            message: "server.port must be nonzero".to_string(),
        });
    }

    if config.zerodb.timeout_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "zerodb.timeout_secs must be nonzero".to_string(),
        });
    }

    if !SUPPORTED_JWT_ALGORITHMS.contains(&config.jwt.algorithm.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "jwt.algorithm must be one of {}, got `{}`",
                SUPPORTED_JWT_ALGORITHMS.join(", "),
                config.jwt.algorithm
            ),
        });
    }

    if config.jwt.access_token_expire_minutes == 0 {
        errors.push(ConfigError::Validation {
            message: "jwt.access_token_expire_minutes must be nonzero".to_string(),
        });
    }

    if config.jwt.refresh_token_expire_days == 0 {
        errors.push(ConfigError::Validation {
            message: "jwt.refresh_token_expire_days must be nonzero".to_string(),
        });
    }

    // The shipped development secret must never sign production tokens.
    if config.server.environment == "production" && config.jwt.secret == DEV_JWT_SECRET {
        errors.push(ConfigError::Validation {
            message: "jwt.secret must be set explicitly when server.environment is `production`"
                .to_string(),
        });
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}
