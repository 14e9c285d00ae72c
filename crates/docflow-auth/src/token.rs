// SPDX-FileCopyrightText: 2026 DocFlow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! JWT issuance and decoding.
//!
//! Access and refresh tokens are HMAC-signed with the configured secret;
//! issuance stamps the expiry and the `type` discriminator into the payload
//! before signing. Decoding rejects bad signatures, expired tokens, and
//! structurally invalid payloads, surfacing a single Authentication error
//! regardless of the underlying cryptographic cause.

use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde_json::{Map, Value, json};
use tracing::debug;

use docflow_config::JwtConfig;
use docflow_core::DocflowError;

use crate::claims::{Claims, TokenType};

/// Issues and decodes the service's bearer credentials.
pub struct TokenService {
    algorithm: Algorithm,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("algorithm", &self.algorithm)
            .field("access_ttl", &self.access_ttl)
            .field("refresh_ttl", &self.refresh_ttl)
            .finish_non_exhaustive()
    }
}

impl TokenService {
    /// Build a token service from JWT configuration.
    ///
    /// # Errors
    ///
    /// Fails when the configured algorithm name is not one jsonwebtoken
    /// recognizes (config validation catches this earlier in normal startup).
    pub fn new(config: &JwtConfig) -> Result<Self, DocflowError> {
        let algorithm: Algorithm = config.algorithm.parse().map_err(|e| {
            DocflowError::internal(format!(
                "unsupported JWT algorithm `{}`: {e}",
                config.algorithm
            ))
        })?;
        Ok(Self {
            algorithm,
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            access_ttl: Duration::minutes(config.access_token_expire_minutes as i64),
            refresh_ttl: Duration::days(config.refresh_token_expire_days as i64),
        })
    }

    /// Create a signed access token carrying `data` as application claims.
    ///
    /// `expires_in` overrides the configured access-token lifetime.
    pub fn create_access_token(
        &self,
        data: &Map<String, Value>,
        expires_in: Option<Duration>,
    ) -> Result<String, DocflowError> {
        self.sign(data, TokenType::Access, expires_in.unwrap_or(self.access_ttl))
    }

    /// Create a signed refresh token carrying `data` as application claims.
    ///
    /// `expires_in` overrides the configured refresh-token lifetime.
    pub fn create_refresh_token(
        &self,
        data: &Map<String, Value>,
        expires_in: Option<Duration>,
    ) -> Result<String, DocflowError> {
        self.sign(data, TokenType::Refresh, expires_in.unwrap_or(self.refresh_ttl))
    }

    fn sign(
        &self,
        data: &Map<String, Value>,
        token_type: TokenType,
        ttl: Duration,
    ) -> Result<String, DocflowError> {
        let expire = Utc::now() + ttl;
        let mut payload = data.clone();
        payload.insert("exp".to_string(), json!(expire.timestamp()));
        payload.insert("type".to_string(), json!(token_type.to_string()));
        debug!(%token_type, exp = expire.timestamp(), "issuing token");
        encode(&Header::new(self.algorithm), &payload, &self.encoding_key)
            .map_err(|e| DocflowError::internal(format!("failed to sign token: {e}")))
    }

    /// Decode and validate a token.
    ///
    /// # Errors
    ///
    /// Any failure — bad signature, past expiry, malformed structure,
    /// missing required claims — surfaces as one Authentication error with
    /// the decode failure in the message.
    pub fn decode_token(&self, token: &str) -> Result<Claims, DocflowError> {
        decode::<Claims>(token, &self.decoding_key, &Validation::new(self.algorithm))
            .map(|data| data.claims)
            .map_err(|e| DocflowError::authentication(format!("Invalid token: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::claims::verify_token_type;

    use super::*;

    fn service() -> TokenService {
        TokenService::new(&JwtConfig {
            secret: "test-secret-key-for-testing-only".to_string(),
            algorithm: "HS256".to_string(),
            access_token_expire_minutes: 30,
            refresh_token_expire_days: 7,
        })
        .unwrap()
    }

    fn user_data() -> Map<String, Value> {
        let mut data = Map::new();
        data.insert("sub".to_string(), json!("user-1"));
        data.insert("email".to_string(), json!("user@example.com"));
        data.insert("role".to_string(), json!("employee"));
        data
    }

    #[test]
    fn access_token_round_trip_preserves_extra_claims() {
        let svc = service();
        let token = svc.create_access_token(&user_data(), None).unwrap();
        let claims = svc.decode_token(&token).unwrap();

        assert_eq!(claims.sub, "user-1");
        assert_eq!(claims.email(), Some("user@example.com"));
        assert_eq!(claims.role(), Some("employee"));
        assert!(verify_token_type(&claims, TokenType::Access));
        assert!(claims.exp > Utc::now().timestamp());
    }

    #[test]
    fn refresh_token_carries_refresh_type() {
        let svc = service();
        let token = svc.create_refresh_token(&user_data(), None).unwrap();
        let claims = svc.decode_token(&token).unwrap();
        assert!(verify_token_type(&claims, TokenType::Refresh));
        assert!(!verify_token_type(&claims, TokenType::Access));
    }

    #[test]
    fn token_signed_with_different_key_is_rejected() {
        let svc = service();
        let other = TokenService::new(&JwtConfig {
            secret: "a-completely-different-secret".to_string(),
            algorithm: "HS256".to_string(),
            access_token_expire_minutes: 30,
            refresh_token_expire_days: 7,
        })
        .unwrap();

        let token = other.create_access_token(&user_data(), None).unwrap();
        let err = svc.decode_token(&token).unwrap_err();
        assert_eq!(err.error_code(), "AUTHENTICATION_ERROR");
        assert!(err.message().starts_with("Invalid token:"));
    }

    #[test]
    fn expired_token_is_rejected() {
        let svc = service();
        // Beyond the default validation leeway.
        let token = svc
            .create_access_token(&user_data(), Some(Duration::minutes(-5)))
            .unwrap();
        let err = svc.decode_token(&token).unwrap_err();
        assert_eq!(err.error_code(), "AUTHENTICATION_ERROR");
    }

    #[test]
    fn malformed_token_is_rejected() {
        let svc = service();
        let err = svc.decode_token("not-a-token").unwrap_err();
        assert_eq!(err.error_code(), "AUTHENTICATION_ERROR");
    }

    #[test]
    fn token_without_subject_is_structurally_invalid() {
        let svc = service();
        let mut data = Map::new();
        data.insert("role".to_string(), json!("admin"));
        let token = svc.create_access_token(&data, None).unwrap();
        let err = svc.decode_token(&token).unwrap_err();
        assert_eq!(err.error_code(), "AUTHENTICATION_ERROR");
    }

    #[test]
    fn unsupported_algorithm_fails_construction() {
        let result = TokenService::new(&JwtConfig {
            secret: "secret".to_string(),
            algorithm: "HS9000".to_string(),
            access_token_expire_minutes: 30,
            refresh_token_expire_days: 7,
        });
        assert!(result.is_err());
    }
}
