// SPDX-FileCopyrightText: 2026 DocFlow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Claims payload carried by every token the service issues.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use strum::{Display, EnumString};

use docflow_core::DocflowError;

/// The token class a credential belongs to.
///
/// Decoding rejects a payload whose `type` does not match the class the
/// call site expects, so a refresh token can never pass where an access
/// token is required.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TokenType {
    Access,
    Refresh,
}

/// Decoded content of a bearer credential.
///
/// The required fields (`sub`, `exp`, `type`) are typed; everything else
/// the issuer stamped in (`email`, `role`, `disabled`, ...) lands in the
/// open `extra` map and is validated where it is consumed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject — the user identifier.
    pub sub: String,

    /// Expiry as a Unix timestamp in seconds.
    pub exp: i64,

    /// Token class discriminator.
    #[serde(rename = "type")]
    pub token_type: TokenType,

    /// Application-specific claims.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Claims {
    /// The `role` claim, if present.
    pub fn role(&self) -> Option<&str> {
        self.extra.get("role").and_then(Value::as_str)
    }

    /// The `email` claim, if present.
    pub fn email(&self) -> Option<&str> {
        self.extra.get("email").and_then(Value::as_str)
    }

    /// Whether the user is flagged disabled. Absent means active.
    pub fn disabled(&self) -> bool {
        self.extra
            .get("disabled")
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }
}

/// Verify that a decoded payload has the expected token class.
pub fn verify_token_type(claims: &Claims, expected: TokenType) -> bool {
    claims.token_type == expected
}

/// Gate a claims payload on an allow-list of roles.
///
/// A disabled user is rejected before the role is examined; both failures
/// are Authorization errors.
pub fn authorize_roles(claims: &Claims, allowed_roles: &[&str]) -> Result<(), DocflowError> {
    if claims.disabled() {
        return Err(DocflowError::authorization("Inactive user"));
    }
    let role = claims.role().unwrap_or("");
    if !allowed_roles.contains(&role) {
        return Err(DocflowError::authorization(format!(
            "Role '{role}' not authorized. Required: {allowed_roles:?}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn claims(token_type: TokenType, extra: Map<String, Value>) -> Claims {
        Claims {
            sub: "user-1".to_string(),
            exp: 4_102_444_800, // far future
            token_type,
            extra,
        }
    }

    fn extra(entries: &[(&str, Value)]) -> Map<String, Value> {
        entries
            .iter()
            .map(|(k, v)| ((*k).to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn token_type_round_trips_through_wire_name() {
        let payload = claims(TokenType::Access, Map::new());
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["type"], "access");
        let back: Claims = serde_json::from_value(json).unwrap();
        assert!(verify_token_type(&back, TokenType::Access));
        assert!(!verify_token_type(&back, TokenType::Refresh));
    }

    #[test]
    fn extra_claims_are_reachable_through_helpers() {
        let payload = claims(
            TokenType::Access,
            extra(&[
                ("role", json!("admin")),
                ("email", json!("admin@example.com")),
            ]),
        );
        assert_eq!(payload.role(), Some("admin"));
        assert_eq!(payload.email(), Some("admin@example.com"));
        assert!(!payload.disabled());
    }

    #[test]
    fn admin_allow_list_rejects_employee() {
        let employee = claims(TokenType::Access, extra(&[("role", json!("employee"))]));
        let err = authorize_roles(&employee, &["admin"]).unwrap_err();
        assert_eq!(err.error_code(), "AUTHORIZATION_ERROR");
        assert!(err.message().contains("employee"));
        assert!(err.message().contains("admin"));

        let admin = claims(TokenType::Access, extra(&[("role", json!("admin"))]));
        assert!(authorize_roles(&admin, &["admin"]).is_ok());
    }

    #[test]
    fn disabled_user_is_rejected_before_role_check() {
        let payload = claims(
            TokenType::Access,
            extra(&[("role", json!("admin")), ("disabled", json!(true))]),
        );
        let err = authorize_roles(&payload, &["admin"]).unwrap_err();
        assert_eq!(err.message(), "Inactive user");
    }

    #[test]
    fn missing_role_claim_is_not_authorized() {
        let payload = claims(TokenType::Access, Map::new());
        assert!(authorize_roles(&payload, &["admin"]).is_err());
    }
}
