// SPDX-FileCopyrightText: 2026 DocFlow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Bearer-credential extractors for request handlers.
//!
//! A handler takes [`CurrentUser`] when authentication is required and
//! [`OptionalUser`] when anonymous access is acceptable. Role gating
//! happens inside the handler via
//! [`authorize_roles`](docflow_auth::authorize_roles).

use axum::extract::FromRequestParts;
use axum::http::{HeaderMap, header, request::Parts};

use docflow_auth::{Claims, TokenType, verify_token_type};
use docflow_core::DocflowError;

use crate::error::ApiError;
use crate::middleware::RequestId;
use crate::server::AppState;

/// The authenticated caller's claims. Rejects with 401 when the credential
/// is missing, undecodable, expired, or of the wrong token class.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub Claims);

/// The caller's claims when a valid access token was presented, `None`
/// otherwise. Never rejects.
#[derive(Debug, Clone)]
pub struct OptionalUser(pub Option<Claims>);

/// Extract the bearer token from the Authorization header.
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let token = headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")?
        .trim();
    if token.is_empty() { None } else { Some(token) }
}

fn request_id(parts: &Parts) -> Option<String> {
    parts.extensions.get::<RequestId>().map(|id| id.0.clone())
}

fn resolve(parts: &Parts, state: &AppState) -> Result<Claims, DocflowError> {
    let token =
        bearer_token(&parts.headers).ok_or_else(|| DocflowError::authentication("Not authenticated"))?;
    let claims = state.tokens.decode_token(token)?;
    if !verify_token_type(&claims, TokenType::Access) {
        return Err(DocflowError::authentication("Invalid token type"));
    }
    Ok(claims)
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        resolve(parts, state)
            .map(Self)
            .map_err(|e| ApiError::new(e).with_request_id(request_id(parts)))
    }
}

impl FromRequestParts<AppState> for OptionalUser {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(Self(resolve(parts, state).ok()))
    }
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn bearer_token_strips_scheme_and_whitespace() {
        assert_eq!(bearer_token(&headers("Bearer abc.def.ghi")), Some("abc.def.ghi"));
        assert_eq!(bearer_token(&headers("Bearer   padded  ")), Some("padded"));
    }

    #[test]
    fn bearer_token_rejects_other_schemes_and_empty() {
        assert_eq!(bearer_token(&headers("Basic dXNlcjpwYXNz")), None);
        assert_eq!(bearer_token(&headers("Bearer ")), None);
        assert_eq!(bearer_token(&HeaderMap::new()), None);
    }
}
