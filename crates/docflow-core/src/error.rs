// SPDX-FileCopyrightText: 2026 DocFlow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The application error taxonomy.
//!
//! Every failure surfaced to an API caller is one of the kinds defined here.
//! Each kind maps to exactly one HTTP status and one machine-readable code;
//! errors are constructed at the point of failure, propagated unmodified,
//! and rendered into the response envelope at the HTTP boundary.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A structured field/message/code triple attached to an error.
///
/// Suitable for direct surfacing to callers, e.g. per-field validation
/// failures reported by the remote data platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Field that caused the error, when the failure is field-scoped.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    /// Human-readable detail message.
    pub message: String,
    /// Machine-readable detail code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl ErrorDetail {
    /// Create a detail with only a message.
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            field: None,
            message: message.into(),
            code: None,
        }
    }

    /// Create a detail scoped to a named field.
    pub fn field(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: Some(field.into()),
            message: message.into(),
            code: None,
        }
    }
}

/// The primary error type for the DocFlow backend.
///
/// Seven caller-visible kinds plus [`Internal`](Self::Internal), the rewrite
/// applied at the top boundary to anything that is not already a taxonomy
/// error. The status mapping is fixed: no kind maps to more than one status.
#[derive(Debug, Error)]
pub enum DocflowError {
    /// A requested resource does not exist. 404.
    #[error("{message}")]
    NotFound {
        message: String,
        details: Option<Vec<ErrorDetail>>,
    },

    /// Input failed validation. 422.
    #[error("{message}")]
    Validation {
        message: String,
        details: Option<Vec<ErrorDetail>>,
    },

    /// The caller could not be authenticated. 401.
    #[error("{message}")]
    Authentication { message: String },

    /// The caller is authenticated but not permitted. 403.
    #[error("{message}")]
    Authorization { message: String },

    /// The request conflicts with existing state. 409.
    #[error("{message}")]
    Conflict {
        message: String,
        details: Option<Vec<ErrorDetail>>,
    },

    /// The data platform reported a failure this layer cannot classify. 500.
    #[error("{message}")]
    Database {
        message: String,
        details: Option<Vec<ErrorDetail>>,
    },

    /// An upstream service failed or was unreachable. 502.
    #[error("{message}")]
    ExternalService {
        message: String,
        details: Option<Vec<ErrorDetail>>,
    },

    /// Catch-all for unexpected failures rewritten at the boundary. 500.
    #[error("{0}")]
    Internal(String),
}

impl DocflowError {
    /// A resource was not found.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
            details: None,
        }
    }

    /// Validation failed, optionally with per-field details.
    pub fn validation(message: impl Into<String>, details: Option<Vec<ErrorDetail>>) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }

    /// Authentication failed.
    pub fn authentication(message: impl Into<String>) -> Self {
        Self::Authentication {
            message: message.into(),
        }
    }

    /// The caller lacks permission.
    pub fn authorization(message: impl Into<String>) -> Self {
        Self::Authorization {
            message: message.into(),
        }
    }

    /// The request conflicts with existing state.
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
            details: None,
        }
    }

    /// The data platform failed in an unclassified way.
    pub fn database(message: impl Into<String>, details: Option<Vec<ErrorDetail>>) -> Self {
        Self::Database {
            message: message.into(),
            details,
        }
    }

    /// An upstream service failed. The service name, when known, is attached
    /// as a structured detail.
    pub fn external_service(message: impl Into<String>, service: Option<&str>) -> Self {
        Self::ExternalService {
            message: message.into(),
            details: service.map(|name| vec![ErrorDetail::field("service", name)]),
        }
    }

    /// An unexpected internal failure.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// The HTTP status this kind always maps to.
    pub fn http_status(&self) -> u16 {
        match self {
            Self::NotFound { .. } => 404,
            Self::Validation { .. } => 422,
            Self::Authentication { .. } => 401,
            Self::Authorization { .. } => 403,
            Self::Conflict { .. } => 409,
            Self::Database { .. } | Self::Internal(_) => 500,
            Self::ExternalService { .. } => 502,
        }
    }

    /// The machine-readable code surfaced in the error envelope.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Validation { .. } => "VALIDATION_ERROR",
            Self::Authentication { .. } => "AUTHENTICATION_ERROR",
            Self::Authorization { .. } => "AUTHORIZATION_ERROR",
            Self::Conflict { .. } => "CONFLICT",
            Self::Database { .. } => "DATABASE_ERROR",
            Self::ExternalService { .. } => "EXTERNAL_SERVICE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// The human-readable message.
    pub fn message(&self) -> &str {
        match self {
            Self::NotFound { message, .. }
            | Self::Validation { message, .. }
            | Self::Authentication { message }
            | Self::Authorization { message }
            | Self::Conflict { message, .. }
            | Self::Database { message, .. }
            | Self::ExternalService { message, .. } => message,
            Self::Internal(message) => message,
        }
    }

    /// Structured details attached at construction, if any.
    pub fn details(&self) -> Option<&[ErrorDetail]> {
        match self {
            Self::NotFound { details, .. }
            | Self::Validation { details, .. }
            | Self::Conflict { details, .. }
            | Self::Database { details, .. }
            | Self::ExternalService { details, .. } => details.as_deref(),
            Self::Authentication { .. } | Self::Authorization { .. } | Self::Internal(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_kind_has_one_status() {
        let cases = [
            (DocflowError::not_found("x"), 404, "NOT_FOUND"),
            (DocflowError::validation("x", None), 422, "VALIDATION_ERROR"),
            (DocflowError::authentication("x"), 401, "AUTHENTICATION_ERROR"),
            (DocflowError::authorization("x"), 403, "AUTHORIZATION_ERROR"),
            (DocflowError::conflict("x"), 409, "CONFLICT"),
            (DocflowError::database("x", None), 500, "DATABASE_ERROR"),
            (
                DocflowError::external_service("x", None),
                502,
                "EXTERNAL_SERVICE_ERROR",
            ),
            (DocflowError::internal("x"), 500, "INTERNAL_ERROR"),
        ];
        for (err, status, code) in cases {
            assert_eq!(err.http_status(), status, "{code}");
            assert_eq!(err.error_code(), code);
        }
    }

    #[test]
    fn external_service_attaches_service_detail() {
        let err = DocflowError::external_service("ZeroDB unreachable", Some("ZeroDB"));
        let details = err.details().expect("service detail");
        assert_eq!(details.len(), 1);
        assert_eq!(details[0].field.as_deref(), Some("service"));
        assert_eq!(details[0].message, "ZeroDB");
    }

    #[test]
    fn message_survives_unmodified() {
        let err = DocflowError::validation(
            "Validation failed: email is malformed",
            Some(vec![ErrorDetail::field("email", "not an email address")]),
        );
        assert_eq!(err.message(), "Validation failed: email is malformed");
        assert_eq!(err.to_string(), err.message());
        assert_eq!(err.details().map(<[ErrorDetail]>::len), Some(1));
    }

    #[test]
    fn detail_serializes_without_empty_fields() {
        let json = serde_json::to_string(&ErrorDetail::message("broken")).unwrap();
        assert_eq!(json, r#"{"message":"broken"}"#);
    }
}
