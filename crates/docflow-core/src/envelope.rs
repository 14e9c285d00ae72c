// SPDX-FileCopyrightText: 2026 DocFlow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Uniform response envelopes returned to API callers.
//!
//! Success, error, health, and paginated shapes. Error responses are built
//! from [`DocflowError`](crate::error::DocflowError) at the HTTP boundary.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ErrorDetail;

/// Health check response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Health status string, always "healthy" from this service's own view.
    pub status: String,
    /// Application version.
    pub version: String,
    /// Current environment name.
    pub environment: String,
    /// Response timestamp.
    pub timestamp: DateTime<Utc>,
}

/// Standard error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Always `false`.
    pub success: bool,
    /// Machine-readable error code.
    pub error: String,
    /// Human-readable error message.
    pub message: String,
    /// Structured detail triples, when the error carries any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<ErrorDetail>>,
    /// Correlation identifier of the failed request, when available.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

/// Standard success response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuccessResponse<T> {
    /// Always `true`.
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> SuccessResponse<T> {
    /// Wrap a payload in the success envelope.
    pub fn data(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
        }
    }

    /// A success envelope carrying only a message.
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data: None,
        }
    }
}

/// Pagination metadata for list responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationMeta {
    /// Current page number, 1-based.
    pub page: u32,
    /// Items per page.
    pub page_size: u32,
    /// Total number of items across all pages.
    pub total_items: u64,
    /// Total number of pages.
    pub total_pages: u64,
    pub has_next: bool,
    pub has_previous: bool,
}

impl PaginationMeta {
    /// Compute the derived pagination fields from page, size, and total.
    pub fn new(page: u32, page_size: u32, total_items: u64) -> Self {
        let total_pages = if page_size == 0 {
            0
        } else {
            total_items.div_ceil(u64::from(page_size))
        };
        Self {
            page,
            page_size,
            total_items,
            total_pages,
            has_next: u64::from(page) < total_pages,
            has_previous: page > 1,
        }
    }
}

/// Paginated list response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    /// Always `true`.
    pub success: bool,
    /// Items on this page.
    pub data: Vec<T>,
    pub pagination: PaginationMeta,
}

impl<T> PaginatedResponse<T> {
    pub fn new(data: Vec<T>, pagination: PaginationMeta) -> Self {
        Self {
            success: true,
            data,
            pagination,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pagination_meta_computes_pages() {
        let meta = PaginationMeta::new(2, 10, 35);
        assert_eq!(meta.total_pages, 4);
        assert!(meta.has_next);
        assert!(meta.has_previous);

        let last = PaginationMeta::new(4, 10, 35);
        assert!(!last.has_next);

        let first = PaginationMeta::new(1, 10, 35);
        assert!(!first.has_previous);
    }

    #[test]
    fn pagination_meta_empty_set() {
        let meta = PaginationMeta::new(1, 10, 0);
        assert_eq!(meta.total_pages, 0);
        assert!(!meta.has_next);
        assert!(!meta.has_previous);
    }

    #[test]
    fn success_envelope_omits_empty_fields() {
        let json = serde_json::to_string(&SuccessResponse::<()>::message("done")).unwrap();
        assert_eq!(json, r#"{"success":true,"message":"done"}"#);
    }

    #[test]
    fn error_envelope_shape() {
        let resp = ErrorResponse {
            success: false,
            error: "NOT_FOUND".to_string(),
            message: "Resource not found".to_string(),
            details: None,
            request_id: Some("req-1".to_string()),
        };
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains(r#""success":false"#));
        assert!(json.contains(r#""error":"NOT_FOUND""#));
        assert!(json.contains(r#""request_id":"req-1""#));
        assert!(!json.contains("details"));
    }
}
