// SPDX-FileCopyrightText: 2026 DocFlow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conversion of taxonomy errors into the HTTP error envelope.
//!
//! [`ApiError`] is the single point where a [`DocflowError`] becomes an
//! HTTP response. Anything that is not already a taxonomy error is
//! rewritten through [`ApiError::internal`], which suppresses the
//! underlying message unless the debug flag is set.

use axum::Json;
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};

use docflow_core::{DocflowError, ErrorResponse};

/// A taxonomy error on its way out as an HTTP response.
#[derive(Debug)]
pub struct ApiError {
    error: DocflowError,
    request_id: Option<String>,
}

impl ApiError {
    pub fn new(error: DocflowError) -> Self {
        Self {
            error,
            request_id: None,
        }
    }

    /// Attach the correlation identifier of the failed request.
    pub fn with_request_id(mut self, request_id: Option<String>) -> Self {
        self.request_id = request_id;
        self
    }

    /// Rewrite a non-taxonomy failure as a generic internal error.
    ///
    /// The real message is only surfaced when `debug` is set; otherwise the
    /// caller sees a fixed placeholder.
    pub fn internal(source: impl std::fmt::Display, debug: bool) -> Self {
        let message = if debug {
            source.to_string()
        } else {
            "An unexpected error occurred".to_string()
        };
        Self::new(DocflowError::internal(message))
    }

    /// The wrapped taxonomy error.
    pub fn error(&self) -> &DocflowError {
        &self.error
    }
}

impl From<DocflowError> for ApiError {
    fn from(error: DocflowError) -> Self {
        Self::new(error)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.error.http_status())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let body = ErrorResponse {
            success: false,
            error: self.error.error_code().to_string(),
            message: self.error.message().to_string(),
            details: self.error.details().map(<[_]>::to_vec),
            request_id: self.request_id,
        };
        let mut response = (status, Json(body)).into_response();
        if status == StatusCode::UNAUTHORIZED {
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }
        response
    }
}
