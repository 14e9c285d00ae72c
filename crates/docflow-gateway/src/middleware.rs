// SPDX-FileCopyrightText: 2026 DocFlow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Request correlation middleware.
//!
//! Assigns a per-request UUID before the handler runs, measures wall-clock
//! duration, and annotates every outgoing response with `X-Request-ID` and
//! `X-Process-Time` headers. Success bodies are never altered; only headers
//! are added.

use std::time::Instant;

use axum::extract::Request;
use axum::http::{HeaderName, HeaderValue};
use axum::middleware::Next;
use axum::response::Response;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

/// Correlation identifier for a single request, inserted as a request
/// extension before handler execution.
#[derive(Debug, Clone)]
pub struct RequestId(pub String);

pub(crate) const REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");
pub(crate) const PROCESS_TIME_HEADER: HeaderName = HeaderName::from_static("x-process-time");

/// Wrap a request with correlation id assignment, timing, and logging.
pub async fn correlation(mut request: Request, next: Next) -> Response {
    let request_id = Uuid::new_v4().to_string();
    request.extensions_mut().insert(RequestId(request_id.clone()));

    let method = request.method().clone();
    let uri = request.uri().clone();
    debug!(request_id = %request_id, %method, %uri, "request start");

    let start = Instant::now();
    let mut response = next.run(request).await;
    let elapsed = start.elapsed().as_secs_f64();

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    if let Ok(value) = HeaderValue::from_str(&format!("{elapsed:.3}")) {
        response.headers_mut().insert(PROCESS_TIME_HEADER, value);
    }

    let status = response.status();
    if status.is_server_error() {
        error!(
            request_id = %request_id,
            %method,
            %uri,
            status = status.as_u16(),
            duration = format_args!("{elapsed:.3}s"),
            "request failed"
        );
    } else if status.is_client_error() {
        warn!(
            request_id = %request_id,
            %method,
            %uri,
            status = status.as_u16(),
            duration = format_args!("{elapsed:.3}s"),
            "request rejected"
        );
    } else {
        info!(
            request_id = %request_id,
            %method,
            %uri,
            status = status.as_u16(),
            duration = format_args!("{elapsed:.3}s"),
            "request complete"
        );
    }

    response
}
