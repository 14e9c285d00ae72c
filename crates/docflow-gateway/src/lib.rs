// SPDX-FileCopyrightText: 2026 DocFlow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP gateway for the DocFlow HR backend.
//!
//! Wires the axum router, request correlation middleware, bearer-token
//! extractors, and the error-envelope boundary around the shared
//! application state. Domain endpoint routers will nest under `/api/v1`
//! as they are built.

pub mod auth;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod server;

pub use auth::{CurrentUser, OptionalUser};
pub use error::ApiError;
pub use middleware::RequestId;
pub use server::{AppState, build_router, serve};
