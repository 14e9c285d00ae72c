// SPDX-FileCopyrightText: 2026 DocFlow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Async HTTP client for the ZeroDB data platform.
//!
//! Provides [`ZeroDbClient`], a thin typed wrapper over ZeroDB's
//! project-scoped REST API: table, vector-search, event, file-URL, and
//! memory operations. All failure modes are translated into the
//! [`DocflowError`](docflow_core::DocflowError) taxonomy; this crate adds no
//! retry, queuing, or backpressure of its own.

pub mod client;

pub use client::ZeroDbClient;
