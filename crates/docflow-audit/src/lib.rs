// SPDX-FileCopyrightText: 2026 DocFlow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Append-only audit event log for the DocFlow HR backend.
//!
//! Defines the [`AuditSink`] seam that callers record through, the
//! [`AuditEvent`] model, and an in-memory implementation. Recording is
//! best-effort and never fails the surrounding request.

pub mod event;
pub mod log;

pub use event::{AuditEvent, EventType};
pub use log::{AuditQuery, AuditSink, DEFAULT_QUERY_LIMIT, InMemoryAuditLog};
