// SPDX-FileCopyrightText: 2026 DocFlow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The audit sink seam and its in-memory implementation.

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::info;

use crate::event::{AuditEvent, EventType};

/// Default result bound for audit queries.
pub const DEFAULT_QUERY_LIMIT: usize = 100;

/// Filters for querying recorded events. All filters are conjunctive.
#[derive(Debug, Clone, Default)]
pub struct AuditQuery {
    pub user_id: Option<String>,
    pub resource_type: Option<String>,
    pub resource_id: Option<String>,
    pub event_type: Option<EventType>,
    /// Result bound; [`DEFAULT_QUERY_LIMIT`] when unset.
    pub limit: Option<usize>,
}

/// An append-only audit log.
///
/// Recording is best-effort from the caller's perspective: an
/// implementation must never fail or block the surrounding request —
/// backend failures are swallowed and logged, not propagated.
#[async_trait]
pub trait AuditSink: Send + Sync {
    /// Append an event to the log.
    async fn record(&self, event: AuditEvent) -> AuditEvent;

    /// Query recorded events, most recent first, bounded by the limit.
    async fn query(&self, query: &AuditQuery) -> Vec<AuditEvent>;
}

/// In-memory audit log.
///
/// Holds events in process memory; a persistent backend satisfies the same
/// [`AuditSink`] contract without touching callers.
#[derive(Debug, Default)]
pub struct InMemoryAuditLog {
    events: RwLock<Vec<AuditEvent>>,
}

impl InMemoryAuditLog {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AuditSink for InMemoryAuditLog {
    async fn record(&self, event: AuditEvent) -> AuditEvent {
        info!(
            event_type = %event.event_type,
            action = %event.action,
            user = event.user_email.as_deref().unwrap_or("-"),
            "audit"
        );
        self.events.write().await.push(event.clone());
        event
    }

    async fn query(&self, query: &AuditQuery) -> Vec<AuditEvent> {
        let events = self.events.read().await;
        let mut matched: Vec<AuditEvent> = events
            .iter()
            .filter(|e| {
                query
                    .user_id
                    .as_ref()
                    .is_none_or(|id| e.user_id.as_ref() == Some(id))
                    && query
                        .resource_type
                        .as_ref()
                        .is_none_or(|t| e.resource_type.as_ref() == Some(t))
                    && query
                        .resource_id
                        .as_ref()
                        .is_none_or(|id| e.resource_id.as_ref() == Some(id))
                    && query.event_type.is_none_or(|t| e.event_type == t)
            })
            .cloned()
            .collect();
        matched.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        matched.truncate(query.limit.unwrap_or(DEFAULT_QUERY_LIMIT));
        matched
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn login(user: &str) -> AuditEvent {
        AuditEvent::new(EventType::UserLogin, "logged in").with_user(user, None)
    }

    #[tokio::test]
    async fn record_returns_the_stored_event() {
        let log = InMemoryAuditLog::new();
        let event = log.record(login("user-1")).await;
        let found = log.query(&AuditQuery::default()).await;
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, event.id);
    }

    #[tokio::test]
    async fn filters_compose_conjunctively() {
        let log = InMemoryAuditLog::new();
        log.record(login("user-1")).await;
        log.record(login("user-2")).await;
        log.record(
            AuditEvent::new(EventType::DocumentViewed, "viewed")
                .with_user("user-1", None)
                .with_resource("document", "doc-1"),
        )
        .await;

        let by_user = log
            .query(&AuditQuery {
                user_id: Some("user-1".to_string()),
                ..AuditQuery::default()
            })
            .await;
        assert_eq!(by_user.len(), 2);

        let by_user_and_type = log
            .query(&AuditQuery {
                user_id: Some("user-1".to_string()),
                event_type: Some(EventType::DocumentViewed),
                ..AuditQuery::default()
            })
            .await;
        assert_eq!(by_user_and_type.len(), 1);
        assert_eq!(by_user_and_type[0].resource_id.as_deref(), Some("doc-1"));
    }

    #[tokio::test]
    async fn query_is_most_recent_first_and_bounded() {
        let log = InMemoryAuditLog::new();
        for i in 0..5 {
            let mut event = login("user-1");
            // Force a strict ordering regardless of clock granularity.
            event.timestamp += chrono::Duration::seconds(i);
            log.record(event).await;
        }

        let limited = log
            .query(&AuditQuery {
                limit: Some(3),
                ..AuditQuery::default()
            })
            .await;
        assert_eq!(limited.len(), 3);
        assert!(limited[0].timestamp > limited[1].timestamp);
        assert!(limited[1].timestamp > limited[2].timestamp);
    }

    #[tokio::test]
    async fn unfiltered_query_uses_default_limit() {
        let log = InMemoryAuditLog::new();
        for _ in 0..(DEFAULT_QUERY_LIMIT + 10) {
            log.record(login("user-1")).await;
        }
        let all = log.query(&AuditQuery::default()).await;
        assert_eq!(all.len(), DEFAULT_QUERY_LIMIT);
    }
}
