// SPDX-FileCopyrightText: 2026 DocFlow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Audit event model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum::{Display, EnumString};
use uuid::Uuid;

/// The closed set of auditable event types, named `<domain>.<action>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
pub enum EventType {
    // Authentication events
    #[serde(rename = "user.login")]
    #[strum(serialize = "user.login")]
    UserLogin,
    #[serde(rename = "user.logout")]
    #[strum(serialize = "user.logout")]
    UserLogout,
    #[serde(rename = "user.login_failed")]
    #[strum(serialize = "user.login_failed")]
    UserLoginFailed,
    #[serde(rename = "user.password_changed")]
    #[strum(serialize = "user.password_changed")]
    PasswordChanged,

    // Document events
    #[serde(rename = "document.created")]
    #[strum(serialize = "document.created")]
    DocumentCreated,
    #[serde(rename = "document.updated")]
    #[strum(serialize = "document.updated")]
    DocumentUpdated,
    #[serde(rename = "document.deleted")]
    #[strum(serialize = "document.deleted")]
    DocumentDeleted,
    #[serde(rename = "document.viewed")]
    #[strum(serialize = "document.viewed")]
    DocumentViewed,
    #[serde(rename = "document.downloaded")]
    #[strum(serialize = "document.downloaded")]
    DocumentDownloaded,
    #[serde(rename = "document.shared")]
    #[strum(serialize = "document.shared")]
    DocumentShared,

    // Employee events
    #[serde(rename = "employee.created")]
    #[strum(serialize = "employee.created")]
    EmployeeCreated,
    #[serde(rename = "employee.updated")]
    #[strum(serialize = "employee.updated")]
    EmployeeUpdated,
    #[serde(rename = "employee.deactivated")]
    #[strum(serialize = "employee.deactivated")]
    EmployeeDeactivated,

    // Category events
    #[serde(rename = "category.created")]
    #[strum(serialize = "category.created")]
    CategoryCreated,
    #[serde(rename = "category.updated")]
    #[strum(serialize = "category.updated")]
    CategoryUpdated,
    #[serde(rename = "category.deleted")]
    #[strum(serialize = "category.deleted")]
    CategoryDeleted,

    // System events
    #[serde(rename = "system.error")]
    #[strum(serialize = "system.error")]
    SystemError,
    #[serde(rename = "system.startup")]
    #[strum(serialize = "system.startup")]
    SystemStartup,
    #[serde(rename = "system.shutdown")]
    #[strum(serialize = "system.shutdown")]
    SystemShutdown,
}

/// A single append-only audit record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEvent {
    /// Unique event identifier.
    pub id: Uuid,
    pub event_type: EventType,
    /// When the event was recorded.
    pub timestamp: DateTime<Utc>,
    /// Acting user, when the action is user-initiated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_email: Option<String>,
    /// Affected resource, when the action targets one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_id: Option<String>,
    /// Human-readable action description.
    pub action: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
    /// Correlation identifier of the request that produced the event.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

impl AuditEvent {
    /// Create an event stamped with a fresh id and the current time.
    pub fn new(event_type: EventType, action: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            event_type,
            timestamp: Utc::now(),
            user_id: None,
            user_email: None,
            resource_type: None,
            resource_id: None,
            action: action.into(),
            details: None,
            ip_address: None,
            user_agent: None,
            request_id: None,
        }
    }

    /// Attach the acting user.
    pub fn with_user(mut self, user_id: impl Into<String>, user_email: Option<String>) -> Self {
        self.user_id = Some(user_id.into());
        self.user_email = user_email;
        self
    }

    /// Attach the affected resource.
    pub fn with_resource(
        mut self,
        resource_type: impl Into<String>,
        resource_id: impl Into<String>,
    ) -> Self {
        self.resource_type = Some(resource_type.into());
        self.resource_id = Some(resource_id.into());
        self
    }

    /// Attach free-form event details.
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Attach client information.
    pub fn with_client(
        mut self,
        ip_address: Option<String>,
        user_agent: Option<String>,
    ) -> Self {
        self.ip_address = ip_address;
        self.user_agent = user_agent;
        self
    }

    /// Attach the correlation identifier of the surrounding request.
    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn event_type_serializes_dotted_names() {
        let json = serde_json::to_string(&EventType::DocumentCreated).unwrap();
        assert_eq!(json, r#""document.created""#);
        assert_eq!(EventType::UserLogin.to_string(), "user.login");
        assert_eq!(
            EventType::from_str("system.shutdown").unwrap(),
            EventType::SystemShutdown
        );
    }

    #[test]
    fn builder_composes_optional_fields() {
        let event = AuditEvent::new(EventType::DocumentViewed, "viewed payroll policy")
            .with_user("user-1", Some("hr@example.com".to_string()))
            .with_resource("document", "doc-9")
            .with_request_id("req-7");

        assert_eq!(event.user_id.as_deref(), Some("user-1"));
        assert_eq!(event.resource_type.as_deref(), Some("document"));
        assert_eq!(event.request_id.as_deref(), Some("req-7"));
        assert!(event.details.is_none());
        assert!(event.ip_address.is_none());
    }

    #[test]
    fn events_get_distinct_ids() {
        let a = AuditEvent::new(EventType::SystemStartup, "start");
        let b = AuditEvent::new(EventType::SystemStartup, "start");
        assert_ne!(a.id, b.id);
    }
}
