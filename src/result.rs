//! Immutable value describing the outcome of a send attempt.

use chrono::{DateTime, Utc};

/// Outcome of a single send attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// The provider accepted and delivered the message.
    Sent,
    /// The provider accepted the message; delivery is pending.
    Queued,
    /// The send attempt failed.
    Failed,
}

/// Immutable result of a notification send attempt.
///
/// Use [`NotificationResult::is_successful`] for a quick check, or inspect
/// [`NotificationResult::status`] for finer-grained control.
#[derive(Debug, Clone)]
pub struct NotificationResult {
    notification_id: String,
    status: Status,
    provider_message_id: Option<String>,
    provider_name: String,
    timestamp: DateTime<Utc>,
    error_message: Option<String>,
}

impl NotificationResult {
    /// Result for a delivered message.
    pub fn success(
        notification_id: impl Into<String>,
        provider_name: impl Into<String>,
        provider_message_id: impl Into<String>,
    ) -> Self {
        Self {
            notification_id: notification_id.into(),
            status: Status::Sent,
            provider_message_id: Some(provider_message_id.into()),
            provider_name: provider_name.into(),
            timestamp: Utc::now(),
            error_message: None,
        }
    }

    /// Result for a message the provider accepted but has not delivered yet.
    pub fn queued(
        notification_id: impl Into<String>,
        provider_name: impl Into<String>,
        provider_message_id: impl Into<String>,
    ) -> Self {
        Self {
            notification_id: notification_id.into(),
            status: Status::Queued,
            provider_message_id: Some(provider_message_id.into()),
            provider_name: provider_name.into(),
            timestamp: Utc::now(),
            error_message: None,
        }
    }

    /// Result for a failed attempt.
    pub fn failure(
        notification_id: impl Into<String>,
        provider_name: impl Into<String>,
        error_message: impl Into<String>,
    ) -> Self {
        Self {
            notification_id: notification_id.into(),
            status: Status::Failed,
            provider_message_id: None,
            provider_name: provider_name.into(),
            timestamp: Utc::now(),
            error_message: Some(error_message.into()),
        }
    }

    /// ID of the originating notification.
    pub fn notification_id(&self) -> &str {
        &self.notification_id
    }

    pub fn status(&self) -> Status {
        self.status
    }

    /// Provider-assigned message identifier (e.g. SendGrid message-id,
    /// Twilio SID). `None` on failure.
    pub fn provider_message_id(&self) -> Option<&str> {
        self.provider_message_id.as_deref()
    }

    /// Name of the provider that processed the request.
    pub fn provider_name(&self) -> &str {
        &self.provider_name
    }

    /// When this result was created.
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Human-readable error description; `None` on success.
    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    /// `true` when status is [`Status::Sent`] or [`Status::Queued`].
    pub fn is_successful(&self) -> bool {
        matches!(self.status, Status::Sent | Status::Queued)
    }
}
