//! Error types for the Dispatchify engine.

use thiserror::Error;

use crate::notification::ChannelType;
use crate::result::NotificationResult;

/// Root error type for dispatch operations.
#[derive(Error, Debug)]
pub enum NotificationError {
    /// A notification failed pre-send validation. Carries the offending
    /// field so callers can surface precise feedback. Never retried.
    #[error("validation failed for field `{field}`: {message}")]
    Validation { field: String, message: String },

    /// No sender is registered for the notification's channel.
    /// Structural, never retried.
    #[error("no sender registered for channel {0}. Register one via NotificationService::builder().register_sender(…)")]
    SenderNotRegistered(ChannelType),

    /// A provider-level delivery failure, eligible for retry.
    #[error(transparent)]
    Delivery(#[from] DeliveryError),

    /// An async send task was aborted or panicked before producing a result.
    #[error("send task aborted: {0}")]
    Interrupted(String),

    /// Service or provider configuration error.
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl NotificationError {
    /// Shorthand for a validation failure on a named field.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        NotificationError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// The field that failed validation, when this is a validation error.
    pub fn field(&self) -> Option<&str> {
        match self {
            NotificationError::Validation { field, .. } => Some(field),
            _ => None,
        }
    }
}

/// A provider accepted the request but delivery failed (network error,
/// rate limit, invalid credentials, …).
#[derive(Error, Debug, Clone)]
#[error("[{provider}] {message}")]
pub struct DeliveryError {
    /// Name of the provider that failed.
    pub provider: String,
    /// Human-readable failure description.
    pub message: String,
    /// Upstream HTTP status code, when one was observed.
    pub status_code: Option<u16>,
}

impl DeliveryError {
    pub fn new(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            message: message.into(),
            status_code: None,
        }
    }

    /// Attach the upstream HTTP status code.
    pub fn with_status(mut self, status_code: u16) -> Self {
        self.status_code = Some(status_code);
        self
    }
}

/// Result type alias for dispatch operations.
pub type DispatchResult<T> = Result<T, NotificationError>;

/// Result type alias for a single provider send attempt.
pub type DeliveryResult = Result<NotificationResult, DeliveryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_carries_field() {
        let err = NotificationError::validation("recipient", "Email recipient is required");
        assert_eq!(err.field(), Some("recipient"));
        let msg = format!("{}", err);
        assert!(msg.contains("recipient"));
        assert!(msg.contains("required"));
    }

    #[test]
    fn test_delivery_error_display() {
        let err = DeliveryError::new("SendGrid", "rate limited").with_status(429);
        assert_eq!(format!("{}", err), "[SendGrid] rate limited");
        assert_eq!(err.status_code, Some(429));
    }

    #[test]
    fn test_sender_not_registered_display() {
        let err = NotificationError::SenderNotRegistered(ChannelType::Push);
        assert!(format!("{}", err).contains("PUSH"));
    }

    #[test]
    fn test_delivery_error_converts_to_root() {
        let root: NotificationError = DeliveryError::new("Twilio", "timeout").into();
        assert!(matches!(root, NotificationError::Delivery(_)));
    }
}
