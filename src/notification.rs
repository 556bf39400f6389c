//! The notification value and its channel discriminator.
//!
//! Every notification shares a common envelope — id, creation timestamp,
//! recipient, plain-text message, free-form metadata — and carries one
//! channel-specific payload. The set of channels is closed, so dispatch
//! works by matching on [`ChannelType`] rather than by runtime type.

use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::channel::{EmailPayload, PushPayload, SmsPayload};
use crate::error::DispatchResult;

/// Discriminator for the fixed set of notification channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelType {
    Email,
    Sms,
    Push,
}

impl fmt::Display for ChannelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ChannelType::Email => "EMAIL",
            ChannelType::Sms => "SMS",
            ChannelType::Push => "PUSH",
        };
        f.write_str(s)
    }
}

/// Channel-specific fields of a notification.
#[derive(Debug, Clone)]
pub enum ChannelPayload {
    Email(EmailPayload),
    Sms(SmsPayload),
    Push(PushPayload),
}

impl ChannelPayload {
    /// The channel this payload belongs to.
    pub fn channel(&self) -> ChannelType {
        match self {
            ChannelPayload::Email(_) => ChannelType::Email,
            ChannelPayload::Sms(_) => ChannelType::Sms,
            ChannelPayload::Push(_) => ChannelType::Push,
        }
    }
}

impl From<EmailPayload> for ChannelPayload {
    fn from(payload: EmailPayload) -> Self {
        ChannelPayload::Email(payload)
    }
}

impl From<SmsPayload> for ChannelPayload {
    fn from(payload: SmsPayload) -> Self {
        ChannelPayload::Sms(payload)
    }
}

impl From<PushPayload> for ChannelPayload {
    fn from(payload: PushPayload) -> Self {
        ChannelPayload::Push(payload)
    }
}

/// An immutable notification value.
///
/// # Example
///
/// ```rust
/// use dispatchify::{EmailPayload, Notification};
///
/// let email = Notification::new(
///     "user@example.com",
///     "Thanks for signing up.",
///     EmailPayload::new("Welcome!").with_html_body("<h1>Welcome!</h1>"),
/// )
/// .with_metadata("campaign", "onboarding");
///
/// assert!(email.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct Notification {
    id: String,
    created_at: DateTime<Utc>,
    recipient: String,
    message: String,
    metadata: HashMap<String, String>,
    payload: ChannelPayload,
}

impl Notification {
    /// Create a notification. The id and creation timestamp are generated
    /// here and never change afterwards.
    pub fn new(
        recipient: impl Into<String>,
        message: impl Into<String>,
        payload: impl Into<ChannelPayload>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            created_at: Utc::now(),
            recipient: recipient.into(),
            message: message.into(),
            metadata: HashMap::new(),
            payload: payload.into(),
        }
    }

    /// Attach a metadata entry, forwarded verbatim to the provider.
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Unique identifier, generated on creation.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Timestamp of creation.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Primary recipient address (email, phone number, device token, …).
    pub fn recipient(&self) -> &str {
        &self.recipient
    }

    /// Plain-text message body.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Free-form key/value metadata.
    pub fn metadata(&self) -> &HashMap<String, String> {
        &self.metadata
    }

    /// The channel-specific payload.
    pub fn payload(&self) -> &ChannelPayload {
        &self.payload
    }

    /// The channel this notification is routed through.
    pub fn channel(&self) -> ChannelType {
        self.payload.channel()
    }

    /// Validates that all required fields are present and correctly
    /// formatted, delegating the channel-specific rules to the payload.
    pub fn validate(&self) -> DispatchResult<()> {
        match &self.payload {
            ChannelPayload::Email(email) => email.validate(&self.recipient, &self.message),
            ChannelPayload::Sms(sms) => sms.validate(&self.recipient, &self.message),
            ChannelPayload::Push(push) => push.validate(&self.recipient, &self.message),
        }
    }
}
