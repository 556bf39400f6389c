//! The email channel: payload, validation, and simulated senders.

use std::sync::LazyLock;

use async_trait::async_trait;
use regex::Regex;
use tracing::info;
use uuid::Uuid;

use crate::config::ProviderConfig;
use crate::error::{DeliveryError, DeliveryResult, DispatchResult, NotificationError};
use crate::notification::{ChannelPayload, ChannelType, Notification};
use crate::result::NotificationResult;
use crate::sender::NotificationSender;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\w.%+-]+@[\w.-]+\.[a-zA-Z]{2,}$").unwrap());

/// An email file attachment.
#[derive(Clone)]
pub struct Attachment {
    pub filename: String,
    pub content_type: String,
    pub content: Vec<u8>,
}

impl Attachment {
    pub fn new(
        filename: impl Into<String>,
        content_type: impl Into<String>,
        content: Vec<u8>,
    ) -> Self {
        Self {
            filename: filename.into(),
            content_type: content_type.into(),
            content,
        }
    }
}

impl std::fmt::Debug for Attachment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Attachment")
            .field("filename", &self.filename)
            .field("content_type", &self.content_type)
            .field("content_len", &self.content.len())
            .finish()
    }
}

/// Email-specific fields.
///
/// ```rust
/// use dispatchify::{EmailPayload, Notification};
///
/// let email = Notification::new(
///     "user@example.com",
///     "Thanks for signing up.",
///     EmailPayload::new("Welcome!")
///         .with_from("noreply@myapp.com")
///         .with_html_body("<h1>Welcome!</h1>")
///         .with_cc("manager@example.com"),
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct EmailPayload {
    /// Sender address. Falls back to the provider's `fromEmail` setting.
    pub from: Option<String>,
    /// Subject line.
    pub subject: String,
    /// Optional HTML body. When present, providers send a multipart message.
    pub html_body: Option<String>,
    /// Carbon-copy recipients.
    pub cc: Vec<String>,
    /// Blind carbon-copy recipients.
    pub bcc: Vec<String>,
    /// File attachments.
    pub attachments: Vec<Attachment>,
    /// Reply-to address.
    pub reply_to: Option<String>,
}

impl EmailPayload {
    pub fn new(subject: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            ..Self::default()
        }
    }

    pub fn with_from(mut self, from: impl Into<String>) -> Self {
        self.from = Some(from.into());
        self
    }

    pub fn with_html_body(mut self, html_body: impl Into<String>) -> Self {
        self.html_body = Some(html_body.into());
        self
    }

    pub fn with_cc(mut self, cc: impl Into<String>) -> Self {
        self.cc.push(cc.into());
        self
    }

    pub fn with_bcc(mut self, bcc: impl Into<String>) -> Self {
        self.bcc.push(bcc.into());
        self
    }

    pub fn with_attachment(mut self, attachment: Attachment) -> Self {
        self.attachments.push(attachment);
        self
    }

    pub fn with_reply_to(mut self, reply_to: impl Into<String>) -> Self {
        self.reply_to = Some(reply_to.into());
        self
    }

    pub(crate) fn validate(&self, recipient: &str, message: &str) -> DispatchResult<()> {
        require_non_blank("recipient", recipient, "Email recipient is required")?;
        require_valid_email("recipient", recipient)?;

        require_non_blank("subject", &self.subject, "Email subject is required")?;

        let html_blank = self
            .html_body
            .as_deref()
            .map_or(true, |b| b.trim().is_empty());
        if message.trim().is_empty() && html_blank {
            return Err(NotificationError::validation(
                "message",
                "Either a plain-text message or an HTML body is required",
            ));
        }

        if let Some(from) = self.from.as_deref().filter(|f| !f.trim().is_empty()) {
            require_valid_email("from", from)?;
        }
        if let Some(reply_to) = self.reply_to.as_deref().filter(|r| !r.trim().is_empty()) {
            require_valid_email("replyTo", reply_to)?;
        }
        for addr in &self.cc {
            require_valid_email("cc", addr)?;
        }
        for addr in &self.bcc {
            require_valid_email("bcc", addr)?;
        }
        Ok(())
    }
}

fn require_non_blank(field: &str, value: &str, message: &str) -> DispatchResult<()> {
    if value.trim().is_empty() {
        return Err(NotificationError::validation(field, message));
    }
    Ok(())
}

fn require_valid_email(field: &str, email: &str) -> DispatchResult<()> {
    if !EMAIL_RE.is_match(email) {
        return Err(NotificationError::validation(
            field,
            format!("Invalid email format: {email}"),
        ));
    }
    Ok(())
}

fn email_payload<'a>(
    notification: &'a Notification,
    provider: &str,
) -> Result<&'a EmailPayload, DeliveryError> {
    match notification.payload() {
        ChannelPayload::Email(email) => Ok(email),
        other => Err(DeliveryError::new(
            provider,
            format!("unsupported channel {}", other.channel()),
        )),
    }
}

/// Simulated [SendGrid v3 Mail Send](https://docs.sendgrid.com/api-reference/mail-send/mail-send)
/// email sender.
///
/// Required configuration: `api_key` (starts with `SG.`) and the
/// `fromEmail` property as the default sender address. Logs the equivalent
/// `POST /v3/mail/send` exchange and returns a 202-style success result
/// with a synthetic `X-Message-Id`.
pub struct SendGridEmailSender {
    config: ProviderConfig,
}

impl SendGridEmailSender {
    pub fn new(config: ProviderConfig) -> DispatchResult<Self> {
        config.required_api_key("SendGrid")?;
        Ok(Self { config })
    }

    fn from_address(&self, email: &EmailPayload) -> Result<String, DeliveryError> {
        email
            .from
            .clone()
            .or_else(|| self.config.property("fromEmail").map(str::to_string))
            .ok_or_else(|| {
                DeliveryError::new(
                    "SendGrid",
                    "no sender address: set `from` on the email or the fromEmail property",
                )
            })
    }
}

#[async_trait]
impl NotificationSender for SendGridEmailSender {
    async fn send(&self, notification: &Notification) -> DeliveryResult {
        let email = email_payload(notification, self.provider_name())?;
        let from = self.from_address(email)?;

        // Simulate: POST https://api.sendgrid.com/v3/mail/send
        //           Authorization: Bearer <apiKey>
        // Response: 202 Accepted, header X-Message-Id
        info!(
            "[SendGrid] POST /v3/mail/send — from={}, to={}, subject=\"{}\"",
            from,
            notification.recipient(),
            email.subject
        );
        if !email.cc.is_empty() {
            info!("[SendGrid]   cc={:?}", email.cc);
        }
        if !email.attachments.is_empty() {
            info!("[SendGrid]   attachments={}", email.attachments.len());
        }

        let message_id = Uuid::new_v4().simple().to_string();
        let x_message_id = format!("{}.filter0001.12345.ABCDE", &message_id[..24]);

        info!("[SendGrid] 202 Accepted — X-Message-Id: {}", x_message_id);

        Ok(NotificationResult::success(
            notification.id(),
            self.provider_name(),
            x_message_id,
        ))
    }

    fn channel(&self) -> ChannelType {
        ChannelType::Email
    }

    fn provider_name(&self) -> &str {
        "SendGrid"
    }
}

/// Simulated [Mailgun Messages API](https://documentation.mailgun.com/en/latest/api-sending-messages.html)
/// email sender.
///
/// Required configuration: `api_key`, the `domain` property (sending
/// domain, e.g. `mg.example.com`) and the `fromEmail` property.
pub struct MailgunEmailSender {
    config: ProviderConfig,
    domain: String,
}

impl MailgunEmailSender {
    pub fn new(config: ProviderConfig) -> DispatchResult<Self> {
        config.required_api_key("Mailgun")?;
        let domain = config.required_property("domain")?.to_string();
        Ok(Self { config, domain })
    }
}

#[async_trait]
impl NotificationSender for MailgunEmailSender {
    async fn send(&self, notification: &Notification) -> DeliveryResult {
        let email = email_payload(notification, self.provider_name())?;
        let from = email
            .from
            .clone()
            .or_else(|| self.config.property("fromEmail").map(str::to_string))
            .ok_or_else(|| {
                DeliveryError::new(
                    self.provider_name(),
                    "no sender address: set `from` on the email or the fromEmail property",
                )
            })?;

        // Simulate: POST https://api.mailgun.net/v3/{domain}/messages
        //           Basic api:{apiKey}
        // Response: 200 OK, { "id": "<message-id@domain>", "message": "Queued. Thank you." }
        info!(
            "[Mailgun] POST /v3/{}/messages — from={}, to={}, subject=\"{}\"",
            self.domain,
            from,
            notification.recipient(),
            email.subject
        );

        let message_id = format!(
            "<{}@{}>",
            &Uuid::new_v4().simple().to_string()[..20],
            self.domain
        );

        info!(
            "[Mailgun] 200 OK — id={}, message=\"Queued. Thank you.\"",
            message_id
        );

        Ok(NotificationResult::queued(
            notification.id(),
            self.provider_name(),
            message_id,
        ))
    }

    fn channel(&self) -> ChannelType {
        ChannelType::Email
    }

    fn provider_name(&self) -> &str {
        "Mailgun"
    }
}
