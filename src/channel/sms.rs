//! The SMS channel: payload, validation, and simulated senders.

use std::sync::LazyLock;

use async_trait::async_trait;
use regex::Regex;
use tracing::info;
use uuid::Uuid;

use crate::channel::truncate;
use crate::config::ProviderConfig;
use crate::error::{DeliveryError, DeliveryResult, DispatchResult, NotificationError};
use crate::notification::{ChannelPayload, ChannelType, Notification};
use crate::result::NotificationResult;
use crate::sender::NotificationSender;

/// E.164 phone number pattern: optional '+', country code, 7-15 digits.
static PHONE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\+?[1-9]\d{6,14}$").unwrap());

/// Maximum SMS segment length (Twilio concatenated limit).
const MAX_MESSAGE_LENGTH: usize = 1600;

/// SMS-specific fields.
///
/// ```rust
/// use dispatchify::{Notification, SmsPayload};
///
/// let sms = Notification::new(
///     "+50688881234",
///     "Your verification code is 483920",
///     SmsPayload::new().with_from("+15551234567"),
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct SmsPayload {
    /// Sender phone number. Falls back to the provider's `fromNumber`
    /// setting.
    pub from: Option<String>,
}

impl SmsPayload {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_from(mut self, from: impl Into<String>) -> Self {
        self.from = Some(from.into());
        self
    }

    pub(crate) fn validate(&self, recipient: &str, message: &str) -> DispatchResult<()> {
        if recipient.trim().is_empty() {
            return Err(NotificationError::validation(
                "recipient",
                "Phone number is required",
            ));
        }
        if !PHONE_RE.is_match(recipient) {
            return Err(NotificationError::validation(
                "recipient",
                format!("Invalid phone number (expected E.164 format): {recipient}"),
            ));
        }
        if message.trim().is_empty() {
            return Err(NotificationError::validation(
                "message",
                "SMS message body is required",
            ));
        }
        let length = message.chars().count();
        if length > MAX_MESSAGE_LENGTH {
            return Err(NotificationError::validation(
                "message",
                format!("SMS message exceeds {MAX_MESSAGE_LENGTH} character limit ({length} chars)"),
            ));
        }
        Ok(())
    }
}

fn sms_payload<'a>(
    notification: &'a Notification,
    provider: &str,
) -> Result<&'a SmsPayload, DeliveryError> {
    match notification.payload() {
        ChannelPayload::Sms(sms) => Ok(sms),
        other => Err(DeliveryError::new(
            provider,
            format!("unsupported channel {}", other.channel()),
        )),
    }
}

fn from_number(
    sms: &SmsPayload,
    config: &ProviderConfig,
    provider: &str,
) -> Result<String, DeliveryError> {
    sms.from
        .clone()
        .or_else(|| config.property("fromNumber").map(str::to_string))
        .ok_or_else(|| {
            DeliveryError::new(
                provider,
                "no sender number: set `from` on the SMS or the fromNumber property",
            )
        })
}

/// Simulated [Twilio Messages API](https://www.twilio.com/docs/sms/api/message-resource#create-a-message-resource)
/// SMS sender.
///
/// Required configuration: `api_key` (Account SID), `api_secret` (Auth
/// Token) and the `fromNumber` property. Returns a queued result carrying
/// a synthetic message SID, matching Twilio's 201 response.
pub struct TwilioSmsSender {
    config: ProviderConfig,
    account_sid: String,
}

impl TwilioSmsSender {
    pub fn new(config: ProviderConfig) -> DispatchResult<Self> {
        let account_sid = config.required_api_key("Twilio")?.to_string();
        config.required_api_secret("Twilio")?;
        Ok(Self {
            config,
            account_sid,
        })
    }
}

#[async_trait]
impl NotificationSender for TwilioSmsSender {
    async fn send(&self, notification: &Notification) -> DeliveryResult {
        let sms = sms_payload(notification, self.provider_name())?;
        let from = from_number(sms, &self.config, self.provider_name())?;

        // Simulate: POST /2010-04-01/Accounts/{AccountSid}/Messages.json
        //           Basic {AccountSid}:{AuthToken}
        // Response: 201 Created, { "sid": "SM…", "status": "queued", … }
        info!(
            "[Twilio] POST /2010-04-01/Accounts/{}/Messages.json — from={}, to={}",
            self.account_sid,
            from,
            notification.recipient()
        );
        info!("[Twilio]   body=\"{}\"", truncate(notification.message(), 50));

        let sid = format!("SM{}", Uuid::new_v4().simple());

        info!("[Twilio] 201 Created — sid={}, status=queued", sid);

        Ok(NotificationResult::queued(
            notification.id(),
            self.provider_name(),
            sid,
        ))
    }

    fn channel(&self) -> ChannelType {
        ChannelType::Sms
    }

    fn provider_name(&self) -> &str {
        "Twilio"
    }
}

/// Simulated [Vonage (formerly Nexmo) SMS API](https://developer.vonage.com/en/messaging/sms/overview)
/// sender.
///
/// Required configuration: `api_key`, `api_secret` and the `fromNumber`
/// property (number or alphanumeric ID).
pub struct NexmoSmsSender {
    config: ProviderConfig,
}

impl NexmoSmsSender {
    pub fn new(config: ProviderConfig) -> DispatchResult<Self> {
        config.required_api_key("Vonage")?;
        config.required_api_secret("Vonage")?;
        Ok(Self { config })
    }
}

#[async_trait]
impl NotificationSender for NexmoSmsSender {
    async fn send(&self, notification: &Notification) -> DeliveryResult {
        let sms = sms_payload(notification, self.provider_name())?;
        let from = from_number(sms, &self.config, self.provider_name())?;

        // Simulate: POST https://rest.nexmo.com/sms/json
        // Response: 200 OK, { "messages": [{ "message-id": "…", "status": "0" }] }
        info!(
            "[Vonage] POST /sms/json — from={}, to={}",
            from,
            notification.recipient()
        );

        let message_id = Uuid::new_v4().simple().to_string()[..16].to_string();

        info!("[Vonage] 200 OK — message-id={}, status=0", message_id);

        Ok(NotificationResult::success(
            notification.id(),
            self.provider_name(),
            message_id,
        ))
    }

    fn channel(&self) -> ChannelType {
        ChannelType::Sms
    }

    fn provider_name(&self) -> &str {
        "Vonage (Nexmo)"
    }
}
