//! The push channel: payload, validation, and simulated senders.

use std::collections::HashMap;

use async_trait::async_trait;
use tracing::info;
use uuid::Uuid;

use crate::channel::truncate;
use crate::config::ProviderConfig;
use crate::error::{DeliveryError, DeliveryResult, DispatchResult, NotificationError};
use crate::notification::{ChannelPayload, ChannelType, Notification};
use crate::result::NotificationResult;
use crate::sender::NotificationSender;

/// Delivery priority hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Priority {
    #[default]
    Normal,
    High,
}

/// Push-specific fields.
///
/// When the notification's recipient is a device registration token, the
/// message goes to that single device. When [`PushPayload::topic`] is set
/// instead, providers that support topic-based messaging broadcast to all
/// subscribers of that topic.
///
/// ```rust
/// use dispatchify::{Notification, Priority, PushPayload};
///
/// let push = Notification::new(
///     "dJx8kL3-device-token",
///     "You have a new order!",
///     PushPayload::new("New message")
///         .with_datum("orderId", "ORD-12345")
///         .with_priority(Priority::High),
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct PushPayload {
    /// Title displayed in the notification shade.
    pub title: String,
    /// Optional image URL for rich push.
    pub image_url: Option<String>,
    /// Arbitrary custom data payload forwarded to the client app.
    pub data: HashMap<String, String>,
    /// Topic for pub/sub broadcast (FCM topics, APNs channels).
    pub topic: Option<String>,
    /// Delivery priority hint.
    pub priority: Priority,
}

impl PushPayload {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn with_image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }

    pub fn with_datum(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    pub fn with_topic(mut self, topic: impl Into<String>) -> Self {
        self.topic = Some(topic.into());
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub(crate) fn validate(&self, recipient: &str, message: &str) -> DispatchResult<()> {
        let has_token = !recipient.trim().is_empty();
        let has_topic = self
            .topic
            .as_deref()
            .map_or(false, |t| !t.trim().is_empty());

        if !has_token && !has_topic {
            return Err(NotificationError::validation(
                "recipient",
                "Either a device token (recipient) or a topic is required",
            ));
        }
        if self.title.trim().is_empty() {
            return Err(NotificationError::validation(
                "title",
                "Push notification title is required",
            ));
        }
        if message.trim().is_empty() {
            return Err(NotificationError::validation(
                "message",
                "Push notification body is required",
            ));
        }
        Ok(())
    }
}

fn push_payload<'a>(
    notification: &'a Notification,
    provider: &str,
) -> Result<&'a PushPayload, DeliveryError> {
    match notification.payload() {
        ChannelPayload::Push(push) => Ok(push),
        other => Err(DeliveryError::new(
            provider,
            format!("unsupported channel {}", other.channel()),
        )),
    }
}

/// Simulated [Firebase Cloud Messaging HTTP v1](https://firebase.google.com/docs/cloud-messaging/send-message)
/// push sender.
///
/// Required configuration: `api_key` (server key or service-account
/// credentials); the `projectId` property defaults to `default-project`.
pub struct FirebasePushSender {
    project_id: String,
}

impl FirebasePushSender {
    pub fn new(config: ProviderConfig) -> DispatchResult<Self> {
        config.required_api_key("Firebase")?;
        let project_id = config
            .property("projectId")
            .unwrap_or("default-project")
            .to_string();
        Ok(Self { project_id })
    }
}

#[async_trait]
impl NotificationSender for FirebasePushSender {
    async fn send(&self, notification: &Notification) -> DeliveryResult {
        let push = push_payload(notification, self.provider_name())?;

        // Simulate: POST https://fcm.googleapis.com/v1/projects/{projectId}/messages:send
        // Response: 200 OK, { "name": "projects/{projectId}/messages/{messageId}" }
        let target = if !notification.recipient().is_empty() {
            format!("token={}", truncate(notification.recipient(), 12))
        } else {
            format!("topic={}", push.topic.as_deref().unwrap_or(""))
        };

        info!(
            "[FCM] POST /v1/projects/{}/messages:send — {}, title=\"{}\"",
            self.project_id, target, push.title
        );
        if !push.data.is_empty() {
            let keys: Vec<_> = push.data.keys().collect();
            info!("[FCM]   data keys={:?}", keys);
        }

        let message_id = Uuid::new_v4().simple().to_string()[..16].to_string();
        let name = format!("projects/{}/messages/{}", self.project_id, message_id);

        info!("[FCM] 200 OK — name={}", name);

        Ok(NotificationResult::success(
            notification.id(),
            self.provider_name(),
            name,
        ))
    }

    fn channel(&self) -> ChannelType {
        ChannelType::Push
    }

    fn provider_name(&self) -> &str {
        "Firebase Cloud Messaging"
    }
}

/// Simulated [Apple Push Notification service HTTP/2](https://developer.apple.com/documentation/usernotifications/sending-notification-requests-to-apns)
/// sender.
///
/// Required configuration: `api_key` (.p8 key ID or token) and the
/// `bundleId` property (e.g. `com.example.myapp`).
pub struct ApnsPushSender {
    bundle_id: String,
}

impl ApnsPushSender {
    pub fn new(config: ProviderConfig) -> DispatchResult<Self> {
        config.required_api_key("APNs")?;
        let bundle_id = config.required_property("bundleId")?.to_string();
        Ok(Self { bundle_id })
    }
}

#[async_trait]
impl NotificationSender for ApnsPushSender {
    async fn send(&self, notification: &Notification) -> DeliveryResult {
        let push = push_payload(notification, self.provider_name())?;

        // Simulate: POST https://api.push.apple.com/3/device/{deviceToken}
        //           apns-topic: {bundleId}, apns-priority: 10 (HIGH) | 5 (NORMAL)
        // Response: 200 OK, header apns-id: <uuid>
        let apns_priority = match push.priority {
            Priority::High => 10,
            Priority::Normal => 5,
        };

        info!(
            "[APNs] POST /3/device/{} — topic={}, priority={}",
            truncate(notification.recipient(), 12),
            self.bundle_id,
            apns_priority
        );
        info!(
            "[APNs]   alert: title=\"{}\", body=\"{}\"",
            push.title,
            truncate(notification.message(), 40)
        );

        let apns_id = Uuid::new_v4().to_string();

        info!("[APNs] 200 OK — apns-id={}", apns_id);

        Ok(NotificationResult::success(
            notification.id(),
            self.provider_name(),
            apns_id,
        ))
    }

    fn channel(&self) -> ChannelType {
        ChannelType::Push
    }

    fn provider_name(&self) -> &str {
        "Apple Push Notification service"
    }
}
