//! The delivery-capability trait implemented by provider integrations.
//!
//! Each provider (SendGrid, Twilio, Firebase, …) implements
//! [`NotificationSender`] for the channel it supports. The dispatch service
//! routes to the correct sender by the notification's [`ChannelType`] and
//! treats the call as an opaque, possibly-slow, possibly-failing operation.

use async_trait::async_trait;

use crate::error::DeliveryResult;
use crate::notification::{ChannelType, Notification};

/// Strategy trait for delivering one channel of notification through a
/// provider.
///
/// Implementing a new provider: implement this trait, report the channel it
/// handles from [`NotificationSender::channel`], and register it with
/// `NotificationService::builder().register_sender(…)`.
#[async_trait]
pub trait NotificationSender: Send + Sync {
    /// Delivers the given notification through the provider.
    ///
    /// Returns a result describing the outcome, or a [`DeliveryError`]
    /// on unrecoverable delivery failures.
    ///
    /// [`DeliveryError`]: crate::error::DeliveryError
    async fn send(&self, notification: &Notification) -> DeliveryResult;

    /// The channel this sender handles. Used by the service to build its
    /// dispatch table.
    fn channel(&self) -> ChannelType;

    /// Human-readable provider name (e.g. "SendGrid", "Twilio").
    fn provider_name(&self) -> &str;
}
