//! Registry mapping each channel to its registered sender.
//!
//! The registry is the service's dispatch table: built once during
//! construction, then read-only. Multiple in-flight sends may consult it
//! concurrently without synchronization.

use std::collections::HashMap;
use std::sync::Arc;

use crate::notification::ChannelType;
use crate::sender::NotificationSender;

/// A registry of [`NotificationSender`]s keyed by channel.
///
/// At most one sender per channel; registering a second sender for the
/// same channel replaces the first.
///
/// # Example
///
/// ```rust
/// use dispatchify::{ChannelType, ProviderConfig, SenderRegistry, TwilioSmsSender};
/// use std::sync::Arc;
///
/// let config = ProviderConfig::new()
///     .with_api_key("AC_fake_sid")
///     .with_api_secret("fake_token")
///     .with_property("fromNumber", "+15551234567");
///
/// let mut registry = SenderRegistry::new();
/// registry.register(Arc::new(TwilioSmsSender::new(config).unwrap()));
///
/// assert!(registry.get(ChannelType::Sms).is_some());
/// assert!(registry.get(ChannelType::Email).is_none());
/// ```
#[derive(Default)]
pub struct SenderRegistry {
    senders: HashMap<ChannelType, Arc<dyn NotificationSender>>,
}

impl SenderRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            senders: HashMap::new(),
        }
    }

    /// Register a sender under the channel it reports from
    /// [`NotificationSender::channel`]. Replaces any sender previously
    /// registered for the same channel.
    pub fn register(&mut self, sender: Arc<dyn NotificationSender>) {
        self.senders.insert(sender.channel(), sender);
    }

    /// Look up the sender for a channel.
    pub fn get(&self, channel: ChannelType) -> Option<Arc<dyn NotificationSender>> {
        self.senders.get(&channel).cloned()
    }

    /// Check whether a sender is registered for the channel.
    pub fn contains(&self, channel: ChannelType) -> bool {
        self.senders.contains_key(&channel)
    }

    /// The channels that currently have a sender.
    pub fn channels(&self) -> Vec<ChannelType> {
        self.senders.keys().copied().collect()
    }

    /// Number of registered senders.
    pub fn len(&self) -> usize {
        self.senders.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.senders.is_empty()
    }
}

impl std::fmt::Debug for SenderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let providers: Vec<_> = self
            .senders
            .iter()
            .map(|(channel, sender)| (channel, sender.provider_name()))
            .collect();
        f.debug_struct("SenderRegistry")
            .field("senders", &providers)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    use crate::error::DeliveryResult;
    use crate::notification::Notification;
    use crate::result::NotificationResult;

    struct StubSender {
        channel: ChannelType,
        name: &'static str,
    }

    #[async_trait]
    impl NotificationSender for StubSender {
        async fn send(&self, notification: &Notification) -> DeliveryResult {
            Ok(NotificationResult::success(
                notification.id(),
                self.name,
                "stub-1",
            ))
        }

        fn channel(&self) -> ChannelType {
            self.channel
        }

        fn provider_name(&self) -> &str {
            self.name
        }
    }

    #[test]
    fn test_register_and_get() {
        let mut registry = SenderRegistry::new();
        registry.register(Arc::new(StubSender {
            channel: ChannelType::Email,
            name: "stub-email",
        }));

        assert!(registry.get(ChannelType::Email).is_some());
        assert!(registry.get(ChannelType::Sms).is_none());
        assert!(registry.contains(ChannelType::Email));
        assert_eq!(registry.len(), 1);
        assert!(!registry.is_empty());
    }

    #[test]
    fn test_later_registration_replaces_earlier() {
        let mut registry = SenderRegistry::new();
        registry.register(Arc::new(StubSender {
            channel: ChannelType::Sms,
            name: "first",
        }));
        registry.register(Arc::new(StubSender {
            channel: ChannelType::Sms,
            name: "second",
        }));

        assert_eq!(registry.len(), 1);
        let sender = registry.get(ChannelType::Sms).unwrap();
        assert_eq!(sender.provider_name(), "second");
    }

    #[test]
    fn test_channels() {
        let mut registry = SenderRegistry::new();
        registry.register(Arc::new(StubSender {
            channel: ChannelType::Email,
            name: "e",
        }));
        registry.register(Arc::new(StubSender {
            channel: ChannelType::Push,
            name: "p",
        }));

        let mut channels = registry.channels();
        channels.sort_by_key(|c| c.to_string());
        assert_eq!(channels, vec![ChannelType::Email, ChannelType::Push]);
    }
}
