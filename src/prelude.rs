//! Prelude module for convenient imports.
//!
//! Re-exports the most commonly used types and traits from Dispatchify
//! for convenient glob imports.
//!
//! # Example
//!
//! ```rust
//! use dispatchify::prelude::*;
//! ```

// Notification model
pub use crate::notification::{ChannelPayload, ChannelType, Notification};
pub use crate::result::{NotificationResult, Status};

// Channel payloads and simulated providers
pub use crate::channel::{
    ApnsPushSender, Attachment, EmailPayload, FirebasePushSender, MailgunEmailSender,
    NexmoSmsSender, Priority, PushPayload, SendGridEmailSender, SmsPayload, TwilioSmsSender,
};

// Dispatch
pub use crate::registry::SenderRegistry;
pub use crate::retry::{RetryPolicy, Strategy};
pub use crate::sender::NotificationSender;
pub use crate::service::{NotificationService, NotificationServiceBuilder};

// Events
pub use crate::event::{DefaultEventPublisher, NotificationEventPublisher, NotificationListener};

// Configuration and templating
pub use crate::config::ProviderConfig;
pub use crate::pool::WorkerPool;
pub use crate::template::MessageTemplate;

// Errors
pub use crate::error::{DeliveryError, DeliveryResult, DispatchResult, NotificationError};

// Re-export async_trait for convenience
pub use async_trait::async_trait;
