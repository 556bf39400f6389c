//! # Dispatchify
//!
//! **Dispatchify** is a channel-agnostic notification dispatch engine:
//! given a notification, it validates it, routes it to the sender
//! registered for its channel, executes that sender under a configurable
//! retry policy, and publishes the outcome to registered listeners —
//! synchronously or asynchronously, singly or in batch.
//!
//! ## Overview
//!
//! - **[`Notification`]**: an immutable value sharing a common envelope
//!   (id, timestamp, recipient, message, metadata) across a closed set of
//!   channels (email, SMS, push), each with its own payload and validation.
//! - **[`NotificationSender`]**: the pluggable delivery capability, one
//!   implementation per channel per provider.
//! - **[`SenderRegistry`]**: the dispatch table mapping each channel to its
//!   sender; built once at service construction, read-only afterwards.
//! - **[`RetryPolicy`]**: bounded in-process retries with fixed or
//!   exponential-backoff delays and a configurable retry predicate.
//! - **[`NotificationService`]**: the facade coordinating
//!   validate → lookup → retry-wrapped send → publish.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use dispatchify::prelude::*;
//! use std::time::Duration;
//!
//! # async fn example() -> DispatchResult<()> {
//! let email_config = ProviderConfig::new()
//!     .with_api_key("SG.fake-sendgrid-key")
//!     .with_property("fromEmail", "noreply@myapp.com");
//!
//! let mut service = NotificationService::builder()
//!     .register_sender(SendGridEmailSender::new(email_config)?)
//!     .retry_policy(RetryPolicy::fixed(3, Duration::from_secs(1)))
//!     .add_listener(|n, r| tracing::info!("{} → {:?}", n.channel(), r.status()))
//!     .build()?;
//!
//! let result = service
//!     .send(&Notification::new(
//!         "user@example.com",
//!         "Thanks for signing up.",
//!         EmailPayload::new("Welcome!"),
//!     ))
//!     .await?;
//!
//! assert!(result.is_successful());
//! service.close();
//! # Ok(())
//! # }
//! ```
//!
//! The simulated provider senders ([`SendGridEmailSender`],
//! [`TwilioSmsSender`], [`FirebasePushSender`], …) log the equivalent API
//! exchange instead of performing network I/O; swap in your own
//! [`NotificationSender`] implementations for real delivery.

pub mod channel;
mod config;
mod error;
mod event;
mod notification;
mod pool;
mod registry;
mod result;
mod retry;
mod sender;
mod service;
mod template;

pub mod prelude;

// Re-export core types
pub use channel::{
    ApnsPushSender, Attachment, EmailPayload, FirebasePushSender, MailgunEmailSender,
    NexmoSmsSender, Priority, PushPayload, SendGridEmailSender, SmsPayload, TwilioSmsSender,
};
pub use config::ProviderConfig;
pub use error::{DeliveryError, DeliveryResult, DispatchResult, NotificationError};
pub use event::{DefaultEventPublisher, NotificationEventPublisher, NotificationListener};
pub use notification::{ChannelPayload, ChannelType, Notification};
pub use pool::WorkerPool;
pub use registry::SenderRegistry;
pub use result::{NotificationResult, Status};
pub use retry::{RetryPolicy, Strategy};
pub use sender::NotificationSender;
pub use service::{NotificationService, NotificationServiceBuilder};
pub use template::MessageTemplate;

// Re-export async-trait for convenience
pub use async_trait::async_trait;
