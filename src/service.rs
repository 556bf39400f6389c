//! Central facade for sending notifications through any registered channel.

use std::sync::Arc;

use futures::future;
use tokio::task::JoinHandle;
use tracing::{debug, error};

use crate::error::{DispatchResult, NotificationError};
use crate::event::{DefaultEventPublisher, NotificationEventPublisher};
use crate::notification::Notification;
use crate::pool::WorkerPool;
use crate::registry::SenderRegistry;
use crate::result::NotificationResult;
use crate::retry::RetryPolicy;
use crate::sender::NotificationSender;

/// Channel-agnostic notification dispatch service.
///
/// The service keeps a dispatch table mapping each [`ChannelType`] to its
/// [`NotificationSender`]. [`NotificationService::send`] validates the
/// notification, routes it by channel, invokes the sender through the
/// configured [`RetryPolicy`], and publishes the outcome to registered
/// listeners.
///
/// # Quick start
///
/// ```rust,no_run
/// use dispatchify::{
///     EmailPayload, Notification, NotificationService, ProviderConfig, RetryPolicy,
///     SendGridEmailSender,
/// };
/// use std::time::Duration;
///
/// # async fn example() -> dispatchify::DispatchResult<()> {
/// let config = ProviderConfig::new()
///     .with_api_key("SG.fake-key")
///     .with_property("fromEmail", "noreply@myapp.com");
///
/// let mut service = NotificationService::builder()
///     .register_sender(SendGridEmailSender::new(config)?)
///     .retry_policy(RetryPolicy::fixed(3, Duration::from_secs(1)))
///     .add_listener(|n, r| println!("{} → {:?}", n.channel(), r.status()))
///     .build()?;
///
/// let result = service
///     .send(&Notification::new(
///         "user@example.com",
///         "Hello!",
///         EmailPayload::new("Welcome"),
///     ))
///     .await?;
///
/// assert!(result.is_successful());
/// service.close();
/// # Ok(())
/// # }
/// ```
///
/// [`ChannelType`]: crate::notification::ChannelType
pub struct NotificationService {
    inner: Arc<ServiceInner>,
    pool: WorkerPool,
}

struct ServiceInner {
    senders: SenderRegistry,
    retry_policy: RetryPolicy,
    event_publisher: Box<dyn NotificationEventPublisher>,
}

impl ServiceInner {
    async fn send(&self, notification: &Notification) -> DispatchResult<NotificationResult> {
        notification.validate()?;

        let channel = notification.channel();
        let sender = self
            .senders
            .get(channel)
            .ok_or(NotificationError::SenderNotRegistered(channel))?;

        debug!(
            channel = %channel,
            provider = sender.provider_name(),
            notification_id = notification.id(),
            "sending notification"
        );

        let result = self
            .retry_policy
            .execute(|| sender.send(notification))
            .await?;

        self.event_publisher.publish(notification, &result);
        Ok(result)
    }
}

impl NotificationService {
    pub fn builder() -> NotificationServiceBuilder {
        NotificationServiceBuilder::new()
    }

    /// Validates and sends a notification through its registered sender.
    ///
    /// Validation and lookup failures propagate immediately without
    /// touching any sender; delivery errors are retried per the configured
    /// policy before propagating. The final (notification, result) pair is
    /// published to listeners before returning.
    pub async fn send(&self, notification: &Notification) -> DispatchResult<NotificationResult> {
        self.inner.send(notification).await
    }

    /// Sends multiple notifications sequentially, collecting all results in
    /// input order.
    ///
    /// A failure in one notification does *not* stop the remaining ones:
    /// any error — validation included — is downgraded to a failed result
    /// carrying the error message.
    pub async fn send_all(&self, notifications: &[Notification]) -> Vec<NotificationResult> {
        let mut results = Vec::with_capacity(notifications.len());
        for notification in notifications {
            match self.inner.send(notification).await {
                Ok(result) => results.push(result),
                Err(e) => {
                    error!(
                        notification_id = notification.id(),
                        error = %e,
                        "failed to send notification"
                    );
                    results.push(NotificationResult::failure(
                        notification.id(),
                        "unknown",
                        e.to_string(),
                    ));
                }
            }
        }
        results
    }

    /// Sends a notification on the worker pool, returning a handle that
    /// completes with the result. Errors — validation included — surface
    /// through the handle rather than being downgraded.
    pub fn send_async(
        &self,
        notification: Notification,
    ) -> JoinHandle<DispatchResult<NotificationResult>> {
        let inner = Arc::clone(&self.inner);
        self.pool
            .spawn(async move { inner.send(&notification).await })
    }

    /// Sends all notifications in parallel on the worker pool and waits for
    /// every one to finish.
    ///
    /// All tasks are submitted before any result is awaited; the returned
    /// sequence is aligned to input order by construction, not by
    /// completion order. Unlike [`NotificationService::send_all`], a
    /// failure in any one send fails the aggregate.
    pub async fn send_all_async(
        &self,
        notifications: Vec<Notification>,
    ) -> DispatchResult<Vec<NotificationResult>> {
        let handles: Vec<_> = notifications
            .into_iter()
            .map(|notification| self.send_async(notification))
            .collect();

        let mut results = Vec::with_capacity(handles.len());
        for outcome in future::join_all(handles).await {
            let result = outcome.map_err(|e| NotificationError::Interrupted(e.to_string()))??;
            results.push(result);
        }
        Ok(results)
    }

    /// Releases the worker pool. Idempotent; async sends submitted after
    /// closing are undefined.
    pub fn close(&mut self) {
        self.pool.close();
    }
}

impl std::fmt::Debug for NotificationService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationService")
            .field("senders", &self.inner.senders)
            .field("retry_policy", &self.inner.retry_policy)
            .field("pool", &self.pool)
            .finish()
    }
}

/// Fluent builder for assembling a [`NotificationService`].
///
/// Collects sender registrations, an optional retry policy (default: one
/// attempt, no retries), optional listeners or a replacement event
/// publisher, and an optional worker pool. [`NotificationServiceBuilder::build`]
/// validates the configuration at a single finalization point.
pub struct NotificationServiceBuilder {
    senders: SenderRegistry,
    retry_policy: Option<RetryPolicy>,
    event_publisher: Box<dyn NotificationEventPublisher>,
    pool: Option<WorkerPool>,
}

impl NotificationServiceBuilder {
    fn new() -> Self {
        Self {
            senders: SenderRegistry::new(),
            retry_policy: None,
            event_publisher: Box::new(DefaultEventPublisher::new()),
            pool: None,
        }
    }

    /// Registers a sender for the channel it reports. A sender previously
    /// registered for the same channel is replaced.
    pub fn register_sender(mut self, sender: impl NotificationSender + 'static) -> Self {
        self.senders.register(Arc::new(sender));
        self
    }

    /// Sets the retry policy applied to every send. Defaults to no retries.
    pub fn retry_policy(mut self, retry_policy: RetryPolicy) -> Self {
        self.retry_policy = Some(retry_policy);
        self
    }

    /// Adds a listener that observes every send outcome. Delegates to the
    /// configured event publisher.
    pub fn add_listener<F>(mut self, listener: F) -> Self
    where
        F: Fn(&Notification, &NotificationResult) + Send + Sync + 'static,
    {
        self.event_publisher.add_listener(Box::new(listener));
        self
    }

    /// Sets a custom event publisher. Replaces the default publisher and
    /// any listeners previously added via
    /// [`NotificationServiceBuilder::add_listener`].
    pub fn event_publisher(mut self, publisher: impl NotificationEventPublisher + 'static) -> Self {
        self.event_publisher = Box::new(publisher);
        self
    }

    /// Provides a custom worker pool for async sends. If not set, the
    /// service creates and owns a dedicated runtime.
    pub fn worker_pool(mut self, pool: WorkerPool) -> Self {
        self.pool = Some(pool);
        self
    }

    /// Builds the service. At least one sender must be registered.
    pub fn build(self) -> DispatchResult<NotificationService> {
        if self.senders.is_empty() {
            return Err(NotificationError::Configuration(
                "at least one notification sender must be registered".into(),
            ));
        }

        let pool = match self.pool {
            Some(pool) => pool,
            None => WorkerPool::new().map_err(|e| {
                NotificationError::Configuration(format!("failed to build worker pool: {e}"))
            })?,
        };

        Ok(NotificationService {
            inner: Arc::new(ServiceInner {
                senders: self.senders,
                retry_policy: self.retry_policy.unwrap_or_default(),
                event_publisher: self.event_publisher,
            }),
            pool,
        })
    }
}
