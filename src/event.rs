//! Publication of send outcomes to registered listeners.
//!
//! Listeners are invoked in registration order with the same
//! (notification, result) pair. A panicking listener is caught and logged
//! so it can never suppress delivery of the event to the remaining
//! listeners, nor propagate back to the sender.

use std::panic::{catch_unwind, AssertUnwindSafe};

use tracing::warn;

use crate::notification::Notification;
use crate::result::NotificationResult;

/// Observer callback invoked after every send attempt, success or failure.
pub type NotificationListener = Box<dyn Fn(&Notification, &NotificationResult) + Send + Sync>;

/// Abstraction for publishing notification outcomes to registered
/// listeners.
///
/// Extracting this from the dispatch service allows alternative publishing
/// strategies (e.g. event-bus backed) to be swapped in without modifying
/// the service itself.
pub trait NotificationEventPublisher: Send + Sync {
    /// Publishes a send outcome to all registered listeners, in
    /// registration order.
    fn publish(&self, notification: &Notification, result: &NotificationResult);

    /// Registers a listener that will observe every send outcome.
    fn add_listener(&mut self, listener: NotificationListener);
}

/// Default synchronous publisher.
///
/// Iterates through all registered listeners, catching and logging any
/// panic a listener raises so that one misbehaving listener cannot prevent
/// others from being notified.
#[derive(Default)]
pub struct DefaultEventPublisher {
    listeners: Vec<NotificationListener>,
}

impl DefaultEventPublisher {
    /// Create a publisher with no listeners.
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
        }
    }

    /// Create a publisher seeded with the given listeners. The vector is
    /// owned by the publisher, so the caller cannot mutate the sequence
    /// afterwards.
    pub fn with_listeners(listeners: Vec<NotificationListener>) -> Self {
        Self { listeners }
    }

    /// Number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl NotificationEventPublisher for DefaultEventPublisher {
    fn publish(&self, notification: &Notification, result: &NotificationResult) {
        for (index, listener) in self.listeners.iter().enumerate() {
            let outcome = catch_unwind(AssertUnwindSafe(|| listener(notification, result)));
            if outcome.is_err() {
                warn!(
                    listener = index,
                    notification_id = notification.id(),
                    "notification listener panicked, skipping"
                );
            }
        }
    }

    fn add_listener(&mut self, listener: NotificationListener) {
        self.listeners.push(listener);
    }
}
