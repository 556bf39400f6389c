//! Integration tests for Dispatchify
//!
//! These tests exercise the full dispatch path — validation, registry
//! lookup, retries, and listener fan-out — through the simulated
//! provider senders.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use dispatchify::prelude::*;

// =============================================================================
// Test fixtures
// =============================================================================

fn email_config() -> ProviderConfig {
    ProviderConfig::new()
        .with_api_key("SG.fake-sendgrid-key")
        .with_property("fromEmail", "noreply@myapp.com")
        .with_property("fromName", "MyApp")
}

fn sms_config() -> ProviderConfig {
    ProviderConfig::new()
        .with_api_key("AC_fake_twilio_sid")
        .with_api_secret("fake_twilio_auth_token")
        .with_property("fromNumber", "+15551234567")
}

fn push_config() -> ProviderConfig {
    ProviderConfig::new()
        .with_api_key("fake-firebase-server-key")
        .with_property("projectId", "myapp-12345")
}

fn full_service() -> NotificationService {
    NotificationService::builder()
        .register_sender(SendGridEmailSender::new(email_config()).unwrap())
        .register_sender(TwilioSmsSender::new(sms_config()).unwrap())
        .register_sender(FirebasePushSender::new(push_config()).unwrap())
        .build()
        .unwrap()
}

/// A sender that fails with a delivery error until the given attempt.
struct FlakySender {
    channel: ChannelType,
    succeed_on: u32,
    attempts: Arc<AtomicU32>,
}

impl FlakySender {
    fn new(channel: ChannelType, succeed_on: u32) -> Self {
        Self {
            channel,
            succeed_on,
            attempts: Arc::new(AtomicU32::new(0)),
        }
    }
}

#[async_trait]
impl NotificationSender for FlakySender {
    async fn send(&self, notification: &Notification) -> DeliveryResult {
        let attempt = self.attempts.fetch_add(1, Ordering::SeqCst) + 1;
        if attempt < self.succeed_on {
            Err(DeliveryError::new("Flaky", "connection reset").with_status(503))
        } else {
            Ok(NotificationResult::success(
                notification.id(),
                "Flaky",
                format!("ok-{attempt}"),
            ))
        }
    }

    fn channel(&self) -> ChannelType {
        self.channel
    }

    fn provider_name(&self) -> &str {
        "Flaky"
    }
}

// =============================================================================
// End-to-end dispatch through simulated providers
// =============================================================================

#[tokio::test]
async fn test_sends_one_of_each_channel() {
    let mut service = full_service();

    let email = Notification::new(
        "alice@example.com",
        "Thanks for signing up, Alice.",
        EmailPayload::new("Welcome to MyApp!").with_html_body("<h1>Welcome!</h1>"),
    );
    let sms = Notification::new("+50688881234", "Your code is 483920", SmsPayload::new());
    let push = Notification::new(
        "dJx8kL3-device-token",
        "You have a new order!",
        PushPayload::new("New message")
            .with_datum("orderId", "ORD-12345")
            .with_priority(Priority::High),
    );

    let email_result = service.send(&email).await.unwrap();
    assert_eq!(email_result.status(), Status::Sent);
    assert_eq!(email_result.provider_name(), "SendGrid");

    let sms_result = service.send(&sms).await.unwrap();
    assert_eq!(sms_result.status(), Status::Queued);
    assert!(sms_result.provider_message_id().unwrap().starts_with("SM"));

    let push_result = service.send(&push).await.unwrap();
    assert_eq!(push_result.status(), Status::Sent);
    assert_eq!(push_result.notification_id(), push.id());

    service.close();
}

#[tokio::test]
async fn test_replacing_a_sender_takes_the_last_registration() {
    let mailgun_config = ProviderConfig::new()
        .with_api_key("key-fake")
        .with_property("domain", "mg.myapp.com")
        .with_property("fromEmail", "noreply@myapp.com");

    // Mailgun registered after SendGrid wins the email channel.
    let service = NotificationService::builder()
        .register_sender(SendGridEmailSender::new(email_config()).unwrap())
        .register_sender(MailgunEmailSender::new(mailgun_config).unwrap())
        .build()
        .unwrap();

    let email = Notification::new("bob@example.com", "Hi", EmailPayload::new("Subject"));
    let result = service.send(&email).await.unwrap();

    assert_eq!(result.provider_name(), "Mailgun");
    assert_eq!(result.status(), Status::Queued);
}

// =============================================================================
// Retry behaviour
// =============================================================================

#[tokio::test]
async fn test_retries_recover_a_flaky_provider() {
    let flaky = FlakySender::new(ChannelType::Sms, 3);
    let attempts = Arc::clone(&flaky.attempts);

    let service = NotificationService::builder()
        .register_sender(flaky)
        .retry_policy(RetryPolicy::exponential_backoff(4, Duration::from_millis(1)))
        .build()
        .unwrap();

    let sms = Notification::new("+50688881234", "Test", SmsPayload::new());
    let result = service.send(&sms).await.unwrap();

    assert!(result.is_successful());
    assert_eq!(attempts.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_exhausted_retries_propagate_the_delivery_error() {
    let flaky = FlakySender::new(ChannelType::Sms, 10);

    let service = NotificationService::builder()
        .register_sender(flaky)
        .retry_policy(RetryPolicy::fixed(2, Duration::from_millis(1)))
        .build()
        .unwrap();

    let sms = Notification::new("+50688881234", "Test", SmsPayload::new());
    let err = service.send(&sms).await.unwrap_err();

    match err {
        NotificationError::Delivery(delivery) => {
            assert_eq!(delivery.provider, "Flaky");
            assert_eq!(delivery.status_code, Some(503));
        }
        other => panic!("expected delivery error, got {other}"),
    }
}

// =============================================================================
// Batch and async paths
// =============================================================================

#[tokio::test]
async fn test_batch_mixes_successes_and_failures() {
    let service = full_service();

    let notifications = vec![
        Notification::new("carol@example.com", "Hi Carol", EmailPayload::new("Hello")),
        // Invalid: bad phone number, downgraded to a failed result.
        Notification::new("not-a-phone", "Hi", SmsPayload::new()),
        Notification::new("+50688881234", "Hi", SmsPayload::new()),
    ];

    let results = service.send_all(&notifications).await;

    assert_eq!(results.len(), 3);
    assert!(results[0].is_successful());
    assert_eq!(results[1].status(), Status::Failed);
    assert!(results[1].error_message().unwrap().contains("recipient"));
    assert!(results[2].is_successful());
}

#[tokio::test]
async fn test_async_fanout_keeps_input_order() {
    let service = full_service();

    let notifications = vec![
        Notification::new("dave@example.com", "Hi Dave", EmailPayload::new("Hello")),
        Notification::new("+50688881234", "Hi", SmsPayload::new()),
        Notification::new("token-1", "Body", PushPayload::new("Title")),
    ];
    let ids: Vec<String> = notifications.iter().map(|n| n.id().to_string()).collect();

    let results = service.send_all_async(notifications).await.unwrap();

    let result_ids: Vec<&str> = results.iter().map(|r| r.notification_id()).collect();
    assert_eq!(result_ids, ids.iter().map(String::as_str).collect::<Vec<_>>());
    assert!(results.iter().all(|r| r.is_successful()));
}

#[tokio::test]
async fn test_async_single_send() {
    let service = full_service();

    let email = Notification::new("erin@example.com", "Hi", EmailPayload::new("Hello"));
    let result = service.send_async(email).await.unwrap().unwrap();

    assert!(result.is_successful());
}

#[tokio::test]
async fn test_aborted_send_task_fails_with_interrupted() {
    struct PanickySender;

    #[async_trait]
    impl NotificationSender for PanickySender {
        async fn send(&self, _notification: &Notification) -> DeliveryResult {
            panic!("provider client crashed");
        }

        fn channel(&self) -> ChannelType {
            ChannelType::Sms
        }

        fn provider_name(&self) -> &str {
            "Panicky"
        }
    }

    let service = NotificationService::builder()
        .register_sender(PanickySender)
        .build()
        .unwrap();

    let sms = Notification::new("+50688881234", "Hi", SmsPayload::new());
    let err = service.send_all_async(vec![sms]).await.unwrap_err();

    assert!(matches!(err, NotificationError::Interrupted(_)));
}

#[tokio::test]
async fn test_service_on_a_shared_runtime() {
    let pool = WorkerPool::from_handle(tokio::runtime::Handle::current());
    let mut service = NotificationService::builder()
        .register_sender(TwilioSmsSender::new(sms_config()).unwrap())
        .worker_pool(pool)
        .build()
        .unwrap();

    let sms = Notification::new("+50688881234", "Hi", SmsPayload::new());
    let result = service.send_async(sms).await.unwrap().unwrap();
    assert_eq!(result.status(), Status::Queued);

    service.close();
}

// =============================================================================
// Listeners
// =============================================================================

#[tokio::test]
async fn test_listeners_observe_every_batch_outcome() {
    let observed = Arc::new(Mutex::new(Vec::new()));
    let observed2 = Arc::clone(&observed);

    let service = NotificationService::builder()
        .register_sender(SendGridEmailSender::new(email_config()).unwrap())
        .add_listener(move |notification, result| {
            observed2
                .lock()
                .unwrap()
                .push((notification.channel(), result.status()));
        })
        .build()
        .unwrap();

    let notifications = vec![
        Notification::new("a@example.com", "one", EmailPayload::new("1")),
        Notification::new("b@example.com", "two", EmailPayload::new("2")),
    ];
    service.send_all(&notifications).await;

    let observed = observed.lock().unwrap();
    assert_eq!(observed.len(), 2);
    assert!(observed
        .iter()
        .all(|(channel, status)| *channel == ChannelType::Email && *status == Status::Sent));
}

#[tokio::test]
async fn test_custom_event_publisher_replaces_default() {
    let count = Arc::new(AtomicU32::new(0));
    let count2 = Arc::clone(&count);

    let publisher = DefaultEventPublisher::with_listeners(vec![Box::new(move |_, _| {
        count2.fetch_add(1, Ordering::SeqCst);
    })]);

    let service = NotificationService::builder()
        .register_sender(SendGridEmailSender::new(email_config()).unwrap())
        .event_publisher(publisher)
        .build()
        .unwrap();

    let email = Notification::new("f@example.com", "Hi", EmailPayload::new("Hello"));
    service.send(&email).await.unwrap();

    assert_eq!(count.load(Ordering::SeqCst), 1);
}

// =============================================================================
// Templating with metadata
// =============================================================================

#[tokio::test]
async fn test_templated_message_through_the_service() {
    let template = MessageTemplate::new("Hello {{name}}, your order {{orderId}} has shipped.");
    let vars = HashMap::from([
        ("name".to_string(), "Grace".to_string()),
        ("orderId".to_string(), "ORD-98765".to_string()),
    ]);

    let service = full_service();
    let email = Notification::new(
        "grace@example.com",
        template.render(&vars),
        EmailPayload::new("Your order shipped"),
    )
    .with_metadata("orderId", "ORD-98765");

    assert_eq!(
        email.message(),
        "Hello Grace, your order ORD-98765 has shipped."
    );
    let result = service.send(&email).await.unwrap();
    assert!(result.is_successful());
}
