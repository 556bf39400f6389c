//! Channel-specific payloads and their simulated provider senders.

pub mod email;
pub mod push;
pub mod sms;

pub use email::{Attachment, EmailPayload, MailgunEmailSender, SendGridEmailSender};
pub use push::{ApnsPushSender, FirebasePushSender, Priority, PushPayload};
pub use sms::{NexmoSmsSender, SmsPayload, TwilioSmsSender};

/// Shortens log excerpts of message bodies and device tokens.
pub(crate) fn truncate(value: &str, max_chars: usize) -> String {
    if value.chars().count() > max_chars {
        let cut: String = value.chars().take(max_chars).collect();
        format!("{cut}…")
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::truncate;

    #[test]
    fn test_truncate_marks_shortened_values() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("0123456789ab", 10), "0123456789…");
    }

    #[test]
    fn test_truncate_counts_chars_not_bytes() {
        assert_eq!(truncate("ééééé", 5), "ééééé");
        assert_eq!(truncate("éééééé", 5), "ééééé…");
    }
}
