//! Mail delivery collaborator.
//!
//! Mail is fire-and-forget: a failed send is logged and never blocks or
//! fails the request that triggered it.

use tracing::{info, warn};

use pantry_core::error::Result;
use pantry_core::UserId;

/// Trait for outbound mail.
pub trait MailSender: Send + Sync {
    /// Send a message.
    fn send(&self, recipient: &UserId, subject: &str, body: &str) -> Result<()>;
}

/// A sender that writes messages to the log instead of a wire.
///
/// Stands in wherever a real transport is not configured.
pub struct LogMailSender {
    sender: String,
}

impl LogMailSender {
    /// Create a log-only sender with the given from-address.
    pub fn new(sender: impl Into<String>) -> Self {
        Self {
            sender: sender.into(),
        }
    }
}

impl MailSender for LogMailSender {
    fn send(&self, recipient: &UserId, subject: &str, body: &str) -> Result<()> {
        info!(
            from = %self.sender,
            to = %recipient,
            subject = %subject,
            body = %body,
            "outbound mail"
        );
        Ok(())
    }
}

/// Send a message, logging any failure instead of propagating it.
pub fn send_or_log(sender: &dyn MailSender, recipient: &UserId, subject: &str, body: &str) {
    if let Err(err) = sender.send(recipient, subject, body) {
        warn!(to = %recipient, error = %err, "mail delivery failed");
    }
}

#[cfg(test)]
mod tests {
    use pantry_core::error::MailError;

    use super::*;

    struct BrokenSender;

    impl MailSender for BrokenSender {
        fn send(&self, _recipient: &UserId, _subject: &str, _body: &str) -> Result<()> {
            Err(MailError::Send("relay refused".into()).into())
        }
    }

    #[test]
    fn test_log_sender_always_succeeds() {
        let sender = LogMailSender::new("no-reply@pantry.local");
        assert!(sender
            .send(&UserId::new("cook@example.com"), "Hello", "Welcome!")
            .is_ok());
    }

    #[test]
    fn test_send_or_log_swallows_failure() {
        send_or_log(
            &BrokenSender,
            &UserId::new("cook@example.com"),
            "Hello",
            "Welcome!",
        );
    }
}
