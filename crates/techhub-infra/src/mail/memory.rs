//! Mailer that keeps messages in memory instead of delivering them.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use techhub_core::ports::{MailError, Mailer, OutgoingEmail};

/// Records every message it is handed.
#[derive(Default)]
pub struct InMemoryMailer {
    outbox: Mutex<Vec<OutgoingEmail>>,
    counter: AtomicUsize,
}

impl InMemoryMailer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages sent so far, oldest first.
    pub async fn sent(&self) -> Vec<OutgoingEmail> {
        self.outbox.lock().await.clone()
    }
}

#[async_trait]
impl Mailer for InMemoryMailer {
    async fn send(&self, email: &OutgoingEmail) -> Result<String, MailError> {
        let n = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
        self.outbox.lock().await.push(email.clone());
        tracing::debug!(to = ?email.to, subject = %email.subject, "Email captured in memory");
        Ok(format!("memory-{n}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_messages_are_recorded_with_ids() {
        let mailer = InMemoryMailer::new();
        let email = OutgoingEmail {
            from: "a@example.com".to_string(),
            to: vec!["b@example.com".to_string()],
            reply_to: None,
            subject: "Hi".to_string(),
            html: "<p>Hi</p>".to_string(),
        };

        assert_eq!(mailer.send(&email).await.unwrap(), "memory-1");
        assert_eq!(mailer.send(&email).await.unwrap(), "memory-2");
        assert_eq!(mailer.sent().await.len(), 2);
    }
}
