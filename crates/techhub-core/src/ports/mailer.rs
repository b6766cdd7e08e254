//! Transactional email port.

use async_trait::async_trait;

/// A message ready to hand to the email provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingEmail {
    pub from: String,
    pub to: Vec<String>,
    pub reply_to: Option<String>,
    pub subject: String,
    pub html: String,
}

/// Mailer trait - abstraction over transactional email providers (Resend, in-memory).
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Send the message and return the provider's message id.
    async fn send(&self, email: &OutgoingEmail) -> Result<String, MailError>;
}

/// Email delivery errors.
#[derive(Debug, thiserror::Error)]
pub enum MailError {
    #[error("Mail transport failed: {0}")]
    Transport(String),

    #[error("Mail provider rejected the message ({status}): {message}")]
    Rejected { status: u16, message: String },
}
