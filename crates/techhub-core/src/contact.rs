//! Contact form submission: honeypot and field validation, then delivery
//! through the [`Mailer`] port.

use std::sync::Arc;

use serde::Deserialize;

use crate::markup::escape;
use crate::ports::{MailError, Mailer, OutgoingEmail};

/// Raw form payload. `website` is the hidden honeypot field.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactSubmission {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
}

/// A submission that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidContact {
    pub name: String,
    pub email: String,
    pub message: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ContactError {
    #[error("Bad Request: Bot detected")]
    BotDetected,

    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    #[error("Invalid email address")]
    InvalidEmail,

    #[error("Failed to send email: {0}")]
    Delivery(#[from] MailError),
}

impl ContactSubmission {
    /// Runs before any side effect. The honeypot is checked first.
    pub fn validate(&self) -> Result<ValidContact, ContactError> {
        if self.website.as_deref().is_some_and(|w| !w.is_empty()) {
            return Err(ContactError::BotDetected);
        }

        let field = |value: &Option<String>| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };
        let name = field(&self.name);
        let email = field(&self.email);
        let message = field(&self.message);

        let missing: Vec<&'static str> = [("name", &name), ("email", &email), ("message", &message)]
            .into_iter()
            .filter(|(_, value)| value.is_none())
            .map(|(label, _)| label)
            .collect();

        match (name, email, message) {
            (Some(name), Some(email), Some(message)) => {
                if !email.contains('@') {
                    return Err(ContactError::InvalidEmail);
                }
                Ok(ValidContact {
                    name,
                    email,
                    message,
                })
            }
            _ => Err(ContactError::MissingFields(missing)),
        }
    }
}

/// Sender and destination for contact mail.
#[derive(Debug, Clone)]
pub struct ContactSettings {
    pub from: String,
    pub destination: String,
}

impl Default for ContactSettings {
    fn default() -> Self {
        Self {
            from: "TechHub Contact <onboarding@resend.dev>".to_string(),
            destination: "contato@techhub.com.br".to_string(),
        }
    }
}

/// Validates submissions and forwards them to the site owner.
pub struct ContactService {
    mailer: Arc<dyn Mailer>,
    settings: ContactSettings,
}

impl ContactService {
    pub fn new(mailer: Arc<dyn Mailer>, settings: ContactSettings) -> Self {
        Self { mailer, settings }
    }

    /// Returns the provider's message id.
    pub async fn submit(&self, submission: &ContactSubmission) -> Result<String, ContactError> {
        let contact = submission.validate()?;
        let email = self.compose(&contact);
        let id = self.mailer.send(&email).await?;
        tracing::info!(message_id = %id, "Contact message delivered");
        Ok(id)
    }

    fn compose(&self, contact: &ValidContact) -> OutgoingEmail {
        let message = escape(&contact.message).replace('\n', "<br>");
        let html = format!(
            "<div style=\"font-family: sans-serif; color: #333;\">\
             <h2>Nova mensagem do formulário de contato</h2>\
             <p><strong>Nome:</strong> {name}</p>\
             <p><strong>Email:</strong> {email}</p>\
             <hr />\
             <h3>Mensagem:</h3>\
             <p style=\"background-color: #f4f4f5; padding: 15px; border-radius: 5px;\">{message}</p>\
             </div>",
            name = escape(&contact.name),
            email = escape(&contact.email),
        );

        OutgoingEmail {
            from: self.settings.from.clone(),
            to: vec![self.settings.destination.clone()],
            reply_to: Some(contact.email.clone()),
            subject: format!("Novo Contato: {}", contact.name),
            html,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use async_trait::async_trait;

    #[derive(Default)]
    struct RecordingMailer {
        sent: Mutex<Vec<OutgoingEmail>>,
    }

    #[async_trait]
    impl Mailer for RecordingMailer {
        async fn send(&self, email: &OutgoingEmail) -> Result<String, MailError> {
            self.sent.lock().unwrap().push(email.clone());
            Ok("msg_123".to_string())
        }
    }

    fn submission(website: Option<&str>) -> ContactSubmission {
        ContactSubmission {
            name: Some("Ana Costa".to_string()),
            email: Some("ana@example.com".to_string()),
            message: Some("Olá!\nTudo bem? <script>".to_string()),
            website: website.map(str::to_string),
        }
    }

    #[test]
    fn test_missing_fields_are_listed() {
        let err = ContactSubmission {
            name: Some("John".to_string()),
            ..Default::default()
        }
        .validate()
        .unwrap_err();

        match err {
            ContactError::MissingFields(fields) => assert_eq!(fields, vec!["email", "message"]),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_email_needs_at_sign() {
        let mut form = submission(None);
        form.email = Some("not-an-email".to_string());
        assert!(matches!(form.validate(), Err(ContactError::InvalidEmail)));
    }

    #[tokio::test]
    async fn test_honeypot_sends_nothing() {
        let mailer = Arc::new(RecordingMailer::default());
        let service = ContactService::new(mailer.clone(), ContactSettings::default());

        let result = service.submit(&submission(Some("spam"))).await;

        assert!(matches!(result, Err(ContactError::BotDetected)));
        assert!(mailer.sent.lock().unwrap().is_empty());
    }

    #[test]
    fn test_whitespace_honeypot_is_a_bot() {
        assert!(matches!(
            submission(Some("   ")).validate(),
            Err(ContactError::BotDetected)
        ));
    }

    #[tokio::test]
    async fn test_valid_submission_is_delivered() {
        let mailer = Arc::new(RecordingMailer::default());
        let service = ContactService::new(mailer.clone(), ContactSettings::default());

        let id = service.submit(&submission(Some(""))).await.unwrap();

        assert_eq!(id, "msg_123");
        let sent = mailer.sent.lock().unwrap();
        let email = &sent[0];
        assert_eq!(email.to, vec!["contato@techhub.com.br"]);
        assert_eq!(email.reply_to.as_deref(), Some("ana@example.com"));
        assert_eq!(email.subject, "Novo Contato: Ana Costa");
        assert!(email.html.contains("Olá!<br>Tudo bem? &lt;script&gt;"));
    }
}
