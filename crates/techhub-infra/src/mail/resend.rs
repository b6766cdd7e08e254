//! Resend (https://resend.com) HTTP mailer.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use techhub_core::ports::{MailError, Mailer, OutgoingEmail};

/// Resend API configuration.
#[derive(Debug, Clone)]
pub struct ResendConfig {
    pub api_key: String,
    /// API base URL (default: https://api.resend.com)
    pub base_url: String,
    pub timeout: Duration,
}

impl ResendConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: "https://api.resend.com".to_string(),
            timeout: Duration::from_secs(10),
        }
    }

    /// Returns `None` when `RESEND_API_KEY` is unset or blank.
    pub fn from_env() -> Option<Self> {
        std::env::var("RESEND_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty())
            .map(Self::new)
    }
}

#[derive(Serialize)]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: &'a [String],
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_to: Option<&'a str>,
    subject: &'a str,
    html: &'a str,
}

#[derive(Deserialize)]
struct SendEmailResponse {
    id: String,
}

#[derive(Deserialize)]
struct ResendErrorBody {
    message: Option<String>,
}

pub struct ResendMailer {
    client: Client,
    config: ResendConfig,
}

impl ResendMailer {
    pub fn new(config: ResendConfig) -> Result<Self, MailError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| MailError::Transport(e.to_string()))?;
        Ok(Self { client, config })
    }
}

#[async_trait]
impl Mailer for ResendMailer {
    async fn send(&self, email: &OutgoingEmail) -> Result<String, MailError> {
        let url = format!("{}/emails", self.config.base_url.trim_end_matches('/'));
        let body = SendEmailRequest {
            from: &email.from,
            to: &email.to,
            reply_to: email.reply_to.as_deref(),
            subject: &email.subject,
            html: &email.html,
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| MailError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ResendErrorBody>(&text)
                .ok()
                .and_then(|b| b.message)
                .unwrap_or(text);
            tracing::warn!(status = status.as_u16(), error = %message, "Resend rejected email");
            return Err(MailError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        let sent: SendEmailResponse = response
            .json()
            .await
            .map_err(|e| MailError::Transport(format!("Unexpected Resend response: {e}")))?;

        Ok(sent.id)
    }
}
