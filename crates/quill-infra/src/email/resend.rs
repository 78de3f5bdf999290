//! Resend email provider client.

use async_trait::async_trait;

use quill_core::ports::{MailError, Mailer};

const RESEND_ENDPOINT: &str = "https://api.resend.com/emails";

/// Email provider configuration.
#[derive(Debug, Clone)]
pub struct EmailConfig {
    pub api_key: String,
    pub from_address: String,
}

/// Mailer backed by the Resend HTTP API.
pub struct ResendMailer {
    client: reqwest::Client,
    config: EmailConfig,
}

impl ResendMailer {
    pub fn new(config: EmailConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }
}

#[async_trait]
impl Mailer for ResendMailer {
    async fn send(&self, to: &str, subject: &str, html_body: &str) -> Result<(), MailError> {
        let response = self
            .client
            .post(RESEND_ENDPOINT)
            .bearer_auth(&self.config.api_key)
            .json(&serde_json::json!({
                "from": self.config.from_address,
                "to": [to],
                "subject": subject,
                "html": html_body,
            }))
            .send()
            .await
            .map_err(|e| MailError::Provider(e.to_string()))?;

        if !response.status().is_success() {
            return Err(MailError::Provider(format!(
                "Provider returned status {}",
                response.status()
            )));
        }

        tracing::debug!(subject, "Email dispatched");
        Ok(())
    }
}

/// Mailer used when no provider key is configured: logs instead of sending.
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, to: &str, subject: &str, _html_body: &str) -> Result<(), MailError> {
        tracing::info!(to, subject, "Email provider not configured; skipping send");
        Ok(())
    }
}
