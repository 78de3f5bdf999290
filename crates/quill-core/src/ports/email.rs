//! Outbound email port.

use async_trait::async_trait;

/// Email dispatch errors.
#[derive(Debug, thiserror::Error)]
pub enum MailError {
    #[error("Email provider error: {0}")]
    Provider(String),
}

/// Outbound email dispatch.
///
/// Callers treat sends as fire-and-forget: a failed verification email is
/// logged but never rolls back the signup that triggered it.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, to: &str, subject: &str, html_body: &str) -> Result<(), MailError>;
}
