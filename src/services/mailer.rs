//! SMTP notification delivery for contact messages.
//!
//! Configuration comes from environment variables; when `SMTP_HOST` or
//! `CONTACT_EMAIL` is unset, [`MAILER`] is `None` and notifications are
//! skipped entirely.

use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use once_cell::sync::Lazy;

use crate::services::contact_service::CreateContactInput;

const DEFAULT_SMTP_PORT: u16 = 587;

#[derive(Debug, thiserror::Error)]
pub enum EmailError {
    #[error("SMTP transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),

    #[error("Email address parse error: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("Email build error: {0}")]
    Build(String),
}

#[derive(Debug, Clone)]
pub struct MailerConfig {
    pub smtp_host: String,
    pub smtp_port: u16,
    pub from_address: String,
    /// Where contact notifications are delivered.
    pub contact_email: String,
    pub smtp_user: Option<String>,
    pub smtp_password: Option<String>,
}

impl MailerConfig {
    /// Returns `None` unless both `SMTP_HOST` and `CONTACT_EMAIL` are set.
    pub fn from_env() -> Option<Self> {
        let smtp_host = std::env::var("SMTP_HOST").ok()?;
        let contact_email = std::env::var("CONTACT_EMAIL").ok()?;
        Some(Self {
            smtp_host,
            smtp_port: std::env::var("SMTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_SMTP_PORT),
            from_address: std::env::var("SMTP_FROM")
                .unwrap_or_else(|_| "noreply@localhost".to_string()),
            contact_email,
            smtp_user: std::env::var("SMTP_USER").ok(),
            smtp_password: std::env::var("SMTP_PASSWORD").ok(),
        })
    }
}

pub struct Mailer {
    config: MailerConfig,
}

pub static MAILER: Lazy<Option<Mailer>> = Lazy::new(|| MailerConfig::from_env().map(Mailer::new));

impl Mailer {
    pub fn new(config: MailerConfig) -> Self {
        Self { config }
    }

    pub async fn send_contact_notification(
        &self,
        input: &CreateContactInput,
    ) -> Result<(), EmailError> {
        let subject = format!(
            "New contact message: {}",
            input.subject.as_deref().unwrap_or("No subject")
        );
        let body = format!(
            "From: {} ({})\n\n{}",
            input.name, input.email, input.message
        );

        let email = Message::builder()
            .from(self.config.from_address.parse()?)
            .to(self.config.contact_email.parse()?)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body)
            .map_err(|e| EmailError::Build(e.to_string()))?;

        let mut transport_builder =
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.config.smtp_host)?
                .port(self.config.smtp_port);

        if let (Some(user), Some(pass)) = (&self.config.smtp_user, &self.config.smtp_password) {
            transport_builder =
                transport_builder.credentials(Credentials::new(user.clone(), pass.clone()));
        }

        transport_builder.build().send(email).await?;

        tracing::info!(from = %input.email, "Contact notification email sent");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_env_requires_smtp_host_and_recipient() {
        std::env::remove_var("SMTP_HOST");
        std::env::remove_var("CONTACT_EMAIL");
        assert!(MailerConfig::from_env().is_none());
    }

    #[test]
    fn email_error_display() {
        let err = EmailError::Build("missing body".to_string());
        assert_eq!(err.to_string(), "Email build error: missing body");
    }
}
