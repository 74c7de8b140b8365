use crate::app_config::SmtpConfig;
use async_trait::async_trait;
use farewatch_core::{CoreError, CoreResult, EmailMessage, MailTransport};
use farewatch_shared::Masked;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::info;

/// Authenticated STARTTLS SMTP delivery
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpMailer {
    pub fn new(config: &SmtpConfig, username: &str, password: &Masked<String>) -> CoreResult<Self> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
            .map_err(|e| CoreError::ConfigurationError(format!("invalid SMTP relay '{}': {}", config.host, e)))?
            .port(config.port)
            .credentials(Credentials::new(username.to_string(), password.expose().clone()))
            .build();

        Ok(Self { transport })
    }
}

/// Build the plain-text MIME message for `message`
pub fn build_message(message: &EmailMessage) -> CoreResult<Message> {
    let from: Mailbox = message
        .from
        .parse()
        .map_err(|e| CoreError::NotificationFailure(format!("invalid sender address: {}", e)))?;
    let to: Mailbox = message
        .to
        .parse()
        .map_err(|e| CoreError::NotificationFailure(format!("invalid recipient address: {}", e)))?;

    Message::builder()
        .from(from)
        .to(to)
        .subject(message.subject.clone())
        .header(ContentType::TEXT_PLAIN)
        .body(message.body.clone())
        .map_err(|e| CoreError::NotificationFailure(e.to_string()))
}

#[async_trait]
impl MailTransport for SmtpMailer {
    async fn send(&self, message: &EmailMessage) -> CoreResult<()> {
        let email = build_message(message)?;

        self.transport
            .send(email)
            .await
            .map_err(|e| CoreError::NotificationFailure(e.to_string()))?;

        info!(subject = %message.subject, "Email notification sent");
        Ok(())
    }
}
