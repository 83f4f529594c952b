use async_trait::async_trait;
use lettre::message::{Mailbox, header::ContentType};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::config::MailConfig;
use crate::errors::AppError;

/// Outbound mail. Implementations must be cheap to share across workers.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), AppError>;
}

/// Delivers through an SMTP relay using STARTTLS.
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailer {
    pub fn new(
        host: &str,
        port: u16,
        credentials: Option<(String, String)>,
        from: &str,
    ) -> Result<Self, AppError> {
        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host)
            .map_err(|e| AppError::Mail(format!("Invalid SMTP relay {}: {}", host, e)))?
            .port(port);

        if let Some((user, password)) = credentials {
            builder = builder.credentials(Credentials::new(user, password));
        }

        let from = from
            .parse::<Mailbox>()
            .map_err(|e| AppError::Mail(format!("Invalid sender address: {}", e)))?;

        Ok(Self {
            transport: builder.build(),
            from,
        })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), AppError> {
        let recipient = to
            .parse::<Mailbox>()
            .map_err(|e| AppError::Mail(format!("Invalid recipient {}: {}", to, e)))?;

        let message = Message::builder()
            .from(self.from.clone())
            .to(recipient)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body.to_string())
            .map_err(|e| AppError::Mail(format!("Failed to build message: {}", e)))?;

        self.transport
            .send(message)
            .await
            .map_err(|e| AppError::Mail(format!("SMTP send failed: {}", e)))?;

        tracing::info!(to = %to, subject = %subject, "mail sent");
        Ok(())
    }
}

/// Used when no relay is configured: the message is only logged.
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), AppError> {
        tracing::warn!(to = %to, subject = %subject, body = %body, "no SMTP relay configured, mail not delivered");
        Ok(())
    }
}

/// Picks the SMTP mailer when a relay host is configured.
pub fn from_config(config: &MailConfig) -> Result<Box<dyn Mailer>, AppError> {
    match &config.smtp {
        Some(smtp) => {
            let credentials = smtp.username.clone().zip(smtp.password.clone());
            let mailer = SmtpMailer::new(&smtp.host, smtp.port, credentials, &config.from)?;
            tracing::info!(host = %smtp.host, port = smtp.port, "SMTP mailer configured");
            Ok(Box::new(mailer))
        }
        None => {
            tracing::warn!("EMAIL_HOST not set, outgoing mail will only be logged");
            Ok(Box::new(LogMailer))
        }
    }
}

pub fn reset_request_body(username: &str, token: &str, backend_url: &str) -> String {
    format!(
        "Hi {username},\n\n\
         Use this token to reset your password:\n\n\
         {token}\n\n\
         This token expires in 1 hour.\n\n\
         To reset your password, send a POST request to:\n\
         {backend_url}/api/password/reset-password\n\
         with the token in the Authorization header (Bearer) and your new password \
         in the body as \"newPassword\".\n\n\
         If you didn't request this, ignore this email.\n"
    )
}

pub fn password_changed_body(username: &str) -> String {
    format!(
        "Hi {username},\n\n\
         Your password has been changed successfully.\n\n\
         If you didn't make this change, contact support immediately.\n"
    )
}
