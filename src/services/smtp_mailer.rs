use std::time::Duration;

use async_trait::async_trait;
use lettre::{
    message::{header::ContentType, Mailbox},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use tracing::{debug, error, info};

use crate::config::SmtpConfig;
use crate::errors::{AppError, Result};
use crate::services::mailer::{DeliveryError, Mailer, OutgoingEmail};

/// SMTP relay gateway. Each send is bounded by `timeout` on top of the
/// transport's own socket timeout.
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    timeout: Duration,
}

impl SmtpMailer {
    pub fn new(config: &SmtpConfig) -> Result<Self> {
        let from: Mailbox = config.sender.parse().map_err(|e| {
            AppError::configuration(format!("Invalid sender address: {}", e))
        })?;

        let credentials = Credentials::new(config.sender.clone(), config.password.clone());

        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)
            .map_err(|e| {
                AppError::configuration(format!("Failed to create SMTP transport: {}", e))
            })?
            .port(config.port)
            .credentials(credentials)
            .timeout(Some(config.timeout))
            .build();

        Ok(Self {
            transport,
            from,
            timeout: config.timeout,
        })
    }

    fn build_message(
        &self,
        email: &OutgoingEmail,
    ) -> std::result::Result<Message, DeliveryError> {
        let to: Mailbox = email.to.parse().map_err(|e| {
            DeliveryError::Permanent(format!("invalid recipient {}: {}", email.to, e))
        })?;

        Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(email.subject.as_str())
            .header(ContentType::TEXT_PLAIN)
            .body(email.body.clone())
            .map_err(|e| DeliveryError::Permanent(format!("failed to build message: {}", e)))
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, email: OutgoingEmail) -> std::result::Result<(), DeliveryError> {
        let message = self.build_message(&email)?;

        debug!("Sending \"{}\" to {}", email.subject, email.to);

        let result = tokio::time::timeout(self.timeout, self.transport.send(message))
            .await
            .map_err(|_| DeliveryError::Timeout(self.timeout.as_secs()))?;

        match result {
            Ok(response) => {
                info!(to = %email.to, code = %response.code(), "email delivered");
                Ok(())
            }
            Err(e) if e.is_permanent() => {
                error!(to = %email.to, error = %e, "email rejected permanently");
                Err(DeliveryError::Permanent(e.to_string()))
            }
            Err(e) => {
                error!(to = %email.to, error = %e, "email delivery failed");
                Err(DeliveryError::Transient(e.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_smtp_config() -> SmtpConfig {
        SmtpConfig {
            host: "smtp.example.com".to_string(),
            port: 465,
            sender: "relay@example.com".to_string(),
            password: "password".to_string(),
            timeout: Duration::from_secs(5),
        }
    }

    #[tokio::test]
    async fn rejects_invalid_sender() {
        let mut config = test_smtp_config();
        config.sender = "not-an-address".to_string();

        assert!(matches!(
            SmtpMailer::new(&config),
            Err(AppError::ConfigurationError(_))
        ));
    }

    #[tokio::test]
    async fn builds_plain_text_message() {
        let mailer = SmtpMailer::new(&test_smtp_config()).unwrap();
        let email = OutgoingEmail::new(
            "user@example.com",
            "Your OTP Code",
            "Your OTP is 123456.",
        );

        let message = mailer.build_message(&email).unwrap();
        let raw = String::from_utf8(message.formatted()).unwrap();

        assert!(raw.contains("Subject: Your OTP Code"));
        assert!(raw.contains("To: user@example.com"));
        assert!(raw.contains("Your OTP is 123456."));
    }

    #[tokio::test]
    async fn invalid_recipient_fails_before_connecting() {
        let mailer = SmtpMailer::new(&test_smtp_config()).unwrap();
        let email = OutgoingEmail::new("no at sign", "Subject", "Body");

        let err = mailer.send(email).await.unwrap_err();

        assert!(matches!(err, DeliveryError::Permanent(_)));
    }
}
