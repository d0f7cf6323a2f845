use std::sync::Arc;

use crate::errors::{AppError, Result};
use crate::models::contact::ContactSubmission;
use crate::services::mailer::{Mailer, OutgoingEmail};

const CONTACT_SUBJECT: &str = "New Form Submission";

/// Forwards contact-form submissions to the operator mailbox.
pub struct ContactService {
    mailer: Arc<dyn Mailer>,
    recipient: String,
}

impl ContactService {
    pub fn new(mailer: Arc<dyn Mailer>, recipient: String) -> Self {
        Self { mailer, recipient }
    }

    pub async fn relay(&self, submission: &ContactSubmission) -> Result<()> {
        let email = OutgoingEmail::new(
            self.recipient.as_str(),
            CONTACT_SUBJECT,
            submission.render_body(),
        );

        self.mailer.send(email).await.map_err(|e| {
            tracing::error!(
                from = %submission.email,
                transient = e.is_transient(),
                "Failed to relay contact form: {}",
                e
            );
            AppError::delivery("Failed to send email", e)
        })?;

        tracing::info!(from = %submission.email, "Contact form relayed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::mailer::{DeliveryError, MockMailer};

    fn submission() -> ContactSubmission {
        ContactSubmission {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            phone: "0712345678".to_string(),
            message: "Hello".to_string(),
        }
    }

    #[tokio::test]
    async fn relays_to_operator_address() {
        let mut mailer = MockMailer::new();
        mailer
            .expect_send()
            .withf(|email| {
                email.to == "ops@example.com"
                    && email.subject == "New Form Submission"
                    && email.body.contains("Email: ada@example.com")
            })
            .times(1)
            .returning(|_| Ok(()));
        let service = ContactService::new(Arc::new(mailer), "ops@example.com".to_string());

        assert!(service.relay(&submission()).await.is_ok());
    }

    #[tokio::test]
    async fn delivery_failure_is_reported_once() {
        let mut mailer = MockMailer::new();
        mailer
            .expect_send()
            .times(1)
            .returning(|_| Err(DeliveryError::Timeout(30)));
        let service = ContactService::new(Arc::new(mailer), "ops@example.com".to_string());

        let err = service.relay(&submission()).await.unwrap_err();

        assert!(matches!(err, AppError::Delivery { context: "Failed to send email", .. }));
    }
}
