//! Notification gateway abstraction.
//!
//! Handlers never talk to SMTP directly; they hand an [`OutgoingEmail`] to a
//! [`Mailer`]. Production wires in [`super::smtp_mailer::SmtpMailer`], tests a
//! `MockMailer`.

use async_trait::async_trait;
use thiserror::Error;

/// A plain-text email ready for delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingEmail {
    pub to: String,
    pub subject: String,
    pub body: String,
}

impl OutgoingEmail {
    pub fn new(to: impl Into<String>, subject: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            to: to.into(),
            subject: subject.into(),
            body: body.into(),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DeliveryError {
    /// The relay may accept the same message later.
    #[error("transient delivery failure: {0}")]
    Transient(String),

    #[error("permanent delivery failure: {0}")]
    Permanent(String),

    #[error("delivery timed out after {0} seconds")]
    Timeout(u64),
}

impl DeliveryError {
    pub fn is_transient(&self) -> bool {
        matches!(self, DeliveryError::Transient(_) | DeliveryError::Timeout(_))
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: OutgoingEmail) -> Result<(), DeliveryError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeouts_count_as_transient() {
        assert!(DeliveryError::Timeout(30).is_transient());
        assert!(DeliveryError::Transient("421".into()).is_transient());
        assert!(!DeliveryError::Permanent("550".into()).is_transient());
    }
}
