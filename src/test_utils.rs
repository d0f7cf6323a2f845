//! Shared fixtures for handler and router tests.
//!
//! ```ignore
//! let mut mailer = MockMailer::new();
//! mailer.expect_send().returning(|_| Ok(()));
//!
//! let state = TestStateBuilder::new().with_mailer(mailer).build();
//! ```

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;

use crate::config::{AppConfig, SmtpConfig};
use crate::services::clock::ManualClock;
use crate::services::mailer::MockMailer;
use crate::state::AppState;

pub fn test_config() -> AppConfig {
    AppConfig {
        smtp: SmtpConfig {
            host: "smtp.example.com".to_string(),
            port: 465,
            sender: "relay@example.com".to_string(),
            password: "password".to_string(),
            timeout: Duration::from_secs(5),
        },
        contact_recipient: "ops@example.com".to_string(),
        otp_ttl: chrono::Duration::minutes(5),
        host: "127.0.0.1".to_string(),
        port: 5000,
    }
}

/// Builds an `AppState` on a manual clock. A mailer left unset rejects every
/// send, so tests that expect no delivery need no setup.
pub struct TestStateBuilder {
    mailer: Option<MockMailer>,
    clock: Option<Arc<ManualClock>>,
}

impl TestStateBuilder {
    pub fn new() -> Self {
        Self {
            mailer: None,
            clock: None,
        }
    }

    pub fn with_mailer(mut self, mailer: MockMailer) -> Self {
        self.mailer = Some(mailer);
        self
    }

    pub fn with_clock(mut self, clock: Arc<ManualClock>) -> Self {
        self.clock = Some(clock);
        self
    }

    pub fn build(self) -> AppState {
        let mailer = self.mailer.unwrap_or_else(|| {
            let mut mailer = MockMailer::new();
            mailer.expect_send().times(0);
            mailer
        });
        let clock = self
            .clock
            .unwrap_or_else(|| Arc::new(ManualClock::new(Utc::now())));

        AppState::with_clock(&test_config(), Arc::new(mailer), clock)
    }
}
