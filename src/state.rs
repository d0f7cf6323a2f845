use std::sync::Arc;

use crate::config::AppConfig;
use crate::services::clock::{Clock, SystemClock};
use crate::services::contact_service::ContactService;
use crate::services::mailer::Mailer;
use crate::services::otp_service::OtpService;
use crate::services::otp_store::OtpStore;

#[derive(Clone)]
pub struct AppState {
    pub otp_service: Arc<OtpService>,
    pub contact_service: Arc<ContactService>,
}

impl AppState {
    pub fn new(config: &AppConfig, mailer: Arc<dyn Mailer>) -> Self {
        Self::with_clock(config, mailer, Arc::new(SystemClock))
    }

    pub fn with_clock(config: &AppConfig, mailer: Arc<dyn Mailer>, clock: Arc<dyn Clock>) -> Self {
        let otp_service = OtpService::new(
            Arc::new(OtpStore::new()),
            mailer.clone(),
            clock,
            config.otp_ttl,
        );
        let contact_service = ContactService::new(mailer, config.contact_recipient.clone());

        AppState {
            otp_service: Arc::new(otp_service),
            contact_service: Arc::new(contact_service),
        }
    }
}
