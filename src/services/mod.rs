pub mod clock;
pub mod contact_service;
pub mod mailer;
pub mod otp_service;
pub mod otp_store;
pub mod smtp_mailer;
