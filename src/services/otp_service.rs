use std::sync::Arc;

use chrono::Duration;
use dashmap::DashMap;
use rand::Rng;
use tokio::sync::Mutex;

use crate::errors::{AppError, Result};
use crate::models::otp::{OtpRecord, RedeemOutcome};
use crate::services::clock::Clock;
use crate::services::mailer::{Mailer, OutgoingEmail};
use crate::services::otp_store::OtpStore;

const OTP_SUBJECT: &str = "Your OTP Code";

pub struct OtpService {
    store: Arc<OtpStore>,
    mailer: Arc<dyn Mailer>,
    clock: Arc<dyn Clock>,
    ttl: Duration,
    issue_locks: DashMap<String, Arc<Mutex<()>>>,
}

impl OtpService {
    pub fn new(
        store: Arc<OtpStore>,
        mailer: Arc<dyn Mailer>,
        clock: Arc<dyn Clock>,
        ttl: Duration,
    ) -> Self {
        Self {
            store,
            mailer,
            clock,
            ttl,
            issue_locks: DashMap::new(),
        }
    }

    // Generate 6-digit OTP in [100000, 999999]
    pub fn generate_otp() -> String {
        let mut rng = rand::thread_rng();
        rng.gen_range(100_000..=999_999).to_string()
    }

    pub fn store(&self) -> &OtpStore {
        &self.store
    }

    /// Email a fresh passcode to `email` and record it once delivery succeeds.
    ///
    /// Issuances for the same email run one at a time, so the stored passcode
    /// always belongs to the most recently delivered message.
    pub async fn issue(&self, email: &str) -> Result<()> {
        // Locals drop in reverse order, also when the request is cancelled, so
        // the cleanup runs after this call's lock handle is gone.
        let _cleanup = IssueLockCleanup {
            locks: &self.issue_locks,
            email,
        };
        let lock = self
            .issue_locks
            .entry(email.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();

        let _held = lock.lock().await;
        self.deliver_and_store(email).await
    }

    async fn deliver_and_store(&self, email: &str) -> Result<()> {
        let passcode = Self::generate_otp();
        let body = format!(
            "Your OTP is {}. It is valid for {}.",
            passcode,
            describe_ttl(self.ttl)
        );

        if let Err(e) = self
            .mailer
            .send(OutgoingEmail::new(email, OTP_SUBJECT, body))
            .await
        {
            tracing::error!(
                email = %email,
                transient = e.is_transient(),
                "Failed to send OTP: {}",
                e
            );
            return Err(AppError::delivery("Failed to send OTP", e));
        }

        let expires_at = self.clock.now() + self.ttl;
        self.store.issue(email, OtpRecord::new(passcode, expires_at));
        tracing::info!(email = %email, %expires_at, "OTP issued");

        Ok(())
    }

    pub fn verify(&self, email: &str, candidate: &str) -> Result<()> {
        match self.store.redeem(email, candidate, self.clock.now()) {
            RedeemOutcome::Verified => {
                tracing::info!(email = %email, "OTP verified");
                Ok(())
            }
            RedeemOutcome::Expired => {
                tracing::info!(email = %email, "OTP expired before verification");
                Err(AppError::OtpExpired)
            }
            RedeemOutcome::Rejected(reason) => {
                tracing::warn!(email = %email, ?reason, "OTP rejected");
                Err(AppError::InvalidOtp(reason))
            }
        }
    }
}

/// Drops the per-email lock entry once no issuance holds a handle to it.
struct IssueLockCleanup<'a> {
    locks: &'a DashMap<String, Arc<Mutex<()>>>,
    email: &'a str,
}

impl Drop for IssueLockCleanup<'_> {
    fn drop(&mut self) {
        self.locks
            .remove_if(self.email, |_, lock| Arc::strong_count(lock) == 1);
    }
}

fn describe_ttl(ttl: Duration) -> String {
    let secs = ttl.num_seconds();
    match (secs / 60, secs % 60) {
        (1, 0) => "1 minute".to_string(),
        (minutes, 0) => format!("{} minutes", minutes),
        _ if secs == 1 => "1 second".to_string(),
        _ => format!("{} seconds", secs),
    }
}
