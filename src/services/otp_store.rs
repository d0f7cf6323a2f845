//! In-memory OTP storage keyed by email.

use chrono::{DateTime, Utc};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tracing::debug;

use crate::models::otp::{OtpRecord, RedeemOutcome, RejectReason};

/// Outstanding passcodes, at most one per email. Keys are case-sensitive.
#[derive(Debug, Default)]
pub struct OtpStore {
    records: DashMap<String, OtpRecord>,
}

impl OtpStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `record` for `email`, replacing any previous one.
    pub fn issue(&self, email: &str, record: OtpRecord) {
        if self.records.insert(email.to_string(), record).is_some() {
            debug!("Replaced outstanding OTP for {}", email);
        }
    }

    // Only tests read records directly; handlers go through `redeem`.
    #[allow(dead_code)]
    pub fn lookup(&self, email: &str) -> Option<OtpRecord> {
        self.records.get(email).map(|entry| entry.value().clone())
    }

    #[allow(dead_code)]
    pub fn remove(&self, email: &str) -> Option<OtpRecord> {
        self.records.remove(email).map(|(_, record)| record)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Decide a verification attempt while holding the shard lock for `email`.
    ///
    /// Expired and matching records are consumed; a mismatch leaves the record
    /// in place for a retry.
    pub fn redeem(&self, email: &str, candidate: &str, now: DateTime<Utc>) -> RedeemOutcome {
        match self.records.entry(email.to_string()) {
            Entry::Vacant(_) => RedeemOutcome::Rejected(RejectReason::NotFound),
            Entry::Occupied(entry) => {
                if entry.get().is_expired_at(now) {
                    entry.remove();
                    RedeemOutcome::Expired
                } else if entry.get().passcode == candidate {
                    entry.remove();
                    RedeemOutcome::Verified
                } else {
                    RedeemOutcome::Rejected(RejectReason::Mismatch)
                }
            }
        }
    }
}
