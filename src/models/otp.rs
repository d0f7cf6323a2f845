use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OtpRecord {
    pub passcode: String,            // 6-digit OTP
    pub expires_at: DateTime<Utc>,   // When OTP expires
}

impl OtpRecord {
    pub fn new(passcode: impl Into<String>, expires_at: DateTime<Utc>) -> Self {
        Self {
            passcode: passcode.into(),
            expires_at,
        }
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }
}

/// Why a verification attempt was refused without expiring the record.
/// Both reasons are reported to callers as the same "Invalid OTP".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    NotFound,
    Mismatch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedeemOutcome {
    Verified,
    Expired,
    Rejected(RejectReason),
}
