pub(crate) mod contact;
pub(crate) mod otp;
