pub(crate) mod contact_routes;
pub(crate) mod otp_routes;
