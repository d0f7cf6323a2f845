pub mod common_dtos;
pub mod contact_dtos;
pub mod otp_dtos;
