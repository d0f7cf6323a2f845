use serde::Deserialize;
use validator::Validate;

use crate::dtos::common_dtos::string_or_number;

#[derive(Debug, Deserialize, Validate)]
pub struct SendOtpRequest {
    #[validate(required, length(min = 1))]
    pub email: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct VerifyOtpRequest {
    #[validate(required, length(min = 1))]
    pub email: Option<String>,

    // Clients send the code either as "123456" or 123456
    #[serde(default, deserialize_with = "string_or_number")]
    #[validate(required, length(min = 1))]
    pub otp: Option<String>,
}
