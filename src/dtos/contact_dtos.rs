use serde::Deserialize;
use validator::Validate;

use crate::dtos::common_dtos::string_or_number;
use crate::models::contact::ContactSubmission;

#[derive(Debug, Deserialize, Validate)]
pub struct ContactFormRequest {
    #[validate(required, length(min = 1))]
    pub user_name: Option<String>,

    #[validate(required, length(min = 1))]
    pub user_email: Option<String>,

    #[serde(default, deserialize_with = "string_or_number")]
    #[validate(required, length(min = 1))]
    pub user_number: Option<String>,

    #[validate(required, length(min = 1))]
    pub message: Option<String>,
}

impl ContactFormRequest {
    /// `None` unless every field is present and non-empty.
    pub fn into_submission(self) -> Option<ContactSubmission> {
        if self.validate().is_err() {
            return None;
        }

        Some(ContactSubmission {
            name: self.user_name?,
            email: self.user_email?,
            phone: self.user_number?,
            message: self.message?,
        })
    }
}
