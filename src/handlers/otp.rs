use axum::{extract::rejection::JsonRejection, extract::State, Json};
use validator::Validate;

use crate::dtos::common_dtos::MessageResponse;
use crate::dtos::otp_dtos::{SendOtpRequest, VerifyOtpRequest};
use crate::errors::{AppError, Result};
use crate::state::AppState;

// 1. Send OTP
pub async fn send_otp(
    State(state): State<AppState>,
    payload: std::result::Result<Json<SendOtpRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>> {
    let Json(req) = payload?;
    req.validate()
        .map_err(|_| AppError::invalid_data("Email is required"))?;
    let email = req.email.unwrap_or_default();

    state.otp_service.issue(&email).await?;

    Ok(Json(MessageResponse::ok("OTP sent successfully")))
}

// 2. Verify OTP
pub async fn verify_otp(
    State(state): State<AppState>,
    payload: std::result::Result<Json<VerifyOtpRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>> {
    let Json(req) = payload?;
    req.validate()
        .map_err(|_| AppError::invalid_data("Email and OTP are required"))?;
    let email = req.email.unwrap_or_default();
    let otp = req.otp.unwrap_or_default();

    state.otp_service.verify(&email, &otp)?;

    Ok(Json(MessageResponse::ok("OTP verified successfully")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::mailer::MockMailer;
    use crate::test_utils::TestStateBuilder;

    #[tokio::test]
    async fn send_otp_rejects_empty_email_without_sending() {
        let mut mailer = MockMailer::new();
        mailer.expect_send().times(0);
        let state = TestStateBuilder::new().with_mailer(mailer).build();

        let result = send_otp(
            State(state),
            Ok(Json(SendOtpRequest {
                email: Some(String::new()),
            })),
        )
        .await;

        assert!(matches!(
            result,
            Err(AppError::ValidationError(msg)) if msg == "Email is required"
        ));
    }

    #[tokio::test]
    async fn send_otp_stores_record_on_success() {
        let mut mailer = MockMailer::new();
        mailer.expect_send().times(1).returning(|_| Ok(()));
        let state = TestStateBuilder::new().with_mailer(mailer).build();

        let Json(response) = send_otp(
            State(state.clone()),
            Ok(Json(SendOtpRequest {
                email: Some("a@x.com".to_string()),
            })),
        )
        .await
        .unwrap();

        assert!(response.success);
        assert_eq!(response.message, "OTP sent successfully");
        assert!(state.otp_service.store().lookup("a@x.com").is_some());
    }

    #[tokio::test]
    async fn verify_otp_requires_both_fields() {
        let state = TestStateBuilder::new().build();

        let result = verify_otp(
            State(state),
            Ok(Json(VerifyOtpRequest {
                email: Some("a@x.com".to_string()),
                otp: None,
            })),
        )
        .await;

        assert!(matches!(
            result,
            Err(AppError::ValidationError(msg)) if msg == "Email and OTP are required"
        ));
    }

    #[tokio::test]
    async fn verify_otp_without_issuance_is_invalid() {
        let state = TestStateBuilder::new().build();

        let result = verify_otp(
            State(state),
            Ok(Json(VerifyOtpRequest {
                email: Some("nobody@x.com".to_string()),
                otp: Some("123456".to_string()),
            })),
        )
        .await;

        assert!(matches!(result, Err(AppError::InvalidOtp(_))));
    }
}
