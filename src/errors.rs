// src/errors.rs
use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::models::otp::RejectReason;
use crate::services::mailer::DeliveryError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    ValidationError(String),

    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    #[error("OTP has expired")]
    OtpExpired,

    #[error("Invalid OTP")]
    InvalidOtp(RejectReason),

    #[error("{context}: {source}")]
    Delivery {
        context: &'static str,
        #[source]
        source: DeliveryError,
    },

    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message, detail) = match &self {
            AppError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg.clone(), None),
            AppError::InvalidBody(reason) => (
                StatusCode::BAD_REQUEST,
                "Invalid request body".to_string(),
                Some(reason.clone()),
            ),
            AppError::OtpExpired => (StatusCode::BAD_REQUEST, self.to_string(), None),
            AppError::InvalidOtp(_) => (StatusCode::BAD_REQUEST, self.to_string(), None),
            AppError::Delivery { context, source } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                context.to_string(),
                Some(source.to_string()),
            ),
            AppError::ConfigurationError(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Configuration error".to_string(),
                None,
            ),
        };

        let mut body = json!({
            "success": false,
            "message": message,
            "timestamp": chrono::Utc::now().to_rfc3339(),
        });
        if let Some(detail) = detail {
            body["error"] = json!(detail);
        }

        (status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::InvalidBody(rejection.body_text())
    }
}

impl AppError {
    pub fn invalid_data(msg: impl Into<String>) -> Self {
        AppError::ValidationError(msg.into())
    }

    pub fn delivery(context: &'static str, source: DeliveryError) -> Self {
        AppError::Delivery { context, source }
    }

    pub fn configuration(msg: impl Into<String>) -> Self {
        AppError::ConfigurationError(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
