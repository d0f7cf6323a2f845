use axum::{extract::rejection::JsonRejection, extract::State, Json};

use crate::dtos::common_dtos::MessageResponse;
use crate::dtos::contact_dtos::ContactFormRequest;
use crate::errors::{AppError, Result};
use crate::state::AppState;

pub async fn submit_form(
    State(state): State<AppState>,
    payload: std::result::Result<Json<ContactFormRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>> {
    let Json(req) = payload?;
    let submission = req
        .into_submission()
        .ok_or_else(|| AppError::invalid_data("All fields are required"))?;

    state.contact_service.relay(&submission).await?;

    Ok(Json(MessageResponse::ok(
        "Form submitted and email sent successfully!",
    )))
}
