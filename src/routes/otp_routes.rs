use axum::{routing::post, Router};

use crate::{handlers::otp, state::AppState};

pub fn otp_routes() -> Router<AppState> {
    Router::new()
        .route("/send-otp", post(otp::send_otp))
        .route("/verify-otp", post(otp::verify_otp))
}
