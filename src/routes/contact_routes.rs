use axum::{routing::post, Router};

use crate::{handlers::contact, state::AppState};

pub fn contact_routes() -> Router<AppState> {
    Router::new().route("/submit-form", post(contact::submit_form))
}
