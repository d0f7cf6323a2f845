use axum::extract::State;
use axum::{response::Json, routing::get, Router};
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

mod config;
mod dtos;
mod errors;
mod handlers;
mod models;
mod routes;
mod services;
mod state;
#[cfg(test)]
mod test_utils;

use config::AppConfig;
use services::smtp_mailer::SmtpMailer;
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    let app_state = initialize_app_state(&config)?;
    let app = build_router(app_state);
    start_server(&config, app).await
}

fn initialize_app_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let mailer = SmtpMailer::new(&config.smtp)?;
    tracing::info!(
        "✅ SMTP mailer ready ({}:{} as {})",
        config.smtp.host,
        config.smtp.port,
        config.smtp.sender
    );
    tracing::info!("📮 Contact forms go to {}", config.contact_recipient);

    Ok(AppState::new(config, Arc::new(mailer)))
}

fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .merge(routes::otp_routes::otp_routes())
        .merge(routes::contact_routes::contact_routes())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}

async fn start_server(config: &AppConfig, app: Router) -> anyhow::Result<()> {
    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;

    tracing::info!("🚀 Server running on http://{}", addr);

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("Failed to bind to {}: {}", addr, e);
            return Err(e.into());
        }
    };

    axum::serve(listener, app).await?;
    Ok(())
}

async fn health_check(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "outstanding_otps": state.otp_service.store().len(),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
