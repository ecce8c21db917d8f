use axum::{http::StatusCode, response::Json, routing::get, Router};
use serde_json::{json, Value};

use crate::services::audio::MIN_AUDIO_SECONDS;
use crate::AppState;

pub const SERVICE_NAME: &str = "ah-voice-cloning-orchestrator";

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route("/", get(service_info))
}

async fn health_check() -> (StatusCode, Json<Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "service": SERVICE_NAME,
            "timestamp": chrono::Utc::now().to_rfc3339(),
        })),
    )
}

/// GET /: static description of the service for humans poking at it.
async fn service_info() -> Json<Value> {
    Json(json!({
        "service": "AliveHere Voice Cloning Orchestrator",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "/health": "GET - Health check",
            "/clone-voice": "POST - Trigger voice cloning workflow",
        },
        "requirements": {
            "min_audio_duration": format!("{} seconds", MIN_AUDIO_SECONDS),
            "authentication": "API_KEY or X-API-Key header required",
        },
    }))
}
