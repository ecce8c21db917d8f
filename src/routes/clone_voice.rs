use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::post,
    Router,
};
use serde_json::json;

use crate::auth::middleware::ApiKey;
use crate::models::CloneVoiceRequest;
use crate::services::audio::MIN_AUDIO_SECONDS;
use crate::services::voice_clone::{self, CloneOutcome, WorkflowError};
use crate::utils::user_id::validate_user_id;
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/clone-voice", post(clone_voice))
}

/// POST /clone-voice: webhook that clones a user's voice once enough audio exists.
async fn clone_voice(
    State(state): State<AppState>,
    _key: ApiKey,
    payload: Result<Json<CloneVoiceRequest>, JsonRejection>,
) -> Response {
    let Json(req) = match payload {
        Ok(p) => p,
        Err(e) => {
            tracing::warn!("Rejected clone request body: {}", e);
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({"success": false, "error": "Invalid JSON body"})),
            )
                .into_response();
        }
    };

    let user_id = match req.user_id {
        Some(id) if !id.trim().is_empty() => id,
        _ => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({"error": "Missing userId"})),
            )
                .into_response();
        }
    };

    if let Err(reason) = validate_user_id(&user_id) {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": format!("Invalid userId: {}", reason)})),
        )
            .into_response();
    }

    tracing::info!(
        user_id = %user_id,
        event = ?req.event,
        recording_count = ?req.recording_count,
        question_index = ?req.question_index,
        "Voice cloning request"
    );

    match voice_clone::run(&state, &user_id).await {
        Ok(outcome) => outcome_response(&user_id, outcome),
        Err(e) => error_response(e),
    }
}

fn outcome_response(user_id: &str, outcome: CloneOutcome) -> Response {
    match outcome {
        CloneOutcome::Skipped { voice_id } => Json(json!({
            "success": true,
            "message": "Voice already exists",
            "voice_id": voice_id,
            "skipped": true,
        }))
        .into_response(),
        CloneOutcome::InsufficientAudio(estimate) => (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "success": false,
                "error": "Insufficient audio duration",
                "required": MIN_AUDIO_SECONDS as u64,
                "actual": estimate.rounded_duration(),
                "file_count": estimate.file_count,
            })),
        )
            .into_response(),
        CloneOutcome::Cloned {
            voice_id,
            voice_name,
            estimate,
        } => Json(json!({
            "success": true,
            "message": "Voice cloned successfully",
            "voice_id": voice_id,
            "user_id": user_id,
            "voice_name": voice_name,
            "audio_duration": estimate.rounded_duration(),
            "file_count": estimate.file_count,
        }))
        .into_response(),
    }
}

fn error_response(err: WorkflowError) -> Response {
    let details = err.to_string();
    let body = match err {
        WorkflowError::Lookup(_) => json!({
            "success": false,
            "error": "Failed to read from storage",
            "details": details,
        }),
        WorkflowError::Merge(_) => json!({
            "success": false,
            "error": "Failed to concatenate audio files",
            "details": details,
        }),
        WorkflowError::Clone(_) => json!({
            "success": false,
            "error": "Failed to clone voice",
            "details": details,
        }),
        WorkflowError::Save { voice_id, .. } => json!({
            "success": false,
            "error": "Failed to save voice_id to storage",
            "voice_id": voice_id,
            "details": details,
        }),
    };

    (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
}
