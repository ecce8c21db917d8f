use axum::{
    extract::FromRequestParts,
    http::{request::Parts, HeaderMap, StatusCode},
    response::Json,
};
use serde_json::{json, Value};

use crate::AppState;

/// Marker extracted once the caller presented the service's static API key
/// in `API_KEY` or `X-API-Key`.
#[derive(Debug, Clone, Copy)]
pub struct ApiKey;

impl FromRequestParts<AppState> for ApiKey {
    type Rejection = (StatusCode, Json<Value>);

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        if is_authorized(&parts.headers, &state.config.api_key) {
            Ok(ApiKey)
        } else {
            tracing::warn!("Rejected request with missing or invalid API key");
            Err((
                StatusCode::UNAUTHORIZED,
                Json(json!({"error": "Unauthorized: Invalid API key"})),
            ))
        }
    }
}

/// `API_KEY` takes precedence over `X-API-Key`. An empty configured key never matches.
pub fn is_authorized(headers: &HeaderMap, expected: &str) -> bool {
    if expected.is_empty() {
        return false;
    }

    let provided = ["api_key", "x-api-key"]
        .iter()
        .filter_map(|name| headers.get(*name))
        .filter_map(|v| v.to_str().ok())
        .find(|v| !v.is_empty());

    provided == Some(expected)
}
