pub mod clone_voice;
pub mod health;

use axum::{extract::DefaultBodyLimit, http::HeaderValue, Router};
use tower::limit::GlobalConcurrencyLimitLayer;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::AppState;

/// Webhook payloads are a handful of small fields.
const MAX_BODY_BYTES: usize = 64 * 1024;

pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.cors_origins());
    let max_in_flight = state.config.max_concurrent_requests;

    Router::new()
        .merge(health::router())
        .merge(clone_voice::router())
        .with_state(state)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        // One semaphore shared by every route, so the cap is process-wide.
        .layer(GlobalConcurrencyLimitLayer::new(max_in_flight))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let is_wildcard = origins.is_empty() || (origins.len() == 1 && origins[0] == "*");

    if is_wildcard {
        CorsLayer::new()
            .allow_origin(AllowOrigin::any())
            .allow_methods(AllowMethods::any())
            .allow_headers(AllowHeaders::any())
    } else {
        let origins: Vec<HeaderValue> = origins.iter().filter_map(|o| o.parse().ok()).collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(AllowMethods::any())
            .allow_headers(AllowHeaders::any())
    }
}
