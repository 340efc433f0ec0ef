//! Route configuration and setup

use std::sync::Arc;

use avifpress_core::Config;
use axum::{
    extract::DefaultBodyLimit,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

// Room for multipart framing on top of the image payload.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// Setup all application routes
pub fn setup_routes(config: &Config, state: Arc<AppState>) -> Router {
    let body_limit = config.max_file_size_bytes + MULTIPART_OVERHEAD_BYTES;

    Router::new()
        .route("/", get(handlers::index::landing_page))
        .route("/compress", post(handlers::compress::compress))
        .fallback(handler_404)
        .method_not_allowed_fallback(handler_404)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(RequestBodyLimitLayer::new(body_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Any other method/path combination gets a generic not-found response.
async fn handler_404() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "Not Found")
}
