//! Router assembly: HTTP endpoints, static files, CORS, and HTTP tracing.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::state::AppState;

pub mod http;

/// Build the application router with:
/// - REST API under `/api/...`
/// - Static SPA from `./static` with index fallback
/// - CORS (allow any origin/method/headers) – adjust for production if needed
/// - HTTP trace layer (per-request spans w/ method, path, status, latency)
pub fn build_router(state: Arc<AppState>) -> Router {
    // Static files with SPA fallback
    let static_service = ServeDir::new("./static")
        .append_index_html_on_directories(true)
        .not_found_service(ServeFile::new("./static/index.html"));

    Router::new()
        // AI proxy + health
        .route("/api/health", get(http::http_health))
        .route("/api/generate-image", post(http::http_generate_image))
        .route("/api/generate-quiz", post(http::http_generate_quiz))
        .route("/api/topics", get(http::http_topics))
        .route("/api/difficulties", get(http::http_difficulties))
        // Quiz sessions
        .route("/api/quiz/session", post(http::http_start_quiz))
        .route("/api/quiz/session/:id", get(http::http_get_quiz_session))
        .route("/api/quiz/session/:id/answer", post(http::http_submit_answer))
        .route("/api/quiz/session/:id/results", post(http::http_quiz_results))
        .route("/api/quiz/session/:id/reset", post(http::http_reset_quiz))
        // Matching game
        .route("/api/game", post(http::http_start_game))
        .route("/api/game/:id", get(http::http_get_game))
        .route("/api/game/:id/flip", post(http::http_flip_card))
        .route("/api/game/:id/reset", post(http::http_reset_game))
        // State + CORS + HTTP tracing
        .with_state(state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        // Frontend fallback
        .fallback_service(static_service)
}
