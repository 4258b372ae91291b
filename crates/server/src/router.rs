//! # Application Router
//!
//! Defines the Axum router and maps every API endpoint to its handler.

use crate::{handlers, state::AppState};
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

/// The maximum accepted request body size for PDF uploads (16 MB).
const MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;

/// Creates the main application router.
pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health_check))
        .route("/api/test", get(handlers::api_test))
        .route(
            "/api/flashcards/generate",
            post(handlers::generate_flashcards_handler)
                .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        .route(
            "/api/learning/enhanced",
            post(handlers::generate_enhanced_learning_handler)
                .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        .route(
            "/api/quiz/generate",
            post(handlers::generate_quiz_handler).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        .with_state(app_state)
        .layer(TraceLayer::new_for_http())
}
