pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::generation::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Generation API
        .route("/api/v1/resume", post(handlers::handle_generate_resume))
        .route(
            "/api/v1/cover-letter",
            post(handlers::handle_generate_cover_letter),
        )
        // Artifact download
        .route("/api/v1/runs/:run_id/pdf", get(handlers::handle_download_pdf))
        .with_state(state)
}
