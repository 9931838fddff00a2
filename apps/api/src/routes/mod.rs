pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::diff::handlers as diff_handlers;
use crate::matching::handlers as matching_handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Matching API
        .route(
            "/api/v1/match/classify",
            post(matching_handlers::handle_classify),
        )
        .route(
            "/api/v1/match/classify-tokens",
            post(matching_handlers::handle_classify_tokens),
        )
        .route(
            "/api/v1/match/extract-tokens",
            post(matching_handlers::handle_extract_tokens),
        )
        .route(
            "/api/v1/match/aggregate",
            post(matching_handlers::handle_aggregate),
        )
        .route(
            "/api/v1/jobs/:job_id/analysis",
            post(matching_handlers::handle_job_analysis)
                .delete(matching_handlers::handle_invalidate_job_analysis),
        )
        // Diff API
        .route("/api/v1/diff/words", post(diff_handlers::handle_diff_words))
        .with_state(state)
}
