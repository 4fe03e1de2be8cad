pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::cv::handlers as cv;
use crate::document::handlers as document;
use crate::scholarship::handlers as scholarship;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/v1/documents/generate",
            post(document::handle_generate_document),
        )
        .route("/api/v1/cv/analyze", post(cv::handle_analyze_cv))
        .route(
            "/api/v1/cv/analyze/upload",
            post(cv::handle_analyze_cv_upload),
        )
        .route(
            "/api/v1/scholarships/search",
            post(scholarship::handle_search_scholarships),
        )
        .with_state(state)
}
