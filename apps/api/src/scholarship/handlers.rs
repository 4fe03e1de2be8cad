//! Axum route handlers for the scholarship search API.

use axum::{extract::State, Json};
use chrono::Utc;
use uuid::Uuid;

use crate::errors::AppError;
use crate::scholarship::finder::search_scholarships;
use crate::scholarship::models::{ScholarshipSearchRequest, ScholarshipSearchResponse};
use crate::state::AppState;

/// POST /api/v1/scholarships/search
///
/// 404 `NO_RESULTS` when the answer holds no usable entries; 502
/// `EXTRACTION_FAILED` when the answer cannot be read.
pub async fn handle_search_scholarships(
    State(state): State<AppState>,
    Json(request): Json<ScholarshipSearchRequest>,
) -> Result<Json<ScholarshipSearchResponse>, AppError> {
    let query = request.into_query()?;

    let scholarships = search_scholarships(state.llm.as_ref(), &query, state.extraction_strategy())
        .await?
        .into_result()?;

    Ok(Json(ScholarshipSearchResponse {
        id: Uuid::new_v4(),
        degree_level: query.degree_level,
        count: scholarships.len(),
        country: query.country,
        scholarships,
        searched_at: Utc::now(),
    }))
}
