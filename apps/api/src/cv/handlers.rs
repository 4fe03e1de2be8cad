//! Axum route handlers for the CV analysis API.

use axum::{
    extract::{Multipart, State},
    Json,
};
use chrono::Utc;
use uuid::Uuid;

use crate::cv::analyzer::{analyze_cv, CvAnalysis};
use crate::cv::models::{CvAnalysisRequest, CvAnalysisResponse};
use crate::cv::upload::cv_text_from_upload;
use crate::errors::AppError;
use crate::state::AppState;

/// Multipart field carrying the CV file.
const UPLOAD_FIELD: &str = "file";

/// POST /api/v1/cv/analyze
///
/// Analyzes pasted CV text. Unreadable model output degrades to fallback feedback.
pub async fn handle_analyze_cv(
    State(state): State<AppState>,
    Json(request): Json<CvAnalysisRequest>,
) -> Result<Json<CvAnalysisResponse>, AppError> {
    request.validate()?;

    let analysis = analyze_cv(
        state.llm.as_ref(),
        &request.content,
        state.extraction_strategy(),
    )
    .await?;

    Ok(Json(to_response(analysis)))
}

/// POST /api/v1/cv/analyze/upload
///
/// Same as `handle_analyze_cv`, with the CV read from a multipart `file` field
/// (PDF or plain text).
pub async fn handle_analyze_cv_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<CvAnalysisResponse>, AppError> {
    let mut upload = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("invalid multipart body: {e}")))?
    {
        if field.name() == Some(UPLOAD_FIELD) {
            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::Validation(format!("could not read upload: {e}")))?;
            upload = Some(data);
            break;
        }
    }

    let data = upload.ok_or_else(|| {
        AppError::Validation(format!("missing required fields: {UPLOAD_FIELD}"))
    })?;
    let content = cv_text_from_upload(data).await?;

    let analysis = analyze_cv(state.llm.as_ref(), &content, state.extraction_strategy()).await?;

    Ok(Json(to_response(analysis)))
}

fn to_response(analysis: CvAnalysis) -> CvAnalysisResponse {
    CvAnalysisResponse {
        id: Uuid::new_v4(),
        degraded: analysis.fallback_reason.is_some(),
        fallback_reason: analysis.fallback_reason.map(|r| r.to_string()),
        analysis: analysis.feedback,
        analyzed_at: Utc::now(),
    }
}
