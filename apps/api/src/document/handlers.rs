//! Axum route handlers for the document generation API.

use axum::{extract::State, Json};

use crate::document::generator::generate_document;
use crate::document::models::{DocumentRequest, GeneratedDocument};
use crate::errors::AppError;
use crate::state::AppState;

/// POST /api/v1/documents/generate
///
/// Validates the applicant record, then generates an SOP or LOM.
pub async fn handle_generate_document(
    State(state): State<AppState>,
    Json(request): Json<DocumentRequest>,
) -> Result<Json<GeneratedDocument>, AppError> {
    request.validate()?;

    let document = generate_document(state.llm.as_ref(), &request).await?;

    Ok(Json(document))
}
