//! Turns an uploaded CV file into plain text for the analysis prompt.

use bytes::Bytes;
use tracing::{debug, warn};

use crate::errors::AppError;

const PDF_MAGIC: &[u8] = b"%PDF-";

/// Accepts a PDF (detected by its magic bytes) or UTF-8 plain text.
pub async fn cv_text_from_upload(data: Bytes) -> Result<String, AppError> {
    if data.is_empty() {
        return Err(AppError::Validation("uploaded file is empty".to_string()));
    }

    let text = if data.starts_with(PDF_MAGIC) {
        extract_pdf_text(data).await?
    } else {
        String::from_utf8(data.to_vec()).map_err(|_| {
            AppError::Validation(
                "unsupported file type: upload a PDF or a plain-text CV".to_string(),
            )
        })?
    };

    if text.trim().is_empty() {
        return Err(AppError::Validation(
            "no readable text found in the uploaded CV".to_string(),
        ));
    }
    Ok(text)
}

/// PDF parsing is CPU-bound and can panic on hostile input, so it runs on the
/// blocking pool and a panic is reported as an unreadable file.
async fn extract_pdf_text(data: Bytes) -> Result<String, AppError> {
    let size = data.len();
    let outcome = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&data))
        .await;

    match outcome {
        Ok(Ok(text)) => {
            debug!("Extracted {} characters from a {size}-byte PDF", text.len());
            Ok(text)
        }
        Ok(Err(e)) => {
            warn!("PDF extraction failed: {e}");
            Err(AppError::Validation(
                "the uploaded PDF could not be read".to_string(),
            ))
        }
        Err(e) => {
            warn!("PDF extraction aborted: {e}");
            Err(AppError::Validation(
                "the uploaded PDF could not be read".to_string(),
            ))
        }
    }
}
