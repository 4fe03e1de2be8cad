use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::validation::FieldErrors;

pub const FALLBACK_ISSUE: &str =
    "The CV content could not be properly analyzed. Please check the formatting.";
pub const FALLBACK_SUGGESTION: &str =
    "Ensure your CV has clear sections for Work Experience, Education, and Skills.";

#[derive(Debug, Clone, Deserialize)]
pub struct CvAnalysisRequest {
    #[serde(default)]
    pub content: String,
}

impl CvAnalysisRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        let mut errors = FieldErrors::new();
        errors.require("content", &self.content);
        errors.into_result()
    }
}

/// Feedback shape the model is asked to return.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CvFeedback {
    pub issues: Vec<String>,
    pub suggestions: Vec<String>,
}

impl CvFeedback {
    /// Shown when the model's answer cannot be read.
    pub fn fallback() -> Self {
        Self {
            issues: vec![FALLBACK_ISSUE.to_string()],
            suggestions: vec![FALLBACK_SUGGESTION.to_string()],
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CvAnalysisResponse {
    pub id: Uuid,
    pub analysis: CvFeedback,
    /// True when `analysis` is the fallback rather than the model's feedback.
    pub degraded: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_reason: Option<String>,
    pub analyzed_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_content_fails_validation() {
        let request: CvAnalysisRequest = serde_json::from_str(r#"{"content": "  \n "}"#).unwrap();
        let msg = request.validate().unwrap_err().to_string();
        assert!(msg.contains("content"));
    }

    #[test]
    fn test_missing_content_fails_validation() {
        let request: CvAnalysisRequest = serde_json::from_str("{}").unwrap();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_fallback_is_one_issue_one_suggestion() {
        let fallback = CvFeedback::fallback();
        assert_eq!(fallback.issues, vec![FALLBACK_ISSUE]);
        assert_eq!(fallback.suggestions, vec![FALLBACK_SUGGESTION]);
    }
}
