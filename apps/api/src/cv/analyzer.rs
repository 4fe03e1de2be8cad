//! CV analysis — prompt building, dispatch, and tolerant reading of the feedback JSON.
//!
//! Extraction failures never reach the caller: the fixed fallback feedback is
//! returned instead, flagged as degraded. Endpoint failures still propagate.

use tracing::{info, warn};

use crate::cv::models::CvFeedback;
use crate::cv::prompts::{CV_ANALYSIS_PROMPT_TEMPLATE, MAX_CV_CHARS};
use crate::errors::AppError;
use crate::llm_client::extract::{
    extract_value, string_list, Extraction, ExtractionStrategy, FallbackReason,
};
use crate::llm_client::prompts::{fill_template, JSON_ONLY_INSTRUCTION};
use crate::llm_client::TextGenerator;

/// Result of the CV flow as seen by the API layer.
#[derive(Debug, Clone, PartialEq)]
pub struct CvAnalysis {
    pub feedback: CvFeedback,
    pub fallback_reason: Option<FallbackReason>,
}

/// First `MAX_CV_CHARS` characters of `content`, never splitting a character.
fn truncate_chars(content: &str, max: usize) -> &str {
    match content.char_indices().nth(max) {
        Some((byte_idx, _)) => &content[..byte_idx],
        None => content,
    }
}

/// Builds the analysis prompt. Pure and deterministic.
pub fn build_cv_prompt(content: &str) -> String {
    fill_template(
        CV_ANALYSIS_PROMPT_TEMPLATE,
        &[
            ("json_only", JSON_ONLY_INSTRUCTION),
            ("cv_content", truncate_chars(content.trim(), MAX_CV_CHARS)),
        ],
    )
}

/// Reads `{issues, suggestions}` out of free model text.
///
/// Missing keys, non-array values and non-string items are tolerated: they
/// read as empty or are skipped.
pub fn interpret_cv_response(text: &str, strategy: ExtractionStrategy) -> Extraction<CvFeedback> {
    extract_value(text, strategy).and_then(|value| {
        Extraction::Parsed(CvFeedback {
            issues: string_list(&value, "issues"),
            suggestions: string_list(&value, "suggestions"),
        })
    })
}

/// Runs the CV flow: prompt → dispatch → extract, substituting the fallback on failure.
pub async fn analyze_cv(
    llm: &dyn TextGenerator,
    content: &str,
    strategy: ExtractionStrategy,
) -> Result<CvAnalysis, AppError> {
    let char_count = content.chars().count();
    if char_count > MAX_CV_CHARS {
        info!("CV content truncated from {char_count} to {MAX_CV_CHARS} characters");
    }

    let text = llm.generate(&build_cv_prompt(content)).await?;

    Ok(match interpret_cv_response(&text, strategy) {
        Extraction::Parsed(feedback) => {
            info!(
                "CV analyzed: {} issues, {} suggestions",
                feedback.issues.len(),
                feedback.suggestions.len()
            );
            CvAnalysis {
                feedback,
                fallback_reason: None,
            }
        }
        Extraction::Fallback(reason) => {
            warn!("CV analysis falling back: {reason}");
            CvAnalysis {
                feedback: CvFeedback::fallback(),
                fallback_reason: Some(reason),
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::testing::CannedGenerator;

    const NAIVE: ExtractionStrategy = ExtractionStrategy::FirstLastBrace;

    #[test]
    fn test_prompt_contains_content_and_keys() {
        let prompt = build_cv_prompt("Jane Doe\nRust developer, 5 years");
        assert!(prompt.contains("Jane Doe\nRust developer, 5 years"));
        assert!(prompt.contains(r#""issues" (array of strings)"#));
        assert!(prompt.contains(r#""suggestions" (array of strings)"#));
        assert!(prompt.ends_with("CV Content:\nJane Doe\nRust developer, 5 years"));
    }

    #[test]
    fn test_prompt_is_deterministic() {
        assert_eq!(build_cv_prompt("same cv"), build_cv_prompt("same cv"));
    }

    #[test]
    fn test_prompt_truncates_long_content_on_char_boundary() {
        let content = "é".repeat(MAX_CV_CHARS + 50);
        let prompt = build_cv_prompt(&content);
        let embedded = prompt.split("CV Content:\n").nth(1).unwrap();
        assert_eq!(embedded.chars().count(), MAX_CV_CHARS);
    }

    #[test]
    fn test_interprets_object_wrapped_in_prose() {
        let text = r#"Sure! {"issues":["a"],"suggestions":["b"]} Hope that helps."#;
        assert_eq!(
            interpret_cv_response(text, NAIVE),
            Extraction::Parsed(CvFeedback {
                issues: vec!["a".to_string()],
                suggestions: vec!["b".to_string()],
            })
        );
    }

    #[test]
    fn test_missing_keys_coerce_to_empty() {
        let parsed = interpret_cv_response(r#"{"issues": ["only issues"]}"#, NAIVE);
        assert_eq!(
            parsed,
            Extraction::Parsed(CvFeedback {
                issues: vec!["only issues".to_string()],
                suggestions: vec![],
            })
        );
    }

    #[test]
    fn test_wrong_value_types_coerce_to_empty() {
        let parsed = interpret_cv_response(r#"{"issues": 1, "suggestions": null}"#, NAIVE);
        assert_eq!(
            parsed,
            Extraction::Parsed(CvFeedback {
                issues: vec![],
                suggestions: vec![],
            })
        );
    }

    #[test]
    fn test_no_brace_falls_back() {
        assert_eq!(
            interpret_cv_response("I'm unable to analyze this.", NAIVE),
            Extraction::Fallback(FallbackReason::NoOpeningBrace)
        );
    }

    #[tokio::test]
    async fn test_analyze_cv_returns_model_feedback() {
        let llm = CannedGenerator::replying(
            "```json\n{\"issues\":[\"No dates\"],\"suggestions\":[\"Add dates\"]}\n```",
        );
        let analysis = analyze_cv(&llm, "My CV", NAIVE).await.unwrap();
        assert_eq!(analysis.feedback.issues, vec!["No dates"]);
        assert_eq!(analysis.feedback.suggestions, vec!["Add dates"]);
        assert!(analysis.fallback_reason.is_none());
        assert_eq!(llm.calls(), 1);
    }

    #[tokio::test]
    async fn test_analyze_cv_degrades_to_fallback() {
        let llm = CannedGenerator::replying("Your CV looks great overall!");
        let analysis = analyze_cv(&llm, "My CV", NAIVE).await.unwrap();
        assert_eq!(analysis.feedback, CvFeedback::fallback());
        assert_eq!(analysis.fallback_reason, Some(FallbackReason::NoOpeningBrace));
    }

    #[tokio::test]
    async fn test_analyze_cv_degrades_on_invalid_json() {
        let llm = CannedGenerator::replying("{issues: [unquoted]}");
        let analysis = analyze_cv(&llm, "My CV", NAIVE).await.unwrap();
        assert_eq!(analysis.feedback, CvFeedback::fallback());
        assert!(matches!(
            analysis.fallback_reason,
            Some(FallbackReason::InvalidJson(_))
        ));
    }

    #[tokio::test]
    async fn test_analyze_cv_propagates_endpoint_error() {
        let llm = CannedGenerator::failing(429, "quota exceeded");
        let err = analyze_cv(&llm, "My CV", NAIVE).await.unwrap_err();
        assert_eq!(err.code(), "ENDPOINT_ERROR");
    }
}
