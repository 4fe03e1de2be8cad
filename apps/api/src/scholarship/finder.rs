//! Scholarship search — prompt building, dispatch, extraction and filtering.
//!
//! Unlike the CV flow there is no silent fallback here: an unreadable answer is
//! reported as an extraction failure, and a readable answer with nothing
//! usable in it is reported as "no results".

use serde_json::Value;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::llm_client::extract::{extract_value, Extraction, ExtractionStrategy, FallbackReason};
use crate::llm_client::prompts::{fill_template, JSON_ONLY_INSTRUCTION};
use crate::llm_client::TextGenerator;
use crate::scholarship::models::{ScholarshipEntry, ScholarshipQuery};
use crate::scholarship::prompts::{BACKGROUND_FALLBACK, SCHOLARSHIP_PROMPT_TEMPLATE};

pub const NO_RESULTS_MESSAGE: &str =
    "No valid scholarships found. Please try different criteria.";

/// What the scholarship flow hands back to the API layer.
#[derive(Debug, Clone, PartialEq)]
pub enum ScholarshipOutcome {
    Found(Vec<ScholarshipEntry>),
    /// The answer parsed, but every entry was filtered out (or there were none).
    NoResults { discarded: usize },
    /// The answer could not be read at all.
    Unavailable(FallbackReason),
}

impl ScholarshipOutcome {
    pub fn into_result(self) -> Result<Vec<ScholarshipEntry>, AppError> {
        match self {
            ScholarshipOutcome::Found(entries) => Ok(entries),
            ScholarshipOutcome::NoResults { .. } => {
                Err(AppError::NoResults(NO_RESULTS_MESSAGE.to_string()))
            }
            ScholarshipOutcome::Unavailable(reason) => Err(AppError::Extraction(reason.to_string())),
        }
    }
}

/// Builds the search prompt. Pure and deterministic.
pub fn build_scholarship_prompt(query: &ScholarshipQuery) -> String {
    fill_template(
        SCHOLARSHIP_PROMPT_TEMPLATE,
        &[
            ("degree_level", query.degree_level.as_str()),
            ("country", query.country.as_str()),
            ("json_only", JSON_ONLY_INSTRUCTION),
            (
                "background",
                query.background.as_deref().unwrap_or(BACKGROUND_FALLBACK),
            ),
        ],
    )
}

fn text_field(entry: &Value, key: &str) -> Option<String> {
    entry
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// An entry survives only with a non-blank string `title` and `description`.
fn to_entry(entry: &Value) -> Option<ScholarshipEntry> {
    Some(ScholarshipEntry {
        title: text_field(entry, "title")?,
        description: text_field(entry, "description")?,
        degree: text_field(entry, "degree"),
        country: text_field(entry, "country"),
        link: text_field(entry, "link"),
        financial_coverage: text_field(entry, "financialCoverage"),
        deadline: text_field(entry, "deadline"),
    })
}

/// Reads and filters the `scholarships` array out of free model text.
pub fn interpret_scholarship_response(
    text: &str,
    strategy: ExtractionStrategy,
) -> ScholarshipOutcome {
    let value = match extract_value(text, strategy) {
        Extraction::Parsed(value) => value,
        Extraction::Fallback(reason) => return ScholarshipOutcome::Unavailable(reason),
    };

    let Some(raw_entries) = value.get("scholarships").and_then(Value::as_array) else {
        return ScholarshipOutcome::Unavailable(FallbackReason::UnexpectedShape(
            "missing 'scholarships' array".to_string(),
        ));
    };

    let entries: Vec<ScholarshipEntry> = raw_entries.iter().filter_map(to_entry).collect();
    if entries.is_empty() {
        ScholarshipOutcome::NoResults {
            discarded: raw_entries.len(),
        }
    } else {
        ScholarshipOutcome::Found(entries)
    }
}

/// Runs the scholarship flow: prompt → dispatch → extract → filter.
pub async fn search_scholarships(
    llm: &dyn TextGenerator,
    query: &ScholarshipQuery,
    strategy: ExtractionStrategy,
) -> Result<ScholarshipOutcome, AppError> {
    let text = llm.generate(&build_scholarship_prompt(query)).await?;

    let outcome = interpret_scholarship_response(&text, strategy);
    match &outcome {
        ScholarshipOutcome::Found(entries) => info!(
            "Found {} scholarships for {} in {}",
            entries.len(),
            query.degree_level.as_str(),
            query.country
        ),
        ScholarshipOutcome::NoResults { discarded } => info!(
            "No usable scholarships for {} in {} ({discarded} entries discarded)",
            query.degree_level.as_str(),
            query.country
        ),
        ScholarshipOutcome::Unavailable(reason) => {
            warn!("Scholarship response unreadable: {reason}")
        }
    }
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::testing::CannedGenerator;
    use crate::scholarship::models::DegreeLevel;

    const NAIVE: ExtractionStrategy = ExtractionStrategy::FirstLastBrace;

    fn query() -> ScholarshipQuery {
        ScholarshipQuery {
            degree_level: DegreeLevel::Masters,
            country: "Germany".to_string(),
            background: Some("BS Electrical Engineering, 3.6 GPA".to_string()),
        }
    }

    #[test]
    fn test_prompt_contains_required_values() {
        let prompt = build_scholarship_prompt(&query());
        assert!(prompt.contains("for Master's programs in Germany"));
        assert!(prompt.contains("Applicant background: BS Electrical Engineering, 3.6 GPA."));
        assert!(prompt.contains(r#""financialCoverage": "Fully Funded/Partial""#));
    }

    #[test]
    fn test_prompt_without_background() {
        let mut q = query();
        q.background = None;
        assert!(build_scholarship_prompt(&q).contains("Applicant background: not specified."));
    }

    #[test]
    fn test_prompt_is_deterministic() {
        assert_eq!(build_scholarship_prompt(&query()), build_scholarship_prompt(&query()));
    }

    #[test]
    fn test_filters_entries_without_title_or_description() {
        let text = r#"{"scholarships":[{"title":"","description":"x"},{"title":"A","description":"y"}]}"#;
        match interpret_scholarship_response(text, NAIVE) {
            ScholarshipOutcome::Found(entries) => {
                assert_eq!(entries.len(), 1);
                assert_eq!(entries[0].title, "A");
                assert_eq!(entries[0].description, "y");
            }
            other => panic!("expected Found, got {other:?}"),
        }
    }

    #[test]
    fn test_keeps_optional_fields() {
        let text = r#"Here are some options:
```json
{"scholarships":[{"title":"DAAD EPOS","description":"Full funding for development-related masters",
"degree":"Master's","country":"Germany","link":"https://daad.de","financialCoverage":"Fully Funded",
"deadline":"October 2025","extra":"ignored"}]}
```"#;
        match interpret_scholarship_response(text, NAIVE) {
            ScholarshipOutcome::Found(entries) => {
                let entry = &entries[0];
                assert_eq!(entry.link.as_deref(), Some("https://daad.de"));
                assert_eq!(entry.financial_coverage.as_deref(), Some("Fully Funded"));
                assert_eq!(entry.deadline.as_deref(), Some("October 2025"));
            }
            other => panic!("expected Found, got {other:?}"),
        }
    }

    #[test]
    fn test_all_filtered_is_no_results_not_failure() {
        let text = r#"{"scholarships":[{"title":"  ","description":"x"},{"title":"B"},{"description":"z"},"junk"]}"#;
        assert_eq!(
            interpret_scholarship_response(text, NAIVE),
            ScholarshipOutcome::NoResults { discarded: 4 }
        );
    }

    #[test]
    fn test_empty_array_is_no_results() {
        assert_eq!(
            interpret_scholarship_response(r#"{"scholarships": []}"#, NAIVE),
            ScholarshipOutcome::NoResults { discarded: 0 }
        );
    }

    #[test]
    fn test_missing_array_is_unavailable() {
        assert!(matches!(
            interpret_scholarship_response(r#"{"results": []}"#, NAIVE),
            ScholarshipOutcome::Unavailable(FallbackReason::UnexpectedShape(_))
        ));
    }

    #[test]
    fn test_no_brace_is_unavailable() {
        assert_eq!(
            interpret_scholarship_response("Sorry, I can't help.", NAIVE),
            ScholarshipOutcome::Unavailable(FallbackReason::NoOpeningBrace)
        );
    }

    #[test]
    fn test_outcomes_map_to_distinct_errors() {
        let no_results = ScholarshipOutcome::NoResults { discarded: 2 }
            .into_result()
            .unwrap_err();
        let unavailable = ScholarshipOutcome::Unavailable(FallbackReason::NoOpeningBrace)
            .into_result()
            .unwrap_err();
        assert_eq!(no_results.code(), "NO_RESULTS");
        assert_eq!(unavailable.code(), "EXTRACTION_FAILED");
    }

    #[tokio::test]
    async fn test_search_dispatches_once() {
        let llm = CannedGenerator::replying(
            r#"{"scholarships":[{"title":"A","description":"y"}]}"#,
        );
        let outcome = search_scholarships(&llm, &query(), NAIVE).await.unwrap();
        assert!(matches!(outcome, ScholarshipOutcome::Found(ref e) if e.len() == 1));
        assert_eq!(llm.calls(), 1);
    }
}
