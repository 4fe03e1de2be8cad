//! Document generation — builds the SOP/LOM prompt and dispatches it.
//!
//! The generated text is returned verbatim; this flow has no JSON to extract.

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::document::models::{DocumentRequest, DocumentType, GeneratedDocument};
use crate::document::prompts::{
    DOCUMENT_PROMPT_TEMPLATE, LOM_INSTRUCTIONS, SOP_INSTRUCTIONS, UNIVERSITY_FALLBACK,
    UNIVERSITY_PHRASE_FALLBACK,
};
use crate::errors::AppError;
use crate::llm_client::prompts::fill_template;
use crate::llm_client::TextGenerator;
use crate::validation::non_blank;

/// Builds the document prompt. Pure and deterministic; assumes `request.validate()` passed.
pub fn build_document_prompt(request: &DocumentRequest) -> String {
    let university = non_blank(request.university.as_deref());
    let field = request.field.trim();

    let future_plans_line = optional_line("Future Plans", request.future_plans.as_deref());
    let optional_experience_lines = [
        optional_line("Work Experience", request.work_experience.as_deref()),
        optional_line("Volunteer Work", request.volunteer_work.as_deref()),
        optional_line("Awards", request.achievements.as_deref()),
        optional_line("Personal Story", request.personal_story.as_deref()),
    ]
    .concat();

    let special_instructions = match request.document_type {
        DocumentType::Sop => fill_template(SOP_INSTRUCTIONS, &[("field", field)]),
        DocumentType::Lom => LOM_INSTRUCTIONS.to_string(),
    };

    let min_limit = request.min_limit.to_string();
    let max_limit = request.max_limit.to_string();

    fill_template(
        DOCUMENT_PROMPT_TEMPLATE,
        &[
            ("document_title", request.document_type.title()),
            ("name", request.name.trim()),
            ("degree", request.degree.trim()),
            ("field", field),
            ("university_phrase", university.unwrap_or(UNIVERSITY_PHRASE_FALLBACK)),
            ("country", request.country.trim()),
            ("min_limit", min_limit.as_str()),
            ("max_limit", max_limit.as_str()),
            ("limit_type", request.limit_type.as_str()),
            ("previous_education", request.previous_education.trim()),
            ("university", university.unwrap_or(UNIVERSITY_FALLBACK)),
            ("motivation", request.motivation.trim()),
            ("reason_for_choice", request.reason_for_choice.trim()),
            ("career_goals", request.career_goals.trim()),
            ("future_plans_line", future_plans_line.as_str()),
            ("strengths", request.strengths.trim()),
            ("experience", request.experience.trim()),
            ("optional_experience_lines", optional_experience_lines.as_str()),
            ("special_instructions", special_instructions.as_str()),
        ],
    )
}

fn optional_line(label: &str, value: Option<&str>) -> String {
    non_blank(value)
        .map(|v| format!("   - {label}: {v}\n"))
        .unwrap_or_default()
}

/// Runs the document flow: prompt → dispatch → generated text.
pub async fn generate_document(
    llm: &dyn TextGenerator,
    request: &DocumentRequest,
) -> Result<GeneratedDocument, AppError> {
    let prompt = build_document_prompt(request);
    info!(
        "Generating {:?} ({} {}-{})",
        request.document_type,
        request.limit_type.as_str(),
        request.min_limit,
        request.max_limit
    );

    let text = llm.generate(&prompt).await?;

    Ok(GeneratedDocument {
        id: Uuid::new_v4(),
        document_type: request.document_type,
        text,
        generated_at: Utc::now(),
    })
}
