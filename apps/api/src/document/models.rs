use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::validation::FieldErrors;

pub const DEFAULT_MIN_LIMIT: u32 = 500;
pub const DEFAULT_MAX_LIMIT: u32 = 1000;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocumentType {
    /// Statement of purpose.
    #[default]
    #[serde(rename = "SOP")]
    Sop,
    /// Letter of motivation.
    #[serde(rename = "LOM")]
    Lom,
}

impl DocumentType {
    pub fn title(&self) -> &'static str {
        match self {
            DocumentType::Sop => "Statement of Purpose (SOP)",
            DocumentType::Lom => "Letter of Motivation (LOM)",
        }
    }
}

/// Unit the length bounds are expressed in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LengthUnit {
    #[default]
    Words,
    Characters,
}

impl LengthUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            LengthUnit::Words => "words",
            LengthUnit::Characters => "characters",
        }
    }

    /// Largest accepted `max_limit` for this unit.
    pub fn upper_bound(&self) -> u32 {
        match self {
            LengthUnit::Words => 1000,
            LengthUnit::Characters => 5000,
        }
    }
}

fn default_min_limit() -> u32 {
    DEFAULT_MIN_LIMIT
}

fn default_max_limit() -> u32 {
    DEFAULT_MAX_LIMIT
}

/// Request body for document generation.
///
/// Required text fields default to empty so that an omitted field surfaces as a
/// validation error naming it, not as a deserialization failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocumentRequest {
    #[serde(default)]
    pub document_type: DocumentType,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub degree: String,
    #[serde(default)]
    pub field: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub university: Option<String>,
    #[serde(default)]
    pub previous_education: String,
    #[serde(default)]
    pub motivation: String,
    #[serde(default)]
    pub reason_for_choice: String,
    #[serde(default)]
    pub career_goals: String,
    #[serde(default)]
    pub future_plans: Option<String>,
    #[serde(default)]
    pub strengths: String,
    #[serde(default)]
    pub experience: String,
    #[serde(default)]
    pub work_experience: Option<String>,
    #[serde(default)]
    pub volunteer_work: Option<String>,
    #[serde(default)]
    pub achievements: Option<String>,
    #[serde(default)]
    pub personal_story: Option<String>,
    #[serde(default)]
    pub limit_type: LengthUnit,
    #[serde(default = "default_min_limit")]
    pub min_limit: u32,
    #[serde(default = "default_max_limit")]
    pub max_limit: u32,
}

impl DocumentRequest {
    /// Checks required fields and length bounds. Must pass before the prompt is built.
    pub fn validate(&self) -> Result<(), AppError> {
        let mut errors = FieldErrors::new();
        errors
            .require("name", &self.name)
            .require("degree", &self.degree)
            .require("field", &self.field)
            .require("country", &self.country)
            .require("previous_education", &self.previous_education)
            .require("motivation", &self.motivation)
            .require("reason_for_choice", &self.reason_for_choice)
            .require("career_goals", &self.career_goals)
            .require("strengths", &self.strengths)
            .require("experience", &self.experience);

        let upper = self.limit_type.upper_bound();
        if self.min_limit < 1 {
            errors.invalid("min_limit must be at least 1");
        }
        if self.max_limit > upper {
            errors.invalid(format!(
                "max_limit must not exceed {upper} {}",
                self.limit_type.as_str()
            ));
        }
        if self.min_limit > self.max_limit {
            errors.invalid("min_limit must not exceed max_limit");
        }

        errors.into_result()
    }
}

/// Generated document returned to the client.
#[derive(Debug, Clone, Serialize)]
pub struct GeneratedDocument {
    pub id: Uuid,
    pub document_type: DocumentType,
    pub text: String,
    pub generated_at: DateTime<Utc>,
}
