use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::validation::{non_blank, FieldErrors};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DegreeLevel {
    #[serde(rename = "Bachelor's")]
    Bachelors,
    #[serde(rename = "Master's")]
    Masters,
    #[serde(rename = "PhD")]
    Phd,
}

impl DegreeLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            DegreeLevel::Bachelors => "Bachelor's",
            DegreeLevel::Masters => "Master's",
            DegreeLevel::Phd => "PhD",
        }
    }

    /// Accepts the display names plus a few common spellings.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "bachelor's" | "bachelors" | "bachelor" | "bs" | "ba" => Some(DegreeLevel::Bachelors),
            "master's" | "masters" | "master" | "ms" | "ma" => Some(DegreeLevel::Masters),
            "phd" | "ph.d." | "doctorate" => Some(DegreeLevel::Phd),
            _ => None,
        }
    }
}

/// Raw request body as submitted by the form.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScholarshipSearchRequest {
    #[serde(default)]
    pub degree_level: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub background: Option<String>,
}

/// Validated, immutable search record handed to the prompt builder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScholarshipQuery {
    pub degree_level: DegreeLevel,
    pub country: String,
    pub background: Option<String>,
}

impl ScholarshipSearchRequest {
    pub fn into_query(self) -> Result<ScholarshipQuery, AppError> {
        let mut errors = FieldErrors::new();
        errors
            .require("degree_level", &self.degree_level)
            .require("country", &self.country);

        let degree_level = DegreeLevel::parse(&self.degree_level);
        if degree_level.is_none() && !self.degree_level.trim().is_empty() {
            errors.invalid(format!(
                "degree_level must be one of Bachelor's, Master's, PhD (got '{}')",
                self.degree_level.trim()
            ));
        }
        errors.into_result()?;

        let degree_level = degree_level.ok_or_else(|| {
            AppError::Validation("missing required fields: degree_level".to_string())
        })?;

        Ok(ScholarshipQuery {
            degree_level,
            country: self.country.trim().to_string(),
            background: non_blank(self.background.as_deref()).map(str::to_string),
        })
    }
}

/// One recommended scholarship. Only `title` and `description` are guaranteed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScholarshipEntry {
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub degree: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub financial_coverage: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScholarshipSearchResponse {
    pub id: Uuid,
    pub degree_level: DegreeLevel,
    pub country: String,
    pub count: usize,
    pub scholarships: Vec<ScholarshipEntry>,
    pub searched_at: DateTime<Utc>,
}
