//! Request validation shared by every flow.
//!
//! Prompt builders assume a valid record; handlers run these checks first so a
//! bad request never reaches the dispatcher.

use crate::errors::AppError;

/// Collects every problem in a request before reporting, so the client can
/// highlight all offending fields at once.
#[derive(Debug, Default)]
pub struct FieldErrors {
    missing: Vec<&'static str>,
    invalid: Vec<String>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `field` as missing when `value` is empty or whitespace.
    pub fn require(&mut self, field: &'static str, value: &str) -> &mut Self {
        if is_blank(value) {
            self.missing.push(field);
        }
        self
    }

    pub fn invalid(&mut self, message: impl Into<String>) -> &mut Self {
        self.invalid.push(message.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.missing.is_empty() && self.invalid.is_empty()
    }

    pub fn into_result(self) -> Result<(), AppError> {
        if self.is_empty() {
            return Ok(());
        }
        let mut parts = Vec::new();
        if !self.missing.is_empty() {
            parts.push(format!("missing required fields: {}", self.missing.join(", ")));
        }
        parts.extend(self.invalid);
        Err(AppError::Validation(parts.join("; ")))
    }
}

pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// `Some(trimmed)` for non-blank optional input.
pub fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collects_all_missing_fields() {
        let mut errors = FieldErrors::new();
        errors.require("name", "").require("country", "  ").require("degree", "MS");
        let err = errors.into_result().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Validation error: missing required fields: name, country"
        );
    }

    #[test]
    fn test_invalid_messages_follow_missing() {
        let mut errors = FieldErrors::new();
        errors.require("name", "").invalid("min_limit must not exceed max_limit");
        let msg = errors.into_result().unwrap_err().to_string();
        assert!(msg.ends_with("missing required fields: name; min_limit must not exceed max_limit"));
    }

    #[test]
    fn test_no_errors_is_ok() {
        let mut errors = FieldErrors::new();
        errors.require("name", "Ada");
        assert!(errors.into_result().is_ok());
    }

    #[test]
    fn test_non_blank() {
        assert_eq!(non_blank(Some("  x ")), Some("x"));
        assert_eq!(non_blank(Some("   ")), None);
        assert_eq!(non_blank(None), None);
    }
}
