//! Response extraction — pulls an embedded JSON object out of free model text.
//!
//! The model often wraps its JSON in prose or code fences, so the object is
//! located first and parsed second. Failure never panics or errors: it yields
//! `Extraction::Fallback` and each flow substitutes its own fallback value.

use std::fmt;

use serde_json::Value;

/// How the JSON object is located inside the response text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExtractionStrategy {
    /// Span from the first `{` to the last `}`, inclusive. Breaks when the
    /// response carries more than one object or stray braces in prose.
    #[default]
    FirstLastBrace,
    /// First balanced object, tracking string literals and escapes.
    Balanced,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FallbackReason {
    NoOpeningBrace,
    NoClosingBrace,
    Unbalanced,
    InvalidJson(String),
    UnexpectedShape(String),
}

impl fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FallbackReason::NoOpeningBrace => write!(f, "response contains no '{{'"),
            FallbackReason::NoClosingBrace => write!(f, "response contains no '}}' after the first '{{'"),
            FallbackReason::Unbalanced => write!(f, "JSON object is never closed"),
            FallbackReason::InvalidJson(msg) => write!(f, "embedded JSON does not parse: {msg}"),
            FallbackReason::UnexpectedShape(msg) => write!(f, "unexpected JSON shape: {msg}"),
        }
    }
}

/// Outcome of an extraction: the parsed value, or the reason to fall back.
#[derive(Debug, Clone, PartialEq)]
pub enum Extraction<T> {
    Parsed(T),
    Fallback(FallbackReason),
}

impl<T> Extraction<T> {
    pub fn and_then<U>(self, f: impl FnOnce(T) -> Extraction<U>) -> Extraction<U> {
        match self {
            Extraction::Parsed(value) => f(value),
            Extraction::Fallback(reason) => Extraction::Fallback(reason),
        }
    }
}

/// Returns the slice of `text` that should hold the JSON object.
pub fn locate_json_object(text: &str, strategy: ExtractionStrategy) -> Result<&str, FallbackReason> {
    match strategy {
        ExtractionStrategy::FirstLastBrace => first_to_last_brace(text),
        ExtractionStrategy::Balanced => first_balanced_object(text),
    }
}

fn first_to_last_brace(text: &str) -> Result<&str, FallbackReason> {
    let start = text.find('{').ok_or(FallbackReason::NoOpeningBrace)?;
    let end = text.rfind('}').ok_or(FallbackReason::NoClosingBrace)?;
    if end < start {
        return Err(FallbackReason::NoClosingBrace);
    }
    Ok(&text[start..=end])
}

fn first_balanced_object(text: &str) -> Result<&str, FallbackReason> {
    let start = text.find('{').ok_or(FallbackReason::NoOpeningBrace)?;

    let mut depth = 0usize;
    let mut in_string = false;
    let mut escape = false;

    // Braces and quotes are ASCII, so byte offsets are always char boundaries here.
    for (offset, byte) in text.as_bytes()[start..].iter().enumerate() {
        if escape {
            escape = false;
            continue;
        }
        match byte {
            b'\\' if in_string => escape = true,
            b'"' => in_string = !in_string,
            b'{' if !in_string => depth += 1,
            b'}' if !in_string => {
                depth -= 1;
                if depth == 0 {
                    return Ok(&text[start..=start + offset]);
                }
            }
            _ => {}
        }
    }

    if text[start..].contains('}') {
        Err(FallbackReason::Unbalanced)
    } else {
        Err(FallbackReason::NoClosingBrace)
    }
}

/// Locates and parses the embedded object as untyped JSON.
pub fn extract_value(text: &str, strategy: ExtractionStrategy) -> Extraction<Value> {
    let candidate = match locate_json_object(text, strategy) {
        Ok(candidate) => candidate,
        Err(reason) => return Extraction::Fallback(reason),
    };
    match serde_json::from_str::<Value>(candidate) {
        Ok(value) => Extraction::Parsed(value),
        Err(e) => Extraction::Fallback(FallbackReason::InvalidJson(e.to_string())),
    }
}

/// Reads `key` as a sequence of strings, skipping non-string items.
/// Missing or non-array values yield an empty sequence.
pub fn string_list(object: &Value, key: &str) -> Vec<String> {
    object
        .get(key)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}
