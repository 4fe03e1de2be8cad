// All LLM prompt constants for the CV analysis flow.

/// CV content beyond this many characters is cut before prompting.
pub const MAX_CV_CHARS: usize = 10_000;

/// CV analysis prompt. Replace `{json_only}` and `{cv_content}` before sending.
pub const CV_ANALYSIS_PROMPT_TEMPLATE: &str = r#"Analyze this CV content and provide specific feedback in JSON format with these keys:
"issues" (array of strings), "suggestions" (array of strings).
Be very specific to the actual content. If the CV is empty or invalid, say so.
{json_only}

CV Content:
{cv_content}"#;
