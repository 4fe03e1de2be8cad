// All LLM prompt constants for the scholarship search flow.

pub const BACKGROUND_FALLBACK: &str = "not specified";

/// Scholarship prompt. Replace {degree_level}, {country}, {json_only} and
/// {background} before sending. The JSON example is literal.
pub const SCHOLARSHIP_PROMPT_TEMPLATE: &str = r#"As an international scholarship expert, recommend 5-10 fully funded scholarships for {degree_level} programs in {country} that don't require IELTS.
Applicant background: {background}.

Format response as valid JSON exactly like this:
{
  "scholarships": [
    {
      "title": "Scholarship Name",
      "degree": "Degree Level",
      "country": "Country",
      "description": "Detailed description (120+ characters)",
      "link": "https://official.website",
      "financialCoverage": "Fully Funded/Partial",
      "deadline": "Month Year or Rolling"
    }
  ]
}
{json_only}"#;
