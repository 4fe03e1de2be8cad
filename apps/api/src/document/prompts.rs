// All LLM prompt constants for the document generation flow.

/// Document prompt. Placeholders:
/// {document_title}, {name}, {degree}, {field}, {university_phrase}, {country},
/// {min_limit}, {max_limit}, {limit_type}, {previous_education}, {university},
/// {motivation}, {reason_for_choice}, {career_goals}, {future_plans_line},
/// {strengths}, {experience}, {optional_experience_lines}, {special_instructions}
///
/// The `*_line(s)` placeholders expand to nothing when their source fields are blank.
pub const DOCUMENT_PROMPT_TEMPLATE: &str = r#"Generate a {document_title} for {name} applying for {degree} in {field} at {university_phrase} in {country}.

Requirements:
- Length: {min_limit}-{max_limit} {limit_type}
- Tone: Professional yet personal
- Structure: Clear paragraphs with logical flow

Applicant Details:
1. Personal & Academic:
   - Previous Education: {previous_education}
   - University: {university}

2. Motivation & Goals:
   - Motivation: {motivation}
   - Reason for choice: {reason_for_choice}
   - Career Goals: {career_goals}
{future_plans_line}   - Strengths: {strengths}

3. Experience:
   - Projects/Research: {experience}
{optional_experience_lines}
Special Instructions:
{special_instructions}
"#;

/// Statement-of-purpose instructions. Replace `{field}` before use.
pub const SOP_INSTRUCTIONS: &str = "\
- Start with an engaging hook
- Highlight academic background
- Mention specific university resources
- Include the host country's progress in {field}
- Professional tone";

pub const LOM_INSTRUCTIONS: &str = "\
- Focus on personal motivation
- Emotional connection to the field
- Cultural exchange benefits
- Humble and grateful tone";

pub const UNIVERSITY_PHRASE_FALLBACK: &str = "a university";
pub const UNIVERSITY_FALLBACK: &str = "Not specified";
