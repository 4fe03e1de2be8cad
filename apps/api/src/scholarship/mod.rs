// Scholarship search flow: degree level + country (+ background) → prompt →
// one Gemini call → scholarships JSON, filtered to entries worth showing.

pub mod finder;
pub mod handlers;
pub mod models;
pub mod prompts;
