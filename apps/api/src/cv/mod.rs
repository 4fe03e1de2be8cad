// CV analysis flow: CV text (pasted or extracted from an upload) → prompt →
// one Gemini call → issues/suggestions JSON, degrading to a fixed fallback.

pub mod analyzer;
pub mod handlers;
pub mod models;
pub mod prompts;
pub mod upload;
