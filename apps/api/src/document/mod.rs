// Document generation flow: statement of purpose / letter of motivation.
// Request record → prompt → one Gemini call → generated text returned verbatim.

pub mod generator;
pub mod handlers;
pub mod models;
pub mod prompts;
