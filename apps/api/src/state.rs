use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::extract::ExtractionStrategy;
use crate::llm_client::TextGenerator;

/// Shared application state injected into all route handlers via Axum extractors.
///
/// Holds no per-request data: every flow invocation is independent.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable text generator. Default: `GeminiClient`.
    pub llm: Arc<dyn TextGenerator>,
    pub config: Config,
}

impl AppState {
    pub fn extraction_strategy(&self) -> ExtractionStrategy {
        self.config.extraction_strategy
    }
}
