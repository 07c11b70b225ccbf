use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::CompletionClient;

/// Shared application state injected into all route handlers via Axum
/// extractors. Constructed once at process start; the LLM client is a trait
/// object so tests can substitute a stub.
#[derive(Clone)]
pub struct AppState {
    pub llm: Arc<dyn CompletionClient>,
    pub config: Config,
}
