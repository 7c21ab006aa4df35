use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::ReflectionGenerator;
use crate::notion::JournalStore;

/// Shared application state injected into the trigger handler via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Journal database. Default: `NotionClient`.
    pub store: Arc<dyn JournalStore>,
    /// Completion service. Default: `LlmClient`.
    pub generator: Arc<dyn ReflectionGenerator>,
}
