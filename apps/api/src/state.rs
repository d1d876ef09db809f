use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::TextGenerator;

/// Shared application state injected into all route handlers via Axum extractors.
/// Immutable after startup; every request builds its own document.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Generator built from the configured key, used when a request brings no key of its own.
    pub llm: Option<Arc<dyn TextGenerator>>,
}
