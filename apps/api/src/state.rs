use std::sync::Arc;

use crate::backend::Analyzer;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable analysis backend. Production: `WebhookAnalyzer`; tests stub it.
    pub analyzer: Arc<dyn Analyzer>,
}
