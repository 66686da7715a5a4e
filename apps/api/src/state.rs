use std::sync::Arc;

use crate::analysis::Analyzer;
use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Extraction + model pipeline. Built once in `main`, swapped for fakes in tests.
    pub analyzer: Arc<Analyzer>,
    pub config: Config,
}
