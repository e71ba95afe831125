use std::sync::Arc;

use crate::config::Config;
use crate::export::ArtifactSink;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Where `POST /api/v1/exports` saves artifacts. Default: `FsSink` over `EXPORT_DIR`.
    pub sink: Arc<dyn ArtifactSink>,
}
