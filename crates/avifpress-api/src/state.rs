//! Application state shared across handlers.

use std::sync::Arc;

use avifpress_core::Config;
use avifpress_services::Converter;
use avifpress_storage::ArtifactStore;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub store: Arc<ArtifactStore>,
    pub converter: Converter,
}
