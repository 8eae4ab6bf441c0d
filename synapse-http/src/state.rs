//! Shared state behind every handler.

use std::sync::Arc;

use synapse_api::{ArtifactSource, Reactivator};
use synapse_registry::RuntimeRegistry;

/// Everything the HTTP surface needs, owned by the host process.
pub struct AppState {
    /// Engine registrations and health probing.
    pub registry: Arc<RuntimeRegistry>,
    /// Where artifact bytes come from.
    pub artifacts: Arc<dyn ArtifactSource>,
    /// Told when a re-registration invalidates live executors. Optional;
    /// hosts that re-activate on demand run without one.
    pub reactivator: Option<Arc<dyn Reactivator>>,
}

impl AppState {
    /// State without a reactivator.
    pub fn new(registry: Arc<RuntimeRegistry>, artifacts: Arc<dyn ArtifactSource>) -> Self {
        Self {
            registry,
            artifacts,
            reactivator: None,
        }
    }

    /// Attach a reactivator to notify on runtime replacement.
    #[must_use]
    pub fn with_reactivator(mut self, reactivator: Arc<dyn Reactivator>) -> Self {
        self.reactivator = Some(reactivator);
        self
    }
}
