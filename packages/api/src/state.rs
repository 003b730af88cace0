use complaint_model::{ArtifactBundle, ArtifactStore, ServiceError};
use std::sync::Arc;

pub type AppState = Arc<State>;

/// Shared, read-only request state.
pub struct State {
    pub store: ArtifactStore,
}

impl State {
    pub fn new(store: ArtifactStore) -> Self {
        Self { store }
    }

    pub fn model_loaded(&self) -> bool {
        self.store.loaded()
    }

    pub fn bundle(&self) -> Result<&ArtifactBundle, ServiceError> {
        self.store.get()
    }
}
