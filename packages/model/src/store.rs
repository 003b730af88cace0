use crate::artifact::ArtifactBundle;
use crate::error::{LoadError, ServiceError};
use std::path::Path;
use std::sync::Arc;

/// Write-once handle on the process' model bundle.
///
/// Cloning shares the same bundle. An empty store represents a service that
/// started without a model.
#[derive(Debug, Clone, Default)]
pub struct ArtifactStore {
    bundle: Option<Arc<ArtifactBundle>>,
}

impl ArtifactStore {
    pub fn empty() -> Self {
        Self { bundle: None }
    }

    pub fn with_bundle(bundle: ArtifactBundle) -> Self {
        Self {
            bundle: Some(Arc::new(bundle)),
        }
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        Ok(Self::with_bundle(ArtifactBundle::load(path)?))
    }

    pub fn loaded(&self) -> bool {
        self.bundle.is_some()
    }

    pub fn get(&self) -> Result<&ArtifactBundle, ServiceError> {
        self.bundle.as_deref().ok_or(ServiceError::Unavailable)
    }
}
