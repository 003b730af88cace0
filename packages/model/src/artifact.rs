//! Serialized model bundle and its validated in-memory form.
//!
//! A bundle is stored either as JSON (`.json`) or as named MessagePack (any
//! other extension). The on-disk [`ArtifactFile`] carries concrete component
//! types; [`ArtifactBundle`] holds them behind the capability traits.

use crate::classifier::{Classifier, ClassifierModel};
use crate::error::LoadError;
use crate::label_encoder::{LabelDecoder, LabelEncoder, validate_classes};
use crate::vectorizer::{Vectorizer, VectorizerModel};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactFormat {
    Json,
    MessagePack,
}

impl ArtifactFormat {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => ArtifactFormat::Json,
            _ => ArtifactFormat::MessagePack,
        }
    }
}

/// Descriptive fields reported by `/model/info`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelMetadata {
    pub model_name: String,
    /// Held-out accuracy in `0.0..=1.0`.
    pub accuracy: f64,
    pub feature_count: usize,
    pub training_samples: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactFile {
    pub model_name: String,
    pub accuracy: f64,
    pub feature_count: usize,
    pub training_samples: usize,
    pub vectorizer: VectorizerModel,
    pub classifier: ClassifierModel,
    pub label_encoder: LabelEncoder,
}

impl ArtifactFile {
    pub fn from_slice(bytes: &[u8], format: ArtifactFormat) -> Result<Self, LoadError> {
        Ok(match format {
            ArtifactFormat::Json => serde_json::from_slice(bytes)?,
            ArtifactFormat::MessagePack => rmp_serde::from_slice(bytes)?,
        })
    }

    pub fn to_json_vec(&self) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec_pretty(self)
    }

    /// MessagePack with field names, so tagged component enums and serde
    /// defaults survive the round trip.
    pub fn to_msgpack_vec(&self) -> Result<Vec<u8>, rmp_serde::encode::Error> {
        rmp_serde::to_vec_named(self)
    }

    pub fn write(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        let path = path.as_ref();
        let bytes = match ArtifactFormat::from_path(path) {
            ArtifactFormat::Json => self.to_json_vec().map_err(std::io::Error::other)?,
            ArtifactFormat::MessagePack => self.to_msgpack_vec().map_err(std::io::Error::other)?,
        };
        std::fs::write(path, bytes)
    }

    fn metadata(&self) -> ModelMetadata {
        ModelMetadata {
            model_name: self.model_name.clone(),
            accuracy: self.accuracy,
            feature_count: self.feature_count,
            training_samples: self.training_samples,
        }
    }
}

/// Loaded, validated model components. Immutable once built.
pub struct ArtifactBundle {
    metadata: ModelMetadata,
    vectorizer: Box<dyn Vectorizer>,
    classifier: Box<dyn Classifier>,
    label_encoder: Box<dyn LabelDecoder>,
}

impl std::fmt::Debug for ArtifactBundle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArtifactBundle")
            .field("metadata", &self.metadata)
            .field("classes", &self.label_encoder.classes())
            .finish_non_exhaustive()
    }
}

impl ArtifactBundle {
    /// Assembles a bundle from arbitrary components, checking that they fit
    /// together: vectorizer output width equals classifier input width, the
    /// classifier's classes match the label encoder, and the metadata agrees.
    /// Label classes must be sorted and unique so probability maps keep the
    /// encoder's order.
    pub fn new(
        metadata: ModelMetadata,
        vectorizer: impl Vectorizer + 'static,
        classifier: impl Classifier + 'static,
        label_encoder: impl LabelDecoder + 'static,
    ) -> Result<Self, LoadError> {
        if metadata.model_name.trim().is_empty() {
            return Err(LoadError::Invalid("model_name is empty".to_string()));
        }
        if !(0.0..=1.0).contains(&metadata.accuracy) {
            return Err(LoadError::Invalid(format!(
                "accuracy {} is outside 0..=1",
                metadata.accuracy
            )));
        }
        validate_classes(label_encoder.classes()).map_err(LoadError::Invalid)?;
        if vectorizer.n_features() != classifier.n_features() {
            return Err(LoadError::Incompatible(format!(
                "vectorizer produces {} features, classifier expects {}",
                vectorizer.n_features(),
                classifier.n_features()
            )));
        }
        if metadata.feature_count != vectorizer.n_features() {
            return Err(LoadError::Incompatible(format!(
                "feature_count is {}, vectorizer produces {}",
                metadata.feature_count,
                vectorizer.n_features()
            )));
        }
        if classifier.n_classes() != label_encoder.classes().len() {
            return Err(LoadError::Incompatible(format!(
                "classifier predicts {} classes, label encoder knows {}",
                classifier.n_classes(),
                label_encoder.classes().len()
            )));
        }

        Ok(Self {
            metadata,
            vectorizer: Box::new(vectorizer),
            classifier: Box::new(classifier),
            label_encoder: Box::new(label_encoder),
        })
    }

    pub fn from_file(file: ArtifactFile) -> Result<Self, LoadError> {
        file.vectorizer.validate().map_err(LoadError::Invalid)?;
        file.classifier.validate().map_err(LoadError::Invalid)?;
        file.label_encoder.validate().map_err(LoadError::Invalid)?;

        let metadata = file.metadata();
        Self::new(metadata, file.vectorizer, file.classifier, file.label_encoder)
    }

    /// Reads and validates the bundle at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let format = ArtifactFormat::from_path(path);
        tracing::debug!(path = %path.display(), ?format, "Reading model artifact");

        let bytes = std::fs::read(path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                LoadError::NotFound(path.to_path_buf())
            } else {
                LoadError::Io {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;

        Self::from_file(ArtifactFile::from_slice(&bytes, format)?)
    }

    pub fn metadata(&self) -> &ModelMetadata {
        &self.metadata
    }

    pub fn vectorizer(&self) -> &dyn Vectorizer {
        self.vectorizer.as_ref()
    }

    pub fn classifier(&self) -> &dyn Classifier {
        self.classifier.as_ref()
    }

    pub fn label_encoder(&self) -> &dyn LabelDecoder {
        self.label_encoder.as_ref()
    }

    pub fn categories(&self) -> &[String] {
        self.label_encoder.classes()
    }
}
