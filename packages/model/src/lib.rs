//! Complaint classifier model
//!
//! Loads a serialized bundle (vectorizer, classifier, label encoder and
//! metadata) and runs the transform → predict → decode pipeline for single
//! texts and ordered batches.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use complaint_model::{ArtifactStore, predict_batch, predict_one};
//!
//! let store = ArtifactStore::load("models/complaint_classifier.msgpack")?;
//! let result = predict_one(&store, "The road has many potholes")?;
//! let batch = predict_batch(&store, &["Street light not working", "कचरा नहीं उठाया गया"]);
//! ```

pub mod artifact;
pub mod classifier;
pub mod error;
pub mod features;
pub mod label_encoder;
pub mod prediction;
pub mod store;
pub mod vectorizer;

#[cfg(any(test, feature = "test-fixtures"))]
pub mod fixtures;

#[cfg(test)]
mod tests;

pub use artifact::{ArtifactBundle, ArtifactFile, ArtifactFormat, ModelMetadata};
pub use classifier::{Classifier, ClassifierModel};
pub use error::{LoadError, PredictionError, ServiceError};
pub use features::FeatureVector;
pub use label_encoder::{LabelDecoder, LabelEncoder};
pub use prediction::{
    BatchResult, ERROR_CATEGORY, Prediction, PredictionResult, classify, predict_batch,
    predict_one,
};
pub use store::ArtifactStore;
pub use vectorizer::{Vectorizer, VectorizerModel};
