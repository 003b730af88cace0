use std::path::PathBuf;

/// Failures while reading an artifact bundle at startup.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("model artifact not found at {0}")]
    NotFound(PathBuf),
    #[error("failed to read model artifact {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed JSON artifact: {0}")]
    Json(#[from] serde_json::Error),
    #[error("malformed MessagePack artifact: {0}")]
    MessagePack(#[from] rmp_serde::decode::Error),
    #[error("invalid artifact: {0}")]
    Invalid(String),
    #[error("incompatible artifact components: {0}")]
    Incompatible(String),
}

/// Failures inside the transform → predict → decode pipeline for one text.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PredictionError {
    #[error("text must not be empty")]
    EmptyText,
    #[error("feature vector has {actual} dimensions, classifier expects {expected}")]
    DimensionMismatch { expected: usize, actual: usize },
    #[error("class index {index} is outside the {classes} known classes")]
    UnknownClass { index: usize, classes: usize },
    #[error("classifier produced non-finite scores")]
    NonFinite,
    #[error("{0}")]
    Model(String),
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ServiceError {
    #[error("Model not loaded")]
    Unavailable,
    #[error("Prediction error: {0}")]
    Prediction(#[from] PredictionError),
}
