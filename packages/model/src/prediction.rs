//! Single and batch prediction over the loaded bundle.

use crate::artifact::ArtifactBundle;
use crate::error::{PredictionError, ServiceError};
use crate::label_encoder::LabelDecoder;
use crate::store::ArtifactStore;
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Category reported for batch items whose prediction failed.
pub const ERROR_CATEGORY: &str = "error";

/// Outcome of the transform → predict → decode pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub category: String,
    /// Probability of `category` in percent.
    pub confidence: Option<f64>,
    /// Every known category's probability in percent.
    pub all_probabilities: Option<BTreeMap<String, f64>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct PredictionResult {
    /// Predicted category, or `"error"` for a failed batch item
    pub category: String,
    /// Prediction confidence (0-100)
    pub confidence: Option<f64>,
    /// All category probabilities (0-100)
    pub all_probabilities: Option<BTreeMap<String, f64>>,
    /// Input text
    pub text: String,
    /// Prediction timestamp
    pub timestamp: String,
    /// Failure message for a batch item
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct BatchResult {
    pub predictions: Vec<PredictionResult>,
    pub total: usize,
    pub timestamp: String,
}

/// ISO-8601 UTC timestamp with millisecond precision.
pub fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

impl PredictionResult {
    pub fn from_prediction(prediction: Prediction, text: impl Into<String>) -> Self {
        Self {
            category: prediction.category,
            confidence: prediction.confidence,
            all_probabilities: prediction.all_probabilities,
            text: text.into(),
            timestamp: timestamp(),
            error: None,
        }
    }

    /// Error marker standing in for a failed batch item.
    pub fn failed(text: impl Into<String>, error: &ServiceError) -> Self {
        Self {
            category: ERROR_CATEGORY.to_string(),
            confidence: None,
            all_probabilities: None,
            text: text.into(),
            timestamp: timestamp(),
            error: Some(error.to_string()),
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

/// Runs one text through the bundle.
pub fn classify(bundle: &ArtifactBundle, text: &str) -> Result<Prediction, PredictionError> {
    if text.trim().is_empty() {
        return Err(PredictionError::EmptyText);
    }

    let features = bundle.vectorizer().transform(text)?;
    let classifier = bundle.classifier();
    let index = classifier.predict(&features)?;

    let encoder = bundle.label_encoder();
    let category = encoder.decode(index)?.to_string();

    let Some(proba) = classifier.predict_proba(&features)? else {
        return Ok(Prediction {
            category,
            confidence: None,
            all_probabilities: None,
        });
    };

    let classes = encoder.classes();
    if proba.len() != classes.len() {
        return Err(PredictionError::Model(format!(
            "classifier returned {} probabilities for {} classes",
            proba.len(),
            classes.len()
        )));
    }
    if proba.iter().any(|p| !p.is_finite()) {
        return Err(PredictionError::NonFinite);
    }

    let all_probabilities = classes
        .iter()
        .zip(proba.iter())
        .map(|(class, p)| (class.clone(), p * 100.0))
        .collect();

    Ok(Prediction {
        category,
        confidence: Some(proba[index] * 100.0),
        all_probabilities: Some(all_probabilities),
    })
}

/// Predicts a single text. Fails with [`ServiceError::Unavailable`] when no
/// model is loaded.
pub fn predict_one(store: &ArtifactStore, text: &str) -> Result<PredictionResult, ServiceError> {
    let bundle = store.get()?;
    let prediction = classify(bundle, text)?;
    Ok(PredictionResult::from_prediction(prediction, text))
}

/// Predicts every text in order. Failures become error markers at their
/// position and never abort the batch.
pub fn predict_batch<S: AsRef<str>>(store: &ArtifactStore, texts: &[S]) -> BatchResult {
    let predictions: Vec<PredictionResult> = texts
        .iter()
        .map(|text| {
            let text = text.as_ref();
            predict_one(store, text).unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Batch item prediction failed");
                PredictionResult::failed(text, &e)
            })
        })
        .collect();

    BatchResult {
        total: predictions.len(),
        predictions,
        timestamp: timestamp(),
    }
}
