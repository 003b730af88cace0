//! Small hand-weighted bundles for tests.

use crate::artifact::{ArtifactBundle, ArtifactFile, ModelMetadata};
use crate::classifier::{ClassifierModel, LinearSvc, LogisticRegression, MultiClass};
use crate::error::PredictionError;
use crate::features::FeatureVector;
use crate::label_encoder::LabelEncoder;
use crate::vectorizer::{Analyzer, Norm, TfidfVectorizer, Vectorizer, VectorizerModel};
use ndarray::{Array1, Array2};

pub const CATEGORIES: [&str; 4] = ["garbage", "others", "potholes", "streetlight"];

const TERMS: [&str; 15] = [
    "garbage", "waste", "collected", "road", "potholes", "pothole", "street", "light", "lamp",
    "water", "noise", "कचर", "सड", "गड", "ளக",
];

// (class, term, weight)
const WEIGHTS: [(usize, &str, f64); 15] = [
    (0, "garbage", 3.0),
    (0, "waste", 2.0),
    (0, "collected", 1.5),
    (0, "कचर", 3.0),
    (1, "water", 2.0),
    (1, "noise", 2.0),
    (2, "road", 2.0),
    (2, "potholes", 3.0),
    (2, "pothole", 3.0),
    (2, "सड", 2.0),
    (2, "गड", 3.0),
    (3, "street", 2.0),
    (3, "light", 3.0),
    (3, "lamp", 2.0),
    (3, "ளக", 3.0),
];

fn coefficients() -> Array2<f64> {
    let mut coef = Array2::zeros((CATEGORIES.len(), TERMS.len()));
    for (class, term, weight) in WEIGHTS {
        let col = TERMS
            .iter()
            .position(|t| *t == term)
            .expect("fixture term is in the vocabulary");
        coef[[class, col]] += weight;
    }
    coef
}

fn vectorizer() -> VectorizerModel {
    VectorizerModel::Tfidf(TfidfVectorizer {
        vocabulary: TERMS
            .iter()
            .enumerate()
            .map(|(i, t)| (t.to_string(), i))
            .collect(),
        analyzer: Analyzer::Word,
        ngram_range: (1, 1),
        lowercase: true,
        idf: vec![1.0; TERMS.len()],
        sublinear_tf: false,
        norm: Norm::L2,
    })
}

fn label_encoder() -> LabelEncoder {
    LabelEncoder::new(CATEGORIES.iter().map(|c| c.to_string()).collect())
}

fn intercept() -> Array1<f64> {
    Array1::from(vec![0.0, 0.5, 0.0, 0.0])
}

pub fn metadata() -> ModelMetadata {
    ModelMetadata {
        model_name: "Logistic Regression".to_string(),
        accuracy: 0.9187,
        feature_count: TERMS.len(),
        training_samples: 1200,
    }
}

/// Multinomial logistic regression over a 15-term TF-IDF vocabulary.
pub fn demo_artifact_file() -> ArtifactFile {
    let meta = metadata();
    ArtifactFile {
        model_name: meta.model_name,
        accuracy: meta.accuracy,
        feature_count: meta.feature_count,
        training_samples: meta.training_samples,
        vectorizer: vectorizer(),
        classifier: ClassifierModel::LogisticRegression(LogisticRegression {
            coef: coefficients(),
            intercept: intercept(),
            multi_class: MultiClass::Multinomial,
        }),
        label_encoder: label_encoder(),
    }
}

pub fn demo_bundle() -> ArtifactBundle {
    ArtifactBundle::from_file(demo_artifact_file()).expect("demo bundle is consistent")
}

/// Same weights behind a classifier without probability output.
pub fn svc_bundle() -> ArtifactBundle {
    let mut file = demo_artifact_file();
    file.model_name = "Linear SVC".to_string();
    file.classifier = ClassifierModel::LinearSvc(LinearSvc {
        coef: coefficients(),
        intercept: intercept(),
    });
    ArtifactBundle::from_file(file).expect("svc bundle is consistent")
}

/// Vectorizer that fails on any text containing `poison`.
pub struct PoisonedVectorizer {
    inner: VectorizerModel,
    poison: String,
}

impl Vectorizer for PoisonedVectorizer {
    fn transform(&self, text: &str) -> Result<FeatureVector, PredictionError> {
        if text.contains(&self.poison) {
            return Err(PredictionError::Model(format!(
                "cannot vectorize text containing '{}'",
                self.poison
            )));
        }
        self.inner.transform(text)
    }

    fn n_features(&self) -> usize {
        self.inner.n_features()
    }
}

pub fn poisoned_bundle(poison: &str) -> ArtifactBundle {
    let file = demo_artifact_file();
    ArtifactBundle::new(
        metadata(),
        PoisonedVectorizer {
            inner: file.vectorizer,
            poison: poison.to_string(),
        },
        file.classifier,
        file.label_encoder,
    )
    .expect("poisoned bundle is consistent")
}
