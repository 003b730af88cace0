//! Fitted linear classifiers.
//!
//! Weights are dense `ndarray` matrices with one row per class (a single row
//! for binary linear models, as scikit-learn stores them).

use crate::error::PredictionError;
use crate::features::FeatureVector;
use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Feature vector → class index capability, optionally with probabilities.
pub trait Classifier: Send + Sync {
    fn n_features(&self) -> usize;

    fn n_classes(&self) -> usize;

    fn predict(&self, features: &FeatureVector) -> Result<usize, PredictionError>;

    /// Probability for every class in class-index order, or `None` when the
    /// model has no probabilistic output.
    fn predict_proba(
        &self,
        features: &FeatureVector,
    ) -> Result<Option<Array1<f64>>, PredictionError>;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MultiClass {
    #[default]
    Multinomial,
    Ovr,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogisticRegression {
    pub coef: Array2<f64>,
    pub intercept: Array1<f64>,
    #[serde(default)]
    pub multi_class: MultiClass,
}

/// Linear support vector classifier; decision function only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearSvc {
    pub coef: Array2<f64>,
    pub intercept: Array1<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MultinomialNb {
    pub class_log_prior: Array1<f64>,
    pub feature_log_prob: Array2<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
/// # Serialized classifier variants
pub enum ClassifierModel {
    LogisticRegression(LogisticRegression),
    LinearSvc(LinearSvc),
    MultinomialNb(MultinomialNb),
}

impl fmt::Display for ClassifierModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClassifierModel::LogisticRegression(_) => write!(f, "Logistic Regression"),
            ClassifierModel::LinearSvc(_) => write!(f, "Linear SVC"),
            ClassifierModel::MultinomialNb(_) => write!(f, "Multinomial Naive Bayes"),
        }
    }
}

fn check_dim(features: &FeatureVector, expected: usize) -> Result<(), PredictionError> {
    if features.dim() != expected {
        return Err(PredictionError::DimensionMismatch {
            expected,
            actual: features.dim(),
        });
    }
    Ok(())
}

fn linear_scores(
    coef: &Array2<f64>,
    intercept: &Array1<f64>,
    features: &FeatureVector,
) -> Result<Array1<f64>, PredictionError> {
    check_dim(features, coef.ncols())?;
    let scores: Array1<f64> = coef
        .rows()
        .into_iter()
        .zip(intercept.iter())
        .map(|(row, b)| features.dot(row) + b)
        .collect();
    if scores.iter().any(|s| !s.is_finite()) {
        return Err(PredictionError::NonFinite);
    }
    Ok(scores)
}

/// First index of the maximum, matching `numpy.argmax`.
fn argmax(values: &Array1<f64>) -> usize {
    let mut best = 0;
    for (i, v) in values.iter().enumerate() {
        if *v > values[best] {
            best = i;
        }
    }
    best
}

fn linear_predict(scores: &Array1<f64>) -> usize {
    if scores.len() == 1 {
        usize::from(scores[0] > 0.0)
    } else {
        argmax(scores)
    }
}

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

fn softmax(scores: &Array1<f64>) -> Array1<f64> {
    let max = scores.fold(f64::NEG_INFINITY, |m, v| m.max(*v));
    let exp = scores.mapv(|s| (s - max).exp());
    let sum = exp.sum();
    exp / sum
}

fn validate_linear(coef: &Array2<f64>, intercept: &Array1<f64>) -> Result<(), String> {
    if coef.nrows() == 0 || coef.ncols() == 0 {
        return Err("classifier has an empty coefficient matrix".to_string());
    }
    if intercept.len() != coef.nrows() {
        return Err(format!(
            "classifier has {} intercepts for {} coefficient rows",
            intercept.len(),
            coef.nrows()
        ));
    }
    Ok(())
}

fn linear_classes(coef: &Array2<f64>) -> usize {
    if coef.nrows() == 1 { 2 } else { coef.nrows() }
}

impl Classifier for LogisticRegression {
    fn n_features(&self) -> usize {
        self.coef.ncols()
    }

    fn n_classes(&self) -> usize {
        linear_classes(&self.coef)
    }

    fn predict(&self, features: &FeatureVector) -> Result<usize, PredictionError> {
        let scores = linear_scores(&self.coef, &self.intercept, features)?;
        Ok(linear_predict(&scores))
    }

    fn predict_proba(
        &self,
        features: &FeatureVector,
    ) -> Result<Option<Array1<f64>>, PredictionError> {
        let scores = linear_scores(&self.coef, &self.intercept, features)?;
        if scores.len() == 1 {
            let p = sigmoid(scores[0]);
            return Ok(Some(Array1::from(vec![1.0 - p, p])));
        }

        let proba = match self.multi_class {
            MultiClass::Multinomial => softmax(&scores),
            MultiClass::Ovr => {
                let p = scores.mapv(sigmoid);
                let sum = p.sum();
                p / sum
            }
        };
        Ok(Some(proba))
    }
}

impl Classifier for LinearSvc {
    fn n_features(&self) -> usize {
        self.coef.ncols()
    }

    fn n_classes(&self) -> usize {
        linear_classes(&self.coef)
    }

    fn predict(&self, features: &FeatureVector) -> Result<usize, PredictionError> {
        let scores = linear_scores(&self.coef, &self.intercept, features)?;
        Ok(linear_predict(&scores))
    }

    fn predict_proba(
        &self,
        _features: &FeatureVector,
    ) -> Result<Option<Array1<f64>>, PredictionError> {
        Ok(None)
    }
}

impl MultinomialNb {
    fn joint_log_likelihood(
        &self,
        features: &FeatureVector,
    ) -> Result<Array1<f64>, PredictionError> {
        check_dim(features, self.feature_log_prob.ncols())?;
        let jll: Array1<f64> = self
            .feature_log_prob
            .rows()
            .into_iter()
            .zip(self.class_log_prior.iter())
            .map(|(row, prior)| features.dot(row) + prior)
            .collect();
        if jll.iter().any(|s| !s.is_finite()) {
            return Err(PredictionError::NonFinite);
        }
        Ok(jll)
    }
}

impl Classifier for MultinomialNb {
    fn n_features(&self) -> usize {
        self.feature_log_prob.ncols()
    }

    fn n_classes(&self) -> usize {
        self.feature_log_prob.nrows()
    }

    fn predict(&self, features: &FeatureVector) -> Result<usize, PredictionError> {
        Ok(argmax(&self.joint_log_likelihood(features)?))
    }

    fn predict_proba(
        &self,
        features: &FeatureVector,
    ) -> Result<Option<Array1<f64>>, PredictionError> {
        Ok(Some(softmax(&self.joint_log_likelihood(features)?)))
    }
}

impl ClassifierModel {
    pub fn validate(&self) -> Result<(), String> {
        match self {
            ClassifierModel::LogisticRegression(m) => validate_linear(&m.coef, &m.intercept),
            ClassifierModel::LinearSvc(m) => validate_linear(&m.coef, &m.intercept),
            ClassifierModel::MultinomialNb(m) => {
                if m.feature_log_prob.nrows() < 2 || m.feature_log_prob.ncols() == 0 {
                    return Err(
                        "naive bayes model needs at least two classes and one feature".to_string(),
                    );
                }
                if m.class_log_prior.len() != m.feature_log_prob.nrows() {
                    return Err(format!(
                        "naive bayes model has {} priors for {} classes",
                        m.class_log_prior.len(),
                        m.feature_log_prob.nrows()
                    ));
                }
                Ok(())
            }
        }
    }

    fn inner(&self) -> &dyn Classifier {
        match self {
            ClassifierModel::LogisticRegression(m) => m,
            ClassifierModel::LinearSvc(m) => m,
            ClassifierModel::MultinomialNb(m) => m,
        }
    }
}

impl Classifier for ClassifierModel {
    fn n_features(&self) -> usize {
        self.inner().n_features()
    }

    fn n_classes(&self) -> usize {
        self.inner().n_classes()
    }

    fn predict(&self, features: &FeatureVector) -> Result<usize, PredictionError> {
        self.inner().predict(features)
    }

    fn predict_proba(
        &self,
        features: &FeatureVector,
    ) -> Result<Option<Array1<f64>>, PredictionError> {
        self.inner().predict_proba(features)
    }
}
