//! Fitted text vectorizers.
//!
//! Tokenization follows the scikit-learn `CountVectorizer` / `TfidfVectorizer`
//! analyzers so bundles exported from a Python training run can be described
//! one to one. Word tokens use Python's `\w` (letters, numbers, underscore);
//! combining marks such as virama or vowel signs split words the same way
//! scikit-learn splits them.

use crate::error::PredictionError;
use crate::features::FeatureVector;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::LazyLock;

// Python `(?u)\b\w\w+\b`: runs of two or more letters, numbers or underscores.
static TOKEN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\p{L}\p{N}_]{2,}").expect("token pattern is valid"));
static WHITE_SPACES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s\s+").expect("whitespace pattern is valid"));

/// Text → feature vector capability.
pub trait Vectorizer: Send + Sync {
    fn transform(&self, text: &str) -> Result<FeatureVector, PredictionError>;

    /// Output dimensionality.
    fn n_features(&self) -> usize;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Analyzer {
    #[default]
    Word,
    Char,
    CharWb,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Norm {
    L1,
    #[default]
    L2,
    None,
}

fn default_ngram_range() -> (usize, usize) {
    (1, 1)
}

fn default_lowercase() -> bool {
    true
}

/// Raw term counts over a fixed vocabulary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountVectorizer {
    pub vocabulary: HashMap<String, usize>,
    #[serde(default)]
    pub analyzer: Analyzer,
    #[serde(default = "default_ngram_range")]
    pub ngram_range: (usize, usize),
    #[serde(default = "default_lowercase")]
    pub lowercase: bool,
}

/// Term counts reweighted by inverse document frequency and normalized.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TfidfVectorizer {
    pub vocabulary: HashMap<String, usize>,
    #[serde(default)]
    pub analyzer: Analyzer,
    #[serde(default = "default_ngram_range")]
    pub ngram_range: (usize, usize),
    #[serde(default = "default_lowercase")]
    pub lowercase: bool,
    /// One weight per vocabulary column.
    pub idf: Vec<f64>,
    #[serde(default)]
    pub sublinear_tf: bool,
    #[serde(default)]
    pub norm: Norm,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
/// # Serialized vectorizer variants
pub enum VectorizerModel {
    Count(CountVectorizer),
    Tfidf(TfidfVectorizer),
}

impl fmt::Display for VectorizerModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VectorizerModel::Count(_) => write!(f, "Count Vectorizer"),
            VectorizerModel::Tfidf(_) => write!(f, "TF-IDF Vectorizer"),
        }
    }
}

/// Splits a document into the terms the vocabulary is keyed on.
pub fn analyze(
    text: &str,
    analyzer: Analyzer,
    ngram_range: (usize, usize),
    lowercase: bool,
) -> Vec<String> {
    let text = if lowercase {
        text.to_lowercase()
    } else {
        text.to_string()
    };
    let (min_n, max_n) = ngram_range;

    match analyzer {
        Analyzer::Word => {
            let tokens: Vec<&str> = TOKEN_PATTERN
                .find_iter(&text)
                .map(|m| m.as_str())
                .collect();
            word_ngrams(&tokens, min_n, max_n)
        }
        Analyzer::Char => {
            let normalized = WHITE_SPACES.replace_all(&text, " ");
            let chars: Vec<char> = normalized.chars().collect();
            char_ngrams(&chars, min_n, max_n)
        }
        Analyzer::CharWb => {
            let normalized = WHITE_SPACES.replace_all(&text, " ");
            let mut grams = Vec::new();
            for word in normalized.split_whitespace() {
                let padded: Vec<char> = std::iter::once(' ')
                    .chain(word.chars())
                    .chain(std::iter::once(' '))
                    .collect();
                for n in min_n..=max_n {
                    let mut offset = 0;
                    grams.push(padded[..n.min(padded.len())].iter().collect());
                    while offset + n < padded.len() {
                        offset += 1;
                        grams.push(padded[offset..offset + n].iter().collect());
                    }
                    // word shorter than n, emitted once above
                    if offset == 0 {
                        break;
                    }
                }
            }
            grams
        }
    }
}

fn word_ngrams(tokens: &[&str], min_n: usize, max_n: usize) -> Vec<String> {
    let mut grams = Vec::new();
    for n in min_n..=max_n {
        if n == 0 || n > tokens.len() {
            continue;
        }
        grams.extend(tokens.windows(n).map(|w| w.join(" ")));
    }
    grams
}

fn char_ngrams(chars: &[char], min_n: usize, max_n: usize) -> Vec<String> {
    let mut grams = Vec::new();
    for n in min_n..=max_n.min(chars.len()) {
        if n == 0 {
            continue;
        }
        grams.extend(chars.windows(n).map(|w| w.iter().collect::<String>()));
    }
    grams
}

fn count_terms(
    vocabulary: &HashMap<String, usize>,
    dim: usize,
    text: &str,
    analyzer: Analyzer,
    ngram_range: (usize, usize),
    lowercase: bool,
) -> FeatureVector {
    let pairs = analyze(text, analyzer, ngram_range, lowercase)
        .into_iter()
        .filter_map(|term| vocabulary.get(&term).map(|col| (*col, 1.0)))
        .collect();
    FeatureVector::from_pairs(dim, pairs)
}

fn validate_vocabulary(
    vocabulary: &HashMap<String, usize>,
    dim: usize,
    ngram_range: (usize, usize),
) -> Result<(), String> {
    let (min_n, max_n) = ngram_range;
    if min_n == 0 || min_n > max_n {
        return Err(format!("invalid ngram_range ({}, {})", min_n, max_n));
    }
    if vocabulary.is_empty() {
        return Err("vocabulary is empty".to_string());
    }

    let mut seen = HashSet::with_capacity(vocabulary.len());
    for (term, col) in vocabulary {
        if *col >= dim {
            return Err(format!("term '{}' maps to column {} of {}", term, col, dim));
        }
        if !seen.insert(*col) {
            return Err(format!("column {} is assigned to more than one term", col));
        }
    }
    Ok(())
}

impl CountVectorizer {
    pub fn validate(&self) -> Result<(), String> {
        validate_vocabulary(&self.vocabulary, self.vocabulary.len(), self.ngram_range)
    }
}

impl Vectorizer for CountVectorizer {
    fn transform(&self, text: &str) -> Result<FeatureVector, PredictionError> {
        Ok(count_terms(
            &self.vocabulary,
            self.n_features(),
            text,
            self.analyzer,
            self.ngram_range,
            self.lowercase,
        ))
    }

    fn n_features(&self) -> usize {
        self.vocabulary.len()
    }
}

impl TfidfVectorizer {
    pub fn validate(&self) -> Result<(), String> {
        if self.idf.len() != self.vocabulary.len() {
            return Err(format!(
                "idf has {} weights for a vocabulary of {} terms",
                self.idf.len(),
                self.vocabulary.len()
            ));
        }
        if self.idf.iter().any(|w| !w.is_finite()) {
            return Err("idf contains non-finite weights".to_string());
        }
        validate_vocabulary(&self.vocabulary, self.idf.len(), self.ngram_range)
    }
}

impl Vectorizer for TfidfVectorizer {
    fn transform(&self, text: &str) -> Result<FeatureVector, PredictionError> {
        let mut features = count_terms(
            &self.vocabulary,
            self.n_features(),
            text,
            self.analyzer,
            self.ngram_range,
            self.lowercase,
        );

        let sublinear = self.sublinear_tf;
        features.map_values(|col, tf| {
            let tf = if sublinear { 1.0 + tf.ln() } else { tf };
            tf * self.idf[col]
        });

        let norm = match self.norm {
            Norm::L1 => features.l1_norm(),
            Norm::L2 => features.l2_norm(),
            Norm::None => 1.0,
        };
        if norm > 0.0 {
            features.scale(1.0 / norm);
        }
        Ok(features)
    }

    fn n_features(&self) -> usize {
        self.idf.len()
    }
}

impl VectorizerModel {
    pub fn validate(&self) -> Result<(), String> {
        match self {
            VectorizerModel::Count(v) => v.validate(),
            VectorizerModel::Tfidf(v) => v.validate(),
        }
    }
}

impl Vectorizer for VectorizerModel {
    fn transform(&self, text: &str) -> Result<FeatureVector, PredictionError> {
        match self {
            VectorizerModel::Count(v) => v.transform(text),
            VectorizerModel::Tfidf(v) => v.transform(text),
        }
    }

    fn n_features(&self) -> usize {
        match self {
            VectorizerModel::Count(v) => v.n_features(),
            VectorizerModel::Tfidf(v) => v.n_features(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vocab(terms: &[&str]) -> HashMap<String, usize> {
        terms
            .iter()
            .enumerate()
            .map(|(i, t)| (t.to_string(), i))
            .collect()
    }

    #[test]
    fn test_word_analyzer_skips_single_chars() {
        let terms = analyze("A road, a pothole!", Analyzer::Word, (1, 1), true);
        assert_eq!(terms, vec!["road", "pothole"]);
    }

    #[test]
    fn test_word_bigrams() {
        let terms = analyze("street light broken", Analyzer::Word, (1, 2), true);
        assert_eq!(
            terms,
            vec!["street", "light", "broken", "street light", "light broken"]
        );
    }

    #[test]
    fn test_char_wb_pads_words() {
        let terms = analyze("ab", Analyzer::CharWb, (2, 2), true);
        assert_eq!(terms, vec![" a", "ab", "b "]);
    }

    #[test]
    fn test_char_wb_short_word_emitted_once() {
        let terms = analyze("a", Analyzer::CharWb, (4, 5), true);
        assert_eq!(terms, vec![" a "]);
    }

    #[test]
    fn test_word_analyzer_splits_devanagari_on_marks() {
        // nukta, vowel signs and virama end a token, as in Python's `re`
        let terms = analyze("सड़क पर बहुत गड्ढे हैं", Analyzer::Word, (1, 1), true);
        assert_eq!(terms, vec!["सड", "पर", "बह", "गड"]);
    }

    #[test]
    fn test_word_analyzer_tamil_and_digits() {
        let terms = analyze("தெரு விளக்கு 42 x_1", Analyzer::Word, (1, 1), true);
        assert_eq!(terms, vec!["ளக", "42", "x_1"]);
    }

    #[test]
    fn test_char_analyzer_collapses_whitespace() {
        let terms = analyze("a  b", Analyzer::Char, (3, 3), false);
        assert_eq!(terms, vec!["a b"]);
    }

    #[test]
    fn test_char_analyzer_handles_devanagari() {
        let terms = analyze("सड़क", Analyzer::Char, (1, 1), true);
        assert_eq!(terms.len(), "सड़क".chars().count());
    }

    #[test]
    fn test_count_vectorizer_counts_known_terms() {
        let v = CountVectorizer {
            vocabulary: vocab(&["road", "pothole"]),
            analyzer: Analyzer::Word,
            ngram_range: (1, 1),
            lowercase: true,
        };
        let features = v.transform("Road road POTHOLE unknown").unwrap();
        assert_eq!(features.entries(), &[(0, 2.0), (1, 1.0)]);
        assert_eq!(features.dim(), 2);
    }

    #[test]
    fn test_tfidf_is_l2_normalized() {
        let v = TfidfVectorizer {
            vocabulary: vocab(&["garbage", "collected"]),
            analyzer: Analyzer::Word,
            ngram_range: (1, 1),
            lowercase: true,
            idf: vec![2.0, 1.0],
            sublinear_tf: false,
            norm: Norm::L2,
        };
        let features = v.transform("garbage not collected").unwrap();
        let norm: f64 = features.entries().iter().map(|(_, x)| x * x).sum();
        assert!((norm - 1.0).abs() < 1e-12);
        assert!(features.entries()[0].1 > features.entries()[1].1);
    }

    #[test]
    fn test_tfidf_sublinear_tf() {
        let v = TfidfVectorizer {
            vocabulary: vocab(&["light"]),
            analyzer: Analyzer::Word,
            ngram_range: (1, 1),
            lowercase: true,
            idf: vec![1.0],
            sublinear_tf: true,
            norm: Norm::None,
        };
        let features = v.transform("light light light").unwrap();
        assert!((features.entries()[0].1 - (1.0 + 3f64.ln())).abs() < 1e-12);
    }

    #[test]
    fn test_validate_rejects_idf_length_mismatch() {
        let v = TfidfVectorizer {
            vocabulary: vocab(&["a1", "b2"]),
            analyzer: Analyzer::Word,
            ngram_range: (1, 1),
            lowercase: true,
            idf: vec![1.0],
            sublinear_tf: false,
            norm: Norm::L2,
        };
        assert!(v.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_ngram_range() {
        let v = CountVectorizer {
            vocabulary: vocab(&["road"]),
            analyzer: Analyzer::Word,
            ngram_range: (2, 1),
            lowercase: true,
        };
        assert!(v.validate().is_err());
    }

    #[test]
    fn test_model_deserializes_with_defaults() {
        let json = r#"{"type": "Tfidf", "vocabulary": {"road": 0}, "idf": [1.5]}"#;
        let model: VectorizerModel = serde_json::from_str(json).unwrap();
        match model {
            VectorizerModel::Tfidf(v) => {
                assert_eq!(v.analyzer, Analyzer::Word);
                assert_eq!(v.ngram_range, (1, 1));
                assert!(v.lowercase);
                assert_eq!(v.norm, Norm::L2);
            }
            other => panic!("unexpected vectorizer {}", other),
        }
    }
}
