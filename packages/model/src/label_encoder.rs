use crate::error::PredictionError;
use serde::{Deserialize, Serialize};

/// Class index ↔ category name capability.
///
/// Classes must be non-empty, sorted and unique; `ArtifactBundle::new`
/// rejects any decoder that breaks this.
pub trait LabelDecoder: Send + Sync {
    /// Known categories in class-index order.
    fn classes(&self) -> &[String];

    fn decode(&self, index: usize) -> Result<&str, PredictionError> {
        let classes = self.classes();
        classes
            .get(index)
            .map(String::as_str)
            .ok_or(PredictionError::UnknownClass {
                index,
                classes: classes.len(),
            })
    }
}

/// Sorted, unique category names; the position of a name is its class index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelEncoder {
    pub classes: Vec<String>,
}

impl LabelEncoder {
    pub fn new(classes: Vec<String>) -> Self {
        Self { classes }
    }

    pub fn validate(&self) -> Result<(), String> {
        validate_classes(&self.classes)
    }
}

pub(crate) fn validate_classes(classes: &[String]) -> Result<(), String> {
    if classes.is_empty() {
        return Err("label encoder has no classes".to_string());
    }
    if let Some(pair) = classes.windows(2).find(|w| w[0] >= w[1]) {
        return Err(format!(
            "label encoder classes must be sorted and unique, found '{}' before '{}'",
            pair[0], pair[1]
        ));
    }
    Ok(())
}

impl LabelDecoder for LabelEncoder {
    fn classes(&self) -> &[String] {
        &self.classes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encoder() -> LabelEncoder {
        LabelEncoder::new(vec![
            "garbage".to_string(),
            "others".to_string(),
            "potholes".to_string(),
            "streetlight".to_string(),
        ])
    }

    #[test]
    fn test_decode_follows_class_order() {
        let enc = encoder();
        for (i, name) in enc.classes.iter().enumerate() {
            assert_eq!(enc.decode(i).unwrap(), name);
        }
    }

    #[test]
    fn test_decode_out_of_range() {
        let err = encoder().decode(7).unwrap_err();
        assert_eq!(err, PredictionError::UnknownClass { index: 7, classes: 4 });
    }

    #[test]
    fn test_validate_requires_sorted_unique() {
        assert!(encoder().validate().is_ok());
        let unsorted = LabelEncoder::new(vec!["potholes".to_string(), "garbage".to_string()]);
        assert!(unsorted.validate().is_err());
        let dup = LabelEncoder::new(vec!["garbage".to_string(), "garbage".to_string()]);
        assert!(dup.validate().is_err());
        assert!(LabelEncoder::new(vec![]).validate().is_err());
    }
}
