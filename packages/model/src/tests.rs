//! Tests for the prediction pipeline and artifact loading
//!
//! Uses the hand-weighted bundles from `fixtures`.

#[cfg(test)]
mod tests {
    use crate::fixtures::{self, CATEGORIES};
    use crate::{
        ArtifactBundle, ArtifactFile, ArtifactStore, ERROR_CATEGORY, LabelEncoder, LoadError,
        PredictionError, ServiceError, predict_batch, predict_one,
    };

    fn store() -> ArtifactStore {
        ArtifactStore::with_bundle(fixtures::demo_bundle())
    }

    // ============================================================================
    // predict_one
    // ============================================================================

    #[test]
    fn test_predict_pothole_complaint() {
        let result = predict_one(&store(), "The road has many potholes").unwrap();
        assert_eq!(result.category, "potholes");
        assert_eq!(result.text, "The road has many potholes");
        assert!(result.error.is_none());

        let confidence = result.confidence.unwrap();
        assert!(confidence > 0.0 && confidence <= 100.0);
    }

    #[test]
    fn test_category_is_known_class() {
        let texts = [
            "Street light is not working at night",
            "Garbage not collected for many days",
            "completely unrelated sentence",
            "?!",
        ];
        for text in texts {
            let result = predict_one(&store(), text).unwrap();
            assert!(
                CATEGORIES.contains(&result.category.as_str()),
                "unexpected category {} for {}",
                result.category,
                text
            );
        }
    }

    #[test]
    fn test_probabilities_sum_to_hundred_and_match_confidence() {
        let result = predict_one(&store(), "Garbage not collected for many days").unwrap();
        assert_eq!(result.category, "garbage");

        let probabilities = result.all_probabilities.unwrap();
        assert_eq!(probabilities.len(), CATEGORIES.len());
        let total: f64 = probabilities.values().sum();
        assert!((total - 100.0).abs() < 1e-9);
        assert_eq!(probabilities[&result.category], result.confidence.unwrap());
    }

    #[test]
    fn test_probability_keys_follow_label_order() {
        let result = predict_one(&store(), "water leaking").unwrap();
        let keys: Vec<&str> = result
            .all_probabilities
            .as_ref()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(keys, CATEGORIES.to_vec());
    }

    #[test]
    fn test_unknown_words_fall_back_to_intercept() {
        let result = predict_one(&store(), "nothing matches here").unwrap();
        assert_eq!(result.category, "others");
    }

    #[test]
    fn test_indic_scripts() {
        let hindi = predict_one(&store(), "सड़क पर बहुत गड्ढे हैं").unwrap();
        assert_eq!(hindi.category, "potholes");

        let tamil = predict_one(&store(), "தெரு விளக்கு வேலை செய்யவில்லை").unwrap();
        assert_eq!(tamil.category, "streetlight");
    }

    #[test]
    fn test_classifier_without_probabilities() {
        let store = ArtifactStore::with_bundle(fixtures::svc_bundle());
        let result = predict_one(&store, "Street light broken").unwrap();
        assert_eq!(result.category, "streetlight");
        assert!(result.confidence.is_none());
        assert!(result.all_probabilities.is_none());
    }

    #[test]
    fn test_predict_without_model() {
        let err = predict_one(&ArtifactStore::empty(), "Road is full of potholes").unwrap_err();
        assert_eq!(err, ServiceError::Unavailable);
    }

    #[test]
    fn test_predict_blank_text() {
        let err = predict_one(&store(), "   ").unwrap_err();
        assert_eq!(err, ServiceError::Prediction(PredictionError::EmptyText));
    }

    // ============================================================================
    // predict_batch
    // ============================================================================

    #[test]
    fn test_batch_preserves_length_and_order() {
        let texts = [
            "Road is full of potholes",
            "Street light broken",
            "Garbage overflowing",
            "सड़क पर गड्ढे हैं",
            "कचरा नहीं उठाया गया",
        ];
        let batch = predict_batch(&store(), &texts);

        assert_eq!(batch.total, texts.len());
        assert_eq!(batch.predictions.len(), texts.len());
        for (result, text) in batch.predictions.iter().zip(texts) {
            assert_eq!(result.text, text);
        }

        let categories: Vec<&str> = batch
            .predictions
            .iter()
            .map(|p| p.category.as_str())
            .collect();
        assert_eq!(
            categories,
            vec!["potholes", "streetlight", "garbage", "potholes", "garbage"]
        );
    }

    #[test]
    fn test_batch_isolates_failing_item() {
        let store = ArtifactStore::with_bundle(fixtures::poisoned_bundle("#bad#"));
        let texts = ["Street light not working", "#bad# input", "Garbage overflowing"];
        let batch = predict_batch(&store, &texts);

        assert_eq!(batch.total, 3);
        assert_eq!(batch.predictions[0].category, "streetlight");
        assert_eq!(batch.predictions[2].category, "garbage");

        let failed = &batch.predictions[1];
        assert_eq!(failed.category, ERROR_CATEGORY);
        assert_eq!(failed.text, "#bad# input");
        assert!(failed.confidence.is_none());
        assert!(failed.all_probabilities.is_none());
        assert!(failed.error.as_deref().unwrap().contains("#bad#"));
    }

    #[test]
    fn test_batch_empty_item_becomes_error_marker() {
        let batch = predict_batch(&store(), &["Street light not working", ""]);
        assert_eq!(batch.predictions[0].category, "streetlight");
        assert!(!batch.predictions[0].is_error());
        assert_eq!(batch.predictions[1].category, ERROR_CATEGORY);
        assert_eq!(
            batch.predictions[1].error.as_deref(),
            Some("Prediction error: text must not be empty")
        );
    }

    #[test]
    fn test_batch_without_model_marks_every_item() {
        let batch = predict_batch(&ArtifactStore::empty(), &["a road", "a light"]);
        assert_eq!(batch.total, 2);
        for item in &batch.predictions {
            assert_eq!(item.category, ERROR_CATEGORY);
            assert_eq!(item.error.as_deref(), Some("Model not loaded"));
        }
    }

    // ============================================================================
    // Artifact loading
    // ============================================================================

    #[test]
    fn test_json_artifact_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("classifier.json");
        fixtures::demo_artifact_file().write(&path).unwrap();

        let store = ArtifactStore::load(&path).unwrap();
        assert!(store.loaded());
        let bundle = store.get().unwrap();
        let meta = bundle.metadata();
        assert_eq!(meta.model_name, "Logistic Regression");
        assert_eq!(meta.feature_count, 15);
        assert_eq!(meta.training_samples, 1200);
        assert!((meta.accuracy - 0.9187).abs() < 1e-12);
        assert_eq!(bundle.categories(), &CATEGORIES.map(String::from));

        let result = predict_one(&store, "The road has many potholes").unwrap();
        assert_eq!(result.category, "potholes");
    }

    #[test]
    fn test_msgpack_artifact_matches_json_predictions() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("classifier.msgpack");
        fixtures::demo_artifact_file().write(&path).unwrap();

        let from_disk = ArtifactStore::load(&path).unwrap();
        let text = "Street lamp and garbage";
        let a = predict_one(&from_disk, text).unwrap();
        let b = predict_one(&store(), text).unwrap();
        assert_eq!(a.category, b.category);
        assert_eq!(a.all_probabilities, b.all_probabilities);
    }

    #[test]
    fn test_missing_field_is_rejected() {
        let file = fixtures::demo_artifact_file();
        let mut value = serde_json::to_value(&file).unwrap();
        value.as_object_mut().unwrap().remove("label_encoder");
        let bytes = serde_json::to_vec(&value).unwrap();

        let err = ArtifactFile::from_slice(&bytes, crate::ArtifactFormat::Json).unwrap_err();
        assert!(matches!(err, LoadError::Json(_)));
        assert!(err.to_string().contains("label_encoder"));
    }

    #[test]
    fn test_garbage_bytes_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("classifier.msgpack");
        std::fs::write(&path, b"not a model").unwrap();
        assert!(matches!(
            ArtifactBundle::load(&path),
            Err(LoadError::MessagePack(_))
        ));
    }

    #[test]
    fn test_label_encoder_size_mismatch_is_incompatible() {
        let mut file = fixtures::demo_artifact_file();
        file.label_encoder = LabelEncoder::new(vec![
            "garbage".to_string(),
            "potholes".to_string(),
            "streetlight".to_string(),
        ]);
        assert!(matches!(
            ArtifactBundle::from_file(file),
            Err(LoadError::Incompatible(_))
        ));
    }

    #[test]
    fn test_feature_count_mismatch_is_incompatible() {
        let mut file = fixtures::demo_artifact_file();
        file.feature_count = 10;
        assert!(matches!(
            ArtifactBundle::from_file(file),
            Err(LoadError::Incompatible(_))
        ));
    }

    #[test]
    fn test_accuracy_out_of_range_is_invalid() {
        let mut file = fixtures::demo_artifact_file();
        file.accuracy = 92.3;
        assert!(matches!(
            ArtifactBundle::from_file(file),
            Err(LoadError::Invalid(_))
        ));
    }
}
