use crate::error::ApiError;
use crate::state::AppState;
use crate::validation;
use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::{Router, routing::post};
use complaint_model::{BatchResult, PredictionResult, predict_batch, predict_one};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/predict", post(predict))
        .route("/predict/batch", post(predict_many))
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({"text": "The road has many potholes and needs repair"}))]
pub struct ComplaintRequest {
    /// Complaint text in any supported language
    pub text: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "texts": ["Street light not working", "सड़क पर गड्ढे हैं", "கழிவு சேகரிக்கப்படவில்லை"]
}))]
pub struct BatchComplaintRequest {
    /// List of complaint texts
    pub texts: Vec<String>,
}

impl ComplaintRequest {
    fn validate(&self) -> Result<(), ApiError> {
        if self.text.trim().is_empty() {
            return Err(validation!("text must not be empty"));
        }
        Ok(())
    }
}

impl BatchComplaintRequest {
    /// Only the list is checked; individual texts are judged by the model so
    /// a bad item fails alone.
    fn validate(&self) -> Result<(), ApiError> {
        if self.texts.is_empty() {
            return Err(validation!("texts must contain at least one item"));
        }
        Ok(())
    }
}

fn record_outcome(outcome: &'static str, count: u64) {
    metrics::counter!("predictions_total", "outcome" => outcome).increment(count);
}

#[utoipa::path(
    post,
    path = "/predict",
    tag = "prediction",
    request_body = ComplaintRequest,
    responses(
        (status = 200, description = "Predicted category", body = PredictionResult),
        (status = 422, description = "Invalid request body"),
        (status = 500, description = "Prediction failed"),
        (status = 503, description = "Model not loaded")
    )
)]
#[tracing::instrument(name = "POST /predict", skip(state, payload))]
pub async fn predict(
    State(state): State<AppState>,
    payload: Result<Json<ComplaintRequest>, JsonRejection>,
) -> Result<Json<PredictionResult>, ApiError> {
    let Json(request) = payload?;
    request.validate()?;

    match predict_one(&state.store, &request.text) {
        Ok(result) => {
            record_outcome("success", 1);
            tracing::debug!(
                category = %result.category,
                confidence = ?result.confidence,
                "Predicted"
            );
            Ok(Json(result))
        }
        Err(e) => {
            record_outcome("error", 1);
            Err(e.into())
        }
    }
}

#[utoipa::path(
    post,
    path = "/predict/batch",
    tag = "prediction",
    request_body = BatchComplaintRequest,
    responses(
        (
            status = 200,
            description = "One result per input text, failures inline",
            body = BatchResult
        ),
        (status = 422, description = "Invalid request body")
    )
)]
#[tracing::instrument(name = "POST /predict/batch", skip(state, payload))]
pub async fn predict_many(
    State(state): State<AppState>,
    payload: Result<Json<BatchComplaintRequest>, JsonRejection>,
) -> Result<Json<BatchResult>, ApiError> {
    let Json(request) = payload?;
    request.validate()?;

    let batch = predict_batch(&state.store, &request.texts);

    let failed = batch.predictions.iter().filter(|p| p.is_error()).count();
    record_outcome("success", (batch.total - failed) as u64);
    record_outcome("error", failed as u64);
    tracing::info!(total = batch.total, failed, "Batch prediction finished");

    Ok(Json(batch))
}
