use crate::error::ApiError;
use crate::reference::language_names;
use crate::state::AppState;
use axum::Json;
use axum::extract::State;
use axum::{Router, routing::get};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const SERVICE_NAME: &str = "Multilingual Complaint Classifier API";

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(service_info))
        .route("/model/info", get(model_info))
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct ServiceInfo {
    pub message: String,
    pub version: String,
    /// Interactive Swagger UI
    pub docs: String,
    /// OpenAPI schema document
    pub openapi: String,
    pub health: String,
    pub model_info: String,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct ModelInfoResponse {
    pub model_name: String,
    /// Held-out accuracy in percent, two decimals
    pub accuracy: f64,
    pub feature_count: usize,
    pub training_samples: usize,
    pub supported_languages: Vec<String>,
    pub categories: Vec<String>,
}

#[utoipa::path(
    get,
    path = "/",
    tag = "root",
    responses(
        (status = 200, description = "Service banner with documentation links", body = ServiceInfo)
    )
)]
#[tracing::instrument(name = "GET /")]
pub async fn service_info() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        message: SERVICE_NAME.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        docs: "/docs".to_string(),
        openapi: "/openapi.json".to_string(),
        health: "/health".to_string(),
        model_info: "/model/info".to_string(),
    })
}

fn percent(accuracy: f64) -> f64 {
    (accuracy * 100.0 * 100.0).round() / 100.0
}

#[utoipa::path(
    get,
    path = "/model/info",
    tag = "model",
    responses(
        (status = 200, description = "Loaded model metadata", body = ModelInfoResponse),
        (status = 503, description = "Model not loaded")
    )
)]
#[tracing::instrument(name = "GET /model/info", skip(state))]
pub async fn model_info(
    State(state): State<AppState>,
) -> Result<Json<ModelInfoResponse>, ApiError> {
    let bundle = state.bundle()?;
    let meta = bundle.metadata();

    Ok(Json(ModelInfoResponse {
        model_name: meta.model_name.clone(),
        accuracy: percent(meta.accuracy),
        feature_count: meta.feature_count,
        training_samples: meta.training_samples,
        supported_languages: language_names(),
        categories: bundle.categories().to_vec(),
    }))
}

#[cfg(test)]
mod tests {
    use super::percent;

    #[test]
    fn test_percent_rounds_to_two_decimals() {
        assert_eq!(percent(0.91237), 91.24);
        assert_eq!(percent(1.0), 100.0);
        assert_eq!(percent(0.0), 0.0);
    }
}
