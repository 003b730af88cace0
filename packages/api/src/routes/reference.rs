use crate::error::ApiError;
use crate::reference::{CATEGORY_DESCRIPTIONS, LANGUAGES};
use crate::state::AppState;
use axum::Json;
use axum::extract::State;
use axum::{Router, routing::get};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/categories", get(categories))
        .route("/languages", get(languages))
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct CategoriesResponse {
    pub categories: Vec<String>,
    pub descriptions: BTreeMap<String, String>,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct LanguageInfo {
    pub code: String,
    pub name: String,
    pub native: String,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct LanguagesResponse {
    pub total: usize,
    pub languages: Vec<LanguageInfo>,
}

#[utoipa::path(
    get,
    path = "/categories",
    tag = "reference",
    responses(
        (
            status = 200,
            description = "Categories known to the loaded model",
            body = CategoriesResponse
        ),
        (status = 503, description = "Model not loaded")
    )
)]
#[tracing::instrument(name = "GET /categories", skip(state))]
pub async fn categories(
    State(state): State<AppState>,
) -> Result<Json<CategoriesResponse>, ApiError> {
    let bundle = state.bundle()?;

    Ok(Json(CategoriesResponse {
        categories: bundle.categories().to_vec(),
        descriptions: CATEGORY_DESCRIPTIONS
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
    }))
}

#[utoipa::path(
    get,
    path = "/languages",
    tag = "reference",
    responses(
        (status = 200, description = "Supported languages", body = LanguagesResponse)
    )
)]
#[tracing::instrument(name = "GET /languages")]
pub async fn languages() -> Json<LanguagesResponse> {
    let languages: Vec<LanguageInfo> = LANGUAGES
        .iter()
        .map(|l| LanguageInfo {
            code: l.code.to_string(),
            name: l.name.to_string(),
            native: l.native.to_string(),
        })
        .collect();

    Json(LanguagesResponse {
        total: languages.len(),
        languages,
    })
}
