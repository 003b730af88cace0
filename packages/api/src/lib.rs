use axum::{Router, middleware::from_fn};
use error::ApiError;
use openapi::ApiDoc;
use state::AppState;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, decompression::RequestDecompressionLayer,
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod middleware;
mod routes;

pub mod error;
pub mod openapi;
pub mod reference;
pub mod state;

pub use axum;
pub use complaint_model as model;

/// Builds the full HTTP surface: every endpoint, the OpenAPI document with its
/// Swagger UI at `/docs`, and the shared layers. The binary adds its own
/// metrics route on top.
pub fn construct_router(state: AppState) -> Router {
    Router::new()
        .merge(routes::info::routes())
        .merge(routes::health::routes())
        .merge(routes::predict::routes())
        .merge(routes::reference::routes())
        .merge(SwaggerUi::new("/docs").url("/openapi.json", ApiDoc::openapi()))
        .fallback(|| async { ApiError::NOT_FOUND })
        .with_state(state)
        .layer(from_fn(middleware::error_reporting::error_reporting_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .layer(
            ServiceBuilder::new()
                .layer(RequestDecompressionLayer::new())
                .layer(CompressionLayer::new()),
        )
}
