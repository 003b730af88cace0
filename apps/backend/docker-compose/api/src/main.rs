#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use axum::{
    body::Body,
    extract::MatchedPath,
    http::Request,
    middleware::{self, Next},
    response::Response,
    routing::get,
};
use complaint_api::{construct_router, state::State};
use complaint_model::ArtifactStore;
use std::sync::Arc;
use std::time::Instant;

mod config;
mod metrics;

async fn metrics_middleware(request: Request<Body>, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().to_string();
    let path = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| request.uri().path().to_string());

    let response = next.run(request).await;

    metrics::record_http_request(
        &method,
        &path,
        response.status().as_u16(),
        start.elapsed().as_secs_f64(),
    );

    response
}

fn load_store(config: &config::Config) -> Result<ArtifactStore, complaint_model::LoadError> {
    match ArtifactStore::load(&config.model_path) {
        Ok(store) => {
            if let Ok(bundle) = store.get() {
                let meta = bundle.metadata();
                tracing::info!(
                    model_name = %meta.model_name,
                    accuracy = meta.accuracy,
                    feature_count = meta.feature_count,
                    categories = ?bundle.categories(),
                    "Model loaded from {}",
                    config.model_path.display()
                );
            }
            Ok(store)
        }
        Err(e) if config.allow_missing_model => {
            tracing::warn!(
                "Failed to load model from {}: {}. Serving without a model",
                config.model_path.display(),
                e
            );
            Ok(ArtifactStore::empty())
        }
        Err(e) => {
            tracing::error!(
                "Failed to load model from {}: {}",
                config.model_path.display(),
                e
            );
            Err(e)
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    metrics::init_telemetry()?;

    tracing::info!("Starting Multilingual Complaint Classifier API");

    let config = config::Config::from_env()?;
    tracing::info!(
        "Loaded configuration: port={}, model_path={}",
        config.port,
        config.model_path.display()
    );

    let store = load_store(&config)?;
    metrics::record_model_loaded(store.loaded());

    let state = Arc::new(State::new(store));

    let app = construct_router(state)
        .route("/metrics", get(metrics::handler))
        .route_layer(middleware::from_fn(metrics_middleware));

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
