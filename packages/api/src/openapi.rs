use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Multilingual Complaint Classifier API",
        version = "1.0.0",
        description = "Classifies citizen complaints written in English and ten Indian \
            languages into service categories.\n\nSingle texts go to `/predict`. Lists go to \
            `/predict/batch`, where a failing item is reported inline and does not fail the \
            request."
    ),
    tags(
        (name = "root", description = "Service banner"),
        (name = "health", description = "Health check endpoints"),
        (name = "model", description = "Loaded model metadata"),
        (name = "prediction", description = "Complaint classification"),
        (name = "reference", description = "Categories and supported languages")
    ),
    paths(
        crate::routes::info::service_info,
        crate::routes::info::model_info,
        crate::routes::health::health,
        crate::routes::predict::predict,
        crate::routes::predict::predict_many,
        crate::routes::reference::categories,
        crate::routes::reference::languages,
    ),
    components(schemas(
        crate::routes::info::ServiceInfo,
        crate::routes::info::ModelInfoResponse,
        crate::routes::health::HealthResponse,
        crate::routes::predict::ComplaintRequest,
        crate::routes::predict::BatchComplaintRequest,
        crate::routes::reference::CategoriesResponse,
        crate::routes::reference::LanguageInfo,
        crate::routes::reference::LanguagesResponse,
        complaint_model::PredictionResult,
        complaint_model::BatchResult,
    ))
)]
pub struct ApiDoc;
