pub mod api;
pub mod config;
pub mod entities;
pub mod infrastructure;
pub mod services;
pub mod utils;

use axum::{
    Router,
    http::HeaderValue,
    middleware::from_fn,
    routing::{delete, get, put},
};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::config::AppConfig;
use crate::services::extension_service::ExtensionService;

#[derive(OpenApi)]
#[openapi(
    paths(
        api::handlers::extensions::list_fixed_extensions,
        api::handlers::extensions::update_fixed_extension,
        api::handlers::extensions::update_fixed_extension_by_name,
        api::handlers::extensions::list_custom_extensions,
        api::handlers::extensions::add_custom_extension,
        api::handlers::extensions::delete_custom_extension,
        api::handlers::extensions::delete_custom_extension_by_name,
        api::handlers::extensions::count_custom_extensions,
        api::handlers::health::health_check,
        api::handlers::health::get_extension_config,
    ),
    components(
        schemas(
            api::handlers::extensions::FixedExtensionResponse,
            api::handlers::extensions::CustomExtensionResponse,
            api::handlers::extensions::UpdateFixedExtensionRequest,
            api::handlers::extensions::CreateCustomExtensionRequest,
            api::handlers::health::HealthResponse,
            api::handlers::health::ExtensionConfigResponse,
            api::error::ErrorResponse,
        )
    ),
    tags(
        (name = "fixed-extensions", description = "Fixed extension block toggles"),
        (name = "custom-extensions", description = "User-registered extension management"),
        (name = "system", description = "Health and view configuration")
    )
)]
pub struct ApiDoc;

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub extension_service: Arc<ExtensionService>,
    pub config: AppConfig,
}

pub fn create_app(state: AppState) -> Router {
    let allowed_origins: Vec<HeaderValue> = state
        .config
        .allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed_origins))
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/health", get(api::handlers::health::health_check))
        .route(
            "/api/extensions/config",
            get(api::handlers::health::get_extension_config),
        )
        .route(
            "/api/extensions/fixed",
            get(api::handlers::extensions::list_fixed_extensions),
        )
        .route(
            "/api/extensions/fixed/:key",
            put(api::handlers::extensions::update_fixed_extension)
                .patch(api::handlers::extensions::update_fixed_extension_by_name),
        )
        .route(
            "/api/extensions/custom",
            get(api::handlers::extensions::list_custom_extensions)
                .post(api::handlers::extensions::add_custom_extension),
        )
        .route(
            "/api/extensions/custom/count",
            get(api::handlers::extensions::count_custom_extensions),
        )
        .route(
            "/api/extensions/custom/id/:id",
            delete(api::handlers::extensions::delete_custom_extension),
        )
        .route(
            "/api/extensions/custom/:extension",
            delete(api::handlers::extensions::delete_custom_extension_by_name),
        )
        .route_service("/", ServeFile::new("static/index.html"))
        .nest_service("/static", ServeDir::new("static"))
        .layer(from_fn(api::middleware::request_id::request_id_middleware))
        .layer(cors)
        .with_state(state)
}
