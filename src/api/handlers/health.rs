use crate::AppState;
use crate::config::{EXTENSION_MAX_LENGTH, FIXED_EXTENSION_NAMES, MAX_CUSTOM_EXTENSIONS};
use axum::{Json, extract::State, response::IntoResponse};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub database: String,
    pub version: String,
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "System health status", body = HealthResponse)
    ),
    tag = "system"
)]
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let db_status = if state.db.ping().await.is_ok() {
        "connected"
    } else {
        "disconnected"
    };

    Json(HealthResponse {
        status: "ok".to_string(),
        database: db_status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Constants the view layer mirrors: input maxlength, the registration
/// bound shown next to the counter, and the fixed checkbox list.
#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExtensionConfigResponse {
    pub max_extension_length: usize,
    pub max_custom_extensions: u64,
    pub fixed_extension_names: Vec<String>,
}

#[utoipa::path(
    get,
    path = "/api/extensions/config",
    responses(
        (status = 200, description = "Extension catalog constants", body = ExtensionConfigResponse)
    ),
    tag = "system"
)]
pub async fn get_extension_config() -> Json<ExtensionConfigResponse> {
    Json(ExtensionConfigResponse {
        max_extension_length: EXTENSION_MAX_LENGTH,
        max_custom_extensions: MAX_CUSTOM_EXTENSIONS,
        fixed_extension_names: FIXED_EXTENSION_NAMES
            .iter()
            .map(|name| name.to_string())
            .collect(),
    })
}
