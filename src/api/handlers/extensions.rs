use crate::AppState;
use crate::api::error::{AppError, ErrorResponse};
use crate::entities::{custom_extensions, fixed_extensions};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Serialize, ToSchema)]
pub struct FixedExtensionResponse {
    pub id: i32,
    pub name: String,
    pub blocked: bool,
}

impl From<fixed_extensions::Model> for FixedExtensionResponse {
    fn from(model: fixed_extensions::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            blocked: model.blocked,
        }
    }
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CustomExtensionResponse {
    pub id: i32,
    pub extension: String,
    pub created_at: DateTime<Utc>,
}

impl From<custom_extensions::Model> for CustomExtensionResponse {
    fn from(model: custom_extensions::Model) -> Self {
        Self {
            id: model.id,
            extension: model.extension,
            created_at: model.created_at,
        }
    }
}

#[derive(Deserialize, ToSchema)]
pub struct UpdateFixedExtensionRequest {
    pub blocked: Option<bool>,
}

#[derive(Deserialize, ToSchema)]
pub struct CreateCustomExtensionRequest {
    pub extension: Option<String>,
}

#[utoipa::path(
    get,
    path = "/api/extensions/fixed",
    responses(
        (status = 200, description = "All fixed extensions", body = [FixedExtensionResponse])
    ),
    tag = "fixed-extensions"
)]
pub async fn list_fixed_extensions(
    State(state): State<AppState>,
) -> Result<Json<Vec<FixedExtensionResponse>>, AppError> {
    let extensions = state.extension_service.list_fixed().await?;

    Ok(Json(extensions.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    put,
    path = "/api/extensions/fixed/{id}",
    request_body = UpdateFixedExtensionRequest,
    params(("id" = i32, Path, description = "Fixed extension id")),
    responses(
        (status = 200, description = "Updated fixed extension", body = FixedExtensionResponse),
        (status = 400, description = "Missing blocked field", body = ErrorResponse),
        (status = 404, description = "Unknown id", body = ErrorResponse)
    ),
    tag = "fixed-extensions"
)]
pub async fn update_fixed_extension(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(req): Json<UpdateFixedExtensionRequest>,
) -> Result<Json<FixedExtensionResponse>, AppError> {
    let blocked = req
        .blocked
        .ok_or_else(|| AppError::InvalidFormat("Field 'blocked' is required".to_string()))?;

    let updated = state
        .extension_service
        .update_fixed_blocked(id, blocked)
        .await?;

    Ok(Json(updated.into()))
}

#[utoipa::path(
    patch,
    path = "/api/extensions/fixed/{name}",
    request_body = UpdateFixedExtensionRequest,
    params(("name" = String, Path, description = "Fixed extension name")),
    responses(
        (status = 200, description = "Updated fixed extension", body = FixedExtensionResponse),
        (status = 400, description = "Missing blocked field", body = ErrorResponse),
        (status = 404, description = "Unknown name", body = ErrorResponse)
    ),
    tag = "fixed-extensions"
)]
pub async fn update_fixed_extension_by_name(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Json(req): Json<UpdateFixedExtensionRequest>,
) -> Result<Json<FixedExtensionResponse>, AppError> {
    let blocked = req
        .blocked
        .ok_or_else(|| AppError::InvalidFormat("Field 'blocked' is required".to_string()))?;

    let updated = state
        .extension_service
        .update_fixed_blocked_by_name(&name, blocked)
        .await?;

    Ok(Json(updated.into()))
}

#[utoipa::path(
    get,
    path = "/api/extensions/custom",
    responses(
        (status = 200, description = "All custom extensions", body = [CustomExtensionResponse])
    ),
    tag = "custom-extensions"
)]
pub async fn list_custom_extensions(
    State(state): State<AppState>,
) -> Result<Json<Vec<CustomExtensionResponse>>, AppError> {
    let extensions = state.extension_service.list_custom().await?;

    Ok(Json(extensions.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    post,
    path = "/api/extensions/custom",
    request_body = CreateCustomExtensionRequest,
    responses(
        (status = 201, description = "Created custom extension", body = CustomExtensionResponse),
        (status = 400, description = "Invalid format or limit reached", body = ErrorResponse),
        (status = 409, description = "Already registered", body = ErrorResponse)
    ),
    tag = "custom-extensions"
)]
pub async fn add_custom_extension(
    State(state): State<AppState>,
    Json(req): Json<CreateCustomExtensionRequest>,
) -> Result<(StatusCode, Json<CustomExtensionResponse>), AppError> {
    let extension = req
        .extension
        .ok_or_else(|| AppError::InvalidFormat("Field 'extension' is required".to_string()))?;

    let created = state.extension_service.add_custom(&extension).await?;

    Ok((StatusCode::CREATED, Json(created.into())))
}

#[utoipa::path(
    delete,
    path = "/api/extensions/custom/id/{id}",
    params(("id" = i32, Path, description = "Custom extension id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Unknown id", body = ErrorResponse)
    ),
    tag = "custom-extensions"
)]
pub async fn delete_custom_extension(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, AppError> {
    state.extension_service.delete_custom(id).await?;

    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    delete,
    path = "/api/extensions/custom/{extension}",
    params(("extension" = String, Path, description = "Custom extension name")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Unknown extension", body = ErrorResponse)
    ),
    tag = "custom-extensions"
)]
pub async fn delete_custom_extension_by_name(
    State(state): State<AppState>,
    Path(extension): Path<String>,
) -> Result<StatusCode, AppError> {
    state
        .extension_service
        .delete_custom_by_name(&extension)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/api/extensions/custom/count",
    responses(
        (status = 200, description = "Current custom extension count", body = u64)
    ),
    tag = "custom-extensions"
)]
pub async fn count_custom_extensions(
    State(state): State<AppState>,
) -> Result<Json<u64>, AppError> {
    let count = state.extension_service.count_custom().await?;

    Ok(Json(count))
}
