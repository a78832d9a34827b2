use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid extension format: {0}")]
    InvalidFormat(String),

    #[error("Duplicate extension: {0}")]
    Duplicate(String),

    #[error("Extension limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("Internal Server Error: {0}")]
    Internal(String),

    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Wire shape of every error the API returns.
#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            AppError::InvalidFormat(msg) => {
                (StatusCode::BAD_REQUEST, "INVALID_EXTENSION_FORMAT", msg)
            }
            AppError::Duplicate(msg) => (StatusCode::CONFLICT, "DUPLICATE_EXTENSION", msg),
            AppError::LimitExceeded(msg) => {
                (StatusCode::BAD_REQUEST, "EXTENSION_LIMIT_EXCEEDED", msg)
            }
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "EXTENSION_NOT_FOUND", msg),
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_SERVER_ERROR",
                    "Internal Server Error".to_string(),
                )
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_SERVER_ERROR",
                    "Internal Server Error".to_string(),
                )
            }
            AppError::Anyhow(e) => {
                tracing::error!("Anyhow error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_SERVER_ERROR",
                    "Internal Server Error".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse {
            code: code.to_string(),
            message,
            timestamp: Utc::now(),
        });

        (status, body).into_response()
    }
}
