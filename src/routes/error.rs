use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use thiserror::Error;

use crate::models::ErrorResponse;
use crate::services::PostgresError;

/// Errors surfaced to HTTP clients
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    NotFound(String),

    #[error("invalid {kind}: {message}")]
    BadPayload { kind: &'static str, message: String },

    #[error(transparent)]
    Database(#[from] PostgresError),
}

impl ApiError {
    fn label(&self) -> &'static str {
        match self {
            ApiError::Validation(_) => "validation_failed",
            ApiError::Forbidden(_) => "forbidden",
            ApiError::NotFound(_) => "not_found",
            ApiError::BadPayload { kind: "json", .. } => "invalid_json",
            ApiError::BadPayload { .. } => "invalid_query",
            ApiError::Database(PostgresError::NotFound(_)) => "not_found",
            ApiError::Database(PostgresError::InvalidInput(_)) => "validation_failed",
            ApiError::Database(_) => "internal_error",
        }
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        ApiError::Validation(errors.to_string())
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::BadPayload { .. } => StatusCode::BAD_REQUEST,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Database(PostgresError::NotFound(_)) => StatusCode::NOT_FOUND,
            ApiError::Database(PostgresError::InvalidInput(_)) => StatusCode::BAD_REQUEST,
            ApiError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        }

        HttpResponse::build(status).json(ErrorResponse {
            error: self.label().to_string(),
            message: self.to_string(),
            status_code: status.as_u16(),
        })
    }
}

/// Handle JSON payload errors
pub fn handle_json_payload_error(
    err: actix_web::error::JsonPayloadError,
    req: &actix_web::HttpRequest,
) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    ApiError::BadPayload { kind: "json", message: err.to_string() }.into()
}

/// Handle query payload errors
pub fn handle_query_payload_error(
    err: actix_web::error::QueryPayloadError,
    req: &actix_web::HttpRequest,
) -> actix_web::Error {
    tracing::info!("Query string error on {}: {}", req.path(), err);
    ApiError::BadPayload { kind: "query", message: err.to_string() }.into()
}

/// Handle path parameter errors
pub fn handle_path_error(
    err: actix_web::error::PathError,
    req: &actix_web::HttpRequest,
) -> actix_web::Error {
    tracing::info!("Path error on {}: {}", req.path(), err);
    ApiError::BadPayload { kind: "path", message: err.to_string() }.into()
}
