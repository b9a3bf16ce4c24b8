use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Stable machine-readable error codes carried in every error body.
pub mod codes {
    pub const NOT_FOUND_RESOURCE: &str = "notFound.resource";
    pub const NOT_FOUND_PATH: &str = "notFound.path";
    pub const OPTIMISTIC_LOCK: &str = "conflict.optimistic";
    pub const INVALID_FIELD: &str = "badRequest.invalid-field";
    pub const INVALID_JSON: &str = "badRequest.invalid-json";
    pub const UNEXPECTED: &str = "internal-server-error.unexpected";
}

/// Static code-to-message table. Messages are resolved here at the boundary,
/// never inside the services.
fn message_for(code: &str) -> &'static str {
    match code {
        codes::NOT_FOUND_RESOURCE => "The requested resource does not exist.",
        codes::NOT_FOUND_PATH => "The requested path does not exist.",
        codes::OPTIMISTIC_LOCK => {
            "The resource was modified by another request. Fetch the latest version and retry."
        }
        codes::INVALID_FIELD => "One or more request fields are invalid.",
        codes::INVALID_JSON => "The request body is not valid JSON.",
        _ => "An unexpected error occurred.",
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid JSON: {0}")]
    InvalidJson(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn code(&self) -> &'static str {
        match self {
            AppError::NotFound(_) => codes::NOT_FOUND_RESOURCE,
            AppError::Conflict(_) => codes::OPTIMISTIC_LOCK,
            AppError::Validation(_) => codes::INVALID_FIELD,
            AppError::InvalidJson(_) => codes::INVALID_JSON,
            AppError::Database(_) | AppError::Internal(_) => codes::UNEXPECTED,
        }
    }
}

/// Error body shape shared by every failure response.
#[derive(Serialize, Deserialize)]
pub struct ErrorBody {
    pub title: String,
    pub status: u16,
    pub code: String,
    pub message: String,
}

impl ErrorBody {
    pub fn new(status: StatusCode, code: &str) -> Self {
        ErrorBody {
            title: status.canonical_reason().unwrap_or("Error").to_string(),
            status: status.as_u16(),
            code: code.to_string(),
            message: message_for(code).to_string(),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Validation(_) | AppError::InvalidJson(_) => StatusCode::BAD_REQUEST,
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::Database(e) => tracing::error!("Database error: {:?}", e),
            AppError::Internal(e) => tracing::error!("Internal error: {}", e),
            other => tracing::debug!("{}", other),
        }

        let status = self.status_code();
        HttpResponse::build(status).json(ErrorBody::new(status, self.code()))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Validation(errors.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::NotFound("tag".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::Conflict("todo".into()).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::Validation("name".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::Internal("boom".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_stable_codes() {
        assert_eq!(AppError::NotFound("x".into()).code(), "notFound.resource");
        assert_eq!(AppError::Conflict("x".into()).code(), "conflict.optimistic");
        assert_eq!(
            AppError::Validation("x".into()).code(),
            "badRequest.invalid-field"
        );
        assert_eq!(
            AppError::InvalidJson("x".into()).code(),
            "badRequest.invalid-json"
        );
    }

    #[test]
    fn test_every_code_has_a_message() {
        for code in [
            codes::NOT_FOUND_RESOURCE,
            codes::NOT_FOUND_PATH,
            codes::OPTIMISTIC_LOCK,
            codes::INVALID_FIELD,
            codes::INVALID_JSON,
            codes::UNEXPECTED,
        ] {
            assert!(!message_for(code).is_empty());
        }
    }
}
