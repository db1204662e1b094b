use axum::http::header::RETRY_AFTER;
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

use crate::response::ApiResponse;
use crate::synonyms::SynonymError;

/// Standard error type for brandkit handlers and services.
#[derive(Debug, Error)]
pub enum BrandkitError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Too many requests: retry in {0}s")]
    TooManyRequests(u64),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Validation errors")]
    ValidationErrors(Vec<FieldError>),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("Synonym dictionary error: {0}")]
    Synonyms(#[from] SynonymError),
}

impl BrandkitError {
    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            BrandkitError::NotFound(_) => StatusCode::NOT_FOUND,
            BrandkitError::BadRequest(_) => StatusCode::BAD_REQUEST,
            BrandkitError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            BrandkitError::Conflict(_) => StatusCode::CONFLICT,
            BrandkitError::TooManyRequests(_) => StatusCode::TOO_MANY_REQUESTS,
            BrandkitError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            BrandkitError::ValidationErrors(_) => StatusCode::UNPROCESSABLE_ENTITY,
            BrandkitError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            BrandkitError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            BrandkitError::Synonyms(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code string for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            BrandkitError::NotFound(_) => "NOT_FOUND",
            BrandkitError::BadRequest(_) => "BAD_REQUEST",
            BrandkitError::Unauthorized(_) => "UNAUTHORIZED",
            BrandkitError::Conflict(_) => "CONFLICT",
            BrandkitError::TooManyRequests(_) => "TOO_MANY_REQUESTS",
            BrandkitError::Validation(_) => "VALIDATION_ERROR",
            BrandkitError::ValidationErrors(_) => "VALIDATION_ERROR",
            BrandkitError::Internal(_) => "INTERNAL_ERROR",
            BrandkitError::Database(_) => "DATABASE_ERROR",
            BrandkitError::Synonyms(_) => "DICTIONARY_ERROR",
        }
    }

    /// Create a validation error with field-level details.
    pub fn validation_fields(errors: Vec<FieldError>) -> Self {
        BrandkitError::ValidationErrors(errors)
    }
}

/// Error detail for API responses.
#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<FieldError>>,
}

/// Field-level validation error.
///
/// ```json
/// {
///   "field": "price",
///   "message": "must be a non-negative number",
///   "code": "invalid_number"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl FieldError {
    /// Create a new field error.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        FieldError {
            field: field.into(),
            message: message.into(),
            code: None,
        }
    }

    /// Create a new field error with a code.
    pub fn with_code(
        field: impl Into<String>,
        message: impl Into<String>,
        code: impl Into<String>,
    ) -> Self {
        FieldError {
            field: field.into(),
            message: message.into(),
            code: Some(code.into()),
        }
    }
}

impl BrandkitError {
    /// The `error` object of the response envelope.
    pub fn detail(&self) -> ErrorDetail {
        match self {
            BrandkitError::ValidationErrors(errs) => ErrorDetail {
                code: self.error_code().to_string(),
                message: errs
                    .iter()
                    .map(|e| format!("{}: {}", e.field, e.message))
                    .collect::<Vec<_>>()
                    .join("; "),
                fields: Some(errs.clone()),
            },
            _ => ErrorDetail {
                code: self.error_code().to_string(),
                message: self.to_string(),
                fields: None,
            },
        }
    }
}

impl IntoResponse for BrandkitError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }

        let mut response = ApiResponse::<()>::failure(self.detail()).with_status(status);
        if let BrandkitError::TooManyRequests(retry_after) = self {
            response
                .headers_mut()
                .insert(RETRY_AFTER, HeaderValue::from(retry_after));
        }
        response
    }
}
