use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use log::error;
use serde_json::json;

use crate::store::StoreError;

/// Error type returned by every handler and by the admin gate.
///
/// Renders as `{"error": <message>, "code": <CODE>}`; validation errors also
/// carry the offending field names under `fields`.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{message}")]
    Validation {
        message: String,
        fields: Vec<String>,
    },

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Internal(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn missing_fields(fields: Vec<&'static str>) -> Self {
        AppError::Validation {
            message: format!("Missing required fields: {}", fields.join(", ")),
            fields: fields.into_iter().map(String::from).collect(),
        }
    }

    pub fn invalid_fields(message: impl Into<String>, fields: Vec<&'static str>) -> Self {
        AppError::Validation {
            message: message.into(),
            fields: fields.into_iter().map(String::from).collect(),
        }
    }

    fn code(&self) -> &'static str {
        match self {
            AppError::Validation { .. } => "VALIDATION_ERROR",
            AppError::BadRequest(_) => "BAD_REQUEST",
            AppError::Unauthorized(_) => "UNAUTHORIZED",
            AppError::Forbidden(_) => "FORBIDDEN",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Conflict(_) => "CONFLICT",
            AppError::Internal(_) => "INTERNAL_ERROR",
            AppError::Store(err) => match err {
                StoreError::NotFound { .. } => "NOT_FOUND",
                StoreError::Conflict(_) => "CONFLICT",
                StoreError::InvalidReference(_) => "VALIDATION_ERROR",
                StoreError::Database(_) | StoreError::Corrupt(_) => "INTERNAL_ERROR",
            },
        }
    }

    /// Message shown to the client. Internal details stay in the log.
    fn public_message(&self) -> String {
        match self {
            AppError::Internal(_) => "An internal error occurred".to_string(),
            AppError::Store(StoreError::Database(_)) | AppError::Store(StoreError::Corrupt(_)) => {
                "An internal error occurred".to_string()
            }
            other => other.to_string(),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Store(err) => match err {
                StoreError::NotFound { .. } => StatusCode::NOT_FOUND,
                StoreError::Conflict(_) => StatusCode::CONFLICT,
                StoreError::InvalidReference(_) => StatusCode::BAD_REQUEST,
                StoreError::Database(_) | StoreError::Corrupt(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            error!("Request failed: {}", self);
        }

        let body = match self {
            AppError::Validation { fields, .. } => json!({
                "error": self.public_message(),
                "code": self.code(),
                "fields": fields,
            }),
            _ => json!({
                "error": self.public_message(),
                "code": self.code(),
            }),
        };

        HttpResponse::build(status).json(body)
    }
}
