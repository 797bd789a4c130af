/// Error handling module
///
/// Provides unified error responses: `{message, error, errors?}`
use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use validator::ValidationErrors;

use crate::repository::RepositoryError;

#[derive(Debug)]
pub enum ApiError {
    BadRequest {
        message: String,
        errors: Option<Value>,
    },
    NotFound {
        message: String,
    },
    Conflict {
        message: String,
    },
    Internal {
        message: String,
    },
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub message: String,
    pub error: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Value>,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest {
            message: message.into(),
            errors: None,
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound {
            message: message.into(),
        }
    }

    /// Shape validation failure, with the per-field details in `errors`.
    pub fn validation(errors: &ValidationErrors) -> Self {
        ApiError::BadRequest {
            message: "Dados inválidos".to_string(),
            errors: serde_json::to_value(errors).ok(),
        }
    }

    /// Maps a repository failure to a response. Store failures keep their
    /// detail in the log only; the client sees `internal_message`.
    pub fn from_repository(err: RepositoryError, internal_message: &str) -> Self {
        match err {
            RepositoryError::InvalidReference(message) => {
                tracing::warn!(error = %message, "Invalid reference");
                ApiError::bad_request(message)
            }
            RepositoryError::Duplicate(message) => {
                tracing::warn!(error = %message, "Duplicate value");
                ApiError::Conflict { message }
            }
            RepositoryError::Store(e) => {
                tracing::error!(error = %e, "{}", internal_message);
                ApiError::Internal {
                    message: internal_message.to_string(),
                }
            }
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            ApiError::BadRequest { .. } => "BadRequest",
            ApiError::NotFound { .. } => "NotFound",
            ApiError::Conflict { .. } => "Conflict",
            ApiError::Internal { .. } => "InternalServerError",
        }
    }

    fn message(&self) -> &str {
        match self {
            ApiError::BadRequest { message, .. }
            | ApiError::NotFound { message }
            | ApiError::Conflict { message }
            | ApiError::Internal { message } => message,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind(), self.message())
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Conflict { .. } => StatusCode::CONFLICT,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let errors = match self {
            ApiError::BadRequest { errors, .. } => errors.clone(),
            _ => None,
        };

        HttpResponse::build(self.status_code()).json(ErrorResponse {
            message: self.message().to_string(),
            error: self.kind(),
            errors,
        })
    }
}
