use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use hr_core::{DomainError, ErrorKind};

use crate::views::ViewError;

#[derive(Error, Debug)]
pub enum WebError {
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unprocessable: {0}")]
    Unprocessable(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
}

impl From<DomainError> for WebError {
    fn from(err: DomainError) -> Self {
        let message = err.to_string();
        match err.kind() {
            ErrorKind::NotFound => WebError::NotFound(message),
            ErrorKind::Validation => WebError::Unprocessable(message),
            ErrorKind::Conflict => WebError::Conflict(message),
            ErrorKind::Unauthorized => WebError::Unauthorized(message),
            ErrorKind::Store => WebError::DatabaseError(message),
            ErrorKind::Internal => WebError::InternalError(message),
        }
    }
}

impl From<ViewError> for WebError {
    fn from(err: ViewError) -> Self {
        WebError::InternalError(err.to_string())
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match self {
            WebError::Unauthorized(msg) => {
                tracing::warn!("Unauthorized: {}", msg);
                (StatusCode::UNAUTHORIZED, "Unauthorized", msg)
            }
            WebError::NotFound(msg) => {
                tracing::warn!("Not found: {}", msg);
                (StatusCode::NOT_FOUND, "NotFound", msg)
            }
            WebError::Unprocessable(msg) => {
                tracing::warn!("Unprocessable: {}", msg);
                (StatusCode::UNPROCESSABLE_ENTITY, "Unprocessable", msg)
            }
            WebError::Conflict(msg) => {
                tracing::warn!("Conflict: {}", msg);
                (StatusCode::CONFLICT, "Conflict", msg)
            }
            // Store details stay in the log.
            WebError::DatabaseError(msg) => {
                tracing::error!("Database error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "DatabaseError", "Database unavailable".to_string())
            }
            WebError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "InternalError", "Internal server error".to_string())
            }
        };

        let body = Json(ErrorResponse {
            error: error_type.to_string(),
            message,
        });

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_error_status_mapping() {
        let cases = [
            (DomainError::EmployeeNotFound(3), StatusCode::NOT_FOUND),
            (DomainError::Validation(vec!["bad".into()]), StatusCode::UNPROCESSABLE_ENTITY),
            (DomainError::UsernameAlreadyExists("a".into()), StatusCode::CONFLICT),
            (DomainError::InvalidCredentials, StatusCode::UNAUTHORIZED),
            (DomainError::Database("pool timed out".into()), StatusCode::INTERNAL_SERVER_ERROR),
            (DomainError::Token("sign".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(WebError::from(err).into_response().status(), status);
        }
    }
}
