//! Domain errors

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Employee not found: {0}")]
    EmployeeNotFound(i64),

    #[error("Username already exists: {0}")]
    UsernameAlreadyExists(String),

    #[error("Validation error: {}", .0.join("; "))]
    Validation(Vec<String>),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password hash error: {0}")]
    PasswordHash(String),

    #[error("Token error: {0}")]
    Token(String),

    #[error("Database error: {0}")]
    Database(String),
}

/// Coarse classification used to pick a response without inspecting messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Validation,
    Conflict,
    Unauthorized,
    Store,
    Internal,
}

impl DomainError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DomainError::EmployeeNotFound(_) => ErrorKind::NotFound,
            DomainError::UsernameAlreadyExists(_) => ErrorKind::Conflict,
            DomainError::Validation(_) => ErrorKind::Validation,
            DomainError::InvalidCredentials => ErrorKind::Unauthorized,
            DomainError::Database(_) => ErrorKind::Store,
            DomainError::PasswordHash(_) | DomainError::Token(_) => ErrorKind::Internal,
        }
    }

    /// Messages suitable for showing next to a form.
    pub fn user_messages(&self) -> Vec<String> {
        match self {
            DomainError::Validation(messages) => messages.clone(),
            DomainError::UsernameAlreadyExists(username) => {
                vec![format!("Username '{}' is already taken", username)]
            }
            other => vec![other.to_string()],
        }
    }
}
