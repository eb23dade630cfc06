use thiserror::Error;

use crate::domain::error::{DomainError, ErrorKind};

/// Errors that are safe to expose to other modules
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UserRegistrationError {
    #[error("User not found: {id}")]
    NotFound { id: i64 },

    #[error("User with email '{email}' already exists")]
    Conflict { email: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Internal error")]
    Internal,
}

impl UserRegistrationError {
    pub fn not_found(id: i64) -> Self {
        Self::NotFound { id }
    }

    pub fn conflict(email: impl Into<String>) -> Self {
        Self::Conflict {
            email: email.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn internal() -> Self {
        Self::Internal
    }
}

impl From<DomainError> for UserRegistrationError {
    fn from(domain_error: DomainError) -> Self {
        match domain_error {
            DomainError::UserNotFound { id } => Self::not_found(id),
            DomainError::EmailAlreadyExists { email } => Self::conflict(email),
            other if other.kind() == ErrorKind::InvalidInput => {
                Self::validation(other.to_string())
            }
            _ => Self::internal(),
        }
    }
}
