use thiserror::Error;

/// Failure category carried by every domain error.
/// The transport decides how each kind is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidInput,
    Conflict,
    NotFound,
    Internal,
}

/// Domain-specific errors using thiserror
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("User not found: {id}")]
    UserNotFound { id: i64 },

    #[error("User with email '{email}' already exists")]
    EmailAlreadyExists { email: String },

    #[error("Invalid email format: '{email}'. Example: name@example.com")]
    InvalidEmail { email: String },

    #[error("Birth date is missing")]
    MissingBirthDate,

    #[error("Invalid birth date '{date}'. Expected format dd.MM.yyyy, e.g. 31.12.2001")]
    InvalidBirthDate { date: String },

    #[error("Birth date cannot be in the future: '{date}'")]
    FutureBirthDate { date: String },

    #[error("Invalid status filter '{status}'. Expected ONLINE or OFFLINE")]
    InvalidStatusFilter { status: String },

    #[error("Database error: {message}")]
    Database { message: String },
}

impl DomainError {
    pub fn user_not_found(id: i64) -> Self {
        Self::UserNotFound { id }
    }

    pub fn email_already_exists(email: impl Into<String>) -> Self {
        Self::EmailAlreadyExists {
            email: email.into(),
        }
    }

    pub fn invalid_email(email: impl Into<String>) -> Self {
        Self::InvalidEmail {
            email: email.into(),
        }
    }

    pub fn missing_birth_date() -> Self {
        Self::MissingBirthDate
    }

    pub fn invalid_birth_date(date: impl Into<String>) -> Self {
        Self::InvalidBirthDate { date: date.into() }
    }

    pub fn future_birth_date(date: impl Into<String>) -> Self {
        Self::FutureBirthDate { date: date.into() }
    }

    pub fn invalid_status_filter(status: impl Into<String>) -> Self {
        Self::InvalidStatusFilter {
            status: status.into(),
        }
    }

    pub fn database(message: impl Into<String>) -> Self {
        Self::Database {
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::UserNotFound { .. } => ErrorKind::NotFound,
            Self::EmailAlreadyExists { .. } => ErrorKind::Conflict,
            Self::InvalidEmail { .. }
            | Self::MissingBirthDate
            | Self::InvalidBirthDate { .. }
            | Self::FutureBirthDate { .. }
            | Self::InvalidStatusFilter { .. } => ErrorKind::InvalidInput,
            Self::Database { .. } => ErrorKind::Internal,
        }
    }

    /// Recover a domain error raised inside a repository, or wrap the failure as `Database`.
    pub fn from_repo(err: anyhow::Error) -> Self {
        match err.downcast::<DomainError>() {
            Ok(domain) => domain,
            Err(other) => Self::database(format!("{other:#}")),
        }
    }
}
