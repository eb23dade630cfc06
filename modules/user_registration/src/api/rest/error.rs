use axum::http::StatusCode;

use crate::api::rest::problem::{Problem, ProblemResponse};
use crate::domain::error::DomainError;

/// Helper to create a ProblemResponse with less boilerplate
pub fn from_parts(
    status: StatusCode,
    code: &str,
    title: &str,
    detail: impl Into<String>,
    instance: &str,
    request_id: Option<&str>,
) -> ProblemResponse {
    let problem = Problem::new(status, title, detail)
        .with_type(format!("https://errors.example.com/{code}"))
        .with_code(code)
        .with_instance(instance);

    let problem = match request_id {
        Some(id) => problem.with_request_id(id),
        None => problem,
    };

    ProblemResponse(problem)
}

/// Map domain error to RFC9457 ProblemResponse
pub fn map_domain_error(
    e: &DomainError,
    instance: &str,
    request_id: Option<&str>,
) -> ProblemResponse {
    match e {
        DomainError::UserNotFound { .. } => from_parts(
            StatusCode::NOT_FOUND,
            "USERS_NOT_FOUND",
            "User not found",
            e.to_string(),
            instance,
            request_id,
        ),
        DomainError::EmailAlreadyExists { .. } => from_parts(
            StatusCode::CONFLICT,
            "USERS_EMAIL_CONFLICT",
            "Email already exists",
            e.to_string(),
            instance,
            request_id,
        ),
        DomainError::InvalidEmail { .. } => from_parts(
            StatusCode::BAD_REQUEST,
            "USERS_INVALID_EMAIL",
            "Invalid email",
            e.to_string(),
            instance,
            request_id,
        ),
        DomainError::MissingBirthDate
        | DomainError::InvalidBirthDate { .. }
        | DomainError::FutureBirthDate { .. }
        | DomainError::InvalidStatusFilter { .. } => from_parts(
            StatusCode::BAD_REQUEST,
            "USERS_VALIDATION",
            "Validation error",
            e.to_string(),
            instance,
            request_id,
        ),
        DomainError::Database { .. } => {
            // Log the internal error details but don't expose them to the client
            tracing::error!(error = ?e, "Database error occurred");
            from_parts(
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_DB",
                "Internal error",
                "An internal database error occurred",
                instance,
                request_id,
            )
        }
    }
}
