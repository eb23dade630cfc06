use std::sync::Arc;

use axum::{
    extract::{Path, Query},
    http::Uri,
    response::Json,
    Extension,
};
use serde_json::{json, Value};
use tracing::{info, warn};

use crate::api::rest::dto::{
    status_catalog, ChangeStatusQuery, CreateUserReq, StatisticsDto, StatisticsQueryDto,
    StatusDescriptionDto, StatusInfoDto, UserDto,
};
use crate::api::rest::error::map_domain_error;
use crate::api::rest::problem::{Problem, ProblemResponse};
use crate::api::rest::request_id::XRequestId;
use crate::domain::service::Service;

/// Register a new user
#[utoipa::path(
    post,
    path = "/registration/create",
    tag = "registration",
    request_body = CreateUserReq,
    responses(
        (status = 200, description = "Registered user", body = UserDto),
        (status = 400, description = "Invalid email or birth date", body = Problem),
        (status = 409, description = "Email already registered", body = Problem),
        (status = 500, description = "Internal error", body = Problem)
    )
)]
pub async fn create_user(
    uri: Uri,
    Extension(svc): Extension<Arc<Service>>,
    Extension(rid): Extension<XRequestId>,
    Json(req_body): Json<CreateUserReq>,
) -> Result<Json<UserDto>, ProblemResponse> {
    info!("Registering user: {:?}", req_body);

    match svc.create_user(req_body.into()).await {
        Ok(user) => Ok(Json(UserDto::from(user))),
        Err(e) => {
            warn!("Failed to register user: {}", e);
            Err(map_domain_error(&e, uri.path(), Some(&rid.0)))
        }
    }
}

/// Get a registered user by id
#[utoipa::path(
    get,
    path = "/registration/{id}",
    tag = "registration",
    params(("id" = i64, Path, description = "User id")),
    responses(
        (status = 200, description = "User found", body = UserDto),
        (status = 404, description = "No such user", body = Problem),
        (status = 500, description = "Internal error", body = Problem)
    )
)]
pub async fn get_user(
    uri: Uri,
    Extension(svc): Extension<Arc<Service>>,
    Extension(rid): Extension<XRequestId>,
    Path(id): Path<i64>,
) -> Result<Json<UserDto>, ProblemResponse> {
    info!("Getting user with id: {}", id);

    match svc.get_user(id).await {
        Ok(user) => Ok(Json(UserDto::from(user))),
        Err(e) => {
            warn!("Failed to get user {}: {}", id, e);
            Err(map_domain_error(&e, uri.path(), Some(&rid.0)))
        }
    }
}

/// Move a user to a new status; the previous one becomes `oldStatus`
#[utoipa::path(
    get,
    path = "/registration/status/{id}",
    tag = "registration",
    params(("id" = i64, Path, description = "User id"), ChangeStatusQuery),
    responses(
        (status = 200, description = "Status changed", body = StatusInfoDto),
        (status = 400, description = "Missing or unknown status"),
        (status = 404, description = "No such user", body = Problem),
        (status = 500, description = "Internal error", body = Problem)
    )
)]
pub async fn change_status(
    uri: Uri,
    Extension(svc): Extension<Arc<Service>>,
    Extension(rid): Extension<XRequestId>,
    Path(id): Path<i64>,
    Query(query): Query<ChangeStatusQuery>,
) -> Result<Json<StatusInfoDto>, ProblemResponse> {
    info!("Changing status of user {} to {:?}", id, query.status);

    match svc.change_status(id, query.status.into()).await {
        Ok(change) => Ok(Json(StatusInfoDto::from(change))),
        Err(e) => {
            warn!("Failed to change status of user {}: {}", id, e);
            Err(map_domain_error(&e, uri.path(), Some(&rid.0)))
        }
    }
}

/// Status catalog with display text
#[utoipa::path(
    get,
    path = "/registration/statuses",
    tag = "registration",
    responses((status = 200, description = "All statuses", body = [StatusDescriptionDto]))
)]
pub async fn list_statuses() -> Json<Vec<StatusDescriptionDto>> {
    Json(status_catalog())
}

/// Population statistics with optional status and adult filters
#[utoipa::path(
    get,
    path = "/registration/statistics",
    tag = "registration",
    params(StatisticsQueryDto),
    responses(
        (status = 200, description = "Statistics", body = StatisticsDto),
        (status = 400, description = "Invalid status filter", body = Problem),
        (status = 500, description = "Internal error", body = Problem)
    )
)]
pub async fn get_statistics(
    uri: Uri,
    Extension(svc): Extension<Arc<Service>>,
    Extension(rid): Extension<XRequestId>,
    Query(query): Query<StatisticsQueryDto>,
) -> Result<Json<StatisticsDto>, ProblemResponse> {
    info!("Collecting statistics with query: {:?}", query);

    match svc.get_statistics(query.into()).await {
        Ok(stats) => Ok(Json(StatisticsDto::from(stats))),
        Err(e) => {
            warn!("Failed to collect statistics: {}", e);
            Err(map_domain_error(&e, uri.path(), Some(&rid.0)))
        }
    }
}

pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}
