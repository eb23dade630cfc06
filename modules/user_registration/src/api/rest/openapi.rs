use utoipa::OpenApi;

use crate::api::rest::{dto, handlers, problem};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "User Registration API",
        version = "v1",
        description = "Registration, status tracking and statistics for users"
    ),
    paths(
        handlers::create_user,
        handlers::get_user,
        handlers::change_status,
        handlers::list_statuses,
        handlers::get_statistics,
    ),
    components(schemas(
        dto::UserDto,
        dto::CreateUserReq,
        dto::StatusDto,
        dto::StatusInfoDto,
        dto::StatisticsDto,
        dto::StatusDescriptionDto,
        problem::Problem,
    )),
    tags((name = "registration", description = "User registration"))
)]
pub struct ApiDoc;
