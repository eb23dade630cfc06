use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::contract::model::{
    NewUser, Statistics, StatisticsQuery, Status, StatusChange, User,
};

/// Presence state as exposed over REST (upper-case names)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum StatusDto {
    Undefined,
    Online,
    Offline,
}

/// REST view of a registered user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub name: Option<String>,
    pub born_date: String,
    pub age: u32,
    pub email: String,
    pub current_status: StatusDto,
}

/// Registration payload. `age` and `currentStatus` are computed server-side;
/// if a client sends them they are ignored like any other unknown field.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateUserReq {
    pub name: Option<String>,
    /// `dd.MM.yyyy`
    #[schema(example = "31.12.2001")]
    pub born_date: Option<String>,
    #[schema(example = "name@example.com")]
    pub email: String,
}

/// Result of a status change
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatusInfoDto {
    pub user_id: i64,
    pub new_status: StatusDto,
    pub old_status: StatusDto,
}

#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ChangeStatusQuery {
    /// Target status
    pub status: StatusDto,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct StatisticsQueryDto {
    /// `ONLINE` or `OFFLINE`, case-insensitive
    pub status: Option<String>,
    /// `true` selects age >= 18, `false` age < 18
    pub is_adult: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatisticsDto {
    pub total_users_count: u64,
    pub users_by_status: Vec<UserDto>,
    pub users_by_age: Vec<UserDto>,
    pub average_age: u32,
}

/// One entry of the status catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct StatusDescriptionDto {
    pub status: StatusDto,
    pub description: String,
}

/// Human-readable text for each status.
pub fn status_description(status: Status) -> &'static str {
    match status {
        Status::Undefined => "absent",
        Status::Online => "online",
        Status::Offline => "offline",
    }
}

/// Catalog of all statuses with their display text, in declaration order.
pub fn status_catalog() -> Vec<StatusDescriptionDto> {
    Status::ALL
        .into_iter()
        .map(|s| StatusDescriptionDto {
            status: s.into(),
            description: status_description(s).to_owned(),
        })
        .collect()
}

// Conversion implementations between REST DTOs and contract models

impl From<Status> for StatusDto {
    fn from(s: Status) -> Self {
        match s {
            Status::Undefined => StatusDto::Undefined,
            Status::Online => StatusDto::Online,
            Status::Offline => StatusDto::Offline,
        }
    }
}

impl From<StatusDto> for Status {
    fn from(s: StatusDto) -> Self {
        match s {
            StatusDto::Undefined => Status::Undefined,
            StatusDto::Online => Status::Online,
            StatusDto::Offline => Status::Offline,
        }
    }
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            current_status: user.current_status().into(),
            name: user.name,
            born_date: user.born_date,
            age: user.age,
            email: user.email,
        }
    }
}

impl From<CreateUserReq> for NewUser {
    fn from(req: CreateUserReq) -> Self {
        Self {
            name: req.name,
            born_date: req.born_date,
            email: req.email,
        }
    }
}

impl From<StatusChange> for StatusInfoDto {
    fn from(c: StatusChange) -> Self {
        Self {
            user_id: c.user_id,
            new_status: c.new_status.into(),
            old_status: c.old_status.into(),
        }
    }
}

impl From<StatisticsQueryDto> for StatisticsQuery {
    fn from(q: StatisticsQueryDto) -> Self {
        Self {
            status: q.status,
            is_adult: q.is_adult,
        }
    }
}

impl From<Statistics> for StatisticsDto {
    fn from(s: Statistics) -> Self {
        Self {
            total_users_count: s.total_users_count,
            users_by_status: s.users_by_status.into_iter().map(UserDto::from).collect(),
            users_by_age: s.users_by_age.into_iter().map(UserDto::from).collect(),
            average_age: s.average_age,
        }
    }
}
