use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Presence state of a user. Plain variant, no presentation data attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Status {
    #[default]
    Undefined,
    Online,
    Offline,
}

impl Status {
    pub const ALL: [Status; 3] = [Status::Undefined, Status::Online, Status::Offline];

    /// Canonical upper-case name, as stored and as shown in `currentStatus`.
    pub fn name(self) -> &'static str {
        match self {
            Status::Undefined => "UNDEFINED",
            Status::Online => "ONLINE",
            Status::Offline => "OFFLINE",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown status '{0}'")]
pub struct ParseStatusError(pub String);

impl FromStr for Status {
    type Err = ParseStatusError;

    /// Exact match on the canonical name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Status::ALL
            .into_iter()
            .find(|st| st.name() == s)
            .ok_or_else(|| ParseStatusError(s.to_string()))
    }
}

/// Pure user model for inter-module communication (no serde)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub name: Option<String>,
    /// Birth date exactly as submitted, `dd.MM.yyyy`.
    pub born_date: String,
    /// Whole years at registration time; never recomputed.
    pub age: u32,
    pub email: String,
    pub new_status: Status,
    pub old_status: Status,
}

impl User {
    pub fn current_status(&self) -> Status {
        self.new_status
    }
}

/// Data for registering a new user
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NewUser {
    pub name: Option<String>,
    pub born_date: Option<String>,
    pub email: String,
}

/// Outcome of a status change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusChange {
    pub user_id: i64,
    pub new_status: Status,
    pub old_status: Status,
}

/// Optional statistics filters, as received from the caller
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StatisticsQuery {
    /// Case-insensitive `ONLINE` / `OFFLINE`; empty is treated as absent.
    pub status: Option<String>,
    pub is_adult: Option<bool>,
}

/// Aggregate view over the user population
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Statistics {
    pub total_users_count: u64,
    pub users_by_status: Vec<User>,
    pub users_by_age: Vec<User>,
    pub average_age: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_names_roundtrip() {
        for status in Status::ALL {
            assert_eq!(status.name().parse::<Status>(), Ok(status));
            assert_eq!(status.to_string(), status.name());
        }
    }

    #[test]
    fn status_parse_is_case_sensitive() {
        assert_eq!(
            "online".parse::<Status>(),
            Err(ParseStatusError("online".into()))
        );
        assert!("".parse::<Status>().is_err());
    }

    #[test]
    fn default_status_is_undefined() {
        assert_eq!(Status::default(), Status::Undefined);
    }
}
