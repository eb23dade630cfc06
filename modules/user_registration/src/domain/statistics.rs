//! Statistics over the user population: a status-filtered list, an age-filtered
//! list, the global count, and the average age over the union of both lists.

use std::collections::HashSet;

use tracing::debug;

use crate::contract::model::{Statistics, StatisticsQuery, Status, User};
use crate::domain::error::DomainError;
use crate::domain::repo::UsersRepository;

/// Age at which a user counts as an adult.
pub const ADULT_AGE: u32 = 18;

/// Statuses a statistics query may filter on.
const FILTERABLE: [Status; 2] = [Status::Online, Status::Offline];

/// Resolve the raw status filter. Absent or empty means "no filter";
/// `UNDEFINED` is not a valid filter value.
pub fn resolve_status_filter(raw: Option<&str>) -> Result<Option<Status>, DomainError> {
    let Some(raw) = raw.filter(|s| !s.is_empty()) else {
        return Ok(None);
    };
    FILTERABLE
        .into_iter()
        .find(|status| status.name().eq_ignore_ascii_case(raw))
        .map(Some)
        .ok_or_else(|| DomainError::invalid_status_filter(raw))
}

/// What a consumer sees of a user; two users with the same visible fields
/// are the same entry for averaging purposes, whatever their ids.
#[derive(PartialEq, Eq, Hash)]
struct VisibleFields<'a> {
    name: Option<&'a str>,
    born_date: &'a str,
    age: u32,
    email: &'a str,
    current_status: Status,
}

impl<'a> From<&'a User> for VisibleFields<'a> {
    fn from(u: &'a User) -> Self {
        Self {
            name: u.name.as_deref(),
            born_date: &u.born_date,
            age: u.age,
            email: &u.email,
            current_status: u.current_status(),
        }
    }
}

/// Integer mean of ages over the value-deduplicated union of both lists; 0 when empty.
pub fn average_age_of_union(by_status: &[User], by_age: &[User]) -> u32 {
    let union: HashSet<VisibleFields<'_>> = by_status
        .iter()
        .chain(by_age)
        .map(VisibleFields::from)
        .collect();

    if union.is_empty() {
        return 0;
    }

    let total: u64 = union.iter().map(|u| u64::from(u.age)).sum();
    let mean = total / union.len() as u64;
    // a mean of u32 values always fits
    u32::try_from(mean).unwrap_or(u32::MAX)
}

/// Builds [`Statistics`] from the store.
pub struct StatisticsAggregator<'a> {
    repo: &'a dyn UsersRepository,
}

impl<'a> StatisticsAggregator<'a> {
    pub fn new(repo: &'a dyn UsersRepository) -> Self {
        Self { repo }
    }

    pub async fn collect(&self, query: &StatisticsQuery) -> Result<Statistics, DomainError> {
        // Reject a bad filter before touching the store.
        let status = resolve_status_filter(query.status.as_deref())?;

        let users_by_status = match status {
            Some(status) => self
                .repo
                .find_by_status(status)
                .await
                .map_err(DomainError::from_repo)?,
            None => Vec::new(),
        };

        let users_by_age = match query.is_adult {
            Some(true) => self
                .repo
                .find_by_age_at_least(ADULT_AGE)
                .await
                .map_err(DomainError::from_repo)?,
            Some(false) => self
                .repo
                .find_by_age_less_than(ADULT_AGE)
                .await
                .map_err(DomainError::from_repo)?,
            None => Vec::new(),
        };

        let average_age = average_age_of_union(&users_by_status, &users_by_age);
        let total_users_count = self.repo.count().await.map_err(DomainError::from_repo)?;

        debug!(
            status = ?status,
            is_adult = ?query.is_adult,
            by_status = users_by_status.len(),
            by_age = users_by_age.len(),
            average_age,
            "statistics collected"
        );

        Ok(Statistics {
            total_users_count,
            users_by_status,
            users_by_age,
            average_age,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: i64, email: &str, age: u32, status: Status) -> User {
        User {
            id,
            name: Some("Name".into()),
            born_date: "01.01.2000".into(),
            age,
            email: email.into(),
            new_status: status,
            old_status: Status::Undefined,
        }
    }

    #[test]
    fn status_filter_is_case_insensitive() {
        assert_eq!(resolve_status_filter(Some("online")).unwrap(), Some(Status::Online));
        assert_eq!(resolve_status_filter(Some("OffLine")).unwrap(), Some(Status::Offline));
    }

    #[test]
    fn absent_or_empty_status_means_no_filter() {
        assert_eq!(resolve_status_filter(None).unwrap(), None);
        assert_eq!(resolve_status_filter(Some("")).unwrap(), None);
    }

    #[test]
    fn undefined_and_unknown_filters_are_rejected() {
        for raw in ["UNDEFINED", "undefined", "Bad", " ONLINE", "ONLINE "] {
            assert!(
                matches!(
                    resolve_status_filter(Some(raw)),
                    Err(DomainError::InvalidStatusFilter { .. })
                ),
                "{raw:?}"
            );
        }
    }

    #[test]
    fn average_of_nothing_is_zero() {
        assert_eq!(average_age_of_union(&[], &[]), 0);
    }

    #[test]
    fn average_truncates() {
        let a = user(1, "a@x.io", 20, Status::Offline);
        let b = user(2, "b@x.io", 13, Status::Undefined);
        assert_eq!(average_age_of_union(&[a], &[b]), 16);
    }

    #[test]
    fn same_user_in_both_lists_counts_once() {
        let adult = user(1, "a@x.io", 30, Status::Online);
        let other = user(2, "b@x.io", 20, Status::Online);
        let by_status = vec![adult.clone(), other];
        let by_age = vec![adult];
        // union is {30, 20}
        assert_eq!(average_age_of_union(&by_status, &by_age), 25);
    }

    #[test]
    fn dedup_is_by_visible_value_not_id() {
        let first = user(1, "same@x.io", 40, Status::Online);
        let mut twin = first.clone();
        twin.id = 2;
        twin.old_status = Status::Offline; // not visible
        let young = user(3, "young@x.io", 10, Status::Online);

        // {40, 10}: the twin collapses into the first entry
        assert_eq!(average_age_of_union(&[first, twin, young], &[]), 25);
    }

    #[test]
    fn differing_visible_field_keeps_both() {
        let first = user(1, "same@x.io", 40, Status::Online);
        let mut renamed = first.clone();
        renamed.name = None;
        let young = user(3, "young@x.io", 10, Status::Online);

        // {40, 40, 10}
        assert_eq!(average_age_of_union(&[first, renamed, young], &[]), 30);
    }
}
