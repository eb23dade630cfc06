use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::contract::model::{NewUser, Statistics, StatisticsQuery, Status, StatusChange, User};
use crate::domain::error::DomainError;
use crate::domain::repo::{NewUserRecord, UsersRepository};
use crate::domain::statistics::StatisticsAggregator;
use crate::domain::status::record_transition;
use crate::domain::validation::{compute_age, validate_email};

/// Domain service with business rules for user registration.
/// Depends only on the repository port, not on infra types.
#[derive(Clone)]
pub struct Service {
    repo: Arc<dyn UsersRepository>,
}

impl Service {
    /// Create a service with dependencies.
    pub fn new(repo: Arc<dyn UsersRepository>) -> Self {
        Self { repo }
    }

    #[instrument(
        name = "user_registration.service.create_user",
        skip(self, new_user),
        fields(email = %new_user.email)
    )]
    pub async fn create_user(&self, new_user: NewUser) -> Result<User, DomainError> {
        info!("Registering new user");

        validate_email(&new_user.email)?;

        // Fast path only; the unique index decides on concurrent registrations.
        if self
            .repo
            .find_by_email(&new_user.email)
            .await
            .map_err(DomainError::from_repo)?
            .is_some()
        {
            return Err(DomainError::email_already_exists(new_user.email));
        }

        let born_date = new_user.born_date.unwrap_or_default();
        let age = compute_age(&born_date)?;

        let record = NewUserRecord {
            name: new_user.name,
            born_date,
            age,
            email: new_user.email,
            new_status: Status::Undefined,
            old_status: Status::Undefined,
        };

        let user = self
            .repo
            .insert(record)
            .await
            .map_err(DomainError::from_repo)?;

        info!(user_id = user.id, age = user.age, "Successfully registered user");
        Ok(user)
    }

    #[instrument(name = "user_registration.service.get_user", skip(self), fields(user_id = %id))]
    pub async fn get_user(&self, id: i64) -> Result<User, DomainError> {
        debug!("Getting user by id");

        let user = self.load(id).await?;

        debug!("Successfully retrieved user");
        Ok(user)
    }

    #[instrument(
        name = "user_registration.service.change_status",
        skip(self),
        fields(user_id = %id, status = %status)
    )]
    pub async fn change_status(&self, id: i64, status: Status) -> Result<StatusChange, DomainError> {
        info!("Changing user status");

        let mut user = self.load(id).await?;
        record_transition(&mut user, status);

        let updated = self
            .repo
            .update(user)
            .await
            .map_err(DomainError::from_repo)?;

        let change = StatusChange::from(&updated);
        info!(
            old_status = %change.old_status,
            new_status = %change.new_status,
            "Status changed"
        );
        Ok(change)
    }

    #[instrument(name = "user_registration.service.get_statistics", skip(self))]
    pub async fn get_statistics(&self, query: StatisticsQuery) -> Result<Statistics, DomainError> {
        debug!("Collecting statistics");

        let stats = StatisticsAggregator::new(self.repo.as_ref())
            .collect(&query)
            .await?;

        debug!(
            total = stats.total_users_count,
            average_age = stats.average_age,
            "Successfully collected statistics"
        );
        Ok(stats)
    }

    async fn load(&self, id: i64) -> Result<User, DomainError> {
        self.repo
            .find_by_id(id)
            .await
            .map_err(DomainError::from_repo)?
            .ok_or_else(|| DomainError::user_not_found(id))
    }
}
