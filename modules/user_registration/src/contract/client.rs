use async_trait::async_trait;

use crate::contract::{
    error::UserRegistrationError,
    model::{NewUser, Statistics, StatisticsQuery, Status, StatusChange, User},
};

/// Public API trait for the user_registration module that other modules can use
#[async_trait]
pub trait UserRegistrationApi: Send + Sync {
    /// Register a new user
    async fn create_user(&self, new_user: NewUser) -> Result<User, UserRegistrationError>;

    /// Get a user by ID
    async fn get_user(&self, id: i64) -> Result<User, UserRegistrationError>;

    /// Move a user to `status`, remembering the previous one
    async fn change_status(
        &self,
        id: i64,
        status: Status,
    ) -> Result<StatusChange, UserRegistrationError>;

    /// Aggregate statistics with optional status / age filters
    async fn get_statistics(
        &self,
        query: StatisticsQuery,
    ) -> Result<Statistics, UserRegistrationError>;
}
