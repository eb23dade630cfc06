use async_trait::async_trait;
use std::sync::Arc;

use crate::contract::{
    client::UserRegistrationApi,
    error::UserRegistrationError,
    model::{NewUser, Statistics, StatisticsQuery, Status, StatusChange, User},
};
use crate::domain::service::Service;

/// Local implementation of the UserRegistrationApi trait that delegates to the domain service
pub struct UserRegistrationLocalClient {
    service: Arc<Service>,
}

impl UserRegistrationLocalClient {
    pub fn new(service: Arc<Service>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl UserRegistrationApi for UserRegistrationLocalClient {
    async fn create_user(&self, new_user: NewUser) -> Result<User, UserRegistrationError> {
        self.service.create_user(new_user).await.map_err(Into::into)
    }

    async fn get_user(&self, id: i64) -> Result<User, UserRegistrationError> {
        self.service.get_user(id).await.map_err(Into::into)
    }

    async fn change_status(
        &self,
        id: i64,
        status: Status,
    ) -> Result<StatusChange, UserRegistrationError> {
        self.service
            .change_status(id, status)
            .await
            .map_err(Into::into)
    }

    async fn get_statistics(
        &self,
        query: StatisticsQuery,
    ) -> Result<Statistics, UserRegistrationError> {
        self.service.get_statistics(query).await.map_err(Into::into)
    }
}
