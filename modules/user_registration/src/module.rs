use std::sync::Arc;

use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;
use tracing::{debug, info};

use crate::api::rest::routes;
use crate::config::UserRegistrationConfig;
use crate::contract::client::UserRegistrationApi;
use crate::domain::service::Service;
use crate::gateways::local::UserRegistrationLocalClient;
use crate::infra::storage::migrations::Migrator;
use crate::infra::storage::sea_orm_repo::SeaOrmUsersRepository;

/// The user registration module: storage, domain service, in-process client and REST router.
#[derive(Clone)]
pub struct UserRegistration {
    service: Arc<Service>,
    config: UserRegistrationConfig,
}

impl UserRegistration {
    /// Migrate the database and wire the repository to the domain service.
    pub async fn init(db: DatabaseConnection, cfg: UserRegistrationConfig) -> anyhow::Result<Self> {
        info!("Initializing user_registration module");
        debug!(
            "Loaded user_registration config: enable_docs={}, cors_enabled={}, request_timeout_sec={}, body_limit_bytes={}",
            cfg.enable_docs, cfg.cors_enabled, cfg.request_timeout_sec, cfg.body_limit_bytes
        );

        Self::migrate(&db).await?;

        let repo = SeaOrmUsersRepository::new(db);
        let service = Service::new(Arc::new(repo));

        Ok(Self {
            service: Arc::new(service),
            config: cfg,
        })
    }

    pub async fn migrate(db: &DatabaseConnection) -> anyhow::Result<()> {
        info!("Running user_registration database migrations");
        Migrator::up(db, None).await?;
        info!("User registration database migrations completed successfully");
        Ok(())
    }

    /// Axum router with all routes and middleware.
    pub fn router(&self) -> axum::Router {
        info!("Registering user_registration REST routes");
        routes::build_router(self.service.clone(), &self.config)
    }

    /// Local in-process client.
    pub fn client(&self) -> Arc<dyn UserRegistrationApi> {
        Arc::new(UserRegistrationLocalClient::new(self.service.clone()))
    }

    pub fn config(&self) -> &UserRegistrationConfig {
        &self.config
    }
}
