//! SeaORM-backed repository implementation for the domain port.
//!
//! Generic over `C: ConnectionTrait`, so it can be built with a
//! `DatabaseConnection` or a transaction.

use anyhow::Context;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set, SqlErr,
};

use crate::contract::model::{Status, User};
use crate::domain::error::DomainError;
use crate::domain::repo::{NewUserRecord, UsersRepository};
use crate::infra::storage::entity::{ActiveModel as UserAM, Column, Entity as UserEntity};
use crate::infra::storage::mapper::{entities_to_contract, entity_to_contract};

/// SeaORM repository impl.
/// Holds a connection object; its lifetime/ownership is up to the caller.
pub struct SeaOrmUsersRepository<C>
where
    C: ConnectionTrait + Send + Sync,
{
    conn: C,
}

impl<C> SeaOrmUsersRepository<C>
where
    C: ConnectionTrait + Send + Sync,
{
    pub fn new(conn: C) -> Self {
        Self { conn }
    }
}

fn db_age(age: u32) -> anyhow::Result<i32> {
    i32::try_from(age).with_context(|| format!("age {age} out of range"))
}

fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

#[async_trait::async_trait]
impl<C> UsersRepository for SeaOrmUsersRepository<C>
where
    C: ConnectionTrait + Send + Sync + 'static,
{
    async fn find_by_id(&self, id: i64) -> anyhow::Result<Option<User>> {
        let found = UserEntity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("find_by_id failed")?;
        found.map(entity_to_contract).transpose()
    }

    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
        let found = UserEntity::find()
            .filter(Column::Email.eq(email))
            .one(&self.conn)
            .await
            .context("find_by_email failed")?;
        found.map(entity_to_contract).transpose()
    }

    async fn insert(&self, u: NewUserRecord) -> anyhow::Result<User> {
        let m = UserAM {
            id: NotSet,
            name: Set(u.name),
            born_date: Set(u.born_date),
            age: Set(db_age(u.age)?),
            email: Set(u.email.clone()),
            new_status: Set(u.new_status.name().to_owned()),
            old_status: Set(u.old_status.name().to_owned()),
        };
        match m.insert(&self.conn).await {
            Ok(saved) => entity_to_contract(saved),
            Err(e) if is_unique_violation(&e) => {
                Err(anyhow::Error::new(DomainError::email_already_exists(u.email)))
            }
            Err(e) => Err(anyhow::Error::new(e).context("insert failed")),
        }
    }

    async fn update(&self, u: User) -> anyhow::Result<User> {
        let m = UserAM {
            id: Set(u.id),
            name: Set(u.name),
            born_date: Set(u.born_date),
            age: Set(db_age(u.age)?),
            email: Set(u.email),
            new_status: Set(u.new_status.name().to_owned()),
            old_status: Set(u.old_status.name().to_owned()),
        };
        let saved = m.update(&self.conn).await.context("update failed")?;
        entity_to_contract(saved)
    }

    async fn count(&self) -> anyhow::Result<u64> {
        UserEntity::find()
            .count(&self.conn)
            .await
            .context("count failed")
    }

    async fn find_by_status(&self, status: Status) -> anyhow::Result<Vec<User>> {
        let rows = UserEntity::find()
            .filter(Column::NewStatus.eq(status.name()))
            .order_by_asc(Column::Id)
            .all(&self.conn)
            .await
            .context("find_by_status failed")?;
        entities_to_contract(rows)
    }

    async fn find_by_age_at_least(&self, threshold: u32) -> anyhow::Result<Vec<User>> {
        let rows = UserEntity::find()
            .filter(Column::Age.gte(db_age(threshold)?))
            .order_by_asc(Column::Age)
            .order_by_asc(Column::Id)
            .all(&self.conn)
            .await
            .context("find_by_age_at_least failed")?;
        entities_to_contract(rows)
    }

    async fn find_by_age_less_than(&self, threshold: u32) -> anyhow::Result<Vec<User>> {
        let rows = UserEntity::find()
            .filter(Column::Age.lt(db_age(threshold)?))
            .order_by_asc(Column::Age)
            .order_by_asc(Column::Id)
            .all(&self.conn)
            .await
            .context("find_by_age_less_than failed")?;
        entities_to_contract(rows)
    }
}
