use async_trait::async_trait;

use crate::contract::model::{Status, User};

/// A user that has not been stored yet; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUserRecord {
    pub name: Option<String>,
    pub born_date: String,
    pub age: u32,
    pub email: String,
    pub new_status: Status,
    pub old_status: Status,
}

/// Port for the domain layer: persistence operations the domain needs.
/// Object-safe and async-friendly via `async_trait`.
///
/// An `insert` that hits the email uniqueness constraint must fail with a
/// `DomainError::EmailAlreadyExists` inside the returned `anyhow::Error`.
#[async_trait]
pub trait UsersRepository: Send + Sync {
    /// Load a user by id.
    async fn find_by_id(&self, id: i64) -> anyhow::Result<Option<User>>;
    /// Load a user by email (exact match).
    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>>;
    /// First save: persist and return the user with its assigned id.
    async fn insert(&self, u: NewUserRecord) -> anyhow::Result<User>;
    /// Subsequent saves: update in place by `u.id`.
    async fn update(&self, u: User) -> anyhow::Result<User>;
    /// Number of stored users.
    async fn count(&self) -> anyhow::Result<u64>;
    /// Users whose current (`new_status`) status equals `status`.
    async fn find_by_status(&self, status: Status) -> anyhow::Result<Vec<User>>;
    /// Users with `age >= threshold`, ascending by age.
    async fn find_by_age_at_least(&self, threshold: u32) -> anyhow::Result<Vec<User>>;
    /// Users with `age < threshold`, ascending by age.
    async fn find_by_age_less_than(&self, threshold: u32) -> anyhow::Result<Vec<User>>;
}
