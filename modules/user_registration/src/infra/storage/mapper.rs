use anyhow::Context;

use crate::contract::model::{Status, User};
use crate::infra::storage::entity::Model as UserEntity;

/// Convert a database entity to a contract model.
/// Fails only on rows written outside this module (unknown status, negative age).
pub fn entity_to_contract(entity: UserEntity) -> anyhow::Result<User> {
    let new_status: Status = entity
        .new_status
        .parse()
        .with_context(|| format!("user {}: bad new_status", entity.id))?;
    let old_status: Status = entity
        .old_status
        .parse()
        .with_context(|| format!("user {}: bad old_status", entity.id))?;
    let age = u32::try_from(entity.age)
        .with_context(|| format!("user {}: bad age {}", entity.id, entity.age))?;

    Ok(User {
        id: entity.id,
        name: entity.name,
        born_date: entity.born_date,
        age,
        email: entity.email,
        new_status,
        old_status,
    })
}

/// Convert a batch of rows, failing on the first bad one.
pub fn entities_to_contract(rows: Vec<UserEntity>) -> anyhow::Result<Vec<User>> {
    rows.into_iter().map(entity_to_contract).collect()
}
