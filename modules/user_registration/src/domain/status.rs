//! Status transitions and the projection reported after a change.

use crate::contract::model::{Status, StatusChange, User};

/// Move `user` to `target`, keeping the previous current status in `old_status`.
/// Every transition is allowed, including a transition to the same status.
pub fn record_transition(user: &mut User, target: Status) {
    user.old_status = user.new_status;
    user.new_status = target;
}

impl From<&User> for StatusChange {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id,
            new_status: user.new_status,
            old_status: user.old_status,
        }
    }
}
