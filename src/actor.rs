//! Normalized caller identity.
//!
//! The authenticator hands every call a `{user_id, role}` pair; workflows
//! trust it verbatim and never re-derive identity from request fields.

use crate::roles::Role;

/// The authenticated caller of a workflow operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub user_id: i32,
    pub role: Role,
}

impl Actor {
    #[must_use]
    pub const fn new(user_id: i32, role: Role) -> Self { Self { user_id, role } }
}

impl From<&crate::models::User> for Actor {
    /// Build an actor from a stored user, falling back to the plain `user`
    /// role when the stored text is outside the vocabulary.
    fn from(user: &crate::models::User) -> Self {
        Self {
            user_id: user.id,
            role: user.role.parse().unwrap_or(Role::User),
        }
    }
}
