//! User record helpers.

use chrono::NaiveDateTime;
use diesel::{prelude::*, result::QueryResult};
use diesel_async::RunQueryDsl;

use super::connection::DbConnection;
use crate::roles::Role;

/// Look up a user record by id.
///
/// # Errors
/// Returns any error produced by the underlying database query.
#[must_use = "handle the result"]
pub async fn get_user(conn: &mut DbConnection, user_id: i32) -> QueryResult<Option<crate::models::User>> {
    use crate::schema::users::dsl::users;
    users
        .find(user_id)
        .first::<crate::models::User>(conn)
        .await
        .optional()
}

/// Insert a new user record and return it.
///
/// # Errors
/// Returns any error produced by the insertion query.
#[must_use = "handle the result"]
pub async fn create_user(
    conn: &mut DbConnection,
    user: &crate::models::NewUser<'_>,
) -> QueryResult<crate::models::User> {
    use crate::schema::users::dsl::users;
    diesel::insert_into(users).values(user).get_result(conn).await
}

/// List the editor pool, ordered ascending by id.
///
/// The ordering is what makes the round-robin distribution deterministic.
///
/// # Errors
/// Returns any error produced by the underlying database query.
#[must_use = "handle the result"]
pub async fn list_editors(conn: &mut DbConnection) -> QueryResult<Vec<crate::models::User>> {
    use crate::schema::users::dsl::{id, role, users};
    users
        .filter(role.eq(Role::Editor.as_str()))
        .order(id.asc())
        .load::<crate::models::User>(conn)
        .await
}

/// Look up a user only if they currently hold the given role.
///
/// # Errors
/// Returns any error produced by the underlying database query.
#[must_use = "handle the result"]
pub async fn get_user_with_role(
    conn: &mut DbConnection,
    user_id: i32,
    expected: Role,
) -> QueryResult<Option<crate::models::User>> {
    use crate::schema::users::dsl::{role, users};
    users
        .find(user_id)
        .filter(role.eq(expected.as_str()))
        .first::<crate::models::User>(conn)
        .await
        .optional()
}

/// Set a user's role unconditionally.
///
/// # Errors
/// Returns any error produced by the update query.
#[must_use = "handle the result"]
pub async fn set_role(conn: &mut DbConnection, user_id: i32, new_role: Role) -> QueryResult<usize> {
    use crate::schema::users::dsl::{role, users};
    diesel::update(users.find(user_id))
        .set(role.eq(new_role.as_str()))
        .execute(conn)
        .await
}

/// Change a user's role only while they still hold `from`.
///
/// Returns the updated row, or `None` when the precondition no longer held.
///
/// # Errors
/// Returns any error produced by the update query.
#[must_use = "handle the result"]
pub async fn change_role_if(
    conn: &mut DbConnection,
    user_id: i32,
    from: Role,
    to: Role,
) -> QueryResult<Option<crate::models::User>> {
    use crate::schema::users::dsl::{role, users};
    diesel::update(users.find(user_id).filter(role.eq(from.as_str())))
        .set(role.eq(to.as_str()))
        .get_result::<crate::models::User>(conn)
        .await
        .optional()
}

/// Build a `NewUser` with the standard defaults for fixtures and the console.
#[must_use]
pub fn new_user<'a>(email: &'a str, name: &'a str, role: Role, at: NaiveDateTime) -> crate::models::NewUser<'a> {
    crate::models::NewUser {
        email,
        name,
        role: role.as_str(),
        status: "active",
        created_at: at,
    }
}
