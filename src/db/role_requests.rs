//! Role request queries.

use chrono::NaiveDateTime;
use diesel::{prelude::*, result::QueryResult};
use diesel_async::RunQueryDsl;

use super::connection::DbConnection;
use crate::{
    roles::Role,
    status::RequestStatus,
};

/// Look up a role request by id.
///
/// # Errors
/// Returns any error produced by the underlying database query.
#[must_use = "handle the result"]
pub async fn get_role_request(
    conn: &mut DbConnection,
    request_id: i32,
) -> QueryResult<Option<crate::models::RoleRequest>> {
    use crate::schema::role_requests::dsl::role_requests;
    role_requests
        .find(request_id)
        .first::<crate::models::RoleRequest>(conn)
        .await
        .optional()
}

/// Insert a new role request and return it.
///
/// # Errors
/// Returns any error produced by the insertion query.
#[must_use = "handle the result"]
pub async fn create_role_request(
    conn: &mut DbConnection,
    request: &crate::models::NewRoleRequest<'_>,
) -> QueryResult<crate::models::RoleRequest> {
    use crate::schema::role_requests::dsl::role_requests;
    diesel::insert_into(role_requests)
        .values(request)
        .get_result(conn)
        .await
}

/// Find a pending request for the same (user, role) pair, if any.
///
/// # Errors
/// Returns any error produced by the underlying database query.
#[must_use = "handle the result"]
pub async fn find_pending(
    conn: &mut DbConnection,
    for_user: i32,
    role: Role,
) -> QueryResult<Option<crate::models::RoleRequest>> {
    use crate::schema::role_requests::dsl as r;
    r::role_requests
        .filter(r::user_id.eq(for_user))
        .filter(r::requested_role.eq(role.as_str()))
        .filter(r::status.eq(RequestStatus::Pending.as_str()))
        .first::<crate::models::RoleRequest>(conn)
        .await
        .optional()
}

/// Resolve a pending request, guarded on it still being pending.
///
/// A request that was already resolved loses the race and yields `None`,
/// leaving the first reviewer's verdict untouched.
///
/// # Errors
/// Returns any error produced by the update query.
#[must_use = "handle the result"]
pub async fn resolve_pending(
    conn: &mut DbConnection,
    request_id: i32,
    decision: RequestStatus,
    reviewer_id: i32,
    notes: Option<&str>,
    at: NaiveDateTime,
) -> QueryResult<Option<crate::models::RoleRequest>> {
    use crate::schema::role_requests::dsl as r;
    diesel::update(
        r::role_requests
            .find(request_id)
            .filter(r::status.eq(RequestStatus::Pending.as_str())),
    )
    .set((
        r::status.eq(decision.as_str()),
        r::reviewed_by.eq(Some(reviewer_id)),
        r::reviewed_at.eq(Some(at)),
        r::admin_notes.eq(notes),
    ))
    .get_result::<crate::models::RoleRequest>(conn)
    .await
    .optional()
}

/// Delete a role request row.
///
/// # Errors
/// Returns any error produced by the delete query.
#[must_use = "handle the result"]
pub async fn delete_role_request(conn: &mut DbConnection, request_id: i32) -> QueryResult<usize> {
    use crate::schema::role_requests::dsl::role_requests;
    diesel::delete(role_requests.find(request_id)).execute(conn).await
}

/// List a user's requests, newest first.
///
/// # Errors
/// Returns any error produced by the underlying database query.
#[must_use = "handle the result"]
pub async fn list_for_user(
    conn: &mut DbConnection,
    for_user: i32,
) -> QueryResult<Vec<crate::models::RoleRequest>> {
    use crate::schema::role_requests::dsl as r;
    r::role_requests
        .filter(r::user_id.eq(for_user))
        .order(r::created_at.desc())
        .load::<crate::models::RoleRequest>(conn)
        .await
}

/// List all pending requests, newest first.
///
/// # Errors
/// Returns any error produced by the underlying database query.
#[must_use = "handle the result"]
pub async fn list_pending(conn: &mut DbConnection) -> QueryResult<Vec<crate::models::RoleRequest>> {
    use crate::schema::role_requests::dsl as r;
    r::role_requests
        .filter(r::status.eq(RequestStatus::Pending.as_str()))
        .order(r::created_at.desc())
        .load::<crate::models::RoleRequest>(conn)
        .await
}
