//! Call-for-submissions parent records.
//!
//! Only the pieces the submission counter cascade needs.

use diesel::{prelude::*, result::QueryResult};
use diesel_async::RunQueryDsl;

use super::connection::DbConnection;

/// Look up a requirement by id.
///
/// # Errors
/// Returns any error produced by the underlying database query.
#[must_use = "handle the result"]
pub async fn get_requirement(
    conn: &mut DbConnection,
    requirement_id: i32,
) -> QueryResult<Option<crate::models::Requirement>> {
    use crate::schema::requirements::dsl::requirements;
    requirements
        .find(requirement_id)
        .first::<crate::models::Requirement>(conn)
        .await
        .optional()
}

/// Insert a new requirement and return it.
///
/// # Errors
/// Returns any error produced by the insertion query.
#[must_use = "handle the result"]
pub async fn create_requirement(
    conn: &mut DbConnection,
    requirement: &crate::models::NewRequirement<'_>,
) -> QueryResult<crate::models::Requirement> {
    use crate::schema::requirements::dsl::requirements;
    diesel::insert_into(requirements)
        .values(requirement)
        .get_result(conn)
        .await
}

/// Shift the submission counter by `delta`; returns affected rows.
///
/// # Errors
/// Returns any error produced by the update query.
#[must_use = "handle the result"]
pub async fn adjust_submission_count(
    conn: &mut DbConnection,
    requirement_id: i32,
    delta: i32,
) -> QueryResult<usize> {
    use crate::schema::requirements::dsl as r;
    diesel::update(r::requirements.find(requirement_id))
        .set(r::submissions_count.eq(r::submissions_count + delta))
        .execute(conn)
        .await
}
