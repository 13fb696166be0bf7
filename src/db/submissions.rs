//! Submission queries: intake, assignment claims, review writes.
//!
//! Every state-changing helper encodes its precondition in the `WHERE`
//! clause and reports whether the row was actually won, so concurrent
//! writers fail loudly instead of silently overwriting each other.

use chrono::NaiveDateTime;
use diesel::{prelude::*, result::QueryResult};
use diesel_async::RunQueryDsl;

use super::connection::DbConnection;
use crate::status::{SubmissionKind, SubmissionStatus};

/// Look up a submission by id.
///
/// # Errors
/// Returns any error produced by the underlying database query.
#[must_use = "handle the result"]
pub async fn get_submission(
    conn: &mut DbConnection,
    submission_id: i32,
) -> QueryResult<Option<crate::models::Submission>> {
    use crate::schema::submissions::dsl::submissions;
    submissions
        .find(submission_id)
        .first::<crate::models::Submission>(conn)
        .await
        .optional()
}

/// Insert a new submission and return it.
///
/// # Errors
/// Returns any error produced by the insertion query.
#[must_use = "handle the result"]
pub async fn create_submission(
    conn: &mut DbConnection,
    submission: &crate::models::NewSubmission<'_>,
) -> QueryResult<crate::models::Submission> {
    use crate::schema::submissions::dsl::submissions;
    diesel::insert_into(submissions)
        .values(submission)
        .get_result(conn)
        .await
}

/// List submissions eligible for auto-assignment, oldest first.
///
/// Manuscripts qualify while pending or under review without an editor;
/// research papers qualify once completed. Oldest-first ordering keeps the
/// round-robin from starving early submissions.
///
/// # Errors
/// Returns any error produced by the underlying database query.
#[must_use = "handle the result"]
pub async fn list_unassigned(conn: &mut DbConnection) -> QueryResult<Vec<crate::models::Submission>> {
    use crate::schema::submissions::dsl as s;
    s::submissions
        .filter(s::assigned_editor.is_null())
        .filter(
            s::kind
                .eq(SubmissionKind::Manuscript.as_str())
                .and(s::status.eq_any([
                    SubmissionStatus::Pending.as_str(),
                    SubmissionStatus::UnderReview.as_str(),
                ]))
                .or(s::kind
                    .eq(SubmissionKind::ResearchPaper.as_str())
                    .and(s::status.eq(SubmissionStatus::Completed.as_str()))),
        )
        .order(s::submitted_at.asc())
        .load::<crate::models::Submission>(conn)
        .await
}

/// Claim an unassigned submission for an editor.
///
/// The `assigned_editor IS NULL` guard makes the claim atomic: a concurrent
/// assignment wins the row and this call reports `false`.
///
/// # Errors
/// Returns any error produced by the update query.
#[must_use = "handle the result"]
pub async fn claim_assignment(
    conn: &mut DbConnection,
    submission_id: i32,
    editor_id: i32,
    assigned_by_id: i32,
    at: NaiveDateTime,
) -> QueryResult<bool> {
    use crate::schema::submissions::dsl as s;
    let rows = diesel::update(
        s::submissions
            .find(submission_id)
            .filter(s::assigned_editor.is_null()),
    )
    .set((
        s::assigned_editor.eq(Some(editor_id)),
        s::assigned_by.eq(Some(assigned_by_id)),
        s::assigned_at.eq(Some(at)),
        s::status.eq(SubmissionStatus::UnderReview.as_str()),
    ))
    .execute(conn)
    .await?;
    Ok(rows == 1)
}

/// Move an assignment to a different editor without touching status.
///
/// Reassignment may steal from another editor; the existing status is
/// preserved deliberately.
///
/// # Errors
/// Returns any error produced by the update query.
#[must_use = "handle the result"]
pub async fn transfer_assignment(
    conn: &mut DbConnection,
    submission_id: i32,
    editor_id: i32,
    assigned_by_id: i32,
    at: NaiveDateTime,
) -> QueryResult<Option<crate::models::Submission>> {
    use crate::schema::submissions::dsl as s;
    diesel::update(s::submissions.find(submission_id))
        .set((
            s::assigned_editor.eq(Some(editor_id)),
            s::assigned_by.eq(Some(assigned_by_id)),
            s::assigned_at.eq(Some(at)),
        ))
        .get_result::<crate::models::Submission>(conn)
        .await
        .optional()
}

/// Clear an assignment and reset status to the kind's unassigned default.
///
/// # Errors
/// Returns any error produced by the update query.
#[must_use = "handle the result"]
pub async fn clear_assignment(
    conn: &mut DbConnection,
    submission_id: i32,
    reset_to: SubmissionStatus,
) -> QueryResult<Option<crate::models::Submission>> {
    use crate::schema::submissions::dsl as s;
    diesel::update(s::submissions.find(submission_id))
        .set((
            s::assigned_editor.eq(None::<i32>),
            s::assigned_by.eq(None::<i32>),
            s::assigned_at.eq(None::<NaiveDateTime>),
            s::status.eq(reset_to.as_str()),
        ))
        .get_result::<crate::models::Submission>(conn)
        .await
        .optional()
}

/// Record an editor's review, guarded on the assignment still being held.
///
/// Returns `None` when the submission vanished or was reassigned between
/// the authorization check and the write.
///
/// # Errors
/// Returns any error produced by the update query.
#[must_use = "handle the result"]
pub async fn record_editor_review(
    conn: &mut DbConnection,
    submission_id: i32,
    editor_id: i32,
    decision: SubmissionStatus,
    remarks: &str,
    at: NaiveDateTime,
) -> QueryResult<Option<crate::models::Submission>> {
    use crate::schema::submissions::dsl as s;
    diesel::update(
        s::submissions
            .find(submission_id)
            .filter(s::assigned_editor.eq(editor_id)),
    )
    .set((
        s::status.eq(decision.as_str()),
        s::editor_remarks.eq(remarks),
        s::editor_reviewed_at.eq(Some(at)),
        s::reviewed_by.eq(Some(editor_id)),
        s::reviewed_at.eq(Some(at)),
    ))
    .get_result::<crate::models::Submission>(conn)
    .await
    .optional()
}

/// Record a chief-editor/admin review.
///
/// Writes `admin_remarks` only when remarks were supplied, so an override
/// never erases the editor's notes and an omitted remark leaves earlier
/// admin notes in place.
///
/// # Errors
/// Returns any error produced by the update query.
#[must_use = "handle the result"]
pub async fn record_admin_review(
    conn: &mut DbConnection,
    submission_id: i32,
    reviewer_id: i32,
    decision: SubmissionStatus,
    remarks: Option<&str>,
    at: NaiveDateTime,
) -> QueryResult<Option<crate::models::Submission>> {
    use crate::schema::submissions::dsl as s;
    if let Some(text) = remarks {
        diesel::update(s::submissions.find(submission_id))
            .set((
                s::status.eq(decision.as_str()),
                s::admin_remarks.eq(text),
                s::reviewed_by.eq(Some(reviewer_id)),
                s::reviewed_at.eq(Some(at)),
            ))
            .get_result::<crate::models::Submission>(conn)
            .await
            .optional()
    } else {
        diesel::update(s::submissions.find(submission_id))
            .set((
                s::status.eq(decision.as_str()),
                s::reviewed_by.eq(Some(reviewer_id)),
                s::reviewed_at.eq(Some(at)),
            ))
            .get_result::<crate::models::Submission>(conn)
            .await
            .optional()
    }
}

/// Replace the editor remarks, guarded on the assignment still being held.
///
/// # Errors
/// Returns any error produced by the update query.
#[must_use = "handle the result"]
pub async fn update_editor_remarks(
    conn: &mut DbConnection,
    submission_id: i32,
    editor_id: i32,
    remarks: &str,
) -> QueryResult<Option<crate::models::Submission>> {
    use crate::schema::submissions::dsl as s;
    diesel::update(
        s::submissions
            .find(submission_id)
            .filter(s::assigned_editor.eq(editor_id)),
    )
    .set(s::editor_remarks.eq(remarks))
    .get_result::<crate::models::Submission>(conn)
    .await
    .optional()
}

/// Delete a submission row.
///
/// # Errors
/// Returns any error produced by the delete query.
#[must_use = "handle the result"]
pub async fn delete_submission(conn: &mut DbConnection, submission_id: i32) -> QueryResult<usize> {
    use crate::schema::submissions::dsl::submissions;
    diesel::delete(submissions.find(submission_id)).execute(conn).await
}

/// Count submissions of one kind grouped by status.
///
/// # Errors
/// Returns any error produced by the underlying database query.
#[must_use = "handle the result"]
pub async fn count_by_status(
    conn: &mut DbConnection,
    kind: SubmissionKind,
    editor: Option<i32>,
) -> QueryResult<Vec<(String, i64)>> {
    use diesel::dsl::count_star;

    use crate::schema::submissions::dsl as s;
    if let Some(editor_id) = editor {
        s::submissions
            .filter(s::kind.eq(kind.as_str()))
            .filter(s::assigned_editor.eq(editor_id))
            .group_by(s::status)
            .select((s::status, count_star()))
            .load::<(String, i64)>(conn)
            .await
    } else {
        s::submissions
            .filter(s::kind.eq(kind.as_str()))
            .group_by(s::status)
            .select((s::status, count_star()))
            .load::<(String, i64)>(conn)
            .await
    }
}

/// Count open assignments (pending or under review) per editor.
///
/// # Errors
/// Returns any error produced by the underlying database query.
#[must_use = "handle the result"]
pub async fn count_open_by_editor(conn: &mut DbConnection) -> QueryResult<Vec<(Option<i32>, i64)>> {
    use diesel::dsl::count_star;

    use crate::schema::submissions::dsl as s;
    s::submissions
        .filter(s::assigned_editor.is_not_null())
        .filter(s::status.eq_any([
            SubmissionStatus::Pending.as_str(),
            SubmissionStatus::UnderReview.as_str(),
        ]))
        .group_by(s::assigned_editor)
        .select((s::assigned_editor, count_star()))
        .load::<(Option<i32>, i64)>(conn)
        .await
}
