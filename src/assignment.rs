//! Distribute submissions across the editor pool.
//!
//! Auto-assignment is a plain round-robin over the editor pool ordered by
//! id: the i-th eligible submission (oldest first) goes to editor
//! `i mod |pool|`. Current workload is deliberately not consulted;
//! [`editor_workload`] exists so a human dispatcher can see it, not so the
//! algorithm can.

use chrono::Utc;
use tracing::{error, info, warn};

use crate::{
    actor::Actor,
    db::{self, DbConnection},
    error::WorkflowError,
    models::{Submission, User},
    roles::Role,
};

/// Outcome of one auto-assignment batch.
///
/// `per_editor` and `remainder` describe the planned quota over the eligible
/// set; `assigned` counts the claims actually won. The two differ only when
/// a concurrent assignment or store failure stole rows mid-batch
/// (`skipped`), which is reported here rather than raised; the batch has
/// partial-success semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssignmentSummary {
    pub assigned: usize,
    pub editors: usize,
    pub per_editor: usize,
    pub remainder: usize,
    pub skipped: usize,
}

/// Per-editor open assignment count for human dispatch.
#[derive(Debug, Clone)]
pub struct EditorWorkload {
    pub editor: User,
    pub open: i64,
}

fn require_chief(actor: &Actor) -> Result<(), WorkflowError> {
    if actor.role == Role::ChiefEditor {
        Ok(())
    } else {
        Err(WorkflowError::Forbidden(
            "only a chief editor may manage assignments".to_owned(),
        ))
    }
}

async fn require_editor(conn: &mut DbConnection, editor_id: i32) -> Result<User, WorkflowError> {
    db::get_user_with_role(conn, editor_id, Role::Editor)
        .await?
        .ok_or(WorkflowError::NotFound("editor"))
}

/// Distribute every eligible unassigned submission across the editor pool.
///
/// # Errors
///
/// Fails `Forbidden` for non-chief callers and `NoEditorsAvailable` when the
/// pool is empty, both before any mutation. Store failures while listing
/// abort the batch; store failures on individual claims are logged and
/// reported through the summary instead.
pub async fn auto_assign(
    conn: &mut DbConnection,
    actor: &Actor,
) -> Result<AssignmentSummary, WorkflowError> {
    require_chief(actor)?;

    let editors = db::list_editors(conn).await?;
    if editors.is_empty() {
        return Err(WorkflowError::NoEditorsAvailable);
    }

    let eligible = db::list_unassigned(conn).await?;
    let total = eligible.len();
    let pool = editors.len();
    let now = Utc::now().naive_utc();

    let mut assigned = 0usize;
    let mut skipped = 0usize;
    for (submission, editor) in eligible.iter().zip(editors.iter().cycle()) {
        match db::claim_assignment(conn, submission.id, editor.id, actor.user_id, now).await {
            Ok(true) => assigned += 1,
            Ok(false) => {
                warn!(
                    submission = submission.id,
                    "submission claimed by a concurrent assignment; skipping"
                );
                skipped += 1;
            }
            Err(err) => {
                error!(%err, submission = submission.id, "assignment claim failed; skipping");
                skipped += 1;
            }
        }
    }

    info!(assigned, editors = pool, "distributed submissions across editor pool");
    Ok(AssignmentSummary {
        assigned,
        editors: pool,
        per_editor: total / pool,
        remainder: total % pool,
        skipped,
    })
}

/// Assign one unassigned submission to a specific editor.
///
/// # Errors
///
/// Fails `Forbidden` for non-chief callers, `NotFound` when the submission
/// is missing or the target user is not an editor, and `Conflict` when the
/// submission is already assigned. Reassignment is the explicit path for
/// stealing work.
pub async fn assign(
    conn: &mut DbConnection,
    actor: &Actor,
    submission_id: i32,
    editor_id: i32,
) -> Result<Submission, WorkflowError> {
    require_chief(actor)?;
    require_editor(conn, editor_id).await?;

    let existing = db::get_submission(conn, submission_id)
        .await?
        .ok_or(WorkflowError::NotFound("submission"))?;
    if existing.assigned_editor.is_some() {
        return Err(WorkflowError::Conflict(
            "submission is already assigned; use reassign".to_owned(),
        ));
    }

    let now = Utc::now().naive_utc();
    if !db::claim_assignment(conn, submission_id, editor_id, actor.user_id, now).await? {
        return Err(WorkflowError::Conflict(
            "submission was assigned concurrently".to_owned(),
        ));
    }
    db::get_submission(conn, submission_id)
        .await?
        .ok_or(WorkflowError::NotFound("submission"))
}

/// Move a submission to a different editor, keeping its status.
///
/// # Errors
///
/// Fails `Forbidden` for non-chief callers and `NotFound` when the
/// submission is missing or the target user is not an editor.
pub async fn reassign(
    conn: &mut DbConnection,
    actor: &Actor,
    submission_id: i32,
    editor_id: i32,
) -> Result<Submission, WorkflowError> {
    require_chief(actor)?;
    require_editor(conn, editor_id).await?;

    let now = Utc::now().naive_utc();
    db::transfer_assignment(conn, submission_id, editor_id, actor.user_id, now)
        .await?
        .ok_or(WorkflowError::NotFound("submission"))
}

/// Remove an editor assignment, resetting status per submission kind.
///
/// Manuscripts fall back to `pending`; research papers to `completed`.
///
/// # Errors
///
/// Fails `Forbidden` for non-chief callers and `NotFound` for a missing
/// submission.
pub async fn unassign(
    conn: &mut DbConnection,
    actor: &Actor,
    submission_id: i32,
) -> Result<Submission, WorkflowError> {
    require_chief(actor)?;

    let existing = db::get_submission(conn, submission_id)
        .await?
        .ok_or(WorkflowError::NotFound("submission"))?;
    let kind = existing
        .kind
        .parse::<crate::status::SubmissionKind>()
        .map_err(|err| WorkflowError::Validation(err.to_string()))?;

    db::clear_assignment(conn, submission_id, kind.unassigned_status())
        .await?
        .ok_or(WorkflowError::NotFound("submission"))
}

/// The editor pool with each editor's open assignment count.
///
/// # Errors
///
/// Propagates store failures.
pub async fn editor_workload(conn: &mut DbConnection) -> Result<Vec<EditorWorkload>, WorkflowError> {
    let editors = db::list_editors(conn).await?;
    let counts = db::count_open_by_editor(conn).await?;
    Ok(editors
        .into_iter()
        .map(|editor| {
            let open = counts
                .iter()
                .find(|(id, _)| *id == Some(editor.id))
                .map_or(0, |(_, n)| *n);
            EditorWorkload { editor, open }
        })
        .collect())
}
