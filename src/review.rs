//! Submission intake and the review state machine.
//!
//! Lifecycle: `pending → under-review → accepted | rejected`, where
//! `under-review` is only entered through assignment. Editors may decide
//! only submissions assigned to them; chief editors and admins hold
//! override authority over any submission and may also re-set the
//! non-terminal statuses.

use chrono::Utc;
use diesel_async::AsyncConnection;
use tracing::warn;

use crate::{
    actor::Actor,
    db::{self, DbConnection},
    error::WorkflowError,
    models::{NewSubmission, Submission},
    notify::{Notifier, templates},
    roles::Role,
    status::{SubmissionKind, SubmissionStatus},
};

/// Author identity captured at submission time.
#[derive(Debug, Clone, Copy)]
pub struct AuthorSnapshot<'a> {
    pub user_id: i32,
    pub name: &'a str,
    pub email: &'a str,
}

/// Uploaded file tuple attached to a submission; the workflow never reads
/// the bytes behind the URL.
#[derive(Debug, Clone, Copy)]
pub struct FileAttachment<'a> {
    pub url: &'a str,
    pub name: &'a str,
    pub file_type: &'a str,
    pub size: i32,
}

/// Everything needed to create a submission.
#[derive(Debug, Clone, Copy)]
pub struct SubmissionIntake<'a> {
    pub requirement_id: i32,
    pub kind: SubmissionKind,
    pub title: &'a str,
    pub abstract_text: &'a str,
    pub author: AuthorSnapshot<'a>,
    pub file: Option<FileAttachment<'a>>,
}

/// Status counts for one submission kind.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct StatusBreakdown {
    pub total: i64,
    pub pending: i64,
    pub completed: i64,
    pub under_review: i64,
    pub accepted: i64,
    pub rejected: i64,
}

/// Which submissions a breakdown covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreakdownScope {
    All,
    Editor(i32),
}

/// Create a submission in its kind's intake status.
///
/// Manuscripts enter `pending`; research papers enter `completed`. The
/// parent requirement's submission counter moves in the same transaction.
///
/// # Errors
///
/// Fails `Validation` on a blank title or abstract and `NotFound` when the
/// requirement does not exist.
pub async fn submit(
    conn: &mut DbConnection,
    intake: SubmissionIntake<'_>,
) -> Result<Submission, WorkflowError> {
    if intake.title.trim().is_empty() {
        return Err(WorkflowError::Validation("title must not be empty".to_owned()));
    }
    if intake.abstract_text.trim().is_empty() {
        return Err(WorkflowError::Validation("abstract must not be empty".to_owned()));
    }

    let now = Utc::now().naive_utc();
    conn.transaction::<Submission, WorkflowError, _>(|conn| {
        Box::pin(async move {
            let touched = db::adjust_submission_count(conn, intake.requirement_id, 1).await?;
            if touched == 0 {
                return Err(WorkflowError::NotFound("requirement"));
            }
            let row = NewSubmission {
                requirement_id: intake.requirement_id,
                kind: intake.kind.as_str(),
                title: intake.title,
                abstract_text: intake.abstract_text,
                author_user_id: intake.author.user_id,
                author_name: intake.author.name,
                author_email: intake.author.email,
                file_url: intake.file.map(|f| f.url),
                file_name: intake.file.map(|f| f.name),
                file_type: intake.file.map(|f| f.file_type),
                file_size: intake.file.map(|f| f.size),
                status: intake.kind.unassigned_status().as_str(),
                submitted_at: now,
            };
            Ok(db::create_submission(conn, &row).await?)
        })
    })
    .await
}

fn admin_reviewable(decision: SubmissionStatus) -> Result<(), WorkflowError> {
    if decision == SubmissionStatus::Completed {
        return Err(WorkflowError::Validation(
            "completed is not a reviewable decision".to_owned(),
        ));
    }
    Ok(())
}

/// Apply a review decision to a submission.
///
/// Editors write `editor_remarks`; chief editors and admins write
/// `admin_remarks`. The two fields are deliberately distinct so an override
/// never erases the assigned editor's notes. Terminal decisions email the
/// author snapshot best-effort.
///
/// # Errors
///
/// Fails `NotFound` for a missing submission, `Forbidden` when an editor
/// reviews a submission not assigned to them (or a non-editorial role calls
/// at all), `Validation` for a decision outside the caller's vocabulary,
/// and `Conflict` when the assignment changed between the authorization
/// check and the write.
pub async fn review(
    conn: &mut DbConnection,
    notifier: &Notifier,
    actor: &Actor,
    submission_id: i32,
    decision: SubmissionStatus,
    remarks: Option<&str>,
) -> Result<Submission, WorkflowError> {
    let existing = db::get_submission(conn, submission_id)
        .await?
        .ok_or(WorkflowError::NotFound("submission"))?;

    let now = Utc::now().naive_utc();
    let updated = match actor.role {
        Role::Editor => {
            if existing.assigned_editor != Some(actor.user_id) {
                return Err(WorkflowError::Forbidden(
                    "editors may only review submissions assigned to them".to_owned(),
                ));
            }
            if !decision.is_terminal() {
                return Err(WorkflowError::Validation(
                    "editor decision must be accepted or rejected".to_owned(),
                ));
            }
            db::record_editor_review(
                conn,
                submission_id,
                actor.user_id,
                decision,
                remarks.unwrap_or_default(),
                now,
            )
            .await?
            .ok_or_else(|| {
                WorkflowError::Conflict("assignment changed while the review was in flight".to_owned())
            })?
        }
        Role::ChiefEditor | Role::Admin => {
            admin_reviewable(decision)?;
            db::record_admin_review(conn, submission_id, actor.user_id, decision, remarks, now)
                .await?
                .ok_or(WorkflowError::NotFound("submission"))?
        }
        _ => {
            return Err(WorkflowError::Forbidden(
                "submission review requires an editorial role".to_owned(),
            ));
        }
    };

    if decision.is_terminal() {
        let (subject, body) = templates::submission_decision(&updated, decision);
        notifier.email(&updated.author_email, &subject, &body).await;
    }
    Ok(updated)
}

/// Replace the editor remarks on an assigned submission.
///
/// # Errors
///
/// Fails `Forbidden` for non-editors or an editor without the assignment,
/// `NotFound` for a missing submission, and `Conflict` when the assignment
/// moved mid-update.
pub async fn update_remarks(
    conn: &mut DbConnection,
    actor: &Actor,
    submission_id: i32,
    remarks: &str,
) -> Result<Submission, WorkflowError> {
    if actor.role != Role::Editor {
        return Err(WorkflowError::Forbidden(
            "only the assigned editor may update remarks".to_owned(),
        ));
    }
    let existing = db::get_submission(conn, submission_id)
        .await?
        .ok_or(WorkflowError::NotFound("submission"))?;
    if existing.assigned_editor != Some(actor.user_id) {
        return Err(WorkflowError::Forbidden(
            "submission is not assigned to you".to_owned(),
        ));
    }
    db::update_editor_remarks(conn, submission_id, actor.user_id, remarks)
        .await?
        .ok_or_else(|| WorkflowError::Conflict("assignment changed while updating remarks".to_owned()))
}

/// Delete a submission and release its slot on the parent requirement.
///
/// # Errors
///
/// Fails `Forbidden` for non-admin callers and `NotFound` for a missing
/// submission. The row delete and counter decrement share one transaction.
pub async fn delete(
    conn: &mut DbConnection,
    actor: &Actor,
    submission_id: i32,
) -> Result<(), WorkflowError> {
    if actor.role != Role::Admin {
        return Err(WorkflowError::Forbidden(
            "only an admin may delete submissions".to_owned(),
        ));
    }

    conn.transaction::<(), WorkflowError, _>(|conn| {
        Box::pin(async move {
            let existing = db::get_submission(conn, submission_id)
                .await?
                .ok_or(WorkflowError::NotFound("submission"))?;
            db::delete_submission(conn, submission_id).await?;
            let touched = db::adjust_submission_count(conn, existing.requirement_id, -1).await?;
            if touched == 0 {
                warn!(
                    requirement = existing.requirement_id,
                    "requirement missing while decrementing its submission counter"
                );
            }
            Ok(())
        })
    })
    .await
}

/// Grouped status counts for one submission kind.
///
/// # Errors
///
/// Propagates store failures.
pub async fn status_breakdown(
    conn: &mut DbConnection,
    kind: SubmissionKind,
    scope: BreakdownScope,
) -> Result<StatusBreakdown, WorkflowError> {
    let editor = match scope {
        BreakdownScope::All => None,
        BreakdownScope::Editor(id) => Some(id),
    };
    let counts = db::count_by_status(conn, kind, editor).await?;
    let mut breakdown = StatusBreakdown::default();
    for (status, count) in counts {
        breakdown.total += count;
        match status.parse::<SubmissionStatus>() {
            Ok(SubmissionStatus::Pending) => breakdown.pending += count,
            Ok(SubmissionStatus::Completed) => breakdown.completed += count,
            Ok(SubmissionStatus::UnderReview) => breakdown.under_review += count,
            Ok(SubmissionStatus::Accepted) => breakdown.accepted += count,
            Ok(SubmissionStatus::Rejected) => breakdown.rejected += count,
            Err(err) => warn!(%err, "skipping out-of-vocabulary status in breakdown"),
        }
    }
    Ok(breakdown)
}
