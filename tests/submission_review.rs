//! Review state machine: intake, ownership authorization, overrides, and
//! the delete cascade.

mod common;

use chrono::Utc;
use masthead::{
    actor::Actor,
    assignment,
    db,
    error::WorkflowError,
    review::{self, AuthorSnapshot, BreakdownScope, SubmissionIntake},
    roles::Role,
    status::{SubmissionKind, SubmissionStatus},
};

use common::{recording_notifier, seed_requirement, seed_submission_at, seed_user, setup_conn};

fn intake(requirement_id: i32) -> SubmissionIntake<'static> {
    SubmissionIntake {
        requirement_id,
        kind: SubmissionKind::Manuscript,
        title: "Fearless Concurrency in Practice",
        abstract_text: "A study of shared-state designs.",
        author: AuthorSnapshot {
            user_id: 1,
            name: "Alice Author",
            email: "alice@example.com",
        },
        file: None,
    }
}

#[tokio::test]
async fn intake_counts_against_the_requirement() {
    let mut conn = setup_conn().await;
    let req = seed_requirement(&mut conn).await;

    let created = review::submit(&mut conn, intake(req.id)).await.expect("submit");
    assert_eq!(created.status, SubmissionStatus::Pending.as_str());
    assert_eq!(created.assigned_editor, None);

    let parent = db::get_requirement(&mut conn, req.id).await.expect("query").expect("row");
    assert_eq!(parent.submissions_count, 1);
}

#[tokio::test]
async fn intake_requires_an_existing_requirement() {
    let mut conn = setup_conn().await;
    let err = review::submit(&mut conn, intake(404)).await.expect_err("must fail");
    assert!(matches!(err, WorkflowError::NotFound("requirement")));
}

#[tokio::test]
async fn foreign_editor_is_forbidden_and_mutates_nothing() {
    let mut conn = setup_conn().await;
    let chief = seed_user(&mut conn, "chief@example.com", Role::ChiefEditor).await;
    let owner = seed_user(&mut conn, "owner@example.com", Role::Editor).await;
    let other = seed_user(&mut conn, "other@example.com", Role::Editor).await;
    let req = seed_requirement(&mut conn).await;
    let now = Utc::now().naive_utc();
    let submission =
        seed_submission_at(&mut conn, req.id, SubmissionKind::Manuscript, "M", now).await;
    let chief_actor = Actor::new(chief.id, Role::ChiefEditor);
    assignment::assign(&mut conn, &chief_actor, submission.id, owner.id).await.expect("assign");

    let (notifier, mailer, _) = recording_notifier();
    let intruder = Actor::new(other.id, Role::Editor);
    let err = review::review(
        &mut conn,
        &notifier,
        &intruder,
        submission.id,
        SubmissionStatus::Accepted,
        Some("mine now"),
    )
    .await
    .expect_err("must fail");
    assert!(matches!(err, WorkflowError::Forbidden(_)));

    let row = db::get_submission(&mut conn, submission.id).await.expect("query").expect("row");
    assert_eq!(row.status, SubmissionStatus::UnderReview.as_str());
    assert_eq!(row.editor_remarks, "");
    assert_eq!(row.reviewed_by, None);
    assert!(mailer.sent.lock().expect("lock").is_empty());
}

#[tokio::test]
async fn assigned_editor_accepts_and_author_is_emailed() {
    let mut conn = setup_conn().await;
    let chief = seed_user(&mut conn, "chief@example.com", Role::ChiefEditor).await;
    let editor = seed_user(&mut conn, "editor@example.com", Role::Editor).await;
    let req = seed_requirement(&mut conn).await;
    let created = review::submit(&mut conn, intake(req.id)).await.expect("submit");
    let chief_actor = Actor::new(chief.id, Role::ChiefEditor);
    assignment::assign(&mut conn, &chief_actor, created.id, editor.id).await.expect("assign");

    let (notifier, mailer, _) = recording_notifier();
    let actor = Actor::new(editor.id, Role::Editor);
    let updated = review::review(
        &mut conn,
        &notifier,
        &actor,
        created.id,
        SubmissionStatus::Accepted,
        Some("solid methodology"),
    )
    .await
    .expect("review");

    assert_eq!(updated.status, SubmissionStatus::Accepted.as_str());
    assert_eq!(updated.editor_remarks, "solid methodology");
    assert_eq!(updated.reviewed_by, Some(editor.id));
    assert!(updated.editor_reviewed_at.is_some());

    let sent = mailer.sent.lock().expect("lock");
    assert_eq!(sent.len(), 1);
    let (to, subject, body) = &sent[0];
    assert_eq!(to, "alice@example.com");
    assert!(subject.contains("accepted"), "subject: {subject}");
    assert!(body.contains("solid methodology"));
}

#[tokio::test]
async fn editor_decision_must_be_terminal() {
    let mut conn = setup_conn().await;
    let chief = seed_user(&mut conn, "chief@example.com", Role::ChiefEditor).await;
    let editor = seed_user(&mut conn, "editor@example.com", Role::Editor).await;
    let req = seed_requirement(&mut conn).await;
    let now = Utc::now().naive_utc();
    let submission =
        seed_submission_at(&mut conn, req.id, SubmissionKind::Manuscript, "M", now).await;
    let chief_actor = Actor::new(chief.id, Role::ChiefEditor);
    assignment::assign(&mut conn, &chief_actor, submission.id, editor.id).await.expect("assign");

    let (notifier, _, _) = recording_notifier();
    let actor = Actor::new(editor.id, Role::Editor);
    let err = review::review(
        &mut conn,
        &notifier,
        &actor,
        submission.id,
        SubmissionStatus::Pending,
        None,
    )
    .await
    .expect_err("must fail");
    assert!(matches!(err, WorkflowError::Validation(_)));
}

#[tokio::test]
async fn admin_override_preserves_editor_remarks() {
    let mut conn = setup_conn().await;
    let chief = seed_user(&mut conn, "chief@example.com", Role::ChiefEditor).await;
    let editor = seed_user(&mut conn, "editor@example.com", Role::Editor).await;
    let admin = seed_user(&mut conn, "admin@example.com", Role::Admin).await;
    let req = seed_requirement(&mut conn).await;
    let now = Utc::now().naive_utc();
    let submission =
        seed_submission_at(&mut conn, req.id, SubmissionKind::Manuscript, "M", now).await;
    let chief_actor = Actor::new(chief.id, Role::ChiefEditor);
    assignment::assign(&mut conn, &chief_actor, submission.id, editor.id).await.expect("assign");

    let (notifier, _, _) = recording_notifier();
    let editor_actor = Actor::new(editor.id, Role::Editor);
    review::review(
        &mut conn,
        &notifier,
        &editor_actor,
        submission.id,
        SubmissionStatus::Rejected,
        Some("weak evaluation"),
    )
    .await
    .expect("editor review");

    // Admin overrides the verdict without touching the editor's notes.
    let admin_actor = Actor::new(admin.id, Role::Admin);
    let updated = review::review(
        &mut conn,
        &notifier,
        &admin_actor,
        submission.id,
        SubmissionStatus::Accepted,
        Some("accepting on appeal"),
    )
    .await
    .expect("admin review");

    assert_eq!(updated.status, SubmissionStatus::Accepted.as_str());
    assert_eq!(updated.editor_remarks, "weak evaluation");
    assert_eq!(updated.admin_remarks, "accepting on appeal");
    assert_eq!(updated.reviewed_by, Some(admin.id));
}

#[tokio::test]
async fn admin_may_reset_a_non_terminal_status() {
    let mut conn = setup_conn().await;
    let admin = seed_user(&mut conn, "admin@example.com", Role::Admin).await;
    let req = seed_requirement(&mut conn).await;
    let now = Utc::now().naive_utc();
    let submission =
        seed_submission_at(&mut conn, req.id, SubmissionKind::Manuscript, "M", now).await;

    let (notifier, mailer, _) = recording_notifier();
    let actor = Actor::new(admin.id, Role::Admin);
    let updated = review::review(
        &mut conn,
        &notifier,
        &actor,
        submission.id,
        SubmissionStatus::UnderReview,
        None,
    )
    .await
    .expect("review");

    assert_eq!(updated.status, SubmissionStatus::UnderReview.as_str());
    // Non-terminal decisions do not email the author.
    assert!(mailer.sent.lock().expect("lock").is_empty());
}

#[tokio::test]
async fn review_after_reassignment_conflicts() {
    let mut conn = setup_conn().await;
    let chief = seed_user(&mut conn, "chief@example.com", Role::ChiefEditor).await;
    let owner = seed_user(&mut conn, "owner@example.com", Role::Editor).await;
    let thief = seed_user(&mut conn, "thief@example.com", Role::Editor).await;
    let req = seed_requirement(&mut conn).await;
    let now = Utc::now().naive_utc();
    let submission =
        seed_submission_at(&mut conn, req.id, SubmissionKind::Manuscript, "M", now).await;
    let chief_actor = Actor::new(chief.id, Role::ChiefEditor);
    assignment::assign(&mut conn, &chief_actor, submission.id, owner.id).await.expect("assign");

    // The chief moves the work after the owner's authorization check would
    // have passed; the guarded write must then lose.
    assignment::reassign(&mut conn, &chief_actor, submission.id, thief.id).await.expect("steal");

    let updated = db::record_editor_review(
        &mut conn,
        submission.id,
        owner.id,
        SubmissionStatus::Accepted,
        "",
        now,
    )
    .await
    .expect("query");
    assert!(updated.is_none(), "stale editor must not win the write");
}

#[tokio::test]
async fn remarks_update_requires_the_assignment() {
    let mut conn = setup_conn().await;
    let chief = seed_user(&mut conn, "chief@example.com", Role::ChiefEditor).await;
    let owner = seed_user(&mut conn, "owner@example.com", Role::Editor).await;
    let other = seed_user(&mut conn, "other@example.com", Role::Editor).await;
    let req = seed_requirement(&mut conn).await;
    let now = Utc::now().naive_utc();
    let submission =
        seed_submission_at(&mut conn, req.id, SubmissionKind::Manuscript, "M", now).await;
    let chief_actor = Actor::new(chief.id, Role::ChiefEditor);
    assignment::assign(&mut conn, &chief_actor, submission.id, owner.id).await.expect("assign");

    let owner_actor = Actor::new(owner.id, Role::Editor);
    let updated = review::update_remarks(&mut conn, &owner_actor, submission.id, "first pass done")
        .await
        .expect("update");
    assert_eq!(updated.editor_remarks, "first pass done");
    assert_eq!(updated.status, SubmissionStatus::UnderReview.as_str());

    let other_actor = Actor::new(other.id, Role::Editor);
    let err = review::update_remarks(&mut conn, &other_actor, submission.id, "not mine")
        .await
        .expect_err("must fail");
    assert!(matches!(err, WorkflowError::Forbidden(_)));
}

#[tokio::test]
async fn delete_is_admin_only_and_releases_the_slot() {
    let mut conn = setup_conn().await;
    let admin = seed_user(&mut conn, "admin@example.com", Role::Admin).await;
    let editor = seed_user(&mut conn, "editor@example.com", Role::Editor).await;
    let req = seed_requirement(&mut conn).await;
    let created = review::submit(&mut conn, intake(req.id)).await.expect("submit");

    let editor_actor = Actor::new(editor.id, Role::Editor);
    let err = review::delete(&mut conn, &editor_actor, created.id).await.expect_err("must fail");
    assert!(matches!(err, WorkflowError::Forbidden(_)));

    let admin_actor = Actor::new(admin.id, Role::Admin);
    review::delete(&mut conn, &admin_actor, created.id).await.expect("delete");

    assert!(db::get_submission(&mut conn, created.id).await.expect("query").is_none());
    let parent = db::get_requirement(&mut conn, req.id).await.expect("query").expect("row");
    assert_eq!(parent.submissions_count, 0);
}

#[tokio::test]
async fn breakdown_scopes_to_one_editor() {
    let mut conn = setup_conn().await;
    let chief = seed_user(&mut conn, "chief@example.com", Role::ChiefEditor).await;
    let e1 = seed_user(&mut conn, "e1@example.com", Role::Editor).await;
    let e2 = seed_user(&mut conn, "e2@example.com", Role::Editor).await;
    let req = seed_requirement(&mut conn).await;
    let submissions = common::seed_manuscripts(&mut conn, req.id, 4).await;
    let chief_actor = Actor::new(chief.id, Role::ChiefEditor);
    for (i, submission) in submissions.iter().enumerate() {
        let editor = if i < 3 { e1.id } else { e2.id };
        assignment::assign(&mut conn, &chief_actor, submission.id, editor).await.expect("assign");
    }

    let all = review::status_breakdown(&mut conn, SubmissionKind::Manuscript, BreakdownScope::All)
        .await
        .expect("breakdown");
    assert_eq!(all.total, 4);
    assert_eq!(all.under_review, 4);

    let mine =
        review::status_breakdown(&mut conn, SubmissionKind::Manuscript, BreakdownScope::Editor(e1.id))
            .await
            .expect("breakdown");
    assert_eq!(mine.total, 3);
    assert_eq!(mine.under_review, 3);
}
