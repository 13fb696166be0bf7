//! Newsroom approval workflow: the atomic approve flip, rejection defaults,
//! and resubmission-on-edit.

mod common;

use masthead::{
    actor::Actor,
    db::{self, ArticleChanges},
    error::WorkflowError,
    newsroom::{self, ArticleDraft},
    roles::Role,
    status::{ApprovalStatus, ArticleStatus},
};

use common::{seed_user, setup_conn};

fn draft() -> ArticleDraft<'static> {
    ArticleDraft {
        title: "Zoning Reform in Practice",
        excerpt: "What changed after the 2024 amendments.",
        content: "<p>Long-form analysis.</p>",
        category: "Urban Planning",
    }
}

#[tokio::test]
async fn submission_enters_pending_and_unpublished() {
    let mut conn = setup_conn().await;
    let author = seed_user(&mut conn, "author@example.com", Role::User).await;
    let actor = Actor::new(author.id, Role::User);

    let article = newsroom::submit_article(&mut conn, &actor, draft(), true).await.expect("submit");
    assert_eq!(article.status, ArticleStatus::Pending.as_str());
    assert_eq!(article.approval_status, ApprovalStatus::Pending.as_str());
    assert!(!article.is_published);

    let saved = newsroom::submit_article(
        &mut conn,
        &actor,
        ArticleDraft { title: "", excerpt: "", content: "", category: "" },
        false,
    )
    .await
    .expect("draft");
    assert_eq!(saved.status, ArticleStatus::Draft.as_str());
    assert_eq!(saved.title, "Untitled draft");
}

#[tokio::test]
async fn publishing_an_incomplete_article_fails_validation() {
    let mut conn = setup_conn().await;
    let author = seed_user(&mut conn, "author@example.com", Role::User).await;
    let actor = Actor::new(author.id, Role::User);

    let err = newsroom::submit_article(
        &mut conn,
        &actor,
        ArticleDraft { title: "", ..draft() },
        true,
    )
    .await
    .expect_err("must fail");
    assert!(matches!(err, WorkflowError::Validation(_)));
}

#[tokio::test]
async fn approve_flips_all_publication_fields_together() {
    let mut conn = setup_conn().await;
    let author = seed_user(&mut conn, "author@example.com", Role::User).await;
    let admin = seed_user(&mut conn, "admin@example.com", Role::Admin).await;
    let author_actor = Actor::new(author.id, Role::User);
    let article =
        newsroom::submit_article(&mut conn, &author_actor, draft(), true).await.expect("submit");

    let admin_actor = Actor::new(admin.id, Role::Admin);
    let approved = newsroom::approve(&mut conn, &admin_actor, article.id).await.expect("approve");

    assert_eq!(approved.status, ArticleStatus::Published.as_str());
    assert_eq!(approved.approval_status, ApprovalStatus::Approved.as_str());
    assert!(approved.is_published);
    assert!(approved.published_at.is_some());
    assert_eq!(approved.reviewed_by, Some(admin.id));

    // Re-reading observes the same consistent triple.
    let observed = db::get_article(&mut conn, article.id).await.expect("query").expect("row");
    assert_eq!(observed.status, ArticleStatus::Published.as_str());
    assert_eq!(observed.approval_status, ApprovalStatus::Approved.as_str());
    assert!(observed.is_published);
}

#[tokio::test]
async fn approval_requires_a_reviewer_role() {
    let mut conn = setup_conn().await;
    let author = seed_user(&mut conn, "author@example.com", Role::User).await;
    let author_actor = Actor::new(author.id, Role::User);
    let article =
        newsroom::submit_article(&mut conn, &author_actor, draft(), true).await.expect("submit");

    let err = newsroom::approve(&mut conn, &author_actor, article.id).await.expect_err("must fail");
    assert!(matches!(err, WorkflowError::Forbidden(_)));
}

#[tokio::test]
async fn rejection_defaults_the_reason_and_returns_to_draft() {
    let mut conn = setup_conn().await;
    let author = seed_user(&mut conn, "author@example.com", Role::User).await;
    let admin = seed_user(&mut conn, "admin@example.com", Role::Admin).await;
    let author_actor = Actor::new(author.id, Role::User);
    let article =
        newsroom::submit_article(&mut conn, &author_actor, draft(), true).await.expect("submit");

    let admin_actor = Actor::new(admin.id, Role::Admin);
    let rejected = newsroom::reject(&mut conn, &admin_actor, article.id, None).await.expect("reject");

    assert_eq!(rejected.status, ArticleStatus::Draft.as_str());
    assert_eq!(rejected.approval_status, ApprovalStatus::Rejected.as_str());
    assert!(!rejected.is_published);
    assert_eq!(
        rejected.rejection_reason.as_deref(),
        Some("Article did not meet publication standards")
    );
}

#[tokio::test]
async fn editing_after_modification_request_resubmits() {
    let mut conn = setup_conn().await;
    let author = seed_user(&mut conn, "author@example.com", Role::User).await;
    let chief = seed_user(&mut conn, "chief@example.com", Role::ChiefEditor).await;
    let author_actor = Actor::new(author.id, Role::User);
    let article =
        newsroom::submit_article(&mut conn, &author_actor, draft(), true).await.expect("submit");

    let chief_actor = Actor::new(chief.id, Role::ChiefEditor);
    let reopened =
        newsroom::request_modification(&mut conn, &chief_actor, article.id, "cite your sources")
            .await
            .expect("reopen");
    assert_eq!(reopened.approval_status, ApprovalStatus::NeedsModification.as_str());
    assert_eq!(reopened.modification_notes.as_deref(), Some("cite your sources"));

    let edited = newsroom::update(
        &mut conn,
        &author_actor,
        article.id,
        ArticleChanges {
            content: Some("<p>Now with citations.</p>"),
            ..ArticleChanges::default()
        },
    )
    .await
    .expect("edit");

    assert_eq!(edited.approval_status, ApprovalStatus::Pending.as_str());
    assert_eq!(edited.status, ArticleStatus::Pending.as_str());
    assert!(!edited.is_published);
    assert_eq!(edited.modification_notes, None);
    assert_eq!(edited.content, "<p>Now with citations.</p>");
}

#[tokio::test]
async fn plain_edits_do_not_resubmit() {
    let mut conn = setup_conn().await;
    let author = seed_user(&mut conn, "author@example.com", Role::User).await;
    let author_actor = Actor::new(author.id, Role::User);
    let article =
        newsroom::submit_article(&mut conn, &author_actor, draft(), false).await.expect("draft");

    let edited = newsroom::update(
        &mut conn,
        &author_actor,
        article.id,
        ArticleChanges { title: Some("Zoning Reform, Revisited"), ..ArticleChanges::default() },
    )
    .await
    .expect("edit");

    assert_eq!(edited.title, "Zoning Reform, Revisited");
    assert_eq!(edited.status, ArticleStatus::Draft.as_str());
}

#[tokio::test]
async fn updates_are_author_or_admin_only() {
    let mut conn = setup_conn().await;
    let author = seed_user(&mut conn, "author@example.com", Role::User).await;
    let stranger = seed_user(&mut conn, "stranger@example.com", Role::User).await;
    let admin = seed_user(&mut conn, "admin@example.com", Role::Admin).await;
    let author_actor = Actor::new(author.id, Role::User);
    let article =
        newsroom::submit_article(&mut conn, &author_actor, draft(), true).await.expect("submit");

    let stranger_actor = Actor::new(stranger.id, Role::User);
    let err = newsroom::update(
        &mut conn,
        &stranger_actor,
        article.id,
        ArticleChanges { title: Some("hijacked"), ..ArticleChanges::default() },
    )
    .await
    .expect_err("must fail");
    assert!(matches!(err, WorkflowError::Forbidden(_)));

    let admin_actor = Actor::new(admin.id, Role::Admin);
    newsroom::update(
        &mut conn,
        &admin_actor,
        article.id,
        ArticleChanges { category: Some("Policy"), ..ArticleChanges::default() },
    )
    .await
    .expect("admin edit");
}
