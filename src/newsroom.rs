//! Newsroom article approval workflow.
//!
//! Two status axes: `approval_status` carries the review verdict while
//! `status`/`is_published` are kept consistent with it by every writer.
//! Approval is a single multi-field update, so observers never see the
//! published flag without the verdict (or vice versa). An author edit to an
//! article sent back for modification re-submits it automatically.

use chrono::Utc;

use crate::{
    actor::Actor,
    db::{self, ArticleChanges, DbConnection},
    error::WorkflowError,
    models::{Article, NewArticle},
    roles::Role,
    status::{ApprovalStatus, ArticleStatus},
};

/// Author-supplied article content.
#[derive(Debug, Clone, Copy)]
pub struct ArticleDraft<'a> {
    pub title: &'a str,
    pub excerpt: &'a str,
    pub content: &'a str,
    pub category: &'a str,
}

const DEFAULT_REJECTION_REASON: &str = "Article did not meet publication standards";

fn require_reviewer(actor: &Actor) -> Result<(), WorkflowError> {
    if actor.role.has_review_override() {
        Ok(())
    } else {
        Err(WorkflowError::Forbidden(
            "article approval requires an admin or chief editor".to_owned(),
        ))
    }
}

/// Create an article as a private draft or submit it for approval.
///
/// Drafts tolerate missing fields (placeholders are substituted); a
/// submission for publication must be complete.
///
/// # Errors
///
/// Fails `Validation` when submitting with a blank title, excerpt, or
/// content.
pub async fn submit_article(
    conn: &mut DbConnection,
    actor: &Actor,
    draft: ArticleDraft<'_>,
    publish: bool,
) -> Result<Article, WorkflowError> {
    if publish {
        for (value, field) in [
            (draft.title, "title"),
            (draft.excerpt, "excerpt"),
            (draft.content, "content"),
        ] {
            if value.trim().is_empty() {
                return Err(WorkflowError::Validation(format!("{field} must not be empty")));
            }
        }
    }

    let status = if publish { ArticleStatus::Pending } else { ArticleStatus::Draft };
    let now = Utc::now().naive_utc();
    let row = NewArticle {
        author_id: actor.user_id,
        title: non_blank(draft.title, "Untitled draft"),
        excerpt: non_blank(draft.excerpt, "No excerpt provided"),
        content: non_blank(draft.content, "<p>No content yet</p>"),
        category: non_blank(draft.category, "General"),
        status: status.as_str(),
        approval_status: ApprovalStatus::Pending.as_str(),
        is_published: false,
        created_at: now,
        updated_at: now,
    };
    Ok(db::create_article(conn, &row).await?)
}

fn non_blank<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.trim().is_empty() { fallback } else { value }
}

/// Approve an article for publication.
///
/// One update flips `status = published`, `approval_status = approved`,
/// `is_published = true`, and stamps `published_at` together, returning the
/// fully updated entity.
///
/// # Errors
///
/// Fails `Forbidden` for non-reviewers and `NotFound` for a missing
/// article.
pub async fn approve(
    conn: &mut DbConnection,
    actor: &Actor,
    article_id: i32,
) -> Result<Article, WorkflowError> {
    require_reviewer(actor)?;
    let now = Utc::now().naive_utc();
    db::publish_article(conn, article_id, actor.user_id, now)
        .await?
        .ok_or(WorkflowError::NotFound("article"))
}

/// Reject an article back to draft.
///
/// # Errors
///
/// Fails `Forbidden` for non-reviewers and `NotFound` for a missing
/// article.
pub async fn reject(
    conn: &mut DbConnection,
    actor: &Actor,
    article_id: i32,
    reason: Option<&str>,
) -> Result<Article, WorkflowError> {
    require_reviewer(actor)?;
    let now = Utc::now().naive_utc();
    db::reject_article(
        conn,
        article_id,
        actor.user_id,
        reason.unwrap_or(DEFAULT_REJECTION_REASON),
        now,
    )
    .await?
    .ok_or(WorkflowError::NotFound("article"))
}

/// Send an article back to its author for changes.
///
/// # Errors
///
/// Fails `Forbidden` for non-reviewers and `NotFound` for a missing
/// article.
pub async fn request_modification(
    conn: &mut DbConnection,
    actor: &Actor,
    article_id: i32,
    notes: &str,
) -> Result<Article, WorkflowError> {
    require_reviewer(actor)?;
    let now = Utc::now().naive_utc();
    db::reopen_for_modification(conn, article_id, actor.user_id, notes, now)
        .await?
        .ok_or(WorkflowError::NotFound("article"))
}

/// Apply an author or admin edit.
///
/// When the article was sent back for modification, the edit itself
/// re-submits it: the verdict resets to pending, the published flag drops,
/// and the modification notes are cleared in the same update.
///
/// # Errors
///
/// Fails `NotFound` for a missing article and `Forbidden` when the caller
/// is neither the author nor an admin.
pub async fn update(
    conn: &mut DbConnection,
    actor: &Actor,
    article_id: i32,
    changes: ArticleChanges<'_>,
) -> Result<Article, WorkflowError> {
    let existing = db::get_article(conn, article_id)
        .await?
        .ok_or(WorkflowError::NotFound("article"))?;
    if existing.author_id != actor.user_id && actor.role != Role::Admin {
        return Err(WorkflowError::Forbidden(
            "only the author or an admin may update this article".to_owned(),
        ));
    }

    let resubmit = existing.approval_status == ApprovalStatus::NeedsModification.as_str();
    let now = Utc::now().naive_utc();
    db::apply_update(conn, article_id, changes, resubmit, now)
        .await?
        .ok_or(WorkflowError::NotFound("article"))
}
