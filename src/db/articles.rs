//! Newsroom article queries.
//!
//! The publish/reject/reopen helpers each perform the full multi-field flip
//! in a single `UPDATE`, so no caller can observe a half-written verdict.

use chrono::NaiveDateTime;
use diesel::{prelude::*, result::QueryResult};
use diesel_async::RunQueryDsl;

use super::connection::DbConnection;
use crate::status::{ApprovalStatus, ArticleStatus};

/// Field-wise article patch; `None` fields are left untouched.
#[derive(AsChangeset, Default)]
#[diesel(table_name = crate::schema::articles)]
pub struct ArticleChanges<'a> {
    pub title: Option<&'a str>,
    pub excerpt: Option<&'a str>,
    pub content: Option<&'a str>,
    pub category: Option<&'a str>,
}

/// Look up an article by id.
///
/// # Errors
/// Returns any error produced by the underlying database query.
#[must_use = "handle the result"]
pub async fn get_article(
    conn: &mut DbConnection,
    article_id: i32,
) -> QueryResult<Option<crate::models::Article>> {
    use crate::schema::articles::dsl::articles;
    articles
        .find(article_id)
        .first::<crate::models::Article>(conn)
        .await
        .optional()
}

/// Insert a new article and return it.
///
/// # Errors
/// Returns any error produced by the insertion query.
#[must_use = "handle the result"]
pub async fn create_article(
    conn: &mut DbConnection,
    article: &crate::models::NewArticle<'_>,
) -> QueryResult<crate::models::Article> {
    use crate::schema::articles::dsl::articles;
    diesel::insert_into(articles)
        .values(article)
        .get_result(conn)
        .await
}

/// Publish an article: the four-field approval flip plus reviewer stamp.
///
/// # Errors
/// Returns any error produced by the update query.
#[must_use = "handle the result"]
pub async fn publish_article(
    conn: &mut DbConnection,
    article_id: i32,
    reviewer_id: i32,
    at: NaiveDateTime,
) -> QueryResult<Option<crate::models::Article>> {
    use crate::schema::articles::dsl as a;
    diesel::update(a::articles.find(article_id))
        .set((
            a::status.eq(ArticleStatus::Published.as_str()),
            a::approval_status.eq(ApprovalStatus::Approved.as_str()),
            a::is_published.eq(true),
            a::published_at.eq(Some(at)),
            a::reviewed_by.eq(Some(reviewer_id)),
            a::reviewed_at.eq(Some(at)),
            a::updated_at.eq(at),
        ))
        .get_result::<crate::models::Article>(conn)
        .await
        .optional()
}

/// Reject an article back to draft with the given reason.
///
/// # Errors
/// Returns any error produced by the update query.
#[must_use = "handle the result"]
pub async fn reject_article(
    conn: &mut DbConnection,
    article_id: i32,
    reviewer_id: i32,
    reason: &str,
    at: NaiveDateTime,
) -> QueryResult<Option<crate::models::Article>> {
    use crate::schema::articles::dsl as a;
    diesel::update(a::articles.find(article_id))
        .set((
            a::status.eq(ArticleStatus::Draft.as_str()),
            a::approval_status.eq(ApprovalStatus::Rejected.as_str()),
            a::is_published.eq(false),
            a::rejection_reason.eq(Some(reason)),
            a::reviewed_by.eq(Some(reviewer_id)),
            a::reviewed_at.eq(Some(at)),
            a::updated_at.eq(at),
        ))
        .get_result::<crate::models::Article>(conn)
        .await
        .optional()
}

/// Re-open an article for modification with reviewer notes.
///
/// # Errors
/// Returns any error produced by the update query.
#[must_use = "handle the result"]
pub async fn reopen_for_modification(
    conn: &mut DbConnection,
    article_id: i32,
    reviewer_id: i32,
    notes: &str,
    at: NaiveDateTime,
) -> QueryResult<Option<crate::models::Article>> {
    use crate::schema::articles::dsl as a;
    diesel::update(a::articles.find(article_id))
        .set((
            a::status.eq(ArticleStatus::Pending.as_str()),
            a::approval_status.eq(ApprovalStatus::NeedsModification.as_str()),
            a::is_published.eq(false),
            a::modification_notes.eq(Some(notes)),
            a::reviewed_by.eq(Some(reviewer_id)),
            a::reviewed_at.eq(Some(at)),
            a::updated_at.eq(at),
        ))
        .get_result::<crate::models::Article>(conn)
        .await
        .optional()
}

/// Apply an author/admin edit.
///
/// With `resubmit` set, the same update also resets the approval verdict to
/// pending and clears the modification notes (resubmission-on-edit).
///
/// # Errors
/// Returns any error produced by the update query.
#[must_use = "handle the result"]
pub async fn apply_update(
    conn: &mut DbConnection,
    article_id: i32,
    changes: ArticleChanges<'_>,
    resubmit: bool,
    at: NaiveDateTime,
) -> QueryResult<Option<crate::models::Article>> {
    use crate::schema::articles::dsl as a;
    if resubmit {
        diesel::update(a::articles.find(article_id))
            .set((
                changes,
                a::approval_status.eq(ApprovalStatus::Pending.as_str()),
                a::status.eq(ArticleStatus::Pending.as_str()),
                a::is_published.eq(false),
                a::modification_notes.eq(None::<&str>),
                a::updated_at.eq(at),
            ))
            .get_result::<crate::models::Article>(conn)
            .await
            .optional()
    } else {
        diesel::update(a::articles.find(article_id))
            .set((changes, a::updated_at.eq(at)))
            .get_result::<crate::models::Article>(conn)
            .await
            .optional()
    }
}
