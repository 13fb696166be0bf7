//! Row and insert types for the editorial store.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Queryable, Serialize, Deserialize, Debug, Clone)]
pub struct User {
    pub id: i32,
    pub email: String,
    pub name: String,
    pub role: String,
    pub status: String,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable, Deserialize)]
#[diesel(table_name = crate::schema::users)]
pub struct NewUser<'a> {
    pub email: &'a str,
    pub name: &'a str,
    pub role: &'a str,
    pub status: &'a str,
    pub created_at: NaiveDateTime,
}

#[derive(Queryable, Serialize, Deserialize, Debug, Clone)]
pub struct Requirement {
    pub id: i32,
    pub title: String,
    pub topic: String,
    pub submissions_count: i32,
}

#[derive(Insertable, Deserialize)]
#[diesel(table_name = crate::schema::requirements)]
pub struct NewRequirement<'a> {
    pub title: &'a str,
    pub topic: &'a str,
    pub submissions_count: i32,
}

/// A manuscript or research paper moving through editorial review.
///
/// The author block is a snapshot taken at submission time; later edits to
/// the user record must not retroactively alter historic submissions.
#[derive(Queryable, Serialize, Deserialize, Debug, Clone)]
pub struct Submission {
    pub id: i32,
    pub requirement_id: i32,
    pub kind: String,
    pub title: String,
    pub abstract_text: String,
    pub author_user_id: i32,
    pub author_name: String,
    pub author_email: String,
    pub file_url: Option<String>,
    pub file_name: Option<String>,
    pub file_type: Option<String>,
    pub file_size: Option<i32>,
    pub status: String,
    pub admin_remarks: String,
    pub editor_remarks: String,
    pub reviewed_by: Option<i32>,
    pub reviewed_at: Option<NaiveDateTime>,
    pub editor_reviewed_at: Option<NaiveDateTime>,
    pub assigned_editor: Option<i32>,
    pub assigned_by: Option<i32>,
    pub assigned_at: Option<NaiveDateTime>,
    pub submitted_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::submissions)]
pub struct NewSubmission<'a> {
    pub requirement_id: i32,
    pub kind: &'a str,
    pub title: &'a str,
    pub abstract_text: &'a str,
    pub author_user_id: i32,
    pub author_name: &'a str,
    pub author_email: &'a str,
    pub file_url: Option<&'a str>,
    pub file_name: Option<&'a str>,
    pub file_type: Option<&'a str>,
    pub file_size: Option<i32>,
    pub status: &'a str,
    pub submitted_at: NaiveDateTime,
}

#[derive(Queryable, Serialize, Deserialize, Debug, Clone)]
pub struct RoleRequest {
    pub id: i32,
    pub user_id: i32,
    pub requested_role: String,
    pub reason: String,
    pub status: String,
    pub reviewed_by: Option<i32>,
    pub reviewed_at: Option<NaiveDateTime>,
    pub admin_notes: Option<String>,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::role_requests)]
pub struct NewRoleRequest<'a> {
    pub user_id: i32,
    pub requested_role: &'a str,
    pub reason: &'a str,
    pub status: &'a str,
    pub created_at: NaiveDateTime,
}

/// Newsroom article with the two-axis status model.
///
/// `approval_status` is the review verdict; `status` and `is_published` are
/// denormalized from it for fast published-article queries. Writers keep the
/// three fields consistent; readers never reconcile them.
#[derive(Queryable, Serialize, Deserialize, Debug, Clone)]
pub struct Article {
    pub id: i32,
    pub author_id: i32,
    pub title: String,
    pub excerpt: String,
    pub content: String,
    pub category: String,
    pub status: String,
    pub approval_status: String,
    pub is_published: bool,
    pub published_at: Option<NaiveDateTime>,
    pub reviewed_by: Option<i32>,
    pub reviewed_at: Option<NaiveDateTime>,
    pub rejection_reason: Option<String>,
    pub modification_notes: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::articles)]
pub struct NewArticle<'a> {
    pub author_id: i32,
    pub title: &'a str,
    pub excerpt: &'a str,
    pub content: &'a str,
    pub category: &'a str,
    pub status: &'a str,
    pub approval_status: &'a str,
    pub is_published: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}
