//! Manage database connections and domain queries.
//!
//! This module tree exposes helpers for creating pooled Diesel connections,
//! running embedded migrations, and executing application queries grouped by
//! domain concern. State-changing helpers encode their preconditions as
//! conditional updates so races surface as lost claims, never as silent
//! overwrites.

mod articles;
mod connection;
mod migrations;
mod requirements;
mod role_requests;
mod submissions;
mod users;


pub use self::{
    articles::{
        ArticleChanges,
        apply_update,
        create_article,
        get_article,
        publish_article,
        reject_article,
        reopen_for_modification,
    },
    connection::{Backend, DbConnection, DbPool, MIGRATIONS, establish_pool},
    migrations::{apply_migrations, run_migrations},
    requirements::{adjust_submission_count, create_requirement, get_requirement},
    role_requests::{
        create_role_request,
        delete_role_request,
        find_pending,
        get_role_request,
        list_for_user,
        list_pending,
        resolve_pending,
    },
    submissions::{
        claim_assignment,
        clear_assignment,
        count_by_status,
        count_open_by_editor,
        create_submission,
        delete_submission,
        get_submission,
        list_unassigned,
        record_admin_review,
        record_editor_review,
        transfer_assignment,
        update_editor_remarks,
    },
    users::{
        change_role_if,
        create_user,
        get_user,
        get_user_with_role,
        list_editors,
        new_user,
        set_role,
    },
};
