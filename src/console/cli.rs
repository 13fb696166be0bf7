//! Command-line interface definitions for the masthead console.
//!
//! Keeping these types in the library gives the binary and the tests an
//! identical configuration surface: flags, `MASTHEAD_`-prefixed environment
//! variables, and a `.masthead.toml` dotfile all merge the same way.

#![expect(
    non_snake_case,
    reason = "Clap/OrthoConfig derive macros generate helper modules with uppercase names"
)]
#![allow(
    missing_docs,
    reason = "OrthoConfig and Clap derive macros generate items that cannot be documented"
)]
#![allow(
    unfulfilled_lint_expectations,
    reason = "derive macros conditionally generate items"
)]

use clap::{Args, Parser, Subcommand};
use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

/// Arguments for the `create-user` administrative subcommand.
#[expect(
    missing_docs,
    reason = "OrthoConfig derive macro generates items that cannot be documented"
)]
#[derive(Parser, OrthoConfig, Deserialize, Serialize, Default, Debug, Clone)]
#[ortho_config(prefix = "MASTHEAD_")]
pub struct CreateUserArgs {
    /// Email address for the new account.
    pub email: Option<String>,
    /// Display name for the new account.
    pub name: Option<String>,
    /// Role for the new account (defaults to `user`).
    pub role: Option<String>,
}

/// Arguments for the `auto-assign` subcommand.
#[expect(
    missing_docs,
    reason = "OrthoConfig derive macro generates items that cannot be documented"
)]
#[derive(Parser, OrthoConfig, Deserialize, Serialize, Default, Debug, Clone)]
#[ortho_config(prefix = "MASTHEAD_")]
pub struct AutoAssignArgs {
    /// User id of the chief editor running the batch.
    pub chief: Option<i32>,
}

/// Arguments for the `assign` subcommand.
#[expect(
    missing_docs,
    reason = "OrthoConfig derive macro generates items that cannot be documented"
)]
#[derive(Parser, OrthoConfig, Deserialize, Serialize, Default, Debug, Clone)]
#[ortho_config(prefix = "MASTHEAD_")]
pub struct AssignArgs {
    /// Submission to assign.
    pub submission: Option<i32>,
    /// Editor receiving the assignment.
    pub editor: Option<i32>,
    /// User id of the chief editor making the assignment.
    pub chief: Option<i32>,
}

/// Arguments for the `review` subcommand.
#[expect(
    missing_docs,
    reason = "OrthoConfig derive macro generates items that cannot be documented"
)]
#[derive(Parser, OrthoConfig, Deserialize, Serialize, Default, Debug, Clone)]
#[ortho_config(prefix = "MASTHEAD_")]
pub struct ReviewArgs {
    /// Submission under review.
    pub submission: Option<i32>,
    /// User id of the reviewer.
    pub reviewer: Option<i32>,
    /// Decision: accepted, rejected, under-review, or pending.
    pub decision: Option<String>,
    /// Remarks recorded with the decision.
    #[arg(long)]
    pub remarks: Option<String>,
}

/// Arguments for the `review-role-request` subcommand.
#[expect(
    missing_docs,
    reason = "OrthoConfig derive macro generates items that cannot be documented"
)]
#[derive(Parser, OrthoConfig, Deserialize, Serialize, Default, Debug, Clone)]
#[ortho_config(prefix = "MASTHEAD_")]
pub struct ReviewRoleRequestArgs {
    /// Role request to resolve.
    pub request: Option<i32>,
    /// User id of the reviewing admin.
    pub reviewer: Option<i32>,
    /// Decision: approved or rejected.
    pub decision: Option<String>,
    /// Notes recorded with the decision.
    #[arg(long)]
    pub notes: Option<String>,
}

/// CLI subcommands exposed by `masthead`.
#[derive(Subcommand, Deserialize, Serialize, Debug, Clone)]
pub enum Commands {
    /// Create a new user account.
    #[command(name = "create-user")]
    CreateUser(CreateUserArgs),
    /// Distribute unassigned submissions across the editor pool.
    #[command(name = "auto-assign")]
    AutoAssign(AutoAssignArgs),
    /// Assign one submission to a specific editor.
    #[command(name = "assign")]
    Assign(AssignArgs),
    /// Record a review decision on a submission.
    #[command(name = "review")]
    Review(ReviewArgs),
    /// Resolve a pending role request.
    #[command(name = "review-role-request")]
    ReviewRoleRequest(ReviewRoleRequestArgs),
}

/// Runtime configuration shared by every subcommand.
#[expect(
    missing_docs,
    reason = "OrthoConfig derive macro generates items that cannot be documented"
)]
#[derive(Args, OrthoConfig, Serialize, Deserialize, Default, Debug, Clone)]
#[ortho_config(prefix = "MASTHEAD_")]
pub struct AppConfig {
    /// Database connection string or path.
    #[ortho_config(default = "masthead.db".to_owned())]
    #[arg(long, default_value_t = String::from("masthead.db"))]
    pub database: String,
}

/// Top-level CLI entry point consumed by the binary.
#[derive(Parser, Deserialize, Serialize, Debug, Clone)]
pub struct Cli {
    /// Application configuration.
    #[command(flatten)]
    pub config: AppConfig,
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Commands,
}
