//! Console orchestration for the masthead binary.
//!
//! This module exposes the command-line interface and the administrative
//! command runners so the binary stays a thin wrapper that only needs to
//! call [`run`].

pub mod admin;
pub mod cli;

use anyhow::Result;
use clap::Parser;
pub use cli::{
    AppConfig,
    AssignArgs,
    AutoAssignArgs,
    Cli,
    Commands,
    CreateUserArgs,
    ReviewArgs,
    ReviewRoleRequestArgs,
};
pub use admin::run_command;

/// Parse CLI arguments and execute the requested command.
///
/// # Errors
///
/// Returns any error emitted while parsing configuration or running the
/// command.
pub async fn run() -> Result<()> {
    let cli = Cli::parse();
    run_with_cli(cli).await
}

/// Execute the console logic using an already parsed [`Cli`].
///
/// # Errors
///
/// Propagates any failure reported by [`admin::run_command`].
pub async fn run_with_cli(cli: Cli) -> Result<()> { admin::run_command(cli.command, &cli.config).await }
