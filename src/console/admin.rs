//! Administrative command runners.
//!
//! Each runner opens a connection, applies pending migrations, executes one
//! workflow call as the named actor, and prints the outcome. The functions
//! stay free of CLI parsing so tests can drive them with constructed
//! argument values.

#![allow(
    clippy::print_stdout,
    reason = "intentional user output for CLI commands"
)]

use anyhow::{Context, Result, anyhow};
use diesel_async::AsyncConnection;
use ortho_config::load_and_merge_subcommand_for;

use super::{
    AppConfig,
    AssignArgs,
    AutoAssignArgs,
    Commands,
    CreateUserArgs,
    ReviewArgs,
    ReviewRoleRequestArgs,
};
use crate::{
    actor::Actor,
    assignment,
    db::{self, DbConnection},
    escalation,
    notify::Notifier,
    review,
    roles::Role,
    status::{RequestStatus, SubmissionStatus},
};

/// Execute an administrative command.
///
/// # Errors
///
/// Propagates failures from configuration merging, database access, or the
/// underlying workflow.
pub async fn run_command(command: Commands, cfg: &AppConfig) -> Result<()> {
    match command {
        Commands::CreateUser(args) => {
            let args = load_and_merge_subcommand_for::<CreateUserArgs>(&args)?;
            run_create_user(args, cfg).await
        }
        Commands::AutoAssign(args) => {
            let args = load_and_merge_subcommand_for::<AutoAssignArgs>(&args)?;
            run_auto_assign(args, cfg).await
        }
        Commands::Assign(args) => {
            let args = load_and_merge_subcommand_for::<AssignArgs>(&args)?;
            run_assign(args, cfg).await
        }
        Commands::Review(args) => {
            let args = load_and_merge_subcommand_for::<ReviewArgs>(&args)?;
            run_review(args, cfg).await
        }
        Commands::ReviewRoleRequest(args) => {
            let args = load_and_merge_subcommand_for::<ReviewRoleRequestArgs>(&args)?;
            run_review_role_request(args, cfg).await
        }
    }
}

async fn open_database(cfg: &AppConfig) -> Result<DbConnection> {
    let mut conn = DbConnection::establish(&cfg.database)
        .await
        .with_context(|| format!("failed to open database '{}'", cfg.database))?;
    db::apply_migrations(&mut conn, &cfg.database).await?;
    Ok(conn)
}

async fn actor_from_user(conn: &mut DbConnection, user_id: i32) -> Result<Actor> {
    let user = db::get_user(conn, user_id)
        .await?
        .ok_or_else(|| anyhow!("no user with id {user_id}"))?;
    Ok(Actor::from(&user))
}

async fn run_create_user(args: CreateUserArgs, cfg: &AppConfig) -> Result<()> {
    let email = args.email.ok_or_else(|| anyhow!("missing email"))?;
    let name = args.name.ok_or_else(|| anyhow!("missing name"))?;
    let role = args
        .role
        .as_deref()
        .unwrap_or(Role::User.as_str())
        .parse::<Role>()
        .map_err(|err| anyhow!(err))?;

    let mut conn = open_database(cfg).await?;
    let now = chrono::Utc::now().naive_utc();
    let user = db::create_user(&mut conn, &db::new_user(&email, &name, role, now))
        .await
        .with_context(|| format!("failed to create user '{email}'"))?;
    println!("User {} created with id {} and role {}", user.email, user.id, user.role);
    Ok(())
}

async fn run_auto_assign(args: AutoAssignArgs, cfg: &AppConfig) -> Result<()> {
    let chief = args.chief.ok_or_else(|| anyhow!("missing chief editor id"))?;

    let mut conn = open_database(cfg).await?;
    let actor = actor_from_user(&mut conn, chief).await?;
    let summary = assignment::auto_assign(&mut conn, &actor).await?;
    println!(
        "Distributed {} submissions among {} editors ({} each, {} get one extra, {} skipped)",
        summary.assigned, summary.editors, summary.per_editor, summary.remainder, summary.skipped
    );
    Ok(())
}

async fn run_assign(args: AssignArgs, cfg: &AppConfig) -> Result<()> {
    let submission = args.submission.ok_or_else(|| anyhow!("missing submission id"))?;
    let editor = args.editor.ok_or_else(|| anyhow!("missing editor id"))?;
    let chief = args.chief.ok_or_else(|| anyhow!("missing chief editor id"))?;

    let mut conn = open_database(cfg).await?;
    let actor = actor_from_user(&mut conn, chief).await?;
    let updated = assignment::assign(&mut conn, &actor, submission, editor).await?;
    println!(
        "Submission {} ('{}') assigned to editor {}",
        updated.id,
        updated.title,
        editor
    );
    Ok(())
}

async fn run_review(args: ReviewArgs, cfg: &AppConfig) -> Result<()> {
    let submission = args.submission.ok_or_else(|| anyhow!("missing submission id"))?;
    let reviewer = args.reviewer.ok_or_else(|| anyhow!("missing reviewer id"))?;
    let decision = args
        .decision
        .ok_or_else(|| anyhow!("missing decision"))?
        .parse::<SubmissionStatus>()
        .map_err(|err| anyhow!(err))?;

    let mut conn = open_database(cfg).await?;
    let actor = actor_from_user(&mut conn, reviewer).await?;
    let notifier = Notifier::disconnected();
    let updated = review::review(
        &mut conn,
        &notifier,
        &actor,
        submission,
        decision,
        args.remarks.as_deref(),
    )
    .await?;
    println!("Submission {} is now {}", updated.id, updated.status);
    Ok(())
}

async fn run_review_role_request(args: ReviewRoleRequestArgs, cfg: &AppConfig) -> Result<()> {
    let request = args.request.ok_or_else(|| anyhow!("missing request id"))?;
    let reviewer = args.reviewer.ok_or_else(|| anyhow!("missing reviewer id"))?;
    let decision = args
        .decision
        .ok_or_else(|| anyhow!("missing decision"))?
        .parse::<RequestStatus>()
        .map_err(|err| anyhow!(err))?;

    let mut conn = open_database(cfg).await?;
    let actor = actor_from_user(&mut conn, reviewer).await?;
    let notifier = Notifier::disconnected();
    let resolved =
        escalation::review_role_request(&mut conn, &notifier, &actor, request, decision, args.notes.as_deref())
            .await?;
    println!(
        "Role request {} ({} -> {}) is now {}",
        resolved.id, resolved.user_id, resolved.requested_role, resolved.status
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(None, Some("Ada".into()), "missing email")]
    #[case(Some("ada@example.com".into()), None, "missing name")]
    #[tokio::test]
    async fn create_user_rejects_missing_fields(
        #[case] email: Option<String>,
        #[case] name: Option<String>,
        #[case] expected: &str,
    ) {
        let cfg = AppConfig {
            database: ":memory:".to_owned(),
        };
        let args = CreateUserArgs {
            email,
            name,
            role: None,
        };

        let err = run_command(Commands::CreateUser(args), &cfg)
            .await
            .expect_err("command must fail");

        assert!(err.to_string().contains(expected));
    }

    #[tokio::test]
    async fn review_rejects_unknown_decision() {
        let cfg = AppConfig {
            database: ":memory:".to_owned(),
        };
        let args = ReviewArgs {
            submission: Some(1),
            reviewer: Some(1),
            decision: Some("maybe".to_owned()),
            remarks: None,
        };

        let err = run_command(Commands::Review(args), &cfg)
            .await
            .expect_err("command must fail");

        assert!(err.to_string().contains("unknown"));
    }
}
