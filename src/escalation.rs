//! Role escalation: request, review, revoke, delete.
//!
//! Approval is the one place a review of one entity cascades into a second
//! write (the user's role); the two updates share a database transaction.
//! Approval notifies by real-time event only, while revocation sends both
//! the event and an email. The asymmetry matches the platform's existing
//! behaviour and is pinned by tests rather than silently corrected.

use chrono::Utc;
use diesel_async::AsyncConnection;
use serde_json::json;

use crate::{
    actor::Actor,
    db::{self, DbConnection},
    error::WorkflowError,
    models::RoleRequest,
    notify::{Notifier, templates},
    roles::Role,
    status::RequestStatus,
};

fn require_admin(actor: &Actor) -> Result<(), WorkflowError> {
    if actor.role == Role::Admin {
        Ok(())
    } else {
        Err(WorkflowError::Forbidden("administrator access required".to_owned()))
    }
}

fn require_reviewer(actor: &Actor) -> Result<(), WorkflowError> {
    if actor.role.has_review_override() {
        Ok(())
    } else {
        Err(WorkflowError::Forbidden(
            "role requests are reviewed by admins and chief editors".to_owned(),
        ))
    }
}

/// Petition for a higher-privilege role.
///
/// # Errors
///
/// Fails `Validation` for a non-requestable role or blank reason,
/// `NotFound` for a vanished user, and `Conflict` when the user already
/// holds the role or already has a pending request for it.
pub async fn submit_role_request(
    conn: &mut DbConnection,
    actor: &Actor,
    requested: Role,
    reason: &str,
) -> Result<RoleRequest, WorkflowError> {
    if !requested.is_requestable() {
        return Err(WorkflowError::Validation(format!(
            "role '{requested}' cannot be requested"
        )));
    }
    let reason = reason.trim();
    if reason.is_empty() {
        return Err(WorkflowError::Validation(
            "please provide a reason for your request".to_owned(),
        ));
    }

    let user = db::get_user(conn, actor.user_id)
        .await?
        .ok_or(WorkflowError::NotFound("user"))?;
    if user.role == requested.as_str() {
        return Err(WorkflowError::Conflict("you already have this role".to_owned()));
    }
    if db::find_pending(conn, actor.user_id, requested).await?.is_some() {
        return Err(WorkflowError::Conflict(
            "a pending request for this role already exists".to_owned(),
        ));
    }

    let now = Utc::now().naive_utc();
    let row = crate::models::NewRoleRequest {
        user_id: actor.user_id,
        requested_role: requested.as_str(),
        reason,
        status: RequestStatus::Pending.as_str(),
        created_at: now,
    };
    Ok(db::create_role_request(conn, &row).await?)
}

/// Resolve a pending role request.
///
/// On approval the request update and the user's role change commit in one
/// transaction, then a `role:approved` event is published to the user's
/// private channel. No approval email is sent.
///
/// # Errors
///
/// Fails `Forbidden` for non-reviewers, `Validation` for a `pending`
/// decision, `NotFound` for a missing request or vanished user, and
/// `Conflict` when the request was already resolved; the first reviewer's
/// verdict stays untouched.
pub async fn review_role_request(
    conn: &mut DbConnection,
    notifier: &Notifier,
    actor: &Actor,
    request_id: i32,
    decision: RequestStatus,
    admin_notes: Option<&str>,
) -> Result<RoleRequest, WorkflowError> {
    require_reviewer(actor)?;
    if decision == RequestStatus::Pending {
        return Err(WorkflowError::Validation(
            "decision must be approved or rejected".to_owned(),
        ));
    }

    let existing = db::get_role_request(conn, request_id)
        .await?
        .ok_or(WorkflowError::NotFound("role request"))?;
    if existing.status != RequestStatus::Pending.as_str() {
        return Err(WorkflowError::Conflict(
            "this request has already been reviewed".to_owned(),
        ));
    }

    let reviewer = actor.user_id;
    let now = Utc::now().naive_utc();
    let resolved = conn
        .transaction::<RoleRequest, WorkflowError, _>(|conn| {
            Box::pin(async move {
                let resolved =
                    db::resolve_pending(conn, request_id, decision, reviewer, admin_notes, now)
                        .await?
                        .ok_or_else(|| {
                            WorkflowError::Conflict(
                                "this request has already been reviewed".to_owned(),
                            )
                        })?;
                if decision == RequestStatus::Approved {
                    let granted = resolved
                        .requested_role
                        .parse::<Role>()
                        .map_err(|err| WorkflowError::Validation(err.to_string()))?;
                    if db::set_role(conn, resolved.user_id, granted).await? == 0 {
                        return Err(WorkflowError::NotFound("user"));
                    }
                }
                Ok(resolved)
            })
        })
        .await?;

    if decision == RequestStatus::Approved {
        notifier
            .publish(
                &Notifier::user_channel(resolved.user_id),
                "role:approved",
                json!({
                    "newRole": resolved.requested_role,
                    "message": format!("Your {} role has been approved!", resolved.requested_role),
                }),
            )
            .await;
    }
    Ok(resolved)
}

/// Strip a role without a corresponding request; a unilateral admin action.
///
/// Publishes `role:revoked` and sends the revocation email.
///
/// # Errors
///
/// Fails `Forbidden` for non-admin callers, `NotFound` for a missing user,
/// and `Conflict` when the user does not hold exactly the named role.
pub async fn revoke_role(
    conn: &mut DbConnection,
    notifier: &Notifier,
    actor: &Actor,
    user_id: i32,
    role_to_revoke: Role,
) -> Result<(), WorkflowError> {
    require_admin(actor)?;

    let user = db::get_user(conn, user_id)
        .await?
        .ok_or(WorkflowError::NotFound("user"))?;
    if user.role != role_to_revoke.as_str() {
        return Err(WorkflowError::Conflict(format!(
            "user does not have the {role_to_revoke} role; current role is {}",
            user.role
        )));
    }

    let updated = db::change_role_if(conn, user_id, role_to_revoke, Role::User)
        .await?
        .ok_or_else(|| WorkflowError::Conflict("role changed while revoking".to_owned()))?;

    notifier
        .publish(
            &Notifier::user_channel(user_id),
            "role:revoked",
            json!({
                "oldRole": role_to_revoke.as_str(),
                "newRole": Role::User.as_str(),
                "message": format!(
                    "Your {role_to_revoke} role has been revoked. Your account is now a regular user account."
                ),
            }),
        )
        .await;
    let (subject, body) = templates::role_revoked(&updated.name, role_to_revoke);
    notifier.email(&updated.email, &subject, &body).await;
    Ok(())
}

/// Delete a resolved role request.
///
/// An approved request whose grant is still live cannot be deleted. The
/// role must be revoked first, so the audit trail for an active grant is
/// never lost.
///
/// # Errors
///
/// Fails `Forbidden` for non-admin callers, `NotFound` for a missing
/// request, and `Conflict` while the approval is still live.
pub async fn delete_role_request(
    conn: &mut DbConnection,
    actor: &Actor,
    request_id: i32,
) -> Result<RoleRequest, WorkflowError> {
    require_admin(actor)?;

    let existing = db::get_role_request(conn, request_id)
        .await?
        .ok_or(WorkflowError::NotFound("role request"))?;

    if existing.status == RequestStatus::Approved.as_str() {
        let holder = db::get_user(conn, existing.user_id).await?;
        if holder.is_some_and(|user| user.role == existing.requested_role) {
            return Err(WorkflowError::Conflict(format!(
                "the user still has the {} role active; revoke it before deleting the request",
                existing.requested_role
            )));
        }
    }

    db::delete_role_request(conn, request_id).await?;
    Ok(existing)
}

/// A user's own role requests, newest first.
///
/// # Errors
///
/// Propagates store failures.
pub async fn my_role_requests(
    conn: &mut DbConnection,
    actor: &Actor,
) -> Result<Vec<RoleRequest>, WorkflowError> {
    Ok(db::list_for_user(conn, actor.user_id).await?)
}

/// The admin review queue of pending requests.
///
/// # Errors
///
/// Fails `Forbidden` for non-reviewers; propagates store failures.
pub async fn pending_role_requests(
    conn: &mut DbConnection,
    actor: &Actor,
) -> Result<Vec<RoleRequest>, WorkflowError> {
    require_reviewer(actor)?;
    Ok(db::list_pending(conn).await?)
}
