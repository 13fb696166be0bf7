//! Email wording for editorial decisions.
//!
//! Wording varies by submission kind and decision; the variation is purely
//! cosmetic and carries no workflow meaning.

use crate::{
    models::Submission,
    roles::Role,
    status::{SubmissionKind, SubmissionStatus},
};

/// Subject and body for a submission decision email.
#[must_use]
pub fn submission_decision(submission: &Submission, decision: SubmissionStatus) -> (String, String) {
    let kind = submission
        .kind
        .parse::<SubmissionKind>()
        .unwrap_or(SubmissionKind::Manuscript);
    let label = kind.label();
    let subject = match decision {
        SubmissionStatus::Accepted => format!("{label} accepted: {}", submission.title),
        SubmissionStatus::Rejected => format!("{label} decision: {}", submission.title),
        _ => format!("{label} status update: {}", submission.title),
    };
    let verdict = match decision {
        SubmissionStatus::Accepted => {
            format!("Congratulations! Your {} has been accepted for publication.", label.to_lowercase())
        }
        SubmissionStatus::Rejected => format!(
            "Thank you for your submission. After careful review, we are unable to accept your {} at this time.",
            label.to_lowercase()
        ),
        _ => format!("Your {} status has been updated.", label.to_lowercase()),
    };
    let mut body = format!(
        "<p>Dear {},</p>\n<p>{verdict}</p>\n<p><strong>Title:</strong> {}<br>\
         <strong>Status:</strong> {}</p>\n",
        submission.author_name,
        submission.title,
        decision.as_str().to_uppercase(),
    );
    let remarks = if submission.editor_remarks.is_empty() {
        &submission.admin_remarks
    } else {
        &submission.editor_remarks
    };
    if !remarks.is_empty() {
        body.push_str(&format!("<p><strong>Reviewer feedback:</strong> {remarks}</p>\n"));
    }
    body.push_str("<p>Best regards,<br>The Editorial Team</p>");
    (subject, body)
}

/// Subject and body for a role revocation email.
#[must_use]
pub fn role_revoked(name: &str, revoked: Role) -> (String, String) {
    let subject = format!("Role revoked: {revoked} access removed");
    let body = format!(
        "<p>Hello {name},</p>\n<p>Your <strong>{revoked}</strong> role has been revoked by the \
         administrator. Your account has been changed back to a regular user account.</p>\n\
         <p>If you believe this was done in error, please contact the administrator.</p>",
    );
    (subject, body)
}
