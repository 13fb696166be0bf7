//! Status vocabularies for submissions and articles.
//!
//! Statuses are stored as text columns; these enums are the typed view the
//! workflow layer operates on. Parsing a value the store should never
//! contain yields [`UnknownValue`], which the query layer maps onto a
//! deserialization error.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A text value outside the expected vocabulary.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown {field} value: {value}")]
pub struct UnknownValue {
    /// Which vocabulary rejected the value.
    pub field: &'static str,
    /// The offending text.
    pub value: String,
}

impl UnknownValue {
    fn new(field: &'static str, value: &str) -> Self {
        Self {
            field,
            value: value.to_owned(),
        }
    }
}

/// Discriminator between the two submission kinds.
///
/// Manuscripts and research papers share one record shape but keep distinct
/// unassigned-status vocabularies (see [`SubmissionKind::unassigned_status`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SubmissionKind {
    Manuscript,
    ResearchPaper,
}

impl SubmissionKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Manuscript => "manuscript",
            Self::ResearchPaper => "research-paper",
        }
    }

    /// Status a submission of this kind holds before (or after losing) an
    /// editor assignment.
    #[must_use]
    pub const fn unassigned_status(self) -> SubmissionStatus {
        match self {
            Self::Manuscript => SubmissionStatus::Pending,
            Self::ResearchPaper => SubmissionStatus::Completed,
        }
    }

    /// Human label used in notification wording.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Manuscript => "Manuscript",
            Self::ResearchPaper => "Research paper",
        }
    }
}

impl FromStr for SubmissionKind {
    type Err = UnknownValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "manuscript" => Ok(Self::Manuscript),
            "research-paper" => Ok(Self::ResearchPaper),
            other => Err(UnknownValue::new("submission kind", other)),
        }
    }
}

impl fmt::Display for SubmissionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

/// Review lifecycle of a submission.
///
/// `Completed` is the research-paper intake status; manuscripts never hold
/// it. `UnderReview` is entered only through assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SubmissionStatus {
    Pending,
    Completed,
    UnderReview,
    Accepted,
    Rejected,
}

impl SubmissionStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
            Self::UnderReview => "under-review",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
        }
    }

    /// Whether this status ends the review lifecycle.
    #[must_use]
    pub const fn is_terminal(self) -> bool { matches!(self, Self::Accepted | Self::Rejected) }
}

impl FromStr for SubmissionStatus {
    type Err = UnknownValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "completed" => Ok(Self::Completed),
            "under-review" => Ok(Self::UnderReview),
            "accepted" => Ok(Self::Accepted),
            "rejected" => Ok(Self::Rejected),
            other => Err(UnknownValue::new("submission status", other)),
        }
    }
}

impl fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

/// Lifecycle of a role escalation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    Pending,
    Approved,
    Rejected,
}

impl RequestStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

impl FromStr for RequestStatus {
    type Err = UnknownValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            other => Err(UnknownValue::new("request status", other)),
        }
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

/// Coarse article lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArticleStatus {
    Draft,
    Pending,
    Approved,
    Rejected,
    Published,
    Archived,
}

impl ArticleStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Published => "published",
            Self::Archived => "archived",
        }
    }
}

impl FromStr for ArticleStatus {
    type Err = UnknownValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(Self::Draft),
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            "published" => Ok(Self::Published),
            "archived" => Ok(Self::Archived),
            other => Err(UnknownValue::new("article status", other)),
        }
    }
}

impl fmt::Display for ArticleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

/// Fine-grained review verdict layered on top of [`ArticleStatus`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ApprovalStatus {
    Pending,
    Approved,
    Rejected,
    NeedsModification,
}

impl ApprovalStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::NeedsModification => "needsModification",
        }
    }
}

impl FromStr for ApprovalStatus {
    type Err = UnknownValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            "needsModification" => Ok(Self::NeedsModification),
            other => Err(UnknownValue::new("approval status", other)),
        }
    }
}

impl fmt::Display for ApprovalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(SubmissionStatus::Pending, "pending")]
    #[case(SubmissionStatus::Completed, "completed")]
    #[case(SubmissionStatus::UnderReview, "under-review")]
    #[case(SubmissionStatus::Accepted, "accepted")]
    #[case(SubmissionStatus::Rejected, "rejected")]
    fn submission_status_round_trips(#[case] status: SubmissionStatus, #[case] text: &str) {
        assert_eq!(status.as_str(), text);
        assert_eq!(text.parse::<SubmissionStatus>().expect("parse"), status);
    }

    #[rstest]
    #[case(SubmissionStatus::Pending, false)]
    #[case(SubmissionStatus::UnderReview, false)]
    #[case(SubmissionStatus::Accepted, true)]
    #[case(SubmissionStatus::Rejected, true)]
    fn terminal_statuses(#[case] status: SubmissionStatus, #[case] terminal: bool) {
        assert_eq!(status.is_terminal(), terminal);
    }

    #[rstest]
    #[case(SubmissionKind::Manuscript, SubmissionStatus::Pending)]
    #[case(SubmissionKind::ResearchPaper, SubmissionStatus::Completed)]
    fn unassigned_vocabulary_differs_by_kind(
        #[case] kind: SubmissionKind,
        #[case] expected: SubmissionStatus,
    ) {
        assert_eq!(kind.unassigned_status(), expected);
    }

    #[test]
    fn unknown_status_is_rejected() {
        let err = "archived".parse::<SubmissionStatus>().expect_err("must fail");
        assert_eq!(err.value, "archived");
    }

    #[rstest]
    #[case(ApprovalStatus::NeedsModification, "needsModification")]
    #[case(ApprovalStatus::Pending, "pending")]
    fn approval_status_round_trips(#[case] status: ApprovalStatus, #[case] text: &str) {
        assert_eq!(status.as_str(), text);
        assert_eq!(text.parse::<ApprovalStatus>().expect("parse"), status);
    }
}
