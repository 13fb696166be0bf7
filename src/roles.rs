//! User roles and the escalation vocabulary.
//!
//! The role on the user record is the sole authorization signal consumed by
//! the workflows; there is no separate permission store.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::status::UnknownValue;

/// Authorization role held by a user account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Editor,
    ChiefEditor,
    Admin,
    Moderator,
    Premium,
    Instructor,
    Recruiter,
}

impl Role {
    /// Roles a user may request through the escalation workflow.
    pub const REQUESTABLE: [Self; 4] =
        [Self::Recruiter, Self::Instructor, Self::Editor, Self::ChiefEditor];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Editor => "editor",
            Self::ChiefEditor => "chiefeditor",
            Self::Admin => "admin",
            Self::Moderator => "moderator",
            Self::Premium => "premium",
            Self::Instructor => "instructor",
            Self::Recruiter => "recruiter",
        }
    }

    /// Whether this role can be the subject of an escalation request.
    #[must_use]
    pub fn is_requestable(self) -> bool { Self::REQUESTABLE.contains(&self) }

    /// Chief editors and admins review any submission regardless of
    /// assignment; this is deliberate override authority.
    #[must_use]
    pub const fn has_review_override(self) -> bool {
        matches!(self, Self::ChiefEditor | Self::Admin)
    }
}

impl FromStr for Role {
    type Err = UnknownValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Self::User),
            "editor" => Ok(Self::Editor),
            "chiefeditor" => Ok(Self::ChiefEditor),
            "admin" => Ok(Self::Admin),
            "moderator" => Ok(Self::Moderator),
            "premium" => Ok(Self::Premium),
            "instructor" => Ok(Self::Instructor),
            "recruiter" => Ok(Self::Recruiter),
            other => Err(UnknownValue {
                field: "role",
                value: other.to_owned(),
            }),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}
