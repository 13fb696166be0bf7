//! Error taxonomy shared by every workflow.

use thiserror::Error;

/// Failure of a workflow operation.
///
/// Authorization and state-machine violations are detected before any
/// mutation; `Store` aborts the operation mid-flight and the caller decides
/// whether to retry. Notifier failures never appear here; they are logged
/// and swallowed at the notification boundary.
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// Bad or missing input; the caller's fault.
    #[error("validation failed: {0}")]
    Validation(String),
    /// The referenced entity does not exist.
    #[error("{0} not found")]
    NotFound(&'static str),
    /// The authenticated actor lacks authorization for this entity.
    #[error("forbidden: {0}")]
    Forbidden(String),
    /// A state-machine precondition no longer holds.
    #[error("conflict: {0}")]
    Conflict(String),
    /// The assignment engine found an empty editor pool.
    #[error("no editors available for assignment")]
    NoEditorsAvailable,
    /// The entity store failed.
    #[error(transparent)]
    Store(#[from] diesel::result::Error),
}

impl WorkflowError {
    /// Whether the failure left the store untouched.
    ///
    /// Everything except a store failure is rejected before mutation.
    #[must_use]
    pub const fn is_precondition_failure(&self) -> bool { !matches!(self, Self::Store(_)) }
}
