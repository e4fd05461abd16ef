use thiserror::Error;

use crate::validation::ValidationIssue;

pub type Result<T> = std::result::Result<T, ReframeError>;

#[derive(Debug, Error)]
pub enum ReframeError {
    #[error("could not resolve the reframe home directory")]
    NoHomeDirectory,

    #[error("failed to parse {path}: {message}")]
    InvalidConfig { path: String, message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Submission can fail without losing the user's work: the form store stays
/// populated until the hand-off succeeds.
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("entry failed validation ({} issue(s))", .0.len())]
    Invalid(Vec<ValidationIssue>),

    #[error("chat hand-off failed: {0}")]
    Handoff(#[source] Box<dyn std::error::Error + Send + Sync>),
}
