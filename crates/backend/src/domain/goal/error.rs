use thiserror::Error;

/// Error taxonomy surfaced by the goal service.
///
/// Nothing is recovered locally; handlers map each variant onto an HTTP
/// status with an `{"error": message}` body.
#[derive(Debug, Error)]
pub enum GoalError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("A goal named \"{0}\" already exists")]
    DuplicateName(String),

    #[error("Goal not found")]
    NotFound,

    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}
