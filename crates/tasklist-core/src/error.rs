use thiserror::Error;

/// Rejected input on task creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The text was empty or whitespace only.
    #[error("task text must not be empty")]
    EmptyText,
}
