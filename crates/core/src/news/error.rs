use thiserror::Error;

/// Errors raised before any I/O when a news operation is not allowed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NewsError {
    #[error("News title cannot be empty")]
    EmptyTitle,
    #[error("Invalid page number: {0} (pages start at 1)")]
    InvalidPage(u32),
    #[error("News identifier is not set")]
    MissingId,
}

impl NewsError {
    /// Returns true for errors caused by invalid input values.
    pub fn is_validation(&self) -> bool {
        matches!(self, NewsError::EmptyTitle | NewsError::InvalidPage(_))
    }

    /// Returns true for errors caused by an operation that needs a persisted identity.
    pub fn is_state(&self) -> bool {
        matches!(self, NewsError::MissingId)
    }
}
