use thiserror::Error;

/// Raised when a value fails the facility schema's constraints. This is the
/// validation error of the service: it is always detected before any storage
/// call is made.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("Invalid input for {0}: {1}")]
    InvalidInput(String, String),

    #[error("Limit {requested} exceeds the maximum page size of {max}")]
    LimitExceeded { requested: i64, max: i64 },
}

impl CoreError {
    pub(crate) fn invalid(field: &str, reason: impl Into<String>) -> Self {
        CoreError::InvalidInput(field.to_string(), reason.into())
    }
}
