// Domain errors for board operations

use thiserror::Error;

/// Errors raised by layout, draft and parsing operations.
///
/// Not-found on task updates is deliberately absent from the store API: the
/// store logs it and reports an [`crate::UpdateOutcome`] instead of failing.
/// `NotFound` is used where a caller asked for a task by position or id and
/// there is nothing sensible to fall back to.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BoardError {
    #[error("Task not found: {0}")]
    NotFound(String),

    #[error("Column order must contain exactly the current columns (got [{got}], expected [{expected}])")]
    ColumnMismatch { got: String, expected: String },

    #[error("Unknown task field: {0}")]
    UnknownField(String),

    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },

    #[error("You did not select any image")]
    CaptureCancelled,

    #[error("Camera or gallery permission denied")]
    PermissionDenied,
}

impl BoardError {
    pub(crate) fn invalid(field: &str, value: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.to_string(),
            value: value.into(),
        }
    }
}
