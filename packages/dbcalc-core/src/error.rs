//! Sizing error types.

use thiserror::Error;

/// Errors raised at the input boundary of the estimator.
///
/// The estimator itself never fails; everything here is produced while
/// turning user input into a [`crate::ValidParameters`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalcError {
    /// Field value outside its domain
    #[error("Invalid value for '{field}': {reason}")]
    InvalidInput { field: &'static str, reason: String },

    /// Field text could not be parsed as a number
    #[error("Value '{value}' for '{field}' is not a number")]
    NotANumber { field: &'static str, value: String },

    /// No parameter with this name
    #[error("Unknown parameter '{0}'")]
    UnknownField(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Configuration file or environment problem
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl CalcError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CalcError>;
