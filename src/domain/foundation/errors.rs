//! Error types for the domain layer.

use std::fmt;
use thiserror::Error;

/// Errors that occur during value object construction and input checks.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("{}", missing_fields_message(.fields))]
    MissingFields { fields: Vec<String> },

    #[error("Field '{field}' has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    #[error("Invalid flow '{value}'. Must be \"normal\" or \"check-in\"")]
    InvalidFlow { value: String },
}

fn missing_fields_message(fields: &[String]) -> String {
    match fields {
        [] => "Required fields are missing".to_string(),
        [only] => format!("Field '{}' is required", only),
        [init @ .., last] => {
            let head: Vec<String> = init.iter().map(|f| format!("'{}'", f)).collect();
            format!("Fields {} and '{}' are required", head.join(", "), last)
        }
    }
}

impl ValidationError {
    /// Creates an empty field validation error.
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField { field: field.into() }
    }

    /// Creates a missing-fields error naming every absent field.
    pub fn missing_fields<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ValidationError::MissingFields {
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }

    /// Creates an invalid format validation error.
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Creates an invalid flow error.
    pub fn invalid_flow(value: impl Into<String>) -> Self {
        ValidationError::InvalidFlow { value: value.into() }
    }
}

/// Error codes organized by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Validation errors
    ValidationFailed,
    InvalidFlow,

    // Authorization errors
    Unauthorized,
    Forbidden,

    // Upstream errors
    StoreError,
    AIProviderError,
    CorruptRecord,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::ValidationFailed => "VALIDATION_FAILED",
            ErrorCode::InvalidFlow => "INVALID_FLOW",
            ErrorCode::Unauthorized => "UNAUTHORIZED",
            ErrorCode::Forbidden => "FORBIDDEN",
            ErrorCode::StoreError => "STORE_ERROR",
            ErrorCode::AIProviderError => "AI_PROVIDER_ERROR",
            ErrorCode::CorruptRecord => "CORRUPT_RECORD",
        };
        write!(f, "{}", s)
    }
}
