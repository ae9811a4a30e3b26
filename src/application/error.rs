//! Application error taxonomy.

use thiserror::Error;

use crate::domain::foundation::{ErrorCode, ValidationError};
use crate::ports::{AIError, StoreError};

/// Errors surfaced by context operations.
///
/// Validation failures are the caller's fault and are raised before any
/// store access. Everything else is an upstream failure, propagated as-is
/// without retry.
#[derive(Debug, Error)]
pub enum ContextError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Language model error: {0}")]
    LanguageModel(#[from] AIError),

    /// Stored data exists but cannot be decoded.
    #[error("Corrupt record at {key}: {reason}")]
    CorruptRecord { key: String, reason: String },
}

impl ContextError {
    pub fn corrupt(key: impl Into<String>, reason: impl Into<String>) -> Self {
        ContextError::CorruptRecord {
            key: key.into(),
            reason: reason.into(),
        }
    }

    /// Returns true if the caller can fix the request.
    pub fn is_client_error(&self) -> bool {
        matches!(self, ContextError::Validation(_))
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            ContextError::Validation(ValidationError::InvalidFlow { .. }) => ErrorCode::InvalidFlow,
            ContextError::Validation(_) => ErrorCode::ValidationFailed,
            ContextError::Store(_) => ErrorCode::StoreError,
            ContextError::LanguageModel(_) => ErrorCode::AIProviderError,
            ContextError::CorruptRecord { .. } => ErrorCode::CorruptRecord,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_are_client_errors() {
        let err: ContextError = ValidationError::empty_field("userId").into();
        assert!(err.is_client_error());
        assert_eq!(err.code(), ErrorCode::ValidationFailed);
        assert_eq!(err.to_string(), "Field 'userId' cannot be empty");
    }

    #[test]
    fn invalid_flow_has_its_own_code() {
        let err: ContextError = ValidationError::invalid_flow("weekly").into();
        assert_eq!(err.code(), ErrorCode::InvalidFlow);
    }

    #[test]
    fn upstream_errors_are_not_client_errors() {
        let store: ContextError = StoreError::Unavailable("down".to_string()).into();
        let ai: ContextError = AIError::AuthenticationFailed.into();
        let corrupt = ContextError::corrupt("context:1:normal:c", "expected array");

        for err in [&store, &ai, &corrupt] {
            assert!(!err.is_client_error());
        }
        assert_eq!(store.code(), ErrorCode::StoreError);
        assert_eq!(ai.code(), ErrorCode::AIProviderError);
        assert_eq!(corrupt.code(), ErrorCode::CorruptRecord);
    }
}
