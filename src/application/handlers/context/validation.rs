//! Request field checks shared by the context handlers.

use crate::domain::foundation::ValidationError;

/// Fails with every named field whose value is empty.
pub(super) fn require_non_empty(fields: &[(&str, &str)]) -> Result<(), ValidationError> {
    let missing: Vec<&str> = fields
        .iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(name, _)| *name)
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::missing_fields(missing))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passes_when_all_present() {
        assert!(require_non_empty(&[("userId", "1"), ("message", "hi")]).is_ok());
    }

    #[test]
    fn names_only_the_empty_fields() {
        let err = require_non_empty(&[("userId", ""), ("message", "hi"), ("flow", "")]).unwrap_err();
        assert_eq!(
            err,
            ValidationError::missing_fields(["userId", "flow"])
        );
    }
}
