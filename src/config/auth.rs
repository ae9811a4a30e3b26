//! Authentication configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Bearer allow-list configuration
#[derive(Clone, Default, Deserialize)]
pub struct AuthConfig {
    /// Accepted bearer tokens (comma-separated)
    #[serde(default)]
    pub valid_tokens: String,
}

impl AuthConfig {
    /// Get the accepted tokens, trimmed, blanks dropped
    pub fn tokens(&self) -> Vec<String> {
        self.valid_tokens
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Validate authentication configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.tokens().is_empty() {
            return Err(ValidationError::NoValidTokens);
        }
        Ok(())
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("valid_tokens", &format!("[{} redacted]", self.tokens().len()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokens_are_split_and_trimmed() {
        let config = AuthConfig {
            valid_tokens: "alpha, beta,,gamma ".to_string(),
        };
        assert_eq!(config.tokens(), vec!["alpha", "beta", "gamma"]);
    }

    #[test]
    fn test_validation_empty_allow_list() {
        assert!(matches!(
            AuthConfig::default().validate(),
            Err(ValidationError::NoValidTokens)
        ));
        let blanks = AuthConfig {
            valid_tokens: " , ".to_string(),
        };
        assert!(blanks.validate().is_err());
    }

    #[test]
    fn test_debug_hides_tokens() {
        let config = AuthConfig {
            valid_tokens: "secret-token".to_string(),
        };
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("secret-token"));
        assert!(rendered.contains("1 redacted"));
    }
}
