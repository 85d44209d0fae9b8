//! Domain error types
//!
//! This module defines the error hierarchy for Safeguard.
//! All errors are domain-specific and don't expose third-party types.

use thiserror::Error;

/// Main Safeguard error type
///
/// Text-processing operations never fail; this type covers startup
/// (seed data, static patterns, configuration) and the dynamic rule supply.
#[derive(Debug, Error)]
pub enum SafeguardError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A regular expression failed to compile
    #[error("Invalid pattern '{pattern}': {message}")]
    Pattern { pattern: String, message: String },

    /// Seed word lists could not be loaded
    #[error("Seed data error: {0}")]
    Seed(String),

    /// The dynamic rule source could not be reached or returned garbage
    #[error("Rule source error: {0}")]
    RuleSource(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),
}

impl SafeguardError {
    /// Build a pattern error from a regex compilation failure
    pub fn pattern(pattern: impl Into<String>, err: &regex::Error) -> Self {
        SafeguardError::Pattern {
            pattern: pattern.into(),
            message: err.to_string(),
        }
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for SafeguardError {
    fn from(err: std::io::Error) -> Self {
        SafeguardError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for SafeguardError {
    fn from(err: serde_json::Error) -> Self {
        SafeguardError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for SafeguardError {
    fn from(err: toml::de::Error) -> Self {
        SafeguardError::Configuration(format!("TOML parse error: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_safeguard_error_display() {
        let err = SafeguardError::Configuration("Invalid config".to_string());
        assert_eq!(err.to_string(), "Configuration error: Invalid config");
    }

    #[test]
    fn test_pattern_error_carries_pattern() {
        let regex_err = regex::Regex::new("(unclosed").unwrap_err();
        let err = SafeguardError::pattern("(unclosed", &regex_err);
        assert!(matches!(err, SafeguardError::Pattern { .. }));
        assert!(err.to_string().contains("(unclosed"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let err: SafeguardError = io_err.into();
        assert!(matches!(err, SafeguardError::Io(_)));
    }

    #[test]
    fn test_serde_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let err: SafeguardError = json_err.into();
        assert!(matches!(err, SafeguardError::Serialization(_)));
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_err = toml::from_str::<toml::Value>("invalid = toml = syntax").unwrap_err();
        let err: SafeguardError = toml_err.into();
        assert!(matches!(err, SafeguardError::Configuration(_)));
        assert!(err.to_string().contains("TOML parse error"));
    }

    #[test]
    fn test_safeguard_error_implements_std_error() {
        let err = SafeguardError::RuleSource("connection refused".to_string());
        let _: &dyn std::error::Error = &err;
    }
}
