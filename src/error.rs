//! Application-wide error types.
//!
//! This module defines the main error type hierarchy for the site scripts.
//! Field validation failures are not errors in this sense: they are surfaced
//! inline next to their field and never propagated, and a failed delivery
//! ends in user feedback rather than an `AppError`.

pub use crate::config::ConfigError;

/// Main application error type.
///
/// This is the top-level error type that encompasses all error types
/// in the crate. It uses `thiserror` for automatic error derivation
/// and conversion.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A validation pattern failed to compile
    #[error("Pattern error: {0}")]
    Pattern(#[from] regex::Error),

    /// Required markup is missing or has the wrong element type
    #[error("Page binding error: {0}")]
    Page(String),

    /// Logger initialization errors
    #[error("Logger error: {0}")]
    Logger(String),
}

/// Convenience type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_from_config_error() {
        let config_error = ConfigError::Invalid {
            field: "contact.success_rate".to_string(),
            reason: "must be between 0 and 1".to_string(),
        };
        let app_error: AppError = config_error.into();
        assert!(matches!(app_error, AppError::Config(_)));
        assert!(app_error.to_string().contains("Configuration error"));
        assert!(app_error.to_string().contains("contact.success_rate"));
    }

    #[test]
    fn test_app_error_from_regex_error() {
        let regex_error = regex::Regex::new("(").unwrap_err();
        let app_error: AppError = regex_error.into();
        assert!(matches!(app_error, AppError::Pattern(_)));
    }

    #[test]
    fn test_app_error_page() {
        let error = AppError::Page("#contactForm not found".to_string());
        assert!(error.to_string().contains("#contactForm"));
    }

    #[test]
    fn test_app_error_logger() {
        let error = AppError::Logger("already set".to_string());
        assert_eq!(error.to_string(), "Logger error: already set");
    }
}
