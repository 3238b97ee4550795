//! Configuration-specific error types.

/// Errors that can occur while loading site configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to deserialize configuration
    #[error("Failed to deserialize configuration: {0}")]
    DeserializationFailed(String),

    /// A value parsed but is outside its accepted range
    #[error("Invalid configuration value for {field}: {reason}")]
    Invalid { field: String, reason: String },
}
