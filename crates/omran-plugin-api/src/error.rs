//! Plugin error types

use std::fmt;

/// Plugin error type
#[derive(Debug, thiserror::Error)]
pub enum PluginError {
    /// Initialization failed
    #[error("Initialization failed: {0}")]
    InitError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Runtime error
    #[error("Runtime error: {0}")]
    RuntimeError(String),

    /// Request payload rejected by the plugin
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Invalid state
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

/// Result type for plugin operations
pub type Result<T> = std::result::Result<T, PluginError>;

impl PluginError {
    /// Create a new initialization error
    pub fn init(msg: impl fmt::Display) -> Self {
        Self::InitError(msg.to_string())
    }

    /// Create a new configuration error
    pub fn config(msg: impl fmt::Display) -> Self {
        Self::ConfigError(msg.to_string())
    }

    /// Create a new runtime error
    pub fn runtime(msg: impl fmt::Display) -> Self {
        Self::RuntimeError(msg.to_string())
    }

    /// Create a new validation error
    pub fn validation(msg: impl fmt::Display) -> Self {
        Self::ValidationError(msg.to_string())
    }

    /// Create a new invalid state error
    pub fn invalid_state(msg: impl fmt::Display) -> Self {
        Self::InvalidState(msg.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = PluginError::init("test");
        assert!(matches!(err, PluginError::InitError(_)));

        let err = PluginError::config("test");
        assert!(matches!(err, PluginError::ConfigError(_)));

        let err = PluginError::validation("test");
        assert!(matches!(err, PluginError::ValidationError(_)));
    }

    #[test]
    fn test_error_display() {
        let err = PluginError::InitError("store unavailable".to_string());
        assert_eq!(err.to_string(), "Initialization failed: store unavailable");

        let err = PluginError::validation("quantity must be positive");
        assert_eq!(err.to_string(), "Validation error: quantity must be positive");
    }
}
