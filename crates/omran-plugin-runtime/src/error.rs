//! Plugin runtime error types

use omran_plugin_api::PluginError;
use std::fmt;

/// Plugin runtime error type
///
/// Registry operations never fail with this type; it is returned by the
/// pieces around the registry (config file loading, the file watcher).
#[derive(Debug, thiserror::Error)]
pub enum PluginRuntimeError {
    /// Plugin error
    #[error("Plugin error: {0}")]
    PluginError(#[from] PluginError),

    /// Plugin not found
    #[error("Plugin not found: {0}")]
    PluginNotFound(String),

    /// Invalid state
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// File watcher error
    #[error("Watcher error: {0}")]
    WatcherError(#[from] notify::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

/// Result type for plugin runtime operations
pub type Result<T> = std::result::Result<T, PluginRuntimeError>;

impl PluginRuntimeError {
    /// Create a new plugin not found error
    pub fn not_found(name: impl fmt::Display) -> Self {
        Self::PluginNotFound(name.to_string())
    }

    /// Create a new invalid state error
    pub fn invalid_state(msg: impl fmt::Display) -> Self {
        Self::InvalidState(msg.to_string())
    }

    /// Create a new config error
    pub fn config(msg: impl fmt::Display) -> Self {
        Self::ConfigError(msg.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = PluginRuntimeError::not_found("sales");
        assert!(matches!(err, PluginRuntimeError::PluginNotFound(_)));

        let err = PluginRuntimeError::config("bad yaml");
        assert!(matches!(err, PluginRuntimeError::ConfigError(_)));
    }

    #[test]
    fn test_error_display() {
        let err = PluginRuntimeError::PluginNotFound("inventory".to_string());
        assert_eq!(err.to_string(), "Plugin not found: inventory");

        let err: PluginRuntimeError = PluginError::config("tax_rate must be a number").into();
        assert_eq!(
            err.to_string(),
            "Plugin error: Configuration error: tax_rate must be a number"
        );
    }
}
