//! Application error types

use omran_config::ConfigError;
use omran_plugin_api::PluginError;

/// Application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Invalid application configuration
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A plugin factory failed to build its plugin
    #[error("Plugin factory '{plugin}' failed: {source}")]
    Factory {
        /// Factory name
        plugin: String,
        /// Error returned by the factory
        #[source]
        source: PluginError,
    },

    /// Bootstrap failed for another reason
    #[error("Bootstrap failed: {0}")]
    Bootstrap(String),

    /// Bootstrap kept failing until the retry budget ran out
    #[error("Bootstrap gave up after {attempts} attempt(s): {last_error}")]
    RetriesExhausted {
        /// Attempts made, the first one included
        attempts: u32,
        /// Error of the final attempt
        last_error: Box<AppError>,
    },
}

/// Result type for application operations
pub type Result<T> = std::result::Result<T, AppError>;

impl AppError {
    /// Create a bootstrap error
    pub fn bootstrap(msg: impl std::fmt::Display) -> Self {
        Self::Bootstrap(msg.to_string())
    }
}

/// Stock change rejected by the [`BusinessStore`](crate::BusinessStore)
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StockError {
    /// Not enough stock for the requested change
    #[error("insufficient stock for '{item}': {available} available, {requested} requested")]
    Insufficient {
        /// Item identifier
        item: String,
        /// Current stock level
        available: i64,
        /// Quantity the change would remove
        requested: i64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retries_exhausted_display() {
        let err = AppError::RetriesExhausted {
            attempts: 3,
            last_error: Box::new(AppError::bootstrap("store offline")),
        };
        assert_eq!(
            err.to_string(),
            "Bootstrap gave up after 3 attempt(s): Bootstrap failed: store offline"
        );
    }

    #[test]
    fn test_stock_error_display() {
        let err = StockError::Insufficient {
            item: "tea".into(),
            available: 2,
            requested: 5,
        };
        assert!(err.to_string().contains("2 available, 5 requested"));
    }
}
