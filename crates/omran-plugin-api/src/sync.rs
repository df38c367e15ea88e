//! Data sync hook payloads (`onDataSync`)

use serde::{Deserialize, Serialize};

/// A generic data-sync event raised by the application
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SyncRequest {
    /// Who raised the sync (e.g. "startup", "manual", "backup")
    pub source: String,

    /// Entity collections affected; empty means all
    #[serde(default)]
    pub entities: Vec<String>,

    /// Arbitrary sync payload
    #[serde(default)]
    pub payload: serde_json::Value,
}

impl SyncRequest {
    /// Create a sync request for all entities
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            entities: Vec::new(),
            payload: serde_json::Value::Null,
        }
    }

    /// Restrict the sync to one entity collection
    pub fn entity(mut self, entity: impl Into<String>) -> Self {
        self.entities.push(entity.into());
        self
    }

    /// Whether the sync concerns the given entity collection
    pub fn covers(&self, entity: &str) -> bool {
        self.entities.is_empty() || self.entities.iter().any(|e| e == entity)
    }
}

/// One plugin's contribution to a data sync
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncResult {
    /// Contributing plugin
    pub plugin: String,

    /// Whether the plugin synced successfully
    pub success: bool,

    /// Number of records the plugin touched or reports
    #[serde(default)]
    pub records: usize,

    /// Plugin-specific details
    #[serde(default)]
    pub details: serde_json::Value,
}

impl SyncResult {
    /// A successful sync contribution
    pub fn ok(plugin: impl Into<String>, records: usize) -> Self {
        Self {
            plugin: plugin.into(),
            success: true,
            records,
            details: serde_json::Value::Null,
        }
    }

    /// Attach details
    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = details;
        self
    }
}
