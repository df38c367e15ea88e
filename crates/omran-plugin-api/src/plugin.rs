//! Core plugin trait and types

use crate::config::PluginConfig;
use crate::error::Result;
use crate::hook::HookName;
use crate::inventory::{InventoryResult, InventoryUpdate};
use crate::report::{ReportRequest, ReportResult};
use crate::sale::{SaleRequest, SaleResult};
use crate::sync::{SyncRequest, SyncResult};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Core plugin trait that all plugins must implement
///
/// Every hook method has a no-op default. The registry only calls the hooks
/// a plugin lists in [`Plugin::hooks`]; an event hook that returns
/// `Ok(None)` observed the event without contributing a result.
#[async_trait]
pub trait Plugin: Send + Sync + fmt::Debug {
    /// Plugin name (must be unique and non-empty)
    fn name(&self) -> &str;

    /// Plugin version
    fn version(&self) -> &str;

    /// Plugin description
    fn description(&self) -> &str {
        ""
    }

    /// Plugin author
    fn author(&self) -> &str {
        "Unknown"
    }

    /// Names of plugins this one expects to be loaded before it.
    ///
    /// Declarative only: the registry warns about unmet dependencies but
    /// never reorders plugins.
    fn dependencies(&self) -> Vec<String> {
        vec![]
    }

    /// Hook slots this plugin implements
    fn hooks(&self) -> Vec<HookName>;

    /// Initial configuration bag
    fn default_config(&self) -> PluginConfig {
        PluginConfig::new()
    }

    /// Called at registry initialization and after `on_destroy` on reload.
    ///
    /// Receives the registry's current copy of the plugin configuration.
    async fn on_init(&mut self, _config: &PluginConfig) -> Result<()> {
        Ok(())
    }

    /// Called on unregister, reload and cleanup
    async fn on_destroy(&mut self) -> Result<()> {
        Ok(())
    }

    /// Generic data-sync event
    async fn on_data_sync(&self, _request: &SyncRequest) -> Result<Option<SyncResult>> {
        Ok(None)
    }

    /// A sale was submitted
    async fn on_sale_process(&self, _sale: &SaleRequest) -> Result<Option<SaleResult>> {
        Ok(None)
    }

    /// Inventory levels changed
    async fn on_inventory_update(
        &self,
        _update: &InventoryUpdate,
    ) -> Result<Option<InventoryResult>> {
        Ok(None)
    }

    /// A report was requested
    async fn on_report_generate(&self, _request: &ReportRequest) -> Result<Option<ReportResult>> {
        Ok(None)
    }

    /// Whether the plugin implements a hook
    fn implements(&self, hook: HookName) -> bool {
        self.hooks().contains(&hook)
    }

    /// Get plugin metadata
    fn metadata(&self) -> PluginMetadata {
        PluginMetadata {
            name: self.name().to_string(),
            version: self.version().to_string(),
            description: self.description().to_string(),
            author: self.author().to_string(),
            dependencies: self.dependencies(),
        }
    }
}

/// Plugin metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginMetadata {
    /// Plugin name
    pub name: String,

    /// Plugin version
    pub version: String,

    /// Plugin description
    pub description: String,

    /// Plugin author
    pub author: String,

    /// Declared dependencies (plugin names)
    #[serde(default)]
    pub dependencies: Vec<String>,
}

impl PluginMetadata {
    /// Display projection
    pub fn summary(&self) -> PluginSummary {
        PluginSummary {
            name: self.name.clone(),
            version: self.version.clone(),
            description: self.description.clone(),
        }
    }
}

/// `{name, version, description}` projection used for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginSummary {
    /// Plugin name
    pub name: String,
    /// Plugin version
    pub version: String,
    /// Plugin description
    pub description: String,
}

/// Plugin information (runtime state)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PluginInfo {
    /// Plugin metadata
    #[serde(flatten)]
    pub metadata: PluginMetadata,

    /// Implemented hooks
    pub hooks: Vec<HookName>,

    /// Plugin state
    pub state: PluginState,

    /// Live configuration
    pub config: PluginConfig,

    /// When the plugin was registered
    pub registered_at: DateTime<Utc>,

    /// When `on_init` last completed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initialized_at: Option<DateTime<Utc>>,
}

/// Plugin state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PluginState {
    /// Registered, `on_init` not yet run
    Registered,

    /// `on_init` completed
    Initialized,

    /// A lifecycle hook failed
    Failed(String),
}

impl PluginState {
    /// Check if the plugin is initialized
    pub fn is_initialized(&self) -> bool {
        matches!(self, PluginState::Initialized)
    }

    /// Check if the plugin has failed
    pub fn is_failed(&self) -> bool {
        matches!(self, PluginState::Failed(_))
    }
}

impl fmt::Display for PluginState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PluginState::Registered => write!(f, "registered"),
            PluginState::Initialized => write!(f, "initialized"),
            PluginState::Failed(msg) => write!(f, "failed: {}", msg),
        }
    }
}
