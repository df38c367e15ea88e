//! System status snapshot

use crate::store::StoreStats;
use crate::AppState;
use omran_plugin_api::PluginSummary;
use omran_plugin_runtime::RegistryState;
use serde::{Deserialize, Serialize};

/// Point-in-time view of the application and its plugins
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemStatus {
    /// Application name
    pub app: String,

    /// Whether the plugin registry finished initializing
    pub initialized: bool,

    /// Application lifecycle state
    pub state: AppState,

    /// Registry lifecycle state
    pub registry_state: RegistryState,

    /// Registered plugins, in load order
    pub plugins: Vec<PluginSummary>,

    /// Recorded load order
    pub load_order: Vec<String>,

    /// Bootstrap attempts since the application was built
    pub bootstrap_attempts: u32,

    /// Business store counters
    pub store: StoreStats,
}
