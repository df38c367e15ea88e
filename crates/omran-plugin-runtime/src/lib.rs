//! # Omran Plugin Runtime
//!
//! Registry, lifecycle and hook dispatch for Omran plugins.
//!
//! ## Features
//!
//! - **Plugin Registry**: registration with last-write-wins replacement and
//!   a recorded load order
//! - **Lifecycle Management**: initialize in load order, reload one plugin,
//!   clean up everything in reverse order
//! - **Hook Dispatch**: sequential, failure-isolated dispatch of typed
//!   event hooks with results collected in load order
//! - **Config Hot Reload**: plugin config files merged into live config
//!
//! ## Example
//!
//! ```rust,no_run
//! use omran_plugin_runtime::*;
//! use omran_plugin_api::SaleRequest;
//!
//! # async fn example() {
//! let registry = PluginRegistry::new();
//!
//! // Register plugins (each must implement the Plugin trait)
//! // registry.register(Box::new(MyPlugin::new()));
//!
//! registry
//!     .initialize(InitializeOptions::with_load_order(["inventory", "sales"]))
//!     .await;
//!
//! let results = registry.dispatch_sale(&SaleRequest::single("tea", 1, 4.5)).await;
//! println!("{} plugin(s) handled the sale", results.len());
//!
//! registry.cleanup().await;
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(
    missing_docs,
    missing_debug_implementations,
    rust_2018_idioms,
    unreachable_pub
)]

pub mod error;
pub mod hot_reload;
pub mod options;
pub mod registry;

pub use error::{PluginRuntimeError, Result};
pub use hot_reload::{ConfigWatcher, ReloadEvent};
pub use options::InitializeOptions;
pub use registry::{PluginEntry, PluginRegistry, RegistryState};

// Re-export plugin API types for convenience
pub use omran_plugin_api::{
    HookName, HookRequest, HookResponse, Plugin, PluginConfig, PluginError, PluginInfo,
    PluginState, PluginSummary,
};

/// Prelude module with commonly used types
pub mod prelude {
    pub use crate::error::{PluginRuntimeError, Result};
    pub use crate::options::InitializeOptions;
    pub use crate::registry::{PluginEntry, PluginRegistry, RegistryState};
    pub use omran_plugin_api::prelude::*;
}
