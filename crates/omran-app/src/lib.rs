//! # Omran App
//!
//! Composition root of the Omran system:
//! - Plugin factories and bootstrap with retry
//! - Built-in inventory, sales, reports and monitoring plugins
//! - Domain facade (sales, inventory, reports, data sync)
//! - Localized failure messages
//! - System status snapshots

#![forbid(unsafe_code)]
#![warn(
    missing_docs,
    missing_debug_implementations,
    rust_2018_idioms,
    unreachable_pub
)]

pub mod app;
pub mod builtin;
pub mod error;
pub mod factory;
pub mod messages;
pub mod status;
pub mod store;

pub use app::{AppBuilder, OmranApp};
pub use builtin::builtin_factories;
pub use error::{AppError, Result, StockError};
pub use factory::{PluginFactory, PluginServices};
pub use messages::Message;
pub use status::SystemStatus;
pub use store::{BusinessStore, SaleRecord, StoreStats};

use serde::{Deserialize, Serialize};

/// Application state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppState {
    /// Built, not bootstrapped yet
    Created,
    /// Bootstrap is running
    Starting,
    /// Plugins are registered and initialized
    Running,
    /// A full plugin reload is in progress
    Reloading,
    /// Bootstrap gave up
    Failed,
    /// Shut down
    Stopped,
}

/// Re-export commonly used types
pub mod prelude {
    pub use crate::app::{AppBuilder, OmranApp};
    pub use crate::error::{AppError, Result};
    pub use crate::factory::{PluginFactory, PluginServices};
    pub use crate::store::BusinessStore;
    pub use crate::AppState;
    pub use omran_plugin_api::prelude::*;
}
