//! # Omran Plugin API
//!
//! This crate provides the SDK for writing Omran feature plugins.
//!
//! A plugin is a named unit of optional functionality that implements any
//! subset of a fixed hook vocabulary:
//!
//! - **Lifecycle hooks**: `onInit`, `onDestroy`
//! - **Event hooks**: `onDataSync`, `onSaleProcess`, `onInventoryUpdate`,
//!   `onReportGenerate`
//!
//! Every event hook has a typed request and result (see [`sale`],
//! [`inventory`], [`report`] and [`sync`]).
//!
//! ## Example
//!
//! ```rust,no_run
//! use omran_plugin_api::prelude::*;
//!
//! #[derive(Debug)]
//! struct Greeter;
//!
//! #[async_trait]
//! impl Plugin for Greeter {
//!     fn name(&self) -> &str { "greeter" }
//!     fn version(&self) -> &str { "1.0.0" }
//!
//!     fn hooks(&self) -> Vec<HookName> {
//!         vec![HookName::OnSaleProcess]
//!     }
//!
//!     async fn on_sale_process(
//!         &self,
//!         sale: &SaleRequest,
//!     ) -> Result<Option<SaleResult>, PluginError> {
//!         Ok(Some(SaleResult::completed("S-1", sale.subtotal())))
//!     }
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(
    missing_docs,
    missing_debug_implementations,
    rust_2018_idioms,
    unreachable_pub
)]

pub mod config;
pub mod error;
pub mod hook;
pub mod inventory;
pub mod plugin;
pub mod report;
pub mod sale;
pub mod sync;

#[cfg(feature = "testing")]
pub mod testing;

// Re-export commonly used types
pub use config::PluginConfig;
pub use error::{PluginError, Result};
pub use hook::{DispatchMode, HookName, HookRequest, HookResponse};
pub use inventory::{InventoryResult, InventoryUpdate};
pub use plugin::{Plugin, PluginInfo, PluginMetadata, PluginState, PluginSummary};
pub use report::{
    ReportData, ReportKind, ReportParams, ReportRequest, ReportResult, SalesReport, StockLine,
    SummaryReport,
};
pub use sale::{PaymentMethod, SaleLine, SaleRequest, SaleResult};
pub use sync::{SyncRequest, SyncResult};

/// Prelude module with commonly used types
pub mod prelude {
    pub use crate::config::PluginConfig;
    pub use crate::error::PluginError;
    pub use crate::hook::{DispatchMode, HookName, HookRequest, HookResponse};
    pub use crate::inventory::{InventoryResult, InventoryUpdate};
    pub use crate::plugin::{Plugin, PluginMetadata};
    pub use crate::report::{ReportData, ReportKind, ReportParams, ReportRequest, ReportResult};
    pub use crate::sale::{PaymentMethod, SaleLine, SaleRequest, SaleResult};
    pub use crate::sync::{SyncRequest, SyncResult};
    pub use async_trait::async_trait;
}
