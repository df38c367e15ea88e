//! Built-in plugins
//!
//! All of them work on the shared [`BusinessStore`](crate::BusinessStore)
//! handed out through [`PluginServices`].

pub mod inventory;
pub mod monitoring;
pub mod reports;
pub mod sales;

pub use inventory::InventoryPlugin;
pub use monitoring::MonitoringPlugin;
pub use reports::ReportsPlugin;
pub use sales::SalesPlugin;

use crate::factory::{PluginFactory, PluginServices};

/// Factories for the four built-in plugins, in their default load order
pub fn builtin_factories() -> Vec<PluginFactory> {
    vec![
        PluginFactory::new(inventory::NAME, |services: &PluginServices| {
            Ok(Box::new(InventoryPlugin::new(services.store.clone())))
        }),
        PluginFactory::new(sales::NAME, |services: &PluginServices| {
            Ok(Box::new(SalesPlugin::new(services.store.clone())))
        }),
        PluginFactory::new(reports::NAME, |services: &PluginServices| {
            Ok(Box::new(ReportsPlugin::new(services.store.clone())))
        }),
        PluginFactory::new(monitoring::NAME, |services: &PluginServices| {
            Ok(Box::new(MonitoringPlugin::new(services.store.clone())))
        }),
    ]
}
