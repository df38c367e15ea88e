//! Inventory plugin: stock level changes

use crate::store::{BusinessStore, DEFAULT_LOW_STOCK_THRESHOLD};
use async_trait::async_trait;
use omran_plugin_api::{
    HookName, InventoryResult, InventoryUpdate, Plugin, PluginConfig, PluginError, Result,
};
use serde_json::json;
use std::collections::BTreeMap;
use tracing::{debug, info};

/// Plugin name
pub const NAME: &str = "inventory";

/// Applies `onInventoryUpdate` deltas to the shared stock table
#[derive(Debug)]
pub struct InventoryPlugin {
    store: BusinessStore,
    settings: InventorySettings,
}

#[derive(Debug, Clone, PartialEq)]
struct InventorySettings {
    low_stock_threshold: i64,
    allow_negative: bool,
}

impl Default for InventorySettings {
    fn default() -> Self {
        Self {
            low_stock_threshold: DEFAULT_LOW_STOCK_THRESHOLD,
            allow_negative: false,
        }
    }
}

impl InventorySettings {
    fn from_config(config: &PluginConfig) -> Result<Self> {
        let defaults = Self::default();

        let low_stock_threshold = match config.get("low_stock_threshold") {
            None => defaults.low_stock_threshold,
            Some(_) => config
                .get_i64("low_stock_threshold")
                .filter(|threshold| *threshold >= 0)
                .ok_or_else(|| {
                    PluginError::config("low_stock_threshold must be a non-negative integer")
                })?,
        };

        Ok(Self {
            low_stock_threshold,
            allow_negative: config
                .get_bool("allow_negative")
                .unwrap_or(defaults.allow_negative),
        })
    }
}

impl InventoryPlugin {
    /// Create the plugin over a store
    pub fn new(store: BusinessStore) -> Self {
        Self {
            store,
            settings: InventorySettings::default(),
        }
    }

    fn seed_initial_stock(&self, config: &PluginConfig) -> Result<usize> {
        let Some(initial) = config.get_as::<BTreeMap<String, i64>>("initial_stock")? else {
            return Ok(0);
        };

        let mut seeded = 0;
        for (item, quantity) in initial {
            if quantity < 0 {
                return Err(PluginError::config(format!(
                    "initial stock for '{item}' cannot be negative"
                )));
            }
            if self.store.seed_stock(item, quantity) {
                seeded += 1;
            }
        }

        Ok(seeded)
    }
}

#[async_trait]
impl Plugin for InventoryPlugin {
    fn name(&self) -> &str {
        NAME
    }

    fn version(&self) -> &str {
        env!("CARGO_PKG_VERSION")
    }

    fn description(&self) -> &str {
        "Tracks stock levels and flags low stock"
    }

    fn author(&self) -> &str {
        "Omran"
    }

    fn hooks(&self) -> Vec<HookName> {
        vec![HookName::OnInit, HookName::OnInventoryUpdate]
    }

    fn default_config(&self) -> PluginConfig {
        let mut config = PluginConfig::new();
        config.insert("low_stock_threshold", json!(DEFAULT_LOW_STOCK_THRESHOLD));
        config.insert("allow_negative", json!(false));
        config
    }

    async fn on_init(&mut self, config: &PluginConfig) -> Result<()> {
        self.settings = InventorySettings::from_config(config)?;
        self.store
            .set_low_stock_threshold(self.settings.low_stock_threshold);

        let seeded = self.seed_initial_stock(config)?;
        info!(
            plugin = NAME,
            low_stock_threshold = self.settings.low_stock_threshold,
            seeded,
            "Inventory plugin initialized"
        );
        Ok(())
    }

    async fn on_inventory_update(
        &self,
        update: &InventoryUpdate,
    ) -> Result<Option<InventoryResult>> {
        if update.item.trim().is_empty() {
            return Ok(Some(InventoryResult::failed("item cannot be empty")));
        }

        let result = match self
            .store
            .adjust_stock(&update.item, update.delta, self.settings.allow_negative)
        {
            Ok(new_stock) => {
                debug!(item = %update.item, delta = update.delta, new_stock, "Stock adjusted");
                InventoryResult::applied(
                    &update.item,
                    new_stock,
                    new_stock <= self.settings.low_stock_threshold,
                )
            }
            Err(e) => InventoryResult::failed(e.to_string()).for_item(&update.item),
        };

        Ok(Some(result))
    }
}
