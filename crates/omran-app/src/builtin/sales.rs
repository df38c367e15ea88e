//! Sales plugin: pricing, stock reservation and the sales log

use crate::store::{round_money, BusinessStore, SaleRecord};
use async_trait::async_trait;
use chrono::Utc;
use omran_plugin_api::{
    HookName, Plugin, PluginConfig, PluginError, Result, SaleRequest, SaleResult,
};
use serde_json::json;
use tracing::{debug, info};
use uuid::Uuid;

/// Plugin name
pub const NAME: &str = "sales";

/// Handles `onSaleProcess`
#[derive(Debug)]
pub struct SalesPlugin {
    store: BusinessStore,
    settings: SalesSettings,
}

#[derive(Debug, Clone, PartialEq)]
struct SalesSettings {
    tax_rate: f64,
    track_inventory: bool,
}

impl Default for SalesSettings {
    fn default() -> Self {
        Self {
            tax_rate: 0.0,
            track_inventory: true,
        }
    }
}

impl SalesSettings {
    fn from_config(config: &PluginConfig) -> Result<Self> {
        let defaults = Self::default();

        let tax_rate = match config.get("tax_rate") {
            None => defaults.tax_rate,
            Some(_) => config
                .get_f64("tax_rate")
                .filter(|rate| rate.is_finite() && (0.0..=1.0).contains(rate))
                .ok_or_else(|| PluginError::config("tax_rate must be a number between 0 and 1"))?,
        };

        Ok(Self {
            tax_rate,
            track_inventory: config
                .get_bool("track_inventory")
                .unwrap_or(defaults.track_inventory),
        })
    }
}

/// Amounts of a priced sale
#[derive(Debug, Clone, Copy, PartialEq)]
struct Pricing {
    subtotal: f64,
    discount: f64,
    tax: f64,
    total: f64,
}

impl Pricing {
    fn compute(sale: &SaleRequest, tax_rate: f64) -> Self {
        let subtotal = round_money(sale.subtotal());
        let discount = round_money(sale.discount);
        let tax = round_money((subtotal - discount) * tax_rate);

        Self {
            subtotal,
            discount,
            tax,
            total: round_money(subtotal - discount + tax),
        }
    }
}

impl SalesPlugin {
    /// Create the plugin over a store
    pub fn new(store: BusinessStore) -> Self {
        Self {
            store,
            settings: SalesSettings::default(),
        }
    }

    fn process(&self, sale: &SaleRequest) -> std::result::Result<SaleRecord, String> {
        sale.validate().map_err(|e| e.to_string())?;

        let pricing = Pricing::compute(sale, self.settings.tax_rate);

        if self.settings.track_inventory {
            self.store.reserve(&sale.lines).map_err(|e| e.to_string())?;
        }

        Ok(SaleRecord {
            sale_id: sale
                .sale_id
                .clone()
                .unwrap_or_else(|| format!("S-{}", Uuid::new_v4().simple())),
            lines: sale.lines.clone(),
            customer: sale.customer.clone(),
            payment: sale.payment,
            subtotal: pricing.subtotal,
            discount: pricing.discount,
            tax: pricing.tax,
            total: pricing.total,
            recorded_at: Utc::now(),
        })
    }
}

#[async_trait]
impl Plugin for SalesPlugin {
    fn name(&self) -> &str {
        NAME
    }

    fn version(&self) -> &str {
        env!("CARGO_PKG_VERSION")
    }

    fn description(&self) -> &str {
        "Prices sales, reserves stock and records the sales log"
    }

    fn author(&self) -> &str {
        "Omran"
    }

    fn dependencies(&self) -> Vec<String> {
        vec![super::inventory::NAME.to_string()]
    }

    fn hooks(&self) -> Vec<HookName> {
        vec![HookName::OnInit, HookName::OnSaleProcess]
    }

    fn default_config(&self) -> PluginConfig {
        let mut config = PluginConfig::new();
        config.insert("tax_rate", json!(0.0));
        config.insert("track_inventory", json!(true));
        config
    }

    async fn on_init(&mut self, config: &PluginConfig) -> Result<()> {
        self.settings = SalesSettings::from_config(config)?;
        info!(
            plugin = NAME,
            tax_rate = self.settings.tax_rate,
            track_inventory = self.settings.track_inventory,
            "Sales plugin initialized"
        );
        Ok(())
    }

    async fn on_sale_process(&self, sale: &SaleRequest) -> Result<Option<SaleResult>> {
        let result = match self.process(sale) {
            Ok(record) => {
                let result = SaleResult::completed(&record.sale_id, record.total);
                debug!(sale_id = %record.sale_id, total = record.total, "Sale recorded");
                self.store.record_sale(record);
                result
            }
            Err(reason) => {
                debug!(reason = %reason, "Sale rejected");
                SaleResult::failed(reason)
            }
        };

        Ok(Some(result))
    }
}
