//! Shared in-memory business data

use crate::error::StockError;
use chrono::{DateTime, Utc};
use omran_plugin_api::{PaymentMethod, SaleLine, StockLine};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Default low-stock threshold until the inventory plugin configures one
pub const DEFAULT_LOW_STOCK_THRESHOLD: i64 = 5;

/// A recorded sale
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleRecord {
    /// Sale id
    pub sale_id: String,
    /// Sold lines
    pub lines: Vec<SaleLine>,
    /// Customer, if known
    pub customer: Option<String>,
    /// Payment method
    pub payment: PaymentMethod,
    /// Sum of line amounts
    pub subtotal: f64,
    /// Discount applied to the subtotal
    pub discount: f64,
    /// Tax charged on the discounted subtotal
    pub tax: f64,
    /// Amount charged
    pub total: f64,
    /// When the sale was recorded
    pub recorded_at: DateTime<Utc>,
}

/// Store counters
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreStats {
    /// Recorded sales
    pub sale_count: usize,
    /// Sum of sale totals
    pub revenue: f64,
    /// Items with a stock entry
    pub item_count: usize,
    /// Items at or below the low-stock threshold
    pub low_stock_count: usize,
}

/// In-memory sales log and stock table shared by the built-in plugins
///
/// Cheap to clone; all clones share the same data.
#[derive(Debug, Clone, Default)]
pub struct BusinessStore {
    inner: Arc<RwLock<StoreInner>>,
}

#[derive(Debug)]
struct StoreInner {
    stock: BTreeMap<String, i64>,
    sales: Vec<SaleRecord>,
    low_stock_threshold: i64,
}

impl Default for StoreInner {
    fn default() -> Self {
        Self {
            stock: BTreeMap::new(),
            sales: Vec::new(),
            low_stock_threshold: DEFAULT_LOW_STOCK_THRESHOLD,
        }
    }
}

impl BusinessStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Stock level of one item
    pub fn stock(&self, item: &str) -> Option<i64> {
        self.inner.read().stock.get(item).copied()
    }

    /// All stock levels, ordered by item
    pub fn stock_levels(&self) -> Vec<StockLine> {
        self.inner
            .read()
            .stock
            .iter()
            .map(|(item, &quantity)| StockLine {
                item: item.clone(),
                quantity,
            })
            .collect()
    }

    /// Items at or below the low-stock threshold, ordered by item
    pub fn low_stock(&self) -> Vec<StockLine> {
        let inner = self.inner.read();
        inner
            .stock
            .iter()
            .filter(|(_, &quantity)| quantity <= inner.low_stock_threshold)
            .map(|(item, &quantity)| StockLine {
                item: item.clone(),
                quantity,
            })
            .collect()
    }

    /// Current low-stock threshold
    pub fn low_stock_threshold(&self) -> i64 {
        self.inner.read().low_stock_threshold
    }

    /// Set the low-stock threshold
    pub fn set_low_stock_threshold(&self, threshold: i64) {
        self.inner.write().low_stock_threshold = threshold;
    }

    /// Whether a stock level counts as low
    pub fn is_low(&self, quantity: i64) -> bool {
        quantity <= self.low_stock_threshold()
    }

    /// Set the stock of an item the store does not know yet
    ///
    /// Returns `false` and leaves the level alone if the item exists.
    pub fn seed_stock(&self, item: impl Into<String>, quantity: i64) -> bool {
        let mut inner = self.inner.write();
        match inner.stock.entry(item.into()) {
            std::collections::btree_map::Entry::Vacant(slot) => {
                slot.insert(quantity);
                true
            }
            std::collections::btree_map::Entry::Occupied(_) => false,
        }
    }

    /// Apply a signed change to an item's stock and return the new level
    ///
    /// Unknown items start at zero. Unless `allow_negative` is set, a change
    /// that would leave the level below zero fails and changes nothing.
    pub fn adjust_stock(
        &self,
        item: &str,
        delta: i64,
        allow_negative: bool,
    ) -> Result<i64, StockError> {
        let mut inner = self.inner.write();
        let available = inner.stock.get(item).copied().unwrap_or(0);
        let new_level = available.saturating_add(delta);

        if new_level < 0 && !allow_negative {
            return Err(StockError::Insufficient {
                item: item.to_string(),
                available,
                requested: delta.saturating_neg(),
            });
        }

        inner.stock.insert(item.to_string(), new_level);
        Ok(new_level)
    }

    /// Remove the quantities of every line, all or nothing
    pub fn reserve(&self, lines: &[SaleLine]) -> Result<(), StockError> {
        let mut wanted: BTreeMap<&str, i64> = BTreeMap::new();
        for line in lines {
            *wanted.entry(line.item.as_str()).or_default() += i64::from(line.quantity);
        }

        let mut inner = self.inner.write();
        for (&item, &requested) in &wanted {
            let available = inner.stock.get(item).copied().unwrap_or(0);
            if available < requested {
                return Err(StockError::Insufficient {
                    item: item.to_string(),
                    available,
                    requested,
                });
            }
        }

        for (item, requested) in wanted {
            if let Some(level) = inner.stock.get_mut(item) {
                *level -= requested;
            }
        }

        Ok(())
    }

    /// Append a sale to the log
    pub fn record_sale(&self, record: SaleRecord) {
        self.inner.write().sales.push(record);
    }

    /// All recorded sales, oldest first
    pub fn sales(&self) -> Vec<SaleRecord> {
        self.inner.read().sales.clone()
    }

    /// Counters over the whole store
    pub fn stats(&self) -> StoreStats {
        let inner = self.inner.read();
        StoreStats {
            sale_count: inner.sales.len(),
            revenue: round_money(inner.sales.iter().map(|sale| sale.total).sum()),
            item_count: inner.stock.len(),
            low_stock_count: inner
                .stock
                .values()
                .filter(|&&quantity| quantity <= inner.low_stock_threshold)
                .count(),
        }
    }

    /// Drop all sales and stock
    pub fn clear(&self) {
        let mut inner = self.inner.write();
        inner.stock.clear();
        inner.sales.clear();
    }
}

/// Round a money amount to 2 decimals
pub fn round_money(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}
