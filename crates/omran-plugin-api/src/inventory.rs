//! Inventory hook payloads (`onInventoryUpdate`)

use serde::{Deserialize, Serialize};

/// A change to an item's stock level
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryUpdate {
    /// Item identifier
    pub item: String,

    /// Signed change in quantity
    pub delta: i64,

    /// Free-form reason (purchase, return, adjustment...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl InventoryUpdate {
    /// Create an inventory update
    pub fn new(item: impl Into<String>, delta: i64) -> Self {
        Self {
            item: item.into(),
            delta,
            reason: None,
        }
    }

    /// Attach a reason
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }
}

/// Outcome of an inventory update
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryResult {
    /// Whether the update was applied
    pub success: bool,

    /// Updated item
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item: Option<String>,

    /// Stock level after the update
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_stock: Option<i64>,

    /// Whether the item is at or below the low-stock threshold
    #[serde(default)]
    pub low_stock: bool,

    /// Failure reason
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl InventoryResult {
    /// An applied update
    pub fn applied(item: impl Into<String>, new_stock: i64, low_stock: bool) -> Self {
        Self {
            success: true,
            item: Some(item.into()),
            new_stock: Some(new_stock),
            low_stock,
            error: None,
        }
    }

    /// A rejected update
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            item: None,
            new_stock: None,
            low_stock: false,
            error: Some(error.into()),
        }
    }

    /// Name the item a failure refers to
    pub fn for_item(mut self, item: impl Into<String>) -> Self {
        self.item = Some(item.into());
        self
    }
}
