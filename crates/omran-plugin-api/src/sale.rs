//! Sale hook payloads (`onSaleProcess`)

use crate::error::{PluginError, Result};
use serde::{Deserialize, Serialize};

/// How the customer paid
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    /// Cash on the counter
    #[default]
    Cash,
    /// Card payment
    Card,
    /// Deferred payment on the customer's account
    Credit,
    /// Payment by check
    Check,
}

/// One line of a sale
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleLine {
    /// Item identifier
    pub item: String,

    /// Quantity sold
    pub quantity: u32,

    /// Price per unit
    pub unit_price: f64,
}

impl SaleLine {
    /// Create a sale line
    pub fn new(item: impl Into<String>, quantity: u32, unit_price: f64) -> Self {
        Self {
            item: item.into(),
            quantity,
            unit_price,
        }
    }

    /// Quantity times unit price
    pub fn amount(&self) -> f64 {
        f64::from(self.quantity) * self.unit_price
    }
}

/// A sale submitted for processing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleRequest {
    /// Caller-assigned sale id; generated by the handler when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sale_id: Option<String>,

    /// Sold lines
    pub lines: Vec<SaleLine>,

    /// Customer name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer: Option<String>,

    /// Absolute discount applied to the subtotal
    #[serde(default)]
    pub discount: f64,

    /// Payment method
    #[serde(default)]
    pub payment: PaymentMethod,
}

impl SaleRequest {
    /// Create a sale from its lines
    pub fn new(lines: Vec<SaleLine>) -> Self {
        Self {
            sale_id: None,
            lines,
            customer: None,
            discount: 0.0,
            payment: PaymentMethod::default(),
        }
    }

    /// Create a single-line sale
    pub fn single(item: impl Into<String>, quantity: u32, unit_price: f64) -> Self {
        Self::new(vec![SaleLine::new(item, quantity, unit_price)])
    }

    /// Set the customer
    pub fn with_customer(mut self, customer: impl Into<String>) -> Self {
        self.customer = Some(customer.into());
        self
    }

    /// Set the discount
    pub fn with_discount(mut self, discount: f64) -> Self {
        self.discount = discount;
        self
    }

    /// Set the payment method
    pub fn with_payment(mut self, payment: PaymentMethod) -> Self {
        self.payment = payment;
        self
    }

    /// Sum of all line amounts
    pub fn subtotal(&self) -> f64 {
        self.lines.iter().map(SaleLine::amount).sum()
    }

    /// Check the sale is well formed
    pub fn validate(&self) -> Result<()> {
        if self.lines.is_empty() {
            return Err(PluginError::validation("sale has no lines"));
        }

        for line in &self.lines {
            if line.item.trim().is_empty() {
                return Err(PluginError::validation("sale line has an empty item"));
            }
            if line.quantity == 0 {
                return Err(PluginError::validation(format!(
                    "quantity for '{}' must be positive",
                    line.item
                )));
            }
            if !line.unit_price.is_finite() || line.unit_price < 0.0 {
                return Err(PluginError::validation(format!(
                    "price for '{}' must be a non-negative number",
                    line.item
                )));
            }
        }

        if !self.discount.is_finite() || self.discount < 0.0 {
            return Err(PluginError::validation("discount must be non-negative"));
        }
        if self.discount > self.subtotal() {
            return Err(PluginError::validation("discount exceeds the sale subtotal"));
        }

        Ok(())
    }
}

/// Outcome of processing a sale
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleResult {
    /// Whether the sale was accepted
    pub success: bool,

    /// Id of the recorded sale
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sale_id: Option<String>,

    /// Amount charged, taxes included
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<f64>,

    /// Failure reason
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SaleResult {
    /// A recorded sale
    pub fn completed(sale_id: impl Into<String>, total: f64) -> Self {
        Self {
            success: true,
            sale_id: Some(sale_id.into()),
            total: Some(total),
            error: None,
        }
    }

    /// A rejected sale
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            sale_id: None,
            total: None,
            error: Some(error.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subtotal() {
        let sale = SaleRequest::new(vec![
            SaleLine::new("tea", 2, 4.5),
            SaleLine::new("rice", 1, 12.0),
        ]);
        assert_eq!(sale.subtotal(), 21.0);
    }

    #[test]
    fn test_validate_rejects_bad_sales() {
        assert!(SaleRequest::new(vec![]).validate().is_err());
        assert!(SaleRequest::single("tea", 0, 1.0).validate().is_err());
        assert!(SaleRequest::single("tea", 1, -1.0).validate().is_err());
        assert!(SaleRequest::single("  ", 1, 1.0).validate().is_err());
        assert!(SaleRequest::single("tea", 1, 5.0)
            .with_discount(6.0)
            .validate()
            .is_err());
        assert!(SaleRequest::single("tea", 1, 5.0)
            .with_discount(2.0)
            .validate()
            .is_ok());
    }

    #[test]
    fn test_request_deserialize_defaults() {
        let sale: SaleRequest = serde_json::from_value(serde_json::json!({
            "lines": [{"item": "X", "quantity": 1, "unit_price": 3.0}]
        }))
        .unwrap();

        assert_eq!(sale.payment, PaymentMethod::Cash);
        assert_eq!(sale.discount, 0.0);
        assert!(sale.sale_id.is_none());
    }

    #[test]
    fn test_result_serialization_skips_empty_fields() {
        let json = serde_json::to_value(SaleResult::completed("S1", 10.0)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"success": true, "sale_id": "S1", "total": 10.0})
        );

        let json = serde_json::to_value(SaleResult::failed("no stock")).unwrap();
        assert_eq!(json, serde_json::json!({"success": false, "error": "no stock"}));
    }
}
