//! Report hook payloads (`onReportGenerate`)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Kind of report requested
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportKind {
    /// Sales volume and revenue
    Sales,
    /// Current stock levels
    Inventory,
    /// Items at or below the low-stock threshold
    LowStock,
    /// Combined counters
    Summary,
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportKind::Sales => write!(f, "sales"),
            ReportKind::Inventory => write!(f, "inventory"),
            ReportKind::LowStock => write!(f, "low_stock"),
            ReportKind::Summary => write!(f, "summary"),
        }
    }
}

impl FromStr for ReportKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sales" => Ok(ReportKind::Sales),
            "inventory" => Ok(ReportKind::Inventory),
            "low_stock" | "low-stock" => Ok(ReportKind::LowStock),
            "summary" => Ok(ReportKind::Summary),
            other => Err(format!("unknown report kind: {other}")),
        }
    }
}

/// Optional report filters
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportParams {
    /// Only include records at or after this time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<DateTime<Utc>>,

    /// Only include records before this time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<DateTime<Utc>>,

    /// Cap on the number of rows returned
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
}

impl ReportParams {
    /// Whether a timestamp falls inside the `[from, to)` window
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.from.map_or(true, |from| at >= from) && self.to.map_or(true, |to| at < to)
    }
}

/// A report request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRequest {
    /// Report kind
    pub kind: ReportKind,

    /// Filters
    #[serde(default)]
    pub params: ReportParams,
}

impl ReportRequest {
    /// Request a report without filters
    pub fn new(kind: ReportKind) -> Self {
        Self {
            kind,
            params: ReportParams::default(),
        }
    }

    /// Attach filters
    pub fn with_params(mut self, params: ReportParams) -> Self {
        self.params = params;
        self
    }
}

/// One stock row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockLine {
    /// Item identifier
    pub item: String,
    /// Quantity on hand
    pub quantity: i64,
}

/// Sales report body
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SalesReport {
    /// Number of sales in the window
    pub sale_count: usize,
    /// Sum of sale totals
    pub revenue: f64,
    /// Units sold per item
    pub units_by_item: BTreeMap<String, u64>,
}

/// Summary report body
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SummaryReport {
    /// Number of recorded sales
    pub sale_count: usize,
    /// Sum of sale totals
    pub revenue: f64,
    /// Number of distinct stocked items
    pub item_count: usize,
    /// Number of items at or below the low-stock threshold
    pub low_stock_count: usize,
}

/// Report body, one variant per [`ReportKind`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "rows", rename_all = "snake_case")]
pub enum ReportData {
    /// Sales report
    Sales(SalesReport),
    /// Stock levels
    Inventory(Vec<StockLine>),
    /// Low stock items
    LowStock(Vec<StockLine>),
    /// Summary counters
    Summary(SummaryReport),
}

impl ReportData {
    /// Kind of report this body belongs to
    pub fn kind(&self) -> ReportKind {
        match self {
            ReportData::Sales(_) => ReportKind::Sales,
            ReportData::Inventory(_) => ReportKind::Inventory,
            ReportData::LowStock(_) => ReportKind::LowStock,
            ReportData::Summary(_) => ReportKind::Summary,
        }
    }
}

/// Outcome of a report request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportResult {
    /// Whether the report was generated
    pub success: bool,

    /// Generation time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_at: Option<DateTime<Utc>>,

    /// Report body
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<ReportData>,

    /// Failure reason
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ReportResult {
    /// A generated report, stamped with the current time
    pub fn generated(data: ReportData) -> Self {
        Self {
            success: true,
            generated_at: Some(Utc::now()),
            data: Some(data),
            error: None,
        }
    }

    /// A failed report
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            generated_at: None,
            data: None,
            error: Some(error.into()),
        }
    }
}
