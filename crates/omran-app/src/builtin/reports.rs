//! Reports plugin

use crate::store::{round_money, BusinessStore};
use async_trait::async_trait;
use omran_plugin_api::{
    HookName, Plugin, PluginConfig, ReportData, ReportKind, ReportParams, ReportRequest,
    ReportResult, Result, SalesReport, StockLine, SummaryReport,
};
use tracing::debug;

/// Plugin name
pub const NAME: &str = "reports";

/// Handles `onReportGenerate` from the shared store
#[derive(Debug)]
pub struct ReportsPlugin {
    store: BusinessStore,
    default_limit: Option<usize>,
}

impl ReportsPlugin {
    /// Create the plugin over a store
    pub fn new(store: BusinessStore) -> Self {
        Self {
            store,
            default_limit: None,
        }
    }

    fn sales_report(&self, params: &ReportParams) -> SalesReport {
        let mut report = SalesReport::default();

        for sale in self
            .store
            .sales()
            .into_iter()
            .filter(|sale| params.contains(sale.recorded_at))
        {
            report.sale_count += 1;
            report.revenue += sale.total;
            for line in &sale.lines {
                *report.units_by_item.entry(line.item.clone()).or_default() +=
                    u64::from(line.quantity);
            }
        }

        report.revenue = round_money(report.revenue);
        report
    }

    fn limited(&self, mut rows: Vec<StockLine>, params: &ReportParams) -> Vec<StockLine> {
        if let Some(limit) = params.limit.or(self.default_limit) {
            rows.truncate(limit);
        }
        rows
    }

    fn build(&self, request: &ReportRequest) -> ReportData {
        let params = &request.params;
        match request.kind {
            ReportKind::Sales => ReportData::Sales(self.sales_report(params)),
            ReportKind::Inventory => {
                ReportData::Inventory(self.limited(self.store.stock_levels(), params))
            }
            ReportKind::LowStock => {
                let mut rows = self.store.low_stock();
                rows.sort_by_key(|row| row.quantity);
                ReportData::LowStock(self.limited(rows, params))
            }
            ReportKind::Summary => {
                let stats = self.store.stats();
                ReportData::Summary(SummaryReport {
                    sale_count: stats.sale_count,
                    revenue: stats.revenue,
                    item_count: stats.item_count,
                    low_stock_count: stats.low_stock_count,
                })
            }
        }
    }
}

#[async_trait]
impl Plugin for ReportsPlugin {
    fn name(&self) -> &str {
        NAME
    }

    fn version(&self) -> &str {
        env!("CARGO_PKG_VERSION")
    }

    fn description(&self) -> &str {
        "Sales, stock and summary reports"
    }

    fn author(&self) -> &str {
        "Omran"
    }

    fn dependencies(&self) -> Vec<String> {
        vec![
            super::inventory::NAME.to_string(),
            super::sales::NAME.to_string(),
        ]
    }

    fn hooks(&self) -> Vec<HookName> {
        vec![HookName::OnInit, HookName::OnReportGenerate]
    }

    async fn on_init(&mut self, config: &PluginConfig) -> Result<()> {
        self.default_limit = config.get_as::<usize>("default_limit")?;
        Ok(())
    }

    async fn on_report_generate(&self, request: &ReportRequest) -> Result<Option<ReportResult>> {
        debug!(kind = %request.kind, "Generating report");
        Ok(Some(ReportResult::generated(self.build(request))))
    }
}
