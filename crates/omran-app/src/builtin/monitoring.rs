//! Monitoring plugin: event counters and data-sync snapshots

use crate::store::BusinessStore;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use omran_plugin_api::{
    HookName, InventoryResult, InventoryUpdate, Plugin, PluginConfig, ReportRequest, ReportResult,
    Result, SaleRequest, SaleResult, SyncRequest, SyncResult,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::atomic::{AtomicU64, Ordering};

/// Plugin name
pub const NAME: &str = "monitoring";

/// Observed event counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventCounts {
    /// `onSaleProcess` events
    pub sales: u64,
    /// `onInventoryUpdate` events
    pub inventory_updates: u64,
    /// `onReportGenerate` events
    pub reports: u64,
    /// `onDataSync` events
    pub syncs: u64,
}

#[derive(Debug, Default)]
struct Counters {
    sales: AtomicU64,
    inventory_updates: AtomicU64,
    reports: AtomicU64,
    syncs: AtomicU64,
}

impl Counters {
    fn snapshot(&self) -> EventCounts {
        EventCounts {
            sales: self.sales.load(Ordering::Relaxed),
            inventory_updates: self.inventory_updates.load(Ordering::Relaxed),
            reports: self.reports.load(Ordering::Relaxed),
            syncs: self.syncs.load(Ordering::Relaxed),
        }
    }
}

/// Observes domain events and answers `onDataSync` with a snapshot
///
/// Its sale, inventory and report hooks only count; they never produce
/// a result.
#[derive(Debug)]
pub struct MonitoringPlugin {
    store: BusinessStore,
    counters: Counters,
    started_at: DateTime<Utc>,
}

impl MonitoringPlugin {
    /// Create the plugin over a store
    pub fn new(store: BusinessStore) -> Self {
        Self {
            store,
            counters: Counters::default(),
            started_at: Utc::now(),
        }
    }

    /// Events observed since the last initialization
    pub fn counts(&self) -> EventCounts {
        self.counters.snapshot()
    }
}

#[async_trait]
impl Plugin for MonitoringPlugin {
    fn name(&self) -> &str {
        NAME
    }

    fn version(&self) -> &str {
        env!("CARGO_PKG_VERSION")
    }

    fn description(&self) -> &str {
        "Counts domain events and reports them on data sync"
    }

    fn author(&self) -> &str {
        "Omran"
    }

    fn hooks(&self) -> Vec<HookName> {
        vec![
            HookName::OnInit,
            HookName::OnDataSync,
            HookName::OnSaleProcess,
            HookName::OnInventoryUpdate,
            HookName::OnReportGenerate,
        ]
    }

    async fn on_init(&mut self, _config: &PluginConfig) -> Result<()> {
        self.counters = Counters::default();
        self.started_at = Utc::now();
        Ok(())
    }

    async fn on_data_sync(&self, request: &SyncRequest) -> Result<Option<SyncResult>> {
        self.counters.syncs.fetch_add(1, Ordering::Relaxed);

        if !request.covers(NAME) {
            return Ok(None);
        }

        let stats = self.store.stats();
        let details = json!({
            "source": request.source,
            "started_at": self.started_at,
            "events": self.counters.snapshot(),
            "store": stats,
        });

        Ok(Some(
            SyncResult::ok(NAME, stats.sale_count + stats.item_count).with_details(details),
        ))
    }

    async fn on_sale_process(&self, _sale: &SaleRequest) -> Result<Option<SaleResult>> {
        self.counters.sales.fetch_add(1, Ordering::Relaxed);
        Ok(None)
    }

    async fn on_inventory_update(
        &self,
        _update: &InventoryUpdate,
    ) -> Result<Option<InventoryResult>> {
        self.counters
            .inventory_updates
            .fetch_add(1, Ordering::Relaxed);
        Ok(None)
    }

    async fn on_report_generate(&self, _request: &ReportRequest) -> Result<Option<ReportResult>> {
        self.counters.reports.fetch_add(1, Ordering::Relaxed);
        Ok(None)
    }
}
