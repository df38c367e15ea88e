//! Hook vocabulary and typed dispatch envelopes

use crate::error::Result;
use crate::inventory::{InventoryResult, InventoryUpdate};
use crate::plugin::Plugin;
use crate::report::{ReportRequest, ReportResult};
use crate::sale::{SaleRequest, SaleResult};
use crate::sync::{SyncRequest, SyncResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The fixed set of hook slots a plugin may implement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HookName {
    /// Registry initializes or the plugin is reloaded
    OnInit,
    /// Plugin is unregistered, reloaded or cleaned up
    OnDestroy,
    /// Generic data-sync event
    OnDataSync,
    /// A sale is submitted
    OnSaleProcess,
    /// Inventory levels change
    OnInventoryUpdate,
    /// A report is requested
    OnReportGenerate,
}

/// How results of an event hook are meant to be consumed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DispatchMode {
    /// Every plugin result is meaningful
    FanOut,
    /// The first result in load order is authoritative
    SingleHandler,
}

impl HookName {
    /// All hook slots
    pub const ALL: [HookName; 6] = [
        HookName::OnInit,
        HookName::OnDestroy,
        HookName::OnDataSync,
        HookName::OnSaleProcess,
        HookName::OnInventoryUpdate,
        HookName::OnReportGenerate,
    ];

    /// Hook name as written in plugin descriptors
    pub fn as_str(&self) -> &'static str {
        match self {
            HookName::OnInit => "onInit",
            HookName::OnDestroy => "onDestroy",
            HookName::OnDataSync => "onDataSync",
            HookName::OnSaleProcess => "onSaleProcess",
            HookName::OnInventoryUpdate => "onInventoryUpdate",
            HookName::OnReportGenerate => "onReportGenerate",
        }
    }

    /// Whether this is a lifecycle hook (no payload, no result)
    pub fn is_lifecycle(&self) -> bool {
        matches!(self, HookName::OnInit | HookName::OnDestroy)
    }

    /// Dispatch contract for event hooks; `None` for lifecycle hooks
    pub fn dispatch_mode(&self) -> Option<DispatchMode> {
        match self {
            HookName::OnInit | HookName::OnDestroy => None,
            HookName::OnDataSync => Some(DispatchMode::FanOut),
            HookName::OnSaleProcess | HookName::OnInventoryUpdate | HookName::OnReportGenerate => {
                Some(DispatchMode::SingleHandler)
            }
        }
    }
}

impl fmt::Display for HookName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HookName {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        HookName::ALL
            .into_iter()
            .find(|hook| hook.as_str() == s)
            .ok_or_else(|| format!("unknown hook: {s}"))
    }
}

/// Payload of an event hook dispatch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "hook", content = "payload")]
pub enum HookRequest {
    /// `onDataSync`
    #[serde(rename = "onDataSync")]
    DataSync(SyncRequest),
    /// `onSaleProcess`
    #[serde(rename = "onSaleProcess")]
    SaleProcess(SaleRequest),
    /// `onInventoryUpdate`
    #[serde(rename = "onInventoryUpdate")]
    InventoryUpdate(InventoryUpdate),
    /// `onReportGenerate`
    #[serde(rename = "onReportGenerate")]
    ReportGenerate(ReportRequest),
}

impl HookRequest {
    /// Hook slot this request targets
    pub fn hook(&self) -> HookName {
        match self {
            HookRequest::DataSync(_) => HookName::OnDataSync,
            HookRequest::SaleProcess(_) => HookName::OnSaleProcess,
            HookRequest::InventoryUpdate(_) => HookName::OnInventoryUpdate,
            HookRequest::ReportGenerate(_) => HookName::OnReportGenerate,
        }
    }

    /// Invoke the matching hook method on one plugin.
    ///
    /// `Ok(None)` means the plugin handled the call but contributed no result.
    pub async fn invoke(&self, plugin: &dyn Plugin) -> Result<Option<HookResponse>> {
        let response = match self {
            HookRequest::DataSync(req) => plugin
                .on_data_sync(req)
                .await?
                .map(HookResponse::DataSync),
            HookRequest::SaleProcess(req) => plugin
                .on_sale_process(req)
                .await?
                .map(HookResponse::SaleProcess),
            HookRequest::InventoryUpdate(req) => plugin
                .on_inventory_update(req)
                .await?
                .map(HookResponse::InventoryUpdate),
            HookRequest::ReportGenerate(req) => plugin
                .on_report_generate(req)
                .await?
                .map(HookResponse::ReportGenerate),
        };
        Ok(response)
    }
}

/// One plugin's result for an event hook dispatch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "hook", content = "result")]
pub enum HookResponse {
    /// `onDataSync`
    #[serde(rename = "onDataSync")]
    DataSync(SyncResult),
    /// `onSaleProcess`
    #[serde(rename = "onSaleProcess")]
    SaleProcess(SaleResult),
    /// `onInventoryUpdate`
    #[serde(rename = "onInventoryUpdate")]
    InventoryUpdate(InventoryResult),
    /// `onReportGenerate`
    #[serde(rename = "onReportGenerate")]
    ReportGenerate(ReportResult),
}

impl HookResponse {
    /// Hook slot this response belongs to
    pub fn hook(&self) -> HookName {
        match self {
            HookResponse::DataSync(_) => HookName::OnDataSync,
            HookResponse::SaleProcess(_) => HookName::OnSaleProcess,
            HookResponse::InventoryUpdate(_) => HookName::OnInventoryUpdate,
            HookResponse::ReportGenerate(_) => HookName::OnReportGenerate,
        }
    }

    /// Extract a sync result
    pub fn into_sync(self) -> Option<SyncResult> {
        match self {
            HookResponse::DataSync(result) => Some(result),
            _ => None,
        }
    }

    /// Extract a sale result
    pub fn into_sale(self) -> Option<SaleResult> {
        match self {
            HookResponse::SaleProcess(result) => Some(result),
            _ => None,
        }
    }

    /// Extract an inventory result
    pub fn into_inventory(self) -> Option<InventoryResult> {
        match self {
            HookResponse::InventoryUpdate(result) => Some(result),
            _ => None,
        }
    }

    /// Extract a report result
    pub fn into_report(self) -> Option<ReportResult> {
        match self {
            HookResponse::ReportGenerate(result) => Some(result),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hook_names_round_trip_through_str() {
        for hook in HookName::ALL {
            assert_eq!(hook.as_str().parse::<HookName>().unwrap(), hook);
        }
        assert!("onSomething".parse::<HookName>().is_err());
    }

    #[test]
    fn test_hook_serde_matches_display() {
        let json = serde_json::to_value(HookName::OnInventoryUpdate).unwrap();
        assert_eq!(json, serde_json::json!("onInventoryUpdate"));
    }

    #[test]
    fn test_dispatch_modes() {
        assert_eq!(HookName::OnInit.dispatch_mode(), None);
        assert_eq!(HookName::OnDestroy.dispatch_mode(), None);
        assert_eq!(HookName::OnDataSync.dispatch_mode(), Some(DispatchMode::FanOut));
        assert_eq!(
            HookName::OnSaleProcess.dispatch_mode(),
            Some(DispatchMode::SingleHandler)
        );
        assert!(HookName::OnInit.is_lifecycle());
        assert!(!HookName::OnReportGenerate.is_lifecycle());
    }

    #[test]
    fn test_request_envelope() {
        let request = HookRequest::SaleProcess(SaleRequest::single("X", 1, 2.0));
        assert_eq!(request.hook(), HookName::OnSaleProcess);

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["hook"], "onSaleProcess");
        assert_eq!(json["payload"]["lines"][0]["item"], "X");
    }

    #[test]
    fn test_response_extractors() {
        let response = HookResponse::SaleProcess(SaleResult::completed("S1", 2.0));
        assert_eq!(response.hook(), HookName::OnSaleProcess);
        assert!(response.clone().into_inventory().is_none());
        assert_eq!(response.into_sale().unwrap().sale_id.as_deref(), Some("S1"));
    }
}
