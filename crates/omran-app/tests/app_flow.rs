use omran_app::prelude::*;
use omran_app::{AppError, SystemStatus};
use omran_config::{AppConfig, ConfigBuilder, Locale};
use omran_plugin_api::testing::MockPlugin;
use omran_plugin_api::{ReportParams, StockLine, SummaryReport};
use serde_json::json;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

fn shop_config() -> AppConfig {
    ConfigBuilder::new()
        .plugin_config(
            "inventory",
            json!({"initial_stock": {"tea": 10, "sugar": 3}}),
        )
        .unwrap()
        .build()
        .unwrap()
}

async fn running_shop() -> OmranApp {
    let app = OmranApp::builder().config(shop_config()).build().unwrap();
    app.bootstrap().await.unwrap();
    app
}

#[tokio::test]
async fn test_sale_updates_stock_and_reports() {
    let app = running_shop().await;

    let sale = app.process_sale(&SaleRequest::single("tea", 2, 4.5)).await;
    assert!(sale.success);
    assert_eq!(sale.total, Some(9.0));
    assert_eq!(app.store().stock("tea"), Some(8));

    let report = app
        .generate_report(&ReportRequest::new(ReportKind::Inventory))
        .await;
    assert!(report.success);
    assert_eq!(
        report.data,
        Some(ReportData::Inventory(vec![
            StockLine {
                item: "sugar".into(),
                quantity: 3
            },
            StockLine {
                item: "tea".into(),
                quantity: 8
            },
        ]))
    );

    let summary = app
        .generate_report(&ReportRequest::new(ReportKind::Summary))
        .await;
    assert_eq!(
        summary.data,
        Some(ReportData::Summary(SummaryReport {
            sale_count: 1,
            revenue: 9.0,
            item_count: 2,
            low_stock_count: 1,
        }))
    );
}

#[tokio::test]
async fn test_rejected_sale_keeps_plugin_reason() {
    let app = running_shop().await;

    let sale = app.process_sale(&SaleRequest::single("sugar", 4, 3.0)).await;

    assert!(!sale.success);
    assert!(sale.error.unwrap().contains("insufficient stock"));
    assert_eq!(app.store().stock("sugar"), Some(3));
}

#[tokio::test]
async fn test_inventory_updates() {
    let app = running_shop().await;

    let restock = app
        .update_inventory(&InventoryUpdate::new("sugar", 5).with_reason("delivery"))
        .await;
    assert!(restock.success);
    assert_eq!(restock.new_stock, Some(8));
    assert!(!restock.low_stock);

    let oversell = app.update_inventory(&InventoryUpdate::new("tea", -20)).await;
    assert!(!oversell.success);
    assert_eq!(oversell.item.as_deref(), Some("tea"));
    assert_eq!(app.store().stock("tea"), Some(10));

    let low = app
        .generate_report(&ReportRequest::new(ReportKind::LowStock).with_params(ReportParams {
            limit: Some(10),
            ..Default::default()
        }))
        .await;
    assert_eq!(low.data, Some(ReportData::LowStock(vec![])));
}

#[tokio::test]
async fn test_unhandled_actions_use_locale() {
    let app = OmranApp::builder()
        .builtin_plugins(false)
        .build()
        .unwrap();
    app.bootstrap().await.unwrap();

    let sale = app.process_sale(&SaleRequest::single("tea", 1, 1.0)).await;
    assert!(!sale.success);
    assert_eq!(sale.error.as_deref(), Some("فشل في معالجة عملية البيع"));

    let config = ConfigBuilder::new().locale(Locale::En).build().unwrap();
    let app = OmranApp::builder()
        .config(config)
        .builtin_plugins(false)
        .build()
        .unwrap();
    app.bootstrap().await.unwrap();

    let report = app
        .generate_report(&ReportRequest::new(ReportKind::Sales))
        .await;
    assert_eq!(report.error.as_deref(), Some("Failed to generate report"));

    let update = app.update_inventory(&InventoryUpdate::new("tea", 1)).await;
    assert_eq!(update.error.as_deref(), Some("Failed to update inventory"));
}

#[tokio::test]
async fn test_sync_collects_every_result() {
    let app = OmranApp::builder()
        .config(shop_config())
        .plugin(PluginFactory::new("backup", |_| {
            Ok(Box::new(MockPlugin::new("backup").respond(
                HookResponse::DataSync(SyncResult::ok("backup", 7)),
            )))
        }))
        .build()
        .unwrap();
    app.bootstrap().await.unwrap();
    app.process_sale(&SaleRequest::single("tea", 1, 4.5)).await;

    let results = app.sync_data(&SyncRequest::new("manual")).await;

    let plugins: Vec<&str> = results.iter().map(|r| r.plugin.as_str()).collect();
    assert_eq!(plugins, vec!["monitoring", "backup"]);
    assert_eq!(results[0].records, 3);
    assert_eq!(results[0].details["events"]["sales"], 1);
    assert_eq!(results[1].records, 7);
}

#[tokio::test]
async fn test_bootstrap_retries_failing_factory() {
    let calls = Arc::new(AtomicU32::new(0));
    let counter = Arc::clone(&calls);

    let config = ConfigBuilder::new()
        .load_order(["flaky"])
        .retry_delay(Duration::from_millis(10))
        .build()
        .unwrap();

    let app = OmranApp::builder()
        .config(config)
        .builtin_plugins(false)
        .plugin(PluginFactory::new("flaky", move |_| {
            if counter.fetch_add(1, Ordering::SeqCst) < 2 {
                return Err(PluginError::init("database not ready"));
            }
            Ok(Box::new(MockPlugin::new("flaky").lifecycle()))
        }))
        .build()
        .unwrap();

    app.bootstrap().await.unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 3);
    assert_eq!(app.state(), AppState::Running);

    let status = app.get_system_status();
    assert_eq!(status.bootstrap_attempts, 3);
    assert!(status.initialized);
    assert_eq!(status.load_order, vec!["flaky"]);
}

#[tokio::test]
async fn test_bootstrap_gives_up_after_max_retries() {
    let config = ConfigBuilder::new()
        .retry_delay(Duration::from_millis(10))
        .max_retries(1)
        .build()
        .unwrap();

    let app = OmranApp::builder()
        .config(config)
        .plugin(PluginFactory::new("broken", |_| {
            Err(PluginError::init("missing license"))
        }))
        .build()
        .unwrap();

    let err = app.bootstrap().await.unwrap_err();

    match err {
        AppError::RetriesExhausted {
            attempts,
            last_error,
        } => {
            assert_eq!(attempts, 2);
            assert!(matches!(*last_error, AppError::Factory { ref plugin, .. } if plugin == "broken"));
        }
        other => panic!("unexpected error: {other}"),
    }

    assert_eq!(app.state(), AppState::Failed);
    assert_eq!(app.registry().count(), 0);
    assert!(!app.registry().is_initialized());
}

#[tokio::test]
async fn test_disabled_plugin_is_skipped() {
    let config = ConfigBuilder::new().disable_plugin("sales").build().unwrap();
    let app = OmranApp::builder().config(config).build().unwrap();
    app.bootstrap().await.unwrap();

    assert!(!app.registry().contains("sales"));

    let sale = app.process_sale(&SaleRequest::single("tea", 1, 1.0)).await;
    assert!(!sale.success);
    assert_eq!(sale.error.as_deref(), Some("فشل في معالجة عملية البيع"));
}

#[tokio::test]
async fn test_reload_plugins_keeps_business_data() {
    let app = running_shop().await;
    app.process_sale(&SaleRequest::single("tea", 3, 4.5)).await;

    app.reload_plugins().await.unwrap();

    let status = app.get_system_status();
    assert_eq!(status.state, AppState::Running);
    assert_eq!(status.bootstrap_attempts, 2);
    assert_eq!(status.plugins.len(), 4);
    assert_eq!(app.store().stock("tea"), Some(7));
    assert_eq!(app.store().sales().len(), 1);

    let results = app.sync_data(&SyncRequest::new("manual")).await;
    assert_eq!(results[0].details["events"]["sales"], 0);
}

#[tokio::test]
async fn test_status_serializes() {
    let app = running_shop().await;

    let status = app.get_system_status();
    let value = serde_json::to_value(&status).unwrap();

    assert_eq!(value["app"], "Omran");
    assert_eq!(value["state"], "running");
    assert_eq!(value["registry_state"], "initialized");
    assert_eq!(value["store"]["item_count"], 2);
    assert_eq!(
        value["load_order"],
        json!(["inventory", "sales", "reports", "monitoring"])
    );

    let back: SystemStatus = serde_json::from_value(value).unwrap();
    assert_eq!(back, status);
}

#[tokio::test]
async fn test_builder_plugins_are_initialized_after_builtins() {
    let backup = MockPlugin::new("backup").lifecycle();
    let handle = backup.clone();

    let app = OmranApp::builder()
        .plugin(PluginFactory::new("backup", move |_| Ok(Box::new(backup.clone()))))
        .build()
        .unwrap();
    app.bootstrap().await.unwrap();

    assert_eq!(handle.init_count(), 1);
    assert!(app
        .registry()
        .get_plugin("backup")
        .unwrap()
        .state
        .read()
        .is_initialized());
    assert_eq!(
        app.registry().load_order(),
        vec!["inventory", "sales", "reports", "monitoring", "backup"]
    );
}
