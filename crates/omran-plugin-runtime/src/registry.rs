//! Plugin registry for managing plugin lifecycle and hook dispatch
//!
//! The registry never returns errors. Unknown plugins are reported through
//! `false` returns or skipped entries, and every plugin hook failure is
//! logged and isolated so one plugin cannot stop the others.

use crate::options::InitializeOptions;
use chrono::{DateTime, Utc};
use omran_plugin_api::{
    DispatchMode, HookName, HookRequest, HookResponse, InventoryResult, InventoryUpdate, Plugin,
    PluginConfig, PluginInfo, PluginMetadata, PluginState, PluginSummary, ReportRequest,
    ReportResult, SaleRequest, SaleResult, SyncRequest, SyncResult,
};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Registry lifecycle state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegistryState {
    /// No `initialize` has completed since creation or the last cleanup
    #[default]
    Uninitialized,
    /// `initialize` is running
    Initializing,
    /// `initialize` has completed
    Initialized,
}

/// Plugin registry
///
/// Cheap to clone; all clones share the same plugin set.
#[derive(Clone, Debug, Default)]
pub struct PluginRegistry {
    inner: Arc<RwLock<RegistryInner>>,
}

#[derive(Debug, Default)]
struct RegistryInner {
    plugins: HashMap<String, PluginEntry>,
    load_order: Vec<String>,
    state: RegistryState,
}

/// Plugin entry with metadata and state
#[derive(Clone)]
pub struct PluginEntry {
    /// Plugin instance
    pub plugin: Arc<tokio::sync::RwLock<Box<dyn Plugin>>>,

    /// Plugin metadata
    pub metadata: PluginMetadata,

    /// Hooks the plugin implements
    pub hooks: Vec<HookName>,

    /// Plugin state
    pub state: Arc<RwLock<PluginState>>,

    /// Live configuration
    pub config: Arc<RwLock<PluginConfig>>,

    /// When the plugin was registered
    pub registered_at: DateTime<Utc>,

    /// When `on_init` last completed
    pub initialized_at: Arc<RwLock<Option<DateTime<Utc>>>>,
}

impl std::fmt::Debug for PluginEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluginEntry")
            .field("metadata", &self.metadata)
            .field("hooks", &self.hooks)
            .field("state", &self.state)
            .field("registered_at", &self.registered_at)
            .finish()
    }
}

impl PluginEntry {
    fn new(plugin: Box<dyn Plugin>) -> Self {
        let metadata = plugin.metadata();
        let hooks = plugin.hooks();
        let config = plugin.default_config();

        Self {
            plugin: Arc::new(tokio::sync::RwLock::new(plugin)),
            metadata,
            hooks,
            state: Arc::new(RwLock::new(PluginState::Registered)),
            config: Arc::new(RwLock::new(config)),
            registered_at: Utc::now(),
            initialized_at: Arc::new(RwLock::new(None)),
        }
    }

    /// Whether the plugin implements a hook
    pub fn implements(&self, hook: HookName) -> bool {
        self.hooks.contains(&hook)
    }

    /// Snapshot as [`PluginInfo`]
    pub fn info(&self) -> PluginInfo {
        PluginInfo {
            metadata: self.metadata.clone(),
            hooks: self.hooks.clone(),
            state: self.state.read().clone(),
            config: self.config.read().clone(),
            registered_at: self.registered_at,
            initialized_at: *self.initialized_at.read(),
        }
    }

    fn same_instance(&self, other: &PluginEntry) -> bool {
        Arc::ptr_eq(&self.plugin, &other.plugin)
    }

    fn mark_initialized(&self) {
        *self.state.write() = PluginState::Initialized;
        *self.initialized_at.write() = Some(Utc::now());
    }

    fn mark_failed(&self, reason: String) {
        *self.state.write() = PluginState::Failed(reason);
    }

    async fn run_init(&self) -> omran_plugin_api::Result<()> {
        if !self.implements(HookName::OnInit) {
            self.mark_initialized();
            return Ok(());
        }

        let config = self.config.read().clone();
        let mut plugin = self.plugin.write().await;
        match plugin.on_init(&config).await {
            Ok(()) => {
                self.mark_initialized();
                Ok(())
            }
            Err(e) => {
                self.mark_failed(e.to_string());
                Err(e)
            }
        }
    }

    async fn run_destroy(&self) -> omran_plugin_api::Result<()> {
        if !self.implements(HookName::OnDestroy) {
            return Ok(());
        }

        let mut plugin = self.plugin.write().await;
        plugin.on_destroy().await
    }
}

impl PluginRegistry {
    /// Create a new, empty plugin registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a plugin
    ///
    /// A plugin whose name is already registered replaces the existing
    /// entry in place (its load order position is kept). Returns `false`
    /// only when the plugin has an empty name.
    pub fn register(&self, plugin: Box<dyn Plugin>) -> bool {
        let entry = PluginEntry::new(plugin);
        let name = entry.metadata.name.clone();

        if name.trim().is_empty() {
            warn!("Refusing to register a plugin with an empty name");
            return false;
        }

        let version = entry.metadata.version.clone();
        let mut inner = self.inner.write();

        if inner.plugins.insert(name.clone(), entry).is_some() {
            warn!(plugin = %name, "Plugin already registered, replacing existing entry");
        } else {
            inner.load_order.push(name.clone());
        }

        if inner.state != RegistryState::Uninitialized {
            debug!(plugin = %name, "Plugin registered after initialization; on_init not run");
        }

        info!(plugin = %name, version = %version, "Plugin registered");
        true
    }

    /// Unregister a plugin
    ///
    /// Runs `on_destroy` (failures are logged, never block removal) and
    /// removes the plugin from the registry and the load order. Returns
    /// `false` if no such plugin is registered.
    pub async fn unregister(&self, name: &str) -> bool {
        let Some(entry) = self.get_plugin(name) else {
            warn!(plugin = %name, "Cannot unregister unknown plugin");
            return false;
        };

        if let Err(e) = entry.run_destroy().await {
            warn!(plugin = %name, error = %e, "Plugin teardown failed during unregister");
        }

        let mut inner = self.inner.write();
        // A concurrent register may have replaced the entry while on_destroy ran
        if inner
            .plugins
            .get(name)
            .is_some_and(|current| current.same_instance(&entry))
        {
            inner.plugins.remove(name);
            inner.load_order.retain(|n| n != name);
        }

        info!(plugin = %name, "Plugin unregistered");
        true
    }

    /// Initialize all plugins
    ///
    /// Runs `on_init` on every plugin in the effective order (the explicit
    /// order from `options`, else the recorded load order). Unknown names
    /// are skipped with a warning and failing plugins are logged; neither
    /// stops the sequence. A second call while initialized is a no-op.
    pub async fn initialize(&self, options: InitializeOptions) {
        let order = {
            let mut inner = self.inner.write();
            if inner.state != RegistryState::Uninitialized {
                warn!(state = ?inner.state, "Plugin registry already initialized");
                return;
            }
            inner.state = RegistryState::Initializing;

            match options.load_order {
                Some(order) => {
                    let order = dedup(order);
                    inner.apply_load_order(&order);

                    for name in inner.load_order.iter().filter(|n| !order.contains(n)) {
                        warn!(
                            plugin = %name,
                            "Registered plugin missing from explicit load order; on_init not run"
                        );
                    }
                    order
                }
                None => inner.load_order.clone(),
            }
        };

        if !options.auto_init {
            debug!("auto_init is disabled; initializing plugins anyway");
        }

        self.warn_unmet_dependencies(&order);

        let mut initialized = 0usize;
        let mut failed = 0usize;

        for name in &order {
            let Some(entry) = self.get_plugin(name) else {
                warn!(plugin = %name, "Plugin in load order is not registered, skipping");
                continue;
            };

            match entry.run_init().await {
                Ok(()) => {
                    initialized += 1;
                    debug!(plugin = %name, "Plugin initialized");
                }
                Err(e) => {
                    failed += 1;
                    error!(plugin = %name, error = %e, "Plugin initialization failed");
                }
            }
        }

        self.inner.write().state = RegistryState::Initialized;
        info!(initialized, failed, "Plugin registry initialized");
    }

    /// Dispatch an event hook to every plugin that implements it
    ///
    /// Plugins are invoked sequentially in load order. Results are
    /// collected in that order; plugins that fail or return no result are
    /// left out of the list entirely.
    pub async fn execute_hook(&self, request: &HookRequest) -> Vec<HookResponse> {
        let hook = request.hook();
        let targets: Vec<(String, PluginEntry)> = {
            let inner = self.inner.read();
            inner
                .load_order
                .iter()
                .filter_map(|name| {
                    inner
                        .plugins
                        .get(name)
                        .filter(|entry| entry.implements(hook))
                        .map(|entry| (name.clone(), entry.clone()))
                })
                .collect()
        };

        let mut results = Vec::with_capacity(targets.len());
        let mut contributors = Vec::new();

        for (name, entry) in targets {
            let plugin = entry.plugin.read().await;
            match request.invoke(&**plugin).await {
                Ok(Some(response)) => {
                    debug!(plugin = %name, hook = %hook, "Hook returned a result");
                    contributors.push(name);
                    results.push(response);
                }
                Ok(None) => {
                    debug!(plugin = %name, hook = %hook, "Hook returned no result");
                }
                Err(e) => {
                    warn!(plugin = %name, hook = %hook, error = %e, "Hook execution failed");
                }
            }
        }

        if hook.dispatch_mode() == Some(DispatchMode::SingleHandler) && contributors.len() > 1 {
            warn!(
                hook = %hook,
                plugins = ?contributors,
                "Several plugins handled a single-handler hook; the first result is authoritative"
            );
        }

        results
    }

    /// Dispatch an event hook from a hook name and a JSON payload
    ///
    /// Lifecycle hooks and payloads that do not fit the hook's request
    /// type are logged and produce an empty result list.
    pub async fn execute_hook_json(
        &self,
        hook: HookName,
        payload: serde_json::Value,
    ) -> Vec<HookResponse> {
        if hook.is_lifecycle() {
            warn!(hook = %hook, "Lifecycle hooks cannot be dispatched as events");
            return Vec::new();
        }

        let envelope = serde_json::json!({ "hook": hook.as_str(), "payload": payload });
        match serde_json::from_value::<HookRequest>(envelope) {
            Ok(request) => self.execute_hook(&request).await,
            Err(e) => {
                warn!(hook = %hook, error = %e, "Invalid hook payload");
                Vec::new()
            }
        }
    }

    /// Dispatch `onSaleProcess`
    pub async fn dispatch_sale(&self, sale: &SaleRequest) -> Vec<SaleResult> {
        self.execute_hook(&HookRequest::SaleProcess(sale.clone()))
            .await
            .into_iter()
            .filter_map(HookResponse::into_sale)
            .collect()
    }

    /// Dispatch `onInventoryUpdate`
    pub async fn dispatch_inventory(&self, update: &InventoryUpdate) -> Vec<InventoryResult> {
        self.execute_hook(&HookRequest::InventoryUpdate(update.clone()))
            .await
            .into_iter()
            .filter_map(HookResponse::into_inventory)
            .collect()
    }

    /// Dispatch `onReportGenerate`
    pub async fn dispatch_report(&self, request: &ReportRequest) -> Vec<ReportResult> {
        self.execute_hook(&HookRequest::ReportGenerate(request.clone()))
            .await
            .into_iter()
            .filter_map(HookResponse::into_report)
            .collect()
    }

    /// Dispatch `onDataSync`
    pub async fn dispatch_sync(&self, request: &SyncRequest) -> Vec<SyncResult> {
        self.execute_hook(&HookRequest::DataSync(request.clone()))
            .await
            .into_iter()
            .filter_map(HookResponse::into_sync)
            .collect()
    }

    /// Get plugin by name
    pub fn get_plugin(&self, name: &str) -> Option<PluginEntry> {
        self.inner.read().plugins.get(name).cloned()
    }

    /// All plugins, in load order
    pub fn get_all_plugins(&self) -> Vec<PluginInfo> {
        let inner = self.inner.read();
        inner
            .load_order
            .iter()
            .filter_map(|name| inner.plugins.get(name))
            .map(PluginEntry::info)
            .collect()
    }

    /// `{name, version, description}` of all plugins, in load order
    pub fn get_plugin_info(&self) -> Vec<PluginSummary> {
        let inner = self.inner.read();
        inner
            .load_order
            .iter()
            .filter_map(|name| inner.plugins.get(name))
            .map(|entry| entry.metadata.summary())
            .collect()
    }

    /// Recorded load order
    pub fn load_order(&self) -> Vec<String> {
        self.inner.read().load_order.clone()
    }

    /// Plugins implementing `hook`, in load order
    pub fn implementers(&self, hook: HookName) -> Vec<String> {
        let inner = self.inner.read();
        inner
            .load_order
            .iter()
            .filter(|name| {
                inner
                    .plugins
                    .get(*name)
                    .is_some_and(|entry| entry.implements(hook))
            })
            .cloned()
            .collect()
    }

    /// Check if a plugin is registered
    pub fn contains(&self, name: &str) -> bool {
        self.inner.read().plugins.contains_key(name)
    }

    /// Number of registered plugins
    pub fn count(&self) -> usize {
        self.inner.read().plugins.len()
    }

    /// Registry lifecycle state
    pub fn state(&self) -> RegistryState {
        self.inner.read().state
    }

    /// Whether `initialize` has completed
    pub fn is_initialized(&self) -> bool {
        self.state() == RegistryState::Initialized
    }

    /// Shallow-merge `partial` into a plugin's configuration
    ///
    /// The new configuration reaches the plugin on its next `on_init`
    /// (reload or a fresh initialize). Returns `false` for unknown plugins.
    pub fn update_plugin_config(&self, name: &str, partial: &PluginConfig) -> bool {
        let Some(entry) = self.get_plugin(name) else {
            warn!(plugin = %name, "Cannot update config of unknown plugin");
            return false;
        };

        entry.config.write().merge(partial);
        debug!(plugin = %name, keys = partial.len(), "Plugin config updated");
        true
    }

    /// Run `on_destroy` then `on_init` on one plugin without unregistering it
    ///
    /// Returns `false` if the plugin is unknown or either phase fails.
    pub async fn reload_plugin(&self, name: &str) -> bool {
        let Some(entry) = self.get_plugin(name) else {
            warn!(plugin = %name, "Cannot reload unknown plugin");
            return false;
        };

        if let Err(e) = entry.run_destroy().await {
            entry.mark_failed(e.to_string());
            error!(plugin = %name, error = %e, "Plugin teardown failed during reload");
            return false;
        }

        if let Err(e) = entry.run_init().await {
            error!(plugin = %name, error = %e, "Plugin initialization failed during reload");
            return false;
        }

        info!(plugin = %name, "Plugin reloaded");
        true
    }

    /// Tear down every plugin in reverse load order and reset the registry
    ///
    /// Teardown failures are logged per plugin; the registry always ends
    /// empty and uninitialized.
    pub async fn cleanup(&self) {
        let entries: Vec<(String, PluginEntry)> = {
            let inner = self.inner.read();
            inner
                .load_order
                .iter()
                .rev()
                .filter_map(|name| {
                    inner
                        .plugins
                        .get(name)
                        .map(|entry| (name.clone(), entry.clone()))
                })
                .collect()
        };

        for (name, entry) in &entries {
            if let Err(e) = entry.run_destroy().await {
                warn!(plugin = %name, error = %e, "Plugin teardown failed during cleanup");
            }
        }

        let mut inner = self.inner.write();
        inner.plugins.clear();
        inner.load_order.clear();
        inner.state = RegistryState::Uninitialized;

        info!(count = entries.len(), "Plugin registry cleaned up");
    }

    fn warn_unmet_dependencies(&self, order: &[String]) {
        let inner = self.inner.read();
        let position: HashMap<&str, usize> = order
            .iter()
            .enumerate()
            .map(|(i, name)| (name.as_str(), i))
            .collect();

        for (index, name) in order.iter().enumerate() {
            let Some(entry) = inner.plugins.get(name) else {
                continue;
            };

            for dep in &entry.metadata.dependencies {
                if !inner.plugins.contains_key(dep) {
                    warn!(plugin = %name, dependency = %dep, "Declared dependency is not registered");
                } else if position.get(dep.as_str()).map_or(true, |&p| p > index) {
                    warn!(
                        plugin = %name,
                        dependency = %dep,
                        "Declared dependency is not initialized before its dependent"
                    );
                }
            }
        }
    }
}

impl RegistryInner {
    /// Record an explicit order: known names first, then registered plugins
    /// the caller left out, keeping their previous relative order.
    fn apply_load_order(&mut self, order: &[String]) {
        let mut recorded: Vec<String> = order
            .iter()
            .filter(|name| self.plugins.contains_key(*name))
            .cloned()
            .collect();

        let listed: HashSet<&String> = order.iter().collect();
        recorded.extend(
            self.load_order
                .iter()
                .filter(|name| !listed.contains(name))
                .cloned(),
        );

        self.load_order = recorded;
    }
}

fn dedup(order: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    order
        .into_iter()
        .filter(|name| seen.insert(name.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use omran_plugin_api::testing::{Journal, MockPlugin};
    use omran_plugin_api::PluginError;
    use serde_json::json;

    fn config(value: serde_json::Value) -> PluginConfig {
        PluginConfig::from_value(value).unwrap()
    }

    #[derive(Debug)]
    struct CountingPlugin {
        name: String,
        inits: Arc<RwLock<u32>>,
    }

    #[async_trait]
    impl Plugin for CountingPlugin {
        fn name(&self) -> &str {
            &self.name
        }

        fn version(&self) -> &str {
            "1.0.0"
        }

        fn hooks(&self) -> Vec<HookName> {
            vec![HookName::OnInit]
        }

        async fn on_init(&mut self, _config: &PluginConfig) -> Result<(), PluginError> {
            *self.inits.write() += 1;
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_registry_new() {
        let registry = PluginRegistry::new();
        assert_eq!(registry.count(), 0);
        assert_eq!(registry.state(), RegistryState::Uninitialized);
        assert!(registry.load_order().is_empty());
    }

    #[tokio::test]
    async fn test_register_rejects_empty_name() {
        let registry = PluginRegistry::new();
        assert!(!registry.register(Box::new(MockPlugin::new(""))));
        assert!(!registry.register(Box::new(MockPlugin::new("   "))));
        assert_eq!(registry.count(), 0);
    }

    #[tokio::test]
    async fn test_replacement_keeps_position() {
        let registry = PluginRegistry::new();
        registry.register(Box::new(MockPlugin::new("a")));
        registry.register(Box::new(MockPlugin::new("b")));
        registry.register(Box::new(MockPlugin::new("a").version("2.0.0")));

        assert_eq!(registry.load_order(), vec!["a", "b"]);
        assert_eq!(registry.get_plugin("a").unwrap().metadata.version, "2.0.0");
    }

    #[tokio::test]
    async fn test_plugins_without_on_init_become_initialized() {
        let registry = PluginRegistry::new();
        registry.register(Box::new(MockPlugin::new("quiet")));

        registry.initialize(InitializeOptions::default()).await;

        let entry = registry.get_plugin("quiet").unwrap();
        assert!(entry.state.read().is_initialized());
        assert!(entry.initialized_at.read().is_some());
    }

    #[tokio::test]
    async fn test_failed_init_marks_state_and_continues() {
        let journal = Journal::new();
        let registry = PluginRegistry::new();
        registry.register(Box::new(
            MockPlugin::new("broken")
                .journal(&journal)
                .fail(HookName::OnInit, "no store"),
        ));
        registry.register(Box::new(MockPlugin::new("ok").journal(&journal).lifecycle()));

        registry.initialize(InitializeOptions::default()).await;

        assert!(registry.is_initialized());
        assert_eq!(journal.calls(HookName::OnInit), vec!["broken", "ok"]);
        let broken = registry.get_plugin("broken").unwrap();
        assert_eq!(
            *broken.state.read(),
            PluginState::Failed("Runtime error: no store".to_string())
        );
    }

    #[tokio::test]
    async fn test_explicit_order_is_recorded() {
        let journal = Journal::new();
        let registry = PluginRegistry::new();
        for name in ["sales", "reports", "inventory"] {
            registry.register(Box::new(MockPlugin::new(name).journal(&journal).lifecycle()));
        }

        registry
            .initialize(InitializeOptions::with_load_order([
                "inventory", "ghost", "sales", "inventory",
            ]))
            .await;

        assert_eq!(journal.calls(HookName::OnInit), vec!["inventory", "sales"]);
        assert_eq!(registry.load_order(), vec!["inventory", "sales", "reports"]);
    }

    #[tokio::test]
    async fn test_config_reaches_plugin_on_reload() {
        let plugin = MockPlugin::new("sales")
            .lifecycle()
            .config(json!({"tax_rate": 0.0, "currency": "SAR"}));
        let handle = plugin.clone();

        let registry = PluginRegistry::new();
        registry.register(Box::new(plugin));
        registry.initialize(InitializeOptions::default()).await;

        assert!(registry.update_plugin_config("sales", &config(json!({"tax_rate": 0.15}))));
        assert!(registry.reload_plugin("sales").await);

        assert_eq!(
            handle.last_init_config().unwrap(),
            config(json!({"tax_rate": 0.15, "currency": "SAR"}))
        );
        assert_eq!(handle.init_count(), 2);
        assert_eq!(handle.destroy_count(), 1);
    }

    #[tokio::test]
    async fn test_reload_reports_failure() {
        let registry = PluginRegistry::new();
        registry.register(Box::new(
            MockPlugin::new("flaky")
                .observe(HookName::OnInit)
                .fail(HookName::OnDestroy, "stuck"),
        ));

        assert!(!registry.reload_plugin("flaky").await);
        assert!(registry.contains("flaky"));
        assert!(registry.get_plugin("flaky").unwrap().state.read().is_failed());
    }

    #[tokio::test]
    async fn test_unregister_swallows_teardown_errors() {
        let registry = PluginRegistry::new();
        registry.register(Box::new(
            MockPlugin::new("flaky").fail(HookName::OnDestroy, "stuck"),
        ));

        assert!(registry.unregister("flaky").await);
        assert!(!registry.contains("flaky"));
        assert!(registry.load_order().is_empty());
    }

    #[tokio::test]
    async fn test_initialize_after_cleanup_runs_again() {
        let inits = Arc::new(RwLock::new(0));
        let registry = PluginRegistry::new();

        registry.register(Box::new(CountingPlugin {
            name: "c".to_string(),
            inits: Arc::clone(&inits),
        }));
        registry.initialize(InitializeOptions::default()).await;
        registry.cleanup().await;

        registry.register(Box::new(CountingPlugin {
            name: "c".to_string(),
            inits: Arc::clone(&inits),
        }));
        registry.initialize(InitializeOptions::default()).await;

        assert_eq!(*inits.read(), 2);
    }

    #[tokio::test]
    async fn test_execute_hook_json() {
        let registry = PluginRegistry::new();
        registry.register(Box::new(MockPlugin::new("sales").respond(
            HookResponse::SaleProcess(SaleResult::completed("S1", 3.0)),
        )));

        let results = registry
            .execute_hook_json(
                HookName::OnSaleProcess,
                json!({"lines": [{"item": "X", "quantity": 1, "unit_price": 3.0}]}),
            )
            .await;
        assert_eq!(results.len(), 1);

        let results = registry
            .execute_hook_json(HookName::OnSaleProcess, json!({"item": "X"}))
            .await;
        assert!(results.is_empty());

        let results = registry.execute_hook_json(HookName::OnInit, json!(null)).await;
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_observers_do_not_contribute() {
        let registry = PluginRegistry::new();
        registry.register(Box::new(MockPlugin::new("monitoring").observe(HookName::OnSaleProcess)));
        registry.register(Box::new(MockPlugin::new("sales").respond(
            HookResponse::SaleProcess(SaleResult::completed("S9", 1.0)),
        )));

        let results = registry
            .dispatch_sale(&SaleRequest::single("X", 1, 1.0))
            .await;

        assert_eq!(results, vec![SaleResult::completed("S9", 1.0)]);
        assert_eq!(
            registry.implementers(HookName::OnSaleProcess),
            vec!["monitoring", "sales"]
        );
    }

    #[tokio::test]
    async fn test_plugin_info_projection() {
        let registry = PluginRegistry::new();
        registry.register(Box::new(
            MockPlugin::new("inventory")
                .version("1.2.0")
                .description("Stock levels"),
        ));

        let info = registry.get_plugin_info();
        assert_eq!(
            info,
            vec![PluginSummary {
                name: "inventory".to_string(),
                version: "1.2.0".to_string(),
                description: "Stock levels".to_string(),
            }]
        );

        let all = registry.get_all_plugins();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].state, PluginState::Registered);
    }
}
