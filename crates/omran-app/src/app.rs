//! Application facade over the plugin registry

use crate::builtin::builtin_factories;
use crate::error::{AppError, Result};
use crate::factory::{PluginFactory, PluginServices};
use crate::messages::Message;
use crate::status::SystemStatus;
use crate::store::BusinessStore;
use crate::AppState;
use omran_config::AppConfig;
use omran_plugin_api::{
    InventoryResult, InventoryUpdate, ReportRequest, ReportResult, SaleRequest, SaleResult,
    SyncRequest, SyncResult,
};
use omran_plugin_runtime::{ConfigWatcher, InitializeOptions, PluginRegistry};
use parking_lot::{Mutex, RwLock};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

/// The Omran application
///
/// Owns the plugin registry, the shared business store and the plugin
/// factories, and turns domain actions into hook dispatches.
#[derive(Debug)]
pub struct OmranApp {
    config: Arc<AppConfig>,
    registry: PluginRegistry,
    store: BusinessStore,
    factories: Vec<PluginFactory>,
    state: RwLock<AppState>,
    bootstrap_attempts: AtomicU32,
    config_watch: Mutex<Option<ConfigWatch>>,
}

#[derive(Debug)]
struct ConfigWatch {
    watcher: ConfigWatcher,
    task: tokio::task::JoinHandle<()>,
}

impl OmranApp {
    /// Create a new application builder
    pub fn builder() -> AppBuilder {
        AppBuilder::new()
    }

    /// Get the current state
    pub fn state(&self) -> AppState {
        *self.state.read()
    }

    /// Application configuration
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Plugin registry
    pub fn registry(&self) -> &PluginRegistry {
        &self.registry
    }

    /// Shared business store
    pub fn store(&self) -> &BusinessStore {
        &self.store
    }

    fn set_state(&self, state: AppState) {
        *self.state.write() = state;
    }

    /// Register every enabled plugin and initialize the registry
    ///
    /// A failed attempt is cleaned up and retried after the configured
    /// fixed delay, without limit unless `bootstrap.max_retries` is set.
    /// On success the `bootstrap.plugins_dir` watcher is started if
    /// configured; a watcher that cannot start is logged and skipped.
    pub async fn bootstrap(&self) -> Result<()> {
        self.set_state(AppState::Starting);

        let delay = self.config.bootstrap.retry_delay;
        let max_retries = self.config.bootstrap.max_retries;
        let mut retries = 0u32;

        loop {
            let attempt = self.bootstrap_attempts.fetch_add(1, Ordering::Relaxed) + 1;

            match self.bootstrap_once().await {
                Ok(()) => {
                    self.watch_plugin_configs();
                    self.set_state(AppState::Running);
                    tracing::info!(
                        attempt,
                        plugins = self.registry.count(),
                        "Application bootstrapped"
                    );
                    return Ok(());
                }
                Err(e) => {
                    self.registry.cleanup().await;

                    if max_retries.is_some_and(|max| retries >= max) {
                        self.set_state(AppState::Failed);
                        tracing::error!(attempt, error = %e, "Bootstrap failed, giving up");
                        return Err(AppError::RetriesExhausted {
                            attempts: retries + 1,
                            last_error: Box::new(e),
                        });
                    }

                    tracing::warn!(
                        attempt,
                        error = %e,
                        retry_in = ?delay,
                        "Bootstrap failed, retrying"
                    );
                    retries += 1;
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }

    async fn bootstrap_once(&self) -> Result<()> {
        let services = PluginServices {
            store: self.store.clone(),
            config: Arc::clone(&self.config),
        };

        for factory in &self.factories {
            let name = factory.name();

            if !self.config.is_plugin_enabled(name) {
                tracing::info!(plugin = %name, "Plugin disabled in configuration, skipping");
                continue;
            }

            let plugin = factory.create(&services).map_err(|source| AppError::Factory {
                plugin: name.to_string(),
                source,
            })?;

            if plugin.name() != name {
                tracing::warn!(
                    factory = %name,
                    plugin = %plugin.name(),
                    "Factory built a plugin with a different name"
                );
            }

            let registered_as = plugin.name().to_string();
            if !self.registry.register(plugin) {
                return Err(AppError::bootstrap(format!(
                    "registry rejected the plugin built by factory '{name}'"
                )));
            }

            if let Some(settings) = self.config.plugin(&registered_as) {
                if !settings.config.is_empty() {
                    self.registry
                        .update_plugin_config(&registered_as, &settings.config);
                }
            }
        }

        let bootstrap = &self.config.bootstrap;
        let options = if bootstrap.load_order.is_empty() {
            InitializeOptions::new()
        } else {
            InitializeOptions::with_load_order(self.effective_load_order())
        };

        self.registry
            .initialize(options.auto_init(bootstrap.auto_init))
            .await;

        Ok(())
    }

    /// Whether plugin config files under `bootstrap.plugins_dir` are watched
    pub fn is_watching_configs(&self) -> bool {
        self.config_watch.lock().is_some()
    }

    fn watch_plugin_configs(&self) {
        let Some(dir) = &self.config.bootstrap.plugins_dir else {
            return;
        };

        let mut slot = self.config_watch.lock();
        if slot.is_some() {
            return;
        }

        let mut watcher = ConfigWatcher::new(self.registry.clone(), dir.clone());
        let started = watcher.start().and_then(|()| watcher.run());
        match started {
            Ok(task) => *slot = Some(ConfigWatch { watcher, task }),
            Err(e) => {
                tracing::warn!(
                    dir = %dir.display(),
                    error = %e,
                    "Plugin config watcher not started"
                );
            }
        }
    }

    fn stop_watching_configs(&self) {
        if let Some(mut watch) = self.config_watch.lock().take() {
            watch.watcher.stop();
            watch.task.abort();
        }
    }

    /// Configured load order followed by registered plugins it leaves out
    fn effective_load_order(&self) -> Vec<String> {
        let mut order = self.config.bootstrap.load_order.clone();
        for name in self.registry.load_order() {
            if !order.contains(&name) {
                order.push(name);
            }
        }
        order
    }

    fn not_handled(&self, message: Message) -> &'static str {
        tracing::warn!(?message, "No plugin produced a result");
        message.text(self.config.app.locale)
    }

    /// Process a sale; the first plugin result in load order wins
    pub async fn process_sale(&self, sale: &SaleRequest) -> SaleResult {
        self.registry
            .dispatch_sale(sale)
            .await
            .into_iter()
            .next()
            .unwrap_or_else(|| SaleResult::failed(self.not_handled(Message::SaleNotHandled)))
    }

    /// Apply an inventory update; the first plugin result in load order wins
    pub async fn update_inventory(&self, update: &InventoryUpdate) -> InventoryResult {
        self.registry
            .dispatch_inventory(update)
            .await
            .into_iter()
            .next()
            .unwrap_or_else(|| {
                InventoryResult::failed(self.not_handled(Message::InventoryNotHandled))
            })
    }

    /// Generate a report; the first plugin result in load order wins
    pub async fn generate_report(&self, request: &ReportRequest) -> ReportResult {
        self.registry
            .dispatch_report(request)
            .await
            .into_iter()
            .next()
            .unwrap_or_else(|| ReportResult::failed(self.not_handled(Message::ReportNotHandled)))
    }

    /// Raise a data sync; every plugin result is returned
    pub async fn sync_data(&self, request: &SyncRequest) -> Vec<SyncResult> {
        self.registry.dispatch_sync(request).await
    }

    /// Snapshot of the application and its plugins
    pub fn get_system_status(&self) -> SystemStatus {
        SystemStatus {
            app: self.config.app.name.clone(),
            initialized: self.registry.is_initialized(),
            state: self.state(),
            registry_state: self.registry.state(),
            plugins: self.registry.get_plugin_info(),
            load_order: self.registry.load_order(),
            bootstrap_attempts: self.bootstrap_attempts.load(Ordering::Relaxed),
            store: self.store.stats(),
        }
    }

    /// Tear down every plugin and bootstrap again from the factories
    pub async fn reload_plugins(&self) -> Result<()> {
        tracing::info!("Reloading all plugins");
        self.set_state(AppState::Reloading);
        self.registry.cleanup().await;
        self.bootstrap().await
    }

    /// Tear down every plugin
    pub async fn shutdown(&self) {
        self.stop_watching_configs();
        self.registry.cleanup().await;
        self.set_state(AppState::Stopped);
        tracing::info!("Application stopped");
    }
}

/// Application builder
#[derive(Debug)]
pub struct AppBuilder {
    config: Option<AppConfig>,
    store: Option<BusinessStore>,
    factories: Vec<PluginFactory>,
    builtin_plugins: bool,
}

impl AppBuilder {
    /// Create a new application builder
    pub fn new() -> Self {
        Self {
            config: None,
            store: None,
            factories: Vec::new(),
            builtin_plugins: true,
        }
    }

    /// Set configuration
    pub fn config(mut self, config: AppConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Share an existing store
    pub fn store(mut self, store: BusinessStore) -> Self {
        self.store = Some(store);
        self
    }

    /// Add a plugin factory after the built-in ones
    pub fn plugin(mut self, factory: PluginFactory) -> Self {
        self.factories.push(factory);
        self
    }

    /// Enable/disable the built-in plugins
    pub fn builtin_plugins(mut self, enable: bool) -> Self {
        self.builtin_plugins = enable;
        self
    }

    /// Build the application
    ///
    /// The default configuration is used when none was set.
    pub fn build(self) -> Result<OmranApp> {
        let config = self.config.unwrap_or_default();
        omran_config::validate_config(&config)?;

        let mut factories = if self.builtin_plugins {
            builtin_factories()
        } else {
            Vec::new()
        };
        factories.extend(self.factories);

        tracing::debug!(
            factories = factories.len(),
            locale = %config.app.locale,
            "Application components initialized"
        );

        Ok(OmranApp {
            config: Arc::new(config),
            registry: PluginRegistry::new(),
            store: self.store.unwrap_or_default(),
            factories,
            state: RwLock::new(AppState::Created),
            bootstrap_attempts: AtomicU32::new(0),
            config_watch: Mutex::new(None),
        })
    }
}

impl Default for AppBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use omran_config::ConfigBuilder;
    use std::time::Duration;

    #[test]
    fn test_app_builder() {
        let app = AppBuilder::new().build().unwrap();

        assert_eq!(app.state(), AppState::Created);
        assert_eq!(app.factories.len(), 4);
        assert_eq!(app.registry().count(), 0);
    }

    #[test]
    fn test_builder_rejects_invalid_config() {
        let mut config = AppConfig::default();
        config.bootstrap.retry_delay = Duration::ZERO;

        assert!(AppBuilder::new().config(config).build().is_err());
    }

    #[tokio::test]
    async fn test_disabled_plugins_are_not_registered() {
        let config = ConfigBuilder::new()
            .disable_plugin("monitoring")
            .build()
            .unwrap();
        let app = OmranApp::builder().config(config).build().unwrap();

        app.bootstrap().await.unwrap();

        assert_eq!(app.registry().load_order(), vec!["inventory", "sales", "reports"]);
        assert_eq!(app.state(), AppState::Running);
    }

    #[tokio::test]
    async fn test_plugins_dir_is_watched_until_shutdown() {
        let dir = tempfile::tempdir().unwrap();
        let config = ConfigBuilder::new().plugins_dir(dir.path()).build().unwrap();
        let app = OmranApp::builder().config(config).build().unwrap();

        app.bootstrap().await.unwrap();
        assert!(app.is_watching_configs());

        app.reload_plugins().await.unwrap();
        assert!(app.is_watching_configs());

        app.shutdown().await;
        assert!(!app.is_watching_configs());
    }

    #[tokio::test]
    async fn test_missing_plugins_dir_does_not_block_bootstrap() {
        let dir = tempfile::tempdir().unwrap();
        let config = ConfigBuilder::new()
            .plugins_dir(dir.path().join("absent"))
            .build()
            .unwrap();
        let app = OmranApp::builder().config(config).build().unwrap();

        app.bootstrap().await.unwrap();

        assert_eq!(app.state(), AppState::Running);
        assert!(!app.is_watching_configs());
    }

    #[tokio::test]
    async fn test_shutdown() {
        let app = OmranApp::builder().build().unwrap();
        app.bootstrap().await.unwrap();

        app.shutdown().await;

        assert_eq!(app.state(), AppState::Stopped);
        assert_eq!(app.registry().count(), 0);
        assert!(!app.get_system_status().initialized);
    }
}
