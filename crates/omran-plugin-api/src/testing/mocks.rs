//! Mock implementations for testing

use crate::config::PluginConfig;
use crate::error::PluginError;
use crate::hook::{HookName, HookResponse};
use crate::inventory::{InventoryResult, InventoryUpdate};
use crate::plugin::Plugin;
use crate::report::{ReportRequest, ReportResult};
use crate::sale::{SaleRequest, SaleResult};
use crate::sync::{SyncRequest, SyncResult};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

/// Ordered record of `(plugin, hook)` invocations, shareable across mocks
#[derive(Debug, Clone, Default)]
pub struct Journal {
    entries: Arc<Mutex<Vec<(String, HookName)>>>,
}

impl Journal {
    /// Create an empty journal
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an invocation
    pub fn record(&self, plugin: &str, hook: HookName) {
        self.entries.lock().unwrap().push((plugin.to_string(), hook));
    }

    /// All invocations in order
    pub fn entries(&self) -> Vec<(String, HookName)> {
        self.entries.lock().unwrap().clone()
    }

    /// Plugins that received `hook`, in invocation order
    pub fn calls(&self, hook: HookName) -> Vec<String> {
        self.entries
            .lock()
            .unwrap()
            .iter()
            .filter(|(_, h)| *h == hook)
            .map(|(plugin, _)| plugin.clone())
            .collect()
    }

    /// Number of times `plugin` received `hook`
    pub fn count(&self, plugin: &str, hook: HookName) -> usize {
        self.entries
            .lock()
            .unwrap()
            .iter()
            .filter(|(p, h)| p == plugin && *h == hook)
            .count()
    }

    /// Forget all recorded invocations
    pub fn clear(&self) {
        self.entries.lock().unwrap().clear();
    }
}

/// What a mock does when one of its hooks is invoked
#[derive(Debug, Clone)]
pub enum MockBehavior {
    /// Succeed; event hooks contribute nothing
    Observe,
    /// Event hooks return this response
    Respond(HookResponse),
    /// Fail with a runtime error
    Fail(String),
}

/// Mock plugin for testing
///
/// Clones share the journal and the recorded init configurations, so a
/// test can keep a handle after boxing the plugin into a registry.
#[derive(Debug, Clone)]
pub struct MockPlugin {
    name: String,
    version: String,
    description: String,
    dependencies: Vec<String>,
    config: PluginConfig,
    behaviors: BTreeMap<HookName, MockBehavior>,
    journal: Journal,
    init_configs: Arc<Mutex<Vec<PluginConfig>>>,
}

impl MockPlugin {
    /// Create a new mock plugin that implements no hooks
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: "1.0.0".to_string(),
            description: String::new(),
            dependencies: Vec::new(),
            config: PluginConfig::new(),
            behaviors: BTreeMap::new(),
            journal: Journal::new(),
            init_configs: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Set the version
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Set the description
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Declare a dependency
    pub fn depends_on(mut self, name: impl Into<String>) -> Self {
        self.dependencies.push(name.into());
        self
    }

    /// Set the default configuration (must be a JSON object)
    pub fn config(mut self, config: serde_json::Value) -> Self {
        self.config = PluginConfig::from_value(config).unwrap();
        self
    }

    /// Record invocations into a shared journal
    pub fn journal(mut self, journal: &Journal) -> Self {
        self.journal = journal.clone();
        self
    }

    /// Implement `onInit` and `onDestroy`
    pub fn lifecycle(self) -> Self {
        self.observe(HookName::OnInit).observe(HookName::OnDestroy)
    }

    /// Implement a hook that succeeds without a result
    pub fn observe(mut self, hook: HookName) -> Self {
        self.behaviors.insert(hook, MockBehavior::Observe);
        self
    }

    /// Implement the response's hook, returning the response
    pub fn respond(mut self, response: HookResponse) -> Self {
        self.behaviors
            .insert(response.hook(), MockBehavior::Respond(response));
        self
    }

    /// Implement a hook that always fails
    pub fn fail(mut self, hook: HookName, message: impl Into<String>) -> Self {
        self.behaviors.insert(hook, MockBehavior::Fail(message.into()));
        self
    }

    /// Number of `on_init` calls
    pub fn init_count(&self) -> usize {
        self.journal.count(&self.name, HookName::OnInit)
    }

    /// Number of `on_destroy` calls
    pub fn destroy_count(&self) -> usize {
        self.journal.count(&self.name, HookName::OnDestroy)
    }

    /// Configuration passed to the most recent `on_init`
    pub fn last_init_config(&self) -> Option<PluginConfig> {
        self.init_configs.lock().unwrap().last().cloned()
    }

    fn run(&self, hook: HookName) -> Result<Option<HookResponse>, PluginError> {
        self.journal.record(&self.name, hook);
        match self.behaviors.get(&hook) {
            Some(MockBehavior::Respond(response)) => Ok(Some(response.clone())),
            Some(MockBehavior::Fail(message)) => Err(PluginError::runtime(message)),
            Some(MockBehavior::Observe) | None => Ok(None),
        }
    }
}

#[async_trait]
impl Plugin for MockPlugin {
    fn name(&self) -> &str {
        &self.name
    }

    fn version(&self) -> &str {
        &self.version
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn dependencies(&self) -> Vec<String> {
        self.dependencies.clone()
    }

    fn hooks(&self) -> Vec<HookName> {
        self.behaviors.keys().copied().collect()
    }

    fn default_config(&self) -> PluginConfig {
        self.config.clone()
    }

    async fn on_init(&mut self, config: &PluginConfig) -> Result<(), PluginError> {
        self.init_configs.lock().unwrap().push(config.clone());
        self.run(HookName::OnInit).map(|_| ())
    }

    async fn on_destroy(&mut self) -> Result<(), PluginError> {
        self.run(HookName::OnDestroy).map(|_| ())
    }

    async fn on_data_sync(&self, _request: &SyncRequest) -> Result<Option<SyncResult>, PluginError> {
        Ok(self.run(HookName::OnDataSync)?.and_then(HookResponse::into_sync))
    }

    async fn on_sale_process(&self, _sale: &SaleRequest) -> Result<Option<SaleResult>, PluginError> {
        Ok(self.run(HookName::OnSaleProcess)?.and_then(HookResponse::into_sale))
    }

    async fn on_inventory_update(
        &self,
        _update: &InventoryUpdate,
    ) -> Result<Option<InventoryResult>, PluginError> {
        Ok(self
            .run(HookName::OnInventoryUpdate)?
            .and_then(HookResponse::into_inventory))
    }

    async fn on_report_generate(
        &self,
        _request: &ReportRequest,
    ) -> Result<Option<ReportResult>, PluginError> {
        Ok(self
            .run(HookName::OnReportGenerate)?
            .and_then(HookResponse::into_report))
    }
}
