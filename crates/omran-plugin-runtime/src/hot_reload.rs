//! Hot reload support for plugin configuration files
//!
//! A directory holds one file per plugin, named `<plugin>.json`,
//! `<plugin>.yaml`/`.yml` or `<plugin>.toml`. When a file is created or
//! modified its contents are shallow-merged into the plugin's live config
//! and the plugin is reloaded.

use crate::error::{PluginRuntimeError, Result};
use crate::registry::PluginRegistry;
use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use omran_plugin_api::PluginConfig;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

const CONFIG_EXTENSIONS: [&str; 4] = ["json", "yaml", "yml", "toml"];

/// Watches a directory of plugin config files and applies changes
#[derive(Debug)]
pub struct ConfigWatcher {
    /// Registry whose plugins are updated
    registry: PluginRegistry,

    /// Configuration directory to watch
    config_dir: PathBuf,

    /// File watcher
    watcher: Option<RecommendedWatcher>,

    /// Event receiver
    rx: Option<mpsc::UnboundedReceiver<notify::Result<Event>>>,

    /// Minimum time between two reloads of the same plugin
    debounce_duration: Duration,
}

impl ConfigWatcher {
    /// Create a new config watcher
    pub fn new(registry: PluginRegistry, config_dir: impl Into<PathBuf>) -> Self {
        Self {
            registry,
            config_dir: config_dir.into(),
            watcher: None,
            rx: None,
            debounce_duration: Duration::from_secs(1),
        }
    }

    /// Set debounce duration
    pub fn with_debounce(mut self, duration: Duration) -> Self {
        self.debounce_duration = duration;
        self
    }

    /// Start watching the configuration directory
    pub fn start(&mut self) -> Result<()> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.rx = Some(rx);

        let mut watcher = RecommendedWatcher::new(
            move |res| {
                let _ = tx.send(res);
            },
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;

        watcher.watch(&self.config_dir, RecursiveMode::NonRecursive)?;
        self.watcher = Some(watcher);

        info!(
            config_dir = %self.config_dir.display(),
            "Plugin config watcher started"
        );

        Ok(())
    }

    /// Stop watching
    pub fn stop(&mut self) {
        self.watcher = None;
        self.rx = None;
        info!("Plugin config watcher stopped");
    }

    /// Spawn the event loop
    ///
    /// The task ends when the watcher is stopped or dropped.
    pub fn run(&mut self) -> Result<JoinHandle<()>> {
        let mut rx = self
            .rx
            .take()
            .ok_or_else(|| PluginRuntimeError::invalid_state("Watcher not started"))?;

        let registry = self.registry.clone();
        let debounce = self.debounce_duration;

        Ok(tokio::spawn(async move {
            let mut last_reload: HashMap<String, Instant> = HashMap::new();

            while let Some(res) = rx.recv().await {
                let event = match res {
                    Ok(event) => event,
                    Err(e) => {
                        warn!(error = %e, "File watcher error");
                        continue;
                    }
                };

                if !Self::should_process_event(&event) {
                    continue;
                }

                for path in event.paths.iter().filter(|p| is_config_file(p)) {
                    let Some(plugin) = Self::plugin_name(path) else {
                        continue;
                    };

                    if last_reload
                        .get(&plugin)
                        .is_some_and(|at| at.elapsed() < debounce)
                    {
                        debug!(plugin = %plugin, "Skipping debounced config change");
                        continue;
                    }

                    let event = Self::apply_file(&registry, path).await;
                    if event.success {
                        last_reload.insert(plugin, Instant::now());
                    }
                }
            }
        }))
    }

    /// Whether a file system event concerns a plugin config file
    pub fn should_process_event(event: &Event) -> bool {
        matches!(event.kind, EventKind::Modify(_) | EventKind::Create(_))
            && event.paths.iter().any(|path| is_config_file(path))
    }

    /// Plugin name for a config file path (its file stem)
    pub fn plugin_name(path: &Path) -> Option<String> {
        path.file_stem().and_then(|s| s.to_str()).map(String::from)
    }

    /// Parse a plugin config file
    pub async fn load_config(path: &Path) -> Result<PluginConfig> {
        let content = tokio::fs::read_to_string(path).await?;

        let extension = path.extension().and_then(|s| s.to_str()).unwrap_or("");

        let value: serde_json::Value = match extension {
            "json" => serde_json::from_str(&content)?,
            "yaml" | "yml" => serde_yaml::from_str(&content)
                .map_err(|e| PluginRuntimeError::config(format!("YAML parse error: {}", e)))?,
            "toml" => {
                let toml: toml::Value = content
                    .parse()
                    .map_err(|e| PluginRuntimeError::config(format!("TOML parse error: {}", e)))?;
                serde_json::to_value(toml)?
            }
            _ => {
                return Err(PluginRuntimeError::config(format!(
                    "Unsupported config format: {}",
                    extension
                )))
            }
        };

        Ok(PluginConfig::from_value(value)?)
    }

    /// Merge one config file into its plugin and reload the plugin
    pub async fn apply_file(registry: &PluginRegistry, path: &Path) -> ReloadEvent {
        let Some(plugin) = Self::plugin_name(path) else {
            return ReloadEvent::failed(String::new(), "config file has no usable name");
        };

        if !registry.contains(&plugin) {
            warn!(plugin = %plugin, path = %path.display(), "Config file for unknown plugin");
            return ReloadEvent::failed(plugin, "plugin not registered");
        }

        let config = match Self::load_config(path).await {
            Ok(config) => config,
            Err(e) => {
                error!(plugin = %plugin, error = %e, "Failed to load plugin config");
                return ReloadEvent::failed(plugin, e.to_string());
            }
        };

        if !registry.update_plugin_config(&plugin, &config) {
            return ReloadEvent::failed(plugin, "plugin not registered");
        }

        // initialize will pick up the merged config
        if !registry.is_initialized() {
            debug!(plugin = %plugin, "Registry not initialized; config merged without reload");
            return ReloadEvent::succeeded(plugin);
        }

        if registry.reload_plugin(&plugin).await {
            info!(plugin = %plugin, "Plugin config reloaded");
            ReloadEvent::succeeded(plugin)
        } else {
            ReloadEvent::failed(plugin, "plugin reload failed")
        }
    }
}

fn is_config_file(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .is_some_and(|ext| CONFIG_EXTENSIONS.contains(&ext))
}

/// Plugin reload event
#[derive(Debug, Clone)]
pub struct ReloadEvent {
    /// Plugin name
    pub plugin_name: String,

    /// Timestamp of the reload
    pub timestamp: chrono::DateTime<chrono::Utc>,

    /// Whether the reload was successful
    pub success: bool,

    /// Error message if reload failed
    pub error: Option<String>,
}

impl ReloadEvent {
    fn succeeded(plugin_name: String) -> Self {
        Self {
            plugin_name,
            timestamp: chrono::Utc::now(),
            success: true,
            error: None,
        }
    }

    fn failed(plugin_name: String, error: impl Into<String>) -> Self {
        Self {
            plugin_name,
            timestamp: chrono::Utc::now(),
            success: false,
            error: Some(error.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::InitializeOptions;
    use omran_plugin_api::testing::MockPlugin;
    use serde_json::json;

    #[test]
    fn test_plugin_name() {
        let path = PathBuf::from("/etc/omran/plugins/sales.yaml");
        assert_eq!(ConfigWatcher::plugin_name(&path), Some("sales".to_string()));

        let path = PathBuf::from("/etc/omran/plugins/inventory.json");
        assert_eq!(
            ConfigWatcher::plugin_name(&path),
            Some("inventory".to_string())
        );
    }

    #[test]
    fn test_should_process_event() {
        let event = Event::new(EventKind::Modify(notify::event::ModifyKind::Data(
            notify::event::DataChange::Content,
        )))
        .add_path(PathBuf::from("/tmp/plugins/sales.toml"));
        assert!(ConfigWatcher::should_process_event(&event));

        let event = Event::new(EventKind::Modify(notify::event::ModifyKind::Data(
            notify::event::DataChange::Content,
        )))
        .add_path(PathBuf::from("/tmp/plugins/notes.txt"));
        assert!(!ConfigWatcher::should_process_event(&event));

        let event = Event::new(EventKind::Remove(notify::event::RemoveKind::File))
            .add_path(PathBuf::from("/tmp/plugins/sales.json"));
        assert!(!ConfigWatcher::should_process_event(&event));
    }

    #[tokio::test]
    async fn test_load_config_formats() {
        let dir = tempfile::tempdir().unwrap();

        let json_path = dir.path().join("sales.json");
        std::fs::write(&json_path, r#"{"tax_rate": 0.15}"#).unwrap();
        let config = ConfigWatcher::load_config(&json_path).await.unwrap();
        assert_eq!(config.get_f64("tax_rate"), Some(0.15));

        let yaml_path = dir.path().join("inventory.yaml");
        std::fs::write(&yaml_path, "low_stock_threshold: 3\n").unwrap();
        let config = ConfigWatcher::load_config(&yaml_path).await.unwrap();
        assert_eq!(config.get_i64("low_stock_threshold"), Some(3));

        let toml_path = dir.path().join("reports.toml");
        std::fs::write(&toml_path, "default_limit = 10\n").unwrap();
        let config = ConfigWatcher::load_config(&toml_path).await.unwrap();
        assert_eq!(config.get_i64("default_limit"), Some(10));

        let list_path = dir.path().join("broken.json");
        std::fs::write(&list_path, "[1, 2, 3]").unwrap();
        assert!(ConfigWatcher::load_config(&list_path).await.is_err());
    }

    #[tokio::test]
    async fn test_apply_file_merges_and_reloads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sales.json");
        std::fs::write(&path, r#"{"tax_rate": 0.15}"#).unwrap();

        let plugin = MockPlugin::new("sales")
            .lifecycle()
            .config(json!({"tax_rate": 0.0, "currency": "SAR"}));
        let handle = plugin.clone();

        let registry = PluginRegistry::new();
        registry.register(Box::new(plugin));
        registry.initialize(InitializeOptions::default()).await;

        let event = ConfigWatcher::apply_file(&registry, &path).await;

        assert!(event.success);
        assert_eq!(event.plugin_name, "sales");
        assert_eq!(handle.init_count(), 2);
        let live = registry.get_plugin("sales").unwrap().config.read().clone();
        assert_eq!(live.get_f64("tax_rate"), Some(0.15));
        assert_eq!(live.get_str("currency"), Some("SAR"));
    }

    #[tokio::test]
    async fn test_apply_file_before_initialize_only_merges() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sales.json");
        std::fs::write(&path, r#"{"tax_rate": 0.15}"#).unwrap();

        let plugin = MockPlugin::new("sales")
            .lifecycle()
            .config(json!({"tax_rate": 0.0}));
        let handle = plugin.clone();

        let registry = PluginRegistry::new();
        registry.register(Box::new(plugin));

        let event = ConfigWatcher::apply_file(&registry, &path).await;

        assert!(event.success);
        assert_eq!(handle.init_count(), 0);
        assert_eq!(handle.destroy_count(), 0);

        registry.initialize(InitializeOptions::default()).await;

        assert_eq!(handle.init_count(), 1);
        assert_eq!(
            handle.last_init_config().unwrap().get_f64("tax_rate"),
            Some(0.15)
        );
    }

    #[tokio::test]
    async fn test_apply_file_for_unknown_plugin() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ghost.json");
        std::fs::write(&path, "{}").unwrap();

        let event = ConfigWatcher::apply_file(&PluginRegistry::new(), &path).await;

        assert!(!event.success);
        assert_eq!(event.error.as_deref(), Some("plugin not registered"));
    }

    #[tokio::test]
    async fn test_run_requires_start() {
        let mut watcher = ConfigWatcher::new(PluginRegistry::new(), "/tmp/omran-plugins");
        assert!(watcher.run().is_err());
    }
}
