//! Configuration types

use omran_plugin_api::PluginConfig;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Order in which the built-in plugins are initialized
pub const DEFAULT_LOAD_ORDER: [&str; 4] = ["inventory", "sales", "reports", "monitoring"];

/// Log levels accepted by `logging.level`
pub const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Main configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application settings
    #[serde(default)]
    pub app: AppSettings,

    /// Plugin bootstrap settings
    #[serde(default)]
    pub bootstrap: BootstrapConfig,

    /// Per-plugin settings, keyed by plugin name
    #[serde(default)]
    pub plugins: BTreeMap<String, PluginSettings>,

    /// Logging
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Settings for one plugin
    pub fn plugin(&self, name: &str) -> Option<&PluginSettings> {
        self.plugins.get(name)
    }

    /// Whether a plugin may be registered; plugins without settings are enabled
    pub fn is_plugin_enabled(&self, name: &str) -> bool {
        self.plugin(name).map_or(true, |settings| settings.enabled)
    }
}

/// Application settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppSettings {
    /// Display name
    #[serde(default = "default_app_name")]
    pub name: String,

    /// Language of user-facing messages
    #[serde(default)]
    pub locale: Locale,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            name: default_app_name(),
            locale: Locale::default(),
        }
    }
}

/// Language of user-facing messages
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    /// Arabic
    #[default]
    Ar,
    /// English
    En,
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locale::Ar => f.write_str("ar"),
            Locale::En => f.write_str("en"),
        }
    }
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ar" => Ok(Locale::Ar),
            "en" => Ok(Locale::En),
            other => Err(format!("unknown locale: {other}")),
        }
    }
}

/// Plugin bootstrap settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BootstrapConfig {
    /// Explicit initialization order
    #[serde(default = "default_load_order")]
    pub load_order: Vec<String>,

    /// Passed through to the registry's initialize options
    #[serde(default = "default_true")]
    pub auto_init: bool,

    /// Fixed delay between bootstrap attempts
    #[serde(default = "default_retry_delay", with = "humantime_serde")]
    pub retry_delay: Duration,

    /// Retries after the first failed attempt (unlimited when absent)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_retries: Option<u32>,

    /// Directory of `<plugin>.{json,yaml,yml,toml}` files watched for config changes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plugins_dir: Option<PathBuf>,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            load_order: default_load_order(),
            auto_init: true,
            retry_delay: default_retry_delay(),
            max_retries: None,
            plugins_dir: None,
        }
    }
}

/// Settings for one plugin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PluginSettings {
    /// Register the plugin at bootstrap
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Merged over the plugin's default config at bootstrap
    #[serde(default)]
    pub config: PluginConfig,
}

impl Default for PluginSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            config: PluginConfig::new(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format
    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable text
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

fn default_app_name() -> String {
    "Omran".to_string()
}

fn default_load_order() -> Vec<String> {
    DEFAULT_LOAD_ORDER.iter().map(|s| s.to_string()).collect()
}

fn default_true() -> bool {
    true
}

fn default_retry_delay() -> Duration {
    Duration::from_secs(5)
}

fn default_log_level() -> String {
    "info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.app.name, "Omran");
        assert_eq!(config.app.locale, Locale::Ar);
        assert_eq!(
            config.bootstrap.load_order,
            vec!["inventory", "sales", "reports", "monitoring"]
        );
        assert_eq!(config.bootstrap.retry_delay, Duration::from_secs(5));
        assert_eq!(config.bootstrap.max_retries, None);
        assert_eq!(config.logging.format, LogFormat::Text);
    }

    #[test]
    fn test_empty_document_uses_defaults() {
        let config: AppConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_plugin_enabled_lookup() {
        let config: AppConfig = serde_json::from_value(serde_json::json!({
            "plugins": {
                "monitoring": { "enabled": false },
                "sales": { "config": { "tax_rate": 0.15 } }
            }
        }))
        .unwrap();

        assert!(!config.is_plugin_enabled("monitoring"));
        assert!(config.is_plugin_enabled("sales"));
        assert!(config.is_plugin_enabled("inventory"));
        assert_eq!(
            config.plugin("sales").unwrap().config.get_f64("tax_rate"),
            Some(0.15)
        );
    }

    #[test]
    fn test_locale_parse() {
        assert_eq!("EN".parse::<Locale>().unwrap(), Locale::En);
        assert_eq!(Locale::Ar.to_string(), "ar");
        assert!("fr".parse::<Locale>().is_err());
    }
}
