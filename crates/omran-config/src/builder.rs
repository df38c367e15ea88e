//! Configuration builder

use crate::error::{ConfigError, Result};
use crate::types::{AppConfig, Locale, LogFormat};
use omran_plugin_api::PluginConfig;
use std::path::PathBuf;
use std::time::Duration;

/// Builder for constructing configuration programmatically
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    config: AppConfig,
}

impl ConfigBuilder {
    /// Start from the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing configuration
    pub fn from_config(config: AppConfig) -> Self {
        Self { config }
    }

    /// Set the application name
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.config.app.name = name.into();
        self
    }

    /// Set the message locale
    pub fn locale(mut self, locale: Locale) -> Self {
        self.config.app.locale = locale;
        self
    }

    /// Set the plugin initialization order
    pub fn load_order<I, S>(mut self, order: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.bootstrap.load_order = order.into_iter().map(Into::into).collect();
        self
    }

    /// Set the delay between bootstrap attempts
    pub fn retry_delay(mut self, delay: Duration) -> Self {
        self.config.bootstrap.retry_delay = delay;
        self
    }

    /// Cap the number of bootstrap retries
    pub fn max_retries(mut self, retries: u32) -> Self {
        self.config.bootstrap.max_retries = Some(retries);
        self
    }

    /// Watch a directory of plugin config files
    pub fn plugins_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.bootstrap.plugins_dir = Some(dir.into());
        self
    }

    /// Merge config for one plugin (must be a JSON object)
    pub fn plugin_config(mut self, name: impl Into<String>, config: serde_json::Value) -> Result<Self> {
        let partial = PluginConfig::from_value(config).map_err(ConfigError::validation)?;
        self.config
            .plugins
            .entry(name.into())
            .or_default()
            .config
            .merge(&partial);
        Ok(self)
    }

    /// Keep a plugin from being registered
    pub fn disable_plugin(mut self, name: impl Into<String>) -> Self {
        self.config.plugins.entry(name.into()).or_default().enabled = false;
        self
    }

    /// Set the log level
    pub fn log_level(mut self, level: impl Into<String>) -> Self {
        self.config.logging.level = level.into();
        self
    }

    /// Set the log format
    pub fn log_format(mut self, format: LogFormat) -> Self {
        self.config.logging.format = format;
        self
    }

    /// Validate and build the configuration
    pub fn build(self) -> Result<AppConfig> {
        crate::validator::validate_config(&self.config)?;
        Ok(self.config)
    }
}
