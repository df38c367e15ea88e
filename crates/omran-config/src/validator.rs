//! Configuration validation

use crate::error::{ConfigError, Result};
use crate::types::LOG_LEVELS;
use crate::AppConfig;
use std::collections::HashSet;

/// Validate configuration
pub fn validate_config(config: &AppConfig) -> Result<()> {
    validate_app(config)?;
    validate_bootstrap(config)?;
    validate_plugins(config)?;
    validate_logging(config)?;

    Ok(())
}

fn validate_app(config: &AppConfig) -> Result<()> {
    if config.app.name.trim().is_empty() {
        return Err(ConfigError::validation("app name cannot be empty"));
    }

    Ok(())
}

fn validate_bootstrap(config: &AppConfig) -> Result<()> {
    let bootstrap = &config.bootstrap;

    if bootstrap.retry_delay.is_zero() {
        return Err(ConfigError::validation("bootstrap retry_delay must be > 0"));
    }

    let mut seen = HashSet::new();
    for name in &bootstrap.load_order {
        if name.trim().is_empty() {
            return Err(ConfigError::validation("load_order entries cannot be empty"));
        }
        if !seen.insert(name.as_str()) {
            return Err(ConfigError::validation(format!(
                "Plugin listed twice in load_order: {name}"
            )));
        }
    }

    if bootstrap.load_order.is_empty() {
        tracing::warn!("bootstrap load_order is empty; plugins initialize in registration order");
    }

    Ok(())
}

fn validate_plugins(config: &AppConfig) -> Result<()> {
    for (name, settings) in &config.plugins {
        if name.trim().is_empty() {
            return Err(ConfigError::validation("plugin name cannot be empty"));
        }

        if !settings.enabled && config.bootstrap.load_order.contains(name) {
            tracing::warn!(plugin = %name, "Disabled plugin is listed in load_order and will be skipped");
        }
    }

    Ok(())
}

fn validate_logging(config: &AppConfig) -> Result<()> {
    let level = config.logging.level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        return Err(ConfigError::validation(format!(
            "Invalid log level: {} (must be one of {})",
            config.logging.level,
            LOG_LEVELS.join(", ")
        )));
    }

    Ok(())
}
