//! Configuration loading

use crate::error::{ConfigError, Result};
use crate::{AppConfig, ConfigFormat};
use regex::Regex;
use serde_json::Value;
use std::env;
use std::fs;
use std::path::Path;

/// Load configuration from a file
pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let document = read_document(path.as_ref())?;
    into_config(document)
}

/// Load configuration from a string
pub fn load_from_str(content: &str, format: ConfigFormat) -> Result<AppConfig> {
    into_config(parse_document(content, format)?)
}

/// Load a single file and validate it
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let config = load_from_file(path)?;
    crate::validator::validate_config(&config)?;
    Ok(config)
}

/// Load and merge multiple configuration files
///
/// Files are merged in order, with later files overriding earlier ones.
/// This enables layered configuration:
/// - base.yaml (common defaults)
/// - shop.yaml (per-installation settings)
/// - local.yaml (developer overrides)
///
/// # Example
///
/// ```no_run
/// use omran_config::load_and_merge;
///
/// let config = load_and_merge(vec!["config/base.yaml", "config/shop.yaml"])?;
/// # Ok::<(), omran_config::ConfigError>(())
/// ```
pub fn load_and_merge<P: AsRef<Path>>(paths: Vec<P>) -> Result<AppConfig> {
    if paths.is_empty() {
        return Err(ConfigError::validation("No configuration files provided"));
    }

    let layers = paths
        .iter()
        .map(|path| read_document(path.as_ref()))
        .collect::<Result<Vec<_>>>()?;

    let merged = into_config(crate::merger::merge_layers(layers))?;
    crate::validator::validate_config(&merged)?;

    Ok(merged)
}

fn read_document(path: &Path) -> Result<Value> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let format = ConfigFormat::from_path(path)?;
    parse_document(&content, format)
}

/// Parse a document into a JSON value after environment expansion
pub(crate) fn parse_document(content: &str, format: ConfigFormat) -> Result<Value> {
    let expanded = expand_env_vars(content)?;

    let value = match format {
        ConfigFormat::Yaml => serde_yaml::from_str::<Value>(&expanded)
            .map_err(|e| ConfigError::parse("YAML", e))?,
        ConfigFormat::Toml => {
            let value: toml::Value =
                toml::from_str(&expanded).map_err(|e| ConfigError::parse("TOML", e))?;
            serde_json::to_value(value).map_err(|e| ConfigError::parse("TOML", e))?
        }
        ConfigFormat::Json => {
            serde_json::from_str(&expanded).map_err(|e| ConfigError::parse("JSON", e))?
        }
    };

    // An empty YAML document parses as null
    Ok(match value {
        Value::Null => Value::Object(Default::default()),
        other => other,
    })
}

fn into_config(document: Value) -> Result<AppConfig> {
    serde_json::from_value(document).map_err(|e| ConfigError::parse("config", e))
}

/// Expand environment variables in configuration string
/// Supports syntax: ${VAR} and ${VAR:-default}
fn expand_env_vars(content: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)(:-([^}]*))?\}")
        .map_err(|e| ConfigError::validation(format!("Invalid regex: {e}")))?;

    let mut result = String::with_capacity(content.len());
    let mut last_match = 0;

    for cap in re.captures_iter(content) {
        let Some(full_match) = cap.get(0) else {
            continue;
        };
        let var_name = &cap[1];
        let default_value = cap.get(3).map(|m| m.as_str());

        let value = match (env::var(var_name), default_value) {
            (Ok(value), _) => value,
            (Err(_), Some(default)) => default.to_string(),
            (Err(_), None) => return Err(ConfigError::MissingEnvVar(var_name.to_string())),
        };

        result.push_str(&content[last_match..full_match.start()]);
        result.push_str(&value);
        last_match = full_match.end();
    }

    result.push_str(&content[last_match..]);

    Ok(result)
}
