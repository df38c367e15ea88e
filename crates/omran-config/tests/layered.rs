use omran_config::{load_and_merge, ConfigError, Locale, LogFormat};
use std::fs;
use std::time::Duration;

#[test]
fn layers_in_different_formats_merge_in_order() {
    let dir = tempfile::tempdir().unwrap();

    let base = dir.path().join("base.yaml");
    fs::write(
        &base,
        r#"
app:
  name: Omran
bootstrap:
  retry_delay: 5s
plugins:
  inventory:
    config:
      low_stock_threshold: 5
      initial_stock:
        tea: 10
"#,
    )
    .unwrap();

    let shop = dir.path().join("shop.toml");
    fs::write(
        &shop,
        r#"
[app]
locale = "en"

[bootstrap]
max_retries = 2

[plugins.inventory.config]
low_stock_threshold = 2

[plugins.monitoring]
enabled = false
"#,
    )
    .unwrap();

    let local = dir.path().join("local.json");
    fs::write(&local, r#"{"logging": {"format": "json"}}"#).unwrap();

    let config = load_and_merge(vec![&base, &shop, &local]).unwrap();

    assert_eq!(config.app.name, "Omran");
    assert_eq!(config.app.locale, Locale::En);
    assert_eq!(config.bootstrap.retry_delay, Duration::from_secs(5));
    assert_eq!(config.bootstrap.max_retries, Some(2));
    assert_eq!(config.logging.format, LogFormat::Json);
    assert!(!config.is_plugin_enabled("monitoring"));

    let inventory = &config.plugin("inventory").unwrap().config;
    assert_eq!(inventory.get_i64("low_stock_threshold"), Some(2));
    assert!(inventory.contains_key("initial_stock"));
}

#[test]
fn merged_result_is_validated() {
    let dir = tempfile::tempdir().unwrap();

    let base = dir.path().join("base.yaml");
    fs::write(&base, "logging:\n  level: info\n").unwrap();

    let overlay = dir.path().join("overlay.yaml");
    fs::write(&overlay, "logging:\n  level: loud\n").unwrap();

    let result = load_and_merge(vec![&base, &overlay]);
    assert!(matches!(result, Err(ConfigError::Validation(_))));
}

#[test]
fn no_layers_is_an_error() {
    let result = load_and_merge(Vec::<&str>::new());
    assert!(result.is_err());
}
