//! Configuration file merging
//!
//! Later files override earlier files, allowing for layered configuration:
//! - base.yaml (defaults)
//! - shop.yaml (installation-specific)
//! - local.yaml (developer overrides)
//!
//! Layers are merged as raw documents before deserialization, so a layer
//! only overrides the keys it actually sets.

use serde_json::{Map, Value};

/// Merge configuration documents, later layers winning
///
/// Top-level sections are merged key by key. Under `plugins`, settings are
/// merged per plugin and each plugin's `config` is merged shallowly, the
/// same way the registry merges config updates. Arrays such as
/// `bootstrap.load_order` are replaced, never concatenated.
pub fn merge_layers(layers: Vec<Value>) -> Value {
    let mut merged = Map::new();

    for layer in layers {
        match layer {
            Value::Object(layer) => merge_document(&mut merged, layer),
            Value::Null => {}
            other => {
                tracing::warn!(layer = %other, "Ignoring configuration layer that is not a mapping");
            }
        }
    }

    Value::Object(merged)
}

fn merge_document(base: &mut Map<String, Value>, overlay: Map<String, Value>) {
    for (key, value) in overlay {
        match (base.get_mut(&key), value) {
            (Some(Value::Object(existing)), Value::Object(incoming)) => {
                if key == "plugins" {
                    merge_plugins(existing, incoming);
                } else {
                    existing.extend(incoming);
                }
            }
            (_, value) => {
                base.insert(key, value);
            }
        }
    }
}

fn merge_plugins(base: &mut Map<String, Value>, overlay: Map<String, Value>) {
    for (name, settings) in overlay {
        match (base.get_mut(&name), settings) {
            (Some(Value::Object(existing)), Value::Object(incoming)) => {
                for (field, value) in incoming {
                    match (existing.get_mut(&field), value) {
                        (Some(Value::Object(config)), Value::Object(partial))
                            if field == "config" =>
                        {
                            config.extend(partial);
                        }
                        (_, value) => {
                            existing.insert(field, value);
                        }
                    }
                }
            }
            (_, settings) => {
                base.insert(name, settings);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AppConfig;
    use serde_json::json;
    use std::time::Duration;

    #[test]
    fn test_later_layer_wins_per_key() {
        let base = json!({
            "app": { "name": "Omran", "locale": "ar" },
            "bootstrap": { "retry_delay": "5s", "max_retries": 10 }
        });
        let overlay = json!({
            "app": { "locale": "en" },
            "bootstrap": { "retry_delay": "1s" }
        });

        let config: AppConfig = serde_json::from_value(merge_layers(vec![base, overlay])).unwrap();

        assert_eq!(config.app.name, "Omran");
        assert_eq!(config.app.locale.to_string(), "en");
        assert_eq!(config.bootstrap.retry_delay, Duration::from_secs(1));
        assert_eq!(config.bootstrap.max_retries, Some(10));
    }

    #[test]
    fn test_plugin_config_merges_shallowly() {
        let base = json!({
            "plugins": {
                "sales": { "config": { "a": 1, "b": 2, "nested": { "x": 1 } } },
                "reports": { "enabled": false }
            }
        });
        let overlay = json!({
            "plugins": {
                "sales": { "enabled": false, "config": { "b": 3, "c": 4, "nested": { "y": 2 } } },
                "monitoring": { "config": { "interval": "1m" } }
            }
        });

        let merged = merge_layers(vec![base, overlay]);

        assert_eq!(
            merged["plugins"]["sales"],
            json!({
                "enabled": false,
                "config": { "a": 1, "b": 3, "c": 4, "nested": { "y": 2 } }
            })
        );
        assert_eq!(merged["plugins"]["reports"], json!({ "enabled": false }));
        assert_eq!(merged["plugins"]["monitoring"]["config"]["interval"], "1m");
    }

    #[test]
    fn test_load_order_is_replaced() {
        let base = json!({ "bootstrap": { "load_order": ["inventory", "sales", "reports"] } });
        let overlay = json!({ "bootstrap": { "load_order": ["sales"] } });

        let merged = merge_layers(vec![base, overlay]);

        assert_eq!(merged["bootstrap"]["load_order"], json!(["sales"]));
    }

    #[test]
    fn test_merge_nothing() {
        assert_eq!(merge_layers(vec![]), json!({}));
    }
}
