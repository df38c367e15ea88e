//! Registry initialization options

use serde::{Deserialize, Serialize};

/// Options for [`PluginRegistry::initialize`](crate::PluginRegistry::initialize)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitializeOptions {
    /// Explicit initialization order; the registry's recorded order is used when absent
    #[serde(default)]
    pub load_order: Option<Vec<String>>,

    /// Accepted for compatibility with plugin descriptors; initialization
    /// always attempts every plugin in the effective order
    #[serde(default = "default_auto_init")]
    pub auto_init: bool,
}

fn default_auto_init() -> bool {
    true
}

impl Default for InitializeOptions {
    fn default() -> Self {
        Self {
            load_order: None,
            auto_init: true,
        }
    }
}

impl InitializeOptions {
    /// Use the registry's recorded order
    pub fn new() -> Self {
        Self::default()
    }

    /// Initialize in an explicit order
    pub fn with_load_order<I, S>(order: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            load_order: Some(order.into_iter().map(Into::into).collect()),
            ..Self::default()
        }
    }

    /// Set the auto-init flag
    pub fn auto_init(mut self, auto_init: bool) -> Self {
        self.auto_init = auto_init;
        self
    }
}
