//! Plugin factories

use crate::store::BusinessStore;
use omran_config::AppConfig;
use omran_plugin_api::{Plugin, PluginError};
use std::fmt;
use std::sync::Arc;

/// Shared services handed to every plugin factory
#[derive(Debug, Clone)]
pub struct PluginServices {
    /// Business data shared by the built-in plugins
    pub store: BusinessStore,

    /// Application configuration the plugins are bootstrapped with
    pub config: Arc<AppConfig>,
}

type BuildFn = dyn Fn(&PluginServices) -> Result<Box<dyn Plugin>, PluginError> + Send + Sync;

/// Named constructor for one plugin
///
/// Bootstrapping, and every full reload, calls each factory again to get
/// a fresh plugin instance.
#[derive(Clone)]
pub struct PluginFactory {
    name: String,
    build: Arc<BuildFn>,
}

impl PluginFactory {
    /// Create a factory; `name` must match the name of the plugins it builds
    pub fn new<F>(name: impl Into<String>, build: F) -> Self
    where
        F: Fn(&PluginServices) -> Result<Box<dyn Plugin>, PluginError> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            build: Arc::new(build),
        }
    }

    /// Plugin name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Build a plugin instance
    pub fn create(&self, services: &PluginServices) -> Result<Box<dyn Plugin>, PluginError> {
        (self.build)(services)
    }
}

impl fmt::Debug for PluginFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PluginFactory")
            .field("name", &self.name)
            .finish()
    }
}
