//! Plugin system
//!
//! Provides a Vite/Rollup-style plugin API: plugins contribute configuration
//! fragments before the build and may take part in module resolution.

mod aliases;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use tracing::debug;

use crate::config::UserConfig;

pub use aliases::{to_aliases, TsconfigAliases, PLUGIN_NAME};

/// Plugin hook context
pub struct PluginContext {
    /// Project root directory
    pub root: PathBuf,
}

/// Result of a resolve hook
#[derive(Debug, PartialEq, Eq)]
pub enum ResolveResult {
    /// Continue to next plugin
    Skip,
    /// Resolved path
    Resolved(PathBuf),
}

/// Plugin trait - implement this to create a plugin
#[async_trait]
pub trait Plugin: Send + Sync {
    /// Plugin name for logging and debugging
    fn name(&self) -> &str;

    /// Called while the host resolves its configuration.
    /// Return a fragment to merge into the user configuration.
    async fn config(&self, _ctx: &PluginContext) -> Result<Option<UserConfig>> {
        Ok(None)
    }

    /// Resolve an import specifier to a path
    /// Return ResolveResult::Skip to let other plugins handle it
    async fn resolve_id(
        &self,
        _specifier: &str,
        _importer: Option<&Path>,
        _ctx: &PluginContext,
    ) -> Result<ResolveResult> {
        Ok(ResolveResult::Skip)
    }
}

/// Plugin manager
pub struct PluginManager {
    plugins: Vec<Arc<dyn Plugin>>,
    context: PluginContext,
}

impl PluginManager {
    /// Create a new plugin manager
    pub fn new(root: PathBuf) -> Self {
        Self {
            plugins: Vec::new(),
            context: PluginContext { root },
        }
    }

    /// Register a plugin
    pub fn register(&mut self, plugin: Arc<dyn Plugin>) {
        self.plugins.push(plugin);
    }

    /// Run config hooks and merge their fragments in registration order
    pub async fn run_config(&self) -> Result<UserConfig> {
        let mut config = UserConfig::default();

        for plugin in &self.plugins {
            if let Some(fragment) = plugin.config(&self.context).await? {
                debug!(
                    "Plugin '{}' contributed {} alias(es)",
                    plugin.name(),
                    fragment.resolve.alias.len()
                );
                config.merge(fragment);
            }
        }

        Ok(config)
    }

    /// Run resolve_id hooks
    pub async fn resolve_id(
        &self,
        specifier: &str,
        importer: Option<&Path>,
    ) -> Result<Option<PathBuf>> {
        for plugin in &self.plugins {
            match plugin.resolve_id(specifier, importer, &self.context).await? {
                ResolveResult::Skip => continue,
                ResolveResult::Resolved(path) => return Ok(Some(path)),
            }
        }
        Ok(None)
    }
}
