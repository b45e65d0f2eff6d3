//! Plugin option definitions

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::tsconfig::DEFAULT_TSCONFIG;

/// Options accepted by the tsconfig aliases plugin
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AliasesOptions {
    /// tsconfig file to read, relative to the project root
    #[serde(default = "default_tsconfig_path")]
    pub tsconfig_path: PathBuf,
}

impl Default for AliasesOptions {
    fn default() -> Self {
        Self {
            tsconfig_path: default_tsconfig_path(),
        }
    }
}

impl AliasesOptions {
    /// Build options from a `[[plugins]]` entry
    pub fn from_plugin_config(plugin: &PluginConfig) -> Result<Self> {
        match &plugin.options {
            Some(options) => toml::Value::Table(options.clone())
                .try_into()
                .with_context(|| format!("Invalid options for plugin '{}'", plugin.name)),
            None => Ok(Self::default()),
        }
    }
}

fn default_tsconfig_path() -> PathBuf {
    PathBuf::from(DEFAULT_TSCONFIG)
}

/// Plugin configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PluginConfig {
    /// Plugin name/identifier
    pub name: String,

    /// Plugin-specific options
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<toml::Table>,
}
