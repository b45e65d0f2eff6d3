//! tsconfig paths plugin
//!
//! Projects `compilerOptions.paths` into `resolve.alias` so import aliases
//! are declared once, in tsconfig.json.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::Result;
use async_trait::async_trait;
use parking_lot::RwLock;
use tracing::{info, warn};

use super::{Plugin, PluginContext, ResolveResult};
use crate::config::{Alias, AliasesOptions, ResolveConfig, UserConfig};
use crate::tsconfig::{load_tsconfig_paths, TsconfigPaths};
use crate::utils::strip_wildcard;

/// Identifier prefixed to every diagnostic of this plugin
pub const PLUGIN_NAME: &str = "tsconfig-aliases";

/// Turn resolved tsconfig paths into alias entries, keeping declaration order.
///
/// Only the first candidate of each alias is used.
pub fn to_aliases(paths: &TsconfigPaths) -> Vec<Alias> {
    paths
        .iter()
        .filter_map(|(pattern, candidates)| {
            let Some(replacement) = candidates.first() else {
                warn!("[{}] No paths listed for \"{}\", skipping", PLUGIN_NAME, pattern);
                return None;
            };

            Some(Alias::new(strip_wildcard(pattern), replacement.clone()))
        })
        .collect()
}

/// Plugin reading aliases from tsconfig.json
pub struct TsconfigAliases {
    options: AliasesOptions,

    /// Aliases used by `resolve_id`, loaded once per project root
    resolve: RwLock<HashMap<PathBuf, ResolveConfig>>,
}

impl TsconfigAliases {
    pub fn new(options: AliasesOptions) -> Self {
        Self {
            options,
            resolve: RwLock::new(HashMap::new()),
        }
    }

    pub fn options(&self) -> &AliasesOptions {
        &self.options
    }

    /// Read the tsconfig file and build the `resolve.alias` fragment.
    ///
    /// Never fails: unreadable or alias-free tsconfig files give no aliases.
    pub fn load(&self, root: &Path) -> UserConfig {
        let tsconfig_path = &self.options.tsconfig_path;
        let aliases = to_aliases(&load_tsconfig_paths(tsconfig_path, root));

        info!(
            "[{}] Aliases from {}: [{}]",
            PLUGIN_NAME,
            tsconfig_path.display(),
            aliases
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ")
        );

        UserConfig::with_aliases(aliases)
    }
}

impl Default for TsconfigAliases {
    fn default() -> Self {
        Self::new(AliasesOptions::default())
    }
}

#[async_trait]
impl Plugin for TsconfigAliases {
    fn name(&self) -> &str {
        PLUGIN_NAME
    }

    async fn config(&self, ctx: &PluginContext) -> Result<Option<UserConfig>> {
        Ok(Some(self.load(&ctx.root)))
    }

    async fn resolve_id(
        &self,
        specifier: &str,
        _importer: Option<&Path>,
        ctx: &PluginContext,
    ) -> Result<ResolveResult> {
        if let Some(resolve) = self.resolve.read().get(&ctx.root) {
            return Ok(lookup(resolve, specifier));
        }

        let resolve = self.load(&ctx.root).resolve;
        let result = lookup(&resolve, specifier);
        self.resolve.write().insert(ctx.root.clone(), resolve);

        Ok(result)
    }
}

fn lookup(resolve: &ResolveConfig, specifier: &str) -> ResolveResult {
    match resolve.resolve_alias(specifier) {
        Some(path) => ResolveResult::Resolved(path),
        None => ResolveResult::Skip,
    }
}
