//! Resolver configuration handed back to the host bundler
//!
//! Plugins contribute [`UserConfig`] fragments from their `config` hook; the
//! host merges them and applies `resolve.alias` during module resolution.

mod schema;

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

pub use schema::*;

/// Configuration fragment returned by a plugin's `config` hook
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserConfig {
    /// Module resolution settings
    #[serde(default)]
    pub resolve: ResolveConfig,
}

impl UserConfig {
    /// Create a fragment holding only aliases
    pub fn with_aliases(alias: Vec<Alias>) -> Self {
        Self {
            resolve: ResolveConfig { alias },
        }
    }

    /// Merge a later fragment into this one.
    ///
    /// Aliases are appended, so earlier plugins keep precedence.
    pub fn merge(&mut self, other: UserConfig) {
        self.resolve.alias.extend(other.resolve.alias);
    }
}

/// Module resolution section (`resolve`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolveConfig {
    /// Ordered alias list; the first match wins
    #[serde(default)]
    pub alias: Vec<Alias>,
}

impl ResolveConfig {
    /// Apply the first matching alias to an import specifier
    pub fn resolve_alias(&self, specifier: &str) -> Option<PathBuf> {
        self.alias.iter().find_map(|alias| alias.apply(specifier))
    }
}

/// A single `{ find, replacement }` alias entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alias {
    /// Import prefix to match
    pub find: String,

    /// Absolute directory substituted for `find`
    pub replacement: PathBuf,
}

impl Alias {
    pub fn new(find: impl Into<String>, replacement: impl Into<PathBuf>) -> Self {
        Self {
            find: find.into(),
            replacement: replacement.into(),
        }
    }

    /// Rewrite `specifier` when it is `find` itself or starts with `find/`
    pub fn apply(&self, specifier: &str) -> Option<PathBuf> {
        if specifier == self.find {
            return Some(self.replacement.clone());
        }

        let rest = specifier.strip_prefix(self.find.as_str())?.strip_prefix('/')?;
        Some(self.replacement.join(rest))
    }
}

impl fmt::Display for Alias {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.find, self.replacement.display())
    }
}

/// Plugin list of a host TOML config (`[[plugins]]` tables)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HostConfig {
    /// Plugin configuration
    #[serde(default)]
    pub plugins: Vec<PluginConfig>,
}

impl HostConfig {
    /// Load the plugin list from a TOML file; other tables are ignored
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Find the entry configuring the named plugin
    pub fn plugin(&self, name: &str) -> Option<&PluginConfig> {
        self.plugins.iter().find(|plugin| plugin.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn aliases() -> ResolveConfig {
        ResolveConfig {
            alias: vec![
                Alias::new("@app", "/project/src/app"),
                Alias::new("@", "/project/src"),
            ],
        }
    }

    #[test]
    fn test_alias_matches_exact_and_subpaths() {
        let resolve = aliases();

        assert_eq!(resolve.resolve_alias("@app"), Some(PathBuf::from("/project/src/app")));
        assert_eq!(
            resolve.resolve_alias("@app/components/button"),
            Some(PathBuf::from("/project/src/app/components/button"))
        );
        assert_eq!(resolve.resolve_alias("@/util"), Some(PathBuf::from("/project/src/util")));
    }

    #[test]
    fn test_alias_ignores_partial_segments() {
        let resolve = aliases();

        assert_eq!(resolve.resolve_alias("@application"), None);
        assert_eq!(resolve.resolve_alias("react"), None);
        assert_eq!(resolve.resolve_alias("./local"), None);
    }

    #[test]
    fn test_merge_appends_in_order() {
        let mut config = UserConfig::with_aliases(vec![Alias::new("@a", "/a")]);
        config.merge(UserConfig::with_aliases(vec![Alias::new("@b", "/b")]));
        config.merge(UserConfig::default());

        let finds: Vec<&str> = config.resolve.alias.iter().map(|a| a.find.as_str()).collect();
        assert_eq!(finds, vec!["@a", "@b"]);
    }

    #[test]
    fn test_serializes_to_resolve_alias_shape() {
        let config = UserConfig::with_aliases(vec![Alias::new("@app", "/project/src/app")]);

        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "resolve": { "alias": [{ "find": "@app", "replacement": "/project/src/app" }] }
            })
        );
    }

    #[test]
    fn test_host_config_finds_plugin_entry() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("component.toml");
        fs::write(
            &path,
            r#"
[project]
name = "web"

[[plugins]]
name = "json"

[[plugins]]
name = "tsconfig-aliases"
options = { tsconfigPath = "tsconfig.app.json" }
"#,
        )
        .unwrap();

        let config = HostConfig::load(&path).unwrap();

        assert_eq!(config.plugins.len(), 2);
        assert!(config.plugin("tsconfig-aliases").is_some());
        assert!(config.plugin("missing").is_none());
    }
}
