//! tsconfig.json loading
//!
//! Reads `compilerOptions.paths` from a tsconfig file written in the relaxed
//! JSON dialect TypeScript accepts (comments and trailing commas) and resolves
//! every candidate path against `compilerOptions.baseUrl`.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use jsonc_parser::errors::ParseError;
use jsonc_parser::ParseOptions;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, error, warn};

use crate::plugins::PLUGIN_NAME;
use crate::utils::{resolve_path, strip_wildcard};

/// Default tsconfig location, relative to the project root
pub const DEFAULT_TSCONFIG: &str = "tsconfig.json";

/// Alias pattern (wildcard kept) to absolute candidate paths, in declaration order
pub type TsconfigPaths = IndexMap<String, Vec<PathBuf>>;

/// Errors raised while loading a tsconfig file
#[derive(Debug, Error)]
pub enum TsconfigError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: io::Error,
    },

    #[error("failed to resolve project root {}: {source}", root.display())]
    Root {
        root: PathBuf,
        source: io::Error,
    },

    #[error("failed to parse {}: {source}", path.display())]
    Syntax {
        path: PathBuf,
        source: ParseError,
    },

    #[error("invalid tsconfig {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// The subset of tsconfig.json this crate cares about
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TsConfig {
    #[serde(default)]
    pub compiler_options: Option<CompilerOptions>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompilerOptions {
    /// Base directory for non-relative module names
    #[serde(default)]
    pub base_url: Option<String>,

    /// Alias pattern to candidate path patterns
    #[serde(default)]
    pub paths: Option<IndexMap<String, Vec<String>>>,
}

impl CompilerOptions {
    /// `baseUrl`, falling back to `.` when unset or empty
    pub fn base_url(&self) -> &str {
        match self.base_url.as_deref() {
            Some(url) if !url.is_empty() => url,
            _ => ".",
        }
    }
}

/// Parse tsconfig text; `path` is only used for error reporting.
///
/// An empty document parses as an empty tsconfig.
pub fn parse_tsconfig(content: &str, path: &Path) -> Result<TsConfig, TsconfigError> {
    let options = ParseOptions {
        allow_comments: true,
        allow_trailing_commas: true,
        allow_loose_object_property_names: false,
        ..Default::default()
    };

    let value = jsonc_parser::parse_to_serde_value(content, &options).map_err(|source| {
        TsconfigError::Syntax {
            path: path.to_path_buf(),
            source,
        }
    })?;

    match value {
        Some(value) => serde_json::from_value(value).map_err(|source| TsconfigError::Parse {
            path: path.to_path_buf(),
            source,
        }),
        None => Ok(TsConfig::default()),
    }
}

/// Resolve every candidate of every alias against `baseUrl`.
///
/// A relative `baseUrl` is taken relative to `root`, which should be absolute.
pub fn resolve_paths(options: &CompilerOptions, root: &Path) -> TsconfigPaths {
    let base_url = resolve_path(root, options.base_url());

    options
        .paths
        .iter()
        .flatten()
        .map(|(alias, candidates)| {
            let resolved = candidates
                .iter()
                .map(|candidate| resolve_path(&base_url, strip_wildcard(candidate)))
                .collect();
            (alias.clone(), resolved)
        })
        .collect()
}

/// Load and resolve the `paths` of a tsconfig file, reporting failures.
///
/// A relative `root` is taken relative to the current directory and a
/// relative `tsconfig_path` relative to `root`. A document without
/// `compilerOptions.paths` yields an empty map.
pub fn try_load_tsconfig_paths(
    tsconfig_path: &Path,
    root: &Path,
) -> Result<TsconfigPaths, TsconfigError> {
    debug!("[{}] Loading tsconfig from {}", PLUGIN_NAME, tsconfig_path.display());

    let root = absolute_root(root)?;

    let file = root.join(tsconfig_path);
    let content = fs::read_to_string(&file).map_err(|source| TsconfigError::Read {
        path: tsconfig_path.to_path_buf(),
        source,
    })?;

    let tsconfig = parse_tsconfig(&content, tsconfig_path)?;

    match tsconfig.compiler_options {
        Some(options) if options.paths.is_some() => Ok(resolve_paths(&options, &root)),
        _ => {
            warn!("[{}] No \"paths\" found in {}", PLUGIN_NAME, tsconfig_path.display());
            Ok(TsconfigPaths::new())
        }
    }
}

/// Like [`try_load_tsconfig_paths`], but logs any failure and returns an
/// empty map instead.
pub fn load_tsconfig_paths(tsconfig_path: &Path, root: &Path) -> TsconfigPaths {
    try_load_tsconfig_paths(tsconfig_path, root).unwrap_or_else(|err| {
        error!("[{}] Failed to load tsconfig, {}", PLUGIN_NAME, err);
        TsconfigPaths::new()
    })
}

fn absolute_root(root: &Path) -> Result<PathBuf, TsconfigError> {
    if root.is_absolute() {
        return Ok(root.to_path_buf());
    }

    let cwd = std::env::current_dir().map_err(|source| TsconfigError::Root {
        root: root.to_path_buf(),
        source,
    })?;

    Ok(resolve_path(&cwd, root))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn write_tsconfig(content: &str) -> TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(DEFAULT_TSCONFIG), content).unwrap();
        dir
    }

    #[test]
    fn test_parse_relaxed_json() {
        let json = r#"{
            // line comment
            "compilerOptions": {
                /* block
                   comment */
                "baseUrl": "http://example.com",
                "paths": { "@a/*": ["a/*",], },
            },
        }"#;

        let options = parse_tsconfig(json, Path::new(DEFAULT_TSCONFIG))
            .unwrap()
            .compiler_options
            .unwrap();

        assert_eq!(options.base_url(), "http://example.com");
        assert_eq!(options.paths.unwrap()["@a/*"], vec!["a/*".to_string()]);
    }

    #[test]
    fn test_parse_keeps_commas_inside_strings() {
        let json = r#"{ "compilerOptions": { "paths": { "@x/*": ["weird,]dir/*", "odd,}dir/*"] } } }"#;

        let paths = parse_tsconfig(json, Path::new(DEFAULT_TSCONFIG))
            .unwrap()
            .compiler_options
            .unwrap()
            .paths
            .unwrap();

        assert_eq!(
            paths["@x/*"],
            vec!["weird,]dir/*".to_string(), "odd,}dir/*".to_string()]
        );
    }

    #[test]
    fn test_parse_empty_document() {
        let tsconfig = parse_tsconfig("  // nothing here\n", Path::new(DEFAULT_TSCONFIG)).unwrap();
        assert!(tsconfig.compiler_options.is_none());
    }

    #[test]
    fn test_relative_root_yields_absolute_paths() {
        let dir = write_tsconfig(
            r#"{ "compilerOptions": { "baseUrl": "./src", "paths": { "@app/*": ["app/*"] } } }"#,
        );
        let cwd = std::env::current_dir().unwrap();
        let relative_root = pathdiff::diff_paths(dir.path(), &cwd).unwrap();
        assert!(relative_root.is_relative());

        let paths = load_tsconfig_paths(Path::new(DEFAULT_TSCONFIG), &relative_root);

        assert!(paths["@app/*"][0].is_absolute());
        assert_eq!(
            paths["@app/*"],
            vec![resolve_path(&cwd, relative_root.join("src").join("app"))]
        );
    }

    #[test]
    fn test_resolves_against_base_url() {
        let dir = write_tsconfig(
            r#"{ "compilerOptions": { "baseUrl": "./src", "paths": { "@app/*": ["app/*"] } } }"#,
        );

        let paths = load_tsconfig_paths(Path::new(DEFAULT_TSCONFIG), dir.path());

        assert_eq!(paths.len(), 1);
        assert_eq!(paths["@app/*"], vec![dir.path().join("src").join("app")]);
    }

    #[test]
    fn test_base_url_defaults_to_root() {
        let dir = write_tsconfig(
            r#"{ "compilerOptions": { "paths": { "@lib/*": ["./lib/*"], "~": ["../outside"] } } }"#,
        );

        let paths = load_tsconfig_paths(Path::new(DEFAULT_TSCONFIG), dir.path());
        let parent = dir.path().parent().unwrap();

        assert_eq!(paths["@lib/*"], vec![dir.path().join("lib")]);
        assert_eq!(paths["~"], vec![parent.join("outside")]);
    }

    #[test]
    fn test_keeps_every_candidate_in_order() {
        let dir = write_tsconfig(
            r#"{
                "compilerOptions": {
                    "baseUrl": ".",
                    "paths": {
                        "@ui/*": ["packages/ui/*", "vendor/ui/*"],
                    },
                },
            }"#,
        );

        let paths = load_tsconfig_paths(Path::new(DEFAULT_TSCONFIG), dir.path());

        assert_eq!(
            paths["@ui/*"],
            vec![
                dir.path().join("packages").join("ui"),
                dir.path().join("vendor").join("ui"),
            ]
        );
    }

    #[test]
    fn test_preserves_declaration_order() {
        let dir = write_tsconfig(
            r#"{
                // aliases are not sorted
                "compilerOptions": {
                    "paths": {
                        "@zeta/*": ["zeta/*"],
                        "@alpha/*": ["alpha/*"],
                        "@mid": ["mid"]
                    }
                }
            }"#,
        );

        let paths = load_tsconfig_paths(Path::new(DEFAULT_TSCONFIG), dir.path());
        let keys: Vec<&str> = paths.keys().map(String::as_str).collect();

        assert_eq!(keys, vec!["@zeta/*", "@alpha/*", "@mid"]);
    }

    #[test]
    fn test_missing_file_yields_empty_map() {
        let dir = tempfile::tempdir().unwrap();

        let paths = load_tsconfig_paths(Path::new("missing.json"), dir.path());
        assert!(paths.is_empty());

        let err = try_load_tsconfig_paths(Path::new("missing.json"), dir.path()).unwrap_err();
        assert!(matches!(err, TsconfigError::Read { .. }));
    }

    #[test]
    fn test_malformed_file_yields_empty_map() {
        let dir = write_tsconfig(r#"{ "compilerOptions": { "paths": "#);

        let paths = load_tsconfig_paths(Path::new(DEFAULT_TSCONFIG), dir.path());
        assert!(paths.is_empty());

        let err = try_load_tsconfig_paths(Path::new(DEFAULT_TSCONFIG), dir.path()).unwrap_err();
        assert!(matches!(err, TsconfigError::Syntax { .. }));

        let dir = write_tsconfig(r#"{ "compilerOptions": { "paths": { "@a/*": "a/*" } } }"#);
        let err = try_load_tsconfig_paths(Path::new(DEFAULT_TSCONFIG), dir.path()).unwrap_err();
        assert!(matches!(err, TsconfigError::Parse { .. }));
    }

    #[test]
    fn test_missing_paths_yields_empty_map() {
        let dir = write_tsconfig(r#"{ "compilerOptions": { "strict": true } }"#);
        assert!(load_tsconfig_paths(Path::new(DEFAULT_TSCONFIG), dir.path()).is_empty());

        let dir = write_tsconfig(r#"{ "include": ["src"] }"#);
        assert!(load_tsconfig_paths(Path::new(DEFAULT_TSCONFIG), dir.path()).is_empty());
    }

    #[test]
    fn test_empty_base_url_means_current_dir() {
        let options = CompilerOptions {
            base_url: Some(String::new()),
            paths: None,
        };

        assert_eq!(options.base_url(), ".");
    }
}
