//! Path helpers shared by the loader, the plugin and the CLI

use std::path::{Component, Path, PathBuf};

/// Wildcard suffix used by tsconfig path patterns
pub const WILDCARD_SUFFIX: &str = "/*";

/// Strip a trailing `/*` from an alias or path pattern
pub fn strip_wildcard(pattern: &str) -> &str {
    pattern.strip_suffix(WILDCARD_SUFFIX).unwrap_or(pattern)
}

/// Fold `.` and `..` components without touching the filesystem.
///
/// `..` never climbs above the root of an absolute path, mirroring how
/// Node's `path.resolve` treats `/..`.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();

    for component in path.components() {
        match component {
            Component::CurDir => continue,
            Component::ParentDir => match normalized.components().next_back() {
                Some(Component::Normal(_)) => {
                    normalized.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => normalized.push(".."),
            },
            other => normalized.push(other.as_os_str()),
        }
    }

    if normalized.as_os_str().is_empty() {
        normalized.push(".");
    }

    normalized
}

/// Resolve `path` against `base`; an absolute `path` replaces the base
pub fn resolve_path<P: AsRef<Path>>(base: &Path, path: P) -> PathBuf {
    normalize_path(&base.join(path))
}

/// Get relative path from base to target
pub fn relative_path(from: &Path, to: &Path) -> Option<String> {
    pathdiff::diff_paths(to, from).map(|p| p.display().to_string())
}

/// Display `path` relative to `root` when it lives below it
pub fn display_path(path: &Path, root: &Path) -> String {
    match relative_path(root, path) {
        Some(rel) if !rel.starts_with("..") => {
            if rel.is_empty() {
                ".".to_string()
            } else {
                format!("./{}", rel.replace('\\', "/"))
            }
        }
        _ => path.display().to_string(),
    }
}
