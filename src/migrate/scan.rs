//! Deterministic discovery of migration sources.
//!
//! The order produced here is the correlation key for the whole pass: the
//! n-th path scanned is paired with the n-th response segment. Entries are
//! therefore visited depth-first in lexical order within each directory.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::ports::FileSystem;

/// What the scan pattern is matched against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchOn {
    /// The file name only.
    #[default]
    Name,
    /// The path relative to the scan root, `/`-separated.
    Path,
}

/// Filter applied while walking a tree.
#[derive(Debug, Clone)]
pub struct ScanFilter<'a> {
    /// Substring a file must contain to be selected.
    pub pattern: &'a str,
    /// Whether `pattern` is matched against the name or the relative path.
    pub match_on: MatchOn,
    /// A directory whose relative path contains any of these is skipped.
    pub excluded: &'a [String],
}

impl<'a> ScanFilter<'a> {
    /// Filter selecting files whose name contains `pattern`.
    #[must_use]
    pub fn name(pattern: &'a str, excluded: &'a [String]) -> Self {
        Self { pattern, match_on: MatchOn::Name, excluded }
    }
}

/// Recursively lists files under `root` that pass `filter`.
///
/// Unreadable directories are logged and contribute no matches; the walk
/// carries on with their siblings.
pub fn scan(fs: &dyn FileSystem, root: &Path, filter: &ScanFilter<'_>) -> Vec<PathBuf> {
    let mut found = Vec::new();
    walk(fs, root, root, filter, &mut found);
    found
}

fn walk(fs: &dyn FileSystem, root: &Path, dir: &Path, filter: &ScanFilter<'_>, found: &mut Vec<PathBuf>) {
    let relative = relative_key(root, dir);
    if filter.excluded.iter().any(|ex| relative.contains(ex.as_str())) {
        debug!(dir = %dir.display(), "skipping excluded directory");
        return;
    }

    let entries = match fs.list_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            warn!(dir = %dir.display(), error = %e, "cannot read directory, skipping");
            return;
        }
    };

    for name in entries {
        let path = dir.join(&name);
        if fs.is_dir(&path) {
            walk(fs, root, &path, filter, found);
            continue;
        }
        let haystack = match filter.match_on {
            MatchOn::Name => name,
            MatchOn::Path => relative_key(root, &path),
        };
        if haystack.contains(filter.pattern) {
            debug!(file = %path.display(), "found source file");
            found.push(path);
        }
    }
}

/// `path` relative to `root`, with `/` separators and a leading `/`.
fn relative_key(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    let mut key = String::from("/");
    key.push_str(&relative.to_string_lossy().replace('\\', "/"));
    key
}

/// Finds the first file named exactly `file_name` under `root`.
///
/// Files of a directory are checked before any of its subdirectories;
/// subdirectories are searched in lexical order.
pub fn find_first(fs: &dyn FileSystem, root: &Path, file_name: &str) -> Option<PathBuf> {
    let entries = match fs.list_dir(root) {
        Ok(entries) => entries,
        Err(e) => {
            warn!(dir = %root.display(), error = %e, "cannot read directory, skipping");
            return None;
        }
    };

    let mut subdirs = Vec::new();
    for name in entries {
        let path = root.join(&name);
        if fs.is_dir(&path) {
            subdirs.push(path);
        } else if name == file_name {
            return Some(path);
        }
    }
    subdirs.into_iter().find_map(|dir| find_first(fs, &dir, file_name))
}
