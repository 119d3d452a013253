//! # Data File Discovery
//!
//! Expands the paths given on the command line into the sorted list of
//! JSON data files to check.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Collect every `*.json` file under `roots`.
///
/// Files named directly are kept even without a `.json` extension.
/// Directories are walked recursively; entries whose file name appears in
/// `exclude` are skipped at any depth. Results from each directory root are
/// sorted, and a file reachable from several roots is listed once.
pub fn find_json_files(roots: &[PathBuf], exclude: &[String]) -> Vec<PathBuf> {
    let mut seen = HashSet::new();
    let mut results = Vec::new();

    for root in roots {
        if root.is_file() {
            if seen.insert(root.clone()) {
                results.push(root.clone());
            }
            continue;
        }
        if !root.is_dir() {
            tracing::warn!(path = %root.display(), "path does not exist; skipping");
            continue;
        }
        let mut found = Vec::new();
        walk_dir(root, exclude, &mut found);
        found.sort();
        for path in found {
            if seen.insert(path.clone()) {
                results.push(path);
            }
        }
    }

    results
}

fn walk_dir(dir: &Path, exclude: &[String], acc: &mut Vec<PathBuf>) {
    let entries = match std::fs::read_dir(dir) {
        Ok(e) => e,
        Err(e) => {
            tracing::warn!(
                dir = %dir.display(),
                error = %e,
                "failed to read directory during file walk"
            );
            return;
        }
    };
    for entry in entries {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                tracing::warn!(dir = %dir.display(), error = %e, "failed to read directory entry");
                continue;
            }
        };
        let path = entry.path();
        let excluded = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|name| exclude.iter().any(|x| x == name));
        if excluded {
            tracing::debug!(path = %path.display(), "excluded");
            continue;
        }
        if path.is_dir() {
            walk_dir(&path, exclude, acc);
        } else if path.extension().is_some_and(|ext| ext == "json") {
            acc.push(path);
        }
    }
}
