// ABOUTME: Glob resolution with positive and `!`-prefixed negative patterns.
// ABOUTME: Exclusions always win; results are de-duplicated in first-match order.

use glob::{MatchOptions, Pattern};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use super::PackageError;

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: true,
};

/// Resolve `patterns` against `root`, returning matched files relative to it.
///
/// Each pattern is evaluated on its own. A file matched by any negative
/// pattern is dropped even if a positive pattern also matches it.
pub fn resolve_globs(root: &Path, patterns: &[String]) -> Result<Vec<PathBuf>, PackageError> {
    let (negative, positive): (Vec<&str>, Vec<&str>) = patterns
        .iter()
        .map(String::as_str)
        .partition(|p| p.starts_with('!'));

    let mut excluded = HashSet::new();
    for pattern in negative {
        excluded.extend(matches(root, &pattern[1..])?);
    }

    let mut seen = HashSet::new();
    let mut files = Vec::new();
    for pattern in positive {
        for path in matches(root, pattern)? {
            if !excluded.contains(&path) && seen.insert(path.clone()) {
                files.push(path);
            }
        }
    }

    Ok(files)
}

fn matches(root: &Path, pattern: &str) -> Result<Vec<PathBuf>, PackageError> {
    let full = format!(
        "{}/{}",
        Pattern::escape(&root.to_string_lossy()),
        pattern.trim_start_matches("./")
    );
    let paths = glob::glob_with(&full, MATCH_OPTIONS).map_err(|source| {
        PackageError::InvalidGlob {
            pattern: pattern.to_string(),
            source,
        }
    })?;

    let mut found = Vec::new();
    for entry in paths {
        let path = entry?;
        if !path.is_file() {
            continue;
        }
        if let Ok(relative) = path.strip_prefix(root) {
            found.push(relative.to_path_buf());
        }
    }
    Ok(found)
}
