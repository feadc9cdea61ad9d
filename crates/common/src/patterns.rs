//! Glob pattern resolution
//!
//! Resolves an ordered list of include/exclude glob patterns against a base
//! directory into a deduplicated, order-stable list of relative file paths.
//! Patterns prefixed with `!` are exclusions; the result is the union of the
//! inclusive matches minus the union of the exclusive matches.

use std::collections::HashSet;
use std::path::Path;

use tracing::debug;

/// Resolve `patterns` against `base_dir`.
///
/// Each individual pattern's matches are sorted lexically, then concatenated
/// in pattern order with first-occurrence deduplication. The combined group
/// is not re-sorted: pattern order is load order, and the browser evaluates
/// scripts in the order they are listed.
///
/// A pattern matching nothing contributes nothing. An invalid pattern or a
/// missing base directory yields an empty contribution, never an error.
pub fn match_files(base_dir: &Path, patterns: &[String]) -> Vec<String> {
    let (negative, positive): (Vec<&String>, Vec<&String>) =
        patterns.iter().partition(|p| p.starts_with('!'));

    let chosen = collect_group(base_dir, &positive);
    let negated: HashSet<String> = collect_group(base_dir, &negative).into_iter().collect();

    chosen
        .into_iter()
        .filter(|f| !negated.contains(f))
        .collect()
}

/// Evaluate one pattern group, preserving pattern order and first occurrence.
fn collect_group(base_dir: &Path, patterns: &[&String]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut result = Vec::new();
    for pattern in patterns {
        let mut matches = glob_one(base_dir, pattern.trim_start_matches('!'));
        matches.sort();
        for file in matches {
            if seen.insert(file.clone()) {
                result.push(file);
            }
        }
    }
    result
}

/// Evaluate a single glob rooted at `base_dir`, returning paths relative to it.
fn glob_one(base_dir: &Path, pattern: &str) -> Vec<String> {
    let full = base_dir.join(pattern);
    let paths = match glob::glob(&full.to_string_lossy()) {
        Ok(paths) => paths,
        Err(e) => {
            debug!("invalid glob pattern {:?}: {}", pattern, e);
            return Vec::new();
        }
    };
    paths
        .filter_map(|entry| entry.ok())
        .filter_map(|path| {
            path.strip_prefix(base_dir)
                .ok()
                .map(|rel| rel.to_string_lossy().into_owned())
        })
        .collect()
}
