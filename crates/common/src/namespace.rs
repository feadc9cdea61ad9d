//! Virtual URL namespace
//!
//! Assigns a stable URL-path prefix to every physical base directory so that
//! files from unrelated locations coexist in one URL space without colliding.
//! The source directory always maps to `/`; every other directory gets a
//! random token prefix, minted once and memoized for the life of the mapper.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use parking_lot::RwLock;
use rand::Rng;
use tracing::debug;

use crate::patterns;

/// Directory-to-prefix mapper
pub struct NamespaceMapper {
    src_dir: PathBuf,
    mappings: RwLock<HashMap<PathBuf, String>>,
}

impl NamespaceMapper {
    pub fn new(src_dir: PathBuf) -> Self {
        Self {
            src_dir,
            mappings: RwLock::new(HashMap::new()),
        }
    }

    /// The directory mapped to the root prefix `/`.
    pub fn src_dir(&self) -> &Path {
        &self.src_dir
    }

    /// Return the URL prefix for `dir`, minting and memoizing one on first use.
    ///
    /// The whole lookup-or-mint runs under one write lock, so two concurrent
    /// first accesses to the same directory cannot mint different prefixes.
    pub fn prefix_for(&self, dir: &Path) -> String {
        let mut mappings = self.mappings.write();
        if let Some(prefix) = mappings.get(dir) {
            return prefix.clone();
        }
        let prefix = if dir == self.src_dir {
            "/".to_string()
        } else {
            new_prefix()
        };
        debug!("mapped {} -> {}", dir.display(), prefix);
        mappings.insert(dir.to_path_buf(), prefix.clone());
        prefix
    }

    /// The prefix for `dir`, if one has already been minted.
    pub fn existing_prefix(&self, dir: &Path) -> Option<String> {
        self.mappings.read().get(dir).cloned()
    }

    /// Snapshot of the full directory-to-prefix table.
    pub fn mappings(&self) -> Vec<(PathBuf, String)> {
        self.mappings
            .read()
            .iter()
            .map(|(dir, prefix)| (dir.clone(), prefix.clone()))
            .collect()
    }

    /// Resolve `patterns` under `dir` and return the mapped URL path of every
    /// match, in match order.
    pub fn map_files(&self, dir: &Path, patterns: &[String]) -> Vec<String> {
        let prefix = self.prefix_for(dir);
        patterns::match_files(dir, patterns)
            .into_iter()
            .map(|file| join_url(&prefix, &file))
            .collect()
    }
}

/// Mint a fresh namespace prefix: `/__<random base-36 token>__`.
///
/// The token only needs to be collision-resistant across the handful of
/// directories mapped in one process run, not cryptographically unique.
fn new_prefix() -> String {
    format!("/__{}__", to_base36(rand::thread_rng().gen::<u128>()))
}

fn to_base36(mut n: u128) -> String {
    const DIGITS: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if n == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while n > 0 {
        out.push(DIGITS[(n % 36) as usize] as char);
        n /= 36;
    }
    out.iter().rev().collect()
}

fn join_url(prefix: &str, file: &str) -> String {
    if prefix == "/" {
        format!("/{file}")
    } else {
        format!("{prefix}/{file}")
    }
}
