//! Asset manifest
//!
//! Ordered registries of mapped asset URLs by category (sources, helpers,
//! specs, stylesheets), populated by the [`ManifestBuilder`] and consumed by
//! the request router. Registration order is load order: the browser
//! evaluates scripts in the order they appear here, and dependency
//! correctness hangs on that.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::config::HarnessConfig;
use crate::error::{Error, Result};
use crate::namespace::NamespaceMapper;

/// Default helper patterns, resolved under the spec directory.
pub const DEFAULT_HELPER_PATTERNS: &[&str] = &["helpers/**/*.js"];

/// Default spec-file patterns, resolved under the spec directory.
pub const DEFAULT_SPEC_PATTERNS: &[&str] = &["**/*[sS]pec.js"];

/// The ordered asset registries and their namespace mapper.
///
/// Each `add_*` call appends; successive calls accumulate, so third-party
/// assets registered first stay ahead of project assets registered later.
/// Entries are deduplicated only at [`js_files`](Self::js_files) time, and
/// only by literal mapped-path equality.
pub struct AssetManifest {
    mapper: NamespaceMapper,
    spec_dir: PathBuf,
    sources: Vec<String>,
    helpers: Vec<String>,
    specs: Vec<String>,
    stylesheets: Vec<String>,
}

impl AssetManifest {
    pub fn new(src_dir: PathBuf, spec_dir: PathBuf) -> Self {
        Self {
            mapper: NamespaceMapper::new(src_dir),
            spec_dir,
            sources: Vec::new(),
            helpers: Vec::new(),
            specs: Vec::new(),
            stylesheets: Vec::new(),
        }
    }

    pub fn mapper(&self) -> &NamespaceMapper {
        &self.mapper
    }

    pub fn spec_dir(&self) -> &Path {
        &self.spec_dir
    }

    pub fn src_dir(&self) -> &Path {
        self.mapper.src_dir()
    }

    pub fn sources(&self) -> &[String] {
        &self.sources
    }

    pub fn helpers(&self) -> &[String] {
        &self.helpers
    }

    pub fn specs(&self) -> &[String] {
        &self.specs
    }

    pub fn stylesheets(&self) -> &[String] {
        &self.stylesheets
    }

    /// Append mapped source files. `None` patterns are a no-op.
    pub fn add_sources(&mut self, dir: &Path, patterns: Option<&[String]>) {
        let mapped = self.map(dir, patterns);
        self.sources.extend(mapped);
    }

    /// Append mapped helper files. `None` patterns are a no-op.
    pub fn add_helpers(&mut self, dir: &Path, patterns: Option<&[String]>) {
        let mapped = self.map(dir, patterns);
        self.helpers.extend(mapped);
    }

    /// Append mapped spec files. `None` patterns are a no-op.
    pub fn add_specs(&mut self, dir: &Path, patterns: Option<&[String]>) {
        let mapped = self.map(dir, patterns);
        self.specs.extend(mapped);
    }

    /// Append mapped stylesheets. `None` patterns are a no-op.
    pub fn add_stylesheets(&mut self, dir: &Path, patterns: Option<&[String]>) {
        let mapped = self.map(dir, patterns);
        self.stylesheets.extend(mapped);
    }

    fn map(&self, dir: &Path, patterns: Option<&[String]>) -> Vec<String> {
        match patterns {
            Some(patterns) => self.mapper.map_files(dir, patterns),
            None => Vec::new(),
        }
    }

    /// Every JavaScript asset in load order: sources, then helpers, then the
    /// spec registry (or, with `spec_filter`, the files matching that single
    /// pattern under the spec directory). Duplicate mapped paths keep their
    /// first occurrence; two different prefixes over the same relative file
    /// are distinct paths and never collapse.
    pub fn js_files(&self, spec_filter: Option<&str>) -> Vec<String> {
        let specs = match spec_filter {
            Some(filter) => self
                .mapper
                .map_files(&self.spec_dir, &[filter.to_string()]),
            None => self.specs.clone(),
        };

        let mut seen = HashSet::new();
        let mut files = Vec::new();
        for file in self.sources.iter().chain(&self.helpers).chain(&specs) {
            if seen.insert(file.clone()) {
                files.push(file.clone());
            }
        }
        files
    }

    /// Recover the on-disk location of every registered spec file by
    /// reversing the spec-directory mapping.
    ///
    /// Every spec entry must carry the prefix minted for the spec directory;
    /// anything else is a configuration bug and comes back as
    /// [`Error::SpecMapping`].
    pub fn specs_full_paths(&self) -> Result<Vec<PathBuf>> {
        let prefix = self.mapper.prefix_for(&self.spec_dir);
        self.specs
            .iter()
            .map(|entry| {
                let rel = entry
                    .strip_prefix(&prefix)
                    .ok_or_else(|| Error::SpecMapping {
                        path: entry.clone(),
                        prefix: prefix.clone(),
                    })?;
                Ok(self.spec_dir.join(rel.trim_start_matches('/')))
            })
            .collect()
    }
}

/// Drives the pattern matcher and namespace mapper to populate a manifest
/// from a [`HarnessConfig`], supplying category defaults where the config is
/// silent.
pub struct ManifestBuilder {
    root: PathBuf,
    config: HarnessConfig,
}

impl ManifestBuilder {
    pub fn new(root: PathBuf, config: HarnessConfig) -> Self {
        Self { root, config }
    }

    /// Build the manifest. Registration order is fixed: helpers, specs,
    /// stylesheets, sources. Helpers and specs fall back to their default
    /// patterns; stylesheets and sources are skipped when unconfigured.
    pub fn build(self) -> AssetManifest {
        let src_dir = self.config.src_dir(&self.root);
        let spec_dir = self.config.spec_dir(&self.root);
        let mut manifest = AssetManifest::new(src_dir.clone(), spec_dir.clone());

        let helpers = self
            .config
            .helpers
            .clone()
            .unwrap_or_else(|| default_patterns(DEFAULT_HELPER_PATTERNS));
        let spec_files = self
            .config
            .spec_files
            .clone()
            .unwrap_or_else(|| default_patterns(DEFAULT_SPEC_PATTERNS));

        manifest.add_helpers(&spec_dir, Some(&helpers));
        manifest.add_specs(&spec_dir, Some(&spec_files));
        manifest.add_stylesheets(&src_dir, self.config.stylesheets.as_deref());
        manifest.add_sources(&src_dir, self.config.src_files.as_deref());

        info!(
            "manifest built: {} sources, {} helpers, {} specs, {} stylesheets",
            manifest.sources().len(),
            manifest.helpers().len(),
            manifest.specs().len(),
            manifest.stylesheets().len(),
        );
        manifest
    }
}

fn default_patterns(patterns: &[&str]) -> Vec<String> {
    patterns.iter().map(|p| p.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;

    fn touch(dir: &Path, name: &str) {
        let path = dir.join(name);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "").unwrap();
    }

    fn patterns(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    /// Project tree matching the default layout.
    fn project() -> tempfile::TempDir {
        let root = tempfile::tempdir().unwrap();
        touch(root.path(), "Env.js");
        touch(root.path(), "spec/javascripts/helpers/SpecHelper.js");
        touch(root.path(), "spec/javascripts/EnvSpec.js");
        root
    }

    #[test]
    fn empty_config_gets_default_helpers_and_specs() {
        let root = project();
        let manifest =
            ManifestBuilder::new(root.path().to_path_buf(), HarnessConfig::default()).build();

        assert!(manifest.sources().is_empty());
        assert!(manifest.stylesheets().is_empty());
        assert_eq!(manifest.helpers().len(), 1);
        assert!(manifest.helpers()[0].ends_with("/helpers/SpecHelper.js"));
        assert_eq!(manifest.specs().len(), 1);
        assert!(manifest.specs()[0].ends_with("/EnvSpec.js"));
    }

    #[test]
    fn configured_src_files_map_under_root_prefix() {
        let root = project();
        let config = HarnessConfig {
            src_files: Some(patterns(&["**/*.js"])),
            ..Default::default()
        };
        let manifest = ManifestBuilder::new(root.path().to_path_buf(), config).build();
        assert!(manifest.sources().contains(&"/Env.js".to_string()));
    }

    #[test]
    fn registration_calls_accumulate_in_call_order() {
        let vendor = tempfile::tempdir().unwrap();
        touch(vendor.path(), "vendor-helper.js");
        let root = project();
        let spec_dir = root.path().join("spec/javascripts");

        let mut manifest = AssetManifest::new(root.path().to_path_buf(), spec_dir.clone());
        manifest.add_helpers(vendor.path(), Some(&patterns(&["*.js"])));
        manifest.add_helpers(&spec_dir, Some(&patterns(&["helpers/**/*.js"])));

        assert_eq!(manifest.helpers().len(), 2);
        assert!(manifest.helpers()[0].ends_with("/vendor-helper.js"));
        assert!(manifest.helpers()[1].ends_with("/helpers/SpecHelper.js"));
    }

    #[test]
    fn absent_patterns_are_a_no_op() {
        let root = project();
        let spec_dir = root.path().join("spec/javascripts");
        let mut manifest = AssetManifest::new(root.path().to_path_buf(), spec_dir.clone());
        manifest.add_helpers(&spec_dir, Some(&patterns(&["helpers/**/*.js"])));
        manifest.add_helpers(&spec_dir, None);
        assert_eq!(manifest.helpers().len(), 1);
    }

    #[test]
    fn js_files_orders_sources_helpers_specs() {
        let root = project();
        let config = HarnessConfig {
            src_files: Some(patterns(&["Env.js"])),
            ..Default::default()
        };
        let manifest = ManifestBuilder::new(root.path().to_path_buf(), config).build();
        let files = manifest.js_files(None);

        assert_eq!(files.len(), 3);
        assert_eq!(files[0], "/Env.js");
        assert!(files[1].ends_with("/helpers/SpecHelper.js"));
        assert!(files[2].ends_with("/EnvSpec.js"));
    }

    #[test]
    fn js_files_collapses_duplicate_mapped_paths() {
        let root = project();
        let mut manifest = AssetManifest::new(
            root.path().to_path_buf(),
            root.path().join("spec/javascripts"),
        );
        manifest.add_sources(root.path(), Some(&patterns(&["Env.js"])));
        manifest.add_helpers(root.path(), Some(&patterns(&["Env.js"])));

        assert_eq!(manifest.js_files(None), vec!["/Env.js"]);
    }

    #[test]
    fn js_files_filter_substitutes_the_spec_group() {
        let root = project();
        touch(root.path(), "spec/javascripts/OtherSpec.js");
        let manifest =
            ManifestBuilder::new(root.path().to_path_buf(), HarnessConfig::default()).build();

        let files = manifest.js_files(Some("EnvSpec.js"));
        assert!(files.iter().any(|f| f.ends_with("/EnvSpec.js")));
        assert!(!files.iter().any(|f| f.ends_with("/OtherSpec.js")));
    }

    #[test]
    fn specs_full_paths_recovers_disk_locations() {
        let root = project();
        let manifest =
            ManifestBuilder::new(root.path().to_path_buf(), HarnessConfig::default()).build();

        let full = manifest.specs_full_paths().unwrap();
        assert_eq!(full, vec![root.path().join("spec/javascripts/EnvSpec.js")]);
    }

    #[test]
    fn specs_full_paths_rejects_foreign_prefixes() {
        let foreign = tempfile::tempdir().unwrap();
        touch(foreign.path(), "RogueSpec.js");
        let root = project();

        let mut manifest = AssetManifest::new(
            root.path().to_path_buf(),
            root.path().join("spec/javascripts"),
        );
        manifest.add_specs(foreign.path(), Some(&patterns(&["*.js"])));

        assert!(matches!(
            manifest.specs_full_paths(),
            Err(crate::Error::SpecMapping { .. })
        ));
    }
}
