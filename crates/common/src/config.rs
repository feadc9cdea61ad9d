//! Harness configuration
//!
//! Loaded from a YAML file inside the project (by convention
//! `spec/javascripts/support/jspec.yml`). Every field is optional; a missing
//! or empty file behaves exactly like an empty configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;

/// Default spec directory, relative to the project root.
pub const DEFAULT_SPEC_DIR: &str = "spec/javascripts";

/// Default config file location, relative to the project root.
pub const DEFAULT_CONFIG_FILE: &str = "spec/javascripts/support/jspec.yml";

/// Harness configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HarnessConfig {
    /// Source directory, relative to the project root
    pub src_dir: Option<String>,

    /// Spec directory, relative to the project root
    pub spec_dir: Option<String>,

    /// Glob patterns for helper files, relative to the spec directory
    pub helpers: Option<Vec<String>>,

    /// Glob patterns for spec files, relative to the spec directory
    pub spec_files: Option<Vec<String>>,

    /// Glob patterns for stylesheets, relative to the source directory
    pub stylesheets: Option<Vec<String>>,

    /// Glob patterns for source files, relative to the source directory
    pub src_files: Option<Vec<String>>,
}

impl HarnessConfig {
    /// Load configuration from a YAML file.
    ///
    /// A missing file, or a file whose document is empty/null, yields the
    /// default (empty) configuration. Malformed YAML is an error.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("no config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config = serde_yaml::from_str::<Option<Self>>(&content)?.unwrap_or_default();
        debug!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Resolve the source directory against the project root.
    pub fn src_dir(&self, root: &Path) -> PathBuf {
        match &self.src_dir {
            Some(dir) => root.join(dir),
            None => root.to_path_buf(),
        }
    }

    /// Resolve the spec directory against the project root.
    pub fn spec_dir(&self, root: &Path) -> PathBuf {
        root.join(self.spec_dir.as_deref().unwrap_or(DEFAULT_SPEC_DIR))
    }
}
