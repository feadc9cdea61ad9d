//! jspec Common Library
//!
//! The asset-manifest and virtual-namespace core of the jspec test harness:
//! glob resolution, directory-to-URL-prefix mapping, and the ordered asset
//! registries the runner page is assembled from.

pub mod config;
pub mod error;
pub mod manifest;
pub mod namespace;
pub mod patterns;

// Re-export commonly used types
pub use config::HarnessConfig;
pub use error::{Error, Result};
pub use manifest::{AssetManifest, ManifestBuilder};
pub use namespace::NamespaceMapper;

/// jspec version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
