//! Error types for jspec

use thiserror::Error;

/// Result type alias using jspec Error
pub type Result<T> = std::result::Result<T, Error>;

/// jspec error types
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Spec entry {path} does not carry the spec directory prefix {prefix}")]
    SpecMapping { path: String, prefix: String },
}
