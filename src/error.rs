//! Library error types.
//!
//! All errors surface synchronously from the operation that detects them.
//! There is no retry and no silent fallback: a missing or corrupt manifest
//! fails the current render, recovery is the caller's decision.

use std::path::PathBuf;
use thiserror::Error;

// ============================================================================
// ManifestError
// ============================================================================

/// Errors raised while reading and parsing a bundler manifest.
///
/// Every variant carries the attempted path so the failure can be diagnosed
/// from the message alone.
#[derive(Debug, Error)]
pub enum ManifestError {
    /// Manifest file missing or unreadable.
    #[error("no valid manifest found at `{path}`: {source}. Did you build your assets?")]
    NotFound {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Manifest content is not parseable as JSON.
    #[error("manifest at `{path}` is not valid JSON: {source}")]
    Unparsable {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// Manifest parsed, but the top level is not an object.
    #[error("manifest at `{path}` must be a JSON object mapping keys to chunks")]
    NotAnObject { path: PathBuf },

    /// A chunk value is not an object.
    #[error("manifest at `{path}`: chunk `{key}` is not a JSON object")]
    MalformedChunk { path: PathBuf, key: String },

    /// A chunk has no usable `file` field.
    #[error("manifest at `{path}`: chunk `{key}` has no `file` field")]
    MissingFile { path: PathBuf, key: String },
}

impl ManifestError {
    /// The manifest path this error was raised for.
    pub fn path(&self) -> &PathBuf {
        match self {
            Self::NotFound { path, .. }
            | Self::Unparsable { path, .. }
            | Self::NotAnObject { path }
            | Self::MalformedChunk { path, .. }
            | Self::MissingFile { path, .. } => path,
        }
    }
}

// ============================================================================
// ConfigError
// ============================================================================

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error when reading `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("Config file parsing error")]
    Toml(#[from] toml::de::Error),

    #[error("Config validation error: {0}")]
    Invalid(String),
}

// ============================================================================
// InvalidFilterError
// ============================================================================

/// A caller-supplied record filter value was neither a string nor a list of
/// strings.
#[derive(Debug, Error)]
#[error("invalid record filter: expected a string or a list of strings, got {found}")]
pub struct InvalidFilterError {
    /// JSON type name of the rejected value.
    pub found: &'static str,
}
