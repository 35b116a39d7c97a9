//! Adapter interfaces for the remote game-data endpoints.
//!
//! The orchestrator only talks to a [`GameDataSource`]; the CDN client is
//! the production implementation, tests plug in their own.

pub mod cdn;

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use crate::domain::DatasetType;

// Re-export the CDN client
pub use cdn::{CdnClient, DEFAULT_BASE_URL, DEFAULT_CONFIG_URL};

/// Trait for remote game-data providers
#[async_trait]
pub trait GameDataSource: Send + Sync {
    /// Human-readable source name
    fn name(&self) -> &str;

    /// Resolve the current content version
    async fn current_version(&self) -> Result<String>;

    /// Fetch one dataset dump for a version, untyped
    async fn fetch_dataset(&self, version: &str, dataset: DatasetType) -> Result<Value>;
}

/// Failures talking to a remote source
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned HTTP {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("{url} did not return valid JSON: {source}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} did not contain a version")]
    MissingVersion { url: String },

    #[error("refusing to use '{version}' as a version directory name")]
    InvalidVersion { version: String },
}

/// Reject versions that cannot safely name an output directory
pub fn validate_version(version: &str) -> std::result::Result<(), SourceError> {
    let unsafe_name = version.trim().is_empty()
        || version == "."
        || version == ".."
        || version.contains(['/', '\\']);

    if unsafe_name {
        return Err(SourceError::InvalidVersion {
            version: version.to_string(),
        });
    }
    Ok(())
}
