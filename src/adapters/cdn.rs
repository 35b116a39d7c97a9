//! HTTP client for the Ankama game-data CDN.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info};

use super::{validate_version, GameDataSource, SourceError};
use crate::domain::DatasetType;

/// Where the current version is published
pub const DEFAULT_CONFIG_URL: &str = "https://wakfu.cdn.ankama.com/gamedata/config.json";

/// Root of the versioned dataset dumps
pub const DEFAULT_BASE_URL: &str = "https://wakfu.cdn.ankama.com/gamedata";

/// Body of the version endpoint
#[derive(Debug, Deserialize)]
struct VersionConfig {
    #[serde(default)]
    version: Option<String>,
}

/// Game-data CDN client
pub struct CdnClient {
    /// URL of the version document
    config_url: String,
    /// Base URL that `<version>/<dataset>.json` is appended to
    base_url: String,
    /// HTTP client
    client: reqwest::Client,
}

impl CdnClient {
    /// Create a client with an optional per-request timeout
    pub fn new(
        config_url: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().context("Failed to build HTTP client")?;

        Ok(Self {
            config_url: config_url.into(),
            base_url: base_url.into(),
            client,
        })
    }

    /// Client for the public CDN, no timeout
    pub fn public() -> Result<Self> {
        Self::new(DEFAULT_CONFIG_URL, DEFAULT_BASE_URL, None)
    }

    /// Build the URL of a dataset dump
    fn dataset_url(&self, version: &str, dataset: DatasetType) -> String {
        format!(
            "{}/{}/{}",
            self.base_url.trim_end_matches('/'),
            version,
            dataset.file_name()
        )
    }

    /// GET a URL and decode its JSON body, failing on any non-2xx status
    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
    ) -> std::result::Result<T, SourceError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| SourceError::Transport {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status {
                url: url.to_string(),
                status,
            });
        }

        response.json().await.map_err(|source| SourceError::Decode {
            url: url.to_string(),
            source,
        })
    }
}

#[async_trait]
impl GameDataSource for CdnClient {
    fn name(&self) -> &str {
        "cdn"
    }

    async fn current_version(&self) -> Result<String> {
        let config: VersionConfig = self
            .get_json(&self.config_url)
            .await
            .context("Failed to resolve game-data version")?;

        let version = config
            .version
            .filter(|v| !v.is_empty())
            .ok_or_else(|| SourceError::MissingVersion {
                url: self.config_url.clone(),
            })?;
        validate_version(&version)?;

        info!(%version, "Resolved game-data version");
        Ok(version)
    }

    async fn fetch_dataset(&self, version: &str, dataset: DatasetType) -> Result<Value> {
        let url = self.dataset_url(version, dataset);
        debug!(%url, "Fetching dataset");

        let data = self
            .get_json(&url)
            .await
            .with_context(|| format!("Failed to fetch dataset '{}'", dataset))?;
        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dataset_url() {
        let client = CdnClient::new("http://cdn/config.json", "http://cdn/gamedata/", None).unwrap();
        assert_eq!(
            client.dataset_url("1.90.1.43", DatasetType::EquipmentItemTypes),
            "http://cdn/gamedata/1.90.1.43/equipmentItemTypes.json"
        );
    }

    #[test]
    fn test_public_client() {
        let client = CdnClient::public().unwrap();
        assert_eq!(client.name(), "cdn");
        assert_eq!(client.config_url, DEFAULT_CONFIG_URL);
    }

    // HTTP behaviour is covered against a mock server in tests/cdn.rs
}
