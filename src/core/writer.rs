//! Dataset persistence.
//!
//! Layout under the output root:
//!
//! ```text
//! <version>-source/<dataset>.json        raw dump, every dataset
//! <version>/<dataset>.json               pass-through, non-item datasets
//! <version>/items/<bracket>/index.json   bracket index
//! <version>/items/<bracket>/<rarity>.json
//! ```
//!
//! Every write replaces the previous file. The `items/` tree is cleared
//! before brackets are written, so rarity files and brackets from an earlier
//! run of the same version do not survive.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Value;
use tokio::fs;
use tracing::debug;

use crate::domain::DatasetType;

use super::bucketing::BucketedItems;

/// Writes datasets below an output root
#[derive(Debug, Clone)]
pub struct DatasetWriter {
    root: PathBuf,
}

impl DatasetWriter {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory holding the raw dumps of a version
    pub fn source_dir(&self, version: &str) -> PathBuf {
        self.root.join(format!("{}-source", version))
    }

    /// Directory holding the processed output of a version
    pub fn output_dir(&self, version: &str) -> PathBuf {
        self.root.join(version)
    }

    /// Directory holding the item brackets of a version
    pub fn items_dir(&self, version: &str) -> PathBuf {
        self.output_dir(version).join("items")
    }

    /// Persist the raw dump of a dataset
    pub async fn write_source(
        &self,
        version: &str,
        dataset: DatasetType,
        data: &Value,
    ) -> Result<PathBuf> {
        let dir = self.source_dir(version);
        ensure_dir(&dir).await?;
        let path = dir.join(dataset.file_name());
        write_json(&path, data).await?;
        Ok(path)
    }

    /// Persist a non-item dataset unchanged
    pub async fn write_passthrough(
        &self,
        version: &str,
        dataset: DatasetType,
        data: &Value,
    ) -> Result<PathBuf> {
        let dir = self.output_dir(version);
        ensure_dir(&dir).await?;
        let path = dir.join(dataset.file_name());
        write_json(&path, data).await?;
        Ok(path)
    }

    /// Write one directory per bracket with its index and rarity files.
    ///
    /// Any previous `items/` tree of the version is removed first. Returns the
    /// number of files written.
    pub async fn write_buckets(&self, version: &str, bucketed: &BucketedItems) -> Result<usize> {
        let items_dir = self.items_dir(version);
        clear_dir(&items_dir).await?;
        let mut files = 0;

        for (threshold, bracket) in &bucketed.brackets {
            let dir = items_dir.join(threshold.to_string());
            ensure_dir(&dir).await?;

            write_json(&dir.join("index.json"), &bracket.index).await?;
            files += 1;

            for (rarity, items) in &bracket.by_rarity {
                write_json(&dir.join(format!("{}.json", rarity)), items).await?;
                files += 1;
            }

            debug!(
                bracket = threshold,
                items = bracket.index.len(),
                "Wrote bracket"
            );
        }

        Ok(files)
    }

    /// Load a previously written raw dump
    pub async fn read_source(&self, version: &str, dataset: DatasetType) -> Result<Value> {
        let path = self.source_dir(version).join(dataset.file_name());
        let content = fs::read_to_string(&path)
            .await
            .with_context(|| format!("Failed to read raw dump: {}", path.display()))?;

        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse raw dump: {}", path.display()))
    }
}

/// Create a directory unless it already exists.
///
/// Losing a creation race to another process counts as success.
pub async fn ensure_dir(dir: &Path) -> Result<()> {
    if fs::metadata(dir).await.map(|m| m.is_dir()).unwrap_or(false) {
        return Ok(());
    }

    match fs::create_dir_all(dir).await {
        Err(e) if e.kind() == ErrorKind::AlreadyExists => Ok(()),
        result => {
            result.with_context(|| format!("Failed to create directory: {}", dir.display()))
        }
    }
}

/// Remove a directory tree; a missing directory is not an error
pub async fn clear_dir(dir: &Path) -> Result<()> {
    match fs::remove_dir_all(dir).await {
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        result => result.with_context(|| format!("Failed to clear directory: {}", dir.display())),
    }
}

/// Pretty-print a value with two-space indentation and overwrite `path`
pub async fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)
        .with_context(|| format!("Failed to serialize {}", path.display()))?;

    fs::write(path, json)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))
}
