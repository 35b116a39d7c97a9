//! Main orchestrator for a game-data sync.
//!
//! Resolves the version once, then fetches, transforms and writes each
//! dataset strictly one after another. The first failure aborts the run.

use anyhow::{Context, Result};
use serde_json::Value;
use tracing::{info, instrument, warn};

use crate::adapters::{validate_version, GameDataSource};
use crate::domain::{DatasetReport, DatasetType, ItemStats, SyncReport, ALL_DATASETS};

use super::bucketing::{bucket_items, BracketTable};
use super::normalizer::{normalize_items, MalformedPolicy};
use super::writer::DatasetWriter;

/// Per-run parameters
#[derive(Debug, Clone)]
pub struct RunSettings {
    /// Datasets to process, in processing order
    pub datasets: Vec<DatasetType>,

    /// Level thresholds for item brackets
    pub brackets: BracketTable,

    /// Handling of unreadable item records
    pub malformed: MalformedPolicy,
}

impl Default for RunSettings {
    fn default() -> Self {
        Self {
            datasets: ALL_DATASETS.to_vec(),
            brackets: BracketTable::default(),
            malformed: MalformedPolicy::default(),
        }
    }
}

/// Game-data sync orchestrator
pub struct Orchestrator<S> {
    /// Remote game-data provider
    source: S,
    /// Output tree writer
    writer: DatasetWriter,
    settings: RunSettings,
}

impl<S: GameDataSource> Orchestrator<S> {
    /// Create an orchestrator
    pub fn new(source: S, writer: DatasetWriter, settings: RunSettings) -> Self {
        Self {
            source,
            writer,
            settings,
        }
    }

    /// Run a full sync.
    ///
    /// `pinned_version` skips version resolution.
    #[instrument(skip(self), fields(source = %self.source.name()))]
    pub async fn sync(&self, pinned_version: Option<&str>) -> Result<SyncReport> {
        let version = match pinned_version {
            Some(v) => {
                validate_version(v)?;
                info!(version = %v, "Using pinned version");
                v.to_string()
            }
            None => self.source.current_version().await?,
        };

        let mut report = SyncReport::new(&version);

        for &dataset in &self.settings.datasets {
            info!(%dataset, "Processing dataset");
            let entry = self
                .process_dataset(&version, dataset)
                .await
                .with_context(|| format!("Dataset '{}' failed", dataset))?;
            report.datasets.push(entry);
        }

        report.complete();
        info!(
            %version,
            datasets = report.datasets.len(),
            files = report.files_written(),
            "Sync completed"
        );

        Ok(report)
    }

    /// Fetch, transform and write one dataset
    async fn process_dataset(&self, version: &str, dataset: DatasetType) -> Result<DatasetReport> {
        let data = self.source.fetch_dataset(version, dataset).await?;

        self.writer.write_source(version, dataset, &data).await?;
        let mut files_written = 1;

        if dataset.is_items() {
            let (files, stats) = self.write_items(version, &data).await?;
            files_written += files;
            return Ok(DatasetReport {
                dataset,
                files_written,
                items: Some(stats),
            });
        }

        self.writer.write_passthrough(version, dataset, &data).await?;
        files_written += 1;

        Ok(DatasetReport {
            dataset,
            files_written,
            items: None,
        })
    }

    /// Rebuild the item brackets of a version from its raw dump on disk
    #[instrument(skip(self))]
    pub async fn reprocess_items(&self, version: &str) -> Result<DatasetReport> {
        validate_version(version)?;
        let data = self
            .writer
            .read_source(version, DatasetType::Items)
            .await?;

        let (files_written, stats) = self.write_items(version, &data).await?;
        info!(files = files_written, items = stats.normalized, "Reprocessed items");

        Ok(DatasetReport {
            dataset: DatasetType::Items,
            files_written,
            items: Some(stats),
        })
    }

    /// Normalize, bucket and write the items dataset
    async fn write_items(&self, version: &str, data: &Value) -> Result<(usize, ItemStats)> {
        let outcome = normalize_items(data, self.settings.malformed)?;
        if !outcome.skipped.is_empty() {
            warn!(
                skipped = outcome.skipped.len(),
                "Dropped malformed item records"
            );
        }

        let bucketed = bucket_items(outcome.items, &self.settings.brackets);
        let files = self.writer.write_buckets(version, &bucketed).await?;

        let stats = ItemStats {
            normalized: bucketed.item_count(),
            skipped: outcome.skipped,
            rarity_out_of_range: bucketed.rarity_out_of_range,
        };
        Ok((files, stats))
    }
}
