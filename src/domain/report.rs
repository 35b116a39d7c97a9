//! Summary of a sync run.
//!
//! A run either completes every dataset or fails as a whole, so a report
//! only ever describes a successful run.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::dataset::DatasetType;

/// What one sync run wrote
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncReport {
    /// Game-data version that was processed
    pub version: String,

    /// When the run started
    pub started_at: DateTime<Utc>,

    /// When the last dataset was written
    pub completed_at: Option<DateTime<Utc>>,

    /// One entry per processed dataset, in processing order
    pub datasets: Vec<DatasetReport>,
}

impl SyncReport {
    /// Start a report for a version
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            started_at: Utc::now(),
            completed_at: None,
            datasets: Vec::new(),
        }
    }

    /// Mark the run as finished
    pub fn complete(&mut self) {
        self.completed_at = Some(Utc::now());
    }

    /// Total number of files written across all datasets
    pub fn files_written(&self) -> usize {
        self.datasets.iter().map(|d| d.files_written).sum()
    }

    /// Look up the entry for a dataset type
    pub fn dataset(&self, dataset: DatasetType) -> Option<&DatasetReport> {
        self.datasets.iter().find(|d| d.dataset == dataset)
    }
}

/// Outcome for a single dataset type
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetReport {
    pub dataset: DatasetType,
    pub files_written: usize,

    /// Only set for the items dataset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<ItemStats>,
}

/// Counters gathered while bucketing items
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemStats {
    /// Items written to buckets
    pub normalized: usize,

    /// Indices of upstream records dropped as malformed
    pub skipped: Vec<usize>,

    /// Items whose rarity falls outside the known tiers
    pub rarity_out_of_range: usize,
}

impl std::fmt::Display for SyncReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Version: {}", self.version)?;
        for entry in &self.datasets {
            write!(f, "  {:<22} {:>4} file(s)", entry.dataset.as_str(), entry.files_written)?;
            if let Some(stats) = &entry.items {
                write!(
                    f,
                    "  [{} items, {} skipped, {} out-of-range rarity]",
                    stats.normalized,
                    stats.skipped.len(),
                    stats.rarity_out_of_range
                )?;
            }
            writeln!(f)?;
        }
        write!(f, "Total: {} file(s)", self.files_written())
    }
}
