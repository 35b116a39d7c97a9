//! Core pipeline logic.
//!
//! This module contains:
//! - Normalizer: projection of raw item records
//! - Bucketing: level-bracket and rarity partitioning
//! - Writer: output tree persistence
//! - Orchestrator: sequencing of a full sync

pub mod bucketing;
pub mod normalizer;
pub mod orchestrator;
pub mod writer;

// Re-export commonly used types
pub use bucketing::{
    bucket_items, sort_index, BracketTable, BracketTableError, BucketedItems, DEFAULT_BRACKETS,
    RARITY_RANGE,
};
pub use normalizer::{normalize_item, normalize_items, MalformedPolicy, NormalizeError};
pub use orchestrator::{Orchestrator, RunSettings};
pub use writer::{ensure_dir, write_json, DatasetWriter};
