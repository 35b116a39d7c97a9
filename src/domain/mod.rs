//! Domain types for the game-data pipeline.
//!
//! This module contains the core data structures:
//! - DatasetType: the closed set of CDN dumps
//! - RawItem / NormalizedItem: item records before and after projection
//! - SyncReport: what a run wrote

pub mod dataset;
pub mod item;
pub mod report;

// Re-export commonly used types
pub use dataset::{select_datasets, DatasetType, ALL_DATASETS};
pub use item::{EquipEffect, LocalizedText, NormalizedItem, RawItem};
pub use report::{DatasetReport, ItemStats, SyncReport};
