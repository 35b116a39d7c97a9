//! wakfu-gamedata - Versioned game-data downloader and item bucketer
//!
//! Downloads the JSON dumps published for a game-data version, keeps a raw
//! copy of each, and reshapes the items dump into level/rarity buckets.
//!
//! # Architecture
//!
//! A run is a strictly sequential batch:
//! - The current version is resolved once from the CDN
//! - Each dataset is fetched, written raw, then written processed
//! - Items are normalized, bucketed by level bracket and rarity, and
//!   indexed per bracket
//!
//! # Modules
//!
//! - `adapters`: Remote game-data source (CDN client)
//! - `core`: Normalizer, bucketing, writer and orchestrator
//! - `domain`: Data structures (DatasetType, items, SyncReport)
//! - `config`: Layered configuration
//! - `cli`: Command-line interface
//!
//! # Usage
//!
//! ```bash
//! # Sync the current version into ./<version>/
//! wakfu-gamedata sync
//!
//! # Rebuild item buckets from an existing raw dump
//! wakfu-gamedata reprocess 1.90.1.43
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;

// Re-export main types at crate root for convenience
pub use crate::adapters::{CdnClient, GameDataSource};
pub use crate::core::{BracketTable, DatasetWriter, MalformedPolicy, Orchestrator, RunSettings};
pub use crate::domain::{DatasetType, NormalizedItem, SyncReport, ALL_DATASETS};
