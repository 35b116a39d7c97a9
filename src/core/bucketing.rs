//! Level-bracket and rarity bucketing.
//!
//! Each item lands in the bracket of the smallest threshold that is greater
//! than or equal to its level, i.e. brackets are the half-open intervals
//! `(t[i-1], t[i]]` with everything at or below `t[0]` in the first one.
//! Within a bracket items are split by rarity tier, and a per-bracket index
//! lists all of them sorted by rarity then level, both descending.

use std::collections::BTreeMap;
use std::ops::RangeInclusive;

use thiserror::Error;
use tracing::{debug, warn};

use crate::domain::item::NormalizedItem;

/// Level thresholds published by the game-data tooling
pub const DEFAULT_BRACKETS: [u32; 16] = [
    6, 20, 35, 50, 65, 80, 95, 110, 125, 140, 155, 170, 185, 200, 215, 230,
];

/// Rarity tiers that always get a bucket file
pub const RARITY_RANGE: RangeInclusive<i64> = 0..=8;

/// Invalid threshold tables
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BracketTableError {
    #[error("bracket table is empty")]
    Empty,

    #[error("bracket table must be strictly ascending: {previous} is followed by {next}")]
    NotAscending { previous: u32, next: u32 },
}

/// A validated, strictly ascending list of level thresholds
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BracketTable {
    thresholds: Vec<u32>,
}

impl Default for BracketTable {
    fn default() -> Self {
        Self {
            thresholds: DEFAULT_BRACKETS.to_vec(),
        }
    }
}

impl BracketTable {
    /// Build a table, rejecting empty or unsorted input
    pub fn new(thresholds: Vec<u32>) -> Result<Self, BracketTableError> {
        if thresholds.is_empty() {
            return Err(BracketTableError::Empty);
        }
        for pair in thresholds.windows(2) {
            if pair[0] >= pair[1] {
                return Err(BracketTableError::NotAscending {
                    previous: pair[0],
                    next: pair[1],
                });
            }
        }
        Ok(Self { thresholds })
    }

    pub fn thresholds(&self) -> &[u32] {
        &self.thresholds
    }

    /// Bracket for a level: the smallest threshold `>= level`.
    ///
    /// Levels past the last threshold stay in the last bracket.
    pub fn bracket_for(&self, level: i64) -> u32 {
        let first = self.thresholds[0];
        if level <= i64::from(first) {
            return first;
        }

        // First index whose threshold is >= level
        let idx = self.thresholds.partition_point(|&t| i64::from(t) < level);
        match self.thresholds.get(idx) {
            Some(&bracket) => bracket,
            None => {
                let last = self.thresholds[self.thresholds.len() - 1];
                debug!(level, bracket = last, "Level above last threshold, using last bracket");
                last
            }
        }
    }
}

/// All items of one bracket
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Bracket {
    /// Items per rarity tier, in input order
    pub by_rarity: BTreeMap<i64, Vec<NormalizedItem>>,

    /// Every item of the bracket, sorted by rarity desc then level desc
    pub index: Vec<NormalizedItem>,
}

/// Bucketed view of an items dataset
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BucketedItems {
    /// Keyed by bracket threshold, ascending
    pub brackets: BTreeMap<u32, Bracket>,

    /// Items whose rarity fell outside [`RARITY_RANGE`]
    pub rarity_out_of_range: usize,
}

impl BucketedItems {
    /// Total number of items across all brackets
    pub fn item_count(&self) -> usize {
        self.brackets.values().map(|b| b.index.len()).sum()
    }
}

/// Sort items by rarity descending, then level descending.
///
/// The sort is stable, so remaining ties keep their relative order.
pub fn sort_index(items: &mut [NormalizedItem]) {
    items.sort_by(|a, b| b.rarity.cmp(&a.rarity).then(b.level.cmp(&a.level)));
}

/// Split items into (bracket, rarity) buckets and build each bracket index.
///
/// Every bracket of `table` gets a bucket for every tier in [`RARITY_RANGE`],
/// even when it stays empty. An item with an unknown rarity is kept under its
/// own rarity value rather than being folded into a known tier.
pub fn bucket_items(items: Vec<NormalizedItem>, table: &BracketTable) -> BucketedItems {
    let mut brackets: BTreeMap<u32, Bracket> = table
        .thresholds()
        .iter()
        .map(|&t| {
            let by_rarity = RARITY_RANGE.map(|r| (r, Vec::new())).collect();
            (
                t,
                Bracket {
                    by_rarity,
                    index: Vec::new(),
                },
            )
        })
        .collect();

    let mut rarity_out_of_range = 0;

    for item in items {
        if !RARITY_RANGE.contains(&item.rarity) {
            warn!(
                item_id = item.id,
                rarity = item.rarity,
                "Item rarity outside known tiers {}..={}",
                RARITY_RANGE.start(),
                RARITY_RANGE.end()
            );
            rarity_out_of_range += 1;
        }

        let threshold = table.bracket_for(item.level);
        let bracket = brackets.entry(threshold).or_default();
        bracket.index.push(item.clone());
        bracket.by_rarity.entry(item.rarity).or_default().push(item);
    }

    for bracket in brackets.values_mut() {
        sort_index(&mut bracket.index);
    }

    BucketedItems {
        brackets,
        rarity_out_of_range,
    }
}
