//! Dataset types published by the game-data CDN.
//!
//! The CDN exposes a closed set of JSON dumps per version. Only `items`
//! gets reshaped; every other type is written through unchanged.

use serde::{Deserialize, Serialize};

/// One named game-data dump
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DatasetType {
    Actions,
    Blueprints,
    CollectibleResources,
    EquipmentItemTypes,
    HarvestLoots,
    ItemTypes,
    ItemProperties,
    Items,
    JobsItems,
    RecipeCategories,
    RecipeIngredients,
    RecipeResults,
    Recipes,
    ResourceTypes,
    Resources,
    States,
}

/// Every dataset type, in the order a run processes them
pub const ALL_DATASETS: [DatasetType; 16] = [
    DatasetType::Actions,
    DatasetType::Blueprints,
    DatasetType::CollectibleResources,
    DatasetType::EquipmentItemTypes,
    DatasetType::HarvestLoots,
    DatasetType::ItemTypes,
    DatasetType::ItemProperties,
    DatasetType::Items,
    DatasetType::JobsItems,
    DatasetType::RecipeCategories,
    DatasetType::RecipeIngredients,
    DatasetType::RecipeResults,
    DatasetType::Recipes,
    DatasetType::ResourceTypes,
    DatasetType::Resources,
    DatasetType::States,
];

impl DatasetType {
    /// Name used both in the CDN URL and in output file names
    pub fn as_str(&self) -> &'static str {
        match self {
            DatasetType::Actions => "actions",
            DatasetType::Blueprints => "blueprints",
            DatasetType::CollectibleResources => "collectibleResources",
            DatasetType::EquipmentItemTypes => "equipmentItemTypes",
            DatasetType::HarvestLoots => "harvestLoots",
            DatasetType::ItemTypes => "itemTypes",
            DatasetType::ItemProperties => "itemProperties",
            DatasetType::Items => "items",
            DatasetType::JobsItems => "jobsItems",
            DatasetType::RecipeCategories => "recipeCategories",
            DatasetType::RecipeIngredients => "recipeIngredients",
            DatasetType::RecipeResults => "recipeResults",
            DatasetType::Recipes => "recipes",
            DatasetType::ResourceTypes => "resourceTypes",
            DatasetType::Resources => "resources",
            DatasetType::States => "states",
        }
    }

    /// File name of this dataset's JSON dump
    pub fn file_name(&self) -> String {
        format!("{}.json", self.as_str())
    }

    /// Whether this dataset is decomposed into level/rarity buckets
    pub fn is_items(&self) -> bool {
        matches!(self, DatasetType::Items)
    }
}

impl std::fmt::Display for DatasetType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for DatasetType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        ALL_DATASETS
            .iter()
            .copied()
            .find(|d| d.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| anyhow::anyhow!("Unknown dataset type: {}", s))
    }
}

/// Restrict the dataset list to `only`, keeping declaration order.
///
/// An empty filter keeps everything.
pub fn select_datasets(all: &[DatasetType], only: &[DatasetType]) -> Vec<DatasetType> {
    if only.is_empty() {
        return all.to_vec();
    }
    all.iter().copied().filter(|d| only.contains(d)).collect()
}
