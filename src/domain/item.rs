//! Item records: the upstream shape and the reduced shape we publish.
//!
//! Upstream items carry far more than downstream consumers need. The raw
//! structs below only name the fields the normalizer reads; serde ignores
//! everything else.

use serde::{Deserialize, Serialize};
use serde_json::Number;

/// Localized strings, restricted to the languages the game ships
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedText {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fr: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub en: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub es: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pt: Option<String>,
}

/// An item record as served by the CDN
#[derive(Debug, Clone, Deserialize)]
pub struct RawItem {
    pub definition: RawItemDefinition,
    pub title: LocalizedText,
    #[serde(default)]
    pub description: Option<LocalizedText>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawItemDefinition {
    pub item: RawItemCore,

    /// Absent on some consumables, `null` on a few others
    #[serde(default)]
    pub equip_effects: Option<Vec<RawEquipEffect>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawItemCore {
    pub id: i64,
    pub level: i64,
    pub base_parameters: RawBaseParameters,
    pub graphic_parameters: RawGraphicParameters,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawBaseParameters {
    pub item_type_id: i64,
    pub rarity: i64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawGraphicParameters {
    pub gfx_id: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawEquipEffect {
    pub effect: RawEffect,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawEffect {
    pub definition: RawEffectDefinition,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawEffectDefinition {
    pub id: i64,
    pub action_id: i64,
    #[serde(default)]
    pub params: Vec<Number>,
}

/// The reduced item record written to the bucket files
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedItem {
    pub id: i64,
    pub title: LocalizedText,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<LocalizedText>,
    pub level: i64,
    pub item_type_id: i64,
    pub rarity: i64,
    pub graphic_id: i64,
    pub equip_effects: Vec<EquipEffect>,
}

/// A flattened equip effect
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquipEffect {
    pub id: i64,
    pub action_id: i64,
    /// Kept as JSON numbers so integers and floats serialize as upstream wrote them
    pub params: Vec<Number>,
}
