//! Item normalization.
//!
//! Projects upstream item records onto [`NormalizedItem`]: unused fields are
//! dropped, `gfxId` becomes `graphic_id`, and equip effects are flattened to
//! `{ id, action_id, params }`.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::domain::item::{EquipEffect, NormalizedItem, RawItem};

/// What to do with an item record that is missing a required field
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MalformedPolicy {
    /// Fail the whole run
    #[default]
    Abort,

    /// Drop the record and log a warning
    Skip,
}

/// Normalization failures
#[derive(Debug, Error)]
pub enum NormalizeError {
    #[error("items payload is not a JSON array (got {found})")]
    NotAnArray { found: &'static str },

    #[error("malformed item record at index {index}: {source}")]
    MalformedRecord {
        index: usize,
        #[source]
        source: serde_json::Error,
    },
}

/// Result of normalizing a whole items payload
#[derive(Debug, Clone, Default)]
pub struct NormalizeOutcome {
    /// Normalized items, in upstream order
    pub items: Vec<NormalizedItem>,

    /// Indices of records dropped under [`MalformedPolicy::Skip`]
    pub skipped: Vec<usize>,
}

/// Project a single raw item
pub fn normalize_item(raw: RawItem) -> NormalizedItem {
    let item = raw.definition.item;
    let equip_effects = raw
        .definition
        .equip_effects
        .unwrap_or_default()
        .into_iter()
        .map(|e| EquipEffect {
            id: e.effect.definition.id,
            action_id: e.effect.definition.action_id,
            params: e.effect.definition.params,
        })
        .collect();

    NormalizedItem {
        id: item.id,
        title: raw.title,
        description: raw.description,
        level: item.level,
        item_type_id: item.base_parameters.item_type_id,
        rarity: item.base_parameters.rarity,
        graphic_id: item.graphic_parameters.gfx_id,
        equip_effects,
    }
}

/// Normalize every record of an `items.json` payload.
///
/// Records map 1:1 onto the output unless `policy` is [`MalformedPolicy::Skip`]
/// and a record cannot be read.
pub fn normalize_items(
    payload: &Value,
    policy: MalformedPolicy,
) -> Result<NormalizeOutcome, NormalizeError> {
    let records = payload.as_array().ok_or(NormalizeError::NotAnArray {
        found: json_kind(payload),
    })?;

    let mut outcome = NormalizeOutcome {
        items: Vec::with_capacity(records.len()),
        skipped: Vec::new(),
    };

    for (index, record) in records.iter().enumerate() {
        match RawItem::deserialize(record) {
            Ok(raw) => outcome.items.push(normalize_item(raw)),
            Err(source) => match policy {
                MalformedPolicy::Abort => {
                    return Err(NormalizeError::MalformedRecord { index, source });
                }
                MalformedPolicy::Skip => {
                    warn!(index, error = %source, "Skipping malformed item record");
                    outcome.skipped.push(index);
                }
            },
        }
    }

    debug!(
        items = outcome.items.len(),
        skipped = outcome.skipped.len(),
        "Normalized items"
    );

    Ok(outcome)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
