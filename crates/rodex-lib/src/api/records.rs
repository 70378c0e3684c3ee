//! Upstream record shapes
//!
//! Every record is decoded individually and leniently: optional fields
//! tolerate `null`/absence, and a record that fails to decode is skipped
//! rather than failing the whole batch.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::trace;

/// Game detail record from the batched detail endpoint
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailRecord {
    /// Universe identifier
    pub id: u64,
    #[serde(default)]
    pub root_place_id: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub creator: Option<DetailCreator>,
    /// Flat creator fields used by some detail shapes instead of `creator`
    #[serde(default)]
    pub creator_id: Option<i64>,
    #[serde(default)]
    pub creator_name: Option<String>,
    #[serde(default)]
    pub playing: Option<i64>,
    #[serde(default)]
    pub genre: Option<String>,
}

/// Nested creator object on a detail record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailCreator {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub has_verified_badge: Option<bool>,
}

/// `{targetId, imageUrl}` record from the thumbnail services
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThumbnailRecord {
    pub target_id: u64,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl ThumbnailRecord {
    /// Usable image URL, if the thumbnail finished rendering
    pub fn usable_url(&self) -> Option<&str> {
        if matches!(self.state.as_deref(), Some("Error" | "Blocked")) {
            return None;
        }
        self.image_url.as_deref().filter(|url| !url.trim().is_empty())
    }
}

/// Pre-shaped record from the legacy keyword search endpoint (PascalCase)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LegacyGameRecord {
    #[serde(rename = "PlaceID", alias = "PlaceId", default)]
    pub place_id: Option<u64>,
    #[serde(rename = "UniverseID", alias = "UniverseId", default)]
    pub universe_id: Option<u64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(alias = "GameDescription", default)]
    pub description: Option<String>,
    #[serde(rename = "CreatorID", alias = "CreatorId", default)]
    pub creator_id: Option<i64>,
    #[serde(default)]
    pub creator_name: Option<String>,
    #[serde(default)]
    pub creator_has_verified_badge: Option<bool>,
    #[serde(default)]
    pub player_count: Option<i64>,
    #[serde(default)]
    pub total_up_votes: Option<i64>,
    #[serde(default)]
    pub total_down_votes: Option<i64>,
    #[serde(default)]
    pub genre: Option<String>,
}

/// Decode every element of the first array found in `document`.
///
/// The array may be the document itself or sit under one of `keys`
/// (first present key wins). Elements that fail to decode are dropped.
pub fn decode_records<T>(document: &Value, keys: &[&str]) -> Vec<T>
where
    T: DeserializeOwned,
{
    let items = match document {
        Value::Array(items) => Some(items),
        Value::Object(map) => keys
            .iter()
            .find_map(|key| map.get(*key).and_then(Value::as_array)),
        _ => None,
    };

    let Some(items) = items else {
        return Vec::new();
    };

    items
        .iter()
        .filter_map(|item| match T::deserialize(item) {
            Ok(record) => Some(record),
            Err(e) => {
                trace!("Skipping undecodable record: {}", e);
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    include!("records.test.rs");
}
