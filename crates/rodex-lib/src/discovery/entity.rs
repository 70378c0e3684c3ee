//! Canonical game entity produced by every discovery path

use crate::primitives::Genre;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Upper bound of the rating scale
pub const MAX_RATING: f32 = 5.0;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EntityError {
    #[error("Game has neither a universe id nor a place id")]
    MissingIdentity,
}

/// A displayable game record.
///
/// Identity is the universe id when non-zero, otherwise the place id; an
/// entity with both zero cannot be constructed, deserialized included.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "GameEntityRecord")]
pub struct GameEntity {
    pub name: String,
    pub description: String,
    pub creator_name: String,
    pub creator_id: u64,
    pub place_id: u64,
    pub universe_id: u64,
    pub thumbnail_url: Option<String>,
    pub player_count: u64,
    pub rating: f32,
    pub genre: Genre,
    pub tags: Vec<String>,
    pub verified: bool,
    /// Caller-owned; never populated by discovery
    pub created_at: Option<String>,
    /// Caller-owned; never populated by discovery
    pub last_played: Option<String>,
}

impl GameEntity {
    pub fn new(
        universe_id: u64,
        place_id: u64,
        name: impl Into<String>,
    ) -> Result<Self, EntityError> {
        if universe_id == 0 && place_id == 0 {
            return Err(EntityError::MissingIdentity);
        }

        Ok(Self {
            name: name.into(),
            description: String::new(),
            creator_name: String::new(),
            creator_id: 0,
            place_id,
            universe_id,
            thumbnail_url: None,
            player_count: 0,
            rating: 0.0,
            genre: Genre::Unknown,
            tags: Vec::new(),
            verified: false,
            created_at: None,
            last_played: None,
        })
    }

    /// Canonical identifier
    pub fn id(&self) -> u64 {
        if self.universe_id != 0 {
            self.universe_id
        } else {
            self.place_id
        }
    }

    /// Set the rating from vote totals. Leaves the rating untouched when
    /// there are no votes.
    pub fn apply_votes(&mut self, up_votes: i64, down_votes: i64) {
        let up = up_votes.max(0) as f64;
        let down = down_votes.max(0) as f64;
        let total = up + down;
        if total > 0.0 {
            self.rating = ((up / total) * MAX_RATING as f64) as f32;
        }
    }

    /// Append a tag unless already present (tags are an ordered set).
    /// Discovery never tags; this is for callers layering their own labels.
    pub fn add_tag(&mut self, tag: impl Into<String>) {
        let tag = tag.into();
        if !tag.is_empty() && !self.tags.contains(&tag) {
            self.tags.push(tag);
        }
    }
}

/// Wire shape of [`GameEntity`], checked by [`GameEntity::new`] on the way in
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GameEntityRecord {
    #[serde(default)]
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    creator_name: String,
    #[serde(default)]
    creator_id: u64,
    #[serde(default)]
    place_id: u64,
    #[serde(default)]
    universe_id: u64,
    #[serde(default)]
    thumbnail_url: Option<String>,
    #[serde(default)]
    player_count: u64,
    #[serde(default)]
    rating: f32,
    #[serde(default)]
    genre: Genre,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default)]
    verified: bool,
    #[serde(default)]
    created_at: Option<String>,
    #[serde(default)]
    last_played: Option<String>,
}

impl TryFrom<GameEntityRecord> for GameEntity {
    type Error = EntityError;

    fn try_from(record: GameEntityRecord) -> Result<Self, Self::Error> {
        let mut entity = GameEntity::new(record.universe_id, record.place_id, record.name)?;
        entity.description = record.description;
        entity.creator_name = record.creator_name;
        entity.creator_id = record.creator_id;
        entity.thumbnail_url = record.thumbnail_url;
        entity.player_count = record.player_count;
        entity.rating = record.rating.clamp(0.0, MAX_RATING);
        entity.genre = record.genre;
        entity.verified = record.verified;
        entity.created_at = record.created_at;
        entity.last_played = record.last_played;
        for tag in record.tags {
            entity.add_tag(tag);
        }
        Ok(entity)
    }
}

/// Clamp an optional upstream count to an unsigned value (null/negative → 0)
pub fn non_negative(value: Option<i64>) -> u64 {
    value.map_or(0, |v| v.max(0) as u64)
}

#[cfg(test)]
mod tests {
    include!("entity.test.rs");
}
