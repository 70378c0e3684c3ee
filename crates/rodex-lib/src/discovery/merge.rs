//! Join extracted ids with their enrichment into `GameEntity` values

use super::entity::{GameEntity, non_negative};
use crate::api::DetailRecord;
use crate::primitives::Genre;
use std::collections::HashMap;
use tracing::trace;

/// Build entities in `ids` order.
///
/// Ids without a detail record are dropped; a missing icon leaves
/// `thumbnail_url` empty.
pub fn merge(
    ids: &[u64],
    details: &HashMap<u64, DetailRecord>,
    icons: &HashMap<u64, String>,
) -> Vec<GameEntity> {
    ids.iter()
        .filter_map(|id| {
            let Some(record) = details.get(id) else {
                trace!("No detail record for {}, dropping", id);
                return None;
            };
            let mut entity = entity_from_detail(*id, record)?;
            entity.thumbnail_url = icons.get(id).cloned();
            Some(entity)
        })
        .collect()
}

fn entity_from_detail(universe_id: u64, record: &DetailRecord) -> Option<GameEntity> {
    let place_id = non_negative(record.root_place_id);
    let mut entity =
        GameEntity::new(universe_id, place_id, record.name.clone().unwrap_or_default()).ok()?;

    entity.description = record.description.clone().unwrap_or_default();
    entity.player_count = non_negative(record.playing);
    entity.genre = record
        .genre
        .as_deref()
        .map(Genre::from_label)
        .unwrap_or_default();

    match &record.creator {
        Some(creator) => {
            entity.creator_id = non_negative(creator.id);
            entity.creator_name = creator.name.clone().unwrap_or_default();
            entity.verified = creator.has_verified_badge.unwrap_or(false);
        }
        None => {
            entity.creator_id = non_negative(record.creator_id);
            entity.creator_name = record.creator_name.clone().unwrap_or_default();
        }
    }

    Some(entity)
}

#[cfg(test)]
mod tests {
    include!("merge.test.rs");
}
