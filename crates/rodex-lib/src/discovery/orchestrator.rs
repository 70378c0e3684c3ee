//! Per-intent discovery drivers
//!
//! Each intent walks its own fallback chain against the upstream services
//! and always resolves to a [`DiscoveryOutcome`]. Upstream failures are
//! caught at the branch that issued the request: a primary failure either
//! advances the chain or lands in `last_error`, a best-effort failure only
//! leaves a field empty.
//!
//! | Intent              | Chain                                                   |
//! |---------------------|---------------------------------------------------------|
//! | search              | omni search (cookie only) → legacy search               |
//! | trending / popular  | catalog → ordered candidates → first non-empty content  |
//! | top rated           | catalog → best guess sort → content                     |
//! | recommended         | fixed recommendation document                           |

use super::catalog::{TOP_RATED_PATTERNS, parse_catalog, resolve_best_strategy, resolve_strategy_order};
use super::enrich::{EnrichmentMode, fetch_enrichment};
use super::entity::{GameEntity, non_negative};
use super::extract::{GAME_CONTENT, extract_ids_from_bytes};
use super::merge::merge;
use crate::api::{LegacyGameRecord, UpstreamClient};
use crate::networking::SessionCredentials;
use crate::primitives::{DiscoveryIntent, Genre};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, trace, warn};

/// Caps applied before requests are dispatched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoveryLimits {
    /// Identifier cap for search, sort content and top rated documents
    pub search_cap: usize,
    /// Identifier cap for the recommendation document
    pub recommendation_cap: usize,
    /// Ids per detail/icon batch request
    pub enrichment_batch_max: usize,
    /// Per-item universe or place icon lookups in the legacy path
    pub fallback_lookup_max: usize,
}

impl Default for DiscoveryLimits {
    fn default() -> Self {
        Self {
            search_cap: 40,
            recommendation_cap: 60,
            enrichment_batch_max: 50,
            fallback_lookup_max: 10,
        }
    }
}

/// Result of one discovery call
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscoveryOutcome {
    pub games: Vec<GameEntity>,
    /// Most recent primary failure, for user-facing diagnostics
    pub last_error: Option<String>,
}

impl DiscoveryOutcome {
    pub fn failed(error: impl ToString) -> Self {
        Self {
            games: Vec::new(),
            last_error: Some(error.to_string()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }
}

/// Stateless discovery driver over an injected upstream client
pub struct SourceOrchestrator<C: UpstreamClient> {
    client: Arc<C>,
    credentials: SessionCredentials,
    limits: DiscoveryLimits,
}

impl<C: UpstreamClient> SourceOrchestrator<C> {
    pub fn new(client: Arc<C>, credentials: SessionCredentials, limits: DiscoveryLimits) -> Self {
        Self {
            client,
            credentials,
            limits,
        }
    }

    pub fn client(&self) -> &Arc<C> {
        &self.client
    }

    pub fn limits(&self) -> &DiscoveryLimits {
        &self.limits
    }

    /// Dispatch on intent; `query` is only read for [`DiscoveryIntent::Search`]
    pub async fn discover(
        &self,
        intent: DiscoveryIntent,
        query: &str,
        limit: usize,
    ) -> DiscoveryOutcome {
        match intent {
            DiscoveryIntent::Search => self.search(query, limit).await,
            DiscoveryIntent::Trending => self.trending(limit).await,
            DiscoveryIntent::Popular => self.popular(limit).await,
            DiscoveryIntent::TopRated => self.top_rated(limit).await,
            DiscoveryIntent::Recommended => self.recommended(limit).await,
        }
    }

    /// Keyword search: omni search when a cookie is present, legacy search
    /// on failure, on an empty result, or without a cookie.
    pub async fn search(&self, query: &str, limit: usize) -> DiscoveryOutcome {
        let query = query.trim();
        if query.is_empty() || limit == 0 {
            return DiscoveryOutcome::default();
        }

        if self.credentials.is_authenticated() {
            let outcome = self.omni_search(query, limit).await;
            if !outcome.is_empty() {
                return outcome;
            }
            debug!(
                "Omni search for '{}' produced nothing ({}), falling back to legacy search",
                query,
                outcome.last_error.as_deref().unwrap_or("empty")
            );
        }

        self.legacy_search(query, limit).await
    }

    pub async fn trending(&self, limit: usize) -> DiscoveryOutcome {
        self.first_non_empty_sort(DiscoveryIntent::Trending, limit).await
    }

    pub async fn popular(&self, limit: usize) -> DiscoveryOutcome {
        self.first_non_empty_sort(DiscoveryIntent::Popular, limit).await
    }

    /// Best guess top rated sort; falls back to the first catalog entry
    pub async fn top_rated(&self, limit: usize) -> DiscoveryOutcome {
        if limit == 0 {
            return DiscoveryOutcome::default();
        }

        let session_id = new_session_id();
        let catalog = match self
            .client
            .fetch_sort_catalog(&session_id, &self.credentials)
            .await
        {
            Ok(document) => parse_catalog(&document),
            Err(e) => {
                warn!("Sort catalog unavailable: {}", e);
                return DiscoveryOutcome::failed(e);
            }
        };

        let Some(sort_id) = resolve_best_strategy(&catalog, TOP_RATED_PATTERNS) else {
            debug!("Sort catalog is empty, no top rated sort");
            return DiscoveryOutcome::default();
        };

        debug!("Top rated sort resolved to '{}'", sort_id);
        match self
            .client
            .fetch_sort_content(&sort_id, &session_id, &self.credentials)
            .await
        {
            Ok(body) => {
                let ids = extract_ids_from_bytes(&body, &GAME_CONTENT, self.limits.search_cap);
                self.enrich_and_merge(ids, limit).await
            }
            Err(e) => {
                warn!("Top rated sort '{}' failed: {}", sort_id, e);
                DiscoveryOutcome::failed(e)
            }
        }
    }

    pub async fn recommended(&self, limit: usize) -> DiscoveryOutcome {
        if limit == 0 {
            return DiscoveryOutcome::default();
        }

        let session_id = new_session_id();
        match self
            .client
            .fetch_recommendations(&session_id, &self.credentials)
            .await
        {
            Ok(body) => {
                let ids =
                    extract_ids_from_bytes(&body, &GAME_CONTENT, self.limits.recommendation_cap);
                self.enrich_and_merge(ids, limit).await
            }
            Err(e) => {
                warn!("Recommendations unavailable: {}", e);
                DiscoveryOutcome::failed(e)
            }
        }
    }

    async fn first_non_empty_sort(&self, intent: DiscoveryIntent, limit: usize) -> DiscoveryOutcome {
        if limit == 0 {
            return DiscoveryOutcome::default();
        }

        let session_id = new_session_id();
        let catalog = match self
            .client
            .fetch_sort_catalog(&session_id, &self.credentials)
            .await
        {
            Ok(document) => parse_catalog(&document),
            Err(e) => {
                warn!("Sort catalog unavailable: {}", e);
                return DiscoveryOutcome::failed(e);
            }
        };

        let candidates = resolve_strategy_order(&catalog, intent.as_str());
        trace!("Candidate sorts for {}: {:?}", intent, candidates);

        for sort_id in &candidates {
            let body = match self
                .client
                .fetch_sort_content(sort_id, &session_id, &self.credentials)
                .await
            {
                Ok(body) => body,
                Err(e) => {
                    debug!("Sort '{}' failed, trying next candidate: {}", sort_id, e);
                    continue;
                }
            };

            let ids = extract_ids_from_bytes(&body, &GAME_CONTENT, self.limits.search_cap);
            if ids.is_empty() {
                debug!("Sort '{}' has no games, trying next candidate", sort_id);
                continue;
            }

            debug!("Using sort '{}' for {} ({} ids)", sort_id, intent, ids.len());
            return self.enrich_and_merge(ids, limit).await;
        }

        debug!("No sort produced games for {}", intent);
        DiscoveryOutcome::default()
    }

    async fn omni_search(&self, query: &str, limit: usize) -> DiscoveryOutcome {
        let session_id = new_session_id();
        match self
            .client
            .omni_search(query, &session_id, &self.credentials)
            .await
        {
            Ok(body) => {
                let ids = extract_ids_from_bytes(&body, &GAME_CONTENT, self.limits.search_cap);
                self.enrich_and_merge(ids, limit).await
            }
            Err(e) => DiscoveryOutcome::failed(e),
        }
    }

    async fn enrich_and_merge(&self, mut ids: Vec<u64>, limit: usize) -> DiscoveryOutcome {
        ids.truncate(limit);
        if ids.is_empty() {
            return DiscoveryOutcome::default();
        }

        // Rounds run one after another; each round is its own detail/icon join
        let batch_max = self.limits.enrichment_batch_max.max(1);
        let mut details = HashMap::new();
        let mut icons = HashMap::new();
        let mut last_error = None;

        for round in ids.chunks(batch_max) {
            let bundle = fetch_enrichment(
                self.client.as_ref(),
                round,
                &self.credentials,
                EnrichmentMode::Primary,
                batch_max,
            )
            .await;

            details.extend(bundle.details);
            icons.extend(bundle.icons);
            if bundle.detail_error.is_some() {
                last_error = bundle.detail_error;
            }
        }

        DiscoveryOutcome {
            games: merge(&ids, &details, &icons),
            last_error,
        }
    }

    async fn legacy_search(&self, query: &str, limit: usize) -> DiscoveryOutcome {
        let max_rows = limit.min(self.limits.search_cap);
        let records = match self
            .client
            .legacy_search(query, max_rows, &self.credentials)
            .await
        {
            Ok(records) => records,
            Err(e) => {
                warn!("Legacy search for '{}' failed: {}", query, e);
                return DiscoveryOutcome::failed(e);
            }
        };

        let mut games = Vec::with_capacity(records.len());
        let mut lookups = 0;
        for record in records.iter().take(max_rows) {
            let place_id = record.place_id.unwrap_or(0);
            let mut universe_id = record.universe_id.unwrap_or(0);

            if universe_id == 0 && place_id != 0 && lookups < self.limits.fallback_lookup_max {
                lookups += 1;
                match self.client.lookup_universe_id(place_id, &self.credentials).await {
                    Ok(Some(found)) => universe_id = found,
                    Ok(None) => trace!("No universe for place {}", place_id),
                    Err(e) => debug!("Universe lookup for place {} failed: {}", place_id, e),
                }
            }

            match legacy_entity(record, universe_id, place_id) {
                Some(entity) => games.push(entity),
                None => trace!("Skipping legacy record without identity"),
            }
        }

        self.attach_legacy_icons(&mut games).await;

        DiscoveryOutcome {
            games,
            last_error: None,
        }
    }

    /// Game icon batch, then per-place icons for whatever is still missing.
    /// Every failure here is swallowed.
    async fn attach_legacy_icons(&self, games: &mut [GameEntity]) {
        let universe_ids: Vec<u64> = games
            .iter()
            .map(|game| game.universe_id)
            .filter(|id| *id != 0)
            .take(self.limits.enrichment_batch_max)
            .collect();

        if !universe_ids.is_empty() {
            match self
                .client
                .fetch_game_icons(&universe_ids, &self.credentials)
                .await
            {
                Ok(thumbnails) => {
                    let icons: HashMap<u64, &str> = thumbnails
                        .iter()
                        .filter_map(|thumb| Some((thumb.target_id, thumb.usable_url()?)))
                        .collect();
                    for game in games.iter_mut() {
                        if let Some(url) = icons.get(&game.universe_id) {
                            game.thumbnail_url = Some(url.to_string());
                        }
                    }
                }
                Err(e) => debug!("Ignoring legacy icon batch failure: {}", e),
            }
        }

        let missing = games
            .iter_mut()
            .filter(|game| game.thumbnail_url.is_none() && game.place_id != 0)
            .take(self.limits.fallback_lookup_max);

        for game in missing {
            match self
                .client
                .fetch_place_icons(&[game.place_id], &self.credentials)
                .await
            {
                Ok(thumbnails) => {
                    game.thumbnail_url = thumbnails
                        .iter()
                        .find(|thumb| thumb.target_id == game.place_id)
                        .and_then(|thumb| thumb.usable_url())
                        .map(str::to_string);
                }
                Err(e) => debug!("Place icon for {} failed: {}", game.place_id, e),
            }
        }
    }
}

fn new_session_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

fn legacy_entity(record: &LegacyGameRecord, universe_id: u64, place_id: u64) -> Option<GameEntity> {
    let mut entity =
        GameEntity::new(universe_id, place_id, record.name.clone().unwrap_or_default()).ok()?;

    entity.description = record.description.clone().unwrap_or_default();
    entity.creator_id = non_negative(record.creator_id);
    entity.creator_name = record.creator_name.clone().unwrap_or_default();
    entity.verified = record.creator_has_verified_badge.unwrap_or(false);
    entity.player_count = non_negative(record.player_count);
    entity.genre = record
        .genre
        .as_deref()
        .map(Genre::from_label)
        .unwrap_or_default();

    if record.total_up_votes.is_some() || record.total_down_votes.is_some() {
        entity.apply_votes(
            record.total_up_votes.unwrap_or(0),
            record.total_down_votes.unwrap_or(0),
        );
    }

    Some(entity)
}

#[cfg(test)]
mod tests {
    include!("orchestrator.test.rs");
}
