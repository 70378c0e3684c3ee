//! Upstream game-platform API client
//!
//! Provides production (Live) and test (Mock) implementations of the
//! upstream client. The live client is constructed explicitly over a
//! `NetworkingManager` and injected into the orchestrator; nothing here is
//! global.

use crate::api::records::{DetailRecord, LegacyGameRecord, ThumbnailRecord, decode_records};
use crate::networking::{NetworkingError, NetworkingManager, SessionCredentials};
use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::trace;

const THUMBNAIL_QUERY: &str = "size=150x150&format=Png&isCircular=false";

/// Upstream API errors
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("Network error: {source}")]
    NetworkError {
        #[from]
        source: NetworkingError,
    },

    #[error("JSON parsing failed: {source}")]
    JsonError {
        #[from]
        source: serde_json::Error,
    },

    #[error("Unexpected response shape from {endpoint}")]
    UnexpectedShape { endpoint: &'static str },

    #[error("Upstream unavailable: {message}")]
    Unavailable { message: String },
}

/// Base URLs for each upstream service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    /// Explore, search, discovery and universe services
    pub apis: String,
    /// Game detail service
    pub games: String,
    /// Thumbnail service
    pub thumbnails: String,
    /// Legacy website endpoints
    pub www: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            apis: "https://apis.roblox.com".to_string(),
            games: "https://games.roblox.com".to_string(),
            thumbnails: "https://thumbnails.roblox.com".to_string(),
            www: "https://www.roblox.com".to_string(),
        }
    }
}

impl Endpoints {
    /// Route every service to one host (staging proxies, mock servers)
    pub fn single_host(base_url: &str) -> Self {
        let base = base_url.trim_end_matches('/').to_string();
        Self {
            apis: base.clone(),
            games: base.clone(),
            thumbnails: base.clone(),
            www: base,
        }
    }
}

/// Trait for upstream discovery API operations
pub trait UpstreamClient: Send + Sync {
    /// Fetch the sort catalog document
    fn fetch_sort_catalog(
        &self,
        session_id: &str,
        credentials: &SessionCredentials,
    ) -> impl std::future::Future<Output = Result<Value, UpstreamError>> + Send;

    /// Fetch the raw content document of one sort strategy
    fn fetch_sort_content(
        &self,
        sort_id: &str,
        session_id: &str,
        credentials: &SessionCredentials,
    ) -> impl std::future::Future<Output = Result<Vec<u8>, UpstreamError>> + Send;

    /// Run the authenticated omni keyword search, returning the raw document
    fn omni_search(
        &self,
        query: &str,
        session_id: &str,
        credentials: &SessionCredentials,
    ) -> impl std::future::Future<Output = Result<Vec<u8>, UpstreamError>> + Send;

    /// Fetch the raw home recommendation document
    fn fetch_recommendations(
        &self,
        session_id: &str,
        credentials: &SessionCredentials,
    ) -> impl std::future::Future<Output = Result<Vec<u8>, UpstreamError>> + Send;

    /// Run the legacy keyword search returning pre-shaped records
    fn legacy_search(
        &self,
        query: &str,
        max_rows: usize,
        credentials: &SessionCredentials,
    ) -> impl std::future::Future<Output = Result<Vec<LegacyGameRecord>, UpstreamError>> + Send;

    /// Batched detail records for universe ids
    fn fetch_game_details(
        &self,
        universe_ids: &[u64],
        credentials: &SessionCredentials,
    ) -> impl std::future::Future<Output = Result<Vec<DetailRecord>, UpstreamError>> + Send;

    /// Batched game icons for universe ids
    fn fetch_game_icons(
        &self,
        universe_ids: &[u64],
        credentials: &SessionCredentials,
    ) -> impl std::future::Future<Output = Result<Vec<ThumbnailRecord>, UpstreamError>> + Send;

    /// Game icons keyed by place id
    fn fetch_place_icons(
        &self,
        place_ids: &[u64],
        credentials: &SessionCredentials,
    ) -> impl std::future::Future<Output = Result<Vec<ThumbnailRecord>, UpstreamError>> + Send;

    /// Resolve the universe owning `place_id`
    fn lookup_universe_id(
        &self,
        place_id: u64,
        credentials: &SessionCredentials,
    ) -> impl std::future::Future<Output = Result<Option<u64>, UpstreamError>> + Send;
}

fn join_ids(ids: &[u64]) -> String {
    ids.iter()
        .map(u64::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

fn encode(value: &str) -> String {
    utf8_percent_encode(value, NON_ALPHANUMERIC).to_string()
}

/// Live upstream client (production)
pub struct LiveUpstreamClient {
    networking: Arc<NetworkingManager>,
    endpoints: Endpoints,
}

impl LiveUpstreamClient {
    /// Create a live client against the public hosts
    pub fn new(networking: Arc<NetworkingManager>) -> Self {
        Self::with_endpoints(networking, Endpoints::default())
    }

    /// Create a client with custom base URLs (for staging/testing)
    pub fn with_endpoints(networking: Arc<NetworkingManager>, endpoints: Endpoints) -> Self {
        Self {
            networking,
            endpoints,
        }
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    async fn get(&self, url: &str, credentials: &SessionCredentials) -> Result<Vec<u8>, UpstreamError> {
        trace!("Upstream GET {}", url);
        Ok(self.networking.get_bytes(url, credentials).await?)
    }

    async fn get_json(
        &self,
        url: &str,
        credentials: &SessionCredentials,
    ) -> Result<Value, UpstreamError> {
        let body = self.get(url, credentials).await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

impl UpstreamClient for LiveUpstreamClient {
    async fn fetch_sort_catalog(
        &self,
        session_id: &str,
        credentials: &SessionCredentials,
    ) -> Result<Value, UpstreamError> {
        let url = format!(
            "{}/explore-api/v1/get-sorts?sessionId={}",
            self.endpoints.apis,
            encode(session_id)
        );
        self.get_json(&url, credentials).await
    }

    async fn fetch_sort_content(
        &self,
        sort_id: &str,
        session_id: &str,
        credentials: &SessionCredentials,
    ) -> Result<Vec<u8>, UpstreamError> {
        let url = format!(
            "{}/explore-api/v1/get-sort-content?sessionId={}&sortId={}",
            self.endpoints.apis,
            encode(session_id),
            encode(sort_id)
        );
        self.get(&url, credentials).await
    }

    async fn omni_search(
        &self,
        query: &str,
        session_id: &str,
        credentials: &SessionCredentials,
    ) -> Result<Vec<u8>, UpstreamError> {
        let url = format!(
            "{}/search-api/omni-search?searchQuery={}&sessionId={}&pageType=all",
            self.endpoints.apis,
            encode(query),
            encode(session_id)
        );
        self.get(&url, credentials).await
    }

    async fn fetch_recommendations(
        &self,
        session_id: &str,
        credentials: &SessionCredentials,
    ) -> Result<Vec<u8>, UpstreamError> {
        let url = format!(
            "{}/discovery-api/omni-recommendation?pageType=Home&sessionId={}",
            self.endpoints.apis,
            encode(session_id)
        );
        self.get(&url, credentials).await
    }

    async fn legacy_search(
        &self,
        query: &str,
        max_rows: usize,
        credentials: &SessionCredentials,
    ) -> Result<Vec<LegacyGameRecord>, UpstreamError> {
        let url = format!(
            "{}/games/list-json?keyword={}&startRows=0&maxRows={}",
            self.endpoints.www,
            encode(query),
            max_rows
        );
        let document = self.get_json(&url, credentials).await?;

        if !document.is_array() && document.get("games").is_none() {
            return Err(UpstreamError::UnexpectedShape {
                endpoint: "legacy search",
            });
        }

        Ok(decode_records(&document, &["games", "Games"]))
    }

    async fn fetch_game_details(
        &self,
        universe_ids: &[u64],
        credentials: &SessionCredentials,
    ) -> Result<Vec<DetailRecord>, UpstreamError> {
        if universe_ids.is_empty() {
            return Ok(Vec::new());
        }
        let url = format!(
            "{}/v1/games?universeIds={}",
            self.endpoints.games,
            join_ids(universe_ids)
        );
        let document = self.get_json(&url, credentials).await?;
        Ok(decode_records(&document, &["data"]))
    }

    async fn fetch_game_icons(
        &self,
        universe_ids: &[u64],
        credentials: &SessionCredentials,
    ) -> Result<Vec<ThumbnailRecord>, UpstreamError> {
        if universe_ids.is_empty() {
            return Ok(Vec::new());
        }
        let url = format!(
            "{}/v1/games/icons?universeIds={}&{}",
            self.endpoints.thumbnails,
            join_ids(universe_ids),
            THUMBNAIL_QUERY
        );
        let document = self.get_json(&url, credentials).await?;
        Ok(decode_records(&document, &["data"]))
    }

    async fn fetch_place_icons(
        &self,
        place_ids: &[u64],
        credentials: &SessionCredentials,
    ) -> Result<Vec<ThumbnailRecord>, UpstreamError> {
        if place_ids.is_empty() {
            return Ok(Vec::new());
        }
        let url = format!(
            "{}/v1/places/gameicons?placeIds={}&{}",
            self.endpoints.thumbnails,
            join_ids(place_ids),
            THUMBNAIL_QUERY
        );
        let document = self.get_json(&url, credentials).await?;
        Ok(decode_records(&document, &["data"]))
    }

    async fn lookup_universe_id(
        &self,
        place_id: u64,
        credentials: &SessionCredentials,
    ) -> Result<Option<u64>, UpstreamError> {
        let url = format!(
            "{}/universes/v1/places/{}/universe",
            self.endpoints.apis, place_id
        );
        let document = self.get_json(&url, credentials).await?;
        Ok(document
            .get("universeId")
            .and_then(Value::as_u64)
            .filter(|id| *id != 0))
    }
}

/// Mock upstream client (testing)
///
/// Responses are registered up front; every call is recorded so tests can
/// assert which endpoints were (or were not) reached.
#[derive(Default)]
pub struct MockUpstreamClient {
    catalog: Arc<Mutex<Option<Result<Value, String>>>>,
    sort_contents: Arc<Mutex<HashMap<String, Result<Vec<u8>, String>>>>,
    omni_results: Arc<Mutex<HashMap<String, Result<Vec<u8>, String>>>>,
    recommendations: Arc<Mutex<Option<Result<Vec<u8>, String>>>>,
    legacy_results: Arc<Mutex<HashMap<String, Result<Vec<LegacyGameRecord>, String>>>>,
    details: Arc<Mutex<Option<Result<Vec<DetailRecord>, String>>>>,
    game_icons: Arc<Mutex<Option<Result<Vec<ThumbnailRecord>, String>>>>,
    place_icons: Arc<Mutex<Option<Result<Vec<ThumbnailRecord>, String>>>>,
    universe_lookups: Arc<Mutex<HashMap<u64, Result<u64, String>>>>,
    calls: Arc<Mutex<Vec<String>>>,
}

fn unavailable(message: String) -> UpstreamError {
    UpstreamError::Unavailable { message }
}

fn missing(what: &str) -> UpstreamError {
    unavailable(format!("No mock response for {}", what))
}

impl MockUpstreamClient {
    /// Create new mock client
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn with_catalog(self, result: Result<Value, String>) -> Self {
        *self.catalog.lock().await = Some(result);
        self
    }

    pub async fn with_sort_content(self, sort_id: &str, result: Result<Value, String>) -> Self {
        let result = result.map(|document| document.to_string().into_bytes());
        self.sort_contents
            .lock()
            .await
            .insert(sort_id.to_string(), result);
        self
    }

    /// Register raw bytes (for malformed-document scenarios)
    pub async fn with_raw_sort_content(self, sort_id: &str, body: &[u8]) -> Self {
        self.sort_contents
            .lock()
            .await
            .insert(sort_id.to_string(), Ok(body.to_vec()));
        self
    }

    pub async fn with_omni_search(self, query: &str, result: Result<Value, String>) -> Self {
        let result = result.map(|document| document.to_string().into_bytes());
        self.omni_results
            .lock()
            .await
            .insert(query.to_string(), result);
        self
    }

    pub async fn with_recommendations(self, result: Result<Value, String>) -> Self {
        *self.recommendations.lock().await =
            Some(result.map(|document| document.to_string().into_bytes()));
        self
    }

    pub async fn with_legacy_search(
        self,
        query: &str,
        result: Result<Vec<LegacyGameRecord>, String>,
    ) -> Self {
        self.legacy_results
            .lock()
            .await
            .insert(query.to_string(), result);
        self
    }

    /// Details served for any requested id present in `result`
    pub async fn with_details(self, result: Result<Vec<DetailRecord>, String>) -> Self {
        *self.details.lock().await = Some(result);
        self
    }

    pub async fn with_game_icons(self, result: Result<Vec<ThumbnailRecord>, String>) -> Self {
        *self.game_icons.lock().await = Some(result);
        self
    }

    pub async fn with_place_icons(self, result: Result<Vec<ThumbnailRecord>, String>) -> Self {
        *self.place_icons.lock().await = Some(result);
        self
    }

    pub async fn with_universe_lookup(self, place_id: u64, result: Result<u64, String>) -> Self {
        self.universe_lookups.lock().await.insert(place_id, result);
        self
    }

    /// Calls made so far, formatted as `endpoint:argument`
    pub async fn calls(&self) -> Vec<String> {
        self.calls.lock().await.clone()
    }

    async fn record(&self, call: String) {
        self.calls.lock().await.push(call);
    }
}

fn filter_thumbnails(
    registered: &Option<Result<Vec<ThumbnailRecord>, String>>,
    ids: &[u64],
) -> Result<Vec<ThumbnailRecord>, UpstreamError> {
    match registered {
        Some(Ok(records)) => Ok(records
            .iter()
            .filter(|record| ids.contains(&record.target_id))
            .cloned()
            .collect()),
        Some(Err(err)) => Err(unavailable(err.clone())),
        None => Ok(Vec::new()),
    }
}

impl UpstreamClient for MockUpstreamClient {
    async fn fetch_sort_catalog(
        &self,
        _session_id: &str,
        _credentials: &SessionCredentials,
    ) -> Result<Value, UpstreamError> {
        self.record("catalog".to_string()).await;
        match self.catalog.lock().await.as_ref() {
            Some(Ok(document)) => Ok(document.clone()),
            Some(Err(err)) => Err(unavailable(err.clone())),
            None => Err(missing("catalog")),
        }
    }

    async fn fetch_sort_content(
        &self,
        sort_id: &str,
        _session_id: &str,
        _credentials: &SessionCredentials,
    ) -> Result<Vec<u8>, UpstreamError> {
        self.record(format!("sort:{}", sort_id)).await;
        match self.sort_contents.lock().await.get(sort_id) {
            Some(Ok(body)) => Ok(body.clone()),
            Some(Err(err)) => Err(unavailable(err.clone())),
            None => Err(missing(&format!("sort {}", sort_id))),
        }
    }

    async fn omni_search(
        &self,
        query: &str,
        _session_id: &str,
        _credentials: &SessionCredentials,
    ) -> Result<Vec<u8>, UpstreamError> {
        self.record(format!("omni:{}", query)).await;
        match self.omni_results.lock().await.get(query) {
            Some(Ok(body)) => Ok(body.clone()),
            Some(Err(err)) => Err(unavailable(err.clone())),
            None => Err(missing(&format!("omni search '{}'", query))),
        }
    }

    async fn fetch_recommendations(
        &self,
        _session_id: &str,
        _credentials: &SessionCredentials,
    ) -> Result<Vec<u8>, UpstreamError> {
        self.record("recommendations".to_string()).await;
        match self.recommendations.lock().await.as_ref() {
            Some(Ok(body)) => Ok(body.clone()),
            Some(Err(err)) => Err(unavailable(err.clone())),
            None => Err(missing("recommendations")),
        }
    }

    async fn legacy_search(
        &self,
        query: &str,
        max_rows: usize,
        _credentials: &SessionCredentials,
    ) -> Result<Vec<LegacyGameRecord>, UpstreamError> {
        self.record(format!("legacy:{}", query)).await;
        match self.legacy_results.lock().await.get(query) {
            Some(Ok(records)) => Ok(records.iter().take(max_rows).cloned().collect()),
            Some(Err(err)) => Err(unavailable(err.clone())),
            None => Err(missing(&format!("legacy search '{}'", query))),
        }
    }

    async fn fetch_game_details(
        &self,
        universe_ids: &[u64],
        _credentials: &SessionCredentials,
    ) -> Result<Vec<DetailRecord>, UpstreamError> {
        self.record(format!("details:{}", join_ids(universe_ids))).await;
        match self.details.lock().await.as_ref() {
            // Reverse so callers can never rely on arrival order
            Some(Ok(records)) => Ok(records
                .iter()
                .rev()
                .filter(|record| universe_ids.contains(&record.id))
                .cloned()
                .collect()),
            Some(Err(err)) => Err(unavailable(err.clone())),
            None => Ok(Vec::new()),
        }
    }

    async fn fetch_game_icons(
        &self,
        universe_ids: &[u64],
        _credentials: &SessionCredentials,
    ) -> Result<Vec<ThumbnailRecord>, UpstreamError> {
        self.record(format!("icons:{}", join_ids(universe_ids))).await;
        filter_thumbnails(&*self.game_icons.lock().await, universe_ids)
    }

    async fn fetch_place_icons(
        &self,
        place_ids: &[u64],
        _credentials: &SessionCredentials,
    ) -> Result<Vec<ThumbnailRecord>, UpstreamError> {
        self.record(format!("place-icons:{}", join_ids(place_ids))).await;
        filter_thumbnails(&*self.place_icons.lock().await, place_ids)
    }

    async fn lookup_universe_id(
        &self,
        place_id: u64,
        _credentials: &SessionCredentials,
    ) -> Result<Option<u64>, UpstreamError> {
        self.record(format!("universe:{}", place_id)).await;
        match self.universe_lookups.lock().await.get(&place_id) {
            Some(Ok(universe_id)) => Ok(Some(*universe_id).filter(|id| *id != 0)),
            Some(Err(err)) => Err(unavailable(err.clone())),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    include!("upstream.test.rs");
}
