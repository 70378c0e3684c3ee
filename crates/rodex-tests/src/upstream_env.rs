//! Hermetic upstream environment for E2E testing
//!
//! One mockito server stands in for every upstream host. Cassettes are
//! replayed onto it and the real `LiveUpstreamClient` is pointed at it, so
//! the full HTTP path runs without touching the network.

use crate::fixtures::load_cassette;
use anyhow::Result;
use mockito::{Matcher, Mock, ServerGuard};
use rodex_lib::api::{Endpoints, LiveUpstreamClient};
use rodex_lib::discovery::{DiscoveryLimits, SourceOrchestrator};
use rodex_lib::networking::{NetworkingConfig, NetworkingManager, SessionCredentials};
use std::sync::Arc;

/// Timeout used by test clients; mockito answers immediately
const TEST_TIMEOUT_SECONDS: u64 = 5;

pub struct UpstreamTestServer {
    server: ServerGuard,
}

impl UpstreamTestServer {
    pub async fn start() -> Self {
        Self {
            server: mockito::Server::new_async().await,
        }
    }

    pub fn url(&self) -> String {
        self.server.url()
    }

    /// Every service base URL pointed at this server
    pub fn endpoints(&self) -> Endpoints {
        Endpoints::single_host(&self.server.url())
    }

    /// Live client against this server
    pub fn client(&self) -> Result<LiveUpstreamClient> {
        let networking = NetworkingManager::new(NetworkingConfig {
            timeout_seconds: TEST_TIMEOUT_SECONDS,
            ..NetworkingConfig::default()
        })?;
        Ok(LiveUpstreamClient::with_endpoints(
            Arc::new(networking),
            self.endpoints(),
        ))
    }

    /// Orchestrator over a live client against this server
    pub fn orchestrator(
        &self,
        credentials: SessionCredentials,
    ) -> Result<SourceOrchestrator<LiveUpstreamClient>> {
        Ok(SourceOrchestrator::new(
            Arc::new(self.client()?),
            credentials,
            DiscoveryLimits::default(),
        ))
    }

    /// Serve a recorded interaction. The request must carry the cassette's
    /// query parameters; extra parameters (session ids) are ignored.
    pub async fn replay(&mut self, cassette: &str) -> Result<Mock> {
        self.replay_matching(cassette, None).await
    }

    /// Like [`replay`](Self::replay), but only for requests carrying
    /// `header` with exactly `value`
    pub async fn replay_with_header(
        &mut self,
        cassette: &str,
        header: &str,
        value: &str,
    ) -> Result<Mock> {
        self.replay_matching(cassette, Some((header, value))).await
    }

    async fn replay_matching(
        &mut self,
        cassette: &str,
        header: Option<(&str, &str)>,
    ) -> Result<Mock> {
        let cassette = load_cassette(cassette)?;
        let body = cassette.body_string()?;
        let pairs = cassette.query_pairs();

        let query = if pairs.is_empty() {
            Matcher::Any
        } else {
            Matcher::AllOf(
                pairs
                    .into_iter()
                    .map(|(key, value)| Matcher::UrlEncoded(key, value))
                    .collect(),
            )
        };

        let mut mock = self
            .server
            .mock(cassette.request.method.as_str(), cassette.request.path.as_str())
            .match_query(query);
        if let Some((name, value)) = header {
            mock = mock.match_header(name, value);
        }

        Ok(mock
            .with_status(cassette.response.status as usize)
            .with_header("content-type", "application/json")
            .with_body(body)
            .create_async()
            .await)
    }

    /// Answer every request to `path` with a bare status
    pub async fn fail(&mut self, path: &str, status: usize) -> Mock {
        self.server
            .mock("GET", path)
            .match_query(Matcher::Any)
            .with_status(status)
            .create_async()
            .await
    }

    /// Answer requests to `path` carrying `key=value` with a bare status
    pub async fn fail_with_query(&mut self, path: &str, key: &str, value: &str, status: usize) -> Mock {
        self.server
            .mock("GET", path)
            .match_query(Matcher::UrlEncoded(key.to_string(), value.to_string()))
            .with_status(status)
            .create_async()
            .await
    }

    /// A mock on `path` + `key=value` that must never be hit; check with `assert_async`
    pub async fn forbid(&mut self, path: &str, key: &str, value: &str) -> Mock {
        self.server
            .mock("GET", path)
            .match_query(Matcher::UrlEncoded(key.to_string(), value.to_string()))
            .with_status(500)
            .expect(0)
            .create_async()
            .await
    }
}
