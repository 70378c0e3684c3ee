//! Fixture infrastructure for E2E tests
//!
//! Cassettes hold one recorded upstream interaction each: the request shape
//! used to match it and the response to replay.

use anyhow::Result;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::path::PathBuf;

/// Recorded HTTP interaction
#[derive(Debug, Deserialize)]
pub struct Cassette {
    pub name: String,
    pub request: CassetteRequest,
    pub response: CassetteResponse,
}

#[derive(Debug, Deserialize)]
pub struct CassetteRequest {
    pub method: String,
    /// Request path, without query string
    pub path: String,
    /// Query parameters that must be present with these values
    #[serde(default)]
    pub query: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
pub struct CassetteResponse {
    pub status: u16,
    pub body: Value,
}

impl Cassette {
    /// Response body serialized for mockito
    pub fn body_string(&self) -> Result<String> {
        serde_json::to_string(&self.response.body).map_err(|e| {
            anyhow::anyhow!("Failed to serialize body of cassette '{}': {}", self.name, e)
        })
    }

    /// Query parameters as strings (numbers and booleans rendered as text)
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        self.request
            .query
            .iter()
            .map(|(key, value)| {
                let value = match value {
                    Value::String(text) => text.clone(),
                    other => other.to_string(),
                };
                (key.clone(), value)
            })
            .collect()
    }
}

/// Absolute path of a cassette, e.g. `explore/sorts.json`
pub fn cassette_path(relative: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("fixtures")
        .join("cassettes")
        .join(relative)
}

/// Load and parse a cassette by relative path
pub fn load_cassette(relative: &str) -> Result<Cassette> {
    let path = cassette_path(relative);
    let content = std::fs::read_to_string(&path)
        .map_err(|e| anyhow::anyhow!("Failed to load cassette '{}': {}", path.display(), e))?;

    serde_json::from_str(&content)
        .map_err(|e| anyhow::anyhow!("Failed to parse cassette '{}': {}", path.display(), e))
}

/// Load only the response body of a cassette as JSON
pub fn load_response_body(relative: &str) -> Result<Value> {
    Ok(load_cassette(relative)?.response.body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_catalog_cassette() {
        let cassette = load_cassette("explore/sorts.json").unwrap();
        assert_eq!(cassette.request.method, "GET");
        assert_eq!(cassette.request.path, "/explore-api/v1/get-sorts");
        assert!(cassette.response.body["sorts"].is_array());
    }

    #[test]
    fn test_query_pairs_render_scalars() {
        let cassette = load_cassette("legacy/search_tycoon.json").unwrap();
        let pairs = cassette.query_pairs();
        assert!(pairs.contains(&("keyword".to_string(), "tycoon".to_string())));
        assert!(pairs.contains(&("startRows".to_string(), "0".to_string())));
    }

    #[test]
    fn test_every_cassette_parses() {
        let root = cassette_path("");
        for service in std::fs::read_dir(&root).unwrap() {
            let service = service.unwrap().path();
            for file in std::fs::read_dir(&service).unwrap() {
                let file = file.unwrap().path();
                let relative = file.strip_prefix(&root).unwrap().to_string_lossy().to_string();
                let cassette = load_cassette(&relative).unwrap();
                assert!(cassette.body_string().is_ok(), "{}", relative);
            }
        }
    }

    #[test]
    fn test_missing_cassette_errors() {
        assert!(load_cassette("nope/missing.json").is_err());
    }
}
