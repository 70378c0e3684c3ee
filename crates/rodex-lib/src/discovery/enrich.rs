//! Detail and icon enrichment for extracted identifiers

use crate::api::{DetailRecord, UpstreamClient};
use crate::networking::SessionCredentials;
use std::collections::HashMap;
use tracing::{debug, warn};

/// How a detail batch failure is reported
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnrichmentMode {
    /// Detail failure is recorded on the bundle so the caller can surface it
    Primary,
    /// Detail failure is logged and dropped
    BestEffort,
}

/// Output of one enrichment round. A missing key means that piece failed
/// or was never returned; both are valid.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnrichmentBundle {
    pub details: HashMap<u64, DetailRecord>,
    pub icons: HashMap<u64, String>,
    pub detail_error: Option<String>,
}

/// Fetch detail and icon batches for `ids` concurrently.
///
/// `ids` beyond `batch_max` are not requested. Returns once both batches
/// have completed; no retries.
pub async fn fetch_enrichment<C: UpstreamClient>(
    client: &C,
    ids: &[u64],
    credentials: &SessionCredentials,
    mode: EnrichmentMode,
    batch_max: usize,
) -> EnrichmentBundle {
    let batch = &ids[..ids.len().min(batch_max)];
    if batch.is_empty() {
        return EnrichmentBundle::default();
    }

    let (details, icons) = tokio::join!(
        client.fetch_game_details(batch, credentials),
        client.fetch_game_icons(batch, credentials),
    );

    let mut bundle = EnrichmentBundle::default();

    match details {
        Ok(records) => {
            bundle.details = records.into_iter().map(|record| (record.id, record)).collect();
        }
        Err(e) => match mode {
            EnrichmentMode::Primary => {
                warn!("Detail batch failed for {} ids: {}", batch.len(), e);
                bundle.detail_error = Some(e.to_string());
            }
            EnrichmentMode::BestEffort => {
                debug!("Ignoring detail batch failure: {}", e);
            }
        },
    }

    match icons {
        Ok(thumbnails) => {
            bundle.icons = thumbnails
                .iter()
                .filter_map(|thumb| Some((thumb.target_id, thumb.usable_url()?.to_string())))
                .collect();
        }
        Err(e) => debug!("Ignoring icon batch failure: {}", e),
    }

    bundle
}

#[cfg(test)]
mod tests {
    include!("enrich.test.rs");
}
