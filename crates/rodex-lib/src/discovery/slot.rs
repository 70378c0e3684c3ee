//! Latest-wins execution of discovery calls
//!
//! A UI issuing discovery calls as the user types must never apply a
//! result that arrives after a newer request was made. `DiscoverySlot`
//! runs each call as a tokio task, aborts the previous one when a newer
//! call starts, and resolves superseded calls to `None`. Dropping the
//! future returned by [`DiscoverySlot::run`] aborts its task too.

use super::orchestrator::{DiscoveryOutcome, SourceOrchestrator};
use crate::api::UpstreamClient;
use crate::primitives::DiscoveryIntent;
use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::Mutex;
use tokio::task::AbortHandle;
use tracing::{debug, error};

#[derive(Debug, Default)]
pub struct DiscoverySlot {
    in_flight: Mutex<Option<AbortHandle>>,
    generation: AtomicU64,
}

impl DiscoverySlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `future` as the current call. `None` when a later call started
    /// before this one finished.
    pub async fn run<F, T>(&self, future: F) -> Option<T>
    where
        F: Future<Output = T> + Send + 'static,
        T: Send + 'static,
    {
        let (generation, handle) = {
            let mut in_flight = self.in_flight.lock().await;
            if let Some(previous) = in_flight.take() {
                previous.abort();
            }
            let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
            let handle = tokio::spawn(future);
            *in_flight = Some(handle.abort_handle());
            (generation, handle)
        };

        let _guard = AbortOnDrop(handle.abort_handle());

        let result = match handle.await {
            Ok(value) => value,
            Err(e) if e.is_cancelled() => {
                debug!("Discovery call {} superseded", generation);
                return None;
            }
            Err(e) => {
                error!("Discovery task failed: {}", e);
                return None;
            }
        };

        // Finished, but a newer call may have started in the meantime
        if self.generation.load(Ordering::SeqCst) != generation {
            debug!("Dropping stale result of discovery call {}", generation);
            return None;
        }

        Some(result)
    }

    /// [`SourceOrchestrator::discover`] as the current call
    pub async fn discover<C>(
        &self,
        orchestrator: Arc<SourceOrchestrator<C>>,
        intent: DiscoveryIntent,
        query: impl Into<String>,
        limit: usize,
    ) -> Option<DiscoveryOutcome>
    where
        C: UpstreamClient + 'static,
    {
        let query = query.into();
        self.run(async move { orchestrator.discover(intent, &query, limit).await })
            .await
    }
}

/// Aborts the task when the awaiting caller goes away; no-op once finished
struct AbortOnDrop(AbortHandle);

impl Drop for AbortOnDrop {
    fn drop(&mut self) {
        self.0.abort();
    }
}

#[cfg(test)]
mod tests {
    include!("slot.test.rs");
}
