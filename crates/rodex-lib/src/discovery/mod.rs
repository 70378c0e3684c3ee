//! # Discovery Module
//!
//! Turns a keyword or a discovery intent into an ordered list of games by
//! driving several loosely-typed upstream services.
//!
//! ## Pipeline
//!
//! ```text
//! orchestrator → catalog (trending, popular, top rated)
//!              → raw upstream document
//!              → extract (ids)
//!              → enrich (details + icons, concurrently)
//!              → merge → Vec<GameEntity>
//! ```
//!
//! ## Modules
//!
//! - [`entity`] - `GameEntity`, the canonical output record
//! - [`extract`] - Schema-agnostic identifier extraction
//! - [`catalog`] - Sort catalog parsing and strategy resolution
//! - [`enrich`] - Concurrent detail and icon batches
//! - [`merge`] - Order-preserving join into entities
//! - [`orchestrator`] - Per-intent fallback chains
//! - [`slot`] - Latest-wins cancellation for interactive callers

pub mod catalog;
pub mod enrich;
pub mod entity;
pub mod extract;
pub mod merge;
pub mod orchestrator;
pub mod slot;

pub use catalog::{StrategyDescriptor, parse_catalog, resolve_best_strategy, resolve_strategy_order};
pub use enrich::{EnrichmentBundle, EnrichmentMode, fetch_enrichment};
pub use entity::{EntityError, GameEntity};
pub use extract::{IdPredicate, extract_ids, extract_ids_from_bytes};
pub use merge::merge;
pub use orchestrator::{DiscoveryLimits, DiscoveryOutcome, SourceOrchestrator};
pub use slot::DiscoverySlot;
