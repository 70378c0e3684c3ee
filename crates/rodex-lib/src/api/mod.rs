//! # API Module
//!
//! Upstream game-platform API abstraction.
//!
//! ## Modules
//!
//! - [`records`] - Lenient record shapes (details, thumbnails, legacy search)
//! - [`upstream`] - `UpstreamClient` trait with live and mock implementations

pub mod records;
pub mod upstream;

pub use records::{DetailCreator, DetailRecord, LegacyGameRecord, ThumbnailRecord};
pub use upstream::{Endpoints, LiveUpstreamClient, MockUpstreamClient, UpstreamClient, UpstreamError};
