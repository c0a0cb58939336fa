//! Hazardfeed Client - Generic GeoJSON feed pipeline
//!
//! Fetches a GeoJSON `FeatureCollection` through an [`HttpClient`], turns each
//! feature into an entry via a [`FeedSource`], attaches the distance to the
//! home location and applies radius and category filters.
//!
//! [`HttpClient`]: hazardfeed_core::ports::HttpClient

pub mod entry;
pub mod feed;
pub mod http;

pub use entry::{ExternalId, FeatureEntry, FeedEntry};
pub use feed::{FeedFilter, FeedSource, GeoJsonFeed, UpdateResult};
pub use http::ReqwestClient;
