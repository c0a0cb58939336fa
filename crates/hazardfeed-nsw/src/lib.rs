//! Hazardfeed NSW - Transport for NSW Live Traffic hazard feeds
//!
//! Specializes the generic GeoJSON feed for `data.livetraffic.com`: builds the
//! hazard URL, maps the Live Traffic property schema onto entries and applies
//! category filtering.

pub mod consts;
pub mod entry;
pub mod feed;
pub mod hazard;

pub use consts::ATTRIBUTION;
pub use entry::NswTransportServiceIncidentsFeedEntry;
pub use feed::{FeedOptions, NswTransportServiceIncidentsFeed};
pub use hazard::Hazard;
