//! Hazardfeed Geo - Distance and geometry reduction helpers
//!
//! This crate turns GeoJSON geometries into the single representative point
//! used for distance-to-home, and measures great-circle distances.

pub mod models;
pub mod spatial;

pub use models::to_geo_geometry;
pub use spatial::{distance, geometry_to_point};
