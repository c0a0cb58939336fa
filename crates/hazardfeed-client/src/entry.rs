//! Feed entries built from GeoJSON features.
//!
//! [`FeatureEntry`] is the shared, source-independent part of an entry: it
//! owns the raw feature, computes the distance to home once and offers
//! typed property lookups. Concrete feeds wrap it and implement
//! [`FeedEntry`] to map their own property names.

use chrono::{DateTime, Utc};
use geojson::{feature::Id, Feature, Geometry, Value};
use hazardfeed_core::Coordinates;
use hazardfeed_geo::{distance, geometry_to_point};
use serde::Serialize;
use std::fmt;

/// Identifier of an entry within one feed snapshot
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum ExternalId {
    Number(i64),
    String(String),
}

impl ExternalId {
    fn from_json(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::Number(n) => Some(
                n.as_i64()
                    .map(ExternalId::Number)
                    .unwrap_or_else(|| ExternalId::String(n.to_string())),
            ),
            serde_json::Value::String(s) => Some(ExternalId::String(s.clone())),
            _ => None,
        }
    }
}

impl From<&Id> for ExternalId {
    fn from(id: &Id) -> Self {
        match id {
            Id::String(s) => ExternalId::String(s.clone()),
            Id::Number(n) => n
                .as_i64()
                .map(ExternalId::Number)
                .unwrap_or_else(|| ExternalId::String(n.to_string())),
        }
    }
}

impl fmt::Display for ExternalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExternalId::Number(n) => write!(f, "{}", n),
            ExternalId::String(s) => f.write_str(s),
        }
    }
}

/// One parsed feature plus its distance to the feed's home location
#[derive(Debug, Clone)]
pub struct FeatureEntry {
    feature: Feature,
    coordinates: Option<Coordinates>,
    distance_to_home: f64,
}

impl FeatureEntry {
    /// Build an entry, computing the distance to `home` once
    ///
    /// Features without a usable geometry are infinitely far away.
    pub fn new(home: Coordinates, feature: Feature) -> Self {
        let coordinates = feature.geometry.as_ref().and_then(geometry_to_point);
        let distance_to_home =
            coordinates.map(|point| distance(point, home)).unwrap_or(f64::INFINITY);

        Self { feature, coordinates, distance_to_home }
    }

    pub fn feature(&self) -> &Feature {
        &self.feature
    }

    pub fn coordinates(&self) -> Option<Coordinates> {
        self.coordinates
    }

    /// Distance to home in kilometres
    pub fn distance_to_home(&self) -> f64 {
        self.distance_to_home
    }

    /// Raw geometries: the members of a collection, or the single geometry
    pub fn geometries(&self) -> &[Geometry] {
        match &self.feature.geometry {
            Some(Geometry { value: Value::GeometryCollection(members), .. }) => members.as_slice(),
            Some(geometry) => std::slice::from_ref(geometry),
            None => &[],
        }
    }

    /// The feature's `id` member, falling back to an `id` property
    pub fn external_id(&self) -> Option<ExternalId> {
        self.feature
            .id
            .as_ref()
            .map(ExternalId::from)
            .or_else(|| self.property("id").and_then(ExternalId::from_json))
    }

    /// Look up a property; JSON `null` counts as missing
    pub fn property(&self, key: &str) -> Option<&serde_json::Value> {
        self.feature
            .properties
            .as_ref()
            .and_then(|props| props.get(key))
            .filter(|value| !value.is_null())
    }

    pub fn string_property(&self, key: &str) -> Option<&str> {
        self.property(key).and_then(|v| v.as_str())
    }

    pub fn i64_property(&self, key: &str) -> Option<i64> {
        self.property(key).and_then(|v| v.as_i64())
    }

    pub fn bool_property(&self, key: &str) -> Option<bool> {
        self.property(key).and_then(|v| v.as_bool())
    }

    /// Parse a timestamp given either as epoch milliseconds or an RFC 3339 string
    pub fn timestamp_property(&self, key: &str) -> Option<DateTime<Utc>> {
        match self.property(key)? {
            serde_json::Value::Number(n) => {
                let millis = n.as_i64().or_else(|| n.as_f64().map(|f| f as i64))?;
                DateTime::<Utc>::from_timestamp_millis(millis)
            }
            serde_json::Value::String(s) => DateTime::parse_from_rfc3339(s)
                .ok()
                .map(|dt| dt.with_timezone(&Utc)),
            _ => None,
        }
    }
}

/// Typed view over a feed entry
///
/// Implementors supply the property mapping; location, geometry and
/// distance come from the wrapped [`FeatureEntry`].
pub trait FeedEntry {
    fn feature_entry(&self) -> &FeatureEntry;

    fn title(&self) -> Option<&str>;

    fn category(&self) -> Option<&str>;

    /// Classification of the entry, `type` in feed terms
    fn entry_type(&self) -> Option<&str> {
        None
    }

    fn publication_date(&self) -> Option<DateTime<Utc>> {
        None
    }

    fn attribution(&self) -> Option<&str> {
        None
    }

    fn external_id(&self) -> Option<ExternalId> {
        self.feature_entry().external_id()
    }

    fn coordinates(&self) -> Option<Coordinates> {
        self.feature_entry().coordinates()
    }

    fn geometries(&self) -> &[Geometry] {
        self.feature_entry().geometries()
    }

    fn distance_to_home(&self) -> f64 {
        self.feature_entry().distance_to_home()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feature(json: &str) -> Feature {
        json.parse().unwrap()
    }

    #[test]
    fn test_point_feature() {
        let entry = FeatureEntry::new(
            Coordinates::new(-31.0, 151.0),
            feature(
                r#"{
                    "type": "Feature",
                    "id": 53718,
                    "geometry": {"type": "Point", "coordinates": [148.211304, -32.212312]},
                    "properties": {"displayName": "FLOODING", "created": 1583288851513}
                }"#,
            ),
        );

        assert_eq!(entry.external_id(), Some(ExternalId::Number(53718)));
        assert_eq!(entry.coordinates(), Some(Coordinates::new(-32.212312, 148.211304)));
        assert!((entry.distance_to_home() - 296.5).abs() < 0.1);
        assert_eq!(entry.geometries().len(), 1);
        assert_eq!(entry.string_property("displayName"), Some("FLOODING"));
        assert_eq!(
            entry.timestamp_property("created").unwrap().to_rfc3339(),
            "2020-03-04T02:27:31.513+00:00"
        );
    }

    #[test]
    fn test_missing_properties_resolve_to_none() {
        let entry = FeatureEntry::new(
            Coordinates::new(-31.0, 151.0),
            feature(
                r#"{
                    "type": "Feature",
                    "geometry": {"type": "Point", "coordinates": [151.0, -31.0]},
                    "properties": {"headline": null, "isMajor": "yes"}
                }"#,
            ),
        );

        assert_eq!(entry.external_id(), None);
        assert_eq!(entry.string_property("displayName"), None);
        assert_eq!(entry.string_property("headline"), None);
        // Wrong type is treated as missing
        assert_eq!(entry.bool_property("isMajor"), None);
        assert_eq!(entry.timestamp_property("created"), None);
        assert!(entry.distance_to_home().abs() < 1e-9);
    }

    #[test]
    fn test_id_falls_back_to_property() {
        let entry = FeatureEntry::new(
            Coordinates::new(-31.0, 151.0),
            feature(
                r#"{
                    "type": "Feature",
                    "geometry": null,
                    "properties": {"id": "evt-9"}
                }"#,
            ),
        );

        assert_eq!(entry.external_id(), Some(ExternalId::String("evt-9".to_string())));
        assert_eq!(entry.coordinates(), None);
        assert!(entry.geometries().is_empty());
        assert_eq!(entry.distance_to_home(), f64::INFINITY);
    }

    #[test]
    fn test_geometry_collection_members() {
        let entry = FeatureEntry::new(
            Coordinates::new(-33.8688, 151.2093),
            feature(
                r#"{
                    "type": "Feature",
                    "id": "closure-1",
                    "geometry": {
                        "type": "GeometryCollection",
                        "geometries": [
                            {"type": "Point", "coordinates": [151.0, -33.8]},
                            {"type": "Polygon", "coordinates": [[[150.9, -33.9], [151.1, -33.9], [151.1, -33.7], [150.9, -33.9]]]}
                        ]
                    },
                    "properties": {"created": "2024-05-01T10:00:00+10:00"}
                }"#,
            ),
        );

        assert_eq!(entry.geometries().len(), 2);
        assert_eq!(entry.coordinates(), Some(Coordinates::new(-33.8, 151.0)));
        assert_eq!(
            entry.timestamp_property("created").unwrap().to_rfc3339(),
            "2024-05-01T00:00:00+00:00"
        );
    }

    #[test]
    fn test_external_id_display() {
        assert_eq!(ExternalId::Number(53718).to_string(), "53718");
        assert_eq!(ExternalId::String("evt-9".to_string()).to_string(), "evt-9");
    }
}
