use crate::models::to_geo_geometry;
use geo::algorithm::centroid::Centroid;
use geo::{Distance, Haversine, Point};
use geojson::{Geometry, Value};
use hazardfeed_core::Coordinates;

/// Great-circle distance between two positions in kilometres
///
/// Uses the haversine formula on a sphere of mean earth radius. Inputs are
/// not range checked.
pub fn distance(a: Coordinates, b: Coordinates) -> f64 {
    let p1 = Point::new(a.longitude, a.latitude);
    let p2 = Point::new(b.longitude, b.latitude);
    Haversine.distance(p1, p2) / 1000.0
}

/// Reduce a geometry to the single point used for distance calculations
///
/// Points map to themselves, other shapes to their centroid. A geometry
/// collection is represented by its first member only, so this is not the
/// nearest point of the collection.
pub fn geometry_to_point(geometry: &Geometry) -> Option<Coordinates> {
    match &geometry.value {
        Value::Point(position) => Coordinates::from_position(position),
        Value::GeometryCollection(members) => members.first().and_then(geometry_to_point),
        other => {
            let centroid: Point = to_geo_geometry(other)?.centroid()?;
            Some(Coordinates::new(centroid.y(), centroid.x()))
        }
    }
}
