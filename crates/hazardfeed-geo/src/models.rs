//! Conversions from GeoJSON geometry values to `geo` crate types.
//!
//! GeoJSON positions are `[lon, lat, (alt)]`; `geo` uses `x = lon, y = lat`.

use geo::Geometry as GeoGeometry;
use geojson::Value;

fn to_coord(position: &[f64]) -> Option<geo::Coord> {
    match position {
        [x, y, ..] => Some(geo::Coord { x: *x, y: *y }),
        _ => None,
    }
}

fn to_line_string(positions: &[Vec<f64>]) -> Option<geo::LineString> {
    let coords: Option<Vec<geo::Coord>> = positions.iter().map(|p| to_coord(p)).collect();
    coords.map(geo::LineString::new)
}

fn to_polygon(rings: &[Vec<Vec<f64>>]) -> Option<geo::Polygon> {
    let mut rings = rings.iter().map(|ring| to_line_string(ring));
    let exterior = rings.next()??;
    let interiors: Option<Vec<geo::LineString>> = rings.collect();
    Some(geo::Polygon::new(exterior, interiors?))
}

/// Convert a GeoJSON geometry value to a `geo::Geometry`
///
/// Returns `None` when a position has fewer than two ordinates.
pub fn to_geo_geometry(value: &Value) -> Option<GeoGeometry> {
    let geometry = match value {
        Value::Point(position) => GeoGeometry::Point(to_coord(position)?.into()),
        Value::LineString(positions) => GeoGeometry::LineString(to_line_string(positions)?),
        Value::Polygon(rings) => GeoGeometry::Polygon(to_polygon(rings)?),
        Value::MultiPoint(positions) => {
            let points: Option<Vec<geo::Point>> =
                positions.iter().map(|p| to_coord(p).map(geo::Point::from)).collect();
            GeoGeometry::MultiPoint(geo::MultiPoint::new(points?))
        }
        Value::MultiLineString(lines) => {
            let lines: Option<Vec<geo::LineString>> =
                lines.iter().map(|line| to_line_string(line)).collect();
            GeoGeometry::MultiLineString(geo::MultiLineString::new(lines?))
        }
        Value::MultiPolygon(polygons) => {
            let polygons: Option<Vec<geo::Polygon>> =
                polygons.iter().map(|poly| to_polygon(poly)).collect();
            GeoGeometry::MultiPolygon(geo::MultiPolygon::new(polygons?))
        }
        Value::GeometryCollection(geometries) => {
            let members: Option<Vec<GeoGeometry>> =
                geometries.iter().map(|g| to_geo_geometry(&g.value)).collect();
            GeoGeometry::GeometryCollection(geo::GeometryCollection::new_from(members?))
        }
    };
    Some(geometry)
}
