use crate::util::error::GeoCoverError;
use geo_types::Geometry;
use geojson::GeoJson;
use std::str::FromStr;
use wkt::Wkt;

/// Parses WKT or GeoJSON text into a geometry that maps onto a region.
///
/// GeoJSON is detected by a leading `{`, everything else is tried as WKT.
/// Only lines and polygons come back; see [`parse_geojson`] and
/// [`parse_wkt`] for what each format accepts.
pub fn parse_geometry(s: &str) -> Result<Geometry<f64>, GeoCoverError> {
    let trimmed = s.trim();
    if trimmed.starts_with('{') {
        parse_geojson(trimmed)
    } else {
        parse_wkt(trimmed)
    }
}

/// Parses a GeoJSON geometry, a feature, or a collection holding exactly one feature.
pub fn parse_geojson(s: &str) -> Result<Geometry<f64>, GeoCoverError> {
    let geojson: GeoJson = s.parse().map_err(|e: geojson::Error| parse_error(e))?;

    let geometry = match geojson {
        GeoJson::Geometry(geometry) => geometry,
        GeoJson::Feature(feature) => feature
            .geometry
            .ok_or_else(|| parse_error("feature has no geometry"))?,
        GeoJson::FeatureCollection(mut collection) => {
            if collection.features.len() != 1 {
                return Err(parse_error(format!(
                    "expected a single feature, found {}",
                    collection.features.len()
                )));
            }
            collection
                .features
                .remove(0)
                .geometry
                .ok_or_else(|| parse_error("feature has no geometry"))?
        }
    };

    region_shape(Geometry::try_from(geometry).map_err(parse_error)?)
}

pub fn parse_wkt(s: &str) -> Result<Geometry<f64>, GeoCoverError> {
    let wkt: Wkt<f64> = Wkt::from_str(s).map_err(parse_error)?;
    let geometry: Geometry<f64> = wkt
        .try_into()
        .map_err(|_| parse_error("WKT has no geometry counterpart"))?;
    region_shape(geometry)
}

/// Keeps lines, line strings and polygons. Multi-geometries with a single
/// member are unwrapped; everything else is rejected.
pub(crate) fn region_shape(geometry: Geometry<f64>) -> Result<Geometry<f64>, GeoCoverError> {
    match geometry {
        Geometry::Line(_) | Geometry::LineString(_) => Ok(geometry),
        Geometry::Polygon(ref polygon) => {
            if !polygon.interiors().is_empty() {
                tracing::warn!(
                    holes = polygon.interiors().len(),
                    "polygon holes are ignored, covering the exterior ring"
                );
            }
            Ok(geometry)
        }
        Geometry::MultiLineString(mut lines) if lines.0.len() == 1 => {
            Ok(Geometry::LineString(lines.0.remove(0)))
        }
        Geometry::MultiPolygon(mut polygons) if polygons.0.len() == 1 => {
            region_shape(Geometry::Polygon(polygons.0.remove(0)))
        }
        Geometry::Point(_) => Err(GeoCoverError::UnsupportedGeometry(
            "Point (use Region::circle with a radius)".to_string(),
        )),
        other => Err(GeoCoverError::UnsupportedGeometry(
            geometry_name(&other).to_string(),
        )),
    }
}

pub(crate) fn geometry_name(geometry: &Geometry<f64>) -> &'static str {
    match geometry {
        Geometry::Point(_) => "Point",
        Geometry::Line(_) => "Line",
        Geometry::LineString(_) => "LineString",
        Geometry::Polygon(_) => "Polygon",
        Geometry::MultiPoint(_) => "MultiPoint",
        Geometry::MultiLineString(_) => "MultiLineString",
        Geometry::MultiPolygon(_) => "MultiPolygon",
        Geometry::GeometryCollection(_) => "GeometryCollection",
        Geometry::Rect(_) => "Rect",
        Geometry::Triangle(_) => "Triangle",
    }
}

fn parse_error(e: impl std::fmt::Display) -> GeoCoverError {
    GeoCoverError::GeometryParseError(e.to_string())
}
