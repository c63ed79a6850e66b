use crate::api::circle::CircleRegion;
use crate::api::config::CoverageConfig;
use crate::api::path::PathRegion;
use crate::api::polygon::PolygonRegion;
use crate::core::bbox::BoundingBox;
use crate::geom::parse::{geometry_name, parse_geometry, region_shape};
use crate::util::coord::Coordinate;
use crate::util::error::GeoCoverError;
use geo_types::Geometry;
use std::collections::BTreeSet;

/// Any region that can be turned into a set of cells.
#[derive(Debug, Clone, PartialEq)]
pub enum Region {
    Circle(CircleRegion),
    Path(PathRegion),
    Polygon(PolygonRegion),
}

impl Region {
    pub fn circle(center: &impl Coordinate, radius: f64) -> Result<Self, GeoCoverError> {
        CircleRegion::new(center, radius).map(Region::Circle)
    }

    pub fn path<C: Coordinate>(waypoints: &[C]) -> Result<Self, GeoCoverError> {
        PathRegion::new(waypoints).map(Region::Path)
    }

    pub fn polygon<C: Coordinate>(vertices: &[C]) -> Result<Self, GeoCoverError> {
        PolygonRegion::new(vertices).map(Region::Polygon)
    }

    /// `LineString` becomes a path and `Polygon` a polygon. Circles have no
    /// geometry counterpart; build them with [`Region::circle`]. Multi-geometries
    /// holding a single member are unwrapped first.
    pub fn from_geometry(geometry: &Geometry<f64>) -> Result<Self, GeoCoverError> {
        Self::from_shape(region_shape(geometry.clone())?)
    }

    /// Parses WKT or GeoJSON text into a region.
    ///
    /// # Example
    /// ```
    /// use geocover_rs::Region;
    ///
    /// # fn main() -> Result<(), geocover_rs::GeoCoverError> {
    /// let region = Region::parse("LINESTRING(-0.123656 51.51283, -0.373535 51.394043)")?;
    /// assert!(matches!(region, Region::Path(_)));
    /// # Ok(())
    /// # }
    /// ```
    pub fn parse(s: &str) -> Result<Self, GeoCoverError> {
        Self::from_shape(parse_geometry(s)?)
    }

    fn from_shape(shape: Geometry<f64>) -> Result<Self, GeoCoverError> {
        match shape {
            Geometry::LineString(line) => PathRegion::from_line_string(&line).map(Region::Path),
            Geometry::Line(line) => PathRegion::new(&[line.start, line.end]).map(Region::Path),
            Geometry::Polygon(polygon) => {
                PolygonRegion::from_polygon(&polygon).map(Region::Polygon)
            }
            other => Err(GeoCoverError::UnsupportedGeometry(
                geometry_name(&other).to_string(),
            )),
        }
    }

    pub fn bbox(&self) -> BoundingBox {
        match self {
            Region::Circle(c) => c.bbox(),
            Region::Path(p) => p.bbox(),
            Region::Polygon(p) => p.bbox(),
        }
    }

    pub fn cells(&self, config: &CoverageConfig) -> Result<BTreeSet<String>, GeoCoverError> {
        match self {
            Region::Circle(c) => c.hashcodes(config.precision),
            Region::Path(p) => p.hashcodes(config.precision),
            Region::Polygon(p) => p.hashcodes(
                config.min_precision,
                config.max_precision,
                config.cover,
                config.quick,
            ),
        }
    }
}

impl From<CircleRegion> for Region {
    fn from(circle: CircleRegion) -> Self {
        Region::Circle(circle)
    }
}

impl From<PathRegion> for Region {
    fn from(path: PathRegion) -> Self {
        Region::Path(path)
    }
}

impl From<PolygonRegion> for Region {
    fn from(polygon: PolygonRegion) -> Self {
        Region::Polygon(polygon)
    }
}
