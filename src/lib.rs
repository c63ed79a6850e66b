//! # geocover-rs
//!
//! Turns circles, paths and polygons into sets of geohash cells, and steps
//! between neighbouring cells.
//!
//! ### 1. Neighbours
//!
//! ```
//! use geocover_rs::{adjacent, Direction};
//!
//! # fn main() -> Result<(), geocover_rs::GeoCoverError> {
//! assert_eq!(adjacent("7y", Direction::East)?, Some("kn".to_string()));
//! # Ok(())
//! # }
//! ```
//!
//! ### 2. Fixed-precision covers for circles and paths
//!
//! ```
//! use geocover_rs::{CircleRegion, PathRegion};
//!
//! # fn main() -> Result<(), geocover_rs::GeoCoverError> {
//! let circle = CircleRegion::new(&(2.3522, 48.8566), 750.0)?;
//! let cells = circle.hashcodes(7)?;
//! assert!(cells.iter().all(|c| c.len() == 7));
//!
//! let path = PathRegion::new(&[(-0.123656, 51.51283), (-0.373535, 51.394043)])?;
//! assert_eq!(path.hashcodes(5)?.len(), 10);
//! # Ok(())
//! # }
//! ```
//!
//! ### 3. Adaptive polygon fill and cover
//!
//! ```
//! use geocover_rs::{CoverageConfig, Region};
//!
//! # fn main() -> Result<(), geocover_rs::GeoCoverError> {
//! let region = Region::parse(
//!     "POLYGON((2.32378006 48.8640372, 2.35691071 48.88616602, 2.37905502 48.85816465, 2.32378006 48.8640372))",
//! )?;
//! let config = CoverageConfig::default().with_precision_range(2, 6);
//! let fill = region.cells(&config)?;
//! let cover = region.cells(&config.with_cover(true))?;
//! assert!(fill.is_subset(&cover));
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod core;
pub mod geom;
pub mod util;

pub use api::{
    CellClass, CircleRegion, Classifier, CoverageConfig, PathRegion, PolygonRegion, Region,
};
pub use core::{
    BASE32, BoundingBox, DEFAULT_MIN_PRECISION, DEFAULT_PRECISION, Direction,
    MAX_POLYGON_PRECISION, MAX_PRECISION, POLE_LIMIT, adjacent, east, intersects, is_west,
    north, south, subcells, west,
};
pub use geom::{parse_geojson, parse_geometry, parse_wkt};
pub use util::{
    Coordinate, GeoCoverError, decode_bbox, destination, distance, encode, matches, validate,
    validate_strict,
};

pub use geo_types;
