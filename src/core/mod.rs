pub mod adjacency;
pub mod bbox;
pub mod constants;
pub mod geometry;

pub use adjacency::{Direction, adjacent, east, north, south, subcells, west};
pub use bbox::BoundingBox;
pub use constants::{
    BASE32, DEFAULT_MIN_PRECISION, DEFAULT_PRECISION, MAX_POLYGON_PRECISION, MAX_PRECISION,
    POLE_LIMIT,
};
pub use geometry::{intersects, is_west};
