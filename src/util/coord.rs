use crate::core::constants::POLE_LIMIT;
use crate::util::error::GeoCoverError;
use geo::{Destination, Distance, Haversine};
use geo_types::{Coord, Point};

/// Anything that can hand out a longitude (`x`) and latitude (`y`) in degrees.
pub trait Coordinate {
    fn x(&self) -> f64;
    fn y(&self) -> f64;
}

impl Coordinate for (f64, f64) {
    fn x(&self) -> f64 { self.0 }
    fn y(&self) -> f64 { self.1 }
}

impl Coordinate for Point<f64> {
    fn x(&self) -> f64 { Point::x(*self) }
    fn y(&self) -> f64 { Point::y(*self) }
}

impl Coordinate for Coord<f64> {
    fn x(&self) -> f64 { self.x }
    fn y(&self) -> f64 { self.y }
}

fn to_point<C: Coordinate>(coord: &C) -> Point<f64> {
    Point::new(coord.x(), coord.y())
}

/// Checks that a coordinate lies within -180..180 / -90..90.
///
/// Values are rounded to six decimals first so that `180.00000023` passes.
pub fn validate<C: Coordinate>(coord: &C) -> Result<(), GeoCoverError> {
    let round6 = |v: f64| (v * 1e6).round() / 1e6;
    check_range(coord, round6(coord.x()), round6(coord.y()))
}

/// Like [`validate`] without the rounding slack.
pub fn validate_strict<C: Coordinate>(coord: &C) -> Result<(), GeoCoverError> {
    check_range(coord, coord.x(), coord.y())
}

fn check_range<C: Coordinate>(coord: &C, lon: f64, lat: f64) -> Result<(), GeoCoverError> {
    if !(-180.0..=180.0).contains(&lon) {
        return Err(GeoCoverError::InvalidLongitude(coord.x()));
    }
    if !(-90.0..=90.0).contains(&lat) {
        return Err(GeoCoverError::InvalidLatitude(coord.y()));
    }
    Ok(())
}

/// Validates the coordinate and additionally keeps it away from the poles.
pub(crate) fn validate_away_from_poles<C: Coordinate>(coord: &C) -> Result<(), GeoCoverError> {
    validate(coord)?;
    if coord.y().abs() > POLE_LIMIT {
        return Err(GeoCoverError::NearPole(coord.y()));
    }
    Ok(())
}

/// Great-circle distance in meters.
pub fn distance<A: Coordinate, B: Coordinate>(a: &A, b: &B) -> f64 {
    Haversine.distance(to_point(a), to_point(b))
}

/// Great-circle arc, in degrees, covered by `meters`.
pub(crate) fn arc_degrees(meters: f64) -> f64 {
    meters / distance(&(0.0, 0.0), &(0.0, 1.0))
}

/// Point reached travelling `meters` from `origin` on initial `bearing` (degrees clockwise from north).
pub fn destination<C: Coordinate>(origin: &C, meters: f64, bearing: f64) -> Point<f64> {
    Haversine.destination(to_point(origin), bearing, meters)
}
