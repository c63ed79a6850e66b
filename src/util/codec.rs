//! Thin wrapper over the `geohash` crate: point to cell id and cell id to extent.

use crate::core::bbox::BoundingBox;
use crate::core::constants::MAX_PRECISION;
use crate::util::coord::Coordinate;
use crate::util::error::GeoCoverError;
use geo_types::coord;

pub(crate) fn check_precision(precision: usize) -> Result<(), GeoCoverError> {
    if precision == 0 || precision > MAX_PRECISION {
        return Err(GeoCoverError::InvalidPrecision(precision));
    }
    Ok(())
}

/// Encodes a lon/lat coordinate into a cell id of `precision` characters.
pub fn encode<C: Coordinate>(coord: &C, precision: usize) -> Result<String, GeoCoverError> {
    check_precision(precision)?;
    geohash::encode(coord! { x: coord.x(), y: coord.y() }, precision)
        .map_err(|e| GeoCoverError::Codec(e.to_string()))
}

/// Decodes a cell id into its rectangular extent.
pub fn decode_bbox(cell: &str) -> Result<BoundingBox, GeoCoverError> {
    if cell.is_empty() {
        return Err(GeoCoverError::EmptyCell);
    }
    geohash::decode_bbox(cell)
        .map(BoundingBox::from)
        .map_err(|e| GeoCoverError::Codec(e.to_string()))
}

/// Whether `coord` falls inside `cell` at `cell`'s own precision.
pub fn matches<C: Coordinate>(coord: &C, cell: &str) -> Result<bool, GeoCoverError> {
    Ok(encode(coord, cell.len())? == cell)
}
