use crate::core::adjacency::north;
use crate::core::bbox::BoundingBox;
use crate::util::codec::{decode_bbox, encode};
use crate::util::coord::Coordinate;
use crate::util::error::GeoCoverError;

/// Walks rows of cells northward, starting from the cell holding `start`,
/// until a row's southern edge reaches `north_limit`.
///
/// `visit` receives the first cell of each row and its extent. A row on the
/// polar edge of the grid ends the walk.
pub(crate) fn for_each_row<C, F>(
    start: &C,
    precision: usize,
    north_limit: f64,
    mut visit: F,
) -> Result<(), GeoCoverError>
where
    C: Coordinate,
    F: FnMut(String, BoundingBox) -> Result<(), GeoCoverError>,
{
    let mut row = encode(start, precision)?;
    let mut row_bbox = decode_bbox(&row)?;

    while row_bbox.south < north_limit {
        let next = north(&row)?;
        visit(row, row_bbox)?;
        match next {
            Some(next) => {
                row_bbox = decode_bbox(&next)?;
                row = next;
            }
            None => break,
        }
    }
    Ok(())
}

/// Rows are scanned with `is_west`, which only orders longitudes less than
/// half a turn apart.
pub(crate) fn check_scan_span(west: f64, east: f64) -> Result<(), GeoCoverError> {
    if east - west >= 180.0 {
        return Err(GeoCoverError::CrossesAntimeridian { west, east });
    }
    Ok(())
}
