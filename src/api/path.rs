use crate::core::adjacency::{Direction, step_or_err};
use crate::core::bbox::BoundingBox;
use crate::core::geometry::intersects;
use crate::util::codec::{check_precision, decode_bbox, encode};
use crate::util::coord::{Coordinate, validate_away_from_poles};
use crate::util::error::GeoCoverError;
use geo_types::{Coord, Line, LineString, coord};
use std::collections::BTreeSet;

/// An open polyline through two or more waypoints.
///
/// # Example
///
/// ```
/// use geocover_rs::PathRegion;
///
/// # fn main() -> Result<(), geocover_rs::GeoCoverError> {
/// let london = (-0.123656, 51.51283);
/// let west_molesey = (-0.373535, 51.394043);
/// let cells = PathRegion::new(&[london, west_molesey])?.hashcodes(5)?;
/// assert_eq!(cells.len(), 10);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PathRegion {
    waypoints: Vec<Coord<f64>>,
    bbox: BoundingBox,
}

impl PathRegion {
    pub fn new<C: Coordinate>(waypoints: &[C]) -> Result<Self, GeoCoverError> {
        if waypoints.len() < 2 {
            return Err(GeoCoverError::TooFewWaypoints(waypoints.len()));
        }
        for waypoint in waypoints {
            validate_away_from_poles(waypoint)?;
        }

        let waypoints: Vec<Coord<f64>> = waypoints
            .iter()
            .map(|c| coord! { x: c.x(), y: c.y() })
            .collect();
        for pair in waypoints.windows(2) {
            if (pair[1].x - pair[0].x).abs() > 180.0 {
                return Err(GeoCoverError::CrossesAntimeridian {
                    west: pair[0].x.min(pair[1].x),
                    east: pair[0].x.max(pair[1].x),
                });
            }
        }

        let bbox = extent(&waypoints);
        Ok(Self { waypoints, bbox })
    }

    pub fn from_line_string(line: &LineString<f64>) -> Result<Self, GeoCoverError> {
        Self::new(&line.0)
    }

    pub fn waypoints(&self) -> &[Coord<f64>] {
        &self.waypoints
    }

    pub fn bbox(&self) -> BoundingBox {
        self.bbox
    }

    /// Cells of `precision` characters crossed by the path.
    ///
    /// Each segment is walked separately and the results are merged.
    pub fn hashcodes(&self, precision: usize) -> Result<BTreeSet<String>, GeoCoverError> {
        check_precision(precision)?;

        let mut cells = BTreeSet::new();
        for pair in self.waypoints.windows(2) {
            walk_segment(&Line::new(pair[0], pair[1]), precision, &mut cells)?;
        }

        tracing::debug!(
            waypoints = self.waypoints.len(),
            precision,
            cells = cells.len(),
            "covered path"
        );
        Ok(cells)
    }
}

/// Walks from the cell holding the segment's start to the cell holding its end.
///
/// Sides are tried south, east, then north; if none is crossed the walk
/// heads west. Leaving through a side rules out ever crossing the opposite
/// one again. A segment that zig-zags back across a ruled-out side relative
/// to the cell size is not followed correctly.
///
/// The walk moves monotonically once a side is ruled out, so it never needs
/// more than twice the number of cells around the segment's extent. Past
/// that it has lost the segment and fails with `PathWalkLost`.
fn walk_segment(
    segment: &Line<f64>,
    precision: usize,
    cells: &mut BTreeSet<String>,
) -> Result<(), GeoCoverError> {
    let start = encode(&segment.start, precision)?;
    let target = encode(&segment.end, precision)?;
    let max_steps = step_budget(segment, &decode_bbox(&start)?);
    let (mut south_open, mut east_open, mut north_open) = (true, true, true);

    let mut current = start.clone();
    let mut steps = 0;
    while current != target {
        if steps >= max_steps {
            tracing::debug!(%start, %target, %current, steps, "path walk lost its segment");
            return Err(GeoCoverError::PathWalkLost { start, target });
        }
        steps += 1;

        let bbox = decode_bbox(&current)?;
        let direction = if south_open && intersects(segment, &bbox.south_side()) {
            north_open = false;
            Direction::South
        } else if east_open && intersects(segment, &bbox.east_side()) {
            Direction::East
        } else if north_open && intersects(segment, &bbox.north_side()) {
            south_open = false;
            Direction::North
        } else {
            east_open = false;
            Direction::West
        };

        tracing::trace!(cell = %current, %direction, "path step");
        let next = step_or_err(&current, direction)?;
        cells.insert(current);
        current = next;
    }
    cells.insert(target);
    Ok(())
}

fn step_budget(segment: &Line<f64>, cell: &BoundingBox) -> usize {
    let columns = (segment.dx().abs() / (cell.east - cell.west)).ceil() + 2.0;
    let rows = (segment.dy().abs() / (cell.north - cell.south)).ceil() + 2.0;
    (2.0 * columns * rows) as usize
}

fn extent(coords: &[Coord<f64>]) -> BoundingBox {
    coords.iter().skip(1).fold(
        BoundingBox::new(coords[0].y, coords[0].y, coords[0].x, coords[0].x),
        |b, c| BoundingBox {
            north: b.north.max(c.y),
            south: b.south.min(c.y),
            east: b.east.max(c.x),
            west: b.west.min(c.x),
        },
    )
}
