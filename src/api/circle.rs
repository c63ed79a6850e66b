use crate::api::scan::{check_scan_span, for_each_row};
use crate::core::adjacency::{Direction, step_or_err};
use crate::core::bbox::BoundingBox;
use crate::core::constants::POLE_LIMIT;
use crate::core::geometry::is_west;
use crate::util::codec::{check_precision, decode_bbox};
use crate::util::coord::{
    Coordinate, arc_degrees, destination, distance, validate_away_from_poles,
};
use crate::util::error::GeoCoverError;
use geo_types::Point;
use std::collections::{BTreeSet, HashSet};

/// A circle on the sphere: a centre and a radius in meters.
///
/// # Example
///
/// ```
/// use geocover_rs::CircleRegion;
///
/// # fn main() -> Result<(), geocover_rs::GeoCoverError> {
/// let circle = CircleRegion::new(&(-0.123656, 51.51283), 500.0)?;
/// let cells = circle.hashcodes(7)?;
/// assert!(cells.contains("gcpvj1t"));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CircleRegion {
    center: Point<f64>,
    radius: f64,
    bbox: BoundingBox,
}

impl CircleRegion {
    /// Rejects circles that reach past [`POLE_LIMIT`] or span half the globe in longitude.
    pub fn new(center: &impl Coordinate, radius: f64) -> Result<Self, GeoCoverError> {
        validate_away_from_poles(center)?;
        if !radius.is_finite() || radius < 0.0 {
            return Err(GeoCoverError::InvalidRadius(radius));
        }

        let reach = arc_degrees(radius);
        for lat in [center.y() + reach, center.y() - reach] {
            if lat.abs() > POLE_LIMIT {
                return Err(GeoCoverError::NearPole(lat));
            }
        }

        let center = Point::new(center.x(), center.y());
        let east = destination(&center, radius, 90.0).x();
        let west = destination(&center, radius, 270.0).x();
        let bbox = BoundingBox {
            north: destination(&center, radius, 0.0).y(),
            south: destination(&center, radius, 180.0).y(),
            east: recenter(east),
            west: recenter(west),
        };
        if 2.0 * (east - center.x()).rem_euclid(360.0) >= 180.0 || bbox.west > bbox.east {
            return Err(GeoCoverError::CrossesAntimeridian {
                west: bbox.west,
                east: bbox.east,
            });
        }

        Ok(Self {
            center,
            radius,
            bbox,
        })
    }

    pub fn center(&self) -> Point<f64> {
        self.center
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn bbox(&self) -> BoundingBox {
        self.bbox
    }

    /// Cells of `precision` characters covering the circle.
    ///
    /// Each row of the bounding box is scanned from both ends to find the
    /// first cell touched by the circle; everything between the two
    /// frontiers is taken. Membership is judged from cell corners and edge
    /// midpoints, so the result is an outer approximation.
    pub fn hashcodes(&self, precision: usize) -> Result<BTreeSet<String>, GeoCoverError> {
        check_precision(precision)?;

        let west_frontier = self.frontier(precision, Direction::East)?;
        let east_frontier = self.frontier(precision, Direction::West)?;

        let mut cells = BTreeSet::new();
        for start in &west_frontier {
            let mut current = start.clone();
            while !east_frontier.contains(&current)
                && is_west(decode_bbox(&current)?.west, self.bbox.east)
            {
                let next = step_or_err(&current, Direction::East)?;
                cells.insert(current);
                current = next;
            }
        }
        cells.extend(west_frontier);
        cells.extend(east_frontier);

        tracing::debug!(
            lon = self.center.x(),
            lat = self.center.y(),
            radius = self.radius,
            precision,
            cells = cells.len(),
            "covered circle"
        );
        Ok(cells)
    }

    /// First included cell of every row, scanning in `heading` from the
    /// opposite side of the bounding box.
    fn frontier(
        &self,
        precision: usize,
        heading: Direction,
    ) -> Result<HashSet<String>, GeoCoverError> {
        let start_lon = match heading {
            Direction::West => self.bbox.east,
            _ => self.bbox.west,
        };

        let mut frontier = HashSet::new();
        for_each_row(
            &(start_lon, self.bbox.south),
            precision,
            self.bbox.north,
            |row, row_bbox| {
                match heading {
                    Direction::West => check_scan_span(self.bbox.west, row_bbox.east)?,
                    _ => check_scan_span(row_bbox.west, self.bbox.east)?,
                }
                let mut cell = row;
                let mut cell_bbox = row_bbox;
                while self.in_scan(&cell_bbox, heading) {
                    if self.is_included(&cell_bbox) {
                        frontier.insert(cell);
                        break;
                    }
                    cell = step_or_err(&cell, heading)?;
                    cell_bbox = decode_bbox(&cell)?;
                }
                Ok(())
            },
        )?;
        Ok(frontier)
    }

    fn in_scan(&self, cell: &BoundingBox, heading: Direction) -> bool {
        match heading {
            Direction::West => !is_west(cell.east, self.bbox.west),
            _ => is_west(cell.west, self.bbox.east),
        }
    }

    fn is_included(&self, cell: &BoundingBox) -> bool {
        let (lon, lat) = (self.center.x(), self.center.y());
        let reaches = |p: (f64, f64)| distance(&self.center, &p) <= self.radius;

        match (cell.straddles_lon(lon), cell.straddles_lat(lat)) {
            (true, true) => true,
            (true, false) => reaches((lon, cell.north)) || reaches((lon, cell.south)),
            (false, true) => reaches((cell.west, lat)) || reaches((cell.east, lat)),
            (false, false) => cell
                .corners()
                .iter()
                .any(|corner| distance(&self.center, corner) <= self.radius),
        }
    }
}

fn recenter(lon: f64) -> f64 {
    if lon > 180.0 {
        lon - 360.0
    } else if lon < -180.0 {
        lon + 360.0
    } else {
        lon
    }
}
