use geo_types::{Coord, Line, Rect, coord};
use serde::{Deserialize, Serialize};

/// Latitude/longitude extent of a cell or a region.
///
/// `south <= north` always holds. `west`/`east` are only ever compared with
/// [`is_west`](crate::is_west), never assumed to be ordered numerically.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub north: f64,
    pub south: f64,
    pub east: f64,
    pub west: f64,
}

impl BoundingBox {
    pub fn new(north: f64, south: f64, east: f64, west: f64) -> Self {
        Self {
            north,
            south,
            east,
            west,
        }
    }

    pub fn south_west(&self) -> Coord<f64> {
        coord! { x: self.west, y: self.south }
    }

    pub fn south_east(&self) -> Coord<f64> {
        coord! { x: self.east, y: self.south }
    }

    pub fn north_west(&self) -> Coord<f64> {
        coord! { x: self.west, y: self.north }
    }

    pub fn north_east(&self) -> Coord<f64> {
        coord! { x: self.east, y: self.north }
    }

    pub fn south_side(&self) -> Line<f64> {
        Line::new(self.south_west(), self.south_east())
    }

    pub fn east_side(&self) -> Line<f64> {
        Line::new(self.south_east(), self.north_east())
    }

    pub fn north_side(&self) -> Line<f64> {
        Line::new(self.north_east(), self.north_west())
    }

    pub fn west_side(&self) -> Line<f64> {
        Line::new(self.north_west(), self.south_west())
    }

    /// Sides in south, east, north, west order, walking the ring counter-clockwise.
    pub fn sides(&self) -> [Line<f64>; 4] {
        [
            self.south_side(),
            self.east_side(),
            self.north_side(),
            self.west_side(),
        ]
    }

    /// Corners in south-east, south-west, north-west, north-east order.
    pub fn corners(&self) -> [Coord<f64>; 4] {
        [
            self.south_east(),
            self.south_west(),
            self.north_west(),
            self.north_east(),
        ]
    }

    /// Strict containment of a longitude, as used by the circle membership test.
    pub(crate) fn straddles_lon(&self, lon: f64) -> bool {
        self.west < lon && lon < self.east
    }

    pub(crate) fn straddles_lat(&self, lat: f64) -> bool {
        self.south < lat && lat < self.north
    }
}

impl From<Rect<f64>> for BoundingBox {
    fn from(rect: Rect<f64>) -> Self {
        Self {
            north: rect.max().y,
            south: rect.min().y,
            east: rect.max().x,
            west: rect.min().x,
        }
    }
}

impl From<BoundingBox> for Rect<f64> {
    fn from(bbox: BoundingBox) -> Self {
        Rect::new(bbox.south_west(), bbox.north_east())
    }
}
