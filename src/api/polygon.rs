use crate::api::scan::{check_scan_span, for_each_row};
use crate::core::adjacency::{Direction, step_or_err, subcells};
use crate::core::bbox::BoundingBox;
use crate::core::constants::MAX_POLYGON_PRECISION;
use crate::core::geometry::{intersects, is_west};
use crate::util::codec::{check_precision, decode_bbox, matches};
use crate::util::coord::{Coordinate, validate_away_from_poles};
use crate::util::error::GeoCoverError;
use geo_types::{Coord, Line, Polygon, coord};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// How a cell relates to the polygon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellClass {
    Outside,
    Inside,
    Boundary,
}

/// Strategy used to classify cells during refinement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Classifier {
    /// Edge/side intersection tests plus corner containment.
    #[default]
    Exact,
    /// Corner containment only. Cheaper, but misses polygon features that
    /// cross a cell side between two corners.
    Quick,
}

type ClassifyFn = fn(&PolygonRegion, &str) -> Result<CellClass, GeoCoverError>;

impl Classifier {
    pub fn from_quick(quick: bool) -> Self {
        if quick {
            Classifier::Quick
        } else {
            Classifier::Exact
        }
    }

    fn resolve(self) -> ClassifyFn {
        match self {
            Classifier::Exact => PolygonRegion::classify_exact,
            Classifier::Quick => PolygonRegion::classify_quick,
        }
    }
}

/// A simple polygon, implicitly closed from its last vertex back to its first.
///
/// # Example
///
/// ```
/// use geocover_rs::PolygonRegion;
///
/// # fn main() -> Result<(), geocover_rs::GeoCoverError> {
/// let polygon = PolygonRegion::new(&[
///     (2.32378006, 48.86403720),
///     (2.35691071, 48.88616602),
///     (2.37905502, 48.85816465),
/// ])?;
/// let cells = polygon.fill(2, 6)?;
/// assert!(cells.contains("u09wj2"));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PolygonRegion {
    vertices: Vec<Coord<f64>>,
    bbox: BoundingBox,
}

impl PolygonRegion {
    pub fn new<C: Coordinate>(vertices: &[C]) -> Result<Self, GeoCoverError> {
        if vertices.len() < 3 {
            return Err(GeoCoverError::TooFewVertices(vertices.len()));
        }
        for vertex in vertices {
            validate_away_from_poles(vertex)?;
        }

        let vertices: Vec<Coord<f64>> = vertices
            .iter()
            .map(|c| coord! { x: c.x(), y: c.y() })
            .collect();
        let bbox = vertices.iter().skip(1).fold(
            BoundingBox::new(vertices[0].y, vertices[0].y, vertices[0].x, vertices[0].x),
            |b, c| BoundingBox {
                north: b.north.max(c.y),
                south: b.south.min(c.y),
                east: b.east.max(c.x),
                west: b.west.min(c.x),
            },
        );
        if bbox.east - bbox.west >= 180.0 {
            return Err(GeoCoverError::CrossesAntimeridian {
                west: bbox.west,
                east: bbox.east,
            });
        }

        Ok(Self { vertices, bbox })
    }

    /// Builds from the exterior ring of a `geo_types::Polygon`; interior rings are ignored.
    pub fn from_polygon(polygon: &Polygon<f64>) -> Result<Self, GeoCoverError> {
        let mut ring = polygon.exterior().0.clone();
        if ring.len() > 1 && ring.first() == ring.last() {
            ring.pop();
        }
        Self::new(&ring)
    }

    pub fn vertices(&self) -> &[Coord<f64>] {
        &self.vertices
    }

    pub fn bbox(&self) -> BoundingBox {
        self.bbox
    }

    fn edges(&self) -> impl Iterator<Item = Line<f64>> + '_ {
        let last = self.vertices[self.vertices.len() - 1];
        std::iter::once(last)
            .chain(self.vertices.iter().copied())
            .zip(self.vertices.iter().copied())
            .map(|(prev, curr)| Line::new(prev, curr))
    }

    /// Even-odd ray casting.
    ///
    /// Points exactly on a horizontal edge or on a vertex may land on either side.
    pub fn contains(&self, point: &impl Coordinate) -> bool {
        let (x, y) = (point.x(), point.y());
        let mut inside = false;
        for edge in self.edges() {
            let (prev, curr) = (edge.start, edge.end);
            if (curr.y > y) != (prev.y > y)
                && x < (prev.x - curr.x) * (y - curr.y) / (prev.y - curr.y) + curr.x
            {
                inside = !inside;
            }
        }
        inside
    }

    /// Whether any polygon edge crosses any side of `bbox`.
    pub fn intersects(&self, bbox: &BoundingBox) -> bool {
        let sides = bbox.sides();
        self.edges()
            .any(|edge| sides.iter().any(|side| intersects(side, &edge)))
    }

    /// Crossing any side, or holding the first vertex, makes a cell a boundary
    /// cell; otherwise all four corners decide.
    pub fn classify_exact(&self, cell: &str) -> Result<CellClass, GeoCoverError> {
        let bbox = decode_bbox(cell)?;
        if self.intersects(&bbox) || matches(&self.vertices[0], cell)? {
            return Ok(CellClass::Boundary);
        }
        if bbox.corners().iter().all(|corner| self.contains(corner)) {
            Ok(CellClass::Inside)
        } else {
            Ok(CellClass::Outside)
        }
    }

    pub fn classify_quick(&self, cell: &str) -> Result<CellClass, GeoCoverError> {
        let bbox = decode_bbox(cell)?;
        let [first, rest @ ..] = bbox.corners();
        let oddity = self.contains(&first);
        if rest.iter().any(|corner| self.contains(corner) != oddity) {
            Ok(CellClass::Boundary)
        } else if oddity {
            Ok(CellClass::Inside)
        } else {
            Ok(CellClass::Outside)
        }
    }

    /// One refinement level: returns `(accepted, next_candidates)`.
    ///
    /// Inside cells are accepted and outside cells dropped. Boundary cells are
    /// split into their 32 children when `split` is set, otherwise accepted
    /// only when `cover` is set.
    pub fn refine(
        &self,
        cells: &[String],
        split: bool,
        cover: bool,
        classifier: Classifier,
    ) -> Result<(Vec<String>, Vec<String>), GeoCoverError> {
        self.refine_with(cells, split, cover, classifier.resolve())
    }

    fn refine_with(
        &self,
        cells: &[String],
        split: bool,
        cover: bool,
        classify: ClassifyFn,
    ) -> Result<(Vec<String>, Vec<String>), GeoCoverError> {
        let mut accepted = Vec::new();
        let mut candidates = Vec::new();
        for cell in cells {
            match classify(self, cell)? {
                CellClass::Inside => accepted.push(cell.clone()),
                CellClass::Boundary if split => candidates.extend(subcells(cell)),
                CellClass::Boundary if cover => accepted.push(cell.clone()),
                CellClass::Boundary | CellClass::Outside => {}
            }
        }
        Ok((accepted, candidates))
    }

    /// Fills (`cover = false`) or covers (`cover = true`) the polygon with cells
    /// between `min_precision` and `max_precision` characters long.
    ///
    /// `max_precision` is capped at [`MAX_POLYGON_PRECISION`]. Works for
    /// concave polygons as well as convex ones.
    pub fn hashcodes(
        &self,
        min_precision: usize,
        max_precision: usize,
        cover: bool,
        quick: bool,
    ) -> Result<BTreeSet<String>, GeoCoverError> {
        check_precision(min_precision)?;
        let max_precision = max_precision.min(MAX_POLYGON_PRECISION);
        if min_precision > max_precision {
            return Err(GeoCoverError::InvalidPrecisionRange {
                min: min_precision,
                max: max_precision,
            });
        }

        let classify = Classifier::from_quick(quick).resolve();
        let mut candidates = self.tile_bbox(min_precision)?;
        let mut cells = BTreeSet::new();

        for precision in min_precision..=max_precision {
            let considered = candidates.len();
            let (accepted, next) =
                self.refine_with(&candidates, precision < max_precision, cover, classify)?;
            tracing::debug!(
                precision,
                considered,
                accepted = accepted.len(),
                "refined polygon level"
            );
            cells.extend(accepted);
            candidates = next;
        }

        tracing::debug!(
            min_precision,
            max_precision,
            cover,
            quick,
            cells = cells.len(),
            "covered polygon"
        );
        Ok(cells)
    }

    pub fn fill(
        &self,
        min_precision: usize,
        max_precision: usize,
    ) -> Result<BTreeSet<String>, GeoCoverError> {
        self.hashcodes(min_precision, max_precision, false, false)
    }

    pub fn cover(
        &self,
        min_precision: usize,
        max_precision: usize,
    ) -> Result<BTreeSet<String>, GeoCoverError> {
        self.hashcodes(min_precision, max_precision, true, false)
    }

    pub fn qfill(
        &self,
        min_precision: usize,
        max_precision: usize,
    ) -> Result<BTreeSet<String>, GeoCoverError> {
        self.hashcodes(min_precision, max_precision, false, true)
    }

    pub fn qcover(
        &self,
        min_precision: usize,
        max_precision: usize,
    ) -> Result<BTreeSet<String>, GeoCoverError> {
        self.hashcodes(min_precision, max_precision, true, true)
    }

    /// Every cell of `precision` characters overlapping the bounding box, row by row from the south-west.
    fn tile_bbox(&self, precision: usize) -> Result<Vec<String>, GeoCoverError> {
        let mut tiles = Vec::new();
        for_each_row(
            &(self.bbox.west, self.bbox.south),
            precision,
            self.bbox.north,
            |row, row_bbox| {
                check_scan_span(row_bbox.west, self.bbox.east)?;
                let mut cell = row;
                let mut cell_bbox = row_bbox;
                while is_west(cell_bbox.west, self.bbox.east) {
                    let next = step_or_err(&cell, Direction::East)?;
                    cell_bbox = decode_bbox(&next)?;
                    tiles.push(std::mem::replace(&mut cell, next));
                }
                Ok(())
            },
        )?;
        Ok(tiles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::codec::encode;
    use proptest::prelude::*;

    fn paris() -> PolygonRegion {
        PolygonRegion::new(&[
            (2.32378006, 48.86403720),
            (2.35691071, 48.88616602),
            (2.37905502, 48.85816465),
        ])
        .unwrap()
    }

    fn set(cells: &[&str]) -> BTreeSet<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_bbox() {
        assert_eq!(
            paris().bbox(),
            BoundingBox {
                west: 2.32378006,
                south: 48.85816465,
                east: 2.37905502,
                north: 48.88616602,
            }
        );
    }

    #[test]
    fn test_contains() -> Result<(), GeoCoverError> {
        let polygon = paris();
        let outside = decode_bbox("u09wj5")?;
        let inside = decode_bbox("u09wj2")?;

        assert!(!polygon.contains(&outside.south_west()));
        assert!(polygon.contains(&inside.south_west()));
        assert!(polygon.contains(&polygon.vertices()[0]));
        Ok(())
    }

    #[test]
    fn test_intersects() -> Result<(), GeoCoverError> {
        let polygon = paris();
        let expected = [
            ("u09wj5", false),
            ("u09tvy", true),
            ("u09tvz", true),
            ("u09wj0", true),
            ("u09wj2", false),
            ("u09wje", true),
        ];
        for (cell, crossing) in expected {
            assert_eq!(polygon.intersects(&decode_bbox(cell)?), crossing, "{}", cell);
        }
        Ok(())
    }

    #[test]
    fn test_exact_refine_level() -> Result<(), GeoCoverError> {
        let cells: Vec<String> = ["u09wj5", "u09tvy", "u09tvz", "u09wj0", "u09wj2", "u09wje"]
            .iter()
            .map(|c| c.to_string())
            .collect();
        let (inside, boundary) = paris().refine(&cells, true, false, Classifier::Exact)?;

        assert_eq!(inside, vec!["u09wj2".to_string()]);
        assert_eq!(boundary.len(), 128);
        assert!(boundary.iter().all(|c| {
            ["u09tvy", "u09tvz", "u09wj0", "u09wje"]
                .iter()
                .any(|p| c.starts_with(p))
        }));
        Ok(())
    }

    #[test]
    fn test_refine_enclosing_cell() -> Result<(), GeoCoverError> {
        let (inside, boundary) =
            paris().refine(&["u09".to_string()], true, false, Classifier::Exact)?;
        assert!(inside.is_empty());
        assert_eq!(boundary.len(), 32);
        assert!(boundary.iter().all(|c| c.starts_with("u09")));
        Ok(())
    }

    #[test]
    fn test_leaf_boundary_cells_follow_cover_flag() -> Result<(), GeoCoverError> {
        let polygon = paris();
        let cells = vec!["u09tvy".to_string()];

        let (filled, next) = polygon.refine(&cells, false, false, Classifier::Exact)?;
        assert!(filled.is_empty() && next.is_empty());

        let (covered, next) = polygon.refine(&cells, false, true, Classifier::Exact)?;
        assert_eq!(covered, cells);
        assert!(next.is_empty());
        Ok(())
    }

    #[test]
    fn test_fill_levels() -> Result<(), GeoCoverError> {
        let polygon = paris();
        let expected = set(&["u09tvx", "u09wj2", "u09wj8", "u09wj9"]);

        assert_eq!(polygon.fill(2, 6)?, expected);
        assert_eq!(polygon.fill(6, 6)?, expected);

        let deeper = polygon.fill(3, 7)?;
        assert_eq!(deeper.len(), 190);
        assert!(deeper.is_superset(&expected));
        assert!(deeper.iter().all(|c| c.starts_with("u09")));
        Ok(())
    }

    #[test]
    fn test_fill_to_max_precision() -> Result<(), GeoCoverError> {
        let cells = paris().hashcodes(3, 9, false, false)?;
        assert_eq!(cells.len(), 10149);
        assert!(cells.is_superset(&set(&["u09tvx", "u09wj2", "u09wj8", "u09wj9"])));
        assert!(cells.iter().all(|c| c.starts_with("u09")));
        Ok(())
    }

    #[test]
    fn test_max_precision_is_capped() -> Result<(), GeoCoverError> {
        let polygon = paris();
        assert_eq!(polygon.fill(6, 12)?, polygon.fill(6, 9)?);
        assert!(polygon.fill(6, 12)?.iter().all(|c| c.len() <= 9));
        Ok(())
    }

    #[test]
    fn test_precision_validation() {
        let polygon = paris();
        assert_eq!(polygon.fill(0, 6), Err(GeoCoverError::InvalidPrecision(0)));
        assert_eq!(
            polygon.fill(7, 6),
            Err(GeoCoverError::InvalidPrecisionRange { min: 7, max: 6 })
        );
        assert_eq!(
            polygon.fill(10, 12),
            Err(GeoCoverError::InvalidPrecisionRange { min: 10, max: 9 })
        );
    }

    #[test]
    fn test_fill_is_subset_of_cover() -> Result<(), GeoCoverError> {
        let polygon = paris();
        for quick in [false, true] {
            let fill = polygon.hashcodes(5, 7, false, quick)?;
            let cover = polygon.hashcodes(5, 7, true, quick)?;
            assert!(fill.is_subset(&cover));
            assert!(cover.len() > fill.len());
        }
        Ok(())
    }

    #[test]
    fn test_cover_contains_every_vertex() -> Result<(), GeoCoverError> {
        let polygon = paris();
        let cover = polygon.cover(3, 6)?;
        for vertex in polygon.vertices() {
            assert!(
                cover.iter().any(|cell| matches(vertex, cell).unwrap_or(false)),
                "vertex {:?} not covered",
                vertex
            );
        }
        Ok(())
    }

    #[test]
    fn test_quick_classifier_agrees_on_clear_cases() -> Result<(), GeoCoverError> {
        let polygon = paris();
        assert_eq!(polygon.classify_quick("u09wj2")?, CellClass::Inside);
        assert_eq!(polygon.classify_quick("u09wj5")?, CellClass::Outside);
        assert_eq!(polygon.classify_exact("u09wj2")?, CellClass::Inside);
        assert_eq!(polygon.classify_exact("u09wj5")?, CellClass::Outside);
        assert_eq!(polygon.classify_exact("u09tvy")?, CellClass::Boundary);
        Ok(())
    }

    #[test]
    fn test_quick_modes() -> Result<(), GeoCoverError> {
        let polygon = paris();
        let qfill = polygon.qfill(5, 7)?;
        let qcover = polygon.qcover(5, 7)?;
        assert!(qfill.contains("u09wj2"));
        assert_eq!(qfill.len(), 184);
        assert!(qfill.is_subset(&qcover));
        Ok(())
    }

    #[test]
    fn test_quick_drops_polygon_inside_one_coarse_cell() -> Result<(), GeoCoverError> {
        // u09 has all four corners outside the triangle.
        let polygon = paris();
        assert_eq!(polygon.classify_quick("u09")?, CellClass::Outside);
        assert_eq!(polygon.classify_exact("u09")?, CellClass::Boundary);
        assert!(polygon.qcover(3, 6)?.is_empty());
        assert_eq!(polygon.cover(3, 6)?.len(), 23);
        Ok(())
    }

    #[test]
    fn test_validation() {
        assert_eq!(
            PolygonRegion::new(&[(0.0, 0.0), (1.0, 1.0)]),
            Err(GeoCoverError::TooFewVertices(2))
        );
        assert_eq!(
            PolygonRegion::new(&[(0.0, 0.0), (1.0, 1.0), (181.0, 0.0)]),
            Err(GeoCoverError::InvalidLongitude(181.0))
        );
        assert_eq!(
            PolygonRegion::new(&[(0.0, 0.0), (1.0, 89.8), (2.0, 0.0)]),
            Err(GeoCoverError::NearPole(89.8))
        );
        assert!(matches!(
            PolygonRegion::new(&[(179.0, 0.0), (-179.0, 1.0), (-179.0, -1.0)]),
            Err(GeoCoverError::CrossesAntimeridian { .. })
        ));
    }

    #[test]
    fn test_wide_polygon_needs_fine_enough_start() -> Result<(), GeoCoverError> {
        // 170 degrees wide; the coarsest cell holding (-100, 0) starts at -135.
        let polygon = PolygonRegion::new(&[(-100.0, 0.0), (70.0, 0.0), (70.0, 10.0)])?;
        assert_eq!(
            polygon.cover(1, 2),
            Err(GeoCoverError::CrossesAntimeridian {
                west: -135.0,
                east: 70.0
            })
        );

        let cover = polygon.cover(3, 4)?;
        assert!(cover.contains(&encode(&(-100.0, 0.0), 4)?));
        Ok(())
    }

    #[test]
    fn test_from_polygon_drops_closing_vertex() -> Result<(), GeoCoverError> {
        let polygon = Polygon::new(
            vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 0.0)].into(),
            vec![],
        );
        let region = PolygonRegion::from_polygon(&polygon)?;
        assert_eq!(region.vertices().len(), 3);
        Ok(())
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(16))]

        #[test]
        fn deeper_fill_keeps_coarser_cells(extra in 0usize..3) {
            let polygon = paris();
            let coarse = polygon.fill(3, 6).unwrap();
            let fine = polygon.fill(3, 6 + extra).unwrap();
            prop_assert!(coarse.iter().all(|c| fine.contains(c)));
        }

        #[test]
        fn fill_is_within_cover(min in 2usize..5, depth in 0usize..3, quick in any::<bool>()) {
            let polygon = paris();
            let max = min + depth;
            let fill = polygon.hashcodes(min, max, false, quick).unwrap();
            let cover = polygon.hashcodes(min, max, true, quick).unwrap();
            prop_assert!(fill.is_subset(&cover));
        }
    }
}
