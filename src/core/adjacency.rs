use crate::core::constants::{BASE32, EDGE_CASES, NEIGHBOURS};
use crate::util::error::GeoCoverError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Compass direction used to step between neighbouring cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    North = 0,
    South = 1,
    East = 2,
    West = 3,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    pub fn opposite(self) -> Self {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Direction::North => 'n',
            Direction::South => 's',
            Direction::East => 'e',
            Direction::West => 'w',
        }
    }

    /// Latitude is not cyclic, so stepping north or south can run off the grid.
    fn can_leave_grid(self) -> bool {
        matches!(self, Direction::North | Direction::South)
    }
}

impl FromStr for Direction {
    type Err = GeoCoverError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "n" | "north" => Ok(Direction::North),
            "s" | "south" => Ok(Direction::South),
            "e" | "east" => Ok(Direction::East),
            "w" | "west" => Ok(Direction::West),
            _ => Err(GeoCoverError::InvalidDirection(s.to_string())),
        }
    }
}

impl TryFrom<char> for Direction {
    type Error = GeoCoverError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        Direction::from_str(c.encode_utf8(&mut [0; 4]))
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Returns the cell next to `cell` in `direction`.
///
/// `Ok(None)` means `cell` sits on the polar edge of the grid and has no
/// neighbour that way. East and west wrap around the antimeridian.
///
/// # Example
/// ```
/// use geocover_rs::{adjacent, Direction};
///
/// # fn main() -> Result<(), geocover_rs::GeoCoverError> {
/// assert_eq!(adjacent("gy", Direction::North)?, Some("gz".to_string()));
/// assert_eq!(adjacent("gz", Direction::North)?, None);
/// # Ok(())
/// # }
/// ```
pub fn adjacent(cell: &str, direction: Direction) -> Result<Option<String>, GeoCoverError> {
    if cell.is_empty() {
        return Err(GeoCoverError::EmptyCell);
    }
    if !cell.bytes().all(|b| BASE32.contains(&b)) {
        return Err(GeoCoverError::InvalidCell(cell.to_string()));
    }
    Ok(step(cell.as_bytes(), direction))
}

// `cell` is non-empty and only holds alphabet bytes.
fn step(cell: &[u8], direction: Direction) -> Option<String> {
    let (&last, parent) = cell.split_last()?;
    let parity = cell.len() % 2;
    let d = direction as usize;

    let mut next = if EDGE_CASES[d][parity].contains(&last) {
        if !parent.is_empty() {
            step(parent, direction)?
        } else if direction.can_leave_grid() {
            return None;
        } else {
            String::new()
        }
    } else {
        // Alphabet bytes are ASCII.
        parent.iter().map(|&b| b as char).collect()
    };

    let idx = NEIGHBOURS[d][parity].iter().position(|&b| b == last)?;
    next.push(BASE32[idx] as char);
    Some(next)
}

/// Calls [`adjacent`] and turns a missing neighbour into an error, for walks
/// that must never step off the grid.
pub(crate) fn step_or_err(cell: &str, direction: Direction) -> Result<String, GeoCoverError> {
    adjacent(cell, direction)?.ok_or_else(|| GeoCoverError::NoNeighbor {
        cell: cell.to_string(),
        direction: direction.as_char(),
    })
}

pub fn north(cell: &str) -> Result<Option<String>, GeoCoverError> {
    adjacent(cell, Direction::North)
}

pub fn south(cell: &str) -> Result<Option<String>, GeoCoverError> {
    adjacent(cell, Direction::South)
}

pub fn east(cell: &str) -> Result<Option<String>, GeoCoverError> {
    adjacent(cell, Direction::East)
}

pub fn west(cell: &str) -> Result<Option<String>, GeoCoverError> {
    adjacent(cell, Direction::West)
}

/// The 32 cells one level below `cell`, in alphabet order.
pub fn subcells(cell: &str) -> Vec<String> {
    BASE32
        .iter()
        .map(|&c| {
            let mut child = String::with_capacity(cell.len() + 1);
            child.push_str(cell);
            child.push(c as char);
            child
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn adj(cell: &str, d: char) -> Option<String> {
        adjacent(cell, Direction::try_from(d).unwrap()).unwrap()
    }

    #[test]
    fn test_north_within_and_across_parents() {
        let steps = [
            ("gy", "gz"),
            ("gv", "gy"),
            ("gu", "gv"),
            ("gg", "gu"),
            ("gf", "gg"),
            ("gc", "gf"),
            ("gb", "gc"),
            ("ez", "gb"),
            ("7", "e"),
            ("7r", "e2"),
            ("7ru", "e2h"),
            ("7rux", "e2h8"),
            ("7ruxg", "e2h85"),
            ("e2heg", "e2hs5"),
            ("e2hee", "e2heg"),
            ("e2he7", "e2hee"),
            ("e2he5", "e2he7"),
            ("e2hdg", "e2he5"),
        ];
        for (from, to) in steps {
            assert_eq!(adj(from, 'n').as_deref(), Some(to), "north of {}", from);
        }
    }

    #[test]
    fn test_south_within_and_across_parents() {
        let steps = [
            ("gz", "gy"),
            ("gy", "gv"),
            ("gv", "gu"),
            ("gu", "gg"),
            ("gg", "gf"),
            ("gf", "gc"),
            ("gc", "gb"),
            ("gb", "ez"),
            ("e", "7"),
            ("e2", "7r"),
            ("e2h", "7ru"),
            ("e2h8", "7rux"),
            ("e2h85", "7ruxg"),
            ("e2hs5", "e2heg"),
            ("e2he5", "e2hdg"),
        ];
        for (from, to) in steps {
            assert_eq!(adj(from, 's').as_deref(), Some(to), "south of {}", from);
        }
    }

    #[test]
    fn test_polar_edges_have_no_neighbour() {
        assert_eq!(adj("gz", 'n'), None);
        assert_eq!(adj("58", 's'), None);
        assert_eq!(adj("z", 'n'), None);
        assert_eq!(adj("0", 's'), None);
    }

    #[test]
    fn test_east_and_west_wrap_at_coarsest_level() {
        let ring = ["2", "3", "6", "7", "k", "m", "q", "r"];
        for pair in ring.windows(2) {
            assert_eq!(adj(pair[0], 'e').as_deref(), Some(pair[1]));
            assert_eq!(adj(pair[1], 'w').as_deref(), Some(pair[0]));
        }
        assert_eq!(adj("r", 'e').as_deref(), Some("2"));
        assert_eq!(adj("2", 'w').as_deref(), Some("r"));
    }

    #[test]
    fn test_east_and_west_across_parents() {
        assert_eq!(adj("7y", 'e').as_deref(), Some("kn"));
        assert_eq!(adj("7w", 'e').as_deref(), Some("7y"));
        assert_eq!(adj("7q", 'e').as_deref(), Some("7w"));
        assert_eq!(adj("7n", 'e').as_deref(), Some("7q"));

        assert_eq!(adj("7y", 'w').as_deref(), Some("7w"));
        assert_eq!(adj("7w", 'w').as_deref(), Some("7q"));
        assert_eq!(adj("7q", 'w').as_deref(), Some("7n"));
        assert_eq!(adj("7n", 'w').as_deref(), Some("6y"));
    }

    #[test]
    fn test_invalid_arguments() {
        assert_eq!(adjacent("", Direction::North), Err(GeoCoverError::EmptyCell));
        assert!(matches!(
            adjacent("gcpa", Direction::East),
            Err(GeoCoverError::InvalidCell(_))
        ));
        assert!(matches!(
            "up".parse::<Direction>(),
            Err(GeoCoverError::InvalidDirection(_))
        ));
        assert!(Direction::try_from('x').is_err());
    }

    #[test]
    fn test_direction_parsing() -> Result<(), GeoCoverError> {
        assert_eq!("n".parse::<Direction>()?, Direction::North);
        assert_eq!("South".parse::<Direction>()?, Direction::South);
        assert_eq!(Direction::try_from('e')?, Direction::East);
        assert_eq!(Direction::West.opposite(), Direction::East);
        Ok(())
    }

    #[test]
    fn test_named_helpers_match_adjacent() -> Result<(), GeoCoverError> {
        assert_eq!(north("gy")?, Some("gz".to_string()));
        assert_eq!(south("gz")?, Some("gy".to_string()));
        assert_eq!(east("7y")?, Some("kn".to_string()));
        assert_eq!(west("7n")?, Some("6y".to_string()));
        Ok(())
    }

    #[test]
    fn test_step_or_err_reports_polar_edge() {
        let err = step_or_err("gz", Direction::North);
        assert_eq!(
            err,
            Err(GeoCoverError::NoNeighbor {
                cell: "gz".to_string(),
                direction: 'n'
            })
        );
    }

    #[test]
    fn test_subcells() {
        let children = subcells("gcpv");
        assert_eq!(children.len(), 32);
        for child in ["gcpvj", "gcpvm", "gcpvh", "gcpvn"] {
            assert!(children.iter().any(|c| c == child));
        }
        assert!(!children.iter().any(|c| c == "gcpuv"));
        assert!(children.iter().all(|c| c.starts_with("gcpv") && c.len() == 5));
    }

    fn arb_cell() -> impl Strategy<Value = String> {
        proptest::collection::vec(0usize..32, 1..9)
            .prop_map(|idx| idx.into_iter().map(|i| BASE32[i] as char).collect())
    }

    fn arb_direction() -> impl Strategy<Value = Direction> {
        prop::sample::select(Direction::ALL.to_vec())
    }

    proptest! {
        #[test]
        fn adjacent_then_opposite_returns_home(cell in arb_cell(), d in arb_direction()) {
            if let Some(next) = adjacent(&cell, d).unwrap() {
                prop_assert_eq!(next.len(), cell.len());
                let back = adjacent(&next, d.opposite()).unwrap();
                prop_assert_eq!(back, Some(cell));
            }
        }

        #[test]
        fn subcells_extend_parent(cell in arb_cell()) {
            let children = subcells(&cell);
            prop_assert_eq!(children.len(), 32);
            for child in children {
                prop_assert_eq!(child.len(), cell.len() + 1);
                prop_assert!(child.starts_with(&cell));
            }
        }
    }
}
