/// Error type for geocover-rs operations.
#[derive(Debug, Clone, PartialEq)]
pub enum GeoCoverError {
    /// Longitude outside -180..180.
    InvalidLongitude(f64),
    /// Latitude outside -90..90.
    InvalidLatitude(f64),
    /// Latitude too close to a pole for the raster scans to terminate.
    NearPole(f64),
    /// Circle radius is negative or not finite.
    InvalidRadius(f64),
    /// A path needs at least two waypoints.
    TooFewWaypoints(usize),
    /// A polygon needs at least three vertices.
    TooFewVertices(usize),
    /// The region spans the antimeridian or more than half the globe in longitude.
    CrossesAntimeridian { west: f64, east: f64 },
    /// Precision outside the range the grid codec supports.
    InvalidPrecision(usize),
    /// Minimum precision is above the (capped) maximum precision.
    InvalidPrecisionRange { min: usize, max: usize },
    /// Adjacency was asked about an empty cell id.
    EmptyCell,
    /// The cell id contains a character outside the base-32 alphabet.
    InvalidCell(String),
    /// Unrecognised compass direction.
    InvalidDirection(String),
    /// A walk needed the neighbour of a cell on the polar edge of the grid.
    NoNeighbor { cell: String, direction: char },
    /// A path walk stepped outside the cells its segment can touch without reaching the end cell.
    PathWalkLost { start: String, target: String },
    /// The grid codec rejected its input.
    Codec(String),
    /// Failed to parse geometry from string (GeoJSON or WKT).
    GeometryParseError(String),
    /// The geometry kind has no matching region.
    UnsupportedGeometry(String),
    /// File I/O error.
    IoError(String),
    /// Configuration could not be read or is inconsistent.
    ConfigError(String),
}

impl std::fmt::Display for GeoCoverError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GeoCoverError::InvalidLongitude(lon) => {
                write!(f, "Longitude {:.6} is outside legal range of -180..180", lon)
            }
            GeoCoverError::InvalidLatitude(lat) => {
                write!(f, "Latitude {:.6} is outside legal range of -90..90", lat)
            }
            GeoCoverError::NearPole(lat) => write!(
                f,
                "Latitude {:.6} is within 0.25 degrees of a pole (legal range -89.75..89.75)",
                lat
            ),
            GeoCoverError::InvalidRadius(r) => {
                write!(f, "Radius {} must be a finite, non-negative number of meters", r)
            }
            GeoCoverError::TooFewWaypoints(n) => {
                write!(f, "A path must have at least two waypoints, got {}", n)
            }
            GeoCoverError::TooFewVertices(n) => {
                write!(f, "A polygon must have at least three vertices, got {}", n)
            }
            GeoCoverError::CrossesAntimeridian { west, east } => write!(
                f,
                "Region spanning longitudes {:.6}..{:.6} crosses the antimeridian or exceeds 180 degrees",
                west, east
            ),
            GeoCoverError::InvalidPrecision(p) => {
                write!(f, "Precision {} is outside legal range of 1..12", p)
            }
            GeoCoverError::InvalidPrecisionRange { min, max } => write!(
                f,
                "Minimum precision {} is greater than maximum precision {}",
                min, max
            ),
            GeoCoverError::EmptyCell => write!(f, "Invalid geohash: empty cell id"),
            GeoCoverError::InvalidCell(cell) => write!(f, "Invalid geohash: {:?}", cell),
            GeoCoverError::InvalidDirection(d) => {
                write!(f, "Invalid direction {:?}, expected one of n, s, e, w", d)
            }
            GeoCoverError::NoNeighbor { cell, direction } => {
                write!(f, "Cell {} has no neighbour to the {}", cell, direction)
            }
            GeoCoverError::PathWalkLost { start, target } => write!(
                f,
                "Path walk from {} lost its segment before reaching {}",
                start, target
            ),
            GeoCoverError::Codec(msg) => write!(f, "Geohash codec error: {}", msg),
            GeoCoverError::GeometryParseError(msg) => write!(f, "Geometry parse error: {}", msg),
            GeoCoverError::UnsupportedGeometry(kind) => {
                write!(f, "Unsupported geometry: {}", kind)
            }
            GeoCoverError::IoError(msg) => write!(f, "IO error: {}", msg),
            GeoCoverError::ConfigError(msg) => write!(f, "Config error: {}", msg),
        }
    }
}

impl std::error::Error for GeoCoverError {}
