/// Geohash base-32 alphabet (no `a`, `i`, `l`, `o`).
pub const BASE32: &[u8; 32] = b"0123456789bcdefghjkmnpqrstuvwxyz";

/// Default cell length for paths and polygon refinement.
pub const DEFAULT_PRECISION: usize = 9;

/// Longest cell id the grid codec can produce.
pub const MAX_PRECISION: usize = 12;

/// Polygon refinement never goes deeper than this.
pub const MAX_POLYGON_PRECISION: usize = DEFAULT_PRECISION;

/// Coarsest level the polygon refinement starts from by default.
pub const DEFAULT_MIN_PRECISION: usize = 2;

/// Row scans do not terminate reliably beyond this latitude.
pub const POLE_LIMIT: f64 = 89.75;

// Indexed by [direction][parity], parity = cell length % 2.
// Direction order matches `Direction as usize`: north, south, east, west.

/// Position of the last character in these strings is its index in [`BASE32`]
/// for the neighbour in that direction.
pub(crate) const NEIGHBOURS: [[&[u8; 32]; 2]; 4] = [
    [
        b"p0r21436x8zb9dcf5h7kjnmqesgutwvy",
        b"bc01fg45238967deuvhjyznpkmstqrwx",
    ],
    [
        b"14365h7k9dcfesgujnmqp0r2twvyx8zb",
        b"238967debc01fg45kmstqrwxuvhjyznp",
    ],
    [
        b"bc01fg45238967deuvhjyznpkmstqrwx",
        b"p0r21436x8zb9dcf5h7kjnmqesgutwvy",
    ],
    [
        b"238967debc01fg45kmstqrwxuvhjyznp",
        b"14365h7k9dcfesgujnmqp0r2twvyx8zb",
    ],
];

/// Characters on the border of their parent cell in that direction.
pub(crate) const EDGE_CASES: [[&[u8]; 2]; 4] = [
    [b"prxz", b"bcfguvyz"],
    [b"028b", b"0145hjnp"],
    [b"bcfguvyz", b"prxz"],
    [b"0145hjnp", b"028b"],
];
