use geo_types::{Coord, Line};

/// Whether `lon0` lies west of `lon1` along the shorter arc between them.
///
/// Longitudes are compared on a 360 degree circle so that eastward scans
/// terminate even when an interval straddles +/-180 numerically.
pub fn is_west(lon0: f64, lon1: f64) -> bool {
    let (c0, c1) = (lon0 + 180.0, lon1 + 180.0);
    (c0 < c1 && c1 - c0 < 180.0) || (c0 > c1 && c1 + 360.0 - c0 < 180.0)
}

/// Twice the signed area of the triangle `a`, `b`, `c`.
fn ccw(a: Coord<f64>, b: Coord<f64>, c: Coord<f64>) -> f64 {
    (c.y - a.y) * (b.x - a.x) - (b.y - a.y) * (c.x - a.x)
}

/// Whether `q` lies strictly between `p` and `r` on either axis.
fn within(p: Coord<f64>, q: Coord<f64>, r: Coord<f64>) -> bool {
    (p.x < q.x && q.x < r.x)
        || (r.x < q.x && q.x < p.x)
        || (p.y < q.y && q.y < r.y)
        || (r.y < q.y && q.y < p.y)
}

/// Segment intersection from orientation tests.
///
/// Proper crossings, collinear overlaps and an endpoint lying strictly inside
/// the other segment all count as intersecting.
pub fn intersects(a: &Line<f64>, b: &Line<f64>) -> bool {
    let sl1 = ccw(a.start, b.start, b.end);
    if sl1 == 0.0 && within(b.start, a.start, b.end) {
        return true;
    }
    let sl2 = ccw(a.end, b.start, b.end);
    if sl2 == 0.0 && within(b.start, a.end, b.end) {
        return true;
    }
    let sl3 = ccw(a.start, a.end, b.start);
    if sl3 == 0.0 && within(a.start, b.start, a.end) {
        return true;
    }
    let sl4 = ccw(a.start, a.end, b.end);
    if sl4 == 0.0 && within(a.start, b.end, a.end) {
        return true;
    }
    (sl1 > 0.0) != (sl2 > 0.0) && (sl3 > 0.0) != (sl4 > 0.0)
}
