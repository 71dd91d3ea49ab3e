//! Pure 2-D geometry predicates underlying the merge engine.
//!
//! Every function here is a closed-form scalar formula operating on
//! [`Point`] pairs; none of it allocates or fails except by returning
//! `None`/`bool` for degenerate input. Ported from
//! `cleanup.py`'s `are_segments_collinear`, `point_to_line_distance`,
//! and `are_segments_offset`.

use crate::types::{Point, Polyline};

/// Absolute tolerance used by [`approx_eq`] to compare floating-point
/// points.
pub const APPROX_TOL: f64 = 1e-6;

/// Squared-length threshold below which a segment is treated as a
/// degenerate (zero-length) direction vector.
const DEGENERATE_SQ_LEN: f64 = 1e-16;

/// True if `a` and `b` are the same point within [`APPROX_TOL`].
#[must_use]
pub fn approx_eq(a: Point, b: Point) -> bool {
    (a.x - b.x).abs() < APPROX_TOL && (a.y - b.y).abs() < APPROX_TOL
}

/// Unit vector pointing from `a` toward `b`.
///
/// Returns `None` when the segment is degenerate (squared length below
/// `1e-16`); callers must check for this and skip the operation rather
/// than dividing by a near-zero length.
#[must_use]
pub fn direction(a: Point, b: Point) -> Option<Point> {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let len_sq = dx.mul_add(dx, dy * dy);
    if len_sq < DEGENERATE_SQ_LEN {
        return None;
    }
    let len = len_sq.sqrt();
    Some(Point::new(dx / len, dy / len))
}

/// Angle in degrees `[0, 180]` between two unit vectors, direction-agnostic:
/// parallel and anti-parallel vectors both read as close to the tolerance
/// boundary. Computed from the absolute dot product, clamped before the
/// inverse cosine to guard against roundoff pushing it outside `[-1, 1]`.
#[must_use]
pub fn angle_between(u: Point, v: Point) -> f64 {
    let dot = u.x.mul_add(v.x, u.y * v.y);
    dot.abs().clamp(-1.0, 1.0).acos().to_degrees()
}

/// True iff `u` and `v` are collinear within `angle_tol` degrees, either
/// parallel or anti-parallel.
#[must_use]
pub fn collinear(u: Point, v: Point, angle_tol: f64) -> bool {
    let angle = angle_between(u, v);
    angle < angle_tol || (180.0 - angle).abs() < angle_tol
}

/// Perpendicular distance from `p` to the line through `line_point` with
/// unit direction `line_dir`.
#[must_use]
pub fn perp_distance(p: Point, line_point: Point, line_dir: Point) -> f64 {
    let vx = p.x - line_point.x;
    let vy = p.y - line_point.y;
    let parallel = vx.mul_add(line_dir.x, vy * line_dir.y);
    let perp_x = vx - parallel * line_dir.x;
    let perp_y = vy - parallel * line_dir.y;
    perp_x.hypot(perp_y)
}

/// True iff `p2` lies more than `offset_tol` away from the line through
/// `p1` with direction `dir1` — i.e. the two segments are parallel but
/// not on the same underlying line. Rejects the "dashed lines jumping
/// across the gap between two different rows" failure mode.
#[must_use]
pub fn offset(p1: Point, dir1: Point, p2: Point, offset_tol: f64) -> bool {
    perp_distance(p2, p1, dir1) > offset_tol
}

/// Sum of segment lengths along `polyline`.
#[must_use]
pub fn path_length(polyline: &Polyline) -> f64 {
    polyline
        .points()
        .windows(2)
        .map(|w| w[0].distance(w[1]))
        .sum()
}

/// True, direction-sensitive angle in degrees `[0, 180]` between two unit
/// vectors: parallel vectors read as 0°, anti-parallel as 180°. Unlike
/// [`angle_between`], the dot product is not folded through `abs`. Used by
/// the closure pass, which needs to tell "tangents point at each other"
/// from "tangents point the same way".
#[must_use]
pub fn directional_angle(u: Point, v: Point) -> f64 {
    let dot = u.x.mul_add(v.x, u.y * v.y);
    dot.clamp(-1.0, 1.0).acos().to_degrees()
}
