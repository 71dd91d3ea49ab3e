//! Post-merge closure pass: promotes near-closed open polylines to
//! closed ones.
//!
//! Ported from `cleanup.py`'s `should_close_path`. Runs exactly once,
//! after the merge loop quiesces; it never re-enters the merge loop.

use crate::geometry::{approx_eq, direction, directional_angle};
use crate::types::Point;
use crate::types::Polyline;

/// True iff `polyline` should be promoted to closed: at least 3 points,
/// endpoints not already approximately equal, endpoints within `d_tol`
/// of each other, and the start tangent points toward the reversed end
/// tangent within `a_tol` degrees (the two ends approach the would-be
/// seam head-on rather than crossing or diverging).
#[must_use]
pub fn should_close(polyline: &Polyline, d_tol: f64, a_tol: f64) -> bool {
    let points = polyline.points();
    if points.len() < 3 {
        return false;
    }

    let start = points[0];
    let end = points[points.len() - 1];
    if approx_eq(start, end) {
        return false;
    }
    if start.distance(end) > d_tol {
        return false;
    }

    let Some(start_dir) = direction(points[0], points[1]) else {
        return false;
    };
    let n = points.len();
    let Some(end_dir) = direction(points[n - 2], points[n - 1]) else {
        return false;
    };
    let reversed_end_dir = Point::new(-end_dir.x, -end_dir.y);

    directional_angle(start_dir, reversed_end_dir) < a_tol
}

/// Apply the closure pass to a list of (post-merge) polylines: every
/// polyline for which [`should_close`] holds gets a copy of its start
/// point appended, closing it. Everything else passes through unchanged.
#[must_use]
pub fn close_pass(polylines: Vec<Polyline>, d_tol: f64, a_tol: f64) -> Vec<Polyline> {
    polylines
        .into_iter()
        .map(|polyline| {
            if should_close(&polyline, d_tol, a_tol) {
                let mut points = polyline.into_points();
                let first = points[0];
                points.push(first);
                Polyline::new(points)
            } else {
                polyline
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pl(points: &[(f64, f64)]) -> Polyline {
        Polyline::new(points.iter().map(|&(x, y)| Point::new(x, y)).collect())
    }

    #[test]
    fn closes_a_nearly_closed_loop() {
        // Endpoints 0.05 apart; both tangents point "up" at the seam, so
        // reversing the end tangent lines it up with the start tangent.
        let loop_path = pl(&[(0.0, 0.0), (0.0, 1.0), (0.1, 1.0), (0.05, 0.0)]);
        assert!(should_close(&loop_path, 1.0, 10.0));
        let closed = close_pass(vec![loop_path.clone()], 1.0, 10.0);
        assert_eq!(closed[0].last(), closed[0].first());
        assert_eq!(closed[0].len(), 5);
    }

    #[test]
    fn does_not_close_when_endpoints_too_far() {
        let path = pl(&[(0.0, 0.0), (10.0, 0.0), (5.0, 10.0), (5.0, 5.0)]);
        assert!(!should_close(&path, 1.0, 10.0));
    }

    #[test]
    fn does_not_close_when_tangents_cross_rather_than_meet() {
        // Endpoints close together but tangents point past each other,
        // not at each other.
        let path = pl(&[(0.0, 0.0), (1.0, 1.0), (2.0, -1.0), (0.1, 0.0)]);
        assert!(!should_close(&path, 1.0, 5.0));
    }

    #[test]
    fn already_closed_polyline_is_left_alone() {
        let closed = pl(&[(0.0, 0.0), (10.0, 0.0), (5.0, 10.0), (0.0, 0.0)]);
        assert!(!should_close(&closed, 1.0, 10.0));
        let result = close_pass(vec![closed.clone()], 1.0, 10.0);
        assert_eq!(result[0], closed);
    }

    #[test]
    fn too_short_polyline_never_closes() {
        let segment = pl(&[(0.0, 0.0), (0.01, 0.01)]);
        assert!(!should_close(&segment, 1.0, 10.0));
    }
}
