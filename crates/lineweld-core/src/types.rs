//! Shared types for polyline consolidation: points, polylines, and the
//! [`ConsolidationConfig`] passed to [`crate::consolidate`].

use crate::geometry::approx_eq;

/// A 2-D point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

impl Point {
    /// Create a new point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Squared Euclidean distance to another point.
    ///
    /// Avoids the square root for comparison purposes.
    #[must_use]
    pub fn distance_squared(self, other: Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx.mul_add(dx, dy * dy)
    }

    /// Euclidean distance to another point.
    #[must_use]
    pub fn distance(self, other: Self) -> f64 {
        self.distance_squared(other).sqrt()
    }
}

/// A non-empty ordered sequence of points joined by straight segments.
///
/// A polyline is *closed* iff its first and last points are
/// approximately equal and it has at least 4 distinct vertex positions
/// (see [`Polyline::is_closed`]); otherwise it is *open*. Closed
/// polylines are opaque to the merge engine: never modified, never
/// merged, never indexed.
#[derive(Debug, Clone, PartialEq)]
pub struct Polyline(Vec<Point>);

impl Polyline {
    /// Create a new polyline from a vector of points.
    #[must_use]
    pub const fn new(points: Vec<Point>) -> Self {
        Self(points)
    }

    /// Returns `true` if the polyline has no points.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the number of points in the polyline.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns the first point, if any.
    #[must_use]
    pub fn first(&self) -> Option<&Point> {
        self.0.first()
    }

    /// Returns the last point, if any.
    #[must_use]
    pub fn last(&self) -> Option<&Point> {
        self.0.last()
    }

    /// Returns a slice of all points.
    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.0
    }

    /// Consumes the polyline and returns the underlying vector of points.
    #[must_use]
    pub fn into_points(self) -> Vec<Point> {
        self.0
    }

    /// True iff the first and last points are approximately equal and the
    /// polyline visits at least 4 distinct positions (a triangle's worth
    /// of corners plus the repeated seam vertex). Stricter than a bare
    /// first-equals-last check so that a degenerate back-and-forth
    /// two-point "loop" never counts as closed.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        if self.0.len() < 4 {
            return false;
        }
        let first = self.0[0];
        let last = self.0[self.0.len() - 1];
        approx_eq(first, last) && distinct_position_count(&self.0) >= 4
    }

    /// True iff the polyline is not [`Polyline::is_closed`].
    #[must_use]
    pub fn is_open(&self) -> bool {
        !self.is_closed()
    }

    /// True for polylines the merge engine silently excludes from the
    /// active set and index: fewer than 2 points, or exactly 2 points at
    /// the same position (a zero-length segment has no tangent).
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        match self.0.as_slice() {
            [] | [_] => true,
            [a, b] => approx_eq(*a, *b),
            _ => false,
        }
    }
}

/// Count of mutually non-approximately-equal positions among `points`.
///
/// Quadratic in the number of points, which is fine here: it is only
/// evaluated once per polyline, on polylines small enough to be traced
/// line segments rather than dense contours.
fn distinct_position_count(points: &[Point]) -> usize {
    let mut distinct: Vec<Point> = Vec::new();
    for &p in points {
        if !distinct.iter().any(|&d| approx_eq(p, d)) {
            distinct.push(p);
        }
    }
    distinct.len()
}

/// Tunable parameters for [`crate::consolidate`].
///
/// [`Default`] matches the distilled specification's defaults exactly:
/// `d_tol=50.0`, `a_tol=15.0`, `simplify_tol=1.01`, derived
/// `offset_tol = d_tol / 2`. These encode the original drawing
/// assumption of roughly 200 dpi raster input; callers processing
/// different resolutions should override them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConsolidationConfig {
    /// Maximum endpoint distance for merging two polylines.
    pub d_tol: f64,
    /// Maximum tangent angle difference, in degrees, for collinearity.
    pub a_tol: f64,
    /// Douglas-Peucker simplification tolerance applied before and after
    /// merging.
    pub simplify_tol: f64,
    /// Maximum perpendicular separation for two parallel segments to be
    /// considered the same line. Defaults to `d_tol / 2` when `None`.
    pub offset_tol: Option<f64>,
}

impl Default for ConsolidationConfig {
    fn default() -> Self {
        Self {
            d_tol: 50.0,
            a_tol: 15.0,
            simplify_tol: 1.01,
            offset_tol: None,
        }
    }
}

impl ConsolidationConfig {
    /// Resolved offset tolerance: the explicit override if set, otherwise
    /// `d_tol / 2`.
    #[must_use]
    pub fn offset_tol(&self) -> f64 {
        self.offset_tol.unwrap_or(self.d_tol / 2.0)
    }

    /// Validate that every tolerance is non-negative.
    ///
    /// # Errors
    ///
    /// Returns [`ConsolidationError::NegativeTolerance`] naming the first
    /// offending field.
    pub fn validate(&self) -> Result<(), ConsolidationError> {
        let checks: [(&'static str, f64); 3] = [
            ("d_tol", self.d_tol),
            ("a_tol", self.a_tol),
            ("simplify_tol", self.simplify_tol),
        ];
        for (name, value) in checks {
            if value < 0.0 {
                return Err(ConsolidationError::NegativeTolerance { name, value });
            }
        }
        if let Some(value) = self.offset_tol {
            if value < 0.0 {
                return Err(ConsolidationError::NegativeTolerance {
                    name: "offset_tol",
                    value,
                });
            }
        }
        Ok(())
    }
}

/// Errors surfaced by [`crate::consolidate`].
///
/// The consolidation core never fails on geometric input: degenerate
/// polylines and tolerance misses are handled by skipping the specific
/// candidate, never by aborting the pass. The only failure mode is
/// invalid configuration, checked once at the orchestrator boundary.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConsolidationError {
    /// A tolerance field was negative.
    #[error("{name} must be non-negative, got {value}")]
    NegativeTolerance {
        /// Name of the offending configuration field.
        name: &'static str,
        /// The negative value supplied.
        value: f64,
    },
}
