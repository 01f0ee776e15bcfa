//! Circumcircle computation for triangles.
//!
//! The circumcircle of three non-collinear points is the unique circle
//! passing through all three. It is computed here with the closed-form
//! intersection of two perpendicular bisectors; the denominator of that form
//! is twice the signed area of the triangle, so collinear input has no
//! solution and is rejected up front.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geometry::point::Point;

/// A circle given by center and radius.
///
/// Produced only by [`circumcircle`]; triangle slots in the mesh own one
/// circle each.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    /// Center of the circle.
    pub center: Point,
    /// Radius of the circle.
    pub radius: f64,
}

impl Circle {
    /// Returns `true` when `point` lies strictly inside the disk.
    ///
    /// A point exactly on the circle is treated as outside (strict `<`).
    /// Ties are not broken specially; for nearly-cocircular input this can
    /// under- or over-report containment, which the insertion algorithm
    /// tolerates.
    #[inline]
    #[must_use]
    pub fn strictly_contains(&self, point: &Point) -> bool {
        point.distance_to(&self.center) < self.radius
    }
}

/// Errors from the circumcircle solver.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum CircumcircleError {
    /// The three points are collinear; no circumcircle exists.
    #[error("collinear points have no circumcircle: ({a:?}, {b:?}, {c:?})")]
    Collinear {
        /// First point of the triple.
        a: Point,
        /// Second point of the triple.
        b: Point,
        /// Third point of the triple.
        c: Point,
    },
    /// The solve produced a non-finite center or radius.
    ///
    /// Caught after the solve so that degenerate numerics are reported with
    /// a diagnostic instead of leaking NaN/infinite geometry into rendering.
    #[error("circumcircle solve produced a non-finite result: center {center:?}, radius {radius}")]
    NonFinite {
        /// The computed (invalid) center.
        center: Point,
        /// The computed (invalid) radius.
        radius: f64,
    },
}

/// Computes the circumcircle of the triangle `(a, b, c)`.
///
/// # Errors
///
/// - [`CircumcircleError::Collinear`] when the points have zero signed area.
/// - [`CircumcircleError::NonFinite`] when the result is numerically
///   degenerate despite the collinearity check (extremely thin triangles).
///
/// Near-collinear triples that survive both checks yield very large but
/// finite circles; callers avoid them by vertex generation policy rather
/// than by tolerance here.
///
/// # Examples
///
/// ```rust
/// use meshlight::geometry::{circumcircle, Point};
///
/// let circle = circumcircle(
///     &Point::new(0.0, 0.0),
///     &Point::new(10.0, 0.0),
///     &Point::new(5.0, 10.0),
/// )
/// .unwrap();
/// assert_eq!(circle.center, Point::new(5.0, 3.75));
/// assert!((circle.radius - 6.25).abs() < 1e-12);
/// ```
pub fn circumcircle(a: &Point, b: &Point, c: &Point) -> Result<Circle, CircumcircleError> {
    // Twice the signed area of (a, b, c).
    let denom = 2.0 * ((b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x));
    if denom == 0.0 {
        return Err(CircumcircleError::Collinear {
            a: *a,
            b: *b,
            c: *c,
        });
    }

    let ab = b.x * b.x - a.x * a.x + b.y * b.y - a.y * a.y;
    let ac = c.x * c.x - a.x * a.x + c.y * c.y - a.y * a.y;

    let center = Point::new(
        ((c.y - a.y) * ab + (a.y - b.y) * ac) / denom,
        ((a.x - c.x) * ab + (b.x - a.x) * ac) / denom,
    );
    let radius = center.distance_to(a);

    if !center.is_finite() || !radius.is_finite() {
        return Err(CircumcircleError::NonFinite { center, radius });
    }

    Ok(Circle { center, radius })
}
