//! Data and operations on 2D points.
//!
//! Coordinates are `f64`, matching the drawing-surface contract. Points are
//! plain value types; the only mutation in the crate happens where a point
//! doubles as a moving target (light positions, tweened network points).

use serde::{Deserialize, Serialize};

/// A point in the viewport plane.
///
/// # Examples
///
/// ```rust
/// use meshlight::geometry::Point;
///
/// let p = Point::new(3.0, 4.0);
/// assert_eq!(p.distance_to(&Point::ORIGIN), 5.0);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal coordinate, in pixels.
    pub x: f64,
    /// Vertical coordinate, in pixels.
    pub y: f64,
}

impl Point {
    /// The origin `(0, 0)`.
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

    /// Creates a point from its coordinates.
    #[inline]
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    ///
    /// Uses `f64::hypot` for numerical stability near overflow/underflow.
    #[inline]
    #[must_use]
    pub fn distance_to(&self, other: &Self) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// Squared Euclidean distance to `other`.
    ///
    /// Cheaper than [`distance_to`](Self::distance_to) when only comparisons
    /// are needed (nearest-neighbor ranking, distance banding).
    #[inline]
    #[must_use]
    pub fn squared_distance_to(&self, other: &Self) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        dx * dx + dy * dy
    }

    /// Returns `true` when both coordinates are finite.
    #[inline]
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// The point shifted by `(dx, dy)`.
    #[inline]
    #[must_use]
    pub const fn translated(&self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

impl From<(f64, f64)> for Point {
    #[inline]
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

impl From<Point> for (f64, f64) {
    #[inline]
    fn from(p: Point) -> Self {
        (p.x, p.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn distance_is_symmetric() {
        let a = Point::new(1.0, 2.0);
        let b = Point::new(4.0, 6.0);
        assert_relative_eq!(a.distance_to(&b), b.distance_to(&a));
        assert_relative_eq!(a.distance_to(&b), 5.0);
    }

    #[test]
    fn squared_distance_matches_distance() {
        let a = Point::new(-3.0, 7.5);
        let b = Point::new(2.25, -1.0);
        let d = a.distance_to(&b);
        assert_relative_eq!(a.squared_distance_to(&b), d * d, epsilon = 1e-12);
    }

    #[test]
    fn finiteness_check() {
        assert!(Point::new(0.0, -5.0).is_finite());
        assert!(!Point::new(f64::NAN, 0.0).is_finite());
        assert!(!Point::new(0.0, f64::INFINITY).is_finite());
    }

    #[test]
    fn tuple_conversions_round_trip() {
        let p: Point = (8.0, 9.0).into();
        let (x, y): (f64, f64) = p.into();
        assert_eq!((x, y), (8.0, 9.0));
    }
}
