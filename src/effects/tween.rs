//! Exponential ease-in/out position tweens.

use crate::geometry::point::Point;

/// A point moving from `from` to `to` over a fixed duration with
/// exponential ease-in/out.
///
/// Durations are in seconds; [`advance`](Self::advance) is fed the frame
/// delta. A non-positive duration completes on the first advance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tween {
    from: Point,
    to: Point,
    duration: f64,
    elapsed: f64,
}

impl Tween {
    /// Creates a tween.
    #[must_use]
    pub const fn new(from: Point, to: Point, duration: f64) -> Self {
        Self {
            from,
            to,
            duration,
            elapsed: 0.0,
        }
    }

    /// Advances by `dt` seconds and returns the new position.
    pub fn advance(&mut self, dt: f64) -> Point {
        self.elapsed += dt.max(0.0);
        self.position()
    }

    /// The current position.
    #[must_use]
    pub fn position(&self) -> Point {
        let progress = if self.duration <= 0.0 {
            1.0
        } else {
            (self.elapsed / self.duration).clamp(0.0, 1.0)
        };
        let eased = ease_in_out_expo(progress);
        Point::new(
            self.from.x + (self.to.x - self.from.x) * eased,
            self.from.y + (self.to.y - self.from.y) * eased,
        )
    }

    /// The destination of the tween.
    #[inline]
    #[must_use]
    pub const fn destination(&self) -> Point {
        self.to
    }

    /// Whether the tween has reached its destination.
    #[inline]
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.duration <= 0.0 || self.elapsed >= self.duration
    }
}

/// Exponential ease-in/out: slow start, fast middle, slow stop.
fn ease_in_out_expo(t: f64) -> f64 {
    if t <= 0.0 {
        0.0
    } else if t >= 1.0 {
        1.0
    } else if t < 0.5 {
        2.0_f64.powf(20.0 * t - 10.0) / 2.0
    } else {
        (2.0 - 2.0_f64.powf(-20.0 * t + 10.0)) / 2.0
    }
}
