//! The particle-network effect.
//!
//! A grid-seeded field of points drifts around fixed origins, each point
//! drawing lines to its nearest neighbors. Line and dot opacity are banded
//! by distance to a roving target, so the network "wakes up" around the
//! pointer (or around an automatic target when no pointer drives it).

use derive_builder::Builder;
use ordered_float::OrderedFloat;
use rand::Rng;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use thiserror::Error;

use crate::effects::tween::Tween;
use crate::geometry::point::Point;
use crate::render::color::Rgba;
use crate::render::surface::{LineCap, Surface};

/// Squared-distance bands for target proximity, paired with
/// (line opacity, dot opacity). Distances are squared to skip the square
/// root in the hot loop.
const OPACITY_BANDS: [(f64, f64, f64); 3] = [
    (5_000.0, 0.4, 0.6),
    (10_000.0, 0.2, 0.3),
    (30_000.0, 0.1, 0.2),
];
/// Opacities beyond the outermost band.
const FAR_OPACITY: (f64, f64) = (0.05, 0.05);

/// Seconds the automatic target takes to reach each new destination.
const AUTO_TARGET_SECONDS: f64 = 2.0;
/// Viewport inset for automatic target destinations, in pixels.
const AUTO_TARGET_INSET: f64 = 100.0;

/// Configuration for the particle network.
///
/// # Examples
///
/// ```rust
/// use meshlight::effects::NetworkOptionsBuilder;
///
/// let options = NetworkOptionsBuilder::default()
///     .density(16_usize)
///     .neighbor_count(2_usize)
///     .build()
///     .unwrap();
/// assert_eq!(options.density, 16);
/// ```
#[derive(Builder, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[builder(default)]
pub struct NetworkOptions {
    /// Grid cells per axis; the field holds `density * density` points.
    pub density: usize,
    /// Seconds per drift tween (jittered per point unless `sync`).
    pub drift_seconds: f64,
    /// Whether all points drift on the same clock.
    pub sync: bool,
    /// Drift span around each origin, in pixels.
    pub drift_distance: f64,
    /// Connecting-line color (alpha comes from the proximity band).
    pub line_color: Rgba,
    /// Dot color (alpha comes from the proximity band).
    pub dot_color: Rgba,
    /// Dot radius in pixels.
    pub dot_radius: f64,
    /// Connecting-line width in pixels.
    pub line_width: f64,
    /// Nearest neighbors each point connects to.
    pub neighbor_count: usize,
    /// Whether neighbor sets are recomputed every frame.
    pub refresh_neighbors: bool,
    /// Whether the target roves on its own; disable when a pointer feeds
    /// [`NetworkAnimation::set_target`].
    pub auto_rove: bool,
}

impl Default for NetworkOptions {
    fn default() -> Self {
        Self {
            density: 10,
            drift_seconds: 10.0,
            sync: false,
            drift_distance: 100.0,
            line_color: Rgba::opaque(255, 255, 255),
            dot_color: Rgba::opaque(255, 255, 255),
            dot_radius: 20.0,
            line_width: 1.0,
            neighbor_count: 3,
            refresh_neighbors: false,
            auto_rove: true,
        }
    }
}

/// Errors from network construction.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum NetworkError {
    /// A zero density seeds no points.
    #[error("network density must be at least 1")]
    ZeroDensity,
    /// The viewport dimensions are unusable.
    #[error("viewport must have positive finite dimensions, got {width} x {height}")]
    InvalidViewport {
        /// Supplied width.
        width: f64,
        /// Supplied height.
        height: f64,
    },
}

/// One field point with its fixed origin and drift state.
#[derive(Clone, Debug)]
struct NetworkPoint {
    position: Point,
    origin: Point,
    line_opacity: f64,
    dot_opacity: f64,
    neighbors: SmallVec<[usize; 4]>,
    drift: Tween,
}

/// The particle-network animation.
///
/// Owns its point field, target, and randomness source; draws through any
/// [`Surface`].
pub struct NetworkAnimation<R: Rng> {
    width: f64,
    height: f64,
    options: NetworkOptions,
    points: Vec<NetworkPoint>,
    target: Point,
    target_tween: Option<Tween>,
    rng: R,
}

impl<R: Rng> NetworkAnimation<R> {
    /// Seeds the point field: one point per grid cell, jittered uniformly
    /// within the cell, origin fixed at the seeded position.
    ///
    /// # Errors
    ///
    /// [`NetworkError::ZeroDensity`] when `options.density == 0`.
    pub fn new(
        width: f64,
        height: f64,
        options: NetworkOptions,
        mut rng: R,
    ) -> Result<Self, NetworkError> {
        if options.density == 0 {
            return Err(NetworkError::ZeroDensity);
        }
        if !(width.is_finite() && height.is_finite()) || width <= 0.0 || height <= 0.0 {
            return Err(NetworkError::InvalidViewport { width, height });
        }

        let cell_w = width / options.density as f64;
        let cell_h = height / options.density as f64;
        let mut points = Vec::with_capacity(options.density * options.density);
        for gx in 0..options.density {
            for gy in 0..options.density {
                let origin = Point::new(
                    gx as f64 * cell_w + rng.random_range(0.0..cell_w),
                    gy as f64 * cell_h + rng.random_range(0.0..cell_h),
                );
                let drift = Self::drift_tween(origin, origin, &options, &mut rng);
                points.push(NetworkPoint {
                    position: origin,
                    origin,
                    line_opacity: 0.0,
                    dot_opacity: 0.0,
                    neighbors: SmallVec::new(),
                    drift,
                });
            }
        }

        let mut animation = Self {
            width,
            height,
            options,
            points,
            target: Point::new(width / 2.0, height / 2.0),
            target_tween: None,
            rng,
        };
        animation.assign_neighbors();
        Ok(animation)
    }

    fn drift_tween(
        from: Point,
        origin: Point,
        options: &NetworkOptions,
        rng: &mut R,
    ) -> Tween {
        let span = options.drift_distance;
        let to = Point::new(
            origin.x - span / 2.0 + rng.random_range(0.0..span.max(f64::MIN_POSITIVE)),
            origin.y - span / 2.0 + rng.random_range(0.0..span.max(f64::MIN_POSITIVE)),
        );
        let mut seconds = options.drift_seconds;
        if !options.sync {
            seconds -= options.drift_seconds * rng.random_range(0.0..1.0);
        }
        Tween::new(from, to, seconds)
    }

    /// Recomputes each point's `neighbor_count` nearest neighbors by squared
    /// distance.
    pub fn assign_neighbors(&mut self) {
        let positions: Vec<Point> = self.points.iter().map(|p| p.position).collect();
        for (index, point) in self.points.iter_mut().enumerate() {
            let mut order: Vec<usize> = (0..positions.len()).filter(|&j| j != index).collect();
            order.sort_by_key(|&j| OrderedFloat(positions[index].squared_distance_to(&positions[j])));
            order.truncate(self.options.neighbor_count);
            point.neighbors = SmallVec::from_vec(order);
        }
    }

    /// Moves the proximity target (pointer position in a host page).
    pub fn set_target(&mut self, target: Point) {
        self.target = target;
        self.target_tween = None;
    }

    /// The current proximity target.
    #[inline]
    #[must_use]
    pub const fn target(&self) -> Point {
        self.target
    }

    /// Runs one frame: advance drift and target, band opacities, redraw.
    ///
    /// `dt` is the elapsed time since the previous frame, in seconds.
    pub fn frame<S: Surface + ?Sized>(&mut self, surface: &mut S, dt: f64) {
        self.advance(dt);
        self.draw(surface);
    }

    fn advance(&mut self, dt: f64) {
        if self.options.auto_rove {
            let mut tween = self.target_tween.take().unwrap_or_else(|| {
                Tween::new(self.target, self.random_target_destination(), AUTO_TARGET_SECONDS)
            });
            self.target = tween.advance(dt);
            self.target_tween = if tween.is_finished() {
                None
            } else {
                Some(tween)
            };
        }

        for index in 0..self.points.len() {
            let point = &mut self.points[index];
            point.position = point.drift.advance(dt);
            if point.drift.is_finished() {
                let origin = point.origin;
                let from = point.position;
                self.points[index].drift =
                    Self::drift_tween(from, origin, &self.options, &mut self.rng);
            }
        }

        if self.options.refresh_neighbors {
            self.assign_neighbors();
        }

        for point in &mut self.points {
            let squared = point.position.squared_distance_to(&self.target);
            let (line, dot) = OPACITY_BANDS
                .iter()
                .find(|(limit, _, _)| squared < *limit)
                .map_or(FAR_OPACITY, |(_, line, dot)| (*line, *dot));
            point.line_opacity = line;
            point.dot_opacity = dot;
        }
    }

    fn random_target_destination(&mut self) -> Point {
        let max_x = (self.width - 2.0 * AUTO_TARGET_INSET).max(f64::MIN_POSITIVE);
        let max_y = (self.height - 2.0 * AUTO_TARGET_INSET).max(f64::MIN_POSITIVE);
        Point::new(
            AUTO_TARGET_INSET + self.rng.random_range(0.0..max_x),
            AUTO_TARGET_INSET + self.rng.random_range(0.0..max_y),
        )
    }

    fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        surface.clear_rect(Point::ORIGIN, self.width, self.height);

        for point in &self.points {
            if point.line_opacity > 0.0 {
                for &neighbor in &point.neighbors {
                    surface.begin_path();
                    surface.move_to(point.position);
                    surface.set_line_cap(LineCap::Round);
                    surface.set_stroke_color(
                        self.options.line_color.with_alpha(point.line_opacity),
                    );
                    surface.set_line_width(self.options.line_width);
                    surface.line_to(self.points[neighbor].position);
                    surface.stroke();
                }
            }

            if point.dot_opacity > 0.0 {
                surface.begin_path();
                surface.arc(
                    point.position,
                    self.options.dot_radius,
                    0.0,
                    std::f64::consts::TAU,
                );
                surface.set_fill_color(self.options.dot_color.with_alpha(point.dot_opacity));
                surface.fill();
            }
        }
    }

    /// Number of points in the field.
    #[inline]
    #[must_use]
    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    /// Positions of all points.
    #[must_use]
    pub fn positions(&self) -> Vec<Point> {
        self.points.iter().map(|p| p.position).collect()
    }
}
