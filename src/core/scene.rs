//! Viewport-driven vertex seeding for the mesh background.
//!
//! The vertex set is fixed at setup: an enclosing triangle covering the
//! whole viewport, the four viewport corners, a batch of uniform random
//! interior points, and one reserved roving vertex. The triangulation is
//! built once from that set; per-frame work is drawing and light motion only.

use rand::Rng;
use thiserror::Error;

use crate::core::triangulation::{Triangulation, TriangulationError};
use crate::geometry::point::Point;

/// Number of vertices forming the enclosing triangle. Triangles incident to
/// these are scaffolding and are skipped by the renderer.
pub const ENCLOSING_VERTEX_COUNT: usize = 3;

/// Minimum accepted field vertex count: the four viewport corners.
pub const MIN_FIELD_VERTICES: usize = 4;

/// Errors from scene construction.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum SceneError {
    /// The viewport dimensions are unusable.
    #[error("viewport must have positive finite dimensions, got {width} x {height}")]
    InvalidViewport {
        /// Supplied width.
        width: f64,
        /// Supplied height.
        height: f64,
    },
    /// Fewer field vertices than the four viewport corners.
    #[error("scene needs at least {MIN_FIELD_VERTICES} field vertices, got {actual}")]
    TooFewVertices {
        /// Requested field vertex count.
        actual: usize,
    },
    /// Triangulation construction failed.
    #[error(transparent)]
    Triangulation(#[from] TriangulationError),
}

/// A triangulated viewport: the terminal triangle arena plus the indices the
/// renderer needs to interpret it.
#[derive(Clone, Debug)]
pub struct Scene {
    width: f64,
    height: f64,
    triangulation: Triangulation,
    roving_index: usize,
}

impl Scene {
    /// Seeds the vertex set and builds the triangulation.
    ///
    /// `field_vertices` counts the corners-plus-interior points (the
    /// enclosing triangle and the roving vertex are added on top). Interior
    /// points are drawn uniformly from the viewport using `rng`.
    ///
    /// # Errors
    ///
    /// - [`SceneError::InvalidViewport`] for non-positive or non-finite
    ///   dimensions.
    /// - [`SceneError::TooFewVertices`] when `field_vertices < 4`.
    /// - [`SceneError::Triangulation`] when construction hits a degenerate
    ///   triple; random interior seeding makes this improbable but it stays
    ///   a reportable error rather than a panic.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use meshlight::core::Scene;
    ///
    /// let mut rng = rand::rng();
    /// let scene = Scene::generate(800.0, 600.0, 80, &mut rng).unwrap();
    /// assert_eq!(scene.triangulation().number_of_vertices(), 84);
    /// ```
    pub fn generate<R: Rng + ?Sized>(
        width: f64,
        height: f64,
        field_vertices: usize,
        rng: &mut R,
    ) -> Result<Self, SceneError> {
        if !(width.is_finite() && height.is_finite()) || width <= 0.0 || height <= 0.0 {
            return Err(SceneError::InvalidViewport { width, height });
        }
        if field_vertices < MIN_FIELD_VERTICES {
            return Err(SceneError::TooFewVertices {
                actual: field_vertices,
            });
        }

        let mut vertices = Vec::with_capacity(field_vertices + ENCLOSING_VERTEX_COUNT + 1);

        // Enclosing triangle: circumscribes the bounding circle of the
        // viewport rectangle, so every later vertex falls inside the seed
        // triangle's interior.
        let radius = width.hypot(height) / 2.0;
        let center = Point::new(width / 2.0, height / 2.0);
        vertices.push(Point::new(
            center.x - 3.0_f64.sqrt() * radius,
            center.y - radius,
        ));
        vertices.push(Point::new(
            center.x + 3.0_f64.sqrt() * radius,
            center.y - radius,
        ));
        vertices.push(Point::new(center.x, center.y + 2.0 * radius));

        // Viewport corners pin the mesh to the visible edges.
        vertices.push(Point::new(0.0, 0.0));
        vertices.push(Point::new(width, 0.0));
        vertices.push(Point::new(0.0, height));
        vertices.push(Point::new(width, height));

        for _ in 0..field_vertices - MIN_FIELD_VERTICES {
            vertices.push(Point::new(
                rng.random_range(0.0..width),
                rng.random_range(0.0..height),
            ));
        }

        // Reserved roving vertex, seeded at the viewport center.
        let roving_index = vertices.len();
        vertices.push(center);

        let triangulation = Triangulation::build(vertices)?;
        tracing::debug!(
            width,
            height,
            vertices = triangulation.number_of_vertices(),
            triangles = triangulation.number_of_triangles(),
            "scene generated"
        );

        Ok(Self {
            width,
            height,
            triangulation,
            roving_index,
        })
    }

    /// Viewport width in pixels.
    #[inline]
    #[must_use]
    pub const fn width(&self) -> f64 {
        self.width
    }

    /// Viewport height in pixels.
    #[inline]
    #[must_use]
    pub const fn height(&self) -> f64 {
        self.height
    }

    /// The built triangulation.
    #[inline]
    #[must_use]
    pub const fn triangulation(&self) -> &Triangulation {
        &self.triangulation
    }

    /// Index of the reserved roving vertex (the last one seeded).
    #[inline]
    #[must_use]
    pub const fn roving_index(&self) -> usize {
        self.roving_index
    }
}
