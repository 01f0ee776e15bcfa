//! Incremental Delaunay triangulation over a fixed vertex set.
//!
//! Construction inserts vertices one at a time in vertex-set order:
//!
//! 1. **Subdivide** — every triangle whose circumcircle strictly contains the
//!    new vertex is replaced by the three triangles formed by its edges and
//!    the new vertex, each with a freshly computed circumcircle.
//! 2. **Prune** — any triangle whose circumcircle strictly contains a vertex
//!    other than its own three is dropped, restoring the empty-circumcircle
//!    property globally after each insertion rather than only locally.
//!
//! Triangles live in a [`SlotMap`] arena: removal and insertion are O(1) per
//! entry, and consumers hold generation-tagged [`TriangleKey`]s that can never
//! be silently re-pointed at a different triangle by list splicing.

use rustc_hash::FxHashSet;
use slotmap::{SlotMap, new_key_type};
use smallvec::SmallVec;
use thiserror::Error;

use crate::geometry::circumcircle::{Circle, CircumcircleError, circumcircle};
use crate::geometry::point::Point;

new_key_type! {
    /// Stable, generation-tagged handle to a triangle in the arena.
    pub struct TriangleKey;
}

/// Per-insertion scratch buffer sizes; subdivision touches a handful of
/// triangles in practice.
const STALE_BUFFER: usize = 8;
const CREATED_BUFFER: usize = 24;

// =============================================================================
// TRIANGLE
// =============================================================================

/// One triangle of the mesh: an ordered vertex-index triple paired with its
/// circumcircle.
///
/// The pairing is structural — a triangle cannot exist in the arena without
/// its circumcircle, and both are removed together.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Triangle {
    vertices: [usize; 3],
    circumcircle: Circle,
}

impl Triangle {
    /// The vertex indices of this triangle, in insertion order.
    #[inline]
    #[must_use]
    pub const fn vertices(&self) -> [usize; 3] {
        self.vertices
    }

    /// The circumcircle through this triangle's three vertices.
    #[inline]
    #[must_use]
    pub const fn circumcircle(&self) -> &Circle {
        &self.circumcircle
    }

    /// Returns `true` when `vertex` is one of this triangle's three indices.
    #[inline]
    #[must_use]
    pub fn has_vertex(&self, vertex: usize) -> bool {
        self.vertices.contains(&vertex)
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur while building a triangulation.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum TriangulationError {
    /// Fewer than three vertices were supplied.
    #[error("triangulation requires at least 3 vertices, got {actual}")]
    InsufficientVertices {
        /// Number of vertices actually supplied.
        actual: usize,
    },
    /// A circumcircle solve failed during seeding or insertion.
    #[error("circumcircle computation failed: {0}")]
    Circumcircle(#[from] CircumcircleError),
}

/// Violations reported by [`Triangulation::is_valid`].
#[derive(Clone, Debug, Error, PartialEq)]
pub enum TriangulationValidationError {
    /// A triangle references a vertex index outside the vertex set.
    #[error("triangle {key:?} references vertex {vertex} but only {vertex_count} vertices exist")]
    VertexIndexOutOfRange {
        /// Key of the offending triangle.
        key: TriangleKey,
        /// The out-of-range index.
        vertex: usize,
        /// Size of the vertex set.
        vertex_count: usize,
    },
    /// Two triangles share the same unordered vertex triple.
    #[error("duplicate triangle over vertices {vertices:?}")]
    DuplicateTriangle {
        /// The shared (sorted) vertex triple.
        vertices: [usize; 3],
    },
    /// A stored circumcircle is not equidistant from its triangle's vertices.
    #[error(
        "stored circumcircle of {key:?} deviates from vertex {vertex} by {deviation} (radius {radius})"
    )]
    InconsistentCircumcircle {
        /// Key of the offending triangle.
        key: TriangleKey,
        /// Vertex index at the wrong distance.
        vertex: usize,
        /// Absolute difference between distance and radius.
        deviation: f64,
        /// The stored radius.
        radius: f64,
    },
}

// =============================================================================
// TRIANGULATION
// =============================================================================

/// A triangulation built once over an append-only vertex set.
///
/// Vertex identity is the index into the vertex set for the lifetime of the
/// triangulation. After [`build`](Self::build) returns, the arena is the
/// terminal state: rendering reads it but never rebuilds it.
///
/// # Examples
///
/// ```rust
/// use meshlight::core::Triangulation;
/// use meshlight::geometry::Point;
///
/// let tri = Triangulation::build(vec![
///     Point::new(0.0, 0.0),
///     Point::new(10.0, 0.0),
///     Point::new(5.0, 10.0),
///     Point::new(5.0, 3.0),
/// ])
/// .unwrap();
///
/// // The interior vertex splits the seed triangle into a fan of three.
/// assert_eq!(tri.number_of_triangles(), 3);
/// assert!(tri.is_valid().is_ok());
/// ```
#[derive(Clone, Debug)]
pub struct Triangulation {
    vertices: Vec<Point>,
    triangles: SlotMap<TriangleKey, Triangle>,
}

impl Triangulation {
    /// Builds the triangulation by sequential insertion of every vertex
    /// beyond the seed triple.
    ///
    /// The first three vertices seed the initial triangle; each subsequent
    /// vertex is inserted by subdivision, followed by a global prune (the
    /// prune is skipped for the very first insertion, which cannot have
    /// invalidated earlier work).
    ///
    /// # Errors
    ///
    /// - [`TriangulationError::InsufficientVertices`] for fewer than three
    ///   input points.
    /// - [`TriangulationError::Circumcircle`] when any triple reaching the
    ///   solver is collinear or numerically degenerate. The error surfaces
    ///   before any drawing can observe a partial mesh.
    pub fn build(vertices: Vec<Point>) -> Result<Self, TriangulationError> {
        if vertices.len() < 3 {
            return Err(TriangulationError::InsufficientVertices {
                actual: vertices.len(),
            });
        }

        let mut triangulation = Self {
            vertices,
            triangles: SlotMap::with_key(),
        };

        let seed = Triangle {
            vertices: [0, 1, 2],
            circumcircle: circumcircle(
                &triangulation.vertices[0],
                &triangulation.vertices[1],
                &triangulation.vertices[2],
            )?,
        };
        triangulation.triangles.insert(seed);

        for index in 3..triangulation.vertices.len() {
            triangulation.subdivide_around(index)?;
            if index > 3 {
                triangulation.prune_invalidated(index);
            }
        }

        Ok(triangulation)
    }

    /// Replaces every triangle whose circumcircle strictly contains the
    /// vertex at `index` with the fan of three triangles formed by its edges
    /// and that vertex.
    ///
    /// All new circumcircles are computed before the arena is touched, so a
    /// failed solve leaves the triangulation unchanged.
    fn subdivide_around(&mut self, index: usize) -> Result<(), TriangulationError> {
        let vertex = self.vertices[index];

        let stale: SmallVec<[TriangleKey; STALE_BUFFER]> = self
            .triangles
            .iter()
            .filter(|(_, triangle)| triangle.circumcircle.strictly_contains(&vertex))
            .map(|(key, _)| key)
            .collect();

        let mut created: SmallVec<[Triangle; CREATED_BUFFER]> = SmallVec::new();
        for &key in &stale {
            let [a, b, c] = self.triangles[key].vertices;
            for (first, second) in [(a, b), (b, c), (c, a)] {
                created.push(Triangle {
                    vertices: [first, second, index],
                    circumcircle: circumcircle(
                        &self.vertices[first],
                        &self.vertices[second],
                        &vertex,
                    )?,
                });
            }
        }

        for key in stale {
            self.triangles.remove(key);
        }
        let created_count = created.len();
        for triangle in created {
            self.triangles.insert(triangle);
        }

        tracing::debug!(
            vertex = index,
            subdivided = created_count / 3,
            created = created_count,
            "inserted vertex"
        );
        Ok(())
    }

    /// Drops every triangle whose circumcircle strictly contains a vertex of
    /// index `0..=last_inserted` other than its own three.
    ///
    /// Subdivision is only locally correct: a triangle created by an earlier
    /// insertion can be invalidated by a later vertex without its circle ever
    /// containing that vertex's subdivision fan. This pass enforces the
    /// empty-circumcircle property over all vertices inserted so far.
    fn prune_invalidated(&mut self, last_inserted: usize) {
        let stale: SmallVec<[TriangleKey; STALE_BUFFER]> = self
            .triangles
            .iter()
            .filter(|(_, triangle)| {
                (0..=last_inserted).any(|vertex| {
                    !triangle.has_vertex(vertex)
                        && triangle
                            .circumcircle
                            .strictly_contains(&self.vertices[vertex])
                })
            })
            .map(|(key, _)| key)
            .collect();

        if stale.is_empty() {
            return;
        }
        tracing::debug!(
            vertex = last_inserted,
            pruned = stale.len(),
            "pruned invalidated triangles"
        );
        for key in stale {
            self.triangles.remove(key);
        }
    }

    // =========================================================================
    // ACCESSORS
    // =========================================================================

    /// The vertex set, in insertion order.
    #[inline]
    #[must_use]
    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    /// Number of vertices in the triangulation.
    #[inline]
    #[must_use]
    pub fn number_of_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Number of triangles currently in the arena.
    #[inline]
    #[must_use]
    pub fn number_of_triangles(&self) -> usize {
        self.triangles.len()
    }

    /// Iterates over `(key, triangle)` pairs in the arena.
    pub fn triangles(&self) -> impl Iterator<Item = (TriangleKey, &Triangle)> {
        self.triangles.iter()
    }

    /// Looks up a triangle by key.
    #[inline]
    #[must_use]
    pub fn get(&self, key: TriangleKey) -> Option<&Triangle> {
        self.triangles.get(key)
    }

    /// The corner positions of a triangle, in vertex order.
    #[inline]
    #[must_use]
    pub fn corners(&self, triangle: &Triangle) -> [Point; 3] {
        let [a, b, c] = triangle.vertices;
        [self.vertices[a], self.vertices[b], self.vertices[c]]
    }

    /// The triangle list flattened to vertex-index triples, stride 3.
    ///
    /// Arena order; each consecutive triple names one triangle. The length is
    /// always `3 * number_of_triangles()`.
    #[must_use]
    pub fn triangle_indices(&self) -> Vec<usize> {
        let mut indices = Vec::with_capacity(3 * self.triangles.len());
        for (_, triangle) in self.triangles.iter() {
            indices.extend_from_slice(&triangle.vertices);
        }
        indices
    }

    // =========================================================================
    // VALIDATION
    // =========================================================================

    /// Checks structural invariants of the arena.
    ///
    /// Verifies that every referenced vertex index is in range, that no
    /// unordered vertex triple appears twice, and that each stored
    /// circumcircle is equidistant from its triangle's three corners within
    /// a scale-aware `1e-6` relative slack.
    ///
    /// # Errors
    ///
    /// Returns the first [`TriangulationValidationError`] found.
    pub fn is_valid(&self) -> Result<(), TriangulationValidationError> {
        const CIRCUMCIRCLE_SLACK: f64 = 1e-6;

        let mut seen: FxHashSet<[usize; 3]> = FxHashSet::default();
        for (key, triangle) in self.triangles.iter() {
            for vertex in triangle.vertices {
                if vertex >= self.vertices.len() {
                    return Err(TriangulationValidationError::VertexIndexOutOfRange {
                        key,
                        vertex,
                        vertex_count: self.vertices.len(),
                    });
                }
            }

            let mut sorted = triangle.vertices;
            sorted.sort_unstable();
            if !seen.insert(sorted) {
                return Err(TriangulationValidationError::DuplicateTriangle { vertices: sorted });
            }

            let circle = triangle.circumcircle;
            for vertex in triangle.vertices {
                let deviation =
                    (circle.center.distance_to(&self.vertices[vertex]) - circle.radius).abs();
                // Scale-aware slack: big viewport circles accumulate more
                // rounding than unit-scale ones.
                if deviation > CIRCUMCIRCLE_SLACK * circle.radius.max(1.0) {
                    return Err(TriangulationValidationError::InconsistentCircumcircle {
                        key,
                        vertex,
                        deviation,
                        radius: circle.radius,
                    });
                }
            }
        }
        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn seed_points() -> Vec<Point> {
        vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(5.0, 10.0),
        ]
    }

    #[test]
    fn too_few_vertices_is_an_error() {
        let result = Triangulation::build(vec![Point::ORIGIN, Point::new(1.0, 0.0)]);
        assert_eq!(
            result.unwrap_err(),
            TriangulationError::InsufficientVertices { actual: 2 }
        );
    }

    #[test]
    fn collinear_seed_is_an_error() {
        let result = Triangulation::build(vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(2.0, 0.0),
        ]);
        assert!(matches!(
            result,
            Err(TriangulationError::Circumcircle(
                CircumcircleError::Collinear { .. }
            ))
        ));
    }

    #[test]
    fn seed_triangle_only() {
        let tri = Triangulation::build(seed_points()).unwrap();
        assert_eq!(tri.number_of_triangles(), 1);
        let (_, seed) = tri.triangles().next().unwrap();
        assert_eq!(seed.vertices(), [0, 1, 2]);
        assert_relative_eq!(seed.circumcircle().center.x, 5.0);
        assert_relative_eq!(seed.circumcircle().center.y, 3.75);
        assert_relative_eq!(seed.circumcircle().radius, 6.25, epsilon = 1e-12);
    }

    #[test]
    fn interior_vertex_splits_seed_into_fan() {
        let mut points = seed_points();
        points.push(Point::new(5.0, 3.0));
        let tri = Triangulation::build(points).unwrap();

        assert_eq!(tri.number_of_triangles(), 3);
        for (_, triangle) in tri.triangles() {
            assert!(triangle.has_vertex(3), "every fan triangle shares vertex 3");
            assert_ne!(triangle.vertices(), [0, 1, 2], "seed triangle is gone");
        }
        assert!(tri.is_valid().is_ok());
    }

    #[test]
    fn flattened_indices_pair_with_circles() {
        let mut points = seed_points();
        points.push(Point::new(5.0, 3.0));
        points.push(Point::new(4.0, 5.0));
        let tri = Triangulation::build(points).unwrap();

        assert_eq!(
            tri.triangle_indices().len(),
            3 * tri.number_of_triangles(),
            "flattened list is stride 3 over the arena"
        );
    }

    #[test]
    fn every_index_in_range_and_no_duplicates() {
        let mut points = seed_points();
        for (x, y) in [(5.0, 3.0), (2.0, 2.0), (7.0, 2.5), (5.0, 6.0)] {
            points.push(Point::new(x, y));
        }
        let tri = Triangulation::build(points).unwrap();
        assert!(tri.is_valid().is_ok());
        let count = tri.number_of_vertices();
        for index in tri.triangle_indices() {
            assert!(index < count);
        }
    }

    #[test]
    fn empty_circumcircle_property_holds() {
        let mut points = seed_points();
        for (x, y) in [(5.0, 3.0), (2.0, 2.0), (7.0, 2.5), (5.0, 6.0), (3.5, 4.0)] {
            points.push(Point::new(x, y));
        }
        let tri = Triangulation::build(points).unwrap();

        for (_, triangle) in tri.triangles() {
            for (index, vertex) in tri.vertices().iter().enumerate() {
                if !triangle.has_vertex(index) {
                    assert!(
                        !triangle.circumcircle().strictly_contains(vertex),
                        "vertex {index} sits inside the circumcircle of {:?}",
                        triangle.vertices()
                    );
                }
            }
        }
    }

    #[test]
    fn keys_stay_valid_across_unrelated_removals() {
        // Arena handles are generation-tagged: a key taken before later
        // insertions still resolves to the same triangle if it survived.
        let mut points = seed_points();
        points.push(Point::new(5.0, 3.0));
        let tri = Triangulation::build(points).unwrap();

        let snapshot: Vec<(TriangleKey, [usize; 3])> = tri
            .triangles()
            .map(|(key, triangle)| (key, triangle.vertices()))
            .collect();
        for (key, vertices) in snapshot {
            assert_eq!(tri.get(key).unwrap().vertices(), vertices);
        }
    }
}
