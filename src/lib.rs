//! # meshlight
//!
//! Frame-driven decorative canvas effects, built around an incremental
//! Delaunay triangulation engine:
//!
//! - an animated **mesh background** ([`MeshAnimation`]): a viewport-sized
//!   Delaunay triangulation drawn with memoized gradient fills, highlighted
//!   by roving light particles;
//! - a **particle network** ([`effects::NetworkAnimation`]): drifting points
//!   connected to their nearest neighbors, fading with distance to a roving
//!   target;
//! - a **typewriter** ([`effects::Typewriter`]): an explicit state machine
//!   typing and backspacing through strings with `^NNN` pause escapes.
//!
//! The crate draws through the [`render::Surface`] trait and paces itself
//! through [`animation::FrameScheduler`]; it owns no platform handles. Hosts
//! bind those traits to a real canvas and frame callback, tests use the
//! bundled [`render::RecordingSurface`].
//!
//! # The mesh core
//!
//! [`core::Triangulation`] builds a triangulation by sequential vertex
//! insertion: triangles whose circumcircle strictly contains the new vertex
//! are subdivided into fans around it, then a prune pass restores the
//! empty-circumcircle property globally. Triangles live in a `slotmap` arena
//! with generation-tagged keys, so per-triangle render state survives
//! insertions and removals without index shifting.
//!
//! ```rust
//! use meshlight::core::Triangulation;
//! use meshlight::geometry::Point;
//!
//! let triangulation = Triangulation::build(vec![
//!     Point::new(0.0, 0.0),
//!     Point::new(10.0, 0.0),
//!     Point::new(5.0, 10.0),
//!     Point::new(5.0, 3.0),
//! ])
//! .unwrap();
//!
//! assert_eq!(triangulation.number_of_triangles(), 3);
//! assert!(triangulation.is_valid().is_ok());
//! ```
//!
//! # A full animation
//!
//! ```rust
//! use meshlight::MeshAnimation;
//! use meshlight::render::{MeshOptionsBuilder, RecordingSurface};
//!
//! let options = MeshOptionsBuilder::default()
//!     .vertex_count(40_usize)
//!     .max_lights(20_usize)
//!     .build()
//!     .unwrap();
//!
//! let mut animation = MeshAnimation::new(800.0, 600.0, options, rand::rng()).unwrap();
//! let mut surface = RecordingSurface::new();
//! for _ in 0..3 {
//!     animation.frame(&mut surface);
//! }
//! assert!(!surface.commands().is_empty());
//! ```
//!
//! # Error handling
//!
//! Construction is where everything can fail, and it fails loudly:
//! insufficient vertices, collinear triples reaching the circumcircle
//! solver, and degenerate numeric results are all typed errors surfaced
//! before the first frame. The per-frame path is infallible by design.

#![forbid(unsafe_code)]

/// Core triangulation data structures and scene seeding.
pub mod core {
    pub mod scene;
    pub mod triangulation;
    pub use scene::*;
    pub use triangulation::*;
}

/// Geometric types and predicates: points, circumcircles, containment.
pub mod geometry {
    pub mod circumcircle;
    pub mod point;
    pub mod predicates;
    pub use circumcircle::*;
    pub use point::*;
    pub use predicates::*;
}

/// Drawing: the surface contract, colors, lights, and the mesh renderer.
pub mod render {
    pub mod color;
    pub mod lights;
    pub mod mesh;
    pub mod surface;
    pub use color::*;
    pub use lights::*;
    pub use mesh::*;
    pub use surface::*;
}

/// Sibling page effects sharing the surface and frame contracts.
pub mod effects {
    pub mod network;
    pub mod tween;
    pub mod typewriter;
    pub use network::*;
    pub use tween::*;
    pub use typewriter::*;
}

pub mod animation;

pub use animation::{FixedIntervalScheduler, FrameScheduler, MeshAnimation};

/// Re-exports of the commonly used types.
pub mod prelude {
    pub use crate::animation::{
        FixedIntervalScheduler, FrameScheduler, MeshAnimation, TARGET_FRAME_INTERVAL,
    };
    pub use crate::core::scene::{Scene, SceneError};
    pub use crate::core::triangulation::{
        Triangle, TriangleKey, Triangulation, TriangulationError, TriangulationValidationError,
    };
    pub use crate::effects::network::{NetworkAnimation, NetworkOptions, NetworkOptionsBuilder};
    pub use crate::effects::typewriter::{
        Typewriter, TypewriterOptions, TypewriterOptionsBuilder, TypewriterPhase,
    };
    pub use crate::geometry::circumcircle::{Circle, CircumcircleError, circumcircle};
    pub use crate::geometry::point::Point;
    pub use crate::geometry::predicates::triangle_contains;
    pub use crate::render::color::Rgba;
    pub use crate::render::lights::{Light, LightPool};
    pub use crate::render::mesh::{MeshOptions, MeshOptionsBuilder, MeshRenderer, TriangleStyle};
    pub use crate::render::surface::{
        DrawCommand, GradientStop, LinearGradient, LineCap, RecordingSurface, Surface,
    };
}
