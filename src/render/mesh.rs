//! Mesh rendering: gradient-filled triangles and glowing lights.
//!
//! Per-triangle render settings (gradient endpoints, opacity) are generated
//! on first draw and memoized in a [`SecondaryMap`] keyed by the triangle's
//! arena key. Keys are generation-tagged, so a style can never be
//! misattributed to a different triangle, no matter how the arena mutated
//! before the first frame.

use derive_builder::Builder;
use rand::Rng;
use serde::{Deserialize, Serialize};
use slotmap::SecondaryMap;

use crate::core::scene::{ENCLOSING_VERTEX_COUNT, Scene};
use crate::core::triangulation::TriangleKey;
use crate::geometry::point::Point;
use crate::geometry::predicates::triangle_contains;
use crate::render::color::Rgba;
use crate::render::lights::LightPool;
use crate::render::surface::{LinearGradient, Surface};

/// Configuration for the mesh background.
///
/// # Examples
///
/// ```rust
/// use meshlight::render::{MeshOptions, MeshOptionsBuilder, Rgba};
///
/// let options = MeshOptionsBuilder::default()
///     .vertex_count(120_usize)
///     .highlight_color(Rgba::opaque(204, 102, 153))
///     .build()
///     .unwrap();
/// assert_eq!(options.vertex_count, 120);
/// assert_eq!(options.max_lights, MeshOptions::default().max_lights);
/// ```
#[derive(Builder, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[builder(default)]
pub struct MeshOptions {
    /// Field vertices seeded into the scene (corners plus interior points).
    pub vertex_count: usize,
    /// Light population cap.
    pub max_lights: usize,
    /// Upper bound of the per-light speed, in pixels per frame.
    pub max_light_speed: f64,
    /// Gradient end color for unlit triangles.
    pub base_color: Rgba,
    /// Gradient end color for triangles containing a light.
    pub highlight_color: Rgba,
    /// Fill color of the light dots.
    pub light_color: Rgba,
    /// Radius of the light dots, in pixels.
    pub light_radius: f64,
    /// Glow (shadow blur) radius around light dots.
    pub light_glow: f64,
    /// Whether triangles are gradient-filled.
    pub fill_triangles: bool,
    /// Stroke color for triangle outlines, `None` to skip stroking.
    pub stroke_color: Option<Rgba>,
}

impl Default for MeshOptions {
    fn default() -> Self {
        Self {
            vertex_count: 80,
            max_lights: 50,
            max_light_speed: 10.0,
            base_color: Rgba::opaque(70, 70, 70),
            highlight_color: Rgba::opaque(153, 102, 204),
            light_color: Rgba::opaque(153, 102, 204),
            light_radius: 5.0,
            light_glow: 30.0,
            fill_triangles: true,
            // Invisible by default; turn the alpha up to debug the mesh.
            stroke_color: Some(Rgba::new(255, 255, 255, 0.0)),
        }
    }
}

/// Memoized render settings of one triangle.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TriangleStyle {
    /// Gradient line start (the triangle's first corner at creation).
    pub gradient_start: Point,
    /// Gradient line end.
    pub gradient_end: Point,
    /// Fill opacity.
    pub opacity: f64,
}

impl TriangleStyle {
    fn generate<R: Rng + ?Sized>(anchor: Point, rng: &mut R) -> Self {
        Self {
            gradient_start: anchor,
            gradient_end: anchor.translated(
                50.0 + rng.random_range(0.0..200.0),
                50.0 + rng.random_range(0.0..200.0),
            ),
            opacity: 0.05 + rng.random_range(0.0..0.2),
        }
    }
}

/// Draws the triangulated background and its lights.
pub struct MeshRenderer {
    options: MeshOptions,
    styles: SecondaryMap<TriangleKey, TriangleStyle>,
}

impl MeshRenderer {
    /// Creates a renderer with an empty style cache.
    #[must_use]
    pub fn new(options: MeshOptions) -> Self {
        Self {
            options,
            styles: SecondaryMap::new(),
        }
    }

    /// The active configuration.
    #[inline]
    #[must_use]
    pub const fn options(&self) -> &MeshOptions {
        &self.options
    }

    /// The memoized style of a triangle, if it has been drawn.
    #[inline]
    #[must_use]
    pub fn style(&self, key: TriangleKey) -> Option<&TriangleStyle> {
        self.styles.get(key)
    }

    /// Draws every visible triangle of the scene.
    ///
    /// Triangles incident to the enclosing seed triangle are scaffolding and
    /// are skipped. A triangle containing any visible light is filled toward
    /// the highlight color, the rest toward the base color; both fade from
    /// black at the memoized opacity.
    pub fn draw_triangles<S, R>(
        &mut self,
        surface: &mut S,
        scene: &Scene,
        lights: &LightPool,
        rng: &mut R,
    ) where
        S: Surface + ?Sized,
        R: Rng + ?Sized,
    {
        let triangulation = scene.triangulation();
        for (key, triangle) in triangulation.triangles() {
            if triangle
                .vertices()
                .iter()
                .any(|&vertex| vertex < ENCLOSING_VERTEX_COUNT)
            {
                continue;
            }

            let [a, b, c] = triangulation.corners(triangle);
            surface.begin_path();
            surface.move_to(a);
            surface.line_to(b);
            surface.line_to(c);
            surface.line_to(a);

            if self.options.fill_triangles {
                let style = match self.styles.get(key) {
                    Some(style) => *style,
                    None => {
                        let style = TriangleStyle::generate(a, rng);
                        self.styles.insert(key, style);
                        style
                    }
                };

                let lit = lights
                    .visible()
                    .any(|light| triangle_contains(&a, &b, &c, &light.position()));
                let color = if lit {
                    self.options.highlight_color
                } else {
                    self.options.base_color
                };

                let gradient = LinearGradient::between(
                    style.gradient_start,
                    style.gradient_end,
                    Rgba::BLACK.with_alpha(style.opacity),
                    color.with_alpha(style.opacity),
                );
                surface.set_fill_gradient(&gradient);
                surface.fill();
            }

            if let Some(stroke) = self.options.stroke_color {
                surface.set_stroke_color(stroke);
                surface.stroke();
            }

            surface.close_path();
        }
    }

    /// Draws every visible light as a glowing dot.
    pub fn draw_lights<S>(&self, surface: &mut S, lights: &LightPool)
    where
        S: Surface + ?Sized,
    {
        for light in lights.visible() {
            surface.set_fill_color(self.options.light_color);
            surface.begin_path();
            surface.arc(
                light.position(),
                self.options.light_radius,
                0.0,
                std::f64::consts::TAU,
            );
            surface.set_shadow(self.options.light_glow, self.options.light_color);
            surface.fill();
            surface.close_path();
        }
        surface.clear_shadow();
    }
}
