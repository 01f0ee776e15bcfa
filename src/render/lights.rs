//! Roving light particles.
//!
//! Lights decide which mesh triangles get highlighted; they carry no other
//! state. Each light moves at constant velocity (angle + speed). A light
//! leaving the viewport is respawned at a uniform random interior position
//! and sits out the rest of that frame: it is neither drawn nor counted by
//! the triangle-highlight test until the next advance.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::geometry::point::Point;

/// A single light particle.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Light {
    position: Point,
    angle: f64,
    speed: f64,
    visible: bool,
}

impl Light {
    fn spawn<R: Rng + ?Sized>(width: f64, height: f64, max_speed: f64, rng: &mut R) -> Self {
        Self {
            position: Point::new(rng.random_range(0.0..width), rng.random_range(0.0..height)),
            angle: rng.random_range(0.0..std::f64::consts::TAU),
            speed: rng.random_range(0.0..max_speed.max(f64::MIN_POSITIVE)),
            visible: true,
        }
    }

    /// Current position.
    #[inline]
    #[must_use]
    pub const fn position(&self) -> Point {
        self.position
    }

    /// Heading in radians.
    #[inline]
    #[must_use]
    pub const fn angle(&self) -> f64 {
        self.angle
    }

    /// Distance traveled per frame.
    #[inline]
    #[must_use]
    pub const fn speed(&self) -> f64 {
        self.speed
    }

    /// Whether the light participates in drawing and highlighting this
    /// frame. `false` only on the frame the light respawned.
    #[inline]
    #[must_use]
    pub const fn is_visible(&self) -> bool {
        self.visible
    }
}

/// Owner of the light population.
///
/// Capped at `max_lights`; topped up lazily at the start of every frame so
/// the population reaches the cap without a burst allocation at startup.
#[derive(Clone, Debug)]
pub struct LightPool {
    lights: Vec<Light>,
    max_lights: usize,
    max_speed: f64,
}

impl LightPool {
    /// Creates an empty pool with the given cap and speed range.
    #[must_use]
    pub fn new(max_lights: usize, max_speed: f64) -> Self {
        Self {
            lights: Vec::with_capacity(max_lights),
            max_lights,
            max_speed,
        }
    }

    /// Spawns lights until the population reaches the cap.
    pub fn top_up<R: Rng + ?Sized>(&mut self, width: f64, height: f64, rng: &mut R) {
        while self.lights.len() < self.max_lights {
            self.lights.push(Light::spawn(width, height, self.max_speed, rng));
        }
    }

    /// Advances every light by one frame.
    ///
    /// A light that exits the viewport in either axis is immediately
    /// reassigned a uniform random in-viewport position and marked invisible
    /// for this frame.
    pub fn advance<R: Rng + ?Sized>(&mut self, width: f64, height: f64, rng: &mut R) {
        for light in &mut self.lights {
            light.position.x += light.angle.cos() * light.speed;
            light.position.y += light.angle.sin() * light.speed;

            let out = light.position.x < 0.0
                || light.position.y < 0.0
                || light.position.x > width
                || light.position.y > height;
            if out {
                light.position =
                    Point::new(rng.random_range(0.0..width), rng.random_range(0.0..height));
                light.visible = false;
            } else {
                light.visible = true;
            }
        }
    }

    /// Iterates over the lights participating in this frame.
    pub fn visible(&self) -> impl Iterator<Item = &Light> {
        self.lights.iter().filter(|light| light.visible)
    }

    /// All lights, including ones respawned this frame.
    #[inline]
    #[must_use]
    pub fn all(&self) -> &[Light] {
        &self.lights
    }

    /// Current population.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.lights.len()
    }

    /// Whether the pool holds no lights.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lights.is_empty()
    }

    /// The population cap.
    #[inline]
    #[must_use]
    pub const fn max_lights(&self) -> usize {
        self.max_lights
    }

    #[cfg(test)]
    pub(crate) fn push_for_test(&mut self, position: Point, angle: f64, speed: f64) {
        self.lights.push(Light {
            position,
            angle,
            speed,
            visible: true,
        });
    }
}
