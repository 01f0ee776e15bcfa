//! Frame scheduling and the mesh animation driver.
//!
//! Everything is single-threaded and cooperative: the host calls
//! [`MeshAnimation::frame`] once per tick, each call completes before the
//! next is scheduled, and stopping the animation means ceasing to call it.
//! [`FixedIntervalScheduler`] is the bundled fallback for hosts without a
//! vsync-style frame callback: it paces a loop at ~60 Hz with a fixed
//! interval timer.

use std::time::{Duration, Instant};

use rand::Rng;

use crate::core::scene::{Scene, SceneError};
use crate::geometry::point::Point;
use crate::render::lights::LightPool;
use crate::render::mesh::{MeshOptions, MeshRenderer};
use crate::render::surface::Surface;

/// Target frame interval of the fallback scheduler (~60 Hz).
pub const TARGET_FRAME_INTERVAL: Duration = Duration::from_micros(16_667);

/// Paces a frame loop.
///
/// Implementations block until the next frame is due. Hosts with a native
/// frame callback adapt it behind this trait; everyone else uses
/// [`FixedIntervalScheduler`].
pub trait FrameScheduler {
    /// Blocks until the next frame should run.
    fn wait_for_frame(&mut self);
}

/// Fixed-interval fallback scheduler (~16.7 ms per frame by default).
///
/// Deadlines advance by whole intervals from the first call, so a slow frame
/// borrows from the next wait instead of shifting the whole schedule.
#[derive(Clone, Debug)]
pub struct FixedIntervalScheduler {
    interval: Duration,
    deadline: Option<Instant>,
}

impl FixedIntervalScheduler {
    /// Creates a scheduler with a custom interval.
    #[must_use]
    pub const fn new(interval: Duration) -> Self {
        Self {
            interval,
            deadline: None,
        }
    }

    /// The frame interval.
    #[inline]
    #[must_use]
    pub const fn interval(&self) -> Duration {
        self.interval
    }
}

impl Default for FixedIntervalScheduler {
    fn default() -> Self {
        Self::new(TARGET_FRAME_INTERVAL)
    }
}

impl FrameScheduler for FixedIntervalScheduler {
    fn wait_for_frame(&mut self) {
        let now = Instant::now();
        let deadline = self.deadline.unwrap_or(now);
        if deadline > now {
            std::thread::sleep(deadline - now);
        }
        self.deadline = Some(deadline.max(now) + self.interval);
    }
}

// =============================================================================
// MESH ANIMATION
// =============================================================================

/// The animated Delaunay mesh background.
///
/// Owns the scene, the light pool, the renderer with its style cache, and
/// the randomness source. The triangulation is built once in
/// [`new`](Self::new); [`frame`](Self::frame) only draws and moves lights.
///
/// # Examples
///
/// ```rust
/// use meshlight::MeshAnimation;
/// use meshlight::render::{MeshOptions, RecordingSurface};
///
/// let mut animation =
///     MeshAnimation::new(800.0, 600.0, MeshOptions::default(), rand::rng()).unwrap();
/// let mut surface = RecordingSurface::new();
/// animation.frame(&mut surface);
/// assert!(!surface.commands().is_empty());
/// ```
pub struct MeshAnimation<R: Rng> {
    scene: Scene,
    lights: LightPool,
    renderer: MeshRenderer,
    rng: R,
}

impl<R: Rng> MeshAnimation<R> {
    /// Builds the scene and prepares an empty light pool.
    ///
    /// # Errors
    ///
    /// Propagates [`SceneError`] from scene construction; the error surfaces
    /// here, before the first frame, never mid-animation.
    pub fn new(
        width: f64,
        height: f64,
        options: MeshOptions,
        mut rng: R,
    ) -> Result<Self, SceneError> {
        let scene = Scene::generate(width, height, options.vertex_count, &mut rng)?;
        let lights = LightPool::new(options.max_lights, options.max_light_speed);
        let renderer = MeshRenderer::new(options);
        Ok(Self {
            scene,
            lights,
            renderer,
            rng,
        })
    }

    /// Runs one frame: clear, move lights, draw triangles, draw lights.
    ///
    /// Light positions are advanced before the highlight test, so a light
    /// respawned this frame neither highlights a triangle nor draws.
    pub fn frame<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        let width = self.scene.width();
        let height = self.scene.height();

        surface.clear_rect(Point::ORIGIN, width, height);

        self.lights.top_up(width, height, &mut self.rng);
        self.lights.advance(width, height, &mut self.rng);

        self.renderer
            .draw_triangles(surface, &self.scene, &self.lights, &mut self.rng);
        self.renderer.draw_lights(surface, &self.lights);
    }

    /// The generated scene.
    #[inline]
    #[must_use]
    pub const fn scene(&self) -> &Scene {
        &self.scene
    }

    /// The light pool.
    #[inline]
    #[must_use]
    pub const fn lights(&self) -> &LightPool {
        &self.lights
    }

    /// The renderer configuration.
    #[inline]
    #[must_use]
    pub const fn options(&self) -> &MeshOptions {
        self.renderer.options()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::surface::{DrawCommand, RecordingSurface};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn frame_starts_with_a_full_clear() {
        let mut animation = MeshAnimation::new(
            640.0,
            480.0,
            MeshOptions::default(),
            StdRng::seed_from_u64(21),
        )
        .unwrap();
        let mut surface = RecordingSurface::new();
        animation.frame(&mut surface);

        assert_eq!(
            surface.commands()[0],
            DrawCommand::ClearRect(Point::ORIGIN, 640.0, 480.0)
        );
    }

    #[test]
    fn lights_reach_cap_on_first_frame() {
        let mut animation = MeshAnimation::new(
            640.0,
            480.0,
            MeshOptions {
                max_lights: 17,
                ..MeshOptions::default()
            },
            StdRng::seed_from_u64(22),
        )
        .unwrap();
        let mut surface = RecordingSurface::new();
        animation.frame(&mut surface);
        assert_eq!(animation.lights().len(), 17);
    }

    #[test]
    fn lights_never_escape_over_many_frames() {
        let mut animation = MeshAnimation::new(
            300.0,
            200.0,
            MeshOptions::default(),
            StdRng::seed_from_u64(23),
        )
        .unwrap();
        let mut surface = RecordingSurface::new();
        for _ in 0..120 {
            animation.frame(&mut surface);
            for light in animation.lights().all() {
                let p = light.position();
                assert!((0.0..=300.0).contains(&p.x), "x out of bounds: {}", p.x);
                assert!((0.0..=200.0).contains(&p.y), "y out of bounds: {}", p.y);
            }
            surface.clear();
        }
    }

    #[test]
    fn scheduler_paces_without_drift() {
        let mut scheduler = FixedIntervalScheduler::new(Duration::from_millis(1));
        let start = Instant::now();
        for _ in 0..5 {
            scheduler.wait_for_frame();
        }
        // First call is immediate; four waits of 1 ms follow.
        assert!(start.elapsed() >= Duration::from_millis(4));
    }
}
