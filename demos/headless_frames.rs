//! Runs a few headless frames of the mesh animation and prints draw stats.
//!
//! ```bash
//! cargo run --example headless_frames
//! ```

use meshlight::prelude::*;

fn main() -> Result<(), SceneError> {
    let options = MeshOptionsBuilder::default()
        .vertex_count(60_usize)
        .max_lights(30_usize)
        .build()
        .expect("all options have defaults");

    let mut animation = MeshAnimation::new(1280.0, 720.0, options, rand::rng())?;
    let mut scheduler = FixedIntervalScheduler::default();
    let mut surface = RecordingSurface::new();

    println!(
        "scene: {} vertices, {} triangles",
        animation.scene().triangulation().number_of_vertices(),
        animation.scene().triangulation().number_of_triangles(),
    );

    for frame in 0..10 {
        scheduler.wait_for_frame();
        surface.clear();
        animation.frame(&mut surface);
        println!(
            "frame {frame}: {} draw commands, {} visible lights",
            surface.commands().len(),
            animation.lights().visible().count(),
        );
    }

    Ok(())
}
