//! Comet Field headless demo
//!
//! Runs the generation engine against the in-memory world with a synthetic
//! experience ramp: the field scrolls past, out-of-bounds entities despawn,
//! and the spawners keep density at target while the difficulty climbs.

use glam::Vec2;

use comet_field::consts::SIM_DT;
use comet_field::generation::{LevelGeneration, Rect};
use comet_field::world::FieldWorld;
use comet_field::GenerationConfig;

/// Downward scroll speed standing in for the comet's upward flight
const SCROLL_SPEED: f32 = 12.0;
/// Experience income per second of play; high enough to walk the demo
/// through every difficulty band
const XP_PER_SECOND: f32 = 300.0;
/// Demo length in simulated seconds
const DEMO_SECONDS: u32 = 120;

fn main() {
    env_logger::init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(0x5EED);

    let config = GenerationConfig::default();
    let mut world = FieldWorld::new();
    let mut generation = match LevelGeneration::new(config, seed) {
        Ok(generation) => generation,
        Err(err) => {
            log::error!("invalid generation config: {err}");
            std::process::exit(1);
        }
    };

    log::info!("seed {seed}, {DEMO_SECONDS}s at {:.0} Hz", 1.0 / SIM_DT);
    generation.start(&mut world);

    // Everything below the despawn line has scrolled off the field
    let play_bounds = Rect::new(Vec2::new(-200.0, -40.0), Vec2::new(200.0, 700.0));

    let mut xp = 0.0f32;
    let ticks = (DEMO_SECONDS as f32 / SIM_DT) as u32;
    for t in 0..ticks {
        xp += XP_PER_SECOND * SIM_DT;
        generation.update_level(xp);
        generation.tick(&mut world);

        world.drift(Vec2::new(0.0, -SCROLL_SPEED) * SIM_DT);
        let culled = world.cull_outside(play_bounds);
        if culled > 0 {
            log::trace!("culled {culled} off-field entities");
        }

        if t % (ticks / 12) == 0 {
            log::info!(
                "t={:>3}s level={:>2} band={} field={} requested={}",
                (t as f32 * SIM_DT) as u32,
                generation.level(),
                generation.active_category_name(),
                world.len(),
                generation.entities_requested()
            );
        }
    }

    log::info!(
        "done: level {} after {xp:.0} xp, {} spawn requests, {} roster rebuilds, {} entities live",
        generation.level(),
        generation.entities_requested(),
        generation.roster_rebuilds(),
        world.len()
    );
}
