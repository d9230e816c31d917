//! Difficulty system - adds obstacles as session time passes

use hecs::World;
use log::debug;
use rand::Rng;
use spirit_logic::config::GameConfig;
use spirit_logic::flight::{boundaries_crossed, difficulty_spawns};

use crate::components::Obstacle;
use crate::generation::spawn_obstacle;

/// Spawn one far obstacle per spawn-interval boundary crossed between
/// `elapsed_before` and `elapsed_after`, up to the obstacle cap.
///
/// `next_id` is advanced for every obstacle spawned. Returns the spawn count.
pub fn difficulty_system(
    world: &mut World,
    elapsed_before: f32,
    elapsed_after: f32,
    config: &GameConfig,
    next_id: &mut u32,
    rng: &mut impl Rng,
) -> u32 {
    let crossings = boundaries_crossed(elapsed_before, elapsed_after, config.spawn_interval);
    if crossings == 0 {
        return 0;
    }

    let current = world.query::<&Obstacle>().iter().count() as u32;
    let spawns = difficulty_spawns(crossings, current, config.max_obstacles);

    for _ in 0..spawns {
        let id = *next_id;
        *next_id += 1;
        spawn_obstacle(world, id, config.far_z, rng);
        debug!("difficulty spawn: obstacle {} at t={:.2}s", id, elapsed_after);
    }

    spawns
}
