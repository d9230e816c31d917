//! Obstacle and collectible layout generation

use hecs::{Entity, World};
use rand::Rng;
use spirit_logic::config::GameConfig;
use spirit_logic::constants::spawn::{
    COLLECTIBLE_START_Z, COLLECTIBLE_STRIDE, OBSTACLE_START_Z, OBSTACLE_STRIDE,
};
use spirit_logic::flight::{lane_position, obstacle_scale, row_z};

use crate::components::*;

/// Random lane point at depth `z`.
pub fn lane_point(z: f32, rng: &mut impl Rng) -> Vec3 {
    let (x, y) = lane_position(rng.gen::<f32>(), rng.gen::<f32>());
    Vec3::new(x, y, z)
}

/// Spawn one obstacle with a random lane position and scale.
pub fn spawn_obstacle(world: &mut World, id: u32, z: f32, rng: &mut impl Rng) -> Entity {
    let position = Position(lane_point(z, rng));
    let scale = obstacle_scale(rng.gen::<f32>());
    world.spawn((Obstacle { id, scale }, position))
}

/// Spawn one uncollected collectible with a random lane position.
pub fn spawn_collectible(world: &mut World, id: u32, z: f32, rng: &mut impl Rng) -> Entity {
    let position = Position(lane_point(z, rng));
    world.spawn((Collectible::new(id), position))
}

/// Generate the starting rows: obstacles from z=-20 every 10 units,
/// collectibles from z=-15 every 5 units.
///
/// Returns the next free obstacle id.
pub fn generate_layout(world: &mut World, config: &GameConfig, rng: &mut impl Rng) -> u32 {
    for i in 0..config.initial_obstacles {
        spawn_obstacle(world, i, row_z(OBSTACLE_START_Z, OBSTACLE_STRIDE, i), rng);
    }

    for i in 0..config.initial_collectibles {
        spawn_collectible(
            world,
            i,
            row_z(COLLECTIBLE_START_Z, COLLECTIBLE_STRIDE, i),
            rng,
        );
    }

    config.initial_obstacles
}
