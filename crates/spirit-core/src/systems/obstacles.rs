//! Obstacle system - advances obstacles, detects collisions, recycles passed ones

use hecs::World;
use log::debug;
use rand::Rng;
use spirit_logic::config::GameConfig;
use spirit_logic::flight::{advance_z, has_passed, within_proximity};

use crate::components::{Obstacle, Position, Vec3};
use crate::generation::lane_point;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ObstacleOutcome {
    /// Id of the obstacle that hit the player, if any.
    pub collided_with: Option<u32>,
    pub recycled: u32,
}

/// Advance every obstacle toward the player.
///
/// Stops at the first collision: obstacles after it in query order are not
/// moved this tick, and the caller must not run any further tick work.
pub fn obstacle_system(
    world: &mut World,
    player: Vec3,
    config: &GameConfig,
    delta: f32,
    rng: &mut impl Rng,
) -> ObstacleOutcome {
    let mut outcome = ObstacleOutcome::default();
    let player = player.to_array();

    for (_, (obstacle, pos)) in world.query_mut::<(&Obstacle, &mut Position)>() {
        pos.0.z = advance_z(pos.0.z, config.obstacle_speed, delta);

        if within_proximity(pos.0.to_array(), player, config.proximity_threshold) {
            outcome.collided_with = Some(obstacle.id);
            return outcome;
        }

        if has_passed(pos.0.z, config.pass_z) {
            pos.0 = lane_point(config.far_z, rng);
            outcome.recycled += 1;
            debug!("obstacle {} recycled to {:?}", obstacle.id, pos.0);
        }
    }

    outcome
}
