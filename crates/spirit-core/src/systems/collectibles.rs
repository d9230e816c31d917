//! Collectible system - advances orbs, awards pickups, recycles passed ones

use hecs::World;
use log::debug;
use rand::Rng;
use spirit_logic::config::GameConfig;
use spirit_logic::flight::{advance_z, has_passed, within_proximity};

use crate::components::{Collectible, Position, Vec3};
use crate::generation::lane_point;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectOutcome {
    /// Points earned this tick, applied once by the caller.
    pub points: u64,
    /// Ids picked up this tick.
    pub collected: Vec<u32>,
    pub recycled: u32,
}

/// Advance every collectible and award pickups.
///
/// Collected orbs keep flying (hidden) so they eventually pass the player and
/// are recycled with the flag cleared; until then they cannot score again.
pub fn collectible_system(
    world: &mut World,
    player: Vec3,
    config: &GameConfig,
    delta: f32,
    rng: &mut impl Rng,
) -> CollectOutcome {
    let mut outcome = CollectOutcome::default();
    let player = player.to_array();

    for (_, (collectible, pos)) in world.query_mut::<(&mut Collectible, &mut Position)>() {
        pos.0.z = advance_z(pos.0.z, config.collectible_speed, delta);

        if !collectible.collected
            && within_proximity(pos.0.to_array(), player, config.proximity_threshold)
        {
            collectible.collected = true;
            outcome.points += config.collectible_points;
            outcome.collected.push(collectible.id);
            continue;
        }

        if has_passed(pos.0.z, config.pass_z) {
            pos.0 = lane_point(config.far_z, rng);
            collectible.collected = false;
            outcome.recycled += 1;
            debug!("collectible {} recycled to {:?}", collectible.id, pos.0);
        }
    }

    outcome
}
