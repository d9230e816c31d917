//! Flight-game components: obstacles and collectibles.
//!
//! Both are recycled in place: passing the player rewrites `Position` (and
//! resets `collected`) instead of despawning the entity.

use serde::{Deserialize, Serialize};

/// Something the player must avoid. Touching it ends the session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    /// Uniform render scale, 1.0 to 2.0. Does not affect collision.
    pub scale: f32,
}

/// A magical orb worth points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Collectible {
    pub id: u32,
    /// Picked up this cycle; hidden and ineligible until recycled.
    pub collected: bool,
}

impl Collectible {
    pub fn new(id: u32) -> Self {
        Self {
            id,
            collected: false,
        }
    }

    pub fn is_visible(&self) -> bool {
        !self.collected
    }
}
