//! Scene description handed to the render surface each frame.
//!
//! The session owns no rendering state; a host turns a `SceneFrame` into
//! meshes however it likes. Collected orbs are left out.

use serde::{Deserialize, Serialize};
use spirit_logic::constants::camera::{BASE_Y, BASE_Z, FOLLOW_X, FOLLOW_Y, FOV_DEGREES};
use spirit_logic::session::SessionState;

use crate::components::Vec3;
use crate::engine::GameSession;

/// Perspective camera that loosely follows the player.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraPose {
    pub position: Vec3,
    pub fov_degrees: f32,
}

impl CameraPose {
    pub fn follow(player: Vec3) -> Self {
        Self {
            position: Vec3::new(
                player.x * FOLLOW_X,
                BASE_Y + player.y * FOLLOW_Y,
                BASE_Z,
            ),
            fov_degrees: FOV_DEGREES,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObstacleView {
    pub id: u32,
    pub position: Vec3,
    pub scale: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CollectibleView {
    pub id: u32,
    pub position: Vec3,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneFrame {
    pub state: SessionState,
    pub score: u64,
    pub camera: CameraPose,
    pub player: Vec3,
    pub obstacles: Vec<ObstacleView>,
    /// Only orbs that have not been collected this cycle.
    pub collectibles: Vec<CollectibleView>,
}

impl SceneFrame {
    pub fn capture(session: &GameSession) -> Self {
        let player = session.player();
        Self {
            state: session.state(),
            score: session.score(),
            camera: CameraPose::follow(player),
            player,
            obstacles: session
                .obstacles()
                .into_iter()
                .map(|(o, position)| ObstacleView {
                    id: o.id,
                    position,
                    scale: o.scale,
                })
                .collect(),
            collectibles: session
                .collectibles()
                .into_iter()
                .filter(|(c, _)| c.is_visible())
                .map(|(c, position)| CollectibleView { id: c.id, position })
                .collect(),
        }
    }
}
