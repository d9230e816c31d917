//! Save/Load functionality for suspending and resuming a session
//!
//! Uses bincode for compact binary serialization. Entities are flattened to
//! plain component tuples then respawned on load.

use hecs::World;
use serde::{Deserialize, Serialize};
use spirit_logic::config::{ConfigError, GameConfig};
use spirit_logic::session::SessionState;
use std::io::{Read, Write};
use thiserror::Error;

use crate::components::*;

/// Version number for snapshot format (increment when format changes)
const SAVE_VERSION: u32 = 1;

/// Serializable snapshot of a session
#[derive(Serialize, Deserialize)]
pub struct SaveData {
    /// Snapshot format version
    pub version: u32,
    pub state: SessionState,
    pub score: u64,
    pub elapsed: f32,
    pub player: Vec3,
    pub next_obstacle_id: u32,
    pub config: GameConfig,
    pub obstacles: Vec<(Obstacle, Position)>,
    pub collectibles: Vec<(Collectible, Position)>,
}

/// Errors that can occur during save/load
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Bincode(#[from] Box<bincode::ErrorKind>),
    #[error("Save version mismatch: expected {expected}, found {found}")]
    VersionMismatch { expected: u32, found: u32 },
    #[error("Snapshot carries invalid tuning: {0}")]
    InvalidConfig(#[from] ConfigError),
    #[error("Snapshot player at ({x}, {y}) lies outside the play area")]
    PlayerOutOfBounds { x: f32, y: f32 },
}

/// Save a session to a writer
#[allow(clippy::too_many_arguments)]
pub fn save_session<W: Write>(
    writer: W,
    state: SessionState,
    score: u64,
    elapsed: f32,
    player: Vec3,
    next_obstacle_id: u32,
    config: &GameConfig,
    world: &World,
) -> Result<(), SaveError> {
    let save_data = SaveData {
        version: SAVE_VERSION,
        state,
        score,
        elapsed,
        player,
        next_obstacle_id,
        config: config.clone(),
        obstacles: world
            .query::<(&Obstacle, &Position)>()
            .iter()
            .map(|(_, (o, p))| (*o, *p))
            .collect(),
        collectibles: world
            .query::<(&Collectible, &Position)>()
            .iter()
            .map(|(_, (c, p))| (*c, *p))
            .collect(),
    };

    bincode::serialize_into(writer, &save_data)?;
    Ok(())
}

/// Load a session from a reader
pub fn load_session<R: Read>(reader: R) -> Result<LoadedSession, SaveError> {
    let save_data: SaveData = bincode::deserialize_from(reader)?;

    if save_data.version != SAVE_VERSION {
        return Err(SaveError::VersionMismatch {
            expected: SAVE_VERSION,
            found: save_data.version,
        });
    }

    save_data.config.validate()?;
    let player = save_data.player;
    if !save_data.config.play_area().contains(player.x, player.y) || player.z != 0.0 {
        return Err(SaveError::PlayerOutOfBounds {
            x: player.x,
            y: player.y,
        });
    }

    let mut world = World::new();
    for bundle in save_data.obstacles {
        world.spawn(bundle);
    }
    for bundle in save_data.collectibles {
        world.spawn(bundle);
    }

    Ok(LoadedSession {
        world,
        state: save_data.state,
        score: save_data.score,
        elapsed: save_data.elapsed,
        player: save_data.player,
        next_obstacle_id: save_data.next_obstacle_id,
        config: save_data.config,
    })
}

/// Result of loading a session
pub struct LoadedSession {
    pub world: World,
    pub state: SessionState,
    pub score: u64,
    pub elapsed: f32,
    pub player: Vec3,
    pub next_obstacle_id: u32,
    pub config: GameConfig,
}
