//! Game tuning: every tunable of the flight game in one serde struct.
//!
//! Defaults mirror [`crate::constants`]. Partial JSON files are accepted by
//! the loader in `spirit-core` thanks to `#[serde(default)]`; call
//! [`GameConfig::validate`] before handing a config to a session.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{detection, difficulty, motion, play_area, scoring, spawn};
use crate::movement::PlayArea;

/// Tunables for one flight-game session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub min_x: f32,
    pub max_x: f32,
    pub min_y: f32,
    pub max_y: f32,
    pub obstacle_speed: f32,
    pub collectible_speed: f32,
    pub drag_sensitivity: f32,
    pub proximity_threshold: f32,
    pub collectible_points: u64,
    pub initial_obstacles: u32,
    pub initial_collectibles: u32,
    pub spawn_interval: f32,
    pub max_obstacles: u32,
    pub far_z: f32,
    pub pass_z: f32,
    /// Fixed RNG seed; `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            min_x: play_area::MIN_X,
            max_x: play_area::MAX_X,
            min_y: play_area::MIN_Y,
            max_y: play_area::MAX_Y,
            obstacle_speed: motion::OBSTACLE_SPEED,
            collectible_speed: motion::COLLECTIBLE_SPEED,
            drag_sensitivity: motion::DRAG_SENSITIVITY,
            proximity_threshold: detection::PROXIMITY_THRESHOLD,
            collectible_points: scoring::COLLECTIBLE_POINTS,
            initial_obstacles: spawn::INITIAL_OBSTACLES,
            initial_collectibles: spawn::INITIAL_COLLECTIBLES,
            spawn_interval: difficulty::SPAWN_INTERVAL,
            max_obstacles: difficulty::MAX_OBSTACLES,
            far_z: spawn::FAR_Z,
            pass_z: spawn::PASS_Z,
            seed: None,
        }
    }
}

/// Why a config was rejected.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("play area is empty: x [{min_x}, {max_x}], y [{min_y}, {max_y}]")]
    EmptyPlayArea {
        min_x: f32,
        max_x: f32,
        min_y: f32,
        max_y: f32,
    },
    #[error("{name} must be positive and finite, got {value}")]
    NonPositive { name: &'static str, value: f32 },
    #[error("obstacle cap {cap} is below the initial obstacle count {initial}")]
    CapBelowInitial { cap: u32, initial: u32 },
    #[error("far spawn z {far_z} must be behind pass z {pass_z}")]
    SpawnNotBehindPlayer { far_z: f32, pass_z: f32 },
}

impl GameConfig {
    /// Same defaults with a fixed seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }

    pub fn play_area(&self) -> PlayArea {
        PlayArea::new(self.min_x, self.max_x, self.min_y, self.max_y)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.min_x <= self.max_x && self.min_y <= self.max_y) {
            return Err(ConfigError::EmptyPlayArea {
                min_x: self.min_x,
                max_x: self.max_x,
                min_y: self.min_y,
                max_y: self.max_y,
            });
        }

        for (name, value) in [
            ("obstacle_speed", self.obstacle_speed),
            ("collectible_speed", self.collectible_speed),
            ("drag_sensitivity", self.drag_sensitivity),
            ("proximity_threshold", self.proximity_threshold),
            ("spawn_interval", self.spawn_interval),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::NonPositive { name, value });
            }
        }

        if self.max_obstacles < self.initial_obstacles {
            return Err(ConfigError::CapBelowInitial {
                cap: self.max_obstacles,
                initial: self.initial_obstacles,
            });
        }

        if self.far_z >= self.pass_z {
            return Err(ConfigError::SpawnNotBehindPlayer {
                far_z: self.far_z,
                pass_z: self.pass_z,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert_eq!(GameConfig::default().validate(), Ok(()));
    }

    #[test]
    fn defaults_match_constants() {
        let c = GameConfig::default();
        assert_eq!(c.initial_obstacles, 5);
        assert_eq!(c.initial_collectibles, 10);
        assert_eq!(c.max_obstacles, 10);
        assert_eq!(c.collectible_points, 10);
        assert_eq!(c.proximity_threshold, 1.5);
        assert!(c.seed.is_none());
    }

    #[test]
    fn rejects_inverted_area() {
        let c = GameConfig {
            min_x: 3.0,
            max_x: -3.0,
            ..GameConfig::default()
        };
        assert!(matches!(c.validate(), Err(ConfigError::EmptyPlayArea { .. })));
    }

    #[test]
    fn rejects_zero_speed() {
        let c = GameConfig {
            obstacle_speed: 0.0,
            ..GameConfig::default()
        };
        assert_eq!(
            c.validate(),
            Err(ConfigError::NonPositive {
                name: "obstacle_speed",
                value: 0.0
            })
        );
    }

    #[test]
    fn rejects_nan_threshold() {
        let c = GameConfig {
            proximity_threshold: f32::NAN,
            ..GameConfig::default()
        };
        assert!(matches!(
            c.validate(),
            Err(ConfigError::NonPositive {
                name: "proximity_threshold",
                ..
            })
        ));
    }

    #[test]
    fn rejects_cap_below_initial() {
        let c = GameConfig {
            max_obstacles: 3,
            ..GameConfig::default()
        };
        assert_eq!(
            c.validate(),
            Err(ConfigError::CapBelowInitial { cap: 3, initial: 5 })
        );
    }

    #[test]
    fn rejects_spawn_in_front_of_player() {
        let c = GameConfig {
            far_z: 10.0,
            ..GameConfig::default()
        };
        assert!(matches!(
            c.validate(),
            Err(ConfigError::SpawnNotBehindPlayer { .. })
        ));
    }

    #[test]
    fn seeded_keeps_other_defaults() {
        let c = GameConfig::seeded(7);
        assert_eq!(c.seed, Some(7));
        assert_eq!(c.obstacle_speed, GameConfig::default().obstacle_speed);
    }
}
