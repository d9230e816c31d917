//! Game constants: play area, speeds, spawn layout, scoring.
//!
//! Plain `f32`/`u32` constants with no engine dependency. `GameConfig`
//! defaults are built from these; both the ECS session and the headless
//! harness read them.

pub mod play_area {
    pub const MIN_X: f32 = -5.0;
    pub const MAX_X: f32 = 5.0;
    pub const MIN_Y: f32 = 0.0;
    pub const MAX_Y: f32 = 5.0;
}

pub mod motion {
    /// Obstacle advance along +z, units per second.
    pub const OBSTACLE_SPEED: f32 = 10.0;
    /// Collectible advance along +z, units per second.
    pub const COLLECTIBLE_SPEED: f32 = 8.0;
    /// Multiplier applied to raw drag deltas (screen points) before clamping.
    pub const DRAG_SENSITIVITY: f32 = 0.05;
}

pub mod detection {
    /// Euclidean distance used for both collision and collection.
    pub const PROXIMITY_THRESHOLD: f32 = 1.5;
}

pub mod scoring {
    pub const COLLECTIBLE_POINTS: u64 = 10;
}

pub mod spawn {
    pub const INITIAL_OBSTACLES: u32 = 5;
    pub const INITIAL_COLLECTIBLES: u32 = 10;

    /// First obstacle z; each further obstacle is `OBSTACLE_STRIDE` further back.
    pub const OBSTACLE_START_Z: f32 = -20.0;
    pub const OBSTACLE_STRIDE: f32 = 10.0;
    pub const COLLECTIBLE_START_Z: f32 = -15.0;
    pub const COLLECTIBLE_STRIDE: f32 = 5.0;

    /// Recycled and newly spawned entities reappear here.
    pub const FAR_Z: f32 = -50.0;
    /// Anything with z beyond this has passed the player.
    pub const PASS_Z: f32 = 5.0;

    /// Lateral spread: x = (r - 0.5) * LANE_WIDTH.
    pub const LANE_WIDTH: f32 = 10.0;
    /// Vertical spread: y = (r - 0.5) * LANE_HEIGHT + LANE_CENTER_Y.
    pub const LANE_HEIGHT: f32 = 5.0;
    pub const LANE_CENTER_Y: f32 = 2.0;

    /// Obstacle scale = MIN_SCALE + r * SCALE_RANGE.
    pub const MIN_SCALE: f32 = 1.0;
    pub const SCALE_RANGE: f32 = 1.0;
}

pub mod difficulty {
    /// Seconds of session time between difficulty spawns.
    pub const SPAWN_INTERVAL: f32 = 10.0;
    pub const MAX_OBSTACLES: u32 = 10;
}

pub mod camera {
    pub const FOLLOW_X: f32 = 0.3;
    pub const FOLLOW_Y: f32 = 0.2;
    pub const BASE_Y: f32 = 2.0;
    pub const BASE_Z: f32 = 5.0;
    pub const FOV_DEGREES: f32 = 75.0;
}

pub mod companion {
    pub const PETTED_SECS: f32 = 2.0;
    pub const TICKLED_SECS: f32 = 2.0;
    pub const MOOD_INDICATOR_SECS: f32 = 3.0;
    /// Touches above this model-space height count as a pet on the head.
    pub const HEAD_HEIGHT: f32 = 0.5;
}

pub mod ar {
    /// The overlay image is 150x150 and centered on the tap.
    pub const OVERLAY_HALF_SIZE: f32 = 75.0;
}

pub mod clips {
    pub const PURR: &str = "purr";
}
