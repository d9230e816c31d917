//! C FFI bindings for the Spirit Flight game session
//!
//! This crate exposes the mini-game to a mobile or engine host through a C
//! ABI. The host owns the frame loop and the rendering; it feeds drag deltas
//! and frame times in and reads positions back out.
//!
//! # Basic Usage (C)
//! ```c
//! #include "spirit.h"
//!
//! SpiritHandle game = spirit_create(42);
//! spirit_start(game);
//!
//! // Frame loop
//! while (spirit_state(game) == 1) {
//!     spirit_push_drag(game, touch_dx, touch_dy);
//!     spirit_tick(game, delta_time);
//!
//!     SpiritCamera camera;
//!     spirit_get_camera(game, &camera);
//!
//!     uint32_t count = spirit_obstacle_count(game);
//!     for (uint32_t i = 0; i < count; i++) {
//!         SpiritObstacle obstacle;
//!         if (spirit_get_obstacle(game, i, &obstacle)) {
//!             // draw obstacle.position scaled by obstacle.scale
//!         }
//!     }
//! }
//!
//! spirit_destroy(game);
//! ```

use spirit_core::components::Vec3;
use spirit_core::engine::GameSession;
use spirit_core::prelude::GameConfig;
use spirit_core::scene::CameraPose;

/// Opaque handle to a game session
pub type SpiritHandle = *mut GameSession;

/// Session states as returned by `spirit_state`
pub const SPIRIT_STATE_IDLE: u8 = 0;
pub const SPIRIT_STATE_RUNNING: u8 = 1;
pub const SPIRIT_STATE_OVER: u8 = 2;

#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SpiritVec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl From<Vec3> for SpiritVec3 {
    fn from(v: Vec3) -> Self {
        Self {
            x: v.x,
            y: v.y,
            z: v.z,
        }
    }
}

/// Obstacle data returned to C
#[repr(C)]
#[derive(Debug, Clone, Copy, Default)]
pub struct SpiritObstacle {
    pub id: u32,
    pub position: SpiritVec3,
    /// Uniform scale, 1.0 to 2.0
    pub scale: f32,
}

/// Collectible orb data returned to C
#[repr(C)]
#[derive(Debug, Clone, Copy, Default)]
pub struct SpiritCollectible {
    pub id: u32,
    pub position: SpiritVec3,
    /// 1 when picked up this cycle; hosts should hide it
    pub collected: u8,
}

/// Perspective camera following the player
#[repr(C)]
#[derive(Debug, Clone, Copy, Default)]
pub struct SpiritCamera {
    pub position: SpiritVec3,
    pub fov_degrees: f32,
}

// ============================================================================
// Lifecycle Functions
// ============================================================================

/// Create a new game session with a fixed RNG seed
///
/// Returns a handle that must be freed with `spirit_destroy`
#[no_mangle]
pub extern "C" fn spirit_create(seed: u64) -> SpiritHandle {
    match GameSession::with_config(GameConfig::seeded(seed)) {
        Ok(session) => Box::into_raw(Box::new(session)),
        Err(_) => std::ptr::null_mut(),
    }
}

/// Create a new game session seeded from system entropy
#[no_mangle]
pub extern "C" fn spirit_create_random() -> SpiritHandle {
    Box::into_raw(Box::new(GameSession::new()))
}

/// Destroy a game session and free its memory
#[no_mangle]
pub extern "C" fn spirit_destroy(handle: SpiritHandle) {
    if !handle.is_null() {
        unsafe {
            drop(Box::from_raw(handle));
        }
    }
}

/// Start play from the idle menu. Returns false if not idle.
#[no_mangle]
pub extern "C" fn spirit_start(handle: SpiritHandle) -> bool {
    if handle.is_null() {
        return false;
    }

    let game = unsafe { &mut *handle };
    game.start().is_ok()
}

/// Play again after game over. Returns false unless the game is over.
#[no_mangle]
pub extern "C" fn spirit_restart(handle: SpiritHandle) -> bool {
    if handle.is_null() {
        return false;
    }

    let game = unsafe { &mut *handle };
    game.restart().is_ok()
}

// ============================================================================
// Frame Control
// ============================================================================

/// Queue a raw touch drag delta (in screen pixels) for the next tick
#[no_mangle]
pub extern "C" fn spirit_push_drag(handle: SpiritHandle, dx: f32, dy: f32) {
    if handle.is_null() {
        return;
    }

    let game = unsafe { &mut *handle };
    game.push_drag(dx, dy);
}

/// Advance the game by `delta_seconds` of frame time
///
/// Returns the points scored during this tick.
#[no_mangle]
pub extern "C" fn spirit_tick(handle: SpiritHandle, delta_seconds: f32) -> u64 {
    if handle.is_null() {
        return 0;
    }

    let game = unsafe { &mut *handle };
    game.tick(delta_seconds).points
}

// ============================================================================
// Query Functions
// ============================================================================

/// Current state: 0 idle, 1 running, 2 over
#[no_mangle]
pub extern "C" fn spirit_state(handle: SpiritHandle) -> u8 {
    if handle.is_null() {
        return SPIRIT_STATE_IDLE;
    }

    let game = unsafe { &*handle };
    game.state() as u8
}

#[no_mangle]
pub extern "C" fn spirit_score(handle: SpiritHandle) -> u64 {
    if handle.is_null() {
        return 0;
    }

    let game = unsafe { &*handle };
    game.score()
}

/// Seconds of play since the last start or restart
#[no_mangle]
pub extern "C" fn spirit_elapsed(handle: SpiritHandle) -> f32 {
    if handle.is_null() {
        return 0.0;
    }

    let game = unsafe { &*handle };
    game.elapsed()
}

#[no_mangle]
pub extern "C" fn spirit_obstacle_count(handle: SpiritHandle) -> u32 {
    if handle.is_null() {
        return 0;
    }

    let game = unsafe { &*handle };
    game.obstacle_count() as u32
}

#[no_mangle]
pub extern "C" fn spirit_collectible_count(handle: SpiritHandle) -> u32 {
    if handle.is_null() {
        return 0;
    }

    let game = unsafe { &*handle };
    game.collectible_count() as u32
}

/// Player position (z is always 0)
#[no_mangle]
pub extern "C" fn spirit_get_player(handle: SpiritHandle, out: *mut SpiritVec3) -> bool {
    if handle.is_null() || out.is_null() {
        return false;
    }

    let game = unsafe { &*handle };
    unsafe {
        *out = game.player().into();
    }
    true
}

/// Get obstacle data by index, in id order
///
/// Returns true if successful, false if index out of bounds
#[no_mangle]
pub extern "C" fn spirit_get_obstacle(
    handle: SpiritHandle,
    index: u32,
    out: *mut SpiritObstacle,
) -> bool {
    if handle.is_null() || out.is_null() {
        return false;
    }

    let game = unsafe { &*handle };
    let Some((obstacle, position)) = game.obstacles().get(index as usize).copied() else {
        return false;
    };

    unsafe {
        *out = SpiritObstacle {
            id: obstacle.id,
            position: position.into(),
            scale: obstacle.scale,
        };
    }
    true
}

/// Get collectible data by index, in id order
///
/// Collected orbs are still returned with `collected = 1`.
#[no_mangle]
pub extern "C" fn spirit_get_collectible(
    handle: SpiritHandle,
    index: u32,
    out: *mut SpiritCollectible,
) -> bool {
    if handle.is_null() || out.is_null() {
        return false;
    }

    let game = unsafe { &*handle };
    let Some((collectible, position)) = game.collectibles().get(index as usize).copied() else {
        return false;
    };

    unsafe {
        *out = SpiritCollectible {
            id: collectible.id,
            position: position.into(),
            collected: collectible.collected as u8,
        };
    }
    true
}

#[no_mangle]
pub extern "C" fn spirit_get_camera(handle: SpiritHandle, out: *mut SpiritCamera) -> bool {
    if handle.is_null() || out.is_null() {
        return false;
    }

    let game = unsafe { &*handle };
    let pose = CameraPose::follow(game.player());
    unsafe {
        *out = SpiritCamera {
            position: pose.position.into(),
            fov_degrees: pose.fov_degrees,
        };
    }
    true
}
