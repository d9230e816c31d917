//! Player system - applies buffered drag input

use spirit_logic::config::GameConfig;
use spirit_logic::movement::apply_drag;

use crate::components::Vec3;

/// Drag deltas received since the last tick, in screen points.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PendingDrag {
    pub dx: f32,
    pub dy: f32,
}

impl PendingDrag {
    pub fn push(&mut self, dx: f32, dy: f32) {
        if dx.is_finite() && dy.is_finite() {
            self.dx += dx;
            self.dy += dy;
        }
    }

    pub fn take(&mut self) -> (f32, f32) {
        let out = (self.dx, self.dy);
        *self = Self::default();
        out
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Move the player by the pending drag and clamp into the play area.
pub fn player_system(player: &mut Vec3, pending: &mut PendingDrag, config: &GameConfig) {
    let (dx, dy) = pending.take();
    let (x, y) = apply_drag(
        &config.play_area(),
        player.x,
        player.y,
        dx,
        dy,
        config.drag_sensitivity,
    );
    player.x = x;
    player.y = y;
}
