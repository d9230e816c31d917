//! Pure player movement: drag input scaled then clamped to the play area.
//!
//! Algorithm: "scale then clamp"
//! 1. Scale the raw drag delta by the configured sensitivity
//! 2. Add it to the current position
//! 3. Clamp each axis independently into the play area
//!
//! A non-finite drag is dropped so a bad input event can never push the
//! player outside the bounds.

/// Axis-aligned rectangle the player is confined to (x horizontal, y up).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayArea {
    pub min_x: f32,
    pub max_x: f32,
    pub min_y: f32,
    pub max_y: f32,
}

impl PlayArea {
    pub fn new(min_x: f32, max_x: f32, min_y: f32, max_y: f32) -> Self {
        Self {
            min_x,
            max_x,
            min_y,
            max_y,
        }
    }

    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }

    pub fn clamp(&self, x: f32, y: f32) -> (f32, f32) {
        (
            x.clamp(self.min_x, self.max_x),
            y.clamp(self.min_y, self.max_y),
        )
    }
}

impl Default for PlayArea {
    fn default() -> Self {
        use crate::constants::play_area::*;
        Self::new(MIN_X, MAX_X, MIN_Y, MAX_Y)
    }
}

/// Move a player at `(x, y)` by a raw drag delta.
pub fn apply_drag(
    area: &PlayArea,
    x: f32,
    y: f32,
    dx: f32,
    dy: f32,
    sensitivity: f32,
) -> (f32, f32) {
    let (dx, dy) = if dx.is_finite() && dy.is_finite() {
        (dx * sensitivity, dy * sensitivity)
    } else {
        (0.0, 0.0)
    };
    area.clamp(x + dx, y + dy)
}
