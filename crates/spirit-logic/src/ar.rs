//! AR placement: a tapped screen point stands in for real world tracking.

use serde::{Deserialize, Serialize};

use crate::constants::ar::OVERLAY_HALF_SIZE;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub enum Placement {
    #[default]
    Unplaced,
    Placed { x: f32, y: f32 },
}

impl Placement {
    pub fn place(&mut self, x: f32, y: f32) {
        *self = Placement::Placed { x, y };
    }

    pub fn reset(&mut self) {
        *self = Placement::Unplaced;
    }

    pub fn is_placed(&self) -> bool {
        matches!(self, Placement::Placed { .. })
    }

    /// Top-left corner of the overlay image, centered on the tap.
    pub fn overlay_origin(&self) -> Option<(f32, f32)> {
        match *self {
            Placement::Placed { x, y } => Some((x - OVERLAY_HALF_SIZE, y - OVERLAY_HALF_SIZE)),
            Placement::Unplaced => None,
        }
    }
}
