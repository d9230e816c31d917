//! Flight-game math: proximity, forward advance, spawn layout, difficulty ramp.
//!
//! Everything here works on plain `[f32; 3]` positions so the ECS systems in
//! `spirit-core` stay thin and these rules stay unit-testable.

/// Euclidean distance between two points.
pub fn distance(a: [f32; 3], b: [f32; 3]) -> f32 {
    let dx = a[0] - b[0];
    let dy = a[1] - b[1];
    let dz = a[2] - b[2];
    (dx * dx + dy * dy + dz * dz).sqrt()
}

/// Strictly closer than `threshold`. Used for both collision and collection.
pub fn within_proximity(a: [f32; 3], b: [f32; 3], threshold: f32) -> bool {
    distance(a, b) < threshold
}

/// New z after advancing toward the player for `delta` seconds.
pub fn advance_z(z: f32, speed: f32, delta: f32) -> f32 {
    z + speed * delta
}

/// True once an entity has gone past the player's forward plane.
pub fn has_passed(z: f32, pass_z: f32) -> bool {
    z > pass_z
}

/// Spawn z for the `index`-th entity of an initial row.
pub fn row_z(start: f32, stride: f32, index: u32) -> f32 {
    start - stride * index as f32
}

/// Map two unit samples `rx, ry` in [0, 1) to a lane position.
pub fn lane_position(rx: f32, ry: f32) -> (f32, f32) {
    use crate::constants::spawn::{LANE_CENTER_Y, LANE_HEIGHT, LANE_WIDTH};
    (
        (rx - 0.5) * LANE_WIDTH,
        (ry - 0.5) * LANE_HEIGHT + LANE_CENTER_Y,
    )
}

/// Map a unit sample to an obstacle scale.
pub fn obstacle_scale(r: f32) -> f32 {
    use crate::constants::spawn::{MIN_SCALE, SCALE_RANGE};
    MIN_SCALE + r * SCALE_RANGE
}

/// Number of `interval` boundaries crossed going from `before` to `after`.
///
/// Boundary 0 never counts, so the first spawn happens at `interval`.
/// Ticks that stay inside one window return 0, which is what keeps a
/// boundary from firing twice.
pub fn boundaries_crossed(before: f32, after: f32, interval: f32) -> u32 {
    if !(interval > 0.0) || !(after > before) {
        return 0;
    }
    let prev = (before.max(0.0) / interval).floor();
    let next = (after.max(0.0) / interval).floor();
    (next - prev).max(0.0) as u32
}

/// How many obstacles the difficulty ramp adds this tick.
pub fn difficulty_spawns(crossings: u32, current: u32, cap: u32) -> u32 {
    crossings.min(cap.saturating_sub(current))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn distance_is_euclidean() {
        assert_relative_eq!(distance([0.0, 0.0, 0.0], [3.0, 4.0, 0.0]), 5.0);
        assert_relative_eq!(distance([1.0, 1.0, 1.0], [1.0, 1.0, 1.0]), 0.0);
    }

    #[test]
    fn proximity_is_strict() {
        assert!(within_proximity([0.0; 3], [0.0, 0.0, 1.0], 1.5));
        assert!(!within_proximity([0.0; 3], [0.0, 0.0, 1.5], 1.5));
        assert!(!within_proximity([0.0; 3], [0.0, 0.0, -3.0], 1.5));
    }

    #[test]
    fn advance_and_pass() {
        let z = advance_z(4.5, 10.0, 0.1);
        assert_relative_eq!(z, 5.5);
        assert!(has_passed(z, 5.0));
        assert!(!has_passed(5.0, 5.0));
    }

    #[test]
    fn rows_step_backwards() {
        assert_eq!(row_z(-20.0, 10.0, 0), -20.0);
        assert_eq!(row_z(-20.0, 10.0, 4), -60.0);
        assert_eq!(row_z(-15.0, 5.0, 9), -60.0);
    }

    #[test]
    fn lane_covers_expected_ranges() {
        assert_eq!(lane_position(0.0, 0.0), (-5.0, -0.5));
        let (x, y) = lane_position(0.5, 0.5);
        assert_relative_eq!(x, 0.0);
        assert_relative_eq!(y, 2.0);
        assert_eq!(obstacle_scale(0.0), 1.0);
        assert_relative_eq!(obstacle_scale(0.5), 1.5);
    }

    #[test]
    fn boundary_counts_once() {
        assert_eq!(boundaries_crossed(9.95, 10.05, 10.0), 1);
        assert_eq!(boundaries_crossed(10.05, 10.15, 10.0), 0);
        assert_eq!(boundaries_crossed(10.0, 10.9, 10.0), 0);
    }

    #[test]
    fn zero_boundary_never_fires() {
        assert_eq!(boundaries_crossed(0.0, 0.1, 10.0), 0);
        assert_eq!(boundaries_crossed(0.0, 9.99, 10.0), 0);
    }

    #[test]
    fn large_delta_crosses_several() {
        assert_eq!(boundaries_crossed(5.0, 35.0, 10.0), 3);
    }

    #[test]
    fn degenerate_inputs() {
        assert_eq!(boundaries_crossed(12.0, 11.0, 10.0), 0);
        assert_eq!(boundaries_crossed(0.0, 100.0, 0.0), 0);
        assert_eq!(boundaries_crossed(0.0, f32::NAN, 10.0), 0);
    }

    #[test]
    fn spawns_respect_cap() {
        assert_eq!(difficulty_spawns(1, 5, 10), 1);
        assert_eq!(difficulty_spawns(3, 9, 10), 1);
        assert_eq!(difficulty_spawns(1, 10, 10), 0);
        assert_eq!(difficulty_spawns(0, 5, 10), 0);
    }
}
