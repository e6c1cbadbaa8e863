//! The planned-move record the rest of the crate operates on.

use crate::stepper::{X_DIRECTION_BIT, Y_DIRECTION_BIT, Z_DIRECTION_BIT};

/// One planned straight-line move with axis step counts and a trapezoidal
/// speed profile.
///
/// Step-event-counted fields (`step_event_count`, `nominal_rate`,
/// `rate_delta`, `initial_rate`, `accelerate_until`, `decelerate_after`) are
/// `i32`, matching the step-pulse generator's ABI. Speeds, lengths, and
/// `entry_factor` are `f64`; all kinematic algebra happens in double
/// precision and is only rounded to `i32` when a field is written.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
pub struct Block {
    /// Absolute step counts per axis (X, Y, Z), always non-negative.
    pub steps: [i32; crate::axis::COUNT],
    /// Bit per axis, set when that axis moves in the negative direction.
    /// Bit positions match [`crate::stepper::X_DIRECTION_BIT`] etc.
    pub direction_bits: u8,
    /// `max(steps_x, steps_y, steps_z)`; the block's timeline length in
    /// step events. Zero only for a not-yet-admitted (default) block.
    pub step_event_count: i32,
    /// Target step events per minute at cruise.
    pub nominal_rate: i32,
    /// Cartesian mm/min at cruise.
    pub nominal_speed: f64,
    /// Per-axis mm/min at cruise (signed magnitude; sign lives in
    /// `direction_bits`).
    pub speed: [f64; crate::axis::COUNT],
    /// Geometric length of the move, in millimeters.
    pub millimeters: f64,
    /// Step-events/min added per acceleration tick, scaled for this
    /// block's geometry.
    pub rate_delta: i32,
    /// Fraction of `nominal_speed` realized at the block's entry junction.
    pub entry_factor: f64,
    /// Step events/min at the block's first event.
    pub initial_rate: i32,
    /// Step-event index where acceleration ends.
    pub accelerate_until: i32,
    /// Step-event index where deceleration starts.
    pub decelerate_after: i32,
}

impl Default for Block {
    fn default() -> Self {
        Self {
            steps: [0; crate::axis::COUNT],
            direction_bits: 0,
            step_event_count: 0,
            nominal_rate: 0,
            nominal_speed: 0.0,
            speed: [0.0; crate::axis::COUNT],
            millimeters: 0.0,
            rate_delta: 0,
            entry_factor: 0.0,
            initial_rate: 0,
            accelerate_until: 0,
            decelerate_after: 0,
        }
    }
}

impl Block {
    /// Whether this slot holds an admitted (non-zero-length) move.
    pub fn is_admitted(&self) -> bool {
        self.step_event_count > 0
    }

    /// Per-axis cruise velocity with direction restored from
    /// `direction_bits`: `speed` itself only stores unsigned magnitude.
    fn signed_velocity(&self) -> [f64; crate::axis::COUNT] {
        let sign = |bit: u8| if self.direction_bits & (1 << bit) != 0 { -1.0 } else { 1.0 };
        [
            self.speed[crate::axis::X] * sign(X_DIRECTION_BIT),
            self.speed[crate::axis::Y] * sign(Y_DIRECTION_BIT),
            self.speed[crate::axis::Z] * sign(Z_DIRECTION_BIT),
        ]
    }

    /// Euclidean junction-jerk between this block's cruise velocity and
    /// `other`'s, the instantaneous speed discontinuity at the junction
    /// between them. Uses signed per-axis velocity (direction restored from
    /// `direction_bits`), not raw `speed` magnitude, so a direction reversal
    /// on a single axis is seen as the large discontinuity it actually is.
    pub fn junction_jerk(&self, other: &Block) -> f64 {
        let before = self.signed_velocity();
        let after = other.signed_velocity();
        let dx = before[crate::axis::X] - after[crate::axis::X];
        let dy = before[crate::axis::Y] - after[crate::axis::Y];
        let dz = before[crate::axis::Z] - after[crate::axis::Z];
        crate::math::sqrt(dx * dx + dy * dy + dz * dz)
    }
}
