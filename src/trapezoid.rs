//! The Trapezoid Generator: turns a block plus a pair of entry/exit factors
//! into a fully-realized speed profile.

use crate::block::Block;
use crate::math::{ceil_i32, estimate_acceleration_distance, intersection_distance};

/// Populates `block.initial_rate`, `accelerate_until`, and `decelerate_after`
/// so the block starts at `nominal_rate * entry_factor`, ramps at the
/// block's `rate_delta` toward `nominal_rate`, cruises, then ramps down to
/// `nominal_rate * exit_factor`, all within exactly `step_event_count` step
/// events.
///
/// `entry_factor` and `exit_factor` must be in `[0.0, 1.0]`.
///
/// `ticks_per_second` is `ACCELERATION_TICKS_PER_SECOND`: how often the
/// step-pulse generator updates its rate, which scales `rate_delta` into an
/// acceleration expressed in step-events/min².
///
/// Note: this computes `final_rate` from `exit_factor`. The grbl source
/// this crate is derived from computes it from `entry_factor` instead — a
/// copy/paste bug that produces an asymmetric, wrong deceleration ramp.
pub fn calculate_trapezoid_for_block(
    block: &mut Block,
    entry_factor: f64,
    exit_factor: f64,
    ticks_per_second: u32,
) {
    debug_assert!((0.0..=1.0).contains(&entry_factor));
    debug_assert!((0.0..=1.0).contains(&exit_factor));

    let nominal_rate = block.nominal_rate as f64;
    let initial_rate = ceil_i32(nominal_rate * entry_factor);
    let final_rate = ceil_i32(nominal_rate * exit_factor);
    let acceleration_per_minute = block.rate_delta as f64 * ticks_per_second as f64 * 60.0;

    let mut accelerate_steps = ceil_i32(estimate_acceleration_distance(
        initial_rate as f64,
        nominal_rate,
        acceleration_per_minute,
    ));
    let decelerate_steps = ceil_i32(estimate_acceleration_distance(
        nominal_rate,
        final_rate as f64,
        -acceleration_per_minute,
    ));

    let mut plateau_steps =
        block.step_event_count as i64 - accelerate_steps as i64 - decelerate_steps as i64;

    if plateau_steps < 0 {
        // Too short to reach cruise: find the accel/decel intersection.
        accelerate_steps = ceil_i32(intersection_distance(
            initial_rate as f64,
            final_rate as f64,
            acceleration_per_minute,
            block.step_event_count as f64,
        ));
        plateau_steps = block.step_event_count as i64 - 2 * accelerate_steps as i64;
    }

    // Numeric-stability guard: clamp so the invariant
    // 0 <= accelerate_until <= decelerate_after <= step_event_count always
    // holds, even if rounding pushed the raw computation out of range.
    let accelerate_steps = accelerate_steps.clamp(0, block.step_event_count);
    let decelerate_after =
        (accelerate_steps as i64 + plateau_steps).clamp(accelerate_steps as i64, block.step_event_count as i64) as i32;

    block.initial_rate = initial_rate;
    block.accelerate_until = accelerate_steps;
    block.decelerate_after = decelerate_after;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block_with(step_event_count: i32, nominal_rate: i32, rate_delta: i32) -> Block {
        Block {
            step_event_count,
            nominal_rate,
            rate_delta,
            ..Block::default()
        }
    }

    #[test]
    fn rest_to_rest_is_symmetric() {
        let mut b = block_with(1000, 1000, 10);
        calculate_trapezoid_for_block(&mut b, 0.0, 0.0, 100);
        assert!(b.accelerate_until >= 0);
        assert!(b.accelerate_until <= b.decelerate_after);
        assert!(b.decelerate_after <= b.step_event_count);
        assert_eq!(
            b.accelerate_until,
            b.step_event_count - b.decelerate_after,
            "symmetric rest-to-rest profile should accelerate and decelerate over equal spans"
        );
    }

    #[test]
    fn full_cruise_has_no_ramps_when_already_at_speed() {
        let mut b = block_with(1000, 1000, 10);
        calculate_trapezoid_for_block(&mut b, 1.0, 1.0, 100);
        assert_eq!(b.accelerate_until, 0);
        assert_eq!(b.decelerate_after, b.step_event_count);
    }

    #[test]
    fn short_block_uses_intersection_branch() {
        // A short block with high rate_delta relative to step_event_count
        // cannot reach cruise; the plateau collapses to zero or negative
        // and the intersection branch must kick in.
        let mut b = block_with(10, 100_000, 1);
        calculate_trapezoid_for_block(&mut b, 0.0, 0.0, 100);
        assert!(b.accelerate_until <= b.step_event_count / 2 + 1);
        assert_eq!(
            b.decelerate_after - b.accelerate_until,
            b.step_event_count - 2 * b.accelerate_until
        );
    }

    #[test]
    fn invariant_holds_across_a_grid_of_factor_pairs() {
        for num in 0..=10 {
            for den in 0..=10 {
                let entry = num as f64 / 10.0;
                let exit = den as f64 / 10.0;
                let mut b = block_with(500, 2000, 50);
                calculate_trapezoid_for_block(&mut b, entry, exit, 100);
                assert!(b.accelerate_until >= 0);
                assert!(b.accelerate_until <= b.decelerate_after);
                assert!(b.decelerate_after <= b.step_event_count);
            }
        }
    }
}
