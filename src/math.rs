//! Tiny `f64` math shim so the rest of the crate stays free of `cfg` noise.
//!
//! Host builds use `std`'s methods; `no_std` builds route through `libm`.

#[cfg(feature = "std")]
#[inline]
pub(crate) fn sqrt(x: f64) -> f64 {
    x.sqrt()
}

#[cfg(not(feature = "std"))]
#[inline]
pub(crate) fn sqrt(x: f64) -> f64 {
    libm::sqrt(x)
}

#[cfg(feature = "std")]
#[inline]
pub(crate) fn ceil(x: f64) -> f64 {
    x.ceil()
}

#[cfg(not(feature = "std"))]
#[inline]
pub(crate) fn ceil(x: f64) -> f64 {
    libm::ceil(x)
}

/// Ceils and truncates to `i32`, the width step-event-counted block fields use.
#[inline]
pub(crate) fn ceil_i32(x: f64) -> i32 {
    ceil(x) as i32
}

/// Distance covered while accelerating at `acceleration` from `initial_rate`
/// to `target_rate`. Negative `acceleration` computes a braking distance.
///
/// `d = (target^2 - initial^2) / (2a)`
#[inline]
pub(crate) fn estimate_acceleration_distance(
    initial_rate: f64,
    target_rate: f64,
    acceleration: f64,
) -> f64 {
    (target_rate * target_rate - initial_rate * initial_rate) / (2.0 * acceleration)
}

/// The step-event index at which a pure-acceleration-then-pure-deceleration
/// profile must switch over, for a block too short to reach cruise speed.
///
/// `di = (2ad - initial^2 + final^2) / (4a)`
#[inline]
pub(crate) fn intersection_distance(
    initial_rate: f64,
    final_rate: f64,
    acceleration: f64,
    distance: f64,
) -> f64 {
    (2.0 * acceleration * distance - initial_rate * initial_rate + final_rate * final_rate)
        / (4.0 * acceleration)
}

/// The largest speed from which, decelerating at `acceleration` over
/// `distance`, one can still reach `target_velocity`.
///
/// The radicand can go slightly negative at exact boundaries due to floating
/// point rounding; it is clamped to zero before the square root.
#[inline]
pub(crate) fn max_allowable_speed(acceleration: f64, target_velocity: f64, distance: f64) -> f64 {
    let radicand = target_velocity * target_velocity - 2.0 * acceleration * distance;
    sqrt(radicand.max(0.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accel_distance_matches_kinematics() {
        // v^2 = u^2 + 2as -> s = (v^2-u^2)/2a
        let d = estimate_acceleration_distance(0.0, 10.0, 5.0);
        assert!((d - 10.0).abs() < 1e-9);
    }

    #[test]
    fn max_allowable_speed_clamps_negative_radicand() {
        // target_velocity^2 - 2*a*d is deeply negative here; must not panic / NaN.
        let v = max_allowable_speed(100.0, 1.0, 1000.0);
        assert_eq!(v, 0.0);
    }

    #[test]
    fn intersection_distance_symmetric_case() {
        // Equal initial/final rate over a distance with acceleration a: the
        // intersection should sit at the block's midpoint.
        let d = intersection_distance(0.0, 0.0, 10.0, 100.0);
        assert!((d - 50.0).abs() < 1e-9);
    }
}
