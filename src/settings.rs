//! Read-only configuration consumed by the planner.
//!
//! `Settings` stands in for the host's configuration store (an external
//! collaborator, out of scope for this crate): the embedding application is
//! responsible for loading these values from wherever they live and handing
//! over a validated record.

use crate::error::PlannerError;

/// Validated machine configuration.
///
/// `acceleration` is in mm/min² and `max_jerk` is in mm/min, matching the
/// units the rest of the planner works in (millimeters and step-event
/// rates expressed per minute).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
pub struct Settings {
    pub acceleration: f64,
    pub max_jerk: f64,
    pub steps_per_mm: [f64; crate::axis::COUNT],
}

impl Settings {
    /// Builds a validated `Settings` record.
    ///
    /// Rejects configurations where `acceleration > 0` and `max_jerk > 0`
    /// cannot both be asserted — numeric degeneracy the planner's contract
    /// leaves undefined otherwise.
    pub fn new(
        acceleration: f64,
        max_jerk: f64,
        steps_per_mm: [f64; crate::axis::COUNT],
    ) -> Result<Self, PlannerError> {
        if !(acceleration > 0.0) || !(max_jerk > 0.0) {
            return Err(PlannerError::InvalidSettings);
        }
        Ok(Self {
            acceleration,
            max_jerk,
            steps_per_mm,
        })
    }
}
