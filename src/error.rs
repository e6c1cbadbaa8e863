//! Error types for the motion planning crate.
//!
//! Motion operations themselves never fail (`plan_buffer_line` either parks
//! until a slot frees up or silently drops a zero-length move, per the
//! planner's contract). The only place a fallible construction makes sense
//! is validating a [`crate::Settings`] value.

use core::fmt;

/// Errors that can occur while constructing planner configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlannerError {
    /// `acceleration > 0` and `max_jerk > 0` could not both be asserted.
    InvalidSettings,
}

impl fmt::Display for PlannerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlannerError::InvalidSettings => {
                write!(f, "acceleration and max_jerk must both be positive")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for PlannerError {}
