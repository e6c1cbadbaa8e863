//! # Trapezoidal Motion Planner
//!
//! A deterministic motion planner for a step/direction CNC controller.
//!
//! The planner accepts a stream of linear moves (`plan_buffer_line`) and
//! turns each into a trapezoidal speed profile — an acceleration ramp, a
//! constant-speed plateau, and a deceleration ramp — such that:
//!
//! - every junction between consecutive queued moves respects a configured
//!   maximum instantaneous speed change ("jerk"),
//! - no block ever requires a speed change exceeding the single configured
//!   acceleration, and
//! - the profile is always executable by a downstream step-pulse generator
//!   without stalling.
//!
//! This crate does not include a command parser, a step-pulse generator, a
//! configuration store, or serial I/O — those are external collaborators.
//! It consumes exactly three services from them, modeled here as
//! [`Settings`] (a validated read-only configuration record) and the
//! [`Stepper`] trait (`synchronize`, `sleep_until_progress`).
//!
//! Builds on bare-metal targets disable the default `std` feature and
//! enable `libm` instead, e.g. `--no-default-features --features libm`.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "alloc")]
extern crate alloc;

mod math;

pub mod block;
pub mod error;
pub mod planner;
pub mod settings;
pub mod stepper;
pub mod trapezoid;

pub use block::Block;
pub use error::PlannerError;
pub use planner::Planner;
pub use settings::Settings;
pub use stepper::{Stepper, X_DIRECTION_BIT, Y_DIRECTION_BIT, Z_DIRECTION_BIT};

/// Axis indices into [`Settings::steps_per_mm`] and [`Block`]'s per-axis arrays.
pub mod axis {
    pub const X: usize = 0;
    pub const Y: usize = 1;
    pub const Z: usize = 2;
    /// Number of linear axes this planner supports. No rotary/4th-axis support.
    pub const COUNT: usize = 3;
}
