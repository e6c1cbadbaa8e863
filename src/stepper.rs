//! The hardware-facing services the planner consumes from the step-pulse
//! generator, plus the direction-bit ABI blocks are encoded against.
//!
//! This mirrors the hardware-abstraction-trait pattern
//! `mcu_drivers::stepper::{AtomicGpioPort, Timer}` use in the driver
//! workspace: the planner is generic over the trait, never over a concrete
//! timer/ISR implementation, so it stays portable across targets.

/// Bit position for the X axis within [`crate::Block::direction_bits`].
pub const X_DIRECTION_BIT: u8 = 0;
/// Bit position for the Y axis within [`crate::Block::direction_bits`].
pub const Y_DIRECTION_BIT: u8 = 1;
/// Bit position for the Z axis within [`crate::Block::direction_bits`].
pub const Z_DIRECTION_BIT: u8 = 2;

/// Services the planner needs from the step-pulse generator.
///
/// Implementations are provided by the embedding firmware; this crate never
/// assumes a particular timer, interrupt, or scheduler.
pub trait Stepper {
    /// Blocks the caller until the step generator has drained its queue.
    ///
    /// Called before every acceleration-management mode transition, so that
    /// no block with a profile computed under the old mode is still being
    /// executed when the new mode takes effect.
    fn synchronize(&mut self);

    /// Yields the caller while the block queue is full, returning when the
    /// step generator has consumed at least one block.
    fn sleep_until_progress(&mut self);
}
