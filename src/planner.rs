//! The Block Queue and Plan Optimizer: admission, ring-buffer management,
//! and the two-pass global recalculation that distributes entry factors
//! across every pending block.

use crate::block::Block;
use crate::math::{ceil_i32, max_allowable_speed};
use crate::settings::Settings;
use crate::stepper::{Stepper, X_DIRECTION_BIT, Y_DIRECTION_BIT, Z_DIRECTION_BIT};
use crate::trapezoid::calculate_trapezoid_for_block;

/// The motion planner: a fixed-capacity block queue plus the optimizer that
/// keeps every queued block's speed profile globally consistent.
///
/// `N` is `BLOCK_BUFFER_SIZE` (a power of two is recommended but not
/// required — index arithmetic is unsigned modular throughout). `TICKS` is
/// `ACCELERATION_TICKS_PER_SECOND`, defaulting to grbl's historical 100 Hz.
///
/// `Planner` is a plain, single-owner value; it performs no internal
/// synchronization. An application sharing a planner between a foreground
/// task and a step-pulse-generator interrupt is responsible for providing
/// that synchronization itself (e.g. a `critical_section::Mutex<RefCell<_>>`
/// around the whole planner), the same way this crate's sibling GPIO/timer
/// drivers leave locking to their caller.
pub struct Planner<const N: usize, const TICKS: u32 = 100> {
    blocks: [Block; N],
    head: usize,
    tail: usize,
    acceleration_management: bool,
    settings: Settings,
}

impl<const N: usize, const TICKS: u32> Planner<N, TICKS> {
    /// Creates a planner with an empty queue and acceleration management
    /// enabled, matching `plan_init`'s effect without requiring a `Stepper`
    /// to synchronize against (there is nothing queued yet to drain).
    pub fn new(settings: Settings) -> Self {
        assert!(N >= 2, "BLOCK_BUFFER_SIZE must reserve one sentinel slot");
        Self {
            blocks: [Block::default(); N],
            head: 0,
            tail: 0,
            acceleration_management: true,
            settings,
        }
    }

    /// `plan_init`: zeroes the queue and (re-)enables acceleration
    /// management. Used by a host to reinitialize the planner after an
    /// abort, once the stepper has been synchronized externally.
    pub fn init(&mut self, stepper: &mut impl Stepper) {
        self.head = 0;
        self.tail = 0;
        self.enable_acceleration_management(stepper);
    }

    #[inline]
    fn next_index(&self, index: usize) -> usize {
        (index + 1) % N
    }

    #[inline]
    fn prev_index(&self, index: usize) -> usize {
        (index + N - 1) % N
    }

    /// True when the queue holds no admitted blocks.
    pub fn is_empty(&self) -> bool {
        self.head == self.tail
    }

    /// True when the queue cannot accept another block without a consumer
    /// advancing `tail` first.
    pub fn is_full(&self) -> bool {
        self.next_index(self.head) == self.tail
    }

    /// Number of admitted blocks currently queued.
    pub fn len(&self) -> usize {
        (self.head + N - self.tail) % N
    }

    // --- Consumer-facing interface (read by the step-pulse generator) ---

    /// The block the consumer should currently be executing, if any.
    pub fn tail_block(&self) -> Option<&Block> {
        if self.is_empty() {
            None
        } else {
            Some(&self.blocks[self.tail])
        }
    }

    /// Advances `tail` past the block the consumer just finished, freeing
    /// its slot for a future admission. A no-op on an empty queue.
    pub fn advance_tail(&mut self) {
        if !self.is_empty() {
            self.tail = self.next_index(self.tail);
        }
    }

    /// Iterates every admitted block from `tail` to `head`, oldest first.
    /// Useful for diagnostics and for tests asserting properties across the
    /// whole queue; the step-pulse generator itself only ever needs
    /// [`Planner::tail_block`].
    pub fn blocks(&self) -> impl Iterator<Item = &Block> {
        let len = self.len();
        let tail = self.tail;
        (0..len).map(move |offset| &self.blocks[(tail + offset) % N])
    }

    // --- 4.4 Enable/disable acceleration management ---

    /// Idempotent. Synchronizes the stepper before the transition takes
    /// effect, so no mixed-profile block is ever executed.
    pub fn enable_acceleration_management(&mut self, stepper: &mut impl Stepper) {
        if !self.acceleration_management {
            stepper.synchronize();
            self.acceleration_management = true;
            log::debug!("acceleration management enabled");
        }
    }

    /// Idempotent. Synchronizes the stepper before the transition takes
    /// effect, so no mixed-profile block is ever executed.
    pub fn disable_acceleration_management(&mut self, stepper: &mut impl Stepper) {
        if self.acceleration_management {
            stepper.synchronize();
            self.acceleration_management = false;
            log::debug!("acceleration management disabled");
        }
    }

    pub fn acceleration_management_enabled(&self) -> bool {
        self.acceleration_management
    }

    // --- 4.1 Block Builder ---

    /// Appends one block describing a straight-line move.
    ///
    /// `steps_x`/`steps_y`/`steps_z` are signed relative step deltas,
    /// `duration_us` is how many microseconds the move should take, and
    /// `length_mm` is the move's physical length (needed to scale
    /// acceleration for the move's geometry). A move whose deltas are all
    /// zero is silently dropped. If the queue is full, this call parks via
    /// `stepper.sleep_until_progress()` until a slot frees up.
    pub fn plan_buffer_line(
        &mut self,
        steps_x: i32,
        steps_y: i32,
        steps_z: i32,
        duration_us: u32,
        length_mm: f64,
        stepper: &mut impl Stepper,
    ) {
        loop {
            let next_head = self.next_index(self.head);
            if next_head != self.tail {
                break;
            }
            stepper.sleep_until_progress();
        }

        let steps = [steps_x.unsigned_abs() as i32, steps_y.unsigned_abs() as i32, steps_z.unsigned_abs() as i32];
        let step_event_count = *steps.iter().max().unwrap();
        if step_event_count == 0 {
            return;
        }

        let multiplier = 60_000_000.0 / duration_us as f64;
        let mut speed = [0.0; crate::axis::COUNT];
        for axis in 0..crate::axis::COUNT {
            speed[axis] = steps[axis] as f64 * multiplier / self.settings.steps_per_mm[axis];
        }
        let nominal_speed = length_mm * multiplier;
        let nominal_rate = ceil_i32(step_event_count as f64 * multiplier);

        // Along a diagonal move a single step event covers less cartesian
        // distance, so the same cartesian acceleration needs a larger
        // step-rate change per tick; rate_delta compensates for that.
        let travel_per_step = length_mm / step_event_count as f64;
        let rate_delta = ceil_i32(
            (self.settings.acceleration * 60.0 / TICKS as f64) / travel_per_step,
        );

        let mut direction_bits = 0u8;
        if steps_x < 0 {
            direction_bits |= 1 << X_DIRECTION_BIT;
        }
        if steps_y < 0 {
            direction_bits |= 1 << Y_DIRECTION_BIT;
        }
        if steps_z < 0 {
            direction_bits |= 1 << Z_DIRECTION_BIT;
        }

        let index = self.head;
        self.blocks[index] = Block {
            steps,
            direction_bits,
            step_event_count,
            nominal_rate,
            nominal_speed,
            speed,
            millimeters: length_mm,
            rate_delta,
            entry_factor: 0.0,
            initial_rate: 0,
            accelerate_until: 0,
            decelerate_after: 0,
        };

        if self.acceleration_management {
            // A conservative full ramp-up/ramp-down profile so the stepper
            // may begin executing even if recalculation never runs (e.g.
            // this turns out to be the only queued block for a while).
            calculate_trapezoid_for_block(&mut self.blocks[index], 0.0, 0.0, TICKS);
        } else {
            self.blocks[index].accelerate_until = 0;
            self.blocks[index].decelerate_after = 0;
            self.blocks[index].rate_delta = 0;
        }

        self.head = next_head;
        log::trace!(
            "admitted block: steps={:?} step_event_count={} nominal_rate={}",
            steps,
            step_event_count,
            nominal_rate
        );

        if self.acceleration_management {
            self.recalculate();
        }
    }

    // --- 4.3 Plan Optimizer ---

    /// Recomputes `entry_factor` for every queued block (reverse pass then
    /// forward pass) and then regenerates every block's trapezoid profile
    /// from the result. Idempotent: calling this twice with no intervening
    /// admission leaves every block field unchanged.
    pub fn recalculate(&mut self) {
        self.reverse_pass();
        self.forward_pass();
        self.recalculate_trapezoids();
        log::debug!("recalculated {} queued blocks", self.len());
    }

    /// Phase 1. Walks from `head` toward `tail`, assigning each block the
    /// greatest `entry_factor` consistent with the junction-jerk bound and
    /// the single-block deceleration-over-distance bound, working backward
    /// from "the last block ends at rest".
    fn reverse_pass(&mut self) {
        if self.is_empty() {
            return;
        }

        let tail = self.tail;
        let mut current = self.prev_index(self.head);
        // entry_factor of the block one step closer to `head` than
        // `current` (i.e. `current`'s exit junction); `None` means
        // `current` is the head-most block, which always ends at rest.
        let mut next_entry_factor: Option<f64> = None;

        while current != tail {
            let previous = self.prev_index(current);
            let exit_factor = next_entry_factor.unwrap_or(0.0);
            let entry_factor = self.reverse_pass_kernel(Some(previous), current, exit_factor);
            self.blocks[current].entry_factor = entry_factor;
            next_entry_factor = Some(entry_factor);
            current = previous;
        }

        // `current == tail`: the oldest block in the queue always starts
        // from rest, regardless of jerk/acceleration bounds.
        let _ = next_entry_factor;
        self.blocks[tail].entry_factor = 0.0;
    }

    /// Computes the bounded entry factor for `current`, given `previous`
    /// (or `None` if `current` is the tail) and `current`'s exit factor
    /// (`next`'s entry factor, or `0.0` if `current` is head-most).
    fn reverse_pass_kernel(
        &self,
        previous: Option<usize>,
        current: usize,
        exit_factor: f64,
    ) -> f64 {
        let previous = match previous {
            Some(p) => p,
            None => return 0.0,
        };

        let mut entry_factor = 1.0;
        let jerk = self.blocks[previous].junction_jerk(&self.blocks[current]);
        if jerk > self.settings.max_jerk {
            entry_factor = self.settings.max_jerk / jerk;
        }

        if entry_factor > exit_factor {
            let block = &self.blocks[current];
            let max_entry_speed = max_allowable_speed(
                -self.settings.acceleration,
                block.nominal_speed * exit_factor,
                block.millimeters,
            );
            let max_entry_factor = max_entry_speed / block.nominal_speed;
            if max_entry_factor < entry_factor {
                entry_factor = max_entry_factor;
            }
        }

        entry_factor
    }

    /// Phase 2. Walks from `tail` toward `head`, tightening (never
    /// relaxing) any `entry_factor` that the previous block's own entry
    /// speed cannot actually accelerate up to within its length.
    fn forward_pass(&mut self) {
        if self.is_empty() {
            return;
        }

        let head = self.head;
        let mut current = self.tail;
        let mut previous: Option<usize> = None;

        loop {
            let next = self.next_index(current);
            if let Some(previous) = previous {
                if self.blocks[previous].entry_factor < self.blocks[current].entry_factor {
                    let prev_block = &self.blocks[previous];
                    let max_entry_speed = max_allowable_speed(
                        -self.settings.acceleration,
                        self.blocks[current].nominal_speed * prev_block.entry_factor,
                        prev_block.millimeters,
                    );
                    let current_nominal_speed = self.blocks[current].nominal_speed;
                    let max_entry_factor = max_entry_speed / current_nominal_speed;
                    if max_entry_factor < self.blocks[current].entry_factor {
                        self.blocks[current].entry_factor = max_entry_factor;
                    }
                }
            }
            previous = Some(current);
            current = next;
            if current == head {
                break;
            }
        }
    }

    /// Phase 3. Recomputes every block's trapezoid from tail to head, using
    /// each block's own `entry_factor` and its successor's `entry_factor`
    /// as the exit factor (`0.0` for the head-most block).
    ///
    /// Skips the tail block itself: its profile may already be latched by
    /// the step-pulse generator, so this implementation never rewrites
    /// `initial_rate`/`accelerate_until`/`decelerate_after` for the block
    /// currently being executed (spec's "safest choice").
    fn recalculate_trapezoids(&mut self) {
        if self.len() < 2 {
            return;
        }

        let head = self.head;
        let mut current = self.next_index(self.tail);

        loop {
            let next = self.next_index(current);
            let exit_factor = if next == head {
                0.0
            } else {
                self.blocks[next].entry_factor
            };
            let entry_factor = self.blocks[current].entry_factor;
            calculate_trapezoid_for_block(&mut self.blocks[current], entry_factor, exit_factor, TICKS);
            if next == head {
                break;
            }
            current = next;
        }
    }
}
