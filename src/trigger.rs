//! Trigger sources: where physical samples come from.
//!
//! The session polls a [`TriggerSource`] once per host tick and only reacts when
//! an event occurred. Sources are interchangeable; the session does not know
//! whether a sample came from a tracked controller, a debug click, or a timer.

use std::time::Duration;

use crate::anchors::NUM_ANCHORS;
use crate::Vector3;

/// One polling tick's worth of input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriggerSample {
    /// Whether a trigger event happened on this tick.
    pub event_occurred: bool,
    /// Physical-space position at the instant of polling.
    pub position: Vector3,
}

impl TriggerSample {
    /// A tick with no event.
    pub fn idle() -> Self {
        Self {
            event_occurred: false,
            position: Vector3::zeros(),
        }
    }

    /// A tick with an event at `position`.
    pub fn fired(position: Vector3) -> Self {
        Self {
            event_occurred: true,
            position,
        }
    }
}

/// Produces one [`TriggerSample`] per poll.
///
/// `next_step` is the 0-based index of the step the sample would feed; sources
/// that substitute pre-authored positions use it to pick one.
pub trait TriggerSource {
    fn poll(&mut self, next_step: usize) -> TriggerSample;
}

/// A tracked hand-held device with a trigger button.
pub trait TrackedDevice {
    /// `true` only on the tick the trigger goes down.
    fn trigger_pressed_down(&mut self) -> bool;
    /// Current tracked position.
    fn position(&self) -> Vector3;
}

/// A pointer (mouse) button.
pub trait PointerButton {
    /// `true` only on the tick the button goes down.
    fn pressed_down(&mut self) -> bool;
}

/// Two tracked controllers; a trigger press on either one produces a sample.
///
/// If both fire on the same tick the primary controller's position is used.
#[derive(Debug, Clone)]
pub struct ControllerPair<A, B> {
    pub primary: A,
    pub secondary: B,
}

impl<A: TrackedDevice, B: TrackedDevice> ControllerPair<A, B> {
    pub fn new(primary: A, secondary: B) -> Self {
        Self { primary, secondary }
    }
}

impl<A: TrackedDevice, B: TrackedDevice> TriggerSource for ControllerPair<A, B> {
    fn poll(&mut self, _next_step: usize) -> TriggerSample {
        // Poll both so neither press edge is left pending for the next tick
        let primary = self.primary.trigger_pressed_down();
        let secondary = self.secondary.trigger_pressed_down();
        if primary {
            TriggerSample::fired(self.primary.position())
        } else if secondary {
            TriggerSample::fired(self.secondary.position())
        } else {
            TriggerSample::idle()
        }
    }
}

/// Debug input: a pointer click stands in for a trigger press, and the sample
/// position is the pre-authored debug point for the pending step.
#[derive(Debug, Clone)]
pub struct DebugPointer<B> {
    pub button: B,
    pub positions: [Vector3; NUM_ANCHORS],
}

impl<B: PointerButton> DebugPointer<B> {
    pub fn new(button: B, positions: [Vector3; NUM_ANCHORS]) -> Self {
        Self { button, positions }
    }
}

impl<B: PointerButton> TriggerSource for DebugPointer<B> {
    fn poll(&mut self, next_step: usize) -> TriggerSample {
        if !self.button.pressed_down() {
            return TriggerSample::idle();
        }
        match self.positions.get(next_step) {
            Some(p) => TriggerSample::fired(*p),
            None => TriggerSample::idle(),
        }
    }
}

/// Settle time before the first timed step.
pub const TIMED_SETTLE: Duration = Duration::from_millis(1000);
/// Pause preceding each timed step.
pub const TIMED_STEP_INTERVAL: Duration = Duration::from_millis(500);

/// Timer-driven source: feeds the pre-authored positions on a fixed schedule
/// instead of waiting for button presses.
///
/// Step `i` fires once `TIMED_SETTLE + (i + 1) * TIMED_STEP_INTERVAL` has elapsed.
/// The host advances the clock; nothing here sleeps.
#[derive(Debug, Clone)]
pub struct TimedSequence {
    positions: [Vector3; NUM_ANCHORS],
    elapsed: Duration,
    settle: Duration,
    interval: Duration,
}

impl TimedSequence {
    pub fn new(positions: [Vector3; NUM_ANCHORS]) -> Self {
        Self::with_schedule(positions, TIMED_SETTLE, TIMED_STEP_INTERVAL)
    }

    pub fn with_schedule(
        positions: [Vector3; NUM_ANCHORS],
        settle: Duration,
        interval: Duration,
    ) -> Self {
        Self {
            positions,
            elapsed: Duration::ZERO,
            settle,
            interval,
        }
    }

    /// Advance the internal clock by `dt`.
    pub fn advance(&mut self, dt: Duration) {
        self.elapsed += dt;
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Time at which step `index` (0-based) becomes due.
    pub fn deadline(&self, index: usize) -> Duration {
        self.settle + self.interval * (index as u32 + 1)
    }
}

impl TriggerSource for TimedSequence {
    fn poll(&mut self, next_step: usize) -> TriggerSample {
        match self.positions.get(next_step) {
            Some(p) if self.elapsed >= self.deadline(next_step) => TriggerSample::fired(*p),
            _ => TriggerSample::idle(),
        }
    }
}
