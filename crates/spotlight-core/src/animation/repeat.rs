#![forbid(unsafe_code)]

//! Infinitely repeating loops.
//!
//! A [`Repeating`] animation cycles a linear clock over a fixed period
//! forever. In [`RepeatMode::Restart`] the value jumps back to 0 after each
//! period (sawtooth); in [`RepeatMode::Reverse`] it runs back down instead
//! (ping-pong), so the output never jumps.
//!
//! # Invariants
//!
//! 1. `value()` is always in `[0.0, 1.0]`.
//! 2. `is_complete()` is always `false`; loops end only when their ticker
//!    is cancelled.
//! 3. A zero period is clamped to 1ms to avoid division by zero.

use std::time::Duration;

use super::{Animation, Easing};

/// How a loop continues after reaching the end of its period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RepeatMode {
    /// Jump back to the start.
    #[default]
    Restart,
    /// Run backwards to the start, then forwards again.
    Reverse,
}

/// An infinitely repeating eased loop.
#[derive(Debug, Clone)]
pub struct Repeating {
    period: Duration,
    elapsed: Duration,
    mode: RepeatMode,
    easing: Easing,
}

impl Repeating {
    /// Create a loop with the given period, linear easing, restart mode.
    #[must_use]
    pub fn new(period: Duration) -> Self {
        Self {
            period: period.max(Duration::from_millis(1)),
            elapsed: Duration::ZERO,
            mode: RepeatMode::Restart,
            easing: Easing::Linear,
        }
    }

    /// Convenience constructor from milliseconds.
    #[must_use]
    pub fn from_millis(period_ms: u64) -> Self {
        Self::new(Duration::from_millis(period_ms))
    }

    /// Set the repeat mode (builder pattern).
    #[must_use]
    pub fn mode(mut self, mode: RepeatMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the easing curve (builder pattern).
    #[must_use]
    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Length of one period.
    #[must_use]
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Linear phase within the current period, in `[0, 1)`.
    #[must_use]
    pub fn phase(&self) -> f32 {
        let period = self.period.as_secs_f64();
        let cycles = self.elapsed.as_secs_f64() / period;
        (cycles - cycles.floor()) as f32
    }

    /// Number of completed periods.
    #[must_use]
    pub fn completed_periods(&self) -> u64 {
        (self.elapsed.as_nanos() / self.period.as_nanos()) as u64
    }
}

impl Animation for Repeating {
    fn tick(&mut self, dt: Duration) {
        self.elapsed = self.elapsed.saturating_add(dt);
        // Fold whole ping-pong cycles away so the clock never grows unbounded.
        let fold = self.period * 2;
        if self.elapsed >= fold {
            let rem = self.elapsed.as_nanos() % fold.as_nanos();
            self.elapsed = Duration::from_nanos(rem as u64);
        }
    }

    fn is_complete(&self) -> bool {
        false
    }

    fn value(&self) -> f32 {
        let phase = self.phase();
        let linear = match self.mode {
            RepeatMode::Restart => phase,
            RepeatMode::Reverse => {
                if self.completed_periods() % 2 == 0 {
                    phase
                } else {
                    1.0 - phase
                }
            }
        };
        self.easing.apply(linear)
    }

    fn reset(&mut self) {
        self.elapsed = Duration::ZERO;
    }
}
