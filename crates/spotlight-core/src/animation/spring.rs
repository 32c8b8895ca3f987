#![forbid(unsafe_code)]

//! Damped harmonic oscillator (spring) animation.
//!
//! Drives the bubble's entrance scale. Based on the classical damped spring
//! equation:
//!
//!   F = -stiffness × (position - target) - damping × velocity
//!
//! # Parameters
//!
//! - **stiffness** (k): Restoring force strength. Higher = faster response.
//! - **damping** (c): Velocity drag. Usually derived from a damping ratio
//!   ζ via `c = 2ζ√k` (see [`Spring::with_damping_ratio`]).
//!   - ζ < 1: oscillates past target before settling
//!   - ζ = 1: fastest convergence without overshoot
//!
//! # Invariants
//!
//! 1. `value()` returns the position clamped to [0.0, 1.0];
//!    `raw_value()` and `position()` return it unclamped.
//! 2. A spring at rest will not resume unless `set_target()` or `reset()`
//!    is called.
//! 3. Stiffness and damping are always positive (clamped on construction).
//!
//! # Failure Modes
//!
//! - Very large dt: subdivided into 4ms steps for stability.
//! - Zero stiffness: clamped to 0.1 so the spring still converges.

use std::time::Duration;

use super::Animation;

/// Maximum dt per integration step (4ms).
const MAX_STEP_SECS: f64 = 0.004;

/// Position delta below which the spring is "at rest".
const DEFAULT_REST_THRESHOLD: f64 = 0.001;

/// Velocity below which (combined with position) the spring is at rest.
const DEFAULT_VELOCITY_THRESHOLD: f64 = 0.01;

/// Minimum stiffness to prevent degenerate springs.
const MIN_STIFFNESS: f64 = 0.1;

/// A damped harmonic oscillator producing physically-based motion.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use spotlight_core::animation::{Animation, Spring};
///
/// let mut spring = Spring::new(0.8, 1.0)
///     .with_stiffness(200.0)
///     .with_damping_ratio(0.5);
///
/// for _ in 0..200 {
///     spring.tick(Duration::from_millis(16));
/// }
///
/// assert!((spring.position() - 1.0).abs() < 0.01);
/// ```
#[derive(Debug, Clone)]
pub struct Spring {
    position: f64,
    velocity: f64,
    target: f64,
    initial: f64,
    stiffness: f64,
    damping: f64,
    rest_threshold: f64,
    velocity_threshold: f64,
    at_rest: bool,
}

impl Spring {
    /// Create a spring starting at `initial` and targeting `target`.
    ///
    /// Default parameters: stiffness = 170.0, damping = 26.0.
    #[must_use]
    pub fn new(initial: f64, target: f64) -> Self {
        Self {
            position: initial,
            velocity: 0.0,
            target,
            initial,
            stiffness: 170.0,
            damping: 26.0,
            rest_threshold: DEFAULT_REST_THRESHOLD,
            velocity_threshold: DEFAULT_VELOCITY_THRESHOLD,
            at_rest: false,
        }
    }

    /// Set stiffness (builder pattern). Clamped to minimum 0.1.
    #[must_use]
    pub fn with_stiffness(mut self, k: f64) -> Self {
        self.stiffness = k.max(MIN_STIFFNESS);
        self
    }

    /// Set damping (builder pattern). Clamped to minimum 0.0.
    #[must_use]
    pub fn with_damping(mut self, c: f64) -> Self {
        self.damping = c.max(0.0);
        self
    }

    /// Set damping from a damping ratio relative to the current stiffness.
    #[must_use]
    pub fn with_damping_ratio(self, ratio: f64) -> Self {
        let c = 2.0 * ratio.max(0.0) * self.stiffness.sqrt();
        self.with_damping(c)
    }

    /// Current position (unclamped).
    #[inline]
    #[must_use]
    pub fn position(&self) -> f64 {
        self.position
    }

    /// Current target.
    #[inline]
    #[must_use]
    pub fn target(&self) -> f64 {
        self.target
    }

    /// Damping parameter.
    #[inline]
    #[must_use]
    pub fn damping(&self) -> f64 {
        self.damping
    }

    /// Change the target. Wakes the spring if it was at rest.
    pub fn set_target(&mut self, target: f64) {
        if (self.target - target).abs() > self.rest_threshold {
            self.target = target;
            self.at_rest = false;
        }
    }

    /// Perform a single semi-implicit Euler step of `dt` seconds.
    fn step(&mut self, dt: f64) {
        let displacement = self.position - self.target;
        let acceleration = -self.stiffness * displacement - self.damping * self.velocity;
        self.velocity += acceleration * dt;
        self.position += self.velocity * dt;
    }

    /// Advance the spring by `dt`, subdividing if necessary for stability.
    pub fn advance(&mut self, dt: Duration) {
        if self.at_rest {
            return;
        }

        let mut remaining = dt.as_secs_f64();
        while remaining > 0.0 {
            let step_dt = remaining.min(MAX_STEP_SECS);
            self.step(step_dt);
            remaining -= step_dt;
        }

        let pos_delta = (self.position - self.target).abs();
        if pos_delta < self.rest_threshold && self.velocity.abs() < self.velocity_threshold {
            self.position = self.target;
            self.velocity = 0.0;
            self.at_rest = true;
        }
    }
}

impl Animation for Spring {
    fn tick(&mut self, dt: Duration) {
        self.advance(dt);
    }

    fn is_complete(&self) -> bool {
        self.at_rest
    }

    fn value(&self) -> f32 {
        (self.position as f32).clamp(0.0, 1.0)
    }

    fn raw_value(&self) -> f32 {
        self.position as f32
    }

    fn reset(&mut self) {
        self.position = self.initial;
        self.velocity = 0.0;
        self.at_rest = false;
    }
}
