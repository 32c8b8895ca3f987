#![forbid(unsafe_code)]

//! Animation kernel.
//!
//! Every animation implements [`Animation`]: it is advanced by explicit
//! `tick(dt)` calls from the host's frame loop and never spawns work of its
//! own. Long-running loops are wrapped in [`ticker::Ticker`]s whose lifetime
//! is bounded by the step that owns them.
//!
//! # Modules
//!
//! - [`spring`]: damped harmonic oscillator for bouncy entrances.
//! - [`repeat`]: infinitely repeating loops (restart or ping-pong).
//! - [`ticker`]: cancellable tickers and the [`ticker::TickerSet`] that owns them.

pub mod repeat;
pub mod spring;
pub mod ticker;

use std::time::Duration;

pub use repeat::{RepeatMode, Repeating};
pub use spring::Spring;
pub use ticker::{TickerHandle, TickerId, TickerSet};

/// A value that evolves over time.
pub trait Animation {
    /// Advance by `dt`.
    fn tick(&mut self, dt: Duration);

    /// Whether the animation has settled. Infinite loops never complete.
    fn is_complete(&self) -> bool;

    /// Current normalized value in `[0.0, 1.0]`.
    fn value(&self) -> f32;

    /// Current value without clamping. Defaults to [`value`](Animation::value).
    fn raw_value(&self) -> f32 {
        self.value()
    }

    /// Return to the initial state.
    fn reset(&mut self);
}

// ============================================================================
// Easing Functions
// ============================================================================

/// Easing curve applied to a linear progress value.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Easing {
    /// Linear interpolation.
    #[default]
    Linear,
    /// Cubic ease-out (decelerating) - good for entrances.
    EaseOut,
    /// Cubic ease-in (accelerating) - good for exits.
    EaseIn,
    /// Cubic S-curve.
    EaseInOut,
    /// Material "fast out, slow in": cubic-bezier(0.4, 0.0, 0.2, 1.0).
    FastOutSlowIn,
}

impl Easing {
    /// Apply the easing function to a progress value (clamped to `[0, 1]`).
    #[must_use]
    pub fn apply(self, t: f32) -> f32 {
        let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
        match self {
            Self::Linear => t,
            Self::EaseOut => {
                let inv = 1.0 - t;
                1.0 - inv * inv * inv
            }
            Self::EaseIn => t * t * t,
            Self::EaseInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let inv = -2.0 * t + 2.0;
                    1.0 - inv * inv * inv / 2.0
                }
            }
            Self::FastOutSlowIn => cubic_bezier(0.4, 0.0, 0.2, 1.0, t),
        }
    }
}

/// Evaluate a CSS-style cubic bezier timing curve at `x`.
///
/// Solves `bx(s) = x` with Newton's method, falling back to bisection when
/// the slope is too flat, then returns `by(s)`.
fn cubic_bezier(x1: f32, y1: f32, x2: f32, y2: f32, x: f32) -> f32 {
    let coord = |a: f32, b: f32, s: f32| {
        let inv = 1.0 - s;
        3.0 * inv * inv * s * a + 3.0 * inv * s * s * b + s * s * s
    };
    let slope = |a: f32, b: f32, s: f32| {
        let inv = 1.0 - s;
        3.0 * inv * inv * a + 6.0 * inv * s * (b - a) + 3.0 * s * s * (1.0 - b)
    };

    let mut s = x;
    for _ in 0..8 {
        let err = coord(x1, x2, s) - x;
        if err.abs() < 1e-5 {
            return coord(y1, y2, s);
        }
        let d = slope(x1, x2, s);
        if d.abs() < 1e-6 {
            break;
        }
        s -= err / d;
    }

    let (mut lo, mut hi) = (0.0_f32, 1.0_f32);
    s = x;
    for _ in 0..32 {
        let v = coord(x1, x2, s);
        if (v - x).abs() < 1e-5 {
            break;
        }
        if v < x {
            lo = s;
        } else {
            hi = s;
        }
        s = (lo + hi) / 2.0;
    }
    coord(y1, y2, s)
}

// ============================================================================
// Tween
// ============================================================================

/// A one-shot eased transition from 0 to 1 over a fixed duration.
///
/// Zero-duration tweens complete instantly.
#[derive(Debug, Clone)]
pub struct Tween {
    duration: Duration,
    elapsed: Duration,
    easing: Easing,
}

impl Tween {
    #[must_use]
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            elapsed: Duration::ZERO,
            easing: Easing::Linear,
        }
    }

    /// Set the easing curve (builder pattern).
    #[must_use]
    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Linear progress in `[0, 1]`, before easing.
    #[must_use]
    pub fn progress(&self) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (self.elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0) as f32
    }
}

impl Animation for Tween {
    fn tick(&mut self, dt: Duration) {
        self.elapsed = self.elapsed.saturating_add(dt).min(self.duration);
    }

    fn is_complete(&self) -> bool {
        self.elapsed >= self.duration
    }

    fn value(&self) -> f32 {
        self.easing.apply(self.progress())
    }

    fn reset(&mut self) {
        self.elapsed = Duration::ZERO;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn easing_endpoints() {
        for easing in [
            Easing::Linear,
            Easing::EaseOut,
            Easing::EaseIn,
            Easing::EaseInOut,
            Easing::FastOutSlowIn,
        ] {
            assert!(easing.apply(0.0).abs() < 1e-3, "{easing:?} at 0");
            assert!((easing.apply(1.0) - 1.0).abs() < 1e-3, "{easing:?} at 1");
        }
    }

    #[test]
    fn easing_clamps_and_rejects_nan() {
        assert_eq!(Easing::Linear.apply(2.0), 1.0);
        assert_eq!(Easing::Linear.apply(-1.0), 0.0);
        assert_eq!(Easing::EaseOut.apply(f32::NAN), 0.0);
    }

    #[test]
    fn fast_out_slow_in_is_monotonic_and_front_loaded() {
        let mut prev = 0.0;
        for i in 1..=20 {
            let v = Easing::FastOutSlowIn.apply(i as f32 / 20.0);
            assert!(v + 1e-4 >= prev, "not monotonic at step {i}");
            prev = v;
        }
        // Decelerating curve: past the midpoint by half time.
        assert!(Easing::FastOutSlowIn.apply(0.5) > 0.6);
    }

    #[test]
    fn tween_progresses_and_completes() {
        let mut tween = Tween::new(Duration::from_millis(100));
        tween.tick(Duration::from_millis(50));
        assert!((tween.value() - 0.5).abs() < 1e-3);
        assert!(!tween.is_complete());
        tween.tick(Duration::from_millis(80));
        assert!(tween.is_complete());
        assert_eq!(tween.value(), 1.0);
        tween.reset();
        assert_eq!(tween.value(), 0.0);
    }

    #[test]
    fn zero_duration_tween_is_done() {
        let tween = Tween::new(Duration::ZERO);
        assert!(tween.is_complete());
        assert_eq!(tween.value(), 1.0);
    }
}
