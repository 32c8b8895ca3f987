#![forbid(unsafe_code)]

//! Bubble entrance animation.
//!
//! After the bubble resolves, it scales up on a spring from a slightly
//! shrunken size while fading in on a short linear tween. The scale pivots
//! on the edge nearest the anchor, so the bubble appears to grow out of
//! its arrow.

use std::time::Duration;

use spotlight_core::animation::{Spring, Tween};
use spotlight_core::geometry::{Direction, Point, Size};

/// Tunables for the entrance animation.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EntranceConfig {
    /// Starting scale, in `(0, 1]`.
    pub initial_scale: f32,
    pub fade_ms: u64,
    pub stiffness: f64,
    pub damping_ratio: f64,
}

impl Default for EntranceConfig {
    fn default() -> Self {
        Self {
            initial_scale: 0.8,
            fade_ms: 120,
            stiffness: 200.0,
            damping_ratio: 0.5,
        }
    }
}

impl EntranceConfig {
    #[must_use]
    pub fn initial_scale(mut self, scale: f32) -> Self {
        self.initial_scale = scale;
        self
    }

    #[must_use]
    pub fn fade_ms(mut self, ms: u64) -> Self {
        self.fade_ms = ms;
        self
    }

    #[must_use]
    pub fn stiffness(mut self, stiffness: f64) -> Self {
        self.stiffness = stiffness;
        self
    }

    #[must_use]
    pub fn damping_ratio(mut self, ratio: f64) -> Self {
        self.damping_ratio = ratio;
        self
    }

    /// Spring driving the scale toward 1.
    #[must_use]
    pub fn scale_animation(&self) -> Spring {
        Spring::new(f64::from(self.initial_scale), 1.0)
            .with_stiffness(self.stiffness)
            .with_damping_ratio(self.damping_ratio)
    }

    /// Tween driving the opacity toward 1.
    #[must_use]
    pub fn fade_animation(&self) -> Tween {
        Tween::new(Duration::from_millis(self.fade_ms))
    }

    /// Frame shown before the entrance starts: invisible, shrunken.
    #[must_use]
    pub fn hidden_frame(&self) -> EntranceFrame {
        EntranceFrame {
            scale: self.initial_scale,
            alpha: 0.0,
        }
    }
}

/// One frame of the entrance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EntranceFrame {
    /// Scale factor; may overshoot 1 while the spring settles.
    pub scale: f32,
    pub alpha: f32,
}

impl EntranceFrame {
    /// Fully entered.
    pub const SETTLED: Self = Self {
        scale: 1.0,
        alpha: 1.0,
    };
}

/// Scale pivot as fractions of the bubble size.
#[must_use]
pub const fn transform_origin(direction: Direction) -> (f32, f32) {
    match direction {
        Direction::Top => (0.5, 1.0),
        Direction::Bottom => (0.5, 0.0),
        Direction::Start => (1.0, 0.5),
        Direction::End => (0.0, 0.5),
    }
}

/// Scale pivot in bubble-local coordinates.
#[must_use]
pub fn transform_origin_point(direction: Direction, size: Size) -> Point {
    let (fx, fy) = transform_origin(direction);
    Point::new(size.width * fx, size.height * fy)
}
