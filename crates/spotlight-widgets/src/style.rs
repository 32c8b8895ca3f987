#![forbid(unsafe_code)]

//! Highlight styles.
//!
//! A step is highlighted either with a static cutout ([`HighlightStyle::Standard`])
//! or with a circular cutout surrounded by animated rings. Ring geometry is
//! a pure function of the cutout's base radius and the loop's progress, so
//! the compositor can paint any frame without holding state.

use smallvec::SmallVec;
use spotlight_render::color::PackedRgba;
use spotlight_render::shape::CutoutShape;

/// Phase offset between consecutive ripple rings.
pub const RIPPLE_PHASE_STEP: f32 = 0.3;

/// Opacity of a ripple ring at the start of its phase.
pub const RIPPLE_START_ALPHA: f32 = 0.4;

/// Constant opacity of the pulsing ring.
pub const PULSE_ALPHA: f32 = 0.3;

/// One stroked ring around a circular cutout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ring {
    pub radius: f32,
    pub alpha: f32,
}

/// Concentric rings expanding outward and fading.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RippleStyle {
    pub color: PackedRgba,
    pub stroke_width: f32,
    pub ring_count: u32,
    pub period_ms: u64,
    pub max_radius: f32,
}

impl Default for RippleStyle {
    fn default() -> Self {
        Self {
            color: PackedRgba::CYAN,
            stroke_width: 20.0,
            ring_count: 3,
            period_ms: 2000,
            max_radius: 60.0,
        }
    }
}

impl RippleStyle {
    #[must_use]
    pub fn color(mut self, color: PackedRgba) -> Self {
        self.color = color;
        self
    }

    #[must_use]
    pub fn stroke_width(mut self, width: f32) -> Self {
        self.stroke_width = width.max(0.0);
        self
    }

    #[must_use]
    pub fn ring_count(mut self, count: u32) -> Self {
        self.ring_count = count;
        self
    }

    #[must_use]
    pub fn period_ms(mut self, period_ms: u64) -> Self {
        self.period_ms = period_ms;
        self
    }

    #[must_use]
    pub fn max_radius(mut self, radius: f32) -> Self {
        self.max_radius = radius.max(0.0);
        self
    }

    /// Rings for a loop at `progress` in `[0, 1)`.
    ///
    /// Ring `i` runs `i * 0.3` ahead of the loop, wrapped into `[0, 1)`. Its
    /// radius grows from `base_radius` by up to `max_radius` while its
    /// opacity fades linearly from 0.4 to 0.
    #[must_use]
    pub fn rings(&self, base_radius: f32, progress: f32) -> SmallVec<[Ring; 4]> {
        (0..self.ring_count)
            .map(|i| {
                let offset = (progress + i as f32 * RIPPLE_PHASE_STEP).rem_euclid(1.0);
                Ring {
                    radius: base_radius + offset * self.max_radius,
                    alpha: RIPPLE_START_ALPHA * (1.0 - offset),
                }
            })
            .collect()
    }
}

/// A single ring breathing in and out.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PulseStyle {
    pub color: PackedRgba,
    pub stroke_width: f32,
    pub period_ms: u64,
    pub max_radius: f32,
}

impl Default for PulseStyle {
    fn default() -> Self {
        Self {
            color: PackedRgba::CYAN,
            stroke_width: 20.0,
            period_ms: 1000,
            max_radius: 24.0,
        }
    }
}

impl PulseStyle {
    #[must_use]
    pub fn color(mut self, color: PackedRgba) -> Self {
        self.color = color;
        self
    }

    #[must_use]
    pub fn stroke_width(mut self, width: f32) -> Self {
        self.stroke_width = width.max(0.0);
        self
    }

    #[must_use]
    pub fn period_ms(mut self, period_ms: u64) -> Self {
        self.period_ms = period_ms;
        self
    }

    #[must_use]
    pub fn max_radius(mut self, radius: f32) -> Self {
        self.max_radius = radius.max(0.0);
        self
    }

    /// Ring for an eased ping-pong value in `[0, 1]`.
    #[must_use]
    pub fn ring(&self, base_radius: f32, value: f32) -> Ring {
        Ring {
            radius: base_radius + value.clamp(0.0, 1.0) * self.max_radius,
            alpha: PULSE_ALPHA,
        }
    }
}

/// How the active step's target is highlighted.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HighlightStyle {
    /// A static hole of the given shape.
    Standard(CutoutShape),
    /// Circular hole with expanding, fading rings.
    WaterDropRipple(RippleStyle),
    /// Circular hole with one oscillating ring.
    PulsingCircle(PulseStyle),
}

impl Default for HighlightStyle {
    fn default() -> Self {
        Self::Standard(CutoutShape::Rect)
    }
}

impl HighlightStyle {
    /// Ripple with default parameters.
    #[must_use]
    pub fn ripple() -> Self {
        Self::WaterDropRipple(RippleStyle::default())
    }

    /// Pulse with default parameters.
    #[must_use]
    pub fn pulse() -> Self {
        Self::PulsingCircle(PulseStyle::default())
    }

    /// Shape of the erased hole. Ring styles always cut a circle.
    #[must_use]
    pub fn cutout_shape(&self) -> CutoutShape {
        match self {
            Self::Standard(shape) => *shape,
            Self::WaterDropRipple(_) | Self::PulsingCircle(_) => CutoutShape::Circle,
        }
    }

    /// Whether the style needs a looping ticker.
    #[must_use]
    pub fn is_animated(&self) -> bool {
        !matches!(self, Self::Standard(_))
    }
}
