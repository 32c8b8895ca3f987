#![forbid(unsafe_code)]

//! Packed RGBA colors.

/// A color packed as `0xRRGGBBAA`.
///
/// Channels are straight (not premultiplied) 8-bit values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct PackedRgba(pub u32);

impl PackedRgba {
    pub const TRANSPARENT: Self = Self::rgba(0, 0, 0, 0);
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const CYAN: Self = Self::rgb(0, 255, 255);

    /// Create an opaque color.
    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    /// Create a color with explicit alpha.
    #[inline]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self(((r as u32) << 24) | ((g as u32) << 16) | ((b as u32) << 8) | a as u32)
    }

    #[inline]
    pub const fn r(self) -> u8 {
        (self.0 >> 24) as u8
    }

    #[inline]
    pub const fn g(self) -> u8 {
        (self.0 >> 16) as u8
    }

    #[inline]
    pub const fn b(self) -> u8 {
        (self.0 >> 8) as u8
    }

    #[inline]
    pub const fn a(self) -> u8 {
        self.0 as u8
    }

    /// Alpha as a float in `[0, 1]`.
    #[inline]
    pub fn alpha_f32(self) -> f32 {
        f32::from(self.a()) / 255.0
    }

    /// Replace the alpha channel.
    #[inline]
    #[must_use]
    pub const fn with_alpha(self, a: u8) -> Self {
        Self::rgba(self.r(), self.g(), self.b(), a)
    }

    /// Replace the alpha channel with a float opacity (clamped to `[0, 1]`).
    #[must_use]
    pub fn with_alpha_f32(self, alpha: f32) -> Self {
        self.with_alpha(unit_to_u8(alpha))
    }

    /// Multiply the existing alpha by `opacity` (clamped to `[0, 1]`).
    #[must_use]
    pub fn with_opacity(self, opacity: f32) -> Self {
        self.with_alpha(unit_to_u8(self.alpha_f32() * unit(opacity)))
    }

    /// Source-over composite of `self` on top of `dst`.
    #[must_use]
    pub fn over(self, dst: PackedRgba) -> PackedRgba {
        let sa = self.alpha_f32();
        let da = dst.alpha_f32();
        let out_a = sa + da * (1.0 - sa);
        if out_a <= 0.0 {
            return Self::TRANSPARENT;
        }
        let channel = |s: u8, d: u8| {
            let c = (f32::from(s) * sa + f32::from(d) * da * (1.0 - sa)) / out_a;
            c.round().clamp(0.0, 255.0) as u8
        };
        Self::rgba(
            channel(self.r(), dst.r()),
            channel(self.g(), dst.g()),
            channel(self.b(), dst.b()),
            unit_to_u8(out_a),
        )
    }
}

#[inline]
fn unit(v: f32) -> f32 {
    if v.is_finite() { v.clamp(0.0, 1.0) } else { 0.0 }
}

#[inline]
fn unit_to_u8(v: f32) -> u8 {
    (unit(v) * 255.0).round() as u8
}
