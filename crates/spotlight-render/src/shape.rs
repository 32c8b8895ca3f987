#![forbid(unsafe_code)]

//! Cutout shapes.
//!
//! A cutout is the transparent hole erased from the dim layer around the
//! highlighted target. Every shape is derived from the padded target
//! rectangle:
//!
//! - `Rect`: exactly the rectangle.
//! - `RoundedRect`: the rectangle with corners rounded; the radius is
//!   clamped to half the shorter side.
//! - `Circle`: centered on the rectangle with radius `max(w, h) / 2`, so
//!   the circle covers the whole target.

use spotlight_core::geometry::{Point, Rect, finite_or_zero};

use crate::canvas::{Canvas, Paint};
use crate::path::Path;

/// Shape of the hole erased around a highlighted target.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CutoutShape {
    #[default]
    Rect,
    RoundedRect {
        corner_radius: f32,
    },
    Circle,
}

impl CutoutShape {
    /// Radius of the circle that encloses `rect`.
    #[inline]
    #[must_use]
    pub fn circle_radius(rect: &Rect) -> f32 {
        rect.width().max(rect.height()) / 2.0
    }

    /// Effective corner radius for `rect`; zero for non-rounded shapes.
    #[must_use]
    pub fn effective_radius(&self, rect: &Rect) -> f32 {
        match *self {
            Self::Rect => 0.0,
            Self::RoundedRect { corner_radius } => finite_or_zero(corner_radius)
                .max(0.0)
                .min(rect.width().min(rect.height()) / 2.0),
            Self::Circle => Self::circle_radius(rect),
        }
    }

    /// Outline of the shape around `rect`.
    #[must_use]
    pub fn outline(&self, rect: &Rect) -> Path {
        match self {
            Self::Rect => Path::rect(*rect),
            Self::RoundedRect { .. } => Path::round_rect(*rect, self.effective_radius(rect)),
            Self::Circle => Path::circle(rect.center(), Self::circle_radius(rect)),
        }
    }

    /// Whether `p` falls inside the hole.
    #[must_use]
    pub fn contains(&self, rect: &Rect, p: Point) -> bool {
        match self {
            Self::Rect => rect.contains(p),
            Self::RoundedRect { .. } => self.outline(rect).contains(p),
            Self::Circle => {
                let c = rect.center();
                let r = Self::circle_radius(rect);
                (p.x - c.x).powi(2) + (p.y - c.y).powi(2) <= r * r
            }
        }
    }

    /// Erase the shape from the current layer with a clear-mode paint.
    pub fn erase(&self, canvas: &mut dyn Canvas, rect: &Rect) {
        #[cfg(feature = "tracing")]
        tracing::trace!(shape = ?self, width = rect.width(), height = rect.height(), "cutout erased");

        let paint = Paint::clear();
        match self {
            Self::Rect => canvas.draw_rect(*rect, &paint),
            Self::RoundedRect { .. } => {
                canvas.draw_round_rect(*rect, self.effective_radius(rect), &paint);
            }
            Self::Circle => {
                canvas.draw_circle(rect.center(), Self::circle_radius(rect), &paint);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{DrawOp, RecordingCanvas};

    #[test]
    fn circle_radius_covers_longer_side() {
        let r = Rect::new(0.0, 0.0, 120.0, 40.0);
        assert_eq!(CutoutShape::circle_radius(&r), 60.0);
        assert!(CutoutShape::Circle.contains(&r, Point::new(1.0, 20.0)));
    }

    #[test]
    fn rounded_radius_is_clamped() {
        let r = Rect::new(0.0, 0.0, 100.0, 30.0);
        let shape = CutoutShape::RoundedRect {
            corner_radius: 40.0,
        };
        assert_eq!(shape.effective_radius(&r), 15.0);
        let neg = CutoutShape::RoundedRect {
            corner_radius: -3.0,
        };
        assert_eq!(neg.effective_radius(&r), 0.0);
    }

    #[test]
    fn erase_uses_clear_paint() {
        let r = Rect::new(10.0, 10.0, 50.0, 30.0);
        for shape in [
            CutoutShape::Rect,
            CutoutShape::RoundedRect { corner_radius: 6.0 },
            CutoutShape::Circle,
        ] {
            let mut canvas = RecordingCanvas::new();
            shape.erase(&mut canvas, &r);
            assert_eq!(canvas.clear_count(), 1, "{shape:?}");
        }
    }

    #[test]
    fn circle_erase_is_centered() {
        let r = Rect::new(100.0, 200.0, 220.0, 240.0);
        let mut canvas = RecordingCanvas::new();
        CutoutShape::Circle.erase(&mut canvas, &r);
        match &canvas.ops()[0] {
            DrawOp::Circle { center, radius, .. } => {
                assert!(center.approx_eq(Point::new(160.0, 220.0)));
                assert_eq!(*radius, 60.0);
            }
            other => panic!("unexpected op {other:?}"),
        }
    }

    #[test]
    fn rounded_corner_is_outside() {
        let r = Rect::new(0.0, 0.0, 40.0, 40.0);
        let shape = CutoutShape::RoundedRect { corner_radius: 10.0 };
        assert!(!shape.contains(&r, Point::new(0.5, 0.5)));
        assert!(shape.contains(&r, Point::new(20.0, 20.0)));
    }
}
