#![forbid(unsafe_code)]

//! The host drawing capability.
//!
//! Spotlight never rasterizes. Compositors describe a frame as calls on a
//! [`Canvas`], which the host implements on top of its own 2D API. The
//! only non-trivial requirement is [`BlendMode::Clear`]: drawing with it
//! must zero the destination pixels inside the current offscreen layer,
//! which is how cutouts punch through the dim rectangle.
//!
//! [`RecordingCanvas`] is a headless implementation that records every
//! call and can replay them to sample the composited color at a point.

use spotlight_core::geometry::{Point, Rect};

use crate::color::PackedRgba;
use crate::path::{DEFAULT_TOLERANCE, Path};

/// How a draw combines with what is already in the layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlendMode {
    /// Normal alpha compositing.
    #[default]
    SrcOver,
    /// Zero the destination wherever the shape covers.
    Clear,
}

/// Fill the shape interior or stroke its outline.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum PaintStyle {
    #[default]
    Fill,
    /// Stroke centered on the outline with the given width.
    Stroke(f32),
}

/// Color, blend, and style for one draw call.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Paint {
    pub color: PackedRgba,
    pub blend: BlendMode,
    pub style: PaintStyle,
}

impl Paint {
    /// Solid source-over fill.
    #[must_use]
    pub const fn fill(color: PackedRgba) -> Self {
        Self {
            color,
            blend: BlendMode::SrcOver,
            style: PaintStyle::Fill,
        }
    }

    /// Source-over stroke of `width`.
    #[must_use]
    pub const fn stroke(color: PackedRgba, width: f32) -> Self {
        Self {
            color,
            blend: BlendMode::SrcOver,
            style: PaintStyle::Stroke(width),
        }
    }

    /// Clear-mode fill used to erase cutouts.
    #[must_use]
    pub const fn clear() -> Self {
        Self {
            color: PackedRgba::TRANSPARENT,
            blend: BlendMode::Clear,
            style: PaintStyle::Fill,
        }
    }

    #[must_use]
    pub const fn is_clear(&self) -> bool {
        matches!(self.blend, BlendMode::Clear)
    }
}

/// Drawing surface provided by the host.
///
/// Calls between [`save_layer`](Canvas::save_layer) and
/// [`restore`](Canvas::restore) render into an offscreen layer that is
/// composited source-over onto the parent on restore. Clips set inside a
/// layer are discarded on restore.
pub trait Canvas {
    /// Begin an offscreen layer covering `bounds`.
    fn save_layer(&mut self, bounds: Rect);

    /// Composite and pop the innermost layer.
    fn restore(&mut self);

    /// Intersect the current clip with `rect`.
    fn clip_rect(&mut self, rect: Rect);

    fn draw_rect(&mut self, rect: Rect, paint: &Paint);

    fn draw_round_rect(&mut self, rect: Rect, radius: f32, paint: &Paint);

    fn draw_circle(&mut self, center: Point, radius: f32, paint: &Paint);

    fn draw_path(&mut self, path: &Path, paint: &Paint);
}

// ============================================================================
// Recording canvas
// ============================================================================

/// A recorded canvas call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    SaveLayer(Rect),
    Restore,
    ClipRect(Rect),
    Rect {
        rect: Rect,
        paint: Paint,
    },
    RoundRect {
        rect: Rect,
        radius: f32,
        paint: Paint,
    },
    Circle {
        center: Point,
        radius: f32,
        paint: Paint,
    },
    Path {
        path: Path,
        paint: Paint,
    },
}

impl DrawOp {
    /// Paint of a draw op, `None` for state ops.
    #[must_use]
    pub fn paint(&self) -> Option<&Paint> {
        match self {
            Self::Rect { paint, .. }
            | Self::RoundRect { paint, .. }
            | Self::Circle { paint, .. }
            | Self::Path { paint, .. } => Some(paint),
            Self::SaveLayer(_) | Self::Restore | Self::ClipRect(_) => None,
        }
    }

    fn covers(&self, p: Point) -> bool {
        let Some(paint) = self.paint() else {
            return false;
        };
        let half = match paint.style {
            PaintStyle::Fill => None,
            PaintStyle::Stroke(w) => Some(w.max(0.0) / 2.0),
        };
        match self {
            Self::Rect { rect, .. } => match half {
                None => rect.contains(p),
                Some(h) => near_outline(&Path::rect(*rect), p, h),
            },
            Self::RoundRect { rect, radius, .. } => {
                let outline = Path::round_rect(*rect, *radius);
                match half {
                    None => outline.contains(p),
                    Some(h) => near_outline(&outline, p, h),
                }
            }
            Self::Circle { center, radius, .. } => {
                let d = ((p.x - center.x).powi(2) + (p.y - center.y).powi(2)).sqrt();
                match half {
                    None => d <= *radius,
                    Some(h) => (d - radius).abs() <= h,
                }
            }
            Self::Path { path, .. } => match half {
                None => path.contains(p),
                Some(h) => near_outline(path, p, h),
            },
            Self::SaveLayer(_) | Self::Restore | Self::ClipRect(_) => false,
        }
    }
}

/// Canvas that records calls for inspection.
#[derive(Debug, Clone, Default)]
pub struct RecordingCanvas {
    ops: Vec<DrawOp>,
}

impl RecordingCanvas {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    pub fn clear(&mut self) {
        self.ops.clear();
    }

    /// Whether every `save_layer` has a matching `restore`.
    #[must_use]
    pub fn is_balanced(&self) -> bool {
        let mut depth: i64 = 0;
        for op in &self.ops {
            match op {
                DrawOp::SaveLayer(_) => depth += 1,
                DrawOp::Restore => {
                    depth -= 1;
                    if depth < 0 {
                        return false;
                    }
                }
                _ => {}
            }
        }
        depth == 0
    }

    /// Number of clear-mode draws.
    #[must_use]
    pub fn clear_count(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| op.paint().is_some_and(Paint::is_clear))
            .count()
    }

    /// Replay the recording and return the composited color at `p`.
    ///
    /// The base surface is transparent.
    #[must_use]
    pub fn sample(&self, p: Point) -> PackedRgba {
        struct Frame {
            color: PackedRgba,
            clip: Option<Rect>,
        }
        let mut stack: Vec<Frame> = Vec::new();
        let mut color = PackedRgba::TRANSPARENT;
        let mut clip: Option<Rect> = None;

        for op in &self.ops {
            match op {
                DrawOp::SaveLayer(_) => {
                    stack.push(Frame { color, clip });
                    color = PackedRgba::TRANSPARENT;
                }
                DrawOp::Restore => {
                    if let Some(parent) = stack.pop() {
                        color = color.over(parent.color);
                        clip = parent.clip;
                    }
                }
                DrawOp::ClipRect(r) => {
                    clip = Some(match clip {
                        Some(c) => c.intersection_opt(r).unwrap_or_default(),
                        None => *r,
                    });
                }
                draw => {
                    if clip.is_some_and(|c| !c.contains(p)) || !draw.covers(p) {
                        continue;
                    }
                    if let Some(paint) = draw.paint() {
                        color = match paint.blend {
                            BlendMode::Clear => PackedRgba::TRANSPARENT,
                            BlendMode::SrcOver => paint.color.over(color),
                        };
                    }
                }
            }
        }
        color
    }
}

impl Canvas for RecordingCanvas {
    fn save_layer(&mut self, bounds: Rect) {
        self.ops.push(DrawOp::SaveLayer(bounds));
    }

    fn restore(&mut self) {
        self.ops.push(DrawOp::Restore);
    }

    fn clip_rect(&mut self, rect: Rect) {
        self.ops.push(DrawOp::ClipRect(rect));
    }

    fn draw_rect(&mut self, rect: Rect, paint: &Paint) {
        self.ops.push(DrawOp::Rect {
            rect,
            paint: *paint,
        });
    }

    fn draw_round_rect(&mut self, rect: Rect, radius: f32, paint: &Paint) {
        self.ops.push(DrawOp::RoundRect {
            rect,
            radius,
            paint: *paint,
        });
    }

    fn draw_circle(&mut self, center: Point, radius: f32, paint: &Paint) {
        self.ops.push(DrawOp::Circle {
            center,
            radius,
            paint: *paint,
        });
    }

    fn draw_path(&mut self, path: &Path, paint: &Paint) {
        self.ops.push(DrawOp::Path {
            path: path.clone(),
            paint: *paint,
        });
    }
}

fn near_outline(path: &Path, p: Point, half_width: f32) -> bool {
    path.flatten(DEFAULT_TOLERANCE).iter().any(|poly| {
        let n = poly.len();
        (0..n).any(|i| segment_distance(p, poly[i], poly[(i + 1) % n]) <= half_width)
    })
}

fn segment_distance(p: Point, a: Point, b: Point) -> f32 {
    let (dx, dy) = (b.x - a.x, b.y - a.y);
    let len2 = dx * dx + dy * dy;
    let t = if len2 <= f32::EPSILON {
        0.0
    } else {
        (((p.x - a.x) * dx + (p.y - a.y) * dy) / len2).clamp(0.0, 1.0)
    };
    let (cx, cy) = (a.x + t * dx, a.y + t * dy);
    ((p.x - cx).powi(2) + (p.y - cy).powi(2)).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dim() -> PackedRgba {
        PackedRgba::BLACK.with_alpha_f32(0.7)
    }

    #[test]
    fn clear_inside_layer_punches_hole() {
        let mut canvas = RecordingCanvas::new();
        canvas.save_layer(Rect::new(0.0, 0.0, 100.0, 100.0));
        canvas.draw_rect(Rect::new(0.0, 0.0, 100.0, 100.0), &Paint::fill(dim()));
        canvas.draw_circle(Point::new(50.0, 50.0), 10.0, &Paint::clear());
        canvas.restore();

        assert!(canvas.is_balanced());
        assert_eq!(canvas.clear_count(), 1);
        assert_eq!(canvas.sample(Point::new(50.0, 50.0)).a(), 0);
        assert_eq!(canvas.sample(Point::new(5.0, 5.0)), dim());
    }

    #[test]
    fn clip_limits_drawing_and_is_dropped_on_restore() {
        let mut canvas = RecordingCanvas::new();
        canvas.save_layer(Rect::new(0.0, 0.0, 100.0, 100.0));
        canvas.clip_rect(Rect::new(0.0, 24.0, 100.0, 100.0));
        canvas.draw_rect(Rect::new(0.0, 0.0, 100.0, 100.0), &Paint::fill(dim()));
        canvas.restore();
        canvas.draw_rect(
            Rect::new(0.0, 0.0, 10.0, 10.0),
            &Paint::fill(PackedRgba::WHITE),
        );

        assert_eq!(canvas.sample(Point::new(50.0, 10.0)).a(), 0);
        assert_eq!(canvas.sample(Point::new(50.0, 30.0)), dim());
        assert_eq!(canvas.sample(Point::new(5.0, 5.0)), PackedRgba::WHITE);
    }

    #[test]
    fn stroke_circle_covers_only_band() {
        let mut canvas = RecordingCanvas::new();
        canvas.draw_circle(
            Point::new(0.0, 0.0),
            50.0,
            &Paint::stroke(PackedRgba::CYAN, 20.0),
        );
        assert_eq!(canvas.sample(Point::new(55.0, 0.0)), PackedRgba::CYAN);
        assert_eq!(canvas.sample(Point::new(20.0, 0.0)).a(), 0);
    }

    #[test]
    fn unbalanced_restore_is_detected() {
        let mut canvas = RecordingCanvas::new();
        canvas.restore();
        canvas.save_layer(Rect::default());
        assert!(!canvas.is_balanced());
    }
}
