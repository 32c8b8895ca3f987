#![forbid(unsafe_code)]

//! Dimmed-overlay compositor and pointer routing.
//!
//! # Paint order
//!
//! For the active step, inside one offscreen layer:
//!
//! 1. Clip to `y >= top_inset` so the status bar stays undimmed.
//! 2. Fill the viewport with the step's dim color, alpha scaled by the
//!    dim fade progress.
//! 3. Stroke the attention rings (ripple or pulse styles).
//! 4. Erase the cutout with a clear-mode paint.
//!
//! The layer is then composited over the host's content, leaving a true
//! hole where the cutout was erased.
//!
//! # Pointer routing
//!
//! [`route_pointer`] is pure. Activations (taps, or pointer-downs when so
//! configured) inside the padded highlight rect are forwarded to the
//! target; outside they are swallowed or advance the sequence depending on
//! [`OutsideTapPolicy`]. Other pointer events pass through inside the
//! highlight and are swallowed outside. With no active step everything
//! passes through.

use spotlight_core::event::{PointerEvent, PointerEventKind};
use spotlight_core::geometry::{Rect, Size, finite_or_zero};
use spotlight_render::canvas::{Canvas, Paint};
use spotlight_render::color::PackedRgba;
use spotlight_render::shape::CutoutShape;

use crate::step::Step;
use crate::style::{HighlightStyle, Ring};

/// What an activation outside the highlight does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum OutsideTapPolicy {
    /// Consume the event.
    #[default]
    Swallow,
    /// Consume the event and move to the next step.
    Advance,
}

/// Which pointer event kind counts as an activation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ActivationTrigger {
    #[default]
    Tap,
    PointerDown,
}

impl ActivationTrigger {
    #[must_use]
    pub fn matches(self, kind: PointerEventKind) -> bool {
        match self {
            Self::Tap => kind == PointerEventKind::Tap,
            Self::PointerDown => kind == PointerEventKind::Down,
        }
    }
}

/// Routing decision for one pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerRoute {
    /// Deliver to the host untouched.
    PassThrough,
    /// Deliver to the target; run the step's click handler if it has one.
    ForwardToTarget { highlight_clicked: bool },
    /// Consume.
    Swallow,
    /// Consume and advance the sequence.
    Advance,
}

impl PointerRoute {
    /// Whether the host should still see the event.
    #[must_use]
    pub fn forwards(self) -> bool {
        matches!(self, Self::PassThrough | Self::ForwardToTarget { .. })
    }

    /// Short label for diagnostics.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::PassThrough => "pass_through",
            Self::ForwardToTarget { .. } => "forward_to_target",
            Self::Swallow => "swallow",
            Self::Advance => "advance",
        }
    }
}

/// Route a pointer event against the active step.
#[must_use]
pub fn route_pointer(
    step: Option<&Step>,
    event: &PointerEvent,
    outside: OutsideTapPolicy,
    activation: ActivationTrigger,
) -> PointerRoute {
    let Some(step) = step else {
        return PointerRoute::PassThrough;
    };
    let inside = step.highlight_rect().contains(event.position);
    let activates = activation.matches(event.kind);
    match (inside, activates) {
        (true, true) => PointerRoute::ForwardToTarget {
            highlight_clicked: step.has_click_handler(),
        },
        (true, false) => PointerRoute::PassThrough,
        (false, true) => match outside {
            OutsideTapPolicy::Swallow => PointerRoute::Swallow,
            OutsideTapPolicy::Advance => PointerRoute::Advance,
        },
        (false, false) => PointerRoute::Swallow,
    }
}

/// Animation values for one overlay frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayFrame {
    /// Dim fade progress in `[0, 1]`.
    pub dim: f32,
    /// Ring loop value in `[0, 1]`: ripple phase or eased pulse value.
    pub ring: f32,
}

impl Default for OverlayFrame {
    fn default() -> Self {
        Self { dim: 1.0, ring: 0.0 }
    }
}

/// Paint the overlay for `step` into `canvas`. Paints nothing without a step.
pub fn paint_overlay(
    canvas: &mut dyn Canvas,
    step: Option<&Step>,
    viewport: Size,
    top_inset: f32,
    frame: OverlayFrame,
) {
    let Some(step) = step else {
        return;
    };
    let full = Rect::from_size(viewport);
    let top = finite_or_zero(top_inset).clamp(0.0, viewport.height);

    canvas.save_layer(full);
    canvas.clip_rect(Rect::new(0.0, top, viewport.width, viewport.height));
    canvas.draw_rect(
        full,
        &Paint::fill(step.dim_color().with_opacity(frame.dim)),
    );

    let hole = step.highlight_rect();
    let base_radius = CutoutShape::circle_radius(&hole);
    match step.style() {
        HighlightStyle::Standard(shape) => shape.erase(canvas, &hole),
        HighlightStyle::WaterDropRipple(ripple) => {
            for ring in ripple.rings(base_radius, frame.ring) {
                stroke_ring(canvas, &hole, ring, ripple.color, ripple.stroke_width);
            }
            CutoutShape::Circle.erase(canvas, &hole);
        }
        HighlightStyle::PulsingCircle(pulse) => {
            let ring = pulse.ring(base_radius, frame.ring);
            stroke_ring(canvas, &hole, ring, pulse.color, pulse.stroke_width);
            CutoutShape::Circle.erase(canvas, &hole);
        }
    }

    canvas.restore();
}

fn stroke_ring(
    canvas: &mut dyn Canvas,
    hole: &Rect,
    ring: Ring,
    color: PackedRgba,
    width: f32,
) {
    canvas.draw_circle(
        hole.center(),
        ring.radius,
        &Paint::stroke(color.with_alpha_f32(ring.alpha), width),
    );
}

/// Invokes each step's content renderer once per activation.
///
/// Activations are identified by the sequence version at which the step
/// became current.
#[derive(Debug, Default)]
pub struct ContentInvoker {
    last_version: Option<u64>,
}

impl ContentInvoker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Render `step` unless it was already rendered at `version`.
    /// Returns whether the renderer ran.
    pub fn render(&mut self, step: Option<&Step>, version: u64) -> bool {
        let Some(step) = step else {
            self.last_version = None;
            return false;
        };
        if self.last_version == Some(version) {
            return false;
        }
        self.last_version = Some(version);
        step.render_content()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spotlight_core::geometry::Point;
    use spotlight_render::canvas::{DrawOp, RecordingCanvas};
    use std::cell::Cell;
    use std::rc::Rc;

    fn viewport() -> Size {
        Size::new(400.0, 800.0)
    }

    fn step() -> Step {
        Step::new(Rect::new(100.0, 200.0, 220.0, 240.0)).with_highlight_padding(4.0)
    }

    #[test]
    fn no_step_paints_nothing_and_passes_through() {
        let mut canvas = RecordingCanvas::new();
        paint_overlay(&mut canvas, None, viewport(), 0.0, OverlayFrame::default());
        assert!(canvas.ops().is_empty());
        assert_eq!(
            route_pointer(
                None,
                &PointerEvent::tap(1.0, 1.0),
                OutsideTapPolicy::Advance,
                ActivationTrigger::Tap
            ),
            PointerRoute::PassThrough
        );
    }

    #[test]
    fn standard_rect_cutout_is_a_true_hole() {
        let step = step();
        let mut canvas = RecordingCanvas::new();
        paint_overlay(&mut canvas, Some(&step), viewport(), 0.0, OverlayFrame::default());

        assert!(canvas.is_balanced());
        assert_eq!(canvas.clear_count(), 1);
        assert_eq!(canvas.sample(Point::new(160.0, 220.0)).a(), 0);
        // Inside the padding, outside the raw target.
        assert_eq!(canvas.sample(Point::new(98.0, 220.0)).a(), 0);
        assert_eq!(canvas.sample(Point::new(10.0, 10.0)), step.dim_color());
    }

    #[test]
    fn top_inset_leaves_status_bar_undimmed() {
        let step = step();
        let mut canvas = RecordingCanvas::new();
        paint_overlay(&mut canvas, Some(&step), viewport(), 24.0, OverlayFrame::default());
        assert_eq!(canvas.sample(Point::new(10.0, 10.0)).a(), 0);
        assert_eq!(canvas.sample(Point::new(10.0, 30.0)), step.dim_color());
    }

    #[test]
    fn dim_progress_scales_alpha() {
        let step = step();
        let mut canvas = RecordingCanvas::new();
        paint_overlay(
            &mut canvas,
            Some(&step),
            viewport(),
            0.0,
            OverlayFrame { dim: 0.5, ring: 0.0 },
        );
        let sampled = canvas.sample(Point::new(10.0, 10.0));
        assert_eq!(sampled.a(), step.dim_color().with_opacity(0.5).a());
    }

    #[test]
    fn ripple_strokes_rings_before_circle_erase() {
        let step = step().with_style(HighlightStyle::ripple());
        let mut canvas = RecordingCanvas::new();
        paint_overlay(&mut canvas, Some(&step), viewport(), 0.0, OverlayFrame::default());

        let ops = canvas.ops();
        let strokes: Vec<_> = ops
            .iter()
            .filter(|op| matches!(op, DrawOp::Circle { paint, .. } if !paint.is_clear()))
            .collect();
        assert_eq!(strokes.len(), 3);
        match ops[ops.len() - 2] {
            DrawOp::Circle { radius, paint, .. } => {
                assert!(paint.is_clear());
                assert_eq!(radius, 64.0);
            }
            ref other => panic!("expected circle erase, got {other:?}"),
        }
        assert!(matches!(ops.last(), Some(DrawOp::Restore)));
    }

    #[test]
    fn pulse_ring_uses_constant_alpha() {
        let step = step().with_style(HighlightStyle::pulse());
        let mut canvas = RecordingCanvas::new();
        paint_overlay(
            &mut canvas,
            Some(&step),
            viewport(),
            0.0,
            OverlayFrame { dim: 1.0, ring: 1.0 },
        );
        let ring = canvas
            .ops()
            .iter()
            .find_map(|op| match op {
                DrawOp::Circle { radius, paint, .. } if !paint.is_clear() => Some((*radius, *paint)),
                _ => None,
            })
            .unwrap();
        assert_eq!(ring.0, 64.0 + 24.0);
        assert_eq!(ring.1.color, PackedRgba::CYAN.with_alpha_f32(0.3));
    }

    #[test]
    fn activation_inside_forwards() {
        let step = step().on_click_highlight(|| {});
        let route = route_pointer(
            Some(&step),
            &PointerEvent::tap(160.0, 220.0),
            OutsideTapPolicy::Advance,
            ActivationTrigger::Tap,
        );
        assert_eq!(route, PointerRoute::ForwardToTarget { highlight_clicked: true });
        assert!(route.forwards());
    }

    #[test]
    fn activation_outside_follows_policy() {
        let step = step();
        let tap = PointerEvent::tap(10.0, 10.0);
        assert_eq!(
            route_pointer(Some(&step), &tap, OutsideTapPolicy::Swallow, ActivationTrigger::Tap),
            PointerRoute::Swallow
        );
        assert_eq!(
            route_pointer(Some(&step), &tap, OutsideTapPolicy::Advance, ActivationTrigger::Tap),
            PointerRoute::Advance
        );
    }

    #[test]
    fn non_activation_events() {
        let step = step();
        let down_inside = PointerEvent::down(160.0, 220.0);
        let down_outside = PointerEvent::down(10.0, 10.0);
        assert_eq!(
            route_pointer(Some(&step), &down_inside, OutsideTapPolicy::Advance, ActivationTrigger::Tap),
            PointerRoute::PassThrough
        );
        assert_eq!(
            route_pointer(Some(&step), &down_outside, OutsideTapPolicy::Advance, ActivationTrigger::Tap),
            PointerRoute::Swallow
        );
        assert_eq!(
            route_pointer(
                Some(&step),
                &down_outside,
                OutsideTapPolicy::Advance,
                ActivationTrigger::PointerDown
            ),
            PointerRoute::Advance
        );
    }

    #[test]
    fn content_invoker_runs_once_per_version() {
        let calls = Rc::new(Cell::new(0));
        let c = Rc::clone(&calls);
        let step = step().with_render(move |_| c.set(c.get() + 1));
        let mut invoker = ContentInvoker::new();
        assert!(invoker.render(Some(&step), 1));
        assert!(!invoker.render(Some(&step), 1));
        assert!(invoker.render(Some(&step), 2));
        assert!(!invoker.render(None, 3));
        assert!(invoker.render(Some(&step), 2));
        assert_eq!(calls.get(), 3);
    }
}
