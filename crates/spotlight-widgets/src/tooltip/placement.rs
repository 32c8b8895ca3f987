#![forbid(unsafe_code)]

//! Anchor-relative bubble positioning.
//!
//! [`resolve_position`] is the pure placement function: it puts the
//! bubble on the requested side of the anchor, clamps it fully into the
//! viewport, and derives where along its pointing edge the arrow must sit
//! to keep pointing at the anchor's center.
//!
//! [`PositionReporter`] wraps it with a remembered last-measured size so
//! the host learns when the bubble's size has stabilized ("resolved"),
//! which is what triggers the entrance animation.
//!
//! # Invariants
//!
//! 1. When the bubble fits, `0 <= x <= viewport.w - bubble.w` and
//!    `0 <= y <= viewport.h - bubble.h`.
//! 2. A bubble larger than the viewport is pinned to 0 on that axis.
//! 3. `0 <= arrow_center <= bubble extent` along the pointing edge.
//! 4. Inputs are re-normalized on entry, so fields set directly to NaN,
//!    infinity, or negative extents never reach the arithmetic.

use spotlight_core::geometry::{Direction, Point, Rect, Size, finite_or_zero};

/// Default gap between the anchor and the bubble.
pub const DEFAULT_MARGIN: f32 = 8.0;

/// A resolved bubble placement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// Top-left of the bubble in viewport coordinates.
    pub offset: Point,
    /// Arrow coordinate along the pointing edge, from the bubble's left
    /// (Top/Bottom) or top (Start/End).
    pub arrow_center: f32,
}

impl Placement {
    /// Bubble rectangle for a bubble of `size` at this placement.
    #[must_use]
    pub fn rect(&self, size: Size) -> Rect {
        Rect::from_origin_size(self.offset, size)
    }
}

/// Result of one measurement pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionResolution {
    pub offset: Point,
    pub arrow_center: f32,
    /// True the first time and whenever the measured size changed.
    pub resolved: bool,
}

/// Place a bubble of `bubble` size on `direction` side of `anchor`.
#[must_use]
pub fn resolve_position(
    anchor: Rect,
    direction: Direction,
    margin: f32,
    viewport: Size,
    bubble: Size,
) -> Placement {
    let anchor = Rect::new(anchor.left, anchor.top, anchor.right, anchor.bottom);
    let viewport = Size::new(viewport.width, viewport.height);
    let bubble = Size::new(bubble.width, bubble.height);
    let margin = finite_or_zero(margin);
    let (w, h) = (bubble.width, bubble.height);

    let (raw_x, raw_y) = match direction {
        Direction::Top => (anchor.center_x() - w / 2.0, anchor.top - h - margin),
        Direction::Bottom => (anchor.center_x() - w / 2.0, anchor.bottom + margin),
        Direction::Start => (anchor.left - w - margin, anchor.center_y() - h / 2.0),
        Direction::End => (anchor.right + margin, anchor.center_y() - h / 2.0),
    };

    // Edges near f32::MAX can still overflow to infinity here.
    let x = finite_or_zero(raw_x).clamp(0.0, (viewport.width - w).max(0.0));
    let y = finite_or_zero(raw_y).clamp(0.0, (viewport.height - h).max(0.0));

    let arrow_center = if direction.is_vertical() {
        finite_or_zero(anchor.center_x() - x).clamp(0.0, w)
    } else {
        finite_or_zero(anchor.center_y() - y).clamp(0.0, h)
    };

    Placement {
        offset: Point::new(x, y),
        arrow_center,
    }
}

/// Callback fired when a placement resolves.
pub type ResolvedCallback = Box<dyn FnMut(&Placement)>;

/// Memoizes the last measured bubble size and reports resolution.
#[derive(Default)]
pub struct PositionReporter {
    last_size: Option<Size>,
    on_resolved: Option<ResolvedCallback>,
}

impl std::fmt::Debug for PositionReporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PositionReporter")
            .field("last_size", &self.last_size)
            .field("on_resolved", &self.on_resolved.is_some())
            .finish()
    }
}

impl PositionReporter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback for resolution events.
    #[must_use]
    pub fn on_resolved(mut self, callback: impl FnMut(&Placement) + 'static) -> Self {
        self.on_resolved = Some(Box::new(callback));
        self
    }

    /// Last size seen by [`on_measure`](Self::on_measure).
    #[must_use]
    pub fn last_size(&self) -> Option<Size> {
        self.last_size
    }

    /// Forget the remembered size so the next measurement resolves again.
    pub fn reset(&mut self) {
        self.last_size = None;
    }

    /// Handle a measurement of the bubble.
    pub fn on_measure(
        &mut self,
        anchor: Rect,
        direction: Direction,
        margin: f32,
        viewport: Size,
        bubble: Size,
    ) -> PositionResolution {
        let bubble = Size::new(bubble.width, bubble.height);
        let placement = resolve_position(anchor, direction, margin, viewport, bubble);
        let resolved = self.last_size.is_none_or(|last| !last.approx_eq(&bubble));
        if resolved {
            self.last_size = Some(bubble);
            if let Some(cb) = self.on_resolved.as_mut() {
                cb(&placement);
            }
        }
        PositionResolution {
            offset: placement.offset,
            arrow_center: placement.arrow_center,
            resolved,
        }
    }
}
