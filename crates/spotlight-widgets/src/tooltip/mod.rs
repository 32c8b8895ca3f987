#![forbid(unsafe_code)]

//! Tooltip bubble anchored to the highlighted target.
//!
//! # Role
//!
//! [`Tooltip`] ties the pieces together: on every measurement of the host's
//! content it computes the bubble size from its [`BubbleStyle`], places
//! the bubble with [`placement::PositionReporter`], and regenerates the
//! outline with [`bubble::BubbleShape`], feeding the resolved arrow
//! coordinate in so the arrow keeps pointing at the anchor.
//!
//! Painting is a single filled path: the outline scaled about the
//! direction's transform origin and faded by the entrance frame.
//!
//! # Example
//!
//! ```
//! use spotlight_core::geometry::{Direction, Rect, Size};
//! use spotlight_widgets::tooltip::Tooltip;
//!
//! let mut tooltip = Tooltip::new(Direction::Bottom);
//! let res = tooltip.measure(
//!     Rect::new(100.0, 200.0, 220.0, 240.0),
//!     Size::new(400.0, 800.0),
//!     Size::new(150.0, 52.0),
//! );
//! assert!(res.resolved);
//! assert_eq!(res.offset.y, 248.0);
//! ```

pub mod bubble;
pub mod entrance;
pub mod placement;
pub mod style;

use spotlight_core::geometry::{ArrowAlignment, Direction, Rect, Size};
use spotlight_render::canvas::{Canvas, Paint};

pub use bubble::{ArrowPosition, BubbleOutline, BubbleShape, Corner, CornerSet};
pub use entrance::{EntranceConfig, EntranceFrame, transform_origin};
pub use placement::{DEFAULT_MARGIN, Placement, PositionReporter, PositionResolution, resolve_position};
pub use style::BubbleStyle;

/// Geometry of a measured tooltip.
#[derive(Debug, Clone, PartialEq)]
pub struct TooltipLayout {
    /// Bubble bounds in viewport coordinates.
    pub bubble: Rect,
    /// Where the host draws its content.
    pub content: Rect,
    /// Outline in bubble-local coordinates.
    pub outline: BubbleOutline,
}

/// A bubble attached to one side of an anchor.
#[derive(Debug)]
pub struct Tooltip {
    direction: Direction,
    margin: f32,
    style: BubbleStyle,
    alignment: Option<ArrowAlignment>,
    reporter: PositionReporter,
    layout: Option<TooltipLayout>,
}

impl Tooltip {
    /// Tooltip on `direction` side with default margin and style, arrow
    /// tracking the anchor.
    #[must_use]
    pub fn new(direction: Direction) -> Self {
        Self {
            direction,
            margin: DEFAULT_MARGIN,
            style: BubbleStyle::default(),
            alignment: None,
            reporter: PositionReporter::new(),
            layout: None,
        }
    }

    #[must_use]
    pub fn margin(mut self, margin: f32) -> Self {
        self.margin = margin;
        self
    }

    #[must_use]
    pub fn style(mut self, style: BubbleStyle) -> Self {
        self.style = style;
        self
    }

    /// Pin the arrow to a fixed alignment instead of tracking the anchor.
    #[must_use]
    pub fn arrow_alignment(mut self, alignment: ArrowAlignment) -> Self {
        self.alignment = Some(alignment);
        self
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn bubble_style(&self) -> &BubbleStyle {
        &self.style
    }

    /// Layout from the last measurement.
    pub fn layout(&self) -> Option<&TooltipLayout> {
        self.layout.as_ref()
    }

    /// Forget the layout and the remembered size.
    pub fn reset(&mut self) {
        self.reporter.reset();
        self.layout = None;
    }

    /// Handle a measurement of the host content.
    pub fn measure(&mut self, anchor: Rect, viewport: Size, content: Size) -> PositionResolution {
        let bubble_size = self.style.bubble_size(content, self.direction);
        let resolution =
            self.reporter
                .on_measure(anchor, self.direction, self.margin, viewport, bubble_size);

        let arrow = match self.alignment {
            Some(alignment) => ArrowPosition::Aligned(alignment),
            None => ArrowPosition::Exact(resolution.arrow_center),
        };
        let outline = self.style.shape(self.direction, arrow).outline(bubble_size);
        let bubble = Rect::from_origin_size(resolution.offset, bubble_size);
        let content = bubble.inner(self.style.content_insets(self.direction));
        self.layout = Some(TooltipLayout {
            bubble,
            content,
            outline,
        });
        resolution
    }

    /// Paint the bubble for an entrance frame. Nothing is drawn before the
    /// first measurement or while fully transparent.
    pub fn paint(&self, canvas: &mut dyn Canvas, frame: EntranceFrame) {
        let Some(layout) = &self.layout else {
            return;
        };
        if frame.alpha <= 0.0 {
            return;
        }
        let origin = entrance::transform_origin_point(self.direction, layout.bubble.size());
        let path = layout.outline.path.transformed(
            origin,
            frame.scale,
            layout.bubble.left,
            layout.bubble.top,
        );
        let paint = Paint::fill(self.style.background.with_opacity(frame.alpha));
        canvas.draw_path(&path, &paint);
    }
}
