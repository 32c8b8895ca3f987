#![forbid(unsafe_code)]

//! Procedural bubble outline: a rounded body fused with one arrow.
//!
//! # Geometry
//!
//! The bubble occupies `(0, 0)..(w, h)` in local coordinates. The arrow
//! protrudes `arrow_size` from the body on the pointing edge, so the body
//! is the bubble minus that strip:
//!
//! | Direction | Pointing edge | Body                     |
//! |-----------|---------------|--------------------------|
//! | `Top`     | bottom        | `(0, 0, w, h - a)`       |
//! | `Bottom`  | top           | `(0, a, w, h)`           |
//! | `Start`   | right         | `(0, 0, w - a, h)`       |
//! | `End`     | left          | `(a, 0, w, h)`           |
//!
//! Arrow coordinates run along the pointing edge from its left end
//! (horizontal edges) or top end (vertical edges).
//!
//! # Corner flattening
//!
//! When the arrow is pushed toward one end of its edge, the corner at that
//! end is drawn sharp so the arrow leg can run straight into the side of
//! the body instead of crossing an arc:
//!
//! | Direction | `Start` alignment | `End` alignment |
//! |-----------|-------------------|-----------------|
//! | `Bottom`  | top-left          | top-right       |
//! | `Top`     | bottom-left       | bottom-right    |
//! | `Start`   | top-right         | bottom-right    |
//! | `End`     | top-left          | bottom-left     |
//!
//! `Center` never flattens.
//!
//! # Invariants
//!
//! 1. The outline is one closed contour with no duplicate consecutive points.
//! 2. When the edge has room for both corner radii and the arrow, the arrow
//!    base never overlaps a rounded corner.
//! 3. When it has no room, the arrow sits at the edge midpoint.

use spotlight_core::geometry::{ArrowAlignment, Direction, Point, Rect, Size, finite_or_zero};
use spotlight_render::path::Path;

/// A corner of the bubble body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomRight,
    BottomLeft,
}

impl Corner {
    pub const ALL: [Corner; 4] = [
        Self::TopLeft,
        Self::TopRight,
        Self::BottomRight,
        Self::BottomLeft,
    ];

    const fn index(self) -> usize {
        match self {
            Self::TopLeft => 0,
            Self::TopRight => 1,
            Self::BottomRight => 2,
            Self::BottomLeft => 3,
        }
    }
}

/// Which corners are drawn sharp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CornerSet([bool; 4]);

impl CornerSet {
    pub const NONE: Self = Self([false; 4]);

    #[must_use]
    pub fn with(mut self, corner: Corner) -> Self {
        self.0[corner.index()] = true;
        self
    }

    #[must_use]
    pub fn contains(&self, corner: Corner) -> bool {
        self.0[corner.index()]
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        !self.0.iter().any(|&f| f)
    }
}

/// Corners flattened for a given direction and alignment.
#[must_use]
pub fn flattened_corners(direction: Direction, alignment: ArrowAlignment) -> CornerSet {
    let corner = match (direction, alignment) {
        (_, ArrowAlignment::Center) => return CornerSet::NONE,
        (Direction::Bottom, ArrowAlignment::Start) => Corner::TopLeft,
        (Direction::Bottom, ArrowAlignment::End) => Corner::TopRight,
        (Direction::Top, ArrowAlignment::Start) => Corner::BottomLeft,
        (Direction::Top, ArrowAlignment::End) => Corner::BottomRight,
        (Direction::Start, ArrowAlignment::Start) => Corner::TopRight,
        (Direction::Start, ArrowAlignment::End) => Corner::BottomRight,
        (Direction::End, ArrowAlignment::Start) => Corner::TopLeft,
        (Direction::End, ArrowAlignment::End) => Corner::BottomLeft,
    };
    CornerSet::NONE.with(corner)
}

/// How the arrow is placed along its edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ArrowPosition {
    /// Fixed policy.
    Aligned(ArrowAlignment),
    /// Exact coordinate, typically from the positioning engine.
    Exact(f32),
}

impl Default for ArrowPosition {
    fn default() -> Self {
        Self::Aligned(ArrowAlignment::Center)
    }
}

/// Parameters of a bubble outline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BubbleShape {
    pub corner_radius: f32,
    pub arrow_size: f32,
    pub direction: Direction,
    pub arrow: ArrowPosition,
}

impl Default for BubbleShape {
    fn default() -> Self {
        Self {
            corner_radius: 8.0,
            arrow_size: 8.0,
            direction: Direction::Bottom,
            arrow: ArrowPosition::default(),
        }
    }
}

/// A generated outline and the values it was built from.
#[derive(Debug, Clone, PartialEq)]
pub struct BubbleOutline {
    pub path: Path,
    /// Body rectangle in local coordinates.
    pub body: Rect,
    /// Effective corner radius after clamping.
    pub radius: f32,
    /// Final arrow coordinate along the pointing edge.
    pub arrow_center: f32,
    pub flattened: CornerSet,
}

impl BubbleShape {
    #[must_use]
    pub fn new(direction: Direction) -> Self {
        Self {
            direction,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn corner_radius(mut self, radius: f32) -> Self {
        self.corner_radius = finite_or_zero(radius).max(0.0);
        self
    }

    #[must_use]
    pub fn arrow_size(mut self, size: f32) -> Self {
        self.arrow_size = finite_or_zero(size).max(0.0);
        self
    }

    #[must_use]
    pub fn arrow(mut self, arrow: ArrowPosition) -> Self {
        self.arrow = arrow;
        self
    }

    /// Body rectangle of a bubble of total `size`.
    #[must_use]
    pub fn body(&self, size: Size) -> Rect {
        let (w, h) = (size.width, size.height);
        let a = self.arrow_size.min(if self.direction.is_vertical() { h } else { w });
        match self.direction {
            Direction::Top => Rect::new(0.0, 0.0, w, h - a),
            Direction::Bottom => Rect::new(0.0, a, w, h),
            Direction::Start => Rect::new(0.0, 0.0, w - a, h),
            Direction::End => Rect::new(a, 0.0, w, h),
        }
    }

    /// Build the outline of a bubble whose total size is `size`.
    #[must_use]
    pub fn outline(&self, size: Size) -> BubbleOutline {
        let body = self.body(size);
        let r = finite_or_zero(self.corner_radius)
            .max(0.0)
            .min(body.width().min(body.height()) / 2.0);
        let arrow = self.arrow_size.min(if self.direction.is_vertical() {
            size.height
        } else {
            size.width
        });
        let half = arrow / 2.0;
        let edge_len = if self.direction.is_vertical() {
            body.width()
        } else {
            body.height()
        };

        let alignment = match self.arrow {
            ArrowPosition::Aligned(alignment) => alignment,
            ArrowPosition::Exact(c) => implied_alignment(finite_or_zero(c), edge_len, r, half),
        };
        let flattened = flattened_corners(self.direction, alignment);
        let (start_corner, end_corner) = edge_corners(self.direction);

        let lo = if flattened.contains(start_corner) {
            half
        } else {
            r + half
        };
        let hi = if flattened.contains(end_corner) {
            edge_len - half
        } else {
            edge_len - r - half
        };
        let mid = edge_len / 2.0;
        let arrow_center = if lo >= hi {
            #[cfg(feature = "tracing")]
            tracing::trace!(edge_len, radius = r, arrow, "arrow range collapsed, centering");
            mid
        } else {
            match self.arrow {
                ArrowPosition::Aligned(ArrowAlignment::Start) => lo,
                ArrowPosition::Aligned(ArrowAlignment::Center) => mid.clamp(lo, hi),
                ArrowPosition::Aligned(ArrowAlignment::End) => hi,
                ArrowPosition::Exact(c) => finite_or_zero(c).clamp(lo, hi),
            }
        };

        let path = trace_outline(body, r, flattened, self.direction, arrow, arrow_center);
        BubbleOutline {
            path,
            body,
            radius: r,
            arrow_center,
            flattened,
        }
    }
}

/// Corners at the start and end of the pointing edge.
const fn edge_corners(direction: Direction) -> (Corner, Corner) {
    match direction {
        Direction::Bottom => (Corner::TopLeft, Corner::TopRight),
        Direction::Top => (Corner::BottomLeft, Corner::BottomRight),
        Direction::Start => (Corner::TopRight, Corner::BottomRight),
        Direction::End => (Corner::TopLeft, Corner::BottomLeft),
    }
}

/// Alignment implied by an exact arrow coordinate: inside a corner zone
/// pushes toward that end.
fn implied_alignment(c: f32, edge_len: f32, r: f32, half: f32) -> ArrowAlignment {
    if c < r + half {
        ArrowAlignment::Start
    } else if c > edge_len - r - half {
        ArrowAlignment::End
    } else {
        ArrowAlignment::Center
    }
}

/// Walk the body clockwise from the top-left, inserting the arrow.
fn trace_outline(
    body: Rect,
    r: f32,
    flattened: CornerSet,
    direction: Direction,
    arrow: f32,
    c: f32,
) -> Path {
    let radius = |corner: Corner| if flattened.contains(corner) { 0.0 } else { r };
    let (l, t, rt, b) = (body.left, body.top, body.right, body.bottom);
    let half = arrow / 2.0;
    let has_arrow = arrow > 0.0;
    let mut path = Path::new();

    path.move_to(Point::new(l + radius(Corner::TopLeft), t));

    // Top edge, left to right.
    if has_arrow && direction == Direction::Bottom {
        path.line_to(Point::new(l + c - half, t));
        path.line_to(Point::new(l + c, t - arrow));
        path.line_to(Point::new(l + c + half, t));
    }
    let tr = radius(Corner::TopRight);
    path.line_to(Point::new(rt - tr, t));
    if tr > 0.0 {
        path.arc_to(Point::new(rt - tr, t + tr), tr, -90.0, 90.0);
    }

    // Right edge, top to bottom.
    if has_arrow && direction == Direction::Start {
        path.line_to(Point::new(rt, t + c - half));
        path.line_to(Point::new(rt + arrow, t + c));
        path.line_to(Point::new(rt, t + c + half));
    }
    let br = radius(Corner::BottomRight);
    path.line_to(Point::new(rt, b - br));
    if br > 0.0 {
        path.arc_to(Point::new(rt - br, b - br), br, 0.0, 90.0);
    }

    // Bottom edge, right to left.
    if has_arrow && direction == Direction::Top {
        path.line_to(Point::new(l + c + half, b));
        path.line_to(Point::new(l + c, b + arrow));
        path.line_to(Point::new(l + c - half, b));
    }
    let bl = radius(Corner::BottomLeft);
    path.line_to(Point::new(l + bl, b));
    if bl > 0.0 {
        path.arc_to(Point::new(l + bl, b - bl), bl, 90.0, 90.0);
    }

    // Left edge, bottom to top.
    if has_arrow && direction == Direction::End {
        path.line_to(Point::new(l, t + c + half));
        path.line_to(Point::new(l - arrow, t + c));
        path.line_to(Point::new(l, t + c - half));
    }
    let tl = radius(Corner::TopLeft);
    path.line_to(Point::new(l, t + tl));
    if tl > 0.0 {
        path.arc_to(Point::new(l + tl, t + tl), tl, 180.0, 90.0);
    }

    path.close();
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use spotlight_render::path::PathCommand;

    fn corner_arcs(outline: &BubbleOutline) -> Vec<f32> {
        outline
            .path
            .commands()
            .iter()
            .filter_map(|c| match c {
                PathCommand::ArcTo { start_angle, .. } => Some(*start_angle),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn bottom_start_flattens_top_left_only() {
        let outline = BubbleShape::new(Direction::Bottom)
            .arrow(ArrowPosition::Aligned(ArrowAlignment::Start))
            .outline(Size::new(150.0, 60.0));

        assert!(outline.flattened.contains(Corner::TopLeft));
        assert!(!outline.flattened.contains(Corner::TopRight));
        assert!(!outline.flattened.contains(Corner::BottomRight));
        assert!(!outline.flattened.contains(Corner::BottomLeft));

        // Arcs for TR (-90), BR (0), BL (90); no TL (180).
        assert_eq!(corner_arcs(&outline), vec![-90.0, 0.0, 90.0]);
        // The sharp corner is the contour's first vertex.
        assert_eq!(
            outline.path.commands()[0],
            PathCommand::MoveTo(Point::new(0.0, 8.0))
        );
        assert_eq!(outline.arrow_center, 4.0);
    }

    #[test]
    fn center_rounds_all_corners() {
        let outline = BubbleShape::new(Direction::Top).outline(Size::new(100.0, 50.0));
        assert!(outline.flattened.is_empty());
        assert_eq!(corner_arcs(&outline).len(), 4);
        assert_eq!(outline.arrow_center, 50.0);
        assert!(outline.body.approx_eq(&Rect::new(0.0, 0.0, 100.0, 42.0)));
    }

    #[test]
    fn flatten_table_matches_pointing_edge() {
        for direction in Direction::ALL {
            let (start, end) = edge_corners(direction);
            assert_eq!(
                flattened_corners(direction, ArrowAlignment::Start),
                CornerSet::NONE.with(start)
            );
            assert_eq!(
                flattened_corners(direction, ArrowAlignment::End),
                CornerSet::NONE.with(end)
            );
            assert!(flattened_corners(direction, ArrowAlignment::Center).is_empty());
        }
    }

    #[test]
    fn end_alignment_reaches_far_bound() {
        let outline = BubbleShape::new(Direction::Start)
            .arrow(ArrowPosition::Aligned(ArrowAlignment::End))
            .outline(Size::new(80.0, 100.0));
        assert!(outline.flattened.contains(Corner::BottomRight));
        assert_eq!(outline.arrow_center, 96.0);
    }

    #[test]
    fn exact_coordinate_in_corner_zone_flattens() {
        let shape = BubbleShape::new(Direction::Bottom);
        let near_start = shape.arrow(ArrowPosition::Exact(2.0)).outline(Size::new(150.0, 60.0));
        assert!(near_start.flattened.contains(Corner::TopLeft));
        assert_eq!(near_start.arrow_center, 4.0);

        let middle = shape.arrow(ArrowPosition::Exact(75.0)).outline(Size::new(150.0, 60.0));
        assert!(middle.flattened.is_empty());
        assert_eq!(middle.arrow_center, 75.0);

        let near_end = shape.arrow(ArrowPosition::Exact(149.0)).outline(Size::new(150.0, 60.0));
        assert!(near_end.flattened.contains(Corner::TopRight));
        assert_eq!(near_end.arrow_center, 146.0);
    }

    #[test]
    fn radius_clamps_to_short_body_side() {
        let outline = BubbleShape::new(Direction::Bottom)
            .corner_radius(40.0)
            .outline(Size::new(100.0, 28.0));
        assert_eq!(outline.radius, 10.0);
    }

    #[test]
    fn collapsed_range_centers_arrow() {
        let outline = BubbleShape::new(Direction::Bottom)
            .corner_radius(8.0)
            .arrow(ArrowPosition::Aligned(ArrowAlignment::End))
            .outline(Size::new(20.0, 40.0));
        assert_eq!(outline.arrow_center, 16.0);

        let tiny = BubbleShape::new(Direction::Bottom)
            .corner_radius(8.0)
            .outline(Size::new(12.0, 40.0));
        assert_eq!(tiny.arrow_center, 6.0);
    }

    #[test]
    fn outline_bounds_cover_bubble() {
        for direction in Direction::ALL {
            let outline = BubbleShape::new(direction).outline(Size::new(120.0, 80.0));
            let b = outline.path.bounds();
            assert!(b.approx_eq(&Rect::new(0.0, 0.0, 120.0, 80.0)), "{direction:?}: {b:?}");
        }
    }

    #[test]
    fn zero_arrow_is_round_rect() {
        let outline = BubbleShape::new(Direction::Bottom)
            .arrow_size(0.0)
            .outline(Size::new(50.0, 50.0));
        assert_eq!(outline.body, Rect::new(0.0, 0.0, 50.0, 50.0));
        assert!(outline.path.is_closed());
        assert_eq!(corner_arcs(&outline).len(), 4);
    }

    #[test]
    fn arrow_tip_hits_bubble_edge() {
        let outline = BubbleShape::new(Direction::Top).outline(Size::new(100.0, 50.0));
        assert!(outline.path.contains(Point::new(50.0, 49.0)));
        assert!(!outline.path.contains(Point::new(10.0, 49.0)));
    }
}
