#![forbid(unsafe_code)]

//! Geometric primitives.
//!
//! All coordinates are absolute screen pixels as `f32`, origin at the
//! top-left, `y` growing downward.
//!
//! # Invariants
//!
//! 1. A [`Rect`] always satisfies `left <= right` and `top <= bottom`.
//! 2. Non-finite inputs (NaN, ±inf) are normalized to `0.0` on
//!    construction so that no derived value is ever NaN.

/// Tolerance used by the approximate comparisons in this crate.
pub const EPSILON: f32 = 1e-3;

/// Replace a non-finite value with `0.0`.
#[inline]
#[must_use]
pub fn finite_or_zero(v: f32) -> f32 {
    if v.is_finite() { v } else { 0.0 }
}

/// Approximate float equality within [`EPSILON`].
#[inline]
#[must_use]
pub fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() <= EPSILON
}

/// A point in screen space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    /// The origin.
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Offset this point by `(dx, dy)`.
    #[inline]
    #[must_use]
    pub fn translate(self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// Approximate equality within [`EPSILON`] on both axes.
    #[inline]
    #[must_use]
    pub fn approx_eq(self, other: Point) -> bool {
        approx_eq(self.x, other.x) && approx_eq(self.y, other.y)
    }
}

/// A width/height pair. Both components are non-negative.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    /// Zero size.
    pub const ZERO: Self = Self {
        width: 0.0,
        height: 0.0,
    };

    /// Create a size, clamping negative or non-finite components to zero.
    #[inline]
    #[must_use]
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: finite_or_zero(width).max(0.0),
            height: finite_or_zero(height).max(0.0),
        }
    }

    /// The shorter of the two sides.
    #[inline]
    #[must_use]
    pub fn min_side(&self) -> f32 {
        self.width.min(self.height)
    }

    /// Approximate equality within [`EPSILON`].
    #[inline]
    #[must_use]
    pub fn approx_eq(&self, other: &Size) -> bool {
        approx_eq(self.width, other.width) && approx_eq(self.height, other.height)
    }
}

/// An axis-aligned rectangle described by its four edges.
///
/// Hit testing is half-open: the left/top edges are inside, the right/bottom
/// edges are outside.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Rect {
    /// Create a rectangle from its edges.
    ///
    /// Swapped edges are reordered so that `left <= right` and
    /// `top <= bottom` always hold.
    #[must_use]
    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        let (l, r) = (finite_or_zero(left), finite_or_zero(right));
        let (t, b) = (finite_or_zero(top), finite_or_zero(bottom));
        Self {
            left: l.min(r),
            top: t.min(b),
            right: l.max(r),
            bottom: t.max(b),
        }
    }

    /// Create a rectangle from an origin and a size.
    #[must_use]
    pub fn from_origin_size(origin: Point, size: Size) -> Self {
        Self::new(
            origin.x,
            origin.y,
            origin.x + size.width,
            origin.y + size.height,
        )
    }

    /// Create a rectangle at the origin with the given size.
    #[must_use]
    pub fn from_size(size: Size) -> Self {
        Self::from_origin_size(Point::ZERO, size)
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    #[inline]
    pub fn size(&self) -> Size {
        Size::new(self.width(), self.height())
    }

    #[inline]
    pub fn origin(&self) -> Point {
        Point::new(self.left, self.top)
    }

    #[inline]
    pub fn center_x(&self) -> f32 {
        self.left + self.width() / 2.0
    }

    #[inline]
    pub fn center_y(&self) -> f32 {
        self.top + self.height() / 2.0
    }

    #[inline]
    pub fn center(&self) -> Point {
        Point::new(self.center_x(), self.center_y())
    }

    /// Check if the rectangle has zero area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width() <= 0.0 || self.height() <= 0.0
    }

    /// Check if a point is inside the rectangle.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.left && p.x < self.right && p.y >= self.top && p.y < self.bottom
    }

    /// Expand all four sides by `padding`. A negative padding shrinks.
    ///
    /// Shrinking past the center collapses that axis onto the center line
    /// instead of inverting the rectangle.
    #[must_use]
    pub fn inflate(&self, padding: f32) -> Rect {
        let p = finite_or_zero(padding);
        let (mut l, mut r) = (self.left - p, self.right + p);
        let (mut t, mut b) = (self.top - p, self.bottom + p);
        if l > r {
            let cx = self.center_x();
            l = cx;
            r = cx;
        }
        if t > b {
            let cy = self.center_y();
            t = cy;
            b = cy;
        }
        Rect {
            left: l,
            top: t,
            right: r,
            bottom: b,
        }
    }

    /// Shrink by per-side insets (never inverts).
    #[must_use]
    pub fn inner(&self, insets: Sides) -> Rect {
        let left = (self.left + insets.left).min(self.right);
        let top = (self.top + insets.top).min(self.bottom);
        Rect {
            left,
            top,
            right: (self.right - insets.right).max(left),
            bottom: (self.bottom - insets.bottom).max(top),
        }
    }

    /// Offset the rectangle by `(dx, dy)`.
    #[must_use]
    pub fn translate(&self, dx: f32, dy: f32) -> Rect {
        Rect {
            left: self.left + dx,
            top: self.top + dy,
            right: self.right + dx,
            bottom: self.bottom + dy,
        }
    }

    /// Compute the intersection with another rectangle, returning `None` if
    /// they do not overlap.
    #[must_use]
    pub fn intersection_opt(&self, other: &Rect) -> Option<Rect> {
        let l = self.left.max(other.left);
        let t = self.top.max(other.top);
        let r = self.right.min(other.right);
        let b = self.bottom.min(other.bottom);
        (l < r && t < b).then_some(Rect {
            left: l,
            top: t,
            right: r,
            bottom: b,
        })
    }

    /// Approximate equality of all four edges within [`EPSILON`].
    #[must_use]
    pub fn approx_eq(&self, other: &Rect) -> bool {
        approx_eq(self.left, other.left)
            && approx_eq(self.top, other.top)
            && approx_eq(self.right, other.right)
            && approx_eq(self.bottom, other.bottom)
    }
}

/// Per-side insets for padding/margin.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Sides {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Sides {
    /// Create new sides with equal values.
    pub const fn all(val: f32) -> Self {
        Self {
            top: val,
            right: val,
            bottom: val,
            left: val,
        }
    }

    /// Create new sides with specific values.
    pub const fn new(top: f32, right: f32, bottom: f32, left: f32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Sum of left and right.
    #[inline]
    pub fn horizontal_sum(&self) -> f32 {
        self.left + self.right
    }

    /// Sum of top and bottom.
    #[inline]
    pub fn vertical_sum(&self) -> f32 {
        self.top + self.bottom
    }

    /// Add `amount` to the single side facing `direction`'s anchor.
    ///
    /// A bubble placed on `Top` of its anchor points down, so its bottom
    /// side grows, and so on.
    #[must_use]
    pub fn with_pointing_side(mut self, direction: Direction, amount: f32) -> Self {
        match direction {
            Direction::Top => self.bottom += amount,
            Direction::Bottom => self.top += amount,
            Direction::Start => self.right += amount,
            Direction::End => self.left += amount,
        }
        self
    }
}

impl From<f32> for Sides {
    fn from(val: f32) -> Self {
        Self::all(val)
    }
}

/// Which side of the anchor a bubble attaches to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    /// Above the anchor; the arrow sits on the bubble's bottom edge.
    Top,
    /// Below the anchor; the arrow sits on the bubble's top edge.
    #[default]
    Bottom,
    /// Left of the anchor; the arrow sits on the bubble's right edge.
    Start,
    /// Right of the anchor; the arrow sits on the bubble's left edge.
    End,
}

impl Direction {
    /// All directions, in declaration order.
    pub const ALL: [Direction; 4] = [Self::Top, Self::Bottom, Self::Start, Self::End];

    /// Whether the bubble sits above or below the anchor, so that its
    /// arrow runs along a horizontal edge.
    #[inline]
    pub const fn is_vertical(self) -> bool {
        matches!(self, Self::Top | Self::Bottom)
    }
}

/// Where along the pointing edge the arrow tip sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ArrowAlignment {
    Start,
    #[default]
    Center,
    End,
}

impl ArrowAlignment {
    pub const ALL: [ArrowAlignment; 3] = [Self::Start, Self::Center, Self::End];
}
