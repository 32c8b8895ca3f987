#![forbid(unsafe_code)]

//! Bubble visual style.

use spotlight_core::geometry::{Direction, Sides, Size, finite_or_zero};
use spotlight_render::color::PackedRgba;

use super::bubble::{ArrowPosition, BubbleShape};

/// Appearance of a tooltip bubble.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BubbleStyle {
    pub background: PackedRgba,
    pub corner_radius: f32,
    pub arrow_size: f32,
    /// Space between the body edge and the content.
    pub padding: Sides,
}

impl Default for BubbleStyle {
    fn default() -> Self {
        Self {
            background: PackedRgba::WHITE,
            corner_radius: 8.0,
            arrow_size: 8.0,
            padding: Sides::all(0.0),
        }
    }
}

impl BubbleStyle {
    #[must_use]
    pub fn background(mut self, color: PackedRgba) -> Self {
        self.background = color;
        self
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
    pub fn padding(mut self, padding: impl Into<Sides>) -> Self {
        self.padding = padding.into();
        self
    }

    /// Insets from the bubble edge to its content: the padding plus the
    /// arrow strip on the pointing side.
    #[must_use]
    pub fn content_insets(&self, direction: Direction) -> Sides {
        self.padding.with_pointing_side(direction, self.arrow_size)
    }

    /// Total bubble size around content of `content` size.
    #[must_use]
    pub fn bubble_size(&self, content: Size, direction: Direction) -> Size {
        let insets = self.content_insets(direction);
        Size::new(
            content.width + insets.horizontal_sum(),
            content.height + insets.vertical_sum(),
        )
    }

    /// Outline parameters for this style.
    #[must_use]
    pub fn shape(&self, direction: Direction, arrow: ArrowPosition) -> BubbleShape {
        BubbleShape::new(direction)
            .corner_radius(self.corner_radius)
            .arrow_size(self.arrow_size)
            .arrow(arrow)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insets_grow_on_pointing_side() {
        let style = BubbleStyle::default().padding(4.0);
        assert_eq!(
            style.content_insets(Direction::Bottom),
            Sides::new(12.0, 4.0, 4.0, 4.0)
        );
        assert_eq!(
            style.content_insets(Direction::Top),
            Sides::new(4.0, 4.0, 12.0, 4.0)
        );
        assert_eq!(
            style.content_insets(Direction::Start),
            Sides::new(4.0, 12.0, 4.0, 4.0)
        );
        assert_eq!(
            style.content_insets(Direction::End),
            Sides::new(4.0, 4.0, 4.0, 12.0)
        );
    }

    #[test]
    fn bubble_size_adds_insets() {
        let style = BubbleStyle::default().padding(Sides::new(1.0, 2.0, 3.0, 4.0));
        let size = style.bubble_size(Size::new(100.0, 40.0), Direction::Bottom);
        assert_eq!(size, Size::new(106.0, 52.0));
    }

    #[test]
    fn shape_carries_style() {
        let shape = BubbleStyle::default()
            .corner_radius(12.0)
            .arrow_size(6.0)
            .shape(Direction::End, ArrowPosition::Exact(10.0));
        assert_eq!(shape.corner_radius, 12.0);
        assert_eq!(shape.arrow_size, 6.0);
        assert_eq!(shape.direction, Direction::End);
    }
}
