//! Property-based invariant tests for vector paths and cutout shapes.

use proptest::prelude::*;
use spotlight_core::geometry::{Point, Rect};
use spotlight_render::path::Path;
use spotlight_render::shape::CutoutShape;

fn rect_strategy() -> impl Strategy<Value = Rect> {
    (-500.0f32..500.0, -500.0f32..500.0, 1.0f32..400.0, 1.0f32..400.0)
        .prop_map(|(x, y, w, h)| Rect::new(x, y, x + w, y + h))
}

fn no_consecutive_duplicates(poly: &[Point]) -> bool {
    let n = poly.len();
    (0..n).all(|i| !poly[i].approx_eq(poly[(i + 1) % n]))
}

proptest! {
    #[test]
    fn round_rect_bounds_equal_rect(rect in rect_strategy(), radius in 0.0f32..200.0) {
        let path = Path::round_rect(rect, radius);
        let b = path.bounds();
        prop_assert!((b.left - rect.left).abs() < 1e-2);
        prop_assert!((b.top - rect.top).abs() < 1e-2);
        prop_assert!((b.right - rect.right).abs() < 1e-2);
        prop_assert!((b.bottom - rect.bottom).abs() < 1e-2);
    }

    #[test]
    fn flattened_outlines_are_closed_without_duplicates(
        rect in rect_strategy(),
        radius in 0.0f32..50.0,
    ) {
        for shape in [
            CutoutShape::Rect,
            CutoutShape::RoundedRect { corner_radius: radius },
            CutoutShape::Circle,
        ] {
            let path = shape.outline(&rect);
            prop_assert!(path.is_closed());
            let polys = path.flatten(0.25);
            prop_assert_eq!(polys.len(), 1);
            prop_assert!(polys[0].len() >= 3);
            prop_assert!(no_consecutive_duplicates(&polys[0]));
        }
    }

    #[test]
    fn center_is_inside_every_cutout(rect in rect_strategy(), radius in 0.0f32..50.0) {
        let c = rect.center();
        prop_assert!(CutoutShape::Rect.contains(&rect, c));
        let rounded = CutoutShape::RoundedRect { corner_radius: radius };
        prop_assert!(rounded.contains(&rect, c));
        prop_assert!(CutoutShape::Circle.contains(&rect, c));
    }

    #[test]
    fn translation_moves_bounds(rect in rect_strategy(), dx in -100.0f32..100.0, dy in -100.0f32..100.0) {
        let path = Path::round_rect(rect, 8.0);
        let moved = path.translated(dx, dy).bounds();
        let expected = rect.translate(dx, dy);
        prop_assert!((moved.left - expected.left).abs() < 1e-2);
        prop_assert!((moved.top - expected.top).abs() < 1e-2);
        prop_assert!((moved.right - expected.right).abs() < 1e-2);
        prop_assert!((moved.bottom - expected.bottom).abs() < 1e-2);
    }
}
