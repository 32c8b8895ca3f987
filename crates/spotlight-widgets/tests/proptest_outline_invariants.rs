//! Property-based invariant tests for the bubble outline generator.

use proptest::prelude::*;
use spotlight_core::geometry::{ArrowAlignment, Direction, Point, Size};
use spotlight_render::path::PathCommand;
use spotlight_widgets::tooltip::{ArrowPosition, BubbleShape, Corner};

const CORNER_RADIUS: f32 = 8.0;
const ARROW: f32 = 8.0;

/// Small, medium, and large bubbles. Every class leaves room for both
/// corner radii plus the arrow on each edge.
const SIZE_CLASSES: [(f32, f32); 3] = [(40.0, 40.0), (150.0, 60.0), (480.0, 320.0)];

fn segments_cross(a: Point, b: Point, c: Point, d: Point) -> bool {
    let orient = |p: Point, q: Point, r: Point| (q.x - p.x) * (r.y - p.y) - (q.y - p.y) * (r.x - p.x);
    let (d1, d2) = (orient(c, d, a), orient(c, d, b));
    let (d3, d4) = (orient(a, b, c), orient(a, b, d));
    const EPS: f32 = 1e-4;
    ((d1 > EPS && d2 < -EPS) || (d1 < -EPS && d2 > EPS))
        && ((d3 > EPS && d4 < -EPS) || (d3 < -EPS && d4 > EPS))
}

fn is_simple(poly: &[Point]) -> bool {
    let n = poly.len();
    for i in 0..n {
        let (a, b) = (poly[i], poly[(i + 1) % n]);
        for j in (i + 2)..n {
            if i == 0 && j == n - 1 {
                continue;
            }
            let (c, d) = (poly[j], poly[(j + 1) % n]);
            if segments_cross(a, b, c, d) {
                return false;
            }
        }
    }
    true
}

fn check(shape: BubbleShape, size: Size) -> Result<(), TestCaseError> {
    let outline = shape.outline(size);
    prop_assert!(outline.path.is_closed());
    prop_assert_eq!(outline.path.contour_count(), 1);

    let polys = outline.path.flatten(0.25);
    prop_assert_eq!(polys.len(), 1);
    let poly = &polys[0];
    let n = poly.len();
    prop_assert!(n >= 3);
    for i in 0..n {
        prop_assert!(
            !poly[i].approx_eq(poly[(i + 1) % n]),
            "duplicate vertex at {} for {:?} {:?}",
            i,
            shape,
            size
        );
    }
    prop_assert!(is_simple(poly), "self-intersection for {:?} {:?}", shape, size);
    Ok(())
}

#[test]
fn grid_of_directions_alignments_and_sizes() {
    for direction in Direction::ALL {
        for alignment in ArrowAlignment::ALL {
            for (w, h) in SIZE_CLASSES {
                let shape = BubbleShape::new(direction)
                    .corner_radius(CORNER_RADIUS)
                    .arrow_size(ARROW)
                    .arrow(ArrowPosition::Aligned(alignment));
                check(shape, Size::new(w, h)).unwrap();
            }
        }
    }
}

#[test]
fn bottom_start_spot_check() {
    let outline = BubbleShape::new(Direction::Bottom)
        .arrow(ArrowPosition::Aligned(ArrowAlignment::Start))
        .outline(Size::new(150.0, 60.0));
    for corner in Corner::ALL {
        assert_eq!(outline.flattened.contains(corner), corner == Corner::TopLeft);
    }
    let arc_starts: Vec<f32> = outline
        .path
        .commands()
        .iter()
        .filter_map(|c| match c {
            PathCommand::ArcTo { start_angle, .. } => Some(*start_angle),
            _ => None,
        })
        .collect();
    assert!(!arc_starts.contains(&180.0));
    assert_eq!(arc_starts.len(), 3);
}

proptest! {
    #[test]
    fn exact_arrow_outlines_are_simple(
        direction in prop::sample::select(Direction::ALL.to_vec()),
        w in 2.0f32 * CORNER_RADIUS + ARROW..600.0,
        h in 2.0f32 * CORNER_RADIUS + 2.0 * ARROW..600.0,
        t in -0.2f32..1.2,
    ) {
        let size = Size::new(w + ARROW, h + ARROW);
        let edge = if direction.is_vertical() { size.width } else { size.height };
        let shape = BubbleShape::new(direction)
            .corner_radius(CORNER_RADIUS)
            .arrow_size(ARROW)
            .arrow(ArrowPosition::Exact(edge * t));
        check(shape, size)?;
        let outline = shape.outline(size);
        let body_edge = if direction.is_vertical() { outline.body.width() } else { outline.body.height() };
        prop_assert!(outline.arrow_center >= ARROW / 2.0 - 1e-3);
        prop_assert!(outline.arrow_center <= body_edge - ARROW / 2.0 + 1e-3);
    }
}
