//! Property-based invariant tests for the geometry primitives.
//!
//! 1. `Rect::new` always yields ordered edges.
//! 2. `inflate(p)` followed by `inflate(-p)` restores the rectangle.
//! 3. The center of a non-empty rectangle is contained in it.
//! 4. Non-finite input never leaks NaN into derived values.

use proptest::prelude::*;
use spotlight_core::geometry::{Point, Rect};

fn coord() -> impl Strategy<Value = f32> {
    -2000.0f32..2000.0
}

fn rect() -> impl Strategy<Value = Rect> {
    (coord(), coord(), 0.0f32..800.0, 0.0f32..800.0)
        .prop_map(|(x, y, w, h)| Rect::new(x, y, x + w, y + h))
}

proptest! {
    #[test]
    fn edges_are_ordered(a in coord(), b in coord(), c in coord(), d in coord()) {
        let r = Rect::new(a, b, c, d);
        prop_assert!(r.left <= r.right);
        prop_assert!(r.top <= r.bottom);
        prop_assert!(r.width() >= 0.0 && r.height() >= 0.0);
    }

    #[test]
    fn inflate_round_trip(r in rect(), p in 0.0f32..200.0) {
        let back = r.inflate(p).inflate(-p);
        // Tolerance scales with magnitude for f32 arithmetic.
        let tol = 1e-3 + 1e-6 * (r.left.abs() + r.right.abs() + r.top.abs() + r.bottom.abs() + p);
        prop_assert!((back.left - r.left).abs() <= tol, "{back:?} vs {r:?}");
        prop_assert!((back.top - r.top).abs() <= tol);
        prop_assert!((back.right - r.right).abs() <= tol);
        prop_assert!((back.bottom - r.bottom).abs() <= tol);
    }

    #[test]
    fn center_is_inside_non_empty(r in rect()) {
        prop_assume!(r.width() > 1.0 && r.height() > 1.0);
        prop_assert!(r.contains(r.center()));
    }

    #[test]
    fn negative_inflate_never_inverts(r in rect(), p in 0.0f32..2000.0) {
        let s = r.inflate(-p);
        prop_assert!(s.left <= s.right);
        prop_assert!(s.top <= s.bottom);
    }

    #[test]
    fn non_finite_is_sanitized(x in prop_oneof![Just(f32::NAN), Just(f32::INFINITY), Just(f32::NEG_INFINITY)], y in coord()) {
        let r = Rect::new(x, y, y, x);
        prop_assert!(r.center().x.is_finite() && r.center().y.is_finite());
        prop_assert!(!r.contains(Point::new(f32::NAN, f32::NAN)));
    }
}
