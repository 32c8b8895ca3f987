#![forbid(unsafe_code)]

//! Vector paths built from lines and circular arcs.
//!
//! A [`Path`] is a list of [`PathCommand`]s in screen space (y grows
//! downward). Arc angles are in degrees, measured from the +x axis toward
//! +y, so a positive sweep runs clockwise on screen.
//!
//! # Invariants
//!
//! 1. The builder never emits two consecutive commands ending on the same
//!    point (within [`EPSILON`]).
//! 2. [`Path::close`] drops a trailing line back to the contour start, so a
//!    closed contour never repeats its first vertex.
//! 3. Every arc starts at the current point: a gap is bridged with an
//!    implicit `LineTo`.
//!
//! # Failure Modes
//!
//! - Non-finite coordinates are sanitized to 0 on entry.
//! - A zero-radius arc degrades to a line to its center.
//! - `flatten` with a non-positive tolerance uses [`DEFAULT_TOLERANCE`].

use smallvec::SmallVec;
use spotlight_core::geometry::{EPSILON, Point, Rect, finite_or_zero};

/// Maximum chord deviation used when no tolerance is supplied.
pub const DEFAULT_TOLERANCE: f32 = 0.25;

/// Segment cap per arc so degenerate tolerances stay bounded.
const MAX_ARC_SEGMENTS: usize = 256;

/// A single path instruction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    /// Begin a new contour.
    MoveTo(Point),
    /// Straight segment from the current point.
    LineTo(Point),
    /// Circular arc continuing from the current point.
    ArcTo {
        center: Point,
        radius: f32,
        /// Degrees from +x toward +y.
        start_angle: f32,
        /// Degrees; positive is clockwise on screen.
        sweep_angle: f32,
    },
    /// Close the current contour.
    Close,
}

/// A sequence of contours.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Path {
    commands: SmallVec<[PathCommand; 16]>,
    current: Option<Point>,
    contour_start: Option<Point>,
}

impl Path {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Axis-aligned rectangle, clockwise from the top-left corner.
    #[must_use]
    pub fn rect(rect: Rect) -> Self {
        let mut path = Self::new();
        path.move_to(Point::new(rect.left, rect.top));
        path.line_to(Point::new(rect.right, rect.top));
        path.line_to(Point::new(rect.right, rect.bottom));
        path.line_to(Point::new(rect.left, rect.bottom));
        path.close();
        path
    }

    /// Rounded rectangle. The radius is clamped to half the shorter side.
    #[must_use]
    pub fn round_rect(rect: Rect, radius: f32) -> Self {
        let r = finite_or_zero(radius)
            .max(0.0)
            .min(rect.width().min(rect.height()) / 2.0);
        if r <= EPSILON {
            return Self::rect(rect);
        }
        let mut path = Self::new();
        path.move_to(Point::new(rect.left + r, rect.top));
        path.line_to(Point::new(rect.right - r, rect.top));
        path.arc_to(Point::new(rect.right - r, rect.top + r), r, -90.0, 90.0);
        path.line_to(Point::new(rect.right, rect.bottom - r));
        path.arc_to(Point::new(rect.right - r, rect.bottom - r), r, 0.0, 90.0);
        path.line_to(Point::new(rect.left + r, rect.bottom));
        path.arc_to(Point::new(rect.left + r, rect.bottom - r), r, 90.0, 90.0);
        path.line_to(Point::new(rect.left, rect.top + r));
        path.arc_to(Point::new(rect.left + r, rect.top + r), r, 180.0, 90.0);
        path.close();
        path
    }

    /// Full circle.
    #[must_use]
    pub fn circle(center: Point, radius: f32) -> Self {
        let r = finite_or_zero(radius).max(0.0);
        let mut path = Self::new();
        path.move_to(Point::new(center.x + r, center.y));
        path.arc_to(center, r, 0.0, 360.0);
        path.close();
        path
    }

    /// Start a new contour at `p`.
    pub fn move_to(&mut self, p: Point) -> &mut Self {
        let p = sanitize(p);
        // Collapse back-to-back moves.
        if let Some(PathCommand::MoveTo(last)) = self.commands.last_mut() {
            *last = p;
        } else {
            self.commands.push(PathCommand::MoveTo(p));
        }
        self.current = Some(p);
        self.contour_start = Some(p);
        self
    }

    /// Line from the current point to `p`. Starts a contour if none is open.
    pub fn line_to(&mut self, p: Point) -> &mut Self {
        let p = sanitize(p);
        match self.current {
            None => {
                self.move_to(p);
            }
            Some(cur) if cur.approx_eq(p) => {}
            Some(_) => {
                self.commands.push(PathCommand::LineTo(p));
                self.current = Some(p);
            }
        }
        self
    }

    /// Circular arc around `center`. Angles in degrees.
    pub fn arc_to(
        &mut self,
        center: Point,
        radius: f32,
        start_angle: f32,
        sweep_angle: f32,
    ) -> &mut Self {
        let center = sanitize(center);
        let radius = finite_or_zero(radius).max(0.0);
        let start_angle = finite_or_zero(start_angle);
        let sweep_angle = finite_or_zero(sweep_angle);
        if radius <= EPSILON || sweep_angle.abs() <= EPSILON {
            return self.line_to(arc_point(center, radius, start_angle));
        }
        self.line_to(arc_point(center, radius, start_angle));
        self.commands.push(PathCommand::ArcTo {
            center,
            radius,
            start_angle,
            sweep_angle,
        });
        self.current = Some(arc_point(center, radius, start_angle + sweep_angle));
        self
    }

    /// Close the current contour.
    pub fn close(&mut self) -> &mut Self {
        let Some(start) = self.contour_start else {
            return self;
        };
        if let Some(PathCommand::LineTo(last)) = self.commands.last()
            && last.approx_eq(start)
        {
            self.commands.pop();
        }
        if !matches!(
            self.commands.last(),
            Some(PathCommand::Close) | Some(PathCommand::MoveTo(_)) | None
        ) {
            self.commands.push(PathCommand::Close);
        }
        self.current = Some(start);
        self
    }

    /// Recorded commands.
    #[must_use]
    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Whether the final contour is closed.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        matches!(self.commands.last(), Some(PathCommand::Close))
    }

    /// Number of contours.
    #[must_use]
    pub fn contour_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, PathCommand::MoveTo(_)))
            .count()
    }

    /// Exact bounding box, including arc extrema.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        let mut acc: Option<(f32, f32, f32, f32)> = None;
        let mut add = |p: Point| {
            acc = Some(match acc {
                None => (p.x, p.y, p.x, p.y),
                Some((l, t, r, b)) => (l.min(p.x), t.min(p.y), r.max(p.x), b.max(p.y)),
            });
        };
        for cmd in &self.commands {
            match *cmd {
                PathCommand::MoveTo(p) | PathCommand::LineTo(p) => add(p),
                PathCommand::ArcTo {
                    center,
                    radius,
                    start_angle,
                    sweep_angle,
                } => {
                    let (lo, hi) = if sweep_angle >= 0.0 {
                        (start_angle, start_angle + sweep_angle)
                    } else {
                        (start_angle + sweep_angle, start_angle)
                    };
                    add(arc_point(center, radius, lo));
                    add(arc_point(center, radius, hi));
                    // Cardinal extrema inside the sweep.
                    let mut k = (lo / 90.0).ceil();
                    while k * 90.0 <= hi {
                        add(arc_point(center, radius, k * 90.0));
                        k += 1.0;
                    }
                }
                PathCommand::Close => {}
            }
        }
        acc.map_or(Rect::default(), |(l, t, r, b)| Rect::new(l, t, r, b))
    }

    /// Approximate every contour as a polygon.
    ///
    /// Arcs are split so that no chord deviates from the true arc by more
    /// than `tolerance`. Closed contours do not repeat their first vertex.
    #[must_use]
    pub fn flatten(&self, tolerance: f32) -> Vec<Vec<Point>> {
        let tolerance = if tolerance.is_finite() && tolerance > 0.0 {
            tolerance
        } else {
            DEFAULT_TOLERANCE
        };
        let mut contours: Vec<Vec<Point>> = Vec::new();
        let mut current: Vec<Point> = Vec::new();
        let push = |poly: &mut Vec<Point>, p: Point| {
            if poly.last().is_none_or(|last| !last.approx_eq(p)) {
                poly.push(p);
            }
        };

        for cmd in &self.commands {
            match *cmd {
                PathCommand::MoveTo(p) => {
                    if !current.is_empty() {
                        contours.push(std::mem::take(&mut current));
                    }
                    current.push(p);
                }
                PathCommand::LineTo(p) => push(&mut current, p),
                PathCommand::ArcTo {
                    center,
                    radius,
                    start_angle,
                    sweep_angle,
                } => {
                    let segments = arc_segments(radius, sweep_angle, tolerance);
                    for i in 1..=segments {
                        let t = i as f32 / segments as f32;
                        push(
                            &mut current,
                            arc_point(center, radius, start_angle + sweep_angle * t),
                        );
                    }
                }
                PathCommand::Close => {
                    if current.len() > 1
                        && let (Some(first), Some(last)) = (current.first(), current.last())
                        && first.approx_eq(*last)
                    {
                        current.pop();
                    }
                    if !current.is_empty() {
                        contours.push(std::mem::take(&mut current));
                    }
                }
            }
        }
        if !current.is_empty() {
            contours.push(current);
        }
        contours
    }

    /// Even-odd hit test against the flattened outline.
    #[must_use]
    pub fn contains(&self, p: Point) -> bool {
        let mut inside = false;
        for poly in self.flatten(DEFAULT_TOLERANCE) {
            let n = poly.len();
            if n < 3 {
                continue;
            }
            let mut j = n - 1;
            for i in 0..n {
                let (a, b) = (poly[i], poly[j]);
                if (a.y > p.y) != (b.y > p.y) {
                    let x = a.x + (p.y - a.y) * (b.x - a.x) / (b.y - a.y);
                    if p.x < x {
                        inside = !inside;
                    }
                }
                j = i;
            }
        }
        inside
    }

    /// Uniformly scale about `origin`, then translate by `(dx, dy)`.
    #[must_use]
    pub fn transformed(&self, origin: Point, scale: f32, dx: f32, dy: f32) -> Path {
        let s = finite_or_zero(scale);
        let map = |p: Point| {
            Point::new(
                origin.x + (p.x - origin.x) * s + dx,
                origin.y + (p.y - origin.y) * s + dy,
            )
        };
        let commands = self
            .commands
            .iter()
            .map(|cmd| match *cmd {
                PathCommand::MoveTo(p) => PathCommand::MoveTo(map(p)),
                PathCommand::LineTo(p) => PathCommand::LineTo(map(p)),
                PathCommand::ArcTo {
                    center,
                    radius,
                    start_angle,
                    sweep_angle,
                } => PathCommand::ArcTo {
                    center: map(center),
                    radius: radius * s.abs(),
                    start_angle,
                    sweep_angle,
                },
                PathCommand::Close => PathCommand::Close,
            })
            .collect();
        Path {
            commands,
            current: self.current.map(map),
            contour_start: self.contour_start.map(map),
        }
    }

    /// Translate without scaling.
    #[must_use]
    pub fn translated(&self, dx: f32, dy: f32) -> Path {
        self.transformed(Point::ZERO, 1.0, dx, dy)
    }
}

/// Point on a circle at `degrees` (y-down).
#[inline]
#[must_use]
pub fn arc_point(center: Point, radius: f32, degrees: f32) -> Point {
    let rad = degrees.to_radians();
    Point::new(center.x + radius * rad.cos(), center.y + radius * rad.sin())
}

fn arc_segments(radius: f32, sweep_degrees: f32, tolerance: f32) -> usize {
    let sweep = sweep_degrees.abs().to_radians();
    if radius <= tolerance {
        return 1;
    }
    // Max angle per chord with sagitta <= tolerance.
    let step = 2.0 * (1.0 - tolerance / radius).clamp(-1.0, 1.0).acos();
    if step <= f32::EPSILON {
        return MAX_ARC_SEGMENTS;
    }
    ((sweep / step).ceil() as usize).clamp(1, MAX_ARC_SEGMENTS)
}

fn sanitize(p: Point) -> Point {
    Point::new(finite_or_zero(p.x), finite_or_zero(p.y))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_points_are_skipped() {
        let mut path = Path::new();
        path.move_to(Point::new(0.0, 0.0))
            .line_to(Point::new(10.0, 0.0))
            .line_to(Point::new(10.0, 0.0))
            .line_to(Point::new(10.0, 10.0));
        assert_eq!(path.commands().len(), 3);
    }

    #[test]
    fn close_drops_redundant_return_line() {
        let mut path = Path::new();
        path.move_to(Point::new(0.0, 0.0))
            .line_to(Point::new(10.0, 0.0))
            .line_to(Point::new(10.0, 10.0))
            .line_to(Point::new(0.0, 0.0))
            .close();
        assert!(path.is_closed());
        assert_eq!(path.commands().len(), 4);
        assert_eq!(path.flatten(0.25)[0].len(), 3);
    }

    #[test]
    fn rect_path_bounds_and_contains() {
        let r = Rect::new(10.0, 20.0, 110.0, 70.0);
        let path = Path::rect(r);
        assert!(path.bounds().approx_eq(&r));
        assert!(path.contains(Point::new(50.0, 50.0)));
        assert!(!path.contains(Point::new(5.0, 50.0)));
        assert_eq!(path.contour_count(), 1);
    }

    #[test]
    fn round_rect_bounds_match_rect() {
        let r = Rect::new(0.0, 0.0, 100.0, 40.0);
        let path = Path::round_rect(r, 8.0);
        assert!(path.bounds().approx_eq(&r));
        // Corner pixel is outside the rounded outline.
        assert!(!path.contains(Point::new(0.5, 0.5)));
        assert!(path.contains(Point::new(50.0, 20.0)));
    }

    #[test]
    fn round_rect_radius_clamps_to_half_short_side() {
        let r = Rect::new(0.0, 0.0, 100.0, 10.0);
        let path = Path::round_rect(r, 50.0);
        assert!(path.bounds().approx_eq(&r));
        let has_radius_5 = path.commands().iter().any(|c| {
            matches!(c, PathCommand::ArcTo { radius, .. } if (radius - 5.0).abs() < 1e-4)
        });
        assert!(has_radius_5);
    }

    #[test]
    fn circle_bounds_include_extrema() {
        let path = Path::circle(Point::new(50.0, 50.0), 20.0);
        assert!(path.bounds().approx_eq(&Rect::new(30.0, 30.0, 70.0, 70.0)));
        assert!(path.contains(Point::new(50.0, 50.0)));
        assert!(!path.contains(Point::new(33.0, 33.0)));
    }

    #[test]
    fn flatten_respects_tolerance() {
        let path = Path::circle(Point::ZERO, 100.0);
        let coarse = path.flatten(5.0)[0].len();
        let fine = path.flatten(0.1)[0].len();
        assert!(fine > coarse);
        for p in &path.flatten(0.1)[0] {
            let d = (p.x * p.x + p.y * p.y).sqrt();
            assert!((d - 100.0).abs() < 1e-2);
        }
    }

    #[test]
    fn arc_gap_is_bridged_with_line() {
        let mut path = Path::new();
        path.move_to(Point::new(0.0, 0.0));
        path.arc_to(Point::new(20.0, 10.0), 10.0, 180.0, 90.0);
        assert!(matches!(path.commands()[1], PathCommand::LineTo(_)));
        assert!(matches!(path.commands()[2], PathCommand::ArcTo { .. }));
    }

    #[test]
    fn transformed_scales_about_origin() {
        let path = Path::rect(Rect::new(0.0, 0.0, 100.0, 100.0));
        let scaled = path.transformed(Point::new(50.0, 100.0), 0.5, 0.0, 0.0);
        assert!(
            scaled
                .bounds()
                .approx_eq(&Rect::new(25.0, 50.0, 75.0, 100.0))
        );
        let moved = path.translated(10.0, -5.0);
        assert!(moved.bounds().approx_eq(&Rect::new(10.0, -5.0, 110.0, 95.0)));
    }

    #[test]
    fn non_finite_input_is_sanitized() {
        let mut path = Path::new();
        path.move_to(Point::new(f32::NAN, 1.0))
            .line_to(Point::new(f32::INFINITY, 5.0));
        for cmd in path.commands() {
            if let PathCommand::MoveTo(p) | PathCommand::LineTo(p) = cmd {
                assert!(p.x.is_finite() && p.y.is_finite());
            }
        }
    }
}
