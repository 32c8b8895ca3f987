#![forbid(unsafe_code)]

//! Host pointer events.
//!
//! Hosts translate their native touch/mouse input into [`PointerEvent`]
//! values in absolute screen coordinates before handing them to the
//! overlay's router.

use crate::geometry::Point;

/// A pointer event in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    /// The type of pointer event.
    pub kind: PointerEventKind,
    /// Position of the pointer.
    pub position: Point,
}

impl PointerEvent {
    /// Create a new pointer event.
    #[must_use]
    pub const fn new(kind: PointerEventKind, position: Point) -> Self {
        Self { kind, position }
    }

    /// A completed tap at `(x, y)`.
    #[must_use]
    pub const fn tap(x: f32, y: f32) -> Self {
        Self::new(PointerEventKind::Tap, Point::new(x, y))
    }

    /// A pointer-down at `(x, y)`.
    #[must_use]
    pub const fn down(x: f32, y: f32) -> Self {
        Self::new(PointerEventKind::Down, Point::new(x, y))
    }
}

/// Pointer event types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerEventKind {
    /// Pointer pressed.
    Down,
    /// Pointer released.
    Up,
    /// Pointer moved, pressed or not.
    Move,
    /// A recognized tap gesture (press and release without travel).
    Tap,
}
