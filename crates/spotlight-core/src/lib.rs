#![forbid(unsafe_code)]

//! Core: geometry, pointer events, and the animation kernel.
//!
//! # Role in Spotlight
//! `spotlight-core` is the shared coordinate model. Every other crate speaks
//! in its [`geometry::Rect`], [`geometry::Point`] and [`geometry::Size`]
//! values, and drives its animations through the [`animation`] kernel.
//!
//! # Primary responsibilities
//! - **Geometry**: float rectangles with inflate/center/contains, sides,
//!   and the [`geometry::Direction`] / [`geometry::ArrowAlignment`] enums.
//! - **Events**: host pointer events in screen coordinates.
//! - **Animation**: easing curves, springs, repeating loops, and
//!   cancellable tickers tied to the lifetime of an active step.
//!
//! # How it fits in the system
//! The render kernel (`spotlight-render`) builds paths out of these
//! primitives, the widgets (`spotlight-widgets`) run the placement and
//! compositing algorithms on them, and the runtime (`spotlight-runtime`)
//! owns the tickers.

pub mod animation;
pub mod event;
pub mod geometry;
pub mod logging;
