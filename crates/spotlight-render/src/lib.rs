#![forbid(unsafe_code)]

//! Render kernel: colors, vector paths, cutout shapes, and the canvas seam.
//!
//! # Role in Spotlight
//! `spotlight-render` describes *what* to paint without painting it. The
//! host application owns the rasterizer; it implements [`canvas::Canvas`]
//! and receives fills, strokes, and clear-mode erasures expressed in
//! [`path::Path`] and [`color::PackedRgba`] values.
//!
//! # Primary responsibilities
//! - **PackedRgba**: compact RGBA color with opacity and source-over blending.
//! - **Path**: closed contours of lines and circular arcs, with bounds,
//!   flattening and even-odd hit testing.
//! - **CutoutShape**: rectangle, rounded-rectangle, or circle hole shapes.
//! - **Canvas**: the host capability trait, plus [`canvas::RecordingCanvas`]
//!   for headless tests.

pub mod canvas;
pub mod color;
pub mod path;
pub mod shape;
