#![forbid(unsafe_code)]

//! Spotlight public facade crate.
//!
//! Coach-mark overlays: dim the screen, cut a shaped hole around one target
//! at a time, optionally animate attention rings, and anchor a bubble with
//! an arrow to the target. This crate re-exports the common types from the
//! internal crates and offers a prelude for day-to-day use.
//!
//! # Example
//!
//! ```
//! use spotlight::prelude::*;
//!
//! let mut showcase = ShowcaseController::default();
//! showcase.start([
//!     Step::new(Rect::new(100.0, 200.0, 220.0, 240.0)).with_highlight_padding(8.0),
//!     Step::new(Rect::new(20.0, 600.0, 80.0, 660.0)).with_style(HighlightStyle::pulse()),
//! ]);
//!
//! let res = showcase
//!     .measure_bubble(Direction::Bottom, Size::new(400.0, 800.0), Size::new(150.0, 52.0))
//!     .unwrap();
//! assert!(res.resolved);
//!
//! let mut canvas = RecordingCanvas::new();
//! showcase.paint(&mut canvas, Size::new(400.0, 800.0));
//! assert_eq!(showcase.handle_pointer(&PointerEvent::tap(5.0, 5.0)), PointerRoute::Swallow);
//! ```

use std::fmt;

// --- Core re-exports -------------------------------------------------------

pub use spotlight_core::animation::{Animation, Easing, TickerSet};
pub use spotlight_core::event::{PointerEvent, PointerEventKind};
pub use spotlight_core::geometry::{ArrowAlignment, Direction, Point, Rect, Sides, Size};

// --- Render re-exports -----------------------------------------------------

pub use spotlight_render::canvas::{BlendMode, Canvas, DrawOp, Paint, PaintStyle, RecordingCanvas};
pub use spotlight_render::color::PackedRgba;
pub use spotlight_render::path::{Path, PathCommand};
pub use spotlight_render::shape::CutoutShape;

// --- Widget re-exports -----------------------------------------------------

pub use spotlight_widgets::tooltip::{
    BubbleOutline, BubbleShape, EntranceConfig, EntranceFrame, PositionResolution, Tooltip,
    resolve_position,
};
pub use spotlight_widgets::{
    ActivationTrigger, BubbleStyle, HighlightStyle, OutsideTapPolicy, OverlayFrame, PointerRoute,
    PulseStyle, RippleStyle, Sequence, SequenceEvent, SequenceView, Step, Subscription,
    paint_overlay, route_pointer,
};

// --- Runtime re-exports ----------------------------------------------------

pub use spotlight_runtime::{
    BoundsRegistry, ConfigError, NavRequest, Navigator, ShowcaseConfig, ShowcaseController,
};

#[cfg(feature = "tracing-json")]
pub use spotlight_core::logging::init_json_logging;

// --- Errors ---------------------------------------------------------------

/// Top-level error type for Spotlight hosts.
#[derive(Debug)]
pub enum Error {
    /// Configuration failed to load or validate.
    Config(ConfigError),
    /// I/O failure outside configuration loading.
    Io(std::io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(err) => write!(f, "config: {err}"),
            Self::Io(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            Self::Io(err) => Some(err),
        }
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

/// Standard result type for Spotlight APIs.
pub type Result<T> = std::result::Result<T, Error>;

/// Load a configuration file, picking the format from its extension
/// (`.json` is JSON, anything else TOML).
#[cfg(feature = "config")]
pub fn load_config(path: impl AsRef<std::path::Path>) -> Result<ShowcaseConfig> {
    let path = path.as_ref();
    let config = match path.extension().and_then(|e| e.to_str()) {
        Some("json") => ShowcaseConfig::from_json_file(path)?,
        _ => ShowcaseConfig::from_toml_file(path)?,
    };
    Ok(config)
}

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        CutoutShape, Direction, Error, HighlightStyle, PointerEvent, PointerRoute, Rect,
        RecordingCanvas, Result, ShowcaseConfig, ShowcaseController, Size, Step,
    };

    pub use crate::{core, render, runtime, widgets};
}

pub use spotlight_core as core;
pub use spotlight_render as render;
pub use spotlight_runtime as runtime;
pub use spotlight_widgets as widgets;
