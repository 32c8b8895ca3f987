#![forbid(unsafe_code)]

//! A single showcase step.
//!
//! A [`Step`] is assembled once by the host and then treated as an
//! immutable value: the sequence snapshots it on `start`, and every reader
//! only sees it through shared references. Cloning is cheap; callbacks are
//! reference-counted.

use std::fmt;
use std::rc::Rc;

use spotlight_core::geometry::{Rect, finite_or_zero};
use spotlight_render::color::PackedRgba;

use crate::style::HighlightStyle;

/// Default dim fade-in duration.
pub const DEFAULT_DIM_DURATION_MS: u64 = 800;

/// Default dim color: black at 70% opacity.
pub const DEFAULT_DIM_COLOR: PackedRgba = PackedRgba::rgba(0, 0, 0, 179);

/// Action run when the highlighted target is activated.
pub type ClickHandler = Rc<dyn Fn()>;

/// Host content renderer, invoked with the padded highlight rectangle.
pub type ContentRenderer = Rc<dyn Fn(Rect)>;

/// One entry of a showcase sequence.
#[derive(Clone)]
pub struct Step {
    target_rect: Rect,
    style: HighlightStyle,
    highlight_padding: f32,
    on_click_highlight: Option<ClickHandler>,
    dim_duration_ms: u64,
    dim_color: PackedRgba,
    enable_dim_anim: bool,
    render: Option<ContentRenderer>,
}

impl fmt::Debug for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Step")
            .field("target_rect", &self.target_rect)
            .field("style", &self.style)
            .field("highlight_padding", &self.highlight_padding)
            .field("on_click_highlight", &self.on_click_highlight.is_some())
            .field("dim_duration_ms", &self.dim_duration_ms)
            .field("dim_color", &self.dim_color)
            .field("enable_dim_anim", &self.enable_dim_anim)
            .field("render", &self.render.is_some())
            .finish()
    }
}

impl Step {
    /// Create a step highlighting `target_rect` with default styling.
    #[must_use]
    pub fn new(target_rect: Rect) -> Self {
        Self {
            target_rect,
            style: HighlightStyle::default(),
            highlight_padding: 0.0,
            on_click_highlight: None,
            dim_duration_ms: DEFAULT_DIM_DURATION_MS,
            dim_color: DEFAULT_DIM_COLOR,
            enable_dim_anim: true,
            render: None,
        }
    }

    #[must_use]
    pub fn with_style(mut self, style: HighlightStyle) -> Self {
        self.style = style;
        self
    }

    /// Extra margin around the target. Negative or non-finite values become 0.
    #[must_use]
    pub fn with_highlight_padding(mut self, padding: f32) -> Self {
        self.highlight_padding = finite_or_zero(padding).max(0.0);
        self
    }

    #[must_use]
    pub fn on_click_highlight(mut self, handler: impl Fn() + 'static) -> Self {
        self.on_click_highlight = Some(Rc::new(handler));
        self
    }

    #[must_use]
    pub fn with_dim_duration_ms(mut self, ms: u64) -> Self {
        self.dim_duration_ms = ms;
        self
    }

    #[must_use]
    pub fn with_dim_color(mut self, color: PackedRgba) -> Self {
        self.dim_color = color;
        self
    }

    #[must_use]
    pub fn with_dim_anim(mut self, enabled: bool) -> Self {
        self.enable_dim_anim = enabled;
        self
    }

    #[must_use]
    pub fn with_render(mut self, render: impl Fn(Rect) + 'static) -> Self {
        self.render = Some(Rc::new(render));
        self
    }

    pub fn target_rect(&self) -> Rect {
        self.target_rect
    }

    pub fn style(&self) -> &HighlightStyle {
        &self.style
    }

    pub fn highlight_padding(&self) -> f32 {
        self.highlight_padding
    }

    pub fn dim_duration_ms(&self) -> u64 {
        self.dim_duration_ms
    }

    pub fn dim_color(&self) -> PackedRgba {
        self.dim_color
    }

    pub fn enable_dim_anim(&self) -> bool {
        self.enable_dim_anim
    }

    pub fn has_click_handler(&self) -> bool {
        self.on_click_highlight.is_some()
    }

    /// The target inflated by the highlight padding.
    #[must_use]
    pub fn highlight_rect(&self) -> Rect {
        self.target_rect.inflate(self.highlight_padding)
    }

    /// Run the click handler. Returns whether one was set.
    pub fn click(&self) -> bool {
        match &self.on_click_highlight {
            Some(handler) => {
                handler();
                true
            }
            None => false,
        }
    }

    /// Run the content renderer with the highlight rect. Returns whether one was set.
    pub fn render_content(&self) -> bool {
        match &self.render {
            Some(render) => {
                render(self.highlight_rect());
                true
            }
            None => false,
        }
    }
}
