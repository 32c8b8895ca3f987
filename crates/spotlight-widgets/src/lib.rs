#![forbid(unsafe_code)]

//! Showcase widgets.
//!
//! # Role in Spotlight
//! `spotlight-widgets` holds the showcase's behavior on top of the render
//! kernel. Everything here is a pure function of its inputs or a small
//! single-threaded state object; nothing spawns work or blocks.
//!
//! # Primary responsibilities
//! - **Step / Sequence**: immutable steps and the single-writer sequence
//!   state machine with change notification.
//! - **Tooltip**: anchor-relative placement, the procedural bubble outline
//!   with corner flattening, and the entrance animation.
//! - **Overlay**: the dim layer with its cutout and rings, and pointer routing.
//! - **Animation**: per-step tickers for dim fade, rings, and entrance.

pub mod animation;
pub mod overlay;
pub mod sequence;
pub mod step;
pub mod style;
pub mod tooltip;

pub use animation::StepAnimations;
pub use overlay::{
    ActivationTrigger, ContentInvoker, OutsideTapPolicy, OverlayFrame, PointerRoute,
    paint_overlay, route_pointer,
};
pub use sequence::{Sequence, SequenceEvent, SequenceView, Subscription};
pub use step::Step;
pub use style::{HighlightStyle, PulseStyle, RippleStyle};
pub use tooltip::{BubbleStyle, Tooltip};
