#![forbid(unsafe_code)]

//! The showcase controller.
//!
//! # Role
//!
//! [`ShowcaseController`] is the single writer of the step sequence and the
//! owner of everything tied to the active step's lifetime: its tickers, its
//! tooltip layout, and its content invocation. The host drives it from one
//! thread:
//!
//! - `start` / `next` / `finish` to sequence steps,
//! - [`tick`](ShowcaseController::tick) once per frame,
//! - [`handle_pointer`](ShowcaseController::handle_pointer) for input,
//! - [`measure_bubble`](ShowcaseController::measure_bubble) whenever its
//!   tooltip content is (re)measured,
//! - [`paint`](ShowcaseController::paint) to composite the overlay.
//!
//! # Invariants
//!
//! 1. Every ticker belongs to the active step. Any transition cancels the
//!    whole set before the next step spawns its own, and an inactive
//!    controller owns no live tickers.
//! 2. The tooltip layout is forgotten on every transition, so the first
//!    measurement of a new step always resolves.
//! 3. A step's content renderer runs once per activation.
//!
//! # Failure Modes
//!
//! - Inputs while inactive are inert: pointer events pass through, painting
//!   draws nothing, measurements return `None`.
//! - Navigation requested from a click handler is deferred until routing
//!   returns (see [`Navigator`]).

use std::fmt;
use std::time::Duration;

use spotlight_core::animation::TickerSet;
use spotlight_core::event::PointerEvent;
use spotlight_core::geometry::{Direction, Size};
use spotlight_render::canvas::Canvas;
use spotlight_widgets::tooltip::{EntranceFrame, PositionResolution, Tooltip};
use spotlight_widgets::{
    ContentInvoker, OverlayFrame, PointerRoute, Sequence, SequenceEvent, SequenceView, Step,
    StepAnimations, Subscription, paint_overlay, route_pointer,
};

use crate::config::{ConfigError, ShowcaseConfig};
use crate::navigator::{NavRequest, Navigator};

/// Drives a showcase: sequencing, animation, input, and painting.
pub struct ShowcaseController {
    config: ShowcaseConfig,
    sequence: Sequence,
    tickers: TickerSet,
    animations: Option<StepAnimations>,
    tooltip: Option<Tooltip>,
    content: ContentInvoker,
    navigator: Navigator,
}

impl fmt::Debug for ShowcaseController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShowcaseController")
            .field("active", &self.is_active())
            .field("index", &self.current_index())
            .field("len", &self.sequence.len())
            .field("tickers", &self.tickers.active_count())
            .finish_non_exhaustive()
    }
}

impl Default for ShowcaseController {
    fn default() -> Self {
        Self::new(ShowcaseConfig::default())
    }
}

impl ShowcaseController {
    /// Controller with `config`, taken as is.
    #[must_use]
    pub fn new(config: ShowcaseConfig) -> Self {
        Self {
            config,
            sequence: Sequence::new(),
            tickers: TickerSet::new(),
            animations: None,
            tooltip: None,
            content: ContentInvoker::new(),
            navigator: Navigator::new(),
        }
    }

    /// Controller with `config` after validating it.
    pub fn try_new(config: ShowcaseConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(config.validated()?))
    }

    pub fn config(&self) -> &ShowcaseConfig {
        &self.config
    }

    /// Handle for queueing transitions from click handlers.
    #[must_use]
    pub fn navigator(&self) -> Navigator {
        self.navigator.clone()
    }

    /// Read handle on the sequence.
    #[must_use]
    pub fn view(&self) -> SequenceView {
        self.sequence.view()
    }

    pub fn subscribe(&self, callback: impl Fn(&SequenceEvent) + 'static) -> Subscription {
        self.sequence.subscribe(callback)
    }

    // ========================================================================
    // Sequencing
    // ========================================================================

    /// Replace the sequence with `steps` and activate the first one.
    ///
    /// An empty input leaves the showcase inactive.
    pub fn start(&mut self, steps: impl IntoIterator<Item = Step>) {
        let steps: Vec<Step> = steps.into_iter().collect();
        let span = tracing::info_span!("showcase.start", steps = steps.len());
        let _guard = span.enter();

        self.navigator.take();
        self.sequence.start(steps);
        self.activate_current();
    }

    /// Move to the next step, finishing after the last.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) {
        if !self.sequence.is_active() {
            return;
        }
        let len = self.sequence.len();
        self.sequence.next();
        if self.sequence.is_active() {
            tracing::debug!(index = self.sequence.current_index(), len, "showcase advanced");
        } else {
            tracing::debug!(len, "showcase finished");
        }
        self.activate_current();
    }

    /// End the showcase.
    pub fn finish(&mut self) {
        if !self.sequence.is_active() {
            return;
        }
        self.sequence.finish();
        tracing::debug!("showcase finished");
        self.activate_current();
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.sequence.is_active()
    }

    #[must_use]
    pub fn current_step(&self) -> Option<Step> {
        self.sequence.current_step()
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.sequence.current_index()
    }

    /// Tear down the previous step's state and spawn the current one's.
    fn activate_current(&mut self) {
        let cancelled = self.tickers.cancel_all();
        if cancelled > 0 {
            tracing::debug!(cancelled, "step tickers cancelled");
        }
        self.animations = None;
        self.tooltip = None;

        let entrance = self.config.entrance;
        let tickers = &mut self.tickers;
        self.animations = self
            .sequence
            .view()
            .with_current(|step| step.map(|s| StepAnimations::spawn(s, entrance, tickers)));
    }

    fn apply_pending(&mut self) {
        match self.navigator.take() {
            Some(NavRequest::Next) => self.next(),
            Some(NavRequest::Finish) => self.finish(),
            None => {}
        }
    }

    // ========================================================================
    // Frame driving
    // ========================================================================

    /// Advance the active step's animations by `dt` and apply any queued
    /// navigation. Returns whether anything is still animating.
    pub fn tick(&mut self, dt: Duration) -> bool {
        self.apply_pending();
        self.tickers.tick(dt);
        self.tickers.is_animating()
    }

    /// Live tickers, all owned by the active step.
    #[must_use]
    pub fn active_tickers(&self) -> usize {
        self.tickers.active_count()
    }

    /// Dim and ring values for the current frame.
    #[must_use]
    pub fn overlay_frame(&self) -> OverlayFrame {
        self.animations
            .as_ref()
            .map(|a| a.overlay_frame(&self.tickers))
            .unwrap_or_default()
    }

    /// Bubble scale and opacity for the current frame.
    #[must_use]
    pub fn entrance_frame(&self) -> EntranceFrame {
        match &self.animations {
            Some(anims) => anims.entrance_frame(&self.tickers),
            None => self.config.entrance.hidden_frame(),
        }
    }

    // ========================================================================
    // Input
    // ========================================================================

    /// Route a pointer event against the active step.
    ///
    /// Forwarded activations run the step's click handler; `Advance` moves
    /// to the next step. The host delivers the event onward only when
    /// [`PointerRoute::forwards`] is true.
    pub fn handle_pointer(&mut self, event: &PointerEvent) -> PointerRoute {
        let step = self.sequence.current_step();
        let route = route_pointer(
            step.as_ref(),
            event,
            self.config.outside_tap,
            self.config.activation,
        );
        tracing::trace!(
            route = route.as_str(),
            x = event.position.x,
            y = event.position.y,
            "pointer routed"
        );

        match route {
            PointerRoute::ForwardToTarget {
                highlight_clicked: true,
            } => {
                if let Some(step) = &step {
                    step.click();
                }
            }
            PointerRoute::Advance => self.next(),
            _ => {}
        }
        self.apply_pending();
        route
    }

    // ========================================================================
    // Tooltip
    // ========================================================================

    /// Place the tooltip bubble for content of `content` size on the
    /// `direction` side of the active highlight.
    ///
    /// Starts the entrance animation when the placement resolves. Returns
    /// `None` while inactive.
    pub fn measure_bubble(
        &mut self,
        direction: Direction,
        viewport: Size,
        content: Size,
    ) -> Option<PositionResolution> {
        let anchor = self
            .sequence
            .view()
            .with_current(|step| step.map(Step::highlight_rect))?;

        if self
            .tooltip
            .as_ref()
            .is_none_or(|t| t.direction() != direction)
        {
            self.tooltip = Some(
                Tooltip::new(direction)
                    .margin(self.config.tooltip_margin)
                    .style(self.config.bubble),
            );
        }
        let tooltip = self.tooltip.as_mut()?;
        let resolution = tooltip.measure(anchor, viewport, content);

        if resolution.resolved
            && let Some(anims) = &mut self.animations
        {
            let restarted = anims.start_entrance(&mut self.tickers);
            tracing::debug!(
                x = resolution.offset.x,
                y = resolution.offset.y,
                arrow_center = resolution.arrow_center,
                restarted,
                "bubble resolved"
            );
        }
        Some(resolution)
    }

    /// The active tooltip, once measured.
    #[must_use]
    pub fn tooltip(&self) -> Option<&Tooltip> {
        self.tooltip.as_ref()
    }

    // ========================================================================
    // Painting
    // ========================================================================

    /// Composite the overlay, then the bubble, then invoke the step's
    /// content renderer if this activation has not rendered yet.
    pub fn paint(&mut self, canvas: &mut dyn Canvas, viewport: Size) {
        let Some(step) = self.sequence.current_step() else {
            self.content.render(None, self.sequence.version());
            return;
        };
        paint_overlay(
            canvas,
            Some(&step),
            viewport,
            self.config.top_inset,
            self.overlay_frame(),
        );
        if let Some(tooltip) = &self.tooltip {
            tooltip.paint(canvas, self.entrance_frame());
        }
        self.content.render(Some(&step), self.sequence.version());
    }
}
