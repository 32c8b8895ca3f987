#![forbid(unsafe_code)]

//! Tickers owned by the active step.
//!
//! [`StepAnimations`] spawns every ticker a step needs into a
//! [`TickerSet`]: the dim fade, the ring loop, and (once the bubble
//! resolves) the entrance spring and fade. The owner cancels the whole set
//! when the step changes, so no loop survives its step.

use std::time::Duration;

use spotlight_core::animation::{Easing, RepeatMode, Repeating, TickerHandle, TickerSet, Tween};

use crate::overlay::OverlayFrame;
use crate::step::Step;
use crate::style::HighlightStyle;
use crate::tooltip::{EntranceConfig, EntranceFrame};

/// Handles to the tickers of one step.
#[derive(Debug)]
pub struct StepAnimations {
    dim: Option<TickerHandle>,
    ring: Option<TickerHandle>,
    scale: Option<TickerHandle>,
    fade: Option<TickerHandle>,
    entrance: EntranceConfig,
}

impl StepAnimations {
    /// Spawn the dim fade and ring loop for `step`.
    pub fn spawn(step: &Step, entrance: EntranceConfig, tickers: &mut TickerSet) -> Self {
        let dim = (step.enable_dim_anim() && step.dim_duration_ms() > 0).then(|| {
            tickers.spawn(
                "dim",
                Tween::new(Duration::from_millis(step.dim_duration_ms())).easing(Easing::EaseOut),
            )
        });
        let ring = ring_loop(step.style()).map(|anim| tickers.spawn("ring", anim));
        Self {
            dim,
            ring,
            scale: None,
            fade: None,
            entrance,
        }
    }

    /// Start the bubble entrance.
    ///
    /// The first call spawns the entrance tickers. Later calls restart an
    /// entrance that is still running and leave a finished one alone.
    /// Returns whether the entrance (re)started.
    pub fn start_entrance(&mut self, tickers: &mut TickerSet) -> bool {
        let ids = self
            .scale
            .as_ref()
            .map(TickerHandle::id)
            .zip(self.fade.as_ref().map(TickerHandle::id));
        if let Some((scale, fade)) = ids
            && tickers.value(scale).is_some()
        {
            let done = tickers.is_complete(scale).unwrap_or(true)
                && tickers.is_complete(fade).unwrap_or(true);
            if done {
                return false;
            }
            tickers.restart(scale);
            tickers.restart(fade);
            return true;
        }
        self.scale = Some(tickers.spawn("entrance.scale", self.entrance.scale_animation()));
        self.fade = Some(tickers.spawn("entrance.fade", self.entrance.fade_animation()));
        true
    }

    /// Whether the entrance has been started.
    #[must_use]
    pub fn entrance_started(&self) -> bool {
        self.scale.is_some()
    }

    /// Dim and ring values for the current frame.
    #[must_use]
    pub fn overlay_frame(&self, tickers: &TickerSet) -> OverlayFrame {
        OverlayFrame {
            dim: self
                .dim
                .as_ref()
                .and_then(|h| tickers.value(h.id()))
                .unwrap_or(1.0),
            ring: self
                .ring
                .as_ref()
                .and_then(|h| tickers.value(h.id()))
                .unwrap_or(0.0),
        }
    }

    /// Bubble scale and opacity for the current frame.
    #[must_use]
    pub fn entrance_frame(&self, tickers: &TickerSet) -> EntranceFrame {
        let (Some(scale), Some(fade)) = (&self.scale, &self.fade) else {
            return self.entrance.hidden_frame();
        };
        match (tickers.raw_value(scale.id()), tickers.value(fade.id())) {
            (Some(scale), Some(alpha)) => EntranceFrame { scale, alpha },
            _ => EntranceFrame::SETTLED,
        }
    }

    /// Cancel every ticker this step owns.
    pub fn cancel(&self) {
        for handle in [&self.dim, &self.ring, &self.scale, &self.fade]
            .into_iter()
            .flatten()
        {
            handle.cancel();
        }
    }
}

/// The looping animation a highlight style needs, if any.
#[must_use]
pub fn ring_loop(style: &HighlightStyle) -> Option<Repeating> {
    match style {
        HighlightStyle::Standard(_) => None,
        HighlightStyle::WaterDropRipple(ripple) => Some(Repeating::from_millis(ripple.period_ms)),
        HighlightStyle::PulsingCircle(pulse) => Some(
            Repeating::from_millis(pulse.period_ms)
                .mode(RepeatMode::Reverse)
                .easing(Easing::FastOutSlowIn),
        ),
    }
}
