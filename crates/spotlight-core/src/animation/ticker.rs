#![forbid(unsafe_code)]

//! Cancellable tickers.
//!
//! A [`Ticker`] wraps an [`Animation`] that must be advanced every frame
//! while some owner (typically the active showcase step) is alive. The
//! owner holds a [`TickerHandle`]; cancelling the handle, or cancelling the
//! whole [`TickerSet`], stops the ticker deterministically on the next
//! frame. A cancelled ticker is never ticked again and is pruned from the
//! set.
//!
//! Everything here is single-threaded: handles share an `Rc<Cell<bool>>`
//! flag with their ticker.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use spotlight_core::animation::{Repeating, TickerSet};
//!
//! let mut set = TickerSet::new();
//! let handle = set.spawn("ripple", Repeating::from_millis(2000));
//! set.tick(Duration::from_millis(500));
//! assert!((set.value(handle.id()).unwrap() - 0.25).abs() < 1e-4);
//!
//! handle.cancel();
//! set.tick(Duration::from_millis(16));
//! assert_eq!(set.active_count(), 0);
//! ```

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;
use std::time::Duration;

use super::Animation;

/// Identifier of a ticker within its [`TickerSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TickerId(u64);

impl TickerId {
    /// Raw numeric id.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Owner-side handle used to cancel a ticker.
#[derive(Debug, Clone)]
pub struct TickerHandle {
    id: TickerId,
    cancelled: Rc<Cell<bool>>,
}

impl TickerHandle {
    #[must_use]
    pub fn id(&self) -> TickerId {
        self.id
    }

    /// Request cancellation. Idempotent.
    pub fn cancel(&self) {
        self.cancelled.set(true);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.get()
    }
}

/// A running animation bound to a cancellation flag.
pub struct Ticker {
    id: TickerId,
    label: &'static str,
    animation: Box<dyn Animation>,
    cancelled: Rc<Cell<bool>>,
}

impl fmt::Debug for Ticker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ticker")
            .field("id", &self.id)
            .field("label", &self.label)
            .field("cancelled", &self.cancelled.get())
            .finish_non_exhaustive()
    }
}

/// The set of live tickers owned by one scope.
///
/// # Invariants
///
/// 1. Ids are never reused within a set.
/// 2. After [`cancel_all`](TickerSet::cancel_all) the set is empty.
/// 3. A cancelled ticker's value is no longer observable.
#[derive(Debug, Default)]
pub struct TickerSet {
    tickers: Vec<Ticker>,
    next_id: u64,
}

impl TickerSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a ticker driving `animation`.
    pub fn spawn(
        &mut self,
        label: &'static str,
        animation: impl Animation + 'static,
    ) -> TickerHandle {
        let id = TickerId(self.next_id);
        self.next_id += 1;
        let cancelled = Rc::new(Cell::new(false));
        self.tickers.push(Ticker {
            id,
            label,
            animation: Box::new(animation),
            cancelled: Rc::clone(&cancelled),
        });

        #[cfg(feature = "tracing")]
        tracing::trace!(ticker = id.0, label, "ticker spawned");

        TickerHandle { id, cancelled }
    }

    /// Advance every live ticker by `dt`, pruning cancelled ones first.
    pub fn tick(&mut self, dt: Duration) {
        self.prune();
        for ticker in &mut self.tickers {
            ticker.animation.tick(dt);
        }
    }

    /// Clamped value of a live ticker.
    #[must_use]
    pub fn value(&self, id: TickerId) -> Option<f32> {
        self.live(id).map(|t| t.animation.value())
    }

    /// Unclamped value of a live ticker.
    #[must_use]
    pub fn raw_value(&self, id: TickerId) -> Option<f32> {
        self.live(id).map(|t| t.animation.raw_value())
    }

    /// Whether a live ticker has completed.
    #[must_use]
    pub fn is_complete(&self, id: TickerId) -> Option<bool> {
        self.live(id).map(|t| t.animation.is_complete())
    }

    /// Restart a live ticker's animation from its initial state.
    pub fn restart(&mut self, id: TickerId) -> bool {
        match self
            .tickers
            .iter_mut()
            .find(|t| t.id == id && !t.cancelled.get())
        {
            Some(ticker) => {
                ticker.animation.reset();
                true
            }
            None => false,
        }
    }

    /// Number of tickers that are still running.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.tickers.iter().filter(|t| !t.cancelled.get()).count()
    }

    /// Whether any live ticker has not yet completed.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.tickers
            .iter()
            .any(|t| !t.cancelled.get() && !t.animation.is_complete())
    }

    /// Cancel and drop every ticker. Returns how many were live.
    pub fn cancel_all(&mut self) -> usize {
        let live = self.active_count();
        for ticker in &self.tickers {
            ticker.cancelled.set(true);
        }
        self.tickers.clear();
        live
    }

    fn live(&self, id: TickerId) -> Option<&Ticker> {
        self.tickers
            .iter()
            .find(|t| t.id == id && !t.cancelled.get())
    }

    fn prune(&mut self) {
        self.tickers.retain(|t| !t.cancelled.get());
    }
}

impl Drop for TickerSet {
    fn drop(&mut self) {
        self.cancel_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::{Repeating, Tween};

    const MS_100: Duration = Duration::from_millis(100);

    #[test]
    fn spawned_ticker_advances() {
        let mut set = TickerSet::new();
        let h = set.spawn("fade", Tween::new(Duration::from_millis(200)));
        set.tick(MS_100);
        assert!((set.value(h.id()).unwrap() - 0.5).abs() < 1e-4);
        assert_eq!(set.is_complete(h.id()), Some(false));
    }

    #[test]
    fn cancelled_ticker_is_not_observable_or_ticked() {
        let mut set = TickerSet::new();
        let h = set.spawn("loop", Repeating::from_millis(1000));
        h.cancel();
        assert!(h.is_cancelled());
        assert_eq!(set.value(h.id()), None);
        assert_eq!(set.active_count(), 0);
        set.tick(MS_100);
        assert_eq!(set.tickers.len(), 0);
    }

    #[test]
    fn cancel_all_empties_and_flags_handles() {
        let mut set = TickerSet::new();
        let a = set.spawn("a", Repeating::from_millis(1000));
        let b = set.spawn("b", Repeating::from_millis(500));
        assert_eq!(set.cancel_all(), 2);
        assert!(a.is_cancelled() && b.is_cancelled());
        assert_eq!(set.active_count(), 0);
        assert!(!set.is_animating());
    }

    #[test]
    fn ids_are_not_reused() {
        let mut set = TickerSet::new();
        let a = set.spawn("a", Tween::new(MS_100));
        set.cancel_all();
        let b = set.spawn("b", Tween::new(MS_100));
        assert_ne!(a.id(), b.id());
        assert_eq!(set.value(a.id()), None);
    }

    #[test]
    fn drop_cancels_outstanding_handles() {
        let handle = {
            let mut set = TickerSet::new();
            set.spawn("loop", Repeating::from_millis(1000))
        };
        assert!(handle.is_cancelled());
    }

    #[test]
    fn restart_resets_animation() {
        let mut set = TickerSet::new();
        let h = set.spawn("fade", Tween::new(MS_100));
        set.tick(MS_100);
        assert_eq!(set.is_complete(h.id()), Some(true));
        assert!(set.restart(h.id()));
        assert_eq!(set.value(h.id()), Some(0.0));
    }
}
