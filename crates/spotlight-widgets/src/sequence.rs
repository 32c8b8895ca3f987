#![forbid(unsafe_code)]

//! Step sequence state machine.
//!
//! # Design
//!
//! [`Sequence`] is the single writer: only it can `start`, `next`, or
//! `finish`. Readers (the compositor, the positioning engine, host code)
//! hold a [`SequenceView`], a cheap clone sharing the same
//! `Rc<RefCell<..>>` state. Every transition bumps a version counter and
//! notifies live subscribers after the borrow is released, so a reader
//! that runs after a mutation always observes it.
//!
//! # Invariants
//!
//! 1. `is_active() == (!steps.is_empty() && index < steps.len())`.
//! 2. An inactive sequence always has `index == 0` and no steps.
//! 3. `version` increments by exactly 1 per observable transition.
//! 4. Subscribers are notified in registration order.
//!
//! # Failure Modes
//!
//! - `start([])` leaves the sequence inactive (finishing it if it was active).
//! - `next()` on an inactive sequence is a no-op.
//! - Mutating the sequence from inside a subscriber is allowed; the nested
//!   notification runs before the outer one returns.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use crate::step::Step;

type CallbackRc = Rc<dyn Fn(&SequenceEvent)>;
type CallbackWeak = Weak<dyn Fn(&SequenceEvent)>;

/// A transition of the sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceEvent {
    /// A non-empty sequence was started.
    Started { len: usize },
    /// The current index moved forward.
    Advanced { index: usize },
    /// The sequence became inactive.
    Finished,
}

#[derive(Default)]
struct SequenceState {
    steps: Vec<Step>,
    index: usize,
    version: u64,
    subscribers: Vec<CallbackWeak>,
}

impl SequenceState {
    fn is_active(&self) -> bool {
        !self.steps.is_empty() && self.index < self.steps.len()
    }

    fn current(&self) -> Option<&Step> {
        if self.is_active() {
            self.steps.get(self.index)
        } else {
            None
        }
    }

    fn clear(&mut self) {
        self.steps.clear();
        self.index = 0;
    }
}

/// Read side of a [`Sequence`].
#[derive(Clone)]
pub struct SequenceView {
    inner: Rc<RefCell<SequenceState>>,
}

impl SequenceView {
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.inner.borrow().is_active()
    }

    /// Clone of the current step, `None` when inactive.
    #[must_use]
    pub fn current_step(&self) -> Option<Step> {
        self.inner.borrow().current().cloned()
    }

    /// Run `f` against the current step without cloning it.
    pub fn with_current<R>(&self, f: impl FnOnce(Option<&Step>) -> R) -> R {
        f(self.inner.borrow().current())
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.inner.borrow().index
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.borrow().steps.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.borrow().steps.is_empty()
    }

    /// Number of transitions so far. Useful for dirty-checking.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.inner.borrow().version
    }

    /// Subscribe to transitions. Dropping the guard unsubscribes.
    pub fn subscribe(&self, callback: impl Fn(&SequenceEvent) + 'static) -> Subscription {
        let strong: CallbackRc = Rc::new(callback);
        self.inner
            .borrow_mut()
            .subscribers
            .push(Rc::downgrade(&strong));
        Subscription {
            _guard: Box::new(strong),
        }
    }

    /// Subscribers registered, including dead ones not yet pruned.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().subscribers.len()
    }
}

impl fmt::Debug for SequenceView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("SequenceView")
            .field("len", &inner.steps.len())
            .field("index", &inner.index)
            .field("version", &inner.version)
            .field("subscriber_count", &inner.subscribers.len())
            .finish()
    }
}

/// The single writer of the showcase sequence.
#[derive(Debug)]
pub struct Sequence {
    view: SequenceView,
}

impl Default for Sequence {
    fn default() -> Self {
        Self::new()
    }
}

impl Sequence {
    /// Create an empty, inactive sequence.
    #[must_use]
    pub fn new() -> Self {
        Self {
            view: SequenceView {
                inner: Rc::new(RefCell::new(SequenceState::default())),
            },
        }
    }

    /// A read handle sharing this sequence's state.
    #[must_use]
    pub fn view(&self) -> SequenceView {
        self.view.clone()
    }

    /// Replace the sequence with `steps` and move to index 0.
    pub fn start(&mut self, steps: impl IntoIterator<Item = Step>) {
        let steps: Vec<Step> = steps.into_iter().collect();
        if steps.is_empty() {
            self.finish();
            return;
        }
        let len = steps.len();
        {
            let mut inner = self.view.inner.borrow_mut();
            inner.steps = steps;
            inner.index = 0;
            inner.version += 1;
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(len, "sequence started");

        self.notify(SequenceEvent::Started { len });
    }

    /// Move to the next step, finishing past the last one.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) {
        let event = {
            let mut inner = self.view.inner.borrow_mut();
            if !inner.is_active() {
                return;
            }
            inner.index += 1;
            inner.version += 1;
            if inner.index >= inner.steps.len() {
                inner.clear();
                SequenceEvent::Finished
            } else {
                SequenceEvent::Advanced { index: inner.index }
            }
        };

        #[cfg(feature = "tracing")]
        tracing::debug!(?event, "sequence next");

        self.notify(event);
    }

    /// Clear all steps and reset the index.
    pub fn finish(&mut self) {
        {
            let mut inner = self.view.inner.borrow_mut();
            if inner.steps.is_empty() && inner.index == 0 {
                return;
            }
            inner.clear();
            inner.version += 1;
        }

        #[cfg(feature = "tracing")]
        tracing::debug!("sequence finished");

        self.notify(SequenceEvent::Finished);
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.view.is_active()
    }

    #[must_use]
    pub fn current_step(&self) -> Option<Step> {
        self.view.current_step()
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.view.current_index()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.view.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.view.is_empty()
    }

    #[must_use]
    pub fn version(&self) -> u64 {
        self.view.version()
    }

    pub fn subscribe(&self, callback: impl Fn(&SequenceEvent) + 'static) -> Subscription {
        self.view.subscribe(callback)
    }

    fn notify(&self, event: SequenceEvent) {
        // Collect first so no borrow is held while callbacks run.
        let callbacks: Vec<CallbackRc> = {
            let mut inner = self.view.inner.borrow_mut();
            inner.subscribers.retain(|w| w.strong_count() > 0);
            inner.subscribers.iter().filter_map(Weak::upgrade).collect()
        };
        for cb in &callbacks {
            cb(&event);
        }
    }
}

/// RAII guard for a sequence subscriber.
pub struct Subscription {
    _guard: Box<dyn std::any::Any>,
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").finish_non_exhaustive()
    }
}
