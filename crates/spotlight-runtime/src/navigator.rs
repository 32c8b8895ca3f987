#![forbid(unsafe_code)]

//! Deferred navigation requests.
//!
//! Click handlers run while the controller is routing a pointer event, so
//! they cannot borrow it to call `next()`. A [`Navigator`] records the
//! request instead; the controller applies it once routing returns, or on
//! the next tick.

use std::cell::Cell;
use std::rc::Rc;

/// A pending sequence transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavRequest {
    Next,
    Finish,
}

/// Cloneable handle that queues a transition on its controller.
#[derive(Debug, Clone, Default)]
pub struct Navigator {
    pending: Rc<Cell<Option<NavRequest>>>,
}

impl Navigator {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Request a move to the next step.
    ///
    /// Does not override a pending finish.
    pub fn next(&self) {
        if self.pending.get() != Some(NavRequest::Finish) {
            self.pending.set(Some(NavRequest::Next));
        }
    }

    /// Request the sequence to end.
    pub fn finish(&self) {
        self.pending.set(Some(NavRequest::Finish));
    }

    #[must_use]
    pub fn pending(&self) -> Option<NavRequest> {
        self.pending.get()
    }

    pub(crate) fn take(&self) -> Option<NavRequest> {
        self.pending.take()
    }
}
