#![forbid(unsafe_code)]

//! Latest absolute bounds of host regions.
//!
//! Hosts report a region's rectangle whenever its layout changes, often
//! asynchronously and out of order with respect to the showcase starting.
//! [`BoundsRegistry`] keeps the most recent report per region id so steps
//! can be built from whatever has been measured so far.

use ahash::AHashMap;
use spotlight_core::geometry::Rect;
use spotlight_widgets::Step;
use web_time::Instant;

#[derive(Debug, Clone, Copy)]
struct Entry {
    rect: Rect,
    reported_at: Instant,
}

/// Region id to last reported rectangle.
#[derive(Debug, Default)]
pub struct BoundsRegistry {
    regions: AHashMap<String, Entry>,
}

impl BoundsRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `rect` for `id`. Returns whether the stored rectangle changed.
    ///
    /// Reports within float tolerance of the stored rectangle only refresh
    /// its timestamp.
    pub fn report(&mut self, id: impl Into<String>, rect: Rect) -> bool {
        let now = Instant::now();
        let id = id.into();
        if let Some(entry) = self.regions.get_mut(&id) {
            entry.reported_at = now;
            if entry.rect.approx_eq(&rect) {
                return false;
            }
            entry.rect = rect;
        } else {
            self.regions.insert(
                id.clone(),
                Entry {
                    rect,
                    reported_at: now,
                },
            );
        }
        tracing::trace!(region = %id, ?rect, "bounds changed");
        true
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<Rect> {
        self.regions.get(id).map(|e| e.rect)
    }

    /// When `id` was last reported.
    #[must_use]
    pub fn reported_at(&self, id: &str) -> Option<Instant> {
        self.regions.get(id).map(|e| e.reported_at)
    }

    /// Forget `id`, returning its last rectangle.
    pub fn remove(&mut self, id: &str) -> Option<Rect> {
        self.regions.remove(id).map(|e| e.rect)
    }

    /// A default step targeting `id`, if it has been reported.
    #[must_use]
    pub fn step(&self, id: &str) -> Option<Step> {
        self.get(id).map(Step::new)
    }

    /// Steps for `ids` in order, skipping regions not yet reported.
    pub fn steps<'a>(&self, ids: impl IntoIterator<Item = &'a str>) -> Vec<Step> {
        ids.into_iter().filter_map(|id| self.step(id)).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    pub fn clear(&mut self) {
        self.regions.clear();
    }
}
