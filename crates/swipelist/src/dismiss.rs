#![forbid(unsafe_code)]

//! Pending-dismiss batch processor.
//!
//! Each dismissed row with a live view collapses in its own animation; rows
//! without one are queued already complete. The data is told about the batch
//! exactly once, after the last counted animation finishes.
//!
//! # Invariants
//!
//! 1. `in_flight` equals the number of queued entries whose collapse has not
//!    completed.
//! 2. A flush happens only with `in_flight == 0` and a non-empty queue.
//! 3. Flushed positions are unique and strictly descending.

use swipelist_core::debug;

use crate::host::ViewId;

/// A row queued for removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingDismissal {
    pub position: usize,
    /// Live view being collapsed; `None` for off-screen rows.
    pub view: Option<ViewId>,
}

/// A completed batch, ready to be reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DismissFlush {
    /// Strictly descending.
    pub positions: Vec<usize>,
    /// Views whose presentation must be reset after the report.
    pub views: Vec<ViewId>,
}

/// Reference-counted queue of pending dismissals.
#[derive(Debug, Clone, Default)]
pub struct DismissBatch {
    in_flight: usize,
    pending: Vec<PendingDismissal>,
}

impl DismissBatch {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Collapse animations still running.
    #[must_use]
    pub const fn in_flight(&self) -> usize {
        self.in_flight
    }

    #[must_use]
    pub fn pending(&self) -> &[PendingDismissal] {
        &self.pending
    }

    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.in_flight == 0 && self.pending.is_empty()
    }

    /// Queue a realized row whose collapse animation is starting.
    pub fn enqueue_animated(&mut self, position: usize, view: ViewId) {
        self.in_flight += 1;
        self.pending.push(PendingDismissal {
            position,
            view: Some(view),
        });
    }

    /// Queue an off-screen row; it needs no animation.
    pub fn enqueue_offscreen(&mut self, position: usize) {
        self.pending.push(PendingDismissal {
            position,
            view: None,
        });
    }

    /// Record one finished collapse. Returns the batch if it was the last.
    pub fn complete_one(&mut self) -> Option<DismissFlush> {
        self.in_flight = self.in_flight.saturating_sub(1);
        self.flush_if_idle()
    }

    /// Flush when nothing is animating and something is queued.
    pub fn flush_if_idle(&mut self) -> Option<DismissFlush> {
        if self.in_flight > 0 || self.pending.is_empty() {
            return None;
        }
        let mut pending = std::mem::take(&mut self.pending);
        pending.sort_by(|a, b| b.position.cmp(&a.position));
        let mut positions: Vec<usize> = pending.iter().map(|p| p.position).collect();
        positions.dedup();
        let views = pending.iter().filter_map(|p| p.view).collect();
        debug!(count = positions.len(), "dismiss batch flushed");
        Some(DismissFlush { positions, views })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn waits_for_every_animation() {
        let mut batch = DismissBatch::new();
        batch.enqueue_animated(2, ViewId(1));
        batch.enqueue_offscreen(9);
        batch.enqueue_animated(5, ViewId(2));
        assert_eq!(batch.flush_if_idle(), None);
        assert_eq!(batch.complete_one(), None);
        let flush = batch.complete_one().expect("last completion flushes");
        assert_eq!(flush.positions, vec![9, 5, 2]);
        assert_eq!(flush.views, vec![ViewId(2), ViewId(1)]);
        assert!(batch.is_idle());
    }

    #[test]
    fn offscreen_only_flushes_immediately() {
        let mut batch = DismissBatch::new();
        batch.enqueue_offscreen(40);
        batch.enqueue_offscreen(41);
        let flush = batch.flush_if_idle().unwrap();
        assert_eq!(flush.positions, vec![41, 40]);
        assert!(flush.views.is_empty());
    }

    #[test]
    fn duplicate_positions_collapse() {
        let mut batch = DismissBatch::new();
        batch.enqueue_offscreen(3);
        batch.enqueue_offscreen(3);
        assert_eq!(batch.flush_if_idle().unwrap().positions, vec![3]);
    }

    #[test]
    fn stray_completion_is_harmless() {
        let mut batch = DismissBatch::new();
        assert_eq!(batch.complete_one(), None);
        assert_eq!(batch.in_flight(), 0);
    }
}
