#![forbid(unsafe_code)]

//! Animation completion bookkeeping.
//!
//! Every animation the engine requests carries a fresh [`AnimationToken`].
//! The work to do when it finishes is parked here until the host reports the
//! token back. Unknown or already-consumed tokens resolve to nothing.

use ahash::AHashMap;

use crate::host::{AnimationToken, RowId};
use crate::resolver::Resolution;

/// Deferred work for one in-flight animation.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum PendingCompletion {
    /// Front-layer translation after a release or a programmatic reveal.
    /// The row is re-resolved by `id` on completion; its view may have been
    /// rebound meanwhile.
    Swipe {
        id: RowId,
        position: usize,
        plan: Resolution,
    },
    /// Height collapse of a dismissed row.
    Collapse,
    /// Overlay of a dropped row returning to rest.
    HoverReturn,
    /// Displaced row sliding into its new slot.
    Settle,
}

#[derive(Debug, Default)]
pub(crate) struct Completions {
    next: u64,
    pending: AHashMap<AnimationToken, PendingCompletion>,
}

impl Completions {
    /// Park `completion` under a fresh token.
    pub(crate) fn issue(&mut self, completion: PendingCompletion) -> AnimationToken {
        self.next += 1;
        let token = AnimationToken(self.next);
        self.pending.insert(token, completion);
        token
    }

    pub(crate) fn take(&mut self, token: AnimationToken) -> Option<PendingCompletion> {
        self.pending.remove(&token)
    }

    pub(crate) fn len(&self) -> usize {
        self.pending.len()
    }
}
