#![forbid(unsafe_code)]

//! Drag-and-drop reorder engine.
//!
//! A long press lifts a row into a floating overlay. While the pointer
//! drags it, the overlay is compared against the live neighbors above and
//! below; crossing a neighbor's top edge swaps the two items. Neighbors are
//! tracked by [`RowId`] because the host keeps recycling the views under the
//! finger.
//!
//! # Invariants
//!
//! 1. Overlay top = original top + (last_y − down_y) + cumulative offset.
//! 2. A swap re-bases `down_y` to the current pointer y and adds the consumed
//!    delta to the cumulative offset, so the overlay never jumps.
//! 3. Swaps only exchange items; the multiset of identities is preserved.
//! 4. Finalize runs at most once per hover session.
//!
//! # Failure Modes
//!
//! - Neighbor not realized: the swap waits for the next move or scroll event.
//! - Lifted row not realized at drop: the overlay is discarded without a
//!   return animation.

use std::time::Duration;

use swipelist_core::debug;
use swipelist_core::geometry::Rect;
use swipelist_core::trace;

use crate::completion::{Completions, PendingCompletion};
use crate::event::SwipeListEvent;
use crate::host::{
    AnimationKind, AnimationRequest, AnimationTarget, ListHost, RealizedRow, RowId,
};
use crate::realized::RealizedIndex;
use crate::row_state::RowStateStore;

/// A row displaced by a swap, waiting for the next layout pass to settle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PendingSettle {
    id: RowId,
    start_top: i32,
}

/// State of one lifted row.
#[derive(Debug, Clone, PartialEq)]
pub struct HoverSession {
    lifted: RowId,
    start_position: usize,
    pointer_id: u32,
    above: Option<RowId>,
    below: Option<RowId>,
    original_bounds: Rect,
    current_bounds: Rect,
    down_y: f32,
    last_y: f32,
    total_offset: i32,
    swaps: usize,
    mobile_scrolling: bool,
    awaiting_scroll_finish: bool,
    finalizing: bool,
    pending_settles: Vec<PendingSettle>,
}

impl HoverSession {
    #[must_use]
    pub const fn lifted(&self) -> RowId {
        self.lifted
    }

    #[must_use]
    pub const fn above(&self) -> Option<RowId> {
        self.above
    }

    #[must_use]
    pub const fn below(&self) -> Option<RowId> {
        self.below
    }

    #[must_use]
    pub const fn original_bounds(&self) -> Rect {
        self.original_bounds
    }

    /// Current overlay bounds.
    #[must_use]
    pub const fn current_bounds(&self) -> Rect {
        self.current_bounds
    }

    /// Offset accumulated across swaps.
    #[must_use]
    pub const fn total_offset(&self) -> i32 {
        self.total_offset
    }

    #[must_use]
    pub const fn swaps(&self) -> usize {
        self.swaps
    }

    /// Whether the last edge check started an auto-scroll.
    #[must_use]
    pub const fn is_mobile_scrolling(&self) -> bool {
        self.mobile_scrolling
    }

    /// Released while the list was still scrolling.
    #[must_use]
    pub const fn is_awaiting_scroll_finish(&self) -> bool {
        self.awaiting_scroll_finish
    }

    /// Return-to-rest animation in flight.
    #[must_use]
    pub const fn is_finalizing(&self) -> bool {
        self.finalizing
    }

    fn delta_y(&self) -> i32 {
        (self.last_y - self.down_y).round() as i32
    }

    fn hover_top(&self) -> i32 {
        self.original_bounds.top() + self.total_offset + self.delta_y()
    }
}

/// Everything a reorder step needs besides the host.
pub(crate) struct ReorderCtx<'a> {
    pub(crate) index: &'a mut RealizedIndex,
    pub(crate) rows: &'a mut RowStateStore,
    pub(crate) completions: &'a mut Completions,
}

/// Drives at most one hover session.
#[derive(Debug, Clone)]
pub struct ReorderEngine {
    hover: Option<HoverSession>,
    auto_scroll_step: i32,
    settle_duration: Duration,
    return_duration: Duration,
}

impl ReorderEngine {
    #[must_use]
    pub fn new(auto_scroll_step: f32, settle_duration: Duration, return_duration: Duration) -> Self {
        Self {
            hover: None,
            auto_scroll_step: auto_scroll_step.round().max(1.0) as i32,
            settle_duration,
            return_duration,
        }
    }

    /// Adopt new timings; an active hover session keeps running.
    pub fn reconfigure(&mut self, auto_scroll_step: f32, settle_duration: Duration, return_duration: Duration) {
        let hover = self.hover.take();
        *self = Self::new(auto_scroll_step, settle_duration, return_duration);
        self.hover = hover;
    }

    #[must_use]
    pub const fn hover(&self) -> Option<&HoverSession> {
        self.hover.as_ref()
    }

    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.hover.is_some()
    }

    /// Whether `pointer_id` drives the current hover session.
    #[must_use]
    pub fn owns_pointer(&self, pointer_id: u32) -> bool {
        self.hover
            .as_ref()
            .is_some_and(|h| h.pointer_id == pointer_id)
    }

    /// Lift `row` and start a hover session.
    pub(crate) fn start<H: ListHost + ?Sized>(
        &mut self,
        row: RealizedRow,
        pointer_id: u32,
        down_y: f32,
        host: &mut H,
    ) -> Vec<SwipeListEvent> {
        host.cancel_native_gestures();
        host.lift_row(row.view, row.bounds);
        host.set_row_hidden(row.id, true);
        let above = row
            .position
            .checked_sub(1)
            .and_then(|p| host.item_id(p));
        let below = host.item_id(row.position + 1);
        debug!(position = row.position, id = row.id.0, "drag started");
        self.hover = Some(HoverSession {
            lifted: row.id,
            start_position: row.position,
            pointer_id,
            above,
            below,
            original_bounds: row.bounds,
            current_bounds: row.bounds,
            down_y,
            last_y: down_y,
            total_offset: 0,
            swaps: 0,
            mobile_scrolling: false,
            awaiting_scroll_finish: false,
            finalizing: false,
            pending_settles: Vec::new(),
        });
        vec![
            SwipeListEvent::MoveStarted {
                position: row.position,
            },
            SwipeListEvent::DragStarted {
                position: row.position,
            },
        ]
    }

    /// Pointer moved while hovering.
    pub(crate) fn on_move<H: ListHost + ?Sized>(
        &mut self,
        y: f32,
        host: &mut H,
        ctx: &mut ReorderCtx<'_>,
    ) {
        let Some(hover) = self.hover.as_mut() else {
            return;
        };
        if hover.finalizing || hover.awaiting_scroll_finish {
            return;
        }
        hover.last_y = y;
        let original = hover.original_bounds;
        hover.current_bounds = original.offset_to(original.left(), hover.hover_top());
        host.move_hover(hover.current_bounds);

        self.handle_cell_switch(host, ctx);
        self.handle_auto_scroll(host, ctx);
    }

    /// Compare the overlay against its neighbors and swap on a crossing.
    fn handle_cell_switch<H: ListHost + ?Sized>(&mut self, host: &mut H, ctx: &mut ReorderCtx<'_>) {
        let Some(hover) = self.hover.as_mut() else {
            return;
        };
        let Some(lifted) = ctx.index.get(&*host, hover.lifted) else {
            trace!(id = hover.lifted.0, "lifted row not realized; swap deferred");
            return;
        };
        let below = hover.below.and_then(|id| ctx.index.get(&*host, id));
        let above = hover.above.and_then(|id| ctx.index.get(&*host, id));
        let hover_top = hover.hover_top();

        let target = match (below, above) {
            (Some(b), _) if hover_top > b.bounds.top() => b,
            (_, Some(a)) if hover_top < a.bounds.top() => a,
            _ => {
                if (hover.below.is_some() && below.is_none())
                    || (hover.above.is_some() && above.is_none())
                {
                    refresh_neighbors(hover, lifted.position, &*host);
                }
                return;
            }
        };

        let delta_y = hover.delta_y();
        host.swap_rows(lifted.position, target.position);
        ctx.rows.swap(lifted.position, target.position);
        host.notify_dataset_changed();
        ctx.index.invalidate();

        hover.down_y = hover.last_y;
        hover.total_offset += delta_y;
        hover.swaps += 1;
        if !hover.pending_settles.iter().any(|s| s.id == target.id) {
            hover.pending_settles.push(PendingSettle {
                id: target.id,
                start_top: target.bounds.top(),
            });
        }
        refresh_neighbors(hover, target.position, &*host);
        debug!(
            from = lifted.position,
            to = target.position,
            total_offset = hover.total_offset,
            "rows swapped"
        );
    }

    /// Scroll the list when the overlay touches an edge with content beyond.
    fn handle_auto_scroll<H: ListHost + ?Sized>(&mut self, host: &mut H, ctx: &mut ReorderCtx<'_>) {
        let step = self.auto_scroll_step;
        let Some(hover) = self.hover.as_mut() else {
            return;
        };
        let list = host.list_bounds();
        let metrics = host.scroll_metrics();
        let bounds = hover.current_bounds;
        hover.mobile_scrolling = if bounds.top() <= list.top() && metrics.can_scroll_up() {
            host.scroll_by(-step);
            true
        } else if bounds.bottom() >= list.bottom() && metrics.can_scroll_down() {
            host.scroll_by(step);
            true
        } else {
            false
        };
        if hover.mobile_scrolling {
            ctx.index.invalidate();
        }
    }

    /// The first or last visible row changed.
    pub(crate) fn on_visible_range_changed<H: ListHost + ?Sized>(
        &mut self,
        host: &mut H,
        ctx: &mut ReorderCtx<'_>,
    ) {
        let Some(hover) = self.hover.as_mut() else {
            return;
        };
        if hover.finalizing {
            return;
        }
        if let Some(lifted) = ctx.index.get(&*host, hover.lifted) {
            refresh_neighbors(hover, lifted.position, &*host);
        }
        self.handle_cell_switch(host, ctx);
    }

    /// The list stopped scrolling.
    pub(crate) fn on_scroll_idle<H: ListHost + ?Sized>(
        &mut self,
        host: &mut H,
        ctx: &mut ReorderCtx<'_>,
    ) -> Vec<SwipeListEvent> {
        let Some(hover) = self.hover.as_ref() else {
            return Vec::new();
        };
        if hover.awaiting_scroll_finish {
            return self.finalize(host, ctx);
        }
        if hover.mobile_scrolling && !hover.finalizing {
            self.handle_auto_scroll(host, ctx);
        }
        Vec::new()
    }

    /// Pointer lifted. Finalize now, or once scrolling stops.
    pub(crate) fn release<H: ListHost + ?Sized>(
        &mut self,
        scroll_idle: bool,
        host: &mut H,
        ctx: &mut ReorderCtx<'_>,
    ) -> Vec<SwipeListEvent> {
        let Some(hover) = self.hover.as_mut() else {
            return Vec::new();
        };
        if hover.finalizing {
            return Vec::new();
        }
        if !scroll_idle {
            trace!(id = hover.lifted.0, "drop deferred until scroll settles");
            hover.awaiting_scroll_finish = true;
            return Vec::new();
        }
        self.finalize(host, ctx)
    }

    /// Animate the overlay to the lifted row's resting bounds.
    fn finalize<H: ListHost + ?Sized>(
        &mut self,
        host: &mut H,
        ctx: &mut ReorderCtx<'_>,
    ) -> Vec<SwipeListEvent> {
        let return_duration = self.return_duration;
        let Some(hover) = self.hover.as_mut() else {
            return Vec::new();
        };
        if hover.finalizing {
            return Vec::new();
        }
        hover.awaiting_scroll_finish = false;
        hover.mobile_scrolling = false;

        match ctx.index.get(&*host, hover.lifted) {
            Some(row) => {
                hover.finalizing = true;
                let from = hover.current_bounds;
                let to = hover
                    .original_bounds
                    .offset_to(hover.original_bounds.left(), row.bounds.top());
                hover.current_bounds = to;
                let token = ctx.completions.issue(PendingCompletion::HoverReturn);
                host.animate(AnimationRequest {
                    token,
                    target: AnimationTarget::Hover,
                    kind: AnimationKind::HoverBounds { from, to },
                    duration: return_duration,
                });
                Vec::new()
            }
            None => {
                debug!(id = hover.lifted.0, "lifted row not realized at drop");
                let emit_order = hover.swaps > 0;
                self.end(host, emit_order)
            }
        }
    }

    /// The return animation completed.
    pub(crate) fn on_hover_returned<H: ListHost + ?Sized>(
        &mut self,
        host: &mut H,
    ) -> Vec<SwipeListEvent> {
        if !self.hover.as_ref().is_some_and(|h| h.finalizing) {
            return Vec::new();
        }
        self.end(host, true)
    }

    /// Abort without settling or reporting a new order.
    ///
    /// A cancel arriving after the drop is stale: the swaps are already in
    /// the backing data, so the pending finalize still reports the order.
    pub(crate) fn cancel<H: ListHost + ?Sized>(&mut self, host: &mut H) -> Vec<SwipeListEvent> {
        let Some(hover) = self.hover.as_ref() else {
            return Vec::new();
        };
        if hover.finalizing || hover.awaiting_scroll_finish {
            trace!(id = hover.lifted.0, "cancel after drop ignored");
            return Vec::new();
        }
        self.end(host, false)
    }

    fn end<H: ListHost + ?Sized>(&mut self, host: &mut H, emit_order: bool) -> Vec<SwipeListEvent> {
        let Some(hover) = self.hover.take() else {
            return Vec::new();
        };
        host.drop_hover();
        host.set_row_hidden(hover.lifted, false);
        debug!(swaps = hover.swaps, emit_order, "drag ended");
        let mut events = vec![SwipeListEvent::MoveEnded {
            position: hover.start_position,
        }];
        if emit_order {
            events.push(SwipeListEvent::Reordered {
                order: current_order(&*host),
            });
        }
        events
    }

    /// Settle rows displaced by swaps now that the host has laid them out.
    pub(crate) fn on_layout<H: ListHost + ?Sized>(&mut self, host: &mut H, ctx: &mut ReorderCtx<'_>) {
        let settle_duration = self.settle_duration;
        let Some(hover) = self.hover.as_mut() else {
            return;
        };
        for settle in hover.pending_settles.drain(..) {
            let Some(row) = ctx.index.get(&*host, settle.id) else {
                continue;
            };
            let delta = settle.start_top - row.bounds.top();
            if delta == 0 {
                continue;
            }
            let token = ctx.completions.issue(PendingCompletion::Settle);
            host.animate(AnimationRequest {
                token,
                target: AnimationTarget::View(row.view),
                kind: AnimationKind::SettleY {
                    from: delta as f32,
                },
                duration: settle_duration,
            });
        }
    }
}

/// Re-derive neighbor identities from the lifted row's position.
fn refresh_neighbors<H: ListHost + ?Sized>(hover: &mut HoverSession, position: usize, host: &H) {
    hover.above = position.checked_sub(1).and_then(|p| host.item_id(p));
    hover.below = host.item_id(position + 1);
}

/// Full identity sequence of the backing collection.
pub(crate) fn current_order<H: ListHost + ?Sized>(host: &H) -> Vec<RowId> {
    (0..host.row_count())
        .filter_map(|position| host.item_id(position))
        .collect()
}
