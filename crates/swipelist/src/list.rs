#![forbid(unsafe_code)]

//! The [`SwipeList`] coordinator.
//!
//! Owns the classifier, resolver, dismissal batch, reorder engine, and row
//! state, routes host input to them, and returns the resulting events. All
//! entry points take the host by `&mut` so the engine never stores it.
//!
//! # Input routing
//!
//! | Input | Entry point |
//! |---|---|
//! | pointer down/move/up/cancel | [`SwipeList::process`] |
//! | timers (long press, scroll resume) | [`SwipeList::tick`] |
//! | animation finished | [`SwipeList::on_animation_finished`] |
//! | layout pass | [`SwipeList::on_layout`] |
//! | scroll position / scroll phase | [`SwipeList::on_scroll`], [`SwipeList::on_scroll_state`] |
//! | dataset changed | [`SwipeList::on_dataset_changed`] |

use swipelist_core::config::{ConfigError, SwipeConfig, SwipeMode};
use swipelist_core::event::{PointerEvent, PointerKind, ScrollState};
use swipelist_core::{debug, trace};
use web_time::Instant;

use crate::classifier::{GestureClassifier, MoveStep, Phase, Release, Session};
use crate::completion::{Completions, PendingCompletion};
use crate::dismiss::{DismissBatch, DismissFlush};
use crate::event::{PointerOutcome, SwipeListEvent};
use crate::host::{
    AnimationKind, AnimationRequest, AnimationTarget, ListHost, RealizedRow, RowId, ViewId,
};
use crate::realized::RealizedIndex;
use crate::reorder::{HoverSession, ReorderCtx, ReorderEngine};
use crate::resolver::{self, Resolution};
use crate::row_state::RowStateStore;

/// Scroll bookkeeping fed by the host's scroll listener.
#[derive(Debug, Clone, Default)]
struct ScrollTracker {
    state: ScrollState,
    /// Swiping is suspended by a touch scroll.
    paused: bool,
    resume_at: Option<Instant>,
    first_visible: Option<usize>,
    /// Exclusive end of the visible range.
    end_visible: Option<usize>,
    at_first: bool,
    at_last: bool,
}

/// Swipe, dismiss, and reorder behavior for one list.
#[derive(Debug)]
pub struct SwipeList {
    config: SwipeConfig,
    rows: RowStateStore,
    classifier: GestureClassifier,
    dismissals: DismissBatch,
    reorder: ReorderEngine,
    index: RealizedIndex,
    completions: Completions,
    long_press_deadline: Option<Instant>,
    scroll: ScrollTracker,
}

impl SwipeList {
    /// Create a coordinator with a validated config.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when `config` fails validation.
    pub fn new(config: SwipeConfig) -> Result<Self, ConfigError> {
        let config = config.validated()?;
        let thresholds = config.thresholds();
        Ok(Self {
            classifier: GestureClassifier::new(&config),
            reorder: ReorderEngine::new(
                thresholds.auto_scroll_step,
                config.settle_duration,
                config.effective_animation_time(),
            ),
            config,
            rows: RowStateStore::new(),
            dismissals: DismissBatch::new(),
            index: RealizedIndex::new(),
            completions: Completions::default(),
            long_press_deadline: None,
            scroll: ScrollTracker::default(),
        })
    }

    /// Replace the config. Active interactions keep running.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when `config` fails validation; the previous
    /// config stays in effect.
    pub fn set_config(&mut self, config: SwipeConfig) -> Result<(), ConfigError> {
        let config = config.validated()?;
        self.classifier.reconfigure(&config);
        self.reorder.reconfigure(
            config.thresholds().auto_scroll_step,
            config.settle_duration,
            config.effective_animation_time(),
        );
        self.config = config;
        Ok(())
    }

    #[must_use]
    pub const fn config(&self) -> &SwipeConfig {
        &self.config
    }

    #[must_use]
    pub const fn row_state(&self) -> &RowStateStore {
        &self.rows
    }

    /// The active swipe session, if any.
    #[must_use]
    pub const fn session(&self) -> Option<&Session> {
        self.classifier.session()
    }

    /// The active hover session, if any.
    #[must_use]
    pub const fn hover(&self) -> Option<&HoverSession> {
        self.reorder.hover()
    }

    /// A horizontal swipe is being tracked.
    #[must_use]
    pub fn is_swiping(&self) -> bool {
        self.classifier.is_tracking()
    }

    /// A row is lifted for reordering.
    #[must_use]
    pub const fn is_dragging(&self) -> bool {
        self.reorder.is_active()
    }

    /// Swiping is suspended by a touch scroll or its resume delay.
    #[must_use]
    pub const fn is_paused(&self) -> bool {
        self.scroll.paused
    }

    /// Animations requested and not yet reported finished.
    #[must_use]
    pub fn pending_animations(&self) -> usize {
        self.completions.len()
    }

    #[must_use]
    pub fn is_open(&self, position: usize) -> bool {
        self.rows.is_open(position)
    }

    #[must_use]
    pub fn is_checked(&self, position: usize) -> bool {
        self.rows.is_checked(position)
    }

    /// Checked positions, ascending.
    #[must_use]
    pub fn positions_selected(&self) -> Vec<usize> {
        self.rows.checked_positions()
    }

    #[must_use]
    pub fn count_selected(&self) -> usize {
        self.rows.count_checked()
    }

    // -----------------------------------------------------------------------
    // Pointer input
    // -----------------------------------------------------------------------

    /// Feed one pointer event.
    pub fn process<H: ListHost + ?Sized>(
        &mut self,
        event: &PointerEvent,
        now: Instant,
        host: &mut H,
    ) -> PointerOutcome {
        match event.kind {
            PointerKind::Down => self.on_pointer_down(event, now, host),
            PointerKind::Move => self.on_pointer_move(event, host),
            PointerKind::Up => self.on_pointer_up(event, host),
            PointerKind::Cancel => self.on_pointer_cancel(host),
        }
    }

    fn on_pointer_down<H: ListHost + ?Sized>(
        &mut self,
        event: &PointerEvent,
        now: Instant,
        host: &mut H,
    ) -> PointerOutcome {
        if self.reorder.is_active() || self.classifier.is_active() {
            trace!(pointer = event.pointer_id, "pointer down ignored: interaction active");
            return PointerOutcome::ignored();
        }
        if self.scroll.paused || self.config.swipe_mode == SwipeMode::None {
            return PointerOutcome::ignored();
        }

        self.index.invalidate();
        self.rows.ensure_capacity(host.row_count());
        let Some(row) = self.index.hit(&*host, event.position) else {
            trace!(x = event.position.x, y = event.position.y, "pointer down outside rows");
            return PointerOutcome::ignored();
        };
        if !host.is_swipeable(row.position) {
            return PointerOutcome::ignored();
        }

        let mut allowed = self.config.swipe_mode.directions();
        if let Some(mode) = host.swipe_mode_override(row.position) {
            allowed &= mode.directions();
        }
        let open = self
            .rows
            .is_open(row.position)
            .then(|| self.rows.is_opened_right(row.position));
        let resting = open.map_or(0.0, |right| {
            resolver::open_translation(&self.config, right, row.bounds.width as f32)
        });
        self.classifier
            .arm(row, event.pointer_id, event.position, open, resting, allowed);
        self.long_press_deadline = self
            .config
            .drag_and_drop_enabled
            .then(|| now + self.config.long_press_timeout);
        PointerOutcome::handled(Vec::new())
    }

    fn on_pointer_move<H: ListHost + ?Sized>(
        &mut self,
        event: &PointerEvent,
        host: &mut H,
    ) -> PointerOutcome {
        if self.reorder.is_active() {
            if !self.reorder.owns_pointer(event.pointer_id) {
                return PointerOutcome::ignored();
            }
            let mut ctx = ReorderCtx {
                index: &mut self.index,
                rows: &mut self.rows,
                completions: &mut self.completions,
            };
            self.reorder.on_move(event.position.y, host, &mut ctx);
            return PointerOutcome::handled(Vec::new());
        }

        let step = self.classifier.on_move(event.pointer_id, event.position);
        if self
            .classifier
            .session()
            .is_some_and(|s| s.exceeded_slop())
        {
            self.long_press_deadline = None;
        }
        let MoveStep::Tracking {
            started,
            translation,
            sample,
        } = step
        else {
            return PointerOutcome::ignored();
        };
        let Some(session) = self.classifier.session() else {
            return PointerOutcome::ignored();
        };

        let row = *session.row();
        let mut events = Vec::new();
        if started {
            debug!(position = row.position, open = session.was_open(), "swipe move started");
            host.cancel_native_gestures();
            host.set_back_visible(row.view, true);
            events.push(SwipeListEvent::MoveStarted {
                position: row.position,
            });
            if session.was_open() {
                events.push(SwipeListEvent::StartClose {
                    position: row.position,
                    right: session.opened_right(),
                });
            }
        }
        host.translate_front(row.view, translation);
        if let Some(sample) = sample
            && !session.was_open()
        {
            events.push(SwipeListEvent::StartOpen {
                position: row.position,
                action: sample.action,
                right: session.displacement() > 0.0,
            });
        }
        PointerOutcome::handled(events)
    }

    fn on_pointer_up<H: ListHost + ?Sized>(
        &mut self,
        event: &PointerEvent,
        host: &mut H,
    ) -> PointerOutcome {
        if self.reorder.is_active() {
            if !self.reorder.owns_pointer(event.pointer_id) {
                return PointerOutcome::ignored();
            }
            let scroll_idle = self.scroll.state.is_idle();
            let mut ctx = ReorderCtx {
                index: &mut self.index,
                rows: &mut self.rows,
                completions: &mut self.completions,
            };
            let events = self.reorder.release(scroll_idle, host, &mut ctx);
            return PointerOutcome::handled(events);
        }

        let Some(release) = self.classifier.release(event.pointer_id, event.position) else {
            trace!(pointer = event.pointer_id, "pointer up without session");
            return PointerOutcome::ignored();
        };
        self.long_press_deadline = None;

        match release {
            Release::Tap { row, down } => {
                let target = host.tap_target(row.position, down);
                PointerOutcome::handled(vec![SwipeListEvent::RowTapped {
                    position: row.position,
                    target,
                }])
            }
            Release::Abandoned { .. } => PointerOutcome::ignored(),
            Release::Swipe(release) => {
                let plan = resolver::resolve(&release, &self.config);
                let row = release.row;
                debug!(
                    position = row.position,
                    swap = release.swap,
                    swap_right = release.swap_right,
                    classification = ?release.classification,
                    policy = ?plan.policy,
                    "swipe released"
                );
                if let Some((open, right)) = plan.open_state {
                    self.rows.set_open(row.position, open, right);
                }
                self.animate_front(row, plan, host);
                PointerOutcome::handled(vec![SwipeListEvent::MoveEnded {
                    position: row.position,
                }])
            }
        }
    }

    fn on_pointer_cancel<H: ListHost + ?Sized>(&mut self, host: &mut H) -> PointerOutcome {
        self.long_press_deadline = None;
        if self.reorder.is_active() {
            let events = self.reorder.cancel(host);
            if events.is_empty() {
                return PointerOutcome::ignored();
            }
            return PointerOutcome::handled(events);
        }
        let Some(session) = self.classifier.cancel() else {
            return PointerOutcome::ignored();
        };
        if session.phase() != Phase::Tracking {
            return PointerOutcome::ignored();
        }
        let row = *session.row();
        debug!(position = row.position, "swipe cancelled");
        self.animate_front(row, Resolution::rest(session.resting_translation()), host);
        PointerOutcome::handled(vec![SwipeListEvent::MoveEnded {
            position: row.position,
        }])
    }

    fn animate_front<H: ListHost + ?Sized>(
        &mut self,
        row: RealizedRow,
        plan: Resolution,
        host: &mut H,
    ) {
        let token = self.completions.issue(PendingCompletion::Swipe {
            id: row.id,
            position: row.position,
            plan,
        });
        host.animate(AnimationRequest {
            token,
            target: AnimationTarget::View(row.view),
            kind: AnimationKind::TranslateX { to: plan.target },
            duration: self.config.effective_animation_time(),
        });
    }

    // -----------------------------------------------------------------------
    // Timers and callbacks
    // -----------------------------------------------------------------------

    /// Poll deadlines: scroll resume and long press.
    pub fn tick<H: ListHost + ?Sized>(&mut self, now: Instant, host: &mut H) -> Vec<SwipeListEvent> {
        if let Some(at) = self.scroll.resume_at
            && now >= at
        {
            self.scroll.resume_at = None;
            self.scroll.paused = false;
            trace!("swiping resumed");
        }

        let Some(deadline) = self.long_press_deadline else {
            return Vec::new();
        };
        if now < deadline {
            return Vec::new();
        }
        self.long_press_deadline = None;

        let matured = self
            .classifier
            .session()
            .is_some_and(|s| s.phase() == Phase::Armed && !s.exceeded_slop());
        if !matured || self.reorder.is_active() {
            return Vec::new();
        }
        let Some(session) = self.classifier.cancel() else {
            return Vec::new();
        };
        let row = self
            .index
            .get(&*host, session.row().id)
            .unwrap_or(*session.row());
        self.reorder
            .start(row, session.pointer_id(), session.down().y, host)
    }

    /// The host finished playing the animation issued with `token`.
    pub fn on_animation_finished<H: ListHost + ?Sized>(
        &mut self,
        token: crate::host::AnimationToken,
        host: &mut H,
    ) -> Vec<SwipeListEvent> {
        let Some(completion) = self.completions.take(token) else {
            trace!(token = token.0, "unknown animation token");
            return Vec::new();
        };
        match completion {
            PendingCompletion::Swipe {
                id,
                position,
                plan,
            } => self.finish_swipe(id, position, plan, host),
            PendingCompletion::Collapse => match self.dismissals.complete_one() {
                Some(flush) => self.report_dismissals(flush, host),
                None => Vec::new(),
            },
            PendingCompletion::HoverReturn => self.reorder.on_hover_returned(host),
            PendingCompletion::Settle => Vec::new(),
        }
    }

    fn finish_swipe<H: ListHost + ?Sized>(
        &mut self,
        id: RowId,
        position: usize,
        plan: Resolution,
        host: &mut H,
    ) -> Vec<SwipeListEvent> {
        // Resolve by identity: a scroll during the slide may have rebound the
        // view that was released to another row.
        let realized = self.index.get(&*host, id);
        let position = realized.map_or(position, |row| row.position);
        if plan.ends_closed()
            && let Some(row) = realized
        {
            host.set_back_visible(row.view, false);
        }
        let mut events = Vec::new();
        if let Some(notice) = plan.notice {
            events.push(notice.event(position));
        }
        if let Some(finished) = plan.finished {
            events.push(finished.event(position));
        }
        if plan.dismiss {
            match realized {
                Some(row) => self.start_collapse(position, row.view, host),
                None => {
                    trace!(position, "dismissed row scrolled away; no collapse");
                    self.dismissals.enqueue_offscreen(position);
                    events.extend(self.flush_dismissals_if_idle(host));
                }
            }
        }
        events
    }

    /// The host laid out its rows.
    pub fn on_layout<H: ListHost + ?Sized>(&mut self, host: &mut H) {
        self.index.invalidate();
        let mut ctx = ReorderCtx {
            index: &mut self.index,
            rows: &mut self.rows,
            completions: &mut self.completions,
        };
        self.reorder.on_layout(host, &mut ctx);
    }

    /// The backing collection changed.
    pub fn on_dataset_changed<H: ListHost + ?Sized>(&mut self, host: &mut H) -> Vec<SwipeListEvent> {
        self.rows.ensure_capacity(host.row_count());
        self.index.invalidate();
        vec![SwipeListEvent::ListChanged]
    }

    // -----------------------------------------------------------------------
    // Scrolling
    // -----------------------------------------------------------------------

    /// The list's scroll phase changed.
    pub fn on_scroll_state<H: ListHost + ?Sized>(
        &mut self,
        state: ScrollState,
        now: Instant,
        host: &mut H,
    ) -> Vec<SwipeListEvent> {
        self.scroll.state = state;
        match state {
            ScrollState::TouchScroll => {
                self.scroll.paused = true;
                self.scroll.resume_at = None;
                if self.config.close_all_on_scroll {
                    self.close_opened_items(host);
                }
                Vec::new()
            }
            ScrollState::Fling => Vec::new(),
            ScrollState::Idle => {
                if self.scroll.paused {
                    self.scroll.resume_at = Some(now + self.config.scroll_resume_delay);
                }
                self.index.invalidate();
                let mut ctx = ReorderCtx {
                    index: &mut self.index,
                    rows: &mut self.rows,
                    completions: &mut self.completions,
                };
                self.reorder.on_scroll_idle(host, &mut ctx)
            }
        }
    }

    /// The list scrolled; `first_visible..first_visible + visible_count` is on
    /// screen out of `total_count` items.
    pub fn on_scroll<H: ListHost + ?Sized>(
        &mut self,
        first_visible: usize,
        visible_count: usize,
        total_count: usize,
        host: &mut H,
    ) -> Vec<SwipeListEvent> {
        self.index.invalidate();
        let end_visible = first_visible + visible_count;
        let mut events = Vec::new();

        if self.scroll.at_first {
            self.scroll.at_first = first_visible == 0;
        } else if first_visible == 0 {
            self.scroll.at_first = true;
            events.push(SwipeListEvent::FirstItemReached);
        }
        if self.scroll.at_last {
            self.scroll.at_last = end_visible >= total_count;
        } else if end_visible >= total_count {
            self.scroll.at_last = true;
            events.push(SwipeListEvent::LastItemReached);
        }

        let range_changed = self.scroll.first_visible != Some(first_visible)
            || self.scroll.end_visible != Some(end_visible);
        self.scroll.first_visible = Some(first_visible);
        self.scroll.end_visible = Some(end_visible);
        if range_changed && self.reorder.is_active() {
            let mut ctx = ReorderCtx {
                index: &mut self.index,
                rows: &mut self.rows,
                completions: &mut self.completions,
            };
            self.reorder.on_visible_range_changed(host, &mut ctx);
        }
        events
    }

    // -----------------------------------------------------------------------
    // Programmatic actions
    // -----------------------------------------------------------------------

    /// Animate a realized closed row open.
    pub fn open_animate<H: ListHost + ?Sized>(&mut self, position: usize, host: &mut H) {
        if self.rows.is_open(position) {
            return;
        }
        let Some(row) = self.index.at_position(&*host, position) else {
            return;
        };
        let right = self.config.swipe_mode == SwipeMode::Right;
        let plan = resolver::reveal(&self.config, true, right, row.bounds.width as f32);
        self.rows.set_open(position, true, right);
        host.set_back_visible(row.view, true);
        self.animate_front(row, plan, host);
    }

    /// Animate a realized open row closed.
    pub fn close_animate<H: ListHost + ?Sized>(&mut self, position: usize, host: &mut H) {
        if !self.rows.is_open(position) {
            return;
        }
        let Some(row) = self.index.at_position(&*host, position) else {
            return;
        };
        let right = self.rows.is_opened_right(position);
        let plan = resolver::reveal(&self.config, false, right, row.bounds.width as f32);
        self.rows.set_open(position, false, right);
        self.animate_front(row, plan, host);
    }

    /// Close every realized open row. Open rows off screen keep their state.
    pub fn close_opened_items<H: ListHost + ?Sized>(&mut self, host: &mut H) {
        for position in self.rows.open_positions() {
            self.close_animate(position, host);
        }
    }

    /// Remove the row at `position` through the dismissal batch.
    pub fn dismiss<H: ListHost + ?Sized>(&mut self, position: usize, host: &mut H) -> Vec<SwipeListEvent> {
        self.rows.ensure_capacity(position);
        self.enqueue_dismissal(position, host);
        self.flush_dismissals_if_idle(host)
    }

    /// Remove every checked row through one dismissal batch.
    pub fn dismiss_selected<H: ListHost + ?Sized>(&mut self, host: &mut H) -> Vec<SwipeListEvent> {
        let positions = self.rows.checked_positions();
        if positions.is_empty() {
            return Vec::new();
        }
        for &position in &positions {
            self.rows.set_checked(position, false);
            self.enqueue_dismissal(position, host);
        }
        let mut events = vec![SwipeListEvent::ChoiceEnded];
        events.extend(self.flush_dismissals_if_idle(host));
        events
    }

    fn enqueue_dismissal<H: ListHost + ?Sized>(&mut self, position: usize, host: &mut H) {
        match self.index.at_position(&*host, position) {
            Some(row) => self.start_collapse(position, row.view, host),
            None => self.dismissals.enqueue_offscreen(position),
        }
    }

    fn start_collapse<H: ListHost + ?Sized>(&mut self, position: usize, view: ViewId, host: &mut H) {
        self.dismissals.enqueue_animated(position, view);
        let token = self.completions.issue(PendingCompletion::Collapse);
        host.animate(AnimationRequest {
            token,
            target: AnimationTarget::View(view),
            kind: AnimationKind::Collapse,
            duration: self.config.effective_animation_time(),
        });
    }

    fn flush_dismissals_if_idle<H: ListHost + ?Sized>(&mut self, host: &mut H) -> Vec<SwipeListEvent> {
        match self.dismissals.flush_if_idle() {
            Some(flush) => self.report_dismissals(flush, host),
            None => Vec::new(),
        }
    }

    fn report_dismissals<H: ListHost + ?Sized>(
        &mut self,
        flush: DismissFlush,
        host: &mut H,
    ) -> Vec<SwipeListEvent> {
        for &position in &flush.positions {
            self.rows.set_open(position, false, false);
        }
        let events = vec![SwipeListEvent::Dismissed {
            positions: flush.positions,
        }];
        for view in flush.views {
            host.reset_presentation(view);
        }
        events
    }

    // -----------------------------------------------------------------------
    // Selection
    // -----------------------------------------------------------------------

    /// Check or uncheck a row.
    pub fn set_checked(&mut self, position: usize, checked: bool) -> Vec<SwipeListEvent> {
        if self.rows.is_checked(position) == checked {
            return Vec::new();
        }
        let before = self.rows.count_checked();
        self.rows.set_checked(position, checked);
        let after = self.rows.count_checked();

        let mut events = Vec::with_capacity(3);
        if before == 0 && after > 0 {
            events.push(SwipeListEvent::ChoiceStarted);
        }
        events.push(SwipeListEvent::ChoiceChanged {
            position,
            selected: checked,
        });
        if after == 0 {
            events.push(SwipeListEvent::ChoiceEnded);
        }
        events
    }

    /// Toggle a row's checked state.
    pub fn toggle_checked(&mut self, position: usize) -> Vec<SwipeListEvent> {
        let checked = !self.rows.is_checked(position);
        self.set_checked(position, checked)
    }
}
