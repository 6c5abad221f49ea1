#![forbid(unsafe_code)]

//! Frame-stepped driver wiring a [`SwipeList`] to a [`VirtualList`].
//!
//! The driver plays the part of the platform: it owns the clock, delivers
//! pointer input, plays animations frame by frame, and forwards the host
//! notifications a real list view would raise (layout after a dataset
//! change, scroll position and scroll phase after the content moves).
//!
//! # Scroll phases
//!
//! Content moved by the engine (auto-scroll) reports `Fling` immediately
//! and `Idle` on the next frame, so a drop during auto-scroll is deferred by
//! exactly one frame. User scrolls report `TouchScroll` and then `Idle`.
//!
//! # Dismissals
//!
//! When a `Dismissed` event is reported, the driver removes the rows from
//! the host and announces the dataset change, as an application would.

use std::collections::VecDeque;
use std::time::Duration;

use swipelist::{SwipeList, SwipeListEvent};
use swipelist_core::config::{ConfigError, SwipeConfig};
use swipelist_core::debug;
use swipelist_core::event::{PointerEvent, ScrollState};
use web_time::Instant;

use crate::trace::EventTrace;
use crate::virtual_list::VirtualList;

/// One frame at 60 Hz.
pub const FRAME: Duration = Duration::from_millis(16);

/// Upper bound on notification rounds per step.
pub const MAX_PUMP_ROUNDS: usize = 32;

/// Upper bound on frames [`Harness::settle`] will run.
pub const MAX_SETTLE_FRAMES: usize = 1_000;

/// A [`SwipeList`] driven against an in-memory host.
#[derive(Debug)]
pub struct Harness {
    list: SwipeList,
    host: VirtualList,
    now: Instant,
    frame: u64,
    events: Vec<SwipeListEvent>,
    trace: EventTrace,
    engine_scrolling: bool,
    apply_dismissals: bool,
}

impl Harness {
    /// # Errors
    ///
    /// Returns [`ConfigError`] when `config` fails validation.
    pub fn new(config: SwipeConfig, host: VirtualList) -> Result<Self, ConfigError> {
        Ok(Self {
            list: SwipeList::new(config)?,
            host,
            now: Instant::now(),
            frame: 0,
            events: Vec::new(),
            trace: EventTrace::new(),
            engine_scrolling: false,
            apply_dismissals: true,
        })
    }

    /// Leave dismissed rows in the host instead of removing them.
    #[must_use]
    pub fn keep_dismissed_rows(mut self) -> Self {
        self.apply_dismissals = false;
        self
    }

    #[must_use]
    pub const fn list(&self) -> &SwipeList {
        &self.list
    }

    #[must_use]
    pub const fn host(&self) -> &VirtualList {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut VirtualList {
        &mut self.host
    }

    #[must_use]
    pub const fn now(&self) -> Instant {
        self.now
    }

    #[must_use]
    pub const fn frame(&self) -> u64 {
        self.frame
    }

    /// Every event reported so far.
    #[must_use]
    pub fn events(&self) -> &[SwipeListEvent] {
        &self.events
    }

    pub fn take_events(&mut self) -> Vec<SwipeListEvent> {
        std::mem::take(&mut self.events)
    }

    #[must_use]
    pub const fn trace(&self) -> &EventTrace {
        &self.trace
    }

    // -----------------------------------------------------------------------
    // Input
    // -----------------------------------------------------------------------

    /// Deliver one pointer event; returns whether the engine handled it.
    pub fn pointer(&mut self, event: PointerEvent) -> bool {
        let outcome = self.list.process(&event, self.now, &mut self.host);
        self.report(outcome.events);
        self.pump();
        outcome.handled
    }

    pub fn down(&mut self, x: f32, y: f32) -> bool {
        self.pointer(PointerEvent::down(x, y))
    }

    pub fn move_to(&mut self, x: f32, y: f32) -> bool {
        self.pointer(PointerEvent::moved(x, y))
    }

    pub fn up(&mut self, x: f32, y: f32) -> bool {
        self.pointer(PointerEvent::up(x, y))
    }

    pub fn cancel(&mut self, x: f32, y: f32) -> bool {
        self.pointer(PointerEvent::cancel(x, y))
    }

    /// Horizontal drag along `xs` at height `y`, one frame per sample, then
    /// release at the last sample.
    pub fn swipe(&mut self, y: f32, xs: &[f32]) {
        let Some((&first, rest)) = xs.split_first() else {
            return;
        };
        self.down(first, y);
        let mut last = first;
        for &x in rest {
            self.advance(FRAME);
            self.move_to(x, y);
            last = x;
        }
        self.up(last, y);
    }

    /// Hold at `(x, y)` until the long press matures.
    pub fn long_press(&mut self, x: f32, y: f32) {
        self.down(x, y);
        let timeout = self.list.config().long_press_timeout;
        self.advance(timeout + FRAME);
    }

    /// Vertical drag of a lifted row along `ys`, one frame per sample.
    pub fn drag_vertically(&mut self, x: f32, ys: &[f32]) {
        for &y in ys {
            self.advance(FRAME);
            self.move_to(x, y);
        }
    }

    /// A user scroll by `dy` pixels, from touch to idle.
    pub fn user_scroll(&mut self, dy: i32) {
        let events = self
            .list
            .on_scroll_state(ScrollState::TouchScroll, self.now, &mut self.host);
        self.report(events);
        let offset = self.host.scroll_offset() + dy;
        self.host.set_scroll_offset(offset);
        self.deliver_scroll();
        let events = self
            .list
            .on_scroll_state(ScrollState::Idle, self.now, &mut self.host);
        self.report(events);
        self.pump();
    }

    /// Run an engine call against the host and report what it returns.
    pub fn apply<F>(&mut self, call: F)
    where
        F: FnOnce(&mut SwipeList, &mut VirtualList) -> Vec<SwipeListEvent>,
    {
        let events = call(&mut self.list, &mut self.host);
        self.report(events);
        self.pump();
    }

    // -----------------------------------------------------------------------
    // Time
    // -----------------------------------------------------------------------

    /// Advance the clock by `dt`: play animations, end engine scrolls, poll
    /// timers.
    pub fn advance(&mut self, dt: Duration) {
        self.now += dt;
        self.frame += 1;

        for token in self.host.advance(dt) {
            let events = self.list.on_animation_finished(token, &mut self.host);
            self.report(events);
        }
        if std::mem::take(&mut self.engine_scrolling) {
            let events = self
                .list
                .on_scroll_state(ScrollState::Idle, self.now, &mut self.host);
            self.report(events);
        }
        let events = self.list.tick(self.now, &mut self.host);
        self.report(events);
        self.pump();
    }

    /// Advance frame by frame until nothing is animating or scrolling.
    pub fn settle(&mut self) {
        for _ in 0..MAX_SETTLE_FRAMES {
            if self.host.playing() == 0 && !self.engine_scrolling {
                return;
            }
            self.advance(FRAME);
        }
        debug!(frame = self.frame, "settle gave up with work pending");
    }

    // -----------------------------------------------------------------------
    // Host notifications
    // -----------------------------------------------------------------------

    fn pump(&mut self) {
        for _ in 0..MAX_PUMP_ROUNDS {
            let mut progressed = false;
            if self.host.take_layout_dirty() {
                self.list.on_layout(&mut self.host);
                progressed = true;
            }
            if self.host.take_scrolled() {
                self.deliver_scroll();
                if !self.engine_scrolling {
                    self.engine_scrolling = true;
                    let events = self
                        .list
                        .on_scroll_state(ScrollState::Fling, self.now, &mut self.host);
                    self.report(events);
                }
                progressed = true;
            }
            if !progressed {
                return;
            }
        }
    }

    fn deliver_scroll(&mut self) {
        self.host.take_scrolled();
        let (first, count) = self.host.visible_window();
        let total = self.host.items().len();
        let events = self.list.on_scroll(first, count, total, &mut self.host);
        self.report(events);
    }

    fn report(&mut self, events: Vec<SwipeListEvent>) {
        let mut queue: VecDeque<SwipeListEvent> = events.into();
        while let Some(event) = queue.pop_front() {
            self.trace.record(self.frame, &event);
            if self.apply_dismissals
                && let SwipeListEvent::Dismissed { positions } = &event
            {
                self.host.remove_positions(positions);
                queue.extend(self.list.on_dataset_changed(&mut self.host));
            }
            self.events.push(event);
        }
    }
}
