#![forbid(unsafe_code)]

//! In-memory [`ListHost`] with a scrolling viewport and recycled views.
//!
//! Items are fixed-height rows stacked from the top of the content. Only rows
//! intersecting the viewport are realized, and each one is bound to a slot in
//! a small ring of views, so the same [`ViewId`] shows different rows as the
//! list scrolls. Presentation state (front translation, back visibility,
//! collapse) lives on the view, not the row, exactly like a recycling list.
//!
//! Animations are queued by [`ListHost::animate`] and advanced explicitly with
//! [`VirtualList::advance`], which returns the tokens that finished.
//!
//! # Invariants
//!
//! 1. `0 <= scroll_offset <= max(content_height - viewport_height, 0)`.
//! 2. A position is realized iff its row intersects the viewport.
//! 3. Two realized positions never share a view.

use std::time::Duration;

use ahash::{AHashMap, AHashSet};
use serde::{Deserialize, Serialize};
use swipelist::host::{
    AnimationKind, AnimationRequest, AnimationTarget, AnimationToken, ListHost, RealizedRow,
    RowId, TapTarget, ViewId,
};
use swipelist_core::animation::{Animation, Tween};
use swipelist_core::config::SwipeMode;
use swipelist_core::event::ScrollMetrics;
use swipelist_core::geometry::{Point, Rect};

/// A command the engine issued, in call order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum HostCommand {
    TranslateFront { view: ViewId, dx: f32 },
    SetBackVisible { view: ViewId, visible: bool },
    CancelNativeGestures,
    Animate { request: AnimationRequest },
    ResetPresentation { view: ViewId },
    SwapRows { a: usize, b: usize },
    NotifyDatasetChanged,
    LiftRow { view: ViewId, bounds: Rect },
    MoveHover { bounds: Rect },
    DropHover,
    SetRowHidden { id: RowId, hidden: bool },
    ScrollBy { dy: i32 },
}

#[derive(Debug, Clone, Copy)]
struct Playing {
    request: AnimationRequest,
    tween: Tween,
}

/// Deterministic list view for tests and benchmarks.
#[derive(Debug, Clone)]
pub struct VirtualList {
    items: Vec<RowId>,
    row_height: i32,
    width: i32,
    viewport_height: i32,
    scroll_offset: i32,
    view_slots: usize,
    translations: AHashMap<ViewId, f32>,
    back_visible: AHashSet<ViewId>,
    collapse: AHashMap<ViewId, f32>,
    settle: AHashMap<ViewId, f32>,
    hidden: AHashSet<RowId>,
    hover: Option<Rect>,
    playing: Vec<Playing>,
    commands: Vec<HostCommand>,
    non_swipeable: AHashSet<usize>,
    mode_overrides: AHashMap<usize, SwipeMode>,
    checkbox_width: Option<i32>,
    layout_dirty: bool,
    scrolled: bool,
}

impl VirtualList {
    /// `count` rows with identities `0..count`.
    #[must_use]
    pub fn new(count: u64, row_height: i32, width: i32, viewport_height: i32) -> Self {
        let row_height = row_height.max(1);
        let view_slots = usize::try_from(viewport_height.max(0) / row_height).unwrap_or(0) + 2;
        Self {
            items: (0..count).map(RowId).collect(),
            row_height,
            width,
            viewport_height,
            scroll_offset: 0,
            view_slots,
            translations: AHashMap::new(),
            back_visible: AHashSet::new(),
            collapse: AHashMap::new(),
            settle: AHashMap::new(),
            hidden: AHashSet::new(),
            hover: None,
            playing: Vec::new(),
            commands: Vec::new(),
            non_swipeable: AHashSet::new(),
            mode_overrides: AHashMap::new(),
            checkbox_width: None,
            layout_dirty: false,
            scrolled: false,
        }
    }

    /// Exclude the row at `position` from swiping.
    #[must_use]
    pub fn with_non_swipeable(mut self, position: usize) -> Self {
        self.non_swipeable.insert(position);
        self
    }

    #[must_use]
    pub fn with_swipe_mode_override(mut self, position: usize, mode: SwipeMode) -> Self {
        self.mode_overrides.insert(position, mode);
        self
    }

    /// Treat taps in the leftmost `width` pixels as checkbox taps.
    #[must_use]
    pub fn with_checkbox_width(mut self, width: i32) -> Self {
        self.checkbox_width = Some(width);
        self
    }

    // --- inspection --------------------------------------------------------

    /// Current item order.
    #[must_use]
    pub fn items(&self) -> &[RowId] {
        &self.items
    }

    #[must_use]
    pub const fn row_height(&self) -> i32 {
        self.row_height
    }

    #[must_use]
    pub const fn scroll_offset(&self) -> i32 {
        self.scroll_offset
    }

    /// Every command received since the last [`take_commands`](Self::take_commands).
    #[must_use]
    pub fn commands(&self) -> &[HostCommand] {
        &self.commands
    }

    pub fn take_commands(&mut self) -> Vec<HostCommand> {
        std::mem::take(&mut self.commands)
    }

    /// View currently bound to `position`, if realized.
    #[must_use]
    pub fn view_at(&self, position: usize) -> Option<ViewId> {
        self.visible_range()
            .contains(&position)
            .then(|| self.view_for(position))
    }

    /// Front translation of the realized row at `position`.
    #[must_use]
    pub fn translation_at(&self, position: usize) -> Option<f32> {
        let view = self.view_at(position)?;
        Some(self.translations.get(&view).copied().unwrap_or(0.0))
    }

    #[must_use]
    pub fn is_back_visible(&self, view: ViewId) -> bool {
        self.back_visible.contains(&view)
    }

    /// Remaining height fraction of a collapsing view; `1.0` when untouched.
    #[must_use]
    pub fn height_fraction(&self, view: ViewId) -> f32 {
        self.collapse.get(&view).copied().unwrap_or(1.0)
    }

    #[must_use]
    pub fn is_hidden(&self, id: RowId) -> bool {
        self.hidden.contains(&id)
    }

    /// Bounds of the floating overlay, if a row is lifted.
    #[must_use]
    pub const fn hover(&self) -> Option<Rect> {
        self.hover
    }

    /// Animations still playing.
    #[must_use]
    pub fn playing(&self) -> usize {
        self.playing.len()
    }

    /// First realized position and the number of realized positions.
    #[must_use]
    pub fn visible_window(&self) -> (usize, usize) {
        let range = self.visible_range();
        (range.start, range.len())
    }

    fn visible_range(&self) -> std::ops::Range<usize> {
        let first = usize::try_from(self.scroll_offset / self.row_height).unwrap_or(0);
        let bottom = self.scroll_offset + self.viewport_height;
        let end = usize::try_from((bottom + self.row_height - 1) / self.row_height).unwrap_or(0);
        let end = end.min(self.items.len());
        first.min(end)..end
    }

    fn view_for(&self, position: usize) -> ViewId {
        ViewId((position % self.view_slots) as u64)
    }

    fn bounds_for(&self, position: usize) -> Rect {
        let top = position as i32 * self.row_height - self.scroll_offset;
        Rect::new(0, top, self.width, self.row_height)
    }

    fn content_height(&self) -> i32 {
        self.items.len() as i32 * self.row_height
    }

    fn max_offset(&self) -> i32 {
        (self.content_height() - self.viewport_height).max(0)
    }

    // --- application side --------------------------------------------------

    /// Remove items the way an application does on a dismissal report.
    ///
    /// `positions` must be descending; out-of-range positions are skipped.
    pub fn remove_positions(&mut self, positions: &[usize]) {
        for &position in positions {
            if position < self.items.len() {
                self.items.remove(position);
            }
        }
        self.scroll_offset = self.scroll_offset.min(self.max_offset());
        self.layout_dirty = true;
    }

    /// Scroll to an absolute offset, clamped to the content.
    pub fn set_scroll_offset(&mut self, offset: i32) {
        let clamped = offset.clamp(0, self.max_offset());
        if clamped != self.scroll_offset {
            self.scroll_offset = clamped;
            self.scrolled = true;
        }
    }

    /// Whether a layout pass is due. Clears the flag.
    pub fn take_layout_dirty(&mut self) -> bool {
        std::mem::take(&mut self.layout_dirty)
    }

    /// Whether the content scrolled. Clears the flag.
    pub fn take_scrolled(&mut self) -> bool {
        std::mem::take(&mut self.scrolled)
    }

    // --- animation playback ------------------------------------------------

    /// Advance every playing animation by `dt` and return the finished ones.
    pub fn advance(&mut self, dt: Duration) -> Vec<AnimationToken> {
        let mut finished = Vec::new();
        let mut playing = std::mem::take(&mut self.playing);
        for anim in &mut playing {
            anim.tween.tick(dt);
            self.apply(anim);
            if anim.tween.is_complete() {
                finished.push(anim.request.token);
            }
        }
        playing.retain(|anim| !anim.tween.is_complete());
        self.playing = playing;
        finished
    }

    /// Run every playing animation to its end.
    pub fn finish_all(&mut self) -> Vec<AnimationToken> {
        let longest = self
            .playing
            .iter()
            .map(|anim| anim.tween.remaining())
            .max()
            .unwrap_or(Duration::ZERO);
        self.advance(longest)
    }

    fn apply(&mut self, anim: &Playing) {
        let value = anim.tween.current();
        match (anim.request.target, anim.request.kind) {
            (AnimationTarget::View(view), AnimationKind::TranslateX { .. }) => {
                self.translations.insert(view, value);
            }
            (AnimationTarget::View(view), AnimationKind::Collapse) => {
                self.collapse.insert(view, value);
            }
            (AnimationTarget::View(view), AnimationKind::SettleY { .. }) => {
                if anim.tween.is_complete() {
                    self.settle.remove(&view);
                } else {
                    self.settle.insert(view, value);
                }
            }
            (AnimationTarget::Hover, AnimationKind::HoverBounds { from, to }) => {
                if self.hover.is_some() {
                    self.hover = Some(from.lerp(&to, anim.tween.value()));
                }
            }
            _ => {}
        }
    }
}

impl ListHost for VirtualList {
    fn realized_rows(&self) -> Vec<RealizedRow> {
        self.visible_range()
            .map(|position| RealizedRow {
                view: self.view_for(position),
                id: self.items[position],
                position,
                bounds: self.bounds_for(position),
            })
            .collect()
    }

    fn row_count(&self) -> usize {
        self.items.len()
    }

    fn item_id(&self, position: usize) -> Option<RowId> {
        self.items.get(position).copied()
    }

    fn is_swipeable(&self, position: usize) -> bool {
        !self.non_swipeable.contains(&position)
    }

    fn swipe_mode_override(&self, position: usize) -> Option<SwipeMode> {
        self.mode_overrides.get(&position).copied()
    }

    fn tap_target(&self, _position: usize, point: Point) -> TapTarget {
        match self.checkbox_width {
            Some(width) if point.x < width as f32 => TapTarget::Checkbox,
            _ => TapTarget::Front,
        }
    }

    fn list_bounds(&self) -> Rect {
        Rect::from_size(self.width, self.viewport_height)
    }

    fn scroll_metrics(&self) -> ScrollMetrics {
        ScrollMetrics {
            offset: self.scroll_offset,
            extent: self.viewport_height,
            range: self.content_height(),
        }
    }

    fn translate_front(&mut self, view: ViewId, dx: f32) {
        self.commands.push(HostCommand::TranslateFront { view, dx });
        self.translations.insert(view, dx);
    }

    fn set_back_visible(&mut self, view: ViewId, visible: bool) {
        self.commands.push(HostCommand::SetBackVisible { view, visible });
        if visible {
            self.back_visible.insert(view);
        } else {
            self.back_visible.remove(&view);
        }
    }

    fn cancel_native_gestures(&mut self) {
        self.commands.push(HostCommand::CancelNativeGestures);
    }

    fn animate(&mut self, request: AnimationRequest) {
        self.commands.push(HostCommand::Animate { request });
        let (from, to) = match (request.target, request.kind) {
            (AnimationTarget::View(view), AnimationKind::TranslateX { to }) => {
                (self.translations.get(&view).copied().unwrap_or(0.0), to)
            }
            (_, AnimationKind::Collapse) => (1.0, 0.0),
            (_, AnimationKind::HoverBounds { .. }) => (0.0, 1.0),
            (_, AnimationKind::SettleY { from }) => (from, 0.0),
            (AnimationTarget::Hover, AnimationKind::TranslateX { to }) => (to, to),
        };
        let playing = Playing {
            request,
            tween: Tween::new(from, to, request.duration),
        };
        self.apply(&playing);
        self.playing.push(playing);
    }

    fn reset_presentation(&mut self, view: ViewId) {
        self.commands.push(HostCommand::ResetPresentation { view });
        self.translations.remove(&view);
        self.back_visible.remove(&view);
        self.collapse.remove(&view);
        self.settle.remove(&view);
    }

    fn swap_rows(&mut self, a: usize, b: usize) {
        self.commands.push(HostCommand::SwapRows { a, b });
        if a < self.items.len() && b < self.items.len() {
            self.items.swap(a, b);
        }
    }

    fn notify_dataset_changed(&mut self) {
        self.commands.push(HostCommand::NotifyDatasetChanged);
        self.layout_dirty = true;
    }

    fn lift_row(&mut self, view: ViewId, bounds: Rect) {
        self.commands.push(HostCommand::LiftRow { view, bounds });
        self.hover = Some(bounds);
    }

    fn move_hover(&mut self, bounds: Rect) {
        self.commands.push(HostCommand::MoveHover { bounds });
        self.hover = Some(bounds);
    }

    fn drop_hover(&mut self) {
        self.commands.push(HostCommand::DropHover);
        self.hover = None;
    }

    fn set_row_hidden(&mut self, id: RowId, hidden: bool) {
        self.commands.push(HostCommand::SetRowHidden { id, hidden });
        if hidden {
            self.hidden.insert(id);
        } else {
            self.hidden.remove(&id);
        }
    }

    fn scroll_by(&mut self, dy: i32) {
        self.commands.push(HostCommand::ScrollBy { dy });
        self.set_scroll_offset(self.scroll_offset + dy);
    }
}
