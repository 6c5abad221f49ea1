#![forbid(unsafe_code)]

//! The boundary between the engine and the list view that renders it.
//!
//! A host owns the data, the recycled row views, rendering, and animation
//! playback. The engine reaches it only through [`ListHost`]: queries describe
//! what is on screen right now, commands ask for presentation changes.
//!
//! # Identity
//!
//! Three handles name a row and they must not be confused:
//! - [`RowId`] is the stable identity of a data item. It survives reordering
//!   and recycling.
//! - `position` is the item's index in the ordered collection. It changes on
//!   every swap or removal.
//! - [`ViewId`] names a recycled container. Over time the same view shows
//!   many different rows.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use swipelist_core::config::SwipeMode;
use swipelist_core::event::ScrollMetrics;
use swipelist_core::geometry::{Point, Rect};

/// Stable identity of a data item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RowId(pub u64);

/// Handle to a recycled row container owned by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ViewId(pub u64);

/// A row that currently has a live view on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RealizedRow {
    pub view: ViewId,
    pub id: RowId,
    pub position: usize,
    /// Layout bounds in list coordinates, ignoring any front-layer translation.
    pub bounds: Rect,
}

/// Part of a row hit by a tap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TapTarget {
    #[default]
    Front,
    Checkbox,
    Number,
    Back,
}

/// Correlates an animation request with its completion callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnimationToken(pub u64);

/// What an animation applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnimationTarget {
    /// A row view (its front layer for translations, the whole row otherwise).
    View(ViewId),
    /// The floating overlay of a lifted row.
    Hover,
}

/// The property an animation drives.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnimationKind {
    /// Front-layer horizontal translation from its current value to `to`.
    TranslateX { to: f32 },
    /// Row height from its current value to zero.
    Collapse,
    /// Overlay bounds from `from` to `to`.
    HoverBounds { from: Rect, to: Rect },
    /// Vertical translation from `from` to zero.
    SettleY { from: f32 },
}

/// A request for the host to play an animation and report back with
/// [`crate::SwipeList::on_animation_finished`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnimationRequest {
    pub token: AnimationToken,
    pub target: AnimationTarget,
    pub kind: AnimationKind,
    pub duration: Duration,
}

/// The list view the engine drives.
///
/// Queries must reflect the host's state at the moment of the call. Commands
/// take effect immediately from the engine's point of view; a host may defer
/// visual work to its next frame.
pub trait ListHost {
    // --- queries -----------------------------------------------------------

    /// Rows with live views, top to bottom.
    fn realized_rows(&self) -> Vec<RealizedRow>;

    /// Number of items in the backing collection.
    fn row_count(&self) -> usize;

    /// Identity of the item at `position`, if it exists.
    fn item_id(&self, position: usize) -> Option<RowId>;

    /// Whether the row at `position` takes part in swiping.
    fn is_swipeable(&self, _position: usize) -> bool {
        true
    }

    /// Per-row restriction of the configured swipe mode.
    fn swipe_mode_override(&self, _position: usize) -> Option<SwipeMode> {
        None
    }

    /// Hit-test a tap inside the row at `position`.
    fn tap_target(&self, _position: usize, _point: Point) -> TapTarget {
        TapTarget::Front
    }

    /// Visible bounds of the list.
    fn list_bounds(&self) -> Rect;

    fn scroll_metrics(&self) -> ScrollMetrics;

    // --- commands ----------------------------------------------------------

    /// Set the front layer's horizontal translation.
    fn translate_front(&mut self, view: ViewId, dx: f32);

    fn set_back_visible(&mut self, view: ViewId, visible: bool);

    /// Stop native scroll and click handling for the current touch.
    fn cancel_native_gestures(&mut self);

    fn animate(&mut self, request: AnimationRequest);

    /// Restore translation, alpha, and height of a view.
    fn reset_presentation(&mut self, view: ViewId);

    /// Exchange the items at two positions in the backing collection.
    fn swap_rows(&mut self, a: usize, b: usize);

    fn notify_dataset_changed(&mut self);

    /// Show a floating overlay of `view` at `bounds`.
    fn lift_row(&mut self, view: ViewId, bounds: Rect);

    fn move_hover(&mut self, bounds: Rect);

    /// Discard the floating overlay.
    fn drop_hover(&mut self);

    /// Hide or show whichever view currently displays `id`.
    fn set_row_hidden(&mut self, id: RowId, hidden: bool);

    /// Scroll the list content by `dy` pixels (positive scrolls down).
    fn scroll_by(&mut self, dy: i32);
}
