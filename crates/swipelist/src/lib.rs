#![forbid(unsafe_code)]

//! Swipe gestures, dismissal batching, and drag reordering for recycled
//! list views.
//!
//! # Role in swipelist
//! This crate is the engine. [`SwipeList`] receives pointer, scroll, layout,
//! and animation callbacks from a host list view, drives the swipe and
//! reorder state machines, issues presentation commands through
//! [`host::ListHost`], and returns [`SwipeListEvent`]s for the application.
//!
//! # Pipeline
//!
//! ```text
//! PointerEvent ─► classifier ─► resolver ─► animation request
//!                     │                          │ on_animation_finished
//!                     │ long press               ▼
//!                     └──────► reorder     dismiss batch ─► Dismissed
//! ```
//!
//! The classifier, resolver, and dismiss batch are pure and can be used on
//! their own. The reorder engine and [`SwipeList`] talk to the host.

pub mod classifier;
mod completion;
pub mod dismiss;
pub mod event;
pub mod host;
pub mod list;
pub mod realized;
pub mod reorder;
pub mod resolver;
pub mod row_state;

pub use event::{PointerOutcome, SwipeListEvent};
pub use host::{
    AnimationKind, AnimationRequest, AnimationTarget, AnimationToken, ListHost, RealizedRow,
    RowId, TapTarget, ViewId,
};
pub use list::SwipeList;

pub use swipelist_core;
