#![forbid(unsafe_code)]

//! Core: geometry, pointer input, configuration, and animation primitives.
//!
//! # Role in swipelist
//! `swipelist-core` is the vocabulary layer. It owns the coordinate types,
//! normalized pointer and scroll events, the validated [`config::SwipeConfig`]
//! policy, and the small animation contract hosts use to play the requests
//! the engine issues.
//!
//! # How it fits in the system
//! The engine (`swipelist`) consumes `swipelist-core` types and drives the
//! swipe and reorder state machines. Hosts (real list views, or the
//! in-memory `swipelist-harness`) translate their native input into
//! [`event::PointerEvent`] values and play back animation requests.

pub mod animation;
pub mod config;
pub mod direction;
pub mod event;
pub mod geometry;
pub mod logging;

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, debug_span, error, info, info_span, trace, warn};
