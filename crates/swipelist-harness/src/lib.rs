#![forbid(unsafe_code)]

//! Deterministic host and driver for exercising swipelist without a UI.
//!
//! - [`virtual_list::VirtualList`] implements [`swipelist::ListHost`] over a
//!   scrolling window of fixed-height rows with recycled views.
//! - [`driver::Harness`] steps a [`swipelist::SwipeList`] against it frame by
//!   frame and collects the events it reports.
//! - [`trace::EventTrace`] records those events as JSONL.

pub mod driver;
pub mod trace;
pub mod virtual_list;

pub use driver::{FRAME, Harness};
pub use trace::EventTrace;
pub use virtual_list::{HostCommand, VirtualList};
