#![forbid(unsafe_code)]

//! Action resolver.
//!
//! Maps a released swipe to exactly one policy (reveal, dismiss, or return
//! to rest) and plans its animation, state change, and notifications. Like
//! the classifier it is pure; [`crate::SwipeList`] executes the plan.
//!
//! # Invariants
//!
//! 1. At most one resolution per release.
//! 2. Open state flips only when `swap` holds.
//! 3. A finished-swipe notification is planned only for a non-no-op outcome
//!    in a direction the configured modes enable.

use serde::{Deserialize, Serialize};
use swipelist_core::config::{SwipeAction, SwipeConfig};
use swipelist_core::direction::SwipeDirection;

use crate::classifier::{Classification, SwipeRelease};
use crate::event::SwipeListEvent;

/// Which finished-swipe notification to emit after the commit animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinishedSwipe {
    Right,
    Left,
    LongRight,
    LongLeft,
}

impl FinishedSwipe {
    #[must_use]
    pub const fn event(self, position: usize) -> SwipeListEvent {
        match self {
            Self::Right => SwipeListEvent::FinishedSwipeRight { position },
            Self::Left => SwipeListEvent::FinishedSwipeLeft { position },
            Self::LongRight => SwipeListEvent::FinishedLongSwipeRight { position },
            Self::LongLeft => SwipeListEvent::FinishedLongSwipeLeft { position },
        }
    }
}

/// Open/close notification to emit after a reveal animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RevealNotice {
    Opened { right: bool },
    Closed { from_right: bool },
}

impl RevealNotice {
    #[must_use]
    pub const fn event(self, position: usize) -> SwipeListEvent {
        match self {
            Self::Opened { right } => SwipeListEvent::Opened { position, right },
            Self::Closed { from_right } => SwipeListEvent::Closed {
                position,
                from_right,
            },
        }
    }
}

/// Planned outcome of a release.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolution {
    /// The policy that actually runs; `None` means return to rest.
    pub policy: SwipeAction,
    /// Front-layer translation to animate to.
    pub target: f32,
    /// New `(open, opened_right)` to record immediately.
    pub open_state: Option<(bool, bool)>,
    pub notice: Option<RevealNotice>,
    /// Hand the row to the dismissal pipeline once the animation completes.
    pub dismiss: bool,
    pub finished: Option<FinishedSwipe>,
}

impl Resolution {
    /// Return to `resting` with no state change and no notifications.
    #[must_use]
    pub const fn rest(resting: f32) -> Self {
        Self {
            policy: SwipeAction::None,
            target: resting,
            open_state: None,
            notice: None,
            dismiss: false,
            finished: None,
        }
    }

    /// Whether the row ends up closed (back layer hidden) after the animation.
    #[must_use]
    pub fn ends_closed(&self) -> bool {
        self.target == 0.0
    }
}

/// Front-layer translation of a fully open row.
#[must_use]
pub fn open_translation(config: &SwipeConfig, right: bool, width: f32) -> f32 {
    let travel = width - config.open_offset(right);
    if right { travel } else { -travel }
}

/// Plan the outcome of a swipe release.
#[must_use]
pub fn resolve(release: &SwipeRelease, config: &SwipeConfig) -> Resolution {
    let width = release.row.bounds.width as f32;
    let rest = Resolution::rest(release.resting);

    if release.regretted {
        return rest;
    }

    let policy = if release.was_open {
        SwipeAction::Reveal
    } else {
        match release.classification.direction() {
            Some(dir) => config.actions.get(dir, release.classification.is_long()),
            None => SwipeAction::None,
        }
    };

    match policy {
        SwipeAction::Reveal => {
            let target_open = release.was_open != release.swap;
            let right = if release.was_open {
                release.opened_right
            } else {
                release.swap_right
            };
            let target = if target_open {
                open_translation(config, right, width)
            } else {
                0.0
            };
            if !release.swap {
                return Resolution { target, ..rest };
            }
            Resolution {
                policy,
                target,
                open_state: Some((target_open, right)),
                notice: Some(if target_open {
                    RevealNotice::Opened { right }
                } else {
                    RevealNotice::Closed { from_right: right }
                }),
                dismiss: false,
                finished: finished_swipe(release.classification, config),
            }
        }
        SwipeAction::Dismiss if release.swap => Resolution {
            policy,
            target: if release.swap_right { width } else { -width },
            open_state: None,
            notice: None,
            dismiss: true,
            finished: finished_swipe(release.classification, config),
        },
        SwipeAction::Dismiss | SwipeAction::None => rest,
    }
}

/// Plan a programmatic open or close of a realized row.
#[must_use]
pub fn reveal(config: &SwipeConfig, open: bool, right: bool, width: f32) -> Resolution {
    Resolution {
        policy: SwipeAction::Reveal,
        target: if open {
            open_translation(config, right, width)
        } else {
            0.0
        },
        open_state: Some((open, right)),
        notice: Some(if open {
            RevealNotice::Opened { right }
        } else {
            RevealNotice::Closed { from_right: right }
        }),
        dismiss: false,
        finished: None,
    }
}

fn finished_swipe(classification: Classification, config: &SwipeConfig) -> Option<FinishedSwipe> {
    let direction = classification.direction()?;
    let enabled = if classification.is_long() {
        config.long_swipe_directions()
    } else {
        config.swipe_mode.directions()
    };
    if !enabled.allows(direction) {
        return None;
    }
    Some(match (direction, classification.is_long()) {
        (SwipeDirection::Right, false) => FinishedSwipe::Right,
        (SwipeDirection::Left, false) => FinishedSwipe::Left,
        (SwipeDirection::Right, true) => FinishedSwipe::LongRight,
        (SwipeDirection::Left, true) => FinishedSwipe::LongLeft,
    })
}
