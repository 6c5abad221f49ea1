#![forbid(unsafe_code)]

//! Events the engine reports back to the application.

use serde::{Deserialize, Serialize};
use swipelist_core::config::SwipeAction;

use crate::host::{RowId, TapTarget};

/// Notification produced by [`crate::SwipeList`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SwipeListEvent {
    /// A row finished opening.
    Opened { position: usize, right: bool },
    /// A row finished closing.
    Closed { position: usize, from_right: bool },
    /// A horizontal swipe or a drag began on a row.
    MoveStarted { position: usize },
    /// The swipe or drag that began with `MoveStarted` ended.
    MoveEnded { position: usize },
    /// An accepted sample on a closed row, with the action it would commit.
    StartOpen {
        position: usize,
        action: SwipeAction,
        right: bool,
    },
    /// A swipe started on an open row.
    StartClose { position: usize, right: bool },
    FinishedSwipeRight { position: usize },
    FinishedSwipeLeft { position: usize },
    FinishedLongSwipeRight { position: usize },
    FinishedLongSwipeLeft { position: usize },
    /// Rows removed in one batch, strictly descending.
    Dismissed { positions: Vec<usize> },
    /// A drag reorder settled; the full identity sequence after the drop.
    Reordered { order: Vec<RowId> },
    /// The host announced a dataset change.
    ListChanged,
    RowTapped { position: usize, target: TapTarget },
    ChoiceChanged { position: usize, selected: bool },
    /// The selection went from empty to non-empty.
    ChoiceStarted,
    /// The selection became empty.
    ChoiceEnded,
    FirstItemReached,
    LastItemReached,
    /// A long press lifted a row for reordering.
    DragStarted { position: usize },
}

/// Result of feeding one pointer event to the engine.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PointerOutcome {
    /// Whether the engine consumed the event. Hosts forward unhandled events
    /// to their native gesture handling.
    pub handled: bool,
    pub events: Vec<SwipeListEvent>,
}

impl PointerOutcome {
    pub(crate) fn ignored() -> Self {
        Self::default()
    }

    pub(crate) fn handled(events: Vec<SwipeListEvent>) -> Self {
        Self {
            handled: true,
            events,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_serialize_with_tag() {
        let json = serde_json::to_string(&SwipeListEvent::Dismissed {
            positions: vec![5, 2],
        })
        .unwrap();
        assert_eq!(json, r#"{"event":"dismissed","positions":[5,2]}"#);

        let json = serde_json::to_string(&SwipeListEvent::ListChanged).unwrap();
        assert_eq!(json, r#"{"event":"list_changed"}"#);
    }
}
