//! Property-based invariant tests for drag reordering.
//!
//! 1. Any drag preserves the multiset of identities
//! 2. The lifted row is present and visible after the drop
//! 3. A drop reports exactly one `MoveEnded` and at most one `Reordered`
//! 4. A reported order matches the host's final order
//! 5. The hover session always ends once the list settles

use proptest::prelude::*;
use swipelist::SwipeListEvent;
use swipelist::host::RowId;
use swipelist_core::config::SwipeConfig;
use swipelist_harness::{Harness, VirtualList};

const ROWS: u64 = 20;
const ROW_HEIGHT: i32 = 60;

fn harness() -> Harness {
    Harness::new(
        SwipeConfig::default().with_drag_and_drop(true),
        VirtualList::new(ROWS, ROW_HEIGHT, 400, 300),
    )
    .expect("valid config")
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn drags_preserve_identities(
        start in 0usize..5,
        ys in prop::collection::vec(0.0f32..300.0, 1..24),
        cancel in any::<bool>(),
    ) {
        let mut h = harness();
        let down_y = start as f32 * ROW_HEIGHT as f32 + 30.0;
        h.long_press(10.0, down_y);
        prop_assert!(h.list().is_dragging());
        let lifted = RowId(start as u64);
        h.take_events();

        h.drag_vertically(10.0, &ys);
        let last_y = ys.last().copied().unwrap_or(down_y);
        if cancel {
            h.cancel(10.0, last_y);
        } else {
            h.up(10.0, last_y);
        }
        h.settle();

        prop_assert!(!h.list().is_dragging());
        prop_assert!(h.host().hover().is_none());
        prop_assert!(!h.host().is_hidden(lifted));

        let mut items = h.host().items().to_vec();
        prop_assert!(items.contains(&lifted));
        items.sort();
        prop_assert_eq!(items, (0..ROWS).map(RowId).collect::<Vec<_>>());

        let events = h.take_events();
        let ended = events
            .iter()
            .filter(|e| matches!(e, SwipeListEvent::MoveEnded { .. }))
            .count();
        prop_assert_eq!(ended, 1);
        let orders: Vec<&Vec<RowId>> = events
            .iter()
            .filter_map(|e| match e {
                SwipeListEvent::Reordered { order } => Some(order),
                _ => None,
            })
            .collect();
        prop_assert!(orders.len() <= 1);
        if cancel {
            prop_assert!(orders.is_empty());
        }
        if let Some(order) = orders.first() {
            prop_assert_eq!(order.as_slice(), h.host().items());
        }
    }
}
