//! End-to-end swipe interactions against the virtual list.
//!
//! Every test drives a 20-row list (60px rows, 400px wide, 300px viewport)
//! through the frame-stepped harness and checks the reported events and the
//! host's presentation state.

use swipelist::SwipeListEvent;
use swipelist::classifier::Classification;
use swipelist::host::{RowId, TapTarget};
use swipelist_core::config::{SwipeAction, SwipeConfig, SwipeMode};
use swipelist_core::event::PointerEvent;
use swipelist_harness::{FRAME, Harness, VirtualList};

fn list() -> VirtualList {
    VirtualList::new(20, 60, 400, 300)
}

fn harness(config: SwipeConfig) -> Harness {
    Harness::new(config, list()).expect("valid config")
}

fn classification(h: &Harness) -> Classification {
    h.list().session().expect("active session").classification()
}

fn has(events: &[SwipeListEvent], wanted: &SwipeListEvent) -> bool {
    events.iter().any(|e| e == wanted)
}

#[test]
fn long_swipe_right_walks_the_tiers_and_dismisses() {
    let mut h = harness(SwipeConfig::default());

    assert!(h.down(0.0, 30.0));
    h.move_to(50.0, 30.0);
    assert_eq!(classification(&h), Classification::None);
    h.move_to(120.0, 30.0);
    assert_eq!(classification(&h), Classification::SwipeRight);
    h.move_to(200.0, 30.0);
    assert_eq!(classification(&h), Classification::LongSwipeRight);
    assert!(h.up(200.0, 30.0));

    let events = h.take_events();
    assert_eq!(events.first(), Some(&SwipeListEvent::MoveStarted { position: 0 }));
    assert!(has(
        &events,
        &SwipeListEvent::StartOpen {
            position: 0,
            action: SwipeAction::Dismiss,
            right: true
        }
    ));
    assert_eq!(events.last(), Some(&SwipeListEvent::MoveEnded { position: 0 }));

    h.settle();
    let events = h.take_events();
    assert_eq!(
        events,
        vec![
            SwipeListEvent::FinishedLongSwipeRight { position: 0 },
            SwipeListEvent::Dismissed { positions: vec![0] },
            SwipeListEvent::ListChanged,
        ]
    );
    assert_eq!(h.host().items().len(), 19);
    assert_eq!(h.host().items()[0], RowId(1));
    assert_eq!(h.host().translation_at(0), Some(0.0));
}

#[test]
fn reversal_resolves_to_nothing() {
    let mut h = harness(SwipeConfig::default());
    h.down(0.0, 30.0);
    h.move_to(100.0, 30.0);
    h.move_to(40.0, 30.0);
    assert!(h.list().session().unwrap().is_regretted());
    h.up(40.0, 30.0);
    h.settle();

    let events = h.take_events();
    assert!(!events.iter().any(|e| matches!(
        e,
        SwipeListEvent::Opened { .. }
            | SwipeListEvent::Dismissed { .. }
            | SwipeListEvent::FinishedSwipeRight { .. }
            | SwipeListEvent::FinishedLongSwipeRight { .. }
    )));
    assert!(!h.list().is_open(0));
    assert_eq!(h.host().translation_at(0), Some(0.0));
}

#[test]
fn short_swipe_left_opens_to_offset_then_closes() {
    let mut h = harness(SwipeConfig::default().with_offsets(80.0, 0.0));

    h.swipe(90.0, &[390.0, 340.0, 280.0]);
    h.settle();
    let events = h.take_events();
    assert!(has(
        &events,
        &SwipeListEvent::Opened {
            position: 1,
            right: false
        }
    ));
    assert!(has(&events, &SwipeListEvent::FinishedSwipeLeft { position: 1 }));
    assert!(h.list().is_open(1));
    assert!(!h.list().row_state().is_opened_right(1));
    assert_eq!(h.host().translation_at(1), Some(-320.0));
    let view = h.host().view_at(1).unwrap();
    assert!(h.host().is_back_visible(view));

    h.swipe(90.0, &[100.0, 160.0, 240.0]);
    let events = h.take_events();
    assert!(has(
        &events,
        &SwipeListEvent::StartClose {
            position: 1,
            right: false
        }
    ));
    h.settle();
    let events = h.take_events();
    assert!(has(
        &events,
        &SwipeListEvent::Closed {
            position: 1,
            from_right: false
        }
    ));
    assert!(!h.list().is_open(1));
    assert_eq!(h.host().translation_at(1), Some(0.0));
    assert!(!h.host().is_back_visible(view));
}

#[test]
fn tap_reports_hit_target() {
    let mut h = Harness::new(SwipeConfig::default(), list().with_checkbox_width(48)).unwrap();
    h.down(20.0, 150.0);
    h.up(20.0, 150.0);
    h.down(200.0, 150.0);
    h.up(201.0, 151.0);
    assert_eq!(
        h.take_events(),
        vec![
            SwipeListEvent::RowTapped {
                position: 2,
                target: TapTarget::Checkbox
            },
            SwipeListEvent::RowTapped {
                position: 2,
                target: TapTarget::Front
            },
        ]
    );
}

#[test]
fn non_swipeable_row_is_left_alone() {
    let mut h = Harness::new(SwipeConfig::default(), list().with_non_swipeable(3)).unwrap();
    assert!(!h.down(10.0, 200.0));
    assert!(!h.move_to(200.0, 200.0));
    assert!(!h.up(200.0, 200.0));
    assert!(h.events().is_empty());
}

#[test]
fn row_override_narrows_directions() {
    let mut h = Harness::new(
        SwipeConfig::default(),
        list().with_swipe_mode_override(0, SwipeMode::Left),
    )
    .unwrap();
    h.swipe(30.0, &[10.0, 60.0, 150.0]);
    h.settle();
    assert!(h.events().is_empty());
    assert_eq!(h.host().playing(), 0);
    assert!(!h.list().is_open(0));
}

#[test]
fn cancel_mid_swipe_snaps_back() {
    let mut h = harness(SwipeConfig::default());
    h.down(10.0, 30.0);
    h.move_to(80.0, 30.0);
    assert!(h.list().is_swiping());
    h.cancel(80.0, 30.0);
    h.settle();
    let events = h.take_events();
    assert_eq!(events.last(), Some(&SwipeListEvent::MoveEnded { position: 0 }));
    assert!(!has(
        &events,
        &SwipeListEvent::Opened {
            position: 0,
            right: true
        }
    ));
    assert_eq!(h.host().translation_at(0), Some(0.0));
}

#[test]
fn second_pointer_is_ignored() {
    let mut h = harness(SwipeConfig::default());
    assert!(h.down(10.0, 30.0));
    assert!(!h.pointer(PointerEvent::down(10.0, 150.0).with_pointer(1)));
    assert!(!h.pointer(PointerEvent::moved(200.0, 150.0).with_pointer(1)));
    assert!(!h.pointer(PointerEvent::up(200.0, 150.0).with_pointer(1)));
    assert_eq!(h.list().session().unwrap().row().position, 0);
}

#[test]
fn touch_scroll_closes_rows_and_pauses_swiping() {
    let mut h = harness(SwipeConfig::default());
    h.swipe(90.0, &[390.0, 340.0, 280.0]);
    h.settle();
    assert!(h.list().is_open(1));
    h.take_events();

    h.user_scroll(120);
    assert!(!h.list().is_open(1));
    assert!(h.list().is_paused());
    assert!(!h.down(10.0, 200.0));

    h.advance(h.list().config().scroll_resume_delay + FRAME);
    assert!(!h.list().is_paused());
    h.settle();
    assert!(has(
        &h.take_events(),
        &SwipeListEvent::Closed {
            position: 1,
            from_right: false
        }
    ));
    assert!(h.down(10.0, 200.0));
}

#[test]
fn keeps_rows_open_when_configured() {
    let mut h = harness(SwipeConfig::default().with_close_all_on_scroll(false));
    h.swipe(90.0, &[390.0, 340.0, 280.0]);
    h.settle();
    h.user_scroll(30);
    assert!(h.list().is_open(1));
}

#[test]
fn edge_events_follow_scrolling() {
    let mut h = harness(SwipeConfig::default());
    h.user_scroll(10_000);
    h.user_scroll(-10_000);
    let edges: Vec<SwipeListEvent> = h
        .take_events()
        .into_iter()
        .filter(|e| {
            matches!(
                e,
                SwipeListEvent::FirstItemReached | SwipeListEvent::LastItemReached
            )
        })
        .collect();
    assert_eq!(
        edges,
        vec![
            SwipeListEvent::LastItemReached,
            SwipeListEvent::FirstItemReached
        ]
    );
}

#[test]
fn trace_mirrors_events() {
    let mut h = harness(SwipeConfig::default());
    h.swipe(30.0, &[10.0, 60.0, 140.0]);
    h.settle();
    let names = h.trace().event_names();
    assert_eq!(names.len(), h.events().len());
    assert_eq!(names.first().map(String::as_str), Some("move_started"));
    assert!(names.iter().any(|n| n == "finished_swipe_right"));
}
