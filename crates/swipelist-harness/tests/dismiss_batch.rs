//! Batched dismissal through the virtual list.

use swipelist::host::{RowId, ViewId};
use swipelist::{AnimationKind, SwipeListEvent};
use swipelist_core::config::SwipeConfig;
use swipelist_harness::{FRAME, Harness, HostCommand, VirtualList};

fn harness() -> Harness {
    Harness::new(SwipeConfig::default(), VirtualList::new(20, 60, 400, 300)).expect("valid config")
}

fn dismissals(events: &[SwipeListEvent]) -> Vec<Vec<usize>> {
    events
        .iter()
        .filter_map(|e| match e {
            SwipeListEvent::Dismissed { positions } => Some(positions.clone()),
            _ => None,
        })
        .collect()
}

#[test]
fn mixed_batch_reports_once_after_every_collapse() {
    let mut h = harness();
    for position in [1, 15, 3] {
        h.apply(|list, _| list.set_checked(position, true));
    }
    h.take_events();

    h.apply(|list, host| list.dismiss_selected(host));
    assert_eq!(h.take_events(), vec![SwipeListEvent::ChoiceEnded]);
    let collapses = h
        .host()
        .commands()
        .iter()
        .filter(|c| matches!(c, HostCommand::Animate { .. }))
        .count();
    assert_eq!(collapses, 2, "only on-screen rows animate");

    for _ in 0..5 {
        h.advance(FRAME);
    }
    assert!(dismissals(h.events()).is_empty());

    h.settle();
    let events = h.take_events();
    assert_eq!(dismissals(&events), vec![vec![15, 3, 1]]);
    assert_eq!(events.last(), Some(&SwipeListEvent::ListChanged));

    let items = h.host().items();
    assert_eq!(items.len(), 17);
    for gone in [RowId(1), RowId(3), RowId(15)] {
        assert!(!items.contains(&gone));
    }
    assert_eq!(h.list().count_selected(), 0);
}

#[test]
fn off_screen_only_batch_flushes_immediately() {
    let mut h = harness();
    let frame = h.frame();
    h.apply(|list, host| list.dismiss(12, host));
    assert_eq!(
        h.take_events(),
        vec![
            SwipeListEvent::Dismissed { positions: vec![12] },
            SwipeListEvent::ListChanged,
        ]
    );
    assert_eq!(h.frame(), frame);
    assert_eq!(h.host().playing(), 0);
}

#[test]
fn late_dismissal_joins_running_batch() {
    let mut h = harness();
    h.apply(|list, host| list.dismiss(2, host));
    for _ in 0..5 {
        h.advance(FRAME);
    }
    h.apply(|list, host| list.dismiss(4, host));
    h.settle();
    assert_eq!(dismissals(h.events()), vec![vec![4, 2]]);
}

#[test]
fn position_past_the_store_is_tolerated() {
    let mut h = harness();
    h.apply(|list, host| list.dismiss(500, host));
    assert_eq!(dismissals(h.events()), vec![vec![500]]);
    assert!(h.list().row_state().len() > 500);
    assert_eq!(h.host().items().len(), 20);
}

#[test]
fn presentation_is_reset_after_report() {
    let mut h = harness().keep_dismissed_rows();
    h.swipe(30.0, &[390.0, 340.0, 250.0, 180.0]);
    h.settle();

    assert_eq!(dismissals(h.events()), vec![vec![0]]);
    assert_eq!(h.host().items().len(), 20);
    let view = h.host().view_at(0).unwrap();
    assert_eq!(h.host().translation_at(0), Some(0.0));
    assert_eq!(h.host().height_fraction(view), 1.0);
    assert!(!h.host().is_back_visible(view));

    let commands = h.host().commands();
    let reset = commands
        .iter()
        .position(|c| *c == HostCommand::ResetPresentation { view })
        .expect("view reset");
    assert!(
        commands[reset..]
            .iter()
            .all(|c| !matches!(c, HostCommand::Animate { .. })),
        "nothing animates after the reset"
    );
}

#[test]
fn row_scrolled_away_mid_slide_skips_the_collapse() {
    let mut h = harness();
    h.swipe(30.0, &[390.0, 340.0, 250.0, 180.0]);
    assert!(h.host().playing() > 0, "slide still running");

    h.user_scroll(420);
    assert_eq!(h.host().visible_window(), (7, 5));
    assert_eq!(h.host().view_at(7), Some(ViewId(0)), "view rebound to row 7");
    h.settle();

    assert_eq!(dismissals(h.events()), vec![vec![0]]);
    let collapses = h
        .host()
        .commands()
        .iter()
        .filter(|c| {
            matches!(
                c,
                HostCommand::Animate { request } if request.kind == AnimationKind::Collapse
            )
        })
        .count();
    assert_eq!(collapses, 0, "the rebound view is left alone");
    assert!(
        !h.host()
            .commands()
            .contains(&HostCommand::ResetPresentation { view: ViewId(0) })
    );
    assert_eq!(h.host().height_fraction(ViewId(0)), 1.0);

    let items = h.host().items();
    assert_eq!(items.len(), 19);
    assert!(!items.contains(&RowId(0)));
}
