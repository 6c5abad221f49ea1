//! Benchmark: gesture classification and end-to-end swipe handling.
//!
//! Run with: `cargo bench -p swipelist-harness --bench classifier_bench`
//!
//! Measures the pure classifier on a dense displacement sweep, a full
//! 120-sample session from arm to release, and one swipe driven through the
//! coordinator and the virtual list until every animation settles.

use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use swipelist::classifier::{GestureClassifier, classify};
use swipelist::host::{RealizedRow, RowId, ViewId};
use swipelist_core::config::SwipeConfig;
use swipelist_core::direction::Directions;
use swipelist_core::geometry::{Point, Rect};
use swipelist_harness::{Harness, VirtualList};

fn row() -> RealizedRow {
    RealizedRow {
        view: ViewId(0),
        id: RowId(0),
        position: 0,
        bounds: Rect::new(0, 0, 400, 60),
    }
}

fn bench_classify(c: &mut Criterion) {
    let thresholds = SwipeConfig::default().thresholds();
    c.bench_function("classify_sweep_600", |b| {
        b.iter(|| {
            for d in -300..300 {
                black_box(classify(
                    black_box(d as f32),
                    &thresholds,
                    Directions::BOTH,
                    |_| true,
                ));
            }
        });
    });
}

fn bench_session(c: &mut Criterion) {
    let config = SwipeConfig::default();
    c.bench_function("session_120_samples", |b| {
        b.iter(|| {
            let mut classifier = GestureClassifier::new(&config);
            classifier.arm(row(), 0, Point::new(0.0, 30.0), None, 0.0, Directions::BOTH);
            for i in 1..=120 {
                black_box(classifier.on_move(0, Point::new(i as f32 * 2.5, 30.0)));
            }
            black_box(classifier.release(0, Point::new(300.0, 30.0)))
        });
    });
}

fn bench_harness_swipe(c: &mut Criterion) {
    c.bench_function("harness_open_and_settle", |b| {
        b.iter(|| {
            let mut h = Harness::new(SwipeConfig::default(), VirtualList::new(50, 60, 400, 600))
                .expect("valid config");
            h.swipe(30.0, &[10.0, 60.0, 140.0]);
            h.settle();
            black_box(h.events().len())
        });
    });
}

criterion_group!(benches, bench_classify, bench_session, bench_harness_swipe);
criterion_main!(benches);
