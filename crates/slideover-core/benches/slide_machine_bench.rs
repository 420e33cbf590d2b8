//! Benchmark: drag deltas, settle ticks, and gesture detection.
//!
//! Run with: `cargo bench -p slideover-core --bench slide_machine_bench`
//!
//! Measures the per-event cost of the hot paths a host hits once per pointer
//! sample or display frame.

use std::time::Duration;

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use slideover_core::event::TouchEvent;
use slideover_core::gesture::GestureDetector;
use slideover_core::{PaneRegistry, Side, SlideContext, SlideMachine};
use web_time::Instant;

fn panes() -> PaneRegistry {
    let mut panes = PaneRegistry::new();
    panes.set_pane(Side::Left, 280.0);
    panes.set_pane(Side::Right, 200.0);
    panes
}

// ===========================================================================
// Drag
// ===========================================================================

fn bench_drag(c: &mut Criterion) {
    let panes = panes();
    let ctx = SlideContext::new(&panes, 720.0);
    let mut group = c.benchmark_group("drag");

    group.bench_function("apply_delta_x100", |b| {
        b.iter(|| {
            let mut machine = SlideMachine::default();
            machine.begin_drag();
            for i in 0..100 {
                let dx = if i % 2 == 0 { 7.5 } else { -3.0 };
                black_box(machine.apply_delta(&ctx, dx, 12.0));
            }
            black_box(machine.drain_events().len())
        });
    });

    group.finish();
}

// ===========================================================================
// Settle
// ===========================================================================

fn bench_settle(c: &mut Criterion) {
    let panes = panes();
    let ctx = SlideContext::new(&panes, 720.0);
    let mut group = c.benchmark_group("settle");

    group.bench_function("open_to_rest_16ms", |b| {
        b.iter(|| {
            let mut machine = SlideMachine::default();
            machine.open(&ctx, Side::Left, true);
            while machine.tick(&ctx, Duration::from_millis(16)) {}
            black_box(machine.slide_amount())
        });
    });

    group.finish();
}

// ===========================================================================
// Gesture detection
// ===========================================================================

fn bench_gesture(c: &mut Criterion) {
    let start = Instant::now();
    let events: Vec<TouchEvent> = std::iter::once(TouchEvent::down(4.0, 300.0, start))
        .chain((1u32..60).map(|i| {
            TouchEvent::moved(
                4.0 + f64::from(i) * 5.0,
                300.0,
                start + Duration::from_millis(u64::from(i) * 8),
            )
        }))
        .chain(std::iter::once(TouchEvent::up(
            304.0,
            300.0,
            start + Duration::from_millis(488),
        )))
        .collect();

    c.bench_function("gesture/process_stroke", |b| {
        b.iter(|| {
            let mut detector = GestureDetector::default();
            let mut emitted = 0;
            for event in &events {
                emitted += detector.process(black_box(event)).len();
            }
            black_box(emitted)
        });
    });
}

criterion_group!(benches, bench_drag, bench_settle, bench_gesture);
criterion_main!(benches);
