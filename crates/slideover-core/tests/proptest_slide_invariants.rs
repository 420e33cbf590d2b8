//! Property-based invariant tests for the slide machine.
//!
//! 1. The slide amount always stays within the active pane's signed extent,
//!    and is zero without an active pane.
//! 2. An open pane rests exactly at its full extent.
//! 3. Ratios never decrease during a monotonic drag.
//! 4. No panics on arbitrary operation sequences.
//! 5. A pane is never reported opened while the other one is, and a close
//!    always names the pane last reported opened.

use std::time::Duration;

use proptest::prelude::*;
use slideover_core::{PaneRegistry, Side, SlideContext, SlideMachine, SlidePhase, SliderEvent};

// ── Strategies ──────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
enum Op {
    BeginDrag,
    Delta { dx: f64, start_x: f64 },
    EndDrag(f64),
    Fling(f64),
    Tick(u64),
    Open(Side, bool),
    Close(Side, bool),
    CloseAll,
    CloseImmediate,
    Back,
}

fn side_strategy() -> impl Strategy<Value = Side> {
    prop_oneof![Just(Side::Left), Just(Side::Right)]
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        Just(Op::BeginDrag),
        (-300.0f64..300.0, 0.0f64..400.0).prop_map(|(dx, start_x)| Op::Delta { dx, start_x }),
        (0.0f64..400.0).prop_map(Op::EndDrag),
        (-5_000.0f64..5_000.0).prop_map(Op::Fling),
        (0u64..80).prop_map(Op::Tick),
        (side_strategy(), any::<bool>()).prop_map(|(s, a)| Op::Open(s, a)),
        (side_strategy(), any::<bool>()).prop_map(|(s, a)| Op::Close(s, a)),
        Just(Op::CloseAll),
        Just(Op::CloseImmediate),
        Just(Op::Back),
    ]
}

fn apply(machine: &mut SlideMachine, ctx: &SlideContext<'_>, op: &Op) {
    match *op {
        Op::BeginDrag => {
            machine.begin_drag();
        }
        Op::Delta { dx, start_x } => {
            machine.apply_delta(ctx, dx, start_x);
        }
        Op::EndDrag(x) => machine.end_drag(ctx, x),
        Op::Fling(v) => {
            machine.on_fling(ctx, v);
        }
        Op::Tick(ms) => {
            machine.tick(ctx, Duration::from_millis(ms));
        }
        Op::Open(side, animate) => {
            machine.open(ctx, side, animate);
        }
        Op::Close(side, animate) => {
            machine.close(ctx, side, animate);
        }
        Op::CloseAll => {
            machine.close_all(ctx);
        }
        Op::CloseImmediate => {
            machine.close_immediate();
        }
        Op::Back => {
            machine.on_back(ctx);
        }
    }
}

fn assert_slide_invariant(machine: &SlideMachine, panes: &PaneRegistry) {
    let state = machine.state();
    let slide = state.slide_amount;
    match state.active_pane {
        None => assert_eq!(slide, 0.0, "no active pane but slide {slide}"),
        Some(Side::Left) => assert!(
            (0.0..=panes.extent_of(Side::Left)).contains(&slide),
            "left slide out of range: {slide}"
        ),
        Some(Side::Right) => assert!(
            (-panes.extent_of(Side::Right)..=0.0).contains(&slide),
            "right slide out of range: {slide}"
        ),
    }
    if let Some(open) = state.open_pane {
        assert_eq!(state.phase, SlidePhase::Idle);
        assert_eq!(state.active_pane, Some(open));
        assert_eq!(slide, panes.open_offset(open));
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 1-2. Slide stays in range; open panes rest at full extent
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn slide_stays_within_active_extent(
        left in 0.0f64..300.0,
        right in 0.0f64..300.0,
        ops in proptest::collection::vec(op_strategy(), 0..120),
    ) {
        let mut panes = PaneRegistry::new();
        panes.set_pane(Side::Left, left);
        panes.set_pane(Side::Right, right);
        let ctx = SlideContext::new(&panes, 400.0);
        let mut machine = SlideMachine::default();

        for op in &ops {
            apply(&mut machine, &ctx, op);
            assert_slide_invariant(&machine, &panes);
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 3. Ratios are monotonic during a monotonic drag
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn ratio_non_decreasing_during_opening_drag(
        extent in 1.0f64..500.0,
        deltas in proptest::collection::vec(0.0f64..40.0, 1..60),
    ) {
        let panes = {
            let mut p = PaneRegistry::new();
            p.set_pane(Side::Left, extent);
            p
        };
        let ctx = SlideContext::new(&panes, 800.0);
        let mut machine = SlideMachine::default();
        machine.begin_drag();

        let mut prev = 0.0;
        for dx in deltas {
            machine.apply_delta(&ctx, dx, 10.0);
            let ratio = machine.ratio(&ctx);
            prop_assert!(ratio >= prev, "ratio went from {} to {}", prev, ratio);
            prop_assert!((0.0..=1.0).contains(&ratio));
            prev = ratio;
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 4-5. Notifications pair up
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn open_and_close_notifications_pair_by_side(
        ops in proptest::collection::vec(op_strategy(), 0..120),
    ) {
        let mut panes = PaneRegistry::new();
        panes.set_pane(Side::Left, 200.0);
        panes.set_pane(Side::Right, 150.0);
        let ctx = SlideContext::new(&panes, 400.0);
        let mut machine = SlideMachine::default();

        for op in &ops {
            apply(&mut machine, &ctx, op);
        }
        // Drain any settle still in flight.
        for _ in 0..100 {
            machine.tick(&ctx, Duration::from_millis(16));
        }

        let mut open: Option<Side> = None;
        for event in machine.drain_events() {
            match event {
                SliderEvent::Opened(side) => {
                    prop_assert!(
                        open.is_none_or(|current| current == side),
                        "opened {:?} while {:?} open",
                        side,
                        open
                    );
                    open = Some(side);
                }
                SliderEvent::Closed(side) => {
                    if let Some(current) = open {
                        prop_assert_eq!(current, side);
                    }
                    open = None;
                }
                _ => {}
            }
        }
        if let Some(side) = machine.state().open_pane {
            prop_assert_eq!(open, Some(side));
        }
    }
}
