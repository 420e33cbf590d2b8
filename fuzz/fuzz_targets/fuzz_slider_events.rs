#![no_main]

use std::time::Duration;

use arbitrary::{Result, Unstructured};
use libfuzzer_sys::fuzz_target;
use slideover::prelude::*;

fuzz_target!(|data: &[u8]| {
    let mut u = Unstructured::new(data);
    let _ = run(&mut u);
});

fn run(u: &mut Unstructured<'_>) -> Result<()> {
    let width = f64::from(u.int_in_range(0u16..=1_200)?);
    let left = f64::from(u.int_in_range(0u16..=600)?);
    let right = f64::from(u.int_in_range(0u16..=600)?);

    let config = SliderConfig::default()
        .darkening(Sides::from_bits_truncate(u.arbitrary()?))
        .over_content(Sides::from_bits_truncate(u.arbitrary()?));
    let Ok(mut slider) = SliderLayout::new(
        config,
        [
            SurfaceBinding::content(),
            SurfaceBinding::left(left),
            SurfaceBinding::right(right),
        ],
    ) else {
        return Ok(());
    };
    slider.set_size(width, 600.0);

    let start = Instant::now();
    let mut now = start;
    while !u.is_empty() {
        now += Duration::from_millis(u64::from(u.int_in_range(0u8..=40)?));
        let x = f64::from(u.int_in_range(0u16..=1_300)?) - 50.0;
        let action = match u.int_in_range(0u8..=3)? {
            0 => TouchAction::Down,
            1 => TouchAction::Move,
            2 => TouchAction::Up,
            _ => TouchAction::Cancel,
        };
        let event = TouchEvent::new(action, x, 300.0, now);

        match u.int_in_range(0u8..=9)? {
            0..=2 => {
                slider.on_intercept_touch_event(&event);
            }
            3..=6 => {
                slider.on_touch_event(&event);
            }
            7 => {
                slider.tick(Duration::from_millis(u64::from(u.int_in_range(0u8..=64)?)));
            }
            8 => {
                let side = if u.arbitrary()? { Side::Left } else { Side::Right };
                if u.arbitrary()? {
                    slider.open_slider(side);
                } else {
                    slider.close_slider(side, u.arbitrary()?);
                }
            }
            _ => {
                if u.arbitrary()? {
                    slider.lock_sliders();
                } else {
                    slider.unlock_sliders();
                }
                slider.on_back();
            }
        }

        // Post-conditions that must always hold:
        let state = slider.state();
        let s = state.slide_amount;
        match state.active_pane {
            None => assert_eq!(s, 0.0, "slide without active pane"),
            Some(Side::Left) => assert!((0.0..=left).contains(&s), "left slide OOB: {s}"),
            Some(Side::Right) => assert!((-right..=0.0).contains(&s), "right slide OOB: {s}"),
        }
        if let Some(open) = state.open_pane {
            assert_eq!(state.phase, SlidePhase::Idle, "open pane while moving");
            assert_eq!(s, slider.panes().open_offset(open), "open pane not pinned");
        }
        let ratio = slider.scroll_ratio();
        assert!((0.0..=1.0).contains(&ratio), "ratio OOB: {ratio}");
    }
    Ok(())
}
