#![forbid(unsafe_code)]

//! Touch ownership decisions.
//!
//! [`GestureArbiter`] answers three questions for the container: should it
//! steal the pointer stream from its children, does a down start a slider
//! drag, and does a scroll belong to the slider or to a descendant.
//!
//! # Sensitive bands
//!
//! With nothing open, only touches near an edge that has a pane are
//! eligible: `x < sensitive_width` for the left pane and
//! `x > width - sensitive_width` for the right pane. With a pane open, the
//! still-visible strip of content is eligible instead.

use crate::machine::{SlideContext, SlidePhase, SliderState};
use crate::pane::Side;

/// Default width of the edge bands, in container units.
pub const DEFAULT_SENSITIVE_WIDTH: f64 = 20.0;

/// Decides whether the slider owns a touch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureArbiter {
    sensitive_width: f64,
}

impl Default for GestureArbiter {
    fn default() -> Self {
        Self::new(DEFAULT_SENSITIVE_WIDTH)
    }
}

impl GestureArbiter {
    /// Create an arbiter with edge bands `sensitive_width` wide.
    ///
    /// Negative or non-finite widths disable the bands.
    #[must_use]
    pub fn new(sensitive_width: f64) -> Self {
        Self {
            sensitive_width: sanitize(sensitive_width),
        }
    }

    /// Width of the edge bands.
    #[inline]
    #[must_use]
    pub fn sensitive_width(&self) -> f64 {
        self.sensitive_width
    }

    /// Change the edge band width.
    pub fn set_sensitive_width(&mut self, sensitive_width: f64) {
        self.sensitive_width = sanitize(sensitive_width);
    }

    /// Whether `x` falls in the left band and a left pane exists.
    #[must_use]
    pub fn in_left_band(&self, x: f64, ctx: &SlideContext<'_>) -> bool {
        ctx.panes.is_present(Side::Left) && x < self.sensitive_width
    }

    /// Whether `x` falls in the right band and a right pane exists.
    #[must_use]
    pub fn in_right_band(&self, x: f64, ctx: &SlideContext<'_>) -> bool {
        ctx.panes.is_present(Side::Right) && x > ctx.width - self.sensitive_width
    }

    /// Whether a touch at `x` may start or continue a slider gesture.
    ///
    /// While scrolling or flying the slider keeps every touch.
    #[must_use]
    pub fn should_intercept(&self, x: f64, state: &SliderState, ctx: &SlideContext<'_>) -> bool {
        match state.phase {
            SlidePhase::Scrolling | SlidePhase::Flying => true,
            SlidePhase::Idle => match state.open_pane {
                None => self.in_left_band(x, ctx) || self.in_right_band(x, ctx),
                Some(_) => state.is_over_visible_content(x, ctx.width),
            },
        }
    }

    /// Whether a down at `x` starts a slider drag.
    ///
    /// With a pane open every down is claimed, so a tap anywhere can close it.
    #[must_use]
    pub fn on_down(&self, x: f64, state: &SliderState, ctx: &SlideContext<'_>) -> bool {
        if state.open_pane.is_some() {
            return true;
        }
        self.in_left_band(x, ctx) || self.in_right_band(x, ctx)
    }

    /// Whether a scroll that started at `start_x` belongs to the slider.
    ///
    /// Mostly-vertical motion is left to descendants.
    #[must_use]
    pub fn on_scroll(
        &self,
        start_x: f64,
        dx: f64,
        dy: f64,
        state: &SliderState,
        ctx: &SlideContext<'_>,
    ) -> bool {
        if dy.abs() > dx.abs() {
            return false;
        }
        self.should_intercept(start_x, state, ctx)
    }
}

fn sanitize(width: f64) -> f64 {
    if width.is_finite() { width.max(0.0) } else { 0.0 }
}
