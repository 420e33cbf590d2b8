#![forbid(unsafe_code)]

//! Slide state machine.
//!
//! Tracks the signed slide offset, which pane it reveals, and whether the
//! offset is idle, following a finger, or settling under the animator.
//!
//! # State Machine
//!
//! ```text
//!            drag claims a pane              fling / release mid-way
//!   Idle ───────────────────────▶ Scrolling ─────────────────────────▶ Flying
//!    ▲                               │                                   │
//!    │  release at 0 or full extent  │                                   │
//!    ◀───────────────────────────────┘                                   │
//!    ◀──────────────────────────── settle finished ──────────────────────┘
//! ```
//!
//! # Invariants
//!
//! 1. `open_pane.is_some()` implies `phase == Idle` and
//!    `slide_amount == open_offset(open_pane)`.
//! 2. `active_pane.is_none()` implies `slide_amount == 0.0`.
//! 3. `slide_amount` has the sign of the active pane and never exceeds its
//!    extent.
//! 4. While `Flying`, drags are ignored; only the animator moves the offset.
//! 5. Exactly one `Opened` / `Closed` notification fires per settle, and a
//!    settle superseded by another operation fires neither.
//!
//! # Notifications
//!
//! Every transition is appended to an outbox of [`SliderEvent`]s. The owning
//! container drains it after each call and forwards it to its listener.

use std::time::Duration;

use crate::animation::{
    DEFAULT_FLY_DURATION, Easing, SettleAnimator, SettleHandle, close_duration, open_duration,
};
use crate::logging::{debug, trace};
use crate::notification::SliderEvent;
use crate::pane::{PaneRegistry, Side};

/// Coarse slide phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SlidePhase {
    /// At rest, fully open or fully closed.
    #[default]
    Idle,
    /// Following the pointer.
    Scrolling,
    /// Settling under the animator.
    Flying,
}

/// Observable slide state.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SliderState {
    /// Current phase.
    pub phase: SlidePhase,
    /// Pane resting fully open, if any.
    pub open_pane: Option<Side>,
    /// Pane being revealed or hidden, if any.
    pub active_pane: Option<Side>,
    /// Signed offset of the content: positive reveals the left pane.
    pub slide_amount: f64,
    /// Whether a contact is currently claimed by the slider.
    pub touch_down: bool,
}

impl SliderState {
    /// Fully closed with no contact.
    #[must_use]
    pub const fn closed() -> Self {
        Self {
            phase: SlidePhase::Idle,
            open_pane: None,
            active_pane: None,
            slide_amount: 0.0,
            touch_down: false,
        }
    }

    /// At rest with nothing revealed.
    #[inline]
    #[must_use]
    pub fn is_at_closed_rest(&self) -> bool {
        self.phase == SlidePhase::Idle && self.active_pane.is_none() && self.open_pane.is_none()
    }

    /// Whether `x` lands on the part of the content still visible beside the
    /// open pane. Always `false` when nothing is open.
    #[must_use]
    pub fn is_over_visible_content(&self, x: f64, width: f64) -> bool {
        match self.open_pane {
            Some(Side::Left) => x > self.slide_amount,
            Some(Side::Right) => x < width + self.slide_amount,
            None => false,
        }
    }
}

/// Read-only inputs the machine consults on every call.
#[derive(Debug, Clone, Copy)]
pub struct SlideContext<'a> {
    /// Pane extents and flags.
    pub panes: &'a PaneRegistry,
    /// Container width along the slide axis.
    pub width: f64,
}

impl<'a> SlideContext<'a> {
    /// Bundle the registry and container width.
    #[must_use]
    pub const fn new(panes: &'a PaneRegistry, width: f64) -> Self {
        Self { panes, width }
    }

    /// Revealed fraction of `side` at offset `slide_amount`, in `[0, 1]`.
    ///
    /// Zero-extent panes report `0.0`.
    #[must_use]
    pub fn ratio(&self, side: Side, slide_amount: f64) -> f64 {
        let extent = self.panes.extent_of(side);
        if extent <= 0.0 {
            return 0.0;
        }
        (side.sign() * slide_amount / extent).clamp(0.0, 1.0)
    }

    fn clamp_offset(&self, side: Side, amount: f64) -> f64 {
        let extent = self.panes.extent_of(side);
        match side {
            Side::Left => amount.clamp(0.0, extent),
            Side::Right => amount.clamp(-extent, 0.0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FlyTarget {
    Open,
    Closed,
}

#[derive(Debug, Clone, Copy)]
struct Flight {
    target: FlyTarget,
    handle: SettleHandle,
}

/// Which way a fling settles, keyed by the active pane and whether the fling
/// moved rightward.
const fn fling_target(side: Side, rightward: bool) -> FlyTarget {
    match (side, rightward) {
        (Side::Left, true) | (Side::Right, false) => FlyTarget::Open,
        (Side::Left, false) | (Side::Right, true) => FlyTarget::Closed,
    }
}

// ---------------------------------------------------------------------------
// SlideMachine
// ---------------------------------------------------------------------------

/// Owns the slide state and the settle animator.
#[derive(Debug, Clone)]
pub struct SlideMachine {
    state: SliderState,
    animator: SettleAnimator,
    fly_duration: Duration,
    flight: Option<Flight>,
    events: Vec<SliderEvent>,
}

impl Default for SlideMachine {
    fn default() -> Self {
        Self::new(DEFAULT_FLY_DURATION, Easing::default())
    }
}

impl SlideMachine {
    /// Closed machine settling full extents over `fly_duration`.
    #[must_use]
    pub fn new(fly_duration: Duration, easing: Easing) -> Self {
        Self {
            state: SliderState::closed(),
            animator: SettleAnimator::new(easing),
            fly_duration,
            flight: None,
            events: Vec::new(),
        }
    }

    // --- accessors ---

    /// Snapshot of the current state.
    #[inline]
    #[must_use]
    pub fn state(&self) -> &SliderState {
        &self.state
    }

    /// Current phase.
    #[inline]
    #[must_use]
    pub fn phase(&self) -> SlidePhase {
        self.state.phase
    }

    /// Current signed offset.
    #[inline]
    #[must_use]
    pub fn slide_amount(&self) -> f64 {
        self.state.slide_amount
    }

    /// Whether `side` is resting fully open.
    #[inline]
    #[must_use]
    pub fn is_open(&self, side: Side) -> bool {
        self.state.open_pane == Some(side)
    }

    /// Revealed fraction of the active pane, `0.0` when none is active.
    #[must_use]
    pub fn ratio(&self, ctx: &SlideContext<'_>) -> f64 {
        self.state
            .active_pane
            .map_or(0.0, |side| ctx.ratio(side, self.state.slide_amount))
    }

    /// Nominal settle time across a full extent.
    #[inline]
    #[must_use]
    pub fn fly_duration(&self) -> Duration {
        self.fly_duration
    }

    /// Change the nominal settle time. Applies to the next settle.
    pub fn set_fly_duration(&mut self, duration: Duration) {
        self.fly_duration = duration;
    }

    /// Change the easing curve.
    pub fn set_easing(&mut self, easing: Easing) {
        self.animator.set_easing(easing);
    }

    /// The easing curve in use.
    #[must_use]
    pub fn easing(&self) -> Easing {
        self.animator.easing()
    }

    /// Pending notifications, oldest first.
    #[must_use]
    pub fn events(&self) -> &[SliderEvent] {
        &self.events
    }

    /// Take all pending notifications.
    pub fn drain_events(&mut self) -> Vec<SliderEvent> {
        std::mem::take(&mut self.events)
    }

    // --- drag ---

    /// Mark that the slider claimed a new contact.
    ///
    /// Returns `false` (and does nothing) while flying.
    pub fn begin_drag(&mut self) -> bool {
        if self.state.phase == SlidePhase::Flying {
            return false;
        }
        self.state.touch_down = true;
        true
    }

    /// Move the offset by `dx` during a drag that started at `start_x`.
    ///
    /// The first call after a contact that was never claimed only marks the
    /// contact and moves nothing. When no pane is active yet, the direction of
    /// travel and the half of the container the drag started in pick one; if
    /// neither pane qualifies, the offset stays at zero.
    ///
    /// Returns `true` if the offset moved under a pane.
    pub fn apply_delta(&mut self, ctx: &SlideContext<'_>, dx: f64, start_x: f64) -> bool {
        if !self.state.touch_down {
            self.state.touch_down = true;
            return false;
        }
        if self.state.phase == SlidePhase::Flying || !dx.is_finite() {
            return false;
        }

        let amount = self.state.slide_amount + dx;
        let side = match self.state.active_pane {
            Some(side) => side,
            None => {
                let half = ctx.width / 2.0;
                let inferred = if amount > 0.0 && start_x < half && ctx.panes.can_drag_open(Side::Left)
                {
                    Some(Side::Left)
                } else if amount < 0.0
                    && start_x > half
                    && ctx.panes.can_drag_open(Side::Right)
                {
                    Some(Side::Right)
                } else {
                    None
                };
                let Some(side) = inferred else {
                    self.state.slide_amount = 0.0;
                    return false;
                };
                debug!(side = ?side, start_x, "drag picked pane");
                self.state.active_pane = Some(side);
                side
            }
        };

        self.state.slide_amount = ctx.clamp_offset(side, amount);
        self.state.open_pane = None;
        if self.state.phase != SlidePhase::Scrolling {
            self.state.phase = SlidePhase::Scrolling;
            debug!(side = ?side, "scrolling");
            self.push_state(Some(side));
        }
        self.push_scroll(ctx, side);
        true
    }

    /// The contact ended at `last_x`.
    ///
    /// A tap on visible content beside an open pane closes it. A drag that
    /// ends exactly closed or exactly open comes to rest there; anything in
    /// between settles closed.
    pub fn end_drag(&mut self, ctx: &SlideContext<'_>, last_x: f64) {
        self.state.touch_down = false;
        match self.state.phase {
            SlidePhase::Idle => {
                if self.state.is_over_visible_content(last_x, ctx.width) {
                    debug!(last_x, "tap on content closes pane");
                    self.fly_close(ctx);
                }
            }
            SlidePhase::Scrolling => {
                let Some(side) = self.state.active_pane else {
                    self.state.phase = SlidePhase::Idle;
                    return;
                };
                let amount = self.state.slide_amount;
                if amount == 0.0 {
                    self.state.phase = SlidePhase::Idle;
                    self.state.active_pane = None;
                    self.state.open_pane = None;
                    debug!(side = ?side, "released closed");
                    self.push_state(None);
                    self.events.push(SliderEvent::Closed(side));
                } else if amount == ctx.panes.open_offset(side) {
                    self.state.phase = SlidePhase::Idle;
                    self.state.open_pane = Some(side);
                    debug!(side = ?side, "released open");
                    self.push_state(Some(side));
                    self.events.push(SliderEvent::Opened(side));
                } else {
                    self.fly_close(ctx);
                }
            }
            SlidePhase::Flying => {}
        }
    }

    /// Settle in the direction of a horizontal fling.
    ///
    /// Returns `false` when no pane is active or a settle is already running.
    pub fn on_fling(&mut self, ctx: &SlideContext<'_>, velocity_x: f64) -> bool {
        if self.state.phase == SlidePhase::Flying || !velocity_x.is_finite() {
            return false;
        }
        let Some(side) = self.state.active_pane else {
            return false;
        };
        debug!(side = ?side, velocity_x, "fling");
        match fling_target(side, velocity_x > 0.0) {
            FlyTarget::Open => self.fly_open(ctx),
            FlyTarget::Closed => self.fly_close(ctx),
        }
        true
    }

    // --- settles ---

    /// Settle the active pane fully open.
    ///
    /// Duration scales with the distance left to travel. No-op without an
    /// active pane.
    pub fn fly_open(&mut self, ctx: &SlideContext<'_>) {
        let Some(side) = self.state.active_pane else {
            return;
        };
        let extent = ctx.panes.extent_of(side);
        let duration = open_duration(self.fly_duration, self.state.slide_amount, extent);
        self.start_flight(FlyTarget::Open, side, side.sign() * extent, duration);
    }

    /// Settle the active pane fully closed.
    ///
    /// Duration scales with the distance from closed. No-op without an active
    /// pane.
    pub fn fly_close(&mut self, ctx: &SlideContext<'_>) {
        let Some(side) = self.state.active_pane else {
            return;
        };
        let extent = ctx.panes.extent_of(side);
        let duration = close_duration(self.fly_duration, self.state.slide_amount, extent);
        self.start_flight(FlyTarget::Closed, side, 0.0, duration);
    }

    /// Snap closed without animating, abandoning any settle in flight.
    ///
    /// Returns `false` when already at closed rest.
    pub fn close_immediate(&mut self) -> bool {
        let Some(side) = self.state.active_pane else {
            return false;
        };
        self.animator.cancel();
        self.flight = None;
        self.state.phase = SlidePhase::Idle;
        self.state.slide_amount = 0.0;
        debug!(side = ?side, "closed immediately");
        self.push_state(Some(side));
        self.events.push(SliderEvent::Closed(side));
        self.state.active_pane = None;
        self.state.open_pane = None;
        true
    }

    /// Open `side`, collapsing the other pane first if it is revealed.
    ///
    /// Returns `false` when `side` has no pane or is already open.
    pub fn open(&mut self, ctx: &SlideContext<'_>, side: Side, animate: bool) -> bool {
        if !ctx.panes.is_present(side) {
            return false;
        }
        if self.state.phase == SlidePhase::Idle && self.state.open_pane == Some(side) {
            return false;
        }
        if self.state.active_pane.is_some_and(|active| active != side) {
            self.close_immediate();
        }
        self.state.active_pane = Some(side);
        if animate {
            self.fly_open(ctx);
        } else {
            self.animator.cancel();
            self.flight = None;
            self.finish_open(ctx, side);
        }
        true
    }

    /// Close `side` if it is the open pane.
    ///
    /// Returns `false` while flying or when `side` is not open.
    pub fn close(&mut self, ctx: &SlideContext<'_>, side: Side, animate: bool) -> bool {
        if self.state.phase == SlidePhase::Flying || self.state.open_pane != Some(side) {
            return false;
        }
        if animate {
            self.fly_close(ctx);
        } else {
            self.close_immediate();
        }
        true
    }

    /// Animate whichever pane is open back to closed.
    ///
    /// Returns `false` while flying or when nothing is open.
    pub fn close_all(&mut self, ctx: &SlideContext<'_>) -> bool {
        match self.state.open_pane {
            Some(side) => self.close(ctx, side, true),
            None => false,
        }
    }

    /// Back navigation: closes an open pane.
    ///
    /// Returns `true` if the press was consumed.
    pub fn on_back(&mut self, ctx: &SlideContext<'_>) -> bool {
        if self.state.open_pane.is_none() {
            return false;
        }
        self.fly_close(ctx);
        true
    }

    /// Advance the settle by `dt`.
    ///
    /// Returns `true` if the offset moved.
    pub fn tick(&mut self, ctx: &SlideContext<'_>, dt: Duration) -> bool {
        let Some(frame) = self.animator.tick(dt) else {
            return false;
        };
        let (Some(flight), Some(side)) = (self.flight, self.state.active_pane) else {
            return false;
        };
        if frame.handle != flight.handle {
            return false;
        }

        self.state.slide_amount = ctx.clamp_offset(side, frame.value);
        trace!(
            side = ?side,
            slide = self.state.slide_amount,
            progress = frame.progress,
            "settle frame"
        );
        self.push_scroll(ctx, side);

        if frame.finished {
            self.flight = None;
            match flight.target {
                FlyTarget::Open => self.finish_open(ctx, side),
                FlyTarget::Closed => self.finish_close(side),
            }
        }
        true
    }

    /// Reconcile with a registry that changed under the machine.
    ///
    /// A pane that disappears while active snaps closed. A resized pane keeps
    /// the offset within its new extent, and an open pane stays pinned fully
    /// open.
    pub fn sync_panes(&mut self, ctx: &SlideContext<'_>) {
        let Some(side) = self.state.active_pane else {
            return;
        };
        if !ctx.panes.is_present(side) {
            self.close_immediate();
            return;
        }
        self.state.slide_amount = if self.state.open_pane == Some(side) {
            ctx.panes.open_offset(side)
        } else {
            ctx.clamp_offset(side, self.state.slide_amount)
        };
    }

    // --- internals ---

    fn start_flight(&mut self, target: FlyTarget, side: Side, to: f64, duration: Duration) {
        let handle = self
            .animator
            .animate(self.state.slide_amount, to, duration);
        self.flight = Some(Flight { target, handle });
        self.state.open_pane = None;
        self.state.phase = SlidePhase::Flying;
        self.push_state(Some(side));
        debug!(side = ?side, ?target, to, ?duration, "settle started");
    }

    fn finish_open(&mut self, ctx: &SlideContext<'_>, side: Side) {
        self.state.phase = SlidePhase::Idle;
        self.push_state(Some(side));
        self.state.open_pane = Some(side);
        self.state.slide_amount = ctx.panes.open_offset(side);
        debug!(side = ?side, "opened");
        self.events.push(SliderEvent::Opened(side));
    }

    fn finish_close(&mut self, side: Side) {
        self.state.phase = SlidePhase::Idle;
        self.push_state(Some(side));
        self.events.push(SliderEvent::Closed(side));
        self.state.active_pane = None;
        self.state.open_pane = None;
        self.state.slide_amount = 0.0;
        debug!(side = ?side, "closed");
    }

    fn push_state(&mut self, pane: Option<Side>) {
        self.events.push(SliderEvent::StateChanged {
            phase: self.state.phase,
            pane,
        });
    }

    fn push_scroll(&mut self, ctx: &SlideContext<'_>, side: Side) {
        self.events.push(SliderEvent::ScrollChanged {
            ratio: ctx.ratio(side, self.state.slide_amount),
            pane: side,
        });
    }
}
