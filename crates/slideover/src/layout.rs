#![forbid(unsafe_code)]

//! The slider container.
//!
//! [`SliderLayout`] owns the pane registry, the slide machine, the gesture
//! arbiter, and two gesture detectors, and exposes the host-facing surface:
//! the two-phase pointer dispatch, per-frame ticks, back handling, the
//! programmatic open/close API, runtime flag setters, and geometry.
//!
//! # Pointer dispatch
//!
//! Hosts first offer every event to [`SliderLayout::on_intercept_touch_event`].
//! Once it returns `true`, the rest of the stream goes to
//! [`SliderLayout::on_touch_event`] instead of the children. Events that no
//! child wants may go straight to `on_touch_event`.
//!
//! With nothing open, a down in an edge band is never intercepted, so
//! children still see taps there; the stream is stolen once it turns into a
//! mostly-horizontal scroll. With a pane open, any event over the visible
//! content is intercepted, the down included.
//!
//! # Notifications
//!
//! Events are delivered synchronously to the installed [`SliderListener`]
//! right after the call that produced them. Without a listener they queue up
//! for [`SliderLayout::drain_events`].

use std::fmt;
use std::time::Duration;

use slideover_core::event::{TouchAction, TouchEvent};
use slideover_core::gesture::{Gesture, GestureDetector};
use slideover_core::logging::{debug, trace, warn};
use slideover_core::{
    GestureArbiter, PaneRegistry, Side, SlideContext, SlideMachine, SlidePhase, SliderEvent,
    SliderListener, SliderState,
};

use crate::config::SliderConfig;
use crate::error::{MAX_SURFACES, SliderError};
use crate::geometry::SlideGeometry;

// ---------------------------------------------------------------------------
// Surfaces
// ---------------------------------------------------------------------------

/// Where a surface is mounted in the container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    /// The main content.
    Content,
    /// The left pane.
    Left,
    /// The right pane.
    Right,
}

impl Slot {
    /// The pane side for this slot, `None` for the content.
    #[must_use]
    pub const fn side(self) -> Option<Side> {
        match self {
            Self::Content => None,
            Self::Left => Some(Side::Left),
            Self::Right => Some(Side::Right),
        }
    }
}

impl From<Side> for Slot {
    fn from(side: Side) -> Self {
        match side {
            Side::Left => Self::Left,
            Side::Right => Self::Right,
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Content => "content",
            Self::Left => "left",
            Self::Right => "right",
        })
    }
}

/// One surface handed to [`SliderLayout::new`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceBinding {
    /// Mount point.
    pub slot: Slot,
    /// Measured extent along the slide axis. Ignored for the content.
    pub extent: f64,
}

impl SurfaceBinding {
    /// The content surface.
    #[must_use]
    pub const fn content() -> Self {
        Self {
            slot: Slot::Content,
            extent: 0.0,
        }
    }

    /// A left pane `extent` wide.
    #[must_use]
    pub const fn left(extent: f64) -> Self {
        Self {
            slot: Slot::Left,
            extent,
        }
    }

    /// A right pane `extent` wide.
    #[must_use]
    pub const fn right(extent: f64) -> Self {
        Self {
            slot: Slot::Right,
            extent,
        }
    }
}

fn check_extent(side: Side, extent: f64) -> Result<f64, SliderError> {
    if extent.is_finite() && extent >= 0.0 {
        Ok(extent)
    } else {
        Err(SliderError::InvalidExtent { side, extent })
    }
}

// ---------------------------------------------------------------------------
// SliderLayout
// ---------------------------------------------------------------------------

/// A content surface with up to two slide-over side panes.
pub struct SliderLayout {
    config: SliderConfig,
    panes: PaneRegistry,
    machine: SlideMachine,
    arbiter: GestureArbiter,
    intercept_detector: GestureDetector,
    touch_detector: GestureDetector,
    /// The current pointer stream was claimed by a down or an intercept.
    stream_claimed: bool,
    width: f64,
    height: f64,
    listener: Option<Box<dyn SliderListener>>,
    pending: Vec<SliderEvent>,
}

impl fmt::Debug for SliderLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SliderLayout")
            .field("config", &self.config)
            .field("panes", &self.panes)
            .field("state", self.machine.state())
            .field("width", &self.width)
            .field("height", &self.height)
            .field("has_listener", &self.listener.is_some())
            .field("pending", &self.pending.len())
            .finish()
    }
}

impl SliderLayout {
    /// Build a container from its surfaces.
    ///
    /// # Errors
    ///
    /// Fails with [`SliderError`] when more than three surfaces are given,
    /// when two share a slot, or when a pane extent is negative or not
    /// finite.
    pub fn new(
        config: SliderConfig,
        surfaces: impl IntoIterator<Item = SurfaceBinding>,
    ) -> Result<Self, SliderError> {
        let surfaces: Vec<SurfaceBinding> = surfaces.into_iter().collect();
        if surfaces.len() > MAX_SURFACES {
            return Err(SliderError::TooManySurfaces {
                count: surfaces.len(),
            });
        }

        let mut panes = PaneRegistry::new();
        let mut has_content = false;
        for binding in &surfaces {
            match binding.slot.side() {
                None => {
                    if has_content {
                        return Err(SliderError::DuplicateSurface(Slot::Content));
                    }
                    has_content = true;
                }
                Some(side) => {
                    if panes.is_present(side) {
                        return Err(SliderError::DuplicateSurface(binding.slot));
                    }
                    panes.set_pane(side, check_extent(side, binding.extent)?);
                }
            }
        }
        panes.set_flags(config.locked, config.darkening, config.over_content);

        for _problem in config.validate() {
            warn!(problem = %_problem, "slider config out of range, clamping");
        }
        debug!(
            surfaces = surfaces.len(),
            left = panes.extent_of(Side::Left),
            right = panes.extent_of(Side::Right),
            "slider layout created"
        );

        Ok(Self {
            machine: SlideMachine::new(config.fly_duration_value(), config.easing),
            arbiter: GestureArbiter::new(config.sensitive_area_width),
            intercept_detector: GestureDetector::new(config.gesture),
            touch_detector: GestureDetector::new(config.gesture),
            stream_claimed: false,
            config,
            panes,
            width: 0.0,
            height: 0.0,
            listener: None,
            pending: Vec::new(),
        })
    }

    fn ctx(&self) -> SlideContext<'_> {
        SlideContext::new(&self.panes, self.width)
    }

    /// Forward the machine's outbox to the listener, or queue it.
    fn flush(&mut self) {
        let events = self.machine.drain_events();
        match self.listener.as_mut() {
            Some(listener) => {
                for event in &events {
                    event.dispatch(listener.as_mut());
                }
            }
            None => self.pending.extend(events),
        }
    }

    // --- listener ---

    /// Install the listener. Queued events are delivered to it first.
    pub fn set_listener(&mut self, mut listener: Box<dyn SliderListener>) {
        for event in self.pending.drain(..) {
            event.dispatch(listener.as_mut());
        }
        self.listener = Some(listener);
    }

    /// Remove and return the listener.
    pub fn take_listener(&mut self) -> Option<Box<dyn SliderListener>> {
        self.listener.take()
    }

    /// Take queued notifications. Always empty while a listener is installed.
    pub fn drain_events(&mut self) -> Vec<SliderEvent> {
        std::mem::take(&mut self.pending)
    }

    // --- size ---

    /// Set the container size. Called by the host on every layout pass.
    pub fn set_size(&mut self, width: f64, height: f64) {
        self.width = if width.is_finite() { width.max(0.0) } else { 0.0 };
        self.height = if height.is_finite() { height.max(0.0) } else { 0.0 };
        let ctx = SlideContext::new(&self.panes, self.width);
        self.machine.sync_panes(&ctx);
        self.flush();
    }

    /// Container width.
    #[inline]
    #[must_use]
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Container height.
    #[inline]
    #[must_use]
    pub fn height(&self) -> f64 {
        self.height
    }

    // --- pointer input ---

    /// Intercept probe: whether the container takes over the pointer stream.
    pub fn on_intercept_touch_event(&mut self, event: &TouchEvent) -> bool {
        let gestures = self.intercept_detector.process(event);
        let state = *self.machine.state();
        let ctx = SlideContext::new(&self.panes, self.width);

        let intercept = match state.phase {
            SlidePhase::Scrolling | SlidePhase::Flying => true,
            SlidePhase::Idle if state.open_pane.is_some() => {
                self.arbiter.should_intercept(event.x, &state, &ctx)
            }
            SlidePhase::Idle => gestures.iter().any(|gesture| match *gesture {
                Gesture::Scroll {
                    start_x, dx, dy, ..
                } => self.arbiter.on_scroll(start_x, dx, dy, &state, &ctx),
                _ => false,
            }),
        };
        trace!(x = event.x, action = ?event.action, intercept, "intercept probe");

        if intercept {
            // The owned stream continues the contact the probe was tracking.
            self.touch_detector = self.intercept_detector.clone();
            self.stream_claimed = true;
        }
        if event.is_terminal() || intercept {
            self.intercept_detector.reset();
        }
        intercept
    }

    /// Handle an event of a stream the container owns.
    ///
    /// Returns `false` when a down is not claimed; the host should then stop
    /// sending the rest of that stream.
    pub fn on_touch_event(&mut self, event: &TouchEvent) -> bool {
        if self.machine.phase() == SlidePhase::Flying {
            if event.is_terminal() {
                self.touch_detector.reset();
                self.stream_claimed = false;
            }
            return true;
        }

        let gestures = self.touch_detector.process(event);
        let ctx = SlideContext::new(&self.panes, self.width);
        let mut handled = true;
        for gesture in gestures {
            match gesture {
                Gesture::Down { x, .. } => {
                    let state = *self.machine.state();
                    handled = self.arbiter.on_down(x, &state, &ctx);
                    self.stream_claimed = handled;
                    if handled {
                        self.machine.begin_drag();
                    }
                }
                // Ownership was settled by the down or the intercept; a
                // claimed stream keeps every horizontal delta.
                Gesture::Scroll { start_x, dx, .. } => {
                    if self.stream_claimed {
                        self.machine.apply_delta(&ctx, dx, start_x);
                    }
                }
                Gesture::Fling { velocity_x, .. } => {
                    self.machine.on_fling(&ctx, velocity_x);
                }
                Gesture::Up { x, .. } => self.machine.end_drag(&ctx, x),
            }
        }
        if event.action == TouchAction::Cancel {
            self.machine.end_drag(&ctx, event.x);
        }
        if event.is_terminal() {
            self.stream_claimed = false;
        }
        self.flush();
        handled
    }

    /// Advance the settle animation by `dt`.
    ///
    /// Returns `true` while the offset is still moving; hosts keep requesting
    /// frames until it returns `false`.
    pub fn tick(&mut self, dt: Duration) -> bool {
        let ctx = SlideContext::new(&self.panes, self.width);
        let moved = self.machine.tick(&ctx, dt);
        self.flush();
        moved
    }

    /// Whether a settle is running.
    #[inline]
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.machine.phase() == SlidePhase::Flying
    }

    /// Back navigation. Closes an open pane and returns `true` if one was open.
    pub fn on_back(&mut self) -> bool {
        let ctx = SlideContext::new(&self.panes, self.width);
        let consumed = self.machine.on_back(&ctx);
        self.flush();
        consumed
    }

    // --- programmatic open / close ---

    /// Animate `side` open, collapsing the other pane first. Ignores locks.
    ///
    /// Returns `false` when `side` has no pane or is already open.
    pub fn open_slider(&mut self, side: Side) -> bool {
        self.open_slider_with(side, true)
    }

    /// Open `side`, animated or not.
    pub fn open_slider_with(&mut self, side: Side, animate: bool) -> bool {
        let ctx = SlideContext::new(&self.panes, self.width);
        let opened = self.machine.open(&ctx, side, animate);
        self.flush();
        opened
    }

    /// Animate the open pane closed. Ignored while a settle is running.
    pub fn close_sliders(&mut self) -> bool {
        let ctx = SlideContext::new(&self.panes, self.width);
        let closed = self.machine.close_all(&ctx);
        self.flush();
        closed
    }

    /// Close `side` if it is the open pane. Ignored while a settle is running.
    pub fn close_slider(&mut self, side: Side, animate: bool) -> bool {
        let ctx = SlideContext::new(&self.panes, self.width);
        let closed = self.machine.close(&ctx, side, animate);
        self.flush();
        closed
    }

    /// Whether `side` rests fully open.
    #[inline]
    #[must_use]
    pub fn is_slider_open(&self, side: Side) -> bool {
        self.machine.is_open(side)
    }

    // --- runtime flags ---

    /// Lock `side` against gestures. An open `side` snaps closed.
    pub fn lock_slider(&mut self, side: Side) {
        self.panes.set_locked(side, true);
        self.close_if_locked_open();
    }

    /// Allow gestures to open `side` again.
    pub fn unlock_slider(&mut self, side: Side) {
        self.panes.set_locked(side, false);
    }

    /// Lock both sides. An open pane snaps closed.
    pub fn lock_sliders(&mut self) {
        self.panes.lock_all();
        self.close_if_locked_open();
    }

    /// Unlock both sides.
    pub fn unlock_sliders(&mut self) {
        self.panes.unlock_all();
    }

    /// Whether gestures may not open `side`.
    #[inline]
    #[must_use]
    pub fn is_slider_locked(&self, side: Side) -> bool {
        self.panes.is_locked(side)
    }

    fn close_if_locked_open(&mut self) {
        if let Some(open) = self.machine.state().open_pane
            && self.panes.is_locked(open)
        {
            debug!(side = ?open, "open pane locked, closing");
            self.machine.close_immediate();
            self.flush();
        }
    }

    /// Set whether `side` slides over the content.
    pub fn set_slider_is_over(&mut self, side: Side, over: bool) {
        self.panes.set_over_content(side, over);
    }

    /// Set whether both panes slide over the content.
    pub fn set_sliders_are_over(&mut self, over: bool) {
        self.panes.set_all_over_content(over);
    }

    /// Set whether revealing `side` darkens the content.
    pub fn set_slider_darkens(&mut self, side: Side, darkens: bool) {
        self.panes.set_darkens(side, darkens);
    }

    /// Set whether revealing either pane darkens the content.
    pub fn set_sliders_darken(&mut self, darkens: bool) {
        self.panes.set_all_darken(darkens);
    }

    /// Change the edge band width.
    pub fn set_sensitive_area_width(&mut self, width: f64) {
        self.config.sensitive_area_width = width;
        self.arbiter.set_sensitive_width(width);
    }

    /// Change the peak overlay alpha.
    pub fn set_maximum_darkness(&mut self, alpha: u8) {
        self.config.maximum_darkness = alpha;
    }

    // --- panes ---

    /// Attach or resize the pane on `side`.
    ///
    /// # Errors
    ///
    /// [`SliderError::InvalidExtent`] for negative or non-finite extents.
    pub fn set_pane_extent(&mut self, side: Side, extent: f64) -> Result<(), SliderError> {
        self.panes.set_pane(side, check_extent(side, extent)?);
        let ctx = SlideContext::new(&self.panes, self.width);
        self.machine.sync_panes(&ctx);
        self.flush();
        Ok(())
    }

    /// Detach the pane on `side`. A revealed pane snaps closed first.
    pub fn clear_pane(&mut self, side: Side) {
        self.panes.clear_pane(side);
        let ctx = SlideContext::new(&self.panes, self.width);
        self.machine.sync_panes(&ctx);
        self.flush();
    }

    // --- queries ---

    /// Frames for every surface and the darkening overlay.
    #[must_use]
    pub fn geometry(&self) -> SlideGeometry {
        SlideGeometry::compute(
            self.width,
            self.height,
            &self.panes,
            self.machine.state(),
            self.config.maximum_darkness,
        )
    }

    /// Current slide state.
    #[inline]
    #[must_use]
    pub fn state(&self) -> &SliderState {
        self.machine.state()
    }

    /// Current phase.
    #[inline]
    #[must_use]
    pub fn phase(&self) -> SlidePhase {
        self.machine.phase()
    }

    /// Current signed offset.
    #[inline]
    #[must_use]
    pub fn slide_amount(&self) -> f64 {
        self.machine.slide_amount()
    }

    /// Revealed fraction of the active pane.
    #[must_use]
    pub fn scroll_ratio(&self) -> f64 {
        self.machine.ratio(&self.ctx())
    }

    /// The pane registry.
    #[inline]
    #[must_use]
    pub fn panes(&self) -> &PaneRegistry {
        &self.panes
    }

    /// The configuration the container was built with, plus runtime changes
    /// to the band width and darkness.
    #[inline]
    #[must_use]
    pub fn config(&self) -> &SliderConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use web_time::Instant;

    const MS_8: Duration = Duration::from_millis(8);

    fn layout() -> SliderLayout {
        let mut layout = SliderLayout::new(
            SliderConfig::default(),
            [
                SurfaceBinding::content(),
                SurfaceBinding::left(200.0),
                SurfaceBinding::right(150.0),
            ],
        )
        .unwrap();
        layout.set_size(400.0, 800.0);
        layout
    }

    #[test]
    fn rejects_too_many_surfaces() {
        let err = SliderLayout::new(
            SliderConfig::default(),
            [
                SurfaceBinding::content(),
                SurfaceBinding::left(1.0),
                SurfaceBinding::right(1.0),
                SurfaceBinding::right(2.0),
            ],
        )
        .unwrap_err();
        assert_eq!(err, SliderError::TooManySurfaces { count: 4 });
    }

    #[test]
    fn rejects_duplicate_slot() {
        let err = SliderLayout::new(
            SliderConfig::default(),
            [SurfaceBinding::left(10.0), SurfaceBinding::left(20.0)],
        )
        .unwrap_err();
        assert_eq!(err, SliderError::DuplicateSurface(Slot::Left));

        let err = SliderLayout::new(
            SliderConfig::default(),
            [SurfaceBinding::content(), SurfaceBinding::content()],
        )
        .unwrap_err();
        assert_eq!(err, SliderError::DuplicateSurface(Slot::Content));
    }

    #[test]
    fn rejects_bad_extent() {
        let err = SliderLayout::new(SliderConfig::default(), [SurfaceBinding::right(-1.0)])
            .unwrap_err();
        assert!(matches!(
            err,
            SliderError::InvalidExtent {
                side: Side::Right,
                ..
            }
        ));
    }

    #[test]
    fn config_flags_seed_registry() {
        let config = SliderConfig::new()
            .locked(slideover_core::Sides::LEFT)
            .darkening(slideover_core::Sides::BOTH);
        let layout = SliderLayout::new(config, [SurfaceBinding::left(100.0)]).unwrap();
        assert!(layout.is_slider_locked(Side::Left));
        assert!(layout.panes().darkens(Side::Right));
    }

    #[test]
    fn edge_down_is_not_intercepted_but_scroll_is() {
        let mut layout = layout();
        let t = Instant::now();
        assert!(!layout.on_intercept_touch_event(&TouchEvent::down(5.0, 100.0, t)));
        assert!(layout.on_intercept_touch_event(&TouchEvent::moved(30.0, 101.0, t + MS_8)));
    }

    #[test]
    fn vertical_scroll_is_left_to_children() {
        let mut layout = layout();
        let t = Instant::now();
        layout.on_intercept_touch_event(&TouchEvent::down(5.0, 100.0, t));
        assert!(!layout.on_intercept_touch_event(&TouchEvent::moved(8.0, 160.0, t + MS_8)));
    }

    #[test]
    fn intercepted_stream_drags_pane() {
        let mut layout = layout();
        let t = Instant::now();
        layout.on_intercept_touch_event(&TouchEvent::down(5.0, 100.0, t));
        assert!(layout.on_intercept_touch_event(&TouchEvent::moved(30.0, 100.0, t + MS_8)));

        // First owned move is absorbed by the unclaimed-contact guard.
        layout.on_touch_event(&TouchEvent::moved(60.0, 100.0, t + MS_8 * 2));
        assert_eq!(layout.slide_amount(), 0.0);
        layout.on_touch_event(&TouchEvent::moved(90.0, 100.0, t + MS_8 * 3));
        assert_eq!(layout.slide_amount(), 30.0);
        assert_eq!(layout.phase(), SlidePhase::Scrolling);
    }

    #[test]
    fn unclaimed_down_returns_false() {
        let mut layout = layout();
        assert!(!layout.on_touch_event(&TouchEvent::down(200.0, 100.0, Instant::now())));
    }

    #[test]
    fn lock_open_pane_closes_once() {
        let mut layout = layout();
        layout.open_slider_with(Side::Left, false);
        layout.drain_events();

        layout.lock_slider(Side::Left);
        let events = layout.drain_events();
        assert_eq!(
            events
                .iter()
                .filter(|e| **e == SliderEvent::Closed(Side::Left))
                .count(),
            1
        );
        layout.lock_sliders();
        assert!(layout.drain_events().is_empty());
    }

    #[test]
    fn listener_receives_queued_events_first() {
        use std::cell::RefCell;
        use std::rc::Rc;

        struct Shared(Rc<RefCell<Vec<SliderEvent>>>);
        impl SliderListener for Shared {
            fn on_slider_opened(&mut self, pane: Side) {
                self.0.borrow_mut().push(SliderEvent::Opened(pane));
            }
            fn on_slider_closed(&mut self, pane: Side) {
                self.0.borrow_mut().push(SliderEvent::Closed(pane));
            }
        }

        let mut layout = layout();
        layout.open_slider_with(Side::Right, false);
        let log = Rc::new(RefCell::new(Vec::new()));
        layout.set_listener(Box::new(Shared(Rc::clone(&log))));
        layout.close_slider(Side::Right, false);

        assert_eq!(
            *log.borrow(),
            vec![SliderEvent::Opened(Side::Right), SliderEvent::Closed(Side::Right)]
        );
        assert!(layout.drain_events().is_empty());
    }

    #[test]
    fn clearing_open_pane_snaps_closed() {
        let mut layout = layout();
        layout.open_slider_with(Side::Left, false);
        layout.clear_pane(Side::Left);
        assert!(layout.state().is_at_closed_rest());
        assert!(!layout.panes().is_present(Side::Left));
    }

    #[test]
    fn set_pane_extent_validates() {
        let mut layout = layout();
        assert!(layout.set_pane_extent(Side::Left, f64::INFINITY).is_err());
        layout.set_pane_extent(Side::Left, 250.0).unwrap();
        assert_eq!(layout.panes().extent_of(Side::Left), 250.0);
    }

    #[test]
    fn slot_display_and_side() {
        assert_eq!(Slot::Content.to_string(), "content");
        assert_eq!(Slot::Right.side(), Some(Side::Right));
        assert_eq!(Slot::from(Side::Left), Slot::Left);
    }
}
