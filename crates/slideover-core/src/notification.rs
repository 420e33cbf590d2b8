#![forbid(unsafe_code)]

//! Slider notifications.
//!
//! Every state change the machine makes is recorded as a [`SliderEvent`] in
//! its outbox. Hosts either drain the outbox or install a [`SliderListener`]
//! on the container, which receives the same events synchronously, in order,
//! right after the operation that produced them.

use crate::machine::SlidePhase;
use crate::pane::Side;

/// A notification emitted by the slide state machine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SliderEvent {
    /// The phase changed. `pane` is the pane involved, if any.
    StateChanged {
        phase: SlidePhase,
        pane: Option<Side>,
    },
    /// The slide offset moved. `ratio` is the revealed fraction in `[0, 1]`.
    ScrollChanged { ratio: f64, pane: Side },
    /// `pane` came to rest fully open.
    Opened(Side),
    /// `pane` came to rest fully closed.
    Closed(Side),
}

impl SliderEvent {
    /// Deliver this event to the matching listener method.
    pub fn dispatch(&self, listener: &mut dyn SliderListener) {
        match *self {
            Self::StateChanged { phase, pane } => listener.on_state_changed(phase, pane),
            Self::ScrollChanged { ratio, pane } => listener.on_scroll_changed(ratio, pane),
            Self::Opened(pane) => listener.on_slider_opened(pane),
            Self::Closed(pane) => listener.on_slider_closed(pane),
        }
    }
}

/// Receives slider notifications. Every method defaults to doing nothing.
pub trait SliderListener {
    /// The phase changed.
    fn on_state_changed(&mut self, _phase: SlidePhase, _pane: Option<Side>) {}

    /// The revealed fraction of `pane` changed.
    fn on_scroll_changed(&mut self, _ratio: f64, _pane: Side) {}

    /// `pane` is now fully open.
    fn on_slider_opened(&mut self, _pane: Side) {}

    /// `pane` is now fully closed.
    fn on_slider_closed(&mut self, _pane: Side) {}
}

/// Records every notification, in order.
impl SliderListener for Vec<SliderEvent> {
    fn on_state_changed(&mut self, phase: SlidePhase, pane: Option<Side>) {
        self.push(SliderEvent::StateChanged { phase, pane });
    }

    fn on_scroll_changed(&mut self, ratio: f64, pane: Side) {
        self.push(SliderEvent::ScrollChanged { ratio, pane });
    }

    fn on_slider_opened(&mut self, pane: Side) {
        self.push(SliderEvent::Opened(pane));
    }

    fn on_slider_closed(&mut self, pane: Side) {
        self.push(SliderEvent::Closed(pane));
    }
}
