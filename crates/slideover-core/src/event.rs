#![forbid(unsafe_code)]

//! Raw pointer input as delivered by the host.
//!
//! Coordinates are container-local along both axes, in the same unit as pane
//! extents. Only a single contact is tracked; hosts drop secondary pointers.

use web_time::Instant;

/// What happened to the contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TouchAction {
    /// Contact started.
    Down,
    /// Contact moved.
    Move,
    /// Contact lifted.
    Up,
    /// The host took the stream away (e.g. a parent claimed it).
    Cancel,
}

/// A single timestamped pointer sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchEvent {
    /// Action kind.
    pub action: TouchAction,
    /// Container-local x.
    pub x: f64,
    /// Container-local y.
    pub y: f64,
    /// When the sample was taken.
    pub time: Instant,
}

impl TouchEvent {
    /// Create an event.
    #[must_use]
    pub const fn new(action: TouchAction, x: f64, y: f64, time: Instant) -> Self {
        Self { action, x, y, time }
    }

    /// A `Down` sample.
    #[must_use]
    pub const fn down(x: f64, y: f64, time: Instant) -> Self {
        Self::new(TouchAction::Down, x, y, time)
    }

    /// A `Move` sample.
    #[must_use]
    pub const fn moved(x: f64, y: f64, time: Instant) -> Self {
        Self::new(TouchAction::Move, x, y, time)
    }

    /// An `Up` sample.
    #[must_use]
    pub const fn up(x: f64, y: f64, time: Instant) -> Self {
        Self::new(TouchAction::Up, x, y, time)
    }

    /// A `Cancel` sample.
    #[must_use]
    pub const fn cancel(x: f64, y: f64, time: Instant) -> Self {
        Self::new(TouchAction::Cancel, x, y, time)
    }

    /// Whether this sample ends the contact.
    #[inline]
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self.action, TouchAction::Up | TouchAction::Cancel)
    }
}
