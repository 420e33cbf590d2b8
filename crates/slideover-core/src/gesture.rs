#![forbid(unsafe_code)]

//! Gesture detection: turns raw [`TouchEvent`]s into scroll and fling gestures.
//!
//! [`GestureDetector`] plays the role of the platform gesture source. The
//! slider container keeps two of them, one fed during the intercept probe and
//! one fed during owned touch handling, mirroring the two-phase pointer
//! dispatch most toolkits use.
//!
//! # State Machine
//!
//! - **Down** starts tracking and is reported immediately.
//! - **Move** stays silent until the contact has travelled more than
//!   `touch_slop` from the down position. The first `Scroll` then carries the
//!   whole accumulated delta; later ones carry the delta since the last scroll.
//! - **Up** after scrolling reports a `Fling` (if fast enough) and then `Up`.
//! - **Cancel** drops tracking without a fling.
//!
//! # Invariants
//!
//! 1. A `Fling` is always followed by an `Up` in the same batch.
//! 2. A `Scroll` is never emitted before a `Down` of the same contact; a move
//!    that arrives without a down synthesizes one.
//! 3. Reported fling velocities never exceed `max_fling_velocity` in magnitude.

use std::collections::VecDeque;
use std::time::Duration;

use web_time::Instant;

use crate::event::{TouchAction, TouchEvent};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Thresholds for scroll and fling recognition.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GestureConfig {
    /// Distance the contact must travel before scrolling starts (default: 8.0).
    pub touch_slop: f64,
    /// Minimum speed, units/sec, for a release to count as a fling (default: 50.0).
    pub min_fling_velocity: f64,
    /// Fling speeds are clamped to this, units/sec (default: 8000.0).
    pub max_fling_velocity: f64,
    /// Trailing window of samples used to estimate velocity (default: 100ms).
    pub velocity_window: Duration,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            touch_slop: 8.0,
            min_fling_velocity: 50.0,
            max_fling_velocity: 8_000.0,
            velocity_window: Duration::from_millis(100),
        }
    }
}

// ---------------------------------------------------------------------------
// Gesture
// ---------------------------------------------------------------------------

/// A recognized gesture step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Gesture {
    /// Contact started at `(x, y)`.
    Down { x: f64, y: f64 },
    /// Contact is scrolling. `dx`/`dy` are the movement since the previous
    /// scroll (positive = rightward / downward).
    Scroll {
        start_x: f64,
        start_y: f64,
        x: f64,
        y: f64,
        dx: f64,
        dy: f64,
    },
    /// Contact was released while moving fast, in units/sec.
    Fling { velocity_x: f64, velocity_y: f64 },
    /// Contact lifted at `(x, y)`.
    Up { x: f64, y: f64 },
}

// ---------------------------------------------------------------------------
// VelocityTracker
// ---------------------------------------------------------------------------

/// Estimates pointer velocity from a trailing window of samples.
#[derive(Debug, Clone)]
pub struct VelocityTracker {
    window: Duration,
    samples: VecDeque<(Instant, f64, f64)>,
}

impl VelocityTracker {
    /// Create a tracker keeping samples no older than `window`.
    #[must_use]
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            samples: VecDeque::with_capacity(16),
        }
    }

    /// Record a position sample.
    pub fn add(&mut self, time: Instant, x: f64, y: f64) {
        // Out-of-order samples restart the estimate.
        if self.samples.back().is_some_and(|(t, _, _)| time < *t) {
            self.samples.clear();
        }
        self.samples.push_back((time, x, y));
        while let Some((oldest, _, _)) = self.samples.front() {
            if time.duration_since(*oldest) > self.window {
                self.samples.pop_front();
            } else {
                break;
            }
        }
    }

    /// Velocity `(vx, vy)` in units/sec across the retained samples.
    ///
    /// Zero when fewer than two samples span a non-zero interval.
    #[must_use]
    pub fn velocity(&self) -> (f64, f64) {
        let (Some(first), Some(last)) = (self.samples.front(), self.samples.back()) else {
            return (0.0, 0.0);
        };
        let dt = last.0.duration_since(first.0).as_secs_f64();
        if dt <= 0.0 {
            return (0.0, 0.0);
        }
        ((last.1 - first.1) / dt, (last.2 - first.2) / dt)
    }

    /// Forget all samples.
    pub fn clear(&mut self) {
        self.samples.clear();
    }
}

// ---------------------------------------------------------------------------
// GestureDetector
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
struct Contact {
    start_x: f64,
    start_y: f64,
    last_x: f64,
    last_y: f64,
    scrolling: bool,
}

/// Stateful single-contact gesture detector.
#[derive(Debug, Clone)]
pub struct GestureDetector {
    config: GestureConfig,
    contact: Option<Contact>,
    velocity: VelocityTracker,
}

impl GestureDetector {
    /// Create a detector with the given thresholds.
    #[must_use]
    pub fn new(config: GestureConfig) -> Self {
        Self {
            velocity: VelocityTracker::new(config.velocity_window),
            config,
            contact: None,
        }
    }

    /// Process one raw event, returning the gestures it completes.
    pub fn process(&mut self, event: &TouchEvent) -> Vec<Gesture> {
        let mut out = Vec::with_capacity(2);
        match event.action {
            TouchAction::Down => self.on_down(event, &mut out),
            TouchAction::Move => self.on_move(event, &mut out),
            TouchAction::Up => self.on_up(event, &mut out),
            TouchAction::Cancel => self.reset(),
        }
        out
    }

    /// Whether the current contact has passed the touch slop.
    #[inline]
    #[must_use]
    pub fn is_scrolling(&self) -> bool {
        self.contact.is_some_and(|c| c.scrolling)
    }

    /// Whether a contact is being tracked.
    #[inline]
    #[must_use]
    pub fn is_tracking(&self) -> bool {
        self.contact.is_some()
    }

    /// Drop the current contact.
    pub fn reset(&mut self) {
        self.contact = None;
        self.velocity.clear();
    }

    /// Get a reference to the current configuration.
    #[inline]
    #[must_use]
    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    /// Update the configuration. Takes effect for the next contact.
    pub fn set_config(&mut self, config: GestureConfig) {
        self.config = config;
        self.velocity = VelocityTracker::new(config.velocity_window);
        self.contact = None;
    }
}

impl GestureDetector {
    fn on_down(&mut self, event: &TouchEvent, out: &mut Vec<Gesture>) {
        self.velocity.clear();
        self.velocity.add(event.time, event.x, event.y);
        self.contact = Some(Contact {
            start_x: event.x,
            start_y: event.y,
            last_x: event.x,
            last_y: event.y,
            scrolling: false,
        });
        out.push(Gesture::Down {
            x: event.x,
            y: event.y,
        });
    }

    fn on_move(&mut self, event: &TouchEvent, out: &mut Vec<Gesture>) {
        let Some(contact) = self.contact.as_mut() else {
            // Move without a prior down: treat it as the down.
            self.on_down(event, out);
            return;
        };
        self.velocity.add(event.time, event.x, event.y);

        if !contact.scrolling {
            let travelled = (event.x - contact.start_x).hypot(event.y - contact.start_y);
            if travelled <= self.config.touch_slop {
                return;
            }
            contact.scrolling = true;
        }

        let dx = event.x - contact.last_x;
        let dy = event.y - contact.last_y;
        contact.last_x = event.x;
        contact.last_y = event.y;
        out.push(Gesture::Scroll {
            start_x: contact.start_x,
            start_y: contact.start_y,
            x: event.x,
            y: event.y,
            dx,
            dy,
        });
    }

    fn on_up(&mut self, event: &TouchEvent, out: &mut Vec<Gesture>) {
        if let Some(contact) = self.contact.take()
            && contact.scrolling
        {
            self.velocity.add(event.time, event.x, event.y);
            let (vx, vy) = self.velocity.velocity();
            let max = self.config.max_fling_velocity.abs();
            let (vx, vy) = (vx.clamp(-max, max), vy.clamp(-max, max));
            let min = self.config.min_fling_velocity;
            if vx.abs() >= min || vy.abs() >= min {
                out.push(Gesture::Fling {
                    velocity_x: vx,
                    velocity_y: vy,
                });
            }
        }
        self.velocity.clear();
        out.push(Gesture::Up {
            x: event.x,
            y: event.y,
        });
    }
}

impl Default for GestureDetector {
    fn default() -> Self {
        Self::new(GestureConfig::default())
    }
}
