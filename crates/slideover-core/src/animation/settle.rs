#![forbid(unsafe_code)]

//! Cancellable offset animator used for fly-open / fly-close settles.
//!
//! # Invariants
//!
//! 1. At most one settle is in flight. [`SettleAnimator::animate`] replaces the
//!    current one, and the replaced settle never yields another frame, so its
//!    completion is never observed.
//! 2. Every frame value lies between `from` and `to` (inclusive).
//! 3. The final frame carries exactly `to` and `finished == true`; after it the
//!    animator is idle.
//!
//! # Failure Modes
//!
//! - Zero duration: the settle completes on the next tick, whatever `dt` is.
//! - Non-finite endpoints are not rejected; callers pass clamped offsets.

use std::time::Duration;

use super::Easing;

/// Nominal time for a settle across a pane's full extent.
pub const DEFAULT_FLY_DURATION: Duration = Duration::from_millis(300);

/// Identifies one `animate` call. Frames echo the handle of the settle that
/// produced them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SettleHandle(u64);

/// One sampled step of a settle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SettleFrame {
    /// Settle that produced this frame.
    pub handle: SettleHandle,
    /// Eased offset for this frame.
    pub value: f64,
    /// Linear progress in `[0, 1]`.
    pub progress: f64,
    /// True on the last frame.
    pub finished: bool,
}

#[derive(Debug, Clone, Copy)]
struct Settle {
    handle: SettleHandle,
    from: f64,
    to: f64,
    duration: Duration,
    elapsed: Duration,
}

/// Drives a single eased interpolation between two offsets.
#[derive(Debug, Clone)]
pub struct SettleAnimator {
    easing: Easing,
    active: Option<Settle>,
    next_handle: u64,
}

impl Default for SettleAnimator {
    fn default() -> Self {
        Self::new(Easing::default())
    }
}

impl SettleAnimator {
    /// Create an idle animator using `easing`.
    #[must_use]
    pub fn new(easing: Easing) -> Self {
        Self {
            easing,
            active: None,
            next_handle: 0,
        }
    }

    /// Start settling from `from` to `to` over `duration`, superseding any
    /// settle already in flight.
    pub fn animate(&mut self, from: f64, to: f64, duration: Duration) -> SettleHandle {
        let handle = SettleHandle(self.next_handle);
        self.next_handle = self.next_handle.wrapping_add(1);
        self.active = Some(Settle {
            handle,
            from,
            to,
            duration,
            elapsed: Duration::ZERO,
        });
        handle
    }

    /// Drop the in-flight settle without a final frame.
    ///
    /// Returns `true` if something was cancelled.
    pub fn cancel(&mut self) -> bool {
        self.active.take().is_some()
    }

    /// Advance by `dt` and sample the settle.
    ///
    /// Returns `None` while idle.
    pub fn tick(&mut self, dt: Duration) -> Option<SettleFrame> {
        let settle = self.active.as_mut()?;
        settle.elapsed = settle.elapsed.saturating_add(dt);

        let progress = if settle.duration.is_zero() {
            1.0
        } else {
            (settle.elapsed.as_secs_f64() / settle.duration.as_secs_f64()).min(1.0)
        };
        let finished = progress >= 1.0;
        let value = if finished {
            settle.to
        } else {
            settle.from + (settle.to - settle.from) * self.easing.apply(progress)
        };
        let frame = SettleFrame {
            handle: settle.handle,
            value,
            progress,
            finished,
        };

        if finished {
            self.active = None;
        }
        Some(frame)
    }

    /// Whether a settle is in flight.
    #[inline]
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.active.is_some()
    }

    /// Target offset of the in-flight settle.
    #[must_use]
    pub fn target(&self) -> Option<f64> {
        self.active.map(|s| s.to)
    }

    /// Duration of the in-flight settle.
    #[must_use]
    pub fn duration(&self) -> Option<Duration> {
        self.active.map(|s| s.duration)
    }

    /// Handle of the in-flight settle.
    #[must_use]
    pub fn handle(&self) -> Option<SettleHandle> {
        self.active.map(|s| s.handle)
    }

    /// The easing curve in use.
    #[inline]
    #[must_use]
    pub fn easing(&self) -> Easing {
        self.easing
    }

    /// Change the easing curve. Applies to the in-flight settle from the next tick.
    pub fn set_easing(&mut self, easing: Easing) {
        self.easing = easing;
    }
}

/// Time to settle closed from offset `from` on a pane of `extent`.
///
/// Scales `nominal` by the fraction of the extent still to travel, `|from| / extent`.
#[must_use]
pub fn close_duration(nominal: Duration, from: f64, extent: f64) -> Duration {
    scale(nominal, travelled_fraction(from, extent))
}

/// Time to settle open from offset `from` on a pane of `extent`.
///
/// Scales `nominal` by `1 - |from| / extent`.
#[must_use]
pub fn open_duration(nominal: Duration, from: f64, extent: f64) -> Duration {
    if extent <= 0.0 {
        return Duration::ZERO;
    }
    scale(nominal, 1.0 - travelled_fraction(from, extent))
}

fn travelled_fraction(offset: f64, extent: f64) -> f64 {
    if extent <= 0.0 || !extent.is_finite() || !offset.is_finite() {
        return 0.0;
    }
    (offset.abs() / extent).clamp(0.0, 1.0)
}

fn scale(nominal: Duration, fraction: f64) -> Duration {
    let nanos = (nominal.as_nanos() as f64 * fraction).round();
    Duration::from_nanos(nanos.max(0.0) as u64)
}
