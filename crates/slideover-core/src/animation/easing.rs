#![forbid(unsafe_code)]

//! Easing curves mapping linear progress `t ∈ [0, 1]` to eased progress.

use std::f64::consts::PI;

/// Identity curve.
#[inline]
#[must_use]
pub fn linear(t: f64) -> f64 {
    t.clamp(0.0, 1.0)
}

/// Cosine accelerate-then-decelerate: `cos((t + 1)π) / 2 + 0.5`.
///
/// Starts and ends with zero slope, symmetric around `t = 0.5`.
#[inline]
#[must_use]
pub fn accelerate_decelerate(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    ((t + 1.0) * PI).cos() / 2.0 + 0.5
}

/// Cubic S-curve, a sharper ease-in-out than the cosine variant.
#[inline]
#[must_use]
pub fn ease_in_out_cubic(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        let inv = -2.0 * t + 2.0;
        1.0 - inv * inv * inv / 2.0
    }
}

/// Easing curve selector for settle animations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Easing {
    /// Constant velocity.
    Linear,
    /// Cosine accelerate/decelerate.
    #[default]
    AccelerateDecelerate,
    /// Cubic ease-in-out.
    EaseInOutCubic,
}

impl Easing {
    /// Apply the curve to linear progress. Output stays in `[0, 1]`.
    #[inline]
    #[must_use]
    pub fn apply(self, t: f64) -> f64 {
        match self {
            Self::Linear => linear(t),
            Self::AccelerateDecelerate => accelerate_decelerate(t),
            Self::EaseInOutCubic => ease_in_out_cubic(t),
        }
    }
}
