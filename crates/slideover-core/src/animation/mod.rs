#![forbid(unsafe_code)]

//! Settle animation: easing curves and the cancellable offset animator.
//!
//! The slide state machine hands the animator a start offset, a target offset,
//! and a duration. Each host frame calls [`SettleAnimator::tick`] with the
//! elapsed time and gets back a [`SettleFrame`] carrying the eased offset.
//! The animator knows nothing about panes; the machine does the bookkeeping
//! when a frame reports `finished`.

mod easing;
mod settle;

pub use easing::{Easing, accelerate_decelerate, ease_in_out_cubic, linear};
pub use settle::{
    DEFAULT_FLY_DURATION, SettleAnimator, SettleFrame, SettleHandle, close_duration,
    open_duration,
};
