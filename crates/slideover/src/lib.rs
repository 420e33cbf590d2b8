#![forbid(unsafe_code)]

//! slideover public facade crate.
//!
//! A content surface with up to two side panes that the user drags in from
//! the screen edges, flings open or closed, or opens and closes from code.
//! This crate provides the host-facing [`SliderLayout`] container and
//! re-exports the building blocks from `slideover-core`, plus a prelude for
//! day-to-day usage.
//!
//! ```rust,ignore
//! use slideover::prelude::*;
//!
//! let mut slider = SliderLayout::new(
//!     SliderConfig::default().darkening(Sides::LEFT),
//!     [SurfaceBinding::content(), SurfaceBinding::left(280.0)],
//! )?;
//! slider.set_size(720.0, 1280.0);
//! slider.open_slider(Side::Left);
//! while slider.tick(frame_time) {
//!     render(slider.geometry());
//! }
//! ```

pub mod config;
pub mod error;
pub mod geometry;
pub mod layout;

// --- Container -------------------------------------------------------------

pub use config::{DEFAULT_MAXIMUM_DARKNESS, SliderConfig, SliderConfigError};
pub use error::{MAX_SURFACES, SliderError};
pub use geometry::{Frame, Overlay, SlideGeometry};
pub use layout::{SliderLayout, Slot, SurfaceBinding};

// --- Core re-exports -------------------------------------------------------

pub use slideover_core::animation::Easing;
pub use slideover_core::event::{TouchAction, TouchEvent};
pub use slideover_core::gesture::GestureConfig;
pub use slideover_core::{
    GestureArbiter, PaneRegistry, Side, Sides, SlideMachine, SlidePhase, SliderEvent,
    SliderListener, SliderState,
};
pub use web_time::Instant;

#[cfg(feature = "tracing-json")]
pub use slideover_core::logging::init_json_logging;

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Easing, Frame, Instant, Side, Sides, SlideGeometry, SlidePhase, SliderConfig,
        SliderError, SliderEvent, SliderLayout, SliderListener, SurfaceBinding, TouchAction,
        TouchEvent,
    };

    pub use crate::core;
}

pub use slideover_core as core;
