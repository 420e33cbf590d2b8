#![forbid(unsafe_code)]

//! Core: pane registry, gesture arbitration, slide state machine, and settle
//! animation for slide-over panels.
//!
//! # Role in slideover
//! `slideover-core` holds every piece of slider behavior that does not need
//! a container: it knows nothing about child frames or listeners installed by
//! a host. The `slideover` crate wraps it in `SliderLayout`.
//!
//! # Primary responsibilities
//! - **PaneRegistry**: the zero-to-two side panes, their extents and flags.
//! - **GestureDetector / GestureArbiter**: raw touches to scrolls and flings,
//!   and who owns them.
//! - **SlideMachine**: the `Idle`/`Scrolling`/`Flying` machine and its
//!   notification outbox.
//! - **SettleAnimator**: eased, cancellable fly-open / fly-close settles.
//!
//! # How it fits together
//! Touches go through the detector, the arbiter decides ownership, the
//! machine turns deltas and flings into offsets, and per-frame ticks move the
//! animator, whose frames flow back into the machine as plain values.

pub mod animation;
pub mod arbiter;
pub mod event;
pub mod gesture;
pub mod logging;
pub mod machine;
pub mod notification;
pub mod pane;

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, trace, warn};

pub use arbiter::GestureArbiter;
pub use machine::{SlideContext, SlideMachine, SlidePhase, SliderState};
pub use notification::{SliderEvent, SliderListener};
pub use pane::{PaneRegistry, Side, Sides};
