#![forbid(unsafe_code)]

//! Container construction errors.

use std::fmt;

use slideover_core::Side;

use crate::layout::Slot;

/// Most surfaces a slider can hold: the content plus one pane per side.
pub const MAX_SURFACES: usize = 3;

/// Structural misconfiguration detected while building a
/// [`SliderLayout`](crate::SliderLayout).
#[derive(Debug, Clone, PartialEq)]
pub enum SliderError {
    /// Two surfaces were bound to the same slot.
    DuplicateSurface(Slot),
    /// More than [`MAX_SURFACES`] surfaces were supplied.
    TooManySurfaces { count: usize },
    /// A pane extent was negative or not finite.
    InvalidExtent { side: Side, extent: f64 },
}

impl fmt::Display for SliderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateSurface(slot) => {
                write!(f, "more than one surface bound to the {slot} slot")
            }
            Self::TooManySurfaces { count } => {
                write!(
                    f,
                    "a slider holds at most {MAX_SURFACES} surfaces, got {count}"
                )
            }
            Self::InvalidExtent { side, extent } => {
                write!(f, "{side:?} pane extent must be finite and >= 0, got {extent}")
            }
        }
    }
}

impl std::error::Error for SliderError {}
