#![forbid(unsafe_code)]

//! Pane registry: which side panes exist, how wide they are, and how they behave.
//!
//! A slider holds at most one [`Side::Left`] and one [`Side::Right`] pane. Each
//! present pane has an extent along the slide axis, supplied by whoever
//! measures it, and three behavior flags kept as [`Sides`] bit sets:
//!
//! - **locked**: gestures may not open the pane (programmatic opens still work),
//! - **darkens**: a darkening overlay is drawn over the content while revealed,
//! - **over content**: the pane slides over the content instead of pushing it.
//!
//! # Invariants
//!
//! 1. `extent_of(side)` is `0.0` for an absent pane and non-negative otherwise.
//! 2. Flags may be set for absent panes; they take effect once the pane appears.
//!
//! Registry mutations never touch slide state. Closing a pane that becomes
//! locked while open is the owning container's job.

use bitflags::bitflags;

/// One of the two slide-in edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    /// Pane slides in from the left edge; content moves right (positive offset).
    Left,
    /// Pane slides in from the right edge; content moves left (negative offset).
    Right,
}

impl Side {
    /// Both sides, left first.
    pub const ALL: [Side; 2] = [Side::Left, Side::Right];

    /// The single-bit set for this side.
    #[inline]
    #[must_use]
    pub const fn flag(self) -> Sides {
        match self {
            Self::Left => Sides::LEFT,
            Self::Right => Sides::RIGHT,
        }
    }

    /// Sign of the slide amount while this side is revealed.
    #[inline]
    #[must_use]
    pub const fn sign(self) -> f64 {
        match self {
            Self::Left => 1.0,
            Self::Right => -1.0,
        }
    }

    /// The other side.
    #[inline]
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// The side whose pane a signed slide amount reveals, if any.
    #[must_use]
    pub fn revealed_by(slide_amount: f64) -> Option<Self> {
        if slide_amount > 0.0 {
            Some(Self::Left)
        } else if slide_amount < 0.0 {
            Some(Self::Right)
        } else {
            None
        }
    }
}

bitflags! {
    /// A set of sides, used for the per-pane behavior flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct Sides: u8 {
        /// No side.
        const NONE  = 0b00;
        /// The left pane.
        const LEFT  = 0b01;
        /// The right pane.
        const RIGHT = 0b10;
        /// Both panes.
        const BOTH  = Self::LEFT.bits() | Self::RIGHT.bits();
    }
}

impl Sides {
    /// Check whether `side` is in the set.
    #[inline]
    #[must_use]
    pub const fn has(self, side: Side) -> bool {
        self.contains(side.flag())
    }

    /// Add or remove `side`.
    #[inline]
    pub fn set_side(&mut self, side: Side, on: bool) {
        self.set(side.flag(), on);
    }
}

impl From<Side> for Sides {
    fn from(side: Side) -> Self {
        side.flag()
    }
}

// ---------------------------------------------------------------------------
// PaneRegistry
// ---------------------------------------------------------------------------

/// Holds the zero-to-two side panes and their flags.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PaneRegistry {
    left: Option<f64>,
    right: Option<f64>,
    locked: Sides,
    darkening: Sides,
    over_content: Sides,
}

impl PaneRegistry {
    /// An empty registry: no panes, no flags.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach (or resize) the pane on `side`.
    ///
    /// Negative and non-finite extents are treated as `0.0`.
    pub fn set_pane(&mut self, side: Side, extent: f64) {
        let extent = if extent.is_finite() { extent.max(0.0) } else { 0.0 };
        *self.slot_mut(side) = Some(extent);
    }

    /// Detach the pane on `side`. No-op if absent.
    pub fn clear_pane(&mut self, side: Side) {
        *self.slot_mut(side) = None;
    }

    /// Whether a pane is attached on `side`.
    #[inline]
    #[must_use]
    pub fn is_present(&self, side: Side) -> bool {
        self.slot(side).is_some()
    }

    /// Extent of the pane on `side`, `0.0` when absent.
    #[inline]
    #[must_use]
    pub fn extent_of(&self, side: Side) -> f64 {
        self.slot(side).unwrap_or(0.0)
    }

    /// Signed offset at which the pane on `side` is fully open.
    #[inline]
    #[must_use]
    pub fn open_offset(&self, side: Side) -> f64 {
        side.sign() * self.extent_of(side)
    }

    /// Sides that currently have a pane attached.
    #[must_use]
    pub fn present(&self) -> Sides {
        let mut sides = Sides::NONE;
        for side in Side::ALL {
            sides.set_side(side, self.is_present(side));
        }
        sides
    }

    // --- locked ---

    /// Whether gesture-driven opening of `side` is blocked.
    #[inline]
    #[must_use]
    pub fn is_locked(&self, side: Side) -> bool {
        self.locked.has(side)
    }

    /// Whether `side` has a pane that a gesture may open.
    #[inline]
    #[must_use]
    pub fn can_drag_open(&self, side: Side) -> bool {
        self.is_present(side) && !self.is_locked(side)
    }

    /// Lock or unlock a single side.
    pub fn set_locked(&mut self, side: Side, locked: bool) {
        self.locked.set_side(side, locked);
    }

    /// Lock both sides.
    pub fn lock_all(&mut self) {
        self.locked = Sides::BOTH;
    }

    /// Unlock both sides.
    pub fn unlock_all(&mut self) {
        self.locked = Sides::NONE;
    }

    /// The locked set.
    #[inline]
    #[must_use]
    pub fn locked(&self) -> Sides {
        self.locked
    }

    // --- darkening ---

    /// Whether revealing `side` darkens the content.
    #[inline]
    #[must_use]
    pub fn darkens(&self, side: Side) -> bool {
        self.darkening.has(side)
    }

    /// Enable or disable darkening for one side.
    pub fn set_darkens(&mut self, side: Side, darkens: bool) {
        self.darkening.set_side(side, darkens);
    }

    /// Enable or disable darkening for both sides.
    pub fn set_all_darken(&mut self, darkens: bool) {
        self.darkening = if darkens { Sides::BOTH } else { Sides::NONE };
    }

    /// The darkening set.
    #[inline]
    #[must_use]
    pub fn darkening(&self) -> Sides {
        self.darkening
    }

    // --- over content ---

    /// Whether the pane on `side` slides over the content rather than pushing it.
    #[inline]
    #[must_use]
    pub fn slides_over_content(&self, side: Side) -> bool {
        self.over_content.has(side)
    }

    /// Set the over-content flag for one side.
    pub fn set_over_content(&mut self, side: Side, over: bool) {
        self.over_content.set_side(side, over);
    }

    /// Set the over-content flag for both sides.
    pub fn set_all_over_content(&mut self, over: bool) {
        self.over_content = if over { Sides::BOTH } else { Sides::NONE };
    }

    /// The over-content set.
    #[inline]
    #[must_use]
    pub fn over_content(&self) -> Sides {
        self.over_content
    }

    /// Replace all three flag sets at once.
    pub fn set_flags(&mut self, locked: Sides, darkening: Sides, over_content: Sides) {
        self.locked = locked;
        self.darkening = darkening;
        self.over_content = over_content;
    }

    fn slot(&self, side: Side) -> Option<f64> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    fn slot_mut(&mut self, side: Side) -> &mut Option<f64> {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_registry_has_no_panes() {
        let panes = PaneRegistry::new();
        for side in Side::ALL {
            assert!(!panes.is_present(side));
            assert_eq!(panes.extent_of(side), 0.0);
        }
        assert_eq!(panes.present(), Sides::NONE);
    }

    #[test]
    fn set_and_clear_pane() {
        let mut panes = PaneRegistry::new();
        panes.set_pane(Side::Left, 200.0);
        assert!(panes.is_present(Side::Left));
        assert_eq!(panes.extent_of(Side::Left), 200.0);
        assert_eq!(panes.open_offset(Side::Left), 200.0);

        panes.set_pane(Side::Right, 120.0);
        assert_eq!(panes.open_offset(Side::Right), -120.0);
        assert_eq!(panes.present(), Sides::BOTH);

        panes.clear_pane(Side::Left);
        assert!(!panes.is_present(Side::Left));
        assert_eq!(panes.present(), Sides::RIGHT);
    }

    #[test]
    fn clear_absent_pane_is_noop() {
        let mut panes = PaneRegistry::new();
        panes.clear_pane(Side::Right);
        assert_eq!(panes, PaneRegistry::new());
    }

    #[test]
    fn bad_extents_clamp_to_zero() {
        let mut panes = PaneRegistry::new();
        panes.set_pane(Side::Left, -5.0);
        assert_eq!(panes.extent_of(Side::Left), 0.0);
        panes.set_pane(Side::Left, f64::NAN);
        assert_eq!(panes.extent_of(Side::Left), 0.0);
        assert!(panes.is_present(Side::Left));
    }

    #[test]
    fn lock_flags() {
        let mut panes = PaneRegistry::new();
        panes.set_pane(Side::Left, 100.0);
        assert!(panes.can_drag_open(Side::Left));

        panes.set_locked(Side::Left, true);
        assert!(panes.is_locked(Side::Left));
        assert!(!panes.can_drag_open(Side::Left));
        assert!(!panes.is_locked(Side::Right));

        panes.lock_all();
        assert_eq!(panes.locked(), Sides::BOTH);
        panes.unlock_all();
        assert_eq!(panes.locked(), Sides::NONE);
        assert!(panes.can_drag_open(Side::Left));
    }

    #[test]
    fn absent_pane_cannot_be_drag_opened_even_unlocked() {
        let panes = PaneRegistry::new();
        assert!(!panes.can_drag_open(Side::Right));
    }

    #[test]
    fn darken_and_over_content_bulk_setters() {
        let mut panes = PaneRegistry::new();
        panes.set_all_darken(true);
        assert!(panes.darkens(Side::Left) && panes.darkens(Side::Right));
        panes.set_darkens(Side::Right, false);
        assert_eq!(panes.darkening(), Sides::LEFT);

        panes.set_all_over_content(true);
        panes.set_over_content(Side::Left, false);
        assert!(!panes.slides_over_content(Side::Left));
        assert!(panes.slides_over_content(Side::Right));
        panes.set_all_over_content(false);
        assert_eq!(panes.over_content(), Sides::NONE);
    }

    #[test]
    fn side_helpers() {
        assert_eq!(Side::Left.opposite(), Side::Right);
        assert_eq!(Side::revealed_by(3.0), Some(Side::Left));
        assert_eq!(Side::revealed_by(-0.5), Some(Side::Right));
        assert_eq!(Side::revealed_by(0.0), None);
        assert_eq!(Sides::from(Side::Right), Sides::RIGHT);
    }
}
