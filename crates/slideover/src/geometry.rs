#![forbid(unsafe_code)]

//! Child frames and darkening overlay for the current slide offset.
//!
//! Computed only; hosts position their surfaces from a [`SlideGeometry`].

use slideover_core::{PaneRegistry, Side, SliderState};

/// Axis-aligned rectangle in container coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Frame {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Frame {
    /// Create a frame.
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge (exclusive).
    #[inline]
    #[must_use]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Whether `x` lies within `[x, right)`.
    #[inline]
    #[must_use]
    pub fn contains_x(&self, x: f64) -> bool {
        x >= self.x && x < self.right()
    }
}

/// Darkening drawn over the content while a darkening pane is revealed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Overlay {
    /// Region to darken.
    pub frame: Frame,
    /// Overlay alpha, from 0 up to the configured maximum darkness.
    pub alpha: u8,
    /// Revealed fraction of the pane that produced it.
    pub ratio: f64,
}

/// Where every surface sits for one slide offset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlideGeometry {
    /// Content surface.
    pub content: Frame,
    /// Left pane, if present. Sits just left of the slide offset.
    pub left: Option<Frame>,
    /// Right pane, if present. Sits just right of the slid container edge.
    pub right: Option<Frame>,
    /// Darkening overlay, if any.
    pub overlay: Option<Overlay>,
}

impl SlideGeometry {
    /// Lay out a `width` × `height` container.
    ///
    /// The content follows the offset unless the revealed pane slides over
    /// it. The overlay alpha scales linearly with the revealed fraction up to
    /// `maximum_darkness`; zero-extent panes never darken.
    #[must_use]
    pub fn compute(
        width: f64,
        height: f64,
        panes: &PaneRegistry,
        state: &SliderState,
        maximum_darkness: u8,
    ) -> Self {
        let s = state.slide_amount;
        let revealed = state.active_pane.or_else(|| Side::revealed_by(s));

        let content_x = match revealed {
            Some(side) if panes.slides_over_content(side) => 0.0,
            _ => s,
        };
        let content = Frame::new(content_x, 0.0, width, height);

        let left = panes.is_present(Side::Left).then(|| {
            let extent = panes.extent_of(Side::Left);
            Frame::new(s - extent, 0.0, extent, height)
        });
        let right = panes
            .is_present(Side::Right)
            .then(|| Frame::new(width + s, 0.0, panes.extent_of(Side::Right), height));

        let overlay = revealed
            .filter(|&side| panes.darkens(side) && s != 0.0)
            .and_then(|side| {
                let extent = panes.extent_of(side);
                if extent <= 0.0 {
                    return None;
                }
                let ratio = (s.abs() / extent).clamp(0.0, 1.0);
                let alpha = (f64::from(maximum_darkness) * ratio).round() as u8;
                Some(Overlay {
                    frame: Frame::new(s, 0.0, width, height),
                    alpha,
                    ratio,
                })
            });

        Self {
            content,
            left,
            right,
            overlay,
        }
    }
}
