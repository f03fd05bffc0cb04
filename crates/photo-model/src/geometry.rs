//! Geometry primitives for layout planning.
//!
//! All values are destination pixel coordinates. Planning math that
//! produces these types lives in the layout crate.

use serde::{Deserialize, Serialize};
use snapbooth_common::error::{BoothError, BoothResult};

/// Pixel dimensions of a bitmap or canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Width over height.
    pub fn aspect_ratio(&self) -> f64 {
        self.width as f64 / self.height as f64
    }

    /// True when either dimension is zero.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

impl std::fmt::Display for Dimensions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// An axis-aligned rectangle in destination pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn size(&self) -> Dimensions {
        Dimensions::new(self.width, self.height)
    }

    /// True when the rectangle lies entirely within a canvas of `size`.
    pub fn fits_within(&self, size: Dimensions) -> bool {
        self.x
            .checked_add(self.width)
            .is_some_and(|right| right <= size.width)
            && self
                .y
                .checked_add(self.height)
                .is_some_and(|bottom| bottom <= size.height)
    }
}

/// Canvas corner an overlay badge anchors to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

/// How the overlay asset relates to the composed photo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayPlacement {
    /// A fixed-size badge near a canvas corner (live mirror mode).
    CornerBadge { anchor: Corner },
    /// The overlay spans the entire canvas and frames the photo
    /// (template mode).
    FullCanvas,
}

/// A fully resolved composition layout.
///
/// Produced by the geometry planner and consumed by the compositor.
/// A valid plan keeps both draw rectangles inside the canvas; the
/// compositor re-checks via [`LayoutPlan::validate`] before touching
/// pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutPlan {
    /// Destination canvas size.
    pub canvas: Dimensions,
    /// Where the (possibly mirrored) source is drawn.
    pub source_rect: Rect,
    /// Where the overlay is drawn, after the source.
    pub overlay_rect: Rect,
    /// Badge or full-canvas overlay.
    pub placement: OverlayPlacement,
    /// Reflect the source about its vertical centerline before drawing.
    pub mirror: bool,
}

impl LayoutPlan {
    /// Check the plan's internal invariants.
    pub fn validate(&self) -> BoothResult<()> {
        if self.canvas.is_empty() {
            return Err(BoothError::layout(format!(
                "canvas must be positive, got {}",
                self.canvas
            )));
        }
        if self.source_rect.size().is_empty() || self.overlay_rect.size().is_empty() {
            return Err(BoothError::layout("draw rectangles must be positive"));
        }
        if !self.source_rect.fits_within(self.canvas) {
            return Err(BoothError::layout(format!(
                "source rect {:?} exceeds canvas {}",
                self.source_rect, self.canvas
            )));
        }
        if !self.overlay_rect.fits_within(self.canvas) {
            return Err(BoothError::layout(format!(
                "overlay rect {:?} exceeds canvas {}",
                self.overlay_rect, self.canvas
            )));
        }
        Ok(())
    }
}
