//! Geometry planning: canvas sizing, source placement, overlay placement.
//!
//! The planner collapses the booth's composition variants into two
//! modes:
//!
//! - **Mirror canvas**: the canvas is the (capped) source itself, drawn
//!   mirrored for selfie correction, with the overlay as a corner badge.
//! - **Template frame**: the canvas is the template asset; the photo is
//!   contain-fitted into the template's photo region and the template is
//!   drawn over the full canvas afterwards.
//!
//! Planning is pure: dimensions in, a resolved plan out.

use serde::{Deserialize, Serialize};
use snapbooth_common::error::{BoothError, BoothResult};
use snapbooth_photo_model::{Corner, Dimensions, LayoutPlan, OverlayPlacement, Rect};

use crate::fit::{cap_width, contain_fit};

/// Which composition layout to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutMode {
    /// Canvas matches the source; mirrored; badge overlay.
    MirrorCanvas,
    /// Canvas matches the template; photo fitted into its region.
    TemplateFrame {
        /// Mirror the source (true for live capture, false for uploads).
        mirror: bool,
    },
}

/// Tunable layout parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Maximum width a source may keep; wider sources are
    /// proportionally capped before planning. Zero disables the cap.
    pub max_source_width: u32,

    /// Fraction of template height, from the top, available for the
    /// photo. The remainder is the template's branding band.
    pub region_fraction: f64,

    /// Badge target width in canvas pixels (mirror-canvas mode).
    pub badge_width: u32,

    /// Margin between the badge and its anchor corner.
    pub badge_margin: u32,

    /// Corner the badge anchors to.
    pub badge_anchor: Corner,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            max_source_width: 1000,
            region_fraction: 0.75,
            badge_width: 160,
            badge_margin: 24,
            badge_anchor: Corner::BottomRight,
        }
    }
}

/// Resolves source and overlay dimensions into a [`LayoutPlan`].
#[derive(Debug, Clone)]
pub struct GeometryPlanner {
    mode: LayoutMode,
    config: LayoutConfig,
}

impl GeometryPlanner {
    pub fn new(mode: LayoutMode, config: LayoutConfig) -> Self {
        Self { mode, config }
    }

    pub fn with_defaults(mode: LayoutMode) -> Self {
        Self::new(mode, LayoutConfig::default())
    }

    pub fn mode(&self) -> LayoutMode {
        self.mode
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Resolve a layout for the given source and overlay dimensions.
    ///
    /// The source is width-capped before anything else. Fails with
    /// `InvalidAsset` when the overlay has a zero dimension and with a
    /// layout error when the template's photo region collapses.
    pub fn plan(&self, source: Dimensions, overlay: Dimensions) -> BoothResult<LayoutPlan> {
        if source.is_empty() {
            return Err(BoothError::decode(format!(
                "source dimensions must be positive, got {}",
                source
            )));
        }
        if overlay.is_empty() {
            return Err(BoothError::invalid_asset(format!(
                "overlay dimensions must be positive, got {}",
                overlay
            )));
        }
        let source = cap_width(source, self.config.max_source_width);
        match self.mode {
            LayoutMode::MirrorCanvas => Ok(self.plan_mirror_canvas(source, overlay)),
            LayoutMode::TemplateFrame { mirror } => {
                self.plan_template_frame(source, overlay, mirror)
            }
        }
    }

    fn plan_mirror_canvas(&self, source: Dimensions, overlay: Dimensions) -> LayoutPlan {
        let canvas = source;
        LayoutPlan {
            canvas,
            source_rect: Rect::new(0, 0, canvas.width, canvas.height),
            overlay_rect: self.badge_rect(canvas, overlay),
            placement: OverlayPlacement::CornerBadge {
                anchor: self.config.badge_anchor,
            },
            mirror: true,
        }
    }

    fn plan_template_frame(
        &self,
        source: Dimensions,
        template: Dimensions,
        mirror: bool,
    ) -> BoothResult<LayoutPlan> {
        let fraction = self.config.region_fraction.clamp(0.0, 1.0);
        let region_height = (template.height as f64 * fraction).floor() as u32;
        if region_height == 0 {
            return Err(BoothError::layout(format!(
                "photo region is empty: {:.2} of {}px template height",
                fraction, template.height
            )));
        }
        let region = Dimensions::new(template.width, region_height);
        let fitted = contain_fit(source, region);
        let x = (region.width - fitted.width) / 2;
        Ok(LayoutPlan {
            canvas: template,
            source_rect: Rect::new(x, 0, fitted.width, fitted.height),
            overlay_rect: Rect::new(0, 0, template.width, template.height),
            placement: OverlayPlacement::FullCanvas,
            mirror,
        })
    }

    /// Badge rectangle: `badge_width` wide at the overlay's aspect ratio,
    /// `badge_margin` from the anchor corner, shrunk to fit small
    /// canvases.
    fn badge_rect(&self, canvas: Dimensions, overlay: Dimensions) -> Rect {
        let margin = self.config.badge_margin;
        let margin = if canvas.width as u64 > 2 * margin as u64
            && canvas.height as u64 > 2 * margin as u64
        {
            margin
        } else {
            0
        };
        let avail = Dimensions::new(canvas.width - 2 * margin, canvas.height - 2 * margin);

        let width = self.config.badge_width.max(1);
        let height = (width as f64 * overlay.height as f64 / overlay.width as f64)
            .round()
            .max(1.0) as u32;
        let mut size = Dimensions::new(width, height);
        if size.width > avail.width || size.height > avail.height {
            size = contain_fit(size, avail);
        }

        let x = match self.config.badge_anchor {
            Corner::TopLeft | Corner::BottomLeft => margin,
            Corner::TopRight | Corner::BottomRight => canvas.width - margin - size.width,
        };
        let y = match self.config.badge_anchor {
            Corner::TopLeft | Corner::TopRight => margin,
            Corner::BottomLeft | Corner::BottomRight => canvas.height - margin - size.height,
        };
        Rect::new(x, y, size.width, size.height)
    }
}
