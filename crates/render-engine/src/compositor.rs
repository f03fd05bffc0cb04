//! Flattens a capture and its overlay into the final booth photo.
//!
//! The compositor executes a [`LayoutPlan`]: allocate the destination
//! canvas, mirror the source when the plan asks for selfie correction,
//! draw the source into its rectangle with bilinear resampling, then
//! alpha-blend the overlay on top. The overlay is awaited before any
//! pixel work; a compose never completes without it.

use std::sync::Arc;

use image::imageops::{self, FilterType};
use image::{ImageBuffer, Rgba, RgbaImage};
use snapbooth_common::error::{BoothError, BoothResult};
use snapbooth_layout_core::GeometryPlanner;
use snapbooth_photo_model::{Bitmap, CompositeResult, LayoutPlan, Rect};

use crate::assets::{AssetSource, OverlayAsset};

/// Composes captured bitmaps with overlay assets.
pub struct Compositor {
    assets: Arc<dyn AssetSource>,
    planner: GeometryPlanner,
}

impl Compositor {
    pub fn new(assets: Arc<dyn AssetSource>, planner: GeometryPlanner) -> Self {
        Self { assets, planner }
    }

    pub fn planner(&self) -> &GeometryPlanner {
        &self.planner
    }

    /// Compose `source` with the named overlay.
    ///
    /// Awaits the overlay first (a template's native size feeds the
    /// plan), then plans and flattens. Fails without producing any
    /// output when the overlay cannot be loaded.
    pub async fn compose(
        &self,
        source: Bitmap,
        overlay_name: &str,
    ) -> BoothResult<CompositeResult> {
        tracing::info!(
            overlay = overlay_name,
            source = %source.dimensions(),
            "Composing capture"
        );
        let overlay = OverlayAsset::load(overlay_name, self.assets.as_ref()).await?;
        let plan = self
            .planner
            .plan(source.dimensions(), overlay.dimensions())?;
        self.flatten(source, &plan, &overlay)
    }

    /// Execute a resolved plan: the synchronous core of
    /// [`Compositor::compose`].
    pub fn flatten(
        &self,
        source: Bitmap,
        plan: &LayoutPlan,
        overlay: &OverlayAsset,
    ) -> BoothResult<CompositeResult> {
        plan.validate()?;

        let mut canvas: RgbaImage =
            ImageBuffer::from_pixel(plan.canvas.width, plan.canvas.height, Rgba([0, 0, 0, 0]));

        let source = if plan.mirror {
            source.flip_horizontal()
        } else {
            source
        };
        draw_into(&mut canvas, &source, plan.source_rect)?;
        draw_into(&mut canvas, overlay.bitmap(), plan.overlay_rect)?;

        let bitmap = Bitmap::from_rgba8(plan.canvas.width, plan.canvas.height, canvas.into_raw())?;
        tracing::info!(
            canvas = %plan.canvas,
            overlay = overlay.name(),
            mirrored = plan.mirror,
            "Composite flattened"
        );
        Ok(CompositeResult {
            bitmap,
            plan: *plan,
            overlay_name: overlay.name().to_string(),
        })
    }
}

/// Draw `bitmap` into `rect` on the canvas, resampling bilinearly when
/// the sizes differ. Alpha-blends, so transparent overlay regions leave
/// the photo visible underneath.
fn draw_into(canvas: &mut RgbaImage, bitmap: &Bitmap, rect: Rect) -> BoothResult<()> {
    let src = to_rgba_image(bitmap)?;
    let sized = if bitmap.width() == rect.width && bitmap.height() == rect.height {
        src
    } else {
        imageops::resize(&src, rect.width, rect.height, FilterType::Triangle)
    };
    imageops::overlay(canvas, &sized, rect.x as i64, rect.y as i64);
    Ok(())
}

fn to_rgba_image(bitmap: &Bitmap) -> BoothResult<RgbaImage> {
    ImageBuffer::from_raw(bitmap.width(), bitmap.height(), bitmap.as_bytes().to_vec())
        .ok_or_else(|| BoothError::decode("bitmap buffer length mismatch"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::MemoryAssets;
    use snapbooth_layout_core::{LayoutConfig, LayoutMode};
    use snapbooth_photo_model::{Corner, Dimensions, OverlayPlacement};

    fn png_bytes(img: &image::RgbaImage) -> Vec<u8> {
        let mut bytes = Vec::new();
        img.write_to(
            &mut std::io::Cursor::new(&mut bytes),
            image::ImageFormat::Png,
        )
        .unwrap();
        bytes
    }

    /// 16x8 source: left half red, right half blue.
    fn split_source() -> Bitmap {
        let mut pixels = Vec::new();
        for _y in 0..8 {
            for x in 0..16 {
                if x < 8 {
                    pixels.extend_from_slice(&[255, 0, 0, 255]);
                } else {
                    pixels.extend_from_slice(&[0, 0, 255, 255]);
                }
            }
        }
        Bitmap::from_rgba8(16, 8, pixels).unwrap()
    }

    fn small_badge_compositor() -> Compositor {
        let mut assets = MemoryAssets::new();
        let badge = image::RgbaImage::from_pixel(2, 1, image::Rgba([255, 255, 0, 255]));
        assets.insert("badge.png", png_bytes(&badge));
        let config = LayoutConfig {
            badge_width: 2,
            badge_margin: 1,
            ..LayoutConfig::default()
        };
        Compositor::new(
            Arc::new(assets),
            GeometryPlanner::new(LayoutMode::MirrorCanvas, config),
        )
    }

    #[tokio::test]
    async fn test_mirror_compose_flips_source() {
        let compositor = small_badge_compositor();
        let result = compositor
            .compose(split_source(), "badge.png")
            .await
            .unwrap();

        assert_eq!(result.bitmap.dimensions(), Dimensions::new(16, 8));
        assert!(result.plan.mirror);
        // left half was red; mirrored output starts blue
        assert_eq!(result.bitmap.pixel(0, 0), Some([0, 0, 255, 255]));
        assert_eq!(result.bitmap.pixel(15, 0), Some([255, 0, 0, 255]));
    }

    #[tokio::test]
    async fn test_badge_lands_in_anchor_corner() {
        let compositor = small_badge_compositor();
        let result = compositor
            .compose(split_source(), "badge.png")
            .await
            .unwrap();

        // 2x1 badge, 1px margin, bottom-right of a 16x8 canvas
        assert_eq!(result.plan.overlay_rect, Rect::new(13, 6, 2, 1));
        assert_eq!(result.bitmap.pixel(13, 6), Some([255, 255, 0, 255]));
        assert_eq!(result.bitmap.pixel(14, 6), Some([255, 255, 0, 255]));
        assert!(matches!(
            result.plan.placement,
            OverlayPlacement::CornerBadge {
                anchor: Corner::BottomRight
            }
        ));
    }

    #[tokio::test]
    async fn test_compose_is_deterministic() {
        let compositor = small_badge_compositor();
        let a = compositor
            .compose(split_source(), "badge.png")
            .await
            .unwrap();
        let b = compositor
            .compose(split_source(), "badge.png")
            .await
            .unwrap();
        assert_eq!(a.bitmap, b.bitmap);
    }

    #[tokio::test]
    async fn test_template_compose_layers_photo_and_frame() {
        // 4x8 template: transparent photo region on top, green band below
        let template = image::RgbaImage::from_fn(4, 8, |_, y| {
            if y < 4 {
                image::Rgba([0, 0, 0, 0])
            } else {
                image::Rgba([0, 255, 0, 255])
            }
        });
        let mut assets = MemoryAssets::new();
        assets.insert("frame.png", png_bytes(&template));

        let compositor = Compositor::new(
            Arc::new(assets),
            GeometryPlanner::with_defaults(LayoutMode::TemplateFrame { mirror: false }),
        );
        let solid_red = Bitmap::from_rgba8(8, 4, [255, 0, 0, 255].repeat(32)).unwrap();
        let result = compositor.compose(solid_red, "frame.png").await.unwrap();

        assert_eq!(result.bitmap.dimensions(), Dimensions::new(4, 8));
        // photo fitted to 4x2 at the top, visible through the window
        assert_eq!(result.plan.source_rect, Rect::new(0, 0, 4, 2));
        assert_eq!(result.bitmap.pixel(1, 0), Some([255, 0, 0, 255]));
        // below the photo, inside the window: untouched transparent canvas
        assert_eq!(result.bitmap.pixel(1, 3), Some([0, 0, 0, 0]));
        // branding band from the template
        assert_eq!(result.bitmap.pixel(1, 6), Some([0, 255, 0, 255]));
    }

    #[tokio::test]
    async fn test_missing_overlay_fails_compose() {
        let compositor = Compositor::new(
            Arc::new(MemoryAssets::new()),
            GeometryPlanner::with_defaults(LayoutMode::MirrorCanvas),
        );
        let err = compositor
            .compose(split_source(), "absent.png")
            .await
            .unwrap_err();
        assert!(err.is_asset_failure());
    }

    #[tokio::test]
    async fn test_undecodable_overlay_fails_compose() {
        let mut assets = MemoryAssets::new();
        assets.insert("corrupt.png", b"garbage".to_vec());
        let compositor = Compositor::new(
            Arc::new(assets),
            GeometryPlanner::with_defaults(LayoutMode::MirrorCanvas),
        );
        let err = compositor
            .compose(split_source(), "corrupt.png")
            .await
            .unwrap_err();
        assert!(err.is_asset_failure());
    }

    #[test]
    fn test_flatten_rejects_invalid_plan() {
        let compositor = small_badge_compositor();
        let overlay = OverlayAsset::from_bitmap("badge", Bitmap::blank(2, 1).unwrap());
        let plan = LayoutPlan {
            canvas: Dimensions::new(8, 8),
            source_rect: Rect::new(0, 0, 8, 8),
            overlay_rect: Rect::new(7, 7, 4, 4),
            placement: OverlayPlacement::CornerBadge {
                anchor: Corner::BottomRight,
            },
            mirror: false,
        };
        let source = Bitmap::blank(8, 8).unwrap();
        assert!(compositor.flatten(source, &plan, &overlay).is_err());
    }

    #[test]
    fn test_semi_transparent_overlay_blends() {
        let compositor = small_badge_compositor();
        let overlay = OverlayAsset::from_bitmap(
            "tint",
            Bitmap::from_rgba8(1, 1, vec![255, 255, 255, 128]).unwrap(),
        );
        let black = Bitmap::from_rgba8(4, 4, [0, 0, 0, 255].repeat(16)).unwrap();
        let plan = LayoutPlan {
            canvas: Dimensions::new(4, 4),
            source_rect: Rect::new(0, 0, 4, 4),
            overlay_rect: Rect::new(0, 0, 1, 1),
            placement: OverlayPlacement::CornerBadge {
                anchor: Corner::TopLeft,
            },
            mirror: false,
        };
        let result = compositor.flatten(black, &plan, &overlay).unwrap();
        let px = result.bitmap.pixel(0, 0).unwrap();
        // half-opaque white over black lands near mid-gray
        assert!((120..=136).contains(&px[0]), "got {:?}", px);
        assert_eq!(px[3], 255);
        // neighbors untouched
        assert_eq!(result.bitmap.pixel(1, 0), Some([0, 0, 0, 255]));
    }
}
