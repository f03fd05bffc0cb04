//! End-to-end booth flows: live capture through compose, encode, and
//! publish, including the retake race against an in-flight compose.

use std::sync::Arc;

use tokio::sync::Notify;

use snapbooth_capture_engine::{CaptureSession, SyntheticDevice};
use snapbooth_common::error::{BoothError, BoothResult};
use snapbooth_layout_core::{GeometryPlanner, LayoutConfig, LayoutMode};
use snapbooth_photo_model::{FacingMode, OutputFormat, Rect, UploadPreset};
use snapbooth_render_engine::assets::{AssetSource, MemoryAssets};
use snapbooth_render_engine::compositor::Compositor;
use snapbooth_render_engine::export::{self, FilesystemTarget, UploadTarget};

fn template_png(width: u32, height: u32, window_height: u32) -> Vec<u8> {
    let img = image::RgbaImage::from_fn(width, height, |_, y| {
        if y < window_height {
            image::Rgba([0, 0, 0, 0])
        } else {
            image::Rgba([20, 40, 200, 255])
        }
    });
    let mut bytes = Vec::new();
    img.write_to(
        &mut std::io::Cursor::new(&mut bytes),
        image::ImageFormat::Png,
    )
    .unwrap();
    bytes
}

fn badge_png() -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(4, 2, image::Rgba([250, 250, 0, 255]));
    let mut bytes = Vec::new();
    img.write_to(
        &mut std::io::Cursor::new(&mut bytes),
        image::ImageFormat::Png,
    )
    .unwrap();
    bytes
}

/// Asset source that parks every fetch until the test opens the gate.
struct GatedAssets {
    inner: MemoryAssets,
    gate: Arc<Notify>,
}

#[async_trait::async_trait]
impl AssetSource for GatedAssets {
    async fn fetch(&self, name: &str) -> BoothResult<Vec<u8>> {
        self.gate.notified().await;
        self.inner.fetch(name).await
    }
}

#[tokio::test]
async fn live_capture_composes_encodes_and_publishes() {
    let mut assets = MemoryAssets::new();
    assets.insert("frame.png", template_png(40, 60, 45));
    let compositor = Compositor::new(
        Arc::new(assets),
        GeometryPlanner::with_defaults(LayoutMode::TemplateFrame { mirror: true }),
    );

    let mut session = CaptureSession::new(Arc::new(SyntheticDevice::with_size(64, 48)));
    let generation = session.start(FacingMode::User).await.unwrap();
    let snapshot = session.snapshot().await.unwrap();
    assert_eq!(snapshot.generation, generation);

    let result = compositor
        .compose(snapshot.bitmap, "frame.png")
        .await
        .unwrap();
    let result = session.surface(generation, result).expect("still current");

    // 4:3 capture fitted into the template's 40x45 window
    assert_eq!(result.plan.source_rect, Rect::new(0, 0, 40, 30));
    assert!(result.plan.mirror);

    let encoded = export::encode(&result, OutputFormat::Jpeg { quality: 90 }).unwrap();
    let decoded = image::load_from_memory(&encoded.bytes).unwrap();
    assert_eq!(decoded.width(), 40);
    assert_eq!(decoded.height(), 60);

    let dir = tempfile::tempdir().unwrap();
    let target = FilesystemTarget::new(dir.path());
    let content = export::submit(&encoded, &target, &UploadPreset::default())
        .await
        .unwrap();
    assert!(content.url.ends_with(&format!("{}.jpg", encoded.content_id)));
}

#[tokio::test]
async fn retake_discards_composite_still_in_flight() {
    let gate = Arc::new(Notify::new());
    let mut inner = MemoryAssets::new();
    inner.insert("badge.png", badge_png());
    let compositor = Arc::new(Compositor::new(
        Arc::new(GatedAssets {
            inner,
            gate: gate.clone(),
        }),
        GeometryPlanner::new(
            LayoutMode::MirrorCanvas,
            LayoutConfig {
                badge_width: 4,
                badge_margin: 2,
                ..LayoutConfig::default()
            },
        ),
    ));

    let mut session = CaptureSession::new(Arc::new(SyntheticDevice::with_size(32, 24)));
    let first = session.start(FacingMode::User).await.unwrap();
    let snapshot = session.snapshot().await.unwrap();

    // overlay fetch is parked, so this compose stays in flight
    let in_flight = {
        let compositor = compositor.clone();
        tokio::spawn(async move { compositor.compose(snapshot.bitmap, "badge.png").await })
    };

    // user hits retake before the overlay arrives
    let second = session.start(FacingMode::User).await.unwrap();
    assert!(second > first);
    let retake = session.snapshot().await.unwrap();

    gate.notify_one();
    let stale = in_flight.await.unwrap().unwrap();
    assert!(
        session.surface(first, stale).is_none(),
        "superseded composite must not surface"
    );

    gate.notify_one();
    let fresh = compositor
        .compose(retake.bitmap, "badge.png")
        .await
        .unwrap();
    assert!(session.surface(retake.generation, fresh).is_some());
}

#[tokio::test]
async fn overlay_failure_aborts_attempt_but_allows_retry() {
    let compositor = Compositor::new(
        Arc::new(MemoryAssets::new()),
        GeometryPlanner::with_defaults(LayoutMode::MirrorCanvas),
    );

    let mut session = CaptureSession::new(Arc::new(SyntheticDevice::with_size(16, 16)));
    session.start(FacingMode::User).await.unwrap();
    let snapshot = session.snapshot().await.unwrap();

    let err = compositor
        .compose(snapshot.bitmap, "missing.png")
        .await
        .unwrap_err();
    assert!(err.is_asset_failure());

    // the session is free to start over after the failed compose
    let next = session.start(FacingMode::User).await.unwrap();
    assert!(next > snapshot.generation);
    assert!(session.snapshot().await.is_ok());
}

#[tokio::test]
async fn failed_upload_preserves_the_local_download() {
    struct OfflineTarget;

    #[async_trait::async_trait]
    impl UploadTarget for OfflineTarget {
        fn name(&self) -> &str {
            "offline"
        }

        async fn upload(
            &self,
            _encoded: &snapbooth_photo_model::EncodedImage,
            _preset: &UploadPreset,
        ) -> BoothResult<snapbooth_photo_model::ContentRef> {
            Err(BoothError::upload("no network"))
        }
    }

    let mut assets = MemoryAssets::new();
    assets.insert("badge.png", badge_png());
    let compositor = Compositor::new(
        Arc::new(assets),
        GeometryPlanner::new(
            LayoutMode::MirrorCanvas,
            LayoutConfig {
                badge_width: 4,
                badge_margin: 2,
                ..LayoutConfig::default()
            },
        ),
    );

    let mut session = CaptureSession::new(Arc::new(SyntheticDevice::with_size(32, 24)));
    session.start(FacingMode::User).await.unwrap();
    let snapshot = session.snapshot().await.unwrap();
    let result = compositor
        .compose(snapshot.bitmap, "badge.png")
        .await
        .unwrap();

    let encoded = export::encode(&result, OutputFormat::Png).unwrap();
    let dir = tempfile::tempdir().unwrap();
    let local = dir.path().join("shot.png");
    export::write_local(&encoded, &local).unwrap();

    assert!(export::submit(&encoded, &OfflineTarget, &UploadPreset::default())
        .await
        .is_err());

    // the download made before the upload attempt is intact
    assert_eq!(std::fs::read(&local).unwrap(), encoded.bytes);
}
