//! Compose an existing photo file with an overlay.

use std::path::PathBuf;
use std::sync::Arc;

use snapbooth_capture_engine::{CaptureSession, SyntheticDevice};
use snapbooth_common::config::AppConfig;
use snapbooth_layout_core::GeometryPlanner;
use snapbooth_photo_model::UploadPreset;
use snapbooth_render_engine::assets::DirAssetSource;
use snapbooth_render_engine::compositor::Compositor;
use snapbooth_render_engine::export::{self, FilesystemTarget};

pub async fn run(
    config: AppConfig,
    path: PathBuf,
    overlay: String,
    mode: String,
    format: Option<String>,
    quality: Option<u8>,
    output: Option<PathBuf>,
    publish_dir: Option<PathBuf>,
) -> anyhow::Result<()> {
    // imported photos are already the right way round
    let mode = super::parse_mode(&mode, false)?;
    let format_name = format.unwrap_or_else(|| config.export.format.clone());
    let quality = quality.unwrap_or(config.export.jpeg_quality);
    let format = super::parse_format(&format_name, quality)?;

    let bytes = tokio::fs::read(&path)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {e}", path.display()))?;
    println!("Importing {} ({} bytes)...", path.display(), bytes.len());

    let mut session = CaptureSession::new(Arc::new(SyntheticDevice::new()));
    let snapshot = session.import(&bytes)?;
    let generation = snapshot.generation;
    let captured_at = snapshot.captured_at;
    println!("  Decoded: {}", snapshot.bitmap.dimensions());

    let compositor = Compositor::new(
        Arc::new(DirAssetSource::new(&config.assets_dir)),
        GeometryPlanner::with_defaults(mode),
    );
    let result = compositor.compose(snapshot.bitmap, &overlay).await?;
    let result = session
        .surface(generation, result)
        .ok_or_else(|| anyhow::anyhow!("Import superseded before compositing finished"))?;
    tracing::debug!(plan = ?result.plan, "Resolved layout");
    println!("  Composed: {} + {overlay}", result.plan.canvas);

    let encoded = export::encode(&result, format)?;
    let out_path = output.unwrap_or_else(|| {
        config.captures_dir.join(format!(
            "{}-{}.{}",
            captured_at.format("%Y%m%d-%H%M%S"),
            encoded.content_id,
            encoded.format.extension()
        ))
    });
    export::write_local(&encoded, &out_path)?;
    println!("Saved: {}", out_path.display());

    if let Some(dir) = publish_dir {
        let preset = UploadPreset {
            preset: config.export.upload_preset.clone(),
            folder: None,
        };
        let content = export::submit(&encoded, &FilesystemTarget::new(dir), &preset).await?;
        println!("Published: {}", content.url);
    }

    Ok(())
}
