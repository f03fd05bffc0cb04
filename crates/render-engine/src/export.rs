//! Encoding and publication of finished composites.
//!
//! Encoding is pure and synchronous: a flattened composite becomes JPEG
//! or PNG bytes plus a content-derived identifier. Publication goes
//! through the [`UploadTarget`] seam; a failed upload leaves the encoded
//! bytes untouched and resubmittable.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};
use sha2::{Digest, Sha256};
use snapbooth_common::error::{BoothError, BoothResult};
use snapbooth_photo_model::{CompositeResult, ContentRef, EncodedImage, OutputFormat, UploadPreset};

/// Hex characters of the SHA-256 digest kept as the content id.
const CONTENT_ID_LEN: usize = 16;

/// Encode a composite into transportable bytes.
///
/// JPEG drops the alpha channel, so transparent canvas regions come out
/// black; PNG preserves them. The quality value clamps into [1, 100].
pub fn encode(result: &CompositeResult, format: OutputFormat) -> BoothResult<EncodedImage> {
    let bitmap = &result.bitmap;
    let (width, height) = (bitmap.width(), bitmap.height());
    let mut bytes = Vec::new();

    match format {
        OutputFormat::Jpeg { quality } => {
            let quality = quality.clamp(1, 100);
            let rgb = strip_alpha(bitmap.as_bytes());
            JpegEncoder::new_with_quality(&mut bytes, quality)
                .write_image(&rgb, width, height, ExtendedColorType::Rgb8)
                .map_err(|e| BoothError::encode(format!("JPEG encoding failed: {e}")))?;
        }
        OutputFormat::Png => {
            PngEncoder::new(&mut bytes)
                .write_image(bitmap.as_bytes(), width, height, ExtendedColorType::Rgba8)
                .map_err(|e| BoothError::encode(format!("PNG encoding failed: {e}")))?;
        }
    }

    let content_id = content_id(&bytes);
    tracing::info!(
        %content_id,
        format = format.extension(),
        bytes = bytes.len(),
        "Composite encoded"
    );
    Ok(EncodedImage {
        format,
        bytes,
        content_id,
    })
}

/// Write encoded bytes to `path`, creating parent directories. This is
/// the local "download" sink.
pub fn write_local(encoded: &EncodedImage, path: &Path) -> BoothResult<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, &encoded.bytes)?;
    tracing::info!(
        path = %path.display(),
        bytes = encoded.bytes.len(),
        "Capture written"
    );
    Ok(())
}

/// Remote publication seam: submit encoded bytes, receive a shareable
/// reference.
#[async_trait]
pub trait UploadTarget: Send + Sync {
    /// Target name for logs and diagnostics.
    fn name(&self) -> &str;

    /// Publish encoded bytes under the given preset.
    async fn upload(
        &self,
        encoded: &EncodedImage,
        preset: &UploadPreset,
    ) -> BoothResult<ContentRef>;
}

/// Submit an encoded capture to a target.
///
/// The encoded image is borrowed, never consumed: on failure the caller
/// still holds valid bytes and can resubmit or fall back to a local
/// write.
pub async fn submit(
    encoded: &EncodedImage,
    target: &dyn UploadTarget,
    preset: &UploadPreset,
) -> BoothResult<ContentRef> {
    tracing::info!(
        target = target.name(),
        content_id = %encoded.content_id,
        preset = %preset.preset,
        "Submitting capture"
    );
    match target.upload(encoded, preset).await {
        Ok(content) => {
            tracing::info!(url = %content.url, "Upload complete");
            Ok(content)
        }
        Err(e) => {
            tracing::warn!(
                target = target.name(),
                error = %e,
                "Upload failed; encoded bytes remain valid"
            );
            Err(e)
        }
    }
}

/// Publishes captures into a local directory and returns `file://`
/// URLs. Stands in for a remote service in self-hosted booths.
#[derive(Debug, Clone)]
pub struct FilesystemTarget {
    root: PathBuf,
}

impl FilesystemTarget {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl UploadTarget for FilesystemTarget {
    fn name(&self) -> &str {
        "filesystem"
    }

    async fn upload(
        &self,
        encoded: &EncodedImage,
        preset: &UploadPreset,
    ) -> BoothResult<ContentRef> {
        let dir = match &preset.folder {
            Some(folder) => self.root.join(folder),
            None => self.root.clone(),
        };
        tokio::fs::create_dir_all(&dir).await.map_err(|e| {
            BoothError::upload(format!("could not create {}: {}", dir.display(), e))
        })?;
        let filename = format!("{}.{}", encoded.content_id, encoded.format.extension());
        let path = dir.join(filename);
        tokio::fs::write(&path, &encoded.bytes)
            .await
            .map_err(|e| BoothError::upload(format!("could not write {}: {}", path.display(), e)))?;
        Ok(ContentRef {
            url: format!("file://{}", path.display()),
            uploaded_at: chrono::Utc::now(),
        })
    }
}

/// Drop the alpha channel from an RGBA8 buffer.
fn strip_alpha(rgba: &[u8]) -> Vec<u8> {
    let mut rgb = Vec::with_capacity(rgba.len() / 4 * 3);
    for px in rgba.chunks_exact(4) {
        rgb.extend_from_slice(&px[..3]);
    }
    rgb
}

fn content_id(bytes: &[u8]) -> String {
    let digest = format!("{:x}", Sha256::digest(bytes));
    digest[..CONTENT_ID_LEN].to_string()
}
