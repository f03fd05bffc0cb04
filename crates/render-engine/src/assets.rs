//! Overlay asset loading.
//!
//! Overlays (logo badges, template frames) are fetched through the
//! [`AssetSource`] seam and decoded fresh for every compose; the booth
//! never caches decoded assets, so replacing a template on disk takes
//! effect on the next shot.

use std::collections::HashMap;
use std::path::PathBuf;

use async_trait::async_trait;
use snapbooth_common::error::{BoothError, BoothResult};
use snapbooth_photo_model::{Bitmap, Dimensions};

/// Source of encoded overlay bytes.
#[async_trait]
pub trait AssetSource: Send + Sync {
    /// Fetch the encoded bytes of the named asset.
    ///
    /// Fails with `AssetLoad` when the asset cannot be retrieved.
    async fn fetch(&self, name: &str) -> BoothResult<Vec<u8>>;
}

/// Loads assets from files under a base directory.
#[derive(Debug, Clone)]
pub struct DirAssetSource {
    base: PathBuf,
}

impl DirAssetSource {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }
}

#[async_trait]
impl AssetSource for DirAssetSource {
    async fn fetch(&self, name: &str) -> BoothResult<Vec<u8>> {
        let path = self.base.join(name);
        tokio::fs::read(&path).await.map_err(|e| {
            BoothError::asset_load(format!("could not read {}: {}", path.display(), e))
        })
    }
}

/// In-memory asset source for embedded overlays and tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryAssets {
    entries: HashMap<String, Vec<u8>>,
}

impl MemoryAssets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a named asset, replacing any previous bytes.
    pub fn insert(&mut self, name: impl Into<String>, bytes: Vec<u8>) {
        self.entries.insert(name.into(), bytes);
    }
}

#[async_trait]
impl AssetSource for MemoryAssets {
    async fn fetch(&self, name: &str) -> BoothResult<Vec<u8>> {
        self.entries
            .get(name)
            .cloned()
            .ok_or_else(|| BoothError::asset_load(format!("no asset named {:?}", name)))
    }
}

/// A decoded, validated overlay ready for compositing.
#[derive(Debug, Clone)]
pub struct OverlayAsset {
    name: String,
    bitmap: Bitmap,
}

impl OverlayAsset {
    /// Fetch and decode the named overlay.
    ///
    /// Fetch and decode failures are `AssetLoad`; an asset that decodes
    /// to a zero dimension is `InvalidAsset`. Either way the compose
    /// that requested the overlay must fail rather than draw without it.
    pub async fn load(name: &str, source: &dyn AssetSource) -> BoothResult<OverlayAsset> {
        let bytes = source.fetch(name).await.map_err(|e| {
            tracing::error!(asset = name, error = %e, "Overlay fetch failed");
            e
        })?;
        let decoded = image::load_from_memory(&bytes).map_err(|e| {
            tracing::error!(asset = name, error = %e, "Overlay decode failed");
            BoothError::asset_load(format!("could not decode overlay {:?}: {}", name, e))
        })?;
        let rgba = decoded.to_rgba8();
        let (width, height) = rgba.dimensions();
        if width == 0 || height == 0 {
            return Err(BoothError::invalid_asset(format!(
                "overlay {:?} decoded to zero dimension",
                name
            )));
        }
        tracing::debug!(asset = name, width, height, "Overlay loaded");
        Ok(Self {
            name: name.to_string(),
            bitmap: Bitmap::from_rgba8(width, height, rgba.into_raw())?,
        })
    }

    /// Wrap an already decoded bitmap (embedded overlays).
    pub fn from_bitmap(name: impl Into<String>, bitmap: Bitmap) -> Self {
        Self {
            name: name.into(),
            bitmap,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bitmap(&self) -> &Bitmap {
        &self.bitmap
    }

    pub fn dimensions(&self) -> Dimensions {
        self.bitmap.dimensions()
    }
}
