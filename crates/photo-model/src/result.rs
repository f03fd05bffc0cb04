//! Composite, encode, and upload records.
//!
//! A capture flows through three forms: the flattened
//! [`CompositeResult`], the transportable [`EncodedImage`], and the
//! published [`ContentRef`]. Keeping them separate means a failed upload
//! leaves the encoded bytes intact for a retry.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::bitmap::Bitmap;
use crate::geometry::LayoutPlan;

/// The flattened output of a compose operation.
#[derive(Debug, Clone)]
pub struct CompositeResult {
    /// Final photo with the overlay burned in.
    pub bitmap: Bitmap,
    /// The layout that produced it.
    pub plan: LayoutPlan,
    /// Name of the overlay asset that was composited.
    pub overlay_name: String,
}

/// Encoded output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Lossy JPEG at the given quality in [1, 100]. No alpha channel;
    /// transparent canvas regions come out black.
    Jpeg { quality: u8 },
    /// Lossless PNG. Preserves transparency.
    Png,
}

impl OutputFormat {
    /// Conventional file extension, without the dot.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Jpeg { .. } => "jpg",
            OutputFormat::Png => "png",
        }
    }

    /// MIME type of the encoded bytes.
    pub fn mime_type(&self) -> &'static str {
        match self {
            OutputFormat::Jpeg { .. } => "image/jpeg",
            OutputFormat::Png => "image/png",
        }
    }
}

/// An encoded, transportable image.
#[derive(Debug, Clone)]
pub struct EncodedImage {
    pub format: OutputFormat,
    pub bytes: Vec<u8>,
    /// Content-derived identifier (SHA-256 prefix of the encoded bytes).
    pub content_id: String,
}

/// Reference to a published capture.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentRef {
    /// Shareable content URL.
    pub url: String,
    /// When the upload completed.
    pub uploaded_at: DateTime<Utc>,
}

/// Upload parameters passed through to the remote target.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadPreset {
    /// Named preset understood by the upload target.
    pub preset: String,
    /// Optional remote folder or collection.
    pub folder: Option<String>,
}

impl Default for UploadPreset {
    fn default() -> Self {
        Self {
            preset: "default".to_string(),
            folder: None,
        }
    }
}
