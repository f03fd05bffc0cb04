//! Error types shared across Snapbooth crates.

use std::path::PathBuf;

/// Top-level error type for Snapbooth operations.
#[derive(Debug, thiserror::Error)]
pub enum BoothError {
    #[error("Capture source unavailable: {message}")]
    SourceUnavailable { message: String },

    #[error("Decode error: {message}")]
    Decode { message: String },

    #[error("Encode error: {message}")]
    Encode { message: String },

    #[error("Invalid overlay asset: {message}")]
    InvalidAsset { message: String },

    #[error("Overlay asset failed to load: {message}")]
    AssetLoad { message: String },

    #[error("Layout error: {message}")]
    Layout { message: String },

    #[error("Upload error: {message}")]
    Upload { message: String },

    #[error("Camera permission denied: {message}")]
    PermissionDenied { message: String },

    #[error("Capture device unavailable: {message}")]
    DeviceUnavailable { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using BoothError.
pub type BoothResult<T> = Result<T, BoothError>;

impl BoothError {
    pub fn source_unavailable(msg: impl Into<String>) -> Self {
        Self::SourceUnavailable {
            message: msg.into(),
        }
    }

    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode {
            message: msg.into(),
        }
    }

    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode {
            message: msg.into(),
        }
    }

    pub fn invalid_asset(msg: impl Into<String>) -> Self {
        Self::InvalidAsset {
            message: msg.into(),
        }
    }

    pub fn asset_load(msg: impl Into<String>) -> Self {
        Self::AssetLoad {
            message: msg.into(),
        }
    }

    pub fn layout(msg: impl Into<String>) -> Self {
        Self::Layout {
            message: msg.into(),
        }
    }

    pub fn upload(msg: impl Into<String>) -> Self {
        Self::Upload {
            message: msg.into(),
        }
    }

    pub fn device_unavailable(msg: impl Into<String>) -> Self {
        Self::DeviceUnavailable {
            message: msg.into(),
        }
    }

    /// True for both overlay failure kinds: unreadable/undecodable assets
    /// and assets that decode to unusable dimensions. A compose must not
    /// produce output when this is true.
    pub fn is_asset_failure(&self) -> bool {
        matches!(self, Self::InvalidAsset { .. } | Self::AssetLoad { .. })
    }
}
