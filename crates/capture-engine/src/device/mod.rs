//! Capture device abstraction.
//!
//! The booth never talks to camera hardware directly; platform
//! integrations implement [`CaptureDevice`] and hand the session a
//! [`FrameStream`]. The built-in [`SyntheticDevice`] renders a
//! deterministic test pattern for tests and hardware-free runs.

use async_trait::async_trait;
use snapbooth_common::error::BoothResult;
use snapbooth_photo_model::{FacingMode, RawFrame};

pub mod synthetic;

pub use synthetic::SyntheticDevice;

/// Abstract interface for camera-like capture hardware.
#[async_trait]
pub trait CaptureDevice: Send + Sync {
    /// Device name for logs and diagnostics.
    fn name(&self) -> &str;

    /// Open a live stream facing the given direction.
    ///
    /// Fails with `PermissionDenied` when the user refused camera access
    /// and `DeviceUnavailable` when no matching camera exists.
    async fn start_stream(&self, facing: FacingMode) -> BoothResult<Box<dyn FrameStream>>;
}

/// A live stream of frames from a capture device.
///
/// Streams own the underlying hardware handle. [`FrameStream::stop`]
/// releases it and must be idempotent; implementations must also release
/// the handle when an unstopped stream is dropped.
#[async_trait]
pub trait FrameStream: Send {
    /// Whether the stream is still live.
    fn is_streaming(&self) -> bool;

    /// Acquire the current frame.
    ///
    /// Fails with `SourceUnavailable` once the stream has been stopped.
    async fn next_frame(&mut self) -> BoothResult<RawFrame>;

    /// Release the underlying device handle.
    fn stop(&mut self);
}
