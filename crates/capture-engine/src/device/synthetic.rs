//! Synthetic capture device producing deterministic test-pattern frames.
//!
//! Frames carry a horizontal gradient and a top-left marker block, so
//! mirror tests can tell left from right, plus a facing-dependent tint so
//! front and rear "cameras" are distinguishable.

use async_trait::async_trait;
use snapbooth_common::error::{BoothError, BoothResult};
use snapbooth_photo_model::{FacingMode, RawFrame};

use crate::device::{CaptureDevice, FrameStream};

/// Side length of the white marker block in the top-left corner.
const MARKER_SIZE: u32 = 8;

/// A software camera. Every frame is a pure function of the configured
/// size and the requested facing.
#[derive(Debug, Clone)]
pub struct SyntheticDevice {
    width: u32,
    height: u32,
}

impl SyntheticDevice {
    /// 1280x720 test camera.
    pub fn new() -> Self {
        Self::with_size(1280, 720)
    }

    pub fn with_size(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl Default for SyntheticDevice {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CaptureDevice for SyntheticDevice {
    fn name(&self) -> &str {
        "synthetic"
    }

    async fn start_stream(&self, facing: FacingMode) -> BoothResult<Box<dyn FrameStream>> {
        if self.width == 0 || self.height == 0 {
            return Err(BoothError::device_unavailable(format!(
                "synthetic camera configured with zero size {}x{}",
                self.width, self.height
            )));
        }
        tracing::debug!(
            width = self.width,
            height = self.height,
            %facing,
            "Opening synthetic stream"
        );
        Ok(Box::new(SyntheticStream {
            width: self.width,
            height: self.height,
            facing,
            live: true,
        }))
    }
}

/// Stream handle for [`SyntheticDevice`]. Holds no real resource; the
/// `live` flag models the hardware handle so session teardown paths are
/// observable in tests.
pub struct SyntheticStream {
    width: u32,
    height: u32,
    facing: FacingMode,
    live: bool,
}

#[async_trait]
impl FrameStream for SyntheticStream {
    fn is_streaming(&self) -> bool {
        self.live
    }

    async fn next_frame(&mut self) -> BoothResult<RawFrame> {
        if !self.live {
            return Err(BoothError::source_unavailable(
                "synthetic stream is stopped",
            ));
        }
        Ok(render_pattern(self.width, self.height, self.facing))
    }

    fn stop(&mut self) {
        self.live = false;
    }
}

fn render_pattern(width: u32, height: u32, facing: FacingMode) -> RawFrame {
    let tint = match facing {
        FacingMode::User => 40u8,
        FacingMode::Environment => 160u8,
    };
    let wm1 = width.saturating_sub(1).max(1) as u64;
    let hm1 = height.saturating_sub(1).max(1) as u64;
    let mut pixels = Vec::with_capacity(width as usize * height as usize * 4);
    for y in 0..height {
        for x in 0..width {
            if x < MARKER_SIZE && y < MARKER_SIZE {
                pixels.extend_from_slice(&[255, 255, 255, 255]);
                continue;
            }
            let r = (x as u64 * 255 / wm1) as u8;
            let b = (y as u64 * 255 / hm1) as u8;
            pixels.extend_from_slice(&[r, tint, b, 255]);
        }
    }
    RawFrame {
        width,
        height,
        pixels,
    }
}
