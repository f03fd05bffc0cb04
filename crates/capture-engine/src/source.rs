//! Source normalization: raw frames and encoded files into bitmaps.
//!
//! Every visual input, live or uploaded, passes through here so the rest
//! of the pipeline only ever sees validated RGBA8 [`Bitmap`]s.

use snapbooth_common::error::{BoothError, BoothResult};
use snapbooth_photo_model::{Bitmap, RawFrame};

use crate::device::FrameStream;

/// Normalizes raw visual inputs into validated bitmaps.
pub struct BitmapSource;

impl BitmapSource {
    /// Acquire the current frame from a live stream and normalize it.
    ///
    /// Fails with `SourceUnavailable` when the stream is not live.
    pub async fn from_live_frame(stream: &mut dyn FrameStream) -> BoothResult<Bitmap> {
        if !stream.is_streaming() {
            return Err(BoothError::source_unavailable("capture stream is not live"));
        }
        let frame = stream.next_frame().await?;
        Self::from_raw_frame(frame)
    }

    /// Decode user-provided encoded image bytes (JPEG or PNG).
    pub fn from_encoded_bytes(bytes: &[u8]) -> BoothResult<Bitmap> {
        if bytes.is_empty() {
            return Err(BoothError::decode("empty image payload"));
        }
        let decoded = image::load_from_memory(bytes)
            .map_err(|e| BoothError::decode(format!("could not decode image: {e}")))?;
        let rgba = decoded.to_rgba8();
        let (width, height) = rgba.dimensions();
        tracing::debug!(width, height, "Decoded uploaded image");
        Bitmap::from_rgba8(width, height, rgba.into_raw())
    }

    fn from_raw_frame(frame: RawFrame) -> BoothResult<Bitmap> {
        Bitmap::from_rgba8(frame.width, frame.height, frame.pixels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::{CaptureDevice, SyntheticDevice};
    use snapbooth_photo_model::FacingMode;

    #[tokio::test]
    async fn test_live_frame_normalizes() {
        let device = SyntheticDevice::with_size(24, 16);
        let mut stream = device.start_stream(FacingMode::User).await.unwrap();
        let bitmap = BitmapSource::from_live_frame(stream.as_mut()).await.unwrap();
        assert_eq!(bitmap.width(), 24);
        assert_eq!(bitmap.height(), 16);
    }

    #[tokio::test]
    async fn test_stopped_stream_is_source_unavailable() {
        let device = SyntheticDevice::with_size(24, 16);
        let mut stream = device.start_stream(FacingMode::User).await.unwrap();
        stream.stop();
        let err = BitmapSource::from_live_frame(stream.as_mut())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            BoothError::SourceUnavailable { .. }
        ));
    }

    #[test]
    fn test_encoded_bytes_round_trip() {
        let img = image::RgbaImage::from_pixel(3, 2, image::Rgba([9, 8, 7, 255]));
        let mut bytes = Vec::new();
        img.write_to(
            &mut std::io::Cursor::new(&mut bytes),
            image::ImageFormat::Png,
        )
        .unwrap();

        let bitmap = BitmapSource::from_encoded_bytes(&bytes).unwrap();
        assert_eq!(bitmap.width(), 3);
        assert_eq!(bitmap.height(), 2);
        assert_eq!(bitmap.pixel(0, 0), Some([9, 8, 7, 255]));
    }

    #[test]
    fn test_garbage_bytes_are_decode_errors() {
        let err = BitmapSource::from_encoded_bytes(b"not an image").unwrap_err();
        assert!(matches!(err, BoothError::Decode { .. }));
        assert!(BitmapSource::from_encoded_bytes(&[]).is_err());
    }
}
