//! Capture session management.
//!
//! A session owns at most one live stream and guarantees the device
//! handle is released on every exit path: successful snapshot, failed
//! snapshot, retake, reset, and drop. Successive attempts get a
//! monotonically increasing generation; anything computed for an older
//! generation is discarded at surface time instead of reaching the
//! caller.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use snapbooth_common::error::{BoothError, BoothResult};
use snapbooth_photo_model::{Bitmap, CompositeResult, FacingMode};

use crate::device::{CaptureDevice, FrameStream};
use crate::source::BitmapSource;

/// Monotonic counter distinguishing successive capture attempts.
pub type Generation = u64;

/// State of a capture session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No stream open, nothing captured.
    Idle,
    /// Live stream open, waiting for a snapshot.
    Streaming,
    /// A source bitmap exists for the current generation.
    Captured,
}

/// A normalized capture plus the attempt bookkeeping callers need.
#[derive(Debug, Clone)]
pub struct Snapshot {
    /// Normalized source bitmap.
    pub bitmap: Bitmap,
    /// The attempt this capture belongs to.
    pub generation: Generation,
    /// Wall-clock capture time.
    pub captured_at: DateTime<Utc>,
}

/// A photo-booth capture session.
pub struct CaptureSession {
    device: Arc<dyn CaptureDevice>,
    stream: Option<Box<dyn FrameStream>>,
    state: SessionState,
    generation: Generation,
}

impl CaptureSession {
    /// Create a session over the given device. No stream is opened yet.
    pub fn new(device: Arc<dyn CaptureDevice>) -> Self {
        Self {
            device,
            stream: None,
            state: SessionState::Idle,
            generation: 0,
        }
    }

    /// Current session state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Generation of the current attempt (0 before the first attempt).
    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Whether `generation` still identifies the newest attempt.
    pub fn is_current(&self, generation: Generation) -> bool {
        generation == self.generation
    }

    /// Begin a live capture attempt.
    ///
    /// Releases any previous stream, bumps the generation (superseding
    /// in-flight work), and opens a fresh stream. Calling this while
    /// already streaming is the retake path, not an error.
    pub async fn start(&mut self, facing: FacingMode) -> BoothResult<Generation> {
        self.release_stream();
        self.generation += 1;
        tracing::info!(
            device = self.device.name(),
            %facing,
            generation = self.generation,
            "Starting capture attempt"
        );
        match self.device.start_stream(facing).await {
            Ok(stream) => {
                self.stream = Some(stream);
                self.state = SessionState::Streaming;
                Ok(self.generation)
            }
            Err(e) => {
                self.state = SessionState::Idle;
                Err(e)
            }
        }
    }

    /// Capture the current frame and release the stream.
    ///
    /// The stream is released whether or not acquisition succeeds; a
    /// retry requires a fresh [`CaptureSession::start`].
    pub async fn snapshot(&mut self) -> BoothResult<Snapshot> {
        let Some(stream) = self.stream.as_mut() else {
            return Err(BoothError::source_unavailable(
                "no live stream; start a capture attempt first",
            ));
        };
        let acquired = BitmapSource::from_live_frame(stream.as_mut()).await;
        self.release_stream();
        match acquired {
            Ok(bitmap) => {
                self.state = SessionState::Captured;
                tracing::info!(
                    width = bitmap.width(),
                    height = bitmap.height(),
                    generation = self.generation,
                    "Frame captured, stream released"
                );
                Ok(Snapshot {
                    bitmap,
                    generation: self.generation,
                    captured_at: Utc::now(),
                })
            }
            Err(e) => {
                self.state = SessionState::Idle;
                Err(e)
            }
        }
    }

    /// Begin an uploaded-file attempt: the decoded bytes become the new
    /// attempt's source. Any live stream is released; no stream is
    /// opened.
    pub fn import(&mut self, bytes: &[u8]) -> BoothResult<Snapshot> {
        self.release_stream();
        self.generation += 1;
        match BitmapSource::from_encoded_bytes(bytes) {
            Ok(bitmap) => {
                self.state = SessionState::Captured;
                tracing::info!(
                    width = bitmap.width(),
                    height = bitmap.height(),
                    generation = self.generation,
                    "Upload imported"
                );
                Ok(Snapshot {
                    bitmap,
                    generation: self.generation,
                    captured_at: Utc::now(),
                })
            }
            Err(e) => {
                self.state = SessionState::Idle;
                Err(e)
            }
        }
    }

    /// Abandon the current attempt.
    ///
    /// Releases the stream and bumps the generation so in-flight
    /// composites are discarded at surface time.
    pub fn reset(&mut self) -> Generation {
        self.release_stream();
        self.generation += 1;
        self.state = SessionState::Idle;
        tracing::info!(generation = self.generation, "Session reset");
        self.generation
    }

    /// Surface a finished composite to the caller.
    ///
    /// Returns `None` when a newer attempt superseded `generation` while
    /// the composite was in flight.
    pub fn surface(
        &self,
        generation: Generation,
        result: CompositeResult,
    ) -> Option<CompositeResult> {
        if self.is_current(generation) {
            Some(result)
        } else {
            tracing::debug!(
                stale = generation,
                current = self.generation,
                "Discarding stale composite"
            );
            None
        }
    }

    fn release_stream(&mut self) {
        if let Some(mut stream) = self.stream.take() {
            stream.stop();
            tracing::debug!(generation = self.generation, "Capture stream released");
        }
    }
}

impl Drop for CaptureSession {
    fn drop(&mut self) {
        self.release_stream();
    }
}
