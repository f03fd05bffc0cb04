//! Snapbooth Capture Engine
//!
//! Orchestrates camera-style capture for the photo booth: the device
//! abstraction platform integrations plug into, normalization of raw
//! inputs into validated bitmaps, and the capture session that owns the
//! live stream and the attempt generation counter.
//!
//! # Architecture
//!
//! ```text
//! CaptureDevice ──start_stream──▶ FrameStream
//!                                     │
//!                              CaptureSession
//!                              (owns the stream,
//!                               bumps generations)
//!                                     │
//!                 snapshot / import   ▼
//!                               BitmapSource ──▶ Snapshot
//!                                               (Bitmap + generation)
//! ```
//!
//! The session releases the stream on every exit path: successful
//! snapshot, failed snapshot, retake, reset, and drop.

pub mod device;
pub mod session;
pub mod source;

pub use device::*;
pub use session::*;
pub use source::*;
