//! Snapbooth Render Engine
//!
//! Turns a captured bitmap into the finished booth photo: fetches and
//! decodes the overlay asset, plans the composition, flattens, encodes,
//! and publishes.
//!
//! # Pipeline Architecture
//!
//! ```text
//! capture bitmap ──┐
//!                  ├── GeometryPlanner ──▶ LayoutPlan
//! overlay asset ───┘                          │
//! (fetch + decode)                            ▼
//!                                    Flatten (mirror, resize,
//!                                     alpha-blend overlay)
//!                                             │
//!                                             ▼
//!                                    Encode (JPEG / PNG)
//!                                             │
//!                              ┌──────────────┴─────────────┐
//!                              ▼                            ▼
//!                        write_local                  UploadTarget
//!                        (download)                  (shareable URL)
//! ```
//!
//! A compose fails outright when the overlay cannot be fetched or
//! decoded; there is no overlay-less fallback output.

pub mod assets;
pub mod compositor;
pub mod export;

pub use assets::*;
pub use compositor::*;
pub use export::*;
