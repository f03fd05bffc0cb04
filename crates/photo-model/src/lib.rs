//! Snapbooth Photo Model
//!
//! Core data model for photo-booth captures: in-memory bitmaps, layout
//! geometry, capture contracts, and export records. Everything here is
//! plain data; acquisition and pixel work live in the capture and render
//! engines.

pub mod bitmap;
pub mod capture;
pub mod geometry;
pub mod result;

pub use bitmap::*;
pub use capture::*;
pub use geometry::*;
pub use result::*;
