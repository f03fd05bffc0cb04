//! Snapbooth Layout Core
//!
//! Pure geometry planning for booth composites: source width capping,
//! aspect-preserving contain fits, badge anchoring, and the mode
//! selector that turns source and overlay dimensions into a resolved
//! layout plan. No pixel data enters this crate.

pub mod fit;
pub mod planner;

pub use fit::*;
pub use planner::*;
