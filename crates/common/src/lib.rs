//! Snapbooth Common Utilities
//!
//! Shared infrastructure for all Snapbooth crates: the booth-wide
//! error type, configuration loading, and tracing setup.

pub mod config;
pub mod error;
pub mod logging;

pub use config::*;
pub use error::*;
