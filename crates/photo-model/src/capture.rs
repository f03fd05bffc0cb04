//! Shared contracts between capture devices and the session layer.

use serde::{Deserialize, Serialize};

/// Which way the requested camera faces.
///
/// `User` is the selfie camera and normally pairs with mirror correction;
/// `Environment` is the world-facing camera.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FacingMode {
    User,
    Environment,
}

impl FacingMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            FacingMode::User => "user",
            FacingMode::Environment => "environment",
        }
    }
}

impl std::fmt::Display for FacingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A frame handed over by a capture stream: RGBA8 pixels plus dimensions,
/// not yet validated or normalized.
#[derive(Debug, Clone)]
pub struct RawFrame {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}
