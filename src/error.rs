//! Watermark error types.
//!
//! Defines errors that can occur while resolving and drawing a watermark.

use std::fmt;

/// Errors that can occur during watermark processing.
#[derive(Debug)]
pub enum WatermarkError {
    /// Invalid request input (empty text, zero image or device dimensions,
    /// malformed engine configuration)
    InvalidInput(String),

    /// Text measurement failed in the shaping collaborator
    Measurement(String),

    /// Drawing or compositing onto the target image failed
    Render(String),
}

impl fmt::Display for WatermarkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidInput(msg) => write!(f, "Invalid watermark input: {}", msg),
            Self::Measurement(msg) => write!(f, "Text measurement failed: {}", msg),
            Self::Render(msg) => write!(f, "Failed to render watermark: {}", msg),
        }
    }
}

impl std::error::Error for WatermarkError {}
