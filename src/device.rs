//! Device profile: target surface metrics supplied by the caller.
//!
//! The engine never queries a UI framework for screen metrics; the caller
//! captures them up front and passes this value in with each request.

use serde::{Deserialize, Serialize};

/// Target surface metrics for one watermarking call. Immutable once built.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DeviceProfile {
    /// Target surface width in pixels; the source image is scaled to it
    pub width_px: u32,

    /// Target surface height in pixels; drives the default anchor offset
    pub height_px: u32,

    /// Density factor converting abstract scaled size units to pixels
    /// (1.0 means one unit per pixel)
    pub font_scale: f32,
}

impl DeviceProfile {
    pub fn new(width_px: u32, height_px: u32, font_scale: f32) -> Self {
        Self {
            width_px,
            height_px,
            font_scale,
        }
    }

    /// Convert an abstract scaled size unit to device pixels, rounding half
    /// up to the nearest whole pixel.
    pub fn scaled_to_px(&self, size: f32) -> f32 {
        (size * self.font_scale + 0.5).floor()
    }
}
