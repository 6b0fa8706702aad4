//! Watermark processing pipeline.
//!
//! `WatermarkProcessor` ties the engine together: scale the source image to
//! the device width, derive the diagonal budget, classify the script, resolve
//! font size and geometry, clamp the opacity, and issue a single rotated draw
//! through the shaper. Each call is independent and synchronous; the request's
//! source buffer is never mutated, and any collaborator failure is surfaced
//! immediately with no partial output.

use image::RgbaImage;
use tracing::{debug, warn};

use crate::config::{EngineConfig, SizingStrategy, StyleOptions};
use crate::constants::{MAX_OPACITY, MIN_OPACITY};
use crate::device::DeviceProfile;
use crate::error::WatermarkError;
use crate::fit::find_fit_size;
use crate::geometry::{bucket_size_for_angle, resolve_anchor, resolve_rotation, ResolvedGeometry};
use crate::scaler::scale_to_width;
use crate::script::contains_script;
use crate::shaper::TextShaper;

/// A single watermarking request. Borrows the source image; the engine
/// retains nothing beyond the call.
#[derive(Debug)]
pub struct WatermarkRequest<'a> {
    /// Source pixel buffer, read-only
    pub image: &'a RgbaImage,
    /// Watermark text; must be non-empty
    pub text: &'a str,
    /// Per-request style overrides
    pub style: StyleOptions,
}

/// Clamp a requested opacity to the visible range [5, 255].
///
/// Out-of-range values self-correct rather than fail: opacity is cosmetic,
/// and a raised floor avoids a fully invisible watermark that would succeed
/// silently.
pub fn clamp_opacity(requested: i32) -> u8 {
    let clamped = requested.clamp(MIN_OPACITY, MAX_OPACITY);
    if clamped != requested {
        warn!(requested, clamped, "Opacity out of range, clamped");
    }
    clamped as u8
}

/// Applies text watermarks using configurable sizing and geometry policies
/// and a pluggable text shaper.
#[derive(Debug)]
pub struct WatermarkProcessor<S> {
    config: EngineConfig,
    shaper: S,
}

impl<S: TextShaper> WatermarkProcessor<S> {
    /// Create a processor, validating the engine configuration up front.
    pub fn new(config: EngineConfig, shaper: S) -> Result<Self, WatermarkError> {
        config.validate().map_err(WatermarkError::InvalidInput)?;
        Ok(Self { config, shaper })
    }

    /// Create a processor with the default configuration.
    pub fn with_defaults(shaper: S) -> Self {
        Self {
            config: EngineConfig::default(),
            shaper,
        }
    }

    /// Resolve the draw geometry for `text` against a scaled image of the
    /// given dimensions. Exposed separately so callers can inspect the
    /// outcome without drawing.
    pub fn resolve_geometry(
        &self,
        text: &str,
        style: &StyleOptions,
        width: u32,
        height: u32,
        profile: &DeviceProfile,
    ) -> Result<ResolvedGeometry, WatermarkError> {
        let alternate_script = contains_script(text, &self.config.alternate_script.ranges);
        let script = if alternate_script {
            &self.config.alternate_script
        } else {
            &self.config.standard_script
        };

        let rotation_degrees =
            resolve_rotation(width, height, style.rotation_degrees, self.config.angle_policy);

        let font_size_px = if let Some(size) = style.font_size {
            profile.scaled_to_px(size)
        } else {
            match self.config.sizing {
                SizingStrategy::FitDiagonal => {
                    let diagonal =
                        ((width as f64 * width as f64 + height as f64 * height as f64).sqrt())
                            as f32;
                    let fitted =
                        find_fit_size(&self.shaper, text, diagonal, self.config.fit_threshold)?;
                    fitted - script.shrink_fraction * fitted
                }
                SizingStrategy::AngleBucket => {
                    profile.scaled_to_px(bucket_size_for_angle(rotation_degrees))
                }
            }
        };

        let (anchor_x, anchor_y) = resolve_anchor(
            style.anchor_x,
            style.anchor_y,
            self.config.anchor_policy,
            profile,
            script.anchor_y_multiplier,
        );

        debug!(
            rotation_degrees = rotation_degrees as f64,
            font_size_px = font_size_px as f64,
            anchor_x,
            anchor_y,
            alternate_script,
            "Resolved watermark geometry"
        );

        Ok(ResolvedGeometry {
            font_size_px,
            rotation_degrees,
            anchor_x,
            anchor_y,
            alternate_script,
        })
    }

    /// Apply the watermark: scale the image to the device width, resolve the
    /// geometry, and draw the rotated text. Returns a new image; the
    /// request's source buffer is left untouched.
    pub fn apply(
        &self,
        request: &WatermarkRequest<'_>,
        profile: &DeviceProfile,
    ) -> Result<RgbaImage, WatermarkError> {
        if request.text.is_empty() {
            return Err(WatermarkError::InvalidInput(
                "Watermark text cannot be empty".to_string(),
            ));
        }
        if profile.width_px == 0 || profile.height_px == 0 {
            return Err(WatermarkError::InvalidInput(
                "Device profile dimensions must be non-zero".to_string(),
            ));
        }

        let mut scaled = scale_to_width(request.image, profile.width_px)?;

        let geometry = self.resolve_geometry(
            request.text,
            &request.style,
            scaled.width(),
            scaled.height(),
            profile,
        )?;

        let alpha = clamp_opacity(request.style.opacity);

        self.shaper.draw_text(
            &mut scaled,
            request.text,
            (geometry.anchor_x, geometry.anchor_y),
            geometry.font_size_px,
            geometry.rotation_degrees,
            request.style.color,
            alpha,
        )?;

        Ok(scaled)
    }
}
