//! Watermark configuration types.
//!
//! This module defines:
//! - `StyleOptions`: per-request optional style overrides with documented
//!   fallback semantics (an unset field falls back to the computed default)
//! - `EngineConfig`: engine tuning shared across requests (sizing strategy,
//!   angle and anchor policies, fit threshold, script profiles)
//!
//! The historical API exposed six near-duplicate positional overloads for the
//! same knobs; here they collapse into one options struct with `Option`
//! fields.

use serde::{Deserialize, Serialize};

use crate::constants::{
    ALTERNATE_ANCHOR_Y_MULTIPLIER, ALTERNATE_SHRINK_FRACTION, ANCHOR_Y_HEIGHT_RATIO,
    CONSTANT_ANCHOR_Y_PX, DEFAULT_FIT_THRESHOLD, DEFAULT_OPACITY, DEVANAGARI_BLOCK,
    STANDARD_SHRINK_FRACTION,
};

// Default values
fn default_color() -> Color {
    // The historical watermark red (#DA1414)
    Color::new(218, 20, 20)
}

fn default_opacity() -> i32 {
    DEFAULT_OPACITY
}

fn default_fit_threshold() -> f32 {
    DEFAULT_FIT_THRESHOLD
}

fn default_anchor_ratio() -> f32 {
    ANCHOR_Y_HEIGHT_RATIO
}

fn default_constant_anchor_y() -> i32 {
    CONSTANT_ANCHOR_Y_PX
}

fn default_anchor_multiplier() -> f32 {
    1.0
}

/// RGB color used for the glyph fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// White color.
    pub fn white() -> Self {
        Self::new(255, 255, 255)
    }

    /// Black color.
    pub fn black() -> Self {
        Self::new(0, 0, 0)
    }
}

/// Per-request style options.
///
/// Every field is optional in spirit: `font_size`, `rotation_degrees` and the
/// anchor coordinates use `None` as the "unset" sentinel and fall back to the
/// engine-computed defaults; `color` and `opacity` carry concrete defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StyleOptions {
    /// Explicit font size in abstract scaled units. When set, bypasses both
    /// sizing strategies and is converted via the device profile.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f32>,

    /// Explicit rotation in degrees, used verbatim. When unset the angle is
    /// derived from the scaled image's aspect ratio.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation_degrees: Option<f32>,

    /// Glyph fill color (default: #DA1414)
    #[serde(default = "default_color")]
    pub color: Color,

    /// Requested opacity 0-255; clamped to [5, 255] before drawing
    /// (default: 50)
    #[serde(default = "default_opacity")]
    pub opacity: i32,

    /// Explicit anchor x-coordinate in device pixels
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anchor_x: Option<i32>,

    /// Explicit anchor y-coordinate in device pixels
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anchor_y: Option<i32>,
}

impl Default for StyleOptions {
    fn default() -> Self {
        Self {
            font_size: None,
            rotation_degrees: None,
            color: default_color(),
            opacity: default_opacity(),
            anchor_x: None,
            anchor_y: None,
        }
    }
}

/// Strategy used to pick the font size when no explicit size is given.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SizingStrategy {
    /// Binary-search the largest size whose measured width fits the image
    /// diagonal, then apply the script-dependent shrink fraction
    #[default]
    FitDiagonal,

    /// Fixed sizes keyed by rotation-angle bucket. Kept for backward
    /// compatibility with the coarser historical sizing; never the silent
    /// default.
    AngleBucket,
}

/// Policy for deriving the rotation angle from the image aspect ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AnglePolicy {
    /// `atan(height / width)` in degrees, unmodified. Not clamped: very tall
    /// images legitimately yield near-90° rotation.
    #[default]
    Diagonal,

    /// The diagonal angle nudged by an empirical multiplier: x0.9 inside the
    /// "balanced" aspect-ratio band [0.45, 0.90], x1.04 outside it. A legacy
    /// revision of the placement heuristic, preserved as a selectable policy.
    Nudged,
}

/// Policy for the default anchor-y offset when no explicit anchor is given.
///
/// Two inconsistent revisions of the same heuristic exist historically; both
/// are preserved rather than guessing which is correct. The proportional form
/// is the default since it adapts to the target surface size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "kebab-case")]
pub enum AnchorPolicy {
    /// Offset proportional to device height: `y = ratio * device_height`
    Proportional {
        #[serde(default = "default_anchor_ratio")]
        ratio: f32,
    },

    /// Fixed pixel offset
    Constant {
        #[serde(default = "default_constant_anchor_y")]
        y_px: i32,
    },
}

impl Default for AnchorPolicy {
    fn default() -> Self {
        Self::Proportional {
            ratio: ANCHOR_Y_HEIGHT_RATIO,
        }
    }
}

/// Layout metrics keyed by a script classification.
///
/// Scripts whose glyph metrics differ from the default script's need a larger
/// shrink fraction and more anchor headroom. Additional scripts can be added
/// by extending `ranges` without touching the core algorithm.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptProfile {
    /// Inclusive code-point ranges that select this profile. The standard
    /// profile leaves this empty; it is the fallback.
    #[serde(default)]
    pub ranges: Vec<(u32, u32)>,

    /// Fraction removed from the fit-search result for this script
    pub shrink_fraction: f32,

    /// Multiplier applied to the default anchor-y offset for this script
    #[serde(default = "default_anchor_multiplier")]
    pub anchor_y_multiplier: f32,
}

impl ScriptProfile {
    /// Profile for the default script assumed by the standard constants.
    pub fn standard() -> Self {
        Self {
            ranges: Vec::new(),
            shrink_fraction: STANDARD_SHRINK_FRACTION,
            anchor_y_multiplier: 1.0,
        }
    }

    /// Profile for alternate-script text; defaults to the Devanagari block.
    pub fn alternate() -> Self {
        Self {
            ranges: vec![DEVANAGARI_BLOCK],
            shrink_fraction: ALTERNATE_SHRINK_FRACTION,
            anchor_y_multiplier: ALTERNATE_ANCHOR_Y_MULTIPLIER,
        }
    }
}

/// Engine tuning shared across requests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Font-size strategy when no explicit size is given (default: fit)
    #[serde(default)]
    pub sizing: SizingStrategy,

    /// Rotation-angle policy (default: plain diagonal)
    #[serde(default)]
    pub angle_policy: AnglePolicy,

    /// Default-anchor policy (default: proportional to device height)
    #[serde(default)]
    pub anchor_policy: AnchorPolicy,

    /// Bracket width at which the fit-size search stops (default: 0.5)
    #[serde(default = "default_fit_threshold")]
    pub fit_threshold: f32,

    /// Metrics for text in the default script
    #[serde(default = "ScriptProfile::standard")]
    pub standard_script: ScriptProfile,

    /// Metrics for text containing alternate-script code points
    #[serde(default = "ScriptProfile::alternate")]
    pub alternate_script: ScriptProfile,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            sizing: SizingStrategy::default(),
            angle_policy: AnglePolicy::default(),
            anchor_policy: AnchorPolicy::default(),
            fit_threshold: default_fit_threshold(),
            standard_script: ScriptProfile::standard(),
            alternate_script: ScriptProfile::alternate(),
        }
    }
}

impl ScriptProfile {
    /// Validate the script profile.
    pub fn validate(&self) -> Result<(), String> {
        if !self.shrink_fraction.is_finite() || !(0.0..1.0).contains(&self.shrink_fraction) {
            return Err(format!(
                "Script shrink fraction must be a finite value in [0.0, 1.0), got {}",
                self.shrink_fraction
            ));
        }

        if !self.anchor_y_multiplier.is_finite() || self.anchor_y_multiplier <= 0.0 {
            return Err(format!(
                "Script anchor-y multiplier must be a finite positive value, got {}",
                self.anchor_y_multiplier
            ));
        }

        for &(lo, hi) in &self.ranges {
            if lo > hi {
                return Err(format!(
                    "Script range bounds must satisfy lo <= hi, got ({:#06X}, {:#06X})",
                    lo, hi
                ));
            }
        }

        Ok(())
    }
}

impl EngineConfig {
    /// Validate the engine configuration.
    pub fn validate(&self) -> Result<(), String> {
        if !self.fit_threshold.is_finite() || self.fit_threshold <= 0.0 {
            return Err(format!(
                "Fit threshold must be a finite positive value, got {}",
                self.fit_threshold
            ));
        }

        if let AnchorPolicy::Proportional { ratio } = self.anchor_policy {
            if !ratio.is_finite() || ratio < 0.0 {
                return Err(format!(
                    "Proportional anchor ratio must be a finite non-negative value, got {}",
                    ratio
                ));
            }
        }

        self.standard_script.validate()?;
        self.alternate_script.validate()?;

        Ok(())
    }
}
