//! Suminagashi: diagonal text watermark engine for raster images.
//!
//! Overlays a rotated, semi-transparent text watermark onto an image,
//! automatically sizing and positioning the text to fit the image's diagonal
//! and aspect ratio.
//!
//! # Features
//!
//! - **Fit-size search**: binary search for the largest font size whose
//!   measured width stays under the image diagonal
//! - **Aspect-driven rotation**: text follows the principal diagonal, with a
//!   selectable legacy nudge policy
//! - **Script-aware layout**: configurable code-point ranges select an
//!   alternate shrink fraction and anchor offset
//! - **Explicit overrides**: font size, rotation, color, opacity, and anchor
//!   can each be pinned per request
//! - **Pluggable shaping**: measurement and drawing go through the
//!   `TextShaper` trait; `GlyphShaper` over an `ab_glyph` font is included
//!
//! # Example
//!
//! ```ignore
//! use suminagashi::{
//!     DeviceProfile, EngineConfig, GlyphShaper, StyleOptions, WatermarkProcessor,
//!     WatermarkRequest,
//! };
//!
//! let font_bytes = std::fs::read("DejaVuSans.ttf")?;
//! let shaper = GlyphShaper::from_font_bytes(&font_bytes)?;
//! let processor = WatermarkProcessor::new(EngineConfig::default(), shaper)?;
//!
//! let profile = DeviceProfile::new(1080, 2296, 2.75);
//! let request = WatermarkRequest {
//!     image: &photo,
//!     text: "CONFIDENTIAL",
//!     style: StyleOptions::default(),
//! };
//!
//! let watermarked = processor.apply(&request, &profile)?;
//! ```

pub mod config;
pub mod constants;
pub mod device;
pub mod error;
pub mod fit;
pub mod geometry;
pub mod processor;
pub mod scaler;
pub mod script;
pub mod shaper;

// Re-export main types for convenience
pub use config::{
    AnchorPolicy, AnglePolicy, Color, EngineConfig, ScriptProfile, SizingStrategy, StyleOptions,
};
pub use device::DeviceProfile;
pub use error::WatermarkError;
pub use fit::find_fit_size;
pub use geometry::{bucket_size_for_angle, resolve_anchor, resolve_rotation, ResolvedGeometry};
pub use processor::{clamp_opacity, WatermarkProcessor, WatermarkRequest};
pub use scaler::scale_to_width;
pub use script::contains_script;
pub use shaper::{GlyphShaper, TextShaper};
