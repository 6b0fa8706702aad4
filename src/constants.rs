// Constants module - centralized tuned defaults for the watermark engine
//
// This module defines the empirical constants used throughout the codebase.
// Using named constants instead of magic numbers improves maintainability
// and makes it easier to understand and modify defaults.

// =============================================================================
// Fit-size search
// =============================================================================

/// Smallest candidate font size considered by the fit-size search, in pixels
pub const FIT_SIZE_LOWER_BOUND: f32 = 2.0;

/// Default bracket width at which the fit-size search stops
pub const DEFAULT_FIT_THRESHOLD: f32 = 0.5;

// =============================================================================
// Script-dependent shrink fractions
// =============================================================================

/// Fraction removed from the fitted size for standard-script text.
/// Compensates for advance-width metrics running wide with proportional fonts.
pub const STANDARD_SHRINK_FRACTION: f32 = 0.11;

/// Fraction removed from the fitted size for alternate-script text
pub const ALTERNATE_SHRINK_FRACTION: f32 = 0.15;

/// Devanagari Unicode block, the default alternate-script range (inclusive)
pub const DEVANAGARI_BLOCK: (u32, u32) = (0x0900, 0x097F);

// =============================================================================
// Rotation angle nudge (legacy policy)
// =============================================================================

/// Lower bound of the aspect-ratio band treated as visually "balanced"
pub const NUDGE_ASPECT_RATIO_MIN: f32 = 0.45;

/// Upper bound of the aspect-ratio band treated as visually "balanced"
pub const NUDGE_ASPECT_RATIO_MAX: f32 = 0.90;

/// Angle multiplier for aspect ratios inside the balanced band
pub const NUDGE_MULTIPLIER_INSIDE: f32 = 0.9;

/// Angle multiplier for aspect ratios outside the balanced band
pub const NUDGE_MULTIPLIER_OUTSIDE: f32 = 1.04;

// =============================================================================
// Angle-bucket sizing (legacy strategy)
// =============================================================================

/// Angle buckets mapped to fixed sizes in scaled units.
/// The first bound is exclusive (`> 49`); the rest are inclusive lower
/// bounds, matching the historical table.
pub const ANGLE_SIZE_BUCKETS: [(f32, f32); 4] =
    [(49.0, 110.0), (44.0, 94.0), (38.0, 86.0), (35.0, 78.0)];

/// Size in scaled units for angles below every bucket bound
pub const ANGLE_BUCKET_FLOOR_SIZE: f32 = 68.0;

// =============================================================================
// Anchor defaults
// =============================================================================

/// Default anchor-y offset as a fraction of device height
pub const ANCHOR_Y_HEIGHT_RATIO: f32 = 100.0 / 2296.0;

/// Default anchor-y offset in pixels for the constant anchor policy
pub const CONSTANT_ANCHOR_Y_PX: i32 = 60;

/// Multiplier applied to the default anchor-y offset for alternate-script
/// text, which needs more headroom above the baseline
pub const ALTERNATE_ANCHOR_Y_MULTIPLIER: f32 = 2.0;

// =============================================================================
// Opacity
// =============================================================================

/// Lowest accepted opacity; requests at or below zero are raised here so the
/// watermark never silently disappears
pub const MIN_OPACITY: i32 = 5;

/// Highest accepted opacity (fully visible)
pub const MAX_OPACITY: i32 = 255;

/// Default opacity when the request leaves it unset
pub const DEFAULT_OPACITY: i32 = 50;
