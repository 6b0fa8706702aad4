//! Watermark geometry resolution.
//!
//! Computes the rotation angle from the scaled image's aspect ratio, the
//! anchor point from the device profile, and the legacy angle-bucket size
//! table. Explicit overrides always win over computed defaults.

use crate::config::{AnchorPolicy, AnglePolicy};
use crate::constants::{
    ANGLE_BUCKET_FLOOR_SIZE, ANGLE_SIZE_BUCKETS, NUDGE_ASPECT_RATIO_MAX, NUDGE_ASPECT_RATIO_MIN,
    NUDGE_MULTIPLIER_INSIDE, NUDGE_MULTIPLIER_OUTSIDE,
};
use crate::device::DeviceProfile;

/// Geometry resolved for a single watermark draw. Computed per request,
/// never persisted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedGeometry {
    /// Final font size in device pixels
    pub font_size_px: f32,
    /// Rotation about the anchor in degrees, clockwise
    pub rotation_degrees: f32,
    /// Anchor x-coordinate in device pixels
    pub anchor_x: i32,
    /// Anchor y-coordinate in device pixels
    pub anchor_y: i32,
    /// Whether the text classified as alternate-script
    pub alternate_script: bool,
}

/// Resolve the rotation angle for an image of the given dimensions.
///
/// An explicit override is used verbatim. Otherwise the angle is
/// `atan(height / width)` in degrees, pointing the text along the principal
/// diagonal; the legacy policy additionally nudges it by an empirical
/// multiplier keyed on the aspect-ratio band.
///
/// The angle is not clamped: very tall images yield near-90° rotation,
/// which is the expected diagonal for those shapes.
pub fn resolve_rotation(
    width: u32,
    height: u32,
    override_degrees: Option<f32>,
    policy: AnglePolicy,
) -> f32 {
    if let Some(degrees) = override_degrees {
        return degrees;
    }

    let aspect_ratio = height as f32 / width as f32;
    let angle = aspect_ratio.atan().to_degrees();

    match policy {
        AnglePolicy::Diagonal => angle,
        AnglePolicy::Nudged => {
            if (NUDGE_ASPECT_RATIO_MIN..=NUDGE_ASPECT_RATIO_MAX).contains(&aspect_ratio) {
                angle * NUDGE_MULTIPLIER_INSIDE
            } else {
                angle * NUDGE_MULTIPLIER_OUTSIDE
            }
        }
    }
}

/// Resolve the anchor point for the watermark baseline.
///
/// Explicit coordinates are used verbatim. Otherwise x defaults to the left
/// edge and y to the policy's offset, scaled by the script profile's
/// multiplier (alternate scripts need more headroom above the baseline).
pub fn resolve_anchor(
    override_x: Option<i32>,
    override_y: Option<i32>,
    policy: AnchorPolicy,
    profile: &DeviceProfile,
    anchor_y_multiplier: f32,
) -> (i32, i32) {
    let x = override_x.unwrap_or(0);
    let y = override_y.unwrap_or_else(|| {
        let base = match policy {
            AnchorPolicy::Proportional { ratio } => ratio * profile.height_px as f32,
            AnchorPolicy::Constant { y_px } => y_px as f32,
        };
        (base * anchor_y_multiplier) as i32
    });

    (x, y)
}

/// Legacy fixed font size (in scaled units) for a rotation angle.
///
/// The historical coarse sizing table: steeper diagonals get larger text.
/// The first bucket bound is exclusive, the remaining lower bounds are
/// inclusive.
pub fn bucket_size_for_angle(angle_degrees: f32) -> f32 {
    if angle_degrees > ANGLE_SIZE_BUCKETS[0].0 {
        return ANGLE_SIZE_BUCKETS[0].1;
    }

    for &(bound, size) in &ANGLE_SIZE_BUCKETS[1..] {
        if angle_degrees >= bound {
            return size;
        }
    }

    ANGLE_BUCKET_FLOOR_SIZE
}
