//! Fit-size search: the largest font size whose measured text width stays
//! under the image diagonal.
//!
//! Binary search over the size bracket `[2, diagonal]`. The upper bound is
//! the diagonal itself, which is always too large in practice (one glyph at
//! that size already overshoots). The search keeps the invariant that `lo`
//! measures under the budget and `hi` at or over it, and stops once the
//! bracket narrows to the threshold. The lower end is returned deliberately:
//! undershooting wastes at most half a size unit, overshooting would clip the
//! text at the image corner.

use crate::constants::FIT_SIZE_LOWER_BOUND;
use crate::error::WatermarkError;
use crate::shaper::TextShaper;

/// Find the largest font size such that `shaper.measure_width(text, size)`
/// stays below `diagonal_px`.
///
/// The measurement must be non-decreasing in size for a fixed text; any
/// shaper violating that breaks the bracket invariant.
///
/// # Arguments
///
/// * `shaper` - Measurement collaborator
/// * `text` - Text to fit
/// * `diagonal_px` - Width budget in pixels
/// * `threshold` - Bracket width at which the search stops
///
/// # Errors
///
/// Propagates `Measurement` failures from the shaper immediately.
pub fn find_fit_size<S: TextShaper + ?Sized>(
    shaper: &S,
    text: &str,
    diagonal_px: f32,
    threshold: f32,
) -> Result<f32, WatermarkError> {
    let mut hi = diagonal_px;
    let mut lo = FIT_SIZE_LOWER_BOUND;

    while (hi - lo) > threshold {
        let size = (hi + lo) / 2.0;
        if shaper.measure_width(text, size)? >= diagonal_px {
            hi = size; // too big
        } else {
            lo = size; // too small
        }
    }

    // Use lo so that we undershoot rather than overshoot
    Ok(lo)
}
