//! Image scaling to the target surface width.
//!
//! The source image is rescaled so its width equals the device width, with
//! the height following the source aspect ratio. Nearest-neighbor resampling
//! is used: the output is immediately drawn over, so resample quality is not
//! critical.

use std::num::NonZeroU32;

use fast_image_resize::{Image, PixelType, ResizeAlg, Resizer};
use image::RgbaImage;

use crate::error::WatermarkError;

/// Scale an image so its width equals `target_width`, preserving aspect
/// ratio to rounding.
///
/// Always allocates a new buffer; the source image is never mutated.
///
/// # Errors
///
/// `InvalidInput` if the source image or the target width has a zero
/// dimension; `Render` if the resize backend rejects the buffers.
pub fn scale_to_width(src: &RgbaImage, target_width: u32) -> Result<RgbaImage, WatermarkError> {
    let src_w = src.width();
    let src_h = src.height();

    let src_width = NonZeroU32::new(src_w)
        .ok_or_else(|| WatermarkError::InvalidInput("Source image width is 0".to_string()))?;
    let src_height = NonZeroU32::new(src_h)
        .ok_or_else(|| WatermarkError::InvalidInput("Source image height is 0".to_string()))?;
    let dst_width = NonZeroU32::new(target_width)
        .ok_or_else(|| WatermarkError::InvalidInput("Target width is 0".to_string()))?;

    let new_height = ((src_h as f64 * target_width as f64 / src_w as f64).round() as u32).max(1);
    let dst_height = NonZeroU32::new(new_height)
        .ok_or_else(|| WatermarkError::Render("Scaled height is 0".to_string()))?;

    let src_image = Image::from_vec_u8(src_width, src_height, src.as_raw().clone(), PixelType::U8x4)
        .map_err(|e| WatermarkError::Render(format!("Failed to create resize source: {:?}", e)))?;

    let mut dst_image = Image::new(dst_width, dst_height, PixelType::U8x4);

    let mut resizer = Resizer::new(ResizeAlg::Nearest);
    resizer
        .resize(&src_image.view(), &mut dst_image.view_mut())
        .map_err(|e| WatermarkError::Render(format!("Resize operation failed: {:?}", e)))?;

    RgbaImage::from_raw(target_width, new_height, dst_image.into_vec())
        .ok_or_else(|| WatermarkError::Render("Failed to create scaled image buffer".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn solid_image(width: u32, height: u32, color: Rgba<u8>) -> RgbaImage {
        RgbaImage::from_pixel(width, height, color)
    }

    // Test: width matches target, height follows aspect ratio
    #[test]
    fn test_scale_down_preserves_aspect_ratio() {
        let src = solid_image(1000, 500, Rgba([10, 20, 30, 255]));
        let scaled = scale_to_width(&src, 400).unwrap();

        assert_eq!(scaled.width(), 400);
        assert_eq!(scaled.height(), 200);
    }

    #[test]
    fn test_scale_up_preserves_aspect_ratio() {
        let src = solid_image(100, 75, Rgba([0, 0, 0, 255]));
        let scaled = scale_to_width(&src, 400).unwrap();

        assert_eq!(scaled.width(), 400);
        assert_eq!(scaled.height(), 300);
    }

    #[test]
    fn test_scale_rounding_within_one_pixel() {
        let src = solid_image(1001, 500, Rgba([0, 0, 0, 255]));
        let scaled = scale_to_width(&src, 720).unwrap();

        let src_ratio = 500.0 / 1001.0;
        let out_ratio = scaled.height() as f64 / scaled.width() as f64;
        assert!((out_ratio - src_ratio).abs() * (scaled.width() as f64) < 1.0);
    }

    #[test]
    fn test_scale_preserves_pixel_content() {
        let src = solid_image(200, 100, Rgba([7, 77, 177, 255]));
        let scaled = scale_to_width(&src, 50).unwrap();

        assert_eq!(*scaled.get_pixel(25, 12), Rgba([7, 77, 177, 255]));
    }

    #[test]
    fn test_scale_does_not_mutate_source() {
        let src = solid_image(100, 100, Rgba([1, 2, 3, 255]));
        let before = src.clone();
        let _ = scale_to_width(&src, 64).unwrap();
        assert_eq!(src, before);
    }

    // Test: zero dimensions rejected
    #[test]
    fn test_zero_source_width_rejected() {
        let src = RgbaImage::new(0, 10);
        let err = scale_to_width(&src, 100).unwrap_err();
        assert!(matches!(err, WatermarkError::InvalidInput(_)));
    }

    #[test]
    fn test_zero_target_width_rejected() {
        let src = solid_image(10, 10, Rgba([0, 0, 0, 255]));
        let err = scale_to_width(&src, 0).unwrap_err();
        assert!(matches!(err, WatermarkError::InvalidInput(_)));
    }

    #[test]
    fn test_very_wide_image_height_floor() {
        // A 1000x1 strip scaled to width 10 would round to height 0;
        // the scaler floors it at 1.
        let src = solid_image(1000, 1, Rgba([0, 0, 0, 255]));
        let scaled = scale_to_width(&src, 10).unwrap();
        assert_eq!(scaled.height(), 1);
    }
}
