//! End-to-end pipeline tests with a deterministic stub shaper.
//!
//! The stub uses a linear, monotone width model and draws a solid bar along
//! the (rotated) baseline, so every assertion is exact without font files.

use image::{Rgba, RgbaImage};

use suminagashi::{
    AnglePolicy, Color, DeviceProfile, EngineConfig, SizingStrategy, StyleOptions, TextShaper,
    WatermarkError, WatermarkProcessor, WatermarkRequest,
};

/// Width model: 0.6 px per character per size unit. Draw: one pixel per
/// character, stepped along the rotated baseline from the anchor.
struct BarShaper;

impl TextShaper for BarShaper {
    fn measure_width(&self, text: &str, size_px: f32) -> Result<f32, WatermarkError> {
        Ok(0.6 * size_px * text.chars().count() as f32)
    }

    fn draw_text(
        &self,
        target: &mut RgbaImage,
        text: &str,
        anchor: (i32, i32),
        size_px: f32,
        rotation_degrees: f32,
        color: Color,
        alpha: u8,
    ) -> Result<(), WatermarkError> {
        let radians = rotation_degrees.to_radians();
        let (sin, cos) = radians.sin_cos();
        let step = 0.6 * size_px;

        for (i, _) in text.chars().enumerate() {
            let along = step * i as f32;
            let x = anchor.0 as f32 + along * cos;
            let y = anchor.1 as f32 + along * sin;
            if x >= 0.0 && y >= 0.0 && (x as u32) < target.width() && (y as u32) < target.height()
            {
                target.put_pixel(x as u32, y as u32, Rgba([color.r, color.g, color.b, alpha]));
            }
        }
        Ok(())
    }
}

fn sample_image() -> RgbaImage {
    RgbaImage::from_pixel(1000, 500, Rgba([32, 32, 32, 255]))
}

fn device() -> DeviceProfile {
    DeviceProfile::new(800, 2296, 1.0)
}

#[test]
fn default_request_scales_sizes_and_places() {
    let processor = WatermarkProcessor::with_defaults(BarShaper);
    let image = sample_image();
    let request = WatermarkRequest {
        image: &image,
        text: "SAMPLE",
        style: StyleOptions::default(),
    };

    let output = processor.apply(&request, &device()).unwrap();

    // Scaled to device width, aspect preserved
    assert_eq!(output.width(), 800);
    assert_eq!(output.height(), 400);

    // Geometry: angle = atan(400/800) ~ 26.57 degrees, anchor (0, 100)
    let geometry = processor
        .resolve_geometry("SAMPLE", &StyleOptions::default(), 800, 400, &device())
        .unwrap();
    assert!((geometry.rotation_degrees - 26.565).abs() < 1e-3);
    assert_eq!((geometry.anchor_x, geometry.anchor_y), (0, 100));

    // Size stays under the diagonal budget
    let diagonal = (800.0f32 * 800.0 + 400.0 * 400.0).sqrt();
    let width = BarShaper
        .measure_width("SAMPLE", geometry.font_size_px)
        .unwrap();
    assert!(width < diagonal);

    // The draw landed: the anchor pixel carries the default red at the
    // default opacity
    let marked = output.get_pixel(0, 100);
    assert_eq!((marked[0], marked[1], marked[2]), (218, 20, 20));
    assert_eq!(marked[3], 50);

    // And the last character stays inside the image despite the rotation
    let changed = output
        .enumerate_pixels()
        .filter(|(_, _, p)| **p != Rgba([32, 32, 32, 255]))
        .count();
    assert_eq!(changed, "SAMPLE".chars().count());
}

#[test]
fn full_overrides_bypass_every_computation() {
    let processor = WatermarkProcessor::with_defaults(BarShaper);
    let style = StyleOptions {
        font_size: Some(40.0),
        rotation_degrees: Some(0.0),
        color: Color::white(),
        opacity: 200,
        anchor_x: Some(10),
        anchor_y: Some(20),
    };

    let geometry = processor
        .resolve_geometry("SAMPLE", &style, 800, 400, &device())
        .unwrap();
    assert_eq!(geometry.font_size_px, 40.0);
    assert_eq!(geometry.rotation_degrees, 0.0);
    assert_eq!((geometry.anchor_x, geometry.anchor_y), (10, 20));

    let image = sample_image();
    let request = WatermarkRequest {
        image: &image,
        text: "SAMPLE",
        style,
    };
    let output = processor.apply(&request, &device()).unwrap();

    // Unrotated bar: pixels run horizontally from the anchor
    let first = output.get_pixel(10, 20);
    assert_eq!((first[0], first[3]), (255, 200));
    let second = output.get_pixel(10 + 24, 20); // step = 0.6 * 40
    assert_eq!((second[0], second[3]), (255, 200));
}

#[test]
fn legacy_policies_compose() {
    let config = EngineConfig {
        sizing: SizingStrategy::AngleBucket,
        angle_policy: AnglePolicy::Nudged,
        ..EngineConfig::default()
    };
    let processor = WatermarkProcessor::new(config, BarShaper).unwrap();

    // 800x400: aspect ratio 0.5 is inside the balanced band, so the angle
    // is nudged down, and the bucket table keys off the nudged angle
    let geometry = processor
        .resolve_geometry("SAMPLE", &StyleOptions::default(), 800, 400, &device())
        .unwrap();
    assert!((geometry.rotation_degrees - 26.565 * 0.9).abs() < 1e-3);
    assert_eq!(geometry.font_size_px, 68.0);
}

#[test]
fn alternate_script_selects_other_profile() {
    let processor = WatermarkProcessor::with_defaults(BarShaper);

    let geometry = processor
        .resolve_geometry("नमस्ते", &StyleOptions::default(), 800, 400, &device())
        .unwrap();
    assert!(geometry.alternate_script);
    assert_eq!(geometry.anchor_y, 200);
}

#[test]
fn measurement_failure_surfaces_without_partial_output() {
    struct Failing;
    impl TextShaper for Failing {
        fn measure_width(&self, _: &str, _: f32) -> Result<f32, WatermarkError> {
            Err(WatermarkError::Measurement("metrics unavailable".to_string()))
        }
        fn draw_text(
            &self,
            _: &mut RgbaImage,
            _: &str,
            _: (i32, i32),
            _: f32,
            _: f32,
            _: Color,
            _: u8,
        ) -> Result<(), WatermarkError> {
            Ok(())
        }
    }

    let processor = WatermarkProcessor::with_defaults(Failing);
    let image = sample_image();
    let request = WatermarkRequest {
        image: &image,
        text: "SAMPLE",
        style: StyleOptions::default(),
    };

    let err = processor.apply(&request, &device()).unwrap_err();
    assert!(matches!(err, WatermarkError::Measurement(_)));
}
