//! Text measurement and rotated drawing.
//!
//! `TextShaper` is the seam between the geometry engine and the platform
//! text-layout stack: the fit-size search only needs width measurement, and
//! the processor only needs a single rotated draw call. `GlyphShaper` is the
//! default implementation over an `ab_glyph` font supplied by the caller.
//!
//! Rotation is a local transform: the glyphs are rasterized into a transparent
//! staging buffer in text-layout space, then blended onto the target through
//! an inverse-mapped bilinear rotation about the anchor. The target surface's
//! coordinate frame is never altered, so later draws on the same buffer are
//! unaffected.

use ab_glyph::{Font, FontRef, PxScale, ScaleFont};
use image::{Rgba, RgbaImage};

use crate::config::Color;
use crate::error::WatermarkError;

/// Measurement and drawing collaborator for watermark text.
///
/// `measure_width` must be non-decreasing in `size_px` for a fixed `text`;
/// the fit-size search relies on that monotonicity.
pub trait TextShaper {
    /// Width in pixels of `text` laid out at `size_px`.
    fn measure_width(&self, text: &str, size_px: f32) -> Result<f32, WatermarkError>;

    /// Draw `text` onto `target` with its baseline origin at `anchor`,
    /// rotated clockwise by `rotation_degrees` about the anchor.
    fn draw_text(
        &self,
        target: &mut RgbaImage,
        text: &str,
        anchor: (i32, i32),
        size_px: f32,
        rotation_degrees: f32,
        color: Color,
        alpha: u8,
    ) -> Result<(), WatermarkError>;
}

/// Default shaper over an `ab_glyph` font.
///
/// The caller supplies the font bytes; no font is embedded, since the font
/// determines which scripts render at all and is a deployment concern.
#[derive(Debug)]
pub struct GlyphShaper<'a> {
    font: FontRef<'a>,
}

impl<'a> GlyphShaper<'a> {
    /// Build a shaper from raw TTF/OTF font bytes.
    pub fn from_font_bytes(data: &'a [u8]) -> Result<Self, WatermarkError> {
        let font = FontRef::try_from_slice(data)
            .map_err(|e| WatermarkError::Measurement(format!("Failed to load font: {}", e)))?;
        Ok(Self { font })
    }

    /// Rasterize `text` into a transparent staging buffer with the baseline
    /// at `ascent`. Returns the buffer and the ascent used.
    fn rasterize(
        &self,
        text: &str,
        size_px: f32,
        color: Color,
        alpha: u8,
    ) -> Result<(RgbaImage, f32), WatermarkError> {
        let scale = PxScale::from(size_px);
        let scaled_font = self.font.as_scaled(scale);

        let width = self.measure_width(text, size_px)?;
        let height = scaled_font.height();
        let ascent = scaled_font.ascent();

        let canvas_width = (width.ceil() as u32).max(1);
        let canvas_height = (height.ceil() as u32).max(1);
        let mut staging = RgbaImage::new(canvas_width, canvas_height);

        let mut cursor_x = 0.0f32;
        let mut prev_glyph: Option<ab_glyph::GlyphId> = None;

        for c in text.chars() {
            let glyph_id = scaled_font.glyph_id(c);

            if let Some(prev) = prev_glyph {
                cursor_x += scaled_font.kern(prev, glyph_id);
            }

            let glyph = glyph_id.with_scale_and_position(scale, ab_glyph::point(cursor_x, ascent));

            if let Some(outlined) = self.font.outline_glyph(glyph) {
                let bounds = outlined.px_bounds();

                outlined.draw(|px, py, coverage| {
                    let x = px as i32 + bounds.min.x as i32;
                    let y = py as i32 + bounds.min.y as i32;

                    if x >= 0 && y >= 0 && x < canvas_width as i32 && y < canvas_height as i32 {
                        let pixel_alpha = (coverage * alpha as f32) as u8;
                        let pixel = Rgba([color.r, color.g, color.b, pixel_alpha]);

                        // Blend with existing pixel (for anti-aliasing)
                        let existing = staging.get_pixel(x as u32, y as u32);
                        let blended = blend_pixels(*existing, pixel);
                        staging.put_pixel(x as u32, y as u32, blended);
                    }
                });
            }

            cursor_x += scaled_font.h_advance(glyph_id);
            prev_glyph = Some(glyph_id);
        }

        Ok((staging, ascent))
    }
}

impl TextShaper for GlyphShaper<'_> {
    fn measure_width(&self, text: &str, size_px: f32) -> Result<f32, WatermarkError> {
        let scale = PxScale::from(size_px);
        let scaled_font = self.font.as_scaled(scale);

        let mut width = 0.0f32;
        let mut prev_glyph: Option<ab_glyph::GlyphId> = None;

        for c in text.chars() {
            let glyph_id = scaled_font.glyph_id(c);

            if let Some(prev) = prev_glyph {
                width += scaled_font.kern(prev, glyph_id);
            }

            width += scaled_font.h_advance(glyph_id);
            prev_glyph = Some(glyph_id);
        }

        Ok(width)
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
        if text.is_empty() {
            return Err(WatermarkError::Render("Cannot draw empty text".to_string()));
        }

        let (staging, ascent) = self.rasterize(text, size_px, color, alpha)?;
        composite_rotated(target, &staging, anchor, ascent, rotation_degrees);
        Ok(())
    }
}

/// Blend a staging buffer onto `target`, rotated clockwise by `degrees`
/// about `anchor`. In the unrotated frame the staging buffer's baseline row
/// (`ascent` pixels below its top edge) starts at the anchor.
///
/// Each target pixel in the rotated bounding region is inverse-mapped into
/// staging space and sampled bilinearly, so the rotation leaves no holes.
fn composite_rotated(
    target: &mut RgbaImage,
    staging: &RgbaImage,
    anchor: (i32, i32),
    ascent: f32,
    degrees: f32,
) {
    let radians = degrees.to_radians();
    let cos = radians.cos();
    let sin = radians.sin();

    let ax = anchor.0 as f32;
    let ay = anchor.1 as f32;
    let stage_w = staging.width() as f32;
    let stage_h = staging.height() as f32;

    // Staging-rect corners as offsets from the anchor in the unrotated frame
    let corners = [
        (0.0, -ascent),
        (stage_w, -ascent),
        (0.0, stage_h - ascent),
        (stage_w, stage_h - ascent),
    ];

    // Forward-rotate (y-down frame, clockwise) to find the region to scan
    let mut min_x = f32::INFINITY;
    let mut max_x = f32::NEG_INFINITY;
    let mut min_y = f32::INFINITY;
    let mut max_y = f32::NEG_INFINITY;
    for (dx, dy) in corners {
        let rx = ax + dx * cos - dy * sin;
        let ry = ay + dx * sin + dy * cos;
        min_x = min_x.min(rx);
        max_x = max_x.max(rx);
        min_y = min_y.min(ry);
        max_y = max_y.max(ry);
    }

    let x_start = (min_x.floor() as i64).max(0) as u32;
    let y_start = (min_y.floor() as i64).max(0) as u32;
    let x_end = ((max_x.ceil() as i64).max(0) as u32).min(target.width());
    let y_end = ((max_y.ceil() as i64).max(0) as u32).min(target.height());

    for ty in y_start..y_end {
        for tx in x_start..x_end {
            // Inverse rotation back into the unrotated frame
            let rx = tx as f32 - ax;
            let ry = ty as f32 - ay;
            let dx = rx * cos + ry * sin;
            let dy = -rx * sin + ry * cos;

            // Staging coordinates: baseline row sits `ascent` below the top
            let sx = dx;
            let sy = dy + ascent;

            if sx >= 0.0 && sx < stage_w - 1.0 && sy >= 0.0 && sy < stage_h - 1.0 {
                let sample = sample_bilinear(staging, sx, sy);
                if sample[3] == 0 {
                    continue;
                }

                let existing = target.get_pixel(tx, ty);
                let blended = blend_pixels(*existing, sample);
                target.put_pixel(tx, ty, blended);
            }
        }
    }
}

/// Bilinear sample of an RGBA image at fractional coordinates.
fn sample_bilinear(image: &RgbaImage, sx: f32, sy: f32) -> Rgba<u8> {
    let x0 = sx.floor() as u32;
    let y0 = sy.floor() as u32;
    let x1 = x0 + 1;
    let y1 = y0 + 1;

    let fx = sx - x0 as f32;
    let fy = sy - y0 as f32;

    let p00 = image.get_pixel(x0, y0);
    let p10 = image.get_pixel(x1, y0);
    let p01 = image.get_pixel(x0, y1);
    let p11 = image.get_pixel(x1, y1);

    let interpolate = |c: usize| -> u8 {
        let v = p00[c] as f32 * (1.0 - fx) * (1.0 - fy)
            + p10[c] as f32 * fx * (1.0 - fy)
            + p01[c] as f32 * (1.0 - fx) * fy
            + p11[c] as f32 * fx * fy;
        v.clamp(0.0, 255.0) as u8
    };

    Rgba([
        interpolate(0),
        interpolate(1),
        interpolate(2),
        interpolate(3),
    ])
}

/// Blend two RGBA pixels with the Porter-Duff "over" operator.
fn blend_pixels(bottom: Rgba<u8>, top: Rgba<u8>) -> Rgba<u8> {
    let top_alpha = top[3] as f32 / 255.0;
    let bottom_alpha = bottom[3] as f32 / 255.0;

    let out_alpha = top_alpha + bottom_alpha * (1.0 - top_alpha);

    if out_alpha < 0.001 {
        return Rgba([0, 0, 0, 0]);
    }

    let blend = |t: u8, b: u8| -> u8 {
        let t = t as f32 / 255.0;
        let b = b as f32 / 255.0;
        let result = (t * top_alpha + b * bottom_alpha * (1.0 - top_alpha)) / out_alpha;
        (result * 255.0) as u8
    };

    Rgba([
        blend(top[0], bottom[0]),
        blend(top[1], bottom[1]),
        blend(top[2], bottom[2]),
        (out_alpha * 255.0) as u8,
    ])
}
