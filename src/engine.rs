//! Reference in-memory raster engine.
//!
//! Implements the [`RasterEngine`] and [`FontMetrics`] contracts on top of
//! plain `image::RgbaImage` buffers — no codecs, no filesystem, no system
//! dependencies.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Resample | `image::imageops::resize` with `Lanczos3` |
//! | Crop | `image::imageops::crop_imm` |
//! | Compositing | integer source-over blend |
//! | Glyphs | `font8x8` bitmap faces, nearest-neighbor scaled |
//!
//! Glyph rendering is deliberately simple: the single built-in 8×8 face is
//! scaled in whole multiples of its base grid, and the font path in a draw
//! request is ignored. Hosts that need real typefaces implement
//! [`FontMetrics`]/[`RasterEngine`] over their own text stack; the layout
//! math upstream only ever sees extents.

use crate::raster::{
    Background, Canvas, FontMetrics, RasterEngine, RasterError, RasterResult, Rgba, TextDraw,
    TextExtents, ToneFilter,
};
use crate::geometry::{Dimensions, Rect};
use font8x8::{BASIC_FONTS, UnicodeFonts};
use image::imageops::{self, FilterType};
use image::RgbaImage;
use std::path::Path;

/// In-memory canvas: a straight-alpha RGBA8 buffer.
pub struct MemoryCanvas {
    image: RgbaImage,
}

impl MemoryCanvas {
    /// Wrap a decoded buffer (the hand-off point from the host's source
    /// loader).
    pub fn from_image(image: RgbaImage) -> Self {
        Self { image }
    }

    pub fn as_image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }
}

impl Canvas for MemoryCanvas {
    fn width(&self) -> u32 {
        self.image.width()
    }

    fn height(&self) -> u32 {
        self.image.height()
    }
}

/// Reference engine over [`MemoryCanvas`] buffers.
#[derive(Default)]
pub struct MemoryEngine;

impl MemoryEngine {
    pub fn new() -> Self {
        Self
    }
}

fn to_pixel(color: Rgba) -> image::Rgba<u8> {
    image::Rgba([color.r, color.g, color.b, color.a])
}

fn from_pixel(pixel: image::Rgba<u8>) -> Rgba {
    Rgba {
        r: pixel[0],
        g: pixel[1],
        b: pixel[2],
        a: pixel[3],
    }
}

/// Straight-alpha source-over blend.
fn over(dst: Rgba, src: Rgba) -> Rgba {
    match src.a {
        255 => src,
        0 => dst,
        _ => {
            let sa = u32::from(src.a);
            let da = u32::from(dst.a);
            let inv = 255 - sa;
            let out_a = sa + da * inv / 255;
            if out_a == 0 {
                return Rgba::TRANSPARENT;
            }
            let channel = |s: u8, d: u8| {
                let contrib = u32::from(s) * sa + u32::from(d) * da * inv / 255;
                ((contrib + out_a / 2) / out_a) as u8
            };
            Rgba {
                r: channel(src.r, dst.r),
                g: channel(src.g, dst.g),
                b: channel(src.b, dst.b),
                a: out_a as u8,
            }
        }
    }
}

fn blend_pixel(image: &mut RgbaImage, x: i64, y: i64, color: Rgba) {
    if x < 0 || y < 0 || x >= i64::from(image.width()) || y >= i64::from(image.height()) {
        return;
    }
    let (x, y) = (x as u32, y as u32);
    let blended = over(from_pixel(*image.get_pixel(x, y)), color);
    image.put_pixel(x, y, to_pixel(blended));
}

/// Clamp a signed rect to the canvas, returning unsigned bounds.
fn clamp_rect(rect: Rect, width: u32, height: u32) -> Option<(u32, u32, u32, u32)> {
    let x0 = rect.x.clamp(0, i64::from(width)) as u32;
    let y0 = rect.y.clamp(0, i64::from(height)) as u32;
    let x1 = (rect.x + i64::from(rect.width)).clamp(0, i64::from(width)) as u32;
    let y1 = (rect.y + i64::from(rect.height)).clamp(0, i64::from(height)) as u32;
    if x1 <= x0 || y1 <= y0 {
        return None;
    }
    Some((x0, y0, x1 - x0, y1 - y0))
}

/// Whole-multiple scale factor for the 8×8 glyph grid at a point size.
fn glyph_scale(size: f64) -> u32 {
    ((size / 8.0).round() as i64).max(1) as u32
}

/// Rotate an offset from the baseline origin by `rotation` degrees
/// counter-clockwise (screen coordinates, y down).
fn rotate_offset(ox: f64, oy: f64, rotation: f64) -> (f64, f64) {
    if rotation == 0.0 {
        return (ox, oy);
    }
    let theta = rotation.to_radians();
    let (sin, cos) = theta.sin_cos();
    (ox * cos + oy * sin, -ox * sin + oy * cos)
}

impl FontMetrics for MemoryEngine {
    fn measure_text(
        &self,
        _font: &Path,
        size: f64,
        rotation: f64,
        text: &str,
    ) -> RasterResult<TextExtents> {
        let glyph_px = i64::from(glyph_scale(size)) * 8;
        let width = glyph_px * text.chars().count() as i64;

        // Unrotated corners relative to the baseline origin: the whole ink
        // sits above the baseline (the 8x8 face has no descender row).
        let corners = [
            (0, 0),
            (width, 0),
            (width, -glyph_px),
            (0, -glyph_px),
        ];

        let mut values = [0i64; 8];
        for (i, (cx, cy)) in corners.iter().enumerate() {
            let (rx, ry) = rotate_offset(*cx as f64, *cy as f64, rotation);
            values[i * 2] = rx.round() as i64;
            values[i * 2 + 1] = ry.round() as i64;
        }
        Ok(TextExtents(values))
    }
}

impl RasterEngine for MemoryEngine {
    type Canvas = MemoryCanvas;

    fn create_canvas(
        &self,
        size: Dimensions,
        background: Background,
    ) -> RasterResult<Self::Canvas> {
        if size.width == 0 || size.height == 0 {
            return Err(RasterError::OperationFailed(format!(
                "cannot allocate a {}x{} canvas",
                size.width, size.height
            )));
        }
        let fill = match background {
            Background::Transparent => image::Rgba([0, 0, 0, 0]),
            Background::Solid(rgb) => image::Rgba([rgb.r, rgb.g, rgb.b, 255]),
        };
        Ok(MemoryCanvas {
            image: RgbaImage::from_pixel(size.width, size.height, fill),
        })
    }

    fn resample(
        &self,
        dst: &mut Self::Canvas,
        src: &Self::Canvas,
        dst_rect: Rect,
        src_rect: Rect,
    ) -> RasterResult<()> {
        let Some((sx, sy, sw, sh)) = clamp_rect(src_rect, src.width(), src.height()) else {
            return Ok(());
        };
        if dst_rect.width == 0 || dst_rect.height == 0 {
            return Ok(());
        }

        let cropped = imageops::crop_imm(&src.image, sx, sy, sw, sh).to_image();
        let scaled = if (sw, sh) == (dst_rect.width, dst_rect.height) {
            cropped
        } else {
            imageops::resize(&cropped, dst_rect.width, dst_rect.height, FilterType::Lanczos3)
        };

        for (px, py, pixel) in scaled.enumerate_pixels() {
            let tx = dst_rect.x + i64::from(px);
            let ty = dst_rect.y + i64::from(py);
            if tx < 0 || ty < 0 {
                continue;
            }
            let (tx, ty) = (tx as u32, ty as u32);
            if tx < dst.width() && ty < dst.height() {
                dst.image.put_pixel(tx, ty, *pixel);
            }
        }
        Ok(())
    }

    fn blit(&self, dst: &mut Self::Canvas, src: &Self::Canvas, x: i64, y: i64) -> RasterResult<()> {
        for (px, py, pixel) in src.image.enumerate_pixels() {
            blend_pixel(
                &mut dst.image,
                x + i64::from(px),
                y + i64::from(py),
                from_pixel(*pixel),
            );
        }
        Ok(())
    }

    fn get_pixel(&self, canvas: &Self::Canvas, x: u32, y: u32) -> RasterResult<Rgba> {
        if x >= canvas.width() || y >= canvas.height() {
            return Err(RasterError::OutOfBounds {
                x,
                y,
                width: canvas.width(),
                height: canvas.height(),
            });
        }
        Ok(from_pixel(*canvas.image.get_pixel(x, y)))
    }

    fn set_pixel(
        &self,
        canvas: &mut Self::Canvas,
        x: u32,
        y: u32,
        color: Rgba,
    ) -> RasterResult<()> {
        if x < canvas.width() && y < canvas.height() {
            canvas.image.put_pixel(x, y, to_pixel(color));
        }
        Ok(())
    }

    fn fill_rect(&self, canvas: &mut Self::Canvas, rect: Rect, color: Rgba) -> RasterResult<()> {
        let Some((x0, y0, w, h)) = clamp_rect(rect, canvas.width(), canvas.height()) else {
            return Ok(());
        };
        for y in y0..y0 + h {
            for x in x0..x0 + w {
                blend_pixel(&mut canvas.image, i64::from(x), i64::from(y), color);
            }
        }
        Ok(())
    }

    fn draw_rect(&self, canvas: &mut Self::Canvas, rect: Rect, color: Rgba) -> RasterResult<()> {
        if rect.width == 0 || rect.height == 0 {
            return Ok(());
        }
        let x1 = rect.x + i64::from(rect.width) - 1;
        let y1 = rect.y + i64::from(rect.height) - 1;
        for x in rect.x..=x1 {
            blend_pixel(&mut canvas.image, x, rect.y, color);
            blend_pixel(&mut canvas.image, x, y1, color);
        }
        for y in rect.y + 1..y1 {
            blend_pixel(&mut canvas.image, rect.x, y, color);
            blend_pixel(&mut canvas.image, x1, y, color);
        }
        Ok(())
    }

    fn apply_filter(&self, canvas: &mut Self::Canvas, filter: ToneFilter) -> RasterResult<()> {
        for pixel in canvas.image.pixels_mut() {
            let [r, g, b, a] = pixel.0;
            let (r, g, b) = match filter {
                ToneFilter::Grayscale => {
                    let luma = (0.299 * f64::from(r) + 0.587 * f64::from(g) + 0.114 * f64::from(b))
                        .round() as u8;
                    (luma, luma, luma)
                }
                ToneFilter::Invert => (255 - r, 255 - g, 255 - b),
                ToneFilter::Brightness(offset) => {
                    let shift = |c: u8| (i32::from(c) + offset).clamp(0, 255) as u8;
                    (shift(r), shift(g), shift(b))
                }
                ToneFilter::Contrast(amount) => {
                    let factor = ((100.0 - f64::from(amount)) / 100.0).powi(2);
                    let curve = |c: u8| {
                        (((f64::from(c) / 255.0 - 0.5) * factor + 0.5) * 255.0)
                            .round()
                            .clamp(0.0, 255.0) as u8
                    };
                    (curve(r), curve(g), curve(b))
                }
            };
            pixel.0 = [r, g, b, a];
        }
        Ok(())
    }

    fn draw_text(
        &self,
        canvas: &mut Self::Canvas,
        request: &TextDraw<'_>,
    ) -> RasterResult<TextExtents> {
        let scale = glyph_scale(request.size);
        let glyph_px = i64::from(scale) * 8;
        let color = Rgba::opaque(request.color);

        let mut pen = 0i64;
        for ch in request.text.chars() {
            if let Some(glyph) = BASIC_FONTS.get(ch) {
                for (row, bits) in glyph.iter().enumerate() {
                    for col in 0..8u32 {
                        if (bits >> col) & 1 == 0 {
                            continue;
                        }
                        for dy in 0..scale {
                            for dx in 0..scale {
                                let ox = pen + i64::from(col * scale + dx);
                                let oy = i64::from(row as u32 * scale + dy) - glyph_px;
                                let (rx, ry) =
                                    rotate_offset(ox as f64, oy as f64, request.rotation);
                                blend_pixel(
                                    &mut canvas.image,
                                    request.x + rx.round() as i64,
                                    request.y + ry.round() as i64,
                                    color,
                                );
                            }
                        }
                    }
                }
            }
            pen += glyph_px;
        }

        self.measure_text(request.font, request.size, request.rotation, request.text)
    }
}
