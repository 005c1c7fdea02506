//! Color filters beyond the engine's built-in tonal set.
//!
//! The raster engine applies grayscale/invert/brightness/contrast itself
//! (see [`ToneFilter`](crate::raster::ToneFilter)); the two filters here
//! need the color model, so they walk the canvas pixel by pixel through the
//! engine contract instead.

use crate::color::Rgb;
use crate::error::Result;
use crate::raster::{Canvas, RasterEngine, Rgba};

/// Multiply per-pixel saturation, clamping the result to full saturation.
///
/// Each pixel makes an RGB → HSV → RGB round trip with its alpha preserved.
/// A multiplier of zero desaturates to grayscale; values above 1 deepen the
/// existing color.
pub fn saturation<E: RasterEngine>(
    engine: &E,
    canvas: &mut E::Canvas,
    multiplier: f64,
) -> Result<()> {
    for x in 0..canvas.width() {
        for y in 0..canvas.height() {
            let pixel = engine.get_pixel(canvas, x, y)?;
            let mut hsv = pixel.rgb().to_hsv();
            hsv.s = (hsv.s * multiplier).min(1.0);
            engine.set_pixel(canvas, x, y, Rgba::with_alpha(hsv.to_rgb(), pixel.a))?;
        }
    }
    Ok(())
}

/// Add a flat tint to every pixel, clamping each channel at 255.
pub fn colorize<E: RasterEngine>(engine: &E, canvas: &mut E::Canvas, tint: Rgb) -> Result<()> {
    for x in 0..canvas.width() {
        for y in 0..canvas.height() {
            let pixel = engine.get_pixel(canvas, x, y)?;
            let add = |c: u8, t: u8| (u16::from(c) + u16::from(t)).min(255) as u8;
            let shifted = Rgb::new(
                add(pixel.r, tint.r),
                add(pixel.g, tint.g),
                add(pixel.b, tint.b),
            );
            engine.set_pixel(canvas, x, y, Rgba::with_alpha(shifted, pixel.a))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::MemoryEngine;
    use crate::geometry::Dimensions;
    use crate::raster::Background;

    fn one_pixel(engine: &MemoryEngine, rgb: Rgb) -> crate::engine::MemoryCanvas {
        engine
            .create_canvas(Dimensions::new(1, 1), Background::Solid(rgb))
            .unwrap()
    }

    #[test]
    fn zero_saturation_desaturates_to_value_gray() {
        let engine = MemoryEngine::new();
        let mut canvas = one_pixel(&engine, Rgb::new(200, 50, 50));

        saturation(&engine, &mut canvas, 0.0).unwrap();
        let px = engine.get_pixel(&canvas, 0, 0).unwrap();
        // Value is the channel max: 200.
        assert_eq!(px.rgb(), Rgb::new(200, 200, 200));
        assert_eq!(px.a, 255);
    }

    #[test]
    fn saturation_multiplier_clamps_at_full() {
        let engine = MemoryEngine::new();
        let mut canvas = one_pixel(&engine, Rgb::new(200, 100, 100));

        saturation(&engine, &mut canvas, 100.0).unwrap();
        let px = engine.get_pixel(&canvas, 0, 0).unwrap();
        // Fully saturated red hue at value 200.
        assert_eq!(px.rgb(), Rgb::new(200, 0, 0));
    }

    #[test]
    fn unit_saturation_is_a_fixed_point_for_gray() {
        let engine = MemoryEngine::new();
        let mut canvas = one_pixel(&engine, Rgb::new(128, 128, 128));

        saturation(&engine, &mut canvas, 1.0).unwrap();
        assert_eq!(
            engine.get_pixel(&canvas, 0, 0).unwrap().rgb(),
            Rgb::new(128, 128, 128)
        );
    }

    #[test]
    fn saturation_preserves_alpha() {
        let engine = MemoryEngine::new();
        let mut canvas = engine
            .create_canvas(Dimensions::new(1, 1), Background::Transparent)
            .unwrap();
        engine
            .set_pixel(&mut canvas, 0, 0, Rgba::with_alpha(Rgb::new(10, 200, 30), 77))
            .unwrap();

        saturation(&engine, &mut canvas, 0.5).unwrap();
        assert_eq!(engine.get_pixel(&canvas, 0, 0).unwrap().a, 77);
    }

    #[test]
    fn colorize_adds_and_clamps() {
        let engine = MemoryEngine::new();
        let mut canvas = one_pixel(&engine, Rgb::new(200, 10, 0));

        colorize(&engine, &mut canvas, Rgb::new(100, 20, 5)).unwrap();
        assert_eq!(
            engine.get_pixel(&canvas, 0, 0).unwrap().rgb(),
            Rgb::new(255, 30, 5)
        );
    }
}
