//! Watermark compositor: scale a secondary image, anchor it, composite it.

use crate::anchor::{self, Anchor};
use crate::error::{Error, Result};
use crate::geometry::{Dimensions, Rect};
use crate::raster::{Background, Canvas, RasterEngine};

/// A secondary image composited onto a target canvas.
///
/// The output footprint starts at the watermark's own size; `set_width` /
/// `set_height` adjust it, each optionally keeping the watermark's own
/// aspect ratio (never the target's). Placement uses the shared anchor
/// resolver with an outward margin.
pub struct Watermark<C: Canvas> {
    source: C,
    source_size: Dimensions,
    output_width: u32,
    output_height: u32,
    anchor: Anchor,
    margin: u32,
    opacity: u8,
}

impl<C: Canvas> Watermark<C> {
    pub fn new(source: C) -> Self {
        let source_size = source.dimensions();
        Self {
            source,
            source_size,
            output_width: source_size.width,
            output_height: source_size.height,
            anchor: Anchor::default(),
            margin: 0,
            opacity: 100,
        }
    }

    /// Set the output width; with `constrain` the height follows the
    /// watermark's aspect ratio.
    pub fn set_width(&mut self, width: u32, constrain: bool) {
        self.output_width = width;
        if constrain && self.source_size.width > 0 {
            let scaled = f64::from(self.source_size.height) * f64::from(width)
                / f64::from(self.source_size.width);
            self.output_height = scaled.round().max(1.0) as u32;
        }
    }

    /// Set the output height; with `constrain` the width follows the
    /// watermark's aspect ratio.
    pub fn set_height(&mut self, height: u32, constrain: bool) {
        self.output_height = height;
        if constrain && self.source_size.height > 0 {
            let scaled = f64::from(self.source_size.width) * f64::from(height)
                / f64::from(self.source_size.height);
            self.output_width = scaled.round().max(1.0) as u32;
        }
    }

    pub fn output_size(&self) -> Dimensions {
        Dimensions::new(self.output_width, self.output_height)
    }

    pub fn set_anchor(&mut self, anchor: Anchor) {
        self.anchor = anchor;
    }

    pub fn set_margin(&mut self, margin: u32) {
        self.margin = margin;
    }

    /// Opacity in percent, clamped to 0–100.
    pub fn set_opacity(&mut self, opacity: u8) {
        self.opacity = opacity.min(100);
    }

    /// Composite the watermark onto `target`.
    ///
    /// The source is resampled into a transparent scratch canvas at the
    /// output size, opacity is pre-multiplied into that canvas, and the
    /// result is blitted source-over at the resolved anchor origin. All
    /// validation happens before the first engine call.
    pub fn apply<E>(&self, engine: &E, target: &mut E::Canvas) -> Result<()>
    where
        E: RasterEngine<Canvas = C>,
    {
        if self.output_width == 0 || self.output_height == 0 {
            return Err(Error::InvalidDimension(format!(
                "watermark output dimensions must be non-zero, got {}x{}",
                self.output_width, self.output_height
            )));
        }
        if self.source_size.width == 0 || self.source_size.height == 0 {
            return Err(Error::InvalidDimension(
                "watermark source canvas is empty".to_string(),
            ));
        }

        let output = self.output_size();
        let (x, y) = anchor::resolve(self.anchor, output, target.dimensions(), self.margin);
        tracing::debug!(?output, x, y, opacity = self.opacity, "placing watermark");

        let mut scratch = engine.create_canvas(output, Background::Transparent)?;
        engine.resample(
            &mut scratch,
            &self.source,
            Rect::full(output),
            Rect::full(self.source_size),
        )?;

        if self.opacity < 100 {
            let factor = f64::from(self.opacity) / 100.0;
            for py in 0..output.height {
                for px in 0..output.width {
                    let mut pixel = engine.get_pixel(&scratch, px, py)?;
                    pixel.a = (f64::from(pixel.a) * factor).round() as u8;
                    engine.set_pixel(&mut scratch, px, py, pixel)?;
                }
            }
        }

        engine.blit(target, &scratch, x, y)?;
        Ok(())
    }
}
