//! The `Image` facade: configuration state plus pipeline orchestration.
//!
//! An [`Image`] owns the decoded source canvas (handed over by the host's
//! source loader) and the output-affecting settings: quality, padding,
//! transparency, background color and border. Geometry operations compute a
//! [`Layout`](crate::geometry::Layout) and execute it against the engine;
//! decorators and filters then work on the output canvas, and
//! [`finish`](Image::finish) applies the border last and releases the
//! result.
//!
//! Every operation validates its inputs before the first engine call, so an
//! error never leaves a half-decorated canvas behind.

use crate::border::Border;
use crate::color::Rgb;
use crate::error::{Error, Result};
use crate::filter;
use crate::geometry::{self, Dimensions, Layout, Plane, Rect};
use crate::raster::{Background, Canvas, FontMetrics, RasterEngine, RasterError, ToneFilter};
use crate::text::Text;
use crate::watermark::Watermark;
use serde::{Deserialize, Serialize};

/// Encoding quality knob, 0–100 inclusive. Clamped on construction.
///
/// Encoding itself happens outside this crate; the facade only carries the
/// value for the host's encoder to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quality(u8);

impl Quality {
    pub fn new(value: u8) -> Self {
        Self(value.min(100))
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(100)
    }
}

/// A source canvas plus the configuration applied to its output.
pub struct Image<E: RasterEngine> {
    source: E::Canvas,
    output: Option<E::Canvas>,
    quality: Quality,
    padding: u32,
    transparent: bool,
    background: Rgb,
    border: Border,
}

impl<E: RasterEngine> Image<E> {
    /// Wrap a decoded source canvas with default settings: full quality,
    /// no padding, transparency on, black background, no border.
    pub fn new(source: E::Canvas) -> Self {
        Self {
            source,
            output: None,
            quality: Quality::default(),
            padding: 0,
            transparent: true,
            background: Rgb::BLACK,
            border: Border::default(),
        }
    }

    pub fn set_quality(&mut self, quality: Quality) {
        self.quality = quality;
    }

    pub fn quality(&self) -> Quality {
        self.quality
    }

    /// Default letterbox padding used by [`contain`](Self::contain) when no
    /// per-call padding is given.
    pub fn set_padding(&mut self, padding: u32) {
        self.padding = padding;
    }

    pub fn padding(&self) -> u32 {
        self.padding
    }

    /// Whether freshly allocated output canvases keep an alpha channel
    /// instead of being flood-filled with the background color.
    pub fn set_transparency(&mut self, transparent: bool) {
        self.transparent = transparent;
    }

    pub fn transparency(&self) -> bool {
        self.transparent
    }

    pub fn set_background_color(&mut self, background: Rgb) {
        self.background = background;
    }

    pub fn background_color(&self) -> Rgb {
        self.background
    }

    pub fn set_border(&mut self, width: u32, color: Rgb) {
        self.border = Border::new(width, color);
    }

    pub fn set_border_width(&mut self, width: u32) {
        self.border.set_width(width);
    }

    pub fn set_border_color(&mut self, color: Rgb) {
        self.border.set_color(color);
    }

    pub fn border(&self) -> Border {
        self.border
    }

    pub fn source_dimensions(&self) -> Dimensions {
        self.source.dimensions()
    }

    /// Current output size: the last geometry result, or the source size if
    /// no geometry has run yet.
    pub fn output_dimensions(&self) -> Dimensions {
        match &self.output {
            Some(canvas) => canvas.dimensions(),
            None => self.source.dimensions(),
        }
    }

    // ------------------------------------------------------------------
    // Geometry operations
    // ------------------------------------------------------------------

    /// Stretch to exactly `(width, height)`, ignoring aspect ratio; with
    /// `height` omitted, an aspect-preserving resize driven by `width`.
    pub fn resize(&mut self, engine: &E, width: u32, height: Option<u32>) -> Result<()> {
        let layout = geometry::stretch(self.source_dimensions(), width, height)?;
        self.execute(engine, layout)
    }

    /// Aspect-preserving resize to the given width.
    pub fn resize_width(&mut self, engine: &E, width: u32) -> Result<()> {
        let layout = geometry::resize_width(self.source_dimensions(), width)?;
        self.execute(engine, layout)
    }

    /// Aspect-preserving resize to the given height.
    pub fn resize_height(&mut self, engine: &E, height: u32) -> Result<()> {
        let layout = geometry::resize_height(self.source_dimensions(), height)?;
        self.execute(engine, layout)
    }

    /// Scale to cover, then center-crop to exactly `(width, height)`.
    pub fn fill_crop(&mut self, engine: &E, width: u32, height: Option<u32>) -> Result<()> {
        let layout = geometry::fill_crop(self.source_dimensions(), width, height)?;
        self.execute(engine, layout)
    }

    /// Letterbox into `(width, height)` without cropping. `padding` falls
    /// back to the configured default.
    pub fn contain(
        &mut self,
        engine: &E,
        width: u32,
        height: Option<u32>,
        padding: Option<u32>,
    ) -> Result<()> {
        let padding = padding.unwrap_or(self.padding);
        let layout = geometry::contain(self.source_dimensions(), width, height, padding)?;
        self.execute(engine, layout)
    }

    fn canvas_background(&self) -> Background {
        if self.transparent {
            Background::Transparent
        } else {
            Background::Solid(self.background)
        }
    }

    /// Allocate destination canvases (backgrounds prepared at allocation,
    /// before any copy lands) and run the layout's resample copies.
    fn execute(&mut self, engine: &E, layout: Layout) -> Result<()> {
        tracing::debug!(size = ?layout.target, copies = layout.copies.len(), "executing layout");
        let background = self.canvas_background();
        let mut target = engine.create_canvas(layout.target, background)?;
        let mut intermediate = match layout.intermediate {
            Some(size) => Some(engine.create_canvas(size, background)?),
            None => None,
        };

        for copy in &layout.copies {
            match (copy.from, copy.to) {
                (Plane::Source, Plane::Target) => {
                    engine.resample(&mut target, &self.source, copy.dst, copy.src)?;
                }
                (Plane::Source, Plane::Intermediate) => {
                    let scratch = intermediate.as_mut().ok_or_else(unallocated_intermediate)?;
                    engine.resample(scratch, &self.source, copy.dst, copy.src)?;
                }
                (Plane::Intermediate, Plane::Target) => {
                    let scratch = intermediate.as_ref().ok_or_else(unallocated_intermediate)?;
                    engine.resample(&mut target, scratch, copy.dst, copy.src)?;
                }
                (from, to) => {
                    return Err(Error::Raster(RasterError::OperationFailed(format!(
                        "unsupported copy {from:?} -> {to:?}"
                    ))));
                }
            }
        }

        self.output = Some(target);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Decorators and filters
    // ------------------------------------------------------------------

    /// Overlay a configured [`Text`] onto the current output.
    pub fn add_text(&mut self, engine: &E, text: &Text) -> Result<()>
    where
        E: FontMetrics,
    {
        text.apply(engine, self.output_canvas_mut())
    }

    /// Composite a configured [`Watermark`] onto the current output.
    pub fn add_watermark(&mut self, engine: &E, watermark: &Watermark<E::Canvas>) -> Result<()> {
        watermark.apply(engine, self.output_canvas_mut())
    }

    pub fn greyscale(&mut self, engine: &E) -> Result<()> {
        engine.apply_filter(self.output_canvas_mut(), ToneFilter::Grayscale)?;
        Ok(())
    }

    pub fn invert(&mut self, engine: &E) -> Result<()> {
        engine.apply_filter(self.output_canvas_mut(), ToneFilter::Invert)?;
        Ok(())
    }

    pub fn set_brightness(&mut self, engine: &E, brightness: i32) -> Result<()> {
        engine.apply_filter(self.output_canvas_mut(), ToneFilter::Brightness(brightness))?;
        Ok(())
    }

    pub fn set_contrast(&mut self, engine: &E, contrast: i32) -> Result<()> {
        engine.apply_filter(self.output_canvas_mut(), ToneFilter::Contrast(contrast))?;
        Ok(())
    }

    /// Per-pixel saturation multiplier (HSV round trip, clamped at full
    /// saturation).
    pub fn set_saturation(&mut self, engine: &E, multiplier: f64) -> Result<()> {
        filter::saturation(engine, self.output_canvas_mut(), multiplier)
    }

    /// Add a flat tint to every pixel.
    pub fn colorize(&mut self, engine: &E, tint: Rgb) -> Result<()> {
        filter::colorize(engine, self.output_canvas_mut(), tint)
    }

    /// The color-quantized average of the source image as uppercase hex.
    ///
    /// The source is resampled into a single pixel and each channel snaps
    /// to the nearest multiple of `0x33`.
    pub fn average_color(&self, engine: &E) -> Result<String> {
        let source_size = self.source_dimensions();
        if source_size.width == 0 || source_size.height == 0 {
            return Err(Error::InvalidDimension(
                "cannot sample an empty source canvas".to_string(),
            ));
        }
        let mut sample = engine.create_canvas(Dimensions::new(1, 1), Background::Transparent)?;
        engine.resample(
            &mut sample,
            &self.source,
            Rect::new(0, 0, 1, 1),
            Rect::full(source_size),
        )?;
        let pixel = engine.get_pixel(&sample, 0, 0)?;
        let quantize = |c: u8| ((f64::from(c) / 51.0).round() * 51.0).clamp(0.0, 255.0) as u8;
        Ok(Rgb::new(quantize(pixel.r), quantize(pixel.g), quantize(pixel.b)).to_hex())
    }

    /// Apply the border (always the last compositing step) and release the
    /// output canvas.
    pub fn finish(mut self, engine: &E) -> Result<E::Canvas> {
        let mut canvas = match self.output.take() {
            Some(canvas) => canvas,
            None => self.source,
        };
        self.border.apply(engine, &mut canvas)?;
        Ok(canvas)
    }

    fn output_canvas_mut(&mut self) -> &mut E::Canvas {
        match &mut self.output {
            Some(canvas) => canvas,
            None => &mut self.source,
        }
    }
}

fn unallocated_intermediate() -> Error {
    Error::Raster(RasterError::OperationFailed(
        "layout copy references an unallocated intermediate canvas".to_string(),
    ))
}
