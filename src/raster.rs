//! Raster engine and font metric contracts.
//!
//! The core of this crate decides *where* pixels go; everything that
//! actually reads or writes pixels happens behind [`RasterEngine`]. The
//! bundled in-memory implementation is
//! [`MemoryEngine`](crate::engine::MemoryEngine); hosts with their own
//! raster stack implement these traits instead and the rest of the crate is
//! engine-agnostic.
//!
//! Canvases are owned by the engine (via the [`RasterEngine::Canvas`]
//! associated type); the core only ever holds references and never assumes
//! anything about the pixel storage beyond [`Canvas::width`] and
//! [`Canvas::height`].

use crate::color::Rgb;
use crate::geometry::{Dimensions, Rect};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

pub type RasterResult<T> = std::result::Result<T, RasterError>;

#[derive(Error, Debug)]
pub enum RasterError {
    #[error("raster operation failed: {0}")]
    OperationFailed(String),
    #[error("pixel ({x}, {y}) is outside the {width}x{height} canvas")]
    OutOfBounds { x: u32, y: u32, width: u32, height: u32 },
}

/// A straight-alpha RGBA color value as stored in a canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self {
        r: 0,
        g: 0,
        b: 0,
        a: 0,
    };

    pub const fn opaque(rgb: Rgb) -> Self {
        Self {
            r: rgb.r,
            g: rgb.g,
            b: rgb.b,
            a: 255,
        }
    }

    pub const fn with_alpha(rgb: Rgb, a: u8) -> Self {
        Self {
            r: rgb.r,
            g: rgb.g,
            b: rgb.b,
            a,
        }
    }

    /// The color channels without alpha.
    pub const fn rgb(self) -> Rgb {
        Rgb::new(self.r, self.g, self.b)
    }
}

/// How a freshly allocated destination canvas is prepared.
///
/// Preparation happens at allocation time, strictly before any resample
/// copy writes into the canvas — filling afterwards would overwrite the
/// resampled pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Background {
    /// Transparent black with the alpha channel preserved.
    Transparent,
    /// Flood-filled with an opaque color.
    Solid(Rgb),
}

/// Whole-canvas tonal filters applied directly by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToneFilter {
    Grayscale,
    Invert,
    /// Channel offset, `-255..=255`.
    Brightness(i32),
    /// Contrast adjustment, `-100..=100`; negative values increase contrast.
    Contrast(i32),
}

/// The eight signed ink-box corner values for a measured string.
///
/// Layout matches the classic text-bounding-box query, relative to the
/// baseline origin with y growing downward: `[0]`/`[1]` lower-left x/y,
/// `[2]`/`[3]` lower-right, `[4]`/`[5]` upper-right, `[6]`/`[7]` upper-left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextExtents(pub [i64; 8]);

impl TextExtents {
    pub const fn lower_left(&self) -> (i64, i64) {
        (self.0[0], self.0[1])
    }

    pub const fn lower_right(&self) -> (i64, i64) {
        (self.0[2], self.0[3])
    }

    pub const fn upper_right(&self) -> (i64, i64) {
        (self.0[4], self.0[5])
    }

    pub const fn upper_left(&self) -> (i64, i64) {
        (self.0[6], self.0[7])
    }
}

/// One glyph-draw request.
///
/// `x`/`y` locate the baseline origin of the first glyph, exactly where the
/// metric provider's extents are anchored.
#[derive(Debug, Clone, Copy)]
pub struct TextDraw<'a> {
    pub font: &'a Path,
    pub size: f64,
    pub rotation: f64,
    pub x: i64,
    pub y: i64,
    pub color: Rgb,
    pub text: &'a str,
}

/// Ink-box measurement, independent of any canvas.
pub trait FontMetrics {
    /// Measure `text` at `size` points, rotated `rotation` degrees
    /// counter-clockwise.
    fn measure_text(
        &self,
        font: &Path,
        size: f64,
        rotation: f64,
        text: &str,
    ) -> RasterResult<TextExtents>;
}

/// An addressable 2D pixel buffer owned by a raster engine.
pub trait Canvas {
    fn width(&self) -> u32;
    fn height(&self) -> u32;

    fn dimensions(&self) -> Dimensions {
        Dimensions::new(self.width(), self.height())
    }
}

/// The pixel-pushing contract consumed by every compositor in this crate.
///
/// Semantics the core relies on:
/// - [`resample`](Self::resample) *replaces* destination pixels (alpha
///   included) with a scaled copy of the source rectangle.
/// - [`blit`](Self::blit) composites source-over, honoring the source's
///   alpha channel.
/// - [`fill_rect`](Self::fill_rect) composites source-over as well, so a
///   translucent fill shades the pixels beneath it.
/// - Drawing primitives clip silently at canvas edges; only
///   [`get_pixel`](Self::get_pixel) treats out-of-bounds as an error.
pub trait RasterEngine {
    type Canvas: Canvas;

    /// Allocate a canvas and prepare its background.
    fn create_canvas(&self, size: Dimensions, background: Background)
    -> RasterResult<Self::Canvas>;

    /// Scale `src_rect` of `src` into `dst_rect` of `dst`.
    fn resample(
        &self,
        dst: &mut Self::Canvas,
        src: &Self::Canvas,
        dst_rect: Rect,
        src_rect: Rect,
    ) -> RasterResult<()>;

    /// Composite the whole of `src` over `dst` with its top-left at
    /// `(x, y)`.
    fn blit(&self, dst: &mut Self::Canvas, src: &Self::Canvas, x: i64, y: i64) -> RasterResult<()>;

    fn get_pixel(&self, canvas: &Self::Canvas, x: u32, y: u32) -> RasterResult<Rgba>;

    fn set_pixel(&self, canvas: &mut Self::Canvas, x: u32, y: u32, color: Rgba)
    -> RasterResult<()>;

    /// Fill a rectangle, compositing `color` over the existing pixels.
    fn fill_rect(&self, canvas: &mut Self::Canvas, rect: Rect, color: Rgba) -> RasterResult<()>;

    /// Draw a one-pixel unfilled rectangle outline.
    fn draw_rect(&self, canvas: &mut Self::Canvas, rect: Rect, color: Rgba) -> RasterResult<()>;

    /// Apply a named tonal filter to the whole canvas.
    fn apply_filter(&self, canvas: &mut Self::Canvas, filter: ToneFilter) -> RasterResult<()>;

    /// Render a string and return its measured footprint.
    fn draw_text(
        &self,
        canvas: &mut Self::Canvas,
        request: &TextDraw<'_>,
    ) -> RasterResult<TextExtents>;
}
