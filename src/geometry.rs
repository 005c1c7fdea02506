//! Pure layout computation for the four target modes.
//!
//! All functions here are pure and testable without any canvas or engine.
//! Each returns a [`Layout`]: the target canvas size, an optional
//! intermediate canvas (fill-crop's two-pass path), and the resample copies
//! that carry pixels between planes. Executing the plan — allocating
//! canvases, preparing backgrounds, issuing the copies — is the facade's
//! job; this module never touches pixels.
//!
//! Intermediate math is carried in `f64` and rounded (half away from zero)
//! only at the point a pixel value is produced.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Width × height in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Axis-aligned rectangle with a signed origin.
///
/// The origin is signed because anchor resolution may legitimately place a
/// decorator partially outside its container (it gets clipped, not
/// rejected).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub x: i64,
    pub y: i64,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub const fn new(x: i64, y: i64, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// The full extent of a canvas of the given size.
    pub const fn full(size: Dimensions) -> Self {
        Self::new(0, 0, size.width, size.height)
    }
}

/// Which canvas a copy reads from or writes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Plane {
    Source,
    Intermediate,
    Target,
}

/// One resample request: read `src` from one plane, scale into `dst` on
/// another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CopySpec {
    pub from: Plane,
    pub to: Plane,
    pub src: Rect,
    pub dst: Rect,
}

/// A computed layout, ready to execute against a raster engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layout {
    /// Final output canvas size.
    pub target: Dimensions,
    /// Oversized scratch canvas for fill-crop's two-pass path.
    pub intermediate: Option<Dimensions>,
    /// Resample copies, in execution order.
    pub copies: Vec<CopySpec>,
}

impl Layout {
    fn direct(source: Dimensions, target: Dimensions) -> Self {
        Self {
            target,
            intermediate: None,
            copies: vec![CopySpec {
                from: Plane::Source,
                to: Plane::Target,
                src: Rect::full(source),
                dst: Rect::full(target),
            }],
        }
    }
}

/// Scale to exactly `(width, height)`, ignoring the source aspect ratio.
///
/// With `height` omitted this degrades to an aspect-preserving resize driven
/// by `width` (see [`resize_width`]).
pub fn stretch(source: Dimensions, width: u32, height: Option<u32>) -> Result<Layout> {
    let Some(height) = height else {
        return resize_width(source, width);
    };
    require_nonzero_source(source)?;
    require_nonzero_target(width, height)?;
    Ok(Layout::direct(source, Dimensions::new(width, height)))
}

/// Resize to `width`, deriving the height from the source aspect ratio.
pub fn resize_width(source: Dimensions, width: u32) -> Result<Layout> {
    require_nonzero_source(source)?;
    require_nonzero_target(width, 1)?;
    let height = derived_axis(source.height, width, source.width);
    Ok(Layout::direct(source, Dimensions::new(width, height)))
}

/// Resize to `height`, deriving the width from the source aspect ratio.
pub fn resize_height(source: Dimensions, height: u32) -> Result<Layout> {
    require_nonzero_source(source)?;
    require_nonzero_target(1, height)?;
    let width = derived_axis(source.width, height, source.height);
    Ok(Layout::direct(source, Dimensions::new(width, height)))
}

/// Scale to cover `(width, height)`, then center-crop the overflow so the
/// output is exactly `(width, height)`.
///
/// `height` defaults to `width` (square crop). The scale factor covers the
/// requested width first; if the resulting height falls short, the cover
/// scale is recomputed from the height instead, so the intermediate canvas
/// always meets or exceeds the target on both axes. When the intermediate
/// size already equals the target exactly, the two-pass path is skipped and
/// the source is resampled straight into the target.
pub fn fill_crop(source: Dimensions, width: u32, height: Option<u32>) -> Result<Layout> {
    let height = height.unwrap_or(width);
    require_nonzero_source(source)?;
    require_nonzero_target(width, height)?;

    let src_w = f64::from(source.width);
    let src_h = f64::from(source.height);

    let mut new_w = f64::from(width);
    let mut new_h = src_h * (f64::from(width) / src_w);
    if new_h < f64::from(height) {
        new_h = f64::from(height);
        new_w = src_w * (f64::from(height) / src_h);
    }

    let inter = Dimensions::new(round_px(new_w), round_px(new_h));
    let target = Dimensions::new(width, height);

    if inter == target {
        return Ok(Layout::direct(source, target));
    }

    let (crop_x, crop_y) = if inter.height > height {
        let extra = inter.height - height;
        (0, (f64::from(extra) / 2.0).round() as i64)
    } else {
        let extra = inter.width - width;
        ((f64::from(extra) / 2.0).round() as i64, 0)
    };

    Ok(Layout {
        target,
        intermediate: Some(inter),
        copies: vec![
            CopySpec {
                from: Plane::Source,
                to: Plane::Intermediate,
                src: Rect::full(source),
                dst: Rect::full(inter),
            },
            CopySpec {
                from: Plane::Intermediate,
                to: Plane::Target,
                src: Rect::new(crop_x, crop_y, width, height),
                dst: Rect::full(target),
            },
        ],
    })
}

/// Fit the source inside `(width, height)` without cropping, centered.
///
/// `height` defaults to `width`. A source that already fits on both axes is
/// centered without scaling. Otherwise the longer source axis drives the
/// scale-down and `2 * padding` is subtracted from the scaled footprint; if
/// the derived axis still overflows its container (near-square sources),
/// the scale is re-derived from the other axis.
pub fn contain(source: Dimensions, width: u32, height: Option<u32>, padding: u32) -> Result<Layout> {
    let height = height.unwrap_or(width);
    require_nonzero_source(source)?;
    require_nonzero_target(width, height)?;

    let src_w = f64::from(source.width);
    let src_h = f64::from(source.height);
    let pad2 = f64::from(padding) * 2.0;

    let new_w;
    let new_h;
    let x;
    let y;
    if source.width < width && source.height < height {
        new_w = src_w;
        new_h = src_h;
        x = (f64::from(width) - src_w) / 2.0;
        y = (f64::from(height) - src_h) / 2.0;
    } else {
        if source.width > source.height {
            let mut fit_w = f64::from(width) - pad2;
            let mut fit_h = src_h * (f64::from(width) / src_w) - pad2;
            if fit_h > f64::from(height) {
                fit_h = f64::from(height) - pad2;
                fit_w = src_w * (f64::from(height) / src_h);
            }
            new_w = fit_w;
            new_h = fit_h;
        } else {
            new_h = f64::from(height) - pad2;
            new_w = src_w * (f64::from(height) / src_h) - pad2;
        }
        x = (f64::from(width) - new_w) / 2.0;
        y = (f64::from(height) - new_h) / 2.0;
    }

    if new_w < 1.0 || new_h < 1.0 {
        return Err(Error::InvalidDimension(format!(
            "padding {padding} leaves no room for a {}x{} source in {width}x{height}",
            source.width, source.height
        )));
    }

    Ok(Layout {
        target: Dimensions::new(width, height),
        intermediate: None,
        copies: vec![CopySpec {
            from: Plane::Source,
            to: Plane::Target,
            src: Rect::full(source),
            dst: Rect::new(
                x.round() as i64,
                y.round() as i64,
                round_px(new_w),
                round_px(new_h),
            ),
        }],
    })
}

/// Derive the free axis of an aspect-preserving resize.
fn derived_axis(source_other: u32, driving_target: u32, driving_source: u32) -> u32 {
    let scaled = f64::from(source_other) * (f64::from(driving_target) / f64::from(driving_source));
    scaled.round().max(1.0) as u32
}

fn round_px(v: f64) -> u32 {
    v.round().max(1.0) as u32
}

fn require_nonzero_source(source: Dimensions) -> Result<()> {
    if source.width == 0 || source.height == 0 {
        return Err(Error::InvalidDimension(format!(
            "source dimensions must be non-zero, got {}x{}",
            source.width, source.height
        )));
    }
    Ok(())
}

fn require_nonzero_target(width: u32, height: u32) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(Error::InvalidDimension(format!(
            "target dimensions must be non-zero, got {width}x{height}"
        )));
    }
    Ok(())
}
