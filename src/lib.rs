//! # Easel
//!
//! An image layout and compositing toolkit. Easel decides *where* pixels go
//! and *what* colors result — crop/fit/contain geometry, anchor-based
//! overlay placement, RGB ↔ HSV color math — and delegates every actual
//! pixel read, write, resample and glyph rasterization to a pluggable
//! raster engine.
//!
//! # Architecture: Plan, Then Execute
//!
//! Geometry never mutates a canvas. Each operation computes a
//! [`Layout`](geometry::Layout) — target size plus explicit resample
//! copies — and the [`Image`](image::Image) facade executes that plan
//! against a [`RasterEngine`](raster::RasterEngine). The separation exists
//! for three reasons:
//!
//! - **Testability**: the layout math is pure functions over dimensions,
//!   unit tested without a single pixel in sight.
//! - **No aliasing surprises**: chained operations (resize, crop, border)
//!   never share a mutable canvas implicitly; every copy is explicit in the
//!   plan.
//! - **Swappable backends**: a recording mock verifies call sequences, the
//!   bundled [`MemoryEngine`](engine::MemoryEngine) renders for real, and a
//!   host can drop in its own engine without touching layout code.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`color`] | `Rgb` / `Hsv` value types, hex parsing, conversions |
//! | [`geometry`] | stretch / single-axis / fill-crop / contain layout computation |
//! | [`anchor`] | nine-point symbolic or absolute placement resolution |
//! | [`raster`] | the raster-engine and font-metrics contracts |
//! | [`engine`] | bundled in-memory engine over `image::RgbaImage` buffers |
//! | [`border`] | concentric inset rectangle outlines |
//! | [`text`] | ink-box metrics, background box sizing, glyph origin layout |
//! | [`watermark`] | secondary-image scaling, placement and compositing |
//! | [`filter`] | per-pixel saturation and colorize on top of the color model |
//! | [`image`] | the configuration facade driving everything above |
//!
//! # One Anchor Table
//!
//! Border, text and watermark placement all resolve through
//! [`anchor::resolve`]. The nine compass positions behave identically at
//! every call site, margins are an inward inset, and an oversized decorator
//! resolves to a negative origin (clipped, never rejected).
//!
//! # Scope
//!
//! Decoding and encoding image byte streams, network fetch, caching and any
//! CLI surface are out of scope. The host's source loader decodes and hands
//! a canvas to [`Image::new`](image::Image::new); the host's encoder reads
//! the finished canvas and the [`Quality`](image::Quality) knob back out.
//!
//! ```
//! use easel::color::Rgb;
//! use easel::engine::{MemoryCanvas, MemoryEngine};
//! use easel::image::Image;
//! use easel::raster::{Background, RasterEngine};
//! use easel::geometry::Dimensions;
//!
//! let engine = MemoryEngine::new();
//! let source = engine
//!     .create_canvas(Dimensions::new(640, 480), Background::Solid(Rgb::new(30, 90, 160)))
//!     .unwrap();
//!
//! let mut image = Image::<MemoryEngine>::new(source);
//! image.set_border(2, Rgb::WHITE);
//! image.fill_crop(&engine, 200, None).unwrap();
//! let thumbnail: MemoryCanvas = image.finish(&engine).unwrap();
//! assert_eq!(thumbnail.as_image().width(), 200);
//! ```

pub mod anchor;
pub mod border;
pub mod color;
pub mod engine;
pub mod error;
pub mod filter;
pub mod geometry;
pub mod image;
pub mod raster;
pub mod text;
pub mod watermark;

pub use crate::anchor::{Anchor, Position};
pub use crate::border::Border;
pub use crate::color::{Hsv, Rgb};
pub use crate::error::{Error, Result};
pub use crate::geometry::{CopySpec, Dimensions, Layout, Plane, Rect};
pub use crate::image::{Image, Quality};
pub use crate::raster::{
    Background, Canvas, FontMetrics, RasterEngine, RasterError, Rgba, TextDraw, TextExtents,
    ToneFilter,
};
pub use crate::text::{BoundingBox, Text, TextAlign, TextWidth};
pub use crate::watermark::Watermark;
