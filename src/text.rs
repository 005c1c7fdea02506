//! Text overlay layout and drawing.
//!
//! Layout happens in three steps: derive the ink [`BoundingBox`] from the
//! raw metric corners, size and anchor the background box, then place the
//! glyph baseline origin according to the alignment. Only the final
//! [`Text::apply`] touches a canvas; the math itself is pure and unit
//! tested against fabricated extents.

use crate::anchor::{self, Anchor};
use crate::color::Rgb;
use crate::error::{Error, Result};
use crate::geometry::{Dimensions, Rect};
use crate::raster::{Canvas, FontMetrics, RasterEngine, Rgba, TextDraw, TextExtents};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Tight bounds of the rendered glyphs, derived from metric corners.
///
/// `y_offset` is the vertical distance from the requested draw origin to
/// where the ink actually begins; the glyph baseline is placed so that
/// `box_top + height + y_offset` lands inside the padded background box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub width: i64,
    pub height: i64,
    pub y_offset: i64,
}

impl BoundingBox {
    /// Derive the ink box from the eight corner values.
    ///
    /// The width correction kicks in for glyphs with a negative left
    /// bearing; the height correction compensates for rotated or
    /// short-descender text where the upper-right corner sits above the
    /// usual threshold.
    pub fn from_extents(extents: &TextExtents) -> Self {
        let v = &extents.0;

        let mut width = (v[2] - v[0]).abs();
        if v[0] < -1 {
            width = v[2].abs() + v[0].abs() - 1;
        }

        let mut height = v[7].abs() - v[1].abs();
        if v[5] < 7 {
            height += (v[5] + v[3]).abs();
        }

        Self {
            width,
            height,
            y_offset: -v[3],
        }
    }
}

/// Horizontal glyph alignment inside the background box.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

impl FromStr for TextAlign {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "left" => Ok(Self::Left),
            "center" => Ok(Self::Center),
            "right" => Ok(Self::Right),
            other => Err(Error::UnsupportedAlignment(other.to_string())),
        }
    }
}

/// Background box width policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub enum TextWidth {
    /// Size the box to the ink plus padding.
    #[default]
    Auto,
    /// A percentage of the container width (plus padding), capped at the
    /// container width.
    Percent(f64),
}

/// The resolved placement for one text overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextLayout {
    pub background_box: Rect,
    pub glyph_origin: (i64, i64),
    pub ink: BoundingBox,
}

/// A configured text overlay.
#[derive(Debug, Clone, PartialEq)]
pub struct Text {
    text: String,
    font: PathBuf,
    size: f64,
    rotation: f64,
    color: Rgb,
    background_color: Rgb,
    background_opacity: u8,
    padding: u32,
    width: TextWidth,
    align: TextAlign,
    anchor: Anchor,
}

impl Text {
    pub fn new(text: impl Into<String>, font: impl Into<PathBuf>) -> Self {
        Self {
            text: text.into(),
            font: font.into(),
            size: 12.0,
            rotation: 0.0,
            color: Rgb::WHITE,
            background_color: Rgb::BLACK,
            background_opacity: 0,
            padding: 0,
            width: TextWidth::default(),
            align: TextAlign::default(),
            anchor: Anchor::default(),
        }
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_font(&mut self, font: impl Into<PathBuf>) {
        self.font = font.into();
    }

    pub fn font(&self) -> &Path {
        &self.font
    }

    pub fn set_size(&mut self, size: f64) {
        self.size = size;
    }

    pub fn set_rotation(&mut self, degrees: f64) {
        self.rotation = degrees;
    }

    pub fn set_color(&mut self, color: Rgb) {
        self.color = color;
    }

    pub fn set_background_color(&mut self, color: Rgb) {
        self.background_color = color;
    }

    /// Background opacity in percent, clamped to 0–100. Zero skips the
    /// background fill entirely.
    pub fn set_background_opacity(&mut self, opacity: u8) {
        self.background_opacity = opacity.min(100);
    }

    pub fn set_padding(&mut self, padding: u32) {
        self.padding = padding;
    }

    pub fn set_width(&mut self, width: TextWidth) {
        self.width = width;
    }

    pub fn set_align(&mut self, align: TextAlign) {
        self.align = align;
    }

    pub fn set_anchor(&mut self, anchor: Anchor) {
        self.anchor = anchor;
    }

    /// Compute the background box and glyph origin for a container, given
    /// measured extents.
    pub fn layout(&self, extents: &TextExtents, container: Dimensions) -> TextLayout {
        let ink = BoundingBox::from_extents(extents);
        let pad = i64::from(self.padding);
        let container_w = f64::from(container.width);

        let box_w = match self.width {
            TextWidth::Auto => ink.width - 1 + 2 * pad,
            TextWidth::Percent(percent) => {
                let requested = container_w * (percent / 100.0) + f64::from(self.padding) * 2.0;
                container_w.min(requested).round() as i64
            }
        }
        .max(0);
        let box_h = (ink.height + 2 * pad).max(0);

        let (box_x, box_y) = anchor::resolve(
            self.anchor,
            Dimensions::new(box_w as u32, box_h as u32),
            container,
            0,
        );

        let glyph_y = box_y + ink.height + ink.y_offset + pad;
        let glyph_x = match self.align {
            TextAlign::Left => box_x + pad,
            TextAlign::Center => ((box_w - ink.width - 2 * pad) as f64 / 2.0).round() as i64,
            TextAlign::Right => box_w - pad - ink.width,
        };

        TextLayout {
            background_box: Rect::new(box_x, box_y, box_w as u32, box_h as u32),
            glyph_origin: (glyph_x, glyph_y),
            ink,
        }
    }

    /// Measure, lay out, and draw this overlay onto `canvas`.
    ///
    /// The background box is filled first (skipped entirely at zero
    /// opacity), then the glyphs are drawn at the resolved origin.
    pub fn apply<E>(&self, engine: &E, canvas: &mut E::Canvas) -> Result<()>
    where
        E: RasterEngine + FontMetrics,
    {
        let extents = engine.measure_text(&self.font, self.size, self.rotation, &self.text)?;
        let layout = self.layout(&extents, canvas.dimensions());
        tracing::debug!(
            text = %self.text,
            background = ?layout.background_box,
            origin = ?layout.glyph_origin,
            "placing text overlay"
        );

        if self.background_opacity > 0 {
            let alpha = (f64::from(self.background_opacity) / 100.0 * 255.0).round() as u8;
            engine.fill_rect(
                canvas,
                layout.background_box,
                Rgba::with_alpha(self.background_color, alpha),
            )?;
        }

        engine.draw_text(
            canvas,
            &TextDraw {
                font: &self.font,
                size: self.size,
                rotation: self.rotation,
                x: layout.glyph_origin.0,
                y: layout.glyph_origin.1,
                color: self.color,
                text: &self.text,
            },
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anchor::Position;
    use crate::raster::tests::{MockEngine, RecordedOp};

    /// 100 wide, 12 above minus 2 below the baseline, small descender.
    fn plain_extents() -> TextExtents {
        TextExtents([0, 2, 100, 2, 100, -14, 0, -14])
    }

    const CONTAINER: Dimensions = Dimensions::new(200, 100);

    // =========================================================================
    // Ink box derivation
    // =========================================================================

    #[test]
    fn ink_box_from_plain_extents() {
        let ink = BoundingBox::from_extents(&plain_extents());
        assert_eq!(ink.width, 100);
        // |−14| − |2|, plus the |v5 + v3| correction since v5 < 7.
        assert_eq!(ink.height, 12 + 12);
        assert_eq!(ink.y_offset, -2);
    }

    #[test]
    fn ink_box_corrects_negative_left_bearing() {
        let ink = BoundingBox::from_extents(&TextExtents([-3, 2, 100, 2, 100, -14, -3, -14]));
        assert_eq!(ink.width, 100 + 3 - 1);
    }

    #[test]
    fn ink_box_without_descender_correction() {
        // Upper-right y at 8 (≥ 7): the height correction is skipped.
        let ink = BoundingBox::from_extents(&TextExtents([0, 2, 50, 2, 50, 8, 0, 20]));
        assert_eq!(ink.height, 20 - 2);
        assert_eq!(ink.y_offset, -2);
    }

    // =========================================================================
    // Layout
    // =========================================================================

    #[test]
    fn auto_width_box_hugs_the_ink() {
        let mut text = Text::new("hello", "font.ttf");
        text.set_padding(5);
        let layout = text.layout(&plain_extents(), CONTAINER);

        // box = (100 − 1 + 10) × (24 + 10), anchored bottom-right.
        assert_eq!(layout.background_box, Rect::new(91, 66, 109, 34));
        // left-aligned: x = box_x + padding; baseline y = box_y + ink.h +
        // y_offset + padding.
        assert_eq!(layout.glyph_origin, (96, 66 + 24 - 2 + 5));
    }

    #[test]
    fn percent_width_caps_at_the_container() {
        let mut text = Text::new("hello", "font.ttf");
        text.set_width(TextWidth::Percent(50.0));
        text.set_padding(4);
        text.set_anchor(Anchor::Symbolic(Position::TopLeft));
        let layout = text.layout(&plain_extents(), Dimensions::new(400, 100));
        // 400 * 50% + 8 = 208, under the 400 cap.
        assert_eq!(layout.background_box.width, 208);

        text.set_width(TextWidth::Percent(200.0));
        let layout = text.layout(&plain_extents(), Dimensions::new(400, 100));
        assert_eq!(layout.background_box.width, 400);
    }

    #[test]
    fn center_and_right_alignment_use_box_relative_x() {
        let mut text = Text::new("hello", "font.ttf");
        text.set_width(TextWidth::Percent(50.0));
        text.set_padding(4);
        text.set_anchor(Anchor::Symbolic(Position::TopLeft));

        text.set_align(TextAlign::Center);
        let layout = text.layout(&plain_extents(), Dimensions::new(400, 100));
        // (208 − 100 − 8) / 2
        assert_eq!(layout.glyph_origin.0, 50);

        text.set_align(TextAlign::Right);
        let layout = text.layout(&plain_extents(), Dimensions::new(400, 100));
        // 208 − 4 − 100
        assert_eq!(layout.glyph_origin.0, 104);
    }

    #[test]
    fn absolute_anchor_places_the_box_verbatim() {
        let mut text = Text::new("hi", "font.ttf");
        text.set_anchor(Anchor::Absolute { x: -10, y: 7 });
        let layout = text.layout(&plain_extents(), CONTAINER);
        assert_eq!(layout.background_box.x, -10);
        assert_eq!(layout.background_box.y, 7);
    }

    #[test]
    fn alignment_strings_parse() {
        assert_eq!("left".parse::<TextAlign>().unwrap(), TextAlign::Left);
        assert_eq!("center".parse::<TextAlign>().unwrap(), TextAlign::Center);
        assert_eq!("right".parse::<TextAlign>().unwrap(), TextAlign::Right);
        assert!("justify".parse::<TextAlign>().is_err());
        assert!("Left".parse::<TextAlign>().is_err());
    }

    // =========================================================================
    // Drawing
    // =========================================================================

    #[test]
    fn zero_opacity_skips_the_background_fill() {
        let engine = MockEngine::with_extents(plain_extents());
        let mut canvas = engine.canvas(200, 100);

        let text = Text::new("hello", "font.ttf");
        text.apply(&engine, &mut canvas).unwrap();

        let ops = engine.ops();
        assert_eq!(ops.len(), 1);
        assert!(matches!(&ops[0], RecordedOp::DrawText { text, .. } if text == "hello"));
    }

    #[test]
    fn background_fills_before_glyphs_at_scaled_alpha() {
        let engine = MockEngine::with_extents(plain_extents());
        let mut canvas = engine.canvas(200, 100);

        let mut text = Text::new("hello", "font.ttf");
        text.set_background_opacity(50);
        text.set_background_color(Rgb::new(0, 0, 64));
        text.apply(&engine, &mut canvas).unwrap();

        let ops = engine.ops();
        assert_eq!(ops.len(), 2);
        match &ops[0] {
            RecordedOp::FillRect { color, .. } => {
                assert_eq!(*color, Rgba::with_alpha(Rgb::new(0, 0, 64), 128));
            }
            other => panic!("expected background fill first, got {other:?}"),
        }
        assert!(matches!(&ops[1], RecordedOp::DrawText { .. }));
    }

    #[test]
    fn opacity_clamps_to_one_hundred() {
        let mut text = Text::new("x", "font.ttf");
        text.set_background_opacity(250);
        let engine = MockEngine::with_extents(plain_extents());
        let mut canvas = engine.canvas(200, 100);
        text.apply(&engine, &mut canvas).unwrap();

        match &engine.ops()[0] {
            RecordedOp::FillRect { color, .. } => assert_eq!(color.a, 255),
            other => panic!("expected background fill, got {other:?}"),
        }
    }
}
