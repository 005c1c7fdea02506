//! Border compositor: concentric inset rectangle outlines.

use crate::color::Rgb;
use crate::error::Result;
use crate::raster::{Canvas, RasterEngine, Rgba};
use crate::geometry::Rect;
use serde::{Deserialize, Serialize};

/// A solid border drawn as `width` nested one-pixel outlines.
///
/// A zero width or a missing color makes [`apply`](Self::apply) a no-op.
/// The border is applied as the final output step, after all geometry and
/// decorators, so it is never resampled away by a later operation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Border {
    width: u32,
    color: Option<Rgb>,
}

impl Border {
    pub const fn new(width: u32, color: Rgb) -> Self {
        Self {
            width,
            color: Some(color),
        }
    }

    pub fn set_width(&mut self, width: u32) {
        self.width = width;
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn set_color(&mut self, color: Rgb) {
        self.color = Some(color);
    }

    pub fn color(&self) -> Option<Rgb> {
        self.color
    }

    /// Draw the border onto `canvas`.
    ///
    /// The outermost rectangle touches the canvas edges; each subsequent one
    /// is inset by one more pixel, so the visual thickness equals the
    /// configured width.
    pub fn apply<E: RasterEngine>(&self, engine: &E, canvas: &mut E::Canvas) -> Result<()> {
        let Some(color) = self.color else {
            return Ok(());
        };
        if self.width == 0 {
            return Ok(());
        }

        let (w, h) = (i64::from(canvas.width()), i64::from(canvas.height()));
        let color = Rgba::opaque(color);
        for inset in 0..i64::from(self.width) {
            let rw = w - 2 * inset;
            let rh = h - 2 * inset;
            if rw <= 0 || rh <= 0 {
                break;
            }
            engine.draw_rect(canvas, Rect::new(inset, inset, rw as u32, rh as u32), color)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::tests::{MockEngine, RecordedOp};

    #[test]
    fn zero_width_never_calls_the_draw_primitive() {
        let engine = MockEngine::new();
        let mut canvas = engine.canvas(100, 80);

        Border::new(0, Rgb::WHITE).apply(&engine, &mut canvas).unwrap();
        assert!(engine.ops().is_empty());
    }

    #[test]
    fn missing_color_is_a_no_op() {
        let engine = MockEngine::new();
        let mut canvas = engine.canvas(100, 80);

        Border::default().apply(&engine, &mut canvas).unwrap();
        assert!(engine.ops().is_empty());
    }

    #[test]
    fn draws_one_outline_per_width_pixel_with_increasing_insets() {
        let engine = MockEngine::new();
        let mut canvas = engine.canvas(100, 80);

        Border::new(3, Rgb::new(0, 0, 255))
            .apply(&engine, &mut canvas)
            .unwrap();

        let ops = engine.ops();
        assert_eq!(ops.len(), 3);
        let expected = [
            Rect::new(0, 0, 100, 80),
            Rect::new(1, 1, 98, 78),
            Rect::new(2, 2, 96, 76),
        ];
        for (op, want) in ops.iter().zip(expected) {
            match op {
                RecordedOp::DrawRect { rect, color } => {
                    assert_eq!(*rect, want);
                    assert_eq!(*color, Rgba::opaque(Rgb::new(0, 0, 255)));
                }
                other => panic!("unexpected op {other:?}"),
            }
        }
    }

    #[test]
    fn stops_once_insets_consume_the_canvas() {
        let engine = MockEngine::new();
        let mut canvas = engine.canvas(4, 4);

        Border::new(10, Rgb::WHITE).apply(&engine, &mut canvas).unwrap();
        // A 4x4 canvas only has room for two nested outlines.
        assert_eq!(engine.ops().len(), 2);
    }
}
