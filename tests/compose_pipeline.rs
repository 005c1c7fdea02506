//! Integration tests driving the full pipeline against the real in-memory
//! engine: geometry, decorators and border composited end to end, verified
//! at the pixel level.

use easel::color::Rgb;
use easel::engine::{MemoryCanvas, MemoryEngine};
use easel::geometry::Dimensions;
use easel::image::Image;
use easel::raster::{Background, Canvas, RasterEngine, Rgba};
use easel::text::Text;
use easel::watermark::Watermark;
use easel::{Anchor, Position};

fn solid(engine: &MemoryEngine, w: u32, h: u32, rgb: Rgb) -> MemoryCanvas {
    engine
        .create_canvas(Dimensions::new(w, h), Background::Solid(rgb))
        .unwrap()
}

#[test]
fn thumbnail_with_text_watermark_and_border() {
    let engine = MemoryEngine::new();
    let source = solid(&engine, 64, 48, Rgb::new(20, 40, 200));

    let mut image = Image::<MemoryEngine>::new(source);
    image.set_border(1, Rgb::WHITE);
    image.fill_crop(&engine, 32, None).unwrap();
    assert_eq!(image.output_dimensions(), Dimensions::new(32, 32));

    // Green "I" in the top-left corner. With the built-in 8x8 face the ink
    // lands in the lower half of the doubled-height box: x 0..8, y 8..16.
    let mut caption = Text::new("I", "builtin-8x8");
    caption.set_size(8.0);
    caption.set_color(Rgb::new(0, 255, 0));
    caption.set_anchor(Anchor::Symbolic(Position::TopLeft));
    image.add_text(&engine, &caption).unwrap();

    // Red 8x8 watermark in the bottom-right corner, 2px margin.
    let mut mark = Watermark::new(solid(&engine, 8, 8, Rgb::new(220, 0, 0)));
    mark.set_margin(2);
    image.add_watermark(&engine, &mark).unwrap();

    let output = image.finish(&engine).unwrap();
    assert_eq!(output.dimensions(), Dimensions::new(32, 32));

    // Border outline.
    assert_eq!(
        engine.get_pixel(&output, 0, 0).unwrap(),
        Rgba::opaque(Rgb::WHITE)
    );
    assert_eq!(
        engine.get_pixel(&output, 31, 0).unwrap(),
        Rgba::opaque(Rgb::WHITE)
    );

    // Watermark body at (22..30, 22..30).
    assert_eq!(
        engine.get_pixel(&output, 25, 25).unwrap(),
        Rgba::opaque(Rgb::new(220, 0, 0))
    );

    // Caption ink somewhere in its glyph cell.
    let mut green_pixels = 0;
    for y in 8..16 {
        for x in 0..8 {
            if engine.get_pixel(&output, x, y).unwrap().rgb() == Rgb::new(0, 255, 0) {
                green_pixels += 1;
            }
        }
    }
    assert!(green_pixels > 0, "caption left no ink");

    // The background between decorators is untouched image content.
    assert_eq!(
        engine.get_pixel(&output, 16, 20).unwrap(),
        Rgba::opaque(Rgb::new(20, 40, 200))
    );
}

#[test]
fn contain_centers_without_scaling_a_fitting_source() {
    let engine = MemoryEngine::new();
    let source = solid(&engine, 200, 100, Rgb::WHITE);

    let mut image = Image::<MemoryEngine>::new(source);
    image.contain(&engine, 500, Some(500), None).unwrap();
    let output = image.finish(&engine).unwrap();

    assert_eq!(output.dimensions(), Dimensions::new(500, 500));
    // Image body occupies (150..350, 200..300); everything else is
    // transparent letterbox.
    assert_eq!(
        engine.get_pixel(&output, 150, 200).unwrap(),
        Rgba::opaque(Rgb::WHITE)
    );
    assert_eq!(
        engine.get_pixel(&output, 349, 299).unwrap(),
        Rgba::opaque(Rgb::WHITE)
    );
    assert_eq!(engine.get_pixel(&output, 149, 250).unwrap(), Rgba::TRANSPARENT);
    assert_eq!(engine.get_pixel(&output, 250, 199).unwrap(), Rgba::TRANSPARENT);
    assert_eq!(engine.get_pixel(&output, 0, 0).unwrap(), Rgba::TRANSPARENT);
}

#[test]
fn fill_crop_keeps_the_centered_columns() {
    let engine = MemoryEngine::new();
    // 4x2 source: columns 0-1 red, columns 2-3 green.
    let mut source = solid(&engine, 4, 2, Rgb::new(255, 0, 0));
    for y in 0..2 {
        for x in 2..4 {
            engine
                .set_pixel(&mut source, x, y, Rgba::opaque(Rgb::new(0, 255, 0)))
                .unwrap();
        }
    }

    let mut image = Image::<MemoryEngine>::new(source);
    image.fill_crop(&engine, 2, Some(2)).unwrap();
    let output = image.finish(&engine).unwrap();

    // Cover scale is 1:1, so the crop keeps source columns 1 and 2.
    assert_eq!(output.dimensions(), Dimensions::new(2, 2));
    assert_eq!(
        engine.get_pixel(&output, 0, 0).unwrap().rgb(),
        Rgb::new(255, 0, 0)
    );
    assert_eq!(
        engine.get_pixel(&output, 1, 0).unwrap().rgb(),
        Rgb::new(0, 255, 0)
    );
}

#[test]
fn average_color_of_a_uniform_source() {
    let engine = MemoryEngine::new();
    let image = Image::<MemoryEngine>::new(solid(&engine, 12, 8, Rgb::new(100, 50, 250)));
    assert_eq!(image.average_color(&engine).unwrap(), "#6633FF");
}

#[test]
fn saturating_a_gray_image_changes_nothing() {
    let engine = MemoryEngine::new();
    let mut image = Image::<MemoryEngine>::new(solid(&engine, 3, 3, Rgb::new(128, 128, 128)));

    image.set_saturation(&engine, 2.0).unwrap();
    let output = image.finish(&engine).unwrap();
    for y in 0..3 {
        for x in 0..3 {
            assert_eq!(
                engine.get_pixel(&output, x, y).unwrap().rgb(),
                Rgb::new(128, 128, 128)
            );
        }
    }
}
