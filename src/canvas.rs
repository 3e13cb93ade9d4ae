//! # Canvas Primitives
//!
//! An RGBA raster with the handful of drawing operations a card needs:
//! a uniform background, stroked rectangles, single-line text, alpha paste, and
//! PNG encoding.
//!
//! Drawing never panics on out-of-range geometry: pixels outside the canvas
//! are skipped.

use base64::Engine;
use image::{ImageEncoder, RgbaImage};
use std::path::Path;

use crate::color::{Color, Point};
use crate::error::SenryuError;
use crate::font::FontHandle;

/// Drawing target for the layout engine and the card composer.
///
/// [`Canvas`] is the real implementation; tests substitute recorders to
/// observe exactly what is drawn.
pub trait Surface {
    fn width(&self) -> u32;

    fn height(&self) -> u32;

    /// Draw `text` on a single line with its top-left corner at `top_left`.
    fn draw_text(
        &mut self,
        font: &FontHandle,
        top_left: Point,
        text: &str,
        color: Color,
    ) -> Result<(), SenryuError>;

    /// Draw a stroked rectangle `thickness_px` pixels wide, growing inward
    /// from the outer bounds `top_left`-`bottom_right` (both inclusive).
    fn draw_rect(
        &mut self,
        top_left: Point,
        bottom_right: Point,
        thickness_px: u32,
        color: Color,
    ) -> Result<(), SenryuError>;
}

/// A mutable RGBA image, origin top-left.
#[derive(Debug, Clone, PartialEq)]
pub struct Canvas {
    image: RgbaImage,
}

impl Canvas {
    /// Allocate a canvas filled uniformly with `fill`.
    pub fn new(width: u32, height: u32, fill: Color) -> Result<Self, SenryuError> {
        if width == 0 || height == 0 {
            return Err(SenryuError::Draw(format!(
                "canvas must not be empty (got {}x{})",
                width, height
            )));
        }
        Ok(Self {
            image: RgbaImage::from_pixel(width, height, fill.into()),
        })
    }

    pub fn as_image(&self) -> &RgbaImage {
        &self.image
    }

    /// Color at `(x, y)`, or `None` outside the canvas.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        self.image.get_pixel_checked(x, y).map(|&p| p.into())
    }

    fn in_bounds(&self, x: i32, y: i32) -> Option<(u32, u32)> {
        if x < 0 || y < 0 {
            return None;
        }
        let (x, y) = (x as u32, y as u32);
        (x < self.image.width() && y < self.image.height()).then_some((x, y))
    }

    /// Overwrite one pixel.
    fn put(&mut self, x: i32, y: i32, color: Color) {
        if let Some((x, y)) = self.in_bounds(x, y) {
            self.image.put_pixel(x, y, color.into());
        }
    }

    /// Mix `color` into one pixel by `mask` (0.0 keeps, 1.0 replaces).
    ///
    /// All four channels are interpolated, alpha included.
    fn blend(&mut self, x: i32, y: i32, color: Color, mask: f32) {
        let Some((x, y)) = self.in_bounds(x, y) else {
            return;
        };
        let mask = mask.clamp(0.0, 1.0);
        if mask <= 0.0 {
            return;
        }
        let dst = self.image.get_pixel_mut(x, y);
        let src: [u8; 4] = color.into();
        for (d, s) in dst.0.iter_mut().zip(src) {
            *d = (*d as f32 + (s as f32 - *d as f32) * mask).round() as u8;
        }
    }

    fn hline(&mut self, x1: i32, x2: i32, y: i32, color: Color) {
        for x in x1.min(x2)..=x1.max(x2) {
            self.put(x, y, color);
        }
    }

    fn vline(&mut self, x: i32, y1: i32, y2: i32, color: Color) {
        for y in y1.min(y2)..=y1.max(y2) {
            self.put(x, y, color);
        }
    }

    /// Composite `source` at `(left, top)` using the source's own alpha
    /// channel as the blend mask.
    pub fn paste(&mut self, source: &Canvas, left: i32, top: i32) {
        for (sx, sy, &px) in source.image.enumerate_pixels() {
            let mask = px.0[3] as f32 / 255.0;
            self.blend(left + sx as i32, top + sy as i32, px.into(), mask);
        }
    }

    /// Encode as PNG bytes.
    pub fn to_png(&self) -> Result<Vec<u8>, SenryuError> {
        let mut png_bytes = Vec::new();
        let encoder = image::codecs::png::PngEncoder::new(&mut png_bytes);
        encoder
            .write_image(
                self.image.as_raw(),
                self.image.width(),
                self.image.height(),
                image::ExtendedColorType::Rgba8,
            )
            .map_err(|e: image::ImageError| SenryuError::Image(e.to_string()))?;

        Ok(png_bytes)
    }

    /// Encode as PNG and return the bytes as standard base64 text.
    pub fn to_base64_png(&self) -> Result<String, SenryuError> {
        Ok(base64::engine::general_purpose::STANDARD.encode(self.to_png()?))
    }

    /// Encode as PNG and write it to `path`.
    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<(), SenryuError> {
        std::fs::write(path, self.to_png()?)?;
        Ok(())
    }
}

impl Surface for Canvas {
    fn width(&self) -> u32 {
        self.image.width()
    }

    fn height(&self) -> u32 {
        self.image.height()
    }

    fn draw_text(
        &mut self,
        font: &FontHandle,
        top_left: Point,
        text: &str,
        color: Color,
    ) -> Result<(), SenryuError> {
        font.rasterize(text, |x, y, coverage| {
            self.blend(top_left.x + x, top_left.y + y, color, coverage);
        });
        Ok(())
    }

    fn draw_rect(
        &mut self,
        top_left: Point,
        bottom_right: Point,
        thickness_px: u32,
        color: Color,
    ) -> Result<(), SenryuError> {
        let Point { x: x1, y: y1 } = top_left;
        let Point { x: x2, y: y2 } = bottom_right;

        for i in 0..thickness_px.min(i32::MAX as u32) as i32 {
            let (left, top) = (x1.saturating_add(i), y1.saturating_add(i));
            let (right, bottom) = (x2.saturating_sub(i), y2.saturating_sub(i));
            // Outline collapsed: the border is already solid.
            if left > right || top > bottom {
                break;
            }
            self.hline(left, right, top, color);
            self.hline(left, right, bottom, color);
            self.vline(left, top, bottom, color);
            self.vline(right, top, bottom, color);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::load_font;
    use image::Rgba;

    const FONT: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/fonts/default.ttf");
    const BG: Color = Color::rgba(236, 236, 208, 255);
    const RED: Color = Color::rgba(255, 0, 0, 255);

    #[test]
    fn test_new_fills_uniformly() {
        let canvas = Canvas::new(20, 10, BG).unwrap();
        assert_eq!(canvas.width(), 20);
        assert_eq!(canvas.height(), 10);
        assert!(canvas.as_image().pixels().all(|&p| Color::from(p) == BG));
    }

    #[test]
    fn test_new_keeps_background_alpha() {
        let clear = Color::rgba(10, 20, 30, 0);
        let canvas = Canvas::new(4, 4, clear).unwrap();
        assert_eq!(canvas.pixel(3, 3), Some(clear));
        assert_eq!(canvas.pixel(4, 0), None);
    }

    #[test]
    fn test_new_rejects_empty_canvas() {
        assert!(matches!(Canvas::new(0, 10, BG), Err(SenryuError::Draw(_))));
        assert!(matches!(Canvas::new(10, 0, BG), Err(SenryuError::Draw(_))));
    }

    #[test]
    fn test_rect_draws_border_only() {
        let mut canvas = Canvas::new(20, 20, BG).unwrap();
        canvas
            .draw_rect(Point::new(0, 0), Point::new(19, 19), 3, RED)
            .unwrap();
        for i in 0..3 {
            assert_eq!(canvas.pixel(i, 10), Some(RED));
            assert_eq!(canvas.pixel(19 - i, 10), Some(RED));
            assert_eq!(canvas.pixel(10, i), Some(RED));
            assert_eq!(canvas.pixel(10, 19 - i), Some(RED));
        }
        assert_eq!(canvas.pixel(3, 10), Some(BG));
        assert_eq!(canvas.pixel(16, 10), Some(BG));
        assert_eq!(canvas.pixel(10, 10), Some(BG));
    }

    #[test]
    fn test_rect_thicker_than_half_fills_solid() {
        let mut canvas = Canvas::new(10, 6, BG).unwrap();
        canvas
            .draw_rect(Point::new(0, 0), Point::new(9, 5), 50, RED)
            .unwrap();
        assert!(canvas.as_image().pixels().all(|&p| Color::from(p) == RED));
    }

    #[test]
    fn test_rect_outside_canvas_is_clipped() {
        let mut canvas = Canvas::new(10, 10, BG).unwrap();
        canvas
            .draw_rect(Point::new(-5, -5), Point::new(14, 14), 6, RED)
            .unwrap();
        assert_eq!(canvas.pixel(0, 0), Some(RED));
        assert_eq!(canvas.pixel(5, 5), Some(BG));
        canvas
            .draw_rect(Point::new(100, 100), Point::new(200, 200), 3, RED)
            .unwrap();
        canvas
            .draw_rect(Point::new(5, 5), Point::new(2, 2), 2, RED)
            .unwrap();
        assert_eq!(canvas.pixel(5, 5), Some(BG));
    }

    #[test]
    fn test_paste_uses_source_alpha() {
        let mut canvas = Canvas::new(3, 1, Color::rgba(0, 0, 0, 255)).unwrap();
        let mut source = Canvas::new(3, 1, Color::rgba(200, 100, 50, 255)).unwrap();
        source.image.put_pixel(1, 0, Rgba([200, 100, 50, 0]));
        source.image.put_pixel(2, 0, Rgba([200, 100, 50, 128]));

        canvas.paste(&source, 0, 0);

        assert_eq!(canvas.pixel(0, 0), Some(Color::rgba(200, 100, 50, 255)));
        assert_eq!(canvas.pixel(1, 0), Some(Color::rgba(0, 0, 0, 255)));
        let mixed = canvas.pixel(2, 0).unwrap();
        assert_eq!(mixed.r, 100);
        assert_eq!(mixed.g, 50);
        assert_eq!(mixed.b, 25);
    }

    #[test]
    fn test_paste_with_offset_clips() {
        let mut canvas = Canvas::new(4, 4, BG).unwrap();
        let source = Canvas::new(4, 4, RED).unwrap();
        canvas.paste(&source, 2, -2);
        assert_eq!(canvas.pixel(2, 0), Some(RED));
        assert_eq!(canvas.pixel(3, 1), Some(RED));
        assert_eq!(canvas.pixel(1, 0), Some(BG));
        assert_eq!(canvas.pixel(2, 2), Some(BG));
    }

    #[test]
    fn test_draw_text_marks_pixels() {
        let font = load_font(FONT, 40.0).unwrap();
        let mut canvas = Canvas::new(100, 60, BG).unwrap();
        canvas
            .draw_text(&font, Point::new(5, 5), "Hi", Color::BLACK)
            .unwrap();
        assert!(canvas.as_image().pixels().any(|&p| Color::from(p) == Color::BLACK));
        // Nothing above the requested top edge.
        for x in 0..100 {
            for y in 0..5 {
                assert_eq!(canvas.pixel(x, y), Some(BG));
            }
        }
    }

    #[test]
    fn test_text_masks_by_coverage_only() {
        // A fully covered pixel takes the text color as is, alpha included,
        // even when that alpha is low.
        let font = load_font(FONT, 60.0).unwrap();
        let ghost = Color::rgba(0, 0, 255, 40);
        let mut canvas = Canvas::new(100, 100, BG).unwrap();
        canvas.draw_text(&font, Point::new(10, 0), "█", ghost).unwrap();
        assert!(canvas.as_image().pixels().any(|&p| Color::from(p) == ghost));
        assert!(
            canvas
                .as_image()
                .pixels()
                .all(|&p| p.0[3] >= ghost.a && p.0[3] <= BG.a)
        );
    }

    #[test]
    fn test_png_encoding_round_trips_dimensions() {
        let canvas = Canvas::new(31, 17, BG).unwrap();
        let png = canvas.to_png().unwrap();
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
        let decoded = image::load_from_memory(&png).unwrap().to_rgba8();
        assert_eq!(decoded.dimensions(), (31, 17));
        assert_eq!(Color::from(*decoded.get_pixel(0, 0)), BG);
    }

    #[test]
    fn test_base64_png() {
        let canvas = Canvas::new(2, 2, BG).unwrap();
        let text = canvas.to_base64_png().unwrap();
        let bytes = base64::engine::general_purpose::STANDARD
            .decode(text)
            .unwrap();
        assert_eq!(bytes, canvas.to_png().unwrap());
    }

    #[test]
    fn test_save_png_writes_file() {
        let path = std::env::temp_dir().join(format!("senryu-{}.png", uuid::Uuid::new_v4()));
        Canvas::new(3, 3, BG).unwrap().save_png(&path).unwrap();
        let decoded = image::open(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!((decoded.width(), decoded.height()), (3, 3));
    }
}
