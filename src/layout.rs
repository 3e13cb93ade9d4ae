//! # Text Layout
//!
//! Places text on a [`Surface`]: horizontal labels anchored by their bottom
//! edge, and vertical columns stacked one character per row.
//!
//! ## Vertical alignment
//!
//! Column heights for center and bottom alignment are estimated as
//! `char_count * font_size` (the nominal size, truncated to an integer)
//! rather than from measured glyph heights, while the rows themselves
//! advance by each glyph's measured height. The two differ on purpose:
//! existing card output depends on both, so neither may be swapped for the
//! other.
//!
//! ```text
//! top:    y = margin
//! center: y = margin + floor((H - 2*margin - n*s) / 2)
//! bottom: y = H - n*s - margin
//! ```

use serde::{Deserialize, Serialize};

use crate::canvas::Surface;
use crate::color::{Color, Point};
use crate::error::SenryuError;
use crate::font::FontHandle;

/// Drawn in place of horizontal dashes inside a vertical column.
pub const VERTICAL_HYPHEN: char = '│';

/// Dash-like characters that read as broken when left unrotated in a
/// vertical column.
pub const HORIZONTAL_DASHES: &[char] = &['〜', '~', '-', 'ー'];

/// Replace a horizontal dash with [`VERTICAL_HYPHEN`]; other characters pass
/// through unchanged.
pub fn normalize_vertical(ch: char) -> char {
    if HORIZONTAL_DASHES.contains(&ch) {
        VERTICAL_HYPHEN
    } else {
        ch
    }
}

/// Where a vertical column sits between the top and bottom margins.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerticalAlign {
    #[default]
    Top,
    Center,
    Bottom,
}

impl VerticalAlign {
    /// Starting y of a column of `char_count` characters.
    pub fn start_y(self, canvas_height: u32, margin: i32, char_count: usize, font_size: f32) -> i32 {
        let height = canvas_height as i64;
        let margin = margin as i64;
        let label_height = estimated_column_height(char_count, font_size);

        let y = match self {
            VerticalAlign::Top => margin,
            VerticalAlign::Center => {
                margin + (height - 2 * margin - label_height).div_euclid(2)
            }
            VerticalAlign::Bottom => height - label_height - margin,
        };
        y.clamp(i32::MIN as i64, i32::MAX as i64) as i32
    }
}

/// `char_count * trunc(font_size)`.
fn estimated_column_height(char_count: usize, font_size: f32) -> i64 {
    (char_count as i64).saturating_mul(font_size as i64)
}

/// Draw `text` on one line so that its bottom edge sits on `bottom_y`.
pub fn draw_horizontal_label<S: Surface + ?Sized>(
    surface: &mut S,
    left_x: i32,
    bottom_y: i32,
    text: &str,
    font: &FontHandle,
    color: Color,
) -> Result<(), SenryuError> {
    let (_, text_height) = font.measure(text);
    let top_left = Point::new(left_x, bottom_y - text_height as i32);
    surface.draw_text(font, top_left, text, color)
}

/// Draw `text` as a column, one character per row, starting at `top_y`.
///
/// Each row advances by the measured height of the drawn character. The
/// column is never wrapped; text longer than the canvas runs off the bottom.
pub fn draw_vertical_label<S: Surface + ?Sized>(
    surface: &mut S,
    left_x: i32,
    top_y: i32,
    text: &str,
    font: &FontHandle,
    color: Color,
) -> Result<(), SenryuError> {
    let mut y = top_y;
    let mut buf = [0u8; 4];

    for ch in text.chars() {
        let glyph: &str = normalize_vertical(ch).encode_utf8(&mut buf);
        let (_, char_height) = font.measure(glyph);
        surface.draw_text(font, Point::new(left_x, y), glyph, color)?;
        y = y.saturating_add(char_height as i32);
    }
    Ok(())
}

/// Draw a vertical column aligned between the canvas margins.
pub fn draw_aligned_vertical_label<S: Surface + ?Sized>(
    surface: &mut S,
    left_x: i32,
    text: &str,
    font: &FontHandle,
    color: Color,
    margin: i32,
    align: VerticalAlign,
) -> Result<(), SenryuError> {
    let top_y = align.start_y(
        surface.height(),
        margin,
        text.chars().count(),
        font.size_px(),
    );
    draw_vertical_label(surface, left_x, top_y, text, font, color)
}
